//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 로그 마스킹
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들

pub mod string_utils;
pub mod display_terminal;
