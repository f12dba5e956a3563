//! # Configuration Module
//!
//! 환경 변수 기반 설정을 타입별 접근자로 제공합니다.
//! 실행 시 `PROFILE` 에 따라 `.env.dev` / `.env.prod` 가 먼저 로드됩니다(`main.rs`).
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, 비밀번호 해싱
//! - [`auth_config`] - 소셜 로그인 프로바이더, OAuth 공통 설정, `AuthProvider`
//!
//! ```rust,ignore
//! use crate::config::{ServerConfig, KakaoOAuthConfig};
//!
//! let bind = ServerConfig::bind_address();      // "127.0.0.1:4000"
//! let kakao = KakaoOAuthConfig::settings();     // 누락된 값은 None
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
