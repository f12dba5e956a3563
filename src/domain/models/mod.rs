//! # Domain Models Module
//!
//! 외부 시스템(OAuth 프로바이더)과 주고받는 값 객체를 정의합니다.
//! 엔티티와 달리 저장되지 않으며, 서비스 계층에서 엔티티로 변환됩니다.

pub mod oauth;
