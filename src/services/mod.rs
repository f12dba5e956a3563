//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로 또는 `OnceCell` + `inventory` 로 싱글톤 관리됩니다.
//!
//! - [`users`] - 로컬 계정과 프로필
//! - [`auth`] - 소셜 로그인 어댑터와 연동 흐름
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, auth::SocialAuthService};
//!
//! let user_service = UserService::instance();
//! let social_auth_service = SocialAuthService::instance();
//! ```

pub mod users;
pub mod auth;
