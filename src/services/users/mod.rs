//! 사용자 관리 서비스 모듈
//!
//! - [`user_service`] - 로컬 회원가입, 로그인, 회원 탈퇴
//! - [`profile_service`] - 프로필 조회 / 생성 / 부분 수정
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let response = user_service.sign_up(request).await?;
//! ```

pub mod profile_service;
pub mod user_service;

pub use profile_service::ProfileService;
pub use user_service::UserService;
