//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserRepository`](user_repo::UserRepository) 와 [`ProfileRepository`](profile_repo::ProfileRepository)
//! 는 `#[repository]` 매크로로 싱글톤 관리됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod profile_repo;
pub mod user_repo;
