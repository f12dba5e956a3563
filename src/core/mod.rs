//! # Core
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - `inventory` 로 수집된 서비스/리포지토리/OAuth 어댑터 생성자를 관리
//! - `Database`, `RedisClient` 는 `ServiceLocator::set()` 으로 수동 등록
//!
//! ### [`errors`] - 통합 에러 처리
//! - `AppError` 와 HTTP 상태 코드 매핑, `{"error": "..."}` 응답 본문
//!
//! ```rust,ignore
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis);
//! ServiceLocator::initialize_all().await?;
//!
//! let service = SocialAuthService::instance();
//! ```
//!
//! ### 순환 참조 감지
//! ```text
//! panic: Circular dependency detected: UserService is already being initialized
//! ```
//! 서비스 간 의존은 단방향(서비스 → 리포지토리)으로만 둡니다.

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
