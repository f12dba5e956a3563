//! # Data Transfer Objects (DTO) Module
//!
//! API 경계의 요청/응답 구조체입니다. 요청 DTO 는 `validator` 로 검증되며,
//! 검증 실패는 핸들러에서 `AppError::ValidationError` (400) 로 변환됩니다.
//!
//! ```rust,ignore
//! payload.validate()
//!     .map_err(|e| AppError::ValidationError(e.to_string()))?;
//! ```

pub mod users;
