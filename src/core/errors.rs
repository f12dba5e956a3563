//! # Application Error Handling System
//!
//! 백엔드 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?`로 전파된 에러가 그대로 HTTP 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 소셜 응답 형식 오류 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, 토큰 발급 실패, state 불일치 |
//! | `AuthorizationError` | 403 Forbidden | 권한 부족 |
//! | `NotFound` | 404 Not Found | 사용자/프로필 없음 |
//! | `ConflictError` | 409 Conflict | 이메일 중복, 다른 프로바이더 계정 존재 |
//! | `UpstreamError` | 프로바이더 응답 상태 그대로 | 소셜 API 가 실패를 보고함 |
//! | `ConfigurationError` | 500 Internal Server Error | 소셜 로그인 설정 누락 |
//! | `DatabaseError` / `RedisError` | 500 Internal Server Error | 저장소 오류 |
//! | `ExternalServiceError` / `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn sign_up_handler(
//!     payload: web::Json<SignUpRequest>
//! ) -> Result<HttpResponse, AppError> {
//!     let service = UserService::instance();
//!     let user = service.sign_up(payload.into_inner()).await?; // 자동으로 HTTP 응답 변환
//!     Ok(HttpResponse::Created().json(user))
//! }
//! ```

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// 에러 응답 본문
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "이미 사용 중인 이메일입니다.")]
    pub error: String,
}

/// 애플리케이션 전역 에러 타입
///
/// 소셜 로그인 어댑터의 세 가지 실패 유형(설정 누락, 프로바이더 실패 응답,
/// 응답 형식 검증 실패)은 각각 `ConfigurationError`, `UpstreamError`,
/// `AuthenticationError`/`ValidationError` 로 표현됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 필수 설정값 누락 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 외부 프로바이더가 보고한 실패
    ///
    /// `status` 는 프로바이더가 돌려준 HTTP 상태 코드이며 응답에도 그대로 사용됩니다.
    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 프로바이더 실패 응답으로부터 에러를 생성합니다.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        AppError::UpstreamError {
            status,
            message: message.into(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::UpstreamError { status, .. } => {
                // 상태 코드 범위를 벗어난 값은 500으로 처리
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|code| code.is_client_error() || code.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러는 `{"error": "..."}` 형태의 JSON 본문으로 내려갑니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(ErrorResponse {
                error: self.to_string(),
            })
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Profile not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Email already used".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid state".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_configuration_error_is_internal() {
        let error = AppError::ConfigurationError("KAKAO_CLIENT_ID".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_error_keeps_provider_status() {
        let error = AppError::upstream(401, "invalid_grant");
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
        assert!(error.to_string().contains("invalid_grant"));

        let error = AppError::upstream(429, "rate limited");
        assert_eq!(error.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_upstream_error_with_non_error_status_falls_back_to_500() {
        // 네이버는 실패를 200으로 응답하기도 함
        let error = AppError::upstream(200, "no token");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = AppError::upstream(42, "bogus");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
