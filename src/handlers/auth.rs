//! 소셜 로그인 핸들러
//!
//! 경로의 `{provider}` 는 `google`, `kakao`, `naver` 중 하나이며 대소문자를 구분하지 않습니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, ErrorResponse};
use crate::domain::dto::users::request::{OAuthCallbackQuery, SocialSignInRequest, UnlinkRequest};
use crate::domain::dto::users::response::{OAuthLoginUrlResponse, SocialSignInResponse};
use crate::services::auth::SocialAuthService;

fn parse_provider(provider: &str) -> Result<AuthProvider, AppError> {
    AuthProvider::social_from_str(provider).map_err(AppError::ValidationError)
}

#[utoipa::path(
    get,
    path = "/auth/{provider}/login",
    tag = "auth",
    params(("provider" = String, Path, description = "google, kakao, naver")),
    responses(
        (status = 200, body = OAuthLoginUrlResponse),
        (status = 400, description = "지원하지 않는 프로바이더", body = ErrorResponse),
        (status = 500, description = "프로바이더 설정 누락", body = ErrorResponse),
    )
)]
#[get("/{provider}/login")]
pub async fn social_login_url(
    provider: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&provider)?;

    let service = SocialAuthService::instance();
    let response = service.login_url(provider).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/auth/{provider}/callback",
    tag = "auth",
    params(("provider" = String, Path, description = "google, kakao, naver"), OAuthCallbackQuery),
    responses(
        (status = 200, body = SocialSignInResponse),
        (status = 400, body = ErrorResponse),
        (status = 401, description = "state 불일치 또는 프로바이더 인증 실패", body = ErrorResponse),
        (status = 409, description = "다른 방식으로 가입된 이메일", body = ErrorResponse),
    )
)]
#[get("/{provider}/callback")]
pub async fn social_callback(
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&provider)?;

    if let Some(message) = query.provider_error() {
        log::warn!("{} OAuth 에러: {}", provider.display_name(), message);
        return Err(AppError::AuthenticationError(message));
    }

    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let code = query.code.as_deref()
        .ok_or_else(|| AppError::ValidationError("Authorization code가 필요합니다".to_string()))?;
    let state = query.state.as_deref().unwrap_or_default();

    let service = SocialAuthService::instance();
    let response = service.sign_in(provider, code, state).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/auth/{provider}/unlink",
    tag = "auth",
    params(("provider" = String, Path, description = "google, kakao, naver")),
    request_body = UnlinkRequest,
    responses(
        (status = 204, description = "연결 해제 완료"),
        (status = 400, body = ErrorResponse),
    )
)]
#[post("/{provider}/unlink")]
pub async fn social_unlink(
    provider: web::Path<String>,
    payload: web::Json<UnlinkRequest>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&provider)?;

    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = SocialAuthService::instance();
    service.unlink(provider, &payload.access_token).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 클라이언트가 보유한 프로바이더 신원으로 가입 (신규 201, 기존 200)
#[utoipa::path(
    post,
    path = "/auth/social",
    tag = "auth",
    request_body = SocialSignInRequest,
    responses(
        (status = 201, description = "신규 가입", body = SocialSignInResponse),
        (status = 200, description = "기존 계정", body = SocialSignInResponse),
        (status = 400, body = ErrorResponse),
        (status = 409, body = ErrorResponse),
    )
)]
#[post("/social")]
pub async fn social_register(
    payload: web::Json<SocialSignInRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = SocialAuthService::instance();
    let response = service.register_social_user(payload.into_inner()).await?;

    if response.is_new_user {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}
