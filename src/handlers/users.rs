//! 로컬 계정 핸들러
//!
//! `/user` 스코프의 회원가입, 로그인, 조회, 탈퇴 엔드포인트입니다.

use actix_web::{web, HttpResponse, get, post, delete};
use validator::Validate;
use crate::core::errors::{AppError, ErrorResponse};
use crate::domain::dto::users::request::{SignInRequest, SignUpRequest};
use crate::domain::dto::users::response::UserResponse;
use crate::services::users::user_service::UserService;

/// 회원가입 (201)
#[utoipa::path(
    post,
    path = "/user",
    tag = "user",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "가입 완료", body = UserResponse),
        (status = 400, description = "입력값 검증 실패", body = ErrorResponse),
        (status = 409, description = "이메일 중복", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn sign_up(
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.sign_up(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    post,
    path = "/user/sign-in",
    tag = "user",
    request_body = SignInRequest,
    responses(
        (status = 200, body = UserResponse),
        (status = 401, description = "이메일 또는 비밀번호 불일치", body = ErrorResponse),
    )
)]
#[post("/sign-in")]
pub async fn sign_in(
    payload: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.sign_in(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "user",
    params(("user_id" = String, Path, description = "사용자 ID")),
    responses(
        (status = 200, body = UserResponse),
        (status = 404, body = ErrorResponse),
    )
)]
#[get("/{user_id}")]
pub async fn get_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let user = service.get_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// 회원 탈퇴 (204, 프로필 연쇄 삭제)
#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    tag = "user",
    params(("user_id" = String, Path, description = "사용자 ID")),
    responses(
        (status = 204, description = "탈퇴 완료"),
        (status = 404, body = ErrorResponse),
    )
)]
#[delete("/{user_id}")]
pub async fn withdraw(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    service.withdraw(&user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
