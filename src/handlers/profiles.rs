use actix_web::{web, HttpResponse, get, patch, post};
use validator::Validate;
use crate::core::errors::{AppError, ErrorResponse};
use crate::domain::dto::users::request::{CreateProfileRequest, UpdateProfileRequest};
use crate::domain::dto::users::response::ProfileResponse;
use crate::services::users::profile_service::ProfileService;

#[utoipa::path(
    get,
    path = "/user/{user_id}/profile",
    tag = "profile",
    params(("user_id" = String, Path, description = "사용자 ID")),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 404, description = "사용자 또는 프로필 없음", body = ErrorResponse),
    )
)]
#[get("/{user_id}/profile")]
pub async fn get_profile(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ProfileService::instance();
    let profile = service.get_profile(&user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    post,
    path = "/user/{user_id}/profile",
    tag = "profile",
    params(("user_id" = String, Path, description = "사용자 ID")),
    request_body = CreateProfileRequest,
    responses(
        (status = 201, body = ProfileResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, description = "이미 프로필이 있음", body = ErrorResponse),
    )
)]
#[post("/{user_id}/profile")]
pub async fn create_profile(
    user_id: web::Path<String>,
    payload: web::Json<CreateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ProfileService::instance();
    let profile = service.create_profile(&user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(profile))
}

#[utoipa::path(
    patch,
    path = "/user/{user_id}/profile",
    tag = "profile",
    params(("user_id" = String, Path, description = "사용자 ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, description = "수정할 항목 없음", body = ErrorResponse),
        (status = 404, body = ErrorResponse),
    )
)]
#[patch("/{user_id}/profile")]
pub async fn update_profile(
    user_id: web::Path<String>,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    if payload.is_empty() {
        return Err(AppError::ValidationError("수정할 항목이 없습니다.".to_string()));
    }

    let service = ProfileService::instance();
    let profile = service.update_profile(&user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(profile))
}
