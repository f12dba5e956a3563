//! OpenAPI 문서
//!
//! `GET /api-json` 으로 전체 API 명세(JSON)를 제공합니다.

use actix_web::{get, HttpResponse};
use utoipa::OpenApi;
use crate::config::AuthProvider;
use crate::core::errors::ErrorResponse;
use crate::domain::dto::users::request::{
    CreateProfileRequest, SignInRequest, SignUpRequest, SocialSignInRequest, UnlinkRequest, UpdateProfileRequest,
};
use crate::domain::dto::users::response::{
    OAuthLoginUrlResponse, ProfileResponse, SocialSignInResponse, UserResponse,
};
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Auth API",
        description = "로컬 계정과 Google / Kakao / Naver 소셜 로그인 API"
    ),
    paths(
        handlers::users::sign_up,
        handlers::users::sign_in,
        handlers::users::get_user,
        handlers::users::withdraw,
        handlers::profiles::get_profile,
        handlers::profiles::create_profile,
        handlers::profiles::update_profile,
        handlers::auth::social_login_url,
        handlers::auth::social_callback,
        handlers::auth::social_unlink,
        handlers::auth::social_register,
    ),
    components(schemas(
        AuthProvider,
        ErrorResponse,
        SignUpRequest,
        SignInRequest,
        SocialSignInRequest,
        CreateProfileRequest,
        UpdateProfileRequest,
        UnlinkRequest,
        UserResponse,
        ProfileResponse,
        OAuthLoginUrlResponse,
        SocialSignInResponse,
    )),
    tags(
        (name = "user", description = "로컬 회원가입 / 로그인 / 탈퇴"),
        (name = "profile", description = "사용자 프로필"),
        (name = "auth", description = "소셜 로그인"),
    )
)]
pub struct ApiDoc;

#[get("/api-json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for path in [
            "/user",
            "/user/sign-in",
            "/user/{user_id}",
            "/user/{user_id}/profile",
            "/auth/{provider}/login",
            "/auth/{provider}/callback",
            "/auth/{provider}/unlink",
            "/auth/social",
        ] {
            assert!(paths.contains_key(path), "{}", path);
        }

        let profile = &paths["/user/{user_id}/profile"];
        assert!(profile.get("get").is_some());
        assert!(profile.get("post").is_some());
        assert!(profile.get("patch").is_some());
    }

    #[test]
    fn test_schemas_use_wire_field_names() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        let sign_up = &schemas["SignUpRequest"]["properties"];
        assert!(sign_up.get("serviceAgreed").is_some());
        assert!(sign_up.get("password").is_some());

        let user = &schemas["UserResponse"]["properties"];
        assert!(user.get("isEmailVerified").is_some());
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());

        assert!(schemas["OAuthLoginUrlResponse"]["properties"].get("loginUrl").is_some());
    }
}
