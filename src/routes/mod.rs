//! 라우트 구성
//!
//! ```text
//! GET    /health
//! GET    /api-json                     OpenAPI 문서
//! POST   /user                         회원가입
//! POST   /user/sign-in                 로그인
//! GET    /user/{user_id}               사용자 조회
//! DELETE /user/{user_id}               회원 탈퇴 (프로필 연쇄 삭제)
//! GET    /user/{user_id}/profile       프로필 조회
//! POST   /user/{user_id}/profile       프로필 생성
//! PATCH  /user/{user_id}/profile       프로필 수정
//! GET    /auth/{provider}/login        소셜 로그인 URL
//! GET    /auth/{provider}/callback     소셜 로그인 콜백
//! POST   /auth/{provider}/unlink       소셜 연결 해제
//! POST   /auth/social                  소셜 가입
//! ```

pub mod api_doc;

use crate::handlers;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
    cfg.service(api_doc::openapi_json);

    configure_user_routes(cfg);
    configure_auth_routes(cfg);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(handlers::users::sign_up)
            .service(handlers::users::sign_in)
            .service(handlers::profiles::get_profile)
            .service(handlers::profiles::create_profile)
            .service(handlers::profiles::update_profile)
            .service(handlers::users::get_user)
            .service(handlers::users::withdraw)
    );
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::social_register)
            .service(handlers::auth::social_login_url)
            .service(handlers::auth::social_callback)
            .service(handlers::auth::social_unlink)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "social_auth_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "social_providers": ["google", "kakao", "naver"]
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "social_auth_backend");
    }

    #[actix_web::test]
    async fn test_openapi_document_is_served() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api-json").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["info"]["title"], "Social Auth API");
        assert!(body["paths"]["/auth/{provider}/callback"]["get"].is_object());
    }

    #[actix_web::test]
    async fn test_unknown_provider_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for uri in ["/auth/github/login", "/auth/local/login", "/auth/facebook/callback?code=c&state=s"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_callback_with_provider_error_is_unauthorized() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get()
            .uri("/auth/Kakao/callback?error=access_denied&error_description=User%20denied%20access")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("User denied access"));
    }

    #[actix_web::test]
    async fn test_callback_without_code_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/auth/google/callback?state=abc").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_sign_up_with_weak_password_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/user")
            .set_json(json!({
                "email": "user@example.com",
                "password": "password",
                "serviceAgreed": true,
                "privacyAgreed": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_sign_up_without_required_consent_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/user")
            .set_json(json!({
                "email": "user@example.com",
                "password": "abcd123!",
                "serviceAgreed": true,
                "privacyAgreed": false
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_empty_profile_update_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::patch()
            .uri("/user/65f0c0ffee0000000000abcd/profile")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_social_register_with_local_provider_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/auth/social")
            .set_json(json!({
                "provider": "local",
                "providerId": "1",
                "email": "user@example.com",
                "serviceAgreed": true,
                "privacyAgreed": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
