//! Kakao 로그인 어댑터
//!
//! Client Secret 은 카카오 디벨로퍼스에서 활성화한 경우에만 토큰 요청에 포함합니다.

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Client;
use crate::config::{AuthProvider, KakaoOAuthConfig, OAuthClientSettings};
use crate::core::errors::AppError;
use crate::domain::models::oauth::{KakaoUserInfo, OAuthTokenResponse, SocialUserInfo};
use super::provider::{
    build_url, client_id_and_redirect, ensure_access_token, http_client, log_rejected, read_json,
    transport_error, LoginUrl, OAuthEndpoints, OAuthProvider, OAUTH_ERROR_MESSAGE_KEYS,
};

const TOKEN_FALLBACK: &str = "Kakao 토큰 발급에 실패했습니다.";
const USER_INFO_FALLBACK: &str = "Kakao 사용자 정보 조회에 실패했습니다.";
const UNLINK_FAILURE: &str = "Kakao 연결 끊기에 실패했습니다.";

impl OAuthEndpoints {
    pub fn kakao() -> Self {
        Self {
            authorize_url: "https://kauth.kakao.com/oauth/authorize".to_string(),
            token_url: "https://kauth.kakao.com/oauth/token".to_string(),
            user_info_url: "https://kapi.kakao.com/v2/user/me".to_string(),
            revoke_url: "https://kapi.kakao.com/v1/user/unlink".to_string(),
        }
    }
}

/// Kakao 로그인 어댑터
pub struct KakaoOAuthService {
    settings: OAuthClientSettings,
    endpoints: OAuthEndpoints,
    http: Client,
}

static KAKAO_OAUTH_SERVICE_INSTANCE: OnceCell<Arc<KakaoOAuthService>> = OnceCell::new();

impl KakaoOAuthService {
    pub fn instance() -> Arc<Self> {
        KAKAO_OAUTH_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(KakaoOAuthConfig::settings(), OAuthEndpoints::kakao())))
            .clone()
    }

    pub fn new(settings: OAuthClientSettings, endpoints: OAuthEndpoints) -> Self {
        Self {
            settings,
            endpoints,
            http: http_client(),
        }
    }
}

#[async_trait]
impl OAuthProvider for KakaoOAuthService {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Kakao
    }

    fn login_url(&self, state: Option<&str>) -> Result<LoginUrl, AppError> {
        let (client_id, redirect_uri) = client_id_and_redirect(&self.settings, self.provider(), KakaoOAuthConfig::ENV_PREFIX)
            .inspect_err(|e| log::error!("Kakao 로그인 URL 생성 실패: {}", e))?;

        let mut params = vec![
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
        ];
        if let Some(state) = state {
            params.push(("state", state));
        }

        Ok(LoginUrl {
            url: build_url(&self.endpoints.authorize_url, &params),
            state: state.map(str::to_string),
        })
    }

    async fn exchange_code(&self, code: &str, _state: &str) -> Result<OAuthTokenResponse, AppError> {
        let (client_id, redirect_uri) = client_id_and_redirect(&self.settings, self.provider(), KakaoOAuthConfig::ENV_PREFIX)
            .inspect_err(|e| log::error!("Kakao 토큰 교환 실패: {}", e))?;

        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ];
        if let Some(client_secret) = self.settings.client_secret.as_deref() {
            params.push(("client_secret", client_secret));
        }

        let response = self.http
            .post(&self.endpoints.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| transport_error(self.provider(), e, TOKEN_FALLBACK))?;

        let token: OAuthTokenResponse =
            read_json(self.provider(), response, &OAUTH_ERROR_MESSAGE_KEYS, TOKEN_FALLBACK).await?;
        ensure_access_token(self.provider(), &token)?;

        Ok(token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<SocialUserInfo, AppError> {
        let response = self.http
            .get(&self.endpoints.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport_error(self.provider(), e, USER_INFO_FALLBACK))?;

        let info: KakaoUserInfo =
            read_json(self.provider(), response, &OAUTH_ERROR_MESSAGE_KEYS, USER_INFO_FALLBACK).await?;

        info.into_social_user_info()
            .inspect_err(|e| log_rejected(self.provider(), e))
    }

    async fn revoke(&self, access_token: &str) -> Result<(), AppError> {
        let result = self.http
            .post(&self.endpoints.revoke_url)
            .bearer_auth(access_token)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => {
                log::error!("Kakao 연결 끊기 실패: {}", response.status());
                Err(AppError::ValidationError(UNLINK_FAILURE.to_string()))
            }
            Err(e) => {
                log::error!("Kakao 연결 끊기 요청 실패: {}", e);
                Err(AppError::ValidationError(UNLINK_FAILURE.to_string()))
            }
        }
    }
}

fn kakao_oauth_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(KakaoOAuthService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "kakao_oauth_service",
        constructor: kakao_oauth_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::provider::test_support::{spawn_provider, unreachable_base_url, StubResponses};
    use serde_json::json;

    fn settings() -> OAuthClientSettings {
        OAuthClientSettings {
            client_id: Some("kakao-rest-key".to_string()),
            client_secret: None,
            redirect_uri: Some("http://localhost:4000/auth/kakao/callback".to_string()),
        }
    }

    #[test]
    fn test_login_url_contains_kakao_parameters() {
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::kakao());

        let login = service.login_url(None).unwrap();

        assert!(login.url.starts_with("https://kauth.kakao.com/oauth/authorize?"));
        assert!(login.url.contains("client_id=kakao-rest-key"));
        assert!(login.url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A4000%2Fauth%2Fkakao%2Fcallback"));
        assert!(login.url.contains("response_type=code"));
        assert!(!login.url.contains("state="));
        assert!(login.state.is_none());
    }

    #[test]
    fn test_login_url_without_redirect_uri_fails() {
        let mut settings = settings();
        settings.redirect_uri = None;
        let service = KakaoOAuthService::new(settings, OAuthEndpoints::kakao());

        assert!(matches!(service.login_url(Some("s")), Err(AppError::ConfigurationError(_))));
    }

    #[actix_web::test]
    async fn test_exchange_code_without_client_id_fails_with_configuration_error() {
        let mut settings = settings();
        settings.client_id = None;
        let service = KakaoOAuthService::new(settings, OAuthEndpoints::local(&unreachable_base_url()));

        let err = service.exchange_code("code", "").await.unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[actix_web::test]
    async fn test_exchange_code_works_without_secret() {
        let base_url = spawn_provider(StubResponses::default());
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&base_url));

        let token = service.exchange_code("code", "").await.unwrap();
        assert_eq!(token.access_token(), Some("stub-token"));
    }

    #[actix_web::test]
    async fn test_token_response_without_access_token_is_rejected() {
        let base_url = spawn_provider(StubResponses {
            token: (200, json!({ "token_type": "bearer", "expires_in": 21599 })),
            ..Default::default()
        });
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&base_url));

        assert!(matches!(
            service.exchange_code("code", "").await,
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_upstream_failure_falls_back_to_error_field() {
        let base_url = spawn_provider(StubResponses {
            token: (401, json!({ "error": "invalid_client", "error_code": "KOE101" })),
            ..Default::default()
        });
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&base_url));

        match service.exchange_code("code", "").await {
            Err(AppError::UpstreamError { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid_client");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_empty_user_info_is_bad_request() {
        let base_url = spawn_provider(StubResponses {
            user_info: (200, json!({})),
            ..Default::default()
        });
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&base_url));

        assert!(matches!(
            service.fetch_user_info("token").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_user_info_without_id_is_rejected() {
        let base_url = spawn_provider(StubResponses {
            user_info: (200, json!({ "kakao_account": { "email": "ryan@kakao.com" } })),
            ..Default::default()
        });
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&base_url));

        assert!(matches!(
            service.fetch_user_info("token").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_user_info_failure_uses_upstream_status() {
        let base_url = spawn_provider(StubResponses {
            user_info: (401, json!({ "msg": "this access token does not exist", "code": -401 })),
            ..Default::default()
        });
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&base_url));

        match service.fetch_user_info("expired").await {
            Err(AppError::UpstreamError { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, USER_INFO_FALLBACK);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_unlink() {
        let base_url = spawn_provider(StubResponses {
            revoke: (200, json!({ "id": 123456789 })),
            ..Default::default()
        });
        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&base_url));
        assert!(service.revoke("token").await.is_ok());

        let service = KakaoOAuthService::new(settings(), OAuthEndpoints::local(&unreachable_base_url()));
        assert!(matches!(
            service.revoke("token").await,
            Err(AppError::ValidationError(message)) if message == UNLINK_FAILURE
        ));
    }
}
