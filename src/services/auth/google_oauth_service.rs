//! Google OAuth 2.0 어댑터
//!
//! ```text
//! GET  https://accounts.google.com/o/oauth2/v2/auth      (로그인 URL)
//! POST https://oauth2.googleapis.com/token               (form, code → token)
//! GET  https://www.googleapis.com/oauth2/v2/userinfo     (bearer)
//! POST https://oauth2.googleapis.com/revoke?token=...    (토큰 폐기)
//! ```

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Client;
use crate::config::{AuthProvider, GoogleOAuthConfig, OAuthClientSettings};
use crate::core::errors::AppError;
use crate::domain::models::oauth::{GoogleUserInfo, OAuthTokenResponse, SocialUserInfo};
use super::provider::{
    build_url, client_id_and_redirect, ensure_access_token, http_client, log_rejected, read_json,
    required_setting, transport_error, LoginUrl, OAuthEndpoints, OAuthProvider, OAUTH_ERROR_MESSAGE_KEYS,
};

const TOKEN_FALLBACK: &str = "Google 토큰 발급에 실패했습니다.";
const USER_INFO_FALLBACK: &str = "Google 사용자 정보 조회에 실패했습니다.";
const REVOKE_FAILURE: &str = "Google 토큰 폐기에 실패했습니다.";

impl OAuthEndpoints {
    pub fn google() -> Self {
        Self {
            authorize_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            user_info_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
            revoke_url: "https://oauth2.googleapis.com/revoke".to_string(),
        }
    }
}

/// Google 로그인 어댑터
pub struct GoogleOAuthService {
    settings: OAuthClientSettings,
    endpoints: OAuthEndpoints,
    http: Client,
}

static GOOGLE_OAUTH_SERVICE_INSTANCE: OnceCell<Arc<GoogleOAuthService>> = OnceCell::new();

impl GoogleOAuthService {
    /// 환경 변수 설정으로 만든 싱글톤 인스턴스
    pub fn instance() -> Arc<Self> {
        GOOGLE_OAUTH_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(GoogleOAuthConfig::settings(), OAuthEndpoints::google())))
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
impl OAuthProvider for GoogleOAuthService {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn login_url(&self, state: Option<&str>) -> Result<LoginUrl, AppError> {
        let (client_id, redirect_uri) = client_id_and_redirect(&self.settings, self.provider(), GoogleOAuthConfig::ENV_PREFIX)
            .inspect_err(|e| log::error!("Google 로그인 URL 생성 실패: {}", e))?;

        let mut params = vec![
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", "email profile"),
            ("access_type", "offline"),
            ("prompt", "consent"),
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
        let provider = self.provider();
        let (client_id, client_secret, redirect_uri) =
            client_id_and_redirect(&self.settings, provider, GoogleOAuthConfig::ENV_PREFIX)
                .and_then(|(client_id, redirect_uri)| {
                    required_setting(&self.settings.client_secret, provider, "GOOGLE_CLIENT_SECRET")
                        .map(|client_secret| (client_id, client_secret, redirect_uri))
                })
                .inspect_err(|e| log::error!("Google 토큰 교환 실패: {}", e))?;

        let params = [
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

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

        let info: GoogleUserInfo =
            read_json(self.provider(), response, &OAUTH_ERROR_MESSAGE_KEYS, USER_INFO_FALLBACK).await?;

        info.into_social_user_info()
            .inspect_err(|e| log_rejected(self.provider(), e))
    }

    async fn revoke(&self, access_token: &str) -> Result<(), AppError> {
        let result = self.http
            .post(&self.endpoints.revoke_url)
            .query(&[("token", access_token)])
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => {
                log::error!("Google 토큰 폐기 실패: {}", response.status());
                Err(AppError::ValidationError(REVOKE_FAILURE.to_string()))
            }
            Err(e) => {
                log::error!("Google 토큰 폐기 요청 실패: {}", e);
                Err(AppError::ValidationError(REVOKE_FAILURE.to_string()))
            }
        }
    }
}

fn google_oauth_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(GoogleOAuthService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "google_oauth_service",
        constructor: google_oauth_service_constructor,
    }
}
