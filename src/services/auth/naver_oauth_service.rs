//! Naver 로그인 어댑터
//!
//! Naver 는 다른 프로바이더와 몇 가지가 다릅니다.
//! - 로그인 URL 에 `state` 가 반드시 포함됩니다 (없으면 직접 생성).
//! - 토큰 교환과 토큰 삭제 모두 `GET oauth2.0/token` 에 쿼리 파라미터로 요청합니다.
//! - 실패를 HTTP 200 과 `error` / `resultcode` 필드로 보고하기도 합니다.

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::Value;
use crate::config::{AuthProvider, NaverOAuthConfig, OAuthClientSettings};
use crate::core::errors::AppError;
use crate::domain::models::oauth::{NaverUserInfo, OAuthTokenResponse, SocialUserInfo};
use super::provider::{
    build_url, client_id_and_redirect, ensure_access_token, generate_state, http_client, log_rejected,
    read_json, required_setting, transport_error, LoginUrl, OAuthEndpoints, OAuthProvider,
    NAVER_ERROR_MESSAGE_KEYS,
};

const TOKEN_FALLBACK: &str = "Naver 토큰 발급에 실패했습니다.";
const USER_INFO_FALLBACK: &str = "Naver 사용자 정보 조회에 실패했습니다.";
const REVOKE_FAILURE: &str = "Naver 토큰 삭제에 실패했습니다.";

impl OAuthEndpoints {
    pub fn naver() -> Self {
        Self {
            authorize_url: "https://nid.naver.com/oauth2.0/authorize".to_string(),
            token_url: "https://nid.naver.com/oauth2.0/token".to_string(),
            user_info_url: "https://openapi.naver.com/v1/nid/me".to_string(),
            revoke_url: "https://nid.naver.com/oauth2.0/token".to_string(),
        }
    }
}

/// Naver 로그인 어댑터
pub struct NaverOAuthService {
    settings: OAuthClientSettings,
    endpoints: OAuthEndpoints,
    http: Client,
}

static NAVER_OAUTH_SERVICE_INSTANCE: OnceCell<Arc<NaverOAuthService>> = OnceCell::new();

impl NaverOAuthService {
    pub fn instance() -> Arc<Self> {
        NAVER_OAUTH_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(NaverOAuthConfig::settings(), OAuthEndpoints::naver())))
            .clone()
    }

    pub fn new(settings: OAuthClientSettings, endpoints: OAuthEndpoints) -> Self {
        Self {
            settings,
            endpoints,
            http: http_client(),
        }
    }

    fn client_credentials(&self) -> Result<(&str, &str), AppError> {
        let client_id = required_setting(&self.settings.client_id, self.provider(), "NAVER_CLIENT_ID")?;
        let client_secret = required_setting(&self.settings.client_secret, self.provider(), "NAVER_CLIENT_SECRET")?;
        Ok((client_id, client_secret))
    }
}

#[async_trait]
impl OAuthProvider for NaverOAuthService {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Naver
    }

    fn login_url(&self, state: Option<&str>) -> Result<LoginUrl, AppError> {
        let (client_id, redirect_uri) = client_id_and_redirect(&self.settings, self.provider(), NaverOAuthConfig::ENV_PREFIX)
            .inspect_err(|e| log::error!("Naver 로그인 URL 생성 실패: {}", e))?;

        let state = state.map(str::to_string).unwrap_or_else(generate_state);

        let params = [
            ("response_type", "code"),
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("state", state.as_str()),
        ];

        Ok(LoginUrl {
            url: build_url(&self.endpoints.authorize_url, &params),
            state: Some(state),
        })
    }

    async fn exchange_code(&self, code: &str, state: &str) -> Result<OAuthTokenResponse, AppError> {
        let (client_id, client_secret) = self.client_credentials()
            .inspect_err(|e| log::error!("Naver 토큰 교환 실패: {}", e))?;

        if state.is_empty() {
            log::error!("Naver 토큰 교환 실패: state 누락");
            return Err(AppError::ValidationError("Naver 로그인에는 state 값이 필요합니다.".to_string()));
        }

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("state", state),
        ];

        let response = self.http
            .get(&self.endpoints.token_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error(self.provider(), e, TOKEN_FALLBACK))?;

        let token: OAuthTokenResponse =
            read_json(self.provider(), response, &NAVER_ERROR_MESSAGE_KEYS, TOKEN_FALLBACK).await?;
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

        let info: NaverUserInfo =
            read_json(self.provider(), response, &NAVER_ERROR_MESSAGE_KEYS, USER_INFO_FALLBACK).await?;

        info.into_social_user_info()
            .inspect_err(|e| log_rejected(self.provider(), e))
    }

    async fn revoke(&self, access_token: &str) -> Result<(), AppError> {
        let (client_id, client_secret) = self.client_credentials()
            .inspect_err(|e| log::error!("Naver 토큰 삭제 실패: {}", e))?;

        let url = build_url(
            &self.endpoints.revoke_url,
            &[
                ("grant_type", "delete"),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("access_token", access_token),
                ("service_provider", "NAVER"),
            ],
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                log::error!("Naver 토큰 삭제 실패: {}", response.status());
                return Err(AppError::ValidationError(REVOKE_FAILURE.to_string()));
            }
            Err(e) => {
                log::error!("Naver 토큰 삭제 요청 실패: {}", e);
                return Err(AppError::ValidationError(REVOKE_FAILURE.to_string()));
            }
        };

        // 실패도 200 으로 오므로 본문의 error 필드를 확인
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        if let Some(error) = body.get("error").and_then(Value::as_str) {
            log::error!("Naver 토큰 삭제 실패 응답: {}", error);
            return Err(AppError::ValidationError(REVOKE_FAILURE.to_string()));
        }

        Ok(())
    }
}

fn naver_oauth_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(NaverOAuthService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "naver_oauth_service",
        constructor: naver_oauth_service_constructor,
    }
}
