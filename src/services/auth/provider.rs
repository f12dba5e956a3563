//! # 소셜 로그인 프로바이더 공통 계층
//!
//! Google, Kakao, Naver 어댑터가 구현하는 [`OAuthProvider`] 트레이트와,
//! 세 어댑터가 공유하는 URL 조립 / 응답 처리 / 에러 변환 함수를 정의합니다.
//!
//! ## 에러 분류
//!
//! | 상황 | 에러 | 상태 코드 |
//! |------|------|-----------|
//! | 필수 설정 누락 | `ConfigurationError` | 500 |
//! | 프로바이더가 실패 응답 | `UpstreamError` | 프로바이더 응답 코드 |
//! | 응답 없이 전송 실패 | `UpstreamError` | 500 |
//! | 응답에 필수 필드 없음 | `AuthenticationError` / `ValidationError` | 401 / 400 |
//! | 토큰 폐기 / 연결 해제 실패 | `ValidationError` | 400 |
//!
//! 실패는 모두 `log::error!` 로 기록한 뒤 반환하며 재시도하지 않습니다.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::config::{AuthProvider, OAuthClientSettings, OAuthConfig};
use crate::core::errors::AppError;
use crate::domain::models::oauth::{OAuthTokenResponse, SocialUserInfo};

/// Google / Kakao 실패 응답에서 메시지를 찾는 순서
pub const OAUTH_ERROR_MESSAGE_KEYS: [&str; 2] = ["error_description", "error"];

/// Naver 실패 응답에서 메시지를 찾는 순서
pub const NAVER_ERROR_MESSAGE_KEYS: [&str; 2] = ["error_description", "message"];

/// 로그인 URL 생성 결과
#[derive(Debug, Clone, PartialEq)]
pub struct LoginUrl {
    pub url: String,
    /// URL 에 포함된 state 값
    pub state: Option<String>,
}

/// 어댑터가 호출하는 프로바이더 엔드포인트
///
/// 기본값은 각 프로바이더의 고정 URL 이며, 테스트에서는 로컬 서버 주소로 바꿔 주입합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthEndpoints {
    pub authorize_url: String,
    pub token_url: String,
    pub user_info_url: String,
    /// 토큰 폐기 / 연결 해제 URL
    pub revoke_url: String,
}

impl OAuthEndpoints {
    /// 같은 서버 아래에 모든 엔드포인트를 두는 구성 (`{base}/authorize`, `{base}/token`, `{base}/me`, `{base}/revoke`)
    pub fn local(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            authorize_url: format!("{}/authorize", base),
            token_url: format!("{}/token", base),
            user_info_url: format!("{}/me", base),
            revoke_url: format!("{}/revoke", base),
        }
    }
}

/// 소셜 로그인 어댑터 트레이트
///
/// 세 프로바이더는 같은 형태의 연산을 제공합니다.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn provider(&self) -> AuthProvider;

    /// 인가 페이지 URL 을 조립합니다.
    ///
    /// `state` 가 주어지면 URL 에 포함합니다. client id 또는 redirect URI 가 없으면 설정 오류입니다.
    fn login_url(&self, state: Option<&str>) -> Result<LoginUrl, AppError>;

    /// 인가 코드를 액세스 토큰으로 교환합니다.
    ///
    /// 응답에 액세스 토큰이 없으면 401 입니다.
    async fn exchange_code(&self, code: &str, state: &str) -> Result<OAuthTokenResponse, AppError>;

    /// 액세스 토큰으로 사용자 정보를 조회해 정규화합니다.
    async fn fetch_user_info(&self, access_token: &str) -> Result<SocialUserInfo, AppError>;

    /// 토큰 폐기 또는 앱 연결 해제
    async fn revoke(&self, access_token: &str) -> Result<(), AppError>;
}

/// CSRF 방지용 state 값 생성
pub fn generate_state() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// 프로바이더 API 호출용 HTTP 클라이언트
///
/// `OAUTH_HTTP_TIMEOUT_SECONDS` 타임아웃이 적용됩니다.
pub fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(OAuthConfig::http_timeout_seconds()))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("HTTP 클라이언트 설정 실패, 기본 클라이언트 사용: {}", e);
            Client::new()
        })
}

/// 쿼리 스트링을 붙인 URL 을 만듭니다.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> String {
    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    if query_string.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query_string)
    }
}

/// 필수 설정값을 꺼냅니다.
pub fn required_setting<'a>(
    value: &'a Option<String>,
    provider: AuthProvider,
    env_name: &str,
) -> Result<&'a str, AppError> {
    value.as_deref().ok_or_else(|| {
        AppError::ConfigurationError(format!(
            "{} 로그인 설정이 누락되었습니다: {}",
            provider.display_name(),
            env_name
        ))
    })
}

/// client id 와 redirect URI 를 함께 요구합니다.
pub fn client_id_and_redirect<'a>(
    settings: &'a OAuthClientSettings,
    provider: AuthProvider,
    env_prefix: &str,
) -> Result<(&'a str, &'a str), AppError> {
    let client_id = required_setting(&settings.client_id, provider, &format!("{}_CLIENT_ID", env_prefix))?;
    let redirect_uri = required_setting(&settings.redirect_uri, provider, &format!("{}_REDIRECT_URI", env_prefix))?;
    Ok((client_id, redirect_uri))
}

/// 실패 응답 본문에서 메시지를 찾습니다.
///
/// `keys` 순서대로 비어 있지 않은 문자열 값을 찾고, 없으면 `fallback` 을 사용합니다.
pub fn extract_error_message(body: &str, keys: &[&str], fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            keys.iter().find_map(|key| {
                json.get(*key)
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// 응답을 받지 못한 전송 실패를 500 업스트림 에러로 변환합니다.
pub fn transport_error(provider: AuthProvider, error: reqwest::Error, fallback: &str) -> AppError {
    let status = error.status().map(|status| status.as_u16()).unwrap_or(500);
    log::error!("{} API 요청 실패: {}", provider.display_name(), error);
    AppError::upstream(status, fallback)
}

/// 성공 응답은 `T` 로 역직렬화하고, 실패 응답은 업스트림 에러로 변환합니다.
pub async fn read_json<T: DeserializeOwned>(
    provider: AuthProvider,
    response: Response,
    keys: &[&str],
    fallback: &str,
) -> Result<T, AppError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(provider, e, fallback))?;

    if !status.is_success() {
        let message = extract_error_message(&body, keys, fallback);
        log::error!("{} API 실패 응답 ({}): {}", provider.display_name(), status, message);
        return Err(AppError::upstream(status.as_u16(), message));
    }

    serde_json::from_str(&body).map_err(|e| {
        log::error!("{} API 응답 파싱 실패: {}", provider.display_name(), e);
        AppError::ExternalServiceError(format!("{} 응답을 해석할 수 없습니다.", provider.display_name()))
    })
}

/// 토큰 응답에 액세스 토큰이 있는지 확인합니다.
///
/// Naver 처럼 HTTP 200 으로 실패를 보고하는 경우 `error_description` 을 메시지로 사용합니다.
pub fn ensure_access_token(provider: AuthProvider, token: &OAuthTokenResponse) -> Result<(), AppError> {
    if token.access_token().is_some() {
        return Ok(());
    }

    let message = token
        .error_description
        .clone()
        .or_else(|| token.error.clone())
        .unwrap_or_else(|| format!("{} 액세스 토큰을 발급받지 못했습니다.", provider.display_name()));

    log::error!("{} 토큰 응답에 액세스 토큰이 없습니다: {}", provider.display_name(), message);
    Err(AppError::AuthenticationError(message))
}

/// 정규화 단계의 실패를 기록합니다.
pub fn log_rejected(provider: AuthProvider, error: &AppError) {
    log::error!("{} 사용자 정보 검증 실패: {}", provider.display_name(), error);
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 어댑터 테스트용 로컬 프로바이더 서버

    use std::net::TcpListener;
    use actix_web::{web, App, HttpServer, HttpResponse};
    use serde_json::Value;

    /// 경로별 고정 응답 (`status`, `body`)
    #[derive(Clone)]
    pub struct StubResponses {
        pub token: (u16, Value),
        pub user_info: (u16, Value),
        pub revoke: (u16, Value),
    }

    impl Default for StubResponses {
        fn default() -> Self {
            Self {
                token: (200, serde_json::json!({ "access_token": "stub-token", "token_type": "bearer" })),
                user_info: (200, serde_json::json!({})),
                revoke: (200, serde_json::json!({})),
            }
        }
    }

    fn reply((status, body): &(u16, Value)) -> HttpResponse {
        let status = actix_web::http::StatusCode::from_u16(*status)
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(body)
    }

    /// `/token`, `/me`, `/revoke` 를 제공하는 서버를 띄우고 base URL 을 반환합니다.
    ///
    /// 메서드와 무관하게 같은 응답을 돌려줍니다.
    pub fn spawn_provider(responses: StubResponses) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub provider");
        let port = listener.local_addr().expect("stub address").port();
        let data = web::Data::new(responses);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/token", web::to(|data: web::Data<StubResponses>| async move { reply(&data.token) }))
                .route("/me", web::to(|data: web::Data<StubResponses>| async move { reply(&data.user_info) }))
                .route("/revoke", web::to(|data: web::Data<StubResponses>| async move { reply(&data.revoke) }))
        })
        .workers(1)
        .listen(listener)
        .expect("listen stub provider")
        .run();

        actix_web::rt::spawn(server);

        format!("http://127.0.0.1:{}", port)
    }

    /// 연결이 거부되는 주소
    pub fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("address").port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_values() {
        let url = build_url("https://example.com/auth", &[("scope", "email profile"), ("redirect_uri", "http://localhost/cb")]);

        assert_eq!(url, "https://example.com/auth?scope=email%20profile&redirect_uri=http%3A%2F%2Flocalhost%2Fcb");
    }

    #[test]
    fn test_extract_error_message_priority() {
        let body = r#"{"error":"invalid_grant","error_description":"Bad Request"}"#;
        assert_eq!(extract_error_message(body, &OAUTH_ERROR_MESSAGE_KEYS, "fallback"), "Bad Request");

        let body = r#"{"error":"invalid_grant"}"#;
        assert_eq!(extract_error_message(body, &OAUTH_ERROR_MESSAGE_KEYS, "fallback"), "invalid_grant");

        let body = r#"{"message":"invalid token"}"#;
        assert_eq!(extract_error_message(body, &NAVER_ERROR_MESSAGE_KEYS, "fallback"), "invalid token");
        assert_eq!(extract_error_message(body, &OAUTH_ERROR_MESSAGE_KEYS, "fallback"), "fallback");

        assert_eq!(extract_error_message("<html>", &OAUTH_ERROR_MESSAGE_KEYS, "fallback"), "fallback");
    }

    #[test]
    fn test_generate_state_is_unique() {
        let a = generate_state();
        let b = generate_state();

        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_required_setting_reports_env_name() {
        let err = required_setting(&None, AuthProvider::Kakao, "KAKAO_CLIENT_ID").unwrap_err();

        match err {
            AppError::ConfigurationError(message) => assert!(message.contains("KAKAO_CLIENT_ID")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_ensure_access_token() {
        let token = OAuthTokenResponse {
            access_token: Some("token".to_string()),
            ..Default::default()
        };
        assert!(ensure_access_token(AuthProvider::Google, &token).is_ok());

        let token = OAuthTokenResponse {
            error: Some("invalid_request".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ensure_access_token(AuthProvider::Naver, &token),
            Err(AppError::AuthenticationError(message)) if message == "invalid_request"
        ));
    }
}
