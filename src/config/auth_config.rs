//! # Authentication Configuration Module
//!
//! 소셜 로그인 프로바이더(Google, Kakao, Naver) 설정과 OAuth 공통 설정을 관리합니다.
//!
//! 프로바이더 설정값은 `Option<String>` 으로 읽습니다. 값이 없다고 서버가 죽지는 않으며,
//! 해당 프로바이더의 로그인 URL 생성/토큰 교환 시점에 `AppError::ConfigurationError` 로 보고됩니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export GOOGLE_CLIENT_ID="123456789-abc.apps.googleusercontent.com"
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="http://localhost:4000/auth/google/callback"
//!
//! export KAKAO_CLIENT_ID="rest-api-key"
//! export KAKAO_CLIENT_SECRET="..."          # 선택 (콘솔에서 활성화한 경우만)
//! export KAKAO_REDIRECT_URI="http://localhost:4000/auth/kakao/callback"
//!
//! export NAVER_CLIENT_ID="..."
//! export NAVER_CLIENT_SECRET="..."
//! export NAVER_REDIRECT_URI="http://localhost:4000/auth/naver/callback"
//!
//! export OAUTH_STATE_TTL_SECONDS="600"
//! export OAUTH_HTTP_TIMEOUT_SECONDS="10"
//! ```

use std::env;
use std::fmt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 환경 변수를 읽되 비어 있거나 공백뿐인 값은 없는 것으로 취급합니다.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 한 프로바이더의 OAuth 클라이언트 설정
///
/// 어댑터는 이 값을 생성 시점에 받아 보관하며, 필요한 항목이 없으면 호출 시점에
/// 설정 오류를 반환합니다. 테스트에서는 직접 구성해서 주입합니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthClientSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl OAuthClientSettings {
    /// `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`, `{PREFIX}_REDIRECT_URI` 를 읽습니다.
    pub fn from_env(prefix: &str) -> Self {
        Self {
            client_id: non_empty_var(&format!("{}_CLIENT_ID", prefix)),
            client_secret: non_empty_var(&format!("{}_CLIENT_SECRET", prefix)),
            redirect_uri: non_empty_var(&format!("{}_REDIRECT_URI", prefix)),
        }
    }

    /// 비어 있는 항목의 환경 변수 이름
    pub fn missing_keys(&self, prefix: &str, secret_required: bool) -> Vec<String> {
        let mut missing = Vec::new();
        if self.client_id.is_none() {
            missing.push(format!("{}_CLIENT_ID", prefix));
        }
        if secret_required && self.client_secret.is_none() {
            missing.push(format!("{}_CLIENT_SECRET", prefix));
        }
        if self.redirect_uri.is_none() {
            missing.push(format!("{}_REDIRECT_URI", prefix));
        }
        missing
    }

    /// 모든 항목이 채워진 설정
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Self {
        Self {
            client_id: Some(client_id.to_string()),
            client_secret: Some(client_secret.to_string()),
            redirect_uri: Some(redirect_uri.to_string()),
        }
    }
}

/// Google OAuth 2.0 설정
///
/// Google Cloud Console > APIs & Services > Credentials 에서 발급한
/// OAuth 2.0 Client 정보입니다. 승인된 리디렉션 URI 에 `GOOGLE_REDIRECT_URI` 가 등록되어 있어야 합니다.
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub const ENV_PREFIX: &'static str = "GOOGLE";

    pub fn settings() -> OAuthClientSettings {
        OAuthClientSettings::from_env(Self::ENV_PREFIX)
    }
}

/// Kakao 로그인 설정
///
/// `KAKAO_CLIENT_ID` 는 카카오 디벨로퍼스의 REST API 키입니다.
/// Client Secret 은 콘솔에서 활성화한 경우에만 토큰 요청에 포함됩니다.
pub struct KakaoOAuthConfig;

impl KakaoOAuthConfig {
    pub const ENV_PREFIX: &'static str = "KAKAO";

    pub fn settings() -> OAuthClientSettings {
        OAuthClientSettings::from_env(Self::ENV_PREFIX)
    }
}

/// Naver 로그인 설정
pub struct NaverOAuthConfig;

impl NaverOAuthConfig {
    pub const ENV_PREFIX: &'static str = "NAVER";

    pub fn settings() -> OAuthClientSettings {
        OAuthClientSettings::from_env(Self::ENV_PREFIX)
    }
}

/// 모든 프로바이더에 공통으로 적용되는 OAuth 설정
pub struct OAuthConfig;

impl OAuthConfig {
    /// 발급한 state 값의 유효 시간(초). 기본값 600초.
    ///
    /// 로그인 URL 발급 후 콜백까지 허용되는 최대 시간입니다.
    pub fn state_ttl_seconds() -> u64 {
        non_empty_var("OAUTH_STATE_TTL_SECONDS")
            .and_then(|value| value.parse().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(600)
    }

    /// 프로바이더 API 호출 타임아웃(초). 기본값 10초.
    pub fn http_timeout_seconds() -> u64 {
        non_empty_var("OAUTH_HTTP_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .filter(|timeout| *timeout > 0)
            .unwrap_or(10)
    }
}

/// 프로바이더별 필수 설정 중 비어 있는 환경 변수 이름
///
/// Kakao 의 Client Secret 은 선택 항목이므로 검사하지 않습니다.
pub fn missing_oauth_settings(provider: AuthProvider) -> Vec<String> {
    let (settings, prefix, secret_required) = match provider {
        AuthProvider::Google => (GoogleOAuthConfig::settings(), GoogleOAuthConfig::ENV_PREFIX, true),
        AuthProvider::Kakao => (KakaoOAuthConfig::settings(), KakaoOAuthConfig::ENV_PREFIX, false),
        AuthProvider::Naver => (NaverOAuthConfig::settings(), NaverOAuthConfig::ENV_PREFIX, true),
        AuthProvider::Local => return Vec::new(),
    };

    settings.missing_keys(prefix, secret_required)
}

/// 사용자 계정의 인증 공급자
///
/// 데이터베이스와 API 응답에는 소문자 문자열(`local`, `kakao`, `google`, `naver`)로 저장됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/비밀번호 로컬 계정
    #[default]
    Local,
    Kakao,
    Google,
    Naver,
}

impl AuthProvider {
    /// 소셜 로그인 프로바이더 목록
    pub const SOCIAL: [AuthProvider; 3] = [AuthProvider::Google, AuthProvider::Kakao, AuthProvider::Naver];

    /// 문자열에서 AuthProvider를 생성합니다. (대소문자 무관)
    ///
    /// ```rust,ignore
    /// assert_eq!(AuthProvider::from_str("KAKAO")?, AuthProvider::Kakao);
    /// assert!(AuthProvider::from_str("twitter").is_err());
    /// ```
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "kakao" => Ok(AuthProvider::Kakao),
            "google" => Ok(AuthProvider::Google),
            "naver" => Ok(AuthProvider::Naver),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    /// 소셜 로그인 경로에서 사용할 프로바이더를 파싱합니다.
    ///
    /// `local` 은 소셜 프로바이더가 아니므로 거부합니다.
    pub fn social_from_str(s: &str) -> Result<Self, String> {
        let provider = Self::from_str(s)?;
        if provider.is_social() {
            Ok(provider)
        } else {
            Err(format!("Not a social login provider: {}", s))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Kakao => "kakao",
            AuthProvider::Google => "google",
            AuthProvider::Naver => "naver",
        }
    }

    pub fn is_social(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }

    /// 로그/에러 메시지용 표시 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            AuthProvider::Local => "로컬",
            AuthProvider::Kakao => "카카오",
            AuthProvider::Google => "구글",
            AuthProvider::Naver => "네이버",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
