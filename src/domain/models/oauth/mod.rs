//! # OAuth 프로바이더 모델
//!
//! 프로바이더별 토큰 / 사용자 정보 응답 스키마와, 이를 정규화한 [`SocialUserInfo`] 를 정의합니다.
//!
//! ```text
//! GoogleUserInfo ─┐
//! KakaoUserInfo  ─┼─► SocialUserInfo ─► User / UserProfile
//! NaverUserInfo  ─┘
//! ```
//!
//! 필수 식별 필드가 없는 응답은 정규화 단계에서 거부됩니다.
//! - Google: `id` 와 `email`
//! - Kakao: `id` (숫자 또는 문자열)
//! - Naver: `resultcode == "00"` 과 `response.id`

pub mod google;
pub mod kakao;
pub mod naver;

use serde::{Deserialize, Deserializer, Serialize};
use crate::config::AuthProvider;

pub use google::GoogleUserInfo;
pub use kakao::KakaoUserInfo;
pub use naver::NaverUserInfo;

/// 프로바이더와 무관하게 정규화된 소셜 사용자 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialUserInfo {
    pub provider: AuthProvider,
    pub provider_id: String,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
    /// 프로바이더가 이메일 소유를 확인했는지 여부
    pub email_verified: bool,
}

impl SocialUserInfo {
    /// 프로필 생성에 사용할 닉네임
    ///
    /// 프로바이더 닉네임이 없으면 이메일 로컬 파트, 그것도 없으면 프로바이더 이름을 사용합니다.
    /// 결과는 30자로 잘립니다.
    pub fn display_nickname(&self) -> String {
        let nickname = self
            .nickname
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}_user", self.provider.as_str()));

        nickname.chars().take(30).collect()
    }
}

/// 토큰 엔드포인트 응답
///
/// 세 프로바이더가 공통으로 사용하는 필드만 매핑합니다.
/// Naver 는 실패 시에도 HTTP 200 에 `error` 필드를 담아 응답하므로 모든 필드가 선택입니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Naver 는 문자열, 나머지는 숫자로 전달합니다.
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl OAuthTokenResponse {
    /// 비어 있지 않은 액세스 토큰
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }
}

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_i64(),
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// 숫자 또는 문자열로 전달되는 사용자 ID
///
/// 빈 문자열, `null`, 그 외 타입은 모두 `None` 입니다.
pub(crate) fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(serde_json::Value::String(text)) => Some(text.trim().to_string()).filter(|id| !id.is_empty()),
        _ => None,
    })
}
