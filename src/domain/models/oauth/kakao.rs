use serde::Deserialize;
use crate::config::AuthProvider;
use crate::core::errors::AppError;
use super::{deserialize_lenient_id, SocialUserInfo};

/// Kakao `v2/user/me` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoUserInfo {
    /// 회원번호 (숫자, 일부 프록시는 문자열로 전달)
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub id: Option<String>,

    #[serde(default)]
    pub kakao_account: Option<KakaoAccount>,

    /// 구버전 앱의 사용자 프로퍼티
    #[serde(default)]
    pub properties: Option<KakaoProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoAccount {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_email_verified: Option<bool>,
    #[serde(default)]
    pub profile: Option<KakaoProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoProfile {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoProperties {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl KakaoUserInfo {
    /// 회원번호가 없는 응답은 400 으로 거부합니다.
    pub fn into_social_user_info(self) -> Result<SocialUserInfo, AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::ValidationError("Kakao 사용자 정보에 ID가 없습니다.".to_string()))?;

        let account = self.kakao_account.unwrap_or_default();
        let profile = account.profile.unwrap_or_default();
        let properties = self.properties.unwrap_or_default();

        Ok(SocialUserInfo {
            provider: AuthProvider::Kakao,
            provider_id: id,
            email: account.email,
            nickname: profile.nickname.or(properties.nickname),
            profile_image: profile.profile_image_url.or(properties.profile_image),
            email_verified: account.is_email_verified.unwrap_or(false),
        })
    }
}
