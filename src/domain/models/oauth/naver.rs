use serde::Deserialize;
use crate::config::AuthProvider;
use crate::core::errors::AppError;
use super::{deserialize_lenient_id, SocialUserInfo};

/// 정상 응답을 나타내는 Naver `resultcode`
pub const NAVER_SUCCESS_CODE: &str = "00";

/// Naver `v1/nid/me` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct NaverUserInfo {
    #[serde(default)]
    pub resultcode: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub response: Option<NaverProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NaverProfile {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl NaverUserInfo {
    /// `resultcode` 가 "00" 이 아니면 401, `response.id` 가 없으면 400 입니다.
    pub fn into_social_user_info(self) -> Result<SocialUserInfo, AppError> {
        if self.resultcode != NAVER_SUCCESS_CODE {
            let message = if self.message.is_empty() {
                "Naver 사용자 정보 조회에 실패했습니다.".to_string()
            } else {
                self.message
            };
            return Err(AppError::AuthenticationError(message));
        }

        let profile = self.response.unwrap_or_default();
        let id = profile
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("Naver 사용자 정보에 ID가 없습니다.".to_string()))?;

        Ok(SocialUserInfo {
            provider: AuthProvider::Naver,
            provider_id: id,
            // Naver 는 인증된 이메일만 제공
            email_verified: profile.email.is_some(),
            email: profile.email,
            nickname: profile.nickname.or(profile.name),
            profile_image: profile.profile_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naver_user_info_normalization() {
        let info: NaverUserInfo = serde_json::from_str(
            r#"{"resultcode":"00","message":"success","response":{"id":"32742776","email":"openapi@naver.com","nickname":"OpenAPI"}}"#,
        )
        .unwrap();

        let social = info.into_social_user_info().unwrap();
        assert_eq!(social.provider, AuthProvider::Naver);
        assert_eq!(social.provider_id, "32742776");
        assert!(social.email_verified);
    }

    #[test]
    fn test_naver_failure_resultcode_uses_provider_message() {
        let info: NaverUserInfo = serde_json::from_str(
            r#"{"resultcode":"024","message":"Authentication failed"}"#,
        )
        .unwrap();

        match info.into_social_user_info() {
            Err(AppError::AuthenticationError(message)) => assert_eq!(message, "Authentication failed"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_naver_response_without_id_is_rejected() {
        let info: NaverUserInfo = serde_json::from_str(
            r#"{"resultcode":"00","message":"success","response":{"email":"openapi@naver.com"}}"#,
        )
        .unwrap();

        assert!(matches!(info.into_social_user_info(), Err(AppError::ValidationError(_))));
    }
}
