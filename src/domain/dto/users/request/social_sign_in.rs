//! 소셜 회원가입 요청 DTO
//!
//! 프로바이더 인증을 이미 마친 클라이언트가 신원 정보를 직접 전달할 때 사용합니다.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};
use crate::config::AuthProvider;
use crate::domain::models::oauth::SocialUserInfo;
use crate::utils::string_utils::deserialize_optional_string;
use super::sign_up::validate_required_consent;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialSignInRequest {
    /// 소셜 프로바이더 (kakao, google, naver)
    #[validate(custom(function = "validate_social_provider"))]
    pub provider: AuthProvider,

    /// 프로바이더가 발급한 사용자 고유 ID
    #[validate(length(min = 1, message = "프로바이더 ID가 필요합니다."))]
    pub provider_id: String,

    #[validate(email(message = "올바른 이메일 형식이 아닙니다."))]
    pub email: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 30, message = "닉네임은 30자 이하여야 합니다."))]
    pub nickname: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub profile_image: Option<String>,

    #[validate(custom(function = "validate_required_consent"))]
    pub service_agreed: bool,

    #[validate(custom(function = "validate_required_consent"))]
    pub privacy_agreed: bool,

    #[serde(default)]
    pub marketing_agreed: bool,
}

impl SocialSignInRequest {
    /// 콜백 플로우에서 얻은 프로바이더 정보로 가입 요청을 구성합니다.
    ///
    /// 필수 약관은 동의, 마케팅 수신은 미동의로 채워집니다.
    pub fn from_user_info(info: &SocialUserInfo) -> Self {
        Self {
            provider: info.provider,
            provider_id: info.provider_id.clone(),
            email: info.email.clone().unwrap_or_default(),
            nickname: info.nickname.clone(),
            profile_image: info.profile_image.clone(),
            service_agreed: true,
            privacy_agreed: true,
            marketing_agreed: false,
        }
    }
}

fn validate_social_provider(provider: &AuthProvider) -> Result<(), ValidationError> {
    if !provider.is_social() {
        return Err(ValidationError::new("invalid_provider")
            .with_message("소셜 로그인 제공자가 아닙니다.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SocialSignInRequest {
        serde_json::from_str(
            r#"{
                "provider": "kakao",
                "providerId": "12345",
                "email": "user@example.com",
                "serviceAgreed": true,
                "privacyAgreed": true
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_social_sign_in_request() {
        let req = request();
        assert!(req.validate().is_ok());
        assert_eq!(req.provider, AuthProvider::Kakao);
        assert!(req.nickname.is_none());
        assert!(!req.marketing_agreed);
    }

    #[test]
    fn test_blank_nickname_becomes_none() {
        let req: SocialSignInRequest = serde_json::from_str(
            r#"{
                "provider": "naver",
                "providerId": "n-1",
                "email": "user@naver.com",
                "nickname": "   ",
                "profileImage": " https://img.example.com/a.png ",
                "serviceAgreed": true,
                "privacyAgreed": true
            }"#,
        )
        .unwrap();

        assert!(req.nickname.is_none());
        assert_eq!(req.profile_image.as_deref(), Some("https://img.example.com/a.png"));
    }

    #[test]
    fn test_local_provider_is_rejected() {
        let mut req = request();
        req.provider = AuthProvider::Local;

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("provider"));
    }

    #[test]
    fn test_empty_provider_id_is_rejected() {
        let mut req = request();
        req.provider_id = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_from_user_info_fills_default_consents() {
        let info = SocialUserInfo {
            provider: AuthProvider::Google,
            provider_id: "g-1".to_string(),
            email: Some("user@gmail.com".to_string()),
            nickname: Some("홍길동".to_string()),
            profile_image: None,
            email_verified: true,
        };

        let req = SocialSignInRequest::from_user_info(&info);
        assert!(req.service_agreed && req.privacy_agreed);
        assert!(!req.marketing_agreed);
        assert!(req.validate().is_ok());
    }
}
