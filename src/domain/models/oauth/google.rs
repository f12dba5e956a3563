use serde::Deserialize;
use crate::config::AuthProvider;
use crate::core::errors::AppError;
use super::{deserialize_lenient_id, SocialUserInfo};

/// Google `oauth2/v2/userinfo` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 사용자 고유 ID
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub id: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub verified_email: Option<bool>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub given_name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// ID 또는 이메일이 없는 응답은 400 으로 거부합니다.
    pub fn into_social_user_info(self) -> Result<SocialUserInfo, AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::ValidationError("Google 사용자 정보에 ID가 없습니다.".to_string()))?;

        let email = self
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::ValidationError("Google 사용자 정보에 이메일이 없습니다.".to_string()))?;

        Ok(SocialUserInfo {
            provider: AuthProvider::Google,
            provider_id: id,
            email: Some(email),
            nickname: self.name.or(self.given_name),
            profile_image: self.picture,
            email_verified: self.verified_email.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_user_info_normalization() {
        let info: GoogleUserInfo = serde_json::from_str(
            r#"{"id":"1089","email":"gildong@gmail.com","verified_email":true,"name":"홍길동","picture":"https://lh3.googleusercontent.com/a"}"#,
        )
        .unwrap();

        let social = info.into_social_user_info().unwrap();
        assert_eq!(social.provider, AuthProvider::Google);
        assert_eq!(social.provider_id, "1089");
        assert_eq!(social.nickname.as_deref(), Some("홍길동"));
        assert!(social.email_verified);
    }

    #[test]
    fn test_google_user_info_without_email_is_rejected() {
        let info: GoogleUserInfo = serde_json::from_str(r#"{"id":"1089","name":"홍길동"}"#).unwrap();

        let err = info.into_social_user_info().unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_google_user_info_without_id_is_rejected() {
        for body in [r#"{}"#, r#"{"email":"gildong@gmail.com"}"#] {
            let info: GoogleUserInfo = serde_json::from_str(body).unwrap();
            assert!(matches!(info.into_social_user_info(), Err(AppError::ValidationError(_))), "{}", body);
        }
    }
}
