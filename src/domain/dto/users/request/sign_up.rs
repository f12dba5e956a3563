//! 회원가입 / 로그인 요청 DTO
//!
//! 이메일/비밀번호 기반 로컬 계정의 요청 본문을 매핑합니다.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 비밀번호에 반드시 하나 이상 포함되어야 하는 특수문자
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*#?&";

/// 로컬 회원가입 요청 DTO
///
/// # JSON 예제
///
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "secure#pass1",
///   "serviceAgreed": true,
///   "privacyAgreed": true,
///   "marketingAgreed": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[schema(example = "user@example.com")]
    #[validate(email(message = "올바른 이메일 형식이 아닙니다."))]
    pub email: String,

    /// 8자 이상, 영문/숫자/특수문자 각각 1개 이상
    #[schema(example = "secure#pass1", min_length = 8)]
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다."))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    /// 서비스 이용약관 동의 (필수)
    #[validate(custom(function = "validate_required_consent"))]
    pub service_agreed: bool,

    /// 개인정보 처리방침 동의 (필수)
    #[validate(custom(function = "validate_required_consent"))]
    pub privacy_agreed: bool,

    /// 마케팅 수신 동의 (선택)
    #[serde(default)]
    pub marketing_agreed: bool,
}

/// 로컬 로그인 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다."))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요."))]
    pub password: String,
}

/// 비밀번호 강도 검증
///
/// 영문자, 숫자, [`PASSWORD_SPECIAL_CHARS`] 중 하나를 각각 최소 1개 포함해야 합니다.
pub(crate) fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    if !(has_letter && has_digit && has_special) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 영문, 숫자, 특수문자를 포함해야 합니다.".into()));
    }

    Ok(())
}

/// 필수 약관 동의 검증
pub(crate) fn validate_required_consent(agreed: &bool) -> Result<(), ValidationError> {
    if !*agreed {
        return Err(ValidationError::new("consent_required")
            .with_message("필수 약관에 동의해야 합니다.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str) -> SignUpRequest {
        SignUpRequest {
            email: "user@example.com".to_string(),
            password: password.to_string(),
            service_agreed: true,
            privacy_agreed: true,
            marketing_agreed: false,
        }
    }

    #[test]
    fn test_valid_sign_up_request() {
        assert!(request("abcd123!").validate().is_ok());
    }

    #[test]
    fn test_weak_passwords_are_rejected() {
        for password in ["abc12!", "abcdefgh1", "abcdefgh!", "12345678!", "abcd1234^"] {
            let errors = request(password).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("password"), "{}", password);
        }
    }

    #[test]
    fn test_required_consents_must_be_true() {
        let mut req = request("abcd123!");
        req.service_agreed = false;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("service_agreed"));

        let mut req = request("abcd123!");
        req.privacy_agreed = false;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("privacy_agreed"));
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut req = request("abcd123!");
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_marketing_consent_defaults_to_false() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"email":"user@example.com","password":"abcd123!","serviceAgreed":true,"privacyAgreed":true}"#,
        )
        .unwrap();

        assert!(!req.marketing_agreed);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_sign_in_requires_password() {
        let req = SignInRequest {
            email: "user@example.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
