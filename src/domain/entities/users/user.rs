//! User Entity Implementation
//!
//! 로컬 계정(이메일/비밀번호)과 소셜 계정(Google, Kakao, Naver)을 하나의 스키마로 표현합니다.
//! 프로필은 `user_profiles` 컬렉션에 `user_id` 로 1:1 연결되며 사용자 삭제 시 함께 삭제됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::core::errors::AppError;

/// 저장 전 검증에 사용하는 기본 이메일 형식
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile")
});

/// 이메일이 기본 형식(`local@domain.tld`)을 만족하는지 확인합니다.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// 가입 시 동의 항목
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Consents {
    /// 서비스 이용약관 동의 (필수)
    pub service: bool,
    /// 개인정보 처리방침 동의 (필수)
    pub privacy: bool,
    /// 마케팅 수신 동의 (선택)
    pub marketing: bool,
}

/// 사용자 엔티티
///
/// 불변식은 [`User::validate_integrity`] 로 저장 직전에 검사합니다.
/// - 로컬 계정은 비밀번호 해시가 있어야 함
/// - 소셜 계정은 프로바이더 사용자 ID 가 있어야 함
/// - 이메일은 기본 형식을 만족해야 함
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시 (소셜 계정은 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub provider: AuthProvider,
    /// 소셜 프로바이더가 발급한 사용자 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub service_agreed: bool,
    pub privacy_agreed: bool,
    pub marketing_agreed: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/비밀번호)
    ///
    /// 이메일 인증이 필요한 상태로 시작합니다.
    pub fn new_local(email: String, password_hash: String, consents: Consents) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash: Some(password_hash),
            provider: AuthProvider::Local,
            provider_id: None,
            service_agreed: consents.service,
            privacy_agreed: consents.privacy,
            marketing_agreed: consents.marketing,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 소셜 사용자 생성
    ///
    /// 이메일 인증 여부는 프로바이더가 보고한 값을 따릅니다.
    pub fn new_social(
        email: String,
        provider: AuthProvider,
        provider_id: String,
        consents: Consents,
        is_email_verified: bool,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash: None,
            provider,
            provider_id: Some(provider_id),
            service_agreed: consents.service,
            privacy_agreed: consents.privacy,
            marketing_agreed: consents.marketing,
            is_email_verified,
            created_at: now,
            updated_at: now,
        }
    }

    /// 저장 전 데이터 무결성 검증
    ///
    /// insert / update 직전에 리포지토리에서 호출합니다.
    pub fn validate_integrity(&self) -> Result<(), AppError> {
        let has_password = self
            .password_hash
            .as_deref()
            .is_some_and(|hash| !hash.is_empty());

        if self.provider == AuthProvider::Local && !has_password {
            return Err(AppError::ValidationError(
                "일반 회원가입은 비밀번호가 필요합니다.".to_string(),
            ));
        }

        let has_provider_id = self
            .provider_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());

        if self.provider.is_social() && !has_provider_id {
            return Err(AppError::ValidationError(
                "소셜 로그인 계정은 프로바이더 ID가 필요합니다.".to_string(),
            ));
        }

        if !is_valid_email(&self.email) {
            return Err(AppError::ValidationError(
                "올바른 이메일 형식이 아닙니다.".to_string(),
            ));
        }

        Ok(())
    }

    /// 수정 시간 갱신
    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }

    /// 프로바이더가 이메일 소유를 확인해 주면 인증 상태로 올립니다.
    ///
    /// 상태가 바뀌었으면 `true`. 한 번 인증된 이메일은 되돌리지 않습니다.
    pub fn mark_email_verified(&mut self, verified_by_provider: bool) -> bool {
        if !verified_by_provider || self.is_email_verified {
            return false;
        }

        self.is_email_verified = true;
        true
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.provider == AuthProvider::Local && self.password_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agreed() -> Consents {
        Consents { service: true, privacy: true, marketing: false }
    }

    #[test]
    fn test_local_user_passes_integrity_check() {
        let user = User::new_local("user@example.com".to_string(), "$2b$04$hash".to_string(), agreed());

        assert!(user.validate_integrity().is_ok());
        assert!(user.can_authenticate_with_password());
        assert!(!user.is_email_verified);
    }

    #[test]
    fn test_local_user_without_password_is_rejected() {
        let mut user = User::new_local("user@example.com".to_string(), "hash".to_string(), agreed());
        user.password_hash = None;

        assert!(matches!(user.validate_integrity(), Err(AppError::ValidationError(_))));

        user.password_hash = Some(String::new());
        assert!(user.validate_integrity().is_err());
    }

    #[test]
    fn test_social_user_without_provider_id_is_rejected() {
        let mut user = User::new_social(
            "user@example.com".to_string(),
            AuthProvider::Kakao,
            "12345".to_string(),
            agreed(),
            true,
        );
        assert!(user.validate_integrity().is_ok());
        assert!(!user.can_authenticate_with_password());

        user.provider_id = Some("  ".to_string());
        assert!(user.validate_integrity().is_err());

        user.provider_id = None;
        assert!(user.validate_integrity().is_err());
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        for email in ["plainaddress", "no-domain@", "a b@example.com", "user@nodot", "@example.com"] {
            let user = User::new_local(email.to_string(), "hash".to_string(), agreed());
            assert!(user.validate_integrity().is_err(), "{} should be rejected", email);
        }
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("gildong.hong@example.co.kr"));
        assert!(!is_valid_email("gildong@example"));
    }

    #[test]
    fn test_password_hash_is_not_serialized_for_social_user() {
        let user = User::new_social(
            "user@example.com".to_string(),
            AuthProvider::Naver,
            "naver-id".to_string(),
            agreed(),
            false,
        );
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("_id").is_none());
        assert_eq!(json["provider"], "naver");
        assert_eq!(json["provider_id"], "naver-id");
    }

    #[test]
    fn test_mark_email_verified_only_upgrades() {
        let mut user = User::new_social(
            "user@example.com".to_string(),
            AuthProvider::Kakao,
            "k-1".to_string(),
            agreed(),
            false,
        );

        assert!(!user.mark_email_verified(false));
        assert!(!user.is_email_verified);

        assert!(user.mark_email_verified(true));
        assert!(user.is_email_verified);

        assert!(!user.mark_email_verified(true));
        assert!(!user.mark_email_verified(false));
        assert!(user.is_email_verified);
    }

    #[test]
    fn test_touch_moves_updated_at_forward() {
        let mut user = User::new_local("user@example.com".to_string(), "$2b$04$hash".to_string(), agreed());
        user.updated_at = DateTime::from_millis(0);

        user.touch();

        assert!(user.updated_at.timestamp_millis() > 0);
        assert!(user.created_at.timestamp_millis() > 0);
    }
}
