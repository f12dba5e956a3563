//! 문자열 처리 유틸리티
//!
//! 요청 DTO 정리(trim, 빈 문자열 → None)와 로그 출력용 마스킹을 제공합니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 앞뒤 공백을 제거한 결과가 비어 있으면 `ValidationError` 를 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(validate_required_string("  코코  ", "nickname").unwrap(), "코코");
/// assert!(validate_required_string("   ", "nickname").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// 값이 없거나 공백뿐이면 `None`, 아니면 trim 된 문자열을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]` 와 함께 사용하면
/// `""`, `"   "`, `null` 이 모두 `None` 으로 들어옵니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 로그 출력용 이메일 마스킹
///
/// 로컬 파트의 첫 글자만 남기고 가립니다. `@` 가 없으면 전체를 가립니다.
///
/// ```rust,ignore
/// assert_eq!(mask_email("gildong@example.com"), "g******@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().unwrap_or('*');
            format!("{}{}@{}", first, "*".repeat(chars.count()), domain)
        }
        _ => "*".repeat(email.chars().count().max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        nickname: Option<String>,
    }

    #[test]
    fn test_deserialize_optional_string() {
        let patch: Patch = serde_json::from_str(r#"{"nickname": "  코코  "}"#).unwrap();
        assert_eq!(patch.nickname.as_deref(), Some("코코"));

        let patch: Patch = serde_json::from_str(r#"{"nickname": "  "}"#).unwrap();
        assert_eq!(patch.nickname, None);

        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.nickname, None);
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("gildong@example.com"), "g******@example.com");
        assert_eq!(mask_email("a@b.co"), "a@b.co");
        assert_eq!(mask_email("not-an-email"), "************");
    }
}
