//! 소셜 인증 요청 DTO
//!
//! OAuth 콜백 쿼리와 연결 해제 요청 본문을 매핑합니다.
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 프로바이더는 `code` 없이 `error` 를 전달합니다.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OAuthCallbackQuery {
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: Option<String>,

    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl OAuthCallbackQuery {
    /// 프로바이더가 전달한 에러 메시지
    pub fn provider_error(&self) -> Option<String> {
        self.error.as_ref().map(|error| {
            self.error_description
                .clone()
                .filter(|description| !description.is_empty())
                .unwrap_or_else(|| error.clone())
        })
    }
}

/// 소셜 연결 해제 요청 구조체
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnlinkRequest {
    #[serde(alias = "access_token")]
    #[validate(length(min = 1, message = "액세스 토큰이 필요합니다"))]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_prefers_description() {
        let query = OAuthCallbackQuery {
            code: None,
            state: Some("s".to_string()),
            error: Some("access_denied".to_string()),
            error_description: Some("User denied access".to_string()),
        };
        assert_eq!(query.provider_error().as_deref(), Some("User denied access"));

        let query = OAuthCallbackQuery { error_description: None, ..query };
        assert_eq!(query.provider_error().as_deref(), Some("access_denied"));
    }

    #[test]
    fn test_empty_code_is_rejected() {
        let query = OAuthCallbackQuery {
            code: Some(String::new()),
            state: None,
            error: None,
            error_description: None,
        };
        assert!(query.validate().is_err());
        assert!(query.provider_error().is_none());
    }

    #[test]
    fn test_unlink_request_accepts_both_casings() {
        let req: UnlinkRequest = serde_json::from_str(r#"{"accessToken":"AAAA"}"#).unwrap();
        assert_eq!(req.access_token, "AAAA");

        let req: UnlinkRequest = serde_json::from_str(r#"{"access_token":"BBBB"}"#).unwrap();
        assert_eq!(req.access_token, "BBBB");
    }
}
