use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use mongodb::bson::DateTime;
use crate::config::AuthProvider;
use crate::domain::entities::users::{User, UserProfile};

fn format_timestamp(value: DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

/// 프로필 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub nickname: String,
    pub biography: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: profile.user_id.to_hex(),
            nickname: profile.nickname,
            biography: profile.biography,
            profile_image: profile.profile_image,
            created_at: format_timestamp(profile.created_at),
            updated_at: format_timestamp(profile.updated_at),
        }
    }
}

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,

    /// 인증 프로바이더 (local, kakao, google, naver)
    pub provider: AuthProvider,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,

    /// 소셜 계정인지 여부 (편의 필드)
    pub is_social_user: bool,

    pub service_agreed: bool,
    pub privacy_agreed: bool,
    pub marketing_agreed: bool,
    pub is_email_verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl UserResponse {
    pub fn with_profile(user: User, profile: Option<UserProfile>) -> Self {
        let mut response = Self::from(user);
        response.profile = profile.map(ProfileResponse::from);
        response
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            provider,
            provider_id,
            service_agreed,
            privacy_agreed,
            marketing_agreed,
            is_email_verified,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            provider,
            provider_id,
            is_social_user: provider.is_social(),
            service_agreed,
            privacy_agreed,
            marketing_agreed,
            is_email_verified,
            profile: None,
            created_at: format_timestamp(created_at),
            updated_at: format_timestamp(updated_at),
        }
    }
}

/// 소셜 로그인 URL 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OAuthLoginUrlResponse {
    pub login_url: String,
    pub state: String,
}

/// 소셜 로그인 결과 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialSignInResponse {
    pub user: UserResponse,
    /// 이번 로그인으로 계정이 새로 만들어졌는지 여부
    pub is_new_user: bool,
}
