//! 프로필 생성 / 수정 요청 DTO

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    #[schema(example = "코코", min_length = 1, max_length = 30)]
    #[validate(length(min = 1, max = 30, message = "닉네임은 1-30자 사이여야 합니다."))]
    pub nickname: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "자기소개는 500자 이하여야 합니다."))]
    pub biography: Option<String>,
}

/// 부분 수정 요청
///
/// 전달된 필드만 변경됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "닉네임은 1-30자 사이여야 합니다."))]
    pub nickname: Option<String>,

    #[serde(default)]
    #[validate(length(max = 500, message = "자기소개는 500자 이하여야 합니다."))]
    pub biography: Option<String>,
}

impl UpdateProfileRequest {
    /// 변경할 필드가 하나도 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.biography.is_none()
    }
}
