//! User Profile Entity
//!
//! 사용자와 1:1 로 연결되는 프로필(닉네임, 자기소개, 소셜 프로필 이미지)입니다.
//! `user_id` 에 unique 인덱스가 걸려 있어 사용자당 하나만 존재합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유 사용자
    pub user_id: ObjectId,
    pub nickname: String,
    #[serde(default)]
    pub biography: String,
    /// 소셜 프로바이더가 제공한 프로필 이미지 URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl UserProfile {
    pub fn new(user_id: ObjectId, nickname: String, biography: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user_id,
            nickname,
            biography: biography.unwrap_or_default(),
            profile_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_profile_image(mut self, profile_image: Option<String>) -> Self {
        self.profile_image = profile_image;
        self
    }
}
