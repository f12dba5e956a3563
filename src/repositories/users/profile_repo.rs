//! 사용자 프로필 리포지토리
//!
//! `user_profiles` 컬렉션을 다룹니다. 프로필은 `user_id` 로만 조회합니다.

use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::users::UserProfile,
};
use singleton_macro::repository;
use crate::repositories::is_duplicate_key_error;

#[repository(name = "profile", collection = "user_profiles")]
pub struct ProfileRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ProfileRepository {
    pub async fn find_by_user_id(&self, user_id: &ObjectId) -> Result<Option<UserProfile>, AppError> {
        self.collection::<UserProfile>()
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 프로필 저장
    ///
    /// 이미 프로필이 있는 사용자면 409 입니다.
    pub async fn create(&self, mut profile: UserProfile) -> Result<UserProfile, AppError> {
        let result = self.collection::<UserProfile>()
            .insert_one(&profile)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 프로필이 존재합니다.".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        profile.id = Some(
            result.inserted_id.as_object_id()
                .ok_or_else(|| AppError::DatabaseError("삽입된 프로필 ID를 확인할 수 없습니다.".to_string()))?,
        );

        Ok(profile)
    }

    /// 닉네임 / 자기소개 부분 수정
    ///
    /// 전달된 필드만 `$set` 하며, 수정된 문서를 반환합니다. 프로필이 없으면 `None`.
    pub async fn update_fields(
        &self,
        user_id: &ObjectId,
        nickname: Option<String>,
        biography: Option<String>,
    ) -> Result<Option<UserProfile>, AppError> {
        let mut changes = Document::new();
        if let Some(nickname) = nickname {
            changes.insert("nickname", nickname);
        }
        if let Some(biography) = biography {
            changes.insert("biography", biography);
        }
        changes.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<UserProfile>()
            .find_one_and_update(doc! { "user_id": user_id }, doc! { "$set": changes })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자의 프로필 삭제 (회원 탈퇴 시 연쇄 삭제)
    pub async fn delete_by_user_id(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<UserProfile>()
            .delete_many(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        self.collection::<UserProfile>()
            .create_index(user_id_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
