//! 사용자 리포지토리
//!
//! `users` 컬렉션에 대한 CRUD 와 Redis 조회 캐시를 담당합니다.
//! 모든 쓰기(insert / replace)는 [`User::validate_integrity`] 를 통과해야 합니다.

use std::sync::Arc;
use mongodb::{bson::doc, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    config::AuthProvider,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::users::User,
};
use singleton_macro::repository;
use crate::repositories::{is_duplicate_key_error, parse_object_id};

/// 사용자 조회 캐시 TTL (초)
const USER_CACHE_TTL_SECONDS: usize = 600;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 이메일로 사용자 조회
    ///
    /// 중복 검사에 사용되므로 캐시를 거치지 않습니다.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 프로바이더와 프로바이더 사용자 ID 로 소셜 계정 조회
    pub async fn find_by_provider_id(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! {
                "provider": provider.as_str(),
                "provider_id": provider_id,
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID 로 사용자 조회
    ///
    /// - **캐시 키**: `user:{id}` (리포지토리 매크로의 `cache_key()` 사용)
    /// - 잘못된 ID 형식은 400
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = parse_object_id(id)?;
        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 새 사용자 저장
    ///
    /// 무결성 검증 후 저장하며, 이메일 또는 `(provider, provider_id)` 중복은 409 입니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        user.validate_integrity()?;

        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다.".to_string()));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 가입된 계정입니다.".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = Some(
            result.inserted_id.as_object_id()
                .ok_or_else(|| AppError::DatabaseError("삽입된 사용자 ID를 확인할 수 없습니다.".to_string()))?,
        );

        Ok(user)
    }

    /// 기존 사용자 문서 전체를 교체합니다.
    ///
    /// 저장 전 무결성 검증을 다시 수행하고 `updated_at` 을 갱신합니다.
    pub async fn update(&self, mut user: User) -> Result<User, AppError> {
        let object_id = user.id
            .ok_or_else(|| AppError::ValidationError("저장되지 않은 사용자는 수정할 수 없습니다.".to_string()))?;

        user.validate_integrity()?;
        user.touch();

        let result = self.collection::<User>()
            .replace_one(doc! { "_id": object_id }, &user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 사용 중인 이메일입니다.".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()));
        }

        let _ = self.invalidate_cache(&object_id.to_hex()).await;

        Ok(user)
    }

    /// 사용자 삭제
    ///
    /// 삭제된 문서가 있으면 `true`.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = parse_object_id(id)?;

        let result = self.collection::<User>()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            let _ = self.invalidate_cache(id).await;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// `users` 컬렉션 인덱스 생성
    ///
    /// 소셜 식별자 인덱스는 `provider_id` 가 있는 문서만 대상으로 하는 partial unique 인덱스입니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let provider_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .partial_filter_expression(doc! { "provider_id": { "$exists": true } })
                .name("provider_identity_unique".to_string())
                .build())
            .build();

        collection
            .create_indexes([email_index, provider_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
