//! 프로필 서비스
//!
//! 사용자당 하나의 프로필을 조회 / 생성 / 부분 수정합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::users::{
            request::{CreateProfileRequest, UpdateProfileRequest},
            response::ProfileResponse,
        },
        entities::users::UserProfile,
    },
    repositories::{
        parse_object_id,
        users::{profile_repo::ProfileRepository, user_repo::UserRepository},
    },
    utils::string_utils::validate_required_string,
};

#[service(name = "profile")]
pub struct ProfileService {
    user_repo: Arc<UserRepository>,
    profile_repo: Arc<ProfileRepository>,
}

impl ProfileService {
    /// 사용자 또는 프로필이 없으면 404
    pub async fn get_profile(&self, user_id: &str) -> Result<ProfileResponse, AppError> {
        let object_id = self.ensure_user_exists(user_id).await?;

        let profile = self.profile_repo
            .find_by_user_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound("프로필을 찾을 수 없습니다.".to_string()))?;

        Ok(ProfileResponse::from(profile))
    }

    /// 사용자가 없으면 404, 이미 프로필이 있으면 409
    pub async fn create_profile(
        &self,
        user_id: &str,
        request: CreateProfileRequest,
    ) -> Result<ProfileResponse, AppError> {
        let object_id = self.ensure_user_exists(user_id).await?;

        if self.profile_repo.find_by_user_id(&object_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 프로필이 존재합니다.".to_string()));
        }

        let nickname = validate_required_string(&request.nickname, "닉네임")?;
        let profile = UserProfile::new(object_id, nickname, request.biography);
        let created = self.profile_repo.create(profile).await?;

        Ok(ProfileResponse::from(created))
    }

    /// 닉네임 / 자기소개 부분 수정
    ///
    /// 변경할 필드가 없으면 400 입니다.
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse, AppError> {
        if request.is_empty() {
            return Err(AppError::ValidationError("수정할 항목이 없습니다.".to_string()));
        }

        let nickname = request.nickname
            .as_deref()
            .map(|nickname| validate_required_string(nickname, "닉네임"))
            .transpose()?;

        let object_id = self.ensure_user_exists(user_id).await?;

        let updated = self.profile_repo
            .update_fields(&object_id, nickname, request.biography)
            .await?
            .ok_or_else(|| AppError::NotFound("프로필을 찾을 수 없습니다.".to_string()))?;

        Ok(ProfileResponse::from(updated))
    }

    async fn ensure_user_exists(&self, user_id: &str) -> Result<mongodb::bson::oid::ObjectId, AppError> {
        let object_id = parse_object_id(user_id)?;

        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()));
        }

        Ok(object_id)
    }
}
