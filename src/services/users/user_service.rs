//! 로컬 계정 서비스
//!
//! 이메일/비밀번호 회원가입, 로그인, 회원 탈퇴를 담당합니다.
//! 세션이나 토큰은 발급하지 않으며, 인증에 성공한 사용자 정보만 반환합니다.

use std::sync::Arc;
use bcrypt::hash;
use singleton_macro::service;
use crate::{
    domain::{
        entities::users::{Consents, User},
        dto::users::{
            request::{SignInRequest, SignUpRequest},
            response::UserResponse,
        },
    },
    repositories::{
        parse_object_id,
        users::{profile_repo::ProfileRepository, user_repo::UserRepository},
    },
    core::errors::{AppError, ErrorContext},
    utils::string_utils::mask_email,
};
use crate::config::PasswordConfig;

const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다.";

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,

    /// 탈퇴 시 프로필 연쇄 삭제에 사용
    profile_repo: Arc<ProfileRepository>,
}

impl UserService {
    /// 로컬 회원가입
    ///
    /// 이메일 중복은 409 이며, 비밀번호는 bcrypt 로 해싱해 저장합니다.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<UserResponse, AppError> {
        let start_time = std::time::Instant::now();

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다.".to_string()));
        }

        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new_local(
            request.email,
            password_hash,
            Consents {
                service: request.service_agreed,
                privacy: request.privacy_agreed,
                marketing: request.marketing_agreed,
            },
        );

        let created_user = self.user_repo.create(user).await?;

        log::info!(
            "회원가입 완료: {} ({:?})",
            mask_email(&created_user.email),
            start_time.elapsed()
        );

        Ok(UserResponse::from(created_user))
    }

    /// 로컬 로그인
    ///
    /// 존재하지 않는 이메일, 틀린 비밀번호, 소셜 계정은 모두 401 입니다.
    pub async fn sign_in(&self, request: SignInRequest) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        if !user.can_authenticate_with_password() {
            return Err(AppError::AuthenticationError(format!(
                "{} 계정입니다. 해당 프로바이더로 로그인해주세요.",
                user.provider.display_name()
            )));
        }

        let password_hash = user.password_hash.as_deref()
            .ok_or_else(|| AppError::InternalError("비밀번호 해시가 없습니다".to_string()))?;

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(&request.password, password_hash)
            .context("비밀번호 검증 실패")?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        let profile = match user.id.as_ref() {
            Some(user_id) => self.profile_repo.find_by_user_id(user_id).await?,
            None => None,
        };

        Ok(UserResponse::with_profile(user, profile))
    }

    /// 회원 탈퇴
    ///
    /// 프로필을 먼저 삭제한 뒤 사용자를 삭제합니다.
    pub async fn withdraw(&self, user_id: &str) -> Result<(), AppError> {
        let object_id = parse_object_id(user_id)?;

        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()));
        }

        let removed_profiles = self.profile_repo.delete_by_user_id(&object_id).await?;
        let deleted = self.user_repo.delete(user_id).await?;

        if !deleted {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()));
        }

        log::info!("회원 탈퇴 완료: {} (프로필 {}건 삭제)", user_id, removed_profiles);

        Ok(())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()))?;

        let profile = match user.id.as_ref() {
            Some(id) => self.profile_repo.find_by_user_id(id).await?,
            None => None,
        };

        Ok(UserResponse::with_profile(user, profile))
    }
}
