//! # 소셜 로그인 서비스
//!
//! 프로바이더 어댑터를 구동해 소셜 로그인 전체 흐름을 처리합니다.
//!
//! ```text
//! GET /auth/{provider}/login
//!   └─ login_url()  ── state 생성 → Redis 저장 (TTL) → 인가 URL 반환
//!
//! GET /auth/{provider}/callback?code&state
//!   └─ sign_in()
//!        1. state 확인 후 즉시 삭제 (1회용, 없으면 401)
//!        2. code → access token
//!        3. access token → SocialUserInfo
//!        4. (provider, provider_id) 로 기존 계정 조회 (프로바이더가 이메일을 인증했으면 반영)
//!        5. 없으면 이메일 충돌 확인 (다른 방식으로 가입된 이메일이면 409)
//!        6. 소셜 계정 + 프로필 생성
//! ```

use std::future::Future;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use singleton_macro::service;
use crate::{
    caching::redis::RedisClient,
    config::{AuthProvider, OAuthConfig},
    core::errors::{AppError, AppResult},
    domain::{
        dto::users::{
            request::SocialSignInRequest,
            response::{OAuthLoginUrlResponse, SocialSignInResponse, UserResponse},
        },
        entities::users::{Consents, User, UserProfile},
        models::oauth::SocialUserInfo,
    },
    repositories::users::{profile_repo::ProfileRepository, user_repo::UserRepository},
    utils::string_utils::mask_email,
};
use super::{
    google_oauth_service::GoogleOAuthService,
    kakao_oauth_service::KakaoOAuthService,
    naver_oauth_service::NaverOAuthService,
    provider::{generate_state, OAuthProvider},
};

/// Redis 에 저장되는 state 키
pub fn state_cache_key(state: &str) -> String {
    format!("oauth:state:{}", state)
}

/// 발급된 state 에 함께 저장하는 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOAuthState {
    pub provider: AuthProvider,
    pub issued_at: i64,
}

/// 소셜 로그인 결과
struct SocialAccount {
    user: User,
    profile: Option<UserProfile>,
    is_new_user: bool,
}

/// 프로바이더에 해당하는 어댑터
pub fn provider_adapter(provider: AuthProvider) -> Result<Arc<dyn OAuthProvider>, AppError> {
    match provider {
        AuthProvider::Google => Ok(GoogleOAuthService::instance()),
        AuthProvider::Kakao => Ok(KakaoOAuthService::instance()),
        AuthProvider::Naver => Ok(NaverOAuthService::instance()),
        AuthProvider::Local => Err(AppError::ValidationError(
            "소셜 로그인 제공자가 아닙니다.".to_string(),
        )),
    }
}

#[service(name = "social_auth")]
pub struct SocialAuthService {
    user_repo: Arc<UserRepository>,
    profile_repo: Arc<ProfileRepository>,

    /// state 저장소
    redis: Arc<RedisClient>,
}

/// 콜백으로 전달된 state 파라미터가 비어 있으면 401
pub fn require_state_param(state: &str) -> AppResult<()> {
    if state.is_empty() {
        return Err(AppError::AuthenticationError("state 값이 필요합니다.".to_string()));
    }
    Ok(())
}

/// 저장소에서 꺼낸 state 가 요청 프로바이더에서 발급된 것인지 확인합니다.
///
/// 없거나(만료, 이미 사용됨) 다른 프로바이더에서 발급된 state 는 401 입니다.
pub fn check_pending_state(pending: Option<PendingOAuthState>, provider: AuthProvider) -> AppResult<()> {
    match pending {
        Some(pending) if pending.provider == provider => Ok(()),
        Some(pending) => {
            log::warn!("state 프로바이더 불일치: 발급 {}, 요청 {}", pending.provider, provider);
            Err(AppError::AuthenticationError("유효하지 않은 state 값입니다.".to_string()))
        }
        None => Err(AppError::AuthenticationError(
            "유효하지 않거나 만료된 state 값입니다.".to_string(),
        )),
    }
}

/// 신규 가입에 사용할 이메일
///
/// 기존 계정이 없는데 프로바이더가 이메일을 주지 않았다면 가입할 수 없으므로 400 입니다.
pub fn require_signup_email(info: &SocialUserInfo) -> AppResult<&str> {
    info.email
        .as_deref()
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AppError::ValidationError(format!(
            "{} 계정의 이메일 제공 동의가 필요합니다.",
            info.provider.display_name()
        )))
}

/// 이메일이 이미 다른 계정(로컬 또는 다른 프로바이더)에 쓰이고 있으면 409
pub fn ensure_email_available(email: &str, owner: Option<&User>) -> AppResult<()> {
    match owner {
        None => Ok(()),
        Some(existing) => {
            log::warn!(
                "이메일 충돌: {} 는 {} 계정으로 가입되어 있음",
                mask_email(email),
                existing.provider
            );
            Err(AppError::ConflictError(format!(
                "이미 {} 방식으로 가입된 이메일입니다.",
                existing.provider.display_name()
            )))
        }
    }
}

/// 프로필 닉네임: 요청 닉네임이 비어 있으면 이메일 / 프로바이더 이름으로 대체
fn signup_nickname(request: &SocialSignInRequest) -> String {
    SocialUserInfo {
        provider: request.provider,
        provider_id: request.provider_id.clone(),
        email: Some(request.email.clone()),
        nickname: request.nickname.clone(),
        profile_image: None,
        email_verified: false,
    }
    .display_nickname()
}

/// `step` 이 실패하면 `rollback` 을 실행하고 원래 에러를 반환합니다.
///
/// 롤백 실패는 로그로만 남기며 반환되는 에러를 바꾸지 않습니다.
async fn with_rollback<T, S, R, RF>(step: S, rollback: R) -> AppResult<T>
where
    S: Future<Output = AppResult<T>>,
    R: FnOnce() -> RF,
    RF: Future<Output = AppResult<bool>>,
{
    let error = match step.await {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };

    log::error!("프로필 생성 실패, 사용자 생성을 되돌립니다: {}", error);

    match rollback().await {
        Ok(true) => log::info!("사용자 롤백 완료"),
        Ok(false) => log::warn!("롤백할 사용자가 이미 없습니다"),
        Err(rollback_error) => log::error!(
            "사용자 롤백 실패, 프로필 없는 사용자가 남았습니다: {}",
            rollback_error
        ),
    }

    Err(error)
}

impl SocialAuthService {
    /// 프로바이더 로그인 URL 발급
    ///
    /// 생성한 state 를 `OAUTH_STATE_TTL_SECONDS` 동안 보관합니다.
    pub async fn login_url(&self, provider: AuthProvider) -> Result<OAuthLoginUrlResponse, AppError> {
        let adapter = provider_adapter(provider)?;

        let generated = generate_state();
        let login = adapter.login_url(Some(generated.as_str()))?;
        let state = login.state.unwrap_or(generated);

        let pending = PendingOAuthState {
            provider,
            issued_at: chrono::Utc::now().timestamp(),
        };

        self.redis
            .set_with_expiry(&state_cache_key(&state), &pending, OAuthConfig::state_ttl_seconds() as usize)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::debug!("{} 로그인 URL 발급", provider.display_name());

        Ok(OAuthLoginUrlResponse {
            login_url: login.url,
            state,
        })
    }

    /// 콜백 처리: state 검증 → 토큰 교환 → 사용자 정보 → 계정 조회 또는 생성
    pub async fn sign_in(
        &self,
        provider: AuthProvider,
        code: &str,
        state: &str,
    ) -> Result<SocialSignInResponse, AppError> {
        let adapter = provider_adapter(provider)?;

        self.consume_state(provider, state).await?;

        let token = adapter.exchange_code(code, state).await?;
        let access_token = token
            .access_token()
            .ok_or_else(|| AppError::AuthenticationError("액세스 토큰이 없습니다.".to_string()))?;

        let info = adapter.fetch_user_info(access_token).await?;

        let account = self.find_or_create(&info).await?;

        log::info!(
            "{} 로그인 성공: {} (신규: {})",
            provider.display_name(),
            info.provider_id,
            account.is_new_user
        );

        Ok(account.into_response())
    }

    /// 소셜 연결 해제 (토큰 폐기)
    pub async fn unlink(&self, provider: AuthProvider, access_token: &str) -> Result<(), AppError> {
        let adapter = provider_adapter(provider)?;

        adapter.revoke(access_token).await?;

        log::info!("{} 연결 해제 완료", provider.display_name());
        Ok(())
    }

    /// 프로바이더 신원을 이미 가진 클라이언트의 소셜 가입
    ///
    /// 같은 소셜 계정이 있으면 그대로 반환합니다. 이메일 인증 여부는 확인할 수 없으므로 미인증으로 저장합니다.
    pub async fn register_social_user(&self, request: SocialSignInRequest) -> Result<SocialSignInResponse, AppError> {
        let account = self.find_or_register(request, false).await?;
        Ok(account.into_response())
    }

    /// state 를 꺼내면서 삭제합니다 (GETDEL). 같은 state 로 두 번째 콜백이 오면 401 입니다.
    async fn consume_state(&self, provider: AuthProvider, state: &str) -> AppResult<()> {
        require_state_param(state)?;

        let pending: Option<PendingOAuthState> = self.redis
            .take(&state_cache_key(state))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        check_pending_state(pending, provider)
    }

    async fn find_or_create(&self, info: &SocialUserInfo) -> AppResult<SocialAccount> {
        if let Some(mut account) = self.find_existing(info.provider, &info.provider_id).await? {
            if account.user.mark_email_verified(info.email_verified) {
                account.user = self.user_repo.update(account.user).await?;
                log::info!("{} 이메일 인증 상태 갱신: {}", info.provider.display_name(), mask_email(&account.user.email));
            }
            return Ok(account);
        }

        require_signup_email(info)?;

        let mut request = SocialSignInRequest::from_user_info(info);
        request.nickname = Some(info.display_nickname());

        self.find_or_register(request, info.email_verified).await
    }

    async fn find_existing(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<SocialAccount>> {
        let Some(user) = self.user_repo.find_by_provider_id(provider, provider_id).await? else {
            return Ok(None);
        };

        let profile = match user.id.as_ref() {
            Some(user_id) => self.profile_repo.find_by_user_id(user_id).await?,
            None => None,
        };

        Ok(Some(SocialAccount { user, profile, is_new_user: false }))
    }

    async fn find_or_register(&self, request: SocialSignInRequest, email_verified: bool) -> AppResult<SocialAccount> {
        if let Some(account) = self.find_existing(request.provider, &request.provider_id).await? {
            return Ok(account);
        }

        let owner = self.user_repo.find_by_email(&request.email).await?;
        ensure_email_available(&request.email, owner.as_ref())?;

        let nickname = signup_nickname(&request);
        let profile_image = request.profile_image.clone();

        let user = User::new_social(
            request.email,
            request.provider,
            request.provider_id,
            Consents {
                service: request.service_agreed,
                privacy: request.privacy_agreed,
                marketing: request.marketing_agreed,
            },
            email_verified,
        );

        let user = self.user_repo.create(user).await?;
        let user_id = user.id
            .ok_or_else(|| AppError::InternalError("생성된 사용자 ID가 없습니다.".to_string()))?;

        let new_profile = UserProfile::new(user_id, nickname, None).with_profile_image(profile_image);
        let user_hex = user_id.to_hex();

        let profile = with_rollback(
            self.profile_repo.create(new_profile),
            || self.user_repo.delete(&user_hex),
        )
        .await?;

        log::info!("소셜 계정 생성: {} ({})", mask_email(&user.email), user.provider);

        Ok(SocialAccount {
            user,
            profile: Some(profile),
            is_new_user: true,
        })
    }
}

impl SocialAccount {
    fn into_response(self) -> SocialSignInResponse {
        SocialSignInResponse {
            user: UserResponse::with_profile(self.user, self.profile),
            is_new_user: self.is_new_user,
        }
    }
}
