//! 캐싱 계층 모듈
//!
//! Redis 기반 키-값 저장소입니다. 사용자 조회 캐시와 소셜 로그인 state 저장에 사용됩니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("oauth:state:abc", &pending, 600).await?;
//! let pending: Option<PendingOAuthState> = cache.take("oauth:state:abc").await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
