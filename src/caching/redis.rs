//! # Redis 클라이언트
//!
//! JSON 직렬화를 곁들인 얇은 Redis 래퍼입니다.
//! 두 곳에서 사용됩니다.
//!
//! - 리포지토리의 사용자 조회 캐시 (`user:{id}`, TTL 600초)
//! - 소셜 로그인 state 저장소 (`oauth:state:{state}`, 1회용, TTL `OAUTH_STATE_TTL_SECONDS`)
//!
//! 연결은 멀티플렉싱 연결을 요청마다 얻어 사용합니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

fn serialization_error(description: &'static str, e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, description, e.to_string()))
}

/// Redis 클라이언트 래퍼
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// `REDIS_URL` 로 연결하고 PING 으로 연결을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// JSON 으로 저장된 값을 읽어 역직렬화합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|json| serde_json::from_str(&json).map_err(|e| serialization_error("Deserialization failed", e)))
            .transpose()
    }

    /// 값을 읽고 동시에 삭제합니다 (GETDEL).
    ///
    /// 한 번만 사용되어야 하는 값(OAuth state)에 사용합니다.
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get_del(key).await?;

        value
            .map(|json| serde_json::from_str(&json).map_err(|e| serialization_error("Deserialization failed", e)))
            .transpose()
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| serialization_error("Serialization failed", e))?;

        conn.set(key, json).await
    }

    /// TTL(초)과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| serialization_error("Serialization failed", e))?;

        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }
}
