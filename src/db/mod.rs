//! Database Connection Management Module
//!
//! MongoDB 연결을 관리합니다. 사용자(`users`)와 프로필(`user_profiles`) 컬렉션이
//! 이 연결을 통해 리포지토리 계층에 제공됩니다.
//!
//! # 환경 변수
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="social_auth_dev"
//! ```

use mongodb::{Client, options::ClientOptions};
use std::env;
use log::info;

/// MongoDB 데이터베이스 연결 래퍼
///
/// `ServiceLocator::set()` 으로 등록되어 `#[repository]` 구조체의 `db` 필드에 주입됩니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 변수로 MongoDB 에 연결하고 ping 으로 연결을 확인합니다.
    ///
    /// # Errors
    ///
    /// URI 파싱 실패, 서버 연결 실패 시 에러를 반환합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database_name = env::var("DATABASE_NAME")
            .unwrap_or_else(|_| "social_auth_dev".to_string());

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("social_auth".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    /// 설정된 데이터베이스 핸들
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
