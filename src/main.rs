//! 소셜 인증 서버 진입점
//!
//! 1. `PROFILE` 에 맞는 `.env` 파일 로드
//! 2. MongoDB / Redis 연결 후 `ServiceLocator` 에 등록
//! 3. 리포지토리 / 서비스 싱글톤 선생성, 인덱스 생성
//! 4. 소셜 프로바이더 설정 상태 출력
//! 5. HTTP 서버 시작 (`HOST:PORT`, 기본 127.0.0.1:4000)

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use social_auth_backend::caching::redis::RedisClient;
use social_auth_backend::config::{missing_oauth_settings, AuthProvider, ServerConfig};
use social_auth_backend::core::registry::ServiceLocator;
use social_auth_backend::db::Database;
use social_auth_backend::repositories::users::{profile_repo::ProfileRepository, user_repo::UserRepository};
use social_auth_backend::routes::configure_all_routes;
use social_auth_backend::utils::display_terminal::{print_boxed_title, print_provider_status};

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 소셜 인증 서비스 시작중...");

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| std::io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    ensure_indexes().await;
    report_provider_configuration();

    start_http_server().await
}

async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate limit 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 표준 출력 사용
    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => println!("[{}] .env.prod 파일 로드 됨", profile),
            Err(e) => eprintln!("[{}] .env.prod 파일 로드 실패: {}", profile, e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => println!("[{}] .env.dev 파일 로드 됨", profile),
            Err(e) => eprintln!("[{}] .env.dev 파일 로드 실패: {}", profile, e),
        },
        _ => {
            dotenv().ok();
            println!("[{}] 기본 .env 파일 로드", profile);
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| std::io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| std::io::Error::other(format!("Redis 연결 실패: {}", e)))?;

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// unique 인덱스 생성
///
/// 실패해도 서버는 시작하지만 중복 방지가 애플리케이션 검사에만 의존하게 됩니다.
async fn ensure_indexes() {
    if let Err(e) = UserRepository::instance().create_indexes().await {
        error!("users 인덱스 생성 실패: {}", e);
    }

    if let Err(e) = ProfileRepository::instance().create_indexes().await {
        error!("user_profiles 인덱스 생성 실패: {}", e);
    }

    info!("🗂️ 인덱스 확인 완료");
}

/// 소셜 프로바이더별 설정 누락 여부 출력
fn report_provider_configuration() {
    print_boxed_title("🔑 SOCIAL LOGIN PROVIDERS");

    for provider in AuthProvider::SOCIAL {
        let missing = missing_oauth_settings(provider);
        let missing: Vec<&str> = missing.iter().map(String::as_str).collect();

        print_provider_status(provider.as_str(), &missing);

        if !missing.is_empty() {
            warn!("{} 로그인 비활성: {} 누락", provider.display_name(), missing.join(", "));
        }
    }
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:4000")
        .allowed_origin("http://127.0.0.1:4000")
        .allowed_methods(vec!["GET", "POST", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
