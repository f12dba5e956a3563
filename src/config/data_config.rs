//! # Data & Server Configuration
//!
//! 실행 환경, 서버 바인딩, 비밀번호 해싱 비용 등 인증 외적인 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수에서 현재 실행 환경을 결정합니다.
    ///
    /// 값이 없거나 알 수 없는 값이면 `Production` 으로 간주합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Production)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost 값을 반환합니다.
    ///
    /// `BCRYPT_COST` 가 4-15 범위면 그대로 사용하고, 아니면 실행 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 리스닝 포트 (`PORT`, 기본값 4000)
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(4000)
    }

    /// 바인딩 호스트 (`HOST`, 기본값 127.0.0.1)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 4000);
        }
        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }
    }
}
