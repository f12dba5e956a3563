//! 소셜 인증 서비스 모듈
//!
//! - [`provider`] - 어댑터 공통 트레이트와 응답 처리
//! - [`google_oauth_service`], [`kakao_oauth_service`], [`naver_oauth_service`] - 프로바이더 어댑터
//! - [`social_auth_service`] - state 검증과 계정 연동을 포함한 전체 흐름

pub mod provider;
pub mod google_oauth_service;
pub mod kakao_oauth_service;
pub mod naver_oauth_service;
pub mod social_auth_service;

pub use provider::{LoginUrl, OAuthEndpoints, OAuthProvider};
pub use google_oauth_service::GoogleOAuthService;
pub use kakao_oauth_service::KakaoOAuthService;
pub use naver_oauth_service::NaverOAuthService;
pub use social_auth_service::SocialAuthService;
