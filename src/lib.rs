//! 소셜 인증 서비스 백엔드
//!
//! 로컬 계정(이메일 + 비밀번호)과 Google / Kakao / Naver 소셜 로그인을 하나의
//! 사용자 스키마로 관리합니다. 사용자와 프로필은 MongoDB 에, OAuth `state` 는
//! Redis 에 저장됩니다.
//!
//! ```text
//! routes → handlers → services → repositories → MongoDB + Redis
//!                        │
//!                        └→ OAuthProvider (google / kakao / naver)
//! ```
//!
//! 서비스와 리포지토리는 `singleton_macro` 의 `#[service]` / `#[repository]`
//! 로 정의되며 `core::registry::ServiceLocator` 가 생성 순서를 관리합니다.

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
