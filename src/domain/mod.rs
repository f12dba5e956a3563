//! # Domain Layer Module
//!
//! ```text
//! Domain Layer
//! ├── entities  - MongoDB 문서 (User, UserProfile)
//! ├── dto       - 요청 / 응답 계약
//! └── models    - OAuth 프로바이더 응답과 정규화된 SocialUserInfo
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis
//! ```
//!
//! 도메인 계층은 데이터 구조와 불변식만 담고, 저장과 외부 호출은 상위 계층이 담당합니다.

pub mod entities;
pub mod dto;
pub mod models;
