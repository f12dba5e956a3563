//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1 로 매핑되는 엔티티입니다.
//!
//! | 엔티티 | 컬렉션 | 인덱스 |
//! |--------|--------|--------|
//! | [`users::User`] | `users` | `email` (unique), `(provider, provider_id)` (unique, partial) |
//! | [`users::UserProfile`] | `user_profiles` | `user_id` (unique) |

pub mod users;
