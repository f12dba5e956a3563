//! 사용자 도메인 엔티티

pub mod user;
pub mod user_profile;

pub use user::{Consents, User};
pub use user_profile::UserProfile;
