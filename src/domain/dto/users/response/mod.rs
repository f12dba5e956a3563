//! 응답 DTO
//!
//! 비밀번호 해시 등 내부 필드는 응답에 포함되지 않습니다.

pub mod user_response;

pub use user_response::{OAuthLoginUrlResponse, ProfileResponse, SocialSignInResponse, UserResponse};
