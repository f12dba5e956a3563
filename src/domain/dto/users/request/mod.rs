//! 요청 DTO

pub mod auth_request;
pub mod profile_request;
pub mod sign_up;
pub mod social_sign_in;

pub use auth_request::{OAuthCallbackQuery, UnlinkRequest};
pub use profile_request::{CreateProfileRequest, UpdateProfileRequest};
pub use sign_up::{SignInRequest, SignUpRequest};
pub use social_sign_in::SocialSignInRequest;
