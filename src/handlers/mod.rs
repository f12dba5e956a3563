//! HTTP 요청 핸들러
//!
//! 핸들러는 입력 검증 후 서비스 싱글톤에 위임하고, `AppError` 는 `ResponseError` 로 응답됩니다.
//!
//! - [`users`] - 회원가입, 로그인, 탈퇴
//! - [`profiles`] - 프로필 조회 / 생성 / 수정
//! - [`auth`] - 소셜 로그인

pub mod users;
pub mod profiles;
pub mod auth;
