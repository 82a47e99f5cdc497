//! # 사용자 관련 응답 DTO 모듈
//!
//! 민감한 정보(내부 토큰, 프로바이더 액세스 토큰)는 응답에 포함하지 않습니다.
//!
//! ## 로그인 응답
//! ```json
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIs...",
//!   "refresh_token": "eyJhbGciOiJIUzI1NiIs...",
//!   "username": "octocat",
//!   "email": "octocat@github.com"
//! }
//! ```

pub mod user_response;
pub mod oauth_response;

pub use user_response::{UserResponse, LoginResponse, SessionResponse};
pub use oauth_response::OAuthLoginUrlResponse;
