//! # User Data Transfer Objects Module
//!
//! 사용자/로그인 관련 API 의 요청·응답 계약입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   └── auth_request.rs     # OAuth 콜백 쿼리
//! └── response/
//!     ├── user_response.rs    # 사용자 정보, 로그인 응답
//!     └── oauth_response.rs   # 로그인 URL 응답
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
