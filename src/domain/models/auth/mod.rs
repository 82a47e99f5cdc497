//! 인증/인가 모델

pub mod authenticated_user;
pub mod authentication_request;
pub mod authorization;

pub use authenticated_user::*;
pub use authentication_request::*;
pub use authorization::*;
