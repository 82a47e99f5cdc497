//! OAuth 프로바이더 통합 모델

pub mod github_user;

pub use github_user::*;
