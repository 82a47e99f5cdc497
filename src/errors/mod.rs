//! 애플리케이션 전역 에러 모듈
//!
//! 서버 측 [`AppError`](errors::AppError), 토큰 검증 전용
//! [`TokenError`](errors::TokenError)를 제공합니다.

pub mod errors;

pub use errors::*;
