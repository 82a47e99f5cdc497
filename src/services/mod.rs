//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `main` 에서 한 번 생성되어 [`AppState`](crate::core::state::AppState) 로
//! 핸들러에 주입됩니다.
//!
//! # Features
//!
//! - JWT 액세스/리프레시 토큰 발급과 검증
//! - 리프레시 토큰 기반 토큰 쌍 재발급
//! - GitHub OAuth 2.0 로그인과 사용자 프로비저닝

pub mod auth;
