//! 퀴즈 인증 서비스 백엔드
//!
//! GitHub OAuth 로그인과 상태 없는(stateless) JWT 액세스/리프레시 토큰을 제공하는
//! 인증 서비스입니다. 클라이언트 측 단일 비행 토큰 갱신 코디네이터도 함께 제공합니다.
//!
//! # Features
//!
//! - **JWT 인증**: HS256 액세스/리프레시 토큰, `type` 클레임으로 종류 구분
//! - **OAuth 2.0**: GitHub 로그인, 첫 로그인 시 사용자 자동 생성
//! - **토큰 갱신**: 리프레시 토큰 검증 후 주체를 다시 읽어 새 토큰 쌍 발급
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Redis**: 사용자 조회 캐시
//! - **클라이언트**: 401 동시 발생 시 리프레시 1회, 대기열 FIFO 재시도
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← web::Data<AppState>
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, RefreshService, GitHubAuthService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore (MongoDB / 메모리)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use quiz_auth_backend::config::JwtSettings;
//! use quiz_auth_backend::services::auth::TokenService;
//!
//! let tokens = TokenService::new(&JwtSettings::from_env()?);
//! let pair = tokens.issue_token_pair(&user)?;
//! let claims = tokens.validate_access_token(&pair.access_token)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
pub mod client;

#[cfg(test)]
mod test_support;
