//! # Configuration Module
//!
//! 인증 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 환경 변수에서 읽어오며, 서버 시작 시점에 한 번 스냅샷으로
//! 고정되어 각 서비스에 주입됩니다. 실행 중에는 절대 변경되지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, Rate Limiting 설정
//! - [`auth_config`] - JWT, GitHub OAuth, OAuth state 설정
//! - [`client_config`] - 토큰 갱신 클라이언트 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수 (프로덕션)
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-key"
//! export GITHUB_CLIENT_ID="your-client-id"
//! export GITHUB_CLIENT_SECRET="your-client-secret"
//! export GITHUB_REDIRECT_URI="https://yourdomain.com/auth/github/callback"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="production"      # development, test, staging, production
//! export JWT_ACCESS_TTL_HOURS="1"
//! export JWT_REFRESH_TTL_HOURS="168"
//! export OAUTH_STATE_SECRET="oauth-secret"
//! export AUTH_REFRESH_TIMEOUT_SECS="10"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod client_config;

pub use data_config::*;
pub use auth_config::*;
pub use client_config::*;
