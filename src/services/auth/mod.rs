//! 인증 서비스 모듈
//!
//! JWT 발급/검증, 토큰 갱신, GitHub OAuth 신원 브리지를 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, 유예 시간 없는 만료 판정
//! - 액세스/리프레시 토큰은 `type` 클레임으로 엄격히 구분
//! - CSRF 방지 (서명된 OAuth state 매개변수)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenService, RefreshService};
//!
//! let tokens = Arc::new(TokenService::new(&jwt_settings));
//! let pair = tokens.issue_token_pair(&user)?;
//!
//! let refresh = RefreshService::new(tokens.clone(), user_store.clone());
//! let renewed = refresh.refresh(&pair.refresh_token).await?;
//! ```

pub mod token_service;
pub mod refresh_service;
pub mod github_client;
pub mod github_auth_service;

pub use token_service::*;
pub use refresh_service::*;
pub use github_client::*;
pub use github_auth_service::*;
