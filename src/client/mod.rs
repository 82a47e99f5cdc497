//! 인증 서비스 클라이언트
//!
//! 퀴즈 앱 등 API 소비자가 사용하는 쪽의 코드입니다. 액세스 토큰이 만료되어
//! 동시에 여러 요청이 401 을 받아도 리프레시 호출은 한 번만 일어납니다.
//!
//! - [`CredentialStore`] - 현재 토큰 쌍
//! - [`TokenRefresher`] / [`HttpTokenRefresher`] - `POST /auth/refresh` 호출
//! - [`RefreshCoordinator`] - 단일 비행 갱신과 대기열
//! - [`ApiClient`] - Bearer 부착, 401 시 갱신 후 1회 재시도

pub mod errors;
pub mod credentials;
pub mod refresher;
pub mod coordinator;
pub mod api_client;

pub use errors::ClientError;
pub use credentials::{CredentialStore, Credentials};
pub use refresher::{HttpTokenRefresher, TokenRefresher};
pub use coordinator::{Attempt, RefreshCoordinator};
pub use api_client::ApiClient;
