//! 인증 서비스 API 클라이언트
//!
//! 모든 보호 요청에 `Authorization: Bearer` 를 붙이고 [`RefreshCoordinator`] 를 거쳐
//! 실행합니다. 401 이면 토큰을 갱신해 한 번만 재시도합니다.
//!
//! ```rust,ignore
//! let client = ApiClient::new(ClientConfig::new("http://localhost:8080"))?;
//! client.sign_in(login_response);
//!
//! let me: serde_json::Value = client.get_json("/api/v1/me").await?;
//! ```

use std::sync::Arc;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use crate::config::ClientConfig;
use crate::domain::LoginResponse;
use super::coordinator::{Attempt, RefreshCoordinator};
use super::credentials::{CredentialStore, Credentials};
use super::errors::{status_error, ClientError};
use super::refresher::{HttpTokenRefresher, TokenRefresher};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    coordinator: Arc<RefreshCoordinator>,
}

impl ApiClient {
    /// `POST /auth/refresh` 를 사용하는 기본 클라이언트
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quiz_auth_backend/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let refresher = Arc::new(HttpTokenRefresher::new(http.clone(), &config.base_url));

        Ok(Self::with_refresher(config, http, refresher))
    }

    pub fn with_refresher(config: ClientConfig, http: reqwest::Client, refresher: Arc<dyn TokenRefresher>) -> Self {
        let credentials = Arc::new(CredentialStore::new());
        let coordinator = Arc::new(RefreshCoordinator::new(credentials, refresher, config.refresh_timeout));

        Self {
            http,
            base_url: config.base_url,
            coordinator,
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        self.coordinator.credentials()
    }

    /// 로그인 응답의 토큰 쌍으로 새 세션 시작
    pub fn sign_in(&self, login: LoginResponse) {
        log::info!("로그인: {}", login.username);
        self.coordinator.start_session(Credentials::from(login));
    }

    /// 로그아웃. 대기 중인 요청은 모두 `SessionClosed` 로 끝납니다.
    pub fn sign_out(&self) {
        self.coordinator.terminate();
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.execute(Method::GET, path).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(Method::DELETE, path).await?;
        Ok(())
    }

    /// 인증이 필요한 요청 실행
    ///
    /// 2xx 응답만 돌려주고, 401 이외의 실패 상태는 `ClientError::Status` 로 변환합니다.
    pub async fn execute(&self, method: Method, path: &str) -> Result<reqwest::Response, ClientError> {
        let url = self.url(path);

        self.coordinator
            .call(|token| {
                let request = self.http.request(method.clone(), &url).bearer_auth(token);
                async move {
                    let response = request.send().await?;
                    match response.status() {
                        StatusCode::UNAUTHORIZED => Ok(Attempt::Unauthorized),
                        status if status.is_success() => Ok(Attempt::Done(response)),
                        _ => Err(status_error(response).await),
                    }
                }
            })
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_path() {
        let client = ApiClient::new(ClientConfig::new("http://localhost:8080/")).unwrap();

        assert_eq!(client.url("/api/v1/me"), "http://localhost:8080/api/v1/me");
        assert_eq!(client.url("health"), "http://localhost:8080/health");
    }

    #[tokio::test]
    async fn test_request_without_credentials_is_not_authenticated() {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();

        let result = client.get_json::<serde_json::Value>("/api/v1/me").await;

        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }

    fn login(token: &str) -> LoginResponse {
        LoginResponse {
            token: token.to_string(),
            refresh_token: format!("refresh-{}", token),
            username: "octocat".to_string(),
            email: "octocat@github.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        client.sign_in(login("a0"));
        assert_eq!(client.credentials().access_token().as_deref(), Some("a0"));

        client.sign_out();

        assert!(!client.credentials().is_authenticated());
        assert!(matches!(client.delete("/api/v1/users/octocat").await, Err(ClientError::SessionClosed)));
    }

    #[tokio::test]
    async fn test_sign_in_again_after_sign_out() {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        client.sign_in(login("a0"));
        client.sign_out();

        client.sign_in(login("b0"));

        assert_eq!(client.credentials().access_token().as_deref(), Some("b0"));
        // 요청이 실제로 전송되어 연결 단계에서 실패
        let result = client.get_json::<serde_json::Value>("/api/v1/me").await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        client.credentials().store(Credentials {
            access_token: "a0".to_string(),
            refresh_token: "r0".to_string(),
        });

        let result = client.get_json::<serde_json::Value>("/api/v1/me").await;

        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
