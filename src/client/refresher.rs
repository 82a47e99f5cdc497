//! 토큰 갱신 호출
//!
//! 코디네이터는 [`TokenRefresher`] 만 알고 있으므로 테스트에서는 가짜 구현을 끼웁니다.

use async_trait::async_trait;
use serde_json::json;
use crate::domain::RefreshResponse;
use super::credentials::Credentials;
use super::errors::{status_error, ClientError};

#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// 리프레시 토큰으로 새 토큰 쌍을 받아옵니다.
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, ClientError>;
}

/// `POST {base_url}/auth/refresh` 를 호출하는 구현
pub struct HttpTokenRefresher {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTokenRefresher {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/auth/refresh", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, ClientError> {
        let response = self.http
            .post(&self.endpoint)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            log::info!("토큰 갱신 거부: {}", err);
            return Err(err);
        }

        let body: RefreshResponse = response.json().await?;
        Ok(Credentials::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let refresher = HttpTokenRefresher::new(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(refresher.endpoint(), "http://localhost:8080/auth/refresh");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let refresher = HttpTokenRefresher::new(reqwest::Client::new(), "http://127.0.0.1:9");

        let result = refresher.refresh("r1").await;

        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
