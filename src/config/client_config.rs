//! 토큰 갱신 클라이언트 설정

use std::time::Duration;

/// [`ApiClient`](crate::client::ApiClient) 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 인증 서비스 기본 URL (예: `http://localhost:8080`)
    pub base_url: String,
    /// 리프레시 호출 최대 대기 시간. 초과 시 갱신 실패와 동일하게 처리됩니다.
    pub refresh_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            refresh_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }
}
