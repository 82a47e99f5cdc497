//! GitHub OAuth / REST API 클라이언트
//!
//! 신원 브리지가 의존하는 외부 협력자를 [`IdentityProvider`] trait 로 분리합니다.
//! 운영에서는 reqwest 기반 [`GitHubClient`], 테스트에서는 가짜 구현을 주입합니다.
//!
//! | 용도 | 엔드포인트 | 메서드 |
//! |------|------------|--------|
//! | **Token Exchange** | `https://github.com/login/oauth/access_token` | POST |
//! | **User** | `https://api.github.com/user` | GET |
//! | **Emails** | `https://api.github.com/user/emails` | GET |

use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use crate::config::GitHubSettings;
use crate::domain::models::oauth::{
    select_primary_email, GitHubEmail, GitHubProfile, GitHubTokenResponse, GitHubUser,
};
use crate::errors::{AppError, AppResult};

const USER_AGENT: &str = "quiz-auth-backend";
const GITHUB_JSON: &str = "application/vnd.github+json";

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 인가 코드를 프로바이더 액세스 토큰으로 교환합니다.
    ///
    /// # Errors
    ///
    /// 코드가 거부되거나 통신에 실패하면 `AppError::ProviderExchangeFailed`.
    async fn exchange_code(&self, code: &str) -> AppResult<String>;

    /// 프로바이더 액세스 토큰으로 사용자 프로필을 조회합니다.
    ///
    /// # Errors
    ///
    /// API 호출 실패 또는 사용할 수 있는 이메일이 없으면 `AppError::ProviderApiFailed`.
    async fn fetch_profile(&self, access_token: &str) -> AppResult<GitHubProfile>;
}

pub struct GitHubClient {
    http: reqwest::Client,
    settings: GitHubSettings,
}

impl GitHubClient {
    pub fn new(settings: GitHubSettings) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http, settings })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, access_token: &str) -> AppResult<T> {
        let url = format!("{}{}", self.settings.api_base.trim_end_matches('/'), path);

        let response = self.http
            .get(&url)
            .bearer_auth(access_token)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| AppError::ProviderApiFailed(format!("GitHub {} 요청 실패: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderApiFailed(format!(
                "GitHub {} 응답 {}: {}", path, status, error_text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ProviderApiFailed(format!("GitHub {} 응답 파싱 실패: {}", path, e)))
    }
}

#[async_trait]
impl IdentityProvider for GitHubClient {
    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let params = [
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret()),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
        ];

        let response = self.http
            .post(&self.settings.token_uri)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ProviderExchangeFailed(format!("GitHub 토큰 요청 실패: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderExchangeFailed(format!(
                "GitHub 토큰 교환 실패 ({}): {}", status, error_text
            )));
        }

        let token = response
            .json::<GitHubTokenResponse>()
            .await
            .map_err(|e| AppError::ProviderExchangeFailed(format!("GitHub 토큰 응답 파싱 실패: {}", e)))?;

        token_from_response(token)
    }

    async fn fetch_profile(&self, access_token: &str) -> AppResult<GitHubProfile> {
        let user: GitHubUser = self.get_json("/user", access_token).await?;

        let email = match user.email.clone().filter(|e| !e.trim().is_empty()) {
            Some(email) => email,
            None => {
                // 비공개 이메일 사용자
                let emails: Vec<GitHubEmail> = self.get_json("/user/emails", access_token).await?;
                select_primary_email(&emails).ok_or_else(|| {
                    AppError::ProviderApiFailed(format!("{} 계정에 확인된 이메일이 없습니다", user.login))
                })?
            }
        };

        Ok(GitHubProfile::from_user(user, email))
    }
}

/// GitHub 은 잘못된 코드에도 200 과 `{ error, error_description }` 을 반환합니다.
fn token_from_response(token: GitHubTokenResponse) -> AppResult<String> {
    if let Some(error) = token.error {
        let description = token.error_description.unwrap_or_default();
        return Err(AppError::ProviderExchangeFailed(format!("{}: {}", error, description)));
    }

    token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::ProviderExchangeFailed("응답에 access_token 이 없습니다".to_string()))
}
