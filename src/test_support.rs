//! 테스트 공용 픽스처
//!
//! MongoDB/Redis/GitHub 없이 `AppState` 를 조립합니다.

use std::sync::Arc;
use actix_web::web;
use async_trait::async_trait;
use chrono::Duration;
use crate::config::{GitHubSettings, JwtSettings, OAuthStateSettings};
use crate::core::AppState;
use crate::domain::models::oauth::GitHubProfile;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::InMemoryUserStore;
use crate::services::auth::IdentityProvider;

pub const TEST_SECRET: &str = "test-secret-for-handlers";

/// 코드 `"valid"` 만 받아주고 octocat 프로필을 돌려주는 프로바이더
pub struct StubGitHub;

#[async_trait]
impl IdentityProvider for StubGitHub {
    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        if code == "valid" {
            Ok("gho_stub".to_string())
        } else {
            Err(AppError::ProviderExchangeFailed("bad_verification_code".to_string()))
        }
    }

    async fn fetch_profile(&self, _access_token: &str) -> AppResult<GitHubProfile> {
        Ok(GitHubProfile {
            id: 583231,
            login: "octocat".to_string(),
            email: "octocat@github.com".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: None,
        })
    }
}

pub fn jwt_settings() -> JwtSettings {
    JwtSettings::new(TEST_SECRET, Duration::hours(1), Duration::hours(168))
}

pub fn test_state_with(store: Arc<InMemoryUserStore>) -> web::Data<AppState> {
    web::Data::new(AppState::new(
        &jwt_settings(),
        store,
        Arc::new(StubGitHub),
        GitHubSettings::new("client-id", "client-secret", "http://localhost:8080/auth/github/callback"),
        OAuthStateSettings::new("state-secret", Duration::minutes(10)).allow_missing_state(),
    ))
}

pub fn test_state() -> web::Data<AppState> {
    test_state_with(Arc::new(InMemoryUserStore::new()))
}
