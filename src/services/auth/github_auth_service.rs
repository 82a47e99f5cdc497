//! # GitHub OAuth 인증 서비스 (신원 브리지)
//!
//! GitHub 인가 코드를 로컬 사용자 레코드로 바꿉니다.
//!
//! ```text
//! 클라이언트            우리 서버                         GitHub
//!    │ GET /auth/github/login │                               │
//!    ├───────────────────────►│ state 생성, authorize URL 조립 │
//!    │◄───────────────────────┤                               │
//!    │ 사용자 인증 ────────────────────────────────────────────►│
//!    │◄──────────────────────────────────────── code, state ───┤
//!    │ GET /auth/github/callback?code&state                   │
//!    ├───────────────────────►│ state 검증                     │
//!    │                        │ code → access_token ──────────►│
//!    │                        │ /user, /user/emails ──────────►│
//!    │                        │ UserStore upsert               │
//!    │◄──── token, refresh ───┤                               │
//! ```
//!
//! ## State 매개변수
//!
//! `"{timestamp}.{nonce}.{hex(sha256(secret:timestamp:nonce))}"` 형식입니다.
//! 서버에 저장하지 않고 서명과 유효 시간(기본 10분)만으로 검증합니다.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::config::{GitHubSettings, OAuthStateSettings};
use crate::domain::dto::users::response::OAuthLoginUrlResponse;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use super::github_client::IdentityProvider;

const SCOPE: &str = "read:user user:email";

pub struct GitHubAuthService {
    provider: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserStore>,
    github: GitHubSettings,
    state: OAuthStateSettings,
}

impl GitHubAuthService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserStore>,
        github: GitHubSettings,
        state: OAuthStateSettings,
    ) -> Self {
        Self { provider, users, github, state }
    }

    /// GitHub 로그인 URL 생성
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let response = github_auth.login_url();
    /// // https://github.com/login/oauth/authorize?client_id=...&state=...
    /// ```
    pub fn login_url(&self) -> OAuthLoginUrlResponse {
        self.login_url_at(Utc::now())
    }

    pub fn login_url_at(&self, now: DateTime<Utc>) -> OAuthLoginUrlResponse {
        let state = self.generate_oauth_state(now);

        let params = [
            ("client_id", self.github.client_id.as_str()),
            ("redirect_uri", self.github.redirect_uri.as_str()),
            ("scope", SCOPE),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let login_url = format!("{}?{}", self.github.authorize_uri, query_string);

        OAuthLoginUrlResponse { login_url, state }
    }

    /// OAuth 콜백 처리: state 검증 후 코드를 사용자로 교환합니다.
    ///
    /// `state` 생략은 `allow_missing_state` 설정(개발/테스트 환경)에서만 허용됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - state 누락/위조/만료
    /// * 그 외는 [`exchange_code_for_identity`](Self::exchange_code_for_identity) 참고
    pub async fn complete_login(&self, code: &str, state: Option<&str>) -> AppResult<User> {
        match state {
            Some(state) => self.verify_oauth_state(state, Utc::now())?,
            None if self.state.require_state => {
                log::warn!("OAuth 콜백에 state 누락");
                return Err(AppError::AuthenticationError("OAuth state 가 필요합니다".to_string()));
            }
            None => {}
        }

        self.exchange_code_for_identity(code).await
    }

    /// 인가 코드를 로컬 사용자 레코드로 교환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderExchangeFailed` - 코드 교환 실패
    /// * `AppError::ProviderApiFailed` - 프로필 조회 실패
    /// * `AppError::UserStoreConflict` - 다른 계정과 유니크 필드 충돌
    pub async fn exchange_code_for_identity(&self, code: &str) -> AppResult<User> {
        let access_token = self.provider.exchange_code(code).await?;
        let profile = self.provider.fetch_profile(&access_token).await?;

        log::info!("GitHub 프로필 조회 완료: {} ({})", profile.login, profile.id);

        self.users.upsert_github_identity(&profile).await
    }

    fn generate_oauth_state(&self, now: DateTime<Utc>) -> String {
        let timestamp = now.timestamp();
        let nonce = Uuid::new_v4().simple().to_string();
        let signature = self.sign_state(timestamp, &nonce);

        format!("{}.{}.{}", timestamp, nonce, signature)
    }

    fn verify_oauth_state(&self, state: &str, now: DateTime<Utc>) -> AppResult<()> {
        let invalid = || AppError::AuthenticationError("유효하지 않은 OAuth state".to_string());

        let mut parts = state.splitn(3, '.');
        let (Some(timestamp), Some(nonce), Some(signature)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let timestamp: i64 = timestamp.parse().map_err(|_| invalid())?;

        if !constant_time_eq(self.sign_state(timestamp, nonce).as_bytes(), signature.as_bytes()) {
            log::warn!("OAuth state 서명 불일치");
            return Err(invalid());
        }

        let age = now.timestamp() - timestamp;
        if age < 0 || age > self.state.ttl.num_seconds() {
            log::warn!("OAuth state 만료: age={}s", age);
            return Err(AppError::AuthenticationError("OAuth state 가 만료되었습니다".to_string()));
        }

        Ok(())
    }

    fn sign_state(&self, timestamp: i64, nonce: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}:{}:{}", self.state.secret(), timestamp, nonce));
        hex::encode(hasher.finalize())
    }
}

/// 첫 불일치 위치와 무관한 시간으로 비교
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use chrono::Duration;
    use crate::domain::entities::users::Role;
    use crate::domain::models::oauth::GitHubProfile;
    use crate::repositories::users::InMemoryUserStore;

    /// 미리 정한 프로필을 돌려주는 가짜 프로바이더
    struct FakeGitHub {
        profile: GitHubProfile,
        reject_code: bool,
        api_down: bool,
        exchanges: AtomicUsize,
    }

    impl FakeGitHub {
        fn with_profile(id: i64, login: &str, email: &str) -> Self {
            Self {
                profile: GitHubProfile {
                    id,
                    login: login.to_string(),
                    email: email.to_string(),
                    name: Some("The Octocat".to_string()),
                    avatar_url: Some("https://avatars.githubusercontent.com/u/583231".to_string()),
                },
                reject_code: false,
                api_down: false,
                exchanges: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeGitHub {
        async fn exchange_code(&self, code: &str) -> AppResult<String> {
            self.exchanges.fetch_add(1, Ordering::SeqCst);
            if self.reject_code {
                return Err(AppError::ProviderExchangeFailed(format!("bad_verification_code: {}", code)));
            }
            Ok(format!("gho_{}", code))
        }

        async fn fetch_profile(&self, access_token: &str) -> AppResult<GitHubProfile> {
            assert!(access_token.starts_with("gho_"));
            if self.api_down {
                return Err(AppError::ProviderApiFailed("GitHub /user 응답 503".to_string()));
            }
            Ok(self.profile.clone())
        }
    }

    fn service_with(provider: FakeGitHub, store: Arc<InMemoryUserStore>) -> GitHubAuthService {
        GitHubAuthService::new(
            Arc::new(provider),
            store,
            GitHubSettings::new("client-id", "client-secret", "http://localhost:8080/auth/github/callback"),
            OAuthStateSettings::new("state-secret", Duration::minutes(10)).allow_missing_state(),
        )
    }

    fn service() -> GitHubAuthService {
        service_with(
            FakeGitHub::with_profile(583231, "octocat", "octocat@github.com"),
            Arc::new(InMemoryUserStore::new()),
        )
    }

    #[tokio::test]
    async fn test_first_login_creates_identity() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(FakeGitHub::with_profile(583231, "octocat", "octocat@github.com"), store.clone());

        let user = service.exchange_code_for_identity("code-1").await.unwrap();

        assert_eq!(user.username, "octocat");
        assert_eq!(user.role, Role::User);
        assert!(store.find_by_username("octocat").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_repeat_login_keeps_identity_and_role() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(FakeGitHub::with_profile(583231, "octocat", "octocat@github.com"), store.clone());

        let first = service.exchange_code_for_identity("code-1").await.unwrap();
        store.set_role("octocat", Role::Admin);
        let second = service.exchange_code_for_identity("code-2").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_rejected_code_is_exchange_failure_and_store_untouched() {
        let store = Arc::new(InMemoryUserStore::new());
        let mut provider = FakeGitHub::with_profile(583231, "octocat", "octocat@github.com");
        provider.reject_code = true;
        let service = service_with(provider, store.clone());

        let result = service.exchange_code_for_identity("expired").await;

        assert!(matches!(result, Err(AppError::ProviderExchangeFailed(_))));
        assert!(store.find_by_username("octocat").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile_failure_is_api_failure() {
        let mut provider = FakeGitHub::with_profile(583231, "octocat", "octocat@github.com");
        provider.api_down = true;
        let service = service_with(provider, Arc::new(InMemoryUserStore::new()));

        let result = service.exchange_code_for_identity("code").await;

        assert!(matches!(result, Err(AppError::ProviderApiFailed(_))));
    }

    #[tokio::test]
    async fn test_email_owned_by_other_account_conflicts() {
        let store = Arc::new(InMemoryUserStore::new());
        service_with(FakeGitHub::with_profile(1, "hubot", "shared@github.com"), store.clone())
            .exchange_code_for_identity("a")
            .await
            .unwrap();

        let result = service_with(FakeGitHub::with_profile(2, "octocat", "shared@github.com"), store)
            .exchange_code_for_identity("b")
            .await;

        assert!(matches!(result, Err(AppError::UserStoreConflict(_))));
    }

    #[test]
    fn test_login_url_contains_client_and_state() {
        let response = service().login_url();

        assert!(response.login_url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(response.login_url.contains("client_id=client-id"));
        assert!(response.login_url.contains("scope=read%3Auser%20user%3Aemail"));
        assert!(response.login_url.contains(&format!("state={}", urlencoding::encode(&response.state))));
    }

    #[test]
    fn test_state_roundtrip_and_expiry() {
        let service = service();
        let now = Utc::now();
        let state = service.login_url_at(now).state;

        assert!(service.verify_oauth_state(&state, now + Duration::minutes(9)).is_ok());
        assert!(service.verify_oauth_state(&state, now + Duration::minutes(11)).is_err());
        assert!(service.verify_oauth_state(&state, now - Duration::minutes(1)).is_err());
    }

    #[test]
    fn test_forged_state_is_rejected() {
        let service = service();
        let now = Utc::now();
        let state = service.login_url_at(now).state;
        let forged = state.replacen(&now.timestamp().to_string(), &(now.timestamp() + 1000).to_string(), 1);

        assert!(service.verify_oauth_state(&forged, now).is_err());
        assert!(service.verify_oauth_state("not-a-state", now).is_err());
        assert!(service.verify_oauth_state("", now).is_err());
    }

    #[test]
    fn test_signature_comparison() {
        assert!(constant_time_eq(b"abc123", b"abc123"));
        assert!(!constant_time_eq(b"abc123", b"abc124"));
        assert!(!constant_time_eq(b"abc123", b"abc12"));
        assert!(!constant_time_eq(b"", b"a"));
    }

    #[tokio::test]
    async fn test_missing_state_is_rejected_when_required() {
        let provider = Arc::new(FakeGitHub::with_profile(583231, "octocat", "octocat@github.com"));
        let service = GitHubAuthService::new(
            provider.clone(),
            Arc::new(InMemoryUserStore::new()),
            GitHubSettings::new("client-id", "client-secret", "http://localhost:8080/auth/github/callback"),
            OAuthStateSettings::new("state-secret", Duration::minutes(10)),
        );

        let result = service.complete_login("code", None).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 0);

        let state = service.login_url().state;
        assert!(service.complete_login("code", Some(&state)).await.is_ok());
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bad_state_stops_before_code_exchange() {
        let provider = Arc::new(FakeGitHub::with_profile(583231, "octocat", "octocat@github.com"));
        let service = GitHubAuthService::new(
            provider.clone(),
            Arc::new(InMemoryUserStore::new()),
            GitHubSettings::new("client-id", "client-secret", "http://localhost:8080/auth/github/callback"),
            OAuthStateSettings::new("state-secret", Duration::minutes(10)).allow_missing_state(),
        );

        let result = service.complete_login("code", Some("1.2.3")).await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 0);

        assert!(service.complete_login("code", None).await.is_ok());
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 1);
    }
}
