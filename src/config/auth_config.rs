//! # Authentication Configuration Module
//!
//! JWT 토큰, GitHub OAuth, OAuth state 관련 설정을 관리하는 모듈입니다.
//!
//! 각 설정은 두 계층으로 나뉩니다.
//!
//! 1. `JwtConfig`, `GitHubOAuthConfig`, `OAuthConfig` - 환경 변수를 직접 읽는 접근자
//! 2. `JwtSettings`, `GitHubSettings`, `OAuthStateSettings` - 시작 시점에 만들어지는
//!    불변 스냅샷. 서비스들은 이 스냅샷만 주입받으며 전역 상태를 읽지 않습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ACCESS_TTL_HOURS="1"
//! export JWT_REFRESH_TTL_HOURS="168"
//!
//! export GITHUB_CLIENT_ID="your-github-client-id"
//! export GITHUB_CLIENT_SECRET="your-github-client-secret"
//! export GITHUB_REDIRECT_URI="http://localhost:8080/auth/github/callback"
//! ```

use std::env;
use std::fmt;
use chrono::Duration;
use crate::config::Environment;
use crate::errors::errors::AppError;

/// 개발/테스트 환경에서만 사용되는 기본 JWT 비밀키
const DEV_JWT_SECRET: &str = "quiz-auth-dev-secret-do-not-use-in-production";

/// JSON Web Token (JWT) 관련 환경 변수 접근자
///
/// ## 권장 설정값
///
/// - 액세스 토큰 1시간, 리프레시 토큰 168시간(7일)
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 설정되지 않은 경우 `None`을 반환하며, 기본값 적용 여부는
    /// [`JwtSettings::from_env`]가 실행 환경을 보고 결정합니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> Option<String> {
        env::var("JWT_SECRET").ok().filter(|s| !s.trim().is_empty())
    }

    /// 액세스 토큰의 유효 시간 (시간 단위, 기본값 1)
    pub fn access_ttl_hours() -> i64 {
        env::var("JWT_ACCESS_TTL_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(1)
    }

    /// 리프레시 토큰의 유효 시간 (시간 단위, 기본값 168)
    pub fn refresh_ttl_hours() -> i64 {
        env::var("JWT_REFRESH_TTL_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(168)
    }
}

/// 토큰 서명/검증에 필요한 불변 설정 스냅샷
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtSettings {
    /// 명시적인 값으로 설정을 생성합니다.
    pub fn new(secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// 환경 변수에서 설정을 읽어 스냅샷을 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 스테이징/프로덕션에서 `JWT_SECRET`이 없는 경우
    pub fn from_env() -> Result<Self, AppError> {
        let secret = match JwtConfig::secret() {
            Some(secret) => secret,
            None if Environment::current().allows_insecure_defaults() => {
                log::warn!("JWT_SECRET not set, using development default (not secure for production!)");
                DEV_JWT_SECRET.to_string()
            }
            None => {
                return Err(AppError::ConfigError("JWT_SECRET must be set".to_string()));
            }
        };

        Ok(Self::new(
            secret,
            Duration::hours(JwtConfig::access_ttl_hours()),
            Duration::hours(JwtConfig::refresh_ttl_hours()),
        ))
    }

    /// 서명용 비밀키
    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// GitHub OAuth 앱 설정 접근자
///
/// GitHub Developer Settings > OAuth Apps 에서 생성한 앱 정보를 읽습니다.
/// Authorization callback URL 에는 `GITHUB_REDIRECT_URI`와 같은 값을 등록해야 합니다.
pub struct GitHubOAuthConfig;

impl GitHubOAuthConfig {
    pub fn client_id() -> Option<String> {
        env::var("GITHUB_CLIENT_ID").ok()
    }

    /// 절대 로그에 출력하거나 클라이언트에 노출하지 마세요.
    pub fn client_secret() -> Option<String> {
        env::var("GITHUB_CLIENT_SECRET").ok()
    }

    pub fn redirect_uri() -> String {
        env::var("GITHUB_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/auth/github/callback".to_string())
    }

    pub fn authorize_uri() -> String {
        env::var("GITHUB_AUTHORIZE_URI")
            .unwrap_or_else(|_| "https://github.com/login/oauth/authorize".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GITHUB_TOKEN_URI")
            .unwrap_or_else(|_| "https://github.com/login/oauth/access_token".to_string())
    }

    pub fn api_base() -> String {
        env::var("GITHUB_API_BASE")
            .unwrap_or_else(|_| "https://api.github.com".to_string())
    }
}

/// GitHub OAuth 불변 설정 스냅샷
#[derive(Clone)]
pub struct GitHubSettings {
    pub client_id: String,
    client_secret: String,
    pub redirect_uri: String,
    pub authorize_uri: String,
    pub token_uri: String,
    pub api_base: String,
}

impl GitHubSettings {
    /// 환경 변수에서 GitHub OAuth 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 클라이언트 ID/시크릿이 설정되지 않은 경우
    pub fn from_env() -> Result<Self, AppError> {
        let client_id = GitHubOAuthConfig::client_id()
            .ok_or_else(|| AppError::ConfigError("GITHUB_CLIENT_ID must be set".to_string()))?;
        let client_secret = GitHubOAuthConfig::client_secret()
            .ok_or_else(|| AppError::ConfigError("GITHUB_CLIENT_SECRET must be set".to_string()))?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: GitHubOAuthConfig::redirect_uri(),
            authorize_uri: GitHubOAuthConfig::authorize_uri(),
            token_uri: GitHubOAuthConfig::token_uri(),
            api_base: GitHubOAuthConfig::api_base(),
        })
    }

    /// 테스트 및 로컬 실행용 생성자
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            authorize_uri: "https://github.com/login/oauth/authorize".to_string(),
            token_uri: "https://github.com/login/oauth/access_token".to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_uri", &self.authorize_uri)
            .field("token_uri", &self.token_uri)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// OAuth state(CSRF 방지) 설정 접근자
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth State 서명용 비밀키
    pub fn state_secret() -> Option<String> {
        env::var("OAUTH_STATE_SECRET").ok().filter(|secret| !secret.is_empty())
    }

    /// 로그인 URL 발급 후 콜백까지 허용되는 최대 시간 (분, 기본값 10)
    pub fn state_ttl_minutes() -> i64 {
        env::var("OAUTH_STATE_TTL_MINUTES")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(10)
    }
}

/// 개발/테스트 환경 전용 OAuth state 비밀키
const DEV_OAUTH_STATE_SECRET: &str = "dev-oauth-state-secret-do-not-use-in-production";

/// OAuth state 불변 설정 스냅샷
#[derive(Clone)]
pub struct OAuthStateSettings {
    secret: String,
    pub ttl: Duration,
    /// 콜백에 `state` 가 반드시 있어야 하는지 여부
    pub require_state: bool,
}

impl OAuthStateSettings {
    /// 콜백마다 `state` 를 요구하는 설정
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self { secret: secret.into(), ttl, require_state: true }
    }

    /// `state` 없는 콜백도 받아들입니다. 개발/테스트 환경 전용.
    pub fn allow_missing_state(mut self) -> Self {
        self.require_state = false;
        self
    }

    /// 환경 변수에서 설정을 읽어 스냅샷을 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 스테이징/프로덕션에서 `OAUTH_STATE_SECRET`이 없는 경우
    pub fn from_env() -> Result<Self, AppError> {
        Self::resolve(
            OAuthConfig::state_secret(),
            Duration::minutes(OAuthConfig::state_ttl_minutes()),
            &Environment::current(),
        )
    }

    /// 실행 환경에 따라 비밀키 기본값과 `state` 필수 여부를 결정합니다.
    ///
    /// 개발/테스트 환경에서만 기본 비밀키와 `state` 생략을 허용합니다.
    pub fn resolve(secret: Option<String>, ttl: Duration, environment: &Environment) -> Result<Self, AppError> {
        let insecure = environment.allows_insecure_defaults();

        let secret = match secret {
            Some(secret) => secret,
            None if insecure => {
                log::warn!("OAUTH_STATE_SECRET not set, using development default (not secure for production!)");
                DEV_OAUTH_STATE_SECRET.to_string()
            }
            None => {
                return Err(AppError::ConfigError("OAUTH_STATE_SECRET must be set".to_string()));
            }
        };

        let settings = Self::new(secret, ttl);
        Ok(if insecure { settings.allow_missing_state() } else { settings })
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}
