use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::{Role, User};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPair;

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub github_id: i64,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let id = user.id_string().unwrap_or_default();
        let User {
            github_id,
            username,
            email,
            display_name,
            avatar_url,
            role,
            last_login_at,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            github_id,
            username,
            email,
            display_name,
            avatar_url,
            role,
            last_login_at,
            created_at,
            updated_at,
        }
    }
}

/// 로그인 응답 DTO
///
/// `GET /auth/github/callback` 성공 시 `{ token, refresh_token, username, email }` 를 반환합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// 액세스 토큰
    pub token: String,
    pub refresh_token: String,
    pub username: String,
    pub email: String,
}

impl LoginResponse {
    pub fn new(user: &User, pair: TokenPair) -> Self {
        Self {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// 현재 세션 상태 응답 (`GET /auth/session`)
///
/// 토큰이 없거나 유효하지 않아도 에러가 아니라 `authenticated: false` 로 응답합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl From<Option<AuthenticatedUser>> for SessionResponse {
    fn from(user: Option<AuthenticatedUser>) -> Self {
        match user {
            Some(user) => Self {
                authenticated: true,
                username: Some(user.username),
                role: Some(user.role),
            },
            None => Self {
                authenticated: false,
                username: None,
                role: None,
            },
        }
    }
}
