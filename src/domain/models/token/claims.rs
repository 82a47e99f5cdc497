//! JWT 클레임 구조체 및 토큰 쌍
//!
//! 액세스 토큰과 리프레시 토큰은 같은 비밀키, 같은 알고리즘(HS256)으로 서명되며
//! 오직 `type` 클레임으로만 구분됩니다. 두 토큰이 서로의 자리에서 받아들여지지 않도록
//! 검증 시 반드시 `type` 을 확인해야 합니다.
//!
//! ## 페이로드 예시
//!
//! ```text
//! access : { "sub": "octocat", "uid": "65f0...", "role": "user",
//!            "type": "access", "jti": "…", "iat": 1700000000, "exp": 1700003600 }
//! refresh: { "sub": "octocat", "type": "refresh", "jti": "…",
//!            "iat": 1700000000, "exp": 1700604800 }
//! ```
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::Role;

/// 토큰 종류 판별자 (`type` 클레임)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    /// `type` 클레임 값 파싱. 알 수 없는 값은 `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "access" => Some(TokenKind::Access),
            "refresh" => Some(TokenKind::Refresh),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 액세스 토큰 클레임
///
/// - `sub`: 사용자 로그인 이름
/// - `uid`: 사용자 ID (ObjectId hex)
/// - `role`: 발급 시점의 역할
/// - `jti`: 발급마다 고유한 토큰 ID
/// - `iat` / `exp`: 발급/만료 시각 (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub uid: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 리프레시 토큰 클레임
///
/// 역할이나 사용자 ID 를 담지 않습니다. 갱신 시 저장소에서 다시 조회하므로
/// 역할 변경은 다음 갱신 때 반영됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인/갱신 시 함께 발급되는 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
}
