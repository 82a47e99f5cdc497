use serde::{Deserialize, Serialize};
use crate::domain::models::token::TokenPair;

/// 토큰 갱신 응답 DTO
///
/// 액세스 토큰은 `token` 필드로 전달됩니다 (로그인 응답과 동일한 이름).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for RefreshResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
