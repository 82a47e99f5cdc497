//! 토큰 갱신 로직
//!
//! `POST /auth/refresh` 의 핵심입니다. 리프레시 토큰을 먼저 검증하고(I/O 없음),
//! 주체를 저장소에서 다시 읽어 최신 역할로 새 토큰 쌍을 발급합니다.
//!
//! 리프레시 토큰은 서버에 기록되지 않으므로 만료 전까지 여러 번 사용할 수 있습니다.
//! 로그아웃/탈취 대응이 필요하면 `jti` 기반 폐기 목록을 추가해야 합니다.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use super::token_service::TokenService;

pub struct RefreshService {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserStore>,
}

impl RefreshService {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// 리프레시 토큰으로 새 토큰 쌍 발급
    ///
    /// # Errors
    ///
    /// * `AppError::Token` - 만료/형식 오류/서명 불일치/종류 불일치
    /// * `AppError::SubjectNotFound` - 토큰은 유효하지만 사용자가 삭제됨
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        self.refresh_at(refresh_token, Utc::now()).await
    }

    pub async fn refresh_at(&self, refresh_token: &str, now: DateTime<Utc>) -> AppResult<TokenPair> {
        let claims = self.tokens
            .validate_refresh_token_at(refresh_token, now)
            .inspect_err(|e| log::info!("리프레시 토큰 거부: {}", e.code()))?;

        let user = self.users
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                log::info!("리프레시 주체 없음: {}", claims.sub);
                AppError::SubjectNotFound(claims.sub.clone())
            })?;

        let pair = self.tokens.issue_token_pair_at(&user, now)?;
        log::debug!("토큰 갱신: {}", user.username);

        Ok(pair)
    }
}
