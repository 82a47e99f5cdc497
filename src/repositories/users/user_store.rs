//! 사용자 저장소 계약
//!
//! 신원 브리지와 리프레시 로직은 구체 저장소가 아닌 이 trait 에만 의존합니다.
//! 운영 환경은 [`MongoUserRepository`](super::user_repo::MongoUserRepository),
//! 테스트는 [`InMemoryUserStore`](super::memory_store::InMemoryUserStore) 를 사용합니다.

use async_trait::async_trait;
use crate::domain::entities::users::User;
use crate::domain::models::oauth::GitHubProfile;
use crate::errors::AppResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// GitHub 신원으로 사용자를 생성하거나 갱신합니다.
    ///
    /// `github_id` 로 매칭합니다. 최초 로그인이면 역할 `user` 로 생성하고,
    /// 이후에는 이메일, 표시 이름, 아바타, 마지막 로그인 시간만 갱신합니다.
    ///
    /// # Errors
    ///
    /// 다른 사용자와 `username`/`email` 이 겹치면 `AppError::UserStoreConflict`.
    async fn upsert_github_identity(&self, profile: &GitHubProfile) -> AppResult<User>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// 삭제되었으면 `true`, 대상이 없었으면 `false`.
    async fn delete_by_username(&self, username: &str) -> AppResult<bool>;
}
