//! 프로세스 메모리 기반 사용자 저장소
//!
//! MongoDB 구현과 같은 유니크 제약(`github_id`, `username`, `email`)을 지킵니다.
//! 테스트와 로컬 실험에서 사용하며, 조회 횟수를 세어 "저장소를 건드리지 않았다"는
//! 성질을 검증할 수 있습니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::users::{Role, User};
use crate::domain::models::oauth::GitHubProfile;
use crate::errors::{AppError, AppResult};
use super::user_store::UserStore;

#[derive(Default)]
pub struct InMemoryUserStore {
    /// github_id → User
    users: RwLock<HashMap<i64, User>>,
    lookups: AtomicUsize,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `find_by_username` 호출 횟수
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// 역할 변경 (관리자 지정 등). 대상이 없으면 `false`.
    pub fn set_role(&self, username: &str, role: Role) -> bool {
        let mut users = self.write();
        match users.values_mut().find(|u| u.username == username) {
            Some(user) => {
                user.role = role;
                true
            }
            None => false,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<i64, User>> {
        self.users.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<i64, User>> {
        self.users.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn upsert_github_identity(&self, profile: &GitHubProfile) -> AppResult<User> {
        let mut users = self.write();

        // username 은 최초 생성 시에만 기록되므로 신규일 때만 비교
        let is_new = !users.contains_key(&profile.id);
        let clash = users.values().find(|u| {
            u.github_id != profile.id
                && (u.email == profile.email || (is_new && u.username == profile.login))
        });
        if let Some(existing) = clash {
            log::warn!("사용자 upsert 충돌: login={} existing={}", profile.login, existing.username);
            return Err(AppError::UserStoreConflict(format!(
                "username or email already belongs to another account ({})",
                profile.login
            )));
        }

        let user = match users.get_mut(&profile.id) {
            Some(user) => {
                user.apply_github_profile(profile);
                user.clone()
            }
            None => {
                let mut user = User::from_github_profile(profile);
                user.id = Some(ObjectId::new());
                users.insert(profile.id, user.clone());
                user
            }
        };

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.read().values().find(|u| u.username == username).cloned())
    }

    async fn delete_by_username(&self, username: &str) -> AppResult<bool> {
        let mut users = self.write();
        let github_id = users
            .iter()
            .find(|(_, u)| u.username == username)
            .map(|(id, _)| *id);

        Ok(github_id.and_then(|id| users.remove(&id)).is_some())
    }
}
