//! # 사용자 리포지토리 구현
//!
//! MongoDB 를 주 저장소로, Redis 를 조회 캐시로 사용하는 [`UserStore`] 구현입니다.
//!
//! ## 캐싱 전략
//!
//! - **TTL**: 10분 (600초)
//! - **키 패턴**: `user:username:{login}`
//! - 쓰기(upsert, 삭제) 직후 해당 키를 지웁니다. 삭제된 사용자의 리프레시 토큰이
//!   캐시 때문에 통과하는 일이 없어야 합니다.
//! - 캐시 장애는 경고만 남기고 MongoDB 조회로 진행합니다.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, DateTime},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::caching::redis::RedisClient;
use crate::db::Database;
use crate::domain::entities::users::{Role, User};
use crate::domain::models::oauth::GitHubProfile;
use crate::errors::{AppError, AppResult};
use super::user_store::UserStore;

const COLLECTION: &str = "users";
const CACHE_TTL_SECONDS: u64 = 600;
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB 사용자 리포지토리
///
/// - **컬렉션명**: `users`
/// - **인덱스**: github_id(unique), username(unique), email(unique)
pub struct MongoUserRepository {
    collection: Collection<User>,
    redis: Option<RedisClient>,
}

impl MongoUserRepository {
    pub fn new(db: &Database, redis: Option<RedisClient>) -> Self {
        Self {
            collection: db.get_database().collection::<User>(COLLECTION),
            redis,
        }
    }

    /// 사용자 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 시작 시 한 번 호출합니다. 이미 중복 데이터가 있으면 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let unique = |keys: mongodb::bson::Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder()
                    .unique(true)
                    .name(name.to_string())
                    .build())
                .build()
        };

        self.collection
            .create_indexes([
                unique(doc! { "github_id": 1 }, "github_id_unique"),
                unique(doc! { "username": 1 }, "username_unique"),
                unique(doc! { "email": 1 }, "email_unique"),
            ])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn username_key(username: &str) -> String {
        format!("user:username:{}", username)
    }

    async fn cached(&self, key: &str) -> Option<User> {
        let redis = self.redis.as_ref()?;
        match redis.get::<User>(key).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("사용자 캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn cache(&self, key: &str, user: &User) {
        if let Some(redis) = &self.redis {
            if let Err(e) = redis.set_with_expiry(key, user, CACHE_TTL_SECONDS).await {
                log::warn!("사용자 캐시 저장 실패 ({}): {}", key, e);
            }
        }
    }

    async fn evict(&self, user: &User) {
        let Some(redis) = &self.redis else { return };

        let keys = [Self::username_key(&user.username)];

        if let Err(e) = redis.del(&keys).await {
            log::warn!("사용자 캐시 무효화 실패 ({}): {}", user.username, e);
        }
    }
}

/// 유니크 인덱스 위반 여부
///
/// `find_one_and_update` 는 Command 에러로, `insert_one` 은 Write 에러로 보고합니다.
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Command(command) => command.code == DUPLICATE_KEY,
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_write_error(error: mongodb::error::Error, profile: &GitHubProfile) -> AppError {
    if is_duplicate_key(&error) {
        log::warn!("사용자 upsert 충돌: login={} github_id={}", profile.login, profile.id);
        AppError::UserStoreConflict(format!(
            "username or email already belongs to another account ({})",
            profile.login
        ))
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn upsert_github_identity(&self, profile: &GitHubProfile) -> AppResult<User> {
        let now = DateTime::now();

        let update = doc! {
            "$set": {
                "email": &profile.email,
                "display_name": profile.name.clone(),
                "avatar_url": profile.avatar_url.clone(),
                "last_login_at": now,
                "updated_at": now,
            },
            "$setOnInsert": {
                "github_id": profile.id,
                "username": &profile.login,
                "role": Role::User.as_str(),
                "created_at": now,
            },
        };

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let user = self.collection
            .find_one_and_update(doc! { "github_id": profile.id }, update)
            .with_options(options)
            .await
            .map_err(|e| map_write_error(e, profile))?
            .ok_or_else(|| AppError::InternalError("upsert returned no document".to_string()))?;

        self.evict(&user).await;

        log::info!("GitHub 사용자 upsert 완료: {}", user.username);
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let cache_key = Self::username_key(username);

        if let Some(cached) = self.cached(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn delete_by_username(&self, username: &str) -> AppResult<bool> {
        let deleted = self.collection
            .find_one_and_delete(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match deleted {
            Some(user) => {
                self.evict(&user).await;
                log::info!("사용자 삭제: {}", username);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
