//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! MongoDB를 주 저장소로 사용하고 Redis를 통한 캐싱을 지원합니다.
//! 서비스 계층은 `Arc<dyn UserStore>` 로 주입받습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{MongoUserRepository, UserStore};
//!
//! let repo = MongoUserRepository::new(&database, redis);
//! repo.create_indexes().await?;
//! let user = repo.find_by_username("octocat").await?;
//! ```

pub mod users;
