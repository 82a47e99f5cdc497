//! 사용자 데이터 액세스 계층
//!
//! [`UserStore`](user_store::UserStore) 계약과 두 가지 구현을 제공합니다.
//!
//! - [`MongoUserRepository`](user_repo::MongoUserRepository): MongoDB + Redis 캐시
//! - [`InMemoryUserStore`](memory_store::InMemoryUserStore): 프로세스 메모리 (테스트/로컬)

pub mod user_store;
pub mod user_repo;
pub mod memory_store;

pub use user_store::UserStore;
pub use user_repo::MongoUserRepository;
pub use memory_store::InMemoryUserStore;
