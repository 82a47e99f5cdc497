//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 사용자 조회 캐시를 제공합니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
