//! # Domain Layer Module
//!
//! 인증 코어의 도메인 계층입니다. 외부 의존성(HTTP, DB)과 무관한 타입들만 둡니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 영속 객체 (User, Role)
//! ├── DTOs      - HTTP 요청/응답 계약
//! └── Models    - 토큰 클레임, 인증 컨텍스트, GitHub 응답 모델
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB, Cache)
//! ```
//!
//! ## 로그인 플로우에서의 변환
//!
//! ```rust,ignore
//! // 1. GitHub 응답 → 정규화된 프로필
//! let profile = GitHubProfile::from_user(github_user, email);
//!
//! // 2. 프로필 → 저장소 upsert → User 엔티티
//! let user = store.upsert_github_identity(&profile).await?;
//!
//! // 3. User → 토큰 쌍 → 응답 DTO
//! let pair = tokens.issue_token_pair(&user)?;
//! let response = LoginResponse::new(&user, pair);
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
