//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! - `entities`: MongoDB 에 저장되는 객체 (`User`)
//! - `models`: 토큰 클레임, 인증 컨텍스트, 외부 프로바이더 응답 등 값 객체
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── auth/     ← 인증된 사용자, 인증 모드, 권한 가드
//! ├── oauth/    ← GitHub 토큰/사용자/이메일 응답
//! └── token/    ← 액세스/리프레시 클레임, TokenPair
//! ```

pub mod auth;
pub mod oauth;
pub mod token;
