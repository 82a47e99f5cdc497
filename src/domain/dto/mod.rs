//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 데이터 구조를 정의합니다.
//! 요청 DTO 는 `validator` 로 검증하고, 응답 DTO 는 엔티티에서 `From` 으로 변환합니다.
//!
//! ```text
//! dto/
//! ├── tokens/   # 토큰 갱신 요청/응답
//! └── users/    # OAuth 콜백, 로그인 응답, 사용자 정보
//! ```

pub mod tokens;
pub mod users;

pub use tokens::*;
pub use users::*;
