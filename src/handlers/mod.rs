//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 비즈니스 로직은 서비스 계층에 두고, 핸들러는 입력 검증과 응답 변환만 담당합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Quiz App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 토큰 발급/검증, OAuth, 갱신            ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 사용자 저장소                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 의존성 주입
//!
//! 핸들러는 `web::Data<AppState>` 추출자로 서비스를 받습니다.
//!
//! ```rust,ignore
//! #[post("/refresh")]
//! pub async fn refresh_tokens(
//!     state: web::Data<AppState>,
//!     payload: web::Json<RefreshRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let pair = state.refresh.refresh(&payload.refresh_token).await?;
//!     Ok(HttpResponse::Ok().json(RefreshResponse::from(pair)))
//! }
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>` 를 반환하며, `?` 로 전파된 에러는
//! `AppError::error_response` 에서 `{ "error", "message" }` JSON 으로 변환됩니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: GitHub 로그인 URL, OAuth 콜백, 토큰 갱신
//! - **`users`**: 현재 사용자 조회, 사용자 조회/삭제 (본인 또는 관리자)

pub mod users;
pub mod auth;
