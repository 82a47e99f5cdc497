//! # Core Module
//!
//! 서비스 조립과 공유 상태를 담당합니다.
//!
//! - [`state`] - `AppState`: 토큰 서비스, 갱신 로직, GitHub 브리지, 사용자 저장소를 묶은
//!   불변 컨테이너. 전역 싱글톤 없이 `web::Data` 로 핸들러와 미들웨어에 전달됩니다.

pub mod state;

pub use state::AppState;
