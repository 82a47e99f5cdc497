//! 토큰 갱신 요청/응답 DTO

pub mod request;
pub mod response;

pub use request::RefreshRequest;
pub use response::RefreshResponse;
