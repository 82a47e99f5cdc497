//! 인증 요청관련 DTO
//!
//! GitHub OAuth 콜백으로 전달되는 쿼리 파라미터를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// `state` 는 `/auth/github/login` 을 거치지 않은 클라이언트도 지원하기 위해 선택적입니다.
/// 값이 있으면 서명과 만료를 검증합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}
