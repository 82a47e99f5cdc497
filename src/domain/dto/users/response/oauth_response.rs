//! OAuth 응답 DTO 모듈

use serde::{Deserialize, Serialize};

/// OAuth 로그인 URL 응답
///
/// GitHub 인증 페이지로의 리다이렉트 URL과 CSRF 방지용 state 값을 포함합니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct OAuthLoginUrlResponse {
    /// GitHub OAuth 인증 페이지 URL
    pub login_url: String,

    /// CSRF 방지용 state 파라미터
    ///
    /// 콜백에서 같은 값이 돌아오며 서버가 서명과 만료를 확인합니다.
    pub state: String,
}
