use serde::Deserialize;
use validator::Validate;

/// 토큰 갱신 요청 DTO
///
/// `POST /auth/refresh` 본문: `{ "refresh_token": "..." }`
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_refresh_token_is_rejected() {
        let request = RefreshRequest { refresh_token: String::new() };
        assert!(request.validate().is_err());

        let request = RefreshRequest { refresh_token: "a.b.c".to_string() };
        assert!(request.validate().is_ok());
    }
}
