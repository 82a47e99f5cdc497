//! GitHub OAuth 응답 모델
//!
//! GitHub 토큰 엔드포인트와 REST API(`/user`, `/user/emails`) 응답을 매핑합니다.

use serde::{Deserialize, Serialize};

/// `POST https://github.com/login/oauth/access_token` 응답
///
/// GitHub 은 잘못된 코드에도 200 을 반환하고 본문에 `error` 를 담으므로
/// 두 경우 모두 역직렬화할 수 있게 필드를 선택적으로 둡니다.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubTokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `GET /user` 응답 중 사용하는 필드
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// `GET /user/emails` 응답 항목
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    pub primary: bool,
    pub verified: bool,
}

/// 사용자 저장소로 전달되는 정규화된 GitHub 신원
///
/// 이메일이 비공개인 사용자는 `/user/emails` 의 primary+verified 주소로 채워집니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitHubProfile {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl GitHubProfile {
    pub fn from_user(user: GitHubUser, email: String) -> Self {
        Self {
            id: user.id,
            login: user.login,
            email,
            name: user.name.filter(|n| !n.trim().is_empty()),
            avatar_url: user.avatar_url,
        }
    }
}

/// `/user/emails` 목록에서 로그인에 사용할 주소를 고릅니다.
///
/// primary 이면서 verified 인 주소를 우선하고, 없으면 verified 인 첫 주소를 사용합니다.
pub fn select_primary_email(emails: &[GitHubEmail]) -> Option<String> {
    emails
        .iter()
        .find(|e| e.primary && e.verified)
        .or_else(|| emails.iter().find(|e| e.verified))
        .map(|e| e.email.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(address: &str, primary: bool, verified: bool) -> GitHubEmail {
        GitHubEmail { email: address.to_string(), primary, verified }
    }

    #[test]
    fn test_select_primary_verified_email() {
        let emails = vec![
            email("noreply@users.github.com", false, true),
            email("octocat@github.com", true, true),
        ];
        assert_eq!(select_primary_email(&emails).as_deref(), Some("octocat@github.com"));
    }

    #[test]
    fn test_unverified_primary_is_skipped() {
        let emails = vec![
            email("primary@github.com", true, false),
            email("backup@github.com", false, true),
        ];
        assert_eq!(select_primary_email(&emails).as_deref(), Some("backup@github.com"));
        assert_eq!(select_primary_email(&[email("x@y.z", true, false)]), None);
    }

    #[test]
    fn test_token_error_body_deserializes() {
        let body = r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#;
        let parsed: GitHubTokenResponse = serde_json::from_str(body).unwrap();

        assert!(parsed.access_token.is_none());
        assert_eq!(parsed.error.as_deref(), Some("bad_verification_code"));
    }

    #[test]
    fn test_blank_name_is_dropped() {
        let user = GitHubUser {
            id: 1,
            login: "octocat".to_string(),
            name: Some("  ".to_string()),
            email: None,
            avatar_url: None,
        };
        let profile = GitHubProfile::from_user(user, "octocat@github.com".to_string());
        assert_eq!(profile.name, None);
    }
}
