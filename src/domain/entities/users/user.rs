//! User Entity Implementation
//!
//! 인증 코어가 다루는 사용자(Identity) 엔티티입니다.
//! 모든 사용자는 GitHub OAuth 로 가입하며, 저장소의 upsert 계약을 통해서만 생성/갱신됩니다.

use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::models::oauth::github_user::GitHubProfile;

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자 엔티티
///
/// `github_id`, `username`, `email` 은 각각 유니크합니다.
/// `username` 은 GitHub 로그인 이름이며 토큰의 `sub` 클레임으로 사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// GitHub 사용자 고유 ID (로그인 이름이 바뀌어도 변하지 않음)
    pub github_id: i64,
    /// 로그인 이름 (unique)
    pub username: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 표시 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// 프로필 이미지 URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// 마지막 로그인 시간
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// GitHub 프로필로 최초 로그인 사용자를 생성합니다. 역할은 항상 `user` 입니다.
    pub fn from_github_profile(profile: &GitHubProfile) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            github_id: profile.id,
            username: profile.login.clone(),
            email: profile.email.clone(),
            display_name: profile.name.clone(),
            avatar_url: profile.avatar_url.clone(),
            role: Role::User,
            last_login_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// 재로그인 시 변경 가능한 필드(이메일, 표시 이름, 아바타)를 갱신합니다.
    pub fn apply_github_profile(&mut self, profile: &GitHubProfile) {
        let now = DateTime::now();

        self.email = profile.email.clone();
        self.display_name = profile.name.clone();
        self.avatar_url = profile.avatar_url.clone();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str, name: Option<&str>) -> GitHubProfile {
        GitHubProfile {
            id: 583231,
            login: "octocat".to_string(),
            email: email.to_string(),
            name: name.map(str::to_string),
            avatar_url: None,
        }
    }

    #[test]
    fn test_new_github_user_is_plain_user() {
        let user = User::from_github_profile(&profile("octocat@github.com", Some("The Octocat")));

        assert_eq!(user.username, "octocat");
        assert_eq!(user.github_id, 583231);
        assert_eq!(user.role, Role::User);
        assert!(user.id.is_none());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_apply_profile_refreshes_mutable_fields_only() {
        let mut user = User::from_github_profile(&profile("old@github.com", Some("Old")));
        user.role = Role::Admin;

        user.apply_github_profile(&profile("new@github.com", None));

        assert_eq!(user.email, "new@github.com");
        assert_eq!(user.display_name, None);
        assert_eq!(user.username, "octocat");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::from_str::<Role>("\"user\"").unwrap(), Role::User);
        assert!(serde_json::from_str::<Role>("\"moderator\"").is_err());
    }
}
