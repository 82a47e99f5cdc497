//! JWT 토큰 발급/검증 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰을 HS256 으로 서명하고 검증합니다.
//! 서버에는 토큰의 어떤 표현도 저장되지 않으며, 서명 비밀키를 교체하면
//! 이미 발급된 모든 토큰이 무효화됩니다.
//!
//! # 검증 순서
//!
//! 1. 서명 (변조, 다른 비밀키, 허용되지 않은 알고리즘 → `BadSignature`)
//! 2. 만료 (`now >= exp` → `Expired`, 유예 시간 없음)
//! 3. 종류 판별자 `type` (불일치 → `WrongKind`)
//! 4. 클레임 형태 (필드 누락/타입 불일치 → `Malformed`)
//!
//! `*_at` 변형은 현재 시각을 인자로 받아 검증을 (토큰, 시각, 비밀키)의 순수 함수로 만듭니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use crate::config::JwtSettings;
use crate::domain::entities::users::User;
use crate::domain::models::token::{AccessClaims, RefreshClaims, TokenKind, TokenPair};
use crate::errors::{AppError, AppResult, TokenError};

/// JWT 토큰 관리 서비스
///
/// 생성 후 변경되지 않으므로 `Arc` 로 공유해 여러 워커에서 동시에 사용할 수 있습니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret()),
            decoding_key: DecodingKey::from_secret(settings.secret()),
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
        }
    }

    /// 액세스 토큰 유효 기간 (초)
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 사용자 ID 없음 또는 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let access_token = token_service.issue_access_token(&user)?;
    /// ```
    pub fn issue_access_token(&self, user: &User) -> AppResult<String> {
        self.issue_access_token_at(user, Utc::now())
    }

    pub fn issue_access_token_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<String> {
        let uid = user.id_string().ok_or_else(|| {
            AppError::InternalError("사용자 ID가 없습니다".to_string())
        })?;

        let claims = AccessClaims {
            sub: user.username.clone(),
            uid,
            role: user.role,
            kind: TokenKind::Access,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        self.sign(&claims)
    }

    /// 로그인 이름으로 리프레시 토큰 생성
    ///
    /// 리프레시 토큰에는 역할과 사용자 ID 가 들어가지 않습니다.
    pub fn issue_refresh_token(&self, username: &str) -> AppResult<String> {
        self.issue_refresh_token_at(username, Utc::now())
    }

    pub fn issue_refresh_token_at(&self, username: &str, now: DateTime<Utc>) -> AppResult<String> {
        let claims = RefreshClaims {
            sub: username.to_string(),
            kind: TokenKind::Refresh,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        self.sign(&claims)
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// ```rust,ignore
    /// let pair = token_service.issue_token_pair(&user)?;
    /// println!("Expires in: {} seconds", pair.expires_in);
    /// ```
    pub fn issue_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        self.issue_token_pair_at(user, Utc::now())
    }

    pub fn issue_token_pair_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token_at(user, now)?,
            refresh_token: self.issue_refresh_token_at(&user.username, now)?,
            expires_in: self.access_ttl_seconds(),
        })
    }

    /// 액세스 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// 실패 원인별 [`TokenError`]. 리프레시 토큰이 오면 `WrongKind`.
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.validate_access_token_at(token, Utc::now())
    }

    pub fn validate_access_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        self.validate(token, TokenKind::Access, now)
    }

    /// 리프레시 토큰 검증 및 클레임 추출
    ///
    /// 저장소 조회 없이 토큰만으로 판단합니다.
    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.validate_refresh_token_at(token, Utc::now())
    }

    pub fn validate_refresh_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<RefreshClaims, TokenError> {
        self.validate(token, TokenKind::Refresh, now)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식 또는 빈 토큰
    pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))?;

        if token.is_empty() {
            return Err(AppError::AuthenticationError("토큰이 비어 있습니다".to_string()));
        }

        Ok(token)
    }

    fn sign<C: Serialize>(&self, claims: &C) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    fn validate<C: DeserializeOwned>(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<C, TokenError> {
        // 만료는 아래에서 직접 판단 (jsonwebtoken 은 기본 leeway 60초)
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let payload = decode::<serde_json::Value>(token, &self.decoding_key, &validation)?.claims;

        let exp = payload
            .get("exp")
            .and_then(serde_json::Value::as_i64)
            .ok_or(TokenError::Malformed)?;
        if now.timestamp() >= exp {
            return Err(TokenError::Expired);
        }

        let found = payload
            .get("type")
            .and_then(serde_json::Value::as_str)
            .and_then(TokenKind::parse)
            .ok_or(TokenError::Malformed)?;
        if found != expected {
            return Err(TokenError::WrongKind { expected, found });
        }

        serde_json::from_value(payload).map_err(|_| TokenError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::Role;
    use mongodb::bson::oid::ObjectId;

    fn settings(secret: &str) -> JwtSettings {
        JwtSettings::new(secret.to_string(), Duration::hours(1), Duration::hours(168))
    }

    fn service() -> TokenService {
        TokenService::new(&settings("test-secret-which-is-long-enough"))
    }

    fn user() -> User {
        User {
            id: Some(ObjectId::new()),
            github_id: 583231,
            username: "octocat".to_string(),
            email: "octocat@github.com".to_string(),
            display_name: None,
            avatar_url: None,
            role: Role::Admin,
            last_login_at: None,
            created_at: mongodb::bson::DateTime::now(),
            updated_at: mongodb::bson::DateTime::now(),
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let user = user();

        let token = service.issue_access_token(&user).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, "octocat");
        assert_eq!(claims.uid, user.id_string().unwrap());
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let service = service();
        let token = service.issue_refresh_token("octocat").unwrap();

        let claims = service.validate_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, "octocat");
        assert_eq!(claims.kind, TokenKind::Refresh);
        assert_eq!(claims.exp - claims.iat, 168 * 3600);
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let service = service();
        let token = service.issue_refresh_token("octocat").unwrap();

        assert_eq!(
            service.validate_access_token(&token),
            Err(TokenError::WrongKind { expected: TokenKind::Access, found: TokenKind::Refresh })
        );
    }

    #[test]
    fn test_access_token_rejected_as_refresh_token() {
        let service = service();
        let token = service.issue_access_token(&user()).unwrap();

        assert_eq!(
            service.validate_refresh_token(&token),
            Err(TokenError::WrongKind { expected: TokenKind::Refresh, found: TokenKind::Access })
        );
    }

    #[test]
    fn test_expiry_boundary_has_no_leeway() {
        let service = service();
        let issued = Utc::now();
        let token = service.issue_access_token_at(&user(), issued).unwrap();
        let exp = issued + Duration::hours(1);

        assert!(service.validate_access_token_at(&token, exp - Duration::seconds(1)).is_ok());
        assert_eq!(service.validate_access_token_at(&token, exp), Err(TokenError::Expired));
        assert_eq!(
            service.validate_access_token_at(&token, exp + Duration::seconds(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_expiry_is_checked_before_kind() {
        let service = service();
        let issued = Utc::now() - Duration::hours(200);
        let token = service.issue_refresh_token_at("octocat", issued).unwrap();

        assert_eq!(service.validate_access_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_other_secret_is_bad_signature() {
        let token = service().issue_access_token(&user()).unwrap();
        let other = TokenService::new(&settings("a-completely-different-secret"));

        assert_eq!(other.validate_access_token(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_spliced_signature_is_bad_signature() {
        let service = service();
        let access = service.issue_access_token(&user()).unwrap();
        let refresh = service.issue_refresh_token("octocat").unwrap();

        let access_parts: Vec<&str> = access.split('.').collect();
        let refresh_parts: Vec<&str> = refresh.split('.').collect();
        let forged = format!("{}.{}.{}", access_parts[0], access_parts[1], refresh_parts[2]);

        assert_eq!(service.validate_access_token(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let secret = "test-secret-which-is-long-enough";
        let claims = serde_json::json!({
            "sub": "octocat", "type": "refresh", "jti": "x",
            "iat": Utc::now().timestamp(), "exp": Utc::now().timestamp() + 60,
        });
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(service().validate_refresh_token(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = service();

        assert_eq!(service.validate_access_token("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(service.validate_access_token(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_signed_payload_with_bad_shape_is_malformed() {
        let service = service();
        let exp = Utc::now().timestamp() + 60;
        let sign = |value: serde_json::Value| service.sign(&value).unwrap();

        let missing_type = sign(serde_json::json!({ "sub": "octocat", "exp": exp }));
        let unknown_type = sign(serde_json::json!({ "sub": "octocat", "type": "id", "exp": exp }));
        let missing_uid = sign(serde_json::json!({
            "sub": "octocat", "type": "access", "role": "user", "jti": "x", "iat": 0, "exp": exp,
        }));
        let missing_exp = sign(serde_json::json!({ "sub": "octocat", "type": "access" }));

        assert_eq!(service.validate_access_token(&missing_type), Err(TokenError::Malformed));
        assert_eq!(service.validate_access_token(&unknown_type), Err(TokenError::Malformed));
        assert_eq!(service.validate_access_token(&missing_uid), Err(TokenError::Malformed));
        assert_eq!(service.validate_access_token(&missing_exp), Err(TokenError::Malformed));
    }

    #[test]
    fn test_tokens_issued_in_same_second_differ() {
        let service = service();
        let now = Utc::now();

        let first = service.issue_refresh_token_at("octocat", now).unwrap();
        let second = service.issue_refresh_token_at("octocat", now).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_refresh_claims_carry_no_identity_or_role() {
        let service = service();
        let token = service.issue_refresh_token("octocat").unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let payload = decode::<serde_json::Value>(&token, &service.decoding_key, &validation)
            .unwrap()
            .claims;

        assert!(payload.get("uid").is_none());
        assert!(payload.get("role").is_none());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_user_without_id_cannot_get_access_token() {
        let mut user = user();
        user.id = None;

        assert!(matches!(service().issue_access_token(&user), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_token_pair() {
        let service = service();
        let pair = service.issue_token_pair(&user()).unwrap();

        assert_eq!(pair.expires_in, 3600);
        assert!(service.validate_access_token(&pair.access_token).is_ok());
        assert!(service.validate_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(TokenService::extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(TokenService::extract_bearer_token("Bearer ").is_err());
        assert!(TokenService::extract_bearer_token("abc.def.ghi").is_err());
    }
}
