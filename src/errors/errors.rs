//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 모든 에러는 `{ "error": <코드>, "message": <설명> }` 형태의 JSON 으로 응답되며,
//! 클라이언트는 `error` 코드만 보고 다음 행동을 결정할 수 있습니다.
//!
//! | 코드 | 상태 | 클라이언트 대응 |
//! |------|------|-----------------|
//! | `token_expired` | 401 | 리프레시 후 재시도 (액세스 토큰) / 재로그인 (리프레시 토큰) |
//! | `token_malformed` | 401 | 재로그인 |
//! | `token_bad_signature` | 401 | 재로그인 |
//! | `token_wrong_kind` | 401 | 재로그인 |
//! | `subject_not_found` | 401 | 재로그인 |
//! | `provider_exchange_failed` | 502 | 로그인 실패 안내 |
//! | `provider_api_failed` | 502 | 로그인 실패 안내 |
//! | `user_store_conflict` | 409 | 로그인 실패 안내 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! let user = store.find_by_username(&claims.sub).await?
//!     .ok_or_else(|| AppError::SubjectNotFound(claims.sub.clone()))?;
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;
use crate::domain::models::token::claims::TokenKind;

/// 토큰 검증 실패 사유
///
/// 호출자가 "리프레시 후 재시도"와 "재로그인"을 구분할 수 있도록
/// 실패 원인별로 분리되어 있습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// 만료 시각이 지남
    #[error("token has expired")]
    Expired,

    /// JWT 형식이 아니거나 필수 클레임이 없음
    #[error("token is malformed")]
    Malformed,

    /// 서명 불일치 (다른 비밀키, 변조된 페이로드, 허용되지 않은 알고리즘)
    #[error("token signature is invalid")]
    BadSignature,

    /// 액세스 토큰 자리에 리프레시 토큰이 온 경우 또는 그 반대
    #[error("expected {expected} token but got {found} token")]
    WrongKind { expected: TokenKind, found: TokenKind },
}

impl TokenError {
    /// 응답 본문의 `error` 코드
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "token_expired",
            TokenError::Malformed => "token_malformed",
            TokenError::BadSignature => "token_bad_signature",
            TokenError::WrongKind { .. } => "token_wrong_kind",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 토큰 검증 실패 (401 Unauthorized)
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// 유효한 리프레시 토큰이지만 주체가 더 이상 존재하지 않음 (401 Unauthorized)
    #[error("Subject no longer exists: {0}")]
    SubjectNotFound(String),

    /// OAuth 인가 코드 교환 실패 (502 Bad Gateway)
    #[error("Identity provider code exchange failed: {0}")]
    ProviderExchangeFailed(String),

    /// OAuth 프로바이더 API 호출 실패 (502 Bad Gateway)
    #[error("Identity provider API failed: {0}")]
    ProviderApiFailed(String),

    /// 사용자 저장소 유니크 필드 충돌 (409 Conflict)
    #[error("User store conflict: {0}")]
    UserStoreConflict(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 설정 누락/오류 (시작 시점에만 발생)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Token(e) => e.code(),
            AppError::SubjectNotFound(_) => "subject_not_found",
            AppError::ProviderExchangeFailed(_) => "provider_exchange_failed",
            AppError::ProviderApiFailed(_) => "provider_api_failed",
            AppError::UserStoreConflict(_) => "user_store_conflict",
            AppError::DatabaseError(_) => "database_error",
            AppError::RedisError(_) => "cache_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::AuthenticationError(_) => "authentication_required",
            AppError::AuthorizationError(_) => "insufficient_permissions",
            AppError::ConfigError(_) => "configuration_error",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Token(_) | AppError::SubjectNotFound(_) | AppError::AuthenticationError(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ProviderExchangeFailed(_) | AppError::ProviderApiFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::UserStoreConflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    ///
    /// 5xx 응답에는 내부 정보를 노출하지 않습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            log::error!("{}", self);
            "서버 내부 오류가 발생했습니다".to_string()
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.code(),
                "message": message,
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
