use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::Role;
use crate::domain::models::token::AccessClaims;
use crate::errors::AppError;

/// 액세스 토큰에서 추출된 사용자 정보
///
/// 인증 미들웨어가 요청 extensions 에 넣어두며, 핸들러는 추출자로 받습니다.
/// 저장소를 조회하지 않으므로 역할은 토큰 발급 시점의 값입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 로그인 이름 (`sub`)
    pub username: String,

    pub role: Role,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

impl From<AccessClaims> for AuthenticatedUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.uid,
            username: claims.sub,
            role: claims.role,
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
