//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 추출합니다.
//! 토큰 서비스는 `web::Data<AppState>` 에서 가져옵니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::entities::users::Role;
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 미들웨어
///
/// - `Required`: 토큰이 없거나 유효하지 않으면 401 (`token_expired` 등 원인별 코드)
/// - `Optional`: 유효한 토큰이 있을 때만 사용자 정보를 넣고 항상 진행
///
/// ```rust,ignore
/// web::scope("/api/v1")
///     .wrap(AuthMiddleware::required())
///     .route("/me", web::get().to(me));
///
/// web::scope("/admin")
///     .wrap(AuthMiddleware::required_with_role(Role::Admin));
/// ```
pub struct AuthMiddleware {
    mode: AuthMode,
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
            required_role: self.required_role.clone(),
        }))
    }
}
