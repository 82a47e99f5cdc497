//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::AppState;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::errors::AppError;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let auth_result = match req.app_data::<web::Data<AppState>>() {
                Some(state) => authenticate(&req, &state.tokens),
                None => Err(AppError::InternalError("AppState 가 등록되지 않았습니다".to_string())),
            };

            match (mode, auth_result) {
                (_, Err(err @ AppError::InternalError(_))) => {
                    return Ok(reject(req, &err));
                }
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {} ({})", req.path(), err.code());
                    return Ok(reject(req, &err));
                }
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(user.role) {
                            log::warn!("권한 부족: {} ({}), 필요 권한: {:?}", user.username, user.role, required);
                            let err = AppError::AuthorizationError("접근 권한이 부족합니다".to_string());
                            return Ok(reject(req, &err));
                        }
                    }

                    log::debug!("인증 성공: {}", user.username);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    // 역할이 맞지 않으면 익명으로 취급하고 진행
                    let allowed = required_role
                        .as_ref()
                        .is_none_or(|required| required.is_satisfied(user.role));
                    if allowed {
                        log::debug!("선택적 인증 성공: {}", user.username);
                        req.extensions_mut().insert(user);
                    }
                }
                (AuthMode::Optional, Err(err)) => {
                    log::debug!("선택적 인증: 익명으로 진행 ({})", err.code());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Authorization 헤더의 액세스 토큰을 검증하여 사용자 정보 생성
fn authenticate(req: &ServiceRequest, tokens: &TokenService) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = TokenService::extract_bearer_token(auth_header)?;
    let claims = tokens.validate_access_token(token)?;

    Ok(AuthenticatedUser::from(claims))
}

/// 에러 코드를 그대로 담은 응답으로 요청 종료
fn reject<B>(req: ServiceRequest, err: &AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, err.error_response()).map_into_right_body()
}
