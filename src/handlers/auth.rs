//! Authentication HTTP Handlers
//!
//! GitHub OAuth 로그인과 토큰 갱신 엔드포인트입니다.
//! 서비스는 모두 `web::Data<AppState>` 로 주입받습니다.
//!
//! # Endpoints
//!
//! - `GET /auth/github/login` - GitHub 인증 URL 과 state 발급
//! - `GET /auth/github/callback` - 인가 코드 교환, 사용자 프로비저닝, 토큰 쌍 발급
//! - `POST /auth/refresh` - 리프레시 토큰으로 토큰 쌍 재발급
//! - `GET /auth/session` - 현재 액세스 토큰의 로그인 상태 (Optional 인증)
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::core::AppState;
use crate::domain::models::auth::OptionalUser;
use crate::domain::{LoginResponse, OAuthCallbackQuery, RefreshRequest, RefreshResponse, SessionResponse};
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;

/// GitHub OAuth 로그인 URL 생성 핸들러
///
/// # Endpoint
/// `GET /auth/github/login`
#[get("/github/login")]
pub async fn github_login_url(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.github.login_url()))
}

/// GitHub OAuth 콜백 처리 핸들러
///
/// 인가 코드를 GitHub 액세스 토큰으로 교환하고 프로필로 사용자를 생성/갱신한 뒤
/// 자체 토큰 쌍을 발급합니다. GitHub 토큰은 응답에 포함하지 않습니다.
///
/// # Endpoint
/// `GET /auth/github/callback?code={code}[&state={state}]`
#[get("/github/callback")]
pub async fn github_oauth_callback(
    state: web::Data<AppState>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    // 사용자가 거부했거나 GitHub 가 에러를 돌려준 경우
    if let Some(error) = &query.error {
        let error_msg = query.error_description
            .as_deref()
            .unwrap_or("GitHub 인증이 취소되었거나 실패했습니다");
        log::warn!("GitHub OAuth 에러: {} - {}", error, error_msg);
        return Err(AppError::ProviderExchangeFailed(format!("{}: {}", error, error_msg)));
    }

    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state.github
        .complete_login(&query.code, query.state.as_deref())
        .await?;

    let pair = state.tokens.issue_token_pair(&user)?;

    log::info!("GitHub 로그인 성공: {} (github_id={})", user.username, user.github_id);
    Ok(HttpResponse::Ok().json(LoginResponse::new(&user, pair)))
}

/// 토큰 갱신 핸들러
///
/// 실패 시 401 응답의 `error` 코드로 원인을 구분합니다
/// (`token_expired`, `token_bad_signature`, `token_wrong_kind`, `subject_not_found` 등).
///
/// # Endpoint
/// `POST /auth/refresh`
#[post("/refresh")]
pub async fn refresh_tokens(
    state: web::Data<AppState>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let pair = state.refresh.refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(RefreshResponse::from(pair)))
}

/// 로그인 상태 확인
///
/// 유효한 액세스 토큰이 있으면 사용자 이름과 역할을, 없으면 `authenticated: false` 를 돌려줍니다.
///
/// # Endpoint
/// `GET /auth/session`
#[get("/session", wrap = "AuthMiddleware::optional()")]
pub async fn session_status(user: OptionalUser) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse::from(user.0))
}
