//! API 라우트 설정 모듈
//!
//! 인증, 사용자 관련 라우트와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Auth Middleware Usage
//!
//! ## 인증 불필요 (Public 라우트)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/auth")
//!         .service(handlers::auth::github_oauth_callback) // 로그인 자체는 인증 불필요
//!         .service(handlers::auth::refresh_tokens)        // 리프레시 토큰이 곧 자격 증명
//! );
//! ```
//!
//! ## 인증 필요
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1")
//!         .wrap(AuthMiddleware::required())
//!         .service(handlers::users::get_current_user)
//! );
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! let app = App::new()
//!     .app_data(state.clone())
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// `web::Data<AppState>` 는 호출하는 쪽에서 `App::app_data` 로 등록해야 합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// 모든 인증 라우트는 Public 접근이 가능합니다.
///
/// - `GET /auth/github/login` - GitHub OAuth 로그인 URL 생성
/// - `GET /auth/github/callback` - GitHub OAuth 콜백 처리, 토큰 쌍 발급
/// - `POST /auth/refresh` - 토큰 갱신
/// - `GET /auth/session` - 로그인 상태 (`AuthMiddleware::optional()`)
///
/// ```bash
/// curl -X POST http://localhost:8080/auth/refresh \
///   -H "Content-Type: application/json" \
///   -d '{"refresh_token":"eyJhbGciOiJIUzI1NiIs..."}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::github_login_url)
            .service(handlers::auth::github_oauth_callback)
            .service(handlers::auth::refresh_tokens)
            .service(handlers::auth::session_status)
    );
}

/// 사용자 관련 라우트를 설정합니다
///
/// - `GET /api/v1/me`
/// - `GET /api/v1/users/{username}`
/// - `DELETE /api/v1/users/{username}`
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_current_user)
            .service(handlers::users::get_user)
            .service(handlers::users::delete_user)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "quiz_auth_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "identity_provider": "GitHub"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{test, App};
    use serde_json::Value;
    use crate::domain::LoginResponse;
    use crate::repositories::users::InMemoryUserStore;
    use crate::test_support::test_state_with;

    #[actix_web::test]
    async fn test_full_login_me_refresh_flow() {
        let app = test::init_service(
            App::new()
                .app_data(test_state_with(Arc::new(InMemoryUserStore::new())))
                .configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert!(res.status().is_success());

        let req = test::TestRequest::get().uri("/auth/github/callback?code=valid").to_request();
        let login: LoginResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("Authorization", format!("Bearer {}", login.token)))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["username"], "octocat");

        let req = test::TestRequest::get()
            .uri("/auth/session")
            .insert_header(("Authorization", format!("Bearer {}", login.token)))
            .to_request();
        let session: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(session["authenticated"], true);

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("Authorization", format!("Bearer {}", login.refresh_token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 401);

        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .set_json(serde_json::json!({ "refresh_token": login.refresh_token }))
            .to_request();
        let refreshed: Value = test::call_and_read_body_json(&app, req).await;
        assert!(refreshed["token"].as_str().is_some_and(|t| !t.is_empty()));
    }
}
