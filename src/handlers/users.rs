//! # User HTTP Handlers
//!
//! 인증된 사용자가 자신의 정보를 조회/삭제하는 엔드포인트입니다.
//! 모든 라우트는 `AuthMiddleware::required()` 아래에 등록됩니다.
//!
//! | 메서드 | 경로 | 권한 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/v1/me` | 인증된 사용자 | 200 OK |
//! | `GET` | `/api/v1/users/{username}` | 본인 또는 admin | 200 OK |
//! | `DELETE` | `/api/v1/users/{username}` | 본인 또는 admin | 204 No Content |
//!
//! 삭제된 사용자의 리프레시 토큰은 다음 갱신에서 `subject_not_found` 로 거부됩니다.
//! 이미 발급된 액세스 토큰은 만료 전까지 유효합니다.

use actix_web::{delete, get, web, HttpResponse};
use crate::core::AppState;
use crate::domain::models::auth::{require_owner_or_admin, AuthenticatedUser};
use crate::domain::UserResponse;
use crate::errors::AppError;

/// 현재 로그인한 사용자 정보
///
/// 토큰 클레임만으로 응답하지 않고 저장소에서 최신 정보를 읽습니다.
#[get("/me")]
pub async fn get_current_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let found = state.users
        .find_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user.username)))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

#[get("/users/{username}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    username: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&user, &username)?;

    let found = state.users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", username)))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

#[delete("/users/{username}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    username: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&user, &username)?;

    if !state.users.delete_by_username(&username).await? {
        return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", username)));
    }

    log::info!("사용자 삭제: {} (요청자: {})", username, user.username);
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{test, App};
    use serde_json::Value;
    use crate::domain::entities::users::{Role, User};
    use crate::domain::models::oauth::GitHubProfile;
    use crate::middlewares::AuthMiddleware;
    use crate::repositories::users::{InMemoryUserStore, UserStore};
    use crate::services::auth::TokenService;
    use crate::test_support::{jwt_settings, test_state_with};

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new().app_data(test_state_with($store)).service(
                    web::scope("/api/v1")
                        .wrap(AuthMiddleware::required())
                        .service(get_current_user)
                        .service(get_user)
                        .service(delete_user),
                ),
            )
            .await
        };
    }

    async fn seed(store: &InMemoryUserStore, id: i64, login: &str) -> User {
        store
            .upsert_github_identity(&GitHubProfile {
                id,
                login: login.to_string(),
                email: format!("{}@github.com", login),
                name: None,
                avatar_url: None,
            })
            .await
            .unwrap()
    }

    fn bearer(user: &User) -> (&'static str, String) {
        let token = TokenService::new(&jwt_settings()).issue_access_token(user).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_me_returns_stored_profile() {
        let store = Arc::new(InMemoryUserStore::new());
        let octocat = seed(&store, 1, "octocat").await;
        let app = app!(store);

        let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&octocat)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["username"], "octocat");
        assert_eq!(body["github_id"], 1);
        assert_eq!(body["role"], "user");
    }

    #[actix_web::test]
    async fn test_me_requires_token() {
        let app = app!(Arc::new(InMemoryUserStore::new()));

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/v1/me").to_request()).await;

        assert_eq!(res.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_other_users_profile_is_forbidden() {
        let store = Arc::new(InMemoryUserStore::new());
        let octocat = seed(&store, 1, "octocat").await;
        seed(&store, 2, "hubot").await;
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/v1/users/hubot")
            .insert_header(bearer(&octocat))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status().as_u16(), 403);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "insufficient_permissions");
    }

    #[actix_web::test]
    async fn test_admin_reads_and_deletes_any_user() {
        let store = Arc::new(InMemoryUserStore::new());
        seed(&store, 1, "octocat").await;
        seed(&store, 2, "hubot").await;
        store.set_role("octocat", Role::Admin);
        let admin = store.find_by_username("octocat").await.unwrap().unwrap();
        let app = app!(store.clone());

        let req = test::TestRequest::get()
            .uri("/api/v1/users/hubot")
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["username"], "hubot");

        let req = test::TestRequest::delete()
            .uri("/api/v1/users/hubot")
            .insert_header(bearer(&admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);
        assert!(store.find_by_username("hubot").await.unwrap().is_none());

        let req = test::TestRequest::delete()
            .uri("/api/v1/users/hubot")
            .insert_header(bearer(&admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_owner_deletes_self() {
        let store = Arc::new(InMemoryUserStore::new());
        let octocat = seed(&store, 1, "octocat").await;
        let app = app!(store.clone());

        let req = test::TestRequest::delete()
            .uri("/api/v1/users/octocat")
            .insert_header(bearer(&octocat))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);
        assert!(store.find_by_username("octocat").await.unwrap().is_none());
    }
}
