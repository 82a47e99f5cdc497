//! 애플리케이션 상태 (명시적 의존성 주입 컨테이너)
//!
//! `main` 에서 설정 스냅샷으로 한 번 조립하고 `web::Data<AppState>` 로 모든 워커에
//! 공유합니다. 생성 후에는 변경되지 않습니다.
//!
//! ```rust,ignore
//! let state = web::Data::new(AppState::new(
//!     &jwt_settings,
//!     user_store,
//!     Arc::new(GitHubClient::new(github_settings.clone())?),
//!     github_settings,
//!     OAuthStateSettings::from_env(),
//! ));
//!
//! HttpServer::new(move || App::new().app_data(state.clone()).configure(configure_all_routes))
//! ```

use std::sync::Arc;
use crate::config::{GitHubSettings, JwtSettings, OAuthStateSettings};
use crate::repositories::users::UserStore;
use crate::services::auth::{GitHubAuthService, IdentityProvider, RefreshService, TokenService};

pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub refresh: RefreshService,
    pub github: GitHubAuthService,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(
        jwt: &JwtSettings,
        users: Arc<dyn UserStore>,
        provider: Arc<dyn IdentityProvider>,
        github: GitHubSettings,
        state: OAuthStateSettings,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(jwt));

        Self {
            refresh: RefreshService::new(tokens.clone(), users.clone()),
            github: GitHubAuthService::new(provider, users.clone(), github, state),
            tokens,
            users,
        }
    }
}
