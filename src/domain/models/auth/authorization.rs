//! 리소스 단위 권한 검사
//!
//! 인증(토큰 검증)이 끝난 사용자에 대해 핸들러가 호출하는 가드 함수들입니다.
//! 실패는 모두 `AppError::AuthorizationError` (403) 입니다.

use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::{AppError, AppResult};

/// 관리자만 허용
pub fn require_admin(user: &AuthenticatedUser) -> AppResult<()> {
    require_role(user, Role::Admin)
}

pub fn require_role(user: &AuthenticatedUser, role: Role) -> AppResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        log::warn!("권한 부족: user={} role={} required={}", user.username, user.role, role);
        Err(AppError::AuthorizationError(format!("{} role required", role)))
    }
}

/// 리소스 소유자 본인 또는 관리자만 허용
///
/// 소유자는 로그인 이름(`sub`)으로 비교합니다.
pub fn require_owner_or_admin(user: &AuthenticatedUser, owner_username: &str) -> AppResult<()> {
    if user.username == owner_username || user.is_admin() {
        return Ok(());
    }

    log::warn!("소유자 불일치: user={} owner={}", user.username, owner_username);
    Err(AppError::AuthorizationError(
        "Only the owner or an admin may access this resource".to_string(),
    ))
}
