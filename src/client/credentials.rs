//! 클라이언트 자격 증명 저장소

use std::sync::RwLock;
use crate::domain::{LoginResponse, RefreshResponse};

/// 현재 보유한 토큰 쌍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<LoginResponse> for Credentials {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.token,
            refresh_token: response.refresh_token,
        }
    }
}

impl From<RefreshResponse> for Credentials {
    fn from(response: RefreshResponse) -> Self {
        Self {
            access_token: response.token,
            refresh_token: response.refresh_token,
        }
    }
}

/// 프로세스 내 토큰 저장소
///
/// 갱신 성공 시 새 쌍으로 교체되고, 갱신 실패나 로그아웃 시 비워집니다.
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(Some(credentials)),
        }
    }

    pub fn get(&self) -> Option<Credentials> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.get().map(|c| c.access_token)
    }

    pub fn store(&self, credentials: Credentials) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(credentials);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}
