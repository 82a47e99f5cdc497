//! 단일 비행(single-flight) 토큰 갱신 코디네이터
//!
//! 액세스 토큰이 만료되면 동시에 여러 요청이 401 을 받습니다. 코디네이터는 그중
//! 첫 요청만 리프레시를 호출하게 하고, 나머지는 도착 순서대로 줄을 세웠다가
//! 결과를 한꺼번에 나눠줍니다.
//!
//! ```text
//!            401 (재시도 전)                 성공: 새 토큰 저장, 대기열 FIFO 해제
//!   Idle ───────────────────▶ Refreshing ─────────────────────────────▶ Idle
//!                               │  ▲    실패/타임아웃: 자격 증명 삭제, 대기열 전부 거부
//!                   추가 401 ───┘  │
//!                   (대기열에 추가) │
//! ```
//!
//! - 상태 잠금은 `await` 를 넘어 유지되지 않습니다.
//! - 리프레시는 `refresh_timeout` 안에 끝나지 않으면 실패로 처리됩니다.
//! - 리더 요청이 취소되어도 대기열은 `SessionClosed` 로 정리됩니다.
//! - 한 번 재시도한 요청은 다시 갱신을 요청하지 않습니다.
//! - 세션마다 세대(epoch)가 있어 이전 세션의 갱신 결과는 버려집니다.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use super::credentials::{CredentialStore, Credentials};
use super::errors::ClientError;
use super::refresher::TokenRefresher;

/// 요청 1회 시도 결과
#[derive(Debug)]
pub enum Attempt<T> {
    Done(T),
    /// 401. 토큰 갱신 후 재시도 대상
    Unauthorized,
}

type Waiter = oneshot::Sender<Result<String, ClientError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Refreshing,
}

struct Inner {
    phase: Phase,
    waiters: VecDeque<Waiter>,
    closed: bool,
    /// `start_session` / `terminate` 마다 증가
    epoch: u64,
}

/// `fresh_token_after` 가 잠금 안에서 내린 결정
enum Next {
    Ready(Result<String, ClientError>),
    Wait(oneshot::Receiver<Result<String, ClientError>>),
    Lead { refresh_token: String, epoch: u64 },
}

pub struct RefreshCoordinator {
    credentials: Arc<CredentialStore>,
    refresher: Arc<dyn TokenRefresher>,
    timeout: Duration,
    inner: Mutex<Inner>,
}

impl RefreshCoordinator {
    pub fn new(credentials: Arc<CredentialStore>, refresher: Arc<dyn TokenRefresher>, timeout: Duration) -> Self {
        Self {
            credentials,
            refresher,
            timeout,
            inner: Mutex::new(Inner {
                phase: Phase::Idle,
                waiters: VecDeque::new(),
                closed: false,
                epoch: 0,
            }),
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().phase == Phase::Refreshing
    }

    /// 현재 대기 중인 요청 수
    pub fn pending(&self) -> usize {
        self.lock().waiters.len()
    }

    /// 현재 액세스 토큰으로 `op` 를 실행하고, 401 이면 갱신된 토큰으로 한 번 재시도합니다.
    ///
    /// # Errors
    ///
    /// * `ClientError::NotAuthenticated` - 저장된 자격 증명 없음
    /// * `ClientError::SessionTerminated` - 갱신 실패 (자격 증명 삭제됨)
    /// * `ClientError::Unauthorized` - 재시도도 401
    /// * `op` 가 반환한 에러
    pub async fn call<T, F, Fut>(&self, mut op: F) -> Result<T, ClientError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<Attempt<T>, ClientError>>,
    {
        if self.lock().closed {
            return Err(ClientError::SessionClosed);
        }

        let token = self.credentials.access_token().ok_or(ClientError::NotAuthenticated)?;

        match op(token.clone()).await? {
            Attempt::Done(value) => Ok(value),
            Attempt::Unauthorized => {
                let fresh = self.fresh_token_after(&token).await?;
                match op(fresh).await? {
                    Attempt::Done(value) => Ok(value),
                    Attempt::Unauthorized => {
                        log::warn!("갱신된 토큰으로도 401, 재시도 중단");
                        Err(ClientError::Unauthorized)
                    }
                }
            }
        }
    }

    /// `stale` 토큰이 거부된 뒤 사용할 새 액세스 토큰을 얻습니다.
    ///
    /// 이미 다른 요청이 갱신을 마쳐 저장된 토큰이 `stale` 과 다르면 그 토큰을 바로 돌려줍니다.
    /// 갱신 중이면 대기열에 들어가고, 아니면 직접 리프레시를 수행합니다.
    pub async fn fresh_token_after(&self, stale: &str) -> Result<String, ClientError> {
        let next = {
            let mut inner = self.lock();

            if inner.closed {
                Next::Ready(Err(ClientError::SessionClosed))
            } else if inner.phase == Phase::Refreshing {
                let (tx, rx) = oneshot::channel();
                inner.waiters.push_back(tx);
                Next::Wait(rx)
            } else {
                match self.credentials.get() {
                    None => Next::Ready(Err(ClientError::NotAuthenticated)),
                    Some(current) if current.access_token != stale => Next::Ready(Ok(current.access_token)),
                    Some(current) => {
                        inner.phase = Phase::Refreshing;
                        Next::Lead { refresh_token: current.refresh_token, epoch: inner.epoch }
                    }
                }
            }
        };

        match next {
            Next::Ready(result) => result,
            Next::Wait(rx) => rx.await.unwrap_or(Err(ClientError::SessionClosed)),
            Next::Lead { refresh_token, epoch } => self.lead_refresh(&refresh_token, epoch).await,
        }
    }

    /// 새 세션 시작: 토큰 쌍을 저장하고 `terminate` 이후에도 다시 호출할 수 있게 합니다.
    ///
    /// 이전 세션에서 진행 중이던 갱신의 대기열은 `SessionClosed` 로 끝나고,
    /// 그 갱신 결과는 저장되지 않습니다.
    pub fn start_session(&self, credentials: Credentials) {
        let waiters = {
            let mut inner = self.lock();
            inner.epoch += 1;
            inner.closed = false;
            inner.phase = Phase::Idle;
            self.credentials.store(credentials);
            std::mem::take(&mut inner.waiters)
        };

        for waiter in waiters {
            let _ = waiter.send(Err(ClientError::SessionClosed));
        }
    }

    /// 세션 종료: 자격 증명을 지우고 대기 중인 요청을 모두 거부합니다.
    ///
    /// 이후 호출은 `start_session` 전까지 `SessionClosed` 로 실패합니다.
    pub fn terminate(&self) {
        let waiters = {
            let mut inner = self.lock();
            inner.epoch += 1;
            inner.closed = true;
            inner.phase = Phase::Idle;
            self.credentials.clear();
            std::mem::take(&mut inner.waiters)
        };

        log::info!("세션 종료, 대기 요청 {}건 거부", waiters.len());

        for waiter in waiters {
            let _ = waiter.send(Err(ClientError::SessionClosed));
        }
    }

    async fn lead_refresh(&self, refresh_token: &str, epoch: u64) -> Result<String, ClientError> {
        let mut guard = LeaderGuard { coordinator: self, epoch, armed: true };

        let outcome = tokio::time::timeout(self.timeout, self.refresher.refresh(refresh_token)).await;

        // 상태 확인과 자격 증명 변경은 같은 잠금 안에서
        let result = {
            let inner = self.lock();
            if inner.closed || inner.epoch != epoch {
                log::debug!("종료된 세션의 갱신 결과 폐기");
                Err(ClientError::SessionClosed)
            } else {
                match outcome {
                    Ok(Ok(credentials)) => {
                        let access_token = credentials.access_token.clone();
                        self.credentials.store(credentials);
                        log::debug!("토큰 갱신 성공");
                        Ok(access_token)
                    }
                    Ok(Err(e)) => {
                        self.credentials.clear();
                        log::warn!("토큰 갱신 실패, 세션 종료: {}", e);
                        Err(ClientError::SessionTerminated { reason: e.to_string() })
                    }
                    Err(_) => {
                        self.credentials.clear();
                        log::warn!("토큰 갱신 타임아웃 ({:?}), 세션 종료", self.timeout);
                        Err(ClientError::SessionTerminated {
                            reason: format!("refresh timed out after {:?}", self.timeout),
                        })
                    }
                }
            }
        };

        guard.armed = false;
        self.finish(epoch, result.clone());
        result
    }

    /// `Idle` 로 돌아가고 대기열을 도착 순서대로 해제
    ///
    /// 그 사이 세션이 바뀌었다면 새 세션의 대기열은 건드리지 않습니다.
    fn finish(&self, epoch: u64, result: Result<String, ClientError>) {
        let waiters = {
            let mut inner = self.lock();
            if inner.epoch != epoch {
                return;
            }
            if inner.phase == Phase::Refreshing {
                inner.phase = Phase::Idle;
            }
            std::mem::take(&mut inner.waiters)
        };

        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// 리더 요청의 future 가 갱신 도중 drop 되면 대기열을 정리
struct LeaderGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    epoch: u64,
    armed: bool,
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::warn!("토큰 갱신 중 리더 요청이 취소됨");
            self.coordinator.finish(self.epoch, Err(ClientError::SessionClosed));
        }
    }
}
