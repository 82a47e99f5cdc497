use serde::Deserialize;
use thiserror::Error;

/// 클라이언트 측 에러
///
/// 리프레시 결과를 대기 중인 모든 요청에 똑같이 전달해야 하므로 `Clone` 입니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// 저장된 자격 증명이 없음 (로그인 필요)
    #[error("not authenticated")]
    NotAuthenticated,

    /// 토큰 갱신 실패. 자격 증명이 삭제되었으므로 재로그인해야 합니다.
    #[error("session terminated: {reason}")]
    SessionTerminated { reason: String },

    /// `terminate()` 로 세션이 종료되었거나 갱신 도중 리더가 사라짐
    #[error("session closed")]
    SessionClosed,

    /// 새 토큰으로 재시도한 요청이 다시 401 을 받음
    #[error("request unauthorized after token refresh")]
    Unauthorized,

    #[error("transport error: {0}")]
    Transport(String),

    /// 서버가 2xx/401 이외의 상태를 반환
    #[error("server responded {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

/// 서버 에러 본문 `{ "error": <코드>, "message": <설명> }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// 실패 응답을 `ClientError::Status` 로 변환
pub(crate) async fn status_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => ClientError::Status {
            status,
            code: parsed.error,
            message: parsed.message.unwrap_or_default(),
        },
        Err(_) => ClientError::Status { status, code: None, message: body },
    }
}
