use thiserror::Error;

/// Uniform error shape surfaced to the view layer: a human-readable
/// message plus a numeric status, via `message()` and `status()`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No session at call time. Raised before any network I/O; recovery
    /// is redirect-to-login, not an inline message.
    #[error("로그인이 필요합니다. 로그인 후 다시 시도해주세요.")]
    AuthRequired,

    /// The gateway answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// No response arrived (connect, timeout, or decode failure).
    #[error("{0}")]
    Transport(String),
}

impl SyncError {
    pub fn status(&self) -> u16 {
        match self {
            SyncError::AuthRequired => 401,
            SyncError::Rejected { status, .. } => *status,
            SyncError::Transport(_) => 500,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
