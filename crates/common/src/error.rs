use faststr::FastStr;
use thiserror::Error;

/// Failure reported by every backend call.
///
/// Variants that mirror a caller-facing message display exactly that
/// message, so `err.to_string()` is what a UI would show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(FastStr),
    #[error("{0}")]
    Backend(FastStr, u16),
    #[error("{0}")]
    Transport(FastStr),
    #[error("Invalid response data: {0}")]
    InvalidResponseData(FastStr),
    #[error("Invalid config: {0}")]
    Config(FastStr),
    #[error("{0}")]
    MsgError(FastStr),
}

impl Error {
    pub fn validation(msg: impl Into<FastStr>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status of a backend rejection, if this error is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend(_, status) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string().into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponseData(e.to_string().into())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::Config(e.to_string().into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
