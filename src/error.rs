use thiserror::Error;

/// Message shown when the query box is empty
pub const EMPTY_QUERY_MESSAGE: &str = "請輸入查詢值";

/// Message shown when no better explanation is available
pub const GENERIC_FAILURE_MESSAGE: &str = "發生錯誤";

/// Failures of a single search attempt.
///
/// These are never returned to the caller of a client operation; they are
/// rendered into the error region instead.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The trimmed query was empty, no request was sent
    #[error("empty query")]
    Validation,

    /// The request never produced an HTTP response
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Backend { status: u16, message: Option<String> },

    /// A success response whose body was not a result page
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl SearchError {
    /// Text to put in the error region
    pub fn user_message(&self) -> &str {
        match self {
            SearchError::Validation => EMPTY_QUERY_MESSAGE,
            SearchError::Backend {
                message: Some(message),
                ..
            } => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Failures talking to the document the client renders into
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("could not start a WebDriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("could not write page shell: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid page url: {0}")]
    Url(String),
}
