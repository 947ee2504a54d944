//! error types
//!
//! structured errors for config, transport, and graph api responses.

use serde::Deserialize;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the graph client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// the transport could not reach the host at all
    #[error("failed to establish a connection to the host")]
    Connection,

    /// any other transport-level failure
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// pagination-following hit the configured page limit
    #[error("pagination exceeded {0} pages")]
    PageOverflow(usize),

    /// a success body was missing a field the endpoint promises
    #[error("unexpected response: {0}")]
    Unexpected(String),

    /// structured error returned by the graph api
    #[error("graph api error: {message}")]
    Graph {
        /// error message, or the stringified body for unrecognized shapes
        message: String,
        /// numeric error code if the body carried one
        code: Option<i64>,
        /// error type name if the body carried one (e.g. "OAuthException")
        kind: Option<String>,
        /// raw response body
        body: serde_json::Value,
    },
}

/// recognized error body shape: `{"error": {"message", "code", "type"}}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl Error {
    /// build a graph error from a response body.
    ///
    /// bodies matching the structured shape keep their message, code, and
    /// type; anything else falls back to the stringified body.
    pub(crate) fn from_body(body: serde_json::Value) -> Self {
        match serde_json::from_value::<ErrorBody>(body.clone()) {
            Ok(parsed) => Error::Graph {
                message: parsed.error.message,
                code: parsed.error.code,
                kind: parsed.error.kind,
                body,
            },
            Err(_) => Error::Graph {
                message: body.to_string(),
                code: None,
                kind: None,
                body,
            },
        }
    }

    /// numeric error code for graph api errors
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Graph { code, .. } => *code,
            _ => None,
        }
    }

    /// error type name for graph api errors
    pub fn kind(&self) -> Option<&str> {
        match self {
            Error::Graph { kind, .. } => kind.as_deref(),
            _ => None,
        }
    }

    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Graph { kind: Some(kind), .. } if kind == "OAuthException")
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Error::Connection
        } else {
            Error::Transport(err)
        }
    }
}
