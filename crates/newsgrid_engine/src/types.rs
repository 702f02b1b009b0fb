use std::fmt;

use serde::Deserialize;

/// Request tag handed out by the caller; echoed back on every event.
pub type Generation = u64;

/// One entry of the `articles` array. Every field is optional or nullable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub url_to_image: Option<String>,
}

/// Success body of the news search endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<u64>,
    pub articles: Vec<ApiArticle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The debounce timer for `generation` survived without being replaced.
    DebounceElapsed { generation: Generation },
    /// A search issued for `generation` finished.
    SearchCompleted {
        generation: Generation,
        result: Result<SearchResponse, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
