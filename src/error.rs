use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::range::PageRequest;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid page range `{input}`: {reason}")]
    InvalidRange { input: String, reason: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// A failure for a single page. Never fatal to a run, only recorded.
#[derive(Debug, Error)]
pub enum PageFetchError {
    #[error("Request for page {page} timed out")]
    Timeout { page: PageRequest },

    #[error("Transport error on page {page}: {source}")]
    Transport {
        page: PageRequest,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error on page {page}! Status: {status}")]
    Status { page: PageRequest, status: StatusCode },

    #[error("Malformed response for page {page}: {reason}")]
    Malformed { page: PageRequest, reason: String },

    #[error("GraphQL error on page {page}: {message}")]
    Graphql { page: PageRequest, message: String },
}

impl PageFetchError {
    pub(crate) fn from_reqwest(page: PageRequest, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PageFetchError::Timeout { page }
        } else {
            PageFetchError::Transport { page, source: err }
        }
    }

    pub fn page(&self) -> PageRequest {
        match self {
            PageFetchError::Timeout { page }
            | PageFetchError::Transport { page, .. }
            | PageFetchError::Status { page, .. }
            | PageFetchError::Malformed { page, .. }
            | PageFetchError::Graphql { page, .. } => *page,
        }
    }

    /// Whether re-running the same page later has a reasonable chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            PageFetchError::Timeout { .. } | PageFetchError::Transport { .. } => true,
            PageFetchError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            PageFetchError::Malformed { .. } | PageFetchError::Graphql { .. } => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Couldn't serialize the records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Couldn't write the results to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
