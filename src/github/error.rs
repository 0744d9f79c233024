use reqwest::StatusCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures surfaced while resolving and fetching a repository's issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    InvalidRepository,
    NotFound,
    RateLimited,
    Api(StatusCode),
    Transport(String),
}

impl FetchError {
    /// Maps a non-success response status onto the error reported to the user.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status {
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            status => FetchError::Api(status),
        })
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidRepository => {
                write!(f, "Invalid repository format. Please use \"owner/repo\"")
            }
            FetchError::NotFound => {
                write!(f, "Repository not found. Please check the repository name.")
            }
            FetchError::RateLimited => {
                write!(f, "API rate limit exceeded. Please try again later.")
            }
            FetchError::Api(status) => write!(f, "GitHub API error: {}", status.as_u16()),
            FetchError::Transport(message) => write!(f, "Failed to fetch repository issues: {message}"),
        }
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
