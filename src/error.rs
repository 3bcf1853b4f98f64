//! Custom error types for autorelease with improved type safety and error
//! handling.

use thiserror::Error;

/// Main error type for autorelease operations.
#[derive(Error, Debug)]
pub enum AutoreleaseError {
    // Version/branch errors
    #[error("Invalid version format: '{0}' - expected [v]MAJOR.MINOR.PATCH")]
    InvalidVersion(String),

    #[error("Branch name must not be empty")]
    EmptyBranchName,

    #[error("Branch '{0}' is not a release branch")]
    NotAReleaseBranch(String),

    // Configuration errors
    #[error("Missing environment variable: {0}")]
    MissingEnvironment(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid event payload: {0}")]
    InvalidEvent(String),

    // Process errors
    #[error("Command `{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using AutoreleaseError
pub type Result<T> = std::result::Result<T, AutoreleaseError>;

impl AutoreleaseError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid event error
    pub fn invalid_event(msg: impl Into<String>) -> Self {
        Self::InvalidEvent(msg.into())
    }

    /// Create a missing environment variable error
    pub fn missing_env(name: impl Into<String>) -> Self {
        Self::MissingEnvironment(name.into())
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for AutoreleaseError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for reqwest errors (announcement endpoint)
impl From<reqwest::Error> for AutoreleaseError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status()
            && status.as_u16() == 429
        {
            Self::RateLimitExceeded
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for AutoreleaseError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
