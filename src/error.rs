//! Error types for mcrelay

use thiserror::Error;

/// Result type alias for mcrelay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while talking to Marketing Cloud
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token acquisition failed: credentials rejected or auth endpoint unreachable
    #[error("Authentication failed{}: {message}", status_suffix(.status))]
    Auth {
        status: Option<u16>,
        message: String,
    },

    /// A vendor call returned a non-2xx status or never completed
    #[error("Request failed{}: {body}", status_suffix(.status))]
    Http { status: Option<u16>, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    #[allow(dead_code)]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. } | ApiError::Http { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn auth(err: reqwest::Error) -> Self {
        ApiError::Auth {
            status: err.status().map(|s| s.as_u16()),
            message: describe_transport(&err),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http {
            status: err.status().map(|s| s.as_u16()),
            body: describe_transport(&err),
        }
    }
}

fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        "Failed to connect to Marketing Cloud".to_string()
    } else {
        err.to_string()
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "ClientID and ClientSecret not found. Set SFMC_API_CLIENTID and SFMC_API_CLIENTSECRET."
    )]
    MissingCredentials,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
