use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Form input rejected before any request was made.
    #[error("Validation: {0}")]
    Validation(String),

    /// The API answered with a non-success status.
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no detail"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid API address: {0}")]
    InvalidUrl(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ClientError {
    /// Message the server attached to a rejected request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user: validation text and server messages verbatim,
    /// everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            _ => self.server_message().unwrap_or(fallback).to_string(),
        }
    }

    /// The bearer token was rejected; the session must be dropped.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
