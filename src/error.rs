use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed provider settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API answered with a non-2xx status
    #[error("GoDaddy API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid record ID specified: {0}")]
    InvalidIdentifier(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Identity fields cannot be updated in place
    #[error("changing `{field}` is not supported, recreate the resource")]
    RequiresReplacement { field: &'static str },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// True for failures that came from talking to the API.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Transport(_) | Self::Decode(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
