use std::error::Error as StdError;

use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
/// Errors returned while building a [`crate::Handler`] or sending through one.
///
/// Ordinary delivery failures (gateway unreachable, non-200 status) are not
/// errors: they are recorded as `error` outcomes by the handler's logger.
pub enum SmsGateError {
    /// Unknown provider/logger key or an override that does not apply.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The gateway refused to issue a session token.
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// An outcome or credential value failed domain validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The result store could not be opened, written or read.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A successful gateway response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown provider: {key}")]
    UnknownProvider { key: String },

    #[error("unknown logger: {key}")]
    UnknownLogger { key: String },

    #[error("unknown override: {key}")]
    UnknownOverride { key: String },

    #[error("override {key} does not apply to {target}")]
    UnsupportedOverride { key: String, target: &'static str },

    #[error("invalid endpoint {value}: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    #[error("invalid auth response: {0}")]
    InvalidResponse(#[source] Box<dyn StdError + Send + Sync>),

    #[error("response from server does not contain token")]
    MissingToken,
}
