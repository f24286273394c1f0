use serde::Deserialize;

use super::literal::{LiteralError, python_literal_to_json};
use crate::domain::OutcomeReport;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid literal response: {0}")]
    Literal(#[from] LiteralError),

    #[error("response does not contain a token")]
    MissingToken,

    #[error("error_code is not an integer: {value:?}")]
    InvalidErrorCode { value: String },
}

#[derive(Debug, Clone, Deserialize)]
struct OutcomeJson {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    error_code: Option<TransportCode>,
    #[serde(default)]
    error_msg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCode {
    Int(i64),
    String(String),
}

impl TransportCode {
    fn into_i64(self) -> Result<i64, TransportError> {
        match self {
            Self::Int(value) => Ok(value),
            Self::String(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| TransportError::InvalidErrorCode { value }),
        }
    }
}

impl TryFrom<OutcomeJson> for OutcomeReport {
    type Error = TransportError;

    fn try_from(value: OutcomeJson) -> Result<Self, Self::Error> {
        Ok(Self {
            status: value.status,
            phone: value.phone,
            error_code: value.error_code.map(TransportCode::into_i64).transpose()?,
            error_msg: value.error_msg,
        })
    }
}

/// Decode a JSON outcome body.
pub fn decode_outcome_json(body: &str) -> Result<OutcomeReport, TransportError> {
    let parsed: OutcomeJson = serde_json::from_str(body)?;
    parsed.try_into()
}

/// Decode a serialized mapping that is either JSON or a Python dict literal.
pub fn decode_outcome_mapping(body: &str) -> Result<OutcomeReport, TransportError> {
    match decode_outcome_json(body) {
        Err(TransportError::Json(json_err)) => {
            let Ok(rewritten) = python_literal_to_json(body) else {
                return Err(json_err.into());
            };
            decode_outcome_json(&rewritten)
        }
        decoded => decoded,
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TokenJson {
    #[serde(default)]
    token: Option<String>,
}

/// Extract the auth token from an authentication response body.
pub fn decode_token(body: &str) -> Result<String, TransportError> {
    let parsed: TokenJson = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(json_err) => {
            let rewritten = python_literal_to_json(body).map_err(|_| json_err)?;
            serde_json::from_str(&rewritten)?
        }
    };
    parsed
        .token
        .filter(|token| !token.is_empty())
        .ok_or(TransportError::MissingToken)
}
