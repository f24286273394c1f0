//! Result loggers: where the outcome of every send attempt ends up.

mod record;
mod text;

pub use record::{DEFAULT_STORE_FILE, RecordLogger, ResultRow, default_store_path};
pub use text::{LOG_TARGET, TextLogger};

use crate::domain::OutcomeReport;
use crate::error::SmsGateError;
use crate::transport::BoxFuture;

/// Records the outcome of one send attempt.
///
/// Implementations validate the report first (see
/// [`crate::domain::Outcome`]) and fail with [`SmsGateError::Validation`] when
/// the status is missing or unrecognized. Nothing is recorded in that case.
pub trait ResultLogger: Send + Sync {
    fn log<'a>(&'a self, report: &'a OutcomeReport) -> BoxFuture<'a, Result<(), SmsGateError>>;
}
