//! Send SMS through pluggable gateway providers and record every outcome.
//!
//! A [`HandlerFactory`] composes one gateway provider (`smsc.ru`,
//! `smstraffic.ru`) with one result logger (`text` via `tracing`, `record` via
//! SQLite). The resulting [`Handler`] exposes a single `send` operation; every
//! attempt, delivered or not, ends up in the logger.
//!
//! ```rust,no_run
//! use smsgate::{HandlerFactory, Overrides, UserData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsgate::SmsGateError> {
//!     let mut overrides = Overrides::new();
//!     overrides.insert("login".to_owned(), "my-login".to_owned());
//!     overrides.insert("password".to_owned(), "my-password".to_owned());
//!
//!     let handler = HandlerFactory::new()
//!         .create("smsc.ru", "text", &overrides)
//!         .await?;
//!
//!     let mut message = UserData::new();
//!     message.insert("phones".to_owned(), "79149009900".to_owned());
//!     message.insert("mes".to_owned(), "hello".to_owned());
//!     handler.send(&message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod domain;
mod error;
pub mod handler;
pub mod logger;
pub mod provider;
mod transport;

pub use domain::{
    Credentials, Login, Outcome, OutcomeReport, Password, SenderId, Status, UserData,
    ValidationError,
};
pub use error::{AuthError, ConfigError, SmsGateError};
pub use handler::{
    Handler, HandlerFactory, HandlerFactoryBuilder, LoggerKind, Overrides, ProviderKind,
};
pub use logger::{RecordLogger, ResultLogger, ResultRow, TextLogger};
pub use provider::GatewayProvider;
pub use transport::BoxFuture;
