//! Gateway providers: one network exchange per send, outcome handed to a logger.

mod smsc;
mod smstraffic;

pub use smsc::{DEFAULT_SMSC_ENDPOINT, SmscProvider};
pub use smstraffic::{
    DEFAULT_SMSTRAFFIC_AUTH_ENDPOINT, DEFAULT_SMSTRAFFIC_ENDPOINT, SmsTrafficProvider,
};

use tracing::warn;

use crate::domain::{OutcomeReport, UserData};
use crate::error::SmsGateError;
use crate::transport::{BoxFuture, HttpResponse, TransportError, TransportFailure};

/// Sends one message through a specific SMS gateway.
///
/// `send` resolves to `Ok(())` once the outcome, delivered or not, has been
/// handed to the provider's logger. It fails only when the logger does or when
/// a successful response cannot be decoded.
pub trait GatewayProvider: Send + Sync {
    fn send<'a>(&'a self, user_data: &'a UserData) -> BoxFuture<'a, Result<(), SmsGateError>>;
}

/// Turn a gateway answer into an outcome report.
///
/// Anything but a `200` response becomes an `error` report describing the request.
fn outcome_from_response(
    gateway: &'static str,
    response: Result<HttpResponse, TransportFailure>,
    user_data: &UserData,
    decode: fn(&str) -> Result<OutcomeReport, TransportError>,
) -> Result<OutcomeReport, SmsGateError> {
    match response {
        Err(err) => {
            warn!(gateway, error = %err, "Send failed before a response arrived");
            Ok(OutcomeReport::undelivered(user_data))
        }
        Ok(response) if !response.is_success() => {
            warn!(gateway, status = response.status, "Send rejected by gateway");
            Ok(OutcomeReport::undelivered(user_data))
        }
        Ok(response) => decode(&response.body).map_err(|err| SmsGateError::Parse(Box::new(err))),
    }
}

fn warn_dropped(gateway: &'static str, dropped: &[String]) {
    if !dropped.is_empty() {
        warn!(gateway, keys = ?dropped, "Ignoring user data keys reserved for credentials");
    }
}
