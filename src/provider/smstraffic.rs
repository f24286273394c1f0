use std::sync::Arc;

use tracing::{debug, info};

use super::{GatewayProvider, outcome_from_response, warn_dropped};
use crate::domain::{Credentials, SenderId, UserData};
use crate::error::{AuthError, SmsGateError};
use crate::logger::ResultLogger;
use crate::transport::{
    BoxFuture, HttpTransport, TransportError, decode_outcome_mapping, decode_token,
    encode_smstraffic_auth_form, encode_smstraffic_send_form,
};

pub const DEFAULT_SMSTRAFFIC_ENDPOINT: &str = "http://smstraffic.ru/superapi/message/";
pub const DEFAULT_SMSTRAFFIC_AUTH_ENDPOINT: &str = "http://smstraffic.ru/superapi/auth/";

const GATEWAY: &str = "smstraffic.ru";

/// smstraffic.ru: a session token is obtained once when the provider is built
/// and sent with every message. Responses are serialized mappings (JSON or a
/// Python dict literal).
///
/// The token is never refreshed; once the gateway revokes it, sends come back
/// as gateway-reported errors.
pub struct SmsTrafficProvider {
    token: String,
    sender: Option<SenderId>,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
    logger: Arc<dyn ResultLogger>,
}

impl SmsTrafficProvider {
    /// Authenticate against `auth_endpoint` and keep the issued token.
    ///
    /// Errors:
    /// - [`AuthError::Transport`] when no response arrives,
    /// - [`AuthError::HttpStatus`] for non-200 responses,
    /// - [`AuthError::MissingToken`] / [`AuthError::InvalidResponse`] when the
    ///   body carries no usable token.
    pub(crate) async fn authenticate(
        credentials: Credentials,
        auth_endpoint: &str,
        endpoint: String,
        http: Arc<dyn HttpTransport>,
        logger: Arc<dyn ResultLogger>,
    ) -> Result<Self, SmsGateError> {
        debug!(url = %auth_endpoint, "HTTP POST auth start");
        let response = http
            .post_form(auth_endpoint, encode_smstraffic_auth_form(&credentials))
            .await
            .map_err(AuthError::Transport)?;

        if !response.is_success() {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(AuthError::HttpStatus {
                status: response.status,
                body,
            }
            .into());
        }

        let token = decode_token(&response.body).map_err(|err| match err {
            TransportError::MissingToken => AuthError::MissingToken,
            other => AuthError::InvalidResponse(Box::new(other)),
        })?;
        info!(gateway = GATEWAY, login = credentials.login.as_str(), "Authenticated");

        Ok(Self {
            token,
            sender: credentials.sender,
            endpoint,
            http,
            logger,
        })
    }
}

impl GatewayProvider for SmsTrafficProvider {
    fn send<'a>(&'a self, user_data: &'a UserData) -> BoxFuture<'a, Result<(), SmsGateError>> {
        Box::pin(async move {
            let (params, dropped) =
                encode_smstraffic_send_form(&self.token, self.sender.as_ref(), user_data);
            warn_dropped(GATEWAY, &dropped);

            debug!(url = %self.endpoint, "HTTP POST start");
            let response = self.http.post_form(&self.endpoint, params).await;
            if let Ok(response) = &response {
                debug!(url = %self.endpoint, status = response.status, "HTTP POST done");
            }

            let report =
                outcome_from_response(GATEWAY, response, user_data, decode_outcome_mapping)?;
            self.logger.log(&report).await
        })
    }
}
