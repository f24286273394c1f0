use std::sync::Arc;

use tracing::debug;

use super::{GatewayProvider, outcome_from_response, warn_dropped};
use crate::domain::{Credentials, UserData};
use crate::error::SmsGateError;
use crate::logger::ResultLogger;
use crate::transport::{BoxFuture, HttpTransport, decode_outcome_json, encode_smsc_send_query};

pub const DEFAULT_SMSC_ENDPOINT: &str = "http://smsc.ru/someapi/message/";

const GATEWAY: &str = "smsc.ru";

/// smsc.ru: a single GET carrying credentials and message fields as query
/// parameters, answered with a JSON outcome.
pub struct SmscProvider {
    credentials: Credentials,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
    logger: Arc<dyn ResultLogger>,
}

impl SmscProvider {
    pub(crate) fn new(
        credentials: Credentials,
        endpoint: String,
        http: Arc<dyn HttpTransport>,
        logger: Arc<dyn ResultLogger>,
    ) -> Self {
        Self {
            credentials,
            endpoint,
            http,
            logger,
        }
    }
}

impl GatewayProvider for SmscProvider {
    fn send<'a>(&'a self, user_data: &'a UserData) -> BoxFuture<'a, Result<(), SmsGateError>> {
        Box::pin(async move {
            let (params, dropped) = encode_smsc_send_query(&self.credentials, user_data);
            warn_dropped(GATEWAY, &dropped);

            debug!(url = %self.endpoint, "HTTP GET start");
            let response = self.http.get_query(&self.endpoint, params).await;
            if let Ok(response) = &response {
                debug!(url = %self.endpoint, status = response.status, "HTTP GET done");
            }

            let report = outcome_from_response(GATEWAY, response, user_data, decode_outcome_json)?;
            self.logger.log(&report).await
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::OutcomeReport;
    use crate::logger::recording::RecordingLogger;
    use crate::transport::fake::{FakeTransport, Method, assert_param};

    use super::*;

    fn make_provider(transport: FakeTransport, logger: RecordingLogger) -> SmscProvider {
        SmscProvider::new(
            Credentials::new("login", "pass").unwrap(),
            "https://example.invalid/sms".to_owned(),
            Arc::new(transport),
            Arc::new(logger),
        )
    }

    fn user_data(pairs: &[(&str, &str)]) -> UserData {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[tokio::test]
    async fn non_success_status_with_empty_user_data_logs_placeholder_phone() {
        let logger = RecordingLogger::default();
        let provider = make_provider(FakeTransport::new(500, ""), logger.clone());

        provider.send(&UserData::new()).await.unwrap();

        assert_eq!(
            logger.reports(),
            vec![OutcomeReport::error("-", None, "data: {}")]
        );
    }

    #[tokio::test]
    async fn non_success_status_logs_phone_from_user_data() {
        let logger = RecordingLogger::default();
        let provider = make_provider(FakeTransport::new(404, "missing"), logger.clone());
        let data = user_data(&[("status", "ok"), ("phone", "79149009900")]);

        provider.send(&data).await.unwrap();

        let reports = logger.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status.as_deref(), Some("error"));
        assert_eq!(reports[0].phone.as_deref(), Some("79149009900"));
        assert_eq!(reports[0].error_code, None);
        assert_eq!(
            reports[0].error_msg.as_deref(),
            Some(r#"data: {"phone": "79149009900", "status": "ok"}"#)
        );
    }

    #[tokio::test]
    async fn no_content_status_is_logged_as_error_outcome() {
        let logger = RecordingLogger::default();
        let provider = make_provider(FakeTransport::new(204, ""), logger.clone());
        let data = user_data(&[("phone", "79149009900")]);

        provider.send(&data).await.unwrap();

        assert_eq!(logger.reports(), vec![OutcomeReport::undelivered(&data)]);
    }

    #[tokio::test]
    async fn transport_failure_is_logged_as_error_outcome() {
        let logger = RecordingLogger::default();
        let provider = make_provider(FakeTransport::failing(), logger.clone());
        let data = user_data(&[("phone", "79149009900")]);

        provider.send(&data).await.unwrap();

        assert_eq!(
            logger.reports(),
            vec![OutcomeReport::undelivered(&data)]
        );
    }

    #[tokio::test]
    async fn valid_response_is_passed_through() {
        let logger = RecordingLogger::default();
        let transport = FakeTransport::new(200, r#"{"status": "ok", "phone": "79149009900"}"#);
        let provider = make_provider(transport.clone(), logger.clone());
        let data = user_data(&[("phone", "79149009900"), ("mes", "hello")]);

        provider.send(&data).await.unwrap();

        assert_eq!(logger.reports(), vec![OutcomeReport::ok("79149009900")]);

        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "https://example.invalid/sms");
        assert_param(&request.params, "login", "login");
        assert_param(&request.params, "psw", "pass");
        assert_param(&request.params, "phone", "79149009900");
        assert_param(&request.params, "mes", "hello");
    }

    #[tokio::test]
    async fn user_data_cannot_replace_credentials() {
        let transport = FakeTransport::new(200, r#"{"status": "ok", "phone": "1"}"#);
        let provider = make_provider(transport.clone(), RecordingLogger::default());
        let data = user_data(&[("login", "evil"), ("psw", "evil")]);

        provider.send(&data).await.unwrap();

        let params = transport.last_request().params;
        assert_param(&params, "login", "login");
        assert_param(&params, "psw", "pass");
        assert!(!params.iter().any(|(_, v)| v == "evil"));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_a_parse_error() {
        let logger = RecordingLogger::default();
        let provider = make_provider(FakeTransport::new(200, "<html>"), logger.clone());

        let err = provider.send(&UserData::new()).await.unwrap_err();

        assert!(matches!(err, SmsGateError::Parse(_)));
        assert!(logger.reports().is_empty());
    }
}
