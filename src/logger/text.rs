use tracing::info;

use super::ResultLogger;
use crate::domain::{Outcome, OutcomeReport};
use crate::error::SmsGateError;
use crate::transport::BoxFuture;

/// `tracing` target of every line written by [`TextLogger`].
pub const LOG_TARGET: &str = "sms";

#[derive(Debug, Clone, Copy, Default)]
/// Writes one INFO line per outcome to the process-wide `tracing` dispatcher.
pub struct TextLogger;

impl TextLogger {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, outcome: &Outcome) {
        if outcome.is_ok() {
            info!(target: LOG_TARGET, "status: OK, phone: {}", outcome.phone());
        } else {
            info!(
                target: LOG_TARGET,
                error_code = ?outcome.error_code(),
                "status: ERROR, phone: {}, message: {}",
                outcome.phone(),
                outcome.error_msg().unwrap_or_default(),
            );
        }
    }
}

impl ResultLogger for TextLogger {
    fn log<'a>(&'a self, report: &'a OutcomeReport) -> BoxFuture<'a, Result<(), SmsGateError>> {
        Box::pin(async move {
            let outcome = Outcome::try_from(report)?;
            self.emit(&outcome);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::domain::ValidationError;

    use super::*;

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CaptureWriter {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    fn capture() -> (CaptureWriter, tracing::subscriber::DefaultGuard) {
        let writer = CaptureWriter::default();
        let make = writer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || make.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (writer, guard)
    }

    #[tokio::test]
    async fn ok_outcome_emits_one_line_with_phone() {
        let (writer, _guard) = capture();

        TextLogger::new()
            .log(&OutcomeReport::ok("79149009900"))
            .await
            .unwrap();

        let lines = writer.lines();
        assert_eq!(lines.len(), 1, "got: {lines:?}");
        assert!(lines[0].contains("status: OK, phone: 79149009900"));
        assert!(lines[0].contains(LOG_TARGET));
    }

    #[tokio::test]
    async fn error_outcome_emits_phone_and_message() {
        let (writer, _guard) = capture();

        TextLogger::new()
            .log(&OutcomeReport::error(
                "79149009900",
                Some(3500),
                "description",
            ))
            .await
            .unwrap();

        let lines = writer.lines();
        assert_eq!(lines.len(), 1, "got: {lines:?}");
        assert!(lines[0].contains("status: ERROR, phone: 79149009900, message: description"));
        assert!(lines[0].contains("error_code=Some(3500)"));
    }

    #[tokio::test]
    async fn missing_status_is_rejected_without_output() {
        let (writer, _guard) = capture();

        let err = TextLogger::new()
            .log(&OutcomeReport::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SmsGateError::Validation(ValidationError::MissingStatus)
        ));
        assert!(writer.lines().is_empty());
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let report = OutcomeReport {
            status: Some("queued".to_owned()),
            phone: Some("79149009900".to_owned()),
            ..Default::default()
        };

        let err = TextLogger::new().log(&report).await.unwrap_err();
        assert!(matches!(
            err,
            SmsGateError::Validation(ValidationError::UnknownStatus { .. })
        ));
    }
}
