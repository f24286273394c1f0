//! Domain layer: strong types with validation and invariants (no I/O).

mod outcome;
mod validation;
mod value;

pub use outcome::{
    Outcome, OutcomeReport, PHONE_FIELD, PHONE_PLACEHOLDER, Status, UserData,
};
pub use validation::ValidationError;
pub use value::{Credentials, Login, Password, SenderId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejects_empty() {
        assert!(matches!(
            Login::new("   "),
            Err(ValidationError::Empty {
                field: Login::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty_but_keeps_whitespace() {
        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
        assert_eq!(Password::new(" p ").unwrap().as_str(), " p ");
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("secret").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn credentials_attach_sender() {
        let creds = Credentials::new(" user ", "pass")
            .unwrap()
            .with_sender(SenderId::new("ACME").unwrap());
        assert_eq!(creds.login.as_str(), "user");
        assert_eq!(creds.sender.as_ref().map(SenderId::as_str), Some("ACME"));
    }

    #[test]
    fn outcome_requires_status() {
        let report = OutcomeReport::default();
        assert_eq!(
            Outcome::try_from(&report),
            Err(ValidationError::MissingStatus)
        );
    }

    #[test]
    fn outcome_rejects_unknown_status() {
        let report = OutcomeReport {
            status: Some("sent".to_owned()),
            phone: Some("79149009900".to_owned()),
            ..Default::default()
        };
        assert!(matches!(
            Outcome::try_from(&report),
            Err(ValidationError::UnknownStatus { value }) if value == "sent"
        ));
    }

    #[test]
    fn outcome_status_is_case_sensitive() {
        for status in ["OK", "Error", "oK"] {
            let report = OutcomeReport {
                status: Some(status.to_owned()),
                phone: Some("79149009900".to_owned()),
                ..Default::default()
            };
            assert_eq!(
                Outcome::try_from(&report),
                Err(ValidationError::UnknownStatus {
                    value: status.to_owned()
                })
            );
        }
    }

    #[test]
    fn ok_outcome_drops_error_fields() {
        let report = OutcomeReport {
            error_code: Some(1),
            error_msg: Some("ignored".to_owned()),
            ..OutcomeReport::ok("79149009900")
        };
        let outcome = Outcome::try_from(&report).unwrap();
        assert!(outcome.is_ok());
        assert_eq!(outcome.phone(), "79149009900");
        assert_eq!(outcome.error_code(), None);
        assert_eq!(outcome.error_msg(), None);
    }

    #[test]
    fn error_outcome_requires_message() {
        let report = OutcomeReport {
            error_msg: None,
            ..OutcomeReport::error("79149009900", Some(3500), "x")
        };
        assert_eq!(
            Outcome::try_from(&report),
            Err(ValidationError::Empty { field: "error_msg" })
        );
    }

    #[test]
    fn error_outcome_keeps_code_and_message() {
        let report = OutcomeReport::error("79149009900", Some(3500), "description");
        let outcome = Outcome::try_from(&report).unwrap();
        assert_eq!(outcome.status(), Status::Error);
        assert_eq!(outcome.error_code(), Some(3500));
        assert_eq!(outcome.error_msg(), Some("description"));
    }

    #[test]
    fn outcome_requires_phone() {
        let report = OutcomeReport {
            status: Some("ok".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            Outcome::try_from(&report),
            Err(ValidationError::Empty { field: PHONE_FIELD })
        );
    }

    #[test]
    fn undelivered_uses_placeholder_and_dumps_user_data() {
        let report = OutcomeReport::undelivered(&UserData::new());
        assert_eq!(report.status.as_deref(), Some("error"));
        assert_eq!(report.phone.as_deref(), Some(PHONE_PLACEHOLDER));
        assert_eq!(report.error_code, None);
        assert_eq!(report.error_msg.as_deref(), Some("data: {}"));
    }

    #[test]
    fn undelivered_takes_phone_from_user_data() {
        let mut user_data = UserData::new();
        user_data.insert("phone".to_owned(), "79149009900".to_owned());
        user_data.insert("mes".to_owned(), "hi".to_owned());

        let report = OutcomeReport::undelivered(&user_data);
        assert_eq!(report.phone.as_deref(), Some("79149009900"));
        assert_eq!(
            report.error_msg.as_deref(),
            Some(r#"data: {"mes": "hi", "phone": "79149009900"}"#)
        );
    }
}
