use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;

/// Caller-supplied message fields (`phone`, `mes`, ...), sent as-is to the gateway.
pub type UserData = BTreeMap<String, String>;

/// Phone recorded when the user data did not name a destination.
pub const PHONE_PLACEHOLDER: &str = "-";

/// User data key holding the destination phone.
pub const PHONE_FIELD: &str = "phone";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "ok" => Some(Self::Ok),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Outcome of one send attempt, exactly as a gateway reported it (or as a
/// provider synthesized it). Nothing here is validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeReport {
    pub status: Option<String>,
    pub phone: Option<String>,
    pub error_code: Option<i64>,
    pub error_msg: Option<String>,
}

impl OutcomeReport {
    /// Successful delivery to `phone`.
    pub fn ok(phone: impl Into<String>) -> Self {
        Self {
            status: Some(Status::Ok.as_str().to_owned()),
            phone: Some(phone.into()),
            error_code: None,
            error_msg: None,
        }
    }

    /// Delivery failure reported with an optional gateway code.
    pub fn error(
        phone: impl Into<String>,
        error_code: Option<i64>,
        error_msg: impl Into<String>,
    ) -> Self {
        Self {
            status: Some(Status::Error.as_str().to_owned()),
            phone: Some(phone.into()),
            error_code,
            error_msg: Some(error_msg.into()),
        }
    }

    /// Failure for a request the gateway never answered successfully.
    ///
    /// The message carries a dump of the user data that was sent, since no
    /// gateway message exists.
    pub fn undelivered(user_data: &UserData) -> Self {
        let phone = user_data
            .get(PHONE_FIELD)
            .map(String::as_str)
            .unwrap_or(PHONE_PLACEHOLDER);
        Self::error(phone, None, format!("data: {user_data:?}"))
    }
}

/// Validated outcome, the only form a result logger persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    status: Status,
    phone: String,
    error_code: Option<i64>,
    error_msg: Option<String>,
}

impl Outcome {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Always `None` for [`Status::Ok`].
    pub fn error_code(&self) -> Option<i64> {
        self.error_code
    }

    /// Always `None` for [`Status::Ok`], always `Some` for [`Status::Error`].
    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl TryFrom<&OutcomeReport> for Outcome {
    type Error = ValidationError;

    fn try_from(report: &OutcomeReport) -> Result<Self, Self::Error> {
        let raw_status = report
            .status
            .as_deref()
            .ok_or(ValidationError::MissingStatus)?;
        let status = Status::parse(raw_status).ok_or_else(|| ValidationError::UnknownStatus {
            value: raw_status.to_owned(),
        })?;

        let phone = match report.phone.as_deref() {
            Some(phone) if !phone.trim().is_empty() => phone.to_owned(),
            _ => return Err(ValidationError::Empty { field: PHONE_FIELD }),
        };

        match status {
            Status::Ok => Ok(Self {
                status,
                phone,
                error_code: None,
                error_msg: None,
            }),
            Status::Error => {
                let error_msg = match report.error_msg.as_deref() {
                    Some(msg) if !msg.trim().is_empty() => msg.to_owned(),
                    _ => return Err(ValidationError::Empty { field: "error_msg" }),
                };
                Ok(Self {
                    status,
                    phone,
                    error_code: report.error_code,
                    error_msg: Some(error_msg),
                })
            }
        }
    }
}
