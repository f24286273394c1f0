use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingStatus,
    UnknownStatus { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingStatus => write!(f, "could not find \"status\" field"),
            Self::UnknownStatus { value } => write!(f, "unexpected value of status: {value}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "login" };
        assert_eq!(err.to_string(), "login must not be empty");

        let err = ValidationError::MissingStatus;
        assert_eq!(err.to_string(), "could not find \"status\" field");

        let err = ValidationError::UnknownStatus {
            value: "maybe".to_owned(),
        };
        assert_eq!(err.to_string(), "unexpected value of status: maybe");
    }
}
