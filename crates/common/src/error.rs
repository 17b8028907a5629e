use thiserror::Error;

/// Ways a decoded status payload can fail the shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeViolation {
    NotAnObject,
    MissingHomeworks,
    HomeworksNotAList,
    NoSubmissions,
}

impl std::fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeViolation::NotAnObject => write!(f, "response is not a JSON object"),
            ShapeViolation::MissingHomeworks => write!(f, "response has no `homeworks` key"),
            ShapeViolation::HomeworksNotAList => write!(f, "`homeworks` is not a list"),
            ShapeViolation::NoSubmissions => write!(f, "`homeworks` list is empty"),
        }
    }
}

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredential(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to the status API failed: {0}")]
    Transport(String),

    #[error("Status API returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Failed to decode status API response as JSON: {0}")]
    Decode(String),

    #[error("Unexpected status API response: {0}")]
    Shape(ShapeViolation),

    #[error("Submission record has no `{0}` field")]
    UnknownField(&'static str),

    #[error("Unknown submission status: {0}")]
    UnknownStatus(String),

    #[error("Failed to send notification: {0}")]
    NotificationSend(String),
}

impl AppError {
    /// Fatal errors stop the process; everything else is retried on the next cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::MissingCredential(_) | AppError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_lists_every_name() {
        let err = AppError::MissingCredential(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_cycle_errors_are_recoverable() {
        assert!(!AppError::Transport("timed out".into()).is_fatal());
        assert!(!AppError::HttpStatus(503).is_fatal());
        assert!(!AppError::Shape(ShapeViolation::NoSubmissions).is_fatal());
        assert!(!AppError::UnknownStatus("pending".into()).is_fatal());
    }

    #[test]
    fn test_shape_error_message() {
        let err = AppError::Shape(ShapeViolation::MissingHomeworks);
        assert_eq!(
            err.to_string(),
            "Unexpected status API response: response has no `homeworks` key"
        );
    }
}
