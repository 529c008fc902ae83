// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors -> user-facing responses
// - The only place where error kinds become notification text
// - Technical details are logged, never shown

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, NotificationKind};
use crate::error::AppError;

/// Standard error response for the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Backend unreachable or payload malformed
    DataSource,

    /// Settings or stats could not be stored
    Persistence,

    /// Bad input from the user
    Validation,

    /// The backend refused to start the game
    Launch,

    Internal,
}

impl ErrorResponse {
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::DataSource(message) => {
                log::error!("Data source error: {}", message);
                Self::new(
                    ErrorType::DataSource,
                    "Could not reach the game library",
                    Some(message.clone()),
                )
            }

            e @ (AppError::Persistence(_) | AppError::Database(_) | AppError::Pool(_)) => {
                log::error!("Storage error: {:?}", e);
                Self::new(
                    ErrorType::Persistence,
                    "Local storage is unavailable",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Validation(message) => Self::validation(message.clone()),

            AppError::Domain(domain_error) => match domain_error {
                DomainError::InvalidValue(message) | DomainError::NotFound(message) => {
                    Self::validation(message.clone())
                }
                DomainError::InvalidStateTransition(message) => Self::new(
                    ErrorType::Validation,
                    "Not available on this screen",
                    Some(message.clone()),
                ),
                DomainError::InvariantViolation(message) => {
                    log::error!("Invariant violation: {}", message);
                    Self::new(ErrorType::Internal, "Unexpected error", None)
                }
            },

            AppError::Launch(reason) => Self::new(
                ErrorType::Launch,
                format!("Launch failed: {}", reason),
                None,
            ),

            AppError::Serialization(_) | AppError::Io(_) | AppError::Other(_) => {
                log::error!("Internal error: {:?}", error);
                Self::new(ErrorType::Internal, "Unexpected error", None)
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Notification kind used when this error is shown to the user
    pub fn notification_kind(&self) -> NotificationKind {
        match self.error_type {
            ErrorType::Validation => NotificationKind::Warning,
            _ => NotificationKind::Error,
        }
    }

    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self::from_app_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let response = ErrorResponse::from_app_error(&AppError::Validation(
            "Unknown command: jump".to_string(),
        ));
        assert_eq!(response.error_type, ErrorType::Validation);
        assert_eq!(response.message, "Unknown command: jump");
        assert_eq!(response.notification_kind(), NotificationKind::Warning);
        assert!(!response.success);
    }

    #[test]
    fn test_launch_error_keeps_reason() {
        let response = ErrorResponse::from(&AppError::Launch("ROM not found".to_string()));
        assert_eq!(response.error_type, ErrorType::Launch);
        assert_eq!(response.message, "Launch failed: ROM not found");
        assert_eq!(response.notification_kind(), NotificationKind::Error);
    }

    #[test]
    fn test_storage_errors_hide_details() {
        for error in [
            AppError::Persistence("disk full".to_string()),
            AppError::Pool("timed out".to_string()),
            AppError::Database(rusqlite::Error::InvalidQuery),
        ] {
            let response = ErrorResponse::from_app_error(&error);
            assert_eq!(response.error_type, ErrorType::Persistence);
            assert!(!response.message.contains("disk"));
        }
    }

    #[test]
    fn test_domain_errors() {
        let bad_value = AppError::Domain(DomainError::InvalidValue("Unknown system: psx".to_string()));
        assert_eq!(
            ErrorResponse::from_app_error(&bad_value).message,
            "Unknown system: psx"
        );

        let transition = AppError::Domain(DomainError::InvalidStateTransition(
            "cannot go back from SystemSelector".to_string(),
        ));
        let response = ErrorResponse::from_app_error(&transition);
        assert_eq!(response.error_type, ErrorType::Validation);
        assert_eq!(response.details.as_deref(), Some("cannot go back from SystemSelector"));
    }

    #[test]
    fn test_serializes_snake_case_type() {
        let response = ErrorResponse::from_app_error(&AppError::DataSource("refused".to_string()));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"error_type\":\"data_source\""));
    }
}
