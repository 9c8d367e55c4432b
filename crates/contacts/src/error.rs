//! Error types for contacts.
//!
//! This module defines all error types used throughout the contacts crate.
//! Route boundaries only distinguish two kinds, see [`ErrorKind`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for contacts operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Routing Errors ===
    /// No route in the table matches the requested path.
    #[error("no route matches {path}")]
    RouteNotFound {
        /// The requested path.
        path: String,
    },

    /// The requested contact does not exist in the store.
    #[error("contact not found: {id}")]
    ContactNotFound {
        /// Identifier that was looked up.
        id: String,
    },

    /// A loader or action failed.
    #[error("route '{route}' failed: {message}")]
    OperationFailure {
        /// Identifier of the route whose loader or action failed.
        route: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A form was submitted to a route without an action.
    #[error("route '{route}' does not accept form submissions")]
    MethodNotAllowed {
        /// Identifier of the targeted route.
        route: String,
    },

    /// A navigation followed more redirects than allowed.
    #[error("too many redirects while navigating to {path} (limit {limit})")]
    RedirectLimit {
        /// Path of the last redirect target.
        path: String,
        /// Configured redirect limit.
        limit: usize,
    },

    /// A route pattern could not be parsed.
    #[error("invalid route pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Description of the problem.
        message: String,
    },

    /// A submitted form field could not be interpreted.
    #[error("invalid value for form field '{field}': {message}")]
    InvalidFormField {
        /// Name of the field.
        field: String,
        /// Description of the problem.
        message: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for contacts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The two error kinds a route boundary distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No route or no entity matches.
    NotFound,
    /// A loader or action threw.
    OperationFailure,
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an operation failure for the given route.
    #[must_use]
    pub fn operation(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OperationFailure {
            route: route.into(),
            message: message.into(),
        }
    }

    /// Create a contact-not-found error.
    #[must_use]
    pub fn contact_not_found(id: impl Into<String>) -> Self {
        Self::ContactNotFound { id: id.into() }
    }

    /// Create an invalid form field error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classify this error for boundary rendering.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RouteNotFound { .. } | Self::ContactNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::OperationFailure,
        }
    }

    /// Check if this error means nothing matched.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// HTTP-style status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RouteNotFound { .. } | Self::ContactNotFound { .. } => Some(404),
            Self::MethodNotAllowed { .. } => Some(405),
            _ => None,
        }
    }

    /// Short status text shown by error views in place of the message.
    #[must_use]
    pub fn status_text(&self) -> Option<&'static str> {
        match self.status() {
            Some(404) => Some("Not Found"),
            Some(405) => Some("Method Not Allowed"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RouteNotFound {
            path: "/nowhere".to_string(),
        };
        assert_eq!(err.to_string(), "no route matches /nowhere");

        let err = Error::internal("test error");
        assert_eq!(err.to_string(), "internal error: test error");
    }

    #[test]
    fn test_error_kind_not_found() {
        assert_eq!(Error::contact_not_found("abc").kind(), ErrorKind::NotFound);
        assert!(Error::RouteNotFound {
            path: "/x".to_string()
        }
        .is_not_found());
    }

    #[test]
    fn test_error_kind_operation_failure() {
        assert_eq!(
            Error::operation("root", "boom").kind(),
            ErrorKind::OperationFailure
        );
        assert!(!Error::internal("bug").is_not_found());
        assert!(!Error::MethodNotAllowed {
            route: "contact".to_string()
        }
        .is_not_found());
    }

    #[test]
    fn test_status_and_status_text() {
        let err = Error::contact_not_found("abc");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.status_text(), Some("Not Found"));

        let err = Error::MethodNotAllowed {
            route: "edit".to_string(),
        };
        assert_eq!(err.status(), Some(405));
        assert_eq!(err.status_text(), Some("Method Not Allowed"));

        let err = Error::operation("destroy", "Error!!");
        assert_eq!(err.status(), None);
        assert_eq!(err.status_text(), None);
    }

    #[test]
    fn test_operation_failure_display() {
        let err = Error::operation("destroy", "Error!!");
        let msg = err.to_string();
        assert!(msg.contains("destroy"));
        assert!(msg.contains("Error!!"));
    }

    #[test]
    fn test_invalid_field_display() {
        let err = Error::invalid_field("favorite", "expected true or false");
        let msg = err.to_string();
        assert!(msg.contains("favorite"));
        assert!(msg.contains("expected true or false"));
    }

    #[test]
    fn test_redirect_limit_display() {
        let err = Error::RedirectLimit {
            path: "/loop".to_string(),
            limit: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("/loop"));
        assert!(msg.contains('8'));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert_eq!(err.kind(), ErrorKind::OperationFailure);
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "max_redirects must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("max_redirects"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
