//! Error types for tablesmith.
//!
//! The DSL parser, the type resolver and the exporters never fail. Errors only
//! come from importing JSON documents, talking to the generation service,
//! loading configuration and file IO.

use thiserror::Error;

/// A JSON interchange document was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    /// `tables` is missing, not an array, or empty.
    #[error("No tables found in JSON")]
    NoTables,

    /// A table has no name or its `columns` is not an array.
    #[error("Invalid table structure (table #{index}): expected a non-empty name and a columns array")]
    InvalidTable { index: usize },

    /// A column has no name or no type.
    #[error("Column missing required fields (table '{table}', column #{index}): name and type are required")]
    ColumnMissingFields { table: String, index: usize },

    /// The document is not valid JSON.
    #[error("Invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),
}

/// A request to the SQL generation service failed.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No connection could be made.
    #[error("Cannot connect to the server. Please make sure the backend is running.")]
    Unreachable,

    /// The service answered with a non-success status.
    #[error("Error Code: {status}\nMessage: {message}")]
    Server { status: u16, message: String },

    /// Any other client side failure (request building, body decoding).
    #[error("Error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Unreachable
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// The main error type for tablesmith operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Import(#[from] ImportError),

    /// An edit referred to a table or column that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SchemaError {
    /// Create a not-found error for an edit target.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

/// Result type alias for tablesmith operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_display() {
        assert_eq!(ImportError::NoTables.to_string(), "No tables found in JSON");
        let err = ImportError::ColumnMissingFields {
            table: "users".to_string(),
            index: 2,
        };
        assert!(err.to_string().contains("'users'"));
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn test_generate_error_display() {
        let err = GenerateError::Server {
            status: 400,
            message: "Error: No tables provided".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error Code: 400\nMessage: Error: No tables provided"
        );
        assert!(GenerateError::Unreachable.to_string().starts_with("Cannot connect"));
    }

    #[test]
    fn test_umbrella_is_transparent() {
        let err: SchemaError = ImportError::NoTables.into();
        assert_eq!(err.to_string(), "No tables found in JSON");
    }
}
