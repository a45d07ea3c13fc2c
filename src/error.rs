//! Error types for the yatof library.
//!
//! All errors are represented by the [`YatofError`] enum. Filter creation is
//! the only place a token filter can fail; per-token decisions (length
//! violations, frequency limits, word-list membership) are expressed through
//! token status flags and never surface here.
//!
//! # Examples
//!
//! ```
//! use yatof::error::{Result, YatofError};
//!
//! fn open_list() -> Result<()> {
//!     Err(YatofError::table_not_found("ignore_words"))
//! }
//!
//! match open_list() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for yatof operations.
#[derive(Error, Debug)]
pub enum YatofError {
    /// I/O errors (reading table or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filter creation, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration value could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required lookup table does not exist in the table store
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// A required column does not exist on a lookup table
    #[error("Column not found: {table}.{column}")]
    ColumnNotFound { table: String, column: String },

    /// Storage-related errors
    #[error("Table error: {0}")]
    Table(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with YatofError.
pub type Result<T> = std::result::Result<T, YatofError>;

impl YatofError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        YatofError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        YatofError::Config(msg.into())
    }

    /// Create a new table-not-found error.
    pub fn table_not_found<S: Into<String>>(name: S) -> Self {
        YatofError::TableNotFound(name.into())
    }

    /// Create a new column-not-found error.
    pub fn column_not_found<T: Into<String>, C: Into<String>>(table: T, column: C) -> Self {
        YatofError::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a new table error.
    pub fn table<S: Into<String>>(msg: S) -> Self {
        YatofError::Table(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        YatofError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        YatofError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
