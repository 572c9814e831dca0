//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while configuring the engine or reading catalogs.
///
/// Searching itself never fails: empty queries, empty catalogs and records
/// with missing fields all degrade to empty or pass-through results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rejected engine configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Two catalog records share an identifier
    #[error("Duplicate record id: {0}")]
    DuplicateRecordId(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error code for integration with CLI and WASM callers.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Rejected engine configuration
    InvalidConfig = 11001,
    /// Invalid query
    InvalidQuery = 11002,
    /// Duplicate record identifier
    DuplicateRecordId = 11003,
    /// JSON parsing error
    JsonParsing = 11004,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidConfig(_) => SearchErrorCode::InvalidConfig,
            SearchError::InvalidQuery(_) => SearchErrorCode::InvalidQuery,
            SearchError::DuplicateRecordId(_) => SearchErrorCode::DuplicateRecordId,
            SearchError::Json(_) => SearchErrorCode::JsonParsing,
        }
    }
}
