//! Error types for contract-driven XML writing.
//!
//! A failed write leaves the sink partially written; callers discard the
//! output on any error.

use helios_contract::ContractError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    /// Contract or value error: accessor and hook failures, malformed
    /// nullable declarations, unexpected value shapes.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// XML writer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error from the underlying writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Writer settings could not be parsed
    #[error("invalid writer settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// A value did not match the primitive type it was written as.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No contract is registered for a runtime type.
    #[error(
        "type '{type_name}' is not expected; register a contract for it before serializing"
    )]
    UnknownType { type_name: String },

    /// A null was written for a type that cannot be serialized.
    #[error("type '{type_name}' cannot be serialized")]
    NotSerializable { type_name: String },

    /// The item quota of one write was exhausted.
    #[error("maximum number of items that can be serialized in an object graph is '{limit}'")]
    QuotaExceeded { limit: usize },

    /// The object graph nests deeper than allowed.
    #[error("maximum object graph depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// Sink misuse, e.g. an attribute after element content.
    #[error("{0}")]
    Custom(String),
}

impl From<String> for WriteError {
    fn from(msg: String) -> Self {
        WriteError::Custom(msg)
    }
}

impl From<&str> for WriteError {
    fn from(msg: &str) -> Self {
        WriteError::Custom(msg.to_string())
    }
}

/// Result type alias for write operations
pub type Result<T> = std::result::Result<T, WriteError>;
