//! Error types for the contract model.

use thiserror::Error;

/// Errors raised while building contracts or reading values through them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    /// A nullable wrapper was declared with other than exactly one generic argument.
    #[error("cannot serialize type: {type_name}")]
    InvalidNullable { type_name: String },

    /// A field accessor did not find its field on the object.
    #[error("type {type_name} has no field '{field}'")]
    MissingField { type_name: String, field: String },

    /// A value did not have the shape a contract expected.
    #[error("expected {expected}, found {found}")]
    UnexpectedValue { expected: String, found: String },

    /// Two members of one contract share a name.
    #[error("duplicate member '{member}' in contract {contract}")]
    DuplicateMember { contract: String, member: String },

    /// A dictionary collection contract has no entry contract.
    #[error("collection contract {contract} requires an item contract")]
    MissingItemContract { contract: String },

    /// A flattened member index fell outside the contract's layout.
    #[error("contract {contract} has no member at index {index}")]
    MemberIndexOutOfRange { contract: String, index: usize },

    /// No adapter exists for the value in the given contract.
    #[error("contract {contract} cannot adapt a value of type {type_name}")]
    AdapterUnavailable { contract: String, type_name: String },

    /// A computed accessor failed.
    #[error("accessor for member '{member}' failed: {message}")]
    Accessor { member: String, message: String },

    /// A lifecycle hook failed.
    #[error("lifecycle hook failed: {0}")]
    Hook(String),
}

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
