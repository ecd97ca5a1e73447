//! Error types for filtering and projection.
//!
//! Every failure is terminal for the call that produced it: nothing is retried and no partial
//! result is returned. [`ErrorClass`] tells the request layer how to surface an error.

use std::num::ParseIntError;

use thiserror::Error;

/// Broad category of an error, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller and the filter registry disagree (unknown filter name).
    Configuration,
    /// The caller supplied a value that cannot be parsed.
    InvalidValue,
    /// An upstream producer did not honor its contract (missing attribute or classifier entry).
    ContractViolation,
}

/// Errors raised while evaluating a filter-set against a strategy.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unknown filter '{name}'")]
    UnknownFilter { name: String },

    #[error("filter '{filter}' expects a boolean, got '{value}'")]
    InvalidBoolean { filter: &'static str, value: String },

    #[error("filter '{filter}' expects an integer, got '{value}'")]
    InvalidInteger {
        filter: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("classifier has no '{key}' entry")]
    MissingClassifierKey { key: &'static str },

    #[error("classifier entry '{key}' is not {expected}")]
    ClassifierTypeMismatch {
        key: &'static str,
        expected: &'static str,
    },
}

impl FilterError {
    /// Category of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownFilter { .. } => ErrorClass::Configuration,
            Self::InvalidBoolean { .. } | Self::InvalidInteger { .. } => ErrorClass::InvalidValue,
            Self::MissingClassifierKey { .. } | Self::ClassifierTypeMismatch { .. } => {
                ErrorClass::ContractViolation
            }
        }
    }
}

/// Errors raised while projecting a contest result.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("{record} result has no '{attribute}' attribute")]
    MissingAttribute {
        record: &'static str,
        attribute: &'static str,
    },

    #[error("failed to serialize {record} projection")]
    Serialization {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{record} projection did not serialize to a mapping")]
    NotAMapping { record: &'static str },
}

impl ProjectionError {
    /// Category of this error. Projection failures are always upstream defects.
    pub fn class(&self) -> ErrorClass {
        ErrorClass::ContractViolation
    }
}

/// Errors raised while validating a contest definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Ensure this field has at least {min} elements.")]
    TooFewPlayers { min: usize, found: usize },

    #[error("Ensure this field has exactly {expected} elements.")]
    WrongPlayerCount { expected: usize, found: usize },

    #[error("mode must be exactly 2 characters long, got '{mode}'")]
    InvalidMode { mode: String },
}
