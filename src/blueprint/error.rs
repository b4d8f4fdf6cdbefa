//! Blueprint errors

use thiserror::Error;

pub type BlueprintResult<T> = Result<T, BlueprintError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlueprintError {
    #[error("unknown property '{property}' for {node}")]
    UnknownProperty {
        node: &'static str,
        property: String,
    },

    #[error("invalid value for '{property}' of {node}: expected {expected}")]
    InvalidType {
        node: &'static str,
        property: String,
        expected: &'static str,
    },

    #[error("missing required property '{property}' for {node}")]
    MissingProperty {
        node: &'static str,
        property: String,
    },

    #[error("unknown section type '{kind}' for section '{id}'")]
    UnknownSectionType { id: String, kind: String },

    #[error("unknown field type '{kind}' for field '{id}'")]
    UnknownFieldType { id: String, kind: String },

    #[error("invalid {node}: {message}")]
    Invalid {
        node: &'static str,
        message: String,
    },
}

impl BlueprintError {
    pub(crate) fn invalid_type(
        node: &'static str,
        property: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidType {
            node,
            property: property.into(),
            expected,
        }
    }

    pub(crate) fn invalid(node: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            node,
            message: message.into(),
        }
    }
}
