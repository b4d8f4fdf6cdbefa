//! Component errors

use std::path::PathBuf;

use thiserror::Error;

pub type ComponentResult<T> = Result<T, ComponentError>;

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Undefined component type: {0}")]
    UndefinedType(String),

    #[error("Please provide a value for \"{0}\"")]
    MissingValue(String),

    #[error("Invalid value for \"{0}\"")]
    InvalidValue(String),

    #[error("Component definition {} does not exist", path.display())]
    MissingDefinition { path: PathBuf },

    #[error("invalid component definition '{name}': {message}")]
    InvalidDefinition { name: String, message: String },

    #[error("component registry lock poisoned")]
    RegistryPoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure raised by a prop function, rewrapped with the prop name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PropError {
    #[error("no value provided")]
    Missing,

    #[error("expected {expected}")]
    InvalidType { expected: &'static str },
}

impl PropError {
    pub(crate) fn for_prop(self, name: &str) -> ComponentError {
        match self {
            PropError::Missing => ComponentError::MissingValue(name.to_string()),
            PropError::InvalidType { .. } => ComponentError::InvalidValue(name.to_string()),
        }
    }
}
