//! Error types for Folio
//!
//! Uses `thiserror` for library errors. Module-level errors
//! (`BlueprintError`, `ComponentError`) convert into `FolioError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::blueprint::BlueprintError;
use crate::component::ComponentError;

/// Result type alias for Folio operations
pub type FolioResult<T> = Result<T, FolioError>;

/// Main error type for Folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    /// A blueprint node could not be built from its configuration
    #[error("{0}")]
    Blueprint(#[from] BlueprintError),

    /// A component could not be set up or resolved
    #[error("{0}")]
    Component(#[from] ComponentError),

    /// Invalid YAML in a blueprint, definition, translation or fixture file
    #[error("invalid YAML in {file}: {message}")]
    InvalidYaml { file: PathBuf, message: String },

    /// Invalid TOML configuration
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Blueprint located in a file that does not belong to a known model kind
    #[error("cannot tell which model '{file}' describes - expected site.yml or pages/, files/, users/")]
    UnknownBlueprintLocation { file: PathBuf },

    /// Ignore file could not be read or parsed
    #[error("invalid ignore pattern in {file}:{line}: {message}")]
    InvalidIgnorePattern {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Model lookup by id failed
    #[error("model not found: {id}")]
    ModelNotFound { id: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
