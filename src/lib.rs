//! Folio - blueprint schemas and Panel view models for a content management system
//!
//! Blueprints describe how content models (site, pages, files, users) are
//! edited. Folio normalizes blueprint configuration into typed nodes, fields
//! and sections, renders them into ordered JSON for the Panel, and builds the
//! Panel's file view from a content model. A small component runtime resolves
//! props and computed values from YAML definitions.

pub mod blueprint;
pub mod component;
pub mod config;
pub mod error;
pub mod field;
pub mod i18n;
pub mod merge;
pub mod model;
pub mod panel;
pub mod render;
pub mod section;
pub mod yaml;

// Re-exports for convenience
pub use blueprint::{Blueprint, BlueprintError, BlueprintSet, Factory};
pub use component::{Component, ComponentError, ComponentRegistry, Definition};
pub use config::{Config, ConfigWarning};
pub use error::{FolioError, FolioResult};
pub use i18n::I18n;
pub use model::memory::MemoryStore;
pub use model::{ContentModel, FileModel, ModelKind};
pub use panel::{FileView, PanelContext};
pub use render::RenderContext;
