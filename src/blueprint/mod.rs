//! Blueprints
//!
//! Typed configuration trees built from YAML documents:
//!
//! - `factory` - declared conversion tables from raw values to nodes
//! - `node` - translatable strings, templates and URLs
//! - `image`, `options`, `accept` - composite configuration values
//! - `document` - blueprint, tab and column nodes
//! - `loader` - blueprint directories

pub mod accept;
pub mod document;
pub mod error;
pub mod factory;
pub mod ignore;
pub mod image;
pub mod loader;
pub mod node;
pub mod options;

pub use accept::Accept;
pub use document::{Blueprint, Column, Tab, FULL_WIDTH, MAIN_TAB};
pub use error::{BlueprintError, BlueprintResult};
pub use factory::{Factory, FactoryFn, FromProp, Node, NodeType, Prop, PropDecl, PropType, Props};
pub use ignore::{IgnorePatterns, IGNORE_FILE};
pub use image::BlueprintImage;
pub use loader::{check_dir, locate, BlueprintSet, CheckEntry, DEFAULT_NAME};
pub(crate) use node::enum_property;
pub use node::{NodeI18n, NodeKirbytext, NodeProperty, NodeText, NodeUrl, Property, WILDCARD};
pub use options::{FileOptions, ModelOption, ModelOptions, PageOptions, SiteOptions, UserOptions};
