//! Blueprint sections
//!
//! Sections fill the columns of a blueprint tab.
//!
//! ```text
//! SectionBase ─┬─ DisplaySection ── InfoSection
//!              ├─ ModelsSection ─┬─ FilesSection
//!              │                 └─ PagesSection
//!              └─ FieldsSection
//! ```

mod display;
mod fields;
mod models;

pub use display::{DisplaySection, InfoSection, InfoSectionTheme};
pub use fields::FieldsSection;
pub use models::{FilesSection, ItemSize, Layout, ModelsSection, PagesSection};

use std::fmt;

use serde_json::{Map, Value};

use crate::blueprint::{BlueprintError, BlueprintResult, Factory, NodeType, PropDecl, Props};
use crate::field::Field;
use crate::render::RenderContext;

pub trait Section: fmt::Debug {
    fn base(&self) -> &SectionBase;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn section_type(&self) -> &'static str {
        self.base().section_type
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value>;

    /// Fields edited in this section
    fn fields(&self) -> &[Box<dyn Field>] {
        &[]
    }
}

pub const SECTION_TYPES: &[&str] = &[
    InfoSection::TYPE,
    FieldsSection::TYPE,
    FilesSection::TYPE,
    PagesSection::TYPE,
];

/// Build a section from its blueprint definition; the type defaults to the id.
pub fn section_from(id: &str, definition: Value) -> BlueprintResult<Box<dyn Section>> {
    let mut props = match definition {
        Value::Null | Value::Bool(true) => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(BlueprintError::invalid(
                "Section",
                format!("definition of '{id}' must be a map"),
            ))
        }
    };

    let kind = match props.get("type") {
        None | Some(Value::Null) => id.to_string(),
        Some(Value::String(kind)) => kind.clone(),
        Some(_) => return Err(BlueprintError::invalid_type("Section", "type", "string")),
    };
    props.insert("id".into(), Value::String(id.to_string()));
    props.insert("type".into(), Value::String(kind.clone()));

    Ok(match kind.as_str() {
        InfoSection::TYPE => Box::new(Factory::make::<InfoSection>(props)?),
        FieldsSection::TYPE => Box::new(Factory::make::<FieldsSection>(props)?),
        FilesSection::TYPE => Box::new(Factory::make::<FilesSection>(props)?),
        PagesSection::TYPE => Box::new(Factory::make::<PagesSection>(props)?),
        _ => {
            return Err(BlueprintError::UnknownSectionType {
                id: id.to_string(),
                kind,
            })
        }
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionBase {
    pub id: String,
    pub section_type: &'static str,
}

impl SectionBase {
    pub const PROPERTIES: &'static [PropDecl] = &[
        PropDecl::named("id", NodeType::String),
        PropDecl::named("type", NodeType::String),
    ];

    pub fn construct(props: &mut Props, section_type: &'static str) -> BlueprintResult<Self> {
        let id = props.require("id")?;
        let _declared: Option<String> = props.take("type")?;
        Ok(Self { id, section_type })
    }

    pub fn render(&self) -> Map<String, Value> {
        let mut section = Map::new();
        section.insert("id".into(), self.id.clone().into());
        section.insert("type".into(), self.section_type.into());
        section
    }
}

#[cfg(test)]
mod tests;
