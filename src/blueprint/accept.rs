//! Upload rules of a file blueprint
//!
//! ```yaml
//! accept: image/jpeg, image/png   # mime list shorthand
//! accept:
//!   extension: jpg, png
//!   type: image
//!   maxsize: 1048576
//! ```

use serde_json::Value;

use super::error::{BlueprintError, BlueprintResult};
use super::factory::{Factory, Node, NodeType, PropDecl, Props};
use crate::model::FileModel;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accept {
    pub mime: Option<Vec<String>>,
    pub extension: Option<Vec<String>>,
    pub types: Option<Vec<String>>,
    pub maxsize: Option<u64>,
    pub minsize: Option<u64>,
    pub maxwidth: Option<u32>,
    pub maxheight: Option<u32>,
    pub minwidth: Option<u32>,
    pub minheight: Option<u32>,
    pub orientation: Option<String>,
}

impl Accept {
    /// `null` / `true` accept anything; a string or list is a mime list.
    pub fn factory(accept: Value) -> BlueprintResult<Self> {
        match accept {
            Value::Null | Value::Bool(true) => Ok(Self::default()),
            Value::Bool(false) => Err(BlueprintError::invalid(
                "Accept",
                "uploads cannot be disabled through accept",
            )),
            Value::String(_) | Value::Array(_) => Ok(Self {
                mime: Some(split_list("mime", accept)?),
                ..Self::default()
            }),
            Value::Object(rules) => Factory::make(rules),
            Value::Number(_) => Err(BlueprintError::invalid_type("Accept", "mime", "string")),
        }
    }

    pub fn accepts_all(&self) -> bool {
        *self == Self::default()
    }

    /// First rule the file breaks, as `(rule, message)`
    pub fn violation(&self, file: &dyn FileModel) -> Option<(&'static str, String)> {
        if let Some(mime) = &self.mime {
            let actual = file.mime();
            if !mime.iter().any(|pattern| mime_matches(pattern, &actual)) {
                return Some(("mime", format!("mime type \"{actual}\" is not allowed")));
            }
        }

        if let Some(extensions) = &self.extension {
            let actual = file.extension();
            if !extensions.iter().any(|e| e.eq_ignore_ascii_case(&actual)) {
                let message = format!("extension \"{actual}\" is not allowed");
                return Some(("extension", message));
            }
        }

        if let Some(types) = &self.types {
            let actual = file.file_type();
            if !types.iter().any(|t| t == actual.as_str()) {
                return Some(("type", format!("file type \"{actual}\" is not allowed")));
            }
        }

        let size = file.size();
        if let Some(max) = self.maxsize.filter(|max| size > *max) {
            return Some(("maxsize", format!("file is larger than {max} bytes")));
        }
        if let Some(min) = self.minsize.filter(|min| size < *min) {
            return Some(("minsize", format!("file is smaller than {min} bytes")));
        }

        let dims = file.dimensions();
        if let Some(max) = self.maxwidth.filter(|max| dims.width > *max) {
            return Some(("maxwidth", format!("width must not exceed {max} pixels")));
        }
        if let Some(max) = self.maxheight.filter(|max| dims.height > *max) {
            return Some(("maxheight", format!("height must not exceed {max} pixels")));
        }
        if let Some(min) = self.minwidth.filter(|min| dims.width < *min) {
            return Some(("minwidth", format!("width must be at least {min} pixels")));
        }
        if let Some(min) = self.minheight.filter(|min| dims.height < *min) {
            return Some(("minheight", format!("height must be at least {min} pixels")));
        }

        if let Some(orientation) = &self.orientation {
            if dims.orientation() != Some(orientation.as_str()) {
                return Some(("orientation", format!("orientation must be {orientation}")));
            }
        }

        None
    }

    pub fn accepts(&self, file: &dyn FileModel) -> bool {
        self.violation(file).is_none()
    }
}

fn mime_matches(pattern: &str, mime: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => mime
            .split_once('/')
            .is_some_and(|(group, _)| group.eq_ignore_ascii_case(prefix)),
        None => pattern == "*" || pattern.eq_ignore_ascii_case(mime),
    }
}

/// Comma separated string or list of strings
fn split_list(property: &'static str, value: Value) -> BlueprintResult<Vec<String>> {
    let items = match value {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.trim().to_string()),
                _ => Err(BlueprintError::invalid_type("Accept", property, "list of strings")),
            })
            .collect::<BlueprintResult<Vec<_>>>()?,
        _ => return Err(BlueprintError::invalid_type("Accept", property, "list of strings")),
    };
    Ok(items)
}

fn take_list(props: &mut Props, name: &'static str) -> BlueprintResult<Option<Vec<String>>> {
    match props.take::<Value>(name)? {
        None => Ok(None),
        Some(value) => split_list(name, value).map(Some),
    }
}

fn not_positive(name: &'static str) -> BlueprintError {
    BlueprintError::invalid_type("Accept", name, "positive integer")
}

fn take_u64(props: &mut Props, name: &'static str) -> BlueprintResult<Option<u64>> {
    let value: Option<i64> = props.take(name)?;
    value
        .map(|n| u64::try_from(n).map_err(|_| not_positive(name)))
        .transpose()
}

fn take_u32(props: &mut Props, name: &'static str) -> BlueprintResult<Option<u32>> {
    let value: Option<i64> = props.take(name)?;
    value
        .map(|n| u32::try_from(n).map_err(|_| not_positive(name)))
        .transpose()
}

impl Node for Accept {
    const NODE: &'static str = "Accept";

    fn properties() -> Vec<PropDecl> {
        vec![
            PropDecl::named("mime", NodeType::Mixed),
            PropDecl::named("extension", NodeType::Mixed),
            PropDecl::named("type", NodeType::Mixed),
            PropDecl::named("maxsize", NodeType::Integer),
            PropDecl::named("minsize", NodeType::Integer),
            PropDecl::named("maxwidth", NodeType::Integer),
            PropDecl::named("maxheight", NodeType::Integer),
            PropDecl::named("minwidth", NodeType::Integer),
            PropDecl::named("minheight", NodeType::Integer),
            PropDecl::named("orientation", NodeType::String),
        ]
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Ok(Self {
            mime: take_list(props, "mime")?,
            extension: take_list(props, "extension")?,
            types: take_list(props, "type")?,
            maxsize: take_u64(props, "maxsize")?,
            minsize: take_u64(props, "minsize")?,
            maxwidth: take_u32(props, "maxwidth")?,
            maxheight: take_u32(props, "maxheight")?,
            minwidth: take_u32(props, "minwidth")?,
            minheight: take_u32(props, "minheight")?,
            orientation: props.take("orientation")?,
        })
    }
}
