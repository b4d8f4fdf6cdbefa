//! Field values
//!
//! Each input field owns a value validator that checks submitted content
//! and normalizes it for storage.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValueError {
    #[error("Please enter a value")]
    Required,

    #[error("Please enter a valid {expected}")]
    InvalidType { expected: &'static str },

    #[error("Please enter at least {min} characters")]
    TooShort { min: usize },

    #[error("Please enter no more than {max} characters")]
    TooLong { max: usize },

    #[error("Please enter a value of at least {min}")]
    TooSmall { min: f64 },

    #[error("Please enter a value of no more than {max}")]
    TooLarge { max: f64 },

    #[error("Please enter a multiple of {step}")]
    Step { step: f64 },

    #[error("Please add at least {min} entries")]
    TooFew { min: usize },

    #[error("Please add no more than {max} entries")]
    TooMany { max: usize },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

pub type ValueResult<T> = Result<T, ValueError>;

/// Validation and storage rules of one field's value
pub trait FieldValue {
    /// Check a (submitted) value; `null` means empty.
    fn validate(&self, value: &Value) -> ValueResult<()>;

    /// Normalize a submitted value for storage.
    fn submit(&self, value: Value) -> ValueResult<Value> {
        self.validate(&value)?;
        Ok(value)
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringValue {
    pub maxlength: Option<usize>,
    pub minlength: Option<usize>,
    pub required: bool,
}

impl FieldValue for StringValue {
    fn validate(&self, value: &Value) -> ValueResult<()> {
        if is_empty(value) {
            return if self.required {
                Err(ValueError::Required)
            } else {
                Ok(())
            };
        }
        let Value::String(text) = value else {
            return Err(ValueError::InvalidType { expected: "text" });
        };

        // Lengths apply to the stored (trimmed) text.
        let len = text.trim().chars().count();
        if let Some(min) = self.minlength.filter(|min| len < *min) {
            return Err(ValueError::TooShort { min });
        }
        if let Some(max) = self.maxlength.filter(|max| len > *max) {
            return Err(ValueError::TooLong { max });
        }
        Ok(())
    }

    fn submit(&self, value: Value) -> ValueResult<Value> {
        self.validate(&value)?;
        Ok(match value {
            Value::String(text) => Value::String(text.trim().to_string()),
            other => other,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberValue {
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub step: Option<f64>,
    pub required: bool,
}

impl NumberValue {
    /// Numbers and numeric strings
    fn number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FieldValue for NumberValue {
    fn validate(&self, value: &Value) -> ValueResult<()> {
        if is_empty(value) {
            return if self.required {
                Err(ValueError::Required)
            } else {
                Ok(())
            };
        }
        let invalid = ValueError::InvalidType { expected: "number" };
        let number = Self::number(value).ok_or(invalid)?;

        if let Some(min) = self.min.filter(|min| number < *min) {
            return Err(ValueError::TooSmall { min });
        }
        if let Some(max) = self.max.filter(|max| number > *max) {
            return Err(ValueError::TooLarge { max });
        }
        if let Some(step) = self.step.filter(|step| *step > 0.0) {
            let offset = (number - self.min.unwrap_or(0.0)) / step;
            if (offset - offset.round()).abs() > 1e-9 {
                return Err(ValueError::Step { step });
            }
        }
        Ok(())
    }

    fn submit(&self, value: Value) -> ValueResult<Value> {
        self.validate(&value)?;
        if is_empty(&value) {
            return Ok(Value::Null);
        }
        Ok(Self::number(&value)
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number))
    }
}

/// JSON list stored as a string (blocks, structures)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonValue {
    pub max: Option<usize>,
    pub min: Option<usize>,
    pub pretty: bool,
    pub required: bool,
}

impl JsonValue {
    /// Accept a decoded value or its JSON string
    fn decode(value: &Value) -> ValueResult<Value> {
        match value {
            Value::String(raw) if raw.trim().is_empty() => Ok(Value::Array(Vec::new())),
            Value::String(raw) => {
                serde_json::from_str(raw).map_err(|e| ValueError::InvalidJson(e.to_string()))
            }
            Value::Null => Ok(Value::Array(Vec::new())),
            other => Ok(other.clone()),
        }
    }
}

impl FieldValue for JsonValue {
    fn validate(&self, value: &Value) -> ValueResult<()> {
        let decoded = Self::decode(value)?;
        let count = match &decoded {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => return Err(ValueError::InvalidType { expected: "list" }),
        };

        if count == 0 && self.required {
            return Err(ValueError::Required);
        }
        if let Some(min) = self.min.filter(|min| count > 0 && count < *min) {
            return Err(ValueError::TooFew { min });
        }
        if let Some(max) = self.max.filter(|max| count > *max) {
            return Err(ValueError::TooMany { max });
        }
        Ok(())
    }

    /// Encoded JSON string, pretty printed when configured
    fn submit(&self, value: Value) -> ValueResult<Value> {
        self.validate(&value)?;
        let decoded = Self::decode(&value)?;
        let encoded = if self.pretty {
            serde_json::to_string_pretty(&decoded)
        } else {
            serde_json::to_string(&decoded)
        }
        .map_err(|e| ValueError::InvalidJson(e.to_string()))?;
        Ok(Value::String(encoded))
    }
}

/// Rich text stored as HTML
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlValue {
    pub required: bool,
}

impl HtmlValue {
    fn text_content(html: &str) -> String {
        let mut text = String::with_capacity(html.len());
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => text.push(c),
                _ => {}
            }
        }
        text
    }
}

impl FieldValue for HtmlValue {
    fn validate(&self, value: &Value) -> ValueResult<()> {
        let html = match value {
            Value::Null => "",
            Value::String(html) => html.as_str(),
            _ => return Err(ValueError::InvalidType { expected: "text" }),
        };
        if self.required && Self::text_content(html).trim().is_empty() {
            return Err(ValueError::Required);
        }
        Ok(())
    }

    fn submit(&self, value: Value) -> ValueResult<Value> {
        self.validate(&value)?;
        Ok(match value {
            Value::String(html) => Value::String(html.trim().to_string()),
            other => other,
        })
    }
}
