//! Model options (permissions declared in a blueprint)
//!
//! Each option is either a flat boolean or a per-role map with an optional
//! `*` wildcard:
//!
//! ```yaml
//! options:
//!   changeSlug: false
//!   delete:
//!     admin: true
//!     "*": false
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::error::{BlueprintError, BlueprintResult};
use super::node::WILDCARD;
use crate::model::ModelKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOption {
    Allowed(bool),
    Roles(BTreeMap<String, bool>),
}

impl Default for ModelOption {
    fn default() -> Self {
        ModelOption::Allowed(true)
    }
}

impl ModelOption {
    pub fn factory(option: Value) -> BlueprintResult<Self> {
        match option {
            Value::Null => Ok(Self::default()),
            Value::Bool(allowed) => Ok(ModelOption::Allowed(allowed)),
            Value::Object(roles) => {
                let mut resolved = BTreeMap::new();
                for (role, allowed) in roles {
                    let Value::Bool(allowed) = allowed else {
                        return Err(BlueprintError::invalid_type("ModelOption", role, "bool"));
                    };
                    resolved.insert(role, allowed);
                }
                Ok(ModelOption::Roles(resolved))
            }
            _ => Err(BlueprintError::invalid(
                "ModelOption",
                "expected a boolean or a map of roles",
            )),
        }
    }

    /// Role entry, then wildcard, then denied.
    pub fn resolve(&self, role: &str) -> bool {
        match self {
            ModelOption::Allowed(allowed) => *allowed,
            ModelOption::Roles(roles) => roles
                .get(role)
                .or_else(|| roles.get(WILDCARD))
                .copied()
                .unwrap_or(false),
        }
    }

    pub fn render(&self) -> Value {
        match self {
            ModelOption::Allowed(allowed) => Value::Bool(*allowed),
            ModelOption::Roles(roles) => Value::Object(
                roles
                    .iter()
                    .map(|(role, allowed)| (role.clone(), Value::Bool(*allowed)))
                    .collect(),
            ),
        }
    }
}

fn option_entries(node: &'static str, options: Value) -> BlueprintResult<Map<String, Value>> {
    match options {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(BlueprintError::invalid(node, "expected a map of options")),
    }
}

macro_rules! model_options {
    ($(#[$meta:meta])* $name:ident { $($field:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: ModelOption,)+
        }

        impl $name {
            /// Option names as written in blueprints
            pub const ACTIONS: &'static [&'static str] = &[$($key),+];

            /// `null` gives defaults, `true` / `false` applies to every option.
            pub fn factory(options: Value) -> BlueprintResult<Self> {
                if let Value::Bool(allowed) = options {
                    return Ok(Self {
                        $($field: ModelOption::Allowed(allowed),)+
                    });
                }

                let mut entries = option_entries(stringify!($name), options)?;
                let options = Self {
                    $($field: ModelOption::factory(entries.remove($key).unwrap_or(Value::Null))?,)+
                };

                if let Some((unknown, _)) = entries.into_iter().next() {
                    return Err(BlueprintError::UnknownProperty {
                        node: stringify!($name),
                        property: unknown,
                    });
                }
                Ok(options)
            }

            pub fn entries(&self) -> Vec<(&'static str, &ModelOption)> {
                vec![$(($key, &self.$field)),+]
            }
        }
    };
}

model_options! {
    /// Options of a page blueprint
    PageOptions {
        change_slug => "changeSlug",
        change_status => "changeStatus",
        change_template => "changeTemplate",
        change_title => "changeTitle",
        create => "create",
        delete => "delete",
        duplicate => "duplicate",
        preview => "preview",
        read => "read",
        update => "update",
    }
}

model_options! {
    /// Options of a file blueprint
    FileOptions {
        change_name => "changeName",
        create => "create",
        delete => "delete",
        read => "read",
        replace => "replace",
        sort => "sort",
        update => "update",
    }
}

model_options! {
    /// Options of the site blueprint
    SiteOptions {
        change_title => "changeTitle",
        update => "update",
    }
}

model_options! {
    /// Options of a user blueprint
    UserOptions {
        change_email => "changeEmail",
        change_language => "changeLanguage",
        change_name => "changeName",
        change_password => "changePassword",
        change_role => "changeRole",
        create => "create",
        delete => "delete",
        update => "update",
    }
}

/// Options of a blueprint of any model kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOptions {
    Site(SiteOptions),
    Page(PageOptions),
    File(FileOptions),
    User(UserOptions),
}

impl ModelOptions {
    pub fn factory(kind: ModelKind, options: Value) -> BlueprintResult<Self> {
        Ok(match kind {
            ModelKind::Site => ModelOptions::Site(SiteOptions::factory(options)?),
            ModelKind::Page => ModelOptions::Page(PageOptions::factory(options)?),
            ModelKind::File => ModelOptions::File(FileOptions::factory(options)?),
            ModelKind::User => ModelOptions::User(UserOptions::factory(options)?),
        })
    }

    pub fn default_for(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Site => ModelOptions::Site(SiteOptions::default()),
            ModelKind::Page => ModelOptions::Page(PageOptions::default()),
            ModelKind::File => ModelOptions::File(FileOptions::default()),
            ModelKind::User => ModelOptions::User(UserOptions::default()),
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, &ModelOption)> {
        match self {
            ModelOptions::Site(o) => o.entries(),
            ModelOptions::Page(o) => o.entries(),
            ModelOptions::File(o) => o.entries(),
            ModelOptions::User(o) => o.entries(),
        }
    }

    pub fn get(&self, action: &str) -> Option<&ModelOption> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == action)
            .map(|(_, option)| option)
    }

    /// Permission flags for a role, in declaration order
    pub fn resolve(&self, role: &str) -> Vec<(String, bool)> {
        self.entries()
            .into_iter()
            .map(|(name, option)| (name.to_string(), option.resolve(role)))
            .collect()
    }

    pub fn render(&self) -> Map<String, Value> {
        self.entries()
            .into_iter()
            .map(|(name, option)| (name.to_string(), option.render()))
            .collect()
    }
}
