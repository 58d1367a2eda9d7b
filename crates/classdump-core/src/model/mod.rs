//! Entity model: definitions, constructor alternatives, and typed arguments.
//!
//! Everything here is built once by a front end (or deserialized from a
//! definition document) and read many times during a generation pass. Nothing
//! is mutated after construction.

mod collection;
pub mod document;

pub use collection::{CollectionError, DefinitionCollection};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace separator used in qualified names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// The closed set of definition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    ValueObject,
    Command,
    Event,
    Query,
    Enum,
    Marker,
}

impl DefinitionKind {
    /// Whether this kind generates a payload-carrying message class.
    pub fn is_message(self) -> bool {
        matches!(
            self,
            DefinitionKind::Command | DefinitionKind::Event | DefinitionKind::Query
        )
    }

    /// Stable snake_case identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            DefinitionKind::ValueObject => "value_object",
            DefinitionKind::Command => "command",
            DefinitionKind::Event => "event",
            DefinitionKind::Query => "query",
            DefinitionKind::Enum => "enum",
            DefinitionKind::Marker => "marker",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, optionally typed argument of a constructor alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    /// Opaque type hint copied verbatim into signatures. Empty means untyped.
    #[serde(rename = "type", default)]
    pub type_hint: String,
    #[serde(default)]
    pub nullable: bool,
}

impl Argument {
    pub fn new(name: impl Into<String>, type_hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: type_hint.into(),
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>, type_hint: impl Into<String>) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, type_hint)
        }
    }

    /// Whether a type hint was given.
    pub fn is_typed(&self) -> bool {
        !self.type_hint.is_empty()
    }

    /// Type as written in a parameter or return position (`?int`, `string`, or empty).
    pub fn signature_type(&self) -> String {
        match (self.is_typed(), self.nullable) {
            (false, _) => String::new(),
            (true, true) => format!("?{}", self.type_hint),
            (true, false) => self.type_hint.clone(),
        }
    }
}

/// Scalar shorthand constructors and the argument type they stand for.
const SCALAR_SHORTHANDS: &[(&str, &str)] = &[
    ("String", "string"),
    ("Int", "int"),
    ("Float", "float"),
    ("Bool", "bool"),
];

/// One tagged alternative of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    /// Alternative name, possibly namespace-qualified (`Foo\Baz`).
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl Constructor {
    /// An alternative without declared arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Name segment after the last namespace separator.
    pub fn short_name(&self) -> &str {
        split_qualified(&self.name).1
    }

    /// Arguments after applying the scalar shorthand.
    ///
    /// A `String`, `Int`, `Float` or `Bool` alternative without declared
    /// arguments wraps a single `value` of the matching scalar type.
    pub fn effective_arguments(&self) -> Vec<Argument> {
        if self.arguments.is_empty() {
            if let Some((_, scalar)) = SCALAR_SHORTHANDS
                .iter()
                .find(|(shorthand, _)| *shorthand == self.name)
            {
                return vec![Argument::new("value", *scalar)];
            }
        }
        self.arguments.clone()
    }
}

/// One top-level generated type description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub kind: DefinitionKind,
    /// Empty for the global namespace.
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    /// Overrides the effective message name of message kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_name: Option<String>,
    /// Raw parent reference of a marker, possibly namespace-qualified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_parent: Option<String>,
}

impl Definition {
    pub fn new(
        kind: DefinitionKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
        constructors: Vec<Constructor>,
    ) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
            constructors,
            message_name: None,
            marker_parent: None,
        }
    }

    /// A marker without constructors.
    pub fn marker(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(DefinitionKind::Marker, namespace, name, Vec::new())
    }

    pub fn with_message_name(mut self, message_name: impl Into<String>) -> Self {
        self.message_name = Some(message_name.into());
        self
    }

    pub fn with_marker_parent(mut self, parent: impl Into<String>) -> Self {
        self.marker_parent = Some(parent.into());
        self
    }

    /// `namespace\name`, or `name` in the global namespace.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// Runtime identity string of a message class: the override, else the
    /// global-qualified `\namespace\name`, else the bare name.
    pub fn effective_message_name(&self) -> String {
        match &self.message_name {
            Some(name) => name.clone(),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{NAMESPACE_SEPARATOR}{}", self.qualified_name()),
        }
    }

    /// Number of dumper fragments this definition renders into.
    pub fn fragment_count(&self) -> usize {
        match self.kind {
            DefinitionKind::ValueObject => self.constructors.len().max(1),
            _ => 1,
        }
    }
}

/// Join a namespace and a name with the namespace separator.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
    }
}

/// Split a qualified name into `(namespace, name)` at the last separator.
pub fn split_qualified(qualified: &str) -> (&str, &str) {
    match qualified.rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => (&qualified[..idx], &qualified[idx + 1..]),
        None => ("", qualified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let def = Definition::marker("Foo\\Bar", "Baz");
        assert_eq!(def.qualified_name(), "Foo\\Bar\\Baz");
        assert_eq!(Definition::marker("", "Baz").qualified_name(), "Baz");
    }

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("Foo\\Bar\\Baz"), ("Foo\\Bar", "Baz"));
        assert_eq!(split_qualified("Baz"), ("", "Baz"));
    }

    #[test]
    fn test_effective_message_name() {
        let cmd = Definition::new(DefinitionKind::Command, "App", "Register", vec![]);
        assert_eq!(cmd.effective_message_name(), "\\App\\Register");

        let nested = Definition::new(DefinitionKind::Query, "App\\Read", "User", vec![]);
        assert_eq!(nested.effective_message_name(), "\\App\\Read\\User");

        let global = Definition::new(DefinitionKind::Event, "", "Registered", vec![]);
        assert_eq!(global.effective_message_name(), "Registered");

        let overridden = cmd.with_message_name("register-user");
        assert_eq!(overridden.effective_message_name(), "register-user");
    }

    #[test]
    fn test_scalar_shorthand() {
        let args = Constructor::new("String").effective_arguments();
        assert_eq!(args, vec![Argument::new("value", "string")]);

        let explicit =
            Constructor::with_arguments("String", vec![Argument::new("raw", "string")]);
        assert_eq!(explicit.effective_arguments()[0].name, "raw");

        assert!(Constructor::new("Foo\\Baz").effective_arguments().is_empty());
    }

    #[test]
    fn test_signature_type() {
        assert_eq!(Argument::new("a", "int").signature_type(), "int");
        assert_eq!(Argument::nullable("a", "int").signature_type(), "?int");
        assert_eq!(Argument::nullable("a", "").signature_type(), "");
    }

    #[test]
    fn test_fragment_count() {
        let vo = Definition::new(
            DefinitionKind::ValueObject,
            "Foo",
            "Bar",
            vec![Constructor::new("Foo\\Bar"), Constructor::new("Foo\\Baz")],
        );
        assert_eq!(vo.fragment_count(), 2);
        assert_eq!(Definition::marker("Foo", "M").fragment_count(), 1);
    }

    #[test]
    fn test_kind_deserializes_snake_case() {
        let kind: DefinitionKind = serde_yaml::from_str("value_object").unwrap();
        assert_eq!(kind, DefinitionKind::ValueObject);
        assert_eq!(kind.to_string(), "value_object");
    }
}
