//! Final placeholder substitution.

use tera::{Context, Tera};

use crate::model::Definition;
use crate::template::TemplateError;

/// Performs the placeholder substitution left after the body is in place.
///
/// Implementations must be idempotent for the same inputs.
pub trait Replacer {
    fn replace(&self, definition: &Definition, template: &str) -> Result<String, TemplateError>;
}

impl<F> Replacer for F
where
    F: Fn(&Definition, &str) -> Result<String, TemplateError>,
{
    fn replace(&self, definition: &Definition, template: &str) -> Result<String, TemplateError> {
        self(definition, template)
    }
}

/// Renders the composed text as a tera template over the definition's names.
///
/// | variable               | value                                    |
/// |------------------------|------------------------------------------|
/// | `namespaceDeclaration` | `"\nnamespace Foo;\n"`, empty when global |
/// | `namespace`            | `Foo`                                    |
/// | `className`            | `Bar`                                    |
/// | `qualifiedName`        | `Foo\Bar`                                |
///
/// Autoescaping is off; values are inserted verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderReplacer;

impl Replacer for PlaceholderReplacer {
    fn replace(&self, definition: &Definition, template: &str) -> Result<String, TemplateError> {
        Tera::one_off(template, &placeholder_context(definition), false).map_err(|e| {
            TemplateError::Render {
                definition: definition.qualified_name(),
                source: e,
            }
        })
    }
}

/// `namespace Foo;` statement opening a generated unit, empty when global.
pub fn namespace_declaration(definition: &Definition) -> String {
    if definition.namespace.is_empty() {
        String::new()
    } else {
        format!("\nnamespace {};\n", definition.namespace)
    }
}

/// Tera context exposing the definition placeholders.
pub fn placeholder_context(definition: &Definition) -> Context {
    let mut context = Context::new();
    context.insert("namespaceDeclaration", &namespace_declaration(definition));
    context.insert("namespace", &definition.namespace);
    context.insert("className", &definition.name);
    context.insert("qualifiedName", &definition.qualified_name());
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_declaration() {
        let out = PlaceholderReplacer
            .replace(
                &Definition::marker("Foo", "Bar"),
                "{{namespaceDeclaration}}\ninterface {{className}} // {{qualifiedName}} in {{namespace}}\n",
            )
            .unwrap();
        assert_eq!(out, "\nnamespace Foo;\n\ninterface Bar // Foo\\Bar in Foo\n");
    }

    #[test]
    fn test_global_namespace_declaration_is_empty() {
        let out = PlaceholderReplacer
            .replace(&Definition::marker("", "Bar"), "{{namespaceDeclaration}}x")
            .unwrap();
        assert_eq!(out, "x");
    }

    #[test]
    fn test_tera_expressions() {
        let out = PlaceholderReplacer
            .replace(
                &Definition::marker("Foo", "Bar"),
                "{% if namespace %}// in {{ namespace }}{% endif %}\n{{ className | lower }}\n",
            )
            .unwrap();
        assert_eq!(out, "// in Foo\nbar\n");
    }

    #[test]
    fn test_php_text_passes_through() {
        let text = "final class Bar\n{\n    public function a(): array\n    {\n        return ['a' => $this->a];\n    }\n}\n";
        let out = PlaceholderReplacer
            .replace(&Definition::marker("", "Bar"), text)
            .unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_unknown_variable_is_an_error() {
        let err = PlaceholderReplacer
            .replace(&Definition::marker("Foo", "Bar"), "{{ author }}")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render { ref definition, .. } if definition == "Foo\\Bar"));
    }

    #[test]
    fn test_idempotent() {
        let definition = Definition::marker("Foo", "Bar");
        let once = PlaceholderReplacer
            .replace(&definition, "{{namespaceDeclaration}}{{className}}")
            .unwrap();
        let twice = PlaceholderReplacer.replace(&definition, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_closure_replacer() {
        let upper = |_: &Definition, text: &str| -> Result<String, TemplateError> {
            Ok(text.to_uppercase())
        };
        assert_eq!(
            upper.replace(&Definition::marker("", "M"), "abc").unwrap(),
            "ABC"
        );
    }
}
