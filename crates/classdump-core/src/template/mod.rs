//! Class and body templates, and the loaders that provide them.
//!
//! A [`Template`] pairs one class template, which holds the body
//! placeholder, with one body template per dumper fragment. Body templates
//! receive their fragment at the fragment placeholder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::model::{Definition, DefinitionKind};

/// Token in a class template replaced by the joined body, newline included.
pub const BODY_PLACEHOLDER: &str = "        {{body}}\n";

/// Token in a body template replaced by one dumper fragment.
pub const FRAGMENT_PLACEHOLDER: &str = "{{fragment}}";

const CLASS_TEMPLATE: &str = "{{namespaceDeclaration}}        {{body}}\n";
/// Message dumpers wrap their own namespace block.
const MESSAGE_CLASS_TEMPLATE: &str = "        {{body}}\n";

const ALL_KINDS: [DefinitionKind; 6] = [
    DefinitionKind::ValueObject,
    DefinitionKind::Command,
    DefinitionKind::Event,
    DefinitionKind::Query,
    DefinitionKind::Enum,
    DefinitionKind::Marker,
];

/// Templates for one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub class_template: String,
    pub body_templates: Vec<String>,
}

/// Error while loading templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("class template '{}' has no body placeholder", path.display())]
    MissingBodyPlaceholder { path: PathBuf },

    #[error("failed to load templates from {}: {source}", dir.display())]
    Tera { dir: PathBuf, source: tera::Error },

    #[error("failed to render template for {definition}: {source}")]
    Render {
        definition: String,
        source: tera::Error,
    },
}

/// Provides the templates for a definition.
pub trait TemplateLoader {
    fn load(&self, definition: &Definition) -> Result<Template, TemplateError>;
}

impl<F> TemplateLoader for F
where
    F: Fn(&Definition) -> Result<Template, TemplateError>,
{
    fn load(&self, definition: &Definition) -> Result<Template, TemplateError> {
        self(definition)
    }
}

/// In-memory templates for every kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn class_template(kind: DefinitionKind) -> &'static str {
        if kind.is_message() {
            MESSAGE_CLASS_TEMPLATE
        } else {
            CLASS_TEMPLATE
        }
    }
}

impl TemplateLoader for BuiltinTemplates {
    fn load(&self, definition: &Definition) -> Result<Template, TemplateError> {
        Ok(Template {
            class_template: Self::class_template(definition.kind).to_string(),
            body_templates: vec![FRAGMENT_PLACEHOLDER.to_string(); definition.fragment_count()],
        })
    }
}

#[derive(Debug, Clone, Default)]
struct KindOverrides {
    class_template: Option<String>,
    body_template: Option<String>,
}

/// Templates read from a directory, per kind, falling back to the built-ins.
///
/// Every `*.php` file of the directory is parsed as a tera template when the
/// directory is loaded, so syntax errors surface before generation starts.
/// Recognized files are `<kind>.class.php` and `<kind>.body.php`, where
/// `<kind>` is the snake_case kind name (`value_object.class.php`).
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    dir: PathBuf,
    tera: Tera,
    overrides: HashMap<DefinitionKind, KindOverrides>,
}

impl DirectoryTemplates {
    /// Parse and register every override present in `dir`.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let glob_pattern = dir.join("*.php").to_string_lossy().to_string();
        let tera = Tera::new(&glob_pattern).map_err(|e| TemplateError::Tera {
            dir: dir.to_path_buf(),
            source: e,
        })?;

        let mut overrides = HashMap::new();
        for kind in ALL_KINDS {
            let class_name = format!("{kind}.class.php");
            let class_template = read_registered(&tera, dir, &class_name)?;
            if let Some(class_template) = &class_template {
                if !class_template.contains(BODY_PLACEHOLDER) {
                    return Err(TemplateError::MissingBodyPlaceholder {
                        path: dir.join(class_name),
                    });
                }
            }
            let body_template = read_registered(&tera, dir, &format!("{kind}.body.php"))?;

            if class_template.is_some() || body_template.is_some() {
                tracing::debug!(%kind, dir = %dir.display(), "Using template overrides");
                overrides.insert(
                    kind,
                    KindOverrides {
                        class_template,
                        body_template,
                    },
                );
            }
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            tera,
            overrides,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all templates parsed from the directory.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Whether any template of `kind` comes from the directory.
    pub fn overrides(&self, kind: DefinitionKind) -> bool {
        self.overrides.contains_key(&kind)
    }
}

impl TemplateLoader for DirectoryTemplates {
    fn load(&self, definition: &Definition) -> Result<Template, TemplateError> {
        let mut template = BuiltinTemplates.load(definition)?;
        if let Some(kind) = self.overrides.get(&definition.kind) {
            if let Some(class_template) = &kind.class_template {
                template.class_template = class_template.clone();
            }
            if let Some(body_template) = &kind.body_template {
                template.body_templates = vec![body_template.clone(); definition.fragment_count()];
            }
        }
        Ok(template)
    }
}

/// Source text of `name` when tera registered it from `dir`.
///
/// The text is kept verbatim: the body placeholder line is spliced textually
/// before the composed unit is rendered.
fn read_registered(tera: &Tera, dir: &Path, name: &str) -> Result<Option<String>, TemplateError> {
    if !tera.get_template_names().any(|registered| registered == name) {
        return Ok(None);
    }
    let path = dir.join(name);
    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| TemplateError::Io { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Constructor;
    use std::fs;

    fn value_object(alternatives: usize) -> Definition {
        let constructors = (0..alternatives)
            .map(|i| Constructor::new(format!("Foo\\Alt{i}")))
            .collect();
        Definition::new(DefinitionKind::ValueObject, "Foo", "Bar", constructors)
    }

    #[test]
    fn test_builtin_body_template_count() {
        assert_eq!(BuiltinTemplates.load(&value_object(0)).unwrap().body_templates.len(), 1);
        assert_eq!(BuiltinTemplates.load(&value_object(3)).unwrap().body_templates.len(), 3);

        let marker = BuiltinTemplates.load(&Definition::marker("Foo", "M")).unwrap();
        assert_eq!(marker.body_templates, vec![FRAGMENT_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_builtin_class_templates_hold_body_placeholder() {
        for kind in ALL_KINDS {
            assert!(BuiltinTemplates::class_template(kind).contains(BODY_PLACEHOLDER));
        }
        assert!(!BuiltinTemplates::class_template(DefinitionKind::Command)
            .contains("{{namespaceDeclaration}}"));
    }

    #[test]
    fn test_closure_loader() {
        let loader = |_: &Definition| -> Result<Template, TemplateError> {
            Ok(Template {
                class_template: BODY_PLACEHOLDER.to_string(),
                body_templates: vec![],
            })
        };
        let template = loader.load(&Definition::marker("", "M")).unwrap();
        assert!(template.body_templates.is_empty());
    }

    #[test]
    fn test_directory_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("marker.class.php"),
            "// marker {{className}}\n        {{body}}\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("value_object.body.php"),
            "/** generated */\n{{fragment}}",
        )
        .unwrap();
        fs::write(dir.path().join("README.md"), "not a template").unwrap();

        let templates = DirectoryTemplates::load(dir.path()).unwrap();
        assert!(templates.overrides(DefinitionKind::Marker));
        assert!(templates.overrides(DefinitionKind::ValueObject));
        assert!(!templates.overrides(DefinitionKind::Enum));

        let marker = templates.load(&Definition::marker("Foo", "M")).unwrap();
        assert_eq!(marker.class_template, "// marker {{className}}\n        {{body}}\n");
        assert_eq!(marker.body_templates, vec![FRAGMENT_PLACEHOLDER.to_string()]);

        let vo = templates.load(&value_object(2)).unwrap();
        assert_eq!(vo.class_template, CLASS_TEMPLATE);
        assert_eq!(vo.body_templates.len(), 2);
        assert!(vo.body_templates[1].starts_with("/** generated */"));
    }

    #[test]
    fn test_directory_rejects_class_template_without_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("enum.class.php"), "{{body}}").unwrap();

        let result = DirectoryTemplates::load(dir.path());
        assert!(matches!(
            result,
            Err(TemplateError::MissingBodyPlaceholder { .. })
        ));
    }

    #[test]
    fn test_empty_directory_uses_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let templates = DirectoryTemplates::load(dir.path()).unwrap();
        let definition = value_object(1);
        assert_eq!(
            templates.load(&definition).unwrap(),
            BuiltinTemplates.load(&definition).unwrap()
        );
    }

    #[test]
    fn test_directory_registers_templates_with_tera() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("enum.body.php"), "// {{ className }}\n{{fragment}}").unwrap();
        fs::write(dir.path().join("shared.php"), "{# partial #}").unwrap();

        let templates = DirectoryTemplates::load(dir.path()).unwrap();
        assert_eq!(templates.template_names(), vec!["enum.body.php", "shared.php"]);
        assert!(templates.overrides(DefinitionKind::Enum));
        assert!(!templates.overrides(DefinitionKind::Marker));
    }

    #[test]
    fn test_directory_rejects_tera_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("marker.body.php"), "{% if %}{{fragment}}").unwrap();

        let result = DirectoryTemplates::load(dir.path());
        assert!(matches!(result, Err(TemplateError::Tera { .. })));
    }
}
