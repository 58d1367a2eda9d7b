//! Command handlers for the classdump CLI
//!
//! Each module handles one subcommand; shared setup turns the CLI config into
//! core collaborators.

pub(crate) mod check;
pub(crate) mod generate;

pub(crate) use check::handle_check_command;
pub(crate) use generate::handle_generate_command;

use std::path::Path;

use anyhow::Context;
use classdump_core::model::document::parse_document;
use classdump_core::{
    BuiltinTemplates, Definition, DefinitionCollection, DirectoryTemplates, ExternalMarkers,
    GenerateOptions, Psr4Locator, Template, TemplateError, TemplateLoader,
};

use crate::cli_config::{expand_path, CliConfig};

/// Template source selected by configuration.
#[derive(Debug)]
pub(crate) enum Templates {
    Builtin(BuiltinTemplates),
    Directory(DirectoryTemplates),
}

impl TemplateLoader for Templates {
    fn load(&self, definition: &Definition) -> Result<Template, TemplateError> {
        match self {
            Templates::Builtin(templates) => templates.load(definition),
            Templates::Directory(templates) => templates.load(definition),
        }
    }
}

pub(crate) fn load_definitions(path: &Path) -> anyhow::Result<DefinitionCollection> {
    let collection = parse_document(path)
        .with_context(|| format!("Failed to load definitions from '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), definitions = collection.len(), "Loaded definitions");
    Ok(collection)
}

pub(crate) fn generate_options(config: &CliConfig) -> GenerateOptions {
    let mut external_markers = ExternalMarkers::default();
    external_markers.extend(&config.external_markers);
    GenerateOptions {
        external_markers,
        messages: config.messages.clone(),
        layout: config.layout,
    }
}

pub(crate) fn templates(config: &CliConfig) -> anyhow::Result<Templates> {
    match &config.template_dir {
        Some(dir) => {
            let dir = expand_path(dir);
            let templates = DirectoryTemplates::load(&dir)
                .with_context(|| format!("Failed to load templates from '{}'", dir.display()))?;
            tracing::debug!(
                dir = %templates.dir().display(),
                templates = ?templates.template_names(),
                "Using template directory"
            );
            Ok(Templates::Directory(templates))
        }
        None => Ok(Templates::Builtin(BuiltinTemplates)),
    }
}

/// PSR-4 locator rooted at `out_dir`; relative configured paths resolve
/// against it.
pub(crate) fn locator(config: &CliConfig, out_dir: &Path) -> Psr4Locator {
    let fallback = config
        .fallback_dir
        .as_deref()
        .map(|dir| out_dir.join(expand_path(dir)))
        .unwrap_or_else(|| out_dir.to_path_buf());

    config
        .psr4
        .iter()
        .fold(Psr4Locator::new(fallback), |locator, (prefix, dir)| {
            locator.with_prefix(prefix, out_dir.join(expand_path(dir)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use classdump_core::OutputLayout;

    #[test]
    fn test_locator_resolves_against_out_dir() {
        let config: CliConfig = toml::from_str(
            r#"
fallback-dir = "generated"

[psr4]
"App\\" = "src"
"Abs\\" = "/opt/abs"
"#,
        )
        .unwrap();
        let locator = locator(&config, Path::new("/work"));

        assert_eq!(
            locator.locate_class("App\\Model\\User"),
            PathBuf::from("/work/src/Model/User.php")
        );
        assert_eq!(
            locator.locate_class("Abs\\Thing"),
            PathBuf::from("/opt/abs/Thing.php")
        );
        assert_eq!(
            locator.locate_class("Other\\Thing"),
            PathBuf::from("/work/generated/Other/Thing.php")
        );
    }

    #[test]
    fn test_generate_options_extend_external_markers() {
        let config: CliConfig =
            toml::from_str("external-markers = [\"\\\\Psr\\\\Log\\\\LoggerAwareInterface\"]\n")
                .unwrap();
        let options = generate_options(&config);

        assert!(options
            .external_markers
            .contains("Psr\\Log\\LoggerAwareInterface"));
        assert!(options.external_markers.contains("Countable"));
        assert_eq!(options.layout, OutputLayout::PerDefinition);
    }

    #[test]
    fn test_generate_options_layout() {
        let config: CliConfig = toml::from_str("layout = \"per-class\"\n").unwrap();
        assert_eq!(generate_options(&config).layout, OutputLayout::PerClass);
    }

    #[test]
    fn test_builtin_templates_without_template_dir() {
        let templates = templates(&CliConfig::default()).unwrap();
        assert!(matches!(templates, Templates::Builtin(_)));
    }
}
