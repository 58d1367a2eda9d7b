//! Generation pass: compose templates with dumper output for every definition.
//!
//! The pass is all-or-nothing. Markers are validated before anything is
//! rendered, and any template problem aborts the pass, so callers never see
//! partial output.

mod files;

pub use files::{GeneratedFile, GeneratedFiles};

use std::path::PathBuf;

use serde::Deserialize;

use crate::dumper::{self, ClassFragment, DumpContext, MessageProfile};
use crate::locate::PathLocator;
use crate::marker::{self, ExternalMarkers, MarkerError};
use crate::model::{Definition, DefinitionCollection};
use crate::replace::{self, Replacer};
use crate::template::{
    Template, TemplateError, TemplateLoader, BODY_PLACEHOLDER, FRAGMENT_PLACEHOLDER,
};

/// Header of every generated unit.
pub const BANNER: &str = "<?php\n\
\n\
// this file is auto-generated by classdump\n\
// don't edit this file manually\n\
\n\
declare(strict_types=1);\n";

/// How [`generate`] maps definitions to output units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputLayout {
    /// One unit per definition, holding every class it declares.
    #[default]
    PerDefinition,
    /// One unit per class: each value object alternative (and a standalone
    /// base) gets its own file, as class-per-file autoloading expects.
    PerClass,
}

/// Knobs of a generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub external_markers: ExternalMarkers,
    pub messages: MessageProfile,
    pub layout: OutputLayout,
}

/// Error aborting a generation pass.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("templates for {definition} provide {found} body templates, expected {expected}")]
    TemplateMismatch {
        definition: String,
        expected: usize,
        found: usize,
    },

    #[error("class template for {definition} has no body placeholder")]
    MissingBodyPlaceholder { definition: String },
}

/// Generate source units keyed by output path.
///
/// Units are recorded in collection order; a later unit resolving to an
/// already used path replaces the earlier text. [`GenerateOptions::layout`]
/// decides whether a unit is a whole definition or a single class of it.
pub fn generate(
    collection: &DefinitionCollection,
    locator: &impl PathLocator,
    loader: &impl TemplateLoader,
    replacer: &impl Replacer,
    options: &GenerateOptions,
) -> Result<GeneratedFiles, GenerateError> {
    let parents = marker::validate_collection(collection, &options.external_markers)?;
    let mut files = GeneratedFiles::new();

    for (definition, parent) in collection.iter().zip(&parents) {
        let template = load_template(definition, loader)?;
        let ctx = DumpContext {
            parent: parent.as_ref(),
            messages: &options.messages,
        };

        match options.layout {
            OutputLayout::PerDefinition => {
                let text = render_definition(definition, &template, &ctx, replacer)?;
                record(&mut files, definition, locator.locate(definition), text);
            }
            OutputLayout::PerClass => {
                let classes = dumper::dump_classes(definition, &ctx);
                // A standalone base has no body template of its own and
                // shares the first alternative's.
                let offset = classes.len().saturating_sub(template.body_templates.len());
                for (index, class) in classes.iter().enumerate() {
                    let body_template = template
                        .body_templates
                        .get(index.saturating_sub(offset))
                        .map_or(FRAGMENT_PLACEHOLDER, String::as_str);
                    let unit = class_unit(definition, class);
                    let text = compose(
                        &unit,
                        &template.class_template,
                        [(body_template, class.code.as_str())],
                        replacer,
                    )?;
                    record(&mut files, &unit, locator.locate(&unit), text);
                }
            }
        }
    }

    tracing::info!(
        definitions = collection.len(),
        files = files.len(),
        layout = ?options.layout,
        "Generation pass complete"
    );
    Ok(files)
}

/// Generate a single unit holding every definition in collection order.
///
/// Each definition is emitted as a bracketed `namespace` block, the global
/// ones included, since PHP does not allow a file to mix bracketed blocks
/// with `namespace Foo;` statements or with unbracketed global code.
pub fn dump(
    collection: &DefinitionCollection,
    loader: &impl TemplateLoader,
    replacer: &impl Replacer,
    options: &GenerateOptions,
) -> Result<String, GenerateError> {
    let parents = marker::validate_collection(collection, &options.external_markers)?;
    let mut code = BANNER.to_string();

    for (definition, parent) in collection.iter().zip(&parents) {
        let template = load_template(definition, loader)?;
        let ctx = DumpContext {
            parent: parent.as_ref(),
            messages: &options.messages,
        };
        let text = render_definition(definition, &template, &ctx, replacer)?;
        code.push('\n');
        code.push_str(&bracketed(definition, &text));
    }

    tracing::info!(definitions = collection.len(), "Dumped collection");
    Ok(code)
}

fn record(files: &mut GeneratedFiles, unit: &Definition, path: PathBuf, text: String) {
    tracing::debug!(
        definition = %unit.qualified_name(),
        kind = %unit.kind,
        path = %path.display(),
        "Rendered definition"
    );
    if files.insert(path.clone(), format!("{BANNER}{text}")) {
        tracing::warn!(path = %path.display(), "Output path reused, keeping last definition");
    }
}

/// Load the templates of `definition` and check they fit its fragments.
fn load_template(
    definition: &Definition,
    loader: &impl TemplateLoader,
) -> Result<Template, GenerateError> {
    let template = loader.load(definition)?;

    let expected = definition.fragment_count();
    if template.body_templates.len() != expected {
        return Err(GenerateError::TemplateMismatch {
            definition: definition.qualified_name(),
            expected,
            found: template.body_templates.len(),
        });
    }
    if !template.class_template.contains(BODY_PLACEHOLDER) {
        return Err(GenerateError::MissingBodyPlaceholder {
            definition: definition.qualified_name(),
        });
    }
    Ok(template)
}

fn render_definition(
    definition: &Definition,
    template: &Template,
    ctx: &DumpContext<'_>,
    replacer: &impl Replacer,
) -> Result<String, GenerateError> {
    let fragments = dumper::dump_all(definition, ctx);
    compose(
        definition,
        &template.class_template,
        template
            .body_templates
            .iter()
            .map(String::as_str)
            .zip(fragments.iter().map(String::as_str)),
        replacer,
    )
}

/// Splice `(body template, fragment)` pairs into the class template and run
/// the replacer over the result.
///
/// Bodies are joined with a newline; a non-empty body is preceded by one.
fn compose<'a>(
    definition: &Definition,
    class_template: &str,
    parts: impl IntoIterator<Item = (&'a str, &'a str)>,
    replacer: &impl Replacer,
) -> Result<String, GenerateError> {
    let body = parts
        .into_iter()
        .map(|(body_template, fragment)| body_template.replace(FRAGMENT_PLACEHOLDER, fragment))
        .collect::<Vec<_>>()
        .join("\n");
    let body = if body.is_empty() {
        body
    } else {
        format!("\n{body}")
    };

    let composed = class_template.replacen(BODY_PLACEHOLDER, &body, 1);
    Ok(replacer.replace(definition, &composed)?)
}

/// The definition as seen by the locator and replacer for one of its classes.
fn class_unit(definition: &Definition, class: &ClassFragment) -> Definition {
    if class.name == definition.name {
        return definition.clone();
    }
    Definition {
        name: class.name.clone(),
        constructors: Vec::new(),
        ..definition.clone()
    }
}

/// Rewrite a rendered definition as a bracketed namespace block.
fn bracketed(definition: &Definition, text: &str) -> String {
    // Namespaced messages come out of the dumper already bracketed.
    if definition.kind.is_message() && !definition.namespace.is_empty() {
        return text.trim_start_matches('\n').to_string();
    }
    let declaration = replace::namespace_declaration(definition);
    let code = if declaration.is_empty() {
        text.to_string()
    } else {
        text.replacen(&declaration, "", 1)
    };
    dumper::namespace_block(&definition.namespace, code.trim_start_matches('\n'))
}
