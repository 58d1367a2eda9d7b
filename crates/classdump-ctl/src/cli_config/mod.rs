//! CLI configuration: output layout, templates and generation options.

pub(crate) mod loader;

pub(crate) use loader::{expand_path, load_cli_config};

use std::collections::BTreeMap;

use classdump_core::dumper::MessageProfile;
use classdump_core::OutputLayout;
use serde::Deserialize;

/// `.classdump.toml` contents.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Namespace prefix to directory, PSR-4 style (`"Foo\\" = "src/Foo"`).
    #[serde(default)]
    pub psr4: BTreeMap<String, String>,

    /// Root for namespaces without a matching prefix. Default: the output directory.
    pub fallback_dir: Option<String>,

    /// `per-definition` (default) or `per-class`, one file per value object
    /// alternative.
    #[serde(default)]
    pub layout: OutputLayout,

    /// Directory holding `<kind>.class.php` / `<kind>.body.php` overrides.
    pub template_dir: Option<String>,

    /// Extra external interfaces markers may extend, on top of the built-in list.
    #[serde(default)]
    pub external_markers: Vec<String>,

    /// Base types for generated commands, events and queries.
    #[serde(default)]
    pub messages: MessageProfile,
}
