//! `check` command: load a definition document and validate marker inheritance.

use std::path::Path;

use classdump_core::marker::validate_collection;
use classdump_core::DefinitionKind;

use super::{generate_options, load_definitions};
use crate::cli_config::load_cli_config;
use crate::output;

pub(crate) fn handle_check_command(definitions_path: &Path) -> anyhow::Result<()> {
    let config = load_cli_config();
    let collection = load_definitions(definitions_path)?;
    let options = generate_options(&config);
    tracing::debug!(
        external_markers = ?options.external_markers.iter().collect::<Vec<_>>(),
        "Allowed external markers"
    );

    validate_collection(&collection, &options.external_markers)?;

    let markers = collection
        .iter()
        .filter(|definition| definition.kind == DefinitionKind::Marker)
        .count();
    output::success(format!(
        "{} definitions OK ({} markers)",
        collection.len(),
        markers
    ));
    if collection.is_empty() {
        output::hint("The document lists no definitions.");
    }
    Ok(())
}
