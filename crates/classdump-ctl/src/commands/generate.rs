//! `generate` command: write generated PHP files, or print them as one unit.

use std::path::{Path, PathBuf};

use anyhow::Context;
use classdump_core::{dump, generate, GeneratedFiles, PlaceholderReplacer};

use super::{generate_options, load_definitions, locator, templates};
use crate::cli_config::load_cli_config;
use crate::output;

pub(crate) fn handle_generate_command(
    definitions_path: &Path,
    out_dir: Option<PathBuf>,
    stdout: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = load_cli_config();
    let collection = load_definitions(definitions_path)?;
    let options = generate_options(&config);
    let templates = templates(&config)?;

    if stdout {
        let code = dump(&collection, &templates, &PlaceholderReplacer, &options)
            .context("Code generation failed")?;
        output::raw(&code);
        return Ok(());
    }

    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
    let files = generate(
        &collection,
        &locator(&config, &out_dir),
        &templates,
        &PlaceholderReplacer,
        &options,
    )
    .context("Code generation failed")?;

    if files.is_empty() {
        output::warning(format!(
            "No definitions in '{}'",
            definitions_path.display()
        ));
        return Ok(());
    }

    if dry_run {
        output::label("Would write", format!("{} files", files.len()));
        for file in &files {
            output::item(file.path.display());
        }
        return Ok(());
    }

    write_files(&files)?;
    output::success(format!(
        "Generated {} files from {} definitions",
        files.len(),
        collection.len()
    ));
    Ok(())
}

fn write_files(files: &GeneratedFiles) -> anyhow::Result<()> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory '{}'", parent.display())
            })?;
        }
        std::fs::write(&file.path, &file.content)
            .with_context(|| format!("Failed to write output file '{}'", file.path.display()))?;
        tracing::debug!(path = %file.path.display(), "Wrote file");
    }
    Ok(())
}
