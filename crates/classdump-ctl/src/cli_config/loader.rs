//! Discovery of `.classdump.toml`.
//!
//! The project file in the working directory wins over the user file at
//! `~/.config/classdump.toml`. A file that cannot be read or parsed is
//! reported and replaced by the defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::CliConfig;

const PROJECT_CONFIG: &str = ".classdump.toml";
const USER_CONFIG: &str = "classdump.toml";

pub(crate) fn load_cli_config() -> CliConfig {
    let Some(path) = config_candidates().into_iter().find(|path| path.is_file()) else {
        return CliConfig::default();
    };
    match read_config(&path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "Using config file");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "Ignoring config file");
            CliConfig::default()
        }
    }
}

/// Config locations, highest precedence first.
fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(PROJECT_CONFIG)];
    candidates.extend(home_dir().map(|home| home.join(".config").join(USER_CONFIG)));
    candidates
}

fn read_config(path: &Path) -> anyhow::Result<CliConfig> {
    let text = std::fs::read_to_string(path).context("unreadable")?;
    toml::from_str(&text).context("invalid TOML")
}

/// Resolve a leading `~/` against `$HOME`.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classdump_core::OutputLayout;

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/php/templates");
        assert!(expanded.to_str().unwrap().contains("php/templates"));
        assert!(!expanded.to_str().unwrap().starts_with('~'));
    }

    #[test]
    fn test_expand_path_relative() {
        assert_eq!(expand_path("./src"), PathBuf::from("./src"));
        assert_eq!(expand_path("/abs/src"), PathBuf::from("/abs/src"));
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.psr4.is_empty());
        assert!(config.fallback_dir.is_none());
        assert!(config.template_dir.is_none());
        assert!(config.external_markers.is_empty());
        assert_eq!(config.layout, OutputLayout::PerDefinition);
        assert_eq!(
            config.messages.command_base,
            "\\Prooph\\Common\\Messaging\\Command"
        );
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
fallback-dir = "generated"
template-dir = "~/classdump/templates"
external-markers = ["\\Psr\\Container\\ContainerInterface"]

[psr4]
"App\\" = "src"
"App\\Tests\\" = "tests"

[messages]
command-base = "\\App\\Messaging\\Command"
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.fallback_dir.as_deref(), Some("generated"));
        assert_eq!(config.template_dir.as_deref(), Some("~/classdump/templates"));
        assert_eq!(config.psr4.len(), 2);
        assert_eq!(config.psr4.get("App\\").map(String::as_str), Some("src"));
        assert_eq!(
            config.external_markers,
            vec!["\\Psr\\Container\\ContainerInterface"]
        );
        assert_eq!(config.messages.command_base, "\\App\\Messaging\\Command");
        assert_eq!(
            config.messages.event_base,
            "\\Prooph\\Common\\Messaging\\DomainEvent"
        );
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_CONFIG);
        std::fs::write(&path, "layout = \"per-class\"\nfallback-dir = \"gen\"\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.layout, OutputLayout::PerClass);
        assert_eq!(config.fallback_dir.as_deref(), Some("gen"));
    }

    #[test]
    fn test_read_config_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_CONFIG);
        std::fs::write(&path, "psr4 = 3\n").unwrap();

        let err = read_config(&path).unwrap_err();
        assert_eq!(err.to_string(), "invalid TOML");
        assert!(read_config(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_project_config_is_first_candidate() {
        assert_eq!(config_candidates()[0], PathBuf::from(".classdump.toml"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: CliConfig = toml::from_str("fallback-dir = \"out\"\n").unwrap();
        assert_eq!(config.fallback_dir.as_deref(), Some("out"));
        assert!(config.psr4.is_empty());
    }
}
