//! Output path resolution.

use std::path::{Path, PathBuf};

use crate::model::{Definition, NAMESPACE_SEPARATOR};

const FILE_EXTENSION: &str = "php";

/// Maps a definition to the path of its generated unit.
pub trait PathLocator {
    fn locate(&self, definition: &Definition) -> PathBuf;
}

impl<F> PathLocator for F
where
    F: Fn(&Definition) -> PathBuf,
{
    fn locate(&self, definition: &Definition) -> PathBuf {
        self(definition)
    }
}

/// PSR-4 style locator: a namespace prefix maps to a base directory and the
/// rest of the namespace maps to subdirectories.
#[derive(Debug, Clone)]
pub struct Psr4Locator {
    /// `(prefix, directory)`, prefixes normalized to end with a separator.
    prefixes: Vec<(String, PathBuf)>,
    fallback: PathBuf,
}

impl Psr4Locator {
    /// A locator with no prefixes; everything lands below `fallback`.
    pub fn new(fallback: impl Into<PathBuf>) -> Self {
        Self {
            prefixes: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Register a namespace prefix such as `Foo\` (trailing separator optional).
    pub fn with_prefix(mut self, prefix: &str, dir: impl Into<PathBuf>) -> Self {
        let prefix = prefix.trim_matches(NAMESPACE_SEPARATOR);
        let prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}{NAMESPACE_SEPARATOR}")
        };
        self.prefixes.push((prefix, dir.into()));
        // Longest prefix first.
        self.prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        self
    }

    /// Resolve the output path for a fully qualified class name.
    pub fn locate_class(&self, qualified: &str) -> PathBuf {
        let qualified = qualified.trim_start_matches(NAMESPACE_SEPARATOR);

        for (prefix, dir) in &self.prefixes {
            if let Some(rest) = qualified.strip_prefix(prefix.as_str()) {
                return join_segments(dir, rest);
            }
        }

        join_segments(&self.fallback, qualified)
    }
}

impl PathLocator for Psr4Locator {
    fn locate(&self, definition: &Definition) -> PathBuf {
        self.locate_class(&definition.qualified_name())
    }
}

fn join_segments(base: &Path, relative: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in relative.split(NAMESPACE_SEPARATOR) {
        path.push(segment);
    }
    path.set_extension(FILE_EXTENSION);
    path
}
