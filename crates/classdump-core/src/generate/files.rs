use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Generated units keyed by path, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct GeneratedFiles {
    files: Vec<GeneratedFile>,
    index: HashMap<PathBuf, usize>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `content` at `path`. Returns `true` when an earlier unit at the
    /// same path was replaced; the replaced unit keeps its position.
    pub fn insert(&mut self, path: PathBuf, content: String) -> bool {
        if let Some(&position) = self.index.get(&path) {
            self.files[position].content = content;
            return true;
        }
        self.index.insert(path.clone(), self.files.len());
        self.files.push(GeneratedFile { path, content });
        false
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.index
            .get(path)
            .map(|&position| self.files[position].content.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeneratedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for GeneratedFiles {
    type Item = GeneratedFile;
    type IntoIter = std::vec::IntoIter<GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a GeneratedFiles {
    type Item = &'a GeneratedFile;
    type IntoIter = std::slice::Iter<'a, GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
