//! Insertion-ordered collection of definitions with qualified-name lookup.

use std::collections::HashMap;

use super::{split_qualified, Definition, DefinitionKind};

/// Error while building a [`DefinitionCollection`].
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("duplicate definition {qualified_name}")]
    DuplicateDefinition { qualified_name: String },

    #[error("marker {qualified_name} cannot declare constructors")]
    MarkerWithConstructors { qualified_name: String },
}

/// All definitions of one generation pass.
///
/// Definitions live in a vector in insertion order; the index maps a
/// `(namespace, name)` pair to a position so cross references stay
/// non-owning.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCollection {
    definitions: Vec<Definition>,
    index: HashMap<(String, String), usize>,
}

impl DefinitionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting the first duplicate qualified name.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = Definition>,
    ) -> Result<Self, CollectionError> {
        let mut collection = Self::new();
        for definition in definitions {
            collection.add(definition)?;
        }
        Ok(collection)
    }

    /// Append a definition.
    pub fn add(&mut self, definition: Definition) -> Result<(), CollectionError> {
        if definition.kind == DefinitionKind::Marker && !definition.constructors.is_empty() {
            return Err(CollectionError::MarkerWithConstructors {
                qualified_name: definition.qualified_name(),
            });
        }
        let key = (definition.namespace.clone(), definition.name.clone());
        if self.index.contains_key(&key) {
            return Err(CollectionError::DuplicateDefinition {
                qualified_name: definition.qualified_name(),
            });
        }
        self.index.insert(key, self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&Definition> {
        self.position(namespace, name).map(|idx| &self.definitions[idx])
    }

    /// Look up a qualified name without leading separator (`Foo\Bar`).
    pub fn lookup(&self, qualified: &str) -> Option<&Definition> {
        let (namespace, name) = split_qualified(qualified);
        self.get(namespace, name)
    }

    /// Insertion position of a definition.
    pub fn position(&self, namespace: &str, name: &str) -> Option<usize> {
        self.index
            .get(&(namespace.to_string(), name.to_string()))
            .copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a DefinitionCollection {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Constructor;

    fn data(namespace: &str, name: &str) -> Definition {
        Definition::new(
            DefinitionKind::ValueObject,
            namespace,
            name,
            vec![Constructor::new("String")],
        )
    }

    #[test]
    fn test_preserves_insertion_order() {
        let collection = DefinitionCollection::from_definitions(vec![
            data("Foo", "Zed"),
            data("Foo", "Alpha"),
            Definition::marker("Bar", "Mid"),
        ])
        .unwrap();

        let names: Vec<_> = collection.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Alpha", "Mid"]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_lookup_by_qualified_name() {
        let collection =
            DefinitionCollection::from_definitions(vec![data("Foo\\Sub", "Bar"), data("", "Top")])
                .unwrap();

        assert_eq!(collection.lookup("Foo\\Sub\\Bar").unwrap().name, "Bar");
        assert_eq!(collection.lookup("Top").unwrap().namespace, "");
        assert!(collection.lookup("Foo\\Bar").is_none());
    }

    #[test]
    fn test_same_name_in_different_namespaces() {
        let collection =
            DefinitionCollection::from_definitions(vec![data("Foo", "Bar"), data("Baz", "Bar")]);
        assert!(collection.is_ok());
    }

    #[test]
    fn test_rejects_duplicate() {
        let err = DefinitionCollection::from_definitions(vec![
            data("Foo", "Bar"),
            Definition::marker("Foo", "Bar"),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            CollectionError::DuplicateDefinition { ref qualified_name } if qualified_name == "Foo\\Bar"
        ));
        assert_eq!(err.to_string(), "duplicate definition Foo\\Bar");
    }

    #[test]
    fn test_rejects_marker_with_constructors() {
        let mut marker = Definition::marker("Foo", "Tagged");
        marker.constructors.push(Constructor::new("Foo\\Tagged"));

        let err = DefinitionCollection::from_definitions(vec![marker]).unwrap_err();
        assert!(matches!(err, CollectionError::MarkerWithConstructors { .. }));
        assert_eq!(err.to_string(), "marker Foo\\Tagged cannot declare constructors");
    }
}
