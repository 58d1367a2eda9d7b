//! Marker inheritance validation.
//!
//! A marker may extend one parent: another marker of the collection, or a
//! capability interface that already exists outside of it. Resolution is a
//! name lookup into the collection; the allow-list of external capabilities
//! is an explicit set, never a reflection check.

use std::collections::{BTreeSet, HashSet};

use crate::model::{qualify, Definition, DefinitionCollection, DefinitionKind, NAMESPACE_SEPARATOR};

/// Built-in interfaces a marker may extend without defining them.
pub const DEFAULT_EXTERNAL_MARKERS: &[&str] = &[
    "ArrayAccess",
    "BackedEnum",
    "Countable",
    "DateTimeInterface",
    "Iterator",
    "IteratorAggregate",
    "JsonSerializable",
    "Serializable",
    "Stringable",
    "Throwable",
    "Traversable",
    "UnitEnum",
];

/// Error raised when a marker's parent reference is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("Marker {marker} cannot extend itself")]
    SelfExtension { marker: String },

    #[error("Marker {marker} cannot extend unknown marker {reference}")]
    UnknownMarker { marker: String, reference: String },

    #[error("Marker {marker} cannot extend {reference} because it's not a marker")]
    NotAMarker { marker: String, reference: String },

    #[error("Marker {marker} has an inheritance cycle: {}", chain.join(" -> "))]
    InheritanceCycle { marker: String, chain: Vec<String> },
}

/// Fully qualified names (no leading separator) of allowed external parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalMarkers {
    names: BTreeSet<String>,
}

impl ExternalMarkers {
    /// An empty allow-list.
    pub fn none() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut externals = Self::none();
        externals.extend(names);
        externals
    }

    /// Add names; a leading separator is ignored.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().trim_start_matches(NAMESPACE_SEPARATOR);
            if !name.is_empty() {
                self.names.insert(name.to_string());
            }
        }
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.names.contains(qualified)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ExternalMarkers {
    fn default() -> Self {
        Self::from_names(DEFAULT_EXTERNAL_MARKERS)
    }
}

/// A successfully resolved marker parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedParent {
    /// A marker of the collection.
    Local { namespace: String, name: String },
    /// An allow-listed external capability, by fully qualified name.
    External(String),
}

impl ResolvedParent {
    /// Parent name as written in the `extends` clause of a marker living in
    /// `namespace`: bare for a same-namespace marker, fully qualified otherwise.
    pub fn extends_name(&self, namespace: &str) -> String {
        match self {
            ResolvedParent::Local {
                namespace: parent_ns,
                name,
            } if parent_ns == namespace => name.clone(),
            ResolvedParent::Local {
                namespace: parent_ns,
                name,
            } => format!("{NAMESPACE_SEPARATOR}{}", qualify(parent_ns, name)),
            ResolvedParent::External(qualified) => format!("{NAMESPACE_SEPARATOR}{qualified}"),
        }
    }
}

/// A parent reference after namespace qualification.
#[derive(Debug)]
struct QualifiedReference {
    qualified: String,
    /// Form used in error messages.
    display: String,
}

fn qualify_reference(namespace: &str, reference: &str) -> QualifiedReference {
    if let Some(rest) = reference.strip_prefix(NAMESPACE_SEPARATOR) {
        QualifiedReference {
            qualified: rest.to_string(),
            display: reference.to_string(),
        }
    } else if reference.contains(NAMESPACE_SEPARATOR) {
        QualifiedReference {
            qualified: reference.to_string(),
            display: reference.to_string(),
        }
    } else {
        let qualified = qualify(namespace, reference);
        QualifiedReference {
            display: qualified.clone(),
            qualified,
        }
    }
}

/// Resolve one parent link without following the chain.
fn resolve_parent(
    marker: &Definition,
    reference: &str,
    collection: &DefinitionCollection,
    externals: &ExternalMarkers,
) -> Result<ResolvedParent, MarkerError> {
    let marker_name = marker.qualified_name();
    let reference = qualify_reference(&marker.namespace, reference);

    if reference.qualified == marker_name {
        return Err(MarkerError::SelfExtension {
            marker: marker_name,
        });
    }

    match collection.lookup(&reference.qualified) {
        Some(parent) if parent.kind == DefinitionKind::Marker => Ok(ResolvedParent::Local {
            namespace: parent.namespace.clone(),
            name: parent.name.clone(),
        }),
        Some(_) => Err(MarkerError::NotAMarker {
            marker: marker_name,
            reference: reference.display,
        }),
        None if externals.contains(&reference.qualified) => {
            Ok(ResolvedParent::External(reference.qualified))
        }
        None => Err(MarkerError::UnknownMarker {
            marker: marker_name,
            reference: reference.display,
        }),
    }
}

/// Validate a marker's parent reference.
///
/// Returns `Ok(None)` when the marker declares no parent.
pub fn validate_marker(
    marker: &Definition,
    collection: &DefinitionCollection,
    externals: &ExternalMarkers,
) -> Result<Option<ResolvedParent>, MarkerError> {
    let Some(reference) = marker.marker_parent.as_deref() else {
        return Ok(None);
    };

    let parent = resolve_parent(marker, reference, collection, externals)?;
    check_cycle(marker, &parent, collection, externals)?;

    tracing::trace!(marker = %marker.qualified_name(), ?parent, "Resolved marker parent");
    Ok(Some(parent))
}

/// Follow the parent chain of `marker` and fail if it leads back to it.
fn check_cycle(
    marker: &Definition,
    parent: &ResolvedParent,
    collection: &DefinitionCollection,
    externals: &ExternalMarkers,
) -> Result<(), MarkerError> {
    let start = marker.qualified_name();
    let mut chain = vec![start.clone()];
    let mut seen: HashSet<String> = HashSet::from([start.clone()]);
    let mut current = parent.clone();

    while let ResolvedParent::Local { namespace, name } = current {
        let qualified = qualify(&namespace, &name);
        chain.push(qualified.clone());
        if qualified == start {
            return Err(MarkerError::InheritanceCycle {
                marker: start,
                chain,
            });
        }
        if !seen.insert(qualified) {
            // A cycle further up the chain; its own markers report it.
            return Ok(());
        }

        let Some(next) = collection.get(&namespace, &name) else {
            return Ok(());
        };
        let Some(reference) = next.marker_parent.as_deref() else {
            return Ok(());
        };
        current = match resolve_parent(next, reference, collection, externals) {
            Ok(resolved) => resolved,
            Err(_) => return Ok(()),
        };
    }

    Ok(())
}

/// Validate every marker of a collection, in insertion order.
///
/// The result is aligned with the collection: one entry per definition,
/// `Some` only for markers with a parent.
pub fn validate_collection(
    collection: &DefinitionCollection,
    externals: &ExternalMarkers,
) -> Result<Vec<Option<ResolvedParent>>, MarkerError> {
    collection
        .iter()
        .map(|definition| match definition.kind {
            DefinitionKind::Marker => validate_marker(definition, collection, externals),
            _ => Ok(None),
        })
        .collect()
}
