//! Markers: empty capability interfaces.

use std::fmt::{self, Write};

use crate::marker::ResolvedParent;
use crate::model::Definition;

pub(super) fn write(
    out: &mut String,
    definition: &Definition,
    parent: Option<&ResolvedParent>,
) -> fmt::Result {
    match parent {
        Some(parent) => writeln!(
            out,
            "interface {} extends {}",
            definition.name,
            parent.extends_name(&definition.namespace)
        )?,
        None => writeln!(out, "interface {}", definition.name)?,
    }
    writeln!(out, "{{")?;
    writeln!(out, "}}")
}
