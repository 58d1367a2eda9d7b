//! Enumerations: one case per constructor alternative.

use std::fmt::{self, Write};

use crate::model::Definition;

pub(super) fn write(out: &mut String, definition: &Definition) -> fmt::Result {
    writeln!(out, "enum {}", definition.name)?;
    writeln!(out, "{{")?;
    for constructor in &definition.constructors {
        writeln!(out, "    case {};", constructor.short_name())?;
    }
    writeln!(out, "}}")
}
