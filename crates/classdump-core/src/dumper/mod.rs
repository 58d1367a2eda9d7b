//! Per-kind code generators.
//!
//! Each dumper is a pure function from a definition to PHP source text for
//! one fragment: one constructor alternative of a value object, or the whole
//! declaration of a message, marker or enum. Dispatch is an exhaustive match
//! over [`DefinitionKind`]; the kind set is closed.
//!
//! Fragments are complete lines: every fragment ends with a newline.

mod enumeration;
mod marker;
mod message;
mod value_object;

pub use message::MessageProfile;

use std::fmt::{self, Write};

use crate::marker::ResolvedParent;
use crate::model::{Argument, Definition, DefinitionKind};

/// Everything a dumper needs beyond the definition itself.
#[derive(Debug, Clone, Copy)]
pub struct DumpContext<'a> {
    /// Parent resolved by marker validation, if any.
    pub parent: Option<&'a ResolvedParent>,
    pub messages: &'a MessageProfile,
}

/// Render fragment `index` of `definition`.
///
/// `index` selects the constructor alternative of a value object and is
/// ignored by the single-fragment kinds. Validity preconditions (marker
/// resolution) are checked by the caller; dumping never fails.
pub fn dump(definition: &Definition, index: usize, ctx: &DumpContext<'_>) -> String {
    render(|out| match definition.kind {
        DefinitionKind::ValueObject => value_object::write(out, definition, index),
        DefinitionKind::Command | DefinitionKind::Event | DefinitionKind::Query => {
            message::write(out, definition, ctx.messages)
        }
        DefinitionKind::Marker => marker::write(out, definition, ctx.parent),
        DefinitionKind::Enum => enumeration::write(out, definition),
    })
}

/// Render every fragment of `definition`, in order.
pub fn dump_all(definition: &Definition, ctx: &DumpContext<'_>) -> Vec<String> {
    (0..definition.fragment_count())
        .map(|index| dump(definition, index, ctx))
        .collect()
}

/// One class declaration of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFragment {
    /// Short class name the code declares.
    pub name: String,
    pub code: String,
}

/// Render each class of `definition` separately, in declaration order.
///
/// A multi-alternative value object yields its standalone base (when no
/// alternative takes the base name) followed by one class per alternative;
/// every other definition yields a single class.
pub fn dump_classes(definition: &Definition, ctx: &DumpContext<'_>) -> Vec<ClassFragment> {
    match definition.kind {
        DefinitionKind::ValueObject => value_object::classes(definition),
        _ => vec![ClassFragment {
            name: definition.name.clone(),
            code: dump(definition, 0, ctx),
        }],
    }
}

/// Wrap `code` in a bracketed `namespace` block, indenting non-empty lines.
/// An empty `namespace` opens the global block.
pub fn namespace_block(namespace: &str, code: &str) -> String {
    render(|out| {
        if namespace.is_empty() {
            writeln!(out, "namespace {{")?;
        } else {
            writeln!(out, "namespace {namespace} {{")?;
        }
        for line in code.lines() {
            if line.is_empty() {
                writeln!(out)?;
            } else {
                writeln!(out, "    {line}")?;
            }
        }
        writeln!(out, "}}")
    })
}

fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write(&mut out);
    out
}

/// `string $a, ?int $b, $c`
fn parameter_list(arguments: &[Argument]) -> String {
    arguments
        .iter()
        .map(|argument| {
            let ty = argument.signature_type();
            if ty.is_empty() {
                format!("${}", argument.name)
            } else {
                format!("{ty} ${}", argument.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `: ?int`, or nothing for an untyped argument.
fn return_type(argument: &Argument) -> String {
    let ty = argument.signature_type();
    if ty.is_empty() {
        ty
    } else {
        format!(": {ty}")
    }
}

/// Write a getter for `argument` whose body returns `expression`.
fn write_accessor(out: &mut String, argument: &Argument, expression: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "    public function {}(){}",
        argument.name,
        return_type(argument)
    )?;
    writeln!(out, "    {{")?;
    writeln!(out, "        return {expression};")?;
    writeln!(out, "    }}")
}

/// PHP single-quoted string literal.
///
/// Only a quote, and a backslash that would otherwise escape a quote or a
/// backslash, need escaping; namespace separators stay as written.
fn php_single_quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => quoted.push_str("\\'"),
            '\\' if matches!(chars.peek(), None | Some('\\') | Some('\'')) => {
                quoted.push_str("\\\\")
            }
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
