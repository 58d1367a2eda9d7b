//! Value objects: a single final class, or a sum type made of a base class
//! plus one final class per alternative.

use std::fmt::{self, Write};

use super::{parameter_list, render, write_accessor, ClassFragment};
use crate::model::{Argument, Constructor, Definition};

pub(super) fn write(out: &mut String, definition: &Definition, index: usize) -> fmt::Result {
    match definition.constructors.as_slice() {
        [] | [_] => write_single(out, definition),
        alternatives => {
            let Some(alternative) = alternatives.get(index) else {
                return Ok(());
            };
            if index == 0 && needs_standalone_base(definition) {
                write_base(out, &definition.name)?;
                writeln!(out)?;
            }
            write_alternative(out, &definition.name, alternative)
        }
    }
}

/// Each class of the value object on its own: the standalone base first when
/// no alternative takes its name, then one class per alternative.
pub(super) fn classes(definition: &Definition) -> Vec<ClassFragment> {
    let base = definition.name.as_str();
    match definition.constructors.as_slice() {
        [] | [_] => vec![ClassFragment {
            name: base.to_string(),
            code: render(|out| write_single(out, definition)),
        }],
        alternatives => {
            let standalone = needs_standalone_base(definition).then(|| ClassFragment {
                name: base.to_string(),
                code: render(|out| write_base(out, base)),
            });
            standalone
                .into_iter()
                .chain(alternatives.iter().map(|alternative| ClassFragment {
                    name: alternative.short_name().to_string(),
                    code: render(|out| write_alternative(out, base, alternative)),
                }))
                .collect()
        }
    }
}

fn needs_standalone_base(definition: &Definition) -> bool {
    !definition
        .constructors
        .iter()
        .any(|c| c.short_name() == definition.name)
}

fn write_single(out: &mut String, definition: &Definition) -> fmt::Result {
    let arguments = definition
        .constructors
        .first()
        .map(Constructor::effective_arguments)
        .unwrap_or_default();
    write_class(out, &format!("final class {}", definition.name), &arguments)
}

fn write_base(out: &mut String, base: &str) -> fmt::Result {
    write_class(out, &format!("class {base}"), &[])
}

fn write_alternative(out: &mut String, base: &str, alternative: &Constructor) -> fmt::Result {
    if alternative.short_name() == base {
        write_class(
            out,
            &format!("class {base}"),
            &alternative.effective_arguments(),
        )
    } else {
        write_class(
            out,
            &format!("final class {} extends {base}", alternative.short_name()),
            &alternative.effective_arguments(),
        )
    }
}

/// Class with one private field, one constructor parameter and one accessor
/// per argument, all in declared order.
fn write_class(out: &mut String, header: &str, arguments: &[Argument]) -> fmt::Result {
    writeln!(out, "{header}")?;
    writeln!(out, "{{")?;

    if !arguments.is_empty() {
        for argument in arguments {
            writeln!(out, "    private ${};", argument.name)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "    public function __construct({})",
            parameter_list(arguments)
        )?;
        writeln!(out, "    {{")?;
        for argument in arguments {
            writeln!(out, "        $this->{0} = ${0};", argument.name)?;
        }
        writeln!(out, "    }}")?;

        for argument in arguments {
            write_accessor(out, argument, &format!("$this->{}", argument.name))?;
        }
    }

    writeln!(out, "}}")
}
