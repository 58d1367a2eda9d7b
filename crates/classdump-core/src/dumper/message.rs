//! Commands, events and queries: final payload-constructable message classes.

use std::fmt::{self, Write};

use serde::Deserialize;

use super::{namespace_block, parameter_list, php_single_quoted, render, write_accessor};
use crate::model::{Definition, DefinitionKind};

/// Base types that generated message classes build on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MessageProfile {
    pub command_base: String,
    pub event_base: String,
    pub query_base: String,
    /// Interface every message class implements.
    pub payload_interface: String,
    /// Trait providing the `payload` store and its constructor.
    pub payload_trait: String,
}

impl Default for MessageProfile {
    fn default() -> Self {
        Self {
            command_base: "\\Prooph\\Common\\Messaging\\Command".to_string(),
            event_base: "\\Prooph\\Common\\Messaging\\DomainEvent".to_string(),
            query_base: "\\Prooph\\Common\\Messaging\\Query".to_string(),
            payload_interface: "\\Prooph\\Common\\Messaging\\PayloadConstructable".to_string(),
            payload_trait: "\\Prooph\\Common\\Messaging\\PayloadTrait".to_string(),
        }
    }
}

impl MessageProfile {
    /// Base class for a message kind, `None` for the other kinds.
    pub fn base_for(&self, kind: DefinitionKind) -> Option<&str> {
        match kind {
            DefinitionKind::Command => Some(&self.command_base),
            DefinitionKind::Event => Some(&self.event_base),
            DefinitionKind::Query => Some(&self.query_base),
            DefinitionKind::ValueObject | DefinitionKind::Enum | DefinitionKind::Marker => None,
        }
    }
}

pub(super) fn write(
    out: &mut String,
    definition: &Definition,
    profile: &MessageProfile,
) -> fmt::Result {
    let class = render(|class| write_class(class, definition, profile));

    if definition.namespace.is_empty() {
        out.write_str(&class)
    } else {
        out.write_str(&namespace_block(&definition.namespace, &class))
    }
}

fn write_class(out: &mut String, definition: &Definition, profile: &MessageProfile) -> fmt::Result {
    let base = profile.base_for(definition.kind).unwrap_or_default();
    let arguments = definition
        .constructors
        .first()
        .map(|constructor| constructor.effective_arguments())
        .unwrap_or_default();

    writeln!(
        out,
        "final class {} extends {base} implements {}",
        definition.name, profile.payload_interface
    )?;
    writeln!(out, "{{")?;
    writeln!(out, "    use {};", profile.payload_trait)?;
    writeln!(out)?;
    writeln!(
        out,
        "    protected $messageName = {};",
        php_single_quoted(&definition.effective_message_name())
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "    public function __construct({})",
        parameter_list(&arguments)
    )?;
    writeln!(out, "    {{")?;
    if arguments.is_empty() {
        writeln!(out, "        parent::__construct([]);")?;
    } else {
        writeln!(out, "        parent::__construct([")?;
        for argument in &arguments {
            writeln!(out, "            '{0}' => ${0},", argument.name)?;
        }
        writeln!(out, "        ]);")?;
    }
    writeln!(out, "    }}")?;

    for argument in &arguments {
        write_accessor(out, argument, &format!("$this->payload['{}']", argument.name))?;
    }

    writeln!(out, "}}")
}
