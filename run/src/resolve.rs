//! Declaration resolution.
//!
//! Resolution turns a [`Declaration`] into the frozen, ordered sets the
//! parser builder consumes: arguments deduplicated by field name and
//! sorted by construction sequence, and subcommands deduplicated by
//! field name in registration order. When a name appears at several
//! extension depths, the most-derived entry (smallest depth) shadows the
//! rest entirely; the same name twice at one depth is a declaration
//! error.

use std::collections::HashMap;
use std::sync::Arc;

use commandeer_core::Argument;
use thiserror::Error;
use tracing::debug;

use crate::command::{Assign, Command, Declaration, Entry, EntryKind, Nested};

/// Structural problems in a command declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// One definition registered the same field name twice.
    #[error("field '{0}' is declared twice in the same definition")]
    DuplicateField(String),
    /// A field was registered with an empty name.
    #[error("field name cannot be empty")]
    EmptyFieldName,
}

pub(crate) struct ResolvedArg<C> {
    pub(crate) name: String,
    pub(crate) argument: Arc<Argument>,
    pub(crate) assign: Assign<C>,
}

/// A resolved command: frozen argument and subcommand sets.
///
/// Produced by [`Declaration::resolve`]. Arguments are ordered by their
/// construction sequence numbers; subcommands keep registration order.
///
/// # Examples
///
/// ```
/// use commandeer::{Argument, Command, Declaration, Failure};
///
/// #[derive(Default)]
/// struct Tool {
///     input: String,
///     output: String,
/// }
///
/// impl Command for Tool {
///     fn declaration() -> Declaration<Self> {
///         Declaration::new()
///             .arg(
///                 "input",
///                 Argument::new().positional().required(),
///                 |cmd: &mut Self, value: String| cmd.input = value,
///             )
///             .arg(
///                 "output",
///                 Argument::new(),
///                 |cmd: &mut Self, value: String| cmd.output = value,
///             )
///     }
///
///     fn main(&mut self) -> Result<(), Failure> {
///         Ok(())
///     }
/// }
///
/// let resolved = Tool::declaration().resolve().unwrap();
/// assert_eq!(resolved.argument_names(), vec!["input", "output"]);
/// assert!(resolved.subcommand_names().is_empty());
/// ```
pub struct Resolved<C> {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) subcommand_label: String,
    pub(crate) args: Vec<ResolvedArg<C>>,
    pub(crate) subcommands: Vec<(String, Box<dyn Nested>)>,
}

impl<C: Command> Declaration<C> {
    /// Resolves the declaration into frozen, ordered argument and
    /// subcommand sets.
    pub fn resolve(self) -> Result<Resolved<C>, DeclarationError> {
        let mut kept: Vec<Entry<C>> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for entry in self.entries {
            if entry.name.trim().is_empty() {
                return Err(DeclarationError::EmptyFieldName);
            }
            match by_name.get(&entry.name) {
                None => {
                    by_name.insert(entry.name.clone(), kept.len());
                    kept.push(entry);
                }
                Some(&at) => match entry.depth.cmp(&kept[at].depth) {
                    std::cmp::Ordering::Equal => {
                        return Err(DeclarationError::DuplicateField(entry.name));
                    }
                    // More-derived declarations shadow inherited ones.
                    std::cmp::Ordering::Less => kept[at] = entry,
                    std::cmp::Ordering::Greater => {}
                },
            }
        }

        let mut args = Vec::new();
        let mut subcommands = Vec::new();
        for entry in kept {
            match entry.kind {
                EntryKind::Arg { argument, assign } => args.push(ResolvedArg {
                    name: entry.name,
                    argument,
                    assign,
                }),
                EntryKind::Sub(nested) => subcommands.push((entry.name, nested)),
            }
        }
        args.sort_by_key(|arg| arg.argument.sequence());

        debug!(
            arguments = args.len(),
            subcommands = subcommands.len(),
            "Resolved command declaration"
        );

        Ok(Resolved {
            name: self.name,
            description: self.description,
            subcommand_label: self
                .subcommand_label
                .unwrap_or_else(|| "command".to_string()),
            args,
            subcommands,
        })
    }
}

impl<C> std::fmt::Debug for Resolved<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("subcommand_label", &self.subcommand_label)
            .field("args", &self.argument_names())
            .field("subcommands", &self.subcommand_names())
            .finish_non_exhaustive()
    }
}

impl<C> Resolved<C> {
    /// The command description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The subcommand group label.
    pub fn subcommand_label(&self) -> &str {
        &self.subcommand_label
    }

    /// Resolved argument field names, in parser registration order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.args.iter().map(|arg| arg.name.as_str()).collect()
    }

    /// Looks up a resolved argument descriptor by field name.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.args
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| arg.argument.as_ref())
    }

    /// Resolved subcommand names, in registration order.
    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub(crate) fn find_subcommand(&self, name: &str) -> Option<&dyn Nested> {
        self.subcommands
            .iter()
            .find(|(sub_name, _)| sub_name == name)
            .map(|(_, nested)| nested.as_ref())
    }
}
