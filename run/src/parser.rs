//! Parser tree construction.
//!
//! Maps a [`Resolved`] command onto the parsing library: each argument
//! becomes a `clap::Arg` carrying the descriptor's arity, default,
//! coercion, and help; each subcommand becomes a nested parser branch,
//! built recursively. Coercion and choice membership run inside clap's
//! value parsing, so their failures surface as ordinary usage errors.

use std::sync::Arc;

use commandeer_core::{Argument, Arity};
use tracing::debug;

use crate::resolve::{DeclarationError, Resolved};

/// Builds the parser for a resolved command, including all nested
/// subcommand branches.
///
/// Subcommand selection is mandatory exactly when the command declares
/// no arguments of its own: with nothing to do at the root, forgetting
/// the subcommand should be a hard error, while a root with arguments
/// remains runnable on its own.
pub(crate) fn build_parser<C>(
    name: &str,
    resolved: &Resolved<C>,
) -> Result<clap::Command, DeclarationError> {
    let mut command = clap::Command::new(name.to_string());
    if let Some(description) = resolved.description() {
        command = command.about(description.to_string());
    }

    for arg in &resolved.args {
        command = command.arg(clap_arg(&arg.name, &arg.argument));
    }

    if !resolved.subcommands.is_empty() {
        command = command
            .subcommand_value_name(resolved.subcommand_label().to_string())
            .subcommand_required(resolved.args.is_empty());
        for (sub_name, nested) in &resolved.subcommands {
            command = command.subcommand(nested.build(sub_name)?);
        }
    }

    debug!(
        command = name,
        subcommands = resolved.subcommands.len(),
        "Built parser"
    );
    Ok(command)
}

fn clap_arg(name: &str, argument: &Arc<Argument>) -> clap::Arg {
    let mut arg = clap::Arg::new(name.to_string());
    if !argument.is_positional() {
        arg = arg.long(name.to_string());
    }

    arg = match argument.arity() {
        Arity::ExactlyOne => arg.num_args(1).required(argument.is_required()),
        Arity::ZeroOrOne => arg.num_args(1).required(false),
        Arity::OneOrMore => arg.num_args(1..).required(true),
        Arity::ZeroOrMore => arg.num_args(0..).required(false),
    };
    if argument.is_multiple() && !argument.is_positional() {
        arg = arg.action(clap::ArgAction::Append);
    }

    // Multiple-valued arguments normalize absence to an empty list, so
    // only scalar defaults on optional arguments reach the parser (and
    // its help output).
    if let Some(default) = argument.default() {
        if !argument.is_multiple() && !argument.is_required() {
            arg = arg.default_value(default.to_string());
        }
    }
    if let Some(help) = argument.help() {
        arg = arg.help(help.to_string());
    }

    let descriptor = Arc::clone(argument);
    arg.value_parser(move |raw: &str| descriptor.coerce(raw))
}
