//! Parsing and dispatch.
//!
//! One invocation moves through a fixed sequence: instance and
//! declaration are created, the `before_parse` hook may rewrite the
//! declaration, resolution freezes the argument and subcommand sets, the
//! parser tree is built, the argument tokens are parsed, and the
//! selected leaf command (the root, or a nested subcommand at any depth)
//! is materialized, populated, and run.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use commandeer_core::{Value, ValueError};
use thiserror::Error;
use tracing::debug;

use crate::command::Command;
use crate::parser::build_parser;
use crate::report::Failure;
use crate::resolve::{DeclarationError, Resolved};

/// Everything that can go wrong between argument tokens and a completed
/// entry point.
#[derive(Debug, Error)]
pub enum RunError {
    /// The declaration itself is malformed.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
    /// The parsing library rejected the invocation (usage error), or it
    /// produced help/version output.
    #[error(transparent)]
    Parse(#[from] clap::Error),
    /// A registered setter expected a different value type than the
    /// argument's validator produced.
    #[error(transparent)]
    Value(#[from] ValueError),
    /// The entry point reported an application failure.
    #[error(transparent)]
    Command(#[from] Failure),
    /// The parse result named a subcommand the declaration does not
    /// contain.
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),
}

impl RunError {
    /// The process exit code this error maps to.
    ///
    /// Usage errors exit 2 (help and version requests exit 0);
    /// application failures carry their own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Parse(error) => match error.kind() {
                clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayVersion
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
                _ => 2,
            },
            RunError::Command(failure) => failure.code(),
            _ => 2,
        }
    }

    /// Reports the error to the user and terminates the process.
    pub fn exit(self) -> ! {
        match self {
            RunError::Parse(error) => error.exit(),
            other => {
                let code = other.exit_code();
                tracing::error!(error = %other, "Command failed");
                eprintln!("error: {other}");
                std::process::exit(code)
            }
        }
    }
}

pub(crate) fn run<C: Command>() {
    if let Err(error) = try_run_from::<C, _, _>(std::env::args_os()) {
        error.exit();
    }
}

pub(crate) fn try_run_from<C, I, T>(argv: I) -> Result<(), RunError>
where
    C: Command,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let mut root = C::default();
    let declaration = root.before_parse(C::declaration());
    let resolved = declaration.resolve()?;
    let matches = parse(&resolved, &argv)?;

    if let Some((name, sub_matches)) = matches.subcommand() {
        let nested = resolved
            .find_subcommand(name)
            .ok_or_else(|| RunError::UnknownSubcommand(name.to_string()))?;
        debug!(subcommand = name, "Dispatching to subcommand");
        return nested.dispatch(sub_matches);
    }

    assign_values(&mut root, &resolved, &matches)?;
    debug!("Dispatching to root command");
    root.main()?;
    Ok(())
}

pub(crate) fn try_parse_from<C, I, T>(argv: I) -> Result<C, RunError>
where
    C: Command,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let mut root = C::default();
    let declaration = root.before_parse(C::declaration());
    let resolved = declaration.resolve()?;
    let matches = parse(&resolved, &argv)?;
    assign_values(&mut root, &resolved, &matches)?;
    Ok(root)
}

fn parse<C>(resolved: &Resolved<C>, argv: &[OsString]) -> Result<clap::ArgMatches, RunError> {
    let program = program_name(resolved, argv);
    let parser = build_parser(&program, resolved)?;
    Ok(parser.try_get_matches_from(argv.iter().cloned())?)
}

fn program_name<C>(resolved: &Resolved<C>, argv: &[OsString]) -> String {
    match &resolved.name {
        Some(name) => name.clone(),
        None => argv
            .first()
            .map(Path::new)
            .and_then(Path::file_stem)
            .and_then(OsStr::to_str)
            .map(str::to_string)
            .unwrap_or_else(|| "command".to_string()),
    }
}

/// Populates the selected instance from the parse result.
///
/// Absent single-valued arguments fall back to the descriptor default;
/// with no default, the setter is skipped and the field keeps its
/// `Default` value. Multiple-valued arguments always assign a list,
/// empty when nothing matched.
pub(crate) fn assign_values<C>(
    instance: &mut C,
    resolved: &Resolved<C>,
    matches: &clap::ArgMatches,
) -> Result<(), RunError> {
    for arg in &resolved.args {
        let raw: Vec<Value> = matches
            .get_many::<Value>(&arg.name)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let value = match arg.argument.process_value(raw) {
            Some(value) => Some(value),
            None => arg.argument.default().cloned(),
        };
        if let Some(value) = value {
            (arg.assign)(instance, &value)?;
        }
    }
    Ok(())
}
