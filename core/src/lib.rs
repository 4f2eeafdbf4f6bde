//! Core building blocks for declarative command-line commands.
//!
//! This crate defines the data model used by the `commandeer` framework:
//!
//! - [`Argument`] — an immutable descriptor of one option's shape:
//!   positional/flag, required, multiplicity, default, choices, help, and
//!   a validator coercing raw tokens into typed values.
//! - [`Arity`] — how many value tokens an argument consumes, derived from
//!   the descriptor.
//! - [`Value`] / [`FromValue`] — the typed value domain produced by
//!   coercion and consumed by command field setters.
//! - [`Sequencer`] — the process-wide declaration-order tracker that
//!   stamps every argument with a construction sequence number.
//!
//! Nothing here talks to a parsing library; the descriptors only describe
//! shape and coercion. The `commandeer` crate turns them into a parser
//! and dispatches parsed invocations.
//!
//! # Example
//!
//! ```
//! use commandeer_core::{Argument, Arity, Value};
//!
//! let level = Argument::new()
//!     .with_choices(["debug", "info", "warn"])
//!     .with_default("info")
//!     .with_help("Log verbosity");
//!
//! assert_eq!(level.arity(), Arity::ExactlyOne);
//! assert_eq!(level.coerce("warn"), Ok(Value::from("warn")));
//! assert!(level.coerce("loud").is_err());
//! ```

mod argument;
mod order;
mod value;

pub use argument::{Argument, Arity};
pub use order::Sequencer;
pub use value::{FromValue, Value, ValueError};
