//! Declarative command-line commands.
//!
//! Describe a command as a type: register its argument fields and nested
//! subcommands in a [`Declaration`], implement [`Command::main`], and
//! call [`Command::run`]. The framework resolves the declaration
//! (merging extended parent declarations, most-derived field winning),
//! builds a [`clap`] parser tree with one branch per subcommand, parses
//! the invocation, coerces each value onto a fresh instance of the
//! selected command, and invokes its entry point.
//!
//! # Main entry points
//!
//! - [`Command::run`] — parse the process arguments and dispatch,
//!   reporting usage errors and failures to the user.
//! - [`Command::try_run_from`] — same pipeline over an explicit argument
//!   list, returning a [`RunError`] instead of exiting.
//! - [`Command::try_parse_from`] — stop after value assignment and hand
//!   back the materialized root instance.
//!
//! # Example
//!
//! ```
//! use commandeer::{Argument, Command, Declaration, Failure};
//!
//! #[derive(Default)]
//! struct Repeat {
//!     word: String,
//!     times: i64,
//! }
//!
//! impl Command for Repeat {
//!     fn declaration() -> Declaration<Self> {
//!         Declaration::new()
//!             .with_description("Repeats a word")
//!             .arg(
//!                 "word",
//!                 Argument::new().positional().required().with_help("Word to repeat"),
//!                 |cmd: &mut Self, value: String| cmd.word = value,
//!             )
//!             .arg(
//!                 "times",
//!                 Argument::integer().with_default(2).with_help("Repetitions"),
//!                 |cmd: &mut Self, value: i64| cmd.times = value,
//!             )
//!     }
//!
//!     fn main(&mut self) -> Result<(), Failure> {
//!         for _ in 0..self.times {
//!             println!("{}", self.word);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let repeat = Repeat::try_parse_from(["repeat", "hey"]).unwrap();
//! assert_eq!(repeat.word, "hey");
//! assert_eq!(repeat.times, 2);
//! ```
//!
//! Subcommands are nested command types registered with
//! [`Declaration::subcommand`]; shared argument sets are inherited with
//! [`Declaration::extend`]. See the `commandeer-cli` crate for a worked
//! multi-subcommand program.

mod command;
mod dispatch;
mod parser;
mod report;
mod resolve;

pub use commandeer_core::{Argument, Arity, FromValue, Sequencer, Value, ValueError};

pub use command::{Command, Declaration};
pub use dispatch::RunError;
pub use report::{Failure, warning};
pub use resolve::{DeclarationError, Resolved};
