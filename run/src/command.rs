//! Command declarations and the [`Command`] trait.
//!
//! A command is a plain struct implementing [`Command`]. Its
//! [`declaration`](Command::declaration) registers arguments (each with a
//! typed setter writing into one of the struct's fields) and nested
//! subcommand types, in the order they should appear. Declarations
//! compose: [`Declaration::extend`] overlays a parent command's entries
//! under the child's, with the parent's setters routed through an
//! embedding accessor, so shared argument sets live in one place.

use std::ffi::OsString;
use std::marker::PhantomData;
use std::sync::Arc;

use commandeer_core::{Argument, FromValue, Value, ValueError};

use crate::dispatch::{self, RunError};
use crate::report::Failure;
use crate::resolve::DeclarationError;

/// Setter invoked with the processed value for one argument field.
pub(crate) type Assign<C> = Box<dyn Fn(&mut C, &Value) -> Result<(), ValueError>>;

pub(crate) struct Entry<C> {
    pub(crate) name: String,
    /// Extension distance: 0 for entries declared on the command itself,
    /// 1 for entries inherited from its parent, and so on.
    pub(crate) depth: u32,
    pub(crate) kind: EntryKind<C>,
}

pub(crate) enum EntryKind<C> {
    Arg {
        argument: Arc<Argument>,
        assign: Assign<C>,
    },
    Sub(Box<dyn Nested>),
}

/// Type-erased view of a nested command definition.
///
/// Lets a declaration hold subcommands of arbitrary command types: the
/// parser builder asks each one for its parser branch, and the
/// dispatcher hands the selected branch its parse result.
pub(crate) trait Nested {
    fn build(&self, name: &str) -> Result<clap::Command, DeclarationError>;
    fn dispatch(&self, matches: &clap::ArgMatches) -> Result<(), RunError>;
}

struct NestedDef<S: Command> {
    marker: PhantomData<fn() -> S>,
}

impl<S: Command> Nested for NestedDef<S> {
    fn build(&self, name: &str) -> Result<clap::Command, DeclarationError> {
        let resolved = S::declaration().resolve()?;
        crate::parser::build_parser(name, &resolved)
    }

    fn dispatch(&self, matches: &clap::ArgMatches) -> Result<(), RunError> {
        let resolved = S::declaration().resolve()?;
        if let Some((name, sub_matches)) = matches.subcommand() {
            let nested = resolved
                .find_subcommand(name)
                .ok_or_else(|| RunError::UnknownSubcommand(name.to_string()))?;
            return nested.dispatch(sub_matches);
        }
        let mut instance = S::default();
        dispatch::assign_values(&mut instance, &resolved, matches)?;
        instance.main()?;
        Ok(())
    }
}

/// Declarative description of one command: its arguments, subcommands,
/// and presentation metadata.
///
/// Built by [`Command::declaration`] with chained registration calls.
/// Registration order is preserved; arguments are additionally ordered by
/// their construction sequence when the declaration is resolved.
///
/// # Examples
///
/// ```
/// use commandeer::{Argument, Command, Declaration, Failure};
///
/// #[derive(Default)]
/// struct Greet {
///     name: String,
/// }
///
/// impl Command for Greet {
///     fn declaration() -> Declaration<Self> {
///         Declaration::new()
///             .with_description("Greets someone by name")
///             .arg(
///                 "name",
///                 Argument::new().positional().required(),
///                 |cmd: &mut Self, value: String| cmd.name = value,
///             )
///     }
///
///     fn main(&mut self) -> Result<(), Failure> {
///         println!("Hello, {}!", self.name);
///         Ok(())
///     }
/// }
///
/// let greet = Greet::try_parse_from(["greet", "World"]).unwrap();
/// assert_eq!(greet.name, "World");
/// ```
pub struct Declaration<C> {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) subcommand_label: Option<String>,
    pub(crate) entries: Vec<Entry<C>>,
}

impl<C: Command> Declaration<C> {
    /// Creates an empty declaration.
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            subcommand_label: None,
            entries: Vec::new(),
        }
    }

    /// Overrides the program name shown in usage output.
    ///
    /// When unset, the binary name from the invocation is used.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the human-readable description of the command.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the display name for the subcommand group (default
    /// `"command"`).
    pub fn with_subcommand_label(mut self, label: &str) -> Self {
        self.subcommand_label = Some(label.to_string());
        self
    }

    /// Registers an argument field.
    ///
    /// `name` is the field name: positional arguments appear under it in
    /// usage, flags are invoked as `--name`. The setter receives the
    /// coerced value converted to `T` and writes it into the instance;
    /// it is not called when an optional argument is absent and has no
    /// default, leaving the field at its `Default` value.
    pub fn arg<T: FromValue>(
        mut self,
        name: &str,
        argument: Argument,
        assign: impl Fn(&mut C, T) + 'static,
    ) -> Self {
        let assign: Assign<C> = Box::new(move |cmd, value| {
            assign(cmd, T::from_value(value)?);
            Ok(())
        });
        self.entries.push(Entry {
            name: name.to_string(),
            depth: 0,
            kind: EntryKind::Arg {
                argument: Arc::new(argument),
                assign,
            },
        });
        self
    }

    /// Registers a nested subcommand under `name`.
    ///
    /// When the user selects `name`, an `S` instance is materialized and
    /// dispatched instead of this command.
    pub fn subcommand<S: Command>(mut self, name: &str) -> Self {
        self.entries.push(Entry {
            name: name.to_string(),
            depth: 0,
            kind: EntryKind::Sub(Box::new(NestedDef::<S> {
                marker: PhantomData,
            })),
        });
        self
    }

    /// Inherits a parent command's declaration.
    ///
    /// The parent's entries are overlaid under this declaration's own:
    /// an entry registered here with the same field name completely
    /// replaces the inherited one. Parent setters are routed through
    /// `embed`, so the parent command lives as an embedded struct inside
    /// the child. Description, program name, and subcommand label are
    /// inherited when the child has not set them.
    ///
    /// # Examples
    ///
    /// ```
    /// use commandeer::{Argument, Command, Declaration, Failure};
    ///
    /// #[derive(Default)]
    /// struct Common {
    ///     verbose: String,
    /// }
    ///
    /// impl Command for Common {
    ///     fn declaration() -> Declaration<Self> {
    ///         Declaration::new().arg(
    ///             "verbose",
    ///             Argument::new().with_default("off"),
    ///             |cmd: &mut Self, value: String| cmd.verbose = value,
    ///         )
    ///     }
    ///
    ///     fn main(&mut self) -> Result<(), Failure> {
    ///         Ok(())
    ///     }
    /// }
    ///
    /// #[derive(Default)]
    /// struct Push {
    ///     common: Common,
    ///     target: String,
    /// }
    ///
    /// impl Command for Push {
    ///     fn declaration() -> Declaration<Self> {
    ///         Declaration::new()
    ///             .extend(Common::declaration(), |cmd: &mut Self| &mut cmd.common)
    ///             .arg(
    ///                 "target",
    ///                 Argument::new().positional().required(),
    ///                 |cmd: &mut Self, value: String| cmd.target = value,
    ///             )
    ///     }
    ///
    ///     fn main(&mut self) -> Result<(), Failure> {
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let push = Push::try_parse_from(["push", "origin", "--verbose", "on"]).unwrap();
    /// assert_eq!(push.common.verbose, "on");
    /// assert_eq!(push.target, "origin");
    /// ```
    pub fn extend<P: Command>(
        mut self,
        parent: Declaration<P>,
        embed: fn(&mut C) -> &mut P,
    ) -> Self {
        if self.name.is_none() {
            self.name = parent.name;
        }
        if self.description.is_none() {
            self.description = parent.description;
        }
        if self.subcommand_label.is_none() {
            self.subcommand_label = parent.subcommand_label;
        }
        for entry in parent.entries {
            let kind = match entry.kind {
                EntryKind::Arg { argument, assign } => EntryKind::Arg {
                    argument,
                    assign: Box::new(move |cmd: &mut C, value: &Value| assign(embed(cmd), value)),
                },
                EntryKind::Sub(nested) => EntryKind::Sub(nested),
            };
            self.entries.push(Entry {
                name: entry.name,
                depth: entry.depth + 1,
                kind,
            });
        }
        self
    }
}

impl<C: Command> Default for Declaration<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A declaratively described command-line command.
///
/// Implementors provide a [`declaration`](Command::declaration) and an
/// entry point; the framework derives the parser, coerces values onto a
/// fresh instance, and calls [`main`](Command::main) on whichever command
/// the invocation selects (the root, or a nested subcommand).
///
/// # Examples
///
/// ```no_run
/// use commandeer::{Argument, Command, Declaration, Failure};
///
/// #[derive(Default)]
/// struct Count {
///     n: i64,
/// }
///
/// impl Command for Count {
///     fn declaration() -> Declaration<Self> {
///         Declaration::new().arg(
///             "n",
///             Argument::integer().positional().required(),
///             |cmd: &mut Self, value: i64| cmd.n = value,
///         )
///     }
///
///     fn main(&mut self) -> Result<(), Failure> {
///         for i in 1..=self.n {
///             println!("{i}");
///         }
///         Ok(())
///     }
/// }
///
/// fn main() {
///     Count::run();
/// }
/// ```
pub trait Command: Default + 'static {
    /// Declares this command's arguments and subcommands.
    fn declaration() -> Declaration<Self>;

    /// Hook running after instance creation and before the declaration
    /// is frozen into a parser.
    ///
    /// The default keeps the declaration unchanged. Override to inject
    /// arguments dynamically; this is the only point where the resolved
    /// sets can still change. Runs for the invoked root command only:
    /// subcommand instances are created after parsing, when their
    /// parsers already exist.
    fn before_parse(&mut self, declaration: Declaration<Self>) -> Declaration<Self> {
        declaration
    }

    /// Entry point, invoked with all argument fields assigned.
    ///
    /// Returning a [`Failure`] terminates the process with its exit code
    /// under [`run`](Command::run); [`try_run_from`](Command::try_run_from)
    /// returns it to the caller instead.
    fn main(&mut self) -> Result<(), Failure>;

    /// Parses the process arguments and dispatches.
    ///
    /// On a parse error the parsing library prints usage and exits
    /// non-zero; on a [`Failure`] the message is logged, printed, and
    /// the process exits with the failure's code.
    fn run() {
        dispatch::run::<Self>();
    }

    /// Like [`run`](Command::run), but takes an explicit argument list
    /// (the first item is the program name) and returns errors instead
    /// of exiting.
    fn try_run_from<I, T>(argv: I) -> Result<(), RunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        dispatch::try_run_from::<Self, I, T>(argv)
    }

    /// Parses an explicit argument list and returns the materialized
    /// root instance without dispatching its entry point.
    ///
    /// The root's own argument fields are assigned; subcommand selection
    /// (if any) is not followed.
    fn try_parse_from<I, T>(argv: I) -> Result<Self, RunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        dispatch::try_parse_from::<Self, I, T>(argv)
    }
}
