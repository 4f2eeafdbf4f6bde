//! Argument descriptors.
//!
//! An [`Argument`] is an immutable declaration of one command-line
//! option's shape: positional or flag, required or optional, single- or
//! multiple-valued, with an optional default, an optional choice set, and
//! a validator that coerces the raw token into a typed [`Value`]. The
//! descriptor never parses anything itself; the parsing library consumes
//! its shape and invokes its coercion during the parse.

use std::sync::Arc;

use crate::order::Sequencer;
use crate::value::Value;

/// How many value tokens an argument consumes.
///
/// Derived from the `(multiple, required, positional)` combination by
/// [`Argument::arity`]; the parsing library uses it to decide how many
/// tokens to claim for the argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one value token.
    ExactlyOne,
    /// Zero or one value token.
    ZeroOrOne,
    /// One or more value tokens.
    OneOrMore,
    /// Zero or more value tokens.
    ZeroOrMore,
}

type Validator = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Declaration of a single command-line argument.
///
/// Arguments are created with one of the named constructors and refined
/// with builder methods. Construction assigns a process-unique sequence
/// number (see [`Sequencer`]), which fixes the argument's position among
/// all arguments declared anywhere in the program; the descriptor is
/// immutable afterwards.
///
/// # Examples
///
/// ```
/// use commandeer_core::{Argument, Arity};
///
/// let count = Argument::integer()
///     .positional()
///     .required()
///     .with_help("How many times to run");
/// assert!(count.is_positional());
/// assert_eq!(count.arity(), Arity::ExactlyOne);
///
/// let files = Argument::new().positional().multiple();
/// assert_eq!(files.arity(), Arity::ZeroOrMore);
/// ```
pub struct Argument {
    positional: bool,
    required: bool,
    multiple: bool,
    default: Option<Value>,
    choices: Option<Vec<Value>>,
    help: Option<String>,
    validator: Validator,
    sequence: u64,
}

impl Argument {
    fn with_validator_fn(validator: Validator) -> Self {
        Self {
            positional: false,
            required: false,
            multiple: false,
            default: None,
            choices: None,
            help: None,
            validator,
            sequence: Sequencer::global().next(),
        }
    }

    /// Creates a string argument (tokens pass through unchanged).
    pub fn new() -> Self {
        Self::with_validator_fn(Arc::new(|raw| Ok(Value::Str(raw.to_string()))))
    }

    /// Creates an integer argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use commandeer_core::{Argument, Value};
    ///
    /// let arg = Argument::integer();
    /// assert_eq!(arg.coerce("12"), Ok(Value::Int(12)));
    /// assert!(arg.coerce("twelve").is_err());
    /// ```
    pub fn integer() -> Self {
        Self::with_validator_fn(Arc::new(|raw| {
            raw.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("'{raw}' is not a valid integer"))
        }))
    }

    /// Creates a floating-point argument.
    pub fn float() -> Self {
        Self::with_validator_fn(Arc::new(|raw| {
            raw.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("'{raw}' is not a valid number"))
        }))
    }

    /// Creates an argument with a custom validator.
    ///
    /// The validator coerces a raw token into a typed [`Value`]; a
    /// returned error becomes a parser usage error.
    ///
    /// # Examples
    ///
    /// ```
    /// use commandeer_core::{Argument, Value};
    ///
    /// let port = Argument::with_validator(|raw| {
    ///     raw.parse::<i64>()
    ///         .ok()
    ///         .filter(|p| (1..=65535).contains(p))
    ///         .map(Value::Int)
    ///         .ok_or_else(|| format!("'{raw}' is not a valid port"))
    /// });
    /// assert_eq!(port.coerce("8080"), Ok(Value::Int(8080)));
    /// assert!(port.coerce("99999").is_err());
    /// ```
    pub fn with_validator(
        validator: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self::with_validator_fn(Arc::new(validator))
    }

    /// Marks the argument as positional (no `--` prefix).
    pub fn positional(mut self) -> Self {
        self.positional = true;
        self
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allows the argument to collect multiple values.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Sets the default used when the argument is absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restricts accepted values to a finite choice set.
    ///
    /// Membership is checked during the parse, after coercion.
    pub fn with_choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the help text shown in usage output.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Whether the argument is positional.
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Whether the argument is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the argument collects multiple values.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// The default value, if one was declared.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The allowed choices, if restricted.
    pub fn choices(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    /// The help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The construction sequence number.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Number of value tokens the parser should claim for this argument.
    ///
    /// A positional that is not required must admit zero occurrences, so
    /// it maps to [`Arity::ZeroOrOne`]; an optional flag still consumes
    /// exactly one token whenever it appears.
    ///
    /// # Examples
    ///
    /// ```
    /// use commandeer_core::{Argument, Arity};
    ///
    /// assert_eq!(Argument::new().multiple().required().arity(), Arity::OneOrMore);
    /// assert_eq!(Argument::new().multiple().arity(), Arity::ZeroOrMore);
    /// assert_eq!(Argument::new().positional().arity(), Arity::ZeroOrOne);
    /// assert_eq!(Argument::new().arity(), Arity::ExactlyOne);
    /// ```
    pub fn arity(&self) -> Arity {
        if self.multiple {
            if self.required {
                Arity::OneOrMore
            } else {
                Arity::ZeroOrMore
            }
        } else if self.positional && !self.required {
            Arity::ZeroOrOne
        } else {
            Arity::ExactlyOne
        }
    }

    /// Coerces one raw token through the validator and the choice set.
    ///
    /// Runs inside the parsing library's value handling, so a returned
    /// error surfaces to the user as a usage error.
    pub fn coerce(&self, raw: &str) -> Result<Value, String> {
        let value = (self.validator)(raw)?;
        if let Some(choices) = &self.choices {
            if !choices.contains(&value) {
                let allowed = choices
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(format!("'{value}' is not one of: {allowed}"));
            }
        }
        Ok(value)
    }

    /// Normalizes the raw parse result for this argument.
    ///
    /// Multiple-valued arguments always yield a list, so zero matched
    /// occurrences come back as an empty list rather than an absent
    /// value. Single-valued arguments yield their value, or `None` when
    /// absent (the caller then falls back to [`Argument::default`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use commandeer_core::{Argument, Value};
    ///
    /// let files = Argument::new().multiple();
    /// assert_eq!(files.process_value(vec![]), Some(Value::List(vec![])));
    ///
    /// let name = Argument::new();
    /// assert_eq!(name.process_value(vec![]), None);
    /// assert_eq!(name.process_value(vec![Value::from("x")]), Some(Value::from("x")));
    /// ```
    pub fn process_value(&self, raw: Vec<Value>) -> Option<Value> {
        if self.multiple {
            Some(Value::List(raw))
        } else {
            raw.into_iter().next()
        }
    }
}

impl Default for Argument {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argument")
            .field("positional", &self.positional)
            .field("required", &self.required)
            .field("multiple", &self.multiple)
            .field("default", &self.default)
            .field("choices", &self.choices)
            .field("help", &self.help)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_arity_mapping() {
        assert_eq!(
            Argument::new().multiple().required().arity(),
            Arity::OneOrMore
        );
        assert_eq!(Argument::new().multiple().arity(), Arity::ZeroOrMore);
        assert_eq!(
            Argument::new().positional().multiple().required().arity(),
            Arity::OneOrMore
        );
        assert_eq!(Argument::new().positional().arity(), Arity::ZeroOrOne);
        assert_eq!(
            Argument::new().positional().required().arity(),
            Arity::ExactlyOne
        );
        assert_eq!(Argument::new().arity(), Arity::ExactlyOne);
        assert_eq!(Argument::new().required().arity(), Arity::ExactlyOne);
    }

    #[test]
    fn test_coerce_integer() {
        let arg = Argument::integer();
        assert_eq!(arg.coerce("-7"), Ok(Value::Int(-7)));
        assert!(arg.coerce("x").is_err());
    }

    #[test]
    fn test_coerce_enforces_choices() {
        let arg = Argument::new().with_choices(["x", "y"]);
        assert_eq!(arg.coerce("x"), Ok(Value::from("x")));
        let err = arg.coerce("z").unwrap_err();
        assert!(err.contains("'z'"), "unexpected message: {err}");
        assert!(err.contains("x, y"), "unexpected message: {err}");
    }

    #[test]
    fn test_typed_choices_checked_after_coercion() {
        let arg = Argument::integer().with_choices([1i64, 2, 3]);
        assert_eq!(arg.coerce("2"), Ok(Value::Int(2)));
        assert!(arg.coerce("4").is_err());
        assert!(arg.coerce("two").is_err());
    }

    #[test]
    fn test_process_value_multiple_absent_is_empty_list() {
        let arg = Argument::integer().multiple();
        assert_eq!(arg.process_value(vec![]), Some(Value::List(vec![])));
    }

    #[test]
    fn test_process_value_multiple_preserves_order() {
        let arg = Argument::integer().multiple();
        let raw = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(arg.process_value(raw.clone()), Some(Value::List(raw)));
    }

    #[test]
    fn test_sequence_numbers_increase_with_construction() {
        let a = Argument::new();
        let b = Argument::new();
        assert!(b.sequence() > a.sequence());
    }

    #[test]
    fn test_concurrent_construction_keeps_sequences_distinct() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..50)
                        .map(|_| Argument::new().sequence())
                        .collect::<Vec<u64>>()
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.join().expect("construction thread panicked"));
        }
        let distinct: HashSet<u64> = all.iter().copied().collect();
        assert_eq!(distinct.len(), all.len());
    }
}
