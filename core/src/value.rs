//! Typed values produced by argument coercion.
//!
//! Every validator coerces a raw command-line token into a [`Value`]. The
//! framework later converts values into native Rust types through the
//! [`FromValue`] trait when assigning them to command fields. Values are
//! serde-serializable (untagged), so parsed invocations can be dumped as
//! plain JSON for logging or configuration snapshots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A typed argument value.
///
/// This is the common currency between validators, choice sets, defaults,
/// and field setters.
///
/// # Examples
///
/// ```
/// use commandeer_core::Value;
///
/// let v = Value::from(42);
/// assert_eq!(v.as_int(), Some(42));
/// assert_eq!(v.to_string(), "42");
///
/// let list = Value::List(vec![Value::from(1), Value::from(2)]);
/// assert_eq!(list.to_string(), "1,2");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// String value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Ordered sequence of values (multiple-valued arguments).
    List(Vec<Value>),
}

impl Value {
    /// Returns the contained string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained integer, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained float; integers widen losslessly enough for
    /// CLI use.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the contained boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained list, if this is a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Value-to-field conversion failure.
///
/// Raised when a registered setter expects a different type than the
/// argument's validator produced. This indicates a declaration mistake,
/// not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The value's variant does not match the setter's expected type.
    #[error("expected {expected} value, found {found}")]
    TypeMismatch {
        /// Type the setter expects.
        expected: &'static str,
        /// Variant that was actually produced.
        found: &'static str,
    },
}

/// Conversion from a coerced [`Value`] into a native field type.
///
/// Implemented for the scalar types, `Vec<T>` (multiple-valued
/// arguments), `Option<T>`, and [`Value`] itself.
///
/// # Examples
///
/// ```
/// use commandeer_core::{FromValue, Value};
///
/// let n = i64::from_value(&Value::Int(7)).unwrap();
/// assert_eq!(n, 7);
///
/// let items = Vec::<i64>::from_value(&Value::List(vec![Value::Int(1), Value::Int(2)])).unwrap();
/// assert_eq!(items, vec![1, 2]);
///
/// assert!(String::from_value(&Value::Int(7)).is_err());
/// ```
pub trait FromValue: Sized {
    /// Converts a value into `Self`, or reports the mismatch.
    fn from_value(value: &Value) -> Result<Self, ValueError>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        Ok(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or(ValueError::TypeMismatch {
                expected: "string",
                found: value.type_name(),
            })
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_int().ok_or(ValueError::TypeMismatch {
            expected: "integer",
            found: value.type_name(),
        })
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_float().ok_or(ValueError::TypeMismatch {
            expected: "float",
            found: value.type_name(),
        })
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_bool().ok_or(ValueError::TypeMismatch {
            expected: "boolean",
            found: value.type_name(),
        })
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        let items = value.as_list().ok_or(ValueError::TypeMismatch {
            expected: "list",
            found: value.type_name(),
        })?;
        items.iter().map(T::from_value).collect()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        T::from_value(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(String::from_value(&Value::from("abc")).unwrap(), "abc");
        assert_eq!(i64::from_value(&Value::Int(-3)).unwrap(), -3);
        assert_eq!(f64::from_value(&Value::Float(1.5)).unwrap(), 1.5);
        assert_eq!(f64::from_value(&Value::Int(2)).unwrap(), 2.0);
        assert!(bool::from_value(&Value::Bool(true)).unwrap());
    }

    #[test]
    fn test_mismatch_reports_both_types() {
        let err = i64::from_value(&Value::from("five")).unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                expected: "integer",
                found: "string",
            }
        );
    }

    #[test]
    fn test_list_conversion_preserves_order() {
        let list = Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        assert_eq!(Vec::<i64>::from_value(&list).unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&Value::List(vec![
            Value::Int(1),
            Value::from("two"),
        ]))
        .unwrap();
        assert_eq!(json, r#"[1,"two"]"#);
    }
}
