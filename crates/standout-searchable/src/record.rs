//! In-memory records that a [`Filter`](crate::Filter) can be evaluated against.
//!
//! A [`Record`] exposes its fields as [`Value`]s and its relations as lists
//! of related records. Constraint operands are strings; they are coerced to
//! the record's value type at comparison time.

use std::cmp::Ordering;

/// Runtime value of a record field, borrowed from the record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Field not present or null.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Compares this value with a string operand.
    ///
    /// Numbers compare numerically when the operand parses as a number,
    /// booleans accept `true`/`false`/`1`/`0`. Returns `None` for null
    /// values and operands that cannot be coerced.
    pub fn compare_operand(&self, operand: &str) -> Option<Ordering> {
        match self {
            Value::String(s) => Some((*s).cmp(operand)),
            Value::Number(n) => n.compare(Number::parse(operand)?),
            Value::Bool(b) => Some(b.cmp(&parse_bool(operand)?)),
            Value::None => None,
        }
    }

    /// Returns the value as text for pattern matching.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some((*s).to_string()),
            Value::Number(Number::I64(n)) => Some(n.to_string()),
            Value::Number(Number::U64(n)) => Some(n.to_string()),
            Value::Number(Number::F64(n)) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::None => None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Number(Number::I64(n))
    }
}

impl From<u64> for Value<'_> {
    fn from(n: u64) -> Self {
        Value::Number(Number::U64(n))
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(Number::F64(n))
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// Numeric value.
///
/// Comparisons between different variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Parses a numeric operand, preferring integer forms.
    pub fn parse(s: &str) -> Option<Number> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Some(Number::I64(n));
        }
        if let Ok(n) = s.parse::<u64>() {
            return Some(Number::U64(n));
        }
        s.parse::<f64>().ok().filter(|n| !n.is_nan()).map(Number::F64)
    }

    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// A record that filters can be evaluated against.
///
/// # Example
///
/// ```
/// use standout_searchable::{Record, Value};
///
/// struct Comment {
///     body: String,
/// }
///
/// struct Post {
///     title: String,
///     score: i64,
///     comments: Vec<Comment>,
/// }
///
/// impl Record for Comment {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "body" => Value::from(&self.body),
///             _ => Value::None,
///         }
///     }
/// }
///
/// impl Record for Post {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::from(&self.title),
///             "score" => Value::from(self.score),
///             _ => Value::None,
///         }
///     }
///
///     fn related(&self, relation: &str) -> Vec<&dyn Record> {
///         match relation {
///             "comments" => self.comments.iter().map(|c| c as &dyn Record).collect(),
///             _ => Vec::new(),
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::None`] if absent or null.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns the records related through `relation`.
    fn related(&self, _relation: &str) -> Vec<&dyn Record> {
        Vec::new()
    }
}
