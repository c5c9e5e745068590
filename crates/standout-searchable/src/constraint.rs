//! Constraints parsed from raw parameter values.
//!
//! A [`Constraint`] is the result of running one raw string through the
//! filter grammar: an operator, its operand, and whether the raw value was
//! negated.
//!
//! # Grammar
//!
//! Before classification the value is trimmed of commas, spaces and the
//! whitespace controls `\t \n \r \0 \x0B` on both ends. A single leading `!`
//! is then removed and marks the constraint as negated; a second `!` is
//! literal content.
//!
//! The remainder is offered to the recognizers below in order, and the first
//! one that accepts it wins:
//!
//! | Rule       | Shape              | Operator (negated)         | Operand               |
//! |------------|--------------------|----------------------------|-----------------------|
//! | comparison | `(gt)5`, `(le)x`   | `>` `>=` `<` `<=` (flipped) | text after the tag    |
//! | null       | `(null)`           | `is null` (`is not null`)  | none                  |
//! | pattern    | `%ab`, `ab%`       | `like` (`not like`)        | value, `%` kept       |
//! | equality   | anything else      | `=`/`in` (`<>`/`not in`)   | value, split on `,`   |
//!
//! Only the equality rule splits on commas, so `(gt)a,b` and `%a,b` keep
//! their commas.
//!
//! # Example
//!
//! ```
//! use standout_searchable::{Constraint, ConstraintValue, Operator};
//!
//! let constraint = Constraint::parse("!(gt)5").unwrap();
//! assert_eq!(constraint.operator(), Operator::LessEqual);
//! assert_eq!(constraint.value(), &ConstraintValue::Single("5".into()));
//! assert!(constraint.is_negation());
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SearchError};
use crate::op::Operator;

/// Marker that negates a constraint (or a relation, in field names).
pub const NEGATION_MARKER: char = '!';

/// Literal matched by the null rule.
pub const NULL_LITERAL: &str = "(null)";

static COMPARISON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\((gt|ge|lt|le)\)(.+)$").expect("comparison pattern is valid")
});

static PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%.+|.+%$").expect("like pattern is valid"));

/// Operand of a constraint.
///
/// The shape is tied to the operator: `In`/`NotIn` carry a `List`,
/// `IsNull`/`IsNotNull` carry `Absent`, everything else a `Single`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintValue {
    /// Scalar operand.
    Single(String),
    /// Ordered list operand for membership tests.
    List(Vec<String>),
    /// No operand.
    Absent,
}

impl ConstraintValue {
    /// Extracts the scalar operand, if present.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ConstraintValue::Single(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the list operand, if present.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConstraintValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns `true` if there is no operand.
    pub fn is_absent(&self) -> bool {
        matches!(self, ConstraintValue::Absent)
    }
}

impl fmt::Display for ConstraintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintValue::Single(s) => write!(f, "{:?}", s),
            ConstraintValue::List(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", value)?;
                }
                write!(f, ")")
            }
            ConstraintValue::Absent => Ok(()),
        }
    }
}

/// A single parsed filter constraint.
///
/// Constraints are immutable. The negation flag is kept even though it is
/// already folded into the operator, so interceptors can tell `!abc` from a
/// value that merely parses to `<>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    operator: Operator,
    value: ConstraintValue,
    negated: bool,
}

impl Constraint {
    /// Parses a raw parameter value.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned = clean(raw);
        let (negated, rest) = strip_negation(cleaned);

        for recognize in RECOGNIZERS {
            if let Some((operator, value)) = recognize(rest) {
                let operator = if negated { operator.negate() } else { operator };
                return Ok(Constraint {
                    operator,
                    value,
                    negated,
                });
            }
        }

        Err(SearchError::malformed(raw))
    }

    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the operand.
    pub fn value(&self) -> &ConstraintValue {
        &self.value
    }

    /// Returns `true` if the raw value started with the negation marker.
    pub fn is_negation(&self) -> bool {
        self.negated
    }

    /// Returns the logical complement of this constraint.
    ///
    /// The operand is kept; the operator is complemented and the negation
    /// flag toggled.
    pub fn negated(&self) -> Constraint {
        Constraint {
            operator: self.operator.negate(),
            value: self.value.clone(),
            negated: !self.negated,
        }
    }
}

impl FromStr for Constraint {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        Constraint::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ConstraintValue::Absent => write!(f, "{}", self.operator),
            value => write!(f, "{} {}", self.operator, value),
        }
    }
}

type Recognizer = fn(&str) -> Option<(Operator, ConstraintValue)>;

// Order matters: the first recognizer that accepts the value wins.
const RECOGNIZERS: [Recognizer; 4] = [comparison, null_literal, pattern, equality];

fn clean(raw: &str) -> &str {
    raw.trim_matches(|c| matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

fn strip_negation(value: &str) -> (bool, &str) {
    match value.strip_prefix(NEGATION_MARKER) {
        Some(rest) => (true, rest),
        None => (false, value),
    }
}

fn comparison(value: &str) -> Option<(Operator, ConstraintValue)> {
    let captures = COMPARISON.captures(value)?;
    let operator = match &captures[1] {
        "gt" => Operator::Greater,
        "ge" => Operator::GreaterEqual,
        "lt" => Operator::Less,
        "le" => Operator::LessEqual,
        _ => return None,
    };
    Some((operator, ConstraintValue::Single(captures[2].to_string())))
}

fn null_literal(value: &str) -> Option<(Operator, ConstraintValue)> {
    (value == NULL_LITERAL).then_some((Operator::IsNull, ConstraintValue::Absent))
}

fn pattern(value: &str) -> Option<(Operator, ConstraintValue)> {
    PATTERN
        .is_match(value)
        .then(|| (Operator::Like, ConstraintValue::Single(value.to_string())))
}

fn equality(value: &str) -> Option<(Operator, ConstraintValue)> {
    if value.contains(',') {
        let values = value.split(',').map(str::to_string).collect();
        Some((Operator::In, ConstraintValue::List(values)))
    } else {
        Some((Operator::Equal, ConstraintValue::Single(value.to_string())))
    }
}
