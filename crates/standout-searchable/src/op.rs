//! Comparison operators produced by the constraint grammar.
//!
//! The [`Operator`] enum is closed: every operator has exactly one logical
//! complement, returned by [`Operator::negate`]. The parser classifies the
//! positive form of a value and flips it when the value was negated, so the
//! complement table is the only place negation semantics live.

use std::fmt;
use std::str::FromStr;

/// Operator of a single constraint.
///
/// Operators are grouped by the operand they take:
/// - **Scalar**: `Equal`, `NotEqual`, `Greater`, `GreaterEqual`, `Less`, `LessEqual`
/// - **Pattern**: `Like`, `NotLike` (`%` anchors are part of the operand)
/// - **List**: `In`, `NotIn`
/// - **None**: `IsNull`, `IsNotNull`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (exact match).
    Equal,
    /// Not equal.
    NotEqual,
    /// Greater than.
    Greater,
    /// Greater than or equal.
    GreaterEqual,
    /// Less than.
    Less,
    /// Less than or equal.
    LessEqual,
    /// Pattern match with `%` wildcards.
    Like,
    /// Negated pattern match.
    NotLike,
    /// Value is one of the given list.
    In,
    /// Value is none of the given list.
    NotIn,
    /// Value is null.
    IsNull,
    /// Value is not null.
    IsNotNull,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Operator; 12] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Less,
        Operator::LessEqual,
        Operator::Like,
        Operator::NotLike,
        Operator::In,
        Operator::NotIn,
        Operator::IsNull,
        Operator::IsNotNull,
    ];

    /// Returns the logical complement of this operator.
    ///
    /// Ordering operators flip to the opposite half-open range rather than
    /// being wrapped in a NOT: the complement of `>` is `<=`.
    pub fn negate(self) -> Operator {
        match self {
            Operator::Equal => Operator::NotEqual,
            Operator::NotEqual => Operator::Equal,
            Operator::Greater => Operator::LessEqual,
            Operator::GreaterEqual => Operator::Less,
            Operator::Less => Operator::GreaterEqual,
            Operator::LessEqual => Operator::Greater,
            Operator::Like => Operator::NotLike,
            Operator::NotLike => Operator::Like,
            Operator::In => Operator::NotIn,
            Operator::NotIn => Operator::In,
            Operator::IsNull => Operator::IsNotNull,
            Operator::IsNotNull => Operator::IsNull,
        }
    }

    /// Returns `true` if this operator takes a list operand.
    pub fn is_list_op(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Returns `true` if this operator takes no operand.
    pub fn is_null_op(self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Returns `true` for the ordering operators (`>`, `>=`, `<`, `<=`).
    pub fn is_ordering_op(self) -> bool {
        matches!(
            self,
            Operator::Greater | Operator::GreaterEqual | Operator::Less | Operator::LessEqual
        )
    }

    /// Returns `true` for the pattern operators.
    pub fn is_pattern_op(self) -> bool {
        matches!(self, Operator::Like | Operator::NotLike)
    }

    /// Returns `true` if this operator is the negative form of its pair.
    ///
    /// Ordering operators have no negative form; each is the complement of
    /// another ordering operator.
    pub fn is_negative(self) -> bool {
        matches!(
            self,
            Operator::NotEqual | Operator::NotLike | Operator::NotIn | Operator::IsNotNull
        )
    }

    /// Returns the symbol used by query builders for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::IsNull => "is null",
            Operator::IsNotNull => "is not null",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == lowered)
            .ok_or_else(|| format!("unknown operator: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_is_an_involution() {
        for op in Operator::ALL {
            assert_eq!(op.negate().negate(), op, "{op}");
            assert_ne!(op.negate(), op, "{op}");
        }
    }

    #[test]
    fn ordering_complements() {
        assert_eq!(Operator::Greater.negate(), Operator::LessEqual);
        assert_eq!(Operator::GreaterEqual.negate(), Operator::Less);
        assert_eq!(Operator::Less.negate(), Operator::GreaterEqual);
        assert_eq!(Operator::LessEqual.negate(), Operator::Greater);
    }

    #[test]
    fn negate_preserves_operand_shape() {
        for op in Operator::ALL {
            assert_eq!(op.is_list_op(), op.negate().is_list_op());
            assert_eq!(op.is_null_op(), op.negate().is_null_op());
            assert_eq!(op.is_pattern_op(), op.negate().is_pattern_op());
        }
    }

    #[test]
    fn operator_display() {
        assert_eq!(Operator::NotEqual.to_string(), "<>");
        assert_eq!(Operator::NotLike.to_string(), "not like");
        assert_eq!(Operator::IsNotNull.to_string(), "is not null");
    }

    #[test]
    fn operator_from_str() {
        assert_eq!(">=".parse::<Operator>(), Ok(Operator::GreaterEqual));
        assert_eq!("NOT IN".parse::<Operator>(), Ok(Operator::NotIn));
        assert!("between".parse::<Operator>().is_err());
    }
}
