//! Translating constraints into predicates on a [`FilterTarget`].
//!
//! Field keys come in two shapes:
//!
//! - `field` (or `!field`): a column of the queried record. A leading `!`
//!   applies the complement of the constraint.
//! - `relation:field` (or `!relation:field`): a column of a related record.
//!   The constraint is applied inside a correlated sub-query scoped to the
//!   relation; a leading `!` requires that *no* related row matches.
//!
//! Everything before the last `:` is the relation path. Multiple segments
//! are joined with `.` and scoped as a single relation path.

use tracing::trace;

use crate::constraint::{Constraint, ConstraintValue, NEGATION_MARKER};
use crate::error::{Result, SearchError};
use crate::mode::Mode;
use crate::op::Operator;
use crate::target::FilterTarget;

/// Separator between relation and field in a field key.
pub const RELATION_SEPARATOR: char = ':';

/// Joiner for multi-segment relation paths.
pub const RELATION_PATH_JOINER: char = '.';

/// A parsed field key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef<'a> {
    /// A column on the queried record.
    Column {
        /// Column name, without the negation marker.
        name: &'a str,
        /// Whether the key carried the negation marker.
        negated: bool,
    },
    /// A column on a related record.
    Relation {
        /// Relation path, segments joined with `.`.
        path: String,
        /// Column on the related record.
        field: &'a str,
        /// `true` if the related row must not exist.
        negated: bool,
    },
}

impl<'a> FieldRef<'a> {
    /// Parses a field key.
    ///
    /// Keys with an empty relation path or an empty leaf field are treated
    /// as plain columns.
    pub fn parse(key: &'a str) -> FieldRef<'a> {
        let (negated, rest) = match key.strip_prefix(NEGATION_MARKER) {
            Some(rest) => (true, rest),
            None => (false, key),
        };

        if let Some((relation, field)) = rest.rsplit_once(RELATION_SEPARATOR) {
            if !relation.is_empty() && !field.is_empty() {
                let path = relation
                    .split(RELATION_SEPARATOR)
                    .collect::<Vec<_>>()
                    .join(&RELATION_PATH_JOINER.to_string());
                return FieldRef::Relation {
                    path,
                    field,
                    negated,
                };
            }
        }

        FieldRef::Column {
            name: rest,
            negated,
        }
    }

    /// Returns `true` if this key targets a related record.
    pub fn is_relation(&self) -> bool {
        matches!(self, FieldRef::Relation { .. })
    }

    /// Returns `true` if the key carried the negation marker.
    pub fn is_negated(&self) -> bool {
        match self {
            FieldRef::Column { negated, .. } | FieldRef::Relation { negated, .. } => *negated,
        }
    }
}

/// Applies a constraint on `field` to `query`, combined with `mode`.
///
/// Relation keys recurse into a sub-query built with the same mode.
pub fn apply<Q: FilterTarget>(
    query: &mut Q,
    constraint: &Constraint,
    field: &str,
    mode: Mode,
) -> Result<()> {
    match FieldRef::parse(field) {
        FieldRef::Relation {
            path,
            field,
            negated,
        } => {
            trace!(relation = %path, field, exists = !negated, %mode, "scoping to relation");
            let mut scope = |sub: &mut Q| apply(sub, constraint, field, mode);
            query
                .where_has(mode, &path, !negated, &mut scope)
                .map_err(|e| match e {
                    SearchError::Scope { .. } => e,
                    other => SearchError::scope(path.as_str(), other),
                })
        }
        FieldRef::Column { name, negated: true } => {
            apply_column(query, &constraint.negated(), name, mode);
            Ok(())
        }
        FieldRef::Column {
            name,
            negated: false,
        } => {
            apply_column(query, constraint, name, mode);
            Ok(())
        }
    }
}

fn apply_column<Q: FilterTarget>(query: &mut Q, constraint: &Constraint, field: &str, mode: Mode) {
    let operator = constraint.operator();
    trace!(field, %operator, %mode, "applying constraint");

    match (operator, constraint.value()) {
        (Operator::In | Operator::NotIn, ConstraintValue::List(values)) => {
            query.where_in(mode, field, values, operator == Operator::NotIn);
        }
        (Operator::IsNull | Operator::IsNotNull, _) => {
            query.where_null(mode, field, operator == Operator::IsNotNull);
        }
        (_, ConstraintValue::Single(value)) => {
            query.where_op(mode, field, operator, value);
        }
        // Constraints only come from the parser, which pairs list operators
        // with lists and null operators with no operand.
        (_, value) => unreachable!("`{operator}` cannot take operand {value}"),
    }
}
