//! A recorded predicate list implementing [`FilterTarget`].
//!
//! [`Filter`] keeps every predicate it receives, in order, together with the
//! mode it was combined with. It can be inspected, printed, or evaluated
//! against in-memory [`Record`]s.
//!
//! # Evaluation
//!
//! Clauses combine left to right with AND binding tighter than OR, as in
//! SQL: `a and b or c and d` means `(a ∧ b) ∨ (c ∧ d)`. For a request that
//! uses a single mode this is plain conjunction or disjunction. An empty
//! filter matches everything.
//!
//! Null field values never satisfy comparison, pattern or membership
//! predicates; only `is null` matches them.

use std::cmp::Ordering;
use std::fmt;

use regex::RegexBuilder;

use crate::apply::RELATION_PATH_JOINER;
use crate::error::Result;
use crate::mode::Mode;
use crate::op::Operator;
use crate::record::{Record, Value};
use crate::target::{FilterTarget, ScopeFn};

/// A single predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field <op> value`.
    Compare {
        field: String,
        op: Operator,
        value: String,
    },
    /// `field in (values)` or `field not in (values)`.
    In {
        field: String,
        values: Vec<String>,
        negated: bool,
    },
    /// `field is null` or `field is not null`.
    Null { field: String, negated: bool },
    /// Related rows on `relation` matching `scope` exist (or not).
    Has {
        relation: String,
        exists: bool,
        scope: Filter,
    },
}

impl Predicate {
    /// Evaluates this predicate against a record.
    pub fn matches(&self, record: &dyn Record) -> bool {
        match self {
            Predicate::Compare { field, op, value } => {
                compare(&record.field_value(field), *op, value)
            }
            Predicate::In {
                field,
                values,
                negated,
            } => {
                let actual = record.field_value(field);
                if actual.is_none() {
                    return false;
                }
                let found = values
                    .iter()
                    .any(|v| actual.compare_operand(v) == Some(Ordering::Equal));
                found != *negated
            }
            Predicate::Null { field, negated } => record.field_value(field).is_none() != *negated,
            Predicate::Has {
                relation,
                exists,
                scope,
            } => {
                let found = related_rows(record, relation)
                    .into_iter()
                    .any(|row| scope.matches(row));
                found == *exists
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { field, op, .. } if op.is_null_op() => write!(f, "{} {}", field, op),
            Predicate::Compare { field, op, value } => write!(f, "{} {} {:?}", field, op, value),
            Predicate::In {
                field,
                values,
                negated,
            } => {
                let op = if *negated { Operator::NotIn } else { Operator::In };
                let list: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
                write!(f, "{} {} ({})", field, op, list.join(", "))
            }
            Predicate::Null { field, negated } => {
                let op = if *negated {
                    Operator::IsNotNull
                } else {
                    Operator::IsNull
                };
                write!(f, "{} {}", field, op)
            }
            Predicate::Has {
                relation,
                exists,
                scope,
            } => {
                let keyword = if *exists { "exists" } else { "not exists" };
                write!(f, "{} {} ({})", keyword, relation, scope)
            }
        }
    }
}

/// A predicate together with the mode it was combined with.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// How this clause combines with the clauses before it.
    pub mode: Mode,
    /// The predicate.
    pub predicate: Predicate,
}

/// An ordered list of predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// Creates an empty filter.
    ///
    /// An empty filter matches all records.
    pub fn new() -> Self {
        Filter::default()
    }

    /// Returns the clauses in the order they were added.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if this filter has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Tests if a record matches this filter.
    pub fn matches(&self, record: &dyn Record) -> bool {
        let mut group = true;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 && clause.mode == Mode::Or {
                if group {
                    return true;
                }
                group = true;
            }
            group = group && clause.predicate.matches(record);
        }
        group
    }

    /// Filters a slice, returning references to matching records.
    pub fn filter<'a, T: Record>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Counts the number of matching records.
    pub fn count<T: Record>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    fn push(&mut self, mode: Mode, predicate: Predicate) {
        self.clauses.push(Clause { mode, predicate });
    }

    fn push_has(
        &mut self,
        mode: Mode,
        relation: &str,
        exists: bool,
        scope: &mut ScopeFn<'_, Self>,
    ) -> Result<()> {
        let mut inner = Filter::new();
        scope(&mut inner)?;
        self.push(
            mode,
            Predicate::Has {
                relation: relation.to_string(),
                exists,
                scope: inner,
            },
        );
        Ok(())
    }
}

impl FilterTarget for Filter {
    fn and_where(&mut self, field: &str, op: Operator, value: &str) {
        self.push(Mode::And, compare_predicate(field, op, value));
    }

    fn or_where(&mut self, field: &str, op: Operator, value: &str) {
        self.push(Mode::Or, compare_predicate(field, op, value));
    }

    fn and_where_in(&mut self, field: &str, values: &[String], negated: bool) {
        self.push(Mode::And, in_predicate(field, values, negated));
    }

    fn or_where_in(&mut self, field: &str, values: &[String], negated: bool) {
        self.push(Mode::Or, in_predicate(field, values, negated));
    }

    fn and_where_null(&mut self, field: &str, negated: bool) {
        self.push(Mode::And, null_predicate(field, negated));
    }

    fn or_where_null(&mut self, field: &str, negated: bool) {
        self.push(Mode::Or, null_predicate(field, negated));
    }

    fn and_where_has(
        &mut self,
        relation: &str,
        exists: bool,
        scope: &mut ScopeFn<'_, Self>,
    ) -> Result<()> {
        self.push_has(Mode::And, relation, exists, scope)
    }

    fn or_where_has(
        &mut self,
        relation: &str,
        exists: bool,
        scope: &mut ScopeFn<'_, Self>,
    ) -> Result<()> {
        self.push_has(Mode::Or, relation, exists, scope)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", clause.mode)?;
            }
            write!(f, "{}", clause.predicate)?;
        }
        Ok(())
    }
}

fn compare_predicate(field: &str, op: Operator, value: &str) -> Predicate {
    Predicate::Compare {
        field: field.to_string(),
        op,
        value: value.to_string(),
    }
}

fn in_predicate(field: &str, values: &[String], negated: bool) -> Predicate {
    Predicate::In {
        field: field.to_string(),
        values: values.to_vec(),
        negated,
    }
}

fn null_predicate(field: &str, negated: bool) -> Predicate {
    Predicate::Null {
        field: field.to_string(),
        negated,
    }
}

fn compare(actual: &Value<'_>, op: Operator, operand: &str) -> bool {
    if actual.is_none() {
        return op == Operator::IsNull;
    }

    match op {
        Operator::IsNull => false,
        Operator::IsNotNull => true,
        Operator::Like | Operator::NotLike => match actual.as_text() {
            Some(text) => like(operand, &text) == (op == Operator::Like),
            None => false,
        },
        Operator::In | Operator::NotIn => {
            let found = operand
                .split(',')
                .any(|v| actual.compare_operand(v) == Some(Ordering::Equal));
            found == (op == Operator::In)
        }
        _ => match actual.compare_operand(operand) {
            Some(ordering) => eval_ordering(op, ordering),
            None => false,
        },
    }
}

fn eval_ordering(op: Operator, ordering: Ordering) -> bool {
    match op {
        Operator::Equal => ordering == Ordering::Equal,
        Operator::NotEqual => ordering != Ordering::Equal,
        Operator::Greater => ordering == Ordering::Greater,
        Operator::GreaterEqual => ordering != Ordering::Less,
        Operator::Less => ordering == Ordering::Less,
        Operator::LessEqual => ordering != Ordering::Greater,
        _ => false,
    }
}

/// Matches `text` against a LIKE pattern: `%` is any run of characters,
/// `_` exactly one. Matching is case-insensitive.
fn like(pattern: &str, text: &str) -> bool {
    let mut expr = String::from("^");
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '%' | '_' => {
                expr.push_str(&regex::escape(&literal));
                literal.clear();
                expr.push_str(if c == '%' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    expr.push_str(&regex::escape(&literal));
    expr.push('$');

    RegexBuilder::new(&expr)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

fn related_rows<'a>(record: &'a dyn Record, path: &str) -> Vec<&'a dyn Record> {
    path.split(RELATION_PATH_JOINER)
        .fold(vec![record], |rows, segment| {
            rows.into_iter()
                .flat_map(|row| row.related(segment))
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row<'a> {
        name: Option<&'a str>,
        age: i64,
    }

    impl Record for Row<'_> {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::from(self.name),
                "age" => Value::from(self.age),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn like_patterns() {
        assert!(like("ab%", "abc"));
        assert!(like("%bc", "abc"));
        assert!(like("%b%", "abc"));
        assert!(like("a_c", "abc"));
        assert!(like("AB%", "abc"));
        assert!(!like("ab%", "cab"));
        assert!(like("a.c%", "a.cd"));
        assert!(!like("a.c%", "abcd"));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let mut filter = Filter::new();
        filter.and_where("age", Operator::Equal, "1");
        filter.and_where("name", Operator::Equal, "x");
        filter.or_where("age", Operator::Equal, "2");

        assert!(filter.matches(&Row { name: Some("x"), age: 1 }));
        assert!(!filter.matches(&Row { name: Some("y"), age: 1 }));
        assert!(filter.matches(&Row { name: Some("y"), age: 2 }));
    }

    #[test]
    fn empty_filter_matches() {
        assert!(Filter::new().matches(&Row { name: None, age: 0 }));
    }

    #[test]
    fn null_never_satisfies_comparisons() {
        let row = Row { name: None, age: 0 };
        for op in [Operator::Equal, Operator::NotEqual, Operator::Like, Operator::NotLike] {
            let mut filter = Filter::new();
            filter.and_where("name", op, "x");
            assert!(!filter.matches(&row), "{op}");
        }

        let mut filter = Filter::new();
        filter.and_where_in("name", &["x".to_string()], true);
        assert!(!filter.matches(&row));

        let mut filter = Filter::new();
        filter.and_where_null("name", false);
        assert!(filter.matches(&row));
    }

    #[test]
    fn display() {
        let mut filter = Filter::new();
        filter.and_where("age", Operator::Greater, "3");
        filter.or_where_in("name", &["a".to_string(), "b".to_string()], true);
        filter.and_where_null("name", true);
        assert_eq!(
            filter.to_string(),
            r#"age > "3" or name not in ("a", "b") and name is not null"#
        );
    }
}
