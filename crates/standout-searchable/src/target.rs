//! The query abstraction that constraints are applied to.
//!
//! [`FilterTarget`] is the narrow contract between this crate and a host's
//! query builder. Every predicate comes in an AND-flavored and an OR-flavored
//! variant; the applier picks one from the request's [`Mode`]. The crate ships
//! one implementation, [`Filter`](crate::Filter), which records predicates
//! and can evaluate them in memory.

use crate::error::Result;
use crate::mode::Mode;
use crate::op::Operator;

/// Builds the body of a relation sub-query.
pub type ScopeFn<'a, Q> = dyn FnMut(&mut Q) -> Result<()> + 'a;

/// A mutable query that accepts filter predicates.
///
/// AND variants conjoin the predicate with what is already in the current
/// scope, OR variants disjoin it.
pub trait FilterTarget: Sized {
    /// Adds `field <op> value` with AND.
    fn and_where(&mut self, field: &str, op: Operator, value: &str);

    /// Adds `field <op> value` with OR.
    fn or_where(&mut self, field: &str, op: Operator, value: &str);

    /// Adds a membership test with AND; `negated` turns it into `not in`.
    fn and_where_in(&mut self, field: &str, values: &[String], negated: bool);

    /// Adds a membership test with OR; `negated` turns it into `not in`.
    fn or_where_in(&mut self, field: &str, values: &[String], negated: bool);

    /// Adds a null check with AND; `negated` turns it into `is not null`.
    fn and_where_null(&mut self, field: &str, negated: bool);

    /// Adds a null check with OR; `negated` turns it into `is not null`.
    fn or_where_null(&mut self, field: &str, negated: bool);

    /// Adds a correlated sub-query on `relation` with AND.
    ///
    /// `scope` fills a fresh query scoped to the related rows. With `exists`
    /// the record must have at least one related row matching that scope;
    /// without it, none.
    fn and_where_has(
        &mut self,
        relation: &str,
        exists: bool,
        scope: &mut ScopeFn<'_, Self>,
    ) -> Result<()>;

    /// Adds a correlated sub-query on `relation` with OR.
    fn or_where_has(
        &mut self,
        relation: &str,
        exists: bool,
        scope: &mut ScopeFn<'_, Self>,
    ) -> Result<()>;

    /// Adds `field <op> value` combined with `mode`.
    fn where_op(&mut self, mode: Mode, field: &str, op: Operator, value: &str) {
        match mode {
            Mode::And => self.and_where(field, op, value),
            Mode::Or => self.or_where(field, op, value),
        }
    }

    /// Adds a membership test combined with `mode`.
    fn where_in(&mut self, mode: Mode, field: &str, values: &[String], negated: bool) {
        match mode {
            Mode::And => self.and_where_in(field, values, negated),
            Mode::Or => self.or_where_in(field, values, negated),
        }
    }

    /// Adds a null check combined with `mode`.
    fn where_null(&mut self, mode: Mode, field: &str, negated: bool) {
        match mode {
            Mode::And => self.and_where_null(field, negated),
            Mode::Or => self.or_where_null(field, negated),
        }
    }

    /// Adds a relation sub-query combined with `mode`.
    fn where_has(
        &mut self,
        mode: Mode,
        relation: &str,
        exists: bool,
        scope: &mut ScopeFn<'_, Self>,
    ) -> Result<()> {
        match mode {
            Mode::And => self.and_where_has(relation, exists, scope),
            Mode::Or => self.or_where_has(relation, exists, scope),
        }
    }
}
