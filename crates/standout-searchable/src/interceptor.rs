//! Per-field overrides of default constraint application.
//!
//! An interceptor is a handler registered for one field key. When the
//! orchestrator is about to apply a constraint on that field it offers the
//! constraint to the handler first; if the handler returns `true` the
//! constraint counts as handled and no default predicate is added.
//!
//! Handlers are keyed by a canonical identifier derived from the field key,
//! so `created_at`, `created-at` and `createdAt` share one handler, and
//! `relation_a:field` is stored as `RelationA_Field`. A negated key such as
//! `!field` is its own key here; [`Searchable`](crate::Searchable) routes it
//! to the handler for `field` when it has none.
//!
//! ```
//! use standout_searchable::{Filter, FilterTarget, Interceptors, Mode, Operator};
//!
//! let mut interceptors = Interceptors::<Filter>::new();
//! interceptors.register("full_name", |query, constraint, mode| {
//!     if let Some(value) = constraint.value().as_single() {
//!         query.where_op(mode, "first_name", Operator::Like, &format!("{value}%"));
//!         return true;
//!     }
//!     false
//! });
//! assert!(interceptors.contains("fullName"));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::apply::RELATION_SEPARATOR;
use crate::constraint::Constraint;
use crate::mode::Mode;

/// Joiner that replaces the relation separator in canonical keys.
pub const KEY_JOINER: char = '_';

/// A boxed interceptor handler.
///
/// Returns `true` if it handled the constraint.
pub type InterceptorFn<Q> = Box<dyn Fn(&mut Q, &Constraint, Mode) -> bool>;

/// Registry of per-field interceptors.
pub struct Interceptors<Q> {
    handlers: HashMap<String, InterceptorFn<Q>>,
}

impl<Q> Interceptors<Q> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Interceptors {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler for `field`, replacing any previous one.
    pub fn register<F>(&mut self, field: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Q, &Constraint, Mode) -> bool + 'static,
    {
        self.handlers.insert(canonical_key(field), Box::new(handler));
        self
    }

    /// Registers a handler for `field`, builder style.
    pub fn with<F>(mut self, field: &str, handler: F) -> Self
    where
        F: Fn(&mut Q, &Constraint, Mode) -> bool + 'static,
    {
        self.register(field, handler);
        self
    }

    /// Returns `true` if a handler is registered for `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.handlers.contains_key(&canonical_key(field))
    }

    /// Offers a constraint to the handler for `field`.
    ///
    /// Returns `false` when no handler is registered or the handler declined.
    pub fn intercept(&self, query: &mut Q, field: &str, constraint: &Constraint, mode: Mode) -> bool {
        match self.handlers.get(&canonical_key(field)) {
            Some(handler) => handler(query, constraint, mode),
            None => false,
        }
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<Q> Default for Interceptors<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> fmt::Debug for Interceptors<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.handlers.keys().collect();
        keys.sort();
        f.debug_struct("Interceptors").field("fields", &keys).finish()
    }
}

/// Returns the conventional handler name for a field key.
///
/// `relation_a:field` becomes `processRelationA_FieldFilter`. Used in logs
/// so hosts can map a field to the handler they would write for it.
pub fn handler_name(field: &str) -> String {
    format!("process{}Filter", canonical_key(field))
}

/// Canonical identifier for a field key: each relation segment in
/// StudlyCase, segments joined with `_`.
pub(crate) fn canonical_key(field: &str) -> String {
    field
        .split(RELATION_SEPARATOR)
        .map(studly)
        .collect::<Vec<_>>()
        .join(&KEY_JOINER.to_string())
}

fn studly(segment: &str) -> String {
    segment
        .split(['_', '-', ' ', '.'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studly_segments() {
        assert_eq!(studly("field2"), "Field2");
        assert_eq!(studly("created_at"), "CreatedAt");
        assert_eq!(studly("created-at"), "CreatedAt");
        assert_eq!(studly("createdAt"), "CreatedAt");
        assert_eq!(studly("relationA"), "RelationA");
    }

    #[test]
    fn canonical_keys_join_relations() {
        assert_eq!(canonical_key("relationA:field"), "RelationA_Field");
        assert_eq!(canonical_key("a:b:some_field"), "A_B_SomeField");
    }

    #[test]
    fn negated_keys_stay_distinct() {
        assert_ne!(canonical_key("!relationA:field"), canonical_key("relationA:field"));
    }

    #[test]
    fn handler_names() {
        assert_eq!(handler_name("field2"), "processField2Filter");
        assert_eq!(handler_name("relationA:field"), "processRelationA_FieldFilter");
    }

    #[test]
    fn intercept_returns_handler_result() {
        let mut interceptors = Interceptors::<Vec<String>>::new();
        interceptors.register("accept", |q, _, _| {
            q.push("accepted".into());
            true
        });
        interceptors.register("decline", |_, _, _| false);

        let constraint = Constraint::parse("x").unwrap();
        let mut log = Vec::new();
        assert!(interceptors.intercept(&mut log, "accept", &constraint, Mode::And));
        assert!(!interceptors.intercept(&mut log, "decline", &constraint, Mode::And));
        assert!(!interceptors.intercept(&mut log, "missing", &constraint, Mode::And));
        assert_eq!(log, vec!["accepted".to_string()]);
        assert_eq!(interceptors.len(), 2);
    }
}
