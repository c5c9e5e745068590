//! Searchable - compile URL query parameters into filter predicates.
//!
//! Searchable takes flat request parameters such as
//! `?age=(ge)18&name=jo%&tag=a,b&mode=or` and applies them as predicates to
//! a query. It provides:
//!
//! - A small grammar turning each raw value into a [`Constraint`]
//!   (operator, operand, negation)
//! - Per-field routing, including relation-scoped fields (`author:name`)
//! - A request-wide combination [`Mode`] (AND or OR)
//! - Allow/deny configuration of searchable fields
//! - Per-field [`Interceptors`] that override default handling
//!
//! # Quick Start
//!
//! ```rust
//! use standout_searchable::{Filter, Params, Record, SearchConfig, Searchable, Value};
//!
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl Record for User {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::from(&self.name),
//!             "age" => Value::from(self.age),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let searchable =
//!     Searchable::<Filter>::new(SearchConfig::new().searchable(["name", "age"])).unwrap();
//!
//! let params = Params::parse_query("age=(ge)18&name=jo%25").unwrap();
//! let filter = searchable.filtered(Filter::new(), &params).unwrap();
//!
//! let users = vec![
//!     User { name: "John".into(), age: 30 },
//!     User { name: "Joan".into(), age: 12 },
//!     User { name: "Mary".into(), age: 40 },
//! ];
//! let matched = filter.filter(&users);
//! assert_eq!(matched.len(), 1);
//! assert_eq!(matched[0].name, "John");
//! ```
//!
//! # Value Grammar
//!
//! | Raw value  | Operator        | Operand        |
//! |------------|-----------------|----------------|
//! | `abc`      | `=`             | `"abc"`        |
//! | `!abc`     | `<>`            | `"abc"`        |
//! | `a,b`      | `in`            | `["a", "b"]`   |
//! | `!a,b`     | `not in`        | `["a", "b"]`   |
//! | `(gt)5`    | `>`             | `"5"`          |
//! | `!(gt)5`   | `<=`            | `"5"`          |
//! | `ab%`      | `like`          | `"ab%"`        |
//! | `!%ab%`    | `not like`      | `"%ab%"`       |
//! | `(null)`   | `is null`       | none           |
//! | `!(null)`  | `is not null`   | none           |
//!
//! # Field Keys
//!
//! | Key                | Meaning                                          |
//! |--------------------|--------------------------------------------------|
//! | `field`            | constraint on the record's own field             |
//! | `relation:field`   | some related row's `field` satisfies it          |
//! | `!relation:field`  | no related row's `field` satisfies it            |
//!
//! # Query Targets
//!
//! Constraints are applied through the [`FilterTarget`] trait, which a host
//! implements for its own query builder. [`Filter`] is a ready-made target
//! that records predicates and evaluates them against [`Record`]s.

mod apply;
mod constraint;
mod error;
mod fields;
mod filter;
mod interceptor;
mod mode;
mod model;
mod op;
mod params;
mod record;
mod searchable;
mod target;

// Re-export public API
pub use apply::{apply, FieldRef, RELATION_PATH_JOINER, RELATION_SEPARATOR};
pub use constraint::{Constraint, ConstraintValue, NEGATION_MARKER, NULL_LITERAL};
pub use error::{Result, SearchError};
pub use fields::{FieldList, Searchability, WILDCARD};
pub use filter::{Clause, Filter, Predicate};
pub use interceptor::{handler_name, InterceptorFn, Interceptors};
pub use mode::{Mode, DEFAULT_MODE_KEY};
pub use model::SearchableModel;
pub use op::Operator;
pub use params::{ParamValue, Params};
pub use record::{Number, Record, Value};
pub use searchable::{SearchConfig, Searchable};
pub use target::{FilterTarget, ScopeFn};
