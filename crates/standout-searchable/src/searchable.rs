//! The request orchestrator.
//!
//! [`Searchable`] turns a request's raw parameters into predicates on a
//! query:
//!
//! ```text
//! params
//!   → resolve mode (reserved key, default "mode")
//!   → drop reserved keys
//!   → drop fields that are not searchable
//!   → parse one constraint per raw value
//!   → for each (field, constraint): interceptor, else apply
//! ```
//!
//! Every constraint is parsed before the first predicate is applied, so a
//! parse failure leaves the query untouched.
//!
//! # Example
//!
//! ```
//! use standout_searchable::{Filter, Params, SearchConfig, Searchable};
//!
//! let searchable = Searchable::<Filter>::new(
//!     SearchConfig::new().searchable(["age", "name"]).reserve("sort"),
//! )
//! .unwrap();
//!
//! let params = Params::parse_query("age=(gt)3&age=(lt)10&name=!bob&sort=age&mode=or").unwrap();
//! let filter = searchable.filtered(Filter::new(), &params).unwrap();
//!
//! assert_eq!(filter.to_string(), r#"age > "3" or age < "10" or name <> "bob""#);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::apply::{apply, FieldRef};
use crate::constraint::{Constraint, NEGATION_MARKER};
use crate::error::Result;
use crate::fields::{FieldList, Searchability};
use crate::interceptor::{handler_name, Interceptors};
use crate::mode::{Mode, DEFAULT_MODE_KEY};
use crate::model::SearchableModel;
use crate::params::Params;
use crate::target::FilterTarget;

/// Configuration of a [`Searchable`].
///
/// Deserializes from the host's settings; every key is optional.
///
/// ```
/// use standout_searchable::SearchConfig;
///
/// let config: SearchConfig = serde_json::from_str(
///     r#"{ "searchable": ["*"], "not_searchable": ["password"], "reserved": ["sort", "page"] }"#,
/// )
/// .unwrap();
/// assert_eq!(config.mode_key, "mode");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Allow-list of searchable fields; `*` allows all.
    pub searchable: Option<FieldList>,
    /// Deny-list of fields that are never searchable; `*` denies all.
    pub not_searchable: Option<FieldList>,
    /// Parameter carrying the combination mode.
    pub mode_key: String,
    /// Parameters owned by other concerns (sorting, paging, eager loading).
    pub reserved: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            searchable: None,
            not_searchable: None,
            mode_key: DEFAULT_MODE_KEY.to_string(),
            reserved: Vec::new(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration with no field lists and the default mode key.
    pub fn new() -> Self {
        SearchConfig::default()
    }

    /// Sets the allow-list.
    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable = Some(FieldList::new(fields));
        self
    }

    /// Sets the deny-list.
    pub fn not_searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_searchable = Some(FieldList::new(fields));
        self
    }

    /// Sets the parameter carrying the combination mode.
    pub fn mode_key(mut self, key: impl Into<String>) -> Self {
        self.mode_key = key.into();
        self
    }

    /// Reserves a parameter name for another concern.
    pub fn reserve(mut self, key: impl Into<String>) -> Self {
        self.reserved.push(key.into());
        self
    }
}

/// Applies request parameters to queries of type `Q`.
///
/// Searchability is resolved once at construction; a `Searchable` can then
/// serve any number of requests.
pub struct Searchable<Q> {
    searchability: Searchability,
    mode_key: String,
    reserved: Vec<String>,
    interceptors: Interceptors<Q>,
}

impl<Q: FilterTarget> Searchable<Q> {
    /// Creates an orchestrator from configuration.
    ///
    /// Fails with
    /// [`SearchabilityConfigurationMissing`](crate::SearchError::SearchabilityConfigurationMissing)
    /// when neither an allow-list nor a deny-list is configured.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let searchability = Searchability::resolve(config.searchable, config.not_searchable)?;
        Ok(Searchable {
            searchability,
            mode_key: config.mode_key,
            reserved: config.reserved,
            interceptors: Interceptors::new(),
        })
    }

    /// Creates an orchestrator for a host model.
    ///
    /// The model's field lists take precedence over those in `config`; the
    /// model's interceptors are registered.
    pub fn for_model<M>(config: SearchConfig) -> Result<Self>
    where
        M: SearchableModel<Query = Q>,
    {
        let config = SearchConfig {
            searchable: M::searchable_fields().or(config.searchable),
            not_searchable: M::not_searchable_fields().or(config.not_searchable),
            ..config
        };
        let mut searchable = Searchable::new(config)?;
        M::register_interceptors(&mut searchable.interceptors);
        Ok(searchable)
    }

    /// Registers an interceptor for `field`, builder style.
    pub fn intercept<F>(mut self, field: &str, handler: F) -> Self
    where
        F: Fn(&mut Q, &Constraint, Mode) -> bool + 'static,
    {
        self.interceptors.register(field, handler);
        self
    }

    /// Returns the interceptor registry.
    pub fn interceptors_mut(&mut self) -> &mut Interceptors<Q> {
        &mut self.interceptors
    }

    /// Returns `true` if `key` may be filtered on.
    ///
    /// Reserved keys are never searchable, with or without a leading `!`.
    pub fn is_searchable(&self, key: &str) -> bool {
        !self.is_reserved(key) && self.searchability.is_searchable(key)
    }

    /// Resolves the combination mode of a request.
    ///
    /// If the mode parameter was supplied several times the last value wins.
    pub fn mode(&self, params: &Params) -> Mode {
        params
            .get(&self.mode_key)
            .and_then(|value| value.last())
            .map(Mode::parse)
            .unwrap_or_default()
    }

    /// Parses the constraints of every searchable parameter.
    ///
    /// Pairs are returned in parameter order; a multi-valued parameter
    /// yields one pair per value.
    pub fn constraints(&self, params: &Params) -> Result<Vec<(String, Constraint)>> {
        let mut constraints = Vec::new();
        for (field, raw) in params.iter() {
            if !self.is_searchable(field) {
                debug!(field, "skipping parameter: not searchable");
                continue;
            }
            for value in raw.values() {
                constraints.push((field.to_string(), Constraint::parse(value)?));
            }
        }
        Ok(constraints)
    }

    /// Applies the request's constraints to `query`.
    pub fn apply_to(&self, query: &mut Q, params: &Params) -> Result<()> {
        let mode = self.mode(params);
        let constraints = self.constraints(params)?;

        for (field, constraint) in &constraints {
            if self.offer(query, field, constraint, mode) {
                continue;
            }
            apply(query, constraint, field, mode)?;
        }
        Ok(())
    }

    /// Applies the request's constraints to `query` and returns it.
    pub fn filtered(&self, mut query: Q, params: &Params) -> Result<Q> {
        self.apply_to(&mut query, params)?;
        Ok(query)
    }

    /// Offers a constraint to the interceptor for its field key.
    ///
    /// A negated key without its own handler falls back to the handler of
    /// the bare key. Plain columns hand it the complement constraint; a
    /// relation handler cannot express non-existence, so the constraint is
    /// withheld from default application.
    fn offer(&self, query: &mut Q, field: &str, constraint: &Constraint, mode: Mode) -> bool {
        if self.interceptors.contains(field) {
            return self.run_interceptor(query, field, constraint, mode);
        }
        let bare = match field.strip_prefix(NEGATION_MARKER) {
            Some(bare) if self.interceptors.contains(bare) => bare,
            _ => return false,
        };
        if FieldRef::parse(bare).is_relation() {
            debug!(
                field,
                handler = handler_name(bare).as_str(),
                "dropping negated constraint on intercepted relation field"
            );
            return true;
        }
        self.run_interceptor(query, bare, &constraint.negated(), mode)
    }

    fn run_interceptor(&self, query: &mut Q, field: &str, constraint: &Constraint, mode: Mode) -> bool {
        let handled = self.interceptors.intercept(query, field, constraint, mode);
        if handled {
            debug!(
                field,
                handler = handler_name(field).as_str(),
                "constraint handled by interceptor"
            );
        }
        handled
    }

    fn is_reserved(&self, key: &str) -> bool {
        let key = key.strip_prefix(NEGATION_MARKER).unwrap_or(key);
        key == self.mode_key || self.reserved.iter().any(|r| r == key)
    }
}

impl<Q> std::fmt::Debug for Searchable<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searchable")
            .field("searchability", &self.searchability)
            .field("mode_key", &self.mode_key)
            .field("reserved", &self.reserved)
            .field("interceptors", &self.interceptors)
            .finish()
    }
}
