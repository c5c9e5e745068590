//! Which fields a request may filter on.
//!
//! Searchability is decided from two lists: an allow-list and a deny-list.
//! Either may contain the wildcard `*`. The deny-list always wins:
//!
//! ```text
//! searchable(field) = !(deny contains field or *)
//!                   ∧ (allow contains field or *)
//! ```
//!
//! A leading `!` on the field name (a negated relation or field) is ignored
//! for the lookup.

use serde::{Deserialize, Serialize};

use crate::constraint::NEGATION_MARKER;
use crate::error::{Result, SearchError};

/// Wildcard entry matching every field.
pub const WILDCARD: &str = "*";

/// A list of field names, possibly containing the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldList(Vec<String>);

impl FieldList {
    /// Creates a list from field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldList(fields.into_iter().map(Into::into).collect())
    }

    /// Creates a list matching every field.
    pub fn all() -> Self {
        FieldList(vec![WILDCARD.to_string()])
    }

    /// Creates an empty list.
    pub fn none() -> Self {
        FieldList(Vec::new())
    }

    /// Returns `true` if the list contains the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.0.iter().any(|f| f == WILDCARD)
    }

    /// Returns `true` if `field` is listed, directly or via the wildcard.
    pub fn covers(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == WILDCARD || f == field)
    }

    /// Returns the listed names.
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FieldList::new(iter)
    }
}

/// Resolved allow/deny configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Searchability {
    allow: FieldList,
    deny: FieldList,
}

impl Searchability {
    /// Resolves the configured lists.
    ///
    /// Fails when neither list is configured. With only a deny-list, every
    /// field not denied is searchable.
    pub fn resolve(allow: Option<FieldList>, deny: Option<FieldList>) -> Result<Self> {
        match (allow, deny) {
            (None, None) => Err(SearchError::SearchabilityConfigurationMissing),
            (allow, deny) => Ok(Searchability {
                allow: allow.unwrap_or_else(FieldList::all),
                deny: deny.unwrap_or_default(),
            }),
        }
    }

    /// Returns `true` if the request may filter on `field`.
    pub fn is_searchable(&self, field: &str) -> bool {
        let field = field.strip_prefix(NEGATION_MARKER).unwrap_or(field);
        !self.deny.covers(field) && self.allow.covers(field)
    }

    /// Returns the allow-list.
    pub fn allowed(&self) -> &FieldList {
        &self.allow
    }

    /// Returns the deny-list.
    pub fn denied(&self) -> &FieldList {
        &self.deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_only() {
        let s = Searchability::resolve(Some(FieldList::new(["field1", "field2"])), None).unwrap();
        assert!(s.is_searchable("field1"));
        assert!(s.is_searchable("field2"));
        assert!(!s.is_searchable("field3"));
    }

    #[test]
    fn deny_wins_over_allow() {
        let s = Searchability::resolve(
            Some(FieldList::new(["field1", "field2"])),
            Some(FieldList::new(["field2"])),
        )
        .unwrap();
        assert!(s.is_searchable("field1"));
        assert!(!s.is_searchable("field2"));
    }

    #[test]
    fn wildcards() {
        let everything = Searchability::resolve(Some(FieldList::all()), None).unwrap();
        assert!(everything.is_searchable("anything"));

        let nothing =
            Searchability::resolve(Some(FieldList::all()), Some(FieldList::all())).unwrap();
        assert!(!nothing.is_searchable("anything"));
    }

    #[test]
    fn deny_list_alone_allows_the_rest() {
        let s = Searchability::resolve(None, Some(FieldList::new(["secret"]))).unwrap();
        assert!(s.is_searchable("name"));
        assert!(!s.is_searchable("secret"));
    }

    #[test]
    fn missing_configuration_is_an_error() {
        assert!(matches!(
            Searchability::resolve(None, None),
            Err(SearchError::SearchabilityConfigurationMissing)
        ));
    }

    #[test]
    fn negation_marker_is_ignored_for_lookup() {
        let s = Searchability::resolve(Some(FieldList::new(["rel:field"])), None).unwrap();
        assert!(s.is_searchable("!rel:field"));
        assert!(!s.is_searchable("!!rel:field"));
    }

    #[test]
    fn empty_allow_list_allows_nothing() {
        let s = Searchability::resolve(Some(FieldList::none()), None).unwrap();
        assert!(!s.is_searchable("field1"));
    }

    #[test]
    fn field_list_deserializes_from_array() {
        let list: FieldList = serde_json::from_str(r#"["a", "*"]"#).unwrap();
        assert!(list.is_wildcard());
        assert_eq!(list.fields(), ["a", "*"]);
    }
}
