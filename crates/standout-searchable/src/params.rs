//! Raw request parameters.
//!
//! [`Params`] is an insertion-ordered map from parameter name to one or more
//! raw values. A parameter supplied several times keeps every value, in the
//! order given; each becomes an independent constraint on that field.

use indexmap::IndexMap;

use crate::error::Result;

/// Suffix marking an explicitly multi-valued key (`tag[]=a&tag[]=b`).
const ARRAY_SUFFIX: &str = "[]";

/// Raw value(s) of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Parameter supplied once.
    Single(String),
    /// Parameter supplied several times, in order.
    Many(Vec<String>),
}

impl ParamValue {
    /// Returns every raw value, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(v) => vec![v.as_str()],
            ParamValue::Many(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    /// Returns the last raw value.
    pub fn last(&self) -> Option<&str> {
        match self {
            ParamValue::Single(v) => Some(v),
            ParamValue::Many(vs) => vs.last().map(String::as_str),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(first) => {
                *self = ParamValue::Many(vec![std::mem::take(first), value]);
            }
            ParamValue::Many(vs) => vs.push(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Single(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Single(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(vs: Vec<String>) -> Self {
        ParamValue::Many(vs)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(vs: Vec<&str>) -> Self {
        ParamValue::Many(vs.into_iter().map(str::to_string).collect())
    }
}

/// Insertion-ordered request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: IndexMap<String, ParamValue>,
}

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Params::default()
    }

    /// Builds parameters from key/value pairs.
    ///
    /// Repeated keys collect their values in order. A trailing `[]` on a key
    /// is dropped and always yields a multi-valued parameter.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Params::new();
        for (key, value) in pairs {
            let key = key.into();
            match key.strip_suffix(ARRAY_SUFFIX) {
                Some(base) => {
                    let base = base.to_string();
                    match params.entries.get_mut(&base) {
                        Some(existing) => existing.push(value.into()),
                        None => {
                            params
                                .entries
                                .insert(base, ParamValue::Many(vec![value.into()]));
                        }
                    }
                }
                None => {
                    params.append(key, value);
                }
            }
        }
        params
    }

    /// Decodes an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    pub fn parse_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(Params::from_pairs(pairs))
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Sets a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a value, turning the parameter multi-valued if already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.entries.insert(key, ParamValue::Single(value));
            }
        }
        self
    }

    /// Returns the value(s) of a parameter.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Removes a parameter, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.shift_remove(key)
    }

    /// Returns `true` if the parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of distinct parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params::from_pairs(iter)
    }
}
