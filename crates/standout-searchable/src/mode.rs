//! Combination mode shared by every predicate of a request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default parameter name carrying the combination mode.
pub const DEFAULT_MODE_KEY: &str = "mode";

/// How predicates built for one request combine with each other.
///
/// The mode is flat: all predicates of a request share it, and there is no
/// nesting of AND and OR groups across fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every predicate must hold.
    #[default]
    And,
    /// At least one predicate must hold.
    Or,
}

impl Mode {
    /// Parses a mode token.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything other than `or` falls back to [`Mode::And`].
    pub fn parse(token: &str) -> Mode {
        if token.trim().eq_ignore_ascii_case("or") {
            Mode::Or
        } else {
            Mode::And
        }
    }

    /// Returns `true` if this is conjunctive mode.
    pub fn is_and(self) -> bool {
        matches!(self, Mode::And)
    }

    /// Returns `true` if this is disjunctive mode.
    pub fn is_or(self) -> bool {
        matches!(self, Mode::Or)
    }

    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::And => "and",
            Mode::Or => "or",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognized_tokens() {
        assert_eq!(Mode::parse("and"), Mode::And);
        assert_eq!(Mode::parse("or"), Mode::Or);
        assert_eq!(Mode::parse(" OR "), Mode::Or);
    }

    #[test]
    fn parse_falls_back_to_and() {
        assert_eq!(Mode::parse(""), Mode::And);
        assert_eq!(Mode::parse("xor"), Mode::And);
        assert_eq!(Mode::parse("o r"), Mode::And);
    }

    #[test]
    fn default_is_and() {
        assert_eq!(Mode::default(), Mode::And);
        assert!(Mode::default().is_and());
        assert!(Mode::Or.is_or());
    }
}
