//! [`LikePattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL `LIKE` pattern matching the given input as a literal substring.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct LikePattern(String);

impl LikePattern {
    /// Creates a new [`LikePattern`] matching any string containing the given
    /// `input`.
    ///
    /// `LIKE` wildcards and the escape character are escaped with `\`.
    #[must_use]
    pub fn contains(input: &str) -> Self {
        let mut pattern = String::with_capacity(input.len() + 2);
        pattern.push('%');
        for c in input.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Self(pattern)
    }
}

#[cfg(test)]
mod spec {
    use super::LikePattern;

    #[test]
    fn wraps_plain_input() {
        assert_eq!(LikePattern::contains("borrow").to_string(), "%borrow%");
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(
            LikePattern::contains(r"100%_a\b").to_string(),
            r"%100\%\_a\\b%",
        );
    }

    #[test]
    fn keeps_other_characters() {
        assert_eq!(
            LikePattern::contains("what's [x]*?").to_string(),
            "%what's [x]*?%",
        );
    }
}
