//! [`Question`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

/// Interview question along with its reference answer.
#[derive(Clone, Debug)]
pub struct Question {
    /// ID of this [`Question`].
    pub id: Id,

    /// [`Text`] of this [`Question`].
    pub text: Text,

    /// Reference [`Answer`] to this [`Question`].
    pub answer: Answer,

    /// [`DateTime`] when this [`Question`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Question`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Text of a [`Question`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Text(String);

impl Text {
    /// Maximum length of a [`Text`] in characters.
    pub const MAX_LEN: usize = 3000;

    /// Creates a new [`Text`] out of the trimmed `text`, if it's valid.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        (!text.is_empty() && text.chars().count() <= Self::MAX_LEN)
            .then(|| Self(text.to_owned()))
    }
}

impl FromStr for Text {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Text`")
    }
}

/// Reference answer to a [`Question`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Answer(String);

impl Answer {
    /// Maximum length of an [`Answer`] in characters.
    pub const MAX_LEN: usize = 5000;

    /// Creates a new [`Answer`] out of the trimmed `answer`, if it's valid.
    #[must_use]
    pub fn new(answer: impl AsRef<str>) -> Option<Self> {
        let answer = answer.as_ref().trim();
        (!answer.is_empty() && answer.chars().count() <= Self::MAX_LEN)
            .then(|| Self(answer.to_owned()))
    }
}

impl FromStr for Answer {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Answer`")
    }
}

/// [`DateTime`] when a [`Question`] was created.
pub type CreationDateTime = DateTimeOf<(Question, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Answer, Text};

    #[test]
    fn trims_text() {
        let text = Text::new("  What is ownership?\n").unwrap();

        assert_eq!(AsRef::<str>::as_ref(&text), "What is ownership?");
    }

    #[test]
    fn rejects_blank() {
        assert!(Text::new("").is_none());
        assert!(Text::new("   \t").is_none());
        assert!(Answer::new("\n").is_none());
        assert!("  ".parse::<Answer>().is_err());
    }

    #[test]
    fn limits_length_in_chars() {
        assert!(Text::new("ы".repeat(Text::MAX_LEN)).is_some());
        assert!(Text::new("a".repeat(Text::MAX_LEN + 1)).is_none());
        assert!(Answer::new("a".repeat(Answer::MAX_LEN)).is_some());
        assert!(Answer::new("a".repeat(Answer::MAX_LEN + 1)).is_none());
    }
}
