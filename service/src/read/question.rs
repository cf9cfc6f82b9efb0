//! [`Question`]-related read definitions.

#[cfg(doc)]
use crate::domain::Question;

pub mod list {
    //! [`Question`] list definitions.

    use common::define_pagination;
    use derive_more::{AsRef, Display, From, Into};

    use crate::domain::Question;

    define_pagination!(Question, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] to match [`Question`] texts against.
        pub search: Option<Search>,
    }

    /// Substring to be searched case-insensitively in [`Question`] texts.
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str)]
    pub struct Search(String);

    impl Search {
        /// Creates a new [`Search`] out of the trimmed `input`.
        ///
        /// Blank `input` means no search at all.
        #[must_use]
        pub fn new(input: impl AsRef<str>) -> Option<Self> {
            let input = input.as_ref().trim();
            (!input.is_empty()).then(|| Self(input.to_owned()))
        }
    }

    /// Total count of [`Question`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);

    #[cfg(test)]
    mod spec {
        use super::Search;

        #[test]
        fn trims_search() {
            let search = Search::new("  lifetimes ").unwrap();

            assert_eq!(AsRef::<str>::as_ref(&search), "lifetimes");
        }

        #[test]
        fn blank_search_is_none() {
            assert!(Search::new("").is_none());
            assert!(Search::new(" \t\n").is_none());
        }
    }
}
