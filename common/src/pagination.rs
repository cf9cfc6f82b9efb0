//! Abstractions for offset-based pagination.

/// Number of items on a page when no valid size is requested.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Maximum allowed number of items on a page.
pub const MAX_PAGE_SIZE: usize = 100;

/// Normalized pagination arguments.
///
/// Pages are numbered starting from `1`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// Number of the requested page.
    page: usize,

    /// Number of items on a page.
    page_size: usize,
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Arguments {
    /// Creates new [`Arguments`] out of the raw client input.
    ///
    /// Never fails: a missing or non-positive `page` becomes `1`, and a
    /// `page_size` outside `1..=`[`MAX_PAGE_SIZE`] becomes
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new<Num>(page: Option<Num>, page_size: Option<Num>) -> Self
    where
        Num: TryInto<usize>,
    {
        let page = page
            .and_then(|p| p.try_into().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let page_size = page_size
            .and_then(|s| s.try_into().ok())
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Returns number of the requested page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns number of items on a page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns number of items to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// A page of items.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] out of the provided items.
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = impl Into<I>>,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            arguments,
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of items."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, DEFAULT_PAGE_SIZE};

    #[test]
    fn defaults_when_missing() {
        let args = Arguments::new::<i32>(None, None);

        assert_eq!(args.page(), 1);
        assert_eq!(args.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(args.offset(), 0);
        assert_eq!(args, Arguments::default());
    }

    #[test]
    fn clamps_page() {
        assert_eq!(Arguments::new(Some(0), None).page(), 1);
        assert_eq!(Arguments::new(Some(-5), None).page(), 1);
        assert_eq!(Arguments::new(Some(3), None).page(), 3);
    }

    #[test]
    fn resets_invalid_page_size() {
        assert_eq!(Arguments::new(None, Some(0)).page_size(), 20);
        assert_eq!(Arguments::new(None, Some(-1)).page_size(), 20);
        assert_eq!(Arguments::new(None, Some(101)).page_size(), 20);
        assert_eq!(Arguments::new(None, Some(100)).page_size(), 100);
        assert_eq!(Arguments::new(None, Some(1)).page_size(), 1);
    }

    #[test]
    fn computes_offset() {
        assert_eq!(Arguments::new(Some(1), Some(10)).offset(), 0);
        assert_eq!(Arguments::new(Some(3), Some(10)).offset(), 20);
        assert_eq!(Arguments::new(Some(2), Some(25)).offset(), 25);
    }
}
