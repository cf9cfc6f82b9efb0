//! [`Query`] collection related to the multiple [`Question`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Question, Query};

use super::Lookup;

/// Queries a page of [`Question`]s, newest first.
pub type List = Lookup<
    By<read::question::list::Page, read::question::list::Selector>,
>;

/// Queries total count of [`Question`]s matching a
/// [`read::question::list::Filter`].
pub type TotalCount = Lookup<
    By<read::question::list::TotalCount, read::question::list::Filter>,
>;
