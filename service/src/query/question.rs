//! [`Query`] collection related to a single [`Question`].

use common::operations::By;

use crate::domain::{question, Question};
#[cfg(doc)]
use crate::Query;

use super::Lookup;

/// Queries a [`Question`] by its [`question::Id`].
pub type ById = Lookup<By<Option<Question>, question::Id>>;
