//! Persistent storage of [`Question`]s.
//!
//! [`Question`]: crate::domain::Question

#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Operation over the [`Question`] storage.
///
/// [`Question`]: crate::domain::Question
pub use common::Handler as Database;

/// Failure of the storage backend.
///
/// Never caused by the caller, so always reported as an internal error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Postgres`] failed.
    #[cfg(feature = "postgres")]
    Postgres(postgres::Error),
}
