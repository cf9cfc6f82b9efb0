//! [`Query`] definition.

pub mod question;
pub mod questions;
pub mod session;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] looking up a `W` in the [`Database`] by some `B` criteria.
///
/// Read-only, so it never touches practice sessions.
#[derive(Clone, Copy, Debug)]
pub struct Lookup<T>(T);

impl<W, B> Lookup<By<W, B>> {
    /// Creates a new [`Lookup`] of a `W` by the provided `B` criteria.
    #[must_use]
    pub fn by(criteria: B) -> Self {
        Self(By::new(criteria))
    }
}

impl<Db, W, B> Query<Lookup<By<W, B>>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lookup(criteria): Lookup<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(criteria))
            .await
            .map_err(tracerr::wrap!())
    }
}
