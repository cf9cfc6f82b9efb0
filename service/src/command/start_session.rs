//! [`Command`] for starting a new practice [`Session`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Session;
use crate::{
    domain::{question, Question},
    infra::{database, Database},
    read::session::Step,
    Service,
};

use super::Command;

/// [`Command`] for starting a new practice [`Session`] over all the existing
/// [`Question`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct StartSession;

impl<Db> Command<StartSession> for Service<Db>
where
    Db: Database<
            Select<By<Vec<question::Id>, ()>>,
            Ok = Vec<question::Id>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Question>, question::Id>>,
            Ok = Option<Question>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Step;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: StartSession) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ids = self
            .database()
            .execute(Select(By::<Vec<question::Id>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if ids.is_empty() {
            return Err(tracerr::new!(E::NoQuestions));
        }

        let session = self.sessions().create(ids);
        log::debug!(
            "started `Session(id: {})` over {} `Question`s",
            session.id(),
            session.remaining_question_ids().len() + 1,
        );

        Step::resolve(session, self.database())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`StartSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// There are no [`Question`]s to practice on.
    #[display("No `Question`s exist")]
    NoQuestions,
}
