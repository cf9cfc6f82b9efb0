//! [`Command`] for deleting a [`Question`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{question, Question},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Question`].
///
/// Running [`Session`]s keep the deleted [`Question`] in their queues, but
/// won't be able to show it anymore.
///
/// [`Session`]: crate::domain::Session
#[derive(Clone, Copy, Debug)]
pub struct DeleteQuestion {
    /// ID of the [`Question`] to be deleted.
    pub id: question::Id,
}

impl<Db> Command<DeleteQuestion> for Service<Db>
where
    Db: Database<
        Delete<By<Question, question::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteQuestion { id }: DeleteQuestion,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let deleted = self
            .database()
            .execute(Delete(By::<Question, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::QuestionNotExists(id)));
        }

        Ok(())
    }
}

/// Error of [`DeleteQuestion`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Question`] with the provided ID does not exist.
    #[display("`Question(id: {_0})` does not exist")]
    QuestionNotExists(#[error(not(source))] question::Id),
}
