//! [`Command`] for answering the current [`Question`] of a [`Session`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{question, session, Question},
    infra::{database, sessions::SessionNotFound, Database},
    read::session::Step,
    Service,
};
#[cfg(doc)]
use crate::domain::Session;

use super::Command;

/// [`Command`] for recording an answer to the current [`Question`] of a
/// [`Session`] and moving it to the next [`Question`].
///
/// Answering a finished [`Session`] changes nothing.
#[derive(Clone, Copy, Debug)]
pub struct SubmitAnswer {
    /// ID of the [`Session`] to answer in.
    pub session_id: session::Id,

    /// Indicator whether the answer is considered correct.
    pub is_correct: bool,
}

impl<Db> Command<SubmitAnswer> for Service<Db>
where
    Db: Database<
        Select<By<Option<Question>, question::Id>>,
        Ok = Option<Question>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Step;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitAnswer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitAnswer {
            session_id,
            is_correct,
        } = cmd;

        let session = self
            .sessions()
            .submit_answer(session_id, is_correct)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Step::resolve(session, self.database())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SubmitAnswer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Session`] doesn't exist or has expired.
    #[display("{_0}")]
    #[from]
    SessionNotFound(SessionNotFound),
}
