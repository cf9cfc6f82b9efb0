//! [`Query`] collection related to a single [`Session`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Session;
use crate::{
    domain::{question, session, Question},
    infra::{database, sessions::SessionNotFound, Database},
    read::session::Step,
    Service,
};

use super::Query;

/// Queries the current [`Step`] of a [`Session`].
///
/// Prolongs the [`Session`] expiration, as any other access does.
#[derive(Clone, Copy, Debug)]
pub struct Current {
    /// ID of the [`Session`] to query.
    pub session_id: session::Id,
}

impl<Db> Query<Current> for Service<Db>
where
    Db: Database<
        Select<By<Option<Question>, question::Id>>,
        Ok = Option<Question>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Step;
    type Err = Traced<CurrentError>;

    async fn execute(
        &self,
        Current { session_id }: Current,
    ) -> Result<Self::Ok, Self::Err> {
        use CurrentError as E;

        let session = self
            .sessions()
            .get(session_id)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Step::resolve(session, self.database())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`Current`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum CurrentError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Session`] doesn't exist or has expired.
    #[display("{_0}")]
    #[from]
    SessionNotFound(SessionNotFound),
}

/// Queries the reference [`question::Answer`] to the current [`Question`] of
/// a [`Session`].
///
/// Prolongs the [`Session`] expiration, as any other access does.
#[derive(Clone, Copy, Debug)]
pub struct CurrentAnswer {
    /// ID of the [`Session`] to query.
    pub session_id: session::Id,
}

impl<Db> Query<CurrentAnswer> for Service<Db>
where
    Db: Database<
        Select<By<Option<Question>, question::Id>>,
        Ok = Option<Question>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = question::Answer;
    type Err = Traced<CurrentAnswerError>;

    async fn execute(
        &self,
        CurrentAnswer { session_id }: CurrentAnswer,
    ) -> Result<Self::Ok, Self::Err> {
        use CurrentAnswerError as E;

        let session = self
            .sessions()
            .get(session_id)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let question_id = session
            .current_question_id()
            .ok_or(E::SessionFinished(session_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Select(By::<Option<Question>, _>::new(question_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .map(|q| q.answer)
            .ok_or(E::QuestionNotExists(question_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CurrentAnswer`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum CurrentAnswerError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Current [`Question`] has been deleted after the [`Session`] started.
    #[display("`Question(id: {_0})` does not exist")]
    QuestionNotExists(#[error(not(source))] question::Id),

    /// [`Session`] has no current [`Question`] anymore.
    #[display("`Session(id: {_0})` is finished")]
    SessionFinished(#[error(not(source))] session::Id),

    /// [`Session`] doesn't exist or has expired.
    #[display("{_0}")]
    #[from]
    SessionNotFound(SessionNotFound),
}
