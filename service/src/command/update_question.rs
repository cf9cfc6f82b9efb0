//! [`Command`] for updating an existing [`Question`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{question, Question},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for overwriting [`question::Text`] and [`question::Answer`] of
/// an existing [`Question`].
#[derive(Clone, Debug)]
pub struct UpdateQuestion {
    /// ID of the [`Question`] to be updated.
    pub id: question::Id,

    /// New [`question::Text`] of the [`Question`].
    pub text: question::Text,

    /// New [`question::Answer`] of the [`Question`].
    pub answer: question::Answer,
}

impl<Db> Command<UpdateQuestion> for Service<Db>
where
    Db: Database<
            Select<By<Option<Question>, question::Id>>,
            Ok = Option<Question>,
            Err = Traced<database::Error>,
        > + Database<
            Update<Question>,
            Ok = bool,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Question;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateQuestion,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateQuestion { id, text, answer } = cmd;

        let mut question = self
            .database()
            .execute(Select(By::<Option<Question>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::QuestionNotExists(id))
            .map_err(tracerr::wrap!())?;

        question.text = text;
        question.answer = answer;

        // `Question` may be deleted in between.
        let updated = self
            .database()
            .execute(Update(question.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !updated {
            return Err(tracerr::new!(E::QuestionNotExists(id)));
        }

        Ok(question)
    }
}

/// Error of [`UpdateQuestion`] [`Command`] execution.
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
