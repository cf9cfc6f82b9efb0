//! [`Command`] for creating a new [`Question`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{question, Question},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Question`].
#[derive(Clone, Debug)]
pub struct CreateQuestion {
    /// [`question::Text`] of a new [`Question`].
    pub text: question::Text,

    /// [`question::Answer`] of a new [`Question`].
    pub answer: question::Answer,
}

impl<Db> Command<CreateQuestion> for Service<Db>
where
    Db: Database<Insert<Question>, Err = Traced<database::Error>>,
{
    type Ok = Question;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateQuestion,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateQuestion { text, answer } = cmd;

        let question = Question {
            id: question::Id::new(),
            text,
            answer,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(question.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(question)
    }
}

/// Error of [`CreateQuestion`] [`Command`] execution.
pub type ExecutionError = database::Error;
