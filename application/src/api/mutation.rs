//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Question` with the provided text and reference answer.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createQuestion",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_question(
        text: api::question::Text,
        answer: api::question::Answer,
        ctx: &Context,
    ) -> Result<api::Question, Error> {
        ctx.service()
            .execute(command::CreateQuestion {
                text: text.into(),
                answer: answer.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overwrites the text and the reference answer of the `Question` with
    /// the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `QUESTION_NOT_EXISTS` - the `Question` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateQuestion",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_question(
        id: api::question::Id,
        text: api::question::Text,
        answer: api::question::Answer,
        ctx: &Context,
    ) -> Result<api::Question, Error> {
        ctx.service()
            .execute(command::UpdateQuestion {
                id: id.into(),
                text: text.into(),
                answer: answer.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Question` with the specified ID.
    ///
    /// Running practice sessions skip the deleted `Question` once they reach
    /// it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `QUESTION_NOT_EXISTS` - the `Question` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteQuestion",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_question(
        id: api::question::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteQuestion { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Starts a new practice session over all the existing `Question`s in a
    /// random order.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NO_QUESTIONS` - there are no `Question`s to practice on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "startSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn start_session(ctx: &Context) -> Result<api::Step, Error> {
        ctx.service()
            .execute(command::StartSession)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Records an answer to the current `Question` of the practice session
    /// and moves it to the next `Question`.
    ///
    /// Answering a finished session changes nothing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SESSION_NOT_FOUND` - the session does not exist or has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitAnswer",
            is_correct = %is_correct,
            otel.name = Self::SPAN_NAME,
            session_id = %session_id,
        ),
    )]
    pub async fn submit_answer(
        session_id: api::session::Id,
        is_correct: bool,
        ctx: &Context,
    ) -> Result<api::Step, Error> {
        ctx.service()
            .execute(command::SubmitAnswer {
                session_id: session_id.into(),
                is_correct,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Stops the practice session and returns its final statistics.
    ///
    /// Stopped session cannot be accessed anymore.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SESSION_NOT_FOUND` - the session does not exist or has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "stopSession",
            otel.name = Self::SPAN_NAME,
            session_id = %session_id,
        ),
    )]
    pub async fn stop_session(
        session_id: api::session::Id,
        ctx: &Context,
    ) -> Result<api::session::Stats, Error> {
        ctx.service()
            .execute(command::StopSession {
                session_id: session_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::update_question::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::QuestionNotExists(_) => {
                Some(api::QuestionError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_question::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::QuestionNotExists(_) => {
                Some(api::QuestionError::NotExists.into())
            }
        }
    }
}

impl AsError for command::start_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NO_QUESTIONS"]
                #[status = BAD_REQUEST]
                #[message = "There are no `Question`s to practice on"]
                NoQuestions,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NoQuestions => Error::NoQuestions.into(),
        })
    }
}

impl AsError for command::submit_answer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SessionNotFound(e) => e.try_as_error(),
        }
    }
}
