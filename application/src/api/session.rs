//! Practice session related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, infra::sessions::SessionNotFound, read};
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// Current step of a practice session.
#[derive(Clone, Debug, From, Into)]
pub struct Step(read::Step);

/// Current step of a practice session.
#[graphql_object(name = "SessionStep", context = Context)]
impl Step {
    /// Unique identifier of the session.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "SessionStep.sessionId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn session_id(&self) -> Id {
        self.0.session.id().into()
    }

    /// `Question` to be answered now.
    ///
    /// `null` if the session is finished, or if the `Question` has been
    /// deleted meanwhile (submitting an answer skips it).
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "SessionStep.question",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn question(&self) -> Option<api::Question> {
        self.0.question.clone().map(Into::into)
    }

    /// Answering statistics of the session so far.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "SessionStep.stats",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn stats(&self) -> Stats {
        self.0.session.stats().into()
    }

    /// Indicator whether all the `Question`s of the session are answered.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "SessionStep.finished",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn finished(&self) -> bool {
        self.0.session.is_finished()
    }

    /// `DateTime` when the session expires unless accessed again.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "SessionStep.expiresAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn expires_at(&self) -> DateTime {
        self.0.session.expires_at().coerce()
    }
}

/// Answering statistics of a practice session.
#[derive(Clone, Copy, Debug, From, Into)]
pub struct Stats(domain::session::Stats);

/// Answering statistics of a practice session.
#[graphql_object(name = "SessionStats", context = Context)]
impl Stats {
    /// Number of answers marked as correct.
    pub fn correct(&self) -> Result<i32, Error> {
        i32::try_from(self.0.correct).map_err(AsError::into_error)
    }

    /// Number of submitted answers.
    pub fn asked(&self) -> Result<i32, Error> {
        i32::try_from(self.0.asked).map_err(AsError::into_error)
    }
}

/// Unique identifier of a practice session.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::session::Id)]
#[into(domain::session::Id)]
#[graphql(name = "SessionId", transparent)]
pub struct Id(Uuid);

impl AsError for SessionNotFound {
    fn try_as_error(&self) -> Option<Error> {
        Some(api::SessionError::NotFound.into())
    }
}
