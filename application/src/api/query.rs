//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Question` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `QUESTION_NOT_EXISTS` - the `Question` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "question",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn question(
        id: api::question::Id,
        ctx: &Context,
    ) -> Result<api::Question, Error> {
        ctx.service()
            .execute(query::question::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::QuestionError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of `Question`s, newest first.
    ///
    /// `page` starts from 1, and values below 1 are treated as 1. `pageSize`
    /// outside `1..=100` falls back to 20. `search` matches `Question` texts
    /// by a case-insensitive substring, and a blank one matches everything.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "questions",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
            search = ?search,
        ),
    )]
    pub async fn questions(
        page: Option<i32>,
        page_size: Option<i32>,
        search: Option<String>,
        ctx: &Context,
    ) -> Result<api::question::list::Page, Error> {
        let filter = read::question::list::Filter {
            search: search.and_then(read::question::list::Search::new),
        };
        ctx.service()
            .execute(query::questions::List::by(
                read::question::list::Selector {
                    arguments: read::question::list::Arguments::new(
                        page, page_size,
                    ),
                    filter: filter.clone(),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::question::list::Page::new(page, filter))
    }

    /// Returns the current step of the practice session with the specified
    /// ID, prolonging its expiration.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SESSION_NOT_FOUND` - the session does not exist or has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "session",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn session(
        id: api::session::Id,
        ctx: &Context,
    ) -> Result<api::Step, Error> {
        ctx.service()
            .execute(query::session::Current {
                session_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Reveals the reference answer to the current `Question` of the practice
    /// session with the specified ID, prolonging its expiration.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SESSION_NOT_FOUND` - the session does not exist or has expired;
    /// - `SESSION_FINISHED` - the session has no current `Question`;
    /// - `QUESTION_NOT_EXISTS` - the current `Question` has been deleted.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "sessionAnswer",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn session_answer(
        id: api::session::Id,
        ctx: &Context,
    ) -> Result<api::question::Answer, Error> {
        ctx.service()
            .execute(query::session::CurrentAnswer {
                session_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::session::CurrentError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SessionNotFound(e) => e.try_as_error(),
        }
    }
}

impl AsError for query::session::CurrentAnswerError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::QuestionNotExists(_) => {
                Some(api::QuestionError::NotExists.into())
            }
            Self::SessionFinished(_) => {
                Some(api::SessionError::Finished.into())
            }
            Self::SessionNotFound(e) => e.try_as_error(),
        }
    }
}
