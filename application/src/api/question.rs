//! [`Question`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// An interview question.
#[derive(Clone, Debug, From, Into)]
pub struct Question(domain::Question);

/// An interview question along with its reference answer.
#[graphql_object(context = Context)]
impl Question {
    /// Unique identifier of this `Question`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Question.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Text of this `Question`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Question.text",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn text(&self) -> Text {
        self.0.text.clone().into()
    }

    /// Reference answer to this `Question`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Question.answer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn answer(&self) -> Answer {
        self.0.answer.clone().into()
    }

    /// `DateTime` when this `Question` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Question.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Question`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::question::Id)]
#[into(domain::question::Id)]
#[graphql(name = "QuestionId", transparent)]
pub struct Id(Uuid);

/// Text of a `Question`.
///
/// Trimmed, non-empty, at most 3000 characters.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "QuestionText",
    with = scalar::Via::<domain::question::Text>,
)]
pub struct Text(domain::question::Text);

/// Reference answer to a `Question`.
///
/// Trimmed, non-empty, at most 5000 characters.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "QuestionAnswer",
    with = scalar::Via::<domain::question::Answer>,
)]
pub struct Answer(domain::question::Answer);

pub mod list {
    //! Definitions related to [`Question`] list.

    use juniper::graphql_object;
    use service::{query, read, Query as _};

    use crate::{api, AsError, Context, Error};

    use super::Question;

    /// Page of the [`Question`] list.
    #[derive(Clone, Debug)]
    pub struct Page {
        /// Underlying [`read::question::list::Page`].
        page: read::question::list::Page,

        /// [`read::question::list::Filter`] the page was selected with.
        filter: read::question::list::Filter,
    }

    impl Page {
        /// Creates a new [`Page`] out of the provided parts.
        #[must_use]
        pub fn new(
            page: read::question::list::Page,
            filter: read::question::list::Filter,
        ) -> Self {
            Self { page, filter }
        }
    }

    /// Page of the `Question` list, newest first.
    #[graphql_object(name = "QuestionListPage", context = Context)]
    impl Page {
        /// `Question`s on this page.
        #[must_use]
        pub fn items(&self) -> Vec<Question> {
            self.page.items.iter().cloned().map(Into::into).collect()
        }

        /// Total count of `Question`s matching the search.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "QuestionListPage.total",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub async fn total(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::questions::TotalCount::by(self.filter.clone()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }

        /// Number of this page, starting from 1.
        pub fn page(&self) -> Result<i32, Error> {
            i32::try_from(self.page.arguments.page())
                .map_err(AsError::into_error)
        }

        /// Maximum number of `Question`s on this page.
        pub fn page_size(&self) -> Result<i32, Error> {
            i32::try_from(self.page.arguments.page_size())
                .map_err(AsError::into_error)
        }
    }
}
