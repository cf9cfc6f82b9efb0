//! GraphQL API definitions.

mod mutation;
mod query;
pub mod question;
pub mod scalar;
pub mod session;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    mutation::Mutation, query::Query, question::Question, session::Step,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum QuestionError {
        #[code = "QUESTION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Question` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum SessionError {
        #[code = "SESSION_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Session` with the specified ID does not exist or has \
                     expired"]
        NotFound,

        #[code = "SESSION_FINISHED"]
        #[status = BAD_REQUEST]
        #[message = "`Session` has no current `Question` anymore"]
        Finished,
    }
}
