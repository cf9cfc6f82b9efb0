//! [`Command`] definition.

pub mod create_question;
pub mod delete_question;
pub mod start_session;
pub mod stop_session;
pub mod submit_answer;
pub mod update_question;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_question::CreateQuestion, delete_question::DeleteQuestion,
    start_session::StartSession, stop_session::StopSession,
    submit_answer::SubmitAnswer, update_question::UpdateQuestion,
};
