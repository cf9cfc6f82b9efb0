//! Domain definitions.

pub mod question;
pub mod session;

pub use self::{question::Question, session::Session};
