//! Background [`Task`]s definitions.

mod background;
pub mod sweep_expired_sessions;

pub use common::Handler as Task;

pub use self::{
    background::{Background, TaskFailed},
    sweep_expired_sessions::SweepExpiredSessions,
};
