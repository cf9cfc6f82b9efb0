//! [`Command`] for stopping a [`Session`].

use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Session;
use crate::{
    domain::session::{self, Stats},
    infra::sessions::SessionNotFound,
    Service,
};

use super::Command;

/// [`Command`] for stopping a [`Session`] and getting its final [`Stats`].
///
/// Stopped [`Session`] is gone for good.
#[derive(Clone, Copy, Debug)]
pub struct StopSession {
    /// ID of the [`Session`] to be stopped.
    pub session_id: session::Id,
}

impl<Db> Command<StopSession> for Service<Db> {
    type Ok = Stats;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        StopSession { session_id }: StopSession,
    ) -> Result<Self::Ok, Self::Err> {
        let stats = self
            .sessions()
            .stop(session_id)
            .map_err(tracerr::wrap!())?;
        log::debug!(
            "stopped `Session(id: {session_id})` with {}/{} correct answers",
            stats.correct,
            stats.asked,
        );
        Ok(stats)
    }
}

/// Error of [`StopSession`] [`Command`] execution.
pub type ExecutionError = SessionNotFound;
