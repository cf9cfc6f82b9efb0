//! [`SweepExpiredSessions`] [`Task`].

use std::{convert::Infallible, time};

use common::operations::{By, Perform, Start};
use tokio::time::interval;
use tracing as log;

#[cfg(doc)]
use crate::{domain::Session, infra::Sessions};
use crate::Service;

use super::Task;

/// Configuration for [`SweepExpiredSessions`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between sweeps.
    ///
    /// Must be non-zero.
    pub interval: time::Duration,
}

/// [`Task`] for evicting expired [`Session`]s nobody touches anymore.
///
/// Expired [`Session`]s are never observable anyway, so this [`Task`] only
/// bounds memory held by abandoned ones.
#[derive(Clone, Copy, Debug)]
pub struct SweepExpiredSessions<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<SweepExpiredSessions<Self>, Config>>> for Service<Db>
where
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<SweepExpiredSessions<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = SweepExpiredSessions {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            let evicted = match task.execute(Perform(())).await {
                Ok(n) => n,
                Err(never) => match never {},
            };
            if evicted > 0 {
                log::debug!(
                    "`task::SweepExpiredSessions` evicted {evicted} expired \
                     `Session`s",
                );
            }
        }
    }
}

impl<Db> Task<Perform<()>> for SweepExpiredSessions<Service<Db>> {
    /// Number of evicted [`Session`]s.
    type Ok = usize;
    type Err = Infallible;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        Ok(self.service.sessions().evict_expired())
    }
}

#[cfg(test)]
mod spec {
    use std::{thread, time::Duration};

    use common::operations::Perform;

    use crate::{domain::question, infra::sessions, task::Task as _, Service};

    use super::{Config, SweepExpiredSessions};

    #[tokio::test]
    async fn evicts_only_expired_sessions() {
        let (service, _) = Service::new(
            crate::Config {
                sessions: sessions::Config {
                    ttl: Duration::from_millis(30),
                },
                sweep_expired_sessions: None,
            },
            (),
        );
        let stale = service.sessions().create([question::Id::new()]).id();
        thread::sleep(Duration::from_millis(80));
        let fresh = service.sessions().create([question::Id::new()]).id();

        let task = SweepExpiredSessions {
            config: Config {
                interval: Duration::from_secs(1),
            },
            service: service.clone(),
        };

        assert_eq!(task.execute(Perform(())).await.unwrap(), 1);
        assert_eq!(task.execute(Perform(())).await.unwrap(), 0);
        assert!(service.sessions().get(stale).is_err());
        assert!(service.sessions().get(fresh).is_ok());
    }
}
