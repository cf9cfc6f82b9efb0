//! In-memory [`Sessions`] engine.

use std::{sync::Arc, time::Duration};

use dashmap::{mapref::entry::Entry, DashMap};
use derive_more::{Display, Error};

use crate::domain::{
    question,
    session::{self, ExpirationDateTime, Stats},
    Session,
};

/// Configuration of [`Sessions`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Idle time after which a [`Session`] expires.
    ///
    /// Every successful access to a [`Session`] restarts this countdown.
    pub ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
        }
    }
}

/// Table of live [`Session`]s with a sliding idle expiration.
///
/// Expiration is lazy: an expired [`Session`] is evicted by the first access
/// discovering it, so [`Sessions::evict_expired()`] is only a memory bound.
///
/// Every operation upon a single [`Session`] is atomic, while operations upon
/// different [`Session`]s contend only when they land into the same shard of
/// the underlying table.
#[derive(Clone, Debug)]
pub struct Sessions {
    /// [`Config`] of these [`Sessions`].
    config: Config,

    /// Stored [`Session`]s, including the expired ones not evicted yet.
    table: Arc<DashMap<session::Id, Session>>,
}

impl Sessions {
    /// Creates new empty [`Sessions`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: Arc::new(DashMap::new()),
        }
    }

    /// Returns the idle time after which a [`Session`] expires.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Creates and stores a new [`Session`] over the provided
    /// [`question::Id`]s.
    ///
    /// An empty input results in an already finished [`Session`].
    pub fn create(
        &self,
        question_ids: impl IntoIterator<Item = question::Id>,
    ) -> Session {
        let mut session = Session::start(
            session::Id::new(),
            question_ids,
            ExpirationDateTime::now() + self.config.ttl,
        );
        loop {
            match self.table.entry(session.id()) {
                Entry::Vacant(e) => {
                    drop(e.insert(session.clone()));
                    return session;
                }
                Entry::Occupied(_) => session.reissue_id(),
            }
        }
    }

    /// Returns the live [`Session`] with the provided [`session::Id`],
    /// prolonging its expiration.
    ///
    /// # Errors
    ///
    /// With [`SessionNotFound`] if there is no such [`Session`] or it has
    /// expired. An expired [`Session`] is evicted.
    pub fn get(&self, id: session::Id) -> Result<Session, SessionNotFound> {
        self.access(id, |_| {})
    }

    /// Records an answer to the current question of the [`Session`] with the
    /// provided [`session::Id`] and moves it to the next question.
    ///
    /// A finished [`Session`] is returned unchanged.
    ///
    /// # Errors
    ///
    /// With [`SessionNotFound`] if there is no such [`Session`] or it has
    /// expired. An expired [`Session`] is evicted.
    pub fn submit_answer(
        &self,
        id: session::Id,
        is_correct: bool,
    ) -> Result<Session, SessionNotFound> {
        self.access(id, |s| s.answer(is_correct))
    }

    /// Removes the [`Session`] with the provided [`session::Id`], returning
    /// its final [`Stats`].
    ///
    /// # Errors
    ///
    /// With [`SessionNotFound`] if there is no such [`Session`] or it has
    /// expired. An expired [`Session`] is evicted.
    pub fn stop(&self, id: session::Id) -> Result<Stats, SessionNotFound> {
        let now = ExpirationDateTime::now();
        match self.table.entry(id) {
            Entry::Vacant(_) => Err(SessionNotFound(id)),
            Entry::Occupied(e) => {
                let session = e.remove();
                if session.is_expired_at(now) {
                    Err(SessionNotFound(id))
                } else {
                    Ok(session.stats())
                }
            }
        }
    }

    /// Evicts all the expired [`Session`]s, returning how many were evicted.
    pub fn evict_expired(&self) -> usize {
        let now = ExpirationDateTime::now();
        let mut evicted = 0;
        self.table.retain(|_, s| {
            let is_live = !s.is_expired_at(now);
            if !is_live {
                evicted += 1;
            }
            is_live
        });
        evicted
    }

    /// Returns number of stored [`Session`]s, including the expired ones not
    /// evicted yet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Indicates whether there are no stored [`Session`]s at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Applies the provided `modify` function to the live [`Session`] with the
    /// provided [`session::Id`] and prolongs its expiration.
    ///
    /// The whole check-modify-prolong sequence runs under the entry guard, so
    /// it's atomic in regard to other operations upon the same [`Session`].
    fn access(
        &self,
        id: session::Id,
        modify: impl FnOnce(&mut Session),
    ) -> Result<Session, SessionNotFound> {
        let now = ExpirationDateTime::now();
        match self.table.entry(id) {
            Entry::Vacant(_) => Err(SessionNotFound(id)),
            Entry::Occupied(mut e) => {
                if e.get().is_expired_at(now) {
                    drop(e.remove());
                    return Err(SessionNotFound(id));
                }
                let session = e.get_mut();
                modify(session);
                session.prolong(now + self.config.ttl);
                Ok(session.clone())
            }
        }
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// [`Session`] doesn't exist or has expired.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Session(id: {_0})` does not exist")]
pub struct SessionNotFound(#[error(not(source))] pub session::Id);

#[cfg(test)]
mod spec {
    use std::{collections::HashSet, thread, time::Duration};

    use crate::domain::{question, session::Stats};

    use super::{Config, SessionNotFound, Sessions};

    fn ids(n: usize) -> Vec<question::Id> {
        (0..n).map(|_| question::Id::new()).collect()
    }

    fn sessions(ttl: Duration) -> Sessions {
        Sessions::new(Config { ttl })
    }

    #[test]
    fn creates_unique_sessions() {
        let sessions = Sessions::default();

        let a = sessions.create(ids(3));
        let b = sessions.create(ids(3));

        assert_ne!(a.id(), b.id());
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.ttl(), Duration::from_secs(30 * 60));
    }

    #[test]
    fn huge_ttl_never_expires() {
        let sessions = sessions(Duration::from_secs(10_000 * 365 * 24 * 3600));

        let session = sessions.create(ids(2));
        let id = session.id();

        assert!(sessions.get(id).is_ok());
        let session = sessions.submit_answer(id, true).unwrap();
        assert_eq!(session.stats(), Stats { correct: 1, asked: 1 });
        assert_eq!(sessions.evict_expired(), 0);
        assert_eq!(
            sessions.stop(id).unwrap(),
            Stats { correct: 1, asked: 1 },
        );
    }

    #[test]
    fn creates_permutation_of_input() {
        let sessions = Sessions::default();
        let input = ids(25);

        let session = sessions.create(input.clone());

        let presented = session
            .current_question_id()
            .into_iter()
            .chain(session.remaining_question_ids())
            .collect::<Vec<_>>();
        assert_eq!(presented.len(), input.len());
        assert_eq!(
            presented.into_iter().collect::<HashSet<_>>(),
            input.into_iter().collect::<HashSet<_>>(),
        );
        assert!(!session.is_finished());
    }

    #[test]
    fn creates_finished_session_from_empty_input() {
        let sessions = Sessions::default();

        let session = sessions.create(vec![]);

        assert!(session.is_finished());
        assert_eq!(session.current_question_id(), None);
        assert!(sessions.get(session.id()).unwrap().is_finished());
    }

    #[test]
    fn walks_through_two_questions() {
        let sessions = Sessions::default();
        let input = ids(2);

        let session = sessions.create(input.clone());
        let first = session.current_question_id().unwrap();
        let queued = session.remaining_question_ids().collect::<Vec<_>>();
        assert_eq!(queued.len(), 1);
        assert_ne!(first, queued[0]);
        assert!(input.contains(&first) && input.contains(&queued[0]));

        let session = sessions.submit_answer(session.id(), true).unwrap();
        assert_eq!(
            session.stats(),
            Stats {
                correct: 1,
                asked: 1,
            },
        );
        assert_eq!(session.current_question_id(), Some(queued[0]));

        let session = sessions.submit_answer(session.id(), false).unwrap();
        assert_eq!(
            session.stats(),
            Stats {
                correct: 1,
                asked: 2,
            },
        );
        assert!(session.is_finished());
        assert_eq!(session.current_question_id(), None);

        assert_eq!(
            sessions.stop(session.id()).unwrap(),
            Stats {
                correct: 1,
                asked: 2,
            },
        );
        assert!(matches!(
            sessions.get(session.id()),
            Err(SessionNotFound(id)) if id == session.id(),
        ));
    }

    #[test]
    fn finished_session_ignores_answers() {
        let sessions = Sessions::default();
        let session = sessions.create(ids(1));
        drop(sessions.submit_answer(session.id(), false).unwrap());

        let session = sessions.submit_answer(session.id(), true).unwrap();

        assert!(session.is_finished());
        assert_eq!(
            session.stats(),
            Stats {
                correct: 0,
                asked: 1,
            },
        );
    }

    #[test]
    fn stopped_session_is_gone() {
        let sessions = Sessions::default();
        let id = sessions.create(ids(3)).id();

        drop(sessions.stop(id).unwrap());

        assert!(sessions.get(id).is_err());
        assert!(sessions.submit_answer(id, true).is_err());
        assert!(sessions.stop(id).is_err());
        assert!(sessions.is_empty());
    }

    #[test]
    fn unknown_session_is_not_found() {
        let sessions = Sessions::default();
        let id = crate::domain::session::Id::new();

        assert!(sessions.get(id).is_err());
        assert!(sessions.submit_answer(id, true).is_err());
        assert!(sessions.stop(id).is_err());
    }

    #[test]
    fn untouched_session_expires() {
        let sessions = sessions(Duration::from_millis(20));
        let id = sessions.create(ids(2)).id();

        thread::sleep(Duration::from_millis(60));

        assert!(sessions.submit_answer(id, true).is_err());
        assert!(sessions.is_empty(), "expired session must be evicted");
        assert!(sessions.get(id).is_err());
    }

    #[test]
    fn expired_session_cannot_be_stopped() {
        let sessions = sessions(Duration::from_millis(20));
        let id = sessions.create(ids(2)).id();

        thread::sleep(Duration::from_millis(60));

        assert!(sessions.stop(id).is_err());
        assert!(sessions.is_empty());
    }

    #[test]
    fn access_prolongs_expiration() {
        let sessions = sessions(Duration::from_millis(200));
        let session = sessions.create(ids(100));
        let mut expires_at = session.expires_at();

        for i in 0..10 {
            thread::sleep(Duration::from_millis(50));
            let session = if i % 2 == 0 {
                sessions.get(session.id())
            } else {
                sessions.submit_answer(session.id(), true)
            }
            .unwrap();
            assert!(session.expires_at() >= expires_at);
            expires_at = session.expires_at();
        }
    }

    #[test]
    fn evicts_only_expired() {
        let sessions = sessions(Duration::from_millis(30));
        let stale = sessions.create(ids(1)).id();
        thread::sleep(Duration::from_millis(80));
        let fresh = sessions.create(ids(1)).id();

        assert_eq!(sessions.evict_expired(), 1);
        assert_eq!(sessions.len(), 1);
        assert!(sessions.get(stale).is_err());
        assert!(sessions.get(fresh).is_ok());
    }

    #[test]
    fn concurrent_sessions_do_not_interfere() {
        let sessions = Sessions::default();
        let ids = (0..100)
            .map(|_| sessions.create(ids(20)).id())
            .collect::<Vec<_>>();

        thread::scope(|s| {
            for (n, id) in ids.iter().copied().enumerate() {
                let sessions = &sessions;
                drop(s.spawn(move || {
                    for i in 0..(n % 15 + 1) {
                        drop(sessions.submit_answer(id, i % 2 == 0).unwrap());
                    }
                }));
            }
        });

        for (n, id) in ids.into_iter().enumerate() {
            let calls = u32::try_from(n % 15 + 1).unwrap();
            let stats = sessions.get(id).unwrap().stats();
            assert_eq!(stats.asked, calls);
            assert_eq!(stats.correct, calls.div_ceil(2));
        }
    }

    #[test]
    fn concurrent_answers_to_same_session_are_not_lost() {
        let sessions = Sessions::default();
        let id = sessions.create(ids(1000)).id();

        thread::scope(|s| {
            for t in 0..8 {
                let sessions = &sessions;
                drop(s.spawn(move || {
                    for _ in 0..100 {
                        drop(sessions.submit_answer(id, t % 2 == 0).unwrap());
                    }
                }));
            }
        });

        let session = sessions.get(id).unwrap();
        assert_eq!(
            session.stats(),
            Stats {
                correct: 400,
                asked: 800,
            },
        );
        assert_eq!(session.remaining_question_ids().len(), 199);
    }

    #[test]
    fn concurrent_answers_stop_at_finish() {
        let sessions = Sessions::default();
        let id = sessions.create(ids(50)).id();

        thread::scope(|s| {
            for _ in 0..4 {
                let sessions = &sessions;
                drop(s.spawn(move || {
                    for _ in 0..30 {
                        drop(sessions.submit_answer(id, true).unwrap());
                    }
                }));
            }
        });

        let session = sessions.get(id).unwrap();
        assert!(session.is_finished());
        assert_eq!(
            session.stats(),
            Stats {
                correct: 50,
                asked: 50,
            },
        );
    }

    #[test]
    fn concurrent_stop_succeeds_once() {
        let sessions = Sessions::default();
        let id = sessions.create(ids(5)).id();

        let stopped = thread::scope(|s| {
            let handles = (0..8)
                .map(|_| {
                    let sessions = &sessions;
                    s.spawn(move || sessions.stop(id).is_ok())
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or(false))
                .filter(|stopped| *stopped)
                .count()
        });

        assert_eq!(stopped, 1);
    }
}
