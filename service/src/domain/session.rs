//! Practice [`Session`] definitions.

use std::collections::VecDeque;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use rand::{seq::SliceRandom as _, Rng};
use uuid::Uuid;

use crate::domain::question;

/// Practice run through a shuffled set of [`Question`]s.
///
/// [`Session`] is finished exactly when it has no current [`Question`], so
/// these two states can't diverge.
///
/// [`Question`]: crate::domain::Question
#[derive(Clone, Debug)]
pub struct Session {
    /// ID of this [`Session`].
    id: Id,

    /// IDs of the [`Question`]s not presented yet, in presentation order.
    ///
    /// [`Question`]: crate::domain::Question
    remaining: VecDeque<question::Id>,

    /// ID of the [`Question`] awaiting an answer, if any.
    ///
    /// [`Question`]: crate::domain::Question
    current: Option<question::Id>,

    /// Answering [`Stats`] of this [`Session`].
    stats: Stats,

    /// [`DateTime`] after which this [`Session`] is considered gone.
    expires_at: ExpirationDateTime,
}

impl Session {
    /// Starts a new [`Session`] over the provided [`question::Id`]s shuffled
    /// with the thread-local random generator.
    #[must_use]
    pub fn start(
        id: Id,
        question_ids: impl IntoIterator<Item = question::Id>,
        expires_at: ExpirationDateTime,
    ) -> Self {
        Self::start_with_rng(id, question_ids, expires_at, &mut rand::rng())
    }

    /// Starts a new [`Session`] over the provided [`question::Id`]s shuffled
    /// with the provided `rng`.
    ///
    /// Duplicated [`question::Id`]s are presented only once. An empty input
    /// results in an already finished [`Session`].
    #[must_use]
    pub fn start_with_rng<R: Rng + ?Sized>(
        id: Id,
        question_ids: impl IntoIterator<Item = question::Id>,
        expires_at: ExpirationDateTime,
        rng: &mut R,
    ) -> Self {
        let mut ids = question_ids.into_iter().collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        ids.shuffle(rng);

        let mut remaining = VecDeque::from(ids);
        Self {
            id,
            current: remaining.pop_front(),
            remaining,
            stats: Stats::default(),
            expires_at,
        }
    }

    /// Returns ID of this [`Session`].
    #[must_use]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns ID of the [`Question`] awaiting an answer, if any.
    ///
    /// [`Question`]: crate::domain::Question
    #[must_use]
    pub fn current_question_id(&self) -> Option<question::Id> {
        self.current
    }

    /// Returns IDs of the [`Question`]s not presented yet, in presentation
    /// order.
    ///
    /// [`Question`]: crate::domain::Question
    pub fn remaining_question_ids(
        &self,
    ) -> impl ExactSizeIterator<Item = question::Id> + '_ {
        self.remaining.iter().copied()
    }

    /// Returns answering [`Stats`] of this [`Session`].
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Indicates whether all the [`Question`]s of this [`Session`] have been
    /// answered.
    ///
    /// [`Question`]: crate::domain::Question
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Returns [`DateTime`] after which this [`Session`] is considered gone.
    #[must_use]
    pub fn expires_at(&self) -> ExpirationDateTime {
        self.expires_at
    }

    /// Indicates whether this [`Session`] is expired at the provided moment.
    #[must_use]
    pub fn is_expired_at(&self, now: ExpirationDateTime) -> bool {
        self.expires_at.is_before(&now)
    }

    /// Records an answer to the current [`Question`] and moves to the next
    /// one.
    ///
    /// Does nothing if this [`Session`] is finished already.
    ///
    /// [`Question`]: crate::domain::Question
    pub fn answer(&mut self, is_correct: bool) {
        if self.is_finished() {
            return;
        }

        self.stats.asked += 1;
        if is_correct {
            self.stats.correct += 1;
        }
        self.current = self.remaining.pop_front();
    }

    /// Moves the expiration of this [`Session`] to the provided [`DateTime`],
    /// unless it already expires later.
    pub fn prolong(&mut self, expires_at: ExpirationDateTime) {
        self.expires_at = self.expires_at.max(expires_at);
    }

    /// Replaces ID of this [`Session`] with a new random one.
    pub(crate) fn reissue_id(&mut self) {
        self.id = Id::new();
    }
}

/// ID of a [`Session`].
///
/// Randomly generated 128-bit token.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Answering statistics of a [`Session`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Stats {
    /// Number of answers marked as correct.
    pub correct: u32,

    /// Number of submitted answers.
    pub asked: u32,
}

/// [`DateTime`] when a [`Session`] expires.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use std::{collections::HashSet, time::Duration};

    use rand::{rngs::StdRng, SeedableRng as _};

    use crate::domain::question;

    use super::{ExpirationDateTime, Id, Session, Stats};

    fn ids(n: usize) -> Vec<question::Id> {
        (0..n).map(|_| question::Id::new()).collect()
    }

    fn start(question_ids: Vec<question::Id>) -> Session {
        Session::start(
            Id::new(),
            question_ids,
            ExpirationDateTime::now() + Duration::from_secs(60),
        )
    }

    fn presented(session: &Session) -> Vec<question::Id> {
        session
            .current_question_id()
            .into_iter()
            .chain(session.remaining_question_ids())
            .collect()
    }

    #[test]
    fn starts_with_permutation() {
        let input = ids(10);
        let session = start(input.clone());

        let presented = presented(&session);
        assert_eq!(presented.len(), input.len());
        assert_eq!(
            presented.iter().collect::<HashSet<_>>(),
            input.iter().collect::<HashSet<_>>(),
        );
        assert!(!session.is_finished());
        assert_eq!(session.stats(), Stats::default());
    }

    #[test]
    fn starts_finished_when_empty() {
        let session = start(vec![]);

        assert!(session.is_finished());
        assert_eq!(session.current_question_id(), None);
        assert_eq!(session.remaining_question_ids().len(), 0);
    }

    #[test]
    fn drops_duplicates() {
        let id = question::Id::new();
        let session = start(vec![id, id, id]);

        assert_eq!(presented(&session), vec![id]);
    }

    #[test]
    fn shuffles_with_provided_rng() {
        let input = ids(20);
        let expires_at = ExpirationDateTime::now();

        let a = Session::start_with_rng(
            Id::new(),
            input.clone(),
            expires_at,
            &mut StdRng::seed_from_u64(7),
        );
        let b = Session::start_with_rng(
            Id::new(),
            input,
            expires_at,
            &mut StdRng::seed_from_u64(7),
        );

        assert_eq!(presented(&a), presented(&b));
    }

    #[test]
    fn shuffle_is_not_biased_to_input_order() {
        let input = ids(3);
        let mut firsts = HashSet::new();
        for _ in 0..200 {
            firsts.extend(start(input.clone()).current_question_id());
        }

        assert_eq!(firsts.len(), 3);
    }

    #[test]
    fn counts_answers() {
        let mut session = start(ids(5));

        session.answer(true);
        session.answer(false);
        session.answer(true);

        assert_eq!(
            session.stats(),
            Stats {
                correct: 2,
                asked: 3,
            },
        );
        assert!(!session.is_finished());
        assert_eq!(session.remaining_question_ids().len(), 1);
    }

    #[test]
    fn finishes_after_last_answer() {
        let input = ids(2);
        let mut session = start(input.clone());
        let first = session.current_question_id().unwrap();

        session.answer(true);
        let second = session.current_question_id().unwrap();
        assert_ne!(first, second);
        assert!(input.contains(&second));

        session.answer(false);
        assert!(session.is_finished());
        assert_eq!(session.current_question_id(), None);
        assert_eq!(
            session.stats(),
            Stats {
                correct: 1,
                asked: 2,
            },
        );
    }

    #[test]
    fn ignores_answers_once_finished() {
        let mut session = start(ids(1));
        session.answer(true);
        assert!(session.is_finished());

        session.answer(true);
        session.answer(false);

        assert_eq!(
            session.stats(),
            Stats {
                correct: 1,
                asked: 1,
            },
        );
    }

    #[test]
    fn prolongs_only_forward() {
        let now = ExpirationDateTime::now();
        let mut session = Session::start(Id::new(), ids(1), now);

        session.prolong(now - Duration::from_secs(10));
        assert_eq!(session.expires_at(), now);

        session.prolong(now + Duration::from_secs(10));
        assert_eq!(session.expires_at(), now + Duration::from_secs(10));
    }

    #[test]
    fn expires_strictly_after_deadline() {
        let now = ExpirationDateTime::now();
        let session = Session::start(Id::new(), ids(1), now);

        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + Duration::from_millis(1)));
    }
}
