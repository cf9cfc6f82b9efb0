//! End-to-end flows of practice sessions over an in-memory question store.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Handler,
};
use service::{
    command::{
        self, CreateQuestion, DeleteQuestion, StartSession, StopSession,
        SubmitAnswer, UpdateQuestion,
    },
    domain::{question, session::Stats, Question},
    infra::{database, sessions},
    query::{self, session},
    Config, Service,
};
use tracerr::Traced;

/// In-memory question store.
#[derive(Clone, Debug, Default)]
struct FakeDb(Arc<Mutex<Vec<Question>>>);

impl FakeDb {
    fn with<T>(&self, f: impl FnOnce(&mut Vec<Question>) -> T) -> T {
        f(&mut self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Handler<Insert<Question>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(question): Insert<Question>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|qs| qs.push(question));
        Ok(())
    }
}

impl Handler<Update<Question>> for FakeDb {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(question): Update<Question>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.with(|qs| {
            qs.iter_mut()
                .find(|q| q.id == question.id)
                .map(|q| *q = question)
                .is_some()
        }))
    }
}

impl Handler<Delete<By<Question, question::Id>>> for FakeDb {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Question, question::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.with(|qs| {
            let len = qs.len();
            qs.retain(|q| q.id != id);
            qs.len() != len
        }))
    }
}

impl Handler<Select<By<Option<Question>, question::Id>>> for FakeDb {
    type Ok = Option<Question>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Question>, question::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.with(|qs| qs.iter().find(|q| q.id == id).cloned()))
    }
}

impl Handler<Select<By<Vec<question::Id>, ()>>> for FakeDb {
    type Ok = Vec<question::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<question::Id>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.with(|qs| qs.iter().map(|q| q.id).collect()))
    }
}

fn service() -> Service<FakeDb> {
    service_with(Config::default())
}

fn service_with(config: Config) -> Service<FakeDb> {
    let (service, background) = Service::new(config, FakeDb::default());
    assert!(background.is_empty());
    service
}

async fn create(service: &Service<FakeDb>, text: &str) -> Question {
    service
        .execute(CreateQuestion {
            text: question::Text::new(text).unwrap(),
            answer: question::Answer::new(format!("answer to {text}"))
                .unwrap(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn walks_through_all_questions() {
    let service = service();
    let a = create(&service, "What is a lifetime?").await;
    let b = create(&service, "What is a trait object?").await;

    let step = service.execute(StartSession).await.unwrap();
    let session_id = step.session.id();
    let first = step.question.clone().unwrap();
    assert!(first.id == a.id || first.id == b.id);
    assert!(!step.session.is_finished());
    assert_eq!(step.session.stats(), Stats::default());

    let answer = service
        .execute(session::CurrentAnswer { session_id })
        .await
        .unwrap();
    assert_eq!(answer, first.answer);

    let step = service
        .execute(SubmitAnswer {
            session_id,
            is_correct: true,
        })
        .await
        .unwrap();
    let second = step.question.clone().unwrap();
    assert_ne!(second.id, first.id);
    assert_eq!(
        step.session.stats(),
        Stats {
            correct: 1,
            asked: 1,
        },
    );

    let step = service
        .execute(session::Current { session_id })
        .await
        .unwrap();
    assert_eq!(step.question.map(|q| q.id), Some(second.id));

    let step = service
        .execute(SubmitAnswer {
            session_id,
            is_correct: false,
        })
        .await
        .unwrap();
    assert!(step.session.is_finished());
    assert!(step.question.is_none());

    let stats = service.execute(StopSession { session_id }).await.unwrap();
    assert_eq!(
        stats,
        Stats {
            correct: 1,
            asked: 2,
        },
    );

    assert!(matches!(
        service
            .execute(session::Current { session_id })
            .await
            .unwrap_err()
            .as_ref(),
        session::CurrentError::SessionNotFound(_),
    ));
}

#[tokio::test]
async fn cannot_start_without_questions() {
    let service = service();

    let err = service.execute(StartSession).await.unwrap_err();

    assert!(matches!(
        err.as_ref(),
        command::start_session::ExecutionError::NoQuestions,
    ));
    assert!(service.sessions().is_empty());
}

#[tokio::test]
async fn finished_session_has_no_answer() {
    let service = service();
    drop(create(&service, "What is `Pin`?").await);
    let session_id = service.execute(StartSession).await.unwrap().session.id();
    drop(
        service
            .execute(SubmitAnswer {
                session_id,
                is_correct: true,
            })
            .await
            .unwrap(),
    );

    let err = service
        .execute(session::CurrentAnswer { session_id })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        session::CurrentAnswerError::SessionFinished(id) if *id == session_id,
    ));
}

#[tokio::test]
async fn answering_finished_session_changes_nothing() {
    let service = service();
    drop(create(&service, "What is `Send`?").await);
    let session_id = service.execute(StartSession).await.unwrap().session.id();

    for _ in 0..3 {
        drop(
            service
                .execute(SubmitAnswer {
                    session_id,
                    is_correct: true,
                })
                .await
                .unwrap(),
        );
    }

    let stats = service.execute(StopSession { session_id }).await.unwrap();
    assert_eq!(
        stats,
        Stats {
            correct: 1,
            asked: 1,
        },
    );
}

#[tokio::test]
async fn deleted_question_is_skippable() {
    let service = service();
    drop(create(&service, "What is `Sync`?").await);
    drop(create(&service, "What is `Unpin`?").await);
    let step = service.execute(StartSession).await.unwrap();
    let session_id = step.session.id();
    let current = step.question.unwrap();

    service
        .execute(DeleteQuestion { id: current.id })
        .await
        .unwrap();

    let step = service
        .execute(session::Current { session_id })
        .await
        .unwrap();
    assert!(step.question.is_none());
    assert!(!step.session.is_finished());
    assert!(matches!(
        service
            .execute(session::CurrentAnswer { session_id })
            .await
            .unwrap_err()
            .as_ref(),
        session::CurrentAnswerError::QuestionNotExists(id) if *id == current.id,
    ));

    let step = service
        .execute(SubmitAnswer {
            session_id,
            is_correct: false,
        })
        .await
        .unwrap();
    assert!(step.question.is_some());
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let service = service();
    let session_id = service::domain::session::Id::new();

    assert!(matches!(
        service
            .execute(SubmitAnswer {
                session_id,
                is_correct: true,
            })
            .await
            .unwrap_err()
            .as_ref(),
        command::submit_answer::ExecutionError::SessionNotFound(_),
    ));
    assert!(service.execute(StopSession { session_id }).await.is_err());
    assert!(matches!(
        service
            .execute(session::CurrentAnswer { session_id })
            .await
            .unwrap_err()
            .as_ref(),
        session::CurrentAnswerError::SessionNotFound(_),
    ));
}

#[tokio::test]
async fn idle_session_expires() {
    let service = service_with(Config {
        sessions: sessions::Config {
            ttl: Duration::from_millis(50),
        },
        sweep_expired_sessions: None,
    });
    drop(create(&service, "What is `Drop`?").await);
    let session_id = service.execute(StartSession).await.unwrap().session.id();

    tokio::time::sleep(Duration::from_millis(120)).await;

    assert!(service
        .execute(session::Current { session_id })
        .await
        .is_err());
    assert!(service.sessions().is_empty());
}

#[tokio::test]
async fn updates_existing_question() {
    let service = service();
    let created = create(&service, "What is `Box`?").await;

    let updated = service
        .execute(UpdateQuestion {
            id: created.id,
            text: question::Text::new("What is `Rc`?").unwrap(),
            answer: question::Answer::new("Shared ownership.").unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    let stored = service
        .execute(query::question::ById::by(created.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(AsRef::<str>::as_ref(&stored.text), "What is `Rc`?");
    assert_eq!(AsRef::<str>::as_ref(&stored.answer), "Shared ownership.");
}

#[tokio::test]
async fn updating_or_deleting_missing_question_fails() {
    let service = service();
    let id = question::Id::new();

    assert!(matches!(
        service
            .execute(UpdateQuestion {
                id,
                text: question::Text::new("What is `Arc`?").unwrap(),
                answer: question::Answer::new("Atomic `Rc`.").unwrap(),
            })
            .await
            .unwrap_err()
            .as_ref(),
        command::update_question::ExecutionError::QuestionNotExists(i)
            if *i == id,
    ));
    assert!(matches!(
        service
            .execute(DeleteQuestion { id })
            .await
            .unwrap_err()
            .as_ref(),
        command::delete_question::ExecutionError::QuestionNotExists(i)
            if *i == id,
    ));
}

#[tokio::test]
async fn new_session_sees_only_remaining_questions() {
    let service = service();
    let kept = create(&service, "What is `Cow`?").await;
    let deleted = create(&service, "What is `Cell`?").await;
    service
        .execute(DeleteQuestion { id: deleted.id })
        .await
        .unwrap();

    let step = service.execute(StartSession).await.unwrap();

    assert_eq!(step.question.map(|q| q.id), Some(kept.id));
    assert_eq!(step.session.remaining_question_ids().len(), 0);
}
