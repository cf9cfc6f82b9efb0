//! [`Session`]-related read definitions.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{question, Question, Session},
    infra::{database, Database},
};

/// [`Session`] state along with its current [`Question`] resolved.
#[derive(Clone, Debug)]
pub struct Step {
    /// [`Session`] this [`Step`] describes.
    pub session: Session,

    /// Current [`Question`] of the [`Session`].
    ///
    /// [`None`] either if the [`Session`] is finished, or if its current
    /// [`Question`] has been deleted meanwhile.
    pub question: Option<Question>,
}

impl Step {
    /// Resolves the current [`Question`] of the provided [`Session`].
    pub(crate) async fn resolve<Db>(
        session: Session,
        database: &Db,
    ) -> Result<Self, Traced<database::Error>>
    where
        Db: Database<
            Select<By<Option<Question>, question::Id>>,
            Ok = Option<Question>,
            Err = Traced<database::Error>,
        >,
    {
        let question = match session.current_question_id() {
            Some(id) => database
                .execute(Select(By::new(id)))
                .await
                .map_err(tracerr::wrap!())?,
            None => None,
        };
        Ok(Self { session, question })
    }
}
