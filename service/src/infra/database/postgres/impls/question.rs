//! [`Question`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{question, Question},
    infra::{
        database::{
            self,
            postgres::{Connection, LikePattern},
            Postgres,
        },
        Database,
    },
    read,
};

/// Builds a [`Question`] out of the provided [`Row`].
fn question(row: &Row) -> Question {
    Question {
        id: row.get("id"),
        text: row.get("text"),
        answer: row.get("answer"),
        created_at: row.get("created_at"),
    }
}

impl Database<Insert<Question>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(question): Insert<Question>,
    ) -> Result<Self::Ok, Self::Err> {
        let Question {
            id,
            text,
            answer,
            created_at,
        } = question;

        const SQL: &str = "\
            INSERT INTO questions (id, text, answer, created_at) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR, $4::TIMESTAMPTZ)";
        self.exec(SQL, &[&id, &text, &answer, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Database<Update<Question>> for Postgres {
    /// Indicator whether the [`Question`] existed and has been updated.
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(question): Update<Question>,
    ) -> Result<Self::Ok, Self::Err> {
        let Question {
            id, text, answer, ..
        } = question;

        const SQL: &str = "\
            UPDATE questions \
            SET text = $2::VARCHAR, \
                answer = $3::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &text, &answer])
            .await
            .map_err(tracerr::wrap!())
            .map(|n| n > 0)
    }
}

impl Database<Delete<By<Question, question::Id>>> for Postgres {
    /// Indicator whether the [`Question`] existed and has been deleted.
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Question, question::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: question::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM questions \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|n| n > 0)
    }
}

impl Database<Select<By<Option<Question>, question::Id>>> for Postgres {
    type Ok = Option<Question>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Question>, question::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: question::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, text, answer, created_at \
            FROM questions \
            WHERE id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(question))
    }
}

impl Database<Select<By<Vec<question::Id>, ()>>> for Postgres {
    type Ok = Vec<question::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<question::Id>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id \
            FROM questions";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect())
    }
}

impl
    Database<
        Select<By<read::question::list::Page, read::question::list::Selector>>,
    > for Postgres
{
    type Ok = read::question::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::question::list::Page, read::question::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::question::list::Selector {
            arguments,
            filter: read::question::list::Filter { search },
        } = by.into_inner();

        // Normalized arguments never come close to these bounds.
        let limit = i64::try_from(arguments.page_size()).unwrap_or(i64::MAX);
        let offset = i64::try_from(arguments.offset()).unwrap_or(i64::MAX);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];

        let pattern =
            search.as_ref().map(|s| LikePattern::contains(s.as_ref()));
        let pattern_idx = pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT id, text, answer, created_at \
             FROM questions \
             WHERE true \
                   {search_filtering} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1::INT8 \
             OFFSET $2::INT8",
            search_filtering =
                pattern_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND text ILIKE ${idx}::VARCHAR"))
                }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::question::list::Page::new(
            arguments,
            rows.iter().map(question),
        ))
    }
}

impl
    Database<
        Select<
            By<read::question::list::TotalCount, read::question::list::Filter>,
        >,
    > for Postgres
{
    type Ok = read::question::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::question::list::TotalCount, read::question::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::question::list::Filter { search } = by.into_inner();

        let pattern =
            search.as_ref().map(|s| LikePattern::contains(s.as_ref()));

        let row = if let Some(pattern) = &pattern {
            const SQL: &str = "\
                SELECT COUNT(*)::INT4 \
                FROM questions \
                WHERE text ILIKE $1::VARCHAR";
            self.query_one(SQL, &[pattern]).await
        } else {
            const SQL: &str = "\
                SELECT COUNT(*)::INT4 \
                FROM questions";
            self.query_one(SQL, &[]).await
        }
        .map_err(tracerr::wrap!())?;

        Ok(row.get::<_, i32>(0).into())
    }
}
