//! [`Connection`] definitions.

use std::future::Future;

use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::infra::database::{self, postgres, Postgres};

pub use deadpool_postgres::{
    Client, CreatePoolError as PoolCreationError, Pool, PoolError,
};
pub use tokio_postgres::Error;

/// Parameters of a SQL statement.
pub type Params<'a> = [&'a (dyn ToSql + Sync)];

/// Something able to run SQL statements.
pub trait Connection {
    /// Runs the `sql` query returning all its rows.
    ///
    /// # Errors
    ///
    /// If the query fails.
    fn query(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = Result<Vec<Row>, Traced<database::Error>>>;

    /// Runs the `sql` query returning at most one row.
    ///
    /// # Errors
    ///
    /// If the query fails or returns more than one row.
    fn query_opt(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>;

    /// Runs the `sql` query returning exactly one row.
    ///
    /// # Errors
    ///
    /// If the query fails or doesn't return exactly one row.
    fn query_one(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = Result<Row, Traced<database::Error>>>;

    /// Runs the `sql` statement returning the number of affected rows.
    ///
    /// # Errors
    ///
    /// If the statement fails.
    fn exec(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>;
}

/// Lifts a [`tokio_postgres::Error`] into a traced [`database::Error`].
macro_rules! db_err {
    () => {
        |e| tracerr::map_from(tracerr::new!(postgres::Error::Connection(e)))
    };
}

impl Connection for Postgres {
    async fn query(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Vec<Row>, Traced<database::Error>> {
        let client = self.client().await.map_err(tracerr::wrap!())?;
        client.query(sql, params).await.map_err(db_err!())
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Option<Row>, Traced<database::Error>> {
        let client = self.client().await.map_err(tracerr::wrap!())?;
        client.query_opt(sql, params).await.map_err(db_err!())
    }

    async fn query_one(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Row, Traced<database::Error>> {
        let client = self.client().await.map_err(tracerr::wrap!())?;
        client.query_one(sql, params).await.map_err(db_err!())
    }

    async fn exec(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<u64, Traced<database::Error>> {
        let client = self.client().await.map_err(tracerr::wrap!())?;
        client.execute(sql, params).await.map_err(db_err!())
    }
}
