//! Connection abstraction and its SQLite implementation.

use std::future::Future;

use sqlcast_core::query::SqlValue;
use sqlx::pool::PoolConnection;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection};

use crate::error::Result;

/// A prepared SQLite query with its arguments.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A database connection able to run compiled statements.
///
/// Implementations execute one statement at a time; callers serialize access
/// through `&mut self`.
pub trait Connection: Send {
    /// Executes SQL without parameters, returning the affected row count.
    fn execute(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send;

    /// Executes SQL with its placeholders bound to `params`.
    fn execute_prepared(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Executes the same SQL once per parameter row.
    ///
    /// The default runs each row through [`Connection::execute_prepared`] and
    /// stops at the first failure.
    fn execute_batch(
        &mut self,
        sql: &str,
        rows: &[Vec<SqlValue>],
    ) -> impl Future<Output = Result<u64>> + Send {
        async move {
            let mut affected = 0;
            for params in rows {
                affected += self.execute_prepared(sql, params).await?;
            }
            Ok(affected)
        }
    }

    /// Starts a transaction.
    fn begin(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Commits the open transaction.
    fn commit(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Rolls back the open transaction.
    fn rollback(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Builds a SQLite query with `params` bound in placeholder order.
#[must_use]
pub fn sqlite_query<'q>(sql: &'q str, params: &[SqlValue]) -> SqliteQuery<'q> {
    params.iter().fold(sqlx::query(sql), bind)
}

fn bind<'q>(query: SqliteQuery<'q>, value: &SqlValue) -> SqliteQuery<'q> {
    match value {
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int(n) => query.bind(*n),
        SqlValue::Float(f) => query.bind(*f),
        // SQLite applies NUMERIC affinity to decimal text on insert.
        SqlValue::Decimal(s) | SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Blob(bytes) => query.bind(bytes.clone()),
        SqlValue::Date(d) => query.bind(*d),
        SqlValue::Time(t) => query.bind(*t),
        SqlValue::Timestamp(ts) => query.bind(*ts),
    }
}

async fn run(conn: &mut SqliteConnection, sql: &str, params: &[SqlValue]) -> Result<u64> {
    let done = sqlite_query(sql, params).execute(conn).await?;
    Ok(done.rows_affected())
}

impl Connection for SqliteConnection {
    async fn execute(&mut self, sql: &str) -> Result<u64> {
        run(self, sql, &[]).await
    }

    async fn execute_prepared(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        run(self, sql, params).await
    }

    async fn begin(&mut self) -> Result<()> {
        run(self, "BEGIN", &[]).await.map(|_| ())
    }

    async fn commit(&mut self) -> Result<()> {
        run(self, "COMMIT", &[]).await.map(|_| ())
    }

    async fn rollback(&mut self) -> Result<()> {
        run(self, "ROLLBACK", &[]).await.map(|_| ())
    }
}

impl Connection for PoolConnection<Sqlite> {
    async fn execute(&mut self, sql: &str) -> Result<u64> {
        run(self, sql, &[]).await
    }

    async fn execute_prepared(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        run(self, sql, params).await
    }

    async fn begin(&mut self) -> Result<()> {
        run(self, "BEGIN", &[]).await.map(|_| ())
    }

    async fn commit(&mut self) -> Result<()> {
        run(self, "COMMIT", &[]).await.map(|_| ())
    }

    async fn rollback(&mut self) -> Result<()> {
        run(self, "ROLLBACK", &[]).await.map(|_| ())
    }
}
