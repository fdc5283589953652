//! Batch executor.
//!
//! Runs compiled statements in order against a single connection. Prepared
//! statements with identical SQL that arrive back to back are queued and sent
//! as one batch; anything else flushes the queue first.

use sqlcast_core::query::SqlValue;
use sqlcast_core::Statement;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::connection::Connection;
use crate::error::{ExecError, Result};

/// Counters for statements run by a [`BatchExecutor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Statements executed.
    pub statements: usize,
    /// Prepared batches flushed.
    pub batches: usize,
    /// Rows affected as reported by the driver.
    pub rows_affected: u64,
}

impl RunSummary {
    fn since(self, earlier: Self) -> Self {
        Self {
            statements: self.statements - earlier.statements,
            batches: self.batches - earlier.batches,
            rows_affected: self.rows_affected - earlier.rows_affected,
        }
    }
}

#[derive(Debug)]
struct Batch {
    sql: String,
    rows: Vec<Vec<SqlValue>>,
    first: usize,
}

impl Batch {
    fn push(&mut self, params: Vec<SqlValue>) -> Result<()> {
        let expected = self.rows.first().map_or(params.len(), Vec::len);
        if params.len() != expected {
            return Err(ExecError::ParameterCount {
                expected,
                actual: params.len(),
            });
        }
        self.rows.push(params);
        Ok(())
    }
}

/// Executes statements against one owned connection.
pub struct BatchExecutor<C: Connection> {
    conn: C,
    pending: Option<Batch>,
    submitted: usize,
    summary: RunSummary,
}

impl<C: Connection> BatchExecutor<C> {
    /// Creates an executor owning `conn`.
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            pending: None,
            submitted: 0,
            summary: RunSummary::default(),
        }
    }

    /// Returns the connection.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Returns the connection mutably, for reads outside the executor.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Releases the connection. Queued statements are discarded.
    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Number of statements queued and not yet flushed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.as_ref().map_or(0, |batch| batch.rows.len())
    }

    /// Totals since the executor was created.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Submits one statement.
    ///
    /// Prepared statements are queued while their SQL matches the current
    /// batch. A statement with different SQL, or one without parameters,
    /// flushes the batch before it runs.
    pub async fn submit(&mut self, statement: Statement) -> Result<()> {
        let index = self.submitted;
        self.submitted += 1;

        if !statement.is_prepared() {
            self.flush().await?;
            debug!(sql = %statement.sql(), "Executing SQL");
            let affected = self
                .conn
                .execute(statement.sql())
                .await
                .map_err(|e| failed(index, statement.sql(), e))?;
            self.summary.statements += 1;
            self.summary.rows_affected += affected;
            return Ok(());
        }

        let (sql, params) = statement.into_parts();
        let same_sql = self.pending.as_ref().is_some_and(|batch| batch.sql == sql);
        if !same_sql {
            self.flush().await?;
            self.pending = Some(Batch {
                sql,
                rows: Vec::new(),
                first: index,
            });
        }
        if let Some(batch) = &mut self.pending {
            debug!(sql = %batch.sql, params = params.len(), "Queued statement");
            batch.push(params).map_err(|e| failed(index, &batch.sql, e))?;
        }
        Ok(())
    }

    /// Sends the queued batch, returning the rows it affected.
    pub async fn flush(&mut self) -> Result<u64> {
        let Some(batch) = self.pending.take() else {
            return Ok(0);
        };
        let started = Instant::now();
        let affected = self
            .conn
            .execute_batch(&batch.sql, &batch.rows)
            .await
            .map_err(|e| failed(batch.first, &batch.sql, e))?;

        self.summary.statements += batch.rows.len();
        self.summary.batches += 1;
        self.summary.rows_affected += affected;
        debug!(
            sql = %batch.sql,
            size = batch.rows.len(),
            affected,
            elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
            "Flushed batch"
        );
        Ok(affected)
    }

    /// Runs `statements` in order and flushes, stopping at the first error.
    pub async fn run<I>(&mut self, statements: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Statement>,
    {
        let before = self.summary;
        for statement in statements {
            self.submit(statement).await?;
        }
        self.flush().await?;
        Ok(self.summary.since(before))
    }

    /// Runs `statements` inside a transaction.
    ///
    /// Commits when every statement succeeds. On the first error the
    /// queue is dropped, the transaction is rolled back and the error is
    /// returned. Nothing is retried.
    pub async fn execute_in_transaction<I>(&mut self, statements: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Statement>,
    {
        self.flush().await?;
        self.conn.begin().await?;
        debug!("Transaction started");

        let summary = match self.run(statements).await {
            Ok(summary) => summary,
            Err(e) => {
                self.pending = None;
                warn!(error = %e, "Statement failed, rolling back");
                self.rollback().await;
                return Err(e);
            }
        };
        if let Err(e) = self.conn.commit().await {
            warn!(error = %e, "Commit failed, rolling back");
            self.rollback().await;
            return Err(e);
        }
        info!(
            statements = summary.statements,
            batches = summary.batches,
            "Transaction committed"
        );
        Ok(summary)
    }

    async fn rollback(&mut self) {
        match self.conn.rollback().await {
            Ok(()) => debug!("Transaction rolled back"),
            Err(e) => warn!(error = %e, "Rollback failed"),
        }
    }
}

fn failed(index: usize, sql: &str, source: ExecError) -> ExecError {
    ExecError::Statement {
        index,
        sql: sql.to_string(),
        source: Box::new(source),
    }
}
