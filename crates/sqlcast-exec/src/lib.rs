//! Execution adapter for statements compiled by `sqlcast-core`.
//!
//! A [`BatchExecutor`] owns one [`Connection`] and runs compiled
//! [`Statement`](sqlcast_core::Statement)s against it. Consecutive prepared
//! statements sharing the same SQL text are grouped into a single batch, and
//! a run can be wrapped in a transaction that rolls back on the first error.
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlcast_core::ddl::DdlAssembler;
//! use sqlcast_core::dialect::Vendor;
//! use sqlcast_core::schema::Schema;
//! use sqlcast_exec::BatchExecutor;
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! # async fn run(schema: Schema) -> sqlcast_exec::Result<()> {
//! let pool = SqlitePoolOptions::new().connect("sqlite::memory:").await?;
//! let ddl = DdlAssembler::new(Vendor::Sqlite.dialect()).schema(&schema)?;
//!
//! let mut executor = BatchExecutor::new(pool.acquire().await?);
//! executor.execute_in_transaction(ddl.create()).await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod executor;

pub use connection::Connection;
pub use error::{ExecError, Result};
pub use executor::{BatchExecutor, RunSummary};
