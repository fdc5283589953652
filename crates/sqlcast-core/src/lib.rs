//! # sqlcast-core
//!
//! Compiles a vendor-neutral schema and query model into SQL for Db2, MySQL,
//! Oracle, PostgreSQL, SQL Server and SQLite.
//!
//! This crate provides:
//! - An abstract schema model with constraints, indexes, enums and
//!   auto-generated values
//! - Per-vendor dialects that fit abstract types into native ones and reject
//!   sizes the vendor cannot store
//! - A dependency resolver that orders CREATE and DROP statements by foreign
//!   keys and inheritance
//! - A query compiler rendering either inline literals or placeholders with
//!   bound parameters
//!
//! ## Generating DDL
//!
//! ```rust
//! use sqlcast_core::ddl::DdlAssembler;
//! use sqlcast_core::dialect::Vendor;
//! use sqlcast_core::schema::{integer, varchar, Schema, TableBuilder};
//!
//! let schema = Schema::new("shop").table(
//!     TableBuilder::new()
//!         .name("customer")
//!         .column(integer("id", 9).not_null().build())
//!         .column(varchar("name", 80).build())
//!         .primary_key(&["id"])
//!         .build(),
//! );
//!
//! let ddl = DdlAssembler::new(Vendor::MySql.dialect()).schema(&schema)?;
//! assert!(ddl.create()[0].sql().starts_with("CREATE TABLE `customer`"));
//! # Ok::<(), sqlcast_core::Error>(())
//! ```
//!
//! ## Compiling queries
//!
//! ```rust
//! use sqlcast_core::dialect::Vendor;
//! use sqlcast_core::query::{CompileMode, CompileSql, Select, TableRef};
//!
//! let users = TableRef::new("users");
//! let query = Select::new()
//!     .column(users.col("id"))
//!     .from(&users)
//!     .where_clause(users.col("name").eq("'; DROP TABLE users; --"));
//!
//! let stmt = query.compile(Vendor::SqlServer.dialect(), CompileMode::Prepared);
//! assert_eq!(stmt.sql(), "SELECT t0.[id] FROM [users] t0 WHERE t0.[name] = @p1");
//! assert_eq!(stmt.params().len(), 1);
//! ```

pub mod ddl;
pub mod dialect;
pub mod error;
pub mod query;
pub mod resolver;
pub mod schema;
mod statement;

pub use error::{Error, Result};
pub use statement::Statement;
