//! Query and statement compiler.
//!
//! Statement trees (SELECT, INSERT, UPDATE, DELETE) are built from
//! [`Expr`] and [`Condition`] nodes and compiled for one dialect, either
//! with inline literals or with vendor placeholders and bound parameters.
//!
//! # Example
//!
//! ```rust
//! use sqlcast_core::dialect::Vendor;
//! use sqlcast_core::query::{CompileMode, CompileSql, Select, TableRef};
//!
//! let users = TableRef::new("users");
//! let stmt = Select::new()
//!     .column(users.col("name"))
//!     .from(&users)
//!     .where_clause(users.col("active").eq(true))
//!     .compile(Vendor::Postgres.dialect(), CompileMode::Prepared);
//!
//! assert_eq!(stmt.sql(), "SELECT t0.\"name\" FROM \"users\" t0 WHERE t0.\"active\" = $1");
//! ```

mod compilation;
mod condition;
mod delete;
mod expr;
mod insert;
mod select;
mod subject;
mod update;
pub mod value;

pub use compilation::{Compilation, CompileMode, CompileSql};
pub use condition::{CompareOp, Condition};
pub use delete::Delete;
pub use expr::{col, concat, count, count_all, func, sum, ArithOp, ColumnRef, Expr, IntoExpr};
pub use insert::Insert;
pub use select::{Join, JoinKind, Order, Select};
pub use subject::{DerivedTable, Subject, SubjectId, TableRef};
pub use update::{HasSet, HasTable, NoSet, NoTable, Update};
pub use value::{SqlValue, ToSqlValue};
