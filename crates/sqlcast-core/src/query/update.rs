//! UPDATE statements using the typestate pattern.

use std::marker::PhantomData;

use super::compilation::{Compilation, CompileSql};
use super::condition::Condition;
use super::expr::{ColumnRef, Expr, IntoExpr};
use super::subject::TableRef;

// Typestate markers

/// Marker: No table specified yet.
#[derive(Debug, Clone, Copy)]
pub struct NoTable;
/// Marker: Table has been specified.
#[derive(Debug, Clone, Copy)]
pub struct HasTable;
/// Marker: No SET clause specified yet.
#[derive(Debug, Clone, Copy)]
pub struct NoSet;
/// Marker: SET clause has been specified.
#[derive(Debug, Clone, Copy)]
pub struct HasSet;

#[derive(Debug, Clone)]
struct Assignment {
    column: ColumnRef,
    value: Expr,
}

/// An UPDATE statement. Only compiles once a table and a SET are given.
#[derive(Debug, Clone)]
pub struct Update<Table, Set> {
    table: Option<TableRef>,
    assignments: Vec<Assignment>,
    where_clause: Option<Condition>,
    _state: PhantomData<(Table, Set)>,
}

impl Update<NoTable, NoSet> {
    /// Creates a new UPDATE builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            assignments: vec![],
            where_clause: None,
            _state: PhantomData,
        }
    }
}

impl Default for Update<NoTable, NoSet> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoTable -> HasTable
impl<Set> Update<NoTable, Set> {
    /// Specifies the table to update.
    #[must_use]
    pub fn table(self, table: &TableRef) -> Update<HasTable, Set> {
        Update {
            table: Some(table.clone()),
            assignments: self.assignments,
            where_clause: self.where_clause,
            _state: PhantomData,
        }
    }
}

// Transition: NoSet -> HasSet (requires table)
impl Update<HasTable, NoSet> {
    /// Adds a SET assignment.
    #[must_use]
    pub fn set(self, column: ColumnRef, value: impl IntoExpr) -> Update<HasTable, HasSet> {
        Update {
            table: self.table,
            assignments: vec![Assignment {
                column,
                value: value.into_expr(),
            }],
            where_clause: self.where_clause,
            _state: PhantomData,
        }
    }
}

impl<Set> Update<HasTable, Set> {
    /// Adds a WHERE condition, AND-ed with any previous one.
    #[must_use]
    pub fn where_clause(mut self, condition: Condition) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }
}

// Methods available after SET
impl Update<HasTable, HasSet> {
    /// Adds another SET assignment.
    #[must_use]
    pub fn set(mut self, column: ColumnRef, value: impl IntoExpr) -> Self {
        self.assignments.push(Assignment {
            column,
            value: value.into_expr(),
        });
        self
    }
}

impl CompileSql for Update<HasTable, HasSet> {
    fn compile_to(&self, c: &mut Compilation<'_>) {
        c.push("UPDATE ");
        if let Some(table) = &self.table {
            c.register_target(table);
            c.push_identifier(table.name());
        }

        c.push(" SET ");
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                c.push(", ");
            }
            c.push_identifier(&assignment.column.name);
            c.push(" = ");
            match (&assignment.value, &assignment.column.indirection) {
                (Expr::Unassigned, Some(expr)) => expr.compile_to(c),
                (value, _) => value.compile_to(c),
            }
        }

        if let Some(condition) = &self.where_clause {
            c.push(" WHERE ");
            condition.compile_to(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Vendor;
    use crate::query::{CompileMode, SqlValue};

    #[test]
    fn test_simple_update() {
        let t = TableRef::new("users");
        let stmt = Update::new()
            .table(&t)
            .set(t.col("name"), "Bob")
            .compile(Vendor::Sqlite.dialect(), CompileMode::Prepared);

        assert_eq!(stmt.sql(), "UPDATE \"users\" SET \"name\" = ?");
        assert_eq!(stmt.params().len(), 1);
    }

    #[test]
    fn test_update_with_where_qualifies_by_table_name() {
        let t = TableRef::new("users");
        let stmt = Update::new()
            .table(&t)
            .set(t.col("active"), false)
            .set(t.col("age"), t.col("age") + 1_i64)
            .where_clause(t.col("id").eq(1))
            .compile(Vendor::Postgres.dialect(), CompileMode::Prepared);

        assert_eq!(
            stmt.sql(),
            "UPDATE \"users\" SET \"active\" = $1, \"age\" = \"users\".\"age\" + $2 \
             WHERE \"users\".\"id\" = $3"
        );
        assert_eq!(stmt.params()[0], SqlValue::Bool(false));
    }

    #[test]
    fn test_update_sql_injection_prevention() {
        let t = TableRef::new("users");
        let malicious = "'; DROP TABLE users; --";
        let stmt = Update::new()
            .table(&t)
            .set(t.col("name"), malicious)
            .compile(Vendor::MySql.dialect(), CompileMode::Prepared);

        assert_eq!(stmt.sql(), "UPDATE `users` SET `name` = ?");
        assert!(matches!(&stmt.params()[0], SqlValue::Text(s) if s == malicious));
    }

    #[test]
    fn test_unassigned_assignment_takes_indirection() {
        let t = TableRef::new("doc");
        let stmt = Update::new()
            .table(&t)
            .set(
                t.col("revision").with_indirection(t.col("revision") + 1_i64),
                Expr::Unassigned,
            )
            .compile(Vendor::Postgres.dialect(), CompileMode::Literal);
        assert_eq!(stmt.sql(), "UPDATE \"doc\" SET \"revision\" = \"doc\".\"revision\" + 1");
    }
}
