//! DELETE statements.

use std::marker::PhantomData;

use super::compilation::{Compilation, CompileSql};
use super::condition::Condition;
use super::subject::TableRef;
use super::update::{HasTable, NoTable};

/// A DELETE statement. Only compiles once a table is given.
#[derive(Debug, Clone)]
pub struct Delete<Table> {
    table: Option<TableRef>,
    where_clause: Option<Condition>,
    _state: PhantomData<Table>,
}

impl Delete<NoTable> {
    /// Creates a new DELETE builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            where_clause: None,
            _state: PhantomData,
        }
    }

    /// Specifies the table to delete from.
    #[must_use]
    pub fn from(self, table: &TableRef) -> Delete<HasTable> {
        Delete {
            table: Some(table.clone()),
            where_clause: self.where_clause,
            _state: PhantomData,
        }
    }
}

impl Default for Delete<NoTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl Delete<HasTable> {
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

impl CompileSql for Delete<HasTable> {
    fn compile_to(&self, c: &mut Compilation<'_>) {
        c.push("DELETE FROM ");
        if let Some(table) = &self.table {
            c.register_target(table);
            c.push_identifier(table.name());
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
    use crate::query::{CompileMode, Select};

    #[test]
    fn test_simple_delete() {
        let t = TableRef::new("users");
        let stmt = Delete::new()
            .from(&t)
            .compile(Vendor::Postgres.dialect(), CompileMode::Literal);
        assert_eq!(stmt.sql(), "DELETE FROM \"users\"");
    }

    #[test]
    fn test_delete_with_subquery() {
        let orders = TableRef::new("orders");
        let customer = TableRef::new("customer");
        let stmt = Delete::new()
            .from(&orders)
            .where_clause(
                orders.col("customer_id").in_select(
                    Select::new()
                        .column(customer.col("id"))
                        .from(&customer)
                        .where_clause(customer.col("active").eq(false)),
                ),
            )
            .compile(Vendor::SqlServer.dialect(), CompileMode::Prepared);
        assert_eq!(
            stmt.sql(),
            "DELETE FROM [orders] WHERE [orders].[customer_id] IN \
             (SELECT t0.[id] FROM [customer] t0 WHERE t0.[active] = @p1)"
        );
        assert_eq!(stmt.params().len(), 1);
    }
}
