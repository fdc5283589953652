#![allow(dead_code)]

use sqlcast_core::ddl::{DdlAssembler, SchemaDdl};
use sqlcast_core::dialect::{Dialect, Vendor};
use sqlcast_core::query::CompareOp;
use sqlcast_core::schema::{
    datetime, decimal, enumeration, integer, varchar, CheckExpr, Column, ForeignKeyAction,
    InsertGenerator, Schema, Table, TableBuilder, TypeSpec,
};
use sqlcast_core::{Error, Statement};

/// The customer/order schema, declared referencing table first.
pub fn shop() -> Schema {
    let customer = TableBuilder::new()
        .name("customer")
        .column(integer("id", 9).not_null().auto_increment().build())
        .column(varchar("email", 120).not_null().unique_index().build())
        .column(varchar("name", 80).build())
        .column(datetime("created_at").on_insert(InsertGenerator::Now).build())
        .primary_key(&["id"])
        .build();
    let orders = TableBuilder::new()
        .name("orders")
        .column(integer("id", 9).not_null().auto_increment().build())
        .column(
            integer("customer_id", 9)
                .not_null()
                .references_on_delete("customer", "id", ForeignKeyAction::Cascade)
                .indexed()
                .build(),
        )
        .column(enumeration("status", "new paid shipped").default_str("new").build())
        .column(decimal("total", 10, 2).build())
        .primary_key(&["id"])
        .check(CheckExpr::compare("total", CompareOp::Ge, 0))
        .build();
    Schema::new("shop").table(orders).table(customer)
}

pub fn ddl(schema: &Schema, vendor: Vendor) -> SchemaDdl {
    DdlAssembler::new(vendor.dialect())
        .schema(schema)
        .unwrap_or_else(|e| panic!("DDL for {vendor} failed: {e}"))
}

pub fn ddl_err(schema: &Schema, vendor: Vendor) -> Error {
    DdlAssembler::new(vendor.dialect())
        .schema(schema)
        .expect_err(&format!("Expected {vendor} to reject the schema"))
}

pub fn sql(statements: &[Statement]) -> Vec<&str> {
    statements.iter().map(Statement::sql).collect()
}

/// A table with no references.
pub fn leaf(name: &str) -> Table {
    TableBuilder::new()
        .name(name)
        .column(integer("id", 9).not_null().build())
        .primary_key(&["id"])
        .build()
}

/// A table with one foreign key column per parent.
pub fn child(name: &str, parents: &[&str]) -> Table {
    let mut builder = TableBuilder::new()
        .name(name)
        .column(integer("id", 9).not_null().build())
        .primary_key(&["id"]);
    for parent in parents {
        builder = builder.column(
            integer(format!("{parent}_id"), 9)
                .references(*parent, "id")
                .build(),
        );
    }
    builder.build()
}

/// A single-column table for bounds checks.
pub fn single(spec: TypeSpec) -> Schema {
    Schema::new("bounds").table(
        TableBuilder::new()
            .name("t")
            .column(Column::new("c", spec))
            .build(),
    )
}

/// Replaces every placeholder of a prepared statement with its literal.
pub fn inline(dialect: &dyn Dialect, stmt: &Statement) -> String {
    let mut sql = stmt.sql().to_string();
    for (i, value) in stmt.params().iter().enumerate().rev() {
        let placeholder = dialect.placeholder(i + 1);
        let at = sql
            .rfind(&placeholder)
            .unwrap_or_else(|| panic!("placeholder {placeholder} missing in {sql}"));
        sql.replace_range(at..at + placeholder.len(), &dialect.render_literal(value));
    }
    sql
}
