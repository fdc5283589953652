//! Create and drop ordering across foreign keys and inheritance.

mod common;

use common::{child, ddl, ddl_err, leaf};
use sqlcast_core::ddl::TableScript;
use sqlcast_core::dialect::Vendor;
use sqlcast_core::resolver::resolve;
use sqlcast_core::schema::{integer, varchar, Schema, TableBuilder};
use sqlcast_core::Error;

fn order(schema: &Schema) -> Vec<String> {
    ddl(schema, Vendor::Postgres)
        .scripts()
        .iter()
        .map(|s: &TableScript| s.table().to_string())
        .collect()
}

fn position(order: &[String], table: &str) -> usize {
    order
        .iter()
        .position(|t| t == table)
        .unwrap_or_else(|| panic!("{table} missing from {order:?}"))
}

#[test]
fn test_chain_declared_backwards() {
    let schema = Schema::new("s")
        .table(child("c", &["b"]))
        .table(child("b", &["a"]))
        .table(leaf("a"));
    assert_eq!(order(&schema), ["a", "b", "c"]);
}

#[test]
fn test_diamond_respects_every_edge() {
    let schema = Schema::new("s")
        .table(child("d", &["b", "c"]))
        .table(child("b", &["a"]))
        .table(child("c", &["a"]))
        .table(leaf("a"));
    let order = order(&schema);
    assert_eq!(order.len(), 4);
    for (parent, kid) in [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")] {
        assert!(position(&order, parent) < position(&order, kid), "{parent} before {kid}");
    }
}

#[test]
fn test_independent_tables_keep_input_order() {
    let schema = Schema::new("s")
        .table(leaf("zeta"))
        .table(leaf("alpha"))
        .table(leaf("mid"));
    assert_eq!(order(&schema), ["zeta", "alpha", "mid"]);
}

#[test]
fn test_drop_order_is_reverse_create_order() {
    let schema = Schema::new("s")
        .table(child("c", &["b"]))
        .table(child("b", &["a"]))
        .table(leaf("a"));
    let resolution = resolve(&schema).unwrap();
    let mut reversed = resolution.create_order();
    reversed.reverse();
    assert_eq!(resolution.drop_order(), reversed);
}

#[test]
fn test_cycle_detected_for_every_vendor() {
    let schema = Schema::new("s")
        .table(child("a", &["b"]))
        .table(child("b", &["a"]));
    for vendor in Vendor::ALL {
        match ddl_err(&schema, vendor) {
            Error::CircularDependency { table, cycle } => {
                assert_eq!(table, "a");
                assert_eq!(cycle, ["a", "b", "a"]);
            }
            other => panic!("{vendor}: expected a cycle, got {other:?}"),
        }
    }
}

#[test]
fn test_self_reference_is_not_a_cycle() {
    let schema = Schema::new("s").table(
        TableBuilder::new()
            .name("node")
            .column(integer("id", 9).not_null().build())
            .column(integer("parent_id", 9).references("node", "id").build())
            .primary_key(&["id"])
            .build(),
    );
    assert_eq!(order(&schema), ["node"]);
}

#[test]
fn test_inherited_columns_are_materialized() {
    let schema = Schema::new("s")
        .table(
            TableBuilder::new()
                .name("employee")
                .extends("person")
                .column(varchar("badge", 12).build())
                .build(),
        )
        .table(
            TableBuilder::new()
                .name("person")
                .abstract_table()
                .column(integer("id", 9).not_null().build())
                .column(varchar("name", 80).build())
                .primary_key(&["id"])
                .build(),
        );
    let ddl = ddl(&schema, Vendor::Postgres);
    let tables: Vec<&str> = ddl.scripts().iter().map(TableScript::table).collect();
    assert_eq!(tables, ["employee"]);

    let create = ddl.scripts()[0].create_table().sql();
    let id = create.find("\"id\"").unwrap();
    let name = create.find("\"name\"").unwrap();
    let badge = create.find("\"badge\"").unwrap();
    assert!(id < name && name < badge);
    assert!(create.contains("CONSTRAINT \"pk_employee\" PRIMARY KEY (\"id\")"));
}
