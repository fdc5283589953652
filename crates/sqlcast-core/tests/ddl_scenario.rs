//! End-to-end DDL for the customer/order schema on every vendor.

mod common;

use common::{ddl, ddl_err, shop, sql};
use sqlcast_core::ddl::{render_script, DdlAssembler, DdlOptions, TableScript};
use sqlcast_core::dialect::{ActionPolicy, Vendor};
use sqlcast_core::schema::{integer, ForeignKey, ForeignKeyAction, Schema, TableBuilder};
use sqlcast_core::Error;

#[test]
fn test_customer_created_before_orders_everywhere() {
    let schema = shop();
    for vendor in Vendor::ALL {
        let ddl = ddl(&schema, vendor);
        let tables: Vec<&str> = ddl.scripts().iter().map(TableScript::table).collect();
        assert_eq!(tables, ["customer", "orders"], "{vendor}");

        let create = ddl.create();
        let customer = create
            .iter()
            .position(|s| s.sql().starts_with("CREATE TABLE") && s.sql().contains("customer"))
            .unwrap();
        let orders = create
            .iter()
            .position(|s| s.sql().starts_with("CREATE TABLE") && s.sql().contains("orders"))
            .unwrap();
        assert!(customer < orders, "{vendor}");
    }
}

#[test]
fn test_drop_reverses_create() {
    let schema = shop();
    for vendor in Vendor::ALL {
        let ddl = ddl(&schema, vendor);
        let drop = ddl.drop();
        let orders_table = drop
            .iter()
            .position(|s| s.sql().contains("DROP TABLE") && s.sql().contains("orders"))
            .unwrap_or_else(|| panic!("{vendor}: no orders drop in {:?}", sql(&drop)));
        let customer_table = drop
            .iter()
            .position(|s| s.sql().contains("DROP TABLE") && s.sql().contains("customer"))
            .unwrap();
        assert!(orders_table < customer_table, "{vendor}");
    }
}

#[test]
fn test_generation_is_deterministic() {
    let schema = shop();
    for vendor in Vendor::ALL {
        assert_eq!(ddl(&schema, vendor), ddl(&schema, vendor), "{vendor}");
    }
}

#[test]
fn test_native_drops_are_guarded() {
    let schema = shop();
    for vendor in [Vendor::Postgres, Vendor::Sqlite, Vendor::SqlServer] {
        for stmt in ddl(&schema, vendor).drop() {
            assert!(stmt.sql().contains("IF EXISTS"), "{vendor}: {stmt}");
        }
    }
}

#[test]
fn test_catalog_guarded_drops() {
    let schema = shop();
    let oracle = ddl(&schema, Vendor::Oracle).drop();
    assert!(oracle.iter().all(|s| s.sql().contains("user_") || s.sql().contains("USER_")));

    let db2 = ddl(&schema, Vendor::Db2).drop();
    assert!(db2.iter().all(|s| s.sql().to_uppercase().contains("SYSCAT")));
}

#[test]
fn test_status_enum_per_vendor() {
    let schema = shop();

    let postgres = ddl(&schema, Vendor::Postgres);
    let orders = postgres.script("orders").unwrap();
    assert_eq!(
        sql(orders.types()),
        ["CREATE TYPE \"ty_orders_status\" AS ENUM ('new', 'paid', 'shipped')"]
    );

    let mysql = ddl(&schema, Vendor::MySql);
    let create = mysql.script("orders").unwrap().create_table().sql().to_string();
    assert!(create.contains("`status` ENUM('new', 'paid', 'shipped') DEFAULT 'new'"));

    let sqlite = ddl(&schema, Vendor::Sqlite);
    let create = sqlite.script("orders").unwrap().create_table().sql().to_string();
    assert!(create.contains("\"status\" VARCHAR(7) DEFAULT 'new'"));
    assert!(create.contains(
        "CONSTRAINT \"ck_orders_status_enum\" CHECK (\"status\" IN ('new', 'paid', 'shipped'))"
    ));
}

#[test]
fn test_sqlite_script_renders_with_terminators() {
    let schema = shop();
    let dialect = Vendor::Sqlite.dialect();
    let script = render_script(dialect, &ddl(&schema, Vendor::Sqlite).create());
    assert!(script.starts_with("CREATE TABLE \"customer\" (\n"));
    assert!(script.contains("\"id\" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT"));
    assert!(script.ends_with(";\n"));
}

#[test]
fn test_errors_leave_no_partial_output() {
    let schema = shop().table(
        TableBuilder::new()
            .name("audit")
            .column(integer("id", 9).not_null().build())
            .column(integer("order_id", 9).build())
            .foreign_key(
                ForeignKey::new(&["order_id"], "orders", &["id"])
                    .on_update(ForeignKeyAction::Cascade),
            )
            .build(),
    );
    // Oracle has no ON UPDATE actions; rejecting fails the whole schema.
    let err = DdlAssembler::new(Vendor::Oracle.dialect())
        .with_options(DdlOptions::new().with_action_policy(ActionPolicy::Reject))
        .schema(&schema)
        .unwrap_err();
    assert!(matches!(err, Error::Unsupported { vendor: Vendor::Oracle, .. }));

    let warned = DdlAssembler::new(Vendor::Oracle.dialect())
        .schema(&schema)
        .unwrap();
    let create = warned.script("audit").unwrap().create_table().sql().to_string();
    assert!(create.contains("FOREIGN KEY"));
    assert!(!create.contains("ON UPDATE"));
}

#[test]
fn test_unknown_reference_is_configuration_error() {
    let schema = Schema::new("s").table(
        TableBuilder::new()
            .name("orders")
            .column(integer("customer_id", 9).references("customer", "id").build())
            .build(),
    );
    let err = ddl_err(&schema, Vendor::Postgres);
    assert!(err.is_configuration());
    assert_eq!(
        err,
        Error::UnknownTable {
            table: String::from("orders"),
            referenced: String::from("customer"),
        }
    );
}
