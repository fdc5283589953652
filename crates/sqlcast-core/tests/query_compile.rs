//! Query compilation across vendors.

mod common;

use chrono::NaiveDate;
use common::inline;
use sqlcast_core::dialect::Vendor;
use sqlcast_core::query::{
    concat, count_all, CompileMode, CompileSql, Condition, Delete, Expr, Insert, IntoExpr, Order,
    Select, SqlValue, TableRef, Update,
};

fn customer_orders() -> (TableRef, TableRef, Select) {
    let customer = TableRef::new("customer");
    let orders = TableRef::new("orders");
    let select = Select::new()
        .column(customer.col("name"))
        .column_as(count_all(), "n")
        .from(&customer)
        .inner_join(&orders, orders.col("customer_id").eq(customer.col("id")))
        .where_clause(
            orders
                .col("status")
                .in_list(["paid", "shipped"])
                .and(orders.col("total").ge(10.5))
                .and(customer.col("name").like("O'%")),
        )
        .group_by(customer.col("name"))
        .having(count_all().gt(1))
        .order_by(customer.col("name"), Order::Asc)
        .limit(5);
    (customer, orders, select)
}

#[test]
fn test_prepared_and_literal_agree_for_every_vendor() {
    let (_, _, select) = customer_orders();
    for vendor in Vendor::ALL {
        let dialect = vendor.dialect();
        let prepared = select.compile(dialect, CompileMode::Prepared);
        let literal = select.compile(dialect, CompileMode::Literal);
        assert_eq!(prepared.params().len(), 5, "{vendor}");
        assert!(literal.params().is_empty());
        assert_eq!(inline(dialect, &prepared), literal.sql(), "{vendor}");
    }
}

#[test]
fn test_dml_prepared_and_literal_agree() {
    let orders = TableRef::new("orders");
    let placed = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let statements: Vec<Box<dyn CompileSql>> = vec![
        Box::new(
            Insert::into(&orders)
                .columns(&["customer_id", "total", "placed_on", "note"])
                .values([
                    1_i64.into_expr(),
                    12.5_f64.into_expr(),
                    placed.into_expr(),
                    Expr::Value(SqlValue::Null),
                ])
                .values([
                    2_i64.into_expr(),
                    3_i64.into_expr(),
                    placed.into_expr(),
                    "rush".into_expr(),
                ]),
        ),
        Box::new(
            Update::new()
                .table(&orders)
                .set(orders.col("status"), "paid")
                .set(orders.col("total"), orders.col("total") * 2_i64)
                .where_clause(orders.col("id").eq(7)),
        ),
        Box::new(Delete::new().from(&orders).where_clause(orders.col("total").lt(0))),
    ];
    for vendor in Vendor::ALL {
        let dialect = vendor.dialect();
        for stmt in &statements {
            let prepared = stmt.compile(dialect, CompileMode::Prepared);
            let literal = stmt.compile(dialect, CompileMode::Literal);
            assert_eq!(inline(dialect, &prepared), literal.sql(), "{vendor}");
        }
    }
}

#[test]
fn test_alias_stability() {
    let (customer, orders, select) = customer_orders();
    let dialect = Vendor::Postgres.dialect();
    let first = select.compile(dialect, CompileMode::Literal);
    let second = select.compile(dialect, CompileMode::Literal);
    assert_eq!(first.sql(), second.sql());
    assert!(first.sql().starts_with("SELECT t0.\"name\", COUNT(*) AS \"n\" FROM \"customer\" t0"));
    assert!(first.sql().contains("INNER JOIN \"orders\" t1 ON t1.\"customer_id\" = t0.\"id\""));

    // A clone of a subject is the same subject.
    let again = Select::new()
        .column(customer.clone().col("id"))
        .from(&customer)
        .where_clause(Condition::exists(
            Select::new()
                .from(&orders)
                .where_clause(orders.col("customer_id").eq(customer.col("id"))),
        ));
    assert_eq!(
        again.compile(dialect, CompileMode::Literal).sql(),
        "SELECT t0.\"id\" FROM \"customer\" t0 WHERE EXISTS \
         (SELECT * FROM \"orders\" t1 WHERE t1.\"customer_id\" = t0.\"id\")"
    );
}

#[test]
fn test_literal_escaping_per_vendor() {
    let t = TableRef::new("t");
    let select = Select::new()
        .from(&t)
        .where_clause(t.col("s").eq("a\\b'c").and(t.col("flag").eq(true)));
    let render = |vendor: Vendor| {
        select
            .compile(vendor.dialect(), CompileMode::Literal)
            .sql()
            .to_string()
    };
    assert_eq!(
        render(Vendor::MySql),
        "SELECT * FROM `t` t0 WHERE (t0.`s` = 'a\\\\b''c') AND (t0.`flag` = TRUE)"
    );
    assert_eq!(
        render(Vendor::Postgres),
        "SELECT * FROM \"t\" t0 WHERE (t0.\"s\" = 'a\\b''c') AND (t0.\"flag\" = TRUE)"
    );
    assert_eq!(
        render(Vendor::SqlServer),
        "SELECT * FROM [t] t0 WHERE (t0.[s] = 'a\\b''c') AND (t0.[flag] = 1)"
    );
}

#[test]
fn test_concat_in_projection() {
    let c = TableRef::new("customer");
    let select = Select::new()
        .column_as(
            concat([c.col("name").into_expr(), " <".into_expr(), c.col("email").into_expr()]),
            "label",
        )
        .from(&c);
    assert_eq!(
        select.compile(Vendor::MySql.dialect(), CompileMode::Literal).sql(),
        "SELECT CONCAT(t0.`name`, ' <', t0.`email`) AS `label` FROM `customer` t0"
    );
    assert_eq!(
        select.compile(Vendor::Oracle.dialect(), CompileMode::Literal).sql(),
        "SELECT t0.\"name\" || ' <' || t0.\"email\" AS \"label\" FROM \"customer\" t0"
    );
}
