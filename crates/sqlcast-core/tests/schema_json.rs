//! Schemas loaded from JSON, as the CLI reads them.

use sqlcast_core::ddl::{render_script, DdlAssembler};
use sqlcast_core::dialect::Vendor;
use sqlcast_core::schema::{InsertGenerator, Schema, TypeSpec, UpdateGenerator};

const SHOP: &str = include_str!("../../../demos/shop.json");

fn shop() -> Schema {
    serde_json::from_str(SHOP).expect("demo schema must parse")
}

#[test]
fn test_demo_schema_parses() {
    let schema = shop();
    assert_eq!(schema.name, "shop");
    assert_eq!(schema.tables.len(), 2);

    let orders = &schema.tables[0];
    let status = &orders.columns[2];
    assert_eq!(
        status.type_spec,
        TypeSpec::Enum {
            values: vec![
                String::from("new"),
                String::from("paid"),
                String::from("shipped"),
            ],
        }
    );
    assert_eq!(orders.columns[0].on_insert, Some(InsertGenerator::AutoIncrement));
    assert_eq!(orders.columns[4].on_update, Some(UpdateGenerator::Increment));
    assert!(orders.columns[2].nullable);
}

#[test]
fn test_demo_schema_compiles_for_every_vendor() {
    let schema = shop();
    for vendor in Vendor::ALL {
        let dialect = vendor.dialect();
        let ddl = DdlAssembler::new(dialect)
            .schema(&schema)
            .unwrap_or_else(|e| panic!("{vendor}: {e}"));
        let script = render_script(dialect, &ddl.create());
        let first = script.find("CREATE TABLE").unwrap();
        let header: String = script[first..].chars().take(40).collect();
        assert!(header.contains("customer"), "{vendor}: {header}");
        assert!(script.contains("ck_orders_total_range"), "{vendor}");
        assert!(script.contains("ck_orders_1"), "{vendor}");
    }
}

#[test]
fn test_model_round_trips_through_json() {
    let schema = shop();
    let json = serde_json::to_string(&schema).unwrap();
    let back: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(schema, back);
}
