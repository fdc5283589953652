//! Oracle dialect.
//!
//! Oracle has no IF EXISTS on DROP, so every drop is wrapped in a PL/SQL
//! block that consults the `USER_*` catalog views first. Auto-increment is
//! realized with a sequence and a BEFORE INSERT trigger.

use chrono::NaiveTime;

use super::{
    fetch_clause, hex, ActionSupport, Dialect, DropTarget, IdentityStrategy, UpdateTrigger, Vendor,
    TIME_FORMAT,
};
use crate::error::Result;
use crate::schema::{ForeignKeyAction, UpdateGenerator};

/// Oracle dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn guarded_drop(&self, view: &str, column: &str, name: &str, drop: &str) -> String {
        format!(
            "BEGIN\n    FOR r IN (SELECT 1 FROM {view} WHERE {column} = {}) LOOP\n        \
             EXECUTE IMMEDIATE {};\n    END LOOP;\nEND;",
            self.string_literal(name),
            self.string_literal(drop),
        )
    }
}

impl Dialect for OracleDialect {
    fn vendor(&self) -> Vendor {
        Vendor::Oracle
    }

    fn max_decimal_precision(&self) -> Option<u32> {
        Some(38)
    }

    fn max_decimal_scale(&self) -> Option<u32> {
        Some(38)
    }

    fn max_integer_precision(&self, _unsigned: bool) -> Option<u32> {
        Some(38)
    }

    fn max_char_length(&self) -> Option<u32> {
        Some(2000)
    }

    fn max_varchar_length(&self) -> Option<u32> {
        Some(4000)
    }

    fn max_binary_length(&self) -> Option<u32> {
        Some(2000)
    }

    fn max_varbinary_length(&self) -> Option<u32> {
        Some(2000)
    }

    fn declare_boolean(&self) -> String {
        String::from("NUMBER(1)")
    }

    fn boolean_needs_check(&self) -> bool {
        true
    }

    fn declare_integer(&self, precision: Option<u32>, _unsigned: bool) -> String {
        match precision {
            Some(p) => format!("NUMBER({p})"),
            None => String::from("INTEGER"),
        }
    }

    fn declare_decimal(
        &self,
        precision: Option<u32>,
        scale: Option<u32>,
        _unsigned: bool,
    ) -> String {
        match (precision, scale) {
            (Some(p), Some(s)) => format!("NUMBER({p}, {s})"),
            (Some(p), None) => format!("NUMBER({p})"),
            _ => String::from("NUMBER"),
        }
    }

    fn declare_float(&self, double: bool) -> String {
        String::from(if double { "BINARY_DOUBLE" } else { "BINARY_FLOAT" })
    }

    fn declare_varchar(&self, length: u32) -> String {
        format!("VARCHAR2({length})")
    }

    fn declare_binary(&self, length: u32) -> String {
        format!("RAW({length})")
    }

    fn declare_varbinary(&self, length: u32) -> String {
        format!("RAW({length})")
    }

    fn declare_time(&self) -> Option<String> {
        None
    }

    fn declare_interval(&self) -> Option<String> {
        Some(String::from("INTERVAL DAY TO SECOND"))
    }

    fn identity(&self) -> IdentityStrategy {
        IdentityStrategy::SequenceTrigger
    }

    fn uuid_default(&self) -> Option<&'static str> {
        Some("RAWTOHEX(SYS_GUID())")
    }

    fn current_date(&self) -> &'static str {
        "TRUNC(SYSDATE)"
    }

    fn create_sequence(&self, name: &str) -> String {
        format!(
            "CREATE SEQUENCE {} START WITH 1 INCREMENT BY 1 NOCACHE",
            self.quote_identifier(name)
        )
    }

    fn identity_trigger(
        &self,
        table: &str,
        column: &str,
        sequence: &str,
        trigger: &str,
    ) -> Result<Vec<String>> {
        let column = self.quote_identifier(column);
        Ok(vec![format!(
            "CREATE OR REPLACE TRIGGER {} BEFORE INSERT ON {} FOR EACH ROW \
             WHEN (NEW.{column} IS NULL)\nBEGIN\n    :NEW.{column} := {}.NEXTVAL;\nEND;",
            self.quote_identifier(trigger),
            self.quote_identifier(table),
            self.quote_identifier(sequence),
        )])
    }

    fn update_trigger(&self, trigger: &UpdateTrigger<'_>) -> Result<Vec<String>> {
        let column = self.quote_identifier(trigger.column);
        let value = match trigger.generator {
            UpdateGenerator::Now => String::from(self.generated_now(trigger.type_spec)),
            UpdateGenerator::Increment => format!(":OLD.{column} + 1"),
        };
        Ok(vec![format!(
            "CREATE OR REPLACE TRIGGER {} BEFORE UPDATE ON {} FOR EACH ROW\n\
             BEGIN\n    :NEW.{column} := {value};\nEND;",
            self.quote_identifier(trigger.trigger),
            self.quote_identifier(trigger.table),
        )])
    }

    fn action_support(&self, action: ForeignKeyAction, on_update: bool) -> ActionSupport {
        match (action, on_update) {
            (ForeignKeyAction::NoAction, _) => ActionSupport::Implicit,
            (ForeignKeyAction::Cascade | ForeignKeyAction::SetNull, false) => ActionSupport::Native,
            _ => ActionSupport::Unsupported,
        }
    }

    fn drop_statements(&self, target: DropTarget<'_>) -> Vec<String> {
        let (view, column, name, kind) = match target {
            DropTarget::Table(name) => ("user_tables", "table_name", name, "TABLE"),
            DropTarget::Index { name, .. } => ("user_indexes", "index_name", name, "INDEX"),
            DropTarget::Trigger { name, .. } => ("user_triggers", "trigger_name", name, "TRIGGER"),
            DropTarget::Sequence(name) => ("user_sequences", "sequence_name", name, "SEQUENCE"),
            DropTarget::Type(name) => ("user_types", "type_name", name, "TYPE"),
            DropTarget::Function(name) => {
                ("user_procedures", "object_name", name, "FUNCTION")
            }
        };
        let drop = format!("DROP {kind} {}", self.quote_identifier(name));
        vec![self.guarded_drop(view, column, name, &drop)]
    }

    fn script_terminator(&self, sql: &str) -> &'static str {
        if sql.ends_with("END;") {
            "\n/"
        } else {
            ";"
        }
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("HEXTORAW('{}')", hex(bytes))
    }

    fn time_literal(&self, time: NaiveTime) -> String {
        self.string_literal(&time.format(TIME_FORMAT).to_string())
    }

    fn placeholder(&self, index: usize) -> String {
        format!(":{index}")
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> String {
        fetch_clause(limit, offset)
    }

    fn supports_multi_row_insert(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_oracle_types() {
        let d = OracleDialect::new();
        assert_eq!(d.compile_integer("t.c", Some(38), false).unwrap(), "NUMBER(38)");
        assert_eq!(d.compile_decimal("t.c", Some(10), Some(2), false).unwrap(), "NUMBER(10, 2)");
        assert_eq!(d.compile_varchar("t.c", 4000).unwrap(), "VARCHAR2(4000)");
        assert!(matches!(
            d.compile_varchar("t.c", 4001),
            Err(Error::Bounds { max: 4000, value: 4001, .. })
        ));
    }

    #[test]
    fn test_oracle_identity_trigger() {
        let statements = OracleDialect::new()
            .identity_trigger("customer", "id", "seq_customer_id", "trg_customer_id_ins")
            .unwrap();
        assert_eq!(
            statements[0],
            "CREATE OR REPLACE TRIGGER \"trg_customer_id_ins\" BEFORE INSERT ON \"customer\" \
             FOR EACH ROW WHEN (NEW.\"id\" IS NULL)\nBEGIN\n    \
             :NEW.\"id\" := \"seq_customer_id\".NEXTVAL;\nEND;"
        );
    }

    #[test]
    fn test_oracle_catalog_guarded_drop() {
        let statements = OracleDialect::new().drop_statements(DropTarget::Table("orders"));
        assert_eq!(
            statements[0],
            "BEGIN\n    FOR r IN (SELECT 1 FROM user_tables WHERE table_name = 'orders') LOOP\n        \
             EXECUTE IMMEDIATE 'DROP TABLE \"orders\"';\n    END LOOP;\nEND;"
        );
    }

    #[test]
    fn test_oracle_actions() {
        let d = OracleDialect::new();
        assert_eq!(d.action_support(ForeignKeyAction::Cascade, false), ActionSupport::Native);
        assert_eq!(d.action_support(ForeignKeyAction::Cascade, true), ActionSupport::Unsupported);
        assert_eq!(d.action_support(ForeignKeyAction::NoAction, true), ActionSupport::Implicit);
    }

    #[test]
    fn test_oracle_placeholder_and_literals() {
        let d = OracleDialect::new();
        assert_eq!(d.placeholder(3), ":3");
        assert_eq!(d.boolean_literal(true), "1");
        assert_eq!(d.binary_literal(&[0x01]), "HEXTORAW('01')");
    }
}
