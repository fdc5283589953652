//! IBM Db2 dialect.

use super::{
    fetch_clause, hex, ActionPolicy, ActionSupport, Dialect, DropTarget, IdentityStrategy,
    UpdateTrigger, Vendor,
};
use crate::error::Result;
use crate::schema::{ForeignKeyAction, UpdateGenerator};

/// Db2 dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Db2Dialect;

impl Db2Dialect {
    /// Creates a new Db2 dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for Db2Dialect {
    fn vendor(&self) -> Vendor {
        Vendor::Db2
    }

    fn max_decimal_precision(&self) -> Option<u32> {
        Some(31)
    }

    fn max_decimal_scale(&self) -> Option<u32> {
        Some(31)
    }

    fn max_integer_precision(&self, _unsigned: bool) -> Option<u32> {
        Some(18)
    }

    fn max_char_length(&self) -> Option<u32> {
        Some(254)
    }

    fn max_varchar_length(&self) -> Option<u32> {
        Some(32_672)
    }

    fn max_binary_length(&self) -> Option<u32> {
        Some(254)
    }

    fn max_varbinary_length(&self) -> Option<u32> {
        Some(32_672)
    }

    fn declare_float(&self, double: bool) -> String {
        String::from(if double { "DOUBLE" } else { "REAL" })
    }

    fn identity(&self) -> IdentityStrategy {
        IdentityStrategy::Column("GENERATED BY DEFAULT AS IDENTITY")
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT TIMESTAMP"
    }

    fn current_date(&self) -> &'static str {
        "CURRENT DATE"
    }

    fn update_trigger(&self, trigger: &UpdateTrigger<'_>) -> Result<Vec<String>> {
        let column = self.quote_identifier(trigger.column);
        let value = match trigger.generator {
            UpdateGenerator::Now => String::from(self.generated_now(trigger.type_spec)),
            UpdateGenerator::Increment => format!("O.{column} + 1"),
        };
        Ok(vec![format!(
            "CREATE TRIGGER {} NO CASCADE BEFORE UPDATE ON {} \
             REFERENCING NEW AS N OLD AS O FOR EACH ROW SET N.{column} = {value}",
            self.quote_identifier(trigger.trigger),
            self.quote_identifier(trigger.table),
        )])
    }

    fn action_support(&self, action: ForeignKeyAction, on_update: bool) -> ActionSupport {
        match (action, on_update) {
            (ForeignKeyAction::NoAction | ForeignKeyAction::Restrict, _) => ActionSupport::Native,
            (ForeignKeyAction::Cascade | ForeignKeyAction::SetNull, false) => ActionSupport::Native,
            _ => ActionSupport::Unsupported,
        }
    }

    fn action_policy(&self) -> ActionPolicy {
        ActionPolicy::Reject
    }

    fn drop_statements(&self, target: DropTarget<'_>) -> Vec<String> {
        let (view, schema_col, name_col, name, kind) = match target {
            DropTarget::Table(name) => ("SYSCAT.TABLES", "TABSCHEMA", "TABNAME", name, "TABLE"),
            DropTarget::Index { name, .. } => {
                ("SYSCAT.INDEXES", "INDSCHEMA", "INDNAME", name, "INDEX")
            }
            DropTarget::Trigger { name, .. } => {
                ("SYSCAT.TRIGGERS", "TRIGSCHEMA", "TRIGNAME", name, "TRIGGER")
            }
            DropTarget::Sequence(name) => {
                ("SYSCAT.SEQUENCES", "SEQSCHEMA", "SEQNAME", name, "SEQUENCE")
            }
            DropTarget::Type(name) => {
                ("SYSCAT.DATATYPES", "TYPESCHEMA", "TYPENAME", name, "TYPE")
            }
            DropTarget::Function(name) => {
                ("SYSCAT.ROUTINES", "ROUTINESCHEMA", "ROUTINENAME", name, "FUNCTION")
            }
        };
        let drop = format!("DROP {kind} {}", self.quote_identifier(name));
        vec![format!(
            "BEGIN\n    IF EXISTS (SELECT 1 FROM {view} WHERE {schema_col} = CURRENT SCHEMA \
             AND {name_col} = {}) THEN\n        EXECUTE IMMEDIATE {};\n    END IF;\nEND",
            self.string_literal(name),
            self.string_literal(&drop),
        )]
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("BX'{}'", hex(bytes))
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> String {
        fetch_clause(limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_db2_bounds() {
        let d = Db2Dialect::new();
        assert_eq!(d.compile_decimal("t.c", Some(31), Some(31), false).unwrap(), "DECIMAL(31, 31)");
        assert!(matches!(
            d.compile_decimal("t.c", Some(32), Some(0), false),
            Err(Error::Bounds { what: "decimal precision", max: 31, .. })
        ));
        assert!(matches!(
            d.compile_char("t.c", 255),
            Err(Error::Bounds { what: "char length", max: 254, .. })
        ));
    }

    #[test]
    fn test_db2_rejects_unsupported_actions_by_default() {
        let d = Db2Dialect::new();
        assert_eq!(d.action_policy(), ActionPolicy::Reject);
        assert_eq!(d.action_support(ForeignKeyAction::Cascade, true), ActionSupport::Unsupported);
        assert_eq!(d.action_support(ForeignKeyAction::Cascade, false), ActionSupport::Native);
    }

    #[test]
    fn test_db2_catalog_guarded_drop() {
        let sql = Db2Dialect::new().drop_statements(DropTarget::Index {
            table: "orders",
            name: "idx_orders_status",
        });
        assert!(sql[0].contains("SYSCAT.INDEXES WHERE INDSCHEMA = CURRENT SCHEMA"));
        assert!(sql[0].contains("EXECUTE IMMEDIATE 'DROP INDEX \"idx_orders_status\"'"));
    }

    #[test]
    fn test_db2_has_no_uuid_default() {
        assert_eq!(Db2Dialect::new().uuid_default(), None);
    }
}
