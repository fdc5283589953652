//! PostgreSQL dialect.

use super::{
    hex, native_drop, Dialect, DropTarget, EnumStrategy, IdentityStrategy, UpdateTrigger, Vendor,
};
use crate::error::Result;
use crate::schema::UpdateGenerator;

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn vendor(&self) -> Vendor {
        Vendor::Postgres
    }

    fn max_decimal_precision(&self) -> Option<u32> {
        Some(1000)
    }

    fn max_decimal_scale(&self) -> Option<u32> {
        Some(1000)
    }

    fn max_integer_precision(&self, _unsigned: bool) -> Option<u32> {
        Some(18)
    }

    fn max_char_length(&self) -> Option<u32> {
        Some(10_485_760)
    }

    fn max_varchar_length(&self) -> Option<u32> {
        Some(10_485_760)
    }

    fn max_binary_length(&self) -> Option<u32> {
        None
    }

    fn max_varbinary_length(&self) -> Option<u32> {
        None
    }

    fn declare_binary(&self, _length: u32) -> String {
        String::from("BYTEA")
    }

    fn declare_varbinary(&self, _length: u32) -> String {
        String::from("BYTEA")
    }

    fn declare_clob(&self) -> String {
        String::from("TEXT")
    }

    fn declare_blob(&self) -> String {
        String::from("BYTEA")
    }

    fn declare_interval(&self) -> Option<String> {
        Some(String::from("INTERVAL"))
    }

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::NamedType
    }

    fn identity(&self) -> IdentityStrategy {
        IdentityStrategy::Column("GENERATED BY DEFAULT AS IDENTITY")
    }

    fn uuid_default(&self) -> Option<&'static str> {
        Some("CAST(gen_random_uuid() AS VARCHAR(36))")
    }

    fn update_trigger(&self, trigger: &UpdateTrigger<'_>) -> Result<Vec<String>> {
        let column = self.quote_identifier(trigger.column);
        let value = match trigger.generator {
            UpdateGenerator::Now => String::from(self.generated_now(trigger.type_spec)),
            UpdateGenerator::Increment => format!("OLD.{column} + 1"),
        };
        let function = self.quote_identifier(trigger.function);
        Ok(vec![
            format!(
                "CREATE OR REPLACE FUNCTION {function}() RETURNS TRIGGER AS $$\n\
                 BEGIN\n    NEW.{column} := {value};\n    RETURN NEW;\nEND;\n$$ LANGUAGE plpgsql"
            ),
            format!(
                "CREATE TRIGGER {} BEFORE UPDATE ON {} FOR EACH ROW EXECUTE FUNCTION {function}()",
                self.quote_identifier(trigger.trigger),
                self.quote_identifier(trigger.table),
            ),
        ])
    }

    fn uses_trigger_function(&self) -> bool {
        true
    }

    fn supports_create_if_not_exists(&self) -> bool {
        true
    }

    fn drop_statements(&self, target: DropTarget<'_>) -> Vec<String> {
        match target {
            DropTarget::Trigger { table, name } => vec![format!(
                "DROP TRIGGER IF EXISTS {} ON {}",
                self.quote_identifier(name),
                self.quote_identifier(table)
            )],
            other => native_drop(self, other),
        }
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("decode('{}', 'hex')", hex(bytes))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }
}
