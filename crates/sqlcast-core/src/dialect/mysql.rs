//! MySQL dialect.

use super::{
    native_drop, ActionSupport, ConcatStyle, Dialect, DropTarget, EnumStrategy, IdentityStrategy,
    UpdateTrigger, Vendor,
};
use crate::error::Result;
use crate::schema::{ForeignKeyAction, TypeSpec, UpdateGenerator};

/// MySQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn vendor(&self) -> Vendor {
        Vendor::MySql
    }

    fn identifier_quotes(&self) -> (char, char) {
        ('`', '`')
    }

    fn max_decimal_precision(&self) -> Option<u32> {
        Some(65)
    }

    fn max_decimal_scale(&self) -> Option<u32> {
        Some(30)
    }

    fn max_integer_precision(&self, unsigned: bool) -> Option<u32> {
        Some(if unsigned { 19 } else { 18 })
    }

    fn max_char_length(&self) -> Option<u32> {
        Some(255)
    }

    fn max_varchar_length(&self) -> Option<u32> {
        Some(65_535)
    }

    fn max_binary_length(&self) -> Option<u32> {
        Some(255)
    }

    fn max_varbinary_length(&self) -> Option<u32> {
        Some(65_535)
    }

    fn allows_unsigned_numeric(&self) -> bool {
        true
    }

    fn declare_integer(&self, precision: Option<u32>, unsigned: bool) -> String {
        // Digit thresholds differ because unsigned ranges hold one more digit
        // for MEDIUMINT and BIGINT.
        let (tiny, small, medium, int) = if unsigned { (2, 4, 7, 9) } else { (2, 4, 6, 9) };
        let base = match precision {
            Some(p) if p <= tiny => "TINYINT",
            Some(p) if p <= small => "SMALLINT",
            Some(p) if p <= medium => "MEDIUMINT",
            Some(p) if p <= int => "INT",
            Some(_) => "BIGINT",
            None => "INT",
        };
        if unsigned {
            format!("{base} UNSIGNED")
        } else {
            String::from(base)
        }
    }

    fn declare_decimal(
        &self,
        precision: Option<u32>,
        scale: Option<u32>,
        unsigned: bool,
    ) -> String {
        let base = match (precision, scale) {
            (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
            (Some(p), None) => format!("DECIMAL({p})"),
            _ => String::from("DECIMAL"),
        };
        if unsigned {
            format!("{base} UNSIGNED")
        } else {
            base
        }
    }

    fn declare_float(&self, double: bool) -> String {
        String::from(if double { "DOUBLE" } else { "FLOAT" })
    }

    fn declare_clob(&self) -> String {
        String::from("LONGTEXT")
    }

    fn declare_blob(&self) -> String {
        String::from("LONGBLOB")
    }

    fn declare_datetime(&self) -> String {
        String::from("DATETIME")
    }

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::Inline
    }

    fn identity(&self) -> IdentityStrategy {
        IdentityStrategy::Column("AUTO_INCREMENT")
    }

    fn uuid_default(&self) -> Option<&'static str> {
        Some("(UUID())")
    }

    fn current_date(&self) -> &'static str {
        "(CURRENT_DATE)"
    }

    fn length_function(&self) -> &'static str {
        "CHAR_LENGTH"
    }

    fn on_update_fragment(&self, generator: UpdateGenerator, spec: &TypeSpec) -> Option<String> {
        match (generator, spec) {
            (UpdateGenerator::Now, TypeSpec::DateTime) => {
                Some(String::from("ON UPDATE CURRENT_TIMESTAMP"))
            }
            _ => None,
        }
    }

    fn update_trigger(&self, trigger: &UpdateTrigger<'_>) -> Result<Vec<String>> {
        let column = self.quote_identifier(trigger.column);
        let value = match trigger.generator {
            UpdateGenerator::Now => String::from(self.generated_now(trigger.type_spec)),
            UpdateGenerator::Increment => format!("OLD.{column} + 1"),
        };
        Ok(vec![format!(
            "CREATE TRIGGER {} BEFORE UPDATE ON {} FOR EACH ROW SET NEW.{column} = {value}",
            self.quote_identifier(trigger.trigger),
            self.quote_identifier(trigger.table),
        )])
    }

    fn supports_create_if_not_exists(&self) -> bool {
        true
    }

    fn action_support(&self, action: ForeignKeyAction, _on_update: bool) -> ActionSupport {
        match action {
            ForeignKeyAction::SetDefault => ActionSupport::Unsupported,
            _ => ActionSupport::Native,
        }
    }

    fn drop_statements(&self, target: DropTarget<'_>) -> Vec<String> {
        match target {
            // DROP INDEX has no IF EXISTS form; probe the catalog instead.
            DropTarget::Index { table, name } => {
                let drop = format!(
                    "DROP INDEX {} ON {}",
                    self.quote_identifier(name),
                    self.quote_identifier(table)
                );
                vec![
                    format!(
                        "SET @sqlcast_ddl = (SELECT IF(COUNT(*) > 0, {}, 'DO 0') \
                         FROM information_schema.statistics \
                         WHERE table_schema = DATABASE() AND table_name = {} AND index_name = {})",
                        self.string_literal(&drop),
                        self.string_literal(table),
                        self.string_literal(name),
                    ),
                    String::from("PREPARE sqlcast_stmt FROM @sqlcast_ddl"),
                    String::from("EXECUTE sqlcast_stmt"),
                    String::from("DEALLOCATE PREPARE sqlcast_stmt"),
                ]
            }
            other => native_drop(self, other),
        }
    }

    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn concat_style(&self) -> ConcatStyle {
        ConcatStyle::Function("CONCAT")
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> String {
        match (limit, offset) {
            (Some(n), Some(m)) => format!(" LIMIT {n} OFFSET {m}"),
            (Some(n), None) => format!(" LIMIT {n}"),
            // OFFSET requires LIMIT; use the documented "all rows" value.
            (None, Some(m)) => format!(" LIMIT {} OFFSET {m}", u64::MAX),
            (None, None) => String::new(),
        }
    }
}
