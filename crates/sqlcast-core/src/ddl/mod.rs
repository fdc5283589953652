//! DDL generation.
//!
//! [`DdlAssembler`] turns resolved tables into per-table [`TableScript`]s
//! for one dialect: supporting types and sequences, the CREATE TABLE with
//! its inline constraints, indexes, generator triggers, and the guarded
//! drop statements that undo all of it. [`SchemaDdl`] collects the scripts
//! of a whole schema in dependency order.

mod defaults;
pub mod naming;

use tracing::{debug, info, warn};

use crate::dialect::{
    ActionPolicy, ActionSupport, Dialect, DropTarget, EnumStrategy, IdentityStrategy, UpdateTrigger,
};
use crate::error::{Error, Result};
use crate::resolver::{resolve, ResolvedTable};
use crate::schema::{
    Bound, CheckExpr, CheckOperand, Column, ForeignKey, ForeignKeyAction, InsertGenerator, Schema,
    TypeSpec, UpdateGenerator,
};
use crate::Statement;

use defaults::{validate_default, DefaultSql};
use naming::TriggerEvent;

/// Options for [`DdlAssembler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DdlOptions {
    action_policy: Option<ActionPolicy>,
    if_not_exists: bool,
}

impl DdlOptions {
    /// Default options: the dialect's action policy, plain CREATE TABLE.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            action_policy: None,
            if_not_exists: false,
        }
    }

    /// Overrides the dialect's policy for unsupported referential actions.
    #[must_use]
    pub const fn with_action_policy(mut self, policy: ActionPolicy) -> Self {
        self.action_policy = Some(policy);
        self
    }

    /// Emits CREATE TABLE IF NOT EXISTS where the vendor supports it.
    #[must_use]
    pub const fn if_not_exists(mut self, enabled: bool) -> Self {
        self.if_not_exists = enabled;
        self
    }
}

/// Create and drop statements for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableScript {
    table: String,
    types: Vec<Statement>,
    create_table: Statement,
    indexes: Vec<Statement>,
    triggers: Vec<Statement>,
    drop: Vec<Statement>,
}

impl TableScript {
    /// Table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Named types and sequences created before the table.
    #[must_use]
    pub fn types(&self) -> &[Statement] {
        &self.types
    }

    /// The CREATE TABLE statement.
    #[must_use]
    pub fn create_table(&self) -> &Statement {
        &self.create_table
    }

    /// CREATE INDEX statements.
    #[must_use]
    pub fn indexes(&self) -> &[Statement] {
        &self.indexes
    }

    /// Generator triggers and their functions.
    #[must_use]
    pub fn triggers(&self) -> &[Statement] {
        &self.triggers
    }

    /// Full create script: types, table, indexes, triggers.
    #[must_use]
    pub fn create(&self) -> Vec<Statement> {
        self.types
            .iter()
            .chain(std::iter::once(&self.create_table))
            .chain(&self.indexes)
            .chain(&self.triggers)
            .cloned()
            .collect()
    }

    /// Guarded drop script: triggers, indexes, table, sequences and types.
    #[must_use]
    pub fn drop(&self) -> &[Statement] {
        &self.drop
    }
}

/// Scripts of every materialized table, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDdl {
    scripts: Vec<TableScript>,
}

impl SchemaDdl {
    /// Per-table scripts in creation order.
    #[must_use]
    pub fn scripts(&self) -> &[TableScript] {
        &self.scripts
    }

    /// Looks up the script of one table.
    #[must_use]
    pub fn script(&self, table: &str) -> Option<&TableScript> {
        self.scripts.iter().find(|s| s.table == table)
    }

    /// Every create statement, referenced tables first.
    #[must_use]
    pub fn create(&self) -> Vec<Statement> {
        self.scripts.iter().flat_map(TableScript::create).collect()
    }

    /// Every drop statement, referencing tables first.
    #[must_use]
    pub fn drop(&self) -> Vec<Statement> {
        self.scripts
            .iter()
            .rev()
            .flat_map(|s| s.drop.iter().cloned())
            .collect()
    }
}

/// Joins statements into a script with the dialect's terminators.
#[must_use]
pub fn render_script(dialect: &dyn Dialect, statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|s| format!("{}{}\n", s.sql(), dialect.script_terminator(s.sql())))
        .collect()
}

/// Builds DDL for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct DdlAssembler<'d> {
    dialect: &'d dyn Dialect,
    options: DdlOptions,
}

/// Statements collected while assembling a table.
#[derive(Default)]
struct Parts {
    types: Vec<Statement>,
    indexes: Vec<Statement>,
    triggers: Vec<Statement>,
    column_checks: Vec<String>,
    range_checks: Vec<String>,
    enum_checks: Vec<String>,
    drop_triggers: Vec<Statement>,
    drop_indexes: Vec<Statement>,
    drop_objects: Vec<Statement>,
    inline_primary_key: bool,
}

impl<'d> DdlAssembler<'d> {
    /// Creates an assembler with default options.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            options: DdlOptions::new(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub const fn with_options(mut self, options: DdlOptions) -> Self {
        self.options = options;
        self
    }

    /// Dialect in use.
    #[must_use]
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    fn policy(&self) -> ActionPolicy {
        self.options
            .action_policy
            .unwrap_or_else(|| self.dialect.action_policy())
    }

    fn q(&self, name: &str) -> String {
        self.dialect.quote_identifier(name)
    }

    fn quoted_list(&self, names: &[String]) -> String {
        names.iter().map(|n| self.q(n)).collect::<Vec<_>>().join(", ")
    }

    fn drops(&self, target: DropTarget<'_>) -> impl Iterator<Item = Statement> {
        self.dialect.drop_statements(target).into_iter().map(Statement::new)
    }

    /// Resolves the schema and assembles every materialized table.
    ///
    /// # Errors
    ///
    /// Any resolution error, or the first error raised while assembling a
    /// table.
    pub fn schema(&self, schema: &Schema) -> Result<SchemaDdl> {
        let resolution = resolve(schema)?;
        let scripts = resolution
            .tables()
            .iter()
            .map(|table| self.table(table))
            .collect::<Result<Vec<_>>>()?;
        info!(
            vendor = %self.dialect.vendor(),
            schema = %schema.name,
            tables = scripts.len(),
            "Generated schema DDL"
        );
        Ok(SchemaDdl { scripts })
    }

    /// Assembles the create and drop scripts of one resolved table.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownColumn`] / [`Error::NullablePrimaryKey`]
    /// - [`Error::InvalidDefault`] and the type bounds errors
    /// - [`Error::Unsupported`] for generators or actions the vendor cannot express
    /// - [`Error::InvalidSchema`] for inconsistent column options
    pub fn table(&self, table: &ResolvedTable<'_>) -> Result<TableScript> {
        validate_references(table)?;
        let name = table.name();
        let primary_key = table.primary_key.unwrap_or(&[]);

        let mut parts = Parts::default();
        let mut clauses = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            clauses.push(self.column_clause(name, column, primary_key, &mut parts)?);
        }

        for unique in &table.unique {
            let constraint = naming::unique(name, unique.name.as_deref(), &unique.columns);
            clauses.push(format!(
                "CONSTRAINT {} UNIQUE ({})",
                self.q(&constraint),
                self.quoted_list(&unique.columns)
            ));
        }
        for (position, check) in table.checks.iter().enumerate() {
            let constraint = naming::check(name, position + 1, check.name.as_deref());
            clauses.push(format!(
                "CONSTRAINT {} CHECK ({})",
                self.q(&constraint),
                self.check_sql(&check.expr)
            ));
        }
        clauses.append(&mut parts.column_checks);
        clauses.append(&mut parts.range_checks);
        clauses.append(&mut parts.enum_checks);
        if !primary_key.is_empty() && !parts.inline_primary_key {
            clauses.push(format!(
                "CONSTRAINT {} PRIMARY KEY ({})",
                self.q(&naming::primary_key(name)),
                self.quoted_list(primary_key)
            ));
        }
        for fk in &table.foreign_keys {
            clauses.push(self.foreign_key_clause(name, fk)?);
        }

        for index in &table.indexes {
            let index_name = naming::index(name, &index.name);
            parts.indexes.push(self.create_index(name, &index_name, &index.columns, index.unique));
            parts.drop_indexes.extend(self.drops(DropTarget::Index {
                table: name,
                name: &index_name,
            }));
        }

        let create_table = Statement::new(self.create_table_sql(name, &clauses));

        let mut drop = parts.drop_triggers;
        drop.append(&mut parts.drop_indexes);
        drop.extend(self.drops(DropTarget::Table(name)));
        drop.append(&mut parts.drop_objects);

        debug!(
            vendor = %self.dialect.vendor(),
            table = name,
            types = parts.types.len(),
            indexes = parts.indexes.len(),
            triggers = parts.triggers.len(),
            "Assembled table script"
        );
        Ok(TableScript {
            table: name.to_string(),
            types: parts.types,
            create_table,
            indexes: parts.indexes,
            triggers: parts.triggers,
            drop,
        })
    }

    fn create_table_sql(&self, name: &str, clauses: &[String]) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if self.options.if_not_exists {
            if self.dialect.supports_create_if_not_exists() {
                sql.push_str("IF NOT EXISTS ");
            } else {
                debug!(
                    vendor = %self.dialect.vendor(),
                    table = name,
                    "IF NOT EXISTS not available, emitting plain CREATE TABLE"
                );
            }
        }
        sql.push_str(&self.q(name));
        sql.push_str(" (\n");
        let body: Vec<String> = clauses.iter().map(|c| format!("    {c}")).collect();
        sql.push_str(&body.join(",\n"));
        sql.push_str("\n)");
        sql
    }

    fn create_index(&self, table: &str, name: &str, columns: &[String], unique: bool) -> Statement {
        Statement::new(format!(
            "CREATE {}INDEX {} ON {} ({})",
            if unique { "UNIQUE " } else { "" },
            self.q(name),
            self.q(table),
            self.quoted_list(columns)
        ))
    }

    fn column_clause(
        &self,
        table: &str,
        column: &Column,
        primary_key: &[String],
        parts: &mut Parts,
    ) -> Result<String> {
        let target = format!("{table}.{}", column.name);
        check_generators(&target, column)?;
        let spec = &column.type_spec;
        let quoted = self.q(&column.name);
        let mut sql = format!(
            "{quoted} {}",
            self.dialect.compile_type(table, &column.name, spec)?
        );

        if let TypeSpec::Enum { values } = spec {
            self.enum_support(table, &column.name, values, parts);
        }
        if matches!(spec, TypeSpec::Boolean) && self.dialect.boolean_needs_check() {
            parts.enum_checks.push(format!(
                "CONSTRAINT {} CHECK ({quoted} IN (0, 1))",
                self.q(&naming::boolean_check(table, &column.name)),
            ));
        }

        let default = match (column.on_insert, validate_default(table, column)?) {
            (Some(InsertGenerator::Uuid), _) => Some(String::from(
                self.dialect.uuid_default().ok_or_else(|| {
                    Error::unsupported(
                        self.dialect.vendor(),
                        format!("UUID generation on '{target}'"),
                    )
                })?,
            )),
            (Some(InsertGenerator::Now), _) => Some(String::from(self.dialect.generated_now(spec))),
            (_, Some(DefaultSql::Literal(value))) => Some(self.dialect.render_literal(&value)),
            (_, Some(DefaultSql::Raw(expr))) => Some(expr),
            _ => None,
        };
        if let Some(default) = default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default);
        }

        // The after-insert numbering trigger needs the row to accept NULL first.
        let numbered_after_insert = column.is_auto_increment()
            && self.dialect.identity() == IdentityStrategy::RowidAlias
            && !is_rowid_alias(column, primary_key);
        if numbered_after_insert && !column.nullable {
            debug!(
                vendor = %self.dialect.vendor(),
                column = %target,
                "NOT NULL left to the insert trigger"
            );
        } else if !column.nullable {
            sql.push_str(" NOT NULL");
        } else if self.dialect.explicit_null() {
            sql.push_str(" NULL");
        }

        if column.is_auto_increment() {
            self.identity(table, column, primary_key, &mut sql, parts)?;
        }

        if let Some(generator) = column.on_update {
            match self.dialect.on_update_fragment(generator, spec) {
                Some(fragment) => {
                    sql.push(' ');
                    sql.push_str(&fragment);
                }
                None => self.update_trigger(table, column, generator, primary_key, parts)?,
            }
        }

        if let Some(range) = self.range_check(table, column)? {
            parts.range_checks.push(range);
        }
        if let Some(check) = &column.check {
            parts.column_checks.push(format!(
                "CONSTRAINT {} CHECK ({})",
                self.q(&naming::column_check(table, &column.name)),
                self.check_sql(check)
            ));
        }
        if let Some(index) = column.index {
            let index_name = naming::index(table, &column.name);
            let columns = [column.name.clone()];
            parts.indexes.push(self.create_index(table, &index_name, &columns, index.unique));
            parts.drop_indexes.extend(self.drops(DropTarget::Index {
                table,
                name: &index_name,
            }));
        }
        Ok(sql)
    }

    fn enum_support(&self, table: &str, column: &str, values: &[String], parts: &mut Parts) {
        let literals: Vec<String> = values.iter().map(|v| self.dialect.string_literal(v)).collect();
        match self.dialect.enum_strategy() {
            EnumStrategy::NamedType => {
                let type_name = naming::enum_type(table, column);
                let create = format!(
                    "CREATE TYPE {} AS ENUM ({})",
                    self.q(&type_name),
                    literals.join(", ")
                );
                // CREATE TYPE has no IF NOT EXISTS form.
                parts.types.push(Statement::new(if self.options.if_not_exists {
                    format!(
                        "DO $$ BEGIN {create}; EXCEPTION WHEN duplicate_object THEN NULL; END $$"
                    )
                } else {
                    create
                }));
                parts.drop_objects.extend(self.drops(DropTarget::Type(&type_name)));
            }
            EnumStrategy::Check => parts.enum_checks.push(format!(
                "CONSTRAINT {} CHECK ({} IN ({}))",
                self.q(&naming::enum_check(table, column)),
                self.q(column),
                literals.join(", ")
            )),
            EnumStrategy::Inline => {}
        }
    }

    fn identity(
        &self,
        table: &str,
        column: &Column,
        primary_key: &[String],
        sql: &mut String,
        parts: &mut Parts,
    ) -> Result<()> {
        match self.dialect.identity() {
            IdentityStrategy::Column(fragment) => {
                sql.push(' ');
                sql.push_str(fragment);
            }
            IdentityStrategy::SequenceTrigger => {
                let sequence = naming::sequence(table, &column.name);
                let trigger = naming::trigger(table, &column.name, TriggerEvent::Insert);
                parts.types.push(Statement::new(self.dialect.create_sequence(&sequence)));
                parts.triggers.extend(
                    self.dialect
                        .identity_trigger(table, &column.name, &sequence, &trigger)?
                        .into_iter()
                        .map(Statement::new),
                );
                parts.drop_triggers.extend(self.drops(DropTarget::Trigger {
                    table,
                    name: &trigger,
                }));
                parts.drop_objects.extend(self.drops(DropTarget::Sequence(&sequence)));
            }
            IdentityStrategy::RowidAlias if is_rowid_alias(column, primary_key) => {
                sql.push_str(" PRIMARY KEY AUTOINCREMENT");
                parts.inline_primary_key = true;
            }
            IdentityStrategy::RowidAlias => {
                let trigger = naming::trigger(table, &column.name, TriggerEvent::Insert);
                parts.triggers.extend(
                    self.dialect
                        .max_plus_one_trigger(table, &column.name, &trigger)?
                        .into_iter()
                        .map(Statement::new),
                );
                parts.drop_triggers.extend(self.drops(DropTarget::Trigger {
                    table,
                    name: &trigger,
                }));
            }
        }
        Ok(())
    }

    fn update_trigger(
        &self,
        table: &str,
        column: &Column,
        generator: UpdateGenerator,
        primary_key: &[String],
        parts: &mut Parts,
    ) -> Result<()> {
        let trigger = naming::trigger(table, &column.name, TriggerEvent::Update);
        let function = naming::trigger_function(table, &column.name, TriggerEvent::Update);
        let statements = self.dialect.update_trigger(&UpdateTrigger {
            table,
            column: &column.name,
            type_spec: &column.type_spec,
            generator,
            trigger: &trigger,
            function: &function,
            primary_key,
        })?;
        parts.triggers.extend(statements.into_iter().map(Statement::new));
        parts.drop_triggers.extend(self.drops(DropTarget::Trigger {
            table,
            name: &trigger,
        }));
        if self.dialect.uses_trigger_function() {
            parts.drop_triggers.extend(self.drops(DropTarget::Function(&function)));
        }
        Ok(())
    }

    fn range_check(&self, table: &str, column: &Column) -> Result<Option<String>> {
        let spec = &column.type_spec;
        let unsigned_floor = spec.is_unsigned() && !self.dialect.allows_unsigned_numeric();
        let min = match (column.min, unsigned_floor) {
            (Some(b), true) if b.as_f64() < 0.0 => Some(Bound::Integer(0)),
            (None, true) => Some(Bound::Integer(0)),
            (b, _) => b,
        };
        let max = column.max;
        if min.is_none() && max.is_none() {
            return Ok(None);
        }
        let target = format!("{table}.{}", column.name);
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo.as_f64() > hi.as_f64() {
                return Err(Error::InvalidSchema(format!(
                    "minimum {lo} of '{target}' is above its maximum {hi}"
                )));
            }
        }
        let subject = if spec.is_numeric() {
            self.q(&column.name)
        } else if spec.is_textual() {
            format!("{}({})", self.dialect.length_function(), self.q(&column.name))
        } else {
            return Err(Error::InvalidSchema(format!(
                "bounds on '{target}' need a numeric or textual column"
            )));
        };
        let mut terms = Vec::with_capacity(2);
        if let Some(lo) = min {
            terms.push(format!("{subject} >= {lo}"));
        }
        if let Some(hi) = max {
            terms.push(format!("{subject} <= {hi}"));
        }
        Ok(Some(format!(
            "CONSTRAINT {} CHECK ({})",
            self.q(&naming::range_check(table, &column.name)),
            terms.join(" AND ")
        )))
    }

    fn check_sql(&self, expr: &CheckExpr) -> String {
        match expr {
            CheckExpr::Compare { column, op, value } => {
                let right = match value {
                    CheckOperand::Value(v) => self.dialect.render_literal(v),
                    CheckOperand::Column(c) => self.q(c),
                };
                format!("{} {} {right}", self.q(column), op.as_sql())
            }
            CheckExpr::And(l, r) => format!("({}) AND ({})", self.check_sql(l), self.check_sql(r)),
            CheckExpr::Or(l, r) => format!("({}) OR ({})", self.check_sql(l), self.check_sql(r)),
        }
    }

    fn foreign_key_clause(&self, table: &str, fk: &ForeignKey) -> Result<String> {
        let constraint = naming::foreign_key(table, &fk.columns);
        let mut sql = format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.q(&constraint),
            self.quoted_list(&fk.columns),
            self.q(&fk.references_table),
            self.quoted_list(&fk.references_columns)
        );
        for (action, on_update) in [(fk.on_delete, false), (fk.on_update, true)] {
            if let Some(action) = action {
                if self.action_allowed(table, &constraint, action, on_update)? {
                    let event = if on_update { "UPDATE" } else { "DELETE" };
                    sql.push_str(&format!(" ON {event} {}", action.as_sql()));
                }
            }
        }
        Ok(sql)
    }

    /// Whether the action clause is emitted.
    fn action_allowed(
        &self,
        table: &str,
        constraint: &str,
        action: ForeignKeyAction,
        on_update: bool,
    ) -> Result<bool> {
        let event = if on_update { "UPDATE" } else { "DELETE" };
        match self.dialect.action_support(action, on_update) {
            ActionSupport::Native => Ok(true),
            ActionSupport::Implicit => Ok(false),
            ActionSupport::Unsupported => match self.policy() {
                ActionPolicy::Warn => {
                    warn!(
                        vendor = %self.dialect.vendor(),
                        table,
                        constraint,
                        action = %format!("ON {event} {}", action.as_sql()),
                        "Dropping unsupported referential action"
                    );
                    Ok(false)
                }
                ActionPolicy::Reject => Err(Error::unsupported(
                    self.dialect.vendor(),
                    format!("ON {event} {} on '{constraint}'", action.as_sql()),
                )),
            },
        }
    }
}

/// Every column named by a key, index or check must exist; key columns
/// must be NOT NULL.
fn validate_references(table: &ResolvedTable<'_>) -> Result<()> {
    let name = table.name();
    let nullable = |column: &str| -> Result<bool> {
        table
            .column(column)
            .map(|c| c.nullable)
            .ok_or_else(|| Error::UnknownColumn {
                table: name.to_string(),
                column: column.to_string(),
            })
    };
    let known = |column: &str| nullable(column).map(|_| ());
    let non_empty = |columns: &[String], what: &str| -> Result<()> {
        if columns.is_empty() {
            Err(Error::InvalidSchema(format!("{what} of '{name}' has no columns")))
        } else {
            Ok(())
        }
    };

    if let Some(pk) = table.primary_key {
        non_empty(pk, "primary key")?;
        for column in pk {
            if nullable(column)? {
                return Err(Error::NullablePrimaryKey {
                    table: name.to_string(),
                    column: column.clone(),
                });
            }
        }
    }
    for unique in &table.unique {
        non_empty(&unique.columns, "unique constraint")?;
        unique.columns.iter().try_for_each(|c| known(c))?;
    }
    for index in &table.indexes {
        non_empty(&index.columns, "index")?;
        index.columns.iter().try_for_each(|c| known(c))?;
    }
    for fk in &table.foreign_keys {
        fk.columns.iter().try_for_each(|c| known(c))?;
    }

    let mut checked = Vec::new();
    for check in &table.checks {
        check.expr.for_each_column(&mut |c| checked.push(c));
    }
    for column in &table.columns {
        if let Some(check) = &column.check {
            check.for_each_column(&mut |c| checked.push(c));
        }
    }
    checked.into_iter().try_for_each(|c| known(c))
}

/// Whether `column` is the sole primary key and so aliases the SQLite row id.
fn is_rowid_alias(column: &Column, primary_key: &[String]) -> bool {
    matches!(primary_key, [key] if *key == column.name)
        && matches!(column.type_spec, TypeSpec::Integer { .. })
}

/// Generators must suit the column type and exclude an explicit default.
fn check_generators(target: &str, column: &Column) -> Result<()> {
    let invalid = |reason: &str| Err(Error::InvalidSchema(format!("'{target}' {reason}")));
    let spec = &column.type_spec;
    let whole = matches!(
        spec,
        TypeSpec::Integer { .. } | TypeSpec::Decimal { scale: None | Some(0), .. }
    );
    let temporal = matches!(spec, TypeSpec::Date | TypeSpec::DateTime);

    if let Some(generator) = column.on_insert {
        if column.default.is_some() {
            return invalid("has both a default and an insert generator");
        }
        let fits = match generator {
            InsertGenerator::AutoIncrement => matches!(spec, TypeSpec::Integer { .. }),
            InsertGenerator::Uuid => matches!(
                spec,
                TypeSpec::Char { length } | TypeSpec::Varchar { length } if *length >= 36
            ) || matches!(spec, TypeSpec::Clob),
            InsertGenerator::Now => temporal,
        };
        if !fits {
            return invalid(&format!("cannot use the {generator:?} insert generator"));
        }
    }
    if let Some(generator) = column.on_update {
        let fits = match generator {
            UpdateGenerator::Increment => whole,
            UpdateGenerator::Now => temporal,
        };
        if !fits {
            return invalid(&format!("cannot use the {generator:?} update generator"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Vendor;
    use crate::query::CompareOp;
    use crate::schema::{
        boolean, datetime, decimal, enumeration, integer, unsigned, varchar, ForeignKeyAction,
        Table, TableBuilder,
    };

    fn customer() -> Table {
        TableBuilder::new()
            .name("customer")
            .column(integer("id", 9).not_null().auto_increment().build())
            .column(varchar("email", 120).not_null().unique_index().build())
            .column(integer("age", 3).range(0, 150).build())
            .primary_key(&["id"])
            .build()
    }

    fn orders() -> Table {
        TableBuilder::new()
            .name("orders")
            .column(integer("id", 9).not_null().build())
            .column(
                integer("customer_id", 9)
                    .not_null()
                    .references_on_delete("customer", "id", ForeignKeyAction::Cascade)
                    .build(),
            )
            .column(enumeration("status", "new paid shipped").default_str("new").build())
            .column(decimal("total", 10, 2).build())
            .primary_key(&["id"])
            .check(CheckExpr::compare("total", CompareOp::Ge, 0))
            .build()
    }

    fn schema() -> Schema {
        Schema::new("shop").table(orders()).table(customer())
    }

    fn generate(vendor: Vendor) -> SchemaDdl {
        DdlAssembler::new(vendor.dialect()).schema(&schema()).unwrap()
    }

    fn sql(statements: &[Statement]) -> Vec<&str> {
        statements.iter().map(Statement::sql).collect()
    }

    #[test]
    fn test_postgres_create_table() {
        let ddl = generate(Vendor::Postgres);
        let customer = ddl.script("customer").unwrap();
        assert_eq!(
            customer.create_table().sql(),
            "CREATE TABLE \"customer\" (\n    \
             \"id\" INTEGER NOT NULL GENERATED BY DEFAULT AS IDENTITY,\n    \
             \"email\" VARCHAR(120) NOT NULL,\n    \
             \"age\" SMALLINT,\n    \
             CONSTRAINT \"ck_customer_age_range\" CHECK (\"age\" >= 0 AND \"age\" <= 150),\n    \
             CONSTRAINT \"pk_customer\" PRIMARY KEY (\"id\")\n)"
        );
        assert_eq!(
            sql(customer.indexes()),
            ["CREATE UNIQUE INDEX \"idx_customer_email\" ON \"customer\" (\"email\")"]
        );
    }

    #[test]
    fn test_referenced_table_created_first() {
        let ddl = generate(Vendor::Postgres);
        let tables: Vec<&str> = ddl.scripts().iter().map(TableScript::table).collect();
        assert_eq!(tables, ["customer", "orders"]);
        let drop = ddl.drop();
        let first_customer = drop.iter().position(|s| s.sql().contains("\"customer\"")).unwrap();
        let last_orders = drop.iter().rposition(|s| s.sql().contains("\"orders\"")).unwrap();
        assert!(last_orders < first_customer);
    }

    #[test]
    fn test_postgres_named_enum_type() {
        let ddl = generate(Vendor::Postgres);
        let orders = ddl.script("orders").unwrap();
        assert_eq!(
            sql(orders.types()),
            ["CREATE TYPE \"ty_orders_status\" AS ENUM ('new', 'paid', 'shipped')"]
        );
        let create = orders.create_table().sql();
        assert!(create.contains("\"status\" \"ty_orders_status\" DEFAULT 'new'"));
        assert!(create.contains("CONSTRAINT \"ck_orders_1\" CHECK (\"total\" >= 0)"));
        assert!(create.contains(
            "CONSTRAINT \"fk_orders_customer_id\" FOREIGN KEY (\"customer_id\") \
             REFERENCES \"customer\" (\"id\") ON DELETE CASCADE"
        ));
        assert_eq!(
            sql(orders.drop()),
            ["DROP TABLE IF EXISTS \"orders\"", "DROP TYPE IF EXISTS \"ty_orders_status\""]
        );
    }

    #[test]
    fn test_oracle_identity_uses_sequence_and_trigger() {
        let ddl = generate(Vendor::Oracle);
        let customer = ddl.script("customer").unwrap();
        assert_eq!(
            sql(customer.types()),
            ["CREATE SEQUENCE \"seq_customer_id\" START WITH 1 INCREMENT BY 1 NOCACHE"]
        );
        assert_eq!(customer.triggers().len(), 1);
        assert!(customer.triggers()[0]
            .sql()
            .contains(":NEW.\"id\" := \"seq_customer_id\".NEXTVAL"));

        let drop = sql(customer.drop());
        assert_eq!(drop.len(), 4);
        assert!(drop[0].contains("user_triggers"));
        assert!(drop[1].contains("user_indexes"));
        assert!(drop[2].contains("user_tables"));
        assert!(drop[3].contains("user_sequences"));
    }

    #[test]
    fn test_oracle_boolean_restricted_to_zero_and_one() {
        let table = TableBuilder::new()
            .name("flag")
            .column(boolean("active").not_null().build())
            .build();
        let ddl = DdlAssembler::new(Vendor::Oracle.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap();
        let create = ddl.script("flag").unwrap().create_table().sql().to_string();
        assert!(create.contains("\"active\" NUMBER(1) NOT NULL"));
        assert!(create.contains("CONSTRAINT \"ck_flag_active_bool\" CHECK (\"active\" IN (0, 1))"));

        let ddl = DdlAssembler::new(Vendor::Postgres.dialect())
            .schema(&Schema::new("s").table(
                TableBuilder::new().name("flag").column(boolean("active").build()).build(),
            ))
            .unwrap();
        assert!(!ddl.create()[0].sql().contains("CHECK"));
    }

    #[test]
    fn test_oracle_enum_uses_check() {
        let ddl = generate(Vendor::Oracle);
        let create = ddl.script("orders").unwrap().create_table().sql().to_string();
        assert!(create.contains("\"status\" VARCHAR2(7) DEFAULT 'new'"));
        assert!(create.contains(
            "CONSTRAINT \"ck_orders_status_enum\" CHECK (\"status\" IN ('new', 'paid', 'shipped'))"
        ));
    }

    #[test]
    fn test_sqlite_rowid_alias() {
        let ddl = generate(Vendor::Sqlite);
        let create = ddl.script("customer").unwrap().create_table().sql().to_string();
        assert!(create.contains("\"id\" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT"));
        assert!(!create.contains("CONSTRAINT \"pk_customer\""));
    }

    #[test]
    fn test_if_not_exists_guards_postgres_enum_type() {
        let ddl = DdlAssembler::new(Vendor::Postgres.dialect())
            .with_options(DdlOptions::new().if_not_exists(true))
            .schema(&schema())
            .unwrap();
        let orders = ddl.script("orders").unwrap();
        assert_eq!(
            sql(orders.types()),
            ["DO $$ BEGIN CREATE TYPE \"ty_orders_status\" AS ENUM ('new', 'paid', 'shipped'); \
              EXCEPTION WHEN duplicate_object THEN NULL; END $$"]
        );
        assert!(orders.create_table().sql().starts_with("CREATE TABLE IF NOT EXISTS \"orders\""));
    }

    #[test]
    fn test_sqlite_composite_key_numbers_by_trigger() {
        let table = TableBuilder::new()
            .name("t")
            .column(integer("a", 9).not_null().auto_increment().build())
            .column(integer("b", 9).not_null().build())
            .primary_key(&["a", "b"])
            .build();
        let ddl = DdlAssembler::new(Vendor::Sqlite.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap();
        let script = ddl.script("t").unwrap();
        let create = script.create_table().sql();
        assert!(create.contains("\"a\" INTEGER,"), "{create}");
        assert!(!create.contains("AUTOINCREMENT"));
        assert!(create.contains("CONSTRAINT \"pk_t\" PRIMARY KEY (\"a\", \"b\")"));
        assert_eq!(script.triggers().len(), 1);
        assert!(script.triggers()[0]
            .sql()
            .starts_with("CREATE TRIGGER \"trg_t_a_ins\" AFTER INSERT ON \"t\""));
        assert_eq!(sql(script.drop())[0], "DROP TRIGGER IF EXISTS \"trg_t_a_ins\"");
    }

    #[test]
    fn test_sqlite_non_key_auto_increment_numbers_by_trigger() {
        let table = TableBuilder::new()
            .name("log")
            .column(varchar("k", 20).not_null().build())
            .column(integer("seq", 9).auto_increment().build())
            .primary_key(&["k"])
            .build();
        let ddl = DdlAssembler::new(Vendor::Sqlite.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap();
        let script = ddl.script("log").unwrap();
        assert!(script.create_table().sql().contains("\"seq\" INTEGER,"));
        assert!(script.triggers()[0].sql().contains("COALESCE(MAX(\"seq\"), 0) + 1"));
    }

    #[test]
    fn test_mysql_inline_enum_and_on_update() {
        let table = TableBuilder::new()
            .name("doc")
            .column(enumeration("state", "draft final").not_null().build())
            .column(datetime("touched").on_update(UpdateGenerator::Now).build())
            .build();
        let ddl = DdlAssembler::new(Vendor::MySql.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap();
        let script = ddl.script("doc").unwrap();
        assert_eq!(
            script.create_table().sql(),
            "CREATE TABLE `doc` (\n    `state` ENUM('draft', 'final') NOT NULL,\n    \
             `touched` DATETIME ON UPDATE CURRENT_TIMESTAMP\n)"
        );
        assert!(script.triggers().is_empty());
    }

    #[test]
    fn test_update_trigger_and_function_drops() {
        let table = TableBuilder::new()
            .name("doc")
            .column(integer("id", 9).not_null().build())
            .column(
                integer("version", 9)
                    .not_null()
                    .default_int(1)
                    .on_update(UpdateGenerator::Increment)
                    .build(),
            )
            .primary_key(&["id"])
            .build();
        let ddl = DdlAssembler::new(Vendor::Postgres.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap();
        let script = ddl.script("doc").unwrap();
        assert_eq!(script.triggers().len(), 2);
        assert_eq!(
            sql(script.drop()),
            [
                "DROP TRIGGER IF EXISTS \"trg_doc_version_upd\" ON \"doc\"",
                "DROP FUNCTION IF EXISTS \"fn_doc_version_upd\"()",
                "DROP TABLE IF EXISTS \"doc\"",
            ]
        );
    }

    #[test]
    fn test_unsupported_action_policies() {
        let parent = TableBuilder::new()
            .name("parent")
            .column(integer("id", 9).not_null().build())
            .primary_key(&["id"])
            .build();
        let child = TableBuilder::new()
            .name("child")
            .column(integer("parent_id", 9).build())
            .foreign_key(
                ForeignKey::new(&["parent_id"], "parent", &["id"])
                    .on_update(ForeignKeyAction::Cascade),
            )
            .build();
        let schema = Schema::new("s").table(parent).table(child);

        // Db2 rejects by default.
        let err = DdlAssembler::new(Vendor::Db2.dialect()).schema(&schema).unwrap_err();
        assert_eq!(
            err.to_string(),
            "db2 does not support ON UPDATE CASCADE on 'fk_child_parent_id'"
        );

        // Overridden to warn, the clause is dropped.
        let ddl = DdlAssembler::new(Vendor::Db2.dialect())
            .with_options(DdlOptions::new().with_action_policy(ActionPolicy::Warn))
            .schema(&schema)
            .unwrap();
        let create = ddl.script("child").unwrap().create_table().sql().to_string();
        assert!(create.ends_with("REFERENCES \"parent\" (\"id\")\n)"));
    }

    #[test]
    fn test_if_not_exists() {
        let options = DdlOptions::new().if_not_exists(true);
        let ddl = DdlAssembler::new(Vendor::Sqlite.dialect())
            .with_options(options)
            .schema(&schema())
            .unwrap();
        assert!(ddl.create()[0].sql().starts_with("CREATE TABLE IF NOT EXISTS \"customer\""));

        let ddl = DdlAssembler::new(Vendor::Oracle.dialect())
            .with_options(options)
            .schema(&schema())
            .unwrap();
        assert!(ddl
            .create()
            .iter()
            .any(|s| s.sql().starts_with("CREATE TABLE \"customer\"")));
    }

    #[test]
    fn test_unsigned_range_on_vendor_without_unsigned() {
        let table = TableBuilder::new()
            .name("t")
            .column(unsigned("qty", 4).build())
            .column(varchar("code", 10).min(Bound::Integer(2)).build())
            .build();
        let schema = Schema::new("s").table(table);

        let pg = DdlAssembler::new(Vendor::Postgres.dialect()).schema(&schema).unwrap();
        let create = pg.script("t").unwrap().create_table().sql().to_string();
        assert!(create.contains("CONSTRAINT \"ck_t_qty_range\" CHECK (\"qty\" >= 0)"));
        assert!(create.contains("CONSTRAINT \"ck_t_code_range\" CHECK (LENGTH(\"code\") >= 2)"));

        let mysql = DdlAssembler::new(Vendor::MySql.dialect()).schema(&schema).unwrap();
        let create = mysql.script("t").unwrap().create_table().sql().to_string();
        assert!(create.contains("`qty` SMALLINT UNSIGNED"));
        assert!(!create.contains("ck_t_qty_range"));
        assert!(create.contains("CHECK (CHAR_LENGTH(`code`) >= 2)"));
    }

    #[test]
    fn test_nullable_primary_key() {
        let table = TableBuilder::new()
            .name("t")
            .column(integer("id", 9).build())
            .primary_key(&["id"])
            .build();
        let err = DdlAssembler::new(Vendor::Postgres.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap_err();
        assert_eq!(
            err,
            Error::NullablePrimaryKey {
                table: String::from("t"),
                column: String::from("id"),
            }
        );
    }

    #[test]
    fn test_unknown_constraint_column() {
        let table = TableBuilder::new()
            .name("t")
            .column(integer("a", 9).build())
            .unique(&["b"])
            .build();
        let err = DdlAssembler::new(Vendor::Postgres.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownColumn {
                table: String::from("t"),
                column: String::from("b"),
            }
        );
    }

    #[test]
    fn test_generator_with_default_is_invalid() {
        let table = TableBuilder::new()
            .name("t")
            .column(integer("a", 9).auto_increment().default_int(3).build())
            .build();
        let err = DdlAssembler::new(Vendor::Postgres.dialect())
            .schema(&Schema::new("s").table(table))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_uuid_generator_capability() {
        let table = TableBuilder::new()
            .name("t")
            .column(varchar("token", 36).on_insert(InsertGenerator::Uuid).build())
            .build();
        let schema = Schema::new("s").table(table);
        let pg = DdlAssembler::new(Vendor::Postgres.dialect()).schema(&schema).unwrap();
        assert!(pg.create()[0]
            .sql()
            .contains("\"token\" VARCHAR(36) DEFAULT CAST(gen_random_uuid() AS VARCHAR(36))"));

        let err = DdlAssembler::new(Vendor::Db2.dialect()).schema(&schema).unwrap_err();
        assert!(matches!(err, Error::Unsupported { vendor: Vendor::Db2, .. }));
    }

    #[test]
    fn test_sqlserver_explicit_null_and_terminator() {
        let ddl = generate(Vendor::SqlServer);
        let create = ddl.script("orders").unwrap().create_table().sql().to_string();
        assert!(create.contains("[total] DECIMAL(10, 2) NULL"));
        let script = render_script(Vendor::SqlServer.dialect(), &ddl.create());
        assert!(script.contains("PRIMARY KEY ([id])\n);\n"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        for vendor in Vendor::ALL {
            let first = DdlAssembler::new(vendor.dialect())
                .schema(&schema())
                .unwrap_or_else(|e| panic!("{vendor}: {e}"));
            let second = generate(vendor);
            assert!(!first.create().is_empty(), "{vendor}");
            assert_eq!(sql(&first.create()), sql(&second.create()), "{vendor}");
            assert_eq!(sql(&first.drop()), sql(&second.drop()), "{vendor}");
        }
    }

    #[test]
    fn test_decimal_auto_increment_is_invalid_everywhere() {
        let table = TableBuilder::new()
            .name("doc")
            .column(decimal("id", 10, 0).not_null().auto_increment().build())
            .primary_key(&["id"])
            .build();
        let schema = Schema::new("s").table(table);
        for vendor in Vendor::ALL {
            let err = DdlAssembler::new(vendor.dialect()).schema(&schema).unwrap_err();
            assert!(matches!(err, Error::InvalidSchema(_)), "{vendor}: {err:?}");
            assert!(err.to_string().contains("doc.id"), "{vendor}: {err}");
        }
    }

    #[test]
    fn test_decimal_revision_increment_is_allowed() {
        let table = TableBuilder::new()
            .name("doc")
            .column(integer("id", 9).not_null().build())
            .column(
                decimal("revision", 10, 0)
                    .on_update(UpdateGenerator::Increment)
                    .build(),
            )
            .primary_key(&["id"])
            .build();
        let schema = Schema::new("s").table(table);
        for vendor in Vendor::ALL {
            let ddl = DdlAssembler::new(vendor.dialect())
                .schema(&schema)
                .unwrap_or_else(|e| panic!("{vendor}: {e}"));
            assert!(!ddl.script("doc").unwrap().triggers().is_empty(), "{vendor}");
        }
    }
}
