//! The compilation context threaded through statement trees.
//!
//! A [`Compilation`] owns the growing SQL text, the parameter list and the
//! alias table of one statement. Every node of a tree compiles into the same
//! context by `&mut`, so nested sub-selects share aliases and parameters are
//! numbered in text order.

use std::collections::HashMap;

use super::subject::{SubjectId, TableRef};
use super::value::SqlValue;
use crate::dialect::Dialect;
use crate::statement::Statement;

/// How scalars are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompileMode {
    /// Inline, dialect-escaped literals.
    Literal,
    /// Vendor placeholders with bound parameters.
    #[default]
    Prepared,
}

/// A node that can compile itself into a [`Compilation`].
pub trait CompileSql {
    /// Appends this node's SQL to `c`.
    fn compile_to(&self, c: &mut Compilation<'_>);

    /// Compiles this node as a complete statement.
    fn compile(&self, dialect: &dyn Dialect, mode: CompileMode) -> Statement {
        let mut c = Compilation::new(dialect, mode);
        self.compile_to(&mut c);
        c.close()
    }
}

/// Per-statement compile state.
#[derive(Debug)]
pub struct Compilation<'d> {
    dialect: &'d dyn Dialect,
    mode: CompileMode,
    sql: String,
    params: Vec<SqlValue>,
    aliases: HashMap<SubjectId, String>,
    next_alias: usize,
    closed: bool,
}

impl<'d> Compilation<'d> {
    /// Starts an empty compilation.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect, mode: CompileMode) -> Self {
        Self {
            dialect,
            mode,
            sql: String::new(),
            params: Vec::new(),
            aliases: HashMap::new(),
            next_alias: 0,
            closed: false,
        }
    }

    /// Target dialect.
    #[must_use]
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Scalar rendering mode.
    #[must_use]
    pub const fn mode(&self) -> CompileMode {
        self.mode
    }

    /// SQL written so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Appends raw SQL.
    ///
    /// # Panics
    ///
    /// Panics if the compilation is closed.
    pub fn push(&mut self, sql: &str) {
        assert!(!self.closed, "compilation already closed");
        self.sql.push_str(sql);
    }

    /// Appends a quoted identifier.
    pub fn push_identifier(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.push(&quoted);
    }

    /// Appends a scalar as a literal or a placeholder, depending on the mode.
    pub fn push_value(&mut self, value: &SqlValue) {
        match self.mode {
            CompileMode::Literal => {
                let literal = self.dialect.render_literal(value);
                self.push(&literal);
            }
            CompileMode::Prepared => {
                assert!(!self.closed, "compilation already closed");
                self.params.push(value.clone());
                let placeholder = self.dialect.placeholder(self.params.len());
                self.push(&placeholder);
            }
        }
    }

    /// Returns the alias of `id`, assigning the next `tN` on first use.
    pub fn alias(&mut self, id: SubjectId) -> String {
        if let Some(alias) = self.aliases.get(&id) {
            return alias.clone();
        }
        let alias = format!("t{}", self.next_alias);
        self.next_alias += 1;
        self.aliases.insert(id, alias.clone());
        alias
    }

    /// Qualifies columns of a DML target by the quoted table name.
    pub fn register_target(&mut self, table: &TableRef) {
        let quoted = self.dialect.quote_identifier(table.name());
        self.aliases.insert(table.id(), quoted);
    }

    /// Finishes the statement. Further writes panic.
    pub fn close(&mut self) -> Statement {
        self.closed = true;
        let sql = std::mem::take(&mut self.sql);
        let params = std::mem::take(&mut self.params);
        match self.mode {
            CompileMode::Literal => Statement::new(sql),
            CompileMode::Prepared => Statement::prepared(sql, params),
        }
    }
}
