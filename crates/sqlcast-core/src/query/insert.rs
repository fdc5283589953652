//! INSERT statements.

use super::compilation::{Compilation, CompileSql};
use super::expr::{col, ColumnRef, Expr};
use super::select::Select;
use super::subject::TableRef;

#[derive(Debug, Clone)]
enum Source {
    Values(Vec<Vec<Expr>>),
    Select(Box<Select>),
}

/// An INSERT statement.
///
/// Several `values` rows compile to one multi-row VALUES clause, or to
/// `INSERT ALL` on vendors without multi-row VALUES. An
/// [`Expr::Unassigned`] value takes the indirection of its column.
#[derive(Debug, Clone)]
pub struct Insert {
    table: TableRef,
    columns: Vec<ColumnRef>,
    source: Option<Source>,
}

impl Insert {
    /// Starts an INSERT into `table`.
    #[must_use]
    pub fn into(table: &TableRef) -> Self {
        Self {
            table: table.clone(),
            columns: Vec::new(),
            source: None,
        }
    }

    /// Appends target columns by name.
    #[must_use]
    pub fn columns(mut self, names: &[&str]) -> Self {
        self.columns.extend(names.iter().map(|name| col(name)));
        self
    }

    /// Appends a target column, keeping its indirection.
    #[must_use]
    pub fn column(mut self, column: ColumnRef) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds a row of values.
    ///
    /// # Panics
    ///
    /// Panics if columns were given and the row length differs.
    #[must_use]
    pub fn values(mut self, row: impl IntoIterator<Item = Expr>) -> Self {
        let row: Vec<Expr> = row.into_iter().collect();
        assert!(
            self.columns.is_empty() || row.len() == self.columns.len(),
            "row has {} values for {} columns",
            row.len(),
            self.columns.len()
        );
        match &mut self.source {
            Some(Source::Values(rows)) => rows.push(row),
            _ => self.source = Some(Source::Values(vec![row])),
        }
        self
    }

    /// Inserts the rows of `select`.
    #[must_use]
    pub fn select(mut self, select: Select) -> Self {
        self.source = Some(Source::Select(Box::new(select)));
        self
    }

    fn compile_target(&self, c: &mut Compilation<'_>) {
        c.push_identifier(self.table.name());
        if self.columns.is_empty() {
            return;
        }
        c.push(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                c.push(", ");
            }
            c.push_identifier(&column.name);
        }
        c.push(")");
    }

    fn compile_row(&self, row: &[Expr], c: &mut Compilation<'_>) {
        c.push("(");
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                c.push(", ");
            }
            let indirection = self.columns.get(i).and_then(|column| column.indirection.as_deref());
            match (value, indirection) {
                (Expr::Unassigned, Some(expr)) => expr.compile_to(c),
                _ => value.compile_to(c),
            }
        }
        c.push(")");
    }
}

impl CompileSql for Insert {
    fn compile_to(&self, c: &mut Compilation<'_>) {
        c.register_target(&self.table);
        match &self.source {
            Some(Source::Values(rows))
                if rows.len() > 1 && !c.dialect().supports_multi_row_insert() =>
            {
                c.push("INSERT ALL");
                for row in rows {
                    c.push(" INTO ");
                    self.compile_target(c);
                    c.push(" VALUES ");
                    self.compile_row(row, c);
                }
                c.push(" SELECT 1 FROM DUAL");
            }
            Some(Source::Values(rows)) => {
                c.push("INSERT INTO ");
                self.compile_target(c);
                c.push(" VALUES ");
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        c.push(", ");
                    }
                    self.compile_row(row, c);
                }
            }
            Some(Source::Select(select)) => {
                c.push("INSERT INTO ");
                self.compile_target(c);
                c.push(" ");
                select.compile_to(c);
            }
            None => {
                c.push("INSERT INTO ");
                self.compile_target(c);
                c.push(" DEFAULT VALUES");
            }
        }
    }
}
