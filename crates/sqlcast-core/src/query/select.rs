//! SELECT statements.

use super::compilation::{Compilation, CompileSql};
use super::condition::Condition;
use super::expr::{Expr, IntoExpr};
use super::subject::Subject;

/// Join flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
    /// `CROSS JOIN`
    Cross,
}

impl JoinKind {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => " INNER JOIN ",
            Self::Left => " LEFT JOIN ",
            Self::Right => " RIGHT JOIN ",
            Self::Cross => " CROSS JOIN ",
        }
    }
}

/// A joined subject.
#[derive(Debug, Clone)]
pub struct Join {
    kind: JoinKind,
    subject: Subject,
    on: Option<Condition>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

#[derive(Debug, Clone)]
struct Projection {
    expr: Expr,
    alias: Option<String>,
}

/// A SELECT query.
///
/// Subjects are aliased `t0`, `t1`, ... in the order they are first
/// referenced during compilation; nested selects share the numbering.
#[derive(Debug, Clone, Default)]
pub struct Select {
    distinct: bool,
    projections: Vec<Projection>,
    from: Option<Subject>,
    joins: Vec<Join>,
    where_clause: Option<Condition>,
    group_by: Vec<Expr>,
    having: Option<Condition>,
    order_by: Vec<(Expr, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    /// Creates an empty SELECT; without projections it selects `*`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds a projection.
    #[must_use]
    pub fn column(mut self, expr: impl IntoExpr) -> Self {
        self.projections.push(Projection {
            expr: expr.into_expr(),
            alias: None,
        });
        self
    }

    /// Adds an aliased projection.
    #[must_use]
    pub fn column_as(mut self, expr: impl IntoExpr, alias: &str) -> Self {
        self.projections.push(Projection {
            expr: expr.into_expr(),
            alias: Some(String::from(alias)),
        });
        self
    }

    /// Sets the FROM subject.
    #[must_use]
    pub fn from(mut self, subject: impl Into<Subject>) -> Self {
        self.from = Some(subject.into());
        self
    }

    /// Adds a join.
    #[must_use]
    pub fn join(
        mut self,
        kind: JoinKind,
        subject: impl Into<Subject>,
        on: Option<Condition>,
    ) -> Self {
        self.joins.push(Join {
            kind,
            subject: subject.into(),
            on,
        });
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn inner_join(self, subject: impl Into<Subject>, on: Condition) -> Self {
        self.join(JoinKind::Inner, subject, Some(on))
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, subject: impl Into<Subject>, on: Condition) -> Self {
        self.join(JoinKind::Left, subject, Some(on))
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, subject: impl Into<Subject>, on: Condition) -> Self {
        self.join(JoinKind::Right, subject, Some(on))
    }

    /// Adds a CROSS JOIN.
    #[must_use]
    pub fn cross_join(self, subject: impl Into<Subject>) -> Self {
        self.join(JoinKind::Cross, subject, None)
    }

    /// Adds a WHERE condition, AND-ed with any previous one.
    #[must_use]
    pub fn where_clause(mut self, condition: Condition) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    /// Adds a GROUP BY expression.
    #[must_use]
    pub fn group_by(mut self, expr: impl IntoExpr) -> Self {
        self.group_by.push(expr.into_expr());
        self
    }

    /// Adds a HAVING condition, AND-ed with any previous one.
    #[must_use]
    pub fn having(mut self, condition: Condition) -> Self {
        self.having = Some(match self.having.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    /// Adds an ORDER BY expression.
    #[must_use]
    pub fn order_by(mut self, expr: impl IntoExpr, order: Order) -> Self {
        self.order_by.push((expr.into_expr(), order));
        self
    }

    /// Limits the number of rows.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips rows.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

fn compile_subject(subject: &Subject, c: &mut Compilation<'_>) {
    match subject {
        Subject::Table(table) => c.push_identifier(table.name()),
        Subject::Derived(derived) => {
            c.push("(");
            derived.select().compile_to(c);
            c.push(")");
        }
    }
    let alias = c.alias(subject.id());
    c.push(" ");
    c.push(&alias);
}

impl CompileSql for Select {
    fn compile_to(&self, c: &mut Compilation<'_>) {
        c.push("SELECT ");
        if self.distinct {
            c.push("DISTINCT ");
        }
        if self.projections.is_empty() {
            c.push("*");
        }
        for (i, projection) in self.projections.iter().enumerate() {
            if i > 0 {
                c.push(", ");
            }
            projection.expr.compile_to(c);
            if let Some(alias) = &projection.alias {
                c.push(" AS ");
                c.push_identifier(alias);
            }
        }

        if let Some(from) = &self.from {
            c.push(" FROM ");
            compile_subject(from, c);
        }
        for join in &self.joins {
            c.push(join.kind.as_sql());
            compile_subject(&join.subject, c);
            if let Some(on) = &join.on {
                c.push(" ON ");
                on.compile_to(c);
            }
        }

        if let Some(condition) = &self.where_clause {
            c.push(" WHERE ");
            condition.compile_to(c);
        }

        for (i, expr) in self.group_by.iter().enumerate() {
            c.push(if i == 0 { " GROUP BY " } else { ", " });
            expr.compile_to(c);
        }
        if let Some(condition) = &self.having {
            c.push(" HAVING ");
            condition.compile_to(c);
        }

        for (i, (expr, order)) in self.order_by.iter().enumerate() {
            c.push(if i == 0 { " ORDER BY " } else { ", " });
            expr.compile_to(c);
            if *order == Order::Desc {
                c.push(" DESC");
            }
        }

        let limit = c
            .dialect()
            .limit_clause(self.limit, self.offset, !self.order_by.is_empty());
        c.push(&limit);
    }
}
