//! Value expressions.

use std::ops::{Add, Div, Mul, Sub};

use super::compilation::{Compilation, CompileSql};
use super::condition::{CompareOp, Condition};
use super::select::Select;
use super::subject::SubjectId;
use super::value::{SqlValue, ToSqlValue};
use crate::dialect::ConcatStyle;

/// Creates an unqualified column reference.
#[must_use]
pub fn col(name: &str) -> ColumnRef {
    ColumnRef {
        subject: None,
        name: String::from(name),
        indirection: None,
    }
}

/// Calls a SQL function.
#[must_use]
pub fn func(name: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function {
        name: String::from(name),
        args: args.into_iter().collect(),
    }
}

/// `COUNT(*)`.
#[must_use]
pub const fn count_all() -> Expr {
    Expr::CountAll
}

/// `COUNT(expr)`.
#[must_use]
pub fn count(expr: impl IntoExpr) -> Expr {
    func("COUNT", [expr.into_expr()])
}

/// `SUM(expr)`.
#[must_use]
pub fn sum(expr: impl IntoExpr) -> Expr {
    func("SUM", [expr.into_expr()])
}

/// String concatenation, spelled per vendor.
#[must_use]
pub fn concat(parts: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Concat(parts.into_iter().collect())
}

/// A column, optionally bound to a FROM subject.
#[derive(Debug, Clone)]
pub struct ColumnRef {
    /// Owning subject; rendered through its alias.
    pub subject: Option<SubjectId>,
    /// Column name.
    pub name: String,
    /// Expression used in place of an unassigned value.
    pub indirection: Option<Box<Expr>>,
}

impl ColumnRef {
    /// Sets the expression compiled whenever an unassigned value meets
    /// this column.
    #[must_use]
    pub fn with_indirection(mut self, expr: impl IntoExpr) -> Self {
        self.indirection = Some(Box::new(expr.into_expr()));
        self
    }
}

impl CompileSql for ColumnRef {
    fn compile_to(&self, c: &mut Compilation<'_>) {
        if let Some(id) = self.subject {
            let alias = c.alias(id);
            c.push(&alias);
            c.push(".");
        }
        c.push_identifier(&self.name);
    }
}

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl ArithOp {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => " * ",
            Self::Div => " / ",
        }
    }
}

/// A value expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Column reference.
    Column(ColumnRef),
    /// Scalar, inlined or bound depending on the compile mode.
    Value(SqlValue),
    /// A value left to the column's indirection, NULL without one.
    Unassigned,
    /// Scalar sub-select.
    Subquery(Box<Select>),
    /// Function call.
    Function {
        /// Function name, emitted verbatim.
        name: String,
        /// Arguments.
        args: Vec<Expr>,
    },
    /// `COUNT(*)`.
    CountAll,
    /// Arithmetic.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: ArithOp,
        /// Right operand.
        right: Box<Expr>,
    },
    /// String concatenation.
    Concat(Vec<Expr>),
}

impl Expr {
    fn binary(self, op: ArithOp, right: impl IntoExpr) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right.into_expr()),
        }
    }
}

fn compile_arith_operand(operand: &Expr, c: &mut Compilation<'_>) {
    if matches!(operand, Expr::Binary { .. }) {
        c.push("(");
        operand.compile_to(c);
        c.push(")");
    } else {
        operand.compile_to(c);
    }
}

fn compile_list(items: &[Expr], c: &mut Compilation<'_>) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            c.push(", ");
        }
        item.compile_to(c);
    }
}

impl CompileSql for Expr {
    fn compile_to(&self, c: &mut Compilation<'_>) {
        match self {
            Self::Column(column) => column.compile_to(c),
            Self::Value(value) => c.push_value(value),
            Self::Unassigned => c.push("NULL"),
            Self::Subquery(select) => {
                c.push("(");
                select.compile_to(c);
                c.push(")");
            }
            Self::Function { name, args } => {
                c.push(name);
                c.push("(");
                compile_list(args, c);
                c.push(")");
            }
            Self::CountAll => c.push("COUNT(*)"),
            Self::Binary { left, op, right } => {
                compile_arith_operand(left, c);
                c.push(op.as_sql());
                compile_arith_operand(right, c);
            }
            Self::Concat(parts) => match c.dialect().concat_style() {
                ConcatStyle::Operator(op) => {
                    for (i, part) in parts.iter().enumerate() {
                        if i > 0 {
                            c.push(" ");
                            c.push(op);
                            c.push(" ");
                        }
                        part.compile_to(c);
                    }
                }
                ConcatStyle::Function(name) => {
                    c.push(name);
                    c.push("(");
                    compile_list(parts, c);
                    c.push(")");
                }
            },
        }
    }
}

/// Conversion into an expression.
pub trait IntoExpr {
    /// Converts into an expression.
    fn into_expr(self) -> Expr;
}

impl<T: ToSqlValue> IntoExpr for T {
    fn into_expr(self) -> Expr {
        Expr::Value(self.to_sql_value())
    }
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for ColumnRef {
    fn into_expr(self) -> Expr {
        Expr::Column(self)
    }
}

impl IntoExpr for Select {
    fn into_expr(self) -> Expr {
        Expr::Subquery(Box::new(self))
    }
}

macro_rules! operand_methods {
    () => {
        /// `self = value`.
        #[must_use]
        pub fn eq(self, value: impl IntoExpr) -> Condition {
            Condition::compare(self, CompareOp::Eq, value)
        }

        /// `self != value`.
        #[must_use]
        pub fn ne(self, value: impl IntoExpr) -> Condition {
            Condition::compare(self, CompareOp::Ne, value)
        }

        /// `self > value`.
        #[must_use]
        pub fn gt(self, value: impl IntoExpr) -> Condition {
            Condition::compare(self, CompareOp::Gt, value)
        }

        /// `self >= value`.
        #[must_use]
        pub fn ge(self, value: impl IntoExpr) -> Condition {
            Condition::compare(self, CompareOp::Ge, value)
        }

        /// `self < value`.
        #[must_use]
        pub fn lt(self, value: impl IntoExpr) -> Condition {
            Condition::compare(self, CompareOp::Lt, value)
        }

        /// `self <= value`.
        #[must_use]
        pub fn le(self, value: impl IntoExpr) -> Condition {
            Condition::compare(self, CompareOp::Le, value)
        }

        /// `self IS NULL`.
        #[must_use]
        pub fn is_null(self) -> Condition {
            Condition::IsNull {
                expr: self.into_expr(),
                negated: false,
            }
        }

        /// `self IS NOT NULL`.
        #[must_use]
        pub fn is_not_null(self) -> Condition {
            Condition::IsNull {
                expr: self.into_expr(),
                negated: true,
            }
        }

        /// `self BETWEEN low AND high`.
        #[must_use]
        pub fn between(self, low: impl IntoExpr, high: impl IntoExpr) -> Condition {
            Condition::Between {
                expr: self.into_expr(),
                low: low.into_expr(),
                high: high.into_expr(),
            }
        }

        /// `self IN (values)`.
        #[must_use]
        pub fn in_list<T: IntoExpr>(self, values: impl IntoIterator<Item = T>) -> Condition {
            Condition::InList {
                expr: self.into_expr(),
                values: values.into_iter().map(IntoExpr::into_expr).collect(),
                negated: false,
            }
        }

        /// `self NOT IN (values)`.
        #[must_use]
        pub fn not_in_list<T: IntoExpr>(self, values: impl IntoIterator<Item = T>) -> Condition {
            Condition::InList {
                expr: self.into_expr(),
                values: values.into_iter().map(IntoExpr::into_expr).collect(),
                negated: true,
            }
        }

        /// `self IN (select)`.
        #[must_use]
        pub fn in_select(self, select: Select) -> Condition {
            Condition::InSelect {
                expr: self.into_expr(),
                select: Box::new(select),
            }
        }

        /// `self LIKE pattern`.
        #[must_use]
        pub fn like(self, pattern: impl IntoExpr) -> Condition {
            Condition::Like {
                expr: self.into_expr(),
                pattern: pattern.into_expr(),
            }
        }
    };
}

impl Expr {
    operand_methods!();
}

impl ColumnRef {
    operand_methods!();
}

macro_rules! arith_ops {
    ($($ty:ty),*) => {$(
        impl<R: IntoExpr> Add<R> for $ty {
            type Output = Expr;

            fn add(self, rhs: R) -> Expr {
                self.into_expr().binary(ArithOp::Add, rhs)
            }
        }

        impl<R: IntoExpr> Sub<R> for $ty {
            type Output = Expr;

            fn sub(self, rhs: R) -> Expr {
                self.into_expr().binary(ArithOp::Sub, rhs)
            }
        }

        impl<R: IntoExpr> Mul<R> for $ty {
            type Output = Expr;

            fn mul(self, rhs: R) -> Expr {
                self.into_expr().binary(ArithOp::Mul, rhs)
            }
        }

        impl<R: IntoExpr> Div<R> for $ty {
            type Output = Expr;

            fn div(self, rhs: R) -> Expr {
                self.into_expr().binary(ArithOp::Div, rhs)
            }
        }
    )*};
}

arith_ops!(Expr, ColumnRef);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Vendor;
    use crate::query::CompileMode;

    fn render(vendor: Vendor, expr: &Expr) -> String {
        expr.compile(vendor.dialect(), CompileMode::Literal)
            .sql()
            .to_string()
    }

    #[test]
    fn test_arithmetic_nesting() {
        let expr = (col("a") + 1_i64) * col("b");
        assert_eq!(render(Vendor::Postgres, &expr), "(\"a\" + 1) * \"b\"");
    }

    #[test]
    fn test_concat_per_vendor() {
        let expr = concat([col("first").into_expr(), " ".into_expr(), col("last").into_expr()]);
        assert_eq!(render(Vendor::Postgres, &expr), "\"first\" || ' ' || \"last\"");
        assert_eq!(render(Vendor::SqlServer, &expr), "[first] + ' ' + [last]");
        assert_eq!(render(Vendor::MySql, &expr), "CONCAT(`first`, ' ', `last`)");
    }

    #[test]
    fn test_functions() {
        assert_eq!(render(Vendor::Postgres, &count_all()), "COUNT(*)");
        assert_eq!(render(Vendor::Postgres, &sum(col("total"))), "SUM(\"total\")");
        assert_eq!(
            render(Vendor::Postgres, &func("COALESCE", [col("a").into_expr(), 0_i64.into_expr()])),
            "COALESCE(\"a\", 0)"
        );
    }

    #[test]
    fn test_unassigned_without_indirection_is_null() {
        assert_eq!(render(Vendor::Sqlite, &Expr::Unassigned), "NULL");
    }
}
