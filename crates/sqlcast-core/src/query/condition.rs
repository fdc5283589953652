//! Condition trees for WHERE, HAVING and join predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::compilation::{Compilation, CompileSql};
use super::expr::{ColumnRef, Expr, IntoExpr};
use super::select::Select;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl CompareOp {
    /// Returns the SQL operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A boolean condition.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `left op right`.
    Compare {
        /// Left operand.
        left: Expr,
        /// Operator.
        op: CompareOp,
        /// Right operand.
        right: Expr,
    },
    /// `expr IS [NOT] NULL`.
    IsNull {
        /// Tested expression.
        expr: Expr,
        /// IS NOT NULL when set.
        negated: bool,
    },
    /// `expr BETWEEN low AND high`.
    Between {
        /// Tested expression.
        expr: Expr,
        /// Inclusive lower bound.
        low: Expr,
        /// Inclusive upper bound.
        high: Expr,
    },
    /// `expr [NOT] IN (values)`.
    InList {
        /// Tested expression.
        expr: Expr,
        /// Candidate values.
        values: Vec<Expr>,
        /// NOT IN when set.
        negated: bool,
    },
    /// `expr IN (subquery)`.
    InSelect {
        /// Tested expression.
        expr: Expr,
        /// Single column sub-select.
        select: Box<Select>,
    },
    /// `expr LIKE pattern`.
    Like {
        /// Tested expression.
        expr: Expr,
        /// Pattern.
        pattern: Expr,
    },
    /// `EXISTS (subquery)`.
    Exists(Box<Select>),
    /// All operands hold. Empty is true.
    And(Vec<Condition>),
    /// Any operand holds. Empty is false.
    Or(Vec<Condition>),
    /// Negation.
    Not(Box<Condition>),
}

impl Condition {
    /// `left op right`.
    #[must_use]
    pub fn compare(left: impl IntoExpr, op: CompareOp, right: impl IntoExpr) -> Self {
        Self::Compare {
            left: left.into_expr(),
            op,
            right: right.into_expr(),
        }
    }

    /// `EXISTS (select)`.
    #[must_use]
    pub fn exists(select: Select) -> Self {
        Self::Exists(Box::new(select))
    }

    /// Conjunction of every condition.
    #[must_use]
    pub fn all(conditions: impl IntoIterator<Item = Self>) -> Self {
        Self::And(conditions.into_iter().collect())
    }

    /// Disjunction of every condition.
    #[must_use]
    pub fn any(conditions: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(conditions.into_iter().collect())
    }

    /// Combines with AND, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut operands) => {
                operands.push(other);
                Self::And(operands)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Combines with OR, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut operands) => {
                operands.push(other);
                Self::Or(operands)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Negates the condition.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

/// Compiles one side of a comparison, substituting the indirection of the
/// other side's column for an unassigned value.
fn compile_operand(operand: &Expr, other: &Expr, c: &mut Compilation<'_>) {
    match (operand, other) {
        (Expr::Unassigned, Expr::Column(ColumnRef { indirection: Some(expr), .. })) => {
            expr.compile_to(c);
        }
        _ => operand.compile_to(c),
    }
}

fn compile_junction(operands: &[Condition], joiner: &str, empty: &str, c: &mut Compilation<'_>) {
    if operands.is_empty() {
        c.push(empty);
        return;
    }
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            c.push(joiner);
        }
        c.push("(");
        operand.compile_to(c);
        c.push(")");
    }
}

impl CompileSql for Condition {
    fn compile_to(&self, c: &mut Compilation<'_>) {
        match self {
            Self::Compare { left, op, right } => {
                compile_operand(left, right, c);
                c.push(" ");
                c.push(op.as_sql());
                c.push(" ");
                compile_operand(right, left, c);
            }
            Self::IsNull { expr, negated } => {
                expr.compile_to(c);
                c.push(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Self::Between { expr, low, high } => {
                expr.compile_to(c);
                c.push(" BETWEEN ");
                low.compile_to(c);
                c.push(" AND ");
                high.compile_to(c);
            }
            Self::InList {
                expr,
                values,
                negated,
            } => {
                if values.is_empty() {
                    c.push(if *negated { "1 = 1" } else { "1 = 0" });
                    return;
                }
                expr.compile_to(c);
                c.push(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        c.push(", ");
                    }
                    value.compile_to(c);
                }
                c.push(")");
            }
            Self::InSelect { expr, select } => {
                expr.compile_to(c);
                c.push(" IN (");
                select.compile_to(c);
                c.push(")");
            }
            Self::Like { expr, pattern } => {
                expr.compile_to(c);
                c.push(" LIKE ");
                pattern.compile_to(c);
            }
            Self::Exists(select) => {
                c.push("EXISTS (");
                select.compile_to(c);
                c.push(")");
            }
            Self::And(operands) => compile_junction(operands, " AND ", "1 = 1", c),
            Self::Or(operands) => compile_junction(operands, " OR ", "1 = 0", c),
            Self::Not(inner) => {
                c.push("NOT (");
                inner.compile_to(c);
                c.push(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Vendor;
    use crate::query::{col, CompileMode};

    fn literal(condition: &Condition) -> String {
        condition
            .compile(Vendor::Postgres.dialect(), CompileMode::Literal)
            .sql()
            .to_string()
    }

    #[test]
    fn test_compare_ops() {
        assert_eq!(literal(&col("a").eq(1)), "\"a\" = 1");
        assert_eq!(literal(&col("a").ne("x")), "\"a\" != 'x'");
        assert_eq!(literal(&col("a").ge(2.5)), "\"a\" >= 2.5");
        assert_eq!(CompareOp::Le.to_string(), "<=");
    }

    #[test]
    fn test_junctions_parenthesize_operands() {
        let cond = col("a").eq(1).and(col("b").eq(2)).and(col("c").is_null());
        assert_eq!(literal(&cond), "(\"a\" = 1) AND (\"b\" = 2) AND (\"c\" IS NULL)");

        let cond = col("a").eq(1).or(col("b").is_not_null()).not();
        assert_eq!(literal(&cond), "NOT ((\"a\" = 1) OR (\"b\" IS NOT NULL))");
    }

    #[test]
    fn test_empty_junctions() {
        assert_eq!(literal(&Condition::all([])), "1 = 1");
        assert_eq!(literal(&Condition::any([])), "1 = 0");
    }

    #[test]
    fn test_between_in_like() {
        assert_eq!(literal(&col("n").between(1, 5)), "\"n\" BETWEEN 1 AND 5");
        assert_eq!(literal(&col("s").in_list(["a", "b"])), "\"s\" IN ('a', 'b')");
        assert_eq!(literal(&col("s").in_list(Vec::<i64>::new())), "1 = 0");
        assert_eq!(literal(&col("s").like("ab%")), "\"s\" LIKE 'ab%'");
    }

    #[test]
    fn test_unassigned_uses_indirection() {
        let column = col("status").with_indirection("draft");
        let cond = Condition::compare(column.clone(), CompareOp::Eq, Expr::Unassigned);
        assert_eq!(literal(&cond), "\"status\" = 'draft'");

        let cond = Condition::compare(col("status"), CompareOp::Eq, Expr::Unassigned);
        assert_eq!(literal(&cond), "\"status\" = NULL");
    }
}
