//! Validation of column defaults against their declared types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::query::SqlValue;
use crate::schema::{Bound, Column, DefaultValue, TypeSpec};

/// A validated default, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DefaultSql {
    /// Rendered through the dialect's literal rules.
    Literal(SqlValue),
    /// Emitted verbatim.
    Raw(String),
}

/// Checks `column.default` against the column type and bounds.
pub(crate) fn validate_default(table: &str, column: &Column) -> Result<Option<DefaultSql>> {
    let Some(default) = &column.default else {
        return Ok(None);
    };
    let target = format!("{table}.{}", column.name);
    let invalid = |reason: String| Error::InvalidDefault {
        target: target.clone(),
        reason,
    };

    let value = match (default, &column.type_spec) {
        (DefaultValue::Expression(expr), _) => return Ok(Some(DefaultSql::Raw(expr.clone()))),
        (DefaultValue::Null, _) => {
            if !column.nullable {
                return Err(invalid(String::from("NULL default on a NOT NULL column")));
            }
            SqlValue::Null
        }
        (DefaultValue::Boolean(b), TypeSpec::Boolean) => SqlValue::Bool(*b),
        (DefaultValue::Integer(n), spec) if spec.is_numeric() => {
            check_number(spec, &n.to_string()).map_err(invalid)?;
            SqlValue::Int(*n)
        }
        (DefaultValue::Float(f), spec) if spec.is_numeric() => {
            if !f.is_finite() {
                return Err(invalid(format!("{f} is not a finite number")));
            }
            check_number(spec, &f.to_string()).map_err(invalid)?;
            SqlValue::Float(*f)
        }
        (DefaultValue::Decimal(text), spec) if spec.is_numeric() => {
            check_number(spec, text).map_err(invalid)?;
            SqlValue::Decimal(text.clone())
        }
        (DefaultValue::String(s), TypeSpec::Char { length } | TypeSpec::Varchar { length }) => {
            let chars = s.chars().count();
            if chars > *length as usize {
                return Err(invalid(format!("{chars} characters exceed length {length}")));
            }
            SqlValue::Text(s.clone())
        }
        (DefaultValue::String(s), TypeSpec::Clob) => SqlValue::Text(s.clone()),
        (DefaultValue::String(s), TypeSpec::Enum { values }) => {
            if !values.contains(s) {
                return Err(invalid(format!("'{s}' is not one of the enum literals")));
            }
            SqlValue::Text(s.clone())
        }
        (DefaultValue::String(s), TypeSpec::Date) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(SqlValue::Date)
            .map_err(|e| invalid(format!("'{s}' is not a date: {e}")))?,
        (DefaultValue::String(s), TypeSpec::Time) => NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .map(SqlValue::Time)
            .map_err(|e| invalid(format!("'{s}' is not a time: {e}")))?,
        (DefaultValue::String(s), TypeSpec::DateTime) => parse_timestamp(s)
            .map(SqlValue::Timestamp)
            .map_err(|e| invalid(format!("'{s}' is not a timestamp: {e}")))?,
        (other, spec) => {
            return Err(invalid(format!(
                "{} default does not match column type {spec:?}",
                kind(other)
            )));
        }
    };

    check_bounds(column, &value).map_err(invalid)?;
    Ok(Some(DefaultSql::Literal(value)))
}

fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
}

const fn kind(default: &DefaultValue) -> &'static str {
    match default {
        DefaultValue::Null => "NULL",
        DefaultValue::Boolean(_) => "boolean",
        DefaultValue::Integer(_) => "integer",
        DefaultValue::Float(_) => "float",
        DefaultValue::Decimal(_) => "decimal",
        DefaultValue::String(_) => "string",
        DefaultValue::Expression(_) => "expression",
    }
}

/// Digits of a decimal literal.
struct DecimalText {
    negative: bool,
    integer_digits: u32,
    fraction_digits: u32,
}

impl DecimalText {
    fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if (int.is_empty() && frac.is_empty())
            || !int.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        let int = int.trim_start_matches('0');
        let frac = frac.trim_end_matches('0');
        Some(Self {
            negative: negative && !(int.is_empty() && frac.is_empty()),
            integer_digits: u32::try_from(int.len()).ok()?,
            fraction_digits: u32::try_from(frac.len()).ok()?,
        })
    }
}

fn check_number(spec: &TypeSpec, text: &str) -> std::result::Result<(), String> {
    let number = DecimalText::parse(text).ok_or_else(|| format!("'{text}' is not a number"))?;
    if number.negative && spec.is_unsigned() {
        return Err(format!("{text} is negative but the column is unsigned"));
    }
    match spec {
        TypeSpec::Integer { precision, .. } => {
            if number.fraction_digits > 0 {
                return Err(format!("{text} is not a whole number"));
            }
            if let Some(p) = precision {
                if number.integer_digits > *p {
                    return Err(format!("{text} has more than {p} digits"));
                }
            }
        }
        TypeSpec::Decimal {
            precision: Some(p),
            scale,
            ..
        } => {
            let s = scale.unwrap_or(0);
            if number.fraction_digits > s {
                return Err(format!("{text} has more than {s} fractional digits"));
            }
            if number.integer_digits > p.saturating_sub(s) {
                return Err(format!("{text} does not fit precision {p} and scale {s}"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn check_bounds(column: &Column, value: &SqlValue) -> std::result::Result<(), String> {
    #[allow(clippy::cast_precision_loss)]
    let measured = match value {
        SqlValue::Text(s) if column.type_spec.is_textual() => s.chars().count() as f64,
        other => match other.as_f64() {
            Some(n) => n,
            None => return Ok(()),
        },
    };
    let below = |b: Bound| measured < b.as_f64();
    let above = |b: Bound| measured > b.as_f64();
    if let Some(min) = column.min.filter(|b| below(*b)) {
        return Err(format!("value is below the minimum {min}"));
    }
    if let Some(max) = column.max.filter(|b| above(*b)) {
        return Err(format!("value is above the maximum {max}"));
    }
    Ok(())
}
