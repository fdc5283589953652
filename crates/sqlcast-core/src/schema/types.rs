//! Abstract column types.

use serde::{Deserialize, Deserializer, Serialize};

/// Vendor independent column type.
///
/// Sizes are expressed the way the schema author thinks about them: integer
/// precision in decimal digits, character lengths in characters. The
/// dialect turns them into the narrowest vendor type that holds the range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeSpec {
    /// Boolean flag.
    Boolean,
    /// Whole number with an optional digit precision.
    Integer {
        /// Decimal digits the column must hold.
        #[serde(default)]
        precision: Option<u32>,
        /// Only non-negative values.
        #[serde(default)]
        unsigned: bool,
    },
    /// Exact numeric.
    Decimal {
        /// Total digits.
        #[serde(default)]
        precision: Option<u32>,
        /// Digits after the decimal point.
        #[serde(default)]
        scale: Option<u32>,
        /// Only non-negative values.
        #[serde(default)]
        unsigned: bool,
    },
    /// Approximate numeric.
    Float {
        /// Double precision instead of single.
        #[serde(default)]
        double: bool,
    },
    /// Fixed length character string.
    Char {
        /// Length in characters.
        length: u32,
    },
    /// Variable length character string.
    Varchar {
        /// Maximum length in characters.
        length: u32,
    },
    /// Fixed length byte string.
    Binary {
        /// Length in bytes.
        length: u32,
    },
    /// Variable length byte string.
    Varbinary {
        /// Maximum length in bytes.
        length: u32,
    },
    /// Large character object.
    Clob,
    /// Large binary object.
    Blob,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    DateTime,
    /// Elapsed time span.
    Interval,
    /// One of a fixed, ordered set of literals.
    Enum {
        /// Allowed literals in declaration order.
        #[serde(deserialize_with = "enum_values")]
        values: Vec<String>,
    },
}

impl TypeSpec {
    /// Integer with the given digit precision.
    #[must_use]
    pub const fn integer(precision: u32) -> Self {
        Self::Integer {
            precision: Some(precision),
            unsigned: false,
        }
    }

    /// Decimal with precision and scale.
    #[must_use]
    pub const fn decimal(precision: u32, scale: u32) -> Self {
        Self::Decimal {
            precision: Some(precision),
            scale: Some(scale),
            unsigned: false,
        }
    }

    /// Variable length string.
    #[must_use]
    pub const fn varchar(length: u32) -> Self {
        Self::Varchar { length }
    }

    /// Enumeration parsed from a space delimited literal list.
    ///
    /// See [`parse_enum_literals`] for the escaping rules.
    #[must_use]
    pub fn enumeration(literals: &str) -> Self {
        Self::Enum {
            values: parse_enum_literals(literals),
        }
    }

    /// Returns true for integer, decimal and float types.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer { .. } | Self::Decimal { .. } | Self::Float { .. }
        )
    }

    /// Returns true for types whose bounds are checked by length.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Char { .. } | Self::Varchar { .. } | Self::Clob)
    }

    /// Returns true if the type carries an unsigned qualifier.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Integer { unsigned: true, .. } | Self::Decimal { unsigned: true, .. }
        )
    }
}

/// Splits a space delimited enumeration literal list.
///
/// An unescaped space separates literals. A backslash escapes the next
/// character, so `\ ` is a literal space and `\\` a literal backslash. A
/// trailing lone backslash is kept as is. The last token is always
/// emitted, even when empty.
///
/// ```
/// use sqlcast_core::schema::parse_enum_literals;
///
/// assert_eq!(parse_enum_literals("a b\\ c d"), vec!["a", "b c", "d"]);
/// ```
#[must_use]
pub fn parse_enum_literals(input: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ' ' => values.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    values.push(current);
    values
}

fn enum_values<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Literal(String),
        List(Vec<String>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Literal(s) => parse_enum_literals(&s),
        Raw::List(values) => values,
    })
}
