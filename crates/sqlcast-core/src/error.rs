//! Error types for schema resolution and SQL generation.

use crate::dialect::Vendor;

/// Errors raised while resolving a schema or compiling it for a vendor.
///
/// Configuration errors describe a schema that is wrong regardless of the
/// target vendor. Capability and bounds errors describe a schema that is
/// valid in the abstract but cannot be realized on one particular vendor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The vendor name is not present in the registry.
    #[error("Unsupported vendor '{0}'")]
    UnsupportedVendor(String),

    /// Two tables share the same name.
    #[error("Duplicate table '{0}'")]
    DuplicateTable(String),

    /// A table declares (or inherits) the same column twice.
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn {
        /// Owning table.
        table: String,
        /// Repeated column name.
        column: String,
    },

    /// A reference names a table that is not part of the schema.
    #[error("Table '{table}' references unknown table '{referenced}'")]
    UnknownTable {
        /// Referencing table.
        table: String,
        /// Missing table.
        referenced: String,
    },

    /// A constraint, index or key names a column the table does not have.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn {
        /// Table searched.
        table: String,
        /// Missing column.
        column: String,
    },

    /// Foreign keys (or inheritance) form a cycle.
    #[error("Circular dependency starting at table '{table}': {}", .cycle.join(" -> "))]
    CircularDependency {
        /// First table of the cycle.
        table: String,
        /// Tables on the cycle, in dependency order, starting and ending at `table`.
        cycle: Vec<String>,
    },

    /// A primary key includes a nullable column.
    #[error("Primary key column '{table}.{column}' must not be nullable")]
    NullablePrimaryKey {
        /// Owning table.
        table: String,
        /// Nullable key column.
        column: String,
    },

    /// A default value does not fit the column it is declared on.
    #[error("Invalid default for '{target}': {reason}")]
    InvalidDefault {
        /// `table.column`.
        target: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// Decimal scale greater than its precision.
    #[error("Scale {scale} exceeds precision {precision} for '{target}'")]
    ScaleExceedsPrecision {
        /// `table.column`.
        target: String,
        /// Declared precision.
        precision: u32,
        /// Declared scale.
        scale: u32,
    },

    /// Any other structural problem in the schema.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// The vendor cannot express a requested feature.
    #[error("{vendor} does not support {feature}")]
    Unsupported {
        /// Target vendor.
        vendor: Vendor,
        /// Human readable feature description.
        feature: String,
    },

    /// A declared size exceeds what the vendor allows.
    #[error("{what} {value} for '{target}' exceeds the {vendor} maximum of {max}")]
    Bounds {
        /// Target vendor.
        vendor: Vendor,
        /// `table.column`.
        target: String,
        /// Which size was violated (precision, scale, length).
        what: &'static str,
        /// Requested value.
        value: u32,
        /// Vendor maximum.
        max: u32,
    },
}

impl Error {
    /// Returns true for errors caused by the schema itself rather than by the
    /// chosen vendor.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::UnsupportedVendor(_) | Self::Unsupported { .. } | Self::Bounds { .. }
        )
    }

    pub(crate) fn unsupported(vendor: Vendor, feature: impl Into<String>) -> Self {
        Self::Unsupported {
            vendor,
            feature: feature.into(),
        }
    }
}

/// Result type for schema and compilation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let err = Error::CircularDependency {
            table: String::from("a"),
            cycle: vec![String::from("a"), String::from("b"), String::from("a")],
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency starting at table 'a': a -> b -> a"
        );
    }

    #[test]
    fn test_bounds_display() {
        let err = Error::Bounds {
            vendor: Vendor::Oracle,
            target: String::from("doc.body"),
            what: "varchar length",
            value: 5000,
            max: 4000,
        };
        assert_eq!(
            err.to_string(),
            "varchar length 5000 for 'doc.body' exceeds the oracle maximum of 4000"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::DuplicateTable(String::from("t")).is_configuration());
        assert!(Error::InvalidSchema(String::from("x")).is_configuration());
        assert!(!Error::UnsupportedVendor(String::from("x")).is_configuration());
    }
}
