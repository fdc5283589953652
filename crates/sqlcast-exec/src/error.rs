//! Error types for statement execution.

/// Errors that can occur while executing statements.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Database error reported by the driver.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema or compilation error raised before execution.
    #[error("Compilation error: {0}")]
    Compile(#[from] sqlcast_core::Error),

    /// A statement failed; carries its SQL for context.
    #[error("Statement {index} failed ({sql}): {source}")]
    Statement {
        /// Zero-based position of the statement in the run.
        index: usize,
        /// SQL text of the failing statement.
        sql: String,
        /// Underlying failure.
        #[source]
        source: Box<ExecError>,
    },

    /// A prepared statement received the wrong number of parameters.
    #[error("Statement expects {expected} parameters, got {actual}")]
    ParameterCount {
        /// Number of parameters already seen for this batch.
        expected: usize,
        /// Number of parameters supplied.
        actual: usize,
    },
}

impl ExecError {
    /// Returns the driver error at the root of this error, if any.
    #[must_use]
    pub fn database(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Database(e) => Some(e),
            Self::Statement { source, .. } => source.database(),
            _ => None,
        }
    }
}

/// Result type for execution operations.
pub type Result<T> = std::result::Result<T, ExecError>;
