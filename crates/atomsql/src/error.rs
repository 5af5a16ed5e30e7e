//! Error types for atomsql

use thiserror::Error;

/// Result type alias for atomsql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Validation failures raised while compiling a statement.
///
/// Every variant is produced synchronously, before any SQL text is returned.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A `$and` / `$or` / `$nor` key whose value is not a sequence
    #[error("Root operator '{operator}' must have an array as value")]
    InvalidRootOperatorValue { operator: String },

    /// A filter operator set (or root-operator sequence) with nothing in it
    #[error("Cannot compare '{column}' to an empty filter value")]
    EmptyFilterValue { column: String },

    /// An operator key outside the supported set
    #[error("Invalid filter operator: {0}")]
    InvalidFilterOperator(String),

    /// ORDER BY column failed the identifier whitelist
    #[error("Invalid column name in ORDER BY: \"{0}\"")]
    InvalidOrderColumn(String),

    /// ORDER BY direction other than `asc` / `desc`
    #[error("Invalid direction in ORDER BY for \"{column}\": \"{direction}\"")]
    InvalidOrderDirection { column: String, direction: String },

    /// LIMIT clause that is not `n`, `n, m` or `n OFFSET m`
    #[error("Invalid LIMIT clause: \"{0}\"")]
    InvalidLimit(String),

    /// A leaf value with no formatting rule
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// Identifier that cannot be emitted (projection entries)
    #[error("Invalid identifier: \"{0}\"")]
    InvalidIdentifier(String),

    /// Statement input that cannot produce valid SQL
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// Where tree deeper than the configured limit
    #[error("Where filter nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },

    /// Unfiltered UPDATE/DELETE rejected by policy
    #[error("SQL policy violation: {0}")]
    PolicyViolation(String),

    /// JSON input could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SqlError {
    /// Create an empty-filter error for a column
    pub fn empty_filter(column: impl Into<String>) -> Self {
        Self::EmptyFilterValue {
            column: column.into(),
        }
    }

    /// Create a root-operator error
    pub fn invalid_root(operator: impl Into<String>) -> Self {
        Self::InvalidRootOperatorValue {
            operator: operator.into(),
        }
    }

    /// Create an unsupported-value error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedValueType(message.into())
    }

    /// Create an invalid-statement error
    pub fn invalid_statement(message: impl Into<String>) -> Self {
        Self::InvalidStatement(message.into())
    }

    /// Check if this error was raised by ORDER BY validation
    pub fn is_order_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOrderColumn(_) | Self::InvalidOrderDirection { .. }
        )
    }

    /// Check if this error was raised by LIMIT validation
    pub fn is_limit_error(&self) -> bool {
        matches!(self, Self::InvalidLimit(_))
    }
}
