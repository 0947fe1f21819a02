//! Error types for sqlexpr

use thiserror::Error;

/// Result type alias for expression construction.
pub type ExprResult<T> = Result<T, ExprError>;

/// Construction-time failures.
///
/// Every failure aborts construction of the whole top-level expression; no
/// partial [`SqlExpr`](crate::SqlExpr) is ever returned. Messages name the
/// offending identifier or value and the rule it violated.
#[derive(Debug, Error)]
pub enum ExprError {
    /// Identifier failed a hard precondition (e.g. an embedded NUL byte).
    #[error("invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// Non-bareword identifier with the weird-names option disabled.
    #[error("weird SQL identifier {name:?}, encoded as {encoded}, is not allowed")]
    WeirdIdentifier { name: String, encoded: String },

    /// Reserved-prefix identifier with the internal-names option disabled.
    #[error("internal SQLite identifier {name:?} is not allowed")]
    InternalIdentifier { name: String },

    /// An interpolated value resolved to neither a parameter nor an expression.
    #[error("attempted to interpolate unsupported value into SQL: {0}")]
    UnsupportedInterpolation(String),

    /// A conversion chain did not terminate within the resolver's depth cap.
    #[error("interpolation did not resolve within {max_depth} conversion steps")]
    InterpolationDepth { max_depth: usize },

    /// Two concretely different dialects met in one construction.
    #[error(
        "dialect mismatch: expression built for '{found}' cannot be spliced into a '{expected}' expression"
    )]
    DialectMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Fragment/parameter count invariant violated.
    #[error(
        "malformed expression: {fragments} literal fragment(s) with {params} parameter(s); fragments must equal parameters + 1"
    )]
    MalformedExpression { fragments: usize, params: usize },
}

impl ExprError {
    /// Create an invalid-identifier error.
    pub fn invalid_identifier(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported-interpolation error.
    ///
    /// Custom [`ToInterp`](crate::ToInterp) implementations return this when
    /// a value has no parameter or expression form.
    pub fn unsupported(value: impl Into<String>) -> Self {
        Self::UnsupportedInterpolation(value.into())
    }

    /// Check if this is a dialect mismatch error.
    pub fn is_dialect_mismatch(&self) -> bool {
        matches!(self, Self::DialectMismatch { .. })
    }
}
