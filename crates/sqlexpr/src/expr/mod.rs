//! Composable SQL expressions.
//!
//! [`SqlExpr`] is the immutable result type: ordered literal SQL fragments
//! interleaved with ordered bound parameters. [`SqlBuilder`] composes them
//! incrementally; [`build`] is the one-shot entry point taking literal
//! segments and interpolated values as plain sequences.
//!
//! # Example
//!
//! ```
//! use sqlexpr::{Sqlite, SqlBuilder};
//!
//! let mut q = SqlBuilder::<Sqlite>::new("SELECT * FROM users WHERE id = ");
//! q.push_bind(42_i64);
//! let expr = q.finish();
//!
//! assert_eq!(expr.to_sql(), "SELECT * FROM users WHERE id = ?");
//! assert_eq!(expr.params().len(), 1);
//! ```

mod builder;
mod interp;

#[cfg(test)]
mod tests;

pub use builder::{SqlBuilder, build};
pub use interp::{Interp, MAX_RESOLVE_DEPTH, ToInterp};

use std::marker::PhantomData;

use crate::dialect::{Any, Dialect};
use crate::error::{ExprError, ExprResult};
use crate::value::Value;

/// An immutable, parameter-safe SQL expression.
///
/// Holds `n + 1` literal SQL text fragments and `n` bound parameters: the
/// rendered SQL is `fragments[0] ? fragments[1] ? ... fragments[n]` with one
/// positional placeholder at each split point and the parameters supplied to
/// the driver in the same order. Bound values never appear in the literal
/// text, so caller data cannot become SQL syntax.
pub struct SqlExpr<D: Dialect = Any> {
    literal_sql: Vec<String>,
    params: Vec<D::Value>,
    origin: Option<&'static str>,
    _dialect: PhantomData<D>,
}

impl<D: Dialect> SqlExpr<D> {
    /// Create a single-fragment, zero-parameter expression from raw SQL.
    ///
    /// The text is emitted verbatim; keeping it syntactically valid is the
    /// caller's responsibility. Never pass untrusted data here; bind it as a
    /// parameter instead.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            literal_sql: vec![sql.into()],
            params: Vec::new(),
            origin: D::ORIGIN,
            _dialect: PhantomData,
        }
    }

    /// Assemble an expression from pre-split fragments and parameters.
    ///
    /// Checks the fragment/parameter count invariant, which makes this the
    /// safe entry point for values of foreign origin (e.g. deserialized or
    /// hand-built fragment lists).
    pub fn from_parts(literal_sql: Vec<String>, params: Vec<D::Value>) -> ExprResult<Self> {
        if literal_sql.len() != params.len() + 1 {
            return Err(ExprError::MalformedExpression {
                fragments: literal_sql.len(),
                params: params.len(),
            });
        }
        Ok(Self::from_parts_unchecked(literal_sql, params, D::ORIGIN))
    }

    pub(crate) fn from_parts_unchecked(
        literal_sql: Vec<String>,
        params: Vec<D::Value>,
        origin: Option<&'static str>,
    ) -> Self {
        debug_assert_eq!(literal_sql.len(), params.len() + 1);
        Self {
            literal_sql,
            params,
            origin,
            _dialect: PhantomData,
        }
    }

    /// Literal SQL fragments, always one more than the parameter count.
    pub fn literal_sql(&self) -> &[String] {
        &self.literal_sql
    }

    /// Bound parameters in placeholder order.
    pub fn params(&self) -> &[D::Value] {
        &self.params
    }

    /// Name of the concrete dialect this expression was built under, or
    /// `None` if it is engine-agnostic.
    pub fn origin(&self) -> Option<&'static str> {
        self.origin
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<D::Value>, Option<&'static str>) {
        (self.literal_sql, self.params, self.origin)
    }

    /// Render SQL with the dialect's positional placeholders.
    ///
    /// This plus [`params`](SqlExpr::params) is the whole driver boundary:
    /// the driver binds the parameters positionally and executes the text.
    pub fn to_sql(&self) -> String {
        // Pre-size: placeholders are a single byte for most engines.
        let mut cap = self.params.len();
        for frag in &self.literal_sql {
            cap += frag.len();
        }

        let mut out = String::with_capacity(cap);
        for (i, frag) in self.literal_sql.iter().enumerate() {
            if i > 0 {
                D::write_placeholder(&mut out, i);
            }
            out.push_str(frag);
        }
        out
    }

    /// Erase the dialect brand, keeping a runtime origin tag.
    ///
    /// The result composes with any-dialect builders; converting it back to
    /// a *different* concrete dialect fails with
    /// [`DialectMismatch`](ExprError::DialectMismatch).
    pub fn erase(self) -> SqlExpr<Any>
    where
        Value: From<D::Value>,
    {
        SqlExpr {
            literal_sql: self.literal_sql,
            params: self.params.into_iter().map(Value::from).collect(),
            origin: self.origin,
            _dialect: PhantomData,
        }
    }
}

impl SqlExpr<Any> {
    /// Adopt a concrete dialect.
    ///
    /// Succeeds when this expression is engine-agnostic or was erased from
    /// the same dialect; fails with
    /// [`DialectMismatch`](ExprError::DialectMismatch) otherwise.
    pub fn into_dialect<D: Dialect>(self) -> ExprResult<SqlExpr<D>>
    where
        D::Value: From<Value>,
    {
        if let (Some(expected), Some(found)) = (D::ORIGIN, self.origin) {
            if expected != found {
                return Err(ExprError::DialectMismatch { expected, found });
            }
        }
        Ok(SqlExpr {
            literal_sql: self.literal_sql,
            params: self.params.into_iter().map(D::Value::from).collect(),
            origin: D::ORIGIN.or(self.origin),
            _dialect: PhantomData,
        })
    }
}

impl<D: Dialect> Clone for SqlExpr<D> {
    fn clone(&self) -> Self {
        Self {
            literal_sql: self.literal_sql.clone(),
            params: self.params.clone(),
            origin: self.origin,
            _dialect: PhantomData,
        }
    }
}

impl<D: Dialect> std::fmt::Debug for SqlExpr<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlExpr")
            .field("dialect", &D::NAME)
            .field("literal_sql", &self.literal_sql)
            .field("params", &self.params)
            .finish()
    }
}

impl<D: Dialect> PartialEq for SqlExpr<D>
where
    D::Value: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.literal_sql == other.literal_sql && self.params == other.params
    }
}
