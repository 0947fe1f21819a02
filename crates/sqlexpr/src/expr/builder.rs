//! Incremental expression building.

use std::marker::PhantomData;
use std::mem;

use super::SqlExpr;
use super::interp::{Interp, Resolved, resolve};
use crate::dialect::{Any, Dialect, Sqlite};
use crate::error::{ExprError, ExprResult};
use crate::ident::IdentOptions;

/// A parameter-safe SQL expression builder.
///
/// `SqlBuilder` stores literal text and parameters separately; the finished
/// [`SqlExpr`] satisfies the fragment/parameter count invariant by
/// construction. Raw text pushed after a nested splice continues the same
/// literal fragment, so composition never introduces empty-parameter seams.
///
/// # Example
///
/// ```
/// use sqlexpr::{Sqlite, SqlBuilder};
///
/// let mut q = SqlBuilder::<Sqlite>::new("SELECT * FROM users WHERE status = ");
/// q.push_bind("active");
/// q.push(" AND id IN (");
/// q.push_bind_list([1_i64, 2, 3]);
/// q.push(")");
///
/// let expr = q.finish();
/// assert_eq!(
///     expr.to_sql(),
///     "SELECT * FROM users WHERE status = ? AND id IN (?, ?, ?)"
/// );
/// ```
#[must_use]
#[derive(Debug)]
pub struct SqlBuilder<D: Dialect = Any> {
    /// Completed fragments, one per recorded parameter.
    fragments: Vec<String>,
    /// Literal text accumulated since the last parameter.
    buffer: String,
    params: Vec<D::Value>,
    origin: Option<&'static str>,
    _dialect: PhantomData<D>,
}

impl<D: Dialect> SqlBuilder<D> {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            fragments: Vec::new(),
            buffer: initial_sql.into(),
            params: Vec::new(),
            origin: D::ORIGIN,
            _dialect: PhantomData,
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Append raw SQL (no parameters).
    ///
    /// The text continues the current literal run. It is emitted verbatim;
    /// never pass untrusted data here.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.buffer.push_str(sql);
        self
    }

    /// Append a parameter placeholder and bind its value.
    ///
    /// The parameter splits the current literal run: the running buffer is
    /// flushed as one fragment and accumulation resumes empty.
    pub fn push_bind(&mut self, value: impl Into<D::Value>) -> &mut Self {
        self.fragments.push(mem::take(&mut self.buffer));
        self.params.push(value.into());
        self
    }

    /// Append a comma-separated list of placeholders and bind all values.
    ///
    /// If `values` is empty, this appends `NULL` (so `IN (NULL)` is valid
    /// SQL but never matches any row).
    pub fn push_bind_list<T>(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: Into<D::Value>,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.push("NULL");
        };

        self.push_bind(first);
        for v in iter {
            self.push(", ");
            self.push_bind(v);
        }
        self
    }

    /// Splice another expression in place, consuming it.
    ///
    /// The inner expression's first fragment continues the current literal
    /// run and its parameters append in their original relative order, so
    /// nesting is lossless and introduces no extra placeholder.
    ///
    /// Fails with [`DialectMismatch`](ExprError::DialectMismatch) when an
    /// any-dialect build has already absorbed text from a different concrete
    /// engine than the spliced expression's origin.
    pub fn push_expr(&mut self, expr: SqlExpr<D>) -> ExprResult<&mut Self> {
        let (frags, params, origin) = expr.into_parts();
        self.merge_origin(origin)?;

        let mut frags = frags.into_iter();
        if let Some(first) = frags.next() {
            self.buffer.push_str(&first);
        }
        // Remaining fragments pair one-to-one with the inner parameters.
        for (frag, param) in frags.zip(params) {
            self.fragments.push(mem::take(&mut self.buffer));
            self.params.push(param);
            self.buffer = frag;
        }
        Ok(self)
    }

    /// Append an interpolated value, resolving deferred conversions.
    pub fn push_interp(&mut self, value: Interp<D>) -> ExprResult<&mut Self> {
        match resolve(value)? {
            Resolved::Value(v) => {
                self.fragments.push(mem::take(&mut self.buffer));
                self.params.push(v);
                Ok(self)
            }
            Resolved::Expr(e) => self.push_expr(e),
        }
    }

    /// Bind a parameter and return `self` (consuming version of
    /// [`push_bind`](SqlBuilder::push_bind)), convenient for chaining on
    /// temporary values.
    pub fn bind(mut self, value: impl Into<D::Value>) -> Self {
        self.push_bind(value);
        self
    }

    /// Finish building, producing the immutable expression.
    pub fn finish(mut self) -> SqlExpr<D> {
        self.fragments.push(self.buffer);
        tracing::trace!(
            dialect = D::NAME,
            fragments = self.fragments.len(),
            params = self.params.len(),
            "finished SQL expression"
        );
        SqlExpr::from_parts_unchecked(self.fragments, self.params, self.origin)
    }

    fn merge_origin(&mut self, other: Option<&'static str>) -> ExprResult<()> {
        match (self.origin, other) {
            (Some(expected), Some(found)) if expected != found => {
                Err(ExprError::DialectMismatch { expected, found })
            }
            (None, Some(found)) => {
                self.origin = Some(found);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl SqlBuilder<Sqlite> {
    /// Append a quoted SQLite identifier (table/column) safely.
    ///
    /// Identifiers cannot be bound parameters, so dynamic names go through
    /// [`encode_identifier`](crate::encode_identifier) and land in the
    /// literal text as quoted fragments.
    pub fn push_ident(&mut self, name: &str, opts: &IdentOptions) -> ExprResult<&mut Self> {
        let ident = crate::ident::encode_identifier(name, opts)?;
        self.push_expr(ident)
    }
}

/// Build a flattened expression from ordered literal segments and the
/// interpolated values positioned between them.
///
/// `segments` must contain exactly one more element than `values`; each
/// value sits between two segments. Nested expressions splice in place and
/// deferred conversions resolve during the walk.
///
/// # Example
///
/// ```
/// use sqlexpr::{build, encode_identifier, IdentOptions, Interp};
///
/// let table = encode_identifier("users", &IdentOptions::default())?;
/// let query = build(
///     ["SELECT * FROM ", " WHERE id = ", ""],
///     [Interp::from(table), Interp::bind(42_i64)],
/// )?;
///
/// assert_eq!(query.to_sql(), "SELECT * FROM [users] WHERE id = ?");
/// assert_eq!(query.params().len(), 1);
/// # Ok::<(), sqlexpr::ExprError>(())
/// ```
pub fn build<D, S>(
    segments: impl IntoIterator<Item = S>,
    values: impl IntoIterator<Item = Interp<D>>,
) -> ExprResult<SqlExpr<D>>
where
    D: Dialect,
    S: AsRef<str>,
{
    let segments: Vec<S> = segments.into_iter().collect();
    let values: Vec<Interp<D>> = values.into_iter().collect();
    if segments.len() != values.len() + 1 {
        return Err(ExprError::MalformedExpression {
            fragments: segments.len(),
            params: values.len(),
        });
    }

    let mut builder = SqlBuilder::empty();
    let mut values = values.into_iter();
    for segment in &segments {
        builder.push(segment.as_ref());
        if let Some(value) = values.next() {
            builder.push_interp(value)?;
        }
    }
    Ok(builder.finish())
}
