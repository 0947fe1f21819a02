//! Interpolation resolution.
//!
//! Every value interpolated into an expression is either a bound parameter,
//! a nested expression, or an object that can convert itself into one of
//! those. Resolution is total: conversion chains that do not terminate
//! within [`MAX_RESOLVE_DEPTH`] steps are a construction failure, never an
//! unbounded recursion.

use super::SqlExpr;
use crate::dialect::{Any, Dialect};
use crate::error::{ExprError, ExprResult};

/// Maximum conversion-chain length the resolver follows before giving up
/// with [`InterpolationDepth`](ExprError::InterpolationDepth).
pub const MAX_RESOLVE_DEPTH: usize = 32;

/// One interpolated value, positioned between two literal segments.
pub enum Interp<D: Dialect = Any> {
    /// A bound parameter.
    Value(D::Value),
    /// A nested expression, spliced in place.
    Expr(SqlExpr<D>),
    /// A deferred conversion, resolved during the build.
    Defer(Box<dyn ToInterp<D>>),
}

impl<D: Dialect> Interp<D> {
    /// Interpolate a value as a bound parameter.
    pub fn bind(value: impl Into<D::Value>) -> Self {
        Self::Value(value.into())
    }

    /// Interpolate a convertible object, resolved when the expression is built.
    pub fn defer(value: impl ToInterp<D> + 'static) -> Self {
        Self::Defer(Box::new(value))
    }
}

impl<D: Dialect> From<SqlExpr<D>> for Interp<D> {
    fn from(expr: SqlExpr<D>) -> Self {
        Self::Expr(expr)
    }
}

/// Conversion capability: a type that knows how to render itself as an
/// interpolated value.
///
/// Conversions may chain (the result may itself be [`Interp::Defer`]); the
/// resolver unwraps at most [`MAX_RESOLVE_DEPTH`] layers. A type with no
/// parameter or expression form returns
/// [`ExprError::unsupported`] rather than inventing a stringified fallback.
pub trait ToInterp<D: Dialect> {
    fn to_interp(&self) -> ExprResult<Interp<D>>;
}

impl<D: Dialect> ToInterp<D> for SqlExpr<D> {
    fn to_interp(&self) -> ExprResult<Interp<D>> {
        Ok(Interp::Expr(self.clone()))
    }
}

/// A fully resolved interpolated value.
pub(crate) enum Resolved<D: Dialect> {
    Value(D::Value),
    Expr(SqlExpr<D>),
}

/// Resolve an interpolated value, unwrapping deferred conversions.
pub(crate) fn resolve<D: Dialect>(mut value: Interp<D>) -> ExprResult<Resolved<D>> {
    for _ in 0..MAX_RESOLVE_DEPTH {
        match value {
            Interp::Value(v) => return Ok(Resolved::Value(v)),
            Interp::Expr(e) => return Ok(Resolved::Expr(e)),
            Interp::Defer(obj) => value = obj.to_interp()?,
        }
    }
    Err(ExprError::InterpolationDepth {
        max_depth: MAX_RESOLVE_DEPTH,
    })
}
