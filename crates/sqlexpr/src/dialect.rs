//! Dialect contracts: type-level descriptors binding a SQL engine family to
//! its legal bound-parameter types and result row shape.
//!
//! Expressions are branded with a dialect type parameter, so combining
//! fragments built for two different concrete engines is a compile error.
//! The unconstrained [`Any`] dialect composes with everything; crossing from
//! [`Any`] back into a concrete dialect checks the runtime origin tag and
//! fails with [`DialectMismatch`](crate::ExprError::DialectMismatch) if the
//! fragment was erased from a different engine.

use std::fmt;

use crate::value::Value;

/// Static descriptor for one SQL engine family.
///
/// Dialects are never instantiated; they exist only as type tags fixed at
/// the point a driver binding is chosen.
pub trait Dialect {
    /// Lowercase engine family name, e.g. `"sqlite"`. Consistent across
    /// different drivers for the same engine.
    const NAME: &'static str;

    /// Runtime origin tag stamped on expressions built under this dialect.
    ///
    /// `None` means the expression carries no engine-specific text and may
    /// be spliced anywhere. Only [`Any`] overrides the default.
    const ORIGIN: Option<&'static str> = Some(Self::NAME);

    /// Bound-parameter representation accepted by this engine's drivers.
    type Value: Clone + fmt::Debug;

    /// Shape of one result row produced by this engine's drivers.
    type Row;

    /// Write the positional placeholder for the 1-based parameter `index`.
    fn write_placeholder(out: &mut String, index: usize) {
        let _ = index;
        out.push('?');
    }
}

/// The unconstrained dialect: no engine chosen yet.
///
/// Expressions built under `Any` contain only caller-supplied text and
/// primitive parameters, so they are compatible with every concrete dialect.
#[derive(Debug)]
pub enum Any {}

impl Dialect for Any {
    const NAME: &'static str = "any";
    const ORIGIN: Option<&'static str> = None;
    type Value = Value;
    type Row = Vec<Value>;
}

/// The SQLite engine family.
pub enum Sqlite {}

impl Dialect for Sqlite {
    const NAME: &'static str = "sqlite";
    type Value = SqliteValue;
    type Row = Vec<SqliteValue>;
}

/// A bound parameter legal under SQLite: one of the engine's five storage
/// classes. Booleans bind as integers 0/1, matching SQLite's own model.
#[derive(Debug, Clone, PartialEq)]
pub enum SqliteValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<bool> for SqliteValue {
    fn from(v: bool) -> Self {
        Self::Integer(v.into())
    }
}

impl From<i32> for SqliteValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<i64> for SqliteValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for SqliteValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for SqliteValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqliteValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for SqliteValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl From<&[u8]> for SqliteValue {
    fn from(v: &[u8]) -> Self {
        Self::Blob(v.to_vec())
    }
}

impl<T: Into<SqliteValue>> From<Option<T>> for SqliteValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<Value> for SqliteValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Integer(b.into()),
            Value::Int(i) => Self::Integer(i),
            Value::Float(f) => Self::Real(f),
            Value::Text(s) => Self::Text(s),
            Value::Blob(b) => Self::Blob(b),
        }
    }
}

impl From<SqliteValue> for Value {
    fn from(v: SqliteValue) -> Self {
        match v {
            SqliteValue::Null => Self::Null,
            SqliteValue::Integer(i) => Self::Int(i),
            SqliteValue::Real(f) => Self::Float(f),
            SqliteValue::Text(s) => Self::Text(s),
            SqliteValue::Blob(b) => Self::Blob(b),
        }
    }
}
