//! # sqlexpr
//!
//! Composable, parameter-safe SQL expression building.
//!
//! ## Features
//!
//! - **Injection-proof by construction**: literal SQL text and bound
//!   parameters live in separate ordered lists; caller data can never become
//!   SQL syntax.
//! - **Lossless nesting**: expressions splice into larger expressions in
//!   place, merging literal text across the seam and preserving parameter
//!   order.
//! - **Dialect-tagged**: expressions are branded with a [`Dialect`] type
//!   parameter, so fragments built for different engines cannot be mixed at
//!   compile time; the unconstrained [`Any`] dialect composes with everything
//!   and carries a runtime origin tag for the erased case.
//! - **Safe identifiers**: dynamic table/column names are quoted into
//!   literal text via [`encode_identifier`], never bound as parameters.
//!
//! ## Example
//!
//! ```
//! use sqlexpr::{build, encode_identifier, IdentOptions, Interp};
//!
//! let table = encode_identifier("users", &IdentOptions::default())?;
//! let inner = build(
//!     ["SELECT id FROM ", " WHERE status = ", ""],
//!     [Interp::from(table), Interp::bind("active")],
//! )?;
//!
//! // Nested expressions flatten into one query with a linear parameter list.
//! let query = build(["SELECT count(*) FROM (", ")"], [Interp::from(inner)])?;
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT count(*) FROM (SELECT id FROM [users] WHERE status = ?)"
//! );
//! assert_eq!(query.params().len(), 1);
//! # Ok::<(), sqlexpr::ExprError>(())
//! ```
//!
//! Executing the finished expression belongs to a driver: hand it
//! [`SqlExpr::to_sql`] and [`SqlExpr::params`] and nothing else.

pub mod dialect;
pub mod error;
pub mod expr;
pub mod ident;
pub mod value;

pub use dialect::{Any, Dialect, Sqlite, SqliteValue};
pub use error::{ExprError, ExprResult};
pub use expr::{Interp, MAX_RESOLVE_DEPTH, SqlBuilder, SqlExpr, ToInterp, build};
pub use ident::{IdentOptions, encode_identifier};
pub use value::Value;
