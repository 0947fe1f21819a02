//! Safe SQL identifier encoding for SQLite.
//!
//! Identifiers (table/column/schema names) cannot be bound parameters, so a
//! dynamic name must be quoted into literal SQL text. [`encode_identifier`]
//! produces a single-fragment, zero-parameter [`SqlExpr`] holding the quoted
//! form, with opt-in policy checks for names that would be suspicious in a
//! schema.
//!
//! # Example
//! ```
//! use sqlexpr::{encode_identifier, IdentOptions};
//!
//! let t = encode_identifier("users", &IdentOptions::default())?;
//! assert_eq!(t.to_sql(), "[users]");
//! # Ok::<(), sqlexpr::ExprError>(())
//! ```

use crate::dialect::Sqlite;
use crate::error::{ExprError, ExprResult};
use crate::expr::SqlExpr;

/// Options controlling which identifiers [`encode_identifier`] accepts.
#[derive(Debug, Clone, Copy)]
pub struct IdentOptions {
    /// Accept names that are not plain barewords (`[A-Za-z_][A-Za-z0-9_]*`).
    /// Default: `true`.
    pub allow_weird: bool,
    /// Accept names with SQLite's reserved `sqlite_` prefix, matched
    /// case-insensitively. Default: `false`.
    pub allow_internal: bool,
}

impl Default for IdentOptions {
    fn default() -> Self {
        Self {
            allow_weird: true,
            allow_internal: false,
        }
    }
}

/// Encode a raw name as a quoted SQLite identifier expression.
///
/// SQLite may read double- and single-quoted tokens as either string
/// literals or identifiers depending on context, so this uses the engine's
/// alternate quoting styles instead: `[name]`, falling back to backticks
/// (with internal backticks doubled) when the name contains `]`.
///
/// Pure function; the result is a single literal fragment with no bound
/// parameters.
pub fn encode_identifier(name: &str, opts: &IdentOptions) -> ExprResult<SqlExpr<Sqlite>> {
    if name.contains('\0') {
        return Err(ExprError::invalid_identifier(
            name,
            "contains a NUL (\\x00) byte",
        ));
    }
    // The lossy-encoding precondition is discharged by the type system:
    // &str is valid UTF-8 by construction.

    let encoded = if !name.contains(']') {
        format!("[{name}]")
    } else {
        let mut out = String::with_capacity(name.len() + 2);
        out.push('`');
        for ch in name.chars() {
            if ch == '`' {
                out.push('`');
            }
            out.push(ch);
        }
        out.push('`');
        out
    };

    // Every identifier gets quoted, so keywords are fine; a name that
    // syntactically *requires* quoting is flagged as weird.
    if !is_bareword(name) {
        if !opts.allow_weird {
            return Err(ExprError::WeirdIdentifier {
                name: name.to_string(),
                encoded,
            });
        }
        tracing::trace!(name, encoded = %encoded, "quoted non-bareword identifier");
    }

    // Names beginning with "sqlite_" (upper, lower or mixed case) are
    // reserved for the engine's internal schema objects.
    if has_internal_prefix(name) && !opts.allow_internal {
        return Err(ExprError::InternalIdentifier {
            name: name.to_string(),
        });
    }

    Ok(SqlExpr::raw(encoded))
}

fn is_bareword(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn has_internal_prefix(name: &str) -> bool {
    name.get(..7)
        .is_some_and(|p| p.eq_ignore_ascii_case("sqlite_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permissive() -> IdentOptions {
        IdentOptions::default()
    }

    #[test]
    fn plain_name_uses_brackets() {
        let e = encode_identifier("Users", &permissive()).unwrap();
        assert_eq!(e.literal_sql(), ["[Users]"]);
        assert!(e.params().is_empty());
    }

    #[test]
    fn closing_bracket_switches_to_backticks() {
        let e = encode_identifier("a]b", &permissive()).unwrap();
        assert_eq!(e.to_sql(), "`a]b`");
    }

    #[test]
    fn backticks_are_doubled_in_backtick_style() {
        let e = encode_identifier("a]`b", &permissive()).unwrap();
        assert_eq!(e.to_sql(), "`a]``b`");
    }

    #[test]
    fn backtick_without_bracket_stays_in_brackets() {
        let e = encode_identifier("a`b", &permissive()).unwrap();
        assert_eq!(e.to_sql(), "[a`b]");
    }

    #[test]
    fn nul_byte_is_rejected() {
        let err = encode_identifier("a\0b", &permissive()).unwrap_err();
        assert!(matches!(err, ExprError::InvalidIdentifier { .. }));
    }

    #[test]
    fn weird_name_rejected_when_disallowed() {
        let opts = IdentOptions {
            allow_weird: false,
            ..permissive()
        };
        let err = encode_identifier("1bad", &opts).unwrap_err();
        match err {
            ExprError::WeirdIdentifier { name, encoded } => {
                assert_eq!(name, "1bad");
                assert_eq!(encoded, "[1bad]");
            }
            other => panic!("expected WeirdIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn weird_name_allowed_by_default() {
        let e = encode_identifier("has space", &permissive()).unwrap();
        assert_eq!(e.to_sql(), "[has space]");
    }

    #[test]
    fn internal_name_rejected_by_default() {
        let err = encode_identifier("sqlite_master", &permissive()).unwrap_err();
        assert!(matches!(err, ExprError::InternalIdentifier { .. }));
    }

    #[test]
    fn internal_prefix_check_is_case_insensitive() {
        assert!(encode_identifier("SQLite_Master", &permissive()).is_err());
    }

    #[test]
    fn internal_name_allowed_when_opted_in() {
        let opts = IdentOptions {
            allow_internal: true,
            ..permissive()
        };
        let e = encode_identifier("sqlite_master", &opts).unwrap();
        assert_eq!(e.to_sql(), "[sqlite_master]");
    }

    #[test]
    fn error_message_names_the_identifier() {
        let opts = IdentOptions {
            allow_weird: false,
            ..permissive()
        };
        let msg = encode_identifier("1bad", &opts).unwrap_err().to_string();
        assert!(msg.contains("1bad"));
        assert!(msg.contains("[1bad]"));
    }
}
