use super::*;
use crate::dialect::{Any, Dialect, Sqlite, SqliteValue};
use crate::error::{ExprError, ExprResult};
use crate::ident::{IdentOptions, encode_identifier};
use crate::value::Value;

/// A second concrete dialect, for cross-engine checks.
enum Memdb {}

impl Dialect for Memdb {
    const NAME: &'static str = "memdb";
    type Value = Value;
    type Row = Vec<Value>;
}

fn frags(expr: &SqlExpr<impl Dialect>) -> Vec<&str> {
    expr.literal_sql().iter().map(String::as_str).collect()
}

#[test]
fn builds_placeholders_in_order() {
    let mut q = SqlBuilder::<Sqlite>::new("SELECT * FROM users WHERE a = ");
    q.push_bind(1_i64).push(" AND b = ").push_bind("x");
    let e = q.finish();

    assert_eq!(e.to_sql(), "SELECT * FROM users WHERE a = ? AND b = ?");
    assert_eq!(
        e.params(),
        [SqliteValue::Integer(1), SqliteValue::Text("x".into())]
    );
}

#[test]
fn every_construction_upholds_the_count_invariant() {
    let mut q = SqlBuilder::<Sqlite>::empty();
    q.push("a = ").push_bind(1_i64).push(" AND b = ").push_bind(2_i64);
    let e = q.finish();
    assert_eq!(e.literal_sql().len(), e.params().len() + 1);

    let ident = encode_identifier("t", &IdentOptions::default()).unwrap();
    assert_eq!(ident.literal_sql().len(), ident.params().len() + 1);
    assert!(ident.params().is_empty());
}

#[test]
fn from_parts_rejects_count_mismatch() {
    let err = SqlExpr::<Sqlite>::from_parts(
        vec!["a".into(), "b".into()],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ExprError::MalformedExpression {
            fragments: 2,
            params: 0
        }
    ));
}

#[test]
fn nested_expression_flattens_without_a_seam() {
    let x = encode_identifier("x", &IdentOptions::default()).unwrap();
    let y = encode_identifier("y", &IdentOptions::default()).unwrap();
    let inner = build(
        ["SELECT id FROM ", " WHERE ", " = ", ""],
        [
            Interp::from(x),
            Interp::from(y),
            Interp::bind("param"),
        ],
    )
    .unwrap();

    let outer = build(["SELECT * FROM ", ""], [Interp::from(inner)]).unwrap();

    // Literal text merges across the splice boundary; no empty-parameter seam.
    assert_eq!(
        frags(&outer),
        ["SELECT * FROM SELECT id FROM [x] WHERE [y] = ", ""]
    );
    assert_eq!(outer.params(), [SqliteValue::Text("param".into())]);
}

#[test]
fn splice_preserves_parameter_order() {
    let mut inner = SqlBuilder::<Sqlite>::new("b = ");
    inner.push_bind(2_i64);
    let inner = inner.finish();

    let mut q = SqlBuilder::<Sqlite>::new("a = ");
    q.push_bind(1_i64);
    q.push(" AND ");
    q.push_expr(inner).unwrap();
    q.push(" AND c = ");
    q.push_bind(3_i64);
    let e = q.finish();

    assert_eq!(e.to_sql(), "a = ? AND b = ? AND c = ?");
    assert_eq!(
        e.params(),
        [
            SqliteValue::Integer(1),
            SqliteValue::Integer(2),
            SqliteValue::Integer(3)
        ]
    );
}

#[test]
fn reflattening_a_flat_expression_is_idempotent() {
    let flat = build(
        ["SELECT * FROM t WHERE a = ", " AND b = ", ""],
        [Interp::<Sqlite>::bind(1_i64), Interp::bind("x")],
    )
    .unwrap();

    let rewrapped = build(["", ""], [Interp::from(flat.clone())]).unwrap();
    assert_eq!(rewrapped, flat);
}

#[test]
fn build_rejects_segment_value_count_mismatch() {
    let err = build(["a", "b", "c"], [Interp::<Sqlite>::bind(1_i64)]).unwrap_err();
    assert!(matches!(err, ExprError::MalformedExpression { .. }));
}

#[test]
fn deferred_conversion_resolves_to_a_parameter() {
    struct UserId(i64);

    impl ToInterp<Sqlite> for UserId {
        fn to_interp(&self) -> ExprResult<Interp<Sqlite>> {
            Ok(Interp::bind(self.0))
        }
    }

    let e = build(["id = ", ""], [Interp::defer(UserId(7))]).unwrap();
    assert_eq!(e.to_sql(), "id = ?");
    assert_eq!(e.params(), [SqliteValue::Integer(7)]);
}

#[test]
fn deferred_conversion_may_resolve_to_an_expression() {
    struct UserTable;

    impl ToInterp<Sqlite> for UserTable {
        fn to_interp(&self) -> ExprResult<Interp<Sqlite>> {
            Ok(Interp::Expr(encode_identifier(
                "users",
                &IdentOptions::default(),
            )?))
        }
    }

    let e = build(["SELECT * FROM ", ""], [Interp::defer(UserTable)]).unwrap();
    assert_eq!(e.to_sql(), "SELECT * FROM [users]");
    assert!(e.params().is_empty());
}

#[test]
fn unconvertible_value_fails_without_stringifying() {
    struct Opaque;

    impl ToInterp<Sqlite> for Opaque {
        fn to_interp(&self) -> ExprResult<Interp<Sqlite>> {
            Err(ExprError::unsupported("Opaque"))
        }
    }

    let err = build(["v = ", ""], [Interp::defer(Opaque)]).unwrap_err();
    assert!(matches!(err, ExprError::UnsupportedInterpolation(_)));
}

#[test]
fn cyclic_conversion_chain_hits_the_depth_cap() {
    struct Loops;

    impl ToInterp<Sqlite> for Loops {
        fn to_interp(&self) -> ExprResult<Interp<Sqlite>> {
            Ok(Interp::defer(Loops))
        }
    }

    let err = build(["v = ", ""], [Interp::defer(Loops)]).unwrap_err();
    assert!(matches!(
        err,
        ExprError::InterpolationDepth {
            max_depth: MAX_RESOLVE_DEPTH
        }
    ));
}

#[test]
fn bind_list_renders_commas() {
    let mut q = SqlBuilder::<Sqlite>::new("SELECT * FROM users WHERE id IN (");
    q.push_bind_list([1_i64, 2, 3]).push(")");
    let e = q.finish();
    assert_eq!(e.to_sql(), "SELECT * FROM users WHERE id IN (?, ?, ?)");
    assert_eq!(e.params().len(), 3);
}

#[test]
fn bind_list_empty_is_valid_sql() {
    let mut q = SqlBuilder::<Sqlite>::new("SELECT * FROM users WHERE id IN (");
    q.push_bind_list(Vec::<i64>::new()).push(")");
    let e = q.finish();
    assert_eq!(e.to_sql(), "SELECT * FROM users WHERE id IN (NULL)");
    assert!(e.params().is_empty());
}

#[test]
fn push_ident_composes_with_binds() {
    let mut q = SqlBuilder::<Sqlite>::new("SELECT * FROM ");
    q.push_ident("users", &IdentOptions::default()).unwrap();
    q.push(" WHERE id = ").push_bind(1_i64);
    let e = q.finish();
    assert_eq!(e.to_sql(), "SELECT * FROM [users] WHERE id = ?");
}

#[test]
fn push_ident_propagates_policy_failures() {
    let mut q = SqlBuilder::<Sqlite>::empty();
    assert!(q.push_ident("sqlite_master", &IdentOptions::default()).is_err());
}

#[test]
fn any_dialect_fragment_splices_into_sqlite() {
    let mut cond = SqlBuilder::<Any>::new("status = ");
    cond.push_bind("active");
    let cond = cond.finish().into_dialect::<Sqlite>().unwrap();

    let mut q = SqlBuilder::<Sqlite>::new("SELECT * FROM users WHERE ");
    q.push_expr(cond).unwrap();
    let e = q.finish();

    assert_eq!(e.to_sql(), "SELECT * FROM users WHERE status = ?");
    assert_eq!(e.params(), [SqliteValue::Text("active".into())]);
}

#[test]
fn erased_expression_remembers_its_origin() {
    let e = SqlBuilder::<Sqlite>::new("1").finish().erase();
    assert_eq!(e.origin(), Some("sqlite"));
    assert!(e.into_dialect::<Sqlite>().is_ok());
}

#[test]
fn erased_expression_rejects_a_different_dialect() {
    let e = SqlBuilder::<Memdb>::new("1").finish().erase();
    let err = e.into_dialect::<Sqlite>().unwrap_err();
    assert!(err.is_dialect_mismatch());
}

#[test]
fn any_builder_rejects_mixed_concrete_origins() {
    let from_sqlite = SqlBuilder::<Sqlite>::new("a").finish().erase();
    let from_memdb = SqlBuilder::<Memdb>::new("b").finish().erase();

    let mut q = SqlBuilder::<Any>::empty();
    q.push_expr(from_sqlite).unwrap();
    let err = q.push_expr(from_memdb).unwrap_err();
    assert!(err.is_dialect_mismatch());
}

#[test]
fn bool_binds_as_integer_under_sqlite() {
    let mut q = SqlBuilder::<Any>::new("flag = ");
    q.push_bind(true);
    let e = q.finish().into_dialect::<Sqlite>().unwrap();
    assert_eq!(e.params(), [SqliteValue::Integer(1)]);
}

#[test]
fn none_binds_as_null() {
    let mut q = SqlBuilder::<Sqlite>::new("v = ");
    q.push_bind(None::<i64>);
    let e = q.finish();
    assert_eq!(e.params(), [SqliteValue::Null]);
}

#[test]
fn raw_expression_renders_verbatim() {
    let e = SqlExpr::<Sqlite>::raw("SELECT 1");
    assert_eq!(e.to_sql(), "SELECT 1");
    assert_eq!(frags(&e), ["SELECT 1"]);
}
