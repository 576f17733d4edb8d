//! Behaviour of typed parameters and their shared entity

use std::collections::HashSet;
use std::ffi::c_void;

use pretty_assertions::assert_eq;
use quickbeam::*;

// ═══════════════════════════════════════════════════════════════════════
// Naming
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_auto_names_are_distinct_across_types() {
    let a = Param::<i32>::new();
    let b = Param::<i32>::new();
    let c = Param::<f64>::new();
    let d = Param::with_value(true);
    let e = Param::with_range(1u8, 0, 2);

    let names: HashSet<&str> = [a.name(), b.name(), c.name(), d.name(), e.name()]
        .into_iter()
        .collect();
    assert_eq!(names.len(), 5);
    assert!(!names.contains(USER_CONTEXT_NAME));
}

#[test]
fn test_reserved_name_fails_for_every_named_constructor() {
    let is_reserved = |err: ParamError| matches!(err, ParamError::ReservedName { .. });

    assert!(is_reserved(Param::<i32>::named(USER_CONTEXT_NAME).unwrap_err()));
    assert!(is_reserved(
        Param::named_with_value(USER_CONTEXT_NAME, 1i32).unwrap_err()
    ));
    assert!(is_reserved(
        Param::named_with_range(USER_CONTEXT_NAME, 1.0f32, 0, 2).unwrap_err()
    ));
    assert!(is_reserved(
        Param::named_with_value(USER_CONTEXT_NAME, std::ptr::null_mut::<c_void>()).unwrap_err()
    ));
    assert!(is_reserved(
        Param::<u8>::named(String::from(USER_CONTEXT_NAME)).unwrap_err()
    ));
}

#[test]
fn test_reserved_name_error_message() {
    let err = Param::<*mut c_void>::named("__user_context").unwrap_err();
    assert!(err.to_string().contains("reserved for the user context"));
}

#[test]
fn test_named_with_value() {
    let p = Param::named_with_value("scale", 2.5f64).unwrap();
    assert_eq!(p.get(), 2.5);
    assert_eq!(p.name(), "scale");
    assert!(p.is_explicit_name());
}

#[test]
fn test_unnamed_is_not_explicit() {
    let p = Param::<u32>::new();
    assert!(!p.is_explicit_name());
    let q = Param::<u32>::default();
    assert!(!q.is_explicit_name());
    assert_ne!(p.name(), q.name());
}

#[test]
fn test_names_similar_to_reserved_are_fine() {
    let p = Param::<i32>::named("__user_context2").unwrap();
    assert_eq!(p.name(), "__user_context2");
    let q = Param::<i32>::named("user_context").unwrap();
    assert_eq!(q.name(), "user_context");
}

// ═══════════════════════════════════════════════════════════════════════
// Range Coercion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_mismatched_bounds_are_cast_once() {
    let p = Param::<f32>::named("alpha").unwrap();
    p.set_range(0, 1i64);

    let min = p.min_value().unwrap();
    let max = p.max_value().unwrap();
    assert_eq!(min.ty(), Type::float(32));
    assert_eq!(max.ty(), Type::float(32));
    assert_eq!(min, Expr::cast(Type::float(32), 0));
    assert_eq!(max, Expr::cast(Type::float(32), 1i64));

    // Re-reading hands back the stored node, not a new cast of it
    let again = p.min_value().unwrap();
    assert!(again.same_as(&min));
    assert_eq!(again.as_cast().unwrap().ty(), Type::int(32));
}

#[test]
fn test_matching_bounds_are_stored_as_is() {
    let p = Param::<i32>::new();
    let bound = Expr::from(10);
    p.set_max_value(&bound);
    assert!(p.max_value().unwrap().same_as(&bound));
}

#[test]
fn test_bound_from_another_param_is_cast() {
    let limit = Param::<i64>::named("limit").unwrap();
    let p = Param::<i32>::named("count").unwrap();
    p.set_max_value(&limit);

    let max = p.max_value().unwrap();
    assert_eq!(max.ty(), Type::int(32));
    let inner = max.as_cast().unwrap().as_variable().unwrap();
    assert_eq!(inner.name, "limit");
}

#[test]
fn test_entity_coerces_bounds_too() {
    let p = Parameter::new(Type::uint(16), false, 0, "raw", true).unwrap();
    p.set_min_value(1.5);
    assert_eq!(p.min_value().unwrap().ty(), Type::uint(16));
}

// ═══════════════════════════════════════════════════════════════════════
// Sharing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_clone_shares_value() {
    let a = Param::<i32>::new();
    a.set(5);
    let b = a.clone();
    b.set(7);
    assert_eq!(a.get(), 7);
    assert!(a.parameter().same_as(b.parameter()));
    assert_eq!(a.name(), b.name());
}

#[test]
fn test_clone_shares_range_and_default() {
    let a = Param::<u8>::named("a").unwrap();
    let b = a.clone();
    b.set_range(1u8, 9u8);
    b.set_default_value(4);
    assert_eq!(a.min_value(), Some(Expr::from(1u8)));
    assert_eq!(a.max_value(), Some(Expr::from(9u8)));
    assert_eq!(a.get(), 4);
}

#[test]
fn test_expr_views_share_entity() {
    let p = Param::<i32>::named("offset").unwrap();
    let first = p.to_expr();
    let second = p.to_expr();

    let e1 = first.as_variable().unwrap().param.clone().unwrap();
    let e2 = second.as_variable().unwrap().param.clone().unwrap();
    assert!(e1.same_as(&e2));
    assert_eq!(first, second);

    p.set_range(-4, 4);
    p.set(3);
    assert_eq!(e1.min_value(), Some(Expr::from(-4)));
    assert_eq!(e2.max_value(), Some(Expr::from(4)));
    assert_eq!(e2.scalar::<i32>().unwrap(), 3);
}

#[test]
fn test_self_bound_holds_record_until_cleared() {
    let p = Param::<i32>::named("cap").unwrap();
    p.set_max_value(&p);
    let entity = p.parameter().clone();
    drop(p);

    assert_eq!(entity.handle_count(), 2);
    let max = entity.max_value().unwrap();
    assert!(max.as_variable().unwrap().param.as_ref().unwrap().same_as(&entity));
    drop(max);

    entity.clear_max_value();
    assert_eq!(entity.handle_count(), 1);
}

#[test]
fn test_expr_outlives_facade() {
    let expr = {
        let p = Param::named_with_range("temp", 1.0f64, 0.0, 2.0).unwrap();
        p.to_expr()
    };
    let param = expr.as_variable().unwrap().param.as_ref().unwrap();
    assert_eq!(param.name(), "temp");
    assert_eq!(param.handle_count(), 1);
    assert_eq!(param.scalar::<f64>().unwrap(), 1.0);
    assert_eq!(param.max_value(), Some(Expr::from(2.0)));
}

// ═══════════════════════════════════════════════════════════════════════
// Compiled Arguments
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_argument_descriptor() {
    let p = Param::with_range(6u16, 0, 100);
    let arg = p.to_argument();
    assert_eq!(arg.kind, ArgumentKind::InputScalar);
    assert_eq!(arg.ty, Type::uint(16));
    assert_eq!(arg.dimensions, 0);
    assert_eq!(arg.name, p.name());
    assert_eq!(arg.value, Some(Expr::from(6u16)));
    assert_eq!(arg.min.as_ref().map(Expr::ty), Some(Type::uint(16)));
    assert_eq!(arg.max.as_ref().map(Expr::ty), Some(Type::uint(16)));
}

#[test]
fn test_argument_for_handle_param() {
    let p = Param::<*const c_void>::named("table").unwrap();
    let arg = Argument::from(&p);
    assert!(arg.is_scalar());
    assert_eq!(arg.ty, Type::handle());
    assert_eq!(arg.value, Some(Expr::uint_imm(Type::handle(), 0)));
    assert!(arg.min.is_none());
    assert!(arg.max.is_none());
}

#[test]
fn test_argument_equality_is_reflexive_for_nan() {
    let p = Param::named_with_value("ratio", f32::NAN).unwrap();
    let arg = p.to_argument();
    assert_eq!(arg, arg.clone());
    assert_eq!(p.to_argument(), p.to_argument());
}

#[test]
fn test_signature_from_params() {
    let w = Param::<i32>::named("w").unwrap();
    let h = Param::<i32>::named("h").unwrap();
    let sig = Signature::build(SignatureOptions::default(), [w.to_argument(), h.to_argument()])
        .unwrap();
    assert_eq!(sig.names().collect::<Vec<_>>(), vec!["w", "h"]);

    let dup = Signature::build(SignatureOptions::default(), [w.to_argument(), w.to_argument()]);
    assert!(matches!(dup, Err(ParamError::DuplicateArgument { .. })));
}

// ═══════════════════════════════════════════════════════════════════════
// Extern Arguments and User Context
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_extern_argument_wraps_expr() {
    let p = Param::<f32>::named("sigma").unwrap();
    let arg = p.to_extern_argument();
    assert!(arg.is_expr());
    let var = arg.as_expr().unwrap().as_variable().unwrap();
    assert_eq!(var.name, "sigma");
    assert!(var.param.as_ref().unwrap().same_as(p.parameter()));
}

#[test]
fn test_user_context_value_bypasses_reservation() {
    let ctx = user_context_value();
    let var = ctx.as_variable().unwrap();
    assert_eq!(var.name, USER_CONTEXT_NAME);
    assert_eq!(var.ty, Type::handle());
    assert_eq!(ExternFuncArgument::from(ctx.clone()).as_expr(), Some(&ctx));
}
