// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Tests for composite literal elaboration, indexing, slicing, type
//! assertions, calls and the built-in functions.

mod common;

use common::{sig_of, Env};
use golite_parser::ast::{self, Expr, Stmt};
use golite_parser::Token;
use golite_types::constant::Value;
use golite_types::operand::OperandMode;
use golite_types::typ::BasicType;
use golite_types::ErrCode;
use std::rc::Rc;

#[test]
fn test_slice_literal() {
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let st = env.slice_type_expr(int_ident);
    let (a, b) = (env.int_lit("1"), env.int_lit("2"));
    let e = env.composite_lit(Some(st), vec![a, b]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Value);
    assert!(env.tco.types[x.typ.unwrap()].try_as_slice().is_some());
}

#[test]
fn test_duplicate_index_in_slice_literal() {
    // []int{1: 10, 1: 20}
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let st = env.slice_type_expr(int_ident);
    let (k1, v1) = (env.int_lit("1"), env.int_lit("10"));
    let kv1 = env.key_value(k1, v1);
    let (k2, v2) = (env.int_lit("1"), env.int_lit("20"));
    let kv2 = env.key_value(k2, v2);
    let e = env.composite_lit(Some(st), vec![kv1, kv2]);
    let x = env.check(&e);
    assert!(env.has_error_containing(ErrCode::DuplicateLitKey, "duplicate index 1"));
    assert_eq!(x.mode, OperandMode::Value);
}

#[test]
fn test_open_array_literal_length() {
    // [...]int{1: 10, 1: 20} still has length 2
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let at = env.open_array_type_expr(int_ident);
    let (k1, v1) = (env.int_lit("1"), env.int_lit("10"));
    let kv1 = env.key_value(k1, v1);
    let (k2, v2) = (env.int_lit("1"), env.int_lit("20"));
    let kv2 = env.key_value(k2, v2);
    let e = env.composite_lit(Some(at), vec![kv1, kv2]);
    let x = env.check(&e);
    assert!(env.has_error(ErrCode::DuplicateLitKey));
    let arr = env.tco.types[x.typ.unwrap()].try_as_array().cloned();
    assert_eq!(*arr.expect("array type").len(), Some(2));
}

#[test]
fn test_array_literal_index_out_of_bounds() {
    // [2]int{1, 2, 3}
    let mut env = Env::new();
    let len = env.int_lit("2");
    let int_ident = env.ident("int");
    let at = env.array_type_expr(len, int_ident);
    let (a, b, c) = (env.int_lit("1"), env.int_lit("2"), env.int_lit("3"));
    let e = env.composite_lit(Some(at), vec![a, b, c]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::OversizeArrayLit, "out of bounds"));
}

#[test]
fn test_struct_literal_too_many_values() {
    // struct{a, b int}{1, 2, 3}
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let f = env.field(&["a", "b"], int_ident);
    let st = env.struct_type_expr(vec![f]);
    let (a, b, c) = (env.int_lit("1"), env.int_lit("2"), env.int_lit("3"));
    let e = env.composite_lit(Some(st), vec![a, b, c]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::InvalidStructLit, "too many values"));
}

#[test]
fn test_struct_literal_too_few_values() {
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let f = env.field(&["a", "b"], int_ident);
    let st = env.struct_type_expr(vec![f]);
    let a = env.int_lit("1");
    let e = env.composite_lit(Some(st), vec![a]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::InvalidStructLit, "too few values"));
}

#[test]
fn test_struct_literal_keyed() {
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let f = env.field(&["a", "b"], int_ident);
    let st = env.struct_type_expr(vec![f]);
    let (k, v) = (env.ident("a"), env.int_lit("1"));
    let kv = env.key_value(k, v);
    let e = env.composite_lit(Some(st), vec![kv]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Value);
}

#[test]
fn test_struct_literal_unknown_and_duplicate_fields() {
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let f = env.field(&["a"], int_ident);
    let st = env.struct_type_expr(vec![f]);
    let (k, v) = (env.ident("nope"), env.int_lit("1"));
    let kv = env.key_value(k, v);
    let e = env.composite_lit(Some(st), vec![kv]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::MissingLitField, "unknown field nope"));

    let int_ident = env.ident("int");
    let f = env.field(&["a"], int_ident);
    let st = env.struct_type_expr(vec![f]);
    let (k1, v1) = (env.ident("a"), env.int_lit("1"));
    let kv1 = env.key_value(k1, v1);
    let (k2, v2) = (env.ident("a"), env.int_lit("2"));
    let kv2 = env.key_value(k2, v2);
    let e = env.composite_lit(Some(st), vec![kv1, kv2]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::DuplicateLitField, "duplicate field name a"));
}

#[test]
fn test_struct_literal_mixed_elements() {
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let f = env.field(&["a", "b"], int_ident);
    let st = env.struct_type_expr(vec![f]);
    let (k, v) = (env.ident("a"), env.int_lit("1"));
    let kv = env.key_value(k, v);
    let plain = env.int_lit("2");
    let e = env.composite_lit(Some(st), vec![kv, plain]);
    env.check(&e);
    assert!(env.has_error(ErrCode::MixedStructLit));
}

#[test]
fn test_struct_literal_unexported_foreign_field() {
    // positional assignment to an unexported field of a struct from
    // another package
    let mut env = Env::new();
    let other_pkg = env.tco.new_package("other".to_owned());
    let int_t = env.int_t();
    let fld = env
        .tco
        .new_field(0, Some(other_pkg), "hidden".to_owned(), Some(int_t), false);
    let stype = env.tco.new_t_struct(vec![fld]);
    env.declare_type("T", stype);
    let tname = env.ident("T");
    let v = env.int_lit("1");
    let e = env.composite_lit(Some(tname), vec![v]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::UnexportedLitField, "unexported field hidden"));
}

#[test]
fn test_map_literal_duplicate_keys() {
    // map[interface{}]int{1: 1, 1: 2} has a duplicate key ...
    let mut env = Env::new();
    let iface = env.empty_iface_type_expr();
    let int_ident = env.ident("int");
    let mt = env.map_type_expr(iface, int_ident);
    let (k1, v1) = (env.int_lit("1"), env.int_lit("1"));
    let kv1 = env.key_value(k1, v1);
    let (k2, v2) = (env.int_lit("1"), env.int_lit("2"));
    let kv2 = env.key_value(k2, v2);
    let e = env.composite_lit(Some(mt), vec![kv1, kv2]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::DuplicateLitKey, "duplicate key"));

    // ... but map[interface{}]int{1: 1, int32(1): 2} does not: the
    // dynamic types differ
    let iface = env.empty_iface_type_expr();
    let int_ident = env.ident("int");
    let mt = env.map_type_expr(iface, int_ident);
    let (k1, v1) = (env.int_lit("1"), env.int_lit("1"));
    let kv1 = env.key_value(k1, v1);
    let int32_ident = env.ident("int32");
    let one = env.int_lit("1");
    let k2 = env.call(int32_ident, vec![one]);
    let v2 = env.int_lit("2");
    let kv2 = env.key_value(k2, v2);
    let e = env.composite_lit(Some(mt), vec![kv1, kv2]);
    let n_before = env.err_count();
    env.check(&e);
    assert_eq!(env.err_count(), n_before, "{}", env.dump_errors());
}

#[test]
fn test_map_literal_missing_key() {
    let mut env = Env::new();
    let str_ident = env.ident("string");
    let int_ident = env.ident("int");
    let mt = env.map_type_expr(str_ident, int_ident);
    let v = env.int_lit("1");
    let e = env.composite_lit(Some(mt), vec![v]);
    env.check(&e);
    assert!(env.has_error(ErrCode::MissingLitKey));
}

#[test]
fn test_invalid_composite_literal_type() {
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let v = env.int_lit("1");
    let e = env.composite_lit(Some(int_ident), vec![v]);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidLit, "invalid composite literal type"));
}

#[test]
fn test_missing_composite_literal_type() {
    let mut env = Env::new();
    let v = env.int_lit("1");
    let e = env.composite_lit(None, vec![v]);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::UntypedLit));
}

#[test]
fn test_composite_literal_element_hint() {
    // [][]int{{1, 2}} passes the inner literal its type via the hint
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let inner_t = env.slice_type_expr(int_ident);
    let outer_t = env.slice_type_expr(inner_t);
    let (a, b) = (env.int_lit("1"), env.int_lit("2"));
    let inner = env.composite_lit(None, vec![a, b]);
    let e = env.composite_lit(Some(outer_t), vec![inner]);
    env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
}

#[test]
fn test_string_indexing() {
    let mut env = Env::new();
    let s = env.str_lit("abc");
    let i = env.int_lit("1");
    let e = env.index(s, i);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    // indexing a constant string yields a non-constant byte
    assert_eq!(x.mode, OperandMode::Value);
    assert_eq!(x.typ, Some(env.basic(BasicType::Byte)));

    let s = env.str_lit("abc");
    let i = env.int_lit("5");
    let e = env.index(s, i);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::InvalidIndex, "out of bounds"));
}

#[test]
fn test_map_indexing() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let str_t = env.string_t();
    let map_t = env.tco.new_t_map(str_t, int_t);
    env.declare_var("m", map_t);
    let m = env.ident("m");
    let k = env.str_lit("k");
    let e = env.index(m, k);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::MapIndex);
    assert_eq!(x.typ, Some(int_t));
}

#[test]
fn test_cannot_index() {
    let mut env = Env::new();
    let int_t = env.int_t();
    env.declare_var("i", int_t);
    let i = env.ident("i");
    let idx = env.int_lit("0");
    let e = env.index(i, idx);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::NonIndexableOperand, "cannot index"));
}

#[test]
fn test_three_index_slice_of_string() {
    let mut env = Env::new();
    let str_t = env.string_t();
    env.declare_var("s", str_t);
    let s = env.ident("s");
    let (lo, hi, max) = (env.int_lit("1"), env.int_lit("2"), env.int_lit("3"));
    let e = env.slice(s, Some(lo), Some(hi), Some(max));
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidSliceExpr, "3-index slice of string"));
}

#[test]
fn test_swapped_slice_indices() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let slice_t = env.tco.new_t_slice(int_t);
    env.declare_var("s", slice_t);
    let s = env.ident("s");
    let (lo, hi) = (env.int_lit("5"), env.int_lit("2"));
    let e = env.slice(s, Some(lo), Some(hi), None);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::SwappedSliceIndices, "swapped slice indices: 5 > 2"));
}

#[test]
fn test_slice_of_unaddressable_array() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let arr_t = env.tco.new_t_array(int_t, Some(3));
    let f = sig_of(&mut env.tco, env.pkg, &[], &[arr_t], false);
    let fobj = env.tco.new_func(0, Some(env.pkg), "mk".to_owned(), Some(f));
    let skey = *env.tco.pkgs[env.pkg].scope();
    golite_types::scope::Scope::insert(skey, fobj, &mut env.tco);

    let mk = env.ident("mk");
    let call = env.call(mk, vec![]);
    let (lo, hi) = (env.int_lit("0"), env.int_lit("1"));
    let e = env.slice(call, Some(lo), Some(hi), None);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::NonSliceableOperand, "not addressable"));
}

#[test]
fn test_slicing_array_variable() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let arr_t = env.tco.new_t_array(int_t, Some(3));
    env.declare_var("a", arr_t);
    let a = env.ident("a");
    let (lo, hi) = (env.int_lit("0"), env.int_lit("2"));
    let e = env.slice(a, Some(lo), Some(hi), None);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Value);
    assert!(env.tco.types[x.typ.unwrap()].try_as_slice().is_some());
}

#[test]
fn test_type_assertion() {
    let mut env = Env::new();
    let iface_t = env.tco.new_t_empty_interface();
    env.declare_var("v", iface_t);
    let v = env.ident("v");
    let int_ident = env.ident("int");
    let e = env.type_assert(v, int_ident);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::CommaOk);
    assert_eq!(x.typ, Some(env.int_t()));
}

#[test]
fn test_impossible_type_assertion() {
    let mut env = Env::new();
    // interface{ m() } asserted to a type without method m
    let msig = sig_of(&mut env.tco, env.pkg, &[], &[], false);
    let m = env
        .tco
        .new_func(0, Some(env.pkg), "m".to_owned(), Some(msig));
    let iface_t = env.tco.new_t_interface(vec![m], vec![]);
    env.tco.types[iface_t]
        .try_as_interface_mut()
        .unwrap()
        .set_all_methods(vec![m]);
    env.declare_var("v", iface_t);
    let int_t = env.int_t();
    env.declare_type("T", int_t);

    let v = env.ident("v");
    let tname = env.ident("T");
    let e = env.type_assert(v, tname);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::ImpossibleAssert, "missing method m"));
}

#[test]
fn test_assert_on_non_interface() {
    let mut env = Env::new();
    let int_t = env.int_t();
    env.declare_var("i", int_t);
    let i = env.ident("i");
    let int_ident = env.ident("int");
    let e = env.type_assert(i, int_ident);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidAssert, "not an interface"));
}

#[test]
fn test_len_cap() {
    let mut env = Env::new();
    let len_ident = env.ident("len");
    let s = env.str_lit("abc");
    let e = env.call(len_ident, vec![s]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode.constant_val(), Some(&Value::with_i64(3)));
    assert_eq!(x.typ, Some(env.int_t()));

    let int_t = env.int_t();
    let arr_t = env.tco.new_t_array(int_t, Some(7));
    env.declare_var("a", arr_t);
    let len_ident = env.ident("len");
    let a = env.ident("a");
    let e = env.call(len_ident, vec![a]);
    let x = env.check(&e);
    assert_eq!(x.mode.constant_val(), Some(&Value::with_i64(7)));

    let slice_t = env.tco.new_t_slice(int_t);
    env.declare_var("s", slice_t);
    let cap_ident = env.ident("cap");
    let s = env.ident("s");
    let e = env.call(cap_ident, vec![s]);
    let x = env.check(&e);
    assert_eq!(x.mode, OperandMode::Value);

    // cap is not defined for maps
    let map_t = env.tco.new_t_map(int_t, int_t);
    env.declare_var("m", map_t);
    let cap_ident = env.ident("cap");
    let m = env.ident("m");
    let e = env.call(cap_ident, vec![m]);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::InvalidBuiltinArg));
}

#[test]
fn test_complex_builtin() {
    let mut env = Env::new();
    let complex_ident = env.ident("complex");
    let (re, im) = (env.int_lit("1"), env.int_lit("2"));
    let e = env.call(complex_ident, vec![re, im]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode.constant_val(), Some(&Value::Complex(1.0, 2.0)));
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedComplex)));

    let real_ident = env.ident("real");
    let complex_ident = env.ident("complex");
    let (re, im) = (env.int_lit("1"), env.int_lit("2"));
    let inner = env.call(complex_ident, vec![re, im]);
    let e = env.call(real_ident, vec![inner]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode.constant_val(), Some(&Value::with_f64(1.0)));
}

#[test]
fn test_new_and_make() {
    let mut env = Env::new();
    let new_ident = env.ident("new");
    let int_ident = env.ident("int");
    let e = env.call(new_ident, vec![int_ident]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    let pt = env.tco.types[x.typ.unwrap()].try_as_pointer().cloned();
    assert_eq!(pt.unwrap().base(), env.int_t());

    let make_ident = env.ident("make");
    let int_ident = env.ident("int");
    let st = env.slice_type_expr(int_ident);
    let n = env.int_lit("2");
    let e = env.call(make_ident, vec![st, n]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert!(env.tco.types[x.typ.unwrap()].try_as_slice().is_some());

    // make of a slice needs a length
    let make_ident = env.ident("make");
    let int_ident = env.ident("int");
    let st = env.slice_type_expr(int_ident);
    let e = env.call(make_ident, vec![st]);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::WrongArgCount));
}

#[test]
fn test_delete_builtin() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let str_t = env.string_t();
    let map_t = env.tco.new_t_map(str_t, int_t);
    env.declare_var("m", map_t);
    let delete_ident = env.ident("delete");
    let m = env.ident("m");
    let k = env.str_lit("k");
    let e = env.call(delete_ident, vec![m, k]);
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        let kind = checker.raw_expr(&mut x, &e, None, fctx);
        assert_eq!(kind, golite_types::universe::ExprKind::Statement);
    });
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::NoValue);
}

#[test]
fn test_uncalled_builtin() {
    let mut env = Env::new();
    let e = env.ident("len");
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::UncalledBuiltin, "must be called"));
}

#[test]
fn test_function_calls() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let sig = sig_of(&mut env.tco, env.pkg, &[int_t], &[int_t], false);
    let fobj = env.tco.new_func(0, Some(env.pkg), "f".to_owned(), Some(sig));
    let skey = *env.tco.pkgs[env.pkg].scope();
    golite_types::scope::Scope::insert(skey, fobj, &mut env.tco);

    let f = env.ident("f");
    let a = env.int_lit("1");
    let e = env.call(f, vec![a]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Value);
    assert_eq!(x.typ, Some(int_t));

    // too few arguments
    let f = env.ident("f");
    let e = env.call(f, vec![]);
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::WrongArgCount, "too few arguments"));

    // wrong argument type
    let f = env.ident("f");
    let a = env.str_lit("x");
    let e = env.call(f, vec![a]);
    env.check(&e);
    assert!(env.has_error(ErrCode::IncompatibleAssign));

    // calling a non-function
    let i = env.int_lit("1");
    let one = env.int_lit("1");
    let e = env.call(i, vec![one]);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidCall, "cannot call non-function"));
}

#[test]
fn test_conversion_int_to_string() {
    let mut env = Env::new();
    let string_ident = env.ident("string");
    let r = env.int_lit("65");
    let e = env.call(string_ident, vec![r]);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode.constant_val(), Some(&Value::with_str("A".to_owned())));
}

#[test]
fn test_invalid_conversion() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let slice_t = env.tco.new_t_slice(int_t);
    env.declare_var("s", slice_t);
    let string_ident = env.ident("string");
    let s = env.ident("s");
    let e = env.call(string_ident, vec![s]);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidConversion, "cannot convert"));
}

#[test]
fn test_selector() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let fld = env
        .tco
        .new_field(0, Some(env.pkg), "f".to_owned(), Some(int_t), false);
    let stype = env.tco.new_t_struct(vec![fld]);
    env.declare_var("s", stype);

    let s = env.ident("s");
    let e = env.selector(s, "f");
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Variable);
    assert_eq!(x.typ, Some(int_t));

    let s = env.ident("s");
    let e = env.selector(s, "g");
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(
        ErrCode::MissingFieldOrMethod,
        "no field or method g"
    ));
}

#[test]
fn test_func_literal_body_is_checked_later() {
    let mut env = Env::new();
    // func() { 1 + 2 } — the statement has no effect
    let ft = env.func_type_expr(vec![], vec![]);
    let ftkey = match &ft {
        Expr::Func(k) => *k,
        _ => unreachable!(),
    };
    let (a, b) = (env.int_lit("1"), env.int_lit("2"));
    let sum = env.binary(a, Token::ADD, b);
    let body = Rc::new(ast::BlockStmt::new(
        1,
        vec![Stmt::Expr(Box::new(sum))],
        2,
    ));
    let e = Expr::FuncLit(Rc::new(ast::FuncLit {
        typ: ftkey,
        body: body,
    }));
    let mut x = golite_types::operand::Operand::new();
    let mut checked_before_drain = false;
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &e, fctx);
        // the body has not been checked yet
        checked_before_drain = checker.errors().len() == 0;
    });
    assert!(checked_before_drain);
    assert!(env.has_error_containing(ErrCode::UnusedExpr, "evaluated but not used"));
    assert!(env.tco.types[x.typ.unwrap()].try_as_signature().is_some());
}

#[test]
fn test_func_literal_return_arity() {
    let mut env = Env::new();
    // func() int { return }
    let int_ident = env.ident("int");
    let res = env.field(&[], int_ident);
    let ft = env.func_type_expr(vec![], vec![res]);
    let ftkey = match &ft {
        Expr::Func(k) => *k,
        _ => unreachable!(),
    };
    let ret = Stmt::Return(Rc::new(ast::ReturnStmt {
        ret: 1,
        results: vec![],
    }));
    let body = Rc::new(ast::BlockStmt::new(1, vec![ret], 2));
    let e = Expr::FuncLit(Rc::new(ast::FuncLit {
        typ: ftkey,
        body: body,
    }));
    env.check(&e);
    assert!(env.has_error_containing(ErrCode::WrongResultCount, "wrong number of return values"));
}

#[test]
fn test_tuple_where_single_value_expected() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let sig = sig_of(&mut env.tco, env.pkg, &[], &[int_t, int_t], false);
    let fobj = env.tco.new_func(0, Some(env.pkg), "two".to_owned(), Some(sig));
    let skey = *env.tco.pkgs[env.pkg].scope();
    golite_types::scope::Scope::insert(skey, fobj, &mut env.tco);

    let two = env.ident("two");
    let call = env.call(two, vec![]);
    let one = env.int_lit("1");
    let e = env.binary(call, Token::ADD, one);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::TooManyValues, "single value is expected"));
}

#[test]
fn test_ellipsis_is_rejected_as_expression() {
    let mut env = Env::new();
    let pos = env.pos();
    let e = Expr::new_ellipsis(pos, None);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::BadDotDotDotSyntax));
}

#[test]
fn test_key_value_outside_literal() {
    let mut env = Env::new();
    let (k, v) = (env.int_lit("1"), env.int_lit("2"));
    let e = env.key_value(k, v);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::InvalidAST));
}
