// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Tests for operator checking, constant folding and the untyped
//! constant subsystem.

mod common;

use common::Env;
use golite_parser::ast::Node;
use golite_parser::Token;
use golite_types::constant::Value;
use golite_types::operand::OperandMode;
use golite_types::typ::BasicType;
use golite_types::universe::Sizes;
use golite_types::ErrCode;

#[test]
fn test_untyped_int_literal() {
    let mut env = Env::new();
    let e = env.int_lit("42");
    let x = env.check(&e);
    assert!(matches!(x.mode, OperandMode::Constant(_)));
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedInt)));
    assert_eq!(x.mode.constant_val(), Some(&Value::with_i64(42)));
    assert_eq!(env.err_count(), 0);
}

#[test]
fn test_const_shift_remains_untyped() {
    // 1 << 100 is an exact untyped constant
    let mut env = Env::new();
    let (a, b) = (env.int_lit("1"), env.int_lit("100"));
    let e = env.binary(a, Token::SHL, b);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedInt)));
    let want = Value::shift(&Value::with_i64(1), &Token::SHL, 100);
    assert_eq!(x.mode.constant_val(), Some(&want));
}

#[test]
fn test_shift_overflow_guard() {
    // the bit length of an untyped constant is bounded
    let mut env = Env::new();
    let (a, b) = (env.int_lit("1"), env.int_lit("600"));
    let e = env.binary(a, Token::SHL, b);
    let x = env.check(&e);
    assert!(env.has_error_containing(ErrCode::InvalidConstVal, "constant shift overflow"));
    assert_eq!(x.mode.constant_val(), Some(&Value::Unknown));
}

#[test]
fn test_numeric_overflow_int8() {
    // var y int8 = 200
    let mut env = Env::new();
    let lit = env.int_lit("200");
    let int8 = env.basic(BasicType::Int8);
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &lit, fctx);
        checker.assignment(&mut x, Some(int8), "variable declaration", fctx);
    });
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::NumericOverflow, "overflows int8"));
}

#[test]
fn test_truncated_float() {
    // var z int = 1.5
    let mut env = Env::new();
    let lit = env.float_lit("1.5");
    let int_t = env.int_t();
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &lit, fctx);
        checker.assignment(&mut x, Some(int_t), "variable declaration", fctx);
    });
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::TruncatedFloat, "truncated to int"));
}

#[test]
fn test_unsigned_complement_uses_sizing_oracle() {
    // ^uint(0) == 1<<64 - 1 with 8 byte words
    let mut env = Env::new();
    let uint_ident = env.ident("uint");
    let zero = env.int_lit("0");
    let conv = env.call(uint_ident, vec![zero]);
    let e = env.unary(Token::XOR, conv);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.typ, Some(env.basic(BasicType::Uint)));
    assert_eq!(x.mode.constant_val(), Some(&Value::with_u64(u64::MAX)));

    // and 1<<32 - 1 with 4 byte words
    let mut env = Env::with_sizes(Sizes::new(4));
    let uint_ident = env.ident("uint");
    let zero = env.int_lit("0");
    let conv = env.call(uint_ident, vec![zero]);
    let e = env.unary(Token::XOR, conv);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode.constant_val(), Some(&Value::with_u64(u32::MAX as u64)));
}

#[test]
fn test_division_by_zero() {
    let mut env = Env::new();
    let (a, b) = (env.int_lit("1"), env.int_lit("0"));
    let e = env.binary(a, Token::QUO, b);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::DivByZero));
}

#[test]
fn test_integer_division_is_exact() {
    let mut env = Env::new();
    let (a, b) = (env.int_lit("7"), env.int_lit("2"));
    let e = env.binary(a, Token::QUO, b);
    let x = env.check(&e);
    assert_eq!(x.mode.constant_val(), Some(&Value::with_i64(3)));

    // while float division is not
    let (a, b) = (env.float_lit("7.0"), env.int_lit("2"));
    let e = env.binary(a, Token::QUO, b);
    let x = env.check(&e);
    assert_eq!(x.mode.constant_val(), Some(&Value::with_f64(3.5)));
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedFloat)));
}

#[test]
fn test_nil_comparison_undefined() {
    let mut env = Env::new();
    let (a, b) = (env.ident("nil"), env.ident("nil"));
    let e = env.binary(a, Token::EQL, b);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(
        ErrCode::UndefinedOp,
        "operator == not defined for untyped nil"
    ));
}

#[test]
fn test_nil_comparison_with_channel() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let chan_t = env.tco.new_t_chan(golite_types::typ::ChanDir::SendRecv, int_t);
    env.declare_var("ch", chan_t);
    let (a, b) = (env.ident("ch"), env.ident("nil"));
    let e = env.binary(a, Token::EQL, b);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Value);
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedBool)));
}

#[test]
fn test_constant_comparison() {
    let mut env = Env::new();
    let (a, b) = (env.int_lit("1"), env.int_lit("2"));
    let e = env.binary(a, Token::LSS, b);
    let x = env.check(&e);
    assert_eq!(x.mode.constant_val(), Some(&Value::Bool(true)));
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedBool)));
}

#[test]
fn test_comparison_finalizes_operand_types() {
    // in i < 2, the literal 2 is materialized as an int
    let mut env = Env::new();
    let int_t = env.int_t();
    env.declare_var("i", int_t);
    let (a, b) = (env.ident("i"), env.int_lit("2"));
    let lit_id = b.id();
    let e = env.binary(a, Token::LSS, b);
    let (x, info) = env.check_with_info(&e);
    assert_eq!(x.mode, OperandMode::Value);
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedBool)));
    let tv = info.types.get(&lit_id).expect("literal type not recorded");
    assert_eq!(tv.typ, int_t);
}

#[test]
fn test_mismatched_types() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let float_t = env.basic(BasicType::Float64);
    env.declare_var("i", int_t);
    env.declare_var("f", float_t);
    let (a, b) = (env.ident("i"), env.ident("f"));
    let e = env.binary(a, Token::ADD, b);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::MismatchedTypes));
}

#[test]
fn test_string_concatenation() {
    let mut env = Env::new();
    let (a, b) = (env.str_lit("foo"), env.str_lit("bar"));
    let e = env.binary(a, Token::ADD, b);
    let x = env.check(&e);
    assert_eq!(
        x.mode.constant_val(),
        Some(&Value::with_str("foobar".to_owned()))
    );
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedString)));
}

#[test]
fn test_remainder_undefined_for_floats() {
    let mut env = Env::new();
    let (a, b) = (env.float_lit("1.0"), env.int_lit("2"));
    let e = env.binary(a, Token::REM, b);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::UndefinedOp, "operator % not defined"));
}

#[test]
fn test_untyped_widening() {
    // 1 + 2.5 widens the int operand to untyped float
    let mut env = Env::new();
    let (a, b) = (env.int_lit("1"), env.float_lit("2.5"));
    let e = env.binary(a, Token::ADD, b);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedFloat)));
    assert_eq!(x.mode.constant_val(), Some(&Value::with_f64(3.5)));
}

#[test]
fn test_rune_arithmetic() {
    // 'a' + 1 keeps the rune flavor
    let mut env = Env::new();
    let (a, b) = (env.char_lit('a'), env.int_lit("1"));
    let e = env.binary(a, Token::ADD, b);
    let x = env.check(&e);
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedRune)));
    assert_eq!(x.mode.constant_val(), Some(&Value::with_i64('b' as i64)));
}

#[test]
fn test_complex_literal_arithmetic() {
    let mut env = Env::new();
    let (a, b) = (env.int_lit("1"), env.imag_lit("2i"));
    let e = env.binary(a, Token::ADD, b);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.typ, Some(env.basic(BasicType::UntypedComplex)));
    assert_eq!(x.mode.constant_val(), Some(&Value::Complex(1.0, 2.0)));
}

#[test]
fn test_complex_division_by_zero() {
    let mut env = Env::new();
    let (a, b) = (env.imag_lit("1i"), env.imag_lit("0i"));
    let e = env.binary(a, Token::QUO, b);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::DivByZero));
}

#[test]
fn test_logical_operators() {
    let mut env = Env::new();
    let (a, b) = (env.ident("true"), env.ident("false"));
    let e = env.binary(a, Token::LAND, b);
    let x = env.check(&e);
    assert_eq!(x.mode.constant_val(), Some(&Value::Bool(false)));

    let one = env.int_lit("1");
    let t = env.ident("true");
    let e = env.binary(one, Token::LOR, t);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::InvalidUntypedConversion));
}

#[test]
fn test_deferred_shift_lhs_accepts_integer_context() {
    // var n uint; 1 << n is an untyped value until its context is known
    let mut env = Env::new();
    let uint_t = env.basic(BasicType::Uint);
    let int_t = env.int_t();
    env.declare_var("n", uint_t);
    let (a, b) = (env.int_lit("1"), env.ident("n"));
    let e = env.binary(a, Token::SHL, b);
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &e, fctx);
        assert_eq!(x.mode, OperandMode::Value);
        checker.assignment(&mut x, Some(int_t), "variable declaration", fctx);
    });
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.typ, Some(int_t));
}

#[test]
fn test_deferred_shift_lhs_rejects_float_context() {
    // var n uint; var f float64 = 1 << n is invalid
    let mut env = Env::new();
    let uint_t = env.basic(BasicType::Uint);
    let float_t = env.basic(BasicType::Float64);
    env.declare_var("n", uint_t);
    let (a, b) = (env.int_lit("1"), env.ident("n"));
    let e = env.binary(a, Token::SHL, b);
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &e, fctx);
        checker.assignment(&mut x, Some(float_t), "variable declaration", fctx);
    });
    assert!(env.has_error_containing(ErrCode::InvalidShiftOperand, "must be integer"));
}

#[test]
fn test_negative_shift_count() {
    // a typed negative count is caught by the shift itself
    let mut env = Env::new();
    let one = env.int_lit("1");
    let int_ident = env.ident("int");
    let count = env.int_lit("1");
    let neg = env.unary(Token::SUB, count);
    let conv = env.call(int_ident, vec![neg]);
    let e = env.binary(one, Token::SHL, conv);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidShiftCount, "negative shift count"));

    // an untyped negative count already fails its conversion to uint
    let (one, count) = (env.int_lit("1"), env.int_lit("1"));
    let neg = env.unary(Token::SUB, count);
    let e = env.binary(one, Token::SHL, neg);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::NumericOverflow, "overflows uint"));
}

#[test]
fn test_shift_count_must_be_integer() {
    let mut env = Env::new();
    let s = env.basic(BasicType::Str);
    env.declare_var("s", s);
    let (one, count) = (env.int_lit("1"), env.ident("s"));
    let e = env.binary(one, Token::SHL, count);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidShiftCount, "shift count"));
}

#[test]
fn test_convert_untyped_is_idempotent_for_typed_operands() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let float_t = env.basic(BasicType::Float64);
    env.declare_var("i", int_t);
    let e = env.ident("i");
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &e, fctx);
        checker.convert_untyped(&mut x, float_t, fctx);
        assert_eq!(x.typ, Some(int_t)); // no-op on typed operands
        let before = x.clone();
        checker.convert_untyped(&mut x, float_t, fctx);
        assert_eq!(before.typ, x.typ);
        assert_eq!(before.mode, x.mode);
    });
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
}

#[test]
fn test_finalized_expr_leaves_untyped_registry() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let (a, b) = (env.int_lit("1"), env.int_lit("2"));
    let e = env.binary(a, Token::ADD, b);
    let id = e.id();
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &e, fctx);
        assert!(fctx.untyped.contains_key(&id));
        checker.update_expr_type(&e, int_t, true, fctx);
        assert!(!fctx.untyped.contains_key(&id));
    });
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
}

#[test]
fn test_paren_shares_final_type_with_inner() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let lit = env.int_lit("3");
    let lit_id = lit.id();
    let e = env.paren(lit);
    let outer_id = e.id();
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.expr(&mut x, &e, fctx);
        // both the paren wrapper and the literal are registered
        assert!(fctx.untyped.contains_key(&outer_id));
        assert!(fctx.untyped.contains_key(&lit_id));
        // finalizing the wrapper pushes the type down the paren chain
        checker.assignment(&mut x, Some(int_t), "variable declaration", fctx);
        assert!(!fctx.untyped.contains_key(&outer_id));
        assert!(!fctx.untyped.contains_key(&lit_id));
    });
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
}

#[test]
fn test_address_of_variable() {
    let mut env = Env::new();
    let int_t = env.int_t();
    env.declare_var("v", int_t);
    let v = env.ident("v");
    let e = env.unary(Token::AND, v);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Value);
    let pt = env.tco.types[x.typ.unwrap()].try_as_pointer().cloned();
    assert_eq!(pt.unwrap().base(), int_t);
}

#[test]
fn test_address_of_non_addressable() {
    let mut env = Env::new();
    let lit = env.int_lit("1");
    let e = env.unary(Token::AND, lit);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::UnaddressableOperand, "cannot take address"));
}

#[test]
fn test_address_of_composite_literal() {
    let mut env = Env::new();
    let int_ident = env.ident("int");
    let st = env.slice_type_expr(int_ident);
    let one = env.int_lit("1");
    let lit = env.composite_lit(Some(st), vec![one]);
    let e = env.unary(Token::AND, lit);
    let x = env.check(&e);
    assert_eq!(env.err_count(), 0, "{}", env.dump_errors());
    assert_eq!(x.mode, OperandMode::Value);
}

#[test]
fn test_receive() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let chan_t = env.tco.new_t_chan(golite_types::typ::ChanDir::SendRecv, int_t);
    env.declare_var("ch", chan_t);
    let ch = env.ident("ch");
    let e = env.unary(Token::ARROW, ch);
    let x = env.check(&e);
    assert_eq!(x.mode, OperandMode::CommaOk);
    assert_eq!(x.typ, Some(int_t));

    let send_only = env.tco.new_t_chan(golite_types::typ::ChanDir::SendOnly, int_t);
    env.declare_var("out", send_only);
    let out = env.ident("out");
    let e = env.unary(Token::ARROW, out);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::InvalidReceive, "send-only"));
}

#[test]
fn test_indirection() {
    let mut env = Env::new();
    let int_t = env.int_t();
    let ptr_t = env.tco.new_t_pointer(int_t);
    env.declare_var("p", ptr_t);
    let p = env.ident("p");
    let e = env.star(p);
    let x = env.check(&e);
    assert_eq!(x.mode, OperandMode::Variable);
    assert_eq!(x.typ, Some(int_t));

    env.declare_var("i", int_t);
    let i = env.ident("i");
    let e = env.star(i);
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::InvalidIndirection));
}

#[test]
fn test_undeclared_name() {
    let mut env = Env::new();
    let e = env.ident("undefined_thing");
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error_containing(ErrCode::UndeclaredName, "undeclared name"));
}

#[test]
fn test_representable_const_properties() {
    let env = Env::new();
    let word = env.tco.universe().sizes().word_size();
    let int8 = env.tco.types[env.basic(BasicType::Int8)]
        .try_as_basic()
        .copied()
        .unwrap();
    for (v, want) in [(127i64, true), (128, false), (-128, true), (-129, false)] {
        let val = Value::with_i64(v);
        let mut rounded = val.clone();
        assert_eq!(
            val.representable(&int8, word, Some(&mut rounded)),
            want,
            "{} as int8",
            v
        );
        if want {
            // a rounded result is itself representable
            assert!(rounded.representable(&int8, word, None));
        }
    }
    // rounding to float32 loses precision but stays representable
    let f32_basic = env.tco.types[env.basic(BasicType::Float32)]
        .try_as_basic()
        .copied()
        .unwrap();
    let val = Value::with_f64(1.0000000001);
    let mut rounded = val.clone();
    assert!(val.representable(&f32_basic, word, Some(&mut rounded)));
    assert!(rounded.representable(&f32_basic, word, None));
}

#[test]
fn test_default_type_mapping() {
    let env = Env::new();
    let o = &env.tco;
    let cases = [
        (BasicType::UntypedBool, BasicType::Bool),
        (BasicType::UntypedInt, BasicType::Int),
        (BasicType::UntypedRune, BasicType::Rune),
        (BasicType::UntypedFloat, BasicType::Float64),
        (BasicType::UntypedComplex, BasicType::Complex128),
        (BasicType::UntypedString, BasicType::Str),
    ];
    for (from, to) in cases {
        let d = golite_types::typ::untyped_default_type(env.basic(from), o);
        assert_eq!(d, env.basic(to));
    }
    let d = golite_types::typ::untyped_default_type(env.basic(BasicType::UntypedNil), o);
    assert_eq!(d, env.basic(BasicType::Invalid));
}

#[test]
fn test_iota_requires_context() {
    let mut env = Env::new();
    let e = env.ident("iota");
    let x = env.check(&e);
    assert!(x.invalid());
    assert!(env.has_error(ErrCode::InvalidIota));

    // with an iota value in context the identifier is a constant
    let e = env.ident("iota");
    let mut x = golite_types::operand::Operand::new();
    env.with_checker(|checker, fctx| {
        checker.octx.iota = Some(Value::with_i64(3));
        checker.expr(&mut x, &e, fctx);
    });
    assert_eq!(x.mode.constant_val(), Some(&Value::with_i64(3)));
}
