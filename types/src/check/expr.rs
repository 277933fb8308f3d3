// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
//
//
// This code is adapted from the official Go code written in Go
// with license as follows:
// Copyright 2012 The Go Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! This file implements typechecking of expressions.
//!
//! Basic algorithm:
//!
//! Expressions are checked recursively, top down. Expression checker
//! functions are generally of the form:
//!
//!   fn f(&mut self, x: &mut Operand, e: &Expr, ...)
//!
//! where e is the expression to be checked, and x is the result of the
//! check. The check performed by f may fail in which case x.mode ==
//! OperandMode::Invalid, and related error messages will have been issued
//! by f.
//!
//! If a hint argument is present, it is the composite literal element
//! type of an outer composite literal; it is used to type-check composite
//! literal elements that have no explicit type specification in the
//! source (e.g.: []T{{...}, {...}}, the hint is the type T in this case).
//!
//! All expressions are checked via raw_expr, which dispatches according
//! to expression kind. Upon returning, raw_expr is recording the types
//! and constant values for all expressions that have an untyped type
//! (those types may change on the way up in the expression tree).
//! Usually these are constants, but the results of comparisons or
//! non-constant shifts of untyped constants may also be untyped, but not
//! constant.
//!
//! Untyped expressions may eventually become fully typed (i.e., not
//! untyped), typically when the value is assigned to a variable, or is
//! used otherwise. The update_expr_type method is used to record this
//! final type and update the recorded types: the type-checked expression
//! tree is again traversed down, and the new type is propagated as
//! needed. Untyped constant expression values that become fully typed
//! must now be representable by the full type (constant sub-expression
//! trees are left alone except for their roots). This mechanism ensures
//! that a client sees the actual (run-time) type an untyped value would
//! have. It also permits type-checking of lhs shift operands "as if the
//! shift were not present": when update_expr_type visits an untyped lhs
//! shift operand and assigns it its final type, that type must be an
//! integer type, and a constant lhs must be representable as an integer.
//!
//! When an expression gets its final type, either on the way out from
//! raw_expr, on the way down in update_expr_type, or at the end of the
//! type checker run, the type (and constant value, if any) is recorded
//! via result.record_type_and_value.

use super::super::constant::Value;
use super::super::objects::TypeKey;
use super::super::operand::{Operand, OperandMode};
use super::super::typ::{self, BasicDetail, BasicInfo, BasicType, Type};
use super::super::universe::ExprKind;
use super::check::{Checker, ExprInfo, FilesContext};
use super::errors::{ErrCode, TypeError};
use golite_parser::ast::{self, Expr, Node, UnaryExpr};
use golite_parser::{Pos, Token};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// 512 is the constant precision: untyped integer values must not grow
/// arbitrarily, so that compilation terminates.
const PREC: usize = 512;

/// The upper bound of constant shift counts, large enough to express the
/// smallest positive float64.
const SHIFT_BOUND: u64 = 1023 - 1 + 52;

type OpPredicate = fn(TypeKey, &super::super::objects::TCObjects) -> bool;

fn unary_op_predicate(op: &Token) -> Option<OpPredicate> {
    match op {
        Token::ADD => Some(typ::is_numeric),
        Token::SUB => Some(typ::is_numeric),
        Token::XOR => Some(typ::is_integer),
        Token::NOT => Some(typ::is_boolean),
        _ => None,
    }
}

fn binary_op_predicate(op: &Token) -> Option<OpPredicate> {
    match op {
        Token::ADD => Some(|t, o| typ::is_numeric(t, o) || typ::is_string(t, o)),
        Token::SUB | Token::MUL | Token::QUO => Some(typ::is_numeric),
        Token::REM | Token::AND | Token::OR | Token::XOR | Token::AND_NOT => {
            Some(typ::is_integer)
        }
        Token::LAND | Token::LOR => Some(typ::is_boolean),
        _ => None,
    }
}

fn is_shift(op: &Token) -> bool {
    matches!(op, Token::SHL | Token::SHR)
}

fn is_comparison(op: &Token) -> bool {
    matches!(
        op,
        Token::EQL | Token::NEQ | Token::LSS | Token::LEQ | Token::GTR | Token::GEQ
    )
}

/// op_name returns the name of an operation, or the empty string.
/// Only operations that might overflow are handled.
fn op_name(e: Option<&Expr>) -> &'static str {
    match e {
        Some(Expr::Binary(b)) => match b.op {
            Token::ADD => "addition",
            Token::SUB => "subtraction",
            Token::XOR => "bitwise XOR",
            Token::MUL => "multiplication",
            Token::SHL => "shift",
            _ => "",
        },
        Some(Expr::Unary(u)) => match u.op {
            Token::XOR => "bitwise complement",
            _ => "",
        },
        _ => "",
    }
}

/// key_val projects a constant to a canonical hashable key for duplicate
/// detection in map literals.
#[derive(PartialEq, Eq, Hash)]
enum ConstKey {
    Bool(bool),
    Str(String),
    Int(i64),
    Uint(u64),
    Float(u64),
    Complex(u64, u64),
    Other(String),
}

fn key_val(v: &Value) -> ConstKey {
    match v {
        Value::Bool(b) => ConstKey::Bool(*b),
        Value::Str(s) => ConstKey::Str(s.clone()),
        Value::Int(_) => {
            let (i, exact) = v.int_as_i64();
            if exact {
                return ConstKey::Int(i);
            }
            let (u, exact) = v.int_as_u64();
            if exact {
                return ConstKey::Uint(u);
            }
            ConstKey::Other(v.to_string())
        }
        Value::Float(f) => ConstKey::Float(f.to_bits()),
        Value::Complex(r, i) => ConstKey::Complex(r.to_bits(), i.to_bits()),
        Value::Unknown => ConstKey::Other("unknown".to_owned()),
    }
}

impl<'a> Checker<'a> {
    fn op(&mut self, pred: Option<OpPredicate>, x: &mut Operand, op: &Token) -> bool {
        match pred {
            Some(p) => {
                if !p(x.typ.unwrap(), self.tc_objs) {
                    let xd = self.new_dis(x);
                    self.invalid_op(
                        xd.pos(),
                        ErrCode::UndefinedOp,
                        &format!("operator {} not defined for {}", op.text(), xd),
                    );
                    false
                } else {
                    true
                }
            }
            None => {
                self.invalid_ast(x.pos(self.ast_objs), &format!("unknown operator {}", op.text()));
                false
            }
        }
    }

    /// overflow checks that the constant x is representable by its type.
    /// For untyped constants, it checks that the value doesn't become
    /// arbitrarily large.
    fn overflow(&mut self, x: &mut Operand, op_pos: Pos) {
        debug_assert!(x.mode.constant_val().is_some());

        if x.mode.constant_val().unwrap().is_unknown() {
            self.error(
                op_pos,
                ErrCode::InvalidConstVal,
                "constant result is not representable".to_owned(),
            );
            return;
        }

        // Typed constants must be representable in
        // their type after each constant operation.
        let t = x.typ.unwrap();
        if typ::is_typed(t, self.tc_objs) {
            let ut = typ::underlying_type(t, self.tc_objs);
            if let Some(basic) = self.otype(ut).try_as_basic().copied() {
                self.representable(x, &basic);
                return;
            }
        }

        // Untyped integer values must not grow arbitrarily.
        let val = x.mode.constant_val().unwrap();
        if val.is_int() && val.bit_len() > PREC {
            self.error(
                op_pos,
                ErrCode::InvalidConstVal,
                format!("constant {} overflow", op_name(x.expr.as_ref())),
            );
            *x.mode.constant_val_mut().unwrap() = Value::Unknown;
        }
    }

    /// unary typechecks the unary expression e and initializes x with the
    /// result.
    pub fn unary(&mut self, x: &mut Operand, e: &Rc<UnaryExpr>, fctx: &mut FilesContext) {
        self.expr(x, &e.expr, fctx);
        if x.invalid() {
            return;
        }
        match e.op {
            Token::AND => {
                // spec: "As an exception to the addressability
                // requirement x may also be a composite literal."
                let is_lit = matches!(ast::unparen(&e.expr), Expr::CompositeLit(_));
                if !is_lit && x.mode != OperandMode::Variable {
                    let xd = self.new_dis(x);
                    self.invalid_op(
                        xd.pos(),
                        ErrCode::UnaddressableOperand,
                        &format!("cannot take address of {}", xd),
                    );
                    x.mode = OperandMode::Invalid;
                    return;
                }
                x.mode = OperandMode::Value;
                x.typ = Some(self.tc_objs.new_t_pointer(x.typ.unwrap()));
                return;
            }
            Token::ARROW => {
                let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
                match self.otype(ut).try_as_chan() {
                    Some(chan) => {
                        if chan.dir() == typ::ChanDir::SendOnly {
                            let xd = self.new_dis(x);
                            self.invalid_op(
                                xd.pos(),
                                ErrCode::InvalidReceive,
                                &format!("cannot receive from send-only channel {}", xd),
                            );
                            x.mode = OperandMode::Invalid;
                            return;
                        }
                        let elem = chan.elem();
                        x.mode = OperandMode::CommaOk;
                        x.typ = Some(elem);
                        self.octx.has_call_or_recv = true;
                    }
                    None => {
                        let xd = self.new_dis(x);
                        self.invalid_op(
                            xd.pos(),
                            ErrCode::InvalidReceive,
                            &format!("cannot receive from non-channel {}", xd),
                        );
                        x.mode = OperandMode::Invalid;
                    }
                }
                return;
            }
            _ => {}
        }

        if !self.op(unary_op_predicate(&e.op), x, &e.op) {
            x.mode = OperandMode::Invalid;
            return;
        }

        if x.mode.constant_val().is_some() {
            if x.mode.constant_val().unwrap().is_unknown() {
                // nothing to do (and don't cause an error below in the
                // overflow check)
                return;
            }
            let mut prec: usize = 0;
            if typ::is_unsigned(x.typ.unwrap(), self.tc_objs) {
                let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
                let bt = self.otype(ut).try_as_basic().unwrap().typ();
                prec = self.tc_objs.universe().sizes().sizeof_basic(bt) * 8;
            }
            let val = Value::unary_op(&e.op, x.mode.constant_val().unwrap(), prec);
            x.mode = OperandMode::Constant(val);
            x.expr = Some(Expr::Unary(e.clone()));
            let op_pos = x.pos(self.ast_objs);
            self.overflow(x, op_pos);
            return;
        }

        x.mode = OperandMode::Value;
        // x.typ remains unchanged
    }

    /// representable checks that a constant operand is representable in
    /// the given basic type.
    pub fn representable(&mut self, x: &mut Operand, basic: &BasicDetail) {
        if let Err(e) = self.is_representable(x, basic) {
            x.mode = OperandMode::Invalid;
            self.err(e);
        }
    }

    pub fn is_representable(
        &mut self,
        x: &mut Operand,
        basic: &BasicDetail,
    ) -> Result<(), TypeError> {
        debug_assert!(x.mode.constant_val().is_some());
        let word = self.tc_objs.universe().sizes().word_size();
        let v = x.mode.constant_val().unwrap().clone();
        let mut rounded = v.clone();
        if v.representable(basic, word, Some(&mut rounded)) {
            *x.mode.constant_val_mut().unwrap() = rounded;
            return Ok(());
        }

        let xt = x.typ.unwrap();
        let xd = self.new_dis(x);
        let (code, msg) = if typ::is_numeric(xt, self.tc_objs) && basic.info().is_numeric() {
            // numeric conversion : error msg
            //
            // integer -> integer : overflows
            // integer -> float   : overflows (actually not possible)
            // float   -> integer : truncated
            // float   -> float   : overflows
            if !typ::is_integer(xt, self.tc_objs) && basic.info() == BasicInfo::IsInteger {
                (
                    ErrCode::TruncatedFloat,
                    format!("{} truncated to {}", xd, basic.name()),
                )
            } else {
                (
                    ErrCode::NumericOverflow,
                    format!("{} overflows {}", xd, basic.name()),
                )
            }
        } else {
            (
                ErrCode::InvalidConstVal,
                format!("cannot convert {} to {}", xd, basic.name()),
            )
        };
        Err(TypeError::new(xd.pos(), code, msg))
    }

    /// update_expr_type updates the type of x to typ and invokes itself
    /// recursively for the operands of x, depending on expression kind.
    /// If typ is still an untyped and not the final type, update_expr_type
    /// only updates the recorded untyped type for x and possibly its
    /// operands. Otherwise (i.e., typ is not an untyped type anymore, or
    /// it is the final type for x), the type and value are recorded.
    /// Also, if x is a constant, it must be representable as a value of
    /// typ, and if x is the (formerly untyped) lhs operand of a
    /// non-constant shift, it must be an integer value.
    pub fn update_expr_type(
        &mut self,
        e: &Expr,
        tkey: TypeKey,
        final_: bool,
        fctx: &mut FilesContext,
    ) {
        let id = e.id();
        let (is_lhs, old_mode, old_typ) = match fctx.untyped.get(&id) {
            Some(info) => (info.is_lhs, info.mode.clone(), info.typ),
            None => return, // nothing to do
        };

        // update operands of e if necessary
        match e {
            Expr::Bad(_)
            | Expr::FuncLit(_)
            | Expr::CompositeLit(_)
            | Expr::Index(_)
            | Expr::Slice(_)
            | Expr::TypeAssert(_)
            | Expr::Star(_)
            | Expr::KeyValue(_)
            | Expr::Array(_)
            | Expr::Struct(_)
            | Expr::Func(_)
            | Expr::Interface(_)
            | Expr::Map(_)
            | Expr::Chan(_)
            | Expr::Ellipsis(_) => {
                // These expressions are never untyped - nothing to do.
                // The respective sub-expressions got their final types
                // upon assignment or use.
                debug_assert!(false, "found untyped expression of impossible kind");
                return;
            }

            Expr::Call(_) => {
                // Resulting in an untyped constant (e.g., built-in
                // complex). The respective calls take care of calling
                // update_expr_type for the arguments if necessary.
            }

            Expr::Ident(_) | Expr::BasicLit(_) | Expr::Selector(_) => {
                // An identifier denoting a constant, a constant literal,
                // or a qualified identifier (imported untyped constant).
                // No operands to take care of.
            }

            Expr::Paren(p) => self.update_expr_type(&p.expr, tkey, final_, fctx),

            Expr::Unary(u) => {
                // If x is a constant, the operands were constants.
                // The operands don't need to be updated since they
                // never get "materialized" into a typed value. If
                // left in the untyped map, they will be processed
                // at the end of the type check.
                if old_mode.constant_val().is_none() {
                    self.update_expr_type(&u.expr, tkey, final_, fctx);
                }
            }

            Expr::Binary(b) => {
                if old_mode.constant_val().is_none() {
                    if is_comparison(&b.op) {
                        // The result type is independent of operand types
                        // and the operand types must have final types.
                    } else if is_shift(&b.op) {
                        // The result type depends only on lhs operand.
                        // The rhs type was updated when checking the shift.
                        self.update_expr_type(&b.expr_a, tkey, final_, fctx);
                    } else {
                        // The operand types match the result type.
                        self.update_expr_type(&b.expr_a, tkey, final_, fctx);
                        self.update_expr_type(&b.expr_b, tkey, final_, fctx);
                    }
                }
            }
        }

        // If the new type is not final and still untyped, just
        // update the recorded type.
        if !final_ && typ::is_untyped(tkey, self.tc_objs) {
            let info = fctx.untyped.get_mut(&id).unwrap();
            info.typ = tkey;
            return;
        }

        // Otherwise we have the final (typed or untyped type).
        // Remove it from the map of yet untyped expressions.
        fctx.untyped.remove(&id);

        if is_lhs {
            // If x is the lhs of a shift, its final type must be integer.
            // We already know from the shift check that it is representable
            // as an integer if it is a constant.
            if !typ::is_integer(tkey, self.tc_objs) {
                let ed = format!("{}", self.new_dis(e));
                let td = format!("{}", self.new_dis(&tkey));
                self.invalid_op(
                    e.pos(self.ast_objs),
                    ErrCode::InvalidShiftOperand,
                    &format!("shifted operand {} (type {}) must be integer", ed, td),
                );
                return;
            }
            // Even if we have an integer, if the value is a constant we
            // still must check that it is representable as the specific
            // int type requested.
        }
        if old_mode.constant_val().is_some() {
            // If x is a constant, it must be representable as a value of
            // typ.
            let mut c = Operand::new_with(old_mode.clone(), Some(e.clone()), Some(old_typ));
            self.convert_untyped(&mut c, tkey, fctx);
            if c.invalid() {
                return;
            }
        }

        // Everything's fine, record final type and value for e.
        self.result.record_type_and_value(e, old_mode, tkey);
    }

    /// update_expr_val updates the value of the expression's registry
    /// entry to val.
    pub fn update_expr_val(&mut self, e: &Expr, val: Value, fctx: &mut FilesContext) {
        if let Some(info) = fctx.untyped.get_mut(&e.id()) {
            if let Some(v) = info.mode.constant_val_mut() {
                *v = val;
            }
        }
    }

    /// convert_untyped attempts to set the type of an untyped value to
    /// the target type.
    pub fn convert_untyped(&mut self, x: &mut Operand, target: TypeKey, fctx: &mut FilesContext) {
        if let Err(e) = self.can_convert_untyped(x, target, fctx) {
            x.mode = OperandMode::Invalid;
            self.err(e);
        }
    }

    pub fn can_convert_untyped(
        &mut self,
        x: &mut Operand,
        target: TypeKey,
        fctx: &mut FilesContext,
    ) -> Result<(), TypeError> {
        if x.invalid()
            || typ::is_typed(x.typ.unwrap(), self.tc_objs)
            || target == self.invalid_type()
        {
            return Ok(());
        }
        let mut target = target;

        if typ::is_untyped(target, self.tc_objs) {
            // both x and target are untyped
            let xkind = self.otype(x.typ.unwrap()).try_as_basic().unwrap().typ();
            let tkind = self.otype(target).try_as_basic().unwrap().typ();
            if typ::is_numeric(x.typ.unwrap(), self.tc_objs)
                && typ::is_numeric(target, self.tc_objs)
            {
                if xkind < tkind {
                    x.typ = Some(target);
                    let e = x.expr.clone();
                    if let Some(e) = e {
                        self.update_expr_type(&e, target, false, fctx);
                    }
                }
            } else if xkind != tkind {
                return Err(self.untyped_conversion_error(x, target));
            }
            return Ok(());
        }

        let t_under = typ::underlying_type(target, self.tc_objs);
        let basic = self.otype(t_under).try_as_basic().copied();
        match (basic, x.mode.constant_val().is_some()) {
            (Some(b), true) => {
                self.is_representable(x, &b)?;
                // Expression value may have been rounded - update if
                // needed.
                let e = x.expr.clone();
                if let Some(e) = e {
                    let val = x.mode.constant_val().unwrap().clone();
                    self.update_expr_val(&e, val, fctx);
                }
            }
            _ => match self.implicit_type(x, target) {
                Some(t) => target = t,
                None => return Err(self.untyped_conversion_error(x, target)),
            },
        }

        x.typ = Some(target);
        // Even though implicit_type can return UntypedNil, this value is
        // final: the predeclared identifier nil has no type.
        let e = x.expr.clone();
        if let Some(e) = e {
            self.update_expr_type(&e, target, true, fctx);
        }
        Ok(())
    }

    fn untyped_conversion_error(&self, x: &Operand, target: TypeKey) -> TypeError {
        let xd = self.new_dis(x);
        let td = self.new_dis(&target);
        TypeError::new(
            xd.pos(),
            ErrCode::InvalidUntypedConversion,
            format!("cannot convert {} to {}", xd, td),
        )
    }

    /// implicit_type returns the implicit type of x when used in a
    /// context where the target type is expected. If no such implicit
    /// conversion is possible, it returns None.
    pub fn implicit_type(&self, x: &Operand, target: TypeKey) -> Option<TypeKey> {
        debug_assert!(typ::is_untyped(x.typ.unwrap(), self.tc_objs));
        let o = &*self.tc_objs;
        let u = o.universe();
        let t_under = typ::underlying_type(target, o);
        match &o.types[t_under] {
            Type::Basic(_) => {
                debug_assert!(x.mode.constant_val().is_none());
                // Non-constant untyped values may appear as the
                // result of comparisons (untyped bool), intermediate
                // (delayed-checked) rhs operands of shifts, and as
                // the value nil.
                let xkind = o.types[x.typ.unwrap()].try_as_basic().unwrap().typ();
                match xkind {
                    BasicType::UntypedBool => {
                        if !typ::is_boolean(target, o) {
                            return None;
                        }
                    }
                    BasicType::UntypedInt
                    | BasicType::UntypedRune
                    | BasicType::UntypedFloat
                    | BasicType::UntypedComplex => {
                        if !typ::is_numeric(target, o) {
                            return None;
                        }
                    }
                    BasicType::UntypedString => {
                        // Non-constant untyped string values are not
                        // permitted by the spec and should not occur
                        // during normal typechecking passes, but this
                        // path is reachable via the assignability API.
                        if !typ::is_string(target, o) {
                            return None;
                        }
                    }
                    BasicType::UntypedNil => {
                        // Unsafe.Pointer is a basic type that includes
                        // nil. Preserve the type of nil as UntypedNil.
                        if !typ::has_nil(target, o) {
                            return None;
                        }
                        return Some(u.types()[&BasicType::UntypedNil]);
                    }
                    _ => return None,
                }
            }
            Type::Interface(detail) => {
                // Values must have concrete dynamic types. If the value
                // is nil, keep it untyped.
                if x.is_nil(u) {
                    return Some(u.types()[&BasicType::UntypedNil]);
                }
                // cannot assign untyped values to non-empty interfaces
                if !detail.is_empty() {
                    return None;
                }
                return Some(typ::untyped_default_type(x.typ.unwrap(), o));
            }
            Type::Pointer(_) | Type::Signature(_) | Type::Slice(_) | Type::Map(_)
            | Type::Chan(_) => {
                if !x.is_nil(u) {
                    return None;
                }
                // Keep nil untyped - see comment for interfaces, above.
                return Some(u.types()[&BasicType::UntypedNil]);
            }
            _ => return None,
        }
        Some(target)
    }

    /// comparison typechecks x op y and stores the result in x.
    pub fn comparison(
        &mut self,
        x: &mut Operand,
        y: &mut Operand,
        op: &Token,
        fctx: &mut FilesContext,
    ) {
        // spec: "In any comparison, the first operand must be assignable
        // to the type of the second operand, or vice versa."
        let o = &self.tc_objs;
        let u = o.universe();
        let (xt, yt) = (x.typ.unwrap(), y.typ.unwrap());
        let xok = x.assignable_to(yt, None, o);
        let yok = y.assignable_to(xt, None, o);
        let mut err = String::new();
        let mut code = ErrCode::UndefinedOp;
        if xok || yok {
            let defined = match op {
                Token::EQL | Token::NEQ => {
                    // spec: "The equality operators == and != apply to
                    // operands that are comparable."
                    (typ::comparable(xt, o) && typ::comparable(yt, o))
                        || (x.is_nil(u) && typ::has_nil(yt, o))
                        || (y.is_nil(u) && typ::has_nil(xt, o))
                }
                Token::LSS | Token::LEQ | Token::GTR | Token::GEQ => {
                    // spec: "The ordering operators <, <=, >, and >=
                    // apply to operands that are ordered."
                    typ::is_ordered(xt, o) && typ::is_ordered(yt, o)
                }
                _ => unreachable!(),
            };
            if !defined {
                let t = if x.is_nil(u) { yt } else { xt };
                err = format!("operator {} not defined for {}", op.text(), self.new_dis(&t));
            }
        } else {
            err = format!(
                "mismatched types {} and {}",
                self.new_dis(&xt),
                self.new_dis(&yt)
            );
            code = ErrCode::MismatchedTypes;
        }

        if !err.is_empty() {
            let msg = format!(
                "cannot compare {} {} {} ({})",
                self.new_dis(x.expr.as_ref().unwrap()),
                op.text(),
                self.new_dis(y.expr.as_ref().unwrap()),
                err
            );
            self.error(x.pos(self.ast_objs), code, msg);
            x.mode = OperandMode::Invalid;
            return;
        }

        if x.mode.constant_val().is_some() && y.mode.constant_val().is_some() {
            let xv = x.mode.constant_val().unwrap();
            let yv = y.mode.constant_val().unwrap();
            let result = Value::with_bool(Value::compare(xv, op, yv));
            x.mode = OperandMode::Constant(result);
            // The operands are never materialized; no need to update
            // their types.
        } else {
            x.mode = OperandMode::Value;
            // The operands have now their final types, which at run-
            // time will be materialized. Update the expression trees.
            // If the current types are untyped, the materialized type
            // is the respective default type.
            let xe = x.expr.clone().unwrap();
            let ye = y.expr.clone().unwrap();
            let xdef = typ::untyped_default_type(xt, self.tc_objs);
            let ydef = typ::untyped_default_type(yt, self.tc_objs);
            self.update_expr_type(&xe, xdef, true, fctx);
            self.update_expr_type(&ye, ydef, true, fctx);
        }

        // spec: "Comparison operators compare two operands and yield
        //        an untyped boolean value."
        x.typ = Some(self.basic_type(BasicType::UntypedBool));
    }

    /// shift typechecks the shift x op y; e is the shift expression if
    /// present, for better error positions.
    pub fn shift(
        &mut self,
        x: &mut Operand,
        y: &mut Operand,
        e: Option<&Expr>,
        op: &Token,
        fctx: &mut FilesContext,
    ) {
        let untyped_x = typ::is_untyped(x.typ.unwrap(), self.tc_objs);

        let xval = match x.mode.constant_val() {
            Some(v) => Some(v.to_int().into_owned()),
            None => None,
        };

        let lhs_ok = typ::is_integer(x.typ.unwrap(), self.tc_objs)
            || (untyped_x && xval.as_ref().map_or(false, |v| v.is_int()));
        if !lhs_ok {
            // shift has no chance
            let xd = self.new_dis(x);
            self.invalid_op(
                xd.pos(),
                ErrCode::InvalidShiftOperand,
                &format!("shifted operand {} must be integer", xd),
            );
            x.mode = OperandMode::Invalid;
            return;
        }

        // spec: "The right operand in a shift expression must have
        // integer type or be an untyped constant representable by a
        // value of type uint."
        if typ::is_integer(y.typ.unwrap(), self.tc_objs) {
            // nothing to do
        } else if typ::is_untyped(y.typ.unwrap(), self.tc_objs) {
            let uint_t = self.basic_type(BasicType::Uint);
            self.convert_untyped(y, uint_t, fctx);
            if y.invalid() {
                x.mode = OperandMode::Invalid;
                return;
            }
        } else {
            let yd = self.new_dis(y);
            self.invalid_op(
                yd.pos(),
                ErrCode::InvalidShiftCount,
                &format!("shift count {} must be integer", yd),
            );
            x.mode = OperandMode::Invalid;
            return;
        }

        let mut yval: Option<Value> = None;
        if y.mode.constant_val().is_some() {
            // rhs must be an integer value
            let v = y.mode.constant_val().unwrap().to_int().into_owned();
            debug_assert!(v.is_int() || v.is_unknown());
            if v.sign() < 0 {
                let yd = self.new_dis(y);
                self.invalid_op(
                    yd.pos(),
                    ErrCode::InvalidShiftCount,
                    &format!("negative shift count {}", yd),
                );
                x.mode = OperandMode::Invalid;
                return;
            }
            yval = Some(v);
        }

        if x.mode.constant_val().is_some() {
            if y.mode.constant_val().is_some() {
                // if either x or y has an unknown value, the result is
                // unknown
                if x.mode.constant_val().unwrap().is_unknown()
                    || y.mode.constant_val().unwrap().is_unknown()
                {
                    x.mode = OperandMode::Constant(Value::Unknown);
                    // ensure the correct type - see comment below
                    if !typ::is_integer(x.typ.unwrap(), self.tc_objs) {
                        x.typ = Some(self.basic_type(BasicType::UntypedInt));
                    }
                    return;
                }
                // rhs must be within reasonable bounds in constant shifts
                let (s, ok) = yval.as_ref().unwrap().int_as_u64();
                if !ok || s > SHIFT_BOUND {
                    let yd = self.new_dis(y);
                    self.invalid_op(
                        yd.pos(),
                        ErrCode::InvalidShiftCount,
                        &format!("invalid shift count {}", yd),
                    );
                    x.mode = OperandMode::Invalid;
                    return;
                }
                // The lhs is representable as an integer but may not be
                // an integer (e.g., 2.0, an untyped float) - this can
                // only happen for untyped non-integer numeric constants.
                // Correct the type so that the shift result is of integer
                // type.
                if !typ::is_integer(x.typ.unwrap(), self.tc_objs) {
                    x.typ = Some(self.basic_type(BasicType::UntypedInt));
                }
                // x is a constant so xval != None and it must be of Int
                // kind.
                let val = Value::shift(xval.as_ref().unwrap(), op, s as usize);
                x.mode = OperandMode::Constant(val);
                if let Some(e) = e {
                    x.expr = Some(e.clone());
                }
                let op_pos = match e {
                    Some(Expr::Binary(b)) => b.op_pos,
                    _ => x.pos(self.ast_objs),
                };
                self.overflow(x, op_pos);
                return;
            }

            // non-constant shift with constant lhs
            if untyped_x {
                // spec: "If the left operand of a non-constant shift
                // expression is an untyped constant, the type of the
                // constant is what it would be if the shift expression
                // were replaced by its left operand alone.".
                //
                // Delay operand checking until we know the final type
                // by marking the lhs expression as lhs shift operand.
                //
                // Usually (in correct programs), the lhs expression
                // is in the untyped map. However, it is possible to
                // create incorrect programs where the same expression
                // is evaluated twice (via a declaration cycle) such
                // that the lhs expression type is determined in the
                // first round and thus deleted from the map, and then
                // not found in the second round (double insertion of
                // the same expr node still just leads to one entry for
                // that node, and it can only be deleted once).
                // Be cautious and check for presence of entry.
                if let Some(e) = &x.expr {
                    if let Some(info) = fctx.untyped.get_mut(&e.id()) {
                        info.is_lhs = true;
                    }
                }
                // keep x's type
                x.mode = OperandMode::Value;
                return;
            }
        }

        // non-constant shift - lhs must be an integer
        if !typ::is_integer(x.typ.unwrap(), self.tc_objs) {
            let xd = self.new_dis(x);
            self.invalid_op(
                xd.pos(),
                ErrCode::InvalidShiftOperand,
                &format!("shifted operand {} must be integer", xd),
            );
            x.mode = OperandMode::Invalid;
            return;
        }

        x.mode = OperandMode::Value;
    }

    /// binary typechecks the binary expression lhs op rhs and stores the
    /// result in x. If e is present, it must be the binary expression; it
    /// may be None for non-constant expressions (when invoked for an
    /// assignment operation where the binary expression is implicit).
    pub fn binary(
        &mut self,
        x: &mut Operand,
        e: Option<&Expr>,
        lhs: &Expr,
        rhs: &Expr,
        op: &Token,
        op_pos: Pos,
        fctx: &mut FilesContext,
    ) {
        let mut y = Operand::new();

        self.expr(x, lhs, fctx);
        self.expr(&mut y, rhs, fctx);

        if x.invalid() {
            return;
        }
        if y.invalid() {
            x.mode = OperandMode::Invalid;
            x.expr = y.expr.clone();
            return;
        }

        if is_shift(op) {
            self.shift(x, &mut y, e, op, fctx);
            return;
        }

        self.convert_untyped(x, y.typ.unwrap(), fctx);
        if x.invalid() {
            return;
        }
        self.convert_untyped(&mut y, x.typ.unwrap(), fctx);
        if y.invalid() {
            x.mode = OperandMode::Invalid;
            return;
        }

        if is_comparison(op) {
            self.comparison(x, &mut y, op, fctx);
            return;
        }

        if !typ::identical(x.typ.unwrap(), y.typ.unwrap(), self.tc_objs) {
            // only report an error if we have valid types
            // (otherwise we had an error reported elsewhere already)
            let invalid = self.invalid_type();
            if x.typ != Some(invalid) && y.typ != Some(invalid) {
                let pos = match e {
                    Some(e) => e.pos(self.ast_objs),
                    None => x.pos(self.ast_objs),
                };
                let msg = format!(
                    "mismatched types {} and {}",
                    self.new_dis(&x.typ.unwrap()),
                    self.new_dis(&y.typ.unwrap())
                );
                self.invalid_op(pos, ErrCode::MismatchedTypes, &msg);
            }
            x.mode = OperandMode::Invalid;
            return;
        }

        if !self.op(binary_op_predicate(op), x, op) {
            x.mode = OperandMode::Invalid;
            return;
        }

        if *op == Token::QUO || *op == Token::REM {
            // check for zero divisor
            if (x.mode.constant_val().is_some() || typ::is_integer(x.typ.unwrap(), self.tc_objs))
                && y.mode.constant_val().map_or(false, |v| v.sign() == 0)
            {
                let yd = self.new_dis(&y);
                self.invalid_op(yd.pos(), ErrCode::DivByZero, "division by zero");
                x.mode = OperandMode::Invalid;
                return;
            }

            // check for divisor underflow in complex division
            if x.mode.constant_val().is_some()
                && y.mode.constant_val().is_some()
                && typ::is_complex(x.typ.unwrap(), self.tc_objs)
            {
                let yv = y.mode.constant_val().unwrap();
                let (re, im) = (yv.real(), yv.imag());
                let re2 = Value::binary_op(&re, &Token::MUL, &re);
                let im2 = Value::binary_op(&im, &Token::MUL, &im);
                if re2.sign() == 0 && im2.sign() == 0 {
                    let yd = self.new_dis(&y);
                    self.invalid_op(yd.pos(), ErrCode::DivByZero, "division by zero");
                    x.mode = OperandMode::Invalid;
                    return;
                }
            }
        }

        if x.mode.constant_val().is_some() && y.mode.constant_val().is_some() {
            let xv = x.mode.constant_val().unwrap().clone();
            let yv = y.mode.constant_val().unwrap().clone();
            // if either x or y has an unknown value, the result is
            // unknown
            if xv.is_unknown() || yv.is_unknown() {
                x.mode = OperandMode::Constant(Value::Unknown);
                // x.typ is unchanged
                return;
            }
            // force integer division of integer operands
            let op2 = if *op == Token::QUO && typ::is_integer(x.typ.unwrap(), self.tc_objs) {
                Token::QUO_ASSIGN
            } else {
                op.clone()
            };
            let val = Value::binary_op(&xv, &op2, &yv);
            x.mode = OperandMode::Constant(val);
            if let Some(e) = e {
                x.expr = Some(e.clone());
            }
            self.overflow(x, op_pos);
            return;
        }

        x.mode = OperandMode::Value;
        // x.typ is unchanged
    }

    /// index checks an index expression for validity.
    /// If max is present, it is the upper bound for the index.
    /// The returned type is Invalid if the index is not valid; the
    /// returned value is the constant value of a valid constant index.
    pub fn index(
        &mut self,
        index: &Expr,
        max: Option<i64>,
        fctx: &mut FilesContext,
    ) -> (TypeKey, Option<i64>) {
        let invalid = self.invalid_type();

        let mut x = Operand::new();
        self.expr(&mut x, index, fctx);
        if x.invalid() {
            return (invalid, None);
        }

        // an untyped constant must be representable as Int
        let int_t = self.basic_type(BasicType::Int);
        self.convert_untyped(&mut x, int_t, fctx);
        if x.invalid() {
            return (invalid, None);
        }

        // the index must be of integer type
        if !typ::is_integer(x.typ.unwrap(), self.tc_objs) {
            let xd = self.new_dis(&x);
            self.invalid_arg(
                xd.pos(),
                ErrCode::InvalidIndex,
                &format!("index {} must be integer", xd),
            );
            return (invalid, None);
        }

        if x.mode.constant_val().is_none() {
            return (x.typ.unwrap(), None);
        }

        // a constant index i must be in bounds
        if x.mode.constant_val().unwrap().sign() < 0 {
            let xd = self.new_dis(&x);
            self.invalid_arg(
                xd.pos(),
                ErrCode::InvalidIndex,
                &format!("index {} must not be negative", xd),
            );
            return (invalid, None);
        }

        let (v, valid) = x.mode.constant_val().unwrap().int_as_i64();
        if !valid || (max.is_some() && v >= max.unwrap()) {
            let xd = self.new_dis(&x);
            let msg = format!("index {} is out of bounds", xd);
            self.error(xd.pos(), ErrCode::InvalidIndex, msg);
            return (invalid, None);
        }

        // 0 <= v [ && v < max ]
        (int_t, Some(v))
    }

    /// indexed_elts checks the elements of an array or slice composite
    /// literal against the literal's element type, and the element
    /// indices against the literal length if known. It returns the length
    /// of the literal (maximum index value + 1).
    pub fn indexed_elts(
        &mut self,
        elts: &Vec<Expr>,
        elem: TypeKey,
        length: Option<i64>,
        fctx: &mut FilesContext,
    ) -> i64 {
        let invalid = self.invalid_type();
        let mut visited: HashSet<i64> = HashSet::with_capacity(elts.len());
        let (mut index, mut max): (i64, i64) = (0, 0);
        for el in elts.iter() {
            // determine and check index
            let mut valid_index = false;
            let eval = match el {
                Expr::KeyValue(kv) => {
                    let (t, i) = self.index(&kv.key, length, fctx);
                    if t != invalid {
                        match i {
                            Some(i) => {
                                index = i;
                                valid_index = true;
                            }
                            None => {
                                let msg = format!(
                                    "index {} must be integer constant",
                                    self.new_dis(&kv.key)
                                );
                                self.error(
                                    el.pos(self.ast_objs),
                                    ErrCode::InvalidLitIndex,
                                    msg,
                                );
                            }
                        }
                    }
                    &kv.val
                }
                _ => {
                    if length.map_or(false, |l| index >= l) {
                        self.error(
                            el.pos(self.ast_objs),
                            ErrCode::OversizeArrayLit,
                            format!(
                                "index {} is out of bounds (>= {})",
                                index,
                                length.unwrap()
                            ),
                        );
                    } else {
                        valid_index = true;
                    }
                    el
                }
            };

            // if we have a valid index, check for duplicate entries
            if valid_index {
                if !visited.insert(index) {
                    self.error(
                        el.pos(self.ast_objs),
                        ErrCode::DuplicateLitKey,
                        format!("duplicate index {} in array or slice literal", index),
                    );
                }
            }
            index += 1;
            if index > max {
                max = index;
            }

            // check element against composite literal element type
            let mut x = Operand::new();
            self.expr_with_hint(&mut x, eval, elem, fctx);
            self.assignment(&mut x, Some(elem), "array or slice literal", fctx);
        }
        max
    }

    /// raw_expr typechecks expression e and initializes x with the
    /// expression value or type. If an error occurred, x.mode is set to
    /// invalid. If hint is present, it is the type of a composite literal
    /// element.
    pub fn raw_expr(
        &mut self,
        x: &mut Operand,
        e: &Expr,
        hint: Option<TypeKey>,
        fctx: &mut FilesContext,
    ) -> ExprKind {
        let kind = self.expr_internal(x, e, hint, fctx);

        let typ = match &x.mode {
            OperandMode::Invalid => self.invalid_type(),
            OperandMode::NoValue => self.tc_objs.universe().no_value_tuple(),
            _ => x.typ.unwrap(),
        };
        debug_assert!(x.expr.is_some());

        if typ::is_untyped(typ, self.tc_objs) {
            // delay type and value recording until we know the type
            // or until the end of type checking
            let ex = x.expr.clone().unwrap();
            fctx.remember_untyped(
                &ex,
                ExprInfo {
                    is_lhs: false,
                    mode: x.mode.clone(),
                    typ: typ,
                },
            );
        } else {
            self.result.record_type_and_value(e, x.mode.clone(), typ);
        }

        kind
    }

    /// err_exit sets the invalid operand and returns the statement kind
    /// to suppress follow-up errors in statement context.
    fn err_exit(&mut self, x: &mut Operand, e: &Expr) -> ExprKind {
        x.mode = OperandMode::Invalid;
        x.expr = Some(e.clone());
        ExprKind::Statement
    }

    /// expr_internal contains the core of type checking of expressions.
    /// Must only be called by raw_expr.
    fn expr_internal(
        &mut self,
        x: &mut Operand,
        e: &Expr,
        hint: Option<TypeKey>,
        fctx: &mut FilesContext,
    ) -> ExprKind {
        // make sure x has a valid state in case of bailout
        x.mode = OperandMode::Invalid;
        x.typ = Some(self.invalid_type());

        match e {
            Expr::Bad(_) => {
                return self.err_exit(x, e); // error was reported before
            }

            Expr::Ident(ikey) => {
                self.ident(x, *ikey, fctx);
            }

            Expr::Ellipsis(el) => {
                // ellipses are handled explicitly where they are legal
                // (array composite literals and parameter lists)
                self.error_str(el.pos, ErrCode::BadDotDotDotSyntax, "invalid use of '...'");
                return self.err_exit(x, e);
            }

            Expr::BasicLit(bl) => {
                x.set_const(&bl.token, self.tc_objs.universe());
                if x.mode.constant_val().map_or(false, |v| v.is_unknown()) {
                    // The parser already establishes syntactic
                    // correctness. If we reach here it's because of
                    // number under-/overflow.
                    self.error(
                        bl.pos,
                        ErrCode::InvalidConstVal,
                        format!("malformed constant: {}", bl.token),
                    );
                    return self.err_exit(x, e);
                }
            }

            Expr::FuncLit(fl) => {
                let sig = self.func_type(fl.typ, fctx);
                // Don't type-check the body right away: type-check it as
                // soon as possible, but before the enclosing scope
                // contents change.
                let iota = self.octx.iota.clone();
                let body = fl.body.clone();
                fctx.later(Box::new(move |checker, fctx| {
                    checker.func_body(sig, &body, iota, fctx);
                }));
                x.mode = OperandMode::Value;
                x.typ = Some(sig);
            }

            Expr::CompositeLit(cl) => {
                let mut open_array = false;
                let (typ_key, base_key) = match &cl.typ {
                    Some(texpr) => {
                        // composite literal type present - use it.
                        // [...]T array types may only appear with
                        // composite literals.
                        let mut t: Option<TypeKey> = None;
                        if let Expr::Array(atype) = texpr {
                            if let Some(Expr::Ellipsis(ell)) = &atype.len {
                                if ell.elt.is_none() {
                                    // We have an "open" [...]T array type.
                                    // Create a new ArrayType with unknown
                                    // length and finish setting it up
                                    // after analyzing the literal.
                                    let elem = self.type_expr(&atype.elt, fctx);
                                    t = Some(self.tc_objs.new_t_array(elem, None));
                                    open_array = true;
                                }
                            }
                        }
                        let t = match t {
                            Some(t) => t,
                            None => self.type_expr(texpr, fctx),
                        };
                        (t, t)
                    }
                    None => match hint {
                        Some(h) => {
                            // no composite literal type present - use
                            // hint (element type of enclosing type)
                            let hu = typ::underlying_type(h, self.tc_objs);
                            let base = match self.otype(hu).try_as_pointer() {
                                Some(p) => p.base(), // *T implies &T{}
                                None => h,
                            };
                            (h, base)
                        }
                        None => {
                            self.error_str(
                                e.pos(self.ast_objs),
                                ErrCode::UntypedLit,
                                "missing type in composite literal",
                            );
                            return self.err_exit(x, e);
                        }
                    },
                };

                let utype = typ::underlying_type(base_key, self.tc_objs);
                match self.otype(utype).clone() {
                    Type::Struct(sdetail) => {
                        self.struct_lit_elts(x, cl, typ_key, sdetail.fields().clone(), fctx);
                    }

                    Type::Array(adetail) => {
                        let n = self.indexed_elts(
                            &cl.elts,
                            adetail.elem(),
                            adetail.len().map(|l| l as i64),
                            fctx,
                        );
                        // If we have an array of unknown length (usually
                        // [...]T arrays) set the length now that we know
                        // it and record the type for the array.
                        if adetail.len().is_none() {
                            self.tc_objs.types[utype]
                                .try_as_array_mut()
                                .unwrap()
                                .set_len(n as u64);
                            // cl.typ is missing if we have a composite
                            // literal element that is itself a composite
                            // literal with omitted type. In that case
                            // there is nothing to record.
                            if open_array {
                                if let Some(texpr) = &cl.typ {
                                    self.result.record_type_and_value(
                                        texpr,
                                        OperandMode::TypeExpr,
                                        utype,
                                    );
                                }
                            }
                        }
                    }

                    Type::Slice(sdetail) => {
                        self.indexed_elts(&cl.elts, sdetail.elem(), None, fctx);
                    }

                    Type::Map(mdetail) => {
                        self.map_lit_elts(x, cl, &mdetail, fctx);
                    }

                    _ => {
                        // when "using" all elements unpack KeyValueExpr
                        // explicitly because use_exprs doesn't accept them
                        for el in cl.elts.iter() {
                            let eval = match el {
                                Expr::KeyValue(kv) => &kv.val,
                                _ => el,
                            };
                            self.use_expr(eval, fctx);
                        }
                        // if utype is invalid, an error was reported
                        // before
                        if utype != self.invalid_type() {
                            let msg = format!(
                                "invalid composite literal type {}",
                                self.new_dis(&typ_key)
                            );
                            self.error(e.pos(self.ast_objs), ErrCode::InvalidLit, msg);
                            return self.err_exit(x, e);
                        }
                    }
                }

                x.mode = OperandMode::Value;
                x.typ = Some(typ_key);
            }

            Expr::Paren(p) => {
                let kind = self.raw_expr(x, &p.expr, None, fctx);
                x.expr = Some(e.clone());
                return kind;
            }

            Expr::Selector(se) => {
                self.selector(x, se, fctx);
            }

            Expr::Index(ie) => {
                self.expr(x, &ie.expr, fctx);
                if x.invalid() {
                    self.use_expr(&ie.index, fctx);
                    return self.err_exit(x, e);
                }

                let mut valid = false;
                let mut length: Option<i64> = None;
                let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
                match self.otype(ut).clone() {
                    Type::Basic(b) if b.info() == BasicInfo::IsString => {
                        valid = true;
                        if let Some(v) = x.mode.constant_val() {
                            length = Some(v.str_val().len() as i64);
                        }
                        // an indexed string always yields a byte value
                        // (not a constant) even if the string and the
                        // index are constant
                        x.mode = OperandMode::Value;
                        x.typ = Some(self.basic_type(BasicType::Byte)); // use 'byte' name
                    }

                    Type::Array(a) => {
                        valid = true;
                        length = a.len().map(|l| l as i64);
                        if x.mode != OperandMode::Variable {
                            x.mode = OperandMode::Value;
                        }
                        x.typ = Some(a.elem());
                    }

                    Type::Pointer(p) => {
                        let bu = typ::underlying_type(p.base(), self.tc_objs);
                        if let Some(a) = self.otype(bu).try_as_array() {
                            valid = true;
                            length = a.len().map(|l| l as i64);
                            let elem = a.elem();
                            x.mode = OperandMode::Variable;
                            x.typ = Some(elem);
                        }
                    }

                    Type::Slice(s) => {
                        valid = true;
                        x.mode = OperandMode::Variable;
                        x.typ = Some(s.elem());
                    }

                    Type::Map(m) => {
                        let mut key = Operand::new();
                        self.expr(&mut key, &ie.index, fctx);
                        self.assignment(&mut key, Some(m.key()), "map index", fctx);
                        // ok to continue even if indexing failed - map
                        // element type is known
                        x.mode = OperandMode::MapIndex;
                        x.typ = Some(m.elem());
                        x.expr = Some(e.clone());
                        return ExprKind::Expression;
                    }

                    _ => {}
                }

                if !valid {
                    let xd = self.new_dis(x);
                    self.invalid_op(
                        xd.pos(),
                        ErrCode::NonIndexableOperand,
                        &format!("cannot index {}", xd),
                    );
                    return self.err_exit(x, e);
                }

                self.index(&ie.index, length, fctx);
                // ok to continue
            }

            Expr::Slice(se) => {
                self.expr(x, &se.expr, fctx);
                if x.invalid() {
                    self.use_expr_opt(&se.low, fctx);
                    self.use_expr_opt(&se.high, fctx);
                    self.use_expr_opt(&se.max, fctx);
                    return self.err_exit(x, e);
                }

                let mut valid = false;
                let mut length: Option<i64> = None;
                let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
                match self.otype(ut).clone() {
                    Type::Basic(b) if b.info() == BasicInfo::IsString => {
                        if se.slice3 {
                            let xd = self.new_dis(x);
                            self.invalid_op(
                                xd.pos(),
                                ErrCode::InvalidSliceExpr,
                                "3-index slice of string",
                            );
                            return self.err_exit(x, e);
                        }
                        valid = true;
                        if let Some(v) = x.mode.constant_val() {
                            length = Some(v.str_val().len() as i64);
                        }
                        // spec: "For untyped string operands the result
                        // is a non-constant value of type string."
                        if b.typ() == BasicType::UntypedString {
                            x.typ = Some(self.basic_type(BasicType::Str));
                        }
                    }

                    Type::Array(a) => {
                        valid = true;
                        length = a.len().map(|l| l as i64);
                        if x.mode != OperandMode::Variable {
                            let xd = self.new_dis(x);
                            self.invalid_op(
                                xd.pos(),
                                ErrCode::NonSliceableOperand,
                                &format!("cannot slice {} (value not addressable)", xd),
                            );
                            return self.err_exit(x, e);
                        }
                        x.typ = Some(self.tc_objs.new_t_slice(a.elem()));
                    }

                    Type::Pointer(p) => {
                        let bu = typ::underlying_type(p.base(), self.tc_objs);
                        if let Some(a) = self.otype(bu).try_as_array().cloned() {
                            valid = true;
                            length = a.len().map(|l| l as i64);
                            x.typ = Some(self.tc_objs.new_t_slice(a.elem()));
                        }
                    }

                    Type::Slice(_) => {
                        valid = true;
                        // x.typ doesn't change
                    }

                    _ => {}
                }

                if !valid {
                    let xd = self.new_dis(x);
                    self.invalid_op(
                        xd.pos(),
                        ErrCode::NonSliceableOperand,
                        &format!("cannot slice {}", xd),
                    );
                    return self.err_exit(x, e);
                }

                x.mode = OperandMode::Value;

                // spec: "Only the first index may be omitted; it defaults
                // to 0."
                if se.slice3 && (se.high.is_none() || se.max.is_none()) {
                    self.invalid_ast(se.r_brack, "2nd and 3rd index required in 3-index slice");
                    return self.err_exit(x, e);
                }

                // check indices
                let mut ind: [i64; 3] = [-1; 3];
                let exprs = [&se.low, &se.high, &se.max];
                for (i, eopt) in exprs.iter().enumerate() {
                    let mut val: i64 = -1;
                    match eopt {
                        Some(ex) => {
                            // The "capacity" is only known statically for
                            // strings, arrays, and pointers to arrays,
                            // and it is the same as the length for those
                            // types.
                            let max = length.map(|l| l + 1);
                            let (_, v) = self.index(ex, max, fctx);
                            if let Some(v) = v {
                                val = v;
                            }
                        }
                        None => {
                            if i == 0 {
                                // default is 0 for the first index
                                val = 0;
                            } else if let Some(l) = length {
                                // default is length (== capacity)
                                // otherwise
                                val = l;
                            }
                        }
                    }
                    ind[i] = val;
                }

                // constant indices must be in range
                // (index already checks that existing indices >= 0)
                'swapped: for (i, &xv) in ind[..ind.len() - 1].iter().enumerate() {
                    if xv > 0 {
                        for &yv in ind[i + 1..].iter() {
                            if yv >= 0 && xv > yv {
                                self.error(
                                    se.r_brack,
                                    ErrCode::SwappedSliceIndices,
                                    format!("swapped slice indices: {} > {}", xv, yv),
                                );
                                break 'swapped; // only report one error
                            }
                        }
                    }
                }
            }

            Expr::TypeAssert(ta) => {
                self.expr(x, &ta.expr, fctx);
                if x.invalid() {
                    return self.err_exit(x, e);
                }
                let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
                if self.otype(ut).try_as_interface().is_none() {
                    let xd = self.new_dis(x);
                    self.invalid_op(
                        xd.pos(),
                        ErrCode::InvalidAssert,
                        &format!("{} is not an interface", xd),
                    );
                    return self.err_exit(x, e);
                }
                // x.(type) expressions are handled explicitly in type
                // switches
                let texpr = match &ta.typ {
                    Some(t) => t,
                    None => {
                        self.error_str(
                            e.pos(self.ast_objs),
                            ErrCode::BadTypeKeyword,
                            "use of .(type) outside type switch",
                        );
                        return self.err_exit(x, e);
                    }
                };
                let t = self.type_expr(texpr, fctx);
                if t == self.invalid_type() {
                    return self.err_exit(x, e);
                }
                self.type_assertion(x, ut, t);
                x.mode = OperandMode::CommaOk;
                x.typ = Some(t);
            }

            Expr::Call(call) => {
                return self.call(x, call, fctx);
            }

            Expr::Star(se) => {
                self.expr_or_type(x, &se.expr, fctx);
                match x.mode {
                    OperandMode::Invalid => {
                        return self.err_exit(x, e);
                    }
                    OperandMode::TypeExpr => {
                        x.typ = Some(self.tc_objs.new_t_pointer(x.typ.unwrap()));
                    }
                    _ => {
                        let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
                        match self.otype(ut).try_as_pointer() {
                            Some(p) => {
                                let base = p.base();
                                x.mode = OperandMode::Variable;
                                x.typ = Some(base);
                            }
                            None => {
                                let xd = self.new_dis(x);
                                self.invalid_op(
                                    xd.pos(),
                                    ErrCode::InvalidIndirection,
                                    &format!("cannot indirect {}", xd),
                                );
                                return self.err_exit(x, e);
                            }
                        }
                    }
                }
            }

            Expr::Unary(ue) => {
                self.unary(x, ue, fctx);
                if x.invalid() {
                    return self.err_exit(x, e);
                }
                if ue.op == Token::ARROW {
                    x.expr = Some(e.clone());
                    // receive operations may appear in statement context
                    return ExprKind::Statement;
                }
            }

            Expr::Binary(be) => {
                self.binary(x, Some(e), &be.expr_a, &be.expr_b, &be.op, be.op_pos, fctx);
                if x.invalid() {
                    return self.err_exit(x, e);
                }
            }

            Expr::KeyValue(kv) => {
                // key:value expressions are handled in composite literals
                self.invalid_ast(kv.colon, "no key:value expected");
                return self.err_exit(x, e);
            }

            Expr::Array(_)
            | Expr::Struct(_)
            | Expr::Func(_)
            | Expr::Interface(_)
            | Expr::Map(_)
            | Expr::Chan(_) => {
                let t = self.type_expr(e, fctx);
                x.mode = OperandMode::TypeExpr;
                x.typ = Some(t);
                // Note: raw_expr (caller of expr_internal) will call
                // record_type_and_value even though type_expr has already
                // done so. This is fine as both times the same expression
                // and type are recorded.
            }
        }

        // everything went well
        x.expr = Some(e.clone());
        ExprKind::Expression
    }

    /// struct_lit_elts checks the elements of a struct composite literal.
    fn struct_lit_elts(
        &mut self,
        x: &mut Operand,
        cl: &Rc<ast::CompositeLit>,
        typ_key: TypeKey,
        fields: Vec<super::super::objects::ObjKey>,
        fctx: &mut FilesContext,
    ) {
        if cl.elts.is_empty() {
            return;
        }
        if matches!(cl.elts[0], Expr::KeyValue(_)) {
            // all elements must have keys
            let mut visited = vec![false; fields.len()];
            for el in cl.elts.iter() {
                let kv = match el {
                    Expr::KeyValue(kv) => kv,
                    _ => {
                        self.error_str(
                            el.pos(self.ast_objs),
                            ErrCode::MixedStructLit,
                            "mixture of field:value and value elements in struct literal",
                        );
                        continue;
                    }
                };
                // do all possible checks early (before exiting due to
                // errors) so we don't drop information on the floor
                self.expr(x, &kv.val, fctx);
                let ikey = match kv.key.try_as_ident() {
                    Some(i) => *i,
                    None => {
                        let msg = format!(
                            "invalid field name {} in struct literal",
                            self.new_dis(&kv.key)
                        );
                        self.error(kv.key.pos(self.ast_objs), ErrCode::InvalidLitField, msg);
                        continue;
                    }
                };
                let name = self.ast_objs.idents[ikey].name.clone();
                let i = match super::super::lookup::field_index(
                    &fields,
                    Some(self.pkg),
                    &name,
                    self.tc_objs,
                ) {
                    Some(i) => i,
                    None => {
                        self.error(
                            kv.key.pos(self.ast_objs),
                            ErrCode::MissingLitField,
                            format!("unknown field {} in struct literal", name),
                        );
                        continue;
                    }
                };
                let fld = fields[i];
                self.result.record_use(ikey, fld);
                let etyp = *self.lobj(fld).typ();
                self.assignment(x, etyp, "struct literal", fctx);
                // 0 <= i < fields.len()
                if visited[i] {
                    self.error(
                        kv.key.pos(self.ast_objs),
                        ErrCode::DuplicateLitField,
                        format!("duplicate field name {} in struct literal", name),
                    );
                    continue;
                }
                visited[i] = true;
            }
        } else {
            // no element must have a key
            for (i, el) in cl.elts.iter().enumerate() {
                if let Expr::KeyValue(_) = el {
                    self.error_str(
                        el.pos(self.ast_objs),
                        ErrCode::MixedStructLit,
                        "mixture of field:value and value elements in struct literal",
                    );
                    continue;
                }
                self.expr(x, el, fctx);
                if i >= fields.len() {
                    let xd = self.new_dis(x);
                    self.error_str(
                        xd.pos(),
                        ErrCode::InvalidStructLit,
                        "too many values in struct literal",
                    );
                    break; // cannot continue
                }
                // i < fields.len()
                let fld = fields[i];
                let fobj = self.lobj(fld);
                let etyp = *fobj.typ();
                if !fobj.exported() && fobj.pkg() != &Some(self.pkg) {
                    let name = fobj.name().clone();
                    let msg = format!(
                        "implicit assignment to unexported field {} in {} literal",
                        name,
                        self.new_dis(&typ_key)
                    );
                    self.error(x.pos(self.ast_objs), ErrCode::UnexportedLitField, msg);
                    continue;
                }
                self.assignment(x, etyp, "struct literal", fctx);
            }
            if cl.elts.len() < fields.len() {
                self.error_str(
                    cl.r_brace,
                    ErrCode::InvalidStructLit,
                    "too few values in struct literal",
                );
                // ok to continue
            }
        }
    }

    /// map_lit_elts checks the elements of a map composite literal.
    fn map_lit_elts(
        &mut self,
        x: &mut Operand,
        cl: &Rc<ast::CompositeLit>,
        mdetail: &typ::MapDetail,
        fctx: &mut FilesContext,
    ) {
        let (ktype, vtype) = (mdetail.key(), mdetail.elem());
        let key_is_interface = typ::is_interface(ktype, self.tc_objs);
        let mut visited: HashMap<ConstKey, Vec<TypeKey>> = HashMap::with_capacity(cl.elts.len());
        for el in cl.elts.iter() {
            let kv = match el {
                Expr::KeyValue(kv) => kv,
                _ => {
                    self.error_str(
                        el.pos(self.ast_objs),
                        ErrCode::MissingLitKey,
                        "missing key in map literal",
                    );
                    continue;
                }
            };
            self.expr_with_hint(x, &kv.key, ktype, fctx);
            self.assignment(x, Some(ktype), "map literal", fctx);
            if x.invalid() {
                continue;
            }
            if let Some(val) = x.mode.constant_val() {
                let mut duplicate = false;
                // if the key is of interface type, the type is also
                // significant when checking for duplicates
                let xkey = key_val(val);
                if key_is_interface {
                    let xt = x.typ.unwrap();
                    let entry = visited.entry(xkey).or_insert_with(Vec::new);
                    for vt in entry.iter() {
                        if typ::identical(*vt, xt, self.tc_objs) {
                            duplicate = true;
                            break;
                        }
                    }
                    entry.push(xt);
                } else {
                    duplicate = visited.insert(xkey, vec![]).is_some();
                }
                if duplicate {
                    let msg = format!(
                        "duplicate key {} in map literal",
                        x.mode.constant_val().unwrap()
                    );
                    self.error(x.pos(self.ast_objs), ErrCode::DuplicateLitKey, msg);
                    continue;
                }
            }
            self.expr_with_hint(x, &kv.val, vtype, fctx);
            self.assignment(x, Some(vtype), "map literal", fctx);
        }
    }

    /// type_assertion checks that x.(T) is legal; xtyp must be the
    /// (interface) underlying type of x.
    pub fn type_assertion(&mut self, x: &Operand, xtyp: TypeKey, t: TypeKey) {
        let (method, wrong) =
            match super::super::lookup::assertable_to(xtyp, t, self.tc_objs) {
                Some(mw) => mw,
                None => return,
            };
        let mname = self.lobj(method).name().clone();
        let msg = match wrong {
            Some(found) => {
                let mtyp = *self.lobj(method).typ();
                let ftyp = *self.lobj(found).typ();
                if typ::identical_option(&mtyp, &ftyp, self.tc_objs) {
                    format!("missing method {} ({} has pointer receiver)", mname, mname)
                } else {
                    format!(
                        "wrong type for method {} (have {}, want {})",
                        mname,
                        self.new_dis(&ftyp),
                        self.new_dis(&mtyp)
                    )
                }
            }
            None => format!("missing method {}", mname),
        };
        let xd = self.new_dis(x);
        let full = format!(
            "{} cannot have dynamic type {} ({})",
            xd,
            self.new_dis(&t),
            msg
        );
        self.error(xd.pos(), ErrCode::ImpossibleAssert, full);
    }

    /// single_value reports an error if x is a tuple value.
    pub fn single_value(&mut self, x: &mut Operand) {
        if x.mode == OperandMode::Value {
            // tuple types are never named - no need for underlying type
            if let Some(tuple) = self.otype(x.typ.unwrap()).try_as_tuple() {
                let n = tuple.vars().len();
                debug_assert!(n != 1);
                let xd = self.new_dis(x);
                let msg = format!("{}-valued {} where single value is expected", n, xd);
                self.error(xd.pos(), ErrCode::TooManyValues, msg);
                x.mode = OperandMode::Invalid;
            }
        }
    }

    /// expr typechecks expression e and initializes x with the expression
    /// value. The result must be a single value.
    /// If an error occurred, x.mode is set to invalid.
    pub fn expr(&mut self, x: &mut Operand, e: &Expr, fctx: &mut FilesContext) {
        self.multi_expr(x, e, fctx);
        self.single_value(x);
    }

    /// multi_expr is like expr but the result may be a multi-value.
    pub fn multi_expr(&mut self, x: &mut Operand, e: &Expr, fctx: &mut FilesContext) {
        self.raw_expr(x, e, None, fctx);
        let (code, msg) = match &x.mode {
            OperandMode::NoValue => (ErrCode::TooManyValues, "used as value"),
            OperandMode::Builtin(_) => (ErrCode::UncalledBuiltin, "must be called"),
            OperandMode::TypeExpr => (ErrCode::NotAnExpr, "is not an expression"),
            _ => return,
        };
        let xd = self.new_dis(x);
        let full = format!("{} {}", xd, msg);
        self.error(xd.pos(), code, full);
        x.mode = OperandMode::Invalid;
    }

    /// expr_with_hint typechecks expression e and initializes x with the
    /// expression value; hint is the type of a composite literal element.
    /// If an error occurred, x.mode is set to invalid.
    pub fn expr_with_hint(
        &mut self,
        x: &mut Operand,
        e: &Expr,
        hint: TypeKey,
        fctx: &mut FilesContext,
    ) {
        self.raw_expr(x, e, Some(hint), fctx);
        self.single_value(x);
        let (code, msg) = match &x.mode {
            OperandMode::NoValue => (ErrCode::TooManyValues, "used as value"),
            OperandMode::Builtin(_) => (ErrCode::UncalledBuiltin, "must be called"),
            OperandMode::TypeExpr => (ErrCode::NotAnExpr, "is not an expression"),
            _ => return,
        };
        let xd = self.new_dis(x);
        let full = format!("{} {}", xd, msg);
        self.error(xd.pos(), code, full);
        x.mode = OperandMode::Invalid;
    }

    /// expr_or_type typechecks expression or type e and initializes x
    /// with the expression value or type.
    /// If an error occurred, x.mode is set to invalid.
    pub fn expr_or_type(&mut self, x: &mut Operand, e: &Expr, fctx: &mut FilesContext) {
        self.raw_expr(x, e, None, fctx);
        self.single_value(x);
        if x.mode == OperandMode::NoValue {
            let xd = self.new_dis(x);
            let msg = format!("{} used as value or type", xd);
            self.error(xd.pos(), ErrCode::NotAnExpr, msg);
            x.mode = OperandMode::Invalid;
        }
    }

    /// use_expr evaluates an expression for its side effects, discarding
    /// the result; it keeps "declared but not used" accounting accurate
    /// on error paths.
    pub fn use_expr(&mut self, e: &Expr, fctx: &mut FilesContext) {
        let mut x = Operand::new();
        self.raw_expr(&mut x, e, None, fctx);
    }

    pub fn use_exprs(&mut self, exprs: &[Expr], fctx: &mut FilesContext) {
        for e in exprs.iter() {
            self.use_expr(e, fctx);
        }
    }

    pub fn use_expr_opt(&mut self, e: &Option<Expr>, fctx: &mut FilesContext) {
        if let Some(e) = e {
            self.use_expr(e, fctx);
        }
    }
}
