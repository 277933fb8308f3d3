// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
//
//
// This code is adapted from the official Go code written in Go
// with license as follows:
// Copyright 2013 The Go Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::super::constant::Value;
use super::super::operand::{Operand, OperandMode};
use super::super::typ::{self, BasicInfo, BasicType, Type};
use super::super::universe::Builtin;
use super::check::{Checker, FilesContext};
use super::errors::ErrCode;
use golite_parser::ast::{CallExpr, Expr, Node};
use std::rc::Rc;

impl<'a> Checker<'a> {
    /// builtin type-checks a call to the built-in specified by id and
    /// reports whether the call is valid, with *x holding the result;
    /// but x.expr is not set. If the call is invalid, the result is
    /// false, and *x is undefined.
    pub fn builtin(
        &mut self,
        x: &mut Operand,
        call: &Rc<CallExpr>,
        id: Builtin,
        fctx: &mut FilesContext,
    ) -> bool {
        let binfo = self.tc_objs.universe().builtins()[&id];

        if let Some(ell) = call.ellipsis {
            self.invalid_op(
                ell,
                ErrCode::InvalidBuiltinArg,
                &format!("invalid use of ... with built-in {}", binfo.name),
            );
            self.use_exprs(&call.args, fctx);
            return false;
        }

        // For len(x) and cap(x) we need to know if x contains any
        // function calls or receive operations. Save/restore the current
        // setting and set has_call_or_recv to false for the evaluation
        // of x so that we can check it afterwards.
        let hcor_backup = match id {
            Builtin::Len | Builtin::Cap => {
                let b = self.octx.has_call_or_recv;
                self.octx.has_call_or_recv = false;
                Some(b)
            }
            _ => None,
        };

        let nargs = call.args.len();
        let count_ok = if binfo.variadic {
            nargs >= binfo.arg_count
        } else {
            nargs == binfo.arg_count
        };
        if !count_ok {
            self.use_exprs(&call.args, fctx);
            let ce = Expr::Call(call.clone());
            let msg = format!(
                "{} arguments for {} (expected {}, found {})",
                if nargs < binfo.arg_count {
                    "not enough"
                } else {
                    "too many"
                },
                self.new_dis(&ce),
                binfo.arg_count,
                nargs
            );
            self.invalid_op(call.r_paren, ErrCode::WrongArgCount, &msg);
            return false;
        }

        let ok = match id {
            Builtin::Len | Builtin::Cap => self.builtin_len_cap(x, call, id, fctx),
            Builtin::Complex => self.builtin_complex(x, call, fctx),
            Builtin::Real | Builtin::Imag => self.builtin_real_imag(x, call, id, fctx),
            Builtin::New => self.builtin_new(x, call, fctx),
            Builtin::Make => self.builtin_make(x, call, fctx),
            Builtin::Delete => self.builtin_delete(x, call, fctx),
        };

        if let Some(b) = hcor_backup {
            if b {
                self.octx.has_call_or_recv = true;
            }
        }
        ok
    }

    fn builtin_len_cap(
        &mut self,
        x: &mut Operand,
        call: &Rc<CallExpr>,
        id: Builtin,
        fctx: &mut FilesContext,
    ) -> bool {
        self.expr(x, &call.args[0], fctx);
        if x.invalid() {
            return false;
        }

        // implicit dereference of a pointer to an array
        let mut ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
        if let Some(p) = self.otype(ut).try_as_pointer() {
            let bu = typ::underlying_type(p.base(), self.tc_objs);
            if self.otype(bu).try_as_array().is_some() {
                ut = bu;
            }
        }

        let mut mode = OperandMode::Invalid;
        match self.otype(ut).clone() {
            Type::Basic(b) if b.info() == BasicInfo::IsString && id == Builtin::Len => {
                mode = match x.mode.constant_val() {
                    Some(v) => OperandMode::Constant(Value::with_u64(v.str_val().len() as u64)),
                    None => OperandMode::Value,
                };
            }
            Type::Array(a) => {
                // spec: "The expressions len(s) and cap(s) are constants
                // if the type of s is an array or pointer to an array and
                // the expression s does not contain channel receives or
                // (non-constant) function calls"
                mode = if self.octx.has_call_or_recv {
                    OperandMode::Value
                } else {
                    OperandMode::Constant(Value::with_u64(a.len().unwrap_or(0)))
                };
            }
            Type::Slice(_) | Type::Chan(_) => mode = OperandMode::Value,
            Type::Map(_) if id == Builtin::Len => mode = OperandMode::Value,
            _ => {}
        }

        if matches!(mode, OperandMode::Invalid) {
            let name = self.tc_objs.universe().builtins()[&id].name;
            let xd = self.new_dis(x);
            let msg = format!("invalid argument {} for {}", xd, name);
            self.invalid_arg(xd.pos(), ErrCode::InvalidBuiltinArg, &msg);
            return false;
        }
        x.mode = mode;
        x.typ = Some(self.basic_type(BasicType::Int));
        true
    }

    fn builtin_complex(
        &mut self,
        x: &mut Operand,
        call: &Rc<CallExpr>,
        fctx: &mut FilesContext,
    ) -> bool {
        let mut y = Operand::new();
        self.expr(x, &call.args[0], fctx);
        self.expr(&mut y, &call.args[1], fctx);
        if x.invalid() || y.invalid() {
            return false;
        }

        // convert or check untyped arguments
        let xu = typ::is_untyped(x.typ.unwrap(), self.tc_objs);
        let yu = typ::is_untyped(y.typ.unwrap(), self.tc_objs);
        match (xu, yu) {
            (false, false) => {} // x, y are typed => nothing to do
            (true, false) => {
                self.convert_untyped(x, y.typ.unwrap(), fctx);
                if x.invalid() {
                    return false;
                }
            }
            (false, true) => {
                self.convert_untyped(&mut y, x.typ.unwrap(), fctx);
                if y.invalid() {
                    return false;
                }
            }
            (true, true) => {
                // both untyped; the constant checks below apply
            }
        }

        if !typ::identical(x.typ.unwrap(), y.typ.unwrap(), self.tc_objs) {
            let msg = format!(
                "mismatched types {} and {}",
                self.new_dis(&x.typ.unwrap()),
                self.new_dis(&y.typ.unwrap())
            );
            self.invalid_op(x.pos(self.ast_objs), ErrCode::MismatchedTypes, &msg);
            return false;
        }

        let both_const = x.mode.constant_val().is_some() && y.mode.constant_val().is_some();

        // determine the result type
        let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
        let bkind = self.otype(ut).try_as_basic().map(|b| b.typ());
        let res = match bkind {
            Some(BasicType::Float32) => self.basic_type(BasicType::Complex64),
            Some(BasicType::Float64) => self.basic_type(BasicType::Complex128),
            Some(k) if k.is_untyped() => {
                if both_const {
                    self.basic_type(BasicType::UntypedComplex)
                } else {
                    // untyped non-constant operands take their default
                    // float type
                    let f64_t = self.basic_type(BasicType::Float64);
                    self.convert_untyped(x, f64_t, fctx);
                    self.convert_untyped(&mut y, f64_t, fctx);
                    if x.invalid() || y.invalid() {
                        return false;
                    }
                    self.basic_type(BasicType::Complex128)
                }
            }
            _ => {
                let msg = format!(
                    "arguments have type {}, expected floating-point",
                    self.new_dis(&x.typ.unwrap())
                );
                self.invalid_arg(x.pos(self.ast_objs), ErrCode::InvalidBuiltinArg, &msg);
                return false;
            }
        };

        if both_const {
            let re = x.mode.constant_val().unwrap().to_float();
            let im = y.mode.constant_val().unwrap().to_float();
            let val = match (&re, &im) {
                (Value::Float(r), Value::Float(i)) => Value::Complex(*r, *i),
                _ => {
                    let xd = self.new_dis(x);
                    let msg = format!("complex argument {} must be a floating-point value", xd);
                    self.invalid_arg(xd.pos(), ErrCode::InvalidBuiltinArg, &msg);
                    return false;
                }
            };
            x.mode = OperandMode::Constant(val);
        } else {
            x.mode = OperandMode::Value;
        }

        x.typ = Some(res);
        true
    }

    fn builtin_real_imag(
        &mut self,
        x: &mut Operand,
        call: &Rc<CallExpr>,
        id: Builtin,
        fctx: &mut FilesContext,
    ) -> bool {
        self.expr(x, &call.args[0], fctx);
        if x.invalid() {
            return false;
        }
        let name = self.tc_objs.universe().builtins()[&id].name;

        let res = if typ::is_untyped(x.typ.unwrap(), self.tc_objs) {
            match x.mode.constant_val() {
                Some(v) if !v.to_complex().is_unknown() => {
                    self.basic_type(BasicType::UntypedFloat)
                }
                _ => {
                    let xd = self.new_dis(x);
                    let msg = format!("invalid argument {} for {}", xd, name);
                    self.invalid_arg(xd.pos(), ErrCode::InvalidBuiltinArg, &msg);
                    return false;
                }
            }
        } else {
            let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
            match self.otype(ut).try_as_basic().map(|b| b.typ()) {
                Some(BasicType::Complex64) => self.basic_type(BasicType::Float32),
                Some(BasicType::Complex128) => self.basic_type(BasicType::Float64),
                _ => {
                    let xd = self.new_dis(x);
                    let msg = format!("invalid argument {} for {}", xd, name);
                    self.invalid_arg(xd.pos(), ErrCode::InvalidBuiltinArg, &msg);
                    return false;
                }
            }
        };

        if let Some(v) = x.mode.constant_val() {
            let val = match id {
                Builtin::Real => v.to_complex().real(),
                _ => v.to_complex().imag(),
            };
            x.mode = OperandMode::Constant(val);
        } else {
            x.mode = OperandMode::Value;
        }
        x.typ = Some(res);
        true
    }

    fn builtin_new(
        &mut self,
        x: &mut Operand,
        call: &Rc<CallExpr>,
        fctx: &mut FilesContext,
    ) -> bool {
        let t = self.type_expr(&call.args[0], fctx);
        if t == self.invalid_type() {
            return false;
        }
        x.mode = OperandMode::Value;
        x.typ = Some(self.tc_objs.new_t_pointer(t));
        true
    }

    fn builtin_make(
        &mut self,
        x: &mut Operand,
        call: &Rc<CallExpr>,
        fctx: &mut FilesContext,
    ) -> bool {
        let t = self.type_expr(&call.args[0], fctx);
        if t == self.invalid_type() {
            return false;
        }
        let ut = typ::underlying_type(t, self.tc_objs);
        let (min, max) = match self.otype(ut) {
            Type::Slice(_) => (2, 3),
            Type::Map(_) | Type::Chan(_) => (1, 2),
            _ => {
                let td = self.new_dis(&t);
                let msg = format!("cannot make {}; type must be slice, map, or channel", td);
                self.invalid_arg(call.args[0].pos(self.ast_objs), ErrCode::InvalidBuiltinArg, &msg);
                return false;
            }
        };
        let nargs = call.args.len();
        if nargs < min || max < nargs {
            let ce = Expr::Call(call.clone());
            let msg = format!(
                "{} expects {} or {} arguments; found {}",
                self.new_dis(&ce),
                min,
                max,
                nargs
            );
            self.invalid_op(call.r_paren, ErrCode::WrongArgCount, &msg);
            return false;
        }
        // sizes must be integers and, if constant, in bounds
        let mut sizes: Vec<i64> = Vec::new();
        for arg in call.args[1..].iter() {
            let (st, sv) = self.index(arg, None, fctx);
            if st != self.invalid_type() {
                if let Some(v) = sv {
                    sizes.push(v);
                }
            }
        }
        if sizes.len() == 2 && sizes[0] > sizes[1] {
            self.invalid_arg(
                call.args[1].pos(self.ast_objs),
                ErrCode::InvalidBuiltinArg,
                "length larger than capacity",
            );
            // ok to continue
        }
        x.mode = OperandMode::Value;
        x.typ = Some(t);
        true
    }

    fn builtin_delete(
        &mut self,
        x: &mut Operand,
        call: &Rc<CallExpr>,
        fctx: &mut FilesContext,
    ) -> bool {
        self.expr(x, &call.args[0], fctx);
        if x.invalid() {
            return false;
        }
        let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
        let mdetail = match self.otype(ut).try_as_map().cloned() {
            Some(m) => m,
            None => {
                let xd = self.new_dis(x);
                let msg = format!("{} is not a map", xd);
                self.invalid_arg(xd.pos(), ErrCode::InvalidBuiltinArg, &msg);
                return false;
            }
        };
        let mut k = Operand::new();
        self.expr(&mut k, &call.args[1], fctx);
        if k.invalid() {
            return false;
        }
        self.assignment(&mut k, Some(mdetail.key()), "argument to delete", fctx);
        if k.invalid() {
            return false;
        }
        x.mode = OperandMode::NoValue;
        true
    }
}
