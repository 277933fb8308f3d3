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

use super::super::lookup::{self, LookupResult};
use super::super::obj::EntityType;
use super::super::objects::ObjKey;
use super::super::operand::{Operand, OperandMode};
use super::super::typ::{self, SignatureDetail};
use super::super::universe::ExprKind;
use super::check::{Checker, FilesContext};
use super::errors::ErrCode;
use golite_parser::ast::{CallExpr, Expr, Node, SelectorExpr};
use std::rc::Rc;

impl<'a> Checker<'a> {
    /// call typechecks a call or conversion expression.
    pub fn call(&mut self, x: &mut Operand, e: &Rc<CallExpr>, fctx: &mut FilesContext) -> ExprKind {
        self.expr_or_type(x, &e.func, fctx);

        let call_expr = Expr::Call(e.clone());
        match x.mode.clone() {
            OperandMode::Invalid => {
                self.use_exprs(&e.args, fctx);
                x.expr = Some(call_expr);
                ExprKind::Statement
            }
            OperandMode::TypeExpr => {
                // conversion
                let t = x.typ.unwrap();
                x.mode = OperandMode::Invalid;
                match e.args.len() {
                    0 => {
                        let msg =
                            format!("missing argument in conversion to {}", self.new_dis(&t));
                        self.error(e.r_paren, ErrCode::WrongArgCount, msg);
                    }
                    1 => {
                        self.expr(x, &e.args[0], fctx);
                        if !x.invalid() {
                            self.conversion(x, t, fctx);
                        }
                    }
                    _ => {
                        self.use_exprs(&e.args, fctx);
                        let pos = e.args[e.args.len() - 1].pos(self.ast_objs);
                        let msg =
                            format!("too many arguments in conversion to {}", self.new_dis(&t));
                        self.error(pos, ErrCode::WrongArgCount, msg);
                    }
                }
                x.expr = Some(call_expr);
                ExprKind::Conversion
            }
            OperandMode::Builtin(id) => {
                if !self.builtin(x, e, id, fctx) {
                    x.mode = OperandMode::Invalid;
                }
                x.expr = Some(call_expr);
                // a non-constant result implies a function call
                self.octx.has_call_or_recv = !matches!(
                    x.mode,
                    OperandMode::Invalid | OperandMode::Constant(_)
                );
                self.tc_objs.universe().builtins()[&id].kind
            }
            _ => {
                // function/method call
                let ut = typ::underlying_type(x.typ.unwrap(), self.tc_objs);
                let sig = match self.otype(ut).try_as_signature().cloned() {
                    Some(sig) => sig,
                    None => {
                        let xd = self.new_dis(x);
                        self.invalid_op(
                            xd.pos(),
                            ErrCode::InvalidCall,
                            &format!("cannot call non-function {}", xd),
                        );
                        x.mode = OperandMode::Invalid;
                        x.expr = Some(call_expr);
                        return ExprKind::Statement;
                    }
                };

                let args = self.call_args(e, fctx);
                self.arguments(e, &sig, args, fctx);

                // determine result
                let results = self.otype(sig.results()).try_as_tuple().unwrap();
                match results.vars().len() {
                    0 => x.mode = OperandMode::NoValue,
                    1 => {
                        let rt = *self.lobj(results.vars()[0]).typ();
                        x.mode = OperandMode::Value;
                        x.typ = rt; // unpack tuple
                    }
                    _ => {
                        x.mode = OperandMode::Value;
                        x.typ = Some(sig.results());
                    }
                }
                self.octx.has_call_or_recv = true;
                x.expr = Some(call_expr);
                ExprKind::Statement
            }
        }
    }

    /// call_args evaluates the arguments of a call. A single argument
    /// that is a multi-valued expression is expanded into one operand per
    /// value.
    fn call_args(&mut self, e: &Rc<CallExpr>, fctx: &mut FilesContext) -> Vec<Operand> {
        let mut args = Vec::with_capacity(e.args.len());
        if e.args.len() == 1 {
            let mut x0 = Operand::new();
            self.multi_expr(&mut x0, &e.args[0], fctx);
            if !x0.invalid() {
                if let Some(tuple) = self.otype(x0.typ.unwrap()).try_as_tuple().cloned() {
                    for var in tuple.vars().iter() {
                        let vt = *self.lobj(*var).typ();
                        args.push(Operand::new_with(
                            OperandMode::Value,
                            x0.expr.clone(),
                            vt,
                        ));
                    }
                    return args;
                }
            }
            args.push(x0);
        } else {
            for arg in e.args.iter() {
                let mut x = Operand::new();
                self.expr(&mut x, arg, fctx);
                args.push(x);
            }
        }
        args
    }

    /// arguments checks argument passing for the call with the given
    /// signature.
    fn arguments(
        &mut self,
        e: &Rc<CallExpr>,
        sig: &SignatureDetail,
        args: Vec<Operand>,
        fctx: &mut FilesContext,
    ) {
        let variadic = sig.variadic();
        let params = self.otype(sig.params()).try_as_tuple().unwrap().vars().clone();
        let nparams = params.len();
        let n = args.len();

        if let Some(ell) = e.ellipsis {
            if !variadic {
                let msg = format!(
                    "cannot use ... in call to non-variadic {}",
                    self.new_dis(&e.func)
                );
                self.error(ell, ErrCode::WrongArgCount, msg);
                return;
            }
            if e.args.len() == 1 && n > 1 {
                // f(g()) where g is multi-valued
                let msg = format!(
                    "cannot use ... with {}-valued {}",
                    n,
                    self.new_dis(&e.args[0])
                );
                self.error(ell, ErrCode::WrongArgCount, msg);
                return;
            }
        }

        let note = format!("argument to {}", self.new_dis(&e.func));
        for (i, mut arg) in args.into_iter().enumerate() {
            if arg.invalid() {
                continue;
            }
            let mut ty = if i < nparams {
                self.lobj(params[i]).typ().unwrap()
            } else if variadic && nparams > 0 {
                self.lobj(params[nparams - 1]).typ().unwrap()
            } else {
                self.error_str(
                    arg.pos(self.ast_objs),
                    ErrCode::WrongArgCount,
                    "too many arguments",
                );
                break;
            };

            if variadic && i + 1 >= nparams {
                // ty is the variadic parameter's slice type
                if e.ellipsis.is_some() {
                    // argument is of the form x...; it must be
                    // single-valued and assignable to the slice itself
                    let xtype = arg.typ.unwrap();
                    let xu = typ::underlying_type(xtype, self.tc_objs);
                    let nilable = xtype
                        == self.basic_type(typ::BasicType::UntypedNil);
                    if self.otype(xu).try_as_slice().is_none() && !nilable {
                        let ad = self.new_dis(&arg);
                        let td = self.new_dis(&ty);
                        let msg =
                            format!("cannot use {} as parameter of type {}", ad, td);
                        self.error(ad.pos(), ErrCode::IncompatibleAssign, msg);
                        continue;
                    }
                } else {
                    ty = self.otype(ty).try_as_slice().unwrap().elem();
                }
            }

            self.assignment(&mut arg, Some(ty), &note, fctx);
        }

        // check argument count; a variadic function accepts an "empty"
        // last argument: count one extra
        let count = if variadic { n + 1 } else { n };
        if count < nparams {
            let msg = format!("too few arguments in call to {}", self.new_dis(&e.func));
            self.error(e.r_paren, ErrCode::WrongArgCount, msg);
        }
    }

    /// selector typechecks a field or method selection x.f.
    pub fn selector(&mut self, x: &mut Operand, e: &Rc<SelectorExpr>, fctx: &mut FilesContext) {
        self.expr_or_type(x, &e.expr, fctx);
        if x.invalid() {
            x.expr = Some(Expr::Selector(e.clone()));
            return;
        }

        let sel_name = self.ast_objs.idents[e.sel].name.clone();
        let result = lookup::lookup_field_or_method(
            x.typ.unwrap(),
            x.mode == OperandMode::Variable,
            Some(self.pkg),
            &sel_name,
            self.tc_objs,
        );

        let (okey, indirect): (ObjKey, bool) = match result {
            LookupResult::Entry(okey, _, indirect) => (okey, indirect),
            _ => {
                let pos = self.ast_objs.idents[e.sel].pos;
                let msg = match &result {
                    LookupResult::Ambiguous(_) => format!("ambiguous selector {}", sel_name),
                    LookupResult::NotFound => format!(
                        "{}.{} undefined (type {} has no field or method {})",
                        self.new_dis(x.expr.as_ref().unwrap()),
                        sel_name,
                        self.new_dis(&x.typ.unwrap()),
                        sel_name
                    ),
                    LookupResult::BadMethodReceiver => format!(
                        "{} is not in method set of {}",
                        sel_name,
                        self.new_dis(&x.typ.unwrap())
                    ),
                    LookupResult::Entry(_, _, _) => unreachable!(),
                };
                self.error(pos, ErrCode::MissingFieldOrMethod, msg);
                x.mode = OperandMode::Invalid;
                x.expr = Some(Expr::Selector(e.clone()));
                return;
            }
        };

        if x.mode == OperandMode::TypeExpr {
            // method expression
            match self.lobj(okey).entity_type() {
                EntityType::Func(_) => {
                    // the receiver type becomes the type of the first
                    // function argument of the method expression's
                    // function type
                    let recv_var =
                        self.tc_objs
                            .new_var(0, Some(self.pkg), "".to_owned(), x.typ);
                    let sig = self
                        .otype(self.lobj(okey).typ().unwrap())
                        .try_as_signature()
                        .unwrap()
                        .clone();
                    let params_val = self.otype(sig.params()).try_as_tuple().unwrap();
                    let mut vars = vec![recv_var];
                    vars.extend(params_val.vars().iter().copied());
                    let params = self.tc_objs.new_t_tuple(vars);
                    let new_sig = self.tc_objs.new_t_signature(
                        None,
                        None,
                        params,
                        sig.results(),
                        sig.variadic(),
                    );
                    x.mode = OperandMode::Value;
                    x.typ = Some(new_sig);
                }
                _ => {
                    let pos = self.ast_objs.idents[e.sel].pos;
                    let msg = format!(
                        "{}.{} undefined (type {} has no method {})",
                        self.new_dis(x.expr.as_ref().unwrap()),
                        sel_name,
                        self.new_dis(&x.typ.unwrap()),
                        sel_name
                    );
                    self.error(pos, ErrCode::MissingFieldOrMethod, msg);
                    x.mode = OperandMode::Invalid;
                    x.expr = Some(Expr::Selector(e.clone()));
                    return;
                }
            }
        } else {
            // regular selector
            match self.lobj(okey).entity_type() {
                EntityType::Var(_) => {
                    let ft = *self.lobj(okey).typ();
                    x.mode = if x.mode == OperandMode::Variable || indirect {
                        OperandMode::Variable
                    } else {
                        OperandMode::Value
                    };
                    x.typ = ft;
                }
                EntityType::Func(_) => {
                    // a method value; strip the receiver from the
                    // signature
                    let sig = self
                        .otype(self.lobj(okey).typ().unwrap())
                        .try_as_signature()
                        .unwrap()
                        .clone();
                    let new_sig = self.tc_objs.new_t_signature(
                        None,
                        None,
                        sig.params(),
                        sig.results(),
                        sig.variadic(),
                    );
                    x.mode = OperandMode::Value;
                    x.typ = Some(new_sig);
                }
                _ => unreachable!(),
            }
        }
        x.expr = Some(Expr::Selector(e.clone()));
    }
}
