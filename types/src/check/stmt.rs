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
use super::super::objects::TypeKey;
use super::super::operand::Operand;
use super::super::universe::ExprKind;
use super::check::{Checker, FilesContext};
use super::errors::ErrCode;
use golite_parser::ast::{BlockStmt, Stmt};
use std::rc::Rc;

impl<'a> Checker<'a> {
    /// func_body type-checks a function body, with the function's scope
    /// and the iota value captured at the point the literal was seen.
    pub fn func_body(
        &mut self,
        sig: TypeKey,
        body: &Rc<BlockStmt>,
        iota: Option<Value>,
        fctx: &mut FilesContext,
    ) {
        let sig_scope = *self.otype(sig).try_as_signature().unwrap().scope();

        let backup = self.octx.clone();
        self.octx.scope = sig_scope.or(backup.scope);
        self.octx.iota = iota;
        self.octx.sig = Some(sig);
        self.octx.has_call_or_recv = false;

        for s in body.list.iter() {
            self.stmt(s, fctx);
        }

        self.octx = backup;
    }

    fn stmt(&mut self, s: &Stmt, fctx: &mut FilesContext) {
        match s {
            Stmt::Empty(_) => {}
            Stmt::Expr(e) => {
                self.octx.has_call_or_recv = false;
                let mut x = Operand::new();
                let kind = self.raw_expr(&mut x, e, None, fctx);
                if !x.invalid() && kind != ExprKind::Statement {
                    let xd = self.new_dis(&x);
                    let msg = format!("{} evaluated but not used", xd);
                    self.soft_error(xd.pos(), ErrCode::UnusedExpr, msg);
                }
            }
            Stmt::Return(r) => {
                let sig = match self.octx.sig {
                    Some(sig) => sig,
                    None => {
                        self.invalid_ast(r.ret, "return outside function body");
                        return;
                    }
                };
                let res_t = self.otype(sig).try_as_signature().unwrap().results();
                let results = self.otype(res_t).try_as_tuple().unwrap().vars().clone();
                if r.results.len() != results.len() {
                    self.error(
                        r.ret,
                        ErrCode::WrongResultCount,
                        format!(
                            "wrong number of return values (want {}, got {})",
                            results.len(),
                            r.results.len()
                        ),
                    );
                    // still check the expressions for their own errors
                    self.use_exprs(&r.results, fctx);
                    return;
                }
                for (okey, e) in results.iter().zip(r.results.iter()) {
                    let t = *self.lobj(*okey).typ();
                    let mut x = Operand::new();
                    self.expr(&mut x, e, fctx);
                    self.assignment(&mut x, t, "return statement", fctx);
                }
            }
        }
    }
}
