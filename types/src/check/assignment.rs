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

use super::super::operand::{Operand, OperandMode};
use super::super::objects::TypeKey;
use super::super::typ::{self, BasicType};
use super::check::{Checker, FilesContext};
use super::errors::ErrCode;

impl<'a> Checker<'a> {
    /// assignment reports an error and invalidates x if x cannot be
    /// assigned to a variable of type 't' (no type means assignment to an
    /// untyped blank slot). The context describes the assignment for
    /// error messages.
    pub fn assignment(
        &mut self,
        x: &mut Operand,
        t: Option<TypeKey>,
        context: &str,
        fctx: &mut FilesContext,
    ) {
        self.single_value(x);

        match &x.mode {
            OperandMode::Invalid => return, // error reported before
            OperandMode::Constant(_)
            | OperandMode::Variable
            | OperandMode::MapIndex
            | OperandMode::Value
            | OperandMode::CommaOk => {}
            _ => unreachable!(),
        }

        if typ::is_untyped(x.typ.unwrap(), self.tc_objs) {
            let target = match t {
                // spec: "If an untyped constant is assigned to a
                // variable of interface type or the blank identifier,
                // the constant is first converted to its default type."
                None => {
                    if x.typ == Some(self.basic_type(BasicType::UntypedNil)) {
                        self.error(
                            x.pos(self.ast_objs),
                            ErrCode::UntypedNilUse,
                            format!("use of untyped nil in {}", context),
                        );
                        x.mode = OperandMode::Invalid;
                        return;
                    }
                    typ::untyped_default_type(x.typ.unwrap(), self.tc_objs)
                }
                Some(t) => t,
            };
            self.convert_untyped(x, target, fctx);
            if x.invalid() {
                return;
            }
        }
        // x.typ is typed

        // spec: "If a left-hand side is the blank identifier, any typed
        // or non-constant value except for the predeclared identifier
        // nil may be assigned to it."
        let t = match t {
            Some(t) => t,
            None => return,
        };

        let mut reason = String::new();
        if !x.assignable_to(t, Some(&mut reason), self.tc_objs) {
            let xd = self.new_dis(x);
            let td = self.new_dis(&t);
            let msg = if reason.is_empty() {
                format!("cannot use {} as {} value in {}", xd, td, context)
            } else {
                format!(
                    "cannot use {} as {} value in {}: {}",
                    xd, td, context, reason
                )
            };
            self.error(xd.pos(), ErrCode::IncompatibleAssign, msg);
            x.mode = OperandMode::Invalid;
        }
    }
}
