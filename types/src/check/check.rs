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
use super::super::obj::LangObj;
use super::super::objects::{ObjKey, PackageKey, ScopeKey, TCObjects, TypeKey};
use super::super::operand::OperandMode;
use super::super::typ::{BasicType, Type};
use golite_parser::ast::{Expr, Node, NodeId};
use golite_parser::{AstObjects, ErrorList, FileSet, IdentKey, Map, Pos};

/// TypeAndValue reports the type and value (for constants, stored in
/// 'mode') of the corresponding expression.
#[derive(Debug, Clone)]
pub struct TypeAndValue {
    pub mode: OperandMode,
    pub typ: TypeKey,
}

impl TypeAndValue {
    fn new(mode: OperandMode, typ: TypeKey) -> TypeAndValue {
        TypeAndValue {
            mode: mode,
            typ: typ,
        }
    }

    pub fn get_const_val(&self) -> Option<&Value> {
        match &self.mode {
            OperandMode::Constant(v) => Some(v),
            _ => None,
        }
    }
}

/// TypeInfo holds the results of type checking.
#[derive(Debug)]
pub struct TypeInfo {
    /// 'types' maps expressions to their types, and for constant
    /// expressions, also their values. Invalid expressions are omitted.
    pub types: Map<NodeId, TypeAndValue>,
    /// 'uses' maps identifiers to the objects they denote.
    pub uses: Map<IdentKey, ObjKey>,
}

impl TypeInfo {
    pub fn new() -> TypeInfo {
        TypeInfo {
            types: Map::new(),
            uses: Map::new(),
        }
    }

    pub fn record_type_and_value(&mut self, e: &Expr, mode: OperandMode, typ: TypeKey) {
        self.record_type_and_value_with_id(e.id(), mode, typ);
    }

    pub fn record_type_and_value_with_id(&mut self, id: NodeId, mode: OperandMode, typ: TypeKey) {
        if let OperandMode::Invalid = mode {
            return;
        }
        self.types.insert(id, TypeAndValue::new(mode, typ));
    }

    pub fn record_use(&mut self, id: IdentKey, obj: ObjKey) {
        self.uses.insert(id, obj);
    }
}

/// ExprInfo stores information about an untyped expression.
#[derive(Debug)]
pub struct ExprInfo {
    pub is_lhs: bool,
    pub mode: OperandMode,
    pub typ: TypeKey, // a Basic type of an untyped kind
}

/// ObjContext is the context within which the current expression is
/// type-checked.
#[derive(Clone)]
pub struct ObjContext {
    // top-most scope for lookups
    pub scope: Option<ScopeKey>,
    // if valid, identifiers are looked up as if at position pos
    pub pos: Option<Pos>,
    // value of iota in a constant declaration; None otherwise
    pub iota: Option<Value>,
    // function signature if inside a function; None otherwise
    pub sig: Option<TypeKey>,
    // set if an expression contains a function call or channel receive
    // operation
    pub has_call_or_recv: bool,
}

impl ObjContext {
    pub fn new() -> ObjContext {
        ObjContext {
            scope: None,
            pos: None,
            iota: None,
            sig: None,
            has_call_or_recv: false,
        }
    }
}

pub type DelayedAction = Box<dyn FnOnce(&mut Checker, &mut FilesContext)>;

/// FilesContext contains information collected while checking a set of
/// expressions: the registry of expressions without a final type yet, and
/// the stack of delayed actions.
pub struct FilesContext {
    // map of expressions without final type
    pub untyped: Map<NodeId, ExprInfo>,
    // stack of delayed actions
    delayed: Vec<DelayedAction>,
}

impl FilesContext {
    pub fn new() -> FilesContext {
        FilesContext {
            untyped: Map::new(),
            delayed: Vec::new(),
        }
    }

    pub fn remember_untyped(&mut self, e: &Expr, info: ExprInfo) {
        self.untyped.insert(e.id(), info);
    }

    /// later pushes f onto the stack of actions that will be processed
    /// later; either at the end of the current statement, or once the
    /// enclosing scope is stable.
    pub fn later(&mut self, action: DelayedAction) {
        self.delayed.push(action);
    }

    pub fn delayed_count(&self) -> usize {
        self.delayed.len()
    }

    /// process_delayed runs the delayed actions pushed since 'top' was
    /// read, in their original push order.
    pub fn process_delayed(&mut self, top: usize, checker: &mut Checker) {
        let fs: Vec<DelayedAction> = self.delayed.drain(top..).collect();
        for f in fs {
            f(checker, self);
        }
    }
}

pub struct Checker<'a> {
    // object container for the type checker
    pub tc_objs: &'a mut TCObjects,
    // object container for the AST
    pub ast_objs: &'a mut AstObjects,
    // errors
    errors: &'a ErrorList,
    // positions of the checked files
    pub fset: &'a mut FileSet,
    // this package
    pub pkg: PackageKey,
    // object context
    pub octx: ObjContext,
    // result of type checking
    pub result: TypeInfo,
}

impl<'a> Checker<'a> {
    pub fn new(
        tc_objs: &'a mut TCObjects,
        ast_objs: &'a mut AstObjects,
        fset: &'a mut FileSet,
        errors: &'a ErrorList,
        pkg: PackageKey,
    ) -> Checker<'a> {
        let mut octx = ObjContext::new();
        octx.scope = Some(*tc_objs.pkgs[pkg].scope());
        Checker {
            tc_objs: tc_objs,
            ast_objs: ast_objs,
            errors: errors,
            fset: fset,
            pkg: pkg,
            octx: octx,
            result: TypeInfo::new(),
        }
    }

    #[inline]
    pub fn errors(&self) -> &ErrorList {
        self.errors
    }

    #[inline]
    pub fn lobj(&self, key: ObjKey) -> &LangObj {
        &self.tc_objs.lobjs[key]
    }

    #[inline]
    pub fn lobj_mut(&mut self, key: ObjKey) -> &mut LangObj {
        &mut self.tc_objs.lobjs[key]
    }

    #[inline]
    pub fn otype(&self, key: TypeKey) -> &Type {
        &self.tc_objs.types[key]
    }

    #[inline]
    pub fn basic_type(&self, t: BasicType) -> TypeKey {
        self.tc_objs.universe().types()[&t]
    }

    #[inline]
    pub fn invalid_type(&self) -> TypeKey {
        self.basic_type(BasicType::Invalid)
    }

    /// record_untyped records the remaining expressions in the untyped
    /// registry with their untyped types; it is called at the end of a
    /// checking pass.
    pub fn record_untyped(&mut self, fctx: &mut FilesContext) {
        let untyped = std::mem::take(&mut fctx.untyped);
        for (id, info) in untyped.into_iter() {
            if info.mode != OperandMode::Invalid {
                self.result
                    .record_type_and_value_with_id(id, info.mode, info.typ);
            }
        }
    }
}
