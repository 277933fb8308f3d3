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

use super::super::constant;
use super::super::obj::EntityType;
use super::super::objects::{ObjKey, ScopeKey, TypeKey};
use super::super::operand::{Operand, OperandMode};
use super::super::scope::Scope;
use super::super::typ;
use super::check::{Checker, FilesContext};
use super::errors::ErrCode;
use golite_parser::ast::{self, Expr, FieldList, Node};
use golite_parser::{FuncTypeKey, IdentKey, Pos};
use std::borrow::Borrow;
use std::collections::HashSet;

impl<'a> Checker<'a> {
    /// ident type-checks identifier ikey and initializes x with the value
    /// or type of ikey. If an error occurred, x.mode is set to invalid.
    pub fn ident(&mut self, x: &mut Operand, ikey: IdentKey, _fctx: &mut FilesContext) {
        x.mode = OperandMode::Invalid;
        x.expr = Some(Expr::Ident(ikey));

        let name = self.ast_objs.idents[ikey].name.clone();
        let lookup = Scope::lookup_parent(
            &self.octx.scope.unwrap(),
            &name,
            self.octx.pos,
            self.tc_objs,
        );
        let (_, okey) = match lookup {
            Some(found) => found,
            None => {
                let pos = self.ast_objs.idents[ikey].pos;
                if name == "_" {
                    self.error_str(
                        pos,
                        ErrCode::InvalidBlank,
                        "cannot use _ as value or type",
                    );
                } else {
                    self.error(
                        pos,
                        ErrCode::UndeclaredName,
                        format!("undeclared name: {}", name),
                    );
                }
                return;
            }
        };
        self.result.record_use(ikey, okey);

        let lobj = self.lobj(okey);
        let otype = lobj.typ().expect("object without a type");
        let invalid_type = self.invalid_type();

        match self.lobj(okey).entity_type() {
            EntityType::Const(_) => {
                if otype == invalid_type {
                    return;
                }
                if okey == *self.tc_objs.universe().iota() {
                    match &self.octx.iota {
                        Some(iota) => x.mode = OperandMode::Constant(iota.clone()),
                        None => {
                            let pos = self.ast_objs.idents[ikey].pos;
                            self.error_str(
                                pos,
                                ErrCode::InvalidIota,
                                "cannot use iota outside constant declaration",
                            );
                            return;
                        }
                    }
                } else {
                    x.mode = OperandMode::Constant(self.lobj(okey).const_val().clone());
                }
            }
            EntityType::TypeName => x.mode = OperandMode::TypeExpr,
            EntityType::Var(_) => {
                // It's ok to mark non-local variables, but ignore
                // variables from other packages.
                if self.lobj(okey).pkg() == &Some(self.pkg) {
                    self.lobj_mut(okey)
                        .entity_type_mut()
                        .var_property_mut()
                        .used = true;
                }
                if otype == invalid_type {
                    return;
                }
                x.mode = OperandMode::Variable;
            }
            EntityType::Func(_) => x.mode = OperandMode::Value,
            EntityType::Builtin(id) => x.mode = OperandMode::Builtin(*id),
            EntityType::Nil => x.mode = OperandMode::Value,
        }
        x.typ = Some(otype);
    }

    /// declare inserts the object into the scope, reporting a redeclaration.
    pub fn declare(&mut self, skey: ScopeKey, okey: ObjKey, pos: Pos) {
        self.lobj_mut(okey).set_scope_pos(pos);
        if let Some(alt) = Scope::insert(skey, okey, self.tc_objs) {
            let name = self.lobj(okey).name().clone();
            let prev = self.fset.position(self.lobj(alt).pos());
            self.error(
                self.lobj(okey).pos(),
                ErrCode::DuplicateDecl,
                format!("{} redeclared in this block (other declaration at {})", name, prev),
            );
        }
    }

    /// type_expr type-checks the type expression e and returns its type,
    /// or the invalid type.
    pub fn type_expr(&mut self, e: &Expr, fctx: &mut FilesContext) -> TypeKey {
        let t = self.type_internal(e, fctx);
        debug_assert!(typ::is_typed(t, self.tc_objs));
        self.result
            .record_type_and_value(e, OperandMode::TypeExpr, t);
        t
    }

    /// type_internal drives type checking of type expressions.
    /// Must only be called by type_expr.
    fn type_internal(&mut self, e: &Expr, fctx: &mut FilesContext) -> TypeKey {
        let invalid_type = self.invalid_type();
        let pos = e.pos(self.ast_objs);
        match e {
            Expr::Bad(_) => invalid_type, // error was reported before
            Expr::Ident(ikey) => {
                let mut x = Operand::new();
                self.ident(&mut x, *ikey, fctx);
                match x.mode {
                    OperandMode::TypeExpr => x.typ.unwrap(),
                    OperandMode::Invalid => invalid_type, // error reported before
                    _ => {
                        let xd = self.new_dis(&x);
                        let msg = format!("{} is not a type", xd);
                        self.error(xd.pos(), ErrCode::NotAType, msg);
                        invalid_type
                    }
                }
            }
            Expr::Paren(p) => self.type_internal(&p.expr, fctx),
            Expr::Array(a) => match &a.len {
                Some(l) => {
                    if let Expr::Ellipsis(_) = l {
                        self.error_str(
                            pos,
                            ErrCode::BadDotDotDotSyntax,
                            "invalid use of [...] array (outside a composite literal)",
                        );
                        return invalid_type;
                    }
                    let len = self.array_len(l, fctx);
                    let elem = self.type_expr(&a.elt, fctx);
                    match len {
                        Some(len) => self.tc_objs.new_t_array(elem, Some(len)),
                        None => invalid_type,
                    }
                }
                None => {
                    let elem = self.type_expr(&a.elt, fctx);
                    self.tc_objs.new_t_slice(elem)
                }
            },
            Expr::Struct(st) => self.struct_type(st, fctx),
            Expr::Star(s) => {
                let base = self.type_expr(&s.expr, fctx);
                self.tc_objs.new_t_pointer(base)
            }
            Expr::Func(ftkey) => self.func_type(*ftkey, fctx),
            Expr::Interface(it) => self.interface_type(it, fctx),
            Expr::Map(m) => {
                let k = self.type_expr(&m.key, fctx);
                let v = self.type_expr(&m.val, fctx);
                let t = self.tc_objs.new_t_map(k, v);

                // spec: "The comparison operators == and != must be fully
                // defined for operands of the key type; thus the key type
                // must not be a function, map, or slice."
                // Delay this check because it requires fully setup types;
                // it is safe to continue in any case.
                let key_pos = m.key.pos(self.ast_objs);
                fctx.later(Box::new(move |checker, _fctx| {
                    if !typ::comparable(k, checker.tc_objs) {
                        let msg =
                            format!("invalid map key type {}", checker.new_dis(&k));
                        checker.error(key_pos, ErrCode::MismatchedTypes, msg);
                    }
                }));
                t
            }
            Expr::Chan(c) => {
                let dir = match c.dir {
                    ast::ChanDir::Send => typ::ChanDir::SendOnly,
                    ast::ChanDir::Recv => typ::ChanDir::RecvOnly,
                    ast::ChanDir::SendRecv => typ::ChanDir::SendRecv,
                };
                let elem = self.type_expr(&c.val, fctx);
                self.tc_objs.new_t_chan(dir, elem)
            }
            _ => {
                let ed = self.new_dis(e);
                let msg = format!("{} is not a type", ed);
                self.error(pos, ErrCode::NotAType, msg);
                invalid_type
            }
        }
    }

    /// array_len type-checks the array length expression and returns the
    /// constant length, or None.
    fn array_len(&mut self, e: &Expr, fctx: &mut FilesContext) -> Option<u64> {
        let mut x = Operand::new();
        self.expr(&mut x, e, fctx);
        if let OperandMode::Constant(v) = &x.mode {
            let t = x.typ.unwrap();
            if typ::is_untyped(t, self.tc_objs) || typ::is_integer(t, self.tc_objs) {
                let int = v.to_int();
                if let constant::Value::Int(_) = int.borrow() {
                    let int_key = self.basic_type(typ::BasicType::Int);
                    let int_basic = *self.otype(int_key).try_as_basic().unwrap();
                    let word = self.tc_objs.universe().sizes().word_size();
                    if int.representable(&int_basic, word, None) {
                        let (n, exact) = int.int_as_u64();
                        if exact {
                            return Some(n);
                        }
                    }
                    let xd = self.new_dis(&x);
                    let msg = format!("invalid array length {}", xd);
                    self.error(xd.pos(), ErrCode::InvalidArrayLen, msg);
                    return None;
                }
            }
            let xd = self.new_dis(&x);
            let msg = format!("array length {} must be integer", xd);
            self.error(xd.pos(), ErrCode::InvalidArrayLen, msg);
        } else if !x.invalid() {
            let xd = self.new_dis(&x);
            let msg = format!("array length {} must be constant", xd);
            self.error(xd.pos(), ErrCode::InvalidArrayLen, msg);
        }
        None
    }

    /// func_type type-checks a function type expression.
    pub fn func_type(&mut self, ftkey: FuncTypeKey, fctx: &mut FilesContext) -> TypeKey {
        let skey =
            self.tc_objs
                .new_scope(self.octx.scope, 0, usize::MAX, "function".to_owned(), true);
        let ftype = self.ast_objs.ftypes[ftkey].clone();
        let (params, variadic) = self.collect_params(skey, Some(&ftype.params), true, fctx);
        let (results, _) = self.collect_params(skey, ftype.results.as_ref(), false, fctx);
        let params_tuple = self.tc_objs.new_t_tuple(params);
        let results_tuple = self.tc_objs.new_t_tuple(results);
        self.tc_objs
            .new_t_signature(Some(skey), None, params_tuple, results_tuple, variadic)
    }

    /// collect_params declares the parameters of the field list in the
    /// scope and returns the corresponding variables.
    fn collect_params(
        &mut self,
        skey: ScopeKey,
        fl: Option<&FieldList>,
        variadic_ok: bool,
        fctx: &mut FilesContext,
    ) -> (Vec<ObjKey>, bool) {
        let fl = match fl {
            Some(fl) => fl,
            None => return (vec![], false),
        };
        let (mut named, mut anonymous, mut variadic) = (false, false, false);
        let mut params = Vec::new();
        let list = fl.list.clone();
        for (i, fkey) in list.iter().enumerate() {
            let field = &self.ast_objs.fields[*fkey];
            let mut ftype = field.typ.clone();
            let field_names = field.names.clone();
            if let Expr::Ellipsis(elli) = &ftype {
                let elt = elli.elt.clone();
                if variadic_ok && i == list.len() - 1 && field_names.len() <= 1 {
                    variadic = true;
                    ftype = elt.unwrap();
                } else {
                    self.soft_error(
                        elli.pos,
                        ErrCode::BadDotDotDotSyntax,
                        "can only use ... with final parameter in list".to_owned(),
                    );
                    // ignore ... and continue
                    match elt {
                        Some(e) => ftype = e,
                        None => continue,
                    }
                }
            }
            let ty = self.type_expr(&ftype, fctx);
            if !field_names.is_empty() {
                for name in field_names.iter() {
                    let ident = &self.ast_objs.idents[*name];
                    let (ipos, iname) = (ident.pos, ident.name.clone());
                    if iname.is_empty() {
                        self.invalid_ast(ipos, "anonymous parameter");
                        // ok to continue
                    }
                    let par = self
                        .tc_objs
                        .new_param_var(ipos, Some(self.pkg), iname, Some(ty));
                    let scope_pos = self.tc_objs.scopes[skey].pos();
                    self.declare(skey, par, scope_pos);
                    params.push(par);
                }
                named = true;
            } else {
                // anonymous parameter
                let pos = ftype.pos(self.ast_objs);
                let par = self
                    .tc_objs
                    .new_param_var(pos, Some(self.pkg), "".to_owned(), Some(ty));
                params.push(par);
                anonymous = true;
            }
        }
        if named && anonymous {
            self.invalid_ast(
                fl.pos(self.ast_objs),
                "list contains both named and anonymous parameters",
            );
            // ok to continue
        }
        // For a variadic function, change the last parameter's type from
        // T to []T.
        if variadic {
            let last = params[params.len() - 1];
            let elem = self.lobj(last).typ().unwrap();
            let t = self.tc_objs.new_t_slice(elem);
            self.lobj_mut(last).set_type(Some(t));
        }
        (params, variadic)
    }

    /// struct_type type-checks a struct type expression.
    fn struct_type(&mut self, st: &ast::StructType, fctx: &mut FilesContext) -> TypeKey {
        let mut fields: Vec<ObjKey> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let list = st.fields.list.clone();
        for fkey in list.iter() {
            let field = &self.ast_objs.fields[*fkey];
            let (names, ftype) = (field.names.clone(), field.typ.clone());
            let ty = self.type_expr(&ftype, fctx);
            if names.is_empty() {
                // embedded field: the unqualified type name acts as the
                // field name
                let pos = ftype.pos(self.ast_objs);
                let name = match embedded_field_name(&ftype, self.ast_objs) {
                    Some(name) => name,
                    None => {
                        self.invalid_ast(pos, "embedded field type has no name");
                        continue;
                    }
                };
                if !seen.insert(name.clone()) {
                    self.error(
                        pos,
                        ErrCode::DuplicateDecl,
                        format!("{} redeclared in struct", name),
                    );
                    continue;
                }
                let fld = self.tc_objs.new_field(pos, Some(self.pkg), name, Some(ty), true);
                fields.push(fld);
            } else {
                for name in names.iter() {
                    let ident = &self.ast_objs.idents[*name];
                    let (ipos, iname) = (ident.pos, ident.name.clone());
                    if iname != "_" && !seen.insert(iname.clone()) {
                        self.error(
                            ipos,
                            ErrCode::DuplicateDecl,
                            format!("{} redeclared in struct", iname),
                        );
                        continue;
                    }
                    let fld = self
                        .tc_objs
                        .new_field(ipos, Some(self.pkg), iname, Some(ty), false);
                    fields.push(fld);
                }
            }
        }
        self.tc_objs.new_t_struct(fields)
    }

    /// interface_type type-checks an interface type expression. The
    /// interface's complete method set (explicit methods plus those of
    /// embedded interfaces) is computed eagerly.
    fn interface_type(&mut self, it: &ast::InterfaceType, fctx: &mut FilesContext) -> TypeKey {
        if it.methods.list.is_empty() {
            return self.tc_objs.new_t_empty_interface();
        }

        let mut methods: Vec<ObjKey> = Vec::new();
        let mut embeddeds: Vec<TypeKey> = Vec::new();
        let invalid_type = self.invalid_type();
        let list = it.methods.list.clone();
        for fkey in list.iter() {
            let field = &self.ast_objs.fields[*fkey];
            let (names, ftype) = (field.names.clone(), field.typ.clone());
            if !names.is_empty() {
                // method declaration; the parser guarantees a single name
                let ident = &self.ast_objs.idents[names[0]];
                let (ipos, iname) = (ident.pos, ident.name.clone());
                let sig = match &ftype {
                    Expr::Func(ftk) => self.func_type(*ftk, fctx),
                    _ => {
                        self.invalid_ast(ipos, "interface method must have a function type");
                        continue;
                    }
                };
                let mobj = self.tc_objs.new_func(ipos, Some(self.pkg), iname, Some(sig));
                methods.push(mobj);
            } else {
                // embedded interface
                let pos = ftype.pos(self.ast_objs);
                let ty = self.type_expr(&ftype, fctx);
                if ty == invalid_type {
                    continue; // error reported before
                }
                if !typ::is_interface(ty, self.tc_objs) {
                    let msg = format!("{} is not an interface", self.new_dis(&ty));
                    self.error(pos, ErrCode::NotAType, msg);
                    continue;
                }
                embeddeds.push(ty);
            }
        }

        let mut all = methods.clone();
        for ekey in embeddeds.iter() {
            let eu = typ::underlying_type(*ekey, self.tc_objs);
            let eall = self
                .otype(eu)
                .try_as_interface()
                .unwrap()
                .all_methods()
                .clone()
                .unwrap();
            all.extend(eall);
        }
        all.sort_by(|a, b| {
            let ida = self.lobj(*a).id(self.tc_objs).to_string();
            let idb = self.lobj(*b).id(self.tc_objs).to_string();
            ida.cmp(&idb)
        });
        for w in all.windows(2) {
            let (a, b) = (&self.lobj(w[0]), &self.lobj(w[1]));
            if a.id(self.tc_objs) == b.id(self.tc_objs) {
                let msg = format!("duplicate method {}", b.name());
                self.error(b.pos(), ErrCode::DuplicateDecl, msg);
            }
        }

        let ikey = self.tc_objs.new_t_interface(methods, embeddeds);
        self.tc_objs.types[ikey]
            .try_as_interface_mut()
            .unwrap()
            .set_all_methods(all);
        ikey
    }
}

/// embedded_field_name derives the field name of an embedded field from
/// its (possibly pointer) type expression.
fn embedded_field_name(e: &Expr, objs: &golite_parser::AstObjects) -> Option<String> {
    match ast::unparen(e) {
        Expr::Ident(ikey) => Some(objs.idents[*ikey].name.clone()),
        Expr::Star(s) => match ast::unparen(&s.expr) {
            Expr::Ident(ikey) => Some(objs.idents[*ikey].name.clone()),
            _ => None,
        },
        _ => None,
    }
}
