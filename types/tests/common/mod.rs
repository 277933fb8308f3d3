// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Shared helpers for the checker integration tests: an environment
//! bundling the object containers, and builders for AST expressions.

use golite_parser as fe;
use golite_types as types;

use fe::ast::{self, Expr};
use fe::Token;
use types::constant::Value;
use types::objects::{ObjKey, TCObjects, TypeKey};
use types::scope::Scope;
use types::universe::Sizes;

pub struct Env {
    pub fset: fe::FileSet,
    pub asto: fe::AstObjects,
    pub tco: TCObjects,
    pub el: fe::ErrorList,
    pub pkg: types::objects::PackageKey,
    next_pos: usize,
}

impl Env {
    pub fn new() -> Env {
        Env::with_sizes(Sizes::default())
    }

    pub fn with_sizes(sizes: Sizes) -> Env {
        let mut fset = fe::FileSet::new();
        fset.add_file("test.gl".to_owned(), None, 1000);
        let mut tco = TCObjects::with_sizes(sizes);
        let pkg = tco.new_package("test".to_owned());
        Env {
            fset: fset,
            asto: fe::AstObjects::new(),
            tco: tco,
            el: fe::ErrorList::new(),
            pkg: pkg,
            next_pos: 0,
        }
    }

    pub fn pos(&mut self) -> usize {
        self.next_pos += 1;
        self.next_pos
    }

    // ------------------------------------------------------------------
    // running the checker

    pub fn with_checker<F>(&mut self, f: F)
    where
        F: FnOnce(&mut types::Checker, &mut types::FilesContext),
    {
        let mut fctx = types::FilesContext::new();
        let mut checker = types::Checker::new(
            &mut self.tco,
            &mut self.asto,
            &mut self.fset,
            &self.el,
            self.pkg,
        );
        f(&mut checker, &mut fctx);
        fctx.process_delayed(0, &mut checker);
        checker.record_untyped(&mut fctx);
    }

    /// check type-checks e as a single-valued expression and returns the
    /// resulting operand.
    pub fn check(&mut self, e: &Expr) -> types::operand::Operand {
        let mut x = types::operand::Operand::new();
        self.with_checker(|checker, fctx| {
            checker.expr(&mut x, e, fctx);
        });
        x
    }

    /// check_with_info is like check but also returns the recorded types.
    pub fn check_with_info(&mut self, e: &Expr) -> (types::operand::Operand, types::TypeInfo) {
        let mut fctx = types::FilesContext::new();
        let mut checker = types::Checker::new(
            &mut self.tco,
            &mut self.asto,
            &mut self.fset,
            &self.el,
            self.pkg,
        );
        let mut x = types::operand::Operand::new();
        checker.expr(&mut x, e, &mut fctx);
        fctx.process_delayed(0, &mut checker);
        checker.record_untyped(&mut fctx);
        let info = std::mem::replace(&mut checker.result, types::TypeInfo::new());
        (x, info)
    }

    // ------------------------------------------------------------------
    // error assertions

    pub fn has_error(&self, code: types::ErrCode) -> bool {
        self.el
            .borrow()
            .iter()
            .any(|e| e.code == Some(code.as_str()))
    }

    pub fn has_error_containing(&self, code: types::ErrCode, text: &str) -> bool {
        self.el
            .borrow()
            .iter()
            .any(|e| e.code == Some(code.as_str()) && e.msg.contains(text))
    }

    pub fn err_count(&self) -> usize {
        self.el.len()
    }

    pub fn dump_errors(&self) -> String {
        format!("{}", self.el)
    }

    // ------------------------------------------------------------------
    // object declarations

    pub fn declare_var(&mut self, name: &str, t: TypeKey) -> ObjKey {
        let pos = self.pos();
        let okey = self.tco.new_var(pos, Some(self.pkg), name.to_owned(), Some(t));
        let skey = *self.tco.pkgs[self.pkg].scope();
        Scope::insert(skey, okey, &mut self.tco);
        okey
    }

    pub fn declare_const(&mut self, name: &str, t: TypeKey, val: Value) -> ObjKey {
        let pos = self.pos();
        let okey = self
            .tco
            .new_const(pos, Some(self.pkg), name.to_owned(), Some(t), val);
        let skey = *self.tco.pkgs[self.pkg].scope();
        Scope::insert(skey, okey, &mut self.tco);
        okey
    }

    pub fn declare_type(&mut self, name: &str, underlying: TypeKey) -> TypeKey {
        let pos = self.pos();
        let okey = self
            .tco
            .new_type_name(pos, Some(self.pkg), name.to_owned(), None);
        let named = self.tco.new_t_named(Some(okey), underlying, vec![]);
        self.tco.lobjs[okey].set_type(Some(named));
        let skey = *self.tco.pkgs[self.pkg].scope();
        Scope::insert(skey, okey, &mut self.tco);
        named
    }

    // ------------------------------------------------------------------
    // types

    pub fn basic(&self, t: types::typ::BasicType) -> TypeKey {
        self.tco.universe().types()[&t]
    }

    pub fn int_t(&self) -> TypeKey {
        self.basic(types::typ::BasicType::Int)
    }

    pub fn string_t(&self) -> TypeKey {
        self.basic(types::typ::BasicType::Str)
    }

    // ------------------------------------------------------------------
    // expressions

    pub fn int_lit(&mut self, s: &str) -> Expr {
        let pos = self.pos();
        Expr::new_basic_lit(pos, Token::INT(s.to_owned().into()))
    }

    pub fn float_lit(&mut self, s: &str) -> Expr {
        let pos = self.pos();
        Expr::new_basic_lit(pos, Token::FLOAT(s.to_owned().into()))
    }

    pub fn imag_lit(&mut self, s: &str) -> Expr {
        let pos = self.pos();
        Expr::new_basic_lit(pos, Token::IMAG(s.to_owned().into()))
    }

    pub fn char_lit(&mut self, c: char) -> Expr {
        let pos = self.pos();
        Expr::new_basic_lit(pos, Token::CHAR((format!("'{}'", c), c).into()))
    }

    pub fn str_lit(&mut self, s: &str) -> Expr {
        let pos = self.pos();
        Expr::new_basic_lit(
            pos,
            Token::STRING((format!("\"{}\"", s), s.to_owned()).into()),
        )
    }

    pub fn ident(&mut self, name: &str) -> Expr {
        let pos = self.pos();
        Expr::new_ident(&mut self.asto, pos, name)
    }

    pub fn binary(&mut self, a: Expr, op: Token, b: Expr) -> Expr {
        let pos = self.pos();
        Expr::new_binary(a, pos, op, b)
    }

    pub fn unary(&mut self, op: Token, x: Expr) -> Expr {
        let pos = self.pos();
        Expr::new_unary(pos, op, x)
    }

    pub fn paren(&mut self, x: Expr) -> Expr {
        let (l, r) = (self.pos(), self.pos());
        Expr::new_paren(l, x, r)
    }

    pub fn call(&mut self, f: Expr, args: Vec<Expr>) -> Expr {
        let (l, r) = (self.pos(), self.pos());
        Expr::new_call(f, l, args, None, r)
    }

    pub fn index(&mut self, x: Expr, i: Expr) -> Expr {
        let (l, r) = (self.pos(), self.pos());
        Expr::new_index(x, l, i, r)
    }

    pub fn slice(
        &mut self,
        x: Expr,
        low: Option<Expr>,
        high: Option<Expr>,
        max: Option<Expr>,
    ) -> Expr {
        let (l, r) = (self.pos(), self.pos());
        let slice3 = max.is_some();
        Expr::new_slice(x, l, low, high, max, slice3, r)
    }

    pub fn star(&mut self, x: Expr) -> Expr {
        let pos = self.pos();
        Expr::new_star(pos, x)
    }

    pub fn selector(&mut self, x: Expr, name: &str) -> Expr {
        let pos = self.pos();
        let ikey = self.asto.idents.insert(ast::Ident::with_str(pos, name));
        Expr::new_selector(x, ikey)
    }

    pub fn key_value(&mut self, k: Expr, v: Expr) -> Expr {
        let pos = self.pos();
        Expr::new_key_value(k, pos, v)
    }

    pub fn type_assert(&mut self, x: Expr, t: Expr) -> Expr {
        let (l, r) = (self.pos(), self.pos());
        Expr::new_type_assert(x, l, Some(t), r)
    }

    pub fn composite_lit(&mut self, t: Option<Expr>, elts: Vec<Expr>) -> Expr {
        let (l, r) = (self.pos(), self.pos());
        Expr::new_composite_lit(t, l, elts, r)
    }

    // ------------------------------------------------------------------
    // type expressions

    pub fn slice_type_expr(&mut self, elem: Expr) -> Expr {
        let pos = self.pos();
        Expr::new_array_type(pos, None, elem)
    }

    pub fn open_array_type_expr(&mut self, elem: Expr) -> Expr {
        let (l, e) = (self.pos(), self.pos());
        Expr::new_array_type(l, Some(Expr::new_ellipsis(e, None)), elem)
    }

    pub fn array_type_expr(&mut self, len: Expr, elem: Expr) -> Expr {
        let pos = self.pos();
        Expr::new_array_type(pos, Some(len), elem)
    }

    pub fn map_type_expr(&mut self, k: Expr, v: Expr) -> Expr {
        let pos = self.pos();
        Expr::new_map_type(pos, k, v)
    }

    pub fn empty_iface_type_expr(&mut self) -> Expr {
        let pos = self.pos();
        Expr::Interface(std::rc::Rc::new(ast::InterfaceType {
            interface: pos,
            methods: ast::FieldList::new(None, vec![], None),
        }))
    }

    pub fn field(&mut self, names: &[&str], typ: Expr) -> fe::FieldKey {
        let names = names
            .iter()
            .map(|n| {
                let pos = self.pos();
                self.asto.idents.insert(ast::Ident::with_str(pos, n))
            })
            .collect();
        self.asto.fields.insert(ast::Field {
            names: names,
            typ: typ,
        })
    }

    pub fn struct_type_expr(&mut self, fields: Vec<fe::FieldKey>) -> Expr {
        let pos = self.pos();
        Expr::Struct(std::rc::Rc::new(ast::StructType {
            struct_pos: pos,
            fields: ast::FieldList::new(None, fields, None),
        }))
    }

    pub fn func_type_expr(&mut self, params: Vec<fe::FieldKey>, results: Vec<fe::FieldKey>) -> Expr {
        let pos = self.pos();
        let results = if results.is_empty() {
            None
        } else {
            Some(ast::FieldList::new(None, results, None))
        };
        let ft = ast::FuncType::new(Some(pos), ast::FieldList::new(None, params, None), results);
        Expr::box_func_type(ft, &mut self.asto)
    }
}

/// sig_of builds a signature type from parameter and result types, for
/// declaring function objects directly.
pub fn sig_of(tco: &mut TCObjects, pkg: types::objects::PackageKey, params: &[TypeKey], results: &[TypeKey], variadic: bool) -> TypeKey {
    let ps: Vec<ObjKey> = params
        .iter()
        .map(|t| tco.new_param_var(0, Some(pkg), "".to_owned(), Some(*t)))
        .collect();
    let rs: Vec<ObjKey> = results
        .iter()
        .map(|t| tco.new_param_var(0, Some(pkg), "".to_owned(), Some(*t)))
        .collect();
    let pt = tco.new_t_tuple(ps);
    let rt = tco.new_t_tuple(rs);
    tco.new_t_signature(None, None, pt, rt, variadic)
}
