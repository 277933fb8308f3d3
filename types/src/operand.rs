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

use super::constant;
use super::lookup::missing_method;
use super::objects::{TCObjects, TypeKey};
use super::typ;
use super::typ::{fmt_type, BasicType, Type};
use super::universe::{Builtin, Universe};
use golite_parser::ast::{self, ChanDir, Expr, Node};
use golite_parser::{AstObjects, Pos, Token};
use std::fmt;
use std::fmt::Debug;
use std::fmt::Write;

/// An OperandMode specifies the (addressing) mode of an operand.
#[derive(Clone, Debug, PartialEq)]
pub enum OperandMode {
    Invalid,                   // operand is invalid
    NoValue,                   // operand represents no value (result of a function call w/o result)
    Builtin(Builtin),          // operand is a built-in function
    TypeExpr,                  // operand is a type
    Constant(constant::Value), // operand is a constant; the operand's typ is a Basic type
    Variable,                  // operand is an addressable variable
    MapIndex, // operand is a map index expression (acts like a variable on lhs, commaok on rhs of an assignment)
    Value,    // operand is a computed value
    CommaOk,  // like value, but operand may be used in a comma,ok expression
}

impl OperandMode {
    pub fn constant_val(&self) -> Option<&constant::Value> {
        match self {
            OperandMode::Constant(v) => Some(v),
            _ => None,
        }
    }

    pub fn constant_val_mut(&mut self) -> Option<&mut constant::Value> {
        match self {
            OperandMode::Constant(v) => Some(v),
            _ => None,
        }
    }

    pub fn builtin_id(&self) -> Option<Builtin> {
        match self {
            OperandMode::Builtin(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for OperandMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            OperandMode::Invalid => "invalid operand",
            OperandMode::NoValue => "no value",
            OperandMode::Builtin(_) => "built-in",
            OperandMode::TypeExpr => "type",
            OperandMode::Constant(_) => "constant",
            OperandMode::Variable => "variable",
            OperandMode::MapIndex => "map index expression",
            OperandMode::Value => "value",
            OperandMode::CommaOk => "comma, ok expression",
        })
    }
}

/// An Operand represents an intermediate value during type checking.
/// Operands have an (addressing) mode, the expression evaluating to
/// the operand, the operand's type, and for constants a value.
#[derive(Clone, Debug)]
pub struct Operand {
    pub mode: OperandMode,
    pub expr: Option<Expr>,
    pub typ: Option<TypeKey>,
}

impl Operand {
    pub fn new() -> Operand {
        Operand::new_with(OperandMode::Invalid, None, None)
    }

    pub fn new_with(mode: OperandMode, expr: Option<Expr>, typ: Option<TypeKey>) -> Operand {
        Operand {
            mode: mode,
            expr: expr,
            typ: typ,
        }
    }

    pub fn invalid(&self) -> bool {
        self.mode == OperandMode::Invalid
    }

    pub fn pos(&self, ast_objs: &AstObjects) -> Pos {
        match &self.expr {
            Some(e) => e.pos(ast_objs),
            None => 0,
        }
    }

    /// set_const sets the operand to the constant denoted by the literal
    /// token.
    pub fn set_const(&mut self, t: &Token, u: &Universe) {
        let bt = match t {
            Token::INT(_) => BasicType::UntypedInt,
            Token::FLOAT(_) => BasicType::UntypedFloat,
            Token::IMAG(_) => BasicType::UntypedComplex,
            Token::CHAR(_) => BasicType::UntypedRune,
            Token::STRING(_) => BasicType::UntypedString,
            _ => unreachable!(),
        };
        self.mode = OperandMode::Constant(constant::Value::with_literal(t));
        self.typ = Some(u.types()[&bt]);
    }

    pub fn is_nil(&self, u: &Universe) -> bool {
        match self.mode {
            OperandMode::Value => self.typ == Some(u.types()[&BasicType::UntypedNil]),
            _ => false,
        }
    }

    /// assignable_to reports whether the operand is assignable to a
    /// variable of type 't'. If the result is false and a non-None reason
    /// is provided, it may be set to a more detailed explanation of the
    /// failure.
    pub fn assignable_to(&self, t: TypeKey, reason: Option<&mut String>, objs: &TCObjects) -> bool {
        let u = objs.universe();
        if self.invalid() || t == u.types()[&BasicType::Invalid] {
            return true; // avoid spurious errors
        }

        if typ::identical(self.typ.unwrap(), t, objs) {
            return true;
        }

        let (k_left, k_right) = (t, self.typ.unwrap());
        let t_left = &objs.types[k_left];
        let t_right = &objs.types[k_right];
        let ut_key_left = typ::underlying_type(k_left, objs);
        let ut_key_right = typ::underlying_type(k_right, objs);
        let ut_left = &objs.types[ut_key_left];

        if typ::is_untyped(ut_key_right, objs) {
            match ut_left {
                Type::Basic(detail) => {
                    if self.is_nil(u) && detail.typ() == BasicType::UnsafePointer {
                        return true;
                    }
                    if let OperandMode::Constant(val) = &self.mode {
                        return val.representable(detail, u.sizes().word_size(), None);
                    }
                    // The result of a comparison is an untyped boolean,
                    // but may not be a constant.
                    if detail.info() == typ::BasicInfo::IsBoolean {
                        return typ::is_boolean(ut_key_right, objs);
                    }
                }
                Type::Interface(detail) => return self.is_nil(u) || detail.is_empty(),
                Type::Pointer(_)
                | Type::Signature(_)
                | Type::Slice(_)
                | Type::Map(_)
                | Type::Chan(_) => return self.is_nil(u),
                _ => {}
            }
            return false;
        }

        // 'right' is typed:
        // 'right' and 'left' have identical underlying types
        // and at least one of 'right' or 'left' is not a named type
        if typ::identical(ut_key_right, ut_key_left, objs)
            && (!t_right.is_named() || !t_left.is_named())
        {
            return true;
        }

        // 'left' is an interface and 'right' implements 'left'
        if ut_left.try_as_interface().is_some() {
            if let Some((m, wrong)) = missing_method(k_right, ut_key_left, true, objs) {
                if let Some(re) = reason {
                    let msg = if wrong.is_some() {
                        "wrong type for method"
                    } else {
                        "missing method"
                    };
                    *re = format!("{} {}", msg, objs.lobjs[m].name());
                }
                return false;
            }
            return true;
        }

        // 'right' is a bidirectional channel value, 'left' is a channel
        // type, they have identical element types,
        // and at least one of 'right' or 'left' is not a named type
        if let Some(cr) = objs.types[ut_key_right].try_as_chan() {
            if cr.dir() == typ::ChanDir::SendRecv {
                if let Some(cl) = ut_left.try_as_chan() {
                    if typ::identical(cr.elem(), cl.elem(), objs) {
                        return !t_right.is_named() || !t_left.is_named();
                    }
                }
            }
        }

        false
    }

    /// Operand string formats
    /// (not all "untyped" cases can appear due to the type system)
    ///
    /// mode       format
    ///
    /// invalid    <expr> (               <mode>                    )
    /// novalue    <expr> (               <mode>                    )
    /// builtin    <expr> (               <mode>                    )
    /// typexpr    <expr> (               <mode>                    )
    ///
    /// constant   <expr> (<untyped kind> <mode>                    )
    /// constant   <expr> (               <mode>       of type <typ>)
    /// constant   <expr> (<untyped kind> <mode> <val>              )
    /// constant   <expr> (               <mode> <val> of type <typ>)
    ///
    /// variable   <expr> (<untyped kind> <mode>                    )
    /// variable   <expr> (               <mode>       of type <typ>)
    ///
    /// mapindex   <expr> (<untyped kind> <mode>                    )
    /// mapindex   <expr> (               <mode>       of type <typ>)
    ///
    /// value      <expr> (<untyped kind> <mode>                    )
    /// value      <expr> (               <mode>       of type <typ>)
    ///
    /// commaok    <expr> (<untyped kind> <mode>                    )
    /// commaok    <expr> (               <mode>       of type <typ>)
    pub fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
        tc_objs: &TCObjects,
        ast_objs: &AstObjects,
    ) -> fmt::Result {
        let universe = tc_objs.universe();
        let mut has_expr = true;

        // <expr> (
        if let Some(expr) = &self.expr {
            fmt_expr(expr, f, ast_objs)?;
        } else {
            match &self.mode {
                OperandMode::Builtin(bi) => {
                    f.write_str(universe.builtins()[bi].name)?;
                }
                OperandMode::TypeExpr => {
                    fmt_type(self.typ, f, tc_objs)?;
                }
                OperandMode::Constant(val) => {
                    write!(f, "{}", val)?;
                }
                _ => has_expr = false,
            }
        }
        if has_expr {
            f.write_str(" (")?;
        }

        // <untyped kind>
        let has_type = match self.mode {
            OperandMode::Invalid
            | OperandMode::NoValue
            | OperandMode::Builtin(_)
            | OperandMode::TypeExpr => false,
            _ => {
                let tval = &tc_objs.types[self.typ.unwrap()];
                match tval.try_as_basic() {
                    Some(b) if b.typ().is_untyped() => {
                        f.write_str(b.name())?;
                        f.write_char(' ')?;
                        false
                    }
                    _ => true,
                }
            }
        };

        // <mode>
        self.mode.fmt(f)?;

        // <val>
        if let OperandMode::Constant(val) = &self.mode {
            if self.expr.is_some() {
                write!(f, " {}", val)?;
            }
        }

        // <typ>
        if has_type {
            if self.typ != Some(universe.types()[&BasicType::Invalid]) {
                f.write_str(" of type ")?;
                fmt_type(self.typ, f, tc_objs)?;
            } else {
                f.write_str(" with invalid type")?;
            }
        }

        // )
        if has_expr {
            f.write_char(')')?;
        }
        Ok(())
    }
}

/// fmt_expr formats the (possibly shortened) string representation for
/// an expression. Shortened representations are suitable for user
/// interfaces but may not necessarily follow the language's syntax.
pub fn fmt_expr(expr: &Expr, f: &mut fmt::Formatter<'_>, objs: &AstObjects) -> fmt::Result {
    // The AST preserves source-level parentheses so there is
    // no need to introduce them here to correct for different
    // operator precedences.
    match expr {
        Expr::Bad(_) => f.write_str("(bad expr)"),
        Expr::Ident(ikey) => f.write_str(&objs.idents[*ikey].name),
        Expr::Ellipsis(e) => {
            f.write_str("...")?;
            if let Some(elt) = &e.elt {
                fmt_expr(elt, f, objs)?;
            }
            Ok(())
        }
        Expr::BasicLit(b) => write!(f, "{}", b.token),
        Expr::FuncLit(fl) => {
            f.write_char('(')?;
            fmt_expr(&Expr::Func(fl.typ), f, objs)?;
            f.write_str(" literal)")
        }
        Expr::CompositeLit(cl) => {
            f.write_char('(')?;
            match &cl.typ {
                Some(t) => fmt_expr(t, f, objs)?,
                None => f.write_str("(bad expr)")?,
            }
            f.write_str(" literal)")
        }
        Expr::Paren(p) => {
            f.write_char('(')?;
            fmt_expr(&p.expr, f, objs)?;
            f.write_char(')')
        }
        Expr::Selector(s) => {
            fmt_expr(&s.expr, f, objs)?;
            f.write_char('.')?;
            f.write_str(&objs.idents[s.sel].name)
        }
        Expr::Index(i) => {
            fmt_expr(&i.expr, f, objs)?;
            f.write_char('[')?;
            fmt_expr(&i.index, f, objs)?;
            f.write_char(']')
        }
        Expr::Slice(s) => {
            fmt_expr(&s.expr, f, objs)?;
            f.write_char('[')?;
            if let Some(l) = &s.low {
                fmt_expr(l, f, objs)?;
            }
            f.write_char(':')?;
            if let Some(h) = &s.high {
                fmt_expr(h, f, objs)?;
            }
            if let Some(m) = &s.max {
                f.write_char(':')?;
                fmt_expr(m, f, objs)?;
            }
            f.write_char(']')
        }
        Expr::TypeAssert(a) => {
            fmt_expr(&a.expr, f, objs)?;
            f.write_str(".(")?;
            match &a.typ {
                Some(t) => fmt_expr(t, f, objs)?,
                None => f.write_str("type")?,
            }
            f.write_char(')')
        }
        Expr::Call(c) => {
            fmt_expr(&c.func, f, objs)?;
            f.write_char('(')?;
            for (i, arg) in c.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_expr(arg, f, objs)?;
            }
            if c.ellipsis.is_some() {
                f.write_str("...")?;
            }
            f.write_char(')')
        }
        Expr::Star(s) => {
            f.write_char('*')?;
            fmt_expr(&s.expr, f, objs)
        }
        Expr::Unary(u) => {
            write!(f, "{}", u.op.text())?;
            fmt_expr(&u.expr, f, objs)
        }
        Expr::Binary(b) => {
            fmt_expr(&b.expr_a, f, objs)?;
            write!(f, " {} ", b.op.text())?;
            fmt_expr(&b.expr_b, f, objs)
        }
        Expr::KeyValue(kv) => {
            fmt_expr(&kv.key, f, objs)?;
            f.write_str(": ")?;
            fmt_expr(&kv.val, f, objs)
        }
        Expr::Array(a) => {
            f.write_char('[')?;
            if let Some(l) = &a.len {
                fmt_expr(l, f, objs)?;
            }
            f.write_char(']')?;
            fmt_expr(&a.elt, f, objs)
        }
        Expr::Struct(s) => {
            f.write_str("struct{")?;
            fmt_fields(&s.fields, "; ", f, objs)?;
            f.write_char('}')
        }
        Expr::Func(ftkey) => {
            f.write_str("func")?;
            fmt_func_type(&objs.ftypes[*ftkey], f, objs)
        }
        Expr::Interface(i) => {
            f.write_str("interface{")?;
            fmt_fields(&i.methods, "; ", f, objs)?;
            f.write_char('}')
        }
        Expr::Map(m) => {
            f.write_str("map[")?;
            fmt_expr(&m.key, f, objs)?;
            f.write_char(']')?;
            fmt_expr(&m.val, f, objs)
        }
        Expr::Chan(c) => {
            let s = match c.dir {
                ChanDir::Send => "chan<- ",
                ChanDir::Recv => "<-chan ",
                ChanDir::SendRecv => "chan ",
            };
            f.write_str(s)?;
            fmt_expr(&c.val, f, objs)
        }
    }
}

fn fmt_fields(
    fields: &ast::FieldList,
    sep: &str,
    f: &mut fmt::Formatter<'_>,
    objs: &AstObjects,
) -> fmt::Result {
    for (i, fkey) in fields.list.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        let field = &objs.fields[*fkey];
        for (j, name) in field.names.iter().enumerate() {
            if j > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&objs.idents[*name].name)?;
        }
        if !field.names.is_empty() {
            f.write_char(' ')?;
        }
        fmt_expr(&field.typ, f, objs)?;
    }
    Ok(())
}

fn fmt_func_type(
    ftype: &ast::FuncType,
    f: &mut fmt::Formatter<'_>,
    objs: &AstObjects,
) -> fmt::Result {
    f.write_char('(')?;
    fmt_fields(&ftype.params, ", ", f, objs)?;
    f.write_char(')')?;
    if let Some(re) = &ftype.results {
        f.write_char(' ')?;
        if re.list.len() == 1 && objs.fields[re.list[0]].names.is_empty() {
            fmt_expr(&objs.fields[re.list[0]].typ, f, objs)
        } else {
            f.write_char('(')?;
            fmt_fields(re, ", ", f, objs)?;
            f.write_char(')')
        }
    } else {
        Ok(())
    }
}
