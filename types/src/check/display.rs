// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::super::objects::TypeKey;
use super::super::operand::{fmt_expr, Operand};
use super::super::typ::fmt_type;
use super::check::Checker;
use golite_parser::ast::{Expr, Node};
use golite_parser::Pos;
use std::fmt;

/// Display lets checker-owned data (operands, types, expressions) be
/// formatted against the checker's object containers.
pub trait Display {
    fn format(&self, f: &mut fmt::Formatter, c: &Checker) -> fmt::Result;

    fn position(&self, _: &Checker) -> Pos {
        0
    }
}

pub struct Displayer<'a, 'o> {
    obj: &'a dyn Display,
    c: &'a Checker<'o>,
}

impl<'a, 'o> Displayer<'a, 'o> {
    pub fn new(obj: &'a dyn Display, c: &'a Checker<'o>) -> Displayer<'a, 'o> {
        Displayer { obj: obj, c: c }
    }

    pub fn pos(&self) -> Pos {
        self.obj.position(self.c)
    }
}

impl<'a, 'o> fmt::Display for Displayer<'a, 'o> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.obj.format(f, self.c)
    }
}

impl Display for Expr {
    fn format(&self, f: &mut fmt::Formatter, c: &Checker) -> fmt::Result {
        fmt_expr(self, f, c.ast_objs)
    }

    fn position(&self, c: &Checker) -> Pos {
        self.pos(c.ast_objs)
    }
}

impl Display for Operand {
    fn format(&self, f: &mut fmt::Formatter, c: &Checker) -> fmt::Result {
        self.fmt(f, c.tc_objs, c.ast_objs)
    }

    fn position(&self, c: &Checker) -> Pos {
        self.pos(c.ast_objs)
    }
}

impl Display for TypeKey {
    fn format(&self, f: &mut fmt::Formatter, c: &Checker) -> fmt::Result {
        fmt_type(Some(*self), f, c.tc_objs)
    }
}

impl Display for Option<TypeKey> {
    fn format(&self, f: &mut fmt::Formatter, c: &Checker) -> fmt::Result {
        fmt_type(*self, f, c.tc_objs)
    }
}

impl<'a> Checker<'a> {
    /// new_dis creates a Displayer for diagnostics formatting.
    pub fn new_dis<'c>(&'c self, x: &'c dyn Display) -> Displayer<'c, 'a> {
        Displayer::new(x, self)
    }
}
