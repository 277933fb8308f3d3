// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Golite's type checker.
//!
//! The checker is driven per expression: build an AST with
//! `golite_parser`, declare the objects the expression refers to in a
//! package scope, and call one of the public entry points (`expr`,
//! `multi_expr`, `expr_with_hint`, `expr_or_type`) on a `Checker`.
//! Untyped constants keep their untyped types while flowing through
//! expressions; the enclosing context forces concretization, and
//! remaining untyped expressions are finalized by `record_untyped` at
//! the end of a pass.

pub mod constant;

pub mod obj;
pub mod package;
pub mod scope;

pub mod typ;

pub mod lookup;
pub mod objects;

pub mod operand;

pub mod universe;

mod check;

pub use check::{
    Checker, Display, Displayer, ErrCode, ExprInfo, FilesContext, ObjContext, TypeAndValue,
    TypeError, TypeInfo,
};
