// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::check::Checker;
use golite_parser::{FilePosErrors, Pos};

/// ErrCode identifies the kind of a diagnostic. Codes are attached to
/// every user error so that tools (and tests) can match on them without
/// parsing message text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrCode {
    UndefinedOp,
    InvalidConstVal,
    UnaddressableOperand,
    InvalidReceive,
    InvalidShiftOperand,
    InvalidShiftCount,
    InvalidUntypedConversion,
    MismatchedTypes,
    DivByZero,
    TruncatedFloat,
    NumericOverflow,
    BadDotDotDotSyntax,
    UntypedLit,
    MixedStructLit,
    InvalidLitField,
    MissingLitField,
    DuplicateLitField,
    InvalidStructLit,
    UnexportedLitField,
    InvalidTypeCycle,
    MissingLitKey,
    DuplicateLitKey,
    InvalidLit,
    NonIndexableOperand,
    NonSliceableOperand,
    InvalidSliceExpr,
    SwappedSliceIndices,
    BadTypeKeyword,
    InvalidAssert,
    ImpossibleAssert,
    InvalidIndirection,
    InvalidIndex,
    InvalidLitIndex,
    OversizeArrayLit,
    TooManyValues,
    UncalledBuiltin,
    NotAnExpr,
    // codes below are used by the collaborator layers around the
    // expression checker
    UndeclaredName,
    UnusedExpr,
    WrongArgCount,
    WrongResultCount,
    InvalidCall,
    InvalidConversion,
    IncompatibleAssign,
    UntypedNilUse,
    DuplicateDecl,
    NotAType,
    InvalidArrayLen,
    InvalidBuiltinArg,
    MissingFieldOrMethod,
    InvalidBlank,
    InvalidIota,
    InvalidAST,
}

impl ErrCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrCode::UndefinedOp => "UndefinedOp",
            ErrCode::InvalidConstVal => "InvalidConstVal",
            ErrCode::UnaddressableOperand => "UnaddressableOperand",
            ErrCode::InvalidReceive => "InvalidReceive",
            ErrCode::InvalidShiftOperand => "InvalidShiftOperand",
            ErrCode::InvalidShiftCount => "InvalidShiftCount",
            ErrCode::InvalidUntypedConversion => "InvalidUntypedConversion",
            ErrCode::MismatchedTypes => "MismatchedTypes",
            ErrCode::DivByZero => "DivByZero",
            ErrCode::TruncatedFloat => "TruncatedFloat",
            ErrCode::NumericOverflow => "NumericOverflow",
            ErrCode::BadDotDotDotSyntax => "BadDotDotDotSyntax",
            ErrCode::UntypedLit => "UntypedLit",
            ErrCode::MixedStructLit => "MixedStructLit",
            ErrCode::InvalidLitField => "InvalidLitField",
            ErrCode::MissingLitField => "MissingLitField",
            ErrCode::DuplicateLitField => "DuplicateLitField",
            ErrCode::InvalidStructLit => "InvalidStructLit",
            ErrCode::UnexportedLitField => "UnexportedLitField",
            ErrCode::InvalidTypeCycle => "InvalidTypeCycle",
            ErrCode::MissingLitKey => "MissingLitKey",
            ErrCode::DuplicateLitKey => "DuplicateLitKey",
            ErrCode::InvalidLit => "InvalidLit",
            ErrCode::NonIndexableOperand => "NonIndexableOperand",
            ErrCode::NonSliceableOperand => "NonSliceableOperand",
            ErrCode::InvalidSliceExpr => "InvalidSliceExpr",
            ErrCode::SwappedSliceIndices => "SwappedSliceIndices",
            ErrCode::BadTypeKeyword => "BadTypeKeyword",
            ErrCode::InvalidAssert => "InvalidAssert",
            ErrCode::ImpossibleAssert => "ImpossibleAssert",
            ErrCode::InvalidIndirection => "InvalidIndirection",
            ErrCode::InvalidIndex => "InvalidIndex",
            ErrCode::InvalidLitIndex => "InvalidLitIndex",
            ErrCode::OversizeArrayLit => "OversizeArrayLit",
            ErrCode::TooManyValues => "TooManyValues",
            ErrCode::UncalledBuiltin => "UncalledBuiltin",
            ErrCode::NotAnExpr => "NotAnExpr",
            ErrCode::UndeclaredName => "UndeclaredName",
            ErrCode::UnusedExpr => "UnusedExpr",
            ErrCode::WrongArgCount => "WrongArgCount",
            ErrCode::WrongResultCount => "WrongResultCount",
            ErrCode::InvalidCall => "InvalidCall",
            ErrCode::InvalidConversion => "InvalidConversion",
            ErrCode::IncompatibleAssign => "IncompatibleAssign",
            ErrCode::UntypedNilUse => "UntypedNilUse",
            ErrCode::DuplicateDecl => "DuplicateDecl",
            ErrCode::NotAType => "NotAType",
            ErrCode::InvalidArrayLen => "InvalidArrayLen",
            ErrCode::InvalidBuiltinArg => "InvalidBuiltinArg",
            ErrCode::MissingFieldOrMethod => "MissingFieldOrMethod",
            ErrCode::InvalidBlank => "InvalidBlank",
            ErrCode::InvalidIota => "InvalidIota",
            ErrCode::InvalidAST => "InvalidAST",
        }
    }
}

/// A TypeError is a diagnostic that has been detected but not yet
/// reported, so that callers may decide whether to emit it.
#[derive(Debug)]
pub struct TypeError {
    pub pos: Pos,
    pub code: ErrCode,
    pub msg: String,
}

impl TypeError {
    pub fn new(pos: Pos, code: ErrCode, msg: String) -> TypeError {
        TypeError {
            pos: pos,
            code: code,
            msg: msg,
        }
    }
}

impl<'a> Checker<'a> {
    pub fn error(&self, pos: Pos, code: ErrCode, msg: String) {
        self.error_impl(pos, code, msg, false);
    }

    pub fn error_str(&self, pos: Pos, code: ErrCode, msg: &str) {
        self.error_impl(pos, code, msg.to_string(), false);
    }

    pub fn soft_error(&self, pos: Pos, code: ErrCode, msg: String) {
        self.error_impl(pos, code, msg, true);
    }

    pub fn err(&self, e: TypeError) {
        self.error_impl(e.pos, e.code, e.msg, false);
    }

    /// invalid_ast reports an impossible AST shape; checking continues
    /// defensively.
    pub fn invalid_ast(&self, pos: Pos, msg: &str) {
        self.error(pos, ErrCode::InvalidAST, format!("invalid AST: {}", msg));
    }

    pub fn invalid_op(&self, pos: Pos, code: ErrCode, msg: &str) {
        self.error(pos, code, format!("invalid operation: {}", msg));
    }

    pub fn invalid_arg(&self, pos: Pos, code: ErrCode, msg: &str) {
        self.error(pos, code, format!("invalid argument: {}", msg));
    }

    fn error_impl(&self, pos: Pos, code: ErrCode, msg: String, soft: bool) {
        match self.fset.file(pos) {
            Some(file) => {
                FilePosErrors::new(file, self.errors()).add(pos, msg, soft, Some(code.as_str()))
            }
            None => self
                .errors()
                .add(None, msg, soft, Some(code.as_str())),
        }
    }
}
