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

use super::constant::Value;
use super::obj::LangObj;
use super::objects::{ObjKey, ScopeKey, TCObjects, TypeKey};
use super::scope::Scope;
use super::typ::{BasicInfo, BasicType};
use golite_parser::Map;

/// ExprKind describes the kind of an expression; the kind determines if
/// an expression is valid in 'statement context'.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Conversion,
    Expression,
    Statement,
}

/// The predeclared built-in functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Builtin {
    Cap,
    Complex,
    Delete,
    Imag,
    Len,
    Make,
    New,
    Real,
}

#[derive(Copy, Clone, Debug)]
pub struct BuiltinInfo {
    pub name: &'static str,
    pub arg_count: usize,
    pub variadic: bool,
    pub kind: ExprKind,
}

/// Sizes is the sizing oracle: the implementation-defined widths of the
/// int, uint and uintptr types.
#[derive(Copy, Clone, Debug)]
pub struct Sizes {
    word_size: usize, // in bytes
}

impl Default for Sizes {
    fn default() -> Sizes {
        Sizes { word_size: 8 }
    }
}

impl Sizes {
    pub fn new(word_size: usize) -> Sizes {
        debug_assert!(word_size == 4 || word_size == 8);
        Sizes {
            word_size: word_size,
        }
    }

    /// sizeof_basic returns the size of the basic type in bytes.
    pub fn sizeof_basic(&self, t: BasicType) -> usize {
        match t.normalize() {
            BasicType::Bool | BasicType::Int8 | BasicType::Uint8 => 1,
            BasicType::Int16 | BasicType::Uint16 => 2,
            BasicType::Int32 | BasicType::Uint32 | BasicType::Float32 => 4,
            BasicType::Int64 | BasicType::Uint64 | BasicType::Float64 | BasicType::Complex64 => 8,
            BasicType::Complex128 => 16,
            BasicType::Int | BasicType::Uint | BasicType::Uintptr => self.word_size,
            BasicType::Str | BasicType::UnsafePointer => self.word_size,
            _ => self.word_size,
        }
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }
}

/// Universe sets up the universe scope with the predeclared types,
/// constants, nil and the built-in functions.
pub struct Universe {
    scope: ScopeKey,
    types: Map<BasicType, TypeKey>,
    builtins: Map<Builtin, BuiltinInfo>,
    iota: ObjKey,
    nil: ObjKey,
    no_value_tuple: TypeKey,
    sizes: Sizes,
}

impl Universe {
    pub fn new(objs: &mut TCObjects, sizes: Sizes) -> Universe {
        let skey = objs.new_scope(None, 0, usize::MAX, "universe".to_owned(), false);

        let defs: Vec<(BasicType, BasicInfo, &'static str)> = vec![
            (BasicType::Invalid, BasicInfo::IsInvalid, "invalid type"),
            (BasicType::Bool, BasicInfo::IsBoolean, "bool"),
            (BasicType::Int, BasicInfo::IsInteger, "int"),
            (BasicType::Int8, BasicInfo::IsInteger, "int8"),
            (BasicType::Int16, BasicInfo::IsInteger, "int16"),
            (BasicType::Int32, BasicInfo::IsInteger, "int32"),
            (BasicType::Int64, BasicInfo::IsInteger, "int64"),
            (BasicType::Uint, BasicInfo::IsInteger, "uint"),
            (BasicType::Uint8, BasicInfo::IsInteger, "uint8"),
            (BasicType::Uint16, BasicInfo::IsInteger, "uint16"),
            (BasicType::Uint32, BasicInfo::IsInteger, "uint32"),
            (BasicType::Uint64, BasicInfo::IsInteger, "uint64"),
            (BasicType::Uintptr, BasicInfo::IsInteger, "uintptr"),
            (BasicType::Float32, BasicInfo::IsFloat, "float32"),
            (BasicType::Float64, BasicInfo::IsFloat, "float64"),
            (BasicType::Complex64, BasicInfo::IsComplex, "complex64"),
            (BasicType::Complex128, BasicInfo::IsComplex, "complex128"),
            (BasicType::Str, BasicInfo::IsString, "string"),
            (BasicType::UnsafePointer, BasicInfo::IsInvalid, "Pointer"),
            (BasicType::UntypedBool, BasicInfo::IsBoolean, "untyped bool"),
            (BasicType::UntypedInt, BasicInfo::IsInteger, "untyped int"),
            (BasicType::UntypedRune, BasicInfo::IsInteger, "untyped rune"),
            (BasicType::UntypedFloat, BasicInfo::IsFloat, "untyped float"),
            (
                BasicType::UntypedComplex,
                BasicInfo::IsComplex,
                "untyped complex",
            ),
            (
                BasicType::UntypedString,
                BasicInfo::IsString,
                "untyped string",
            ),
            (BasicType::UntypedNil, BasicInfo::IsInvalid, "untyped nil"),
            (BasicType::Byte, BasicInfo::IsInteger, "byte"),
            (BasicType::Rune, BasicInfo::IsInteger, "rune"),
        ];

        let mut types = Map::new();
        for (bt, info, name) in defs.into_iter() {
            let tkey = objs.new_t_basic(bt, info, name);
            types.insert(bt, tkey);
            // untyped types and the invalid type are not declared in any
            // scope; the alias declarations shadow their canonical types
            if !bt.is_untyped() && bt != BasicType::Invalid && bt != BasicType::UnsafePointer {
                let okey = objs.new_type_name(0, None, name.to_owned(), Some(tkey));
                Scope::insert(skey, okey, objs);
            }
        }

        // predeclared constants
        for (name, val) in [("true", true), ("false", false)].iter() {
            let tkey = types[&BasicType::UntypedBool];
            let okey = objs.new_const(0, None, (*name).to_owned(), Some(tkey), Value::Bool(*val));
            Scope::insert(skey, okey, objs);
        }
        let iota = objs.new_const(
            0,
            None,
            "iota".to_owned(),
            Some(types[&BasicType::UntypedInt]),
            Value::with_i64(0),
        );
        Scope::insert(skey, iota, objs);

        // predeclared nil
        let nil_key = objs
            .lobjs
            .insert(LangObj::new_nil(types[&BasicType::UntypedNil]));
        Scope::insert(skey, nil_key, objs);

        // built-in functions
        let builtin_defs: Vec<(Builtin, BuiltinInfo)> = vec![
            (
                Builtin::Cap,
                BuiltinInfo {
                    name: "cap",
                    arg_count: 1,
                    variadic: false,
                    kind: ExprKind::Expression,
                },
            ),
            (
                Builtin::Complex,
                BuiltinInfo {
                    name: "complex",
                    arg_count: 2,
                    variadic: false,
                    kind: ExprKind::Expression,
                },
            ),
            (
                Builtin::Delete,
                BuiltinInfo {
                    name: "delete",
                    arg_count: 2,
                    variadic: false,
                    kind: ExprKind::Statement,
                },
            ),
            (
                Builtin::Imag,
                BuiltinInfo {
                    name: "imag",
                    arg_count: 1,
                    variadic: false,
                    kind: ExprKind::Expression,
                },
            ),
            (
                Builtin::Len,
                BuiltinInfo {
                    name: "len",
                    arg_count: 1,
                    variadic: false,
                    kind: ExprKind::Expression,
                },
            ),
            (
                Builtin::Make,
                BuiltinInfo {
                    name: "make",
                    arg_count: 1,
                    variadic: true,
                    kind: ExprKind::Expression,
                },
            ),
            (
                Builtin::New,
                BuiltinInfo {
                    name: "new",
                    arg_count: 1,
                    variadic: false,
                    kind: ExprKind::Expression,
                },
            ),
            (
                Builtin::Real,
                BuiltinInfo {
                    name: "real",
                    arg_count: 1,
                    variadic: false,
                    kind: ExprKind::Expression,
                },
            ),
        ];
        let mut builtins = Map::new();
        let invalid = types[&BasicType::Invalid];
        for (id, info) in builtin_defs.into_iter() {
            let okey = objs
                .lobjs
                .insert(LangObj::new_builtin(id, info.name.to_owned(), invalid));
            Scope::insert(skey, okey, objs);
            builtins.insert(id, info);
        }

        let no_value_tuple = objs.new_t_tuple(vec![]);

        Universe {
            scope: skey,
            types: types,
            builtins: builtins,
            iota: iota,
            nil: nil_key,
            no_value_tuple: no_value_tuple,
            sizes: sizes,
        }
    }

    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }

    pub fn types(&self) -> &Map<BasicType, TypeKey> {
        &self.types
    }

    pub fn builtins(&self) -> &Map<Builtin, BuiltinInfo> {
        &self.builtins
    }

    pub fn iota(&self) -> &ObjKey {
        &self.iota
    }

    pub fn nil(&self) -> &ObjKey {
        &self.nil
    }

    /// no_value_tuple is the empty tuple recorded as the type of
    /// expressions that produce no value.
    pub fn no_value_tuple(&self) -> TypeKey {
        self.no_value_tuple
    }

    pub fn sizes(&self) -> &Sizes {
        &self.sizes
    }
}
