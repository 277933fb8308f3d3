// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::obj::LangObj;
use super::objects::{ObjKey, ScopeKey, TCObjects, TypeKey};
use std::fmt;
use std::fmt::Write;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BasicType {
    Invalid,
    // predeclared types
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Str,
    UnsafePointer,
    // types for untyped values
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
    // aliases
    Byte, // = Uint8
    Rune, // = Int32
}

impl BasicType {
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            BasicType::Uint
                | BasicType::Uint8
                | BasicType::Uint16
                | BasicType::Uint32
                | BasicType::Uint64
                | BasicType::Byte
                | BasicType::Uintptr
        )
    }

    pub fn is_untyped(&self) -> bool {
        matches!(
            self,
            BasicType::UntypedBool
                | BasicType::UntypedInt
                | BasicType::UntypedRune
                | BasicType::UntypedFloat
                | BasicType::UntypedComplex
                | BasicType::UntypedString
                | BasicType::UntypedNil
        )
    }

    /// normalize folds the alias types onto the types they alias.
    pub fn normalize(&self) -> BasicType {
        match self {
            BasicType::Byte => BasicType::Uint8,
            BasicType::Rune => BasicType::Int32,
            _ => *self,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BasicInfo {
    IsInvalid,
    IsBoolean,
    IsInteger,
    IsFloat,
    IsComplex,
    IsString,
}

impl BasicInfo {
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            BasicInfo::IsInteger | BasicInfo::IsFloat | BasicInfo::IsString
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            BasicInfo::IsInteger | BasicInfo::IsFloat | BasicInfo::IsComplex
        )
    }

    pub fn is_const_type(&self) -> bool {
        matches!(
            self,
            BasicInfo::IsBoolean
                | BasicInfo::IsInteger
                | BasicInfo::IsFloat
                | BasicInfo::IsComplex
                | BasicInfo::IsString
        )
    }
}

/// A BasicDetail represents a basic type.
#[derive(Copy, Clone, Debug)]
pub struct BasicDetail {
    typ: BasicType,
    info: BasicInfo,
    name: &'static str,
}

impl BasicDetail {
    pub fn new(typ: BasicType, info: BasicInfo, name: &'static str) -> BasicDetail {
        BasicDetail {
            typ: typ,
            info: info,
            name: name,
        }
    }

    pub fn typ(&self) -> BasicType {
        self.typ
    }

    pub fn info(&self) -> BasicInfo {
        self.info
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// An ArrayDetail represents an array type. A len of None stands for an
/// array with an as yet unknown length; it only occurs transiently while
/// a [...]T composite literal is being checked.
#[derive(Clone, Debug)]
pub struct ArrayDetail {
    len: Option<u64>,
    elem: TypeKey,
}

impl ArrayDetail {
    pub fn new(elem: TypeKey, len: Option<u64>) -> ArrayDetail {
        ArrayDetail {
            len: len,
            elem: elem,
        }
    }

    pub fn len(&self) -> &Option<u64> {
        &self.len
    }

    pub fn set_len(&mut self, len: u64) {
        self.len = Some(len);
    }

    pub fn elem(&self) -> TypeKey {
        self.elem
    }
}

#[derive(Clone, Debug)]
pub struct SliceDetail {
    elem: TypeKey,
}

impl SliceDetail {
    pub fn new(elem: TypeKey) -> SliceDetail {
        SliceDetail { elem: elem }
    }

    pub fn elem(&self) -> TypeKey {
        self.elem
    }
}

/// A StructDetail represents a struct type; fields are Var objects with
/// is_field set.
#[derive(Clone, Debug)]
pub struct StructDetail {
    fields: Vec<ObjKey>,
}

impl StructDetail {
    pub fn new(fields: Vec<ObjKey>) -> StructDetail {
        StructDetail { fields: fields }
    }

    pub fn fields(&self) -> &Vec<ObjKey> {
        &self.fields
    }
}

#[derive(Clone, Debug)]
pub struct PointerDetail {
    base: TypeKey,
}

impl PointerDetail {
    pub fn new(base: TypeKey) -> PointerDetail {
        PointerDetail { base: base }
    }

    pub fn base(&self) -> TypeKey {
        self.base
    }
}

/// A TupleDetail represents an ordered list of variables.
/// Tuples are used as components of signatures and to represent the types
/// of multiple assignments; they are not first class types of the language.
#[derive(Clone, Debug)]
pub struct TupleDetail {
    vars: Vec<ObjKey>,
}

impl TupleDetail {
    pub fn new(vars: Vec<ObjKey>) -> TupleDetail {
        TupleDetail { vars: vars }
    }

    pub fn vars(&self) -> &Vec<ObjKey> {
        &self.vars
    }
}

/// A SignatureDetail represents a function or method type.
#[derive(Clone, Debug)]
pub struct SignatureDetail {
    scope: Option<ScopeKey>, // function scope, present for function literals
    recv: Option<ObjKey>,
    params: TypeKey,  // Tuple
    results: TypeKey, // Tuple
    variadic: bool,
}

impl SignatureDetail {
    pub fn new(
        scope: Option<ScopeKey>,
        recv: Option<ObjKey>,
        params: TypeKey,
        results: TypeKey,
        variadic: bool,
    ) -> SignatureDetail {
        SignatureDetail {
            scope: scope,
            recv: recv,
            params: params,
            results: results,
            variadic: variadic,
        }
    }

    pub fn scope(&self) -> &Option<ScopeKey> {
        &self.scope
    }

    pub fn recv(&self) -> &Option<ObjKey> {
        &self.recv
    }

    pub fn params(&self) -> TypeKey {
        self.params
    }

    pub fn results(&self) -> TypeKey {
        self.results
    }

    pub fn variadic(&self) -> bool {
        self.variadic
    }

    pub fn params_count(&self, objs: &TCObjects) -> usize {
        objs.types[self.params].try_as_tuple().unwrap().vars().len()
    }

    pub fn results_count(&self, objs: &TCObjects) -> usize {
        objs.types[self.results].try_as_tuple().unwrap().vars().len()
    }
}

/// An InterfaceDetail represents an interface type. all_methods is the
/// complete, sorted method set of the interface (explicit methods plus
/// those of embedded interfaces); None until the interface is completed.
#[derive(Clone, Debug)]
pub struct InterfaceDetail {
    methods: Vec<ObjKey>,
    embeddeds: Vec<TypeKey>,
    all_methods: Option<Vec<ObjKey>>,
}

impl InterfaceDetail {
    pub fn new(methods: Vec<ObjKey>, embeddeds: Vec<TypeKey>) -> InterfaceDetail {
        InterfaceDetail {
            methods: methods,
            embeddeds: embeddeds,
            all_methods: None,
        }
    }

    pub fn new_empty() -> InterfaceDetail {
        InterfaceDetail {
            methods: vec![],
            embeddeds: vec![],
            all_methods: Some(vec![]),
        }
    }

    pub fn methods(&self) -> &Vec<ObjKey> {
        &self.methods
    }

    pub fn embeddeds(&self) -> &Vec<TypeKey> {
        &self.embeddeds
    }

    pub fn all_methods(&self) -> &Option<Vec<ObjKey>> {
        &self.all_methods
    }

    pub fn set_all_methods(&mut self, all: Vec<ObjKey>) {
        self.all_methods = Some(all);
    }

    pub fn is_complete(&self) -> bool {
        self.all_methods.is_some()
    }

    pub fn is_empty(&self) -> bool {
        match &self.all_methods {
            Some(m) => m.is_empty(),
            None => self.methods.is_empty() && self.embeddeds.is_empty(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MapDetail {
    key: TypeKey,
    elem: TypeKey,
}

impl MapDetail {
    pub fn new(key: TypeKey, elem: TypeKey) -> MapDetail {
        MapDetail {
            key: key,
            elem: elem,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn elem(&self) -> TypeKey {
        self.elem
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChanDir {
    SendRecv,
    SendOnly,
    RecvOnly,
}

#[derive(Clone, Debug)]
pub struct ChanDetail {
    dir: ChanDir,
    elem: TypeKey,
}

impl ChanDetail {
    pub fn new(dir: ChanDir, elem: TypeKey) -> ChanDetail {
        ChanDetail {
            dir: dir,
            elem: elem,
        }
    }

    pub fn dir(&self) -> ChanDir {
        self.dir
    }

    pub fn elem(&self) -> TypeKey {
        self.elem
    }
}

/// A NamedDetail represents a defined (named) type.
#[derive(Clone, Debug)]
pub struct NamedDetail {
    obj: Option<ObjKey>, // corresponding declared object (TypeName)
    underlying: TypeKey, // never a Named type
    methods: Vec<ObjKey>,
}

impl NamedDetail {
    pub fn new(obj: Option<ObjKey>, underlying: TypeKey, methods: Vec<ObjKey>) -> NamedDetail {
        NamedDetail {
            obj: obj,
            underlying: underlying,
            methods: methods,
        }
    }

    pub fn obj(&self) -> &Option<ObjKey> {
        &self.obj
    }

    pub fn underlying(&self) -> TypeKey {
        self.underlying
    }

    pub fn set_underlying(&mut self, t: TypeKey) {
        self.underlying = t;
    }

    pub fn methods(&self) -> &Vec<ObjKey> {
        &self.methods
    }

    pub fn add_method(&mut self, m: ObjKey) {
        self.methods.push(m);
    }
}

#[derive(Clone, Debug)]
pub enum Type {
    Basic(BasicDetail),
    Array(ArrayDetail),
    Slice(SliceDetail),
    Struct(StructDetail),
    Pointer(PointerDetail),
    Tuple(TupleDetail),
    Signature(SignatureDetail),
    Interface(InterfaceDetail),
    Map(MapDetail),
    Chan(ChanDetail),
    Named(NamedDetail),
}

macro_rules! try_as {
    ($name:ident, $name_mut:ident, $variant:ident, $detail:ty) => {
        pub fn $name(&self) -> Option<&$detail> {
            match self {
                Type::$variant(d) => Some(d),
                _ => None,
            }
        }

        pub fn $name_mut(&mut self) -> Option<&mut $detail> {
            match self {
                Type::$variant(d) => Some(d),
                _ => None,
            }
        }
    };
}

impl Type {
    try_as!(try_as_basic, try_as_basic_mut, Basic, BasicDetail);
    try_as!(try_as_array, try_as_array_mut, Array, ArrayDetail);
    try_as!(try_as_slice, try_as_slice_mut, Slice, SliceDetail);
    try_as!(try_as_struct, try_as_struct_mut, Struct, StructDetail);
    try_as!(try_as_pointer, try_as_pointer_mut, Pointer, PointerDetail);
    try_as!(try_as_tuple, try_as_tuple_mut, Tuple, TupleDetail);
    try_as!(
        try_as_signature,
        try_as_signature_mut,
        Signature,
        SignatureDetail
    );
    try_as!(
        try_as_interface,
        try_as_interface_mut,
        Interface,
        InterfaceDetail
    );
    try_as!(try_as_map, try_as_map_mut, Map, MapDetail);
    try_as!(try_as_chan, try_as_chan_mut, Chan, ChanDetail);
    try_as!(try_as_named, try_as_named_mut, Named, NamedDetail);

    pub fn is_named(&self) -> bool {
        matches!(self, Type::Basic(_) | Type::Named(_))
    }

    pub fn underlying(&self) -> Option<TypeKey> {
        match self {
            Type::Named(n) => Some(n.underlying),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------
// predicates

/// underlying_type returns the underlying type of the type with key 't'.
pub fn underlying_type(t: TypeKey, objs: &TCObjects) -> TypeKey {
    match objs.types[t].underlying() {
        Some(ut) => ut,
        None => t,
    }
}

fn basic_info(t: TypeKey, objs: &TCObjects) -> Option<BasicInfo> {
    objs.types[underlying_type(t, objs)]
        .try_as_basic()
        .map(|b| b.info())
}

fn basic_kind(t: TypeKey, objs: &TCObjects) -> Option<BasicType> {
    objs.types[underlying_type(t, objs)]
        .try_as_basic()
        .map(|b| b.typ())
}

pub fn is_boolean(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs) == Some(BasicInfo::IsBoolean)
}

pub fn is_integer(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs) == Some(BasicInfo::IsInteger)
}

pub fn is_unsigned(t: TypeKey, objs: &TCObjects) -> bool {
    basic_kind(t, objs).map_or(false, |k| k.is_unsigned())
}

pub fn is_float(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs) == Some(BasicInfo::IsFloat)
}

pub fn is_complex(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs) == Some(BasicInfo::IsComplex)
}

pub fn is_numeric(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs).map_or(false, |i| i.is_numeric())
}

pub fn is_string(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs) == Some(BasicInfo::IsString)
}

pub fn is_ordered(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs).map_or(false, |i| i.is_ordered())
}

pub fn is_const_type(t: TypeKey, objs: &TCObjects) -> bool {
    basic_info(t, objs).map_or(false, |i| i.is_const_type())
}

pub fn is_untyped(t: TypeKey, objs: &TCObjects) -> bool {
    objs.types[t]
        .try_as_basic()
        .map_or(false, |b| b.typ().is_untyped())
}

pub fn is_typed(t: TypeKey, objs: &TCObjects) -> bool {
    !is_untyped(t, objs)
}

pub fn is_interface(t: TypeKey, objs: &TCObjects) -> bool {
    objs.types[underlying_type(t, objs)]
        .try_as_interface()
        .is_some()
}

/// has_nil reports whether a type includes the nil value.
pub fn has_nil(t: TypeKey, objs: &TCObjects) -> bool {
    match &objs.types[underlying_type(t, objs)] {
        Type::Basic(b) => b.typ() == BasicType::UnsafePointer,
        Type::Slice(_)
        | Type::Pointer(_)
        | Type::Signature(_)
        | Type::Interface(_)
        | Type::Map(_)
        | Type::Chan(_) => true,
        _ => false,
    }
}

/// comparable reports whether values of the type are comparable.
pub fn comparable(t: TypeKey, objs: &TCObjects) -> bool {
    match &objs.types[underlying_type(t, objs)] {
        // assume invalid types are comparable to avoid follow-up errors
        Type::Basic(b) => b.typ() != BasicType::UntypedNil,
        Type::Pointer(_) | Type::Interface(_) | Type::Chan(_) => true,
        Type::Struct(s) => s
            .fields()
            .iter()
            .all(|f| comparable(objs.lobjs[*f].typ().unwrap(), objs)),
        Type::Array(a) => comparable(a.elem(), objs),
        _ => false,
    }
}

/// untyped_default_type returns the default "typed" type for an "untyped"
/// type; it returns the incoming type for all other types. Untyped nil
/// has no default type and maps to the invalid type.
pub fn untyped_default_type(t: TypeKey, objs: &TCObjects) -> TypeKey {
    if let Some(b) = objs.types[t].try_as_basic() {
        let u = objs.universe();
        match b.typ() {
            BasicType::UntypedBool => return u.types()[&BasicType::Bool],
            BasicType::UntypedInt => return u.types()[&BasicType::Int],
            BasicType::UntypedRune => return u.types()[&BasicType::Rune],
            BasicType::UntypedFloat => return u.types()[&BasicType::Float64],
            BasicType::UntypedComplex => return u.types()[&BasicType::Complex128],
            BasicType::UntypedString => return u.types()[&BasicType::Str],
            BasicType::UntypedNil => return u.types()[&BasicType::Invalid],
            _ => {}
        }
    }
    t
}

/// identical reports whether x and y are identical types.
pub fn identical(x: TypeKey, y: TypeKey, objs: &TCObjects) -> bool {
    if x == y {
        return true;
    }
    match (&objs.types[x], &objs.types[y]) {
        (Type::Basic(a), Type::Basic(b)) => a.typ().normalize() == b.typ().normalize(),
        (Type::Array(a), Type::Array(b)) => {
            a.len() == b.len() && identical(a.elem(), b.elem(), objs)
        }
        (Type::Slice(a), Type::Slice(b)) => identical(a.elem(), b.elem(), objs),
        (Type::Struct(a), Type::Struct(b)) => {
            a.fields().len() == b.fields().len()
                && a.fields().iter().zip(b.fields().iter()).all(|(fa, fb)| {
                    let (va, vb) = (&objs.lobjs[*fa], &objs.lobjs[*fb]);
                    va.var_embedded() == vb.var_embedded()
                        && va.same_id(vb.pkg(), vb.name(), objs)
                        && identical_option(va.typ(), vb.typ(), objs)
                })
        }
        (Type::Pointer(a), Type::Pointer(b)) => identical(a.base(), b.base(), objs),
        (Type::Tuple(a), Type::Tuple(b)) => {
            a.vars().len() == b.vars().len()
                && a.vars().iter().zip(b.vars().iter()).all(|(va, vb)| {
                    identical_option(objs.lobjs[*va].typ(), objs.lobjs[*vb].typ(), objs)
                })
        }
        (Type::Signature(a), Type::Signature(b)) => {
            // receivers are ignored for signature identity
            a.variadic() == b.variadic()
                && identical(a.params(), b.params(), objs)
                && identical(a.results(), b.results(), objs)
        }
        (Type::Interface(a), Type::Interface(b)) => {
            let (ma, mb) = (a.all_methods(), b.all_methods());
            match (ma, mb) {
                (Some(ma), Some(mb)) => {
                    ma.len() == mb.len() && {
                        let mut sa = method_ids(ma, objs);
                        let mut sb = method_ids(mb, objs);
                        sa.sort_by(|x, y| x.0.cmp(&y.0));
                        sb.sort_by(|x, y| x.0.cmp(&y.0));
                        sa.iter().zip(sb.iter()).all(|(a, b)| {
                            a.0 == b.0 && identical_option(&a.1, &b.1, objs)
                        })
                    }
                }
                _ => false,
            }
        }
        (Type::Map(a), Type::Map(b)) => {
            identical(a.key(), b.key(), objs) && identical(a.elem(), b.elem(), objs)
        }
        (Type::Chan(a), Type::Chan(b)) => {
            a.dir() == b.dir() && identical(a.elem(), b.elem(), objs)
        }
        (Type::Named(a), Type::Named(b)) => match (a.obj(), b.obj()) {
            (Some(oa), Some(ob)) => oa == ob,
            _ => false,
        },
        _ => false,
    }
}

pub fn identical_option(x: &Option<TypeKey>, y: &Option<TypeKey>, objs: &TCObjects) -> bool {
    match (x, y) {
        (Some(a), Some(b)) => identical(*a, *b, objs),
        (None, None) => true,
        _ => false,
    }
}

fn method_ids(methods: &[ObjKey], objs: &TCObjects) -> Vec<(String, Option<TypeKey>)> {
    methods
        .iter()
        .map(|m| {
            let lo: &LangObj = &objs.lobjs[*m];
            (lo.id(objs).to_string(), *lo.typ())
        })
        .collect()
}

// ----------------------------------------------------------------------------
// formatting

pub fn fmt_type(t: Option<TypeKey>, f: &mut fmt::Formatter<'_>, objs: &TCObjects) -> fmt::Result {
    match t {
        Some(t) => fmt_type_impl(t, f, objs),
        None => f.write_str("<nil>"),
    }
}

fn fmt_type_impl(t: TypeKey, f: &mut fmt::Formatter<'_>, objs: &TCObjects) -> fmt::Result {
    match &objs.types[t] {
        Type::Basic(detail) => f.write_str(detail.name()),
        Type::Array(detail) => {
            match detail.len() {
                Some(i) => write!(f, "[{}]", i)?,
                None => f.write_str("[...]")?,
            };
            fmt_type_impl(detail.elem(), f, objs)
        }
        Type::Slice(detail) => {
            f.write_str("[]")?;
            fmt_type_impl(detail.elem(), f, objs)
        }
        Type::Struct(detail) => {
            f.write_str("struct{")?;
            for (i, fld) in detail.fields().iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                let lo = &objs.lobjs[*fld];
                if !lo.var_embedded() {
                    write!(f, "{} ", lo.name())?;
                }
                fmt_type(*lo.typ(), f, objs)?;
            }
            f.write_char('}')
        }
        Type::Pointer(detail) => {
            f.write_char('*')?;
            fmt_type_impl(detail.base(), f, objs)
        }
        Type::Tuple(detail) => fmt_tuple(detail, false, f, objs),
        Type::Signature(detail) => {
            f.write_str("func")?;
            fmt_signature_impl(detail, f, objs)
        }
        Type::Interface(detail) => {
            f.write_str("interface{")?;
            let methods = match detail.all_methods() {
                Some(all) => all,
                None => detail.methods(),
            };
            for (i, m) in methods.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                let lo = &objs.lobjs[*m];
                f.write_str(lo.name())?;
                if let Some(t) = lo.typ() {
                    if let Some(sig) = objs.types[*t].try_as_signature() {
                        fmt_signature_impl(sig, f, objs)?;
                    }
                }
            }
            f.write_char('}')
        }
        Type::Map(detail) => {
            f.write_str("map[")?;
            fmt_type_impl(detail.key(), f, objs)?;
            f.write_char(']')?;
            fmt_type_impl(detail.elem(), f, objs)
        }
        Type::Chan(detail) => {
            let s = match detail.dir() {
                ChanDir::SendRecv => "chan ",
                ChanDir::SendOnly => "chan<- ",
                ChanDir::RecvOnly => "<-chan ",
            };
            f.write_str(s)?;
            fmt_type_impl(detail.elem(), f, objs)
        }
        Type::Named(detail) => match detail.obj() {
            Some(o) => f.write_str(objs.lobjs[*o].name()),
            None => f.write_str("<Named>"),
        },
    }
}

pub fn fmt_signature(t: TypeKey, f: &mut fmt::Formatter<'_>, objs: &TCObjects) -> fmt::Result {
    match objs.types[t].try_as_signature() {
        Some(detail) => fmt_signature_impl(detail, f, objs),
        None => Ok(()),
    }
}

fn fmt_signature_impl(
    sig: &SignatureDetail,
    f: &mut fmt::Formatter<'_>,
    objs: &TCObjects,
) -> fmt::Result {
    let params = objs.types[sig.params()].try_as_tuple().unwrap();
    fmt_tuple(params, sig.variadic(), f, objs)?;
    let results = objs.types[sig.results()].try_as_tuple().unwrap();
    match results.vars().len() {
        0 => Ok(()),
        1 => {
            f.write_char(' ')?;
            fmt_type(*objs.lobjs[results.vars()[0]].typ(), f, objs)
        }
        _ => {
            f.write_char(' ')?;
            fmt_tuple(results, false, f, objs)
        }
    }
}

fn fmt_tuple(
    tuple: &TupleDetail,
    variadic: bool,
    f: &mut fmt::Formatter<'_>,
    objs: &TCObjects,
) -> fmt::Result {
    f.write_char('(')?;
    let n = tuple.vars().len();
    for (i, v) in tuple.vars().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        let lo = &objs.lobjs[*v];
        if variadic && i == n - 1 {
            f.write_str("...")?;
            // the last variadic parameter is a slice; print its element
            if let Some(t) = lo.typ() {
                if let Some(s) = objs.types[*t].try_as_slice() {
                    fmt_type_impl(s.elem(), f, objs)?;
                    continue;
                }
            }
        }
        fmt_type(*lo.typ(), f, objs)?;
    }
    f.write_char(')')
}
