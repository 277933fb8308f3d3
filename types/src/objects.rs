// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::constant;
use super::obj::LangObj;
use super::package::Package;
use super::scope::Scope;
use super::typ::*;
use super::universe::{Sizes, Universe};
use golite_parser::Pos;

use slotmap::{new_key_type, DenseSlotMap};

const DEFAULT_CAPACITY: usize = 16;

macro_rules! new_objects {
    () => {
        DenseSlotMap::with_capacity_and_key(DEFAULT_CAPACITY)
    };
}

new_key_type! { pub struct ObjKey; }
new_key_type! { pub struct TypeKey; }
new_key_type! { pub struct PackageKey; }
new_key_type! { pub struct ScopeKey; }

pub type LangObjs = DenseSlotMap<ObjKey, LangObj>;
pub type Types = DenseSlotMap<TypeKey, Type>;
pub type Packages = DenseSlotMap<PackageKey, Package>;
pub type Scopes = DenseSlotMap<ScopeKey, Scope>;

/// The container of all checker-owned objects; also holds the universe.
pub struct TCObjects {
    pub lobjs: LangObjs,
    pub types: Types,
    pub pkgs: Packages,
    pub scopes: Scopes,
    pub universe: Option<Universe>,
}

impl TCObjects {
    pub fn new() -> TCObjects {
        TCObjects::with_sizes(Sizes::default())
    }

    pub fn with_sizes(sizes: Sizes) -> TCObjects {
        let mut objs = TCObjects {
            lobjs: new_objects!(),
            types: new_objects!(),
            pkgs: new_objects!(),
            scopes: new_objects!(),
            universe: None,
        };
        objs.universe = Some(Universe::new(&mut objs, sizes));
        objs
    }

    pub fn universe(&self) -> &Universe {
        self.universe.as_ref().unwrap()
    }

    pub fn new_scope(
        &mut self,
        parent: Option<ScopeKey>,
        pos: Pos,
        end: Pos,
        comment: String,
        is_func: bool,
    ) -> ScopeKey {
        let scope = Scope::new(parent, pos, end, comment, is_func);
        self.scopes.insert(scope)
    }

    pub fn new_package(&mut self, path: String) -> PackageKey {
        let parent = Some(*self.universe().scope());
        let skey = self.new_scope(parent, 0, 0, format!("package {}", path), false);
        let pkg = Package::new(path, skey);
        self.pkgs.insert(pkg)
    }

    pub fn new_const(
        &mut self,
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
        val: constant::Value,
    ) -> ObjKey {
        self.lobjs.insert(LangObj::new_const(pos, pkg, name, typ, val))
    }

    pub fn new_type_name(
        &mut self,
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> ObjKey {
        self.lobjs.insert(LangObj::new_type_name(pos, pkg, name, typ))
    }

    pub fn new_var(
        &mut self,
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> ObjKey {
        self.lobjs.insert(LangObj::new_var(pos, pkg, name, typ))
    }

    pub fn new_param_var(
        &mut self,
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> ObjKey {
        self.lobjs.insert(LangObj::new_param_var(pos, pkg, name, typ))
    }

    pub fn new_field(
        &mut self,
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
        embedded: bool,
    ) -> ObjKey {
        self.lobjs
            .insert(LangObj::new_field(pos, pkg, name, typ, embedded))
    }

    pub fn new_func(
        &mut self,
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> ObjKey {
        self.lobjs.insert(LangObj::new_func(pos, pkg, name, typ))
    }

    pub fn new_t_basic(&mut self, typ: BasicType, info: BasicInfo, name: &'static str) -> TypeKey {
        self.types
            .insert(Type::Basic(BasicDetail::new(typ, info, name)))
    }

    pub fn new_t_array(&mut self, elem: TypeKey, len: Option<u64>) -> TypeKey {
        self.types.insert(Type::Array(ArrayDetail::new(elem, len)))
    }

    pub fn new_t_slice(&mut self, elem: TypeKey) -> TypeKey {
        self.types.insert(Type::Slice(SliceDetail::new(elem)))
    }

    pub fn new_t_struct(&mut self, fields: Vec<ObjKey>) -> TypeKey {
        self.types.insert(Type::Struct(StructDetail::new(fields)))
    }

    pub fn new_t_pointer(&mut self, base: TypeKey) -> TypeKey {
        self.types.insert(Type::Pointer(PointerDetail::new(base)))
    }

    pub fn new_t_tuple(&mut self, vars: Vec<ObjKey>) -> TypeKey {
        self.types.insert(Type::Tuple(TupleDetail::new(vars)))
    }

    pub fn new_t_signature(
        &mut self,
        scope: Option<ScopeKey>,
        recv: Option<ObjKey>,
        params: TypeKey,
        results: TypeKey,
        variadic: bool,
    ) -> TypeKey {
        self.types.insert(Type::Signature(SignatureDetail::new(
            scope, recv, params, results, variadic,
        )))
    }

    pub fn new_t_interface(&mut self, methods: Vec<ObjKey>, embeddeds: Vec<TypeKey>) -> TypeKey {
        self.types
            .insert(Type::Interface(InterfaceDetail::new(methods, embeddeds)))
    }

    pub fn new_t_empty_interface(&mut self) -> TypeKey {
        self.types
            .insert(Type::Interface(InterfaceDetail::new_empty()))
    }

    pub fn new_t_map(&mut self, key: TypeKey, elem: TypeKey) -> TypeKey {
        self.types.insert(Type::Map(MapDetail::new(key, elem)))
    }

    pub fn new_t_chan(&mut self, dir: ChanDir, elem: TypeKey) -> TypeKey {
        self.types.insert(Type::Chan(ChanDetail::new(dir, elem)))
    }

    pub fn new_t_named(
        &mut self,
        obj: Option<ObjKey>,
        underlying: TypeKey,
        methods: Vec<ObjKey>,
    ) -> TypeKey {
        self.types
            .insert(Type::Named(NamedDetail::new(obj, underlying, methods)))
    }
}
