// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::constant;
use super::objects::{PackageKey, ScopeKey, TCObjects, TypeKey};
use super::universe::Builtin;
use golite_parser::ast;
use golite_parser::Pos;
use std::borrow::Cow;

#[derive(Clone, Debug)]
pub struct VarProperty {
    pub embedded: bool,
    pub is_field: bool,
    pub used: bool,
}

impl VarProperty {
    pub fn new(embedded: bool, is_field: bool, used: bool) -> VarProperty {
        VarProperty {
            embedded: embedded,
            is_field: is_field,
            used: used,
        }
    }
}

/// EntityType defines the types of LangObj entities
#[derive(Clone, Debug)]
pub enum EntityType {
    /// A Const represents a declared constant.
    Const(constant::Value),
    /// A TypeName represents a name for a (defined or alias) type.
    TypeName,
    /// A Var represents a declared variable (including function
    /// parameters and results, and struct fields).
    Var(VarProperty),
    /// A Func represents a declared function, concrete method, or
    /// abstract (interface) method. Its type is always a Signature.
    Func(bool), // has_ptr_recv, only valid for methods that don't have a type yet
    /// A Builtin represents a built-in function.
    Builtin(Builtin),
    /// Nil represents the predeclared value nil.
    Nil,
}

impl EntityType {
    pub fn is_const(&self) -> bool {
        matches!(self, EntityType::Const(_))
    }

    pub fn is_type_name(&self) -> bool {
        matches!(self, EntityType::TypeName)
    }

    pub fn is_var(&self) -> bool {
        matches!(self, EntityType::Var(_))
    }

    pub fn is_func(&self) -> bool {
        matches!(self, EntityType::Func(_))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, EntityType::Builtin(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, EntityType::Nil)
    }

    pub fn func_has_ptr_recv(&self) -> bool {
        match self {
            EntityType::Func(h) => *h,
            _ => unreachable!(),
        }
    }

    pub fn var_property_mut(&mut self) -> &mut VarProperty {
        match self {
            EntityType::Var(prop) => prop,
            _ => unreachable!(),
        }
    }
}

/// A LangObj describes a named language entity such as a constant, type,
/// variable, function (incl. methods), or the predeclared nil.
#[derive(Clone, Debug)]
pub struct LangObj {
    entity_type: EntityType,
    parent: Option<ScopeKey>,
    pos: Pos,
    pkg: Option<PackageKey>,
    name: String,
    typ: Option<TypeKey>,
    scope_pos: Pos,
}

impl LangObj {
    pub fn new_const(
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
        val: constant::Value,
    ) -> LangObj {
        LangObj::new(EntityType::Const(val), pos, pkg, name, typ)
    }

    pub fn new_type_name(
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> LangObj {
        LangObj::new(EntityType::TypeName, pos, pkg, name, typ)
    }

    pub fn new_var(
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> LangObj {
        LangObj::new(
            EntityType::Var(VarProperty::new(false, false, false)),
            pos,
            pkg,
            name,
            typ,
        )
    }

    pub fn new_param_var(
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> LangObj {
        LangObj::new(
            EntityType::Var(VarProperty::new(false, false, true)),
            pos,
            pkg,
            name,
            typ,
        )
    }

    pub fn new_field(
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
        embedded: bool,
    ) -> LangObj {
        LangObj::new(
            EntityType::Var(VarProperty::new(embedded, true, false)),
            pos,
            pkg,
            name,
            typ,
        )
    }

    pub fn new_func(
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> LangObj {
        LangObj::new(EntityType::Func(false), pos, pkg, name, typ)
    }

    pub fn new_builtin(f: Builtin, name: String, typ: TypeKey) -> LangObj {
        LangObj::new(EntityType::Builtin(f), 0, None, name, Some(typ))
    }

    pub fn new_nil(typ: TypeKey) -> LangObj {
        LangObj::new(EntityType::Nil, 0, None, "nil".to_owned(), Some(typ))
    }

    fn new(
        entity_type: EntityType,
        pos: Pos,
        pkg: Option<PackageKey>,
        name: String,
        typ: Option<TypeKey>,
    ) -> LangObj {
        LangObj {
            entity_type: entity_type,
            parent: None,
            pos: pos,
            pkg: pkg,
            name: name,
            typ: typ,
            scope_pos: 0,
        }
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn entity_type_mut(&mut self) -> &mut EntityType {
        &mut self.entity_type
    }

    pub fn parent(&self) -> &Option<ScopeKey> {
        &self.parent
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn pkg(&self) -> &Option<PackageKey> {
        &self.pkg
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn typ(&self) -> &Option<TypeKey> {
        &self.typ
    }

    pub fn set_type(&mut self, typ: Option<TypeKey>) {
        self.typ = typ
    }

    pub fn set_parent(&mut self, parent: Option<ScopeKey>) {
        self.parent = parent
    }

    pub fn scope_pos(&self) -> Pos {
        self.scope_pos
    }

    pub fn set_scope_pos(&mut self, pos: Pos) {
        self.scope_pos = pos
    }

    pub fn exported(&self) -> bool {
        ast::is_exported(&self.name)
    }

    /// id returns the identity of the object: its name, qualified by the
    /// package path when the name is not exported.
    pub fn id(&self, objs: &TCObjects) -> Cow<str> {
        let pkg = self.pkg.map(|x| &objs.pkgs[x]);
        get_id(pkg.map(|p| p.path().as_str()), &self.name)
    }

    /// same_id reports whether the object's name and package identify the
    /// same entity as (pkg, name).
    pub fn same_id(&self, pkg: &Option<PackageKey>, name: &str, objs: &TCObjects) -> bool {
        // spec:
        // "Two identifiers are different if they are spelled differently,
        // or if they appear in different packages and are not exported.
        // Otherwise, they are the same."
        if name != self.name {
            false
        } else if self.exported() {
            true
        } else if pkg.is_none() || self.pkg.is_none() {
            pkg == &self.pkg
        } else {
            let a = &objs.pkgs[pkg.unwrap()];
            let b = &objs.pkgs[self.pkg.unwrap()];
            a.path() == b.path()
        }
    }

    pub fn const_val(&self) -> &constant::Value {
        match &self.entity_type {
            EntityType::Const(val) => val,
            _ => unreachable!(),
        }
    }

    pub fn var_embedded(&self) -> bool {
        match &self.entity_type {
            EntityType::Var(prop) => prop.embedded,
            _ => false,
        }
    }

    pub fn var_is_field(&self) -> bool {
        match &self.entity_type {
            EntityType::Var(prop) => prop.is_field,
            _ => false,
        }
    }
}

pub fn get_id<'a>(pkg_path: Option<&str>, name: &'a str) -> Cow<'a, str> {
    if ast::is_exported(name) {
        return Cow::Borrowed(name);
    }
    let path = match pkg_path {
        Some(p) if !p.is_empty() => p,
        _ => "_",
    };
    Cow::Owned(format!("{}.{}", path, name))
}
