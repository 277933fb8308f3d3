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

use super::objects::{ObjKey, ScopeKey, TCObjects};
use golite_parser::{Map, Pos};
use std::fmt;

/// A Scope maintains a set of objects and a link to its containing
/// (parent) scope. Objects may be inserted and looked up by name.
pub struct Scope {
    parent: Option<ScopeKey>,
    elems: Map<String, ObjKey>,
    pos: Pos, // scope pos; may be invalid
    end: Pos,
    comment: String, // for debugging only
    is_func: bool,   // set if this is a function scope
}

impl Scope {
    pub fn new(
        parent: Option<ScopeKey>,
        pos: Pos,
        end: Pos,
        comment: String,
        is_func: bool,
    ) -> Scope {
        Scope {
            parent: parent,
            elems: Map::new(),
            pos: pos,
            end: end,
            comment: comment,
            is_func: is_func,
        }
    }

    pub fn parent(&self) -> &Option<ScopeKey> {
        &self.parent
    }

    pub fn elems(&self) -> &Map<String, ObjKey> {
        &self.elems
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn is_func(&self) -> bool {
        self.is_func
    }

    pub fn lookup(&self, name: &str) -> Option<&ObjKey> {
        self.elems.get(name)
    }

    /// lookup_parent follows the parent chain of scopes starting with self
    /// until it finds a scope where lookup(name) returns an object, and
    /// then returns that scope and object. If a position pos is provided,
    /// only objects that were declared at or before pos are considered.
    /// If no such scope and object exists, it returns None.
    pub fn lookup_parent(
        self_key: &ScopeKey,
        name: &str,
        pos: Option<Pos>,
        objs: &TCObjects,
    ) -> Option<(ScopeKey, ObjKey)> {
        let mut scope_key = *self_key;
        let mut s = &objs.scopes[scope_key];
        loop {
            if let Some(okey) = s.lookup(name) {
                if pos.is_none() || objs.lobjs[*okey].scope_pos() <= pos.unwrap() {
                    return Some((scope_key, *okey));
                }
            }
            match s.parent {
                Some(skey) => {
                    scope_key = skey;
                    s = &objs.scopes[skey];
                }
                None => break,
            }
        }
        None
    }

    /// insert attempts to insert an object into scope s.
    /// If s already contains an alternative object alt with
    /// the same name, insert leaves s unchanged and returns alt.
    /// Otherwise it inserts the object, sets the object's parent scope
    /// if not already set, and returns None.
    pub fn insert(self_key: ScopeKey, okey: ObjKey, objs: &mut TCObjects) -> Option<ObjKey> {
        let scope = &objs.scopes[self_key];
        let name = objs.lobjs[okey].name().clone();
        if let Some(alt) = scope.lookup(&name) {
            return Some(*alt);
        }
        objs.scopes[self_key].elems.insert(name, okey);
        let lobj = &mut objs.lobjs[okey];
        if lobj.parent().is_none() {
            lobj.set_parent(Some(self_key));
        }
        None
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} scope\n", self.comment)?;
        for name in self.elems.keys() {
            write!(f, ".  {}\n", name)?;
        }
        Ok(())
    }
}
