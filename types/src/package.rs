// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::objects::ScopeKey;
use std::fmt;

/// A Package describes a golite package.
pub struct Package {
    path: String,
    name: Option<String>,
    scope: ScopeKey,
}

impl Package {
    pub fn new(path: String, scope: ScopeKey) -> Package {
        Package {
            path: path,
            name: None,
            scope: scope,
        }
    }

    pub fn path(&self) -> &String {
        &self.path
    }

    pub fn name(&self) -> &Option<String> {
        &self.name
    }

    pub fn set_name(&mut self, name: String) {
        self.name = Some(name)
    }

    /// scope returns the package scope holding the objects declared at
    /// package level.
    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(n) => write!(f, "package {} ({})", n, &self.path),
            None => write!(f, "uninitialized package, path: {}", &self.path),
        }
    }
}
