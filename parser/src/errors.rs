// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::position::{File, Pos, Position};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A single accumulated diagnostic. `code` is the machine-readable error
/// code attached by the type checker; diagnostics raised by other
/// producers leave it None.
#[derive(Clone, Debug)]
pub struct Error {
    pub pos: Position,
    pub msg: String,
    pub code: Option<&'static str>,
    pub soft: bool,
    order: usize, // display order
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.code {
            Some(c) => write!(f, "{}  {} [{}]\n", self.pos, self.msg, c),
            None => write!(f, "{}  {}\n", self.pos, self.msg),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ErrorList {
    errors: Rc<RefCell<Vec<Error>>>,
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Result: {} errors\n", self.errors.borrow().len())?;
        for e in self.errors.borrow().iter() {
            e.fmt(f)?;
        }
        Ok(())
    }
}

impl ErrorList {
    pub fn new() -> ErrorList {
        ErrorList {
            errors: Rc::new(RefCell::new(vec![])),
        }
    }

    pub fn add(&self, p: Option<Position>, msg: String, soft: bool, code: Option<&'static str>) {
        let pos = p.unwrap_or(Position::null());
        let order = pos.offset;
        self.errors.borrow_mut().push(Error {
            pos: pos,
            msg: msg,
            code: code,
            soft: soft,
            order: order,
        });
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sort(&self) {
        self.errors.borrow_mut().sort_by_key(|e| e.order);
    }

    pub fn borrow(&self) -> Ref<Vec<Error>> {
        self.errors.borrow()
    }
}

/// FilePosErrors resolves raw Pos values against a File before pushing
/// onto the shared list.
#[derive(Clone, Debug)]
pub struct FilePosErrors<'a> {
    file: &'a File,
    elist: &'a ErrorList,
}

impl<'a> FilePosErrors<'a> {
    pub fn new(file: &'a File, elist: &'a ErrorList) -> FilePosErrors<'a> {
        FilePosErrors {
            file: file,
            elist: elist,
        }
    }

    pub fn add(&self, pos: Pos, msg: String, soft: bool, code: Option<&'static str>) {
        let p = self.file.position(pos);
        self.elist.add(Some(p), msg, soft, code);
    }

    pub fn add_str(&self, pos: Pos, s: &str, soft: bool, code: Option<&'static str>) {
        self.add(pos, s.to_string(), soft, code);
    }
}
