// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! This crate is part of the Golite project.
//!
//! It provides the expression-level AST of the golite language together
//! with its supporting services: tokens, source positions, the shared
//! diagnostic list, and the arenas for keyed AST nodes. There is no
//! lexer or parser here; ASTs are constructed programmatically by
//! embedding clients (and by the type-checker tests).
//!
//! # Feature
//! - `btree_map`: Make `Map` use BTreeMap instead of HashMap
//!

mod errors;
mod map;
mod objects;
mod position;
mod token;

pub mod ast;

pub use errors::*;
pub use map::{Map, MapIter};
pub use objects::*;
pub use position::*;
pub use token::*;
