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

use super::super::constant::Value;
use super::super::objects::TypeKey;
use super::super::operand::{Operand, OperandMode};
use super::super::typ::{self, BasicType, Type};
use super::check::{Checker, FilesContext};
use super::errors::ErrCode;

impl<'a> Checker<'a> {
    /// conversion typechecks the conversion T(x); the result is stored
    /// in x.
    pub fn conversion(&mut self, x: &mut Operand, t: TypeKey, fctx: &mut FilesContext) {
        let const_arg = x.mode.constant_val().is_some();
        let xtype = x.typ.unwrap();

        let ok = if const_arg && typ::is_const_type(t, self.tc_objs) {
            // constant conversion
            let tu = typ::underlying_type(t, self.tc_objs);
            let basic = *self.otype(tu).try_as_basic().unwrap();
            let word = self.tc_objs.universe().sizes().word_size();
            let v = x.mode.constant_val().unwrap().clone();
            let mut rounded = v.clone();
            if v.representable(&basic, word, Some(&mut rounded)) {
                *x.mode.constant_val_mut().unwrap() = rounded;
                true
            } else if typ::is_integer(xtype, self.tc_objs) && typ::is_string(tu, self.tc_objs) {
                // an integer converts to a string holding the rune
                let mut s = "\u{FFFD}".to_string();
                let (i, exact) = v.int_as_i64();
                if exact && 0 <= i && i <= char::MAX as i64 {
                    if let Some(c) = char::from_u32(i as u32) {
                        s = c.to_string();
                    }
                }
                *x.mode.constant_val_mut().unwrap() = Value::with_str(s);
                true
            } else {
                false
            }
        } else if self.convertible_to(x, t) {
            // non-constant conversion
            x.mode = OperandMode::Value;
            true
        } else {
            false
        };

        if !ok {
            let xd = self.new_dis(x);
            let td = self.new_dis(&t);
            let msg = format!("cannot convert {} to {}", xd, td);
            self.error(xd.pos(), ErrCode::InvalidConversion, msg);
            x.mode = OperandMode::Invalid;
            return;
        }

        // The conversion argument types are final. For untyped values
        // the conversion provides the type, per the spec: "A constant
        // may be given a type explicitly by a constant declaration or
        // conversion, ...".
        if typ::is_untyped(xtype, self.tc_objs) {
            // - For conversions to interfaces, use the argument's
            //   default type.
            // - For conversions of untyped constants to non-constant
            //   types, also use the default type (e.g., []byte("foo")
            //   should report string not []byte as type for the
            //   constant "foo").
            // - Keep untyped nil for untyped nil arguments.
            // - For integer to string conversions, keep the argument
            //   type.
            let o = &self.tc_objs;
            let final_t = if typ::is_interface(t, o) || (const_arg && !typ::is_const_type(t, o)) {
                typ::untyped_default_type(xtype, o)
            } else if typ::is_integer(xtype, o) && typ::is_string(t, o) {
                xtype
            } else {
                t
            };
            let e = x.expr.clone();
            if let Some(e) = e {
                self.update_expr_type(&e, final_t, true, fctx);
            }
        }

        x.typ = Some(t);
    }

    /// convertible_to reports whether a non-constant x is convertible to
    /// a value of type 't'.
    pub fn convertible_to(&self, x: &Operand, t: TypeKey) -> bool {
        let o = &self.tc_objs;
        // "x is assignable to t"
        if x.assignable_to(t, None, o) {
            return true;
        }

        // "x's type and t have identical underlying types"
        let v = x.typ.unwrap();
        let vu = typ::underlying_type(v, o);
        let tu = typ::underlying_type(t, o);
        if typ::identical(vu, tu, o) {
            return true;
        }

        // "x's type and t are unnamed pointer types and their pointer
        // base types have identical underlying types"
        if let (Some(vp), Some(tp)) = (
            o.types[v].try_as_pointer(),
            o.types[t].try_as_pointer(),
        ) {
            let vbu = typ::underlying_type(vp.base(), o);
            let tbu = typ::underlying_type(tp.base(), o);
            if typ::identical(vbu, tbu, o) {
                return true;
            }
        }

        // "x's type and t are both integer or floating point types"
        let num = |k: TypeKey| typ::is_integer(k, o) || typ::is_float(k, o);
        if num(v) && num(t) {
            return true;
        }

        // "x's type and t are both complex types"
        if typ::is_complex(v, o) && typ::is_complex(t, o) {
            return true;
        }

        // "x is an integer or a slice of bytes or runes and t is a
        // string type"
        if (typ::is_integer(v, o) || self.is_bytes_or_runes(vu)) && typ::is_string(t, o) {
            return true;
        }

        // "x is a string and t is a slice of bytes or runes"
        if typ::is_string(v, o) && self.is_bytes_or_runes(tu) {
            return true;
        }

        // "any pointer or value of underlying type uintptr can be
        // converted into an unsafe pointer, and vice versa"
        let is_uintptr = |k: TypeKey| {
            o.types[typ::underlying_type(k, o)]
                .try_as_basic()
                .map_or(false, |b| b.typ() == BasicType::Uintptr)
        };
        let is_unsafe_ptr = |k: TypeKey| {
            o.types[typ::underlying_type(k, o)]
                .try_as_basic()
                .map_or(false, |b| b.typ() == BasicType::UnsafePointer)
        };
        let is_ptr =
            |k: TypeKey| matches!(&o.types[typ::underlying_type(k, o)], Type::Pointer(_));
        if (is_ptr(v) || is_uintptr(v)) && is_unsafe_ptr(t) {
            return true;
        }
        if (is_ptr(t) || is_uintptr(t)) && is_unsafe_ptr(v) {
            return true;
        }

        false
    }

    fn is_bytes_or_runes(&self, t: TypeKey) -> bool {
        let o = &self.tc_objs;
        if let Some(detail) = o.types[t].try_as_slice() {
            let eu = typ::underlying_type(detail.elem(), o);
            if let Some(b) = o.types[eu].try_as_basic() {
                let k = b.typ().normalize();
                return k == BasicType::Uint8 || k == BasicType::Int32;
            }
        }
        false
    }
}
