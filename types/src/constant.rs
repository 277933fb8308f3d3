// Copyright 2026 The Golite Authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::typ::{BasicDetail, BasicInfo, BasicType};
use golite_parser::Token;
use num_bigint::BigInt;
use num_traits::cast::FromPrimitive;
use num_traits::cast::ToPrimitive;
use num_traits::{Num, One, Signed, Zero};
use std::borrow::Borrow;
use std::borrow::Cow;
use std::fmt;

/// Values representing untyped golite constants and their corresponding
/// operations.
///
/// A special Unknown value may be used when a value is unknown due to an
/// error. Operations on unknown values produce unknown values unless
/// specified otherwise.
///
/// Integers are arbitrary precision. Floats are represented as f64 and
/// complex values as a pair of f64, so float precision is not arbitrary.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Unknown,
    Bool(bool),
    Str(String),
    Int(BigInt),
    Float(f64),
    Complex(f64, f64),
}

impl fmt::Display for Value {
    /// For numeric values, the result may be an approximation;
    /// for String values the result may be a shortened string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unknown => write!(f, "unknown"),
            Value::Bool(b) => b.fmt(f),
            Value::Str(s) => write!(f, "\"{}\"", short_quote_str(s, 72)),
            Value::Int(i) => i.fmt(f),
            Value::Float(x) => x.fmt(f),
            Value::Complex(r, i) => write!(f, "({} + {}i)", r, i),
        }
    }
}

impl Value {
    pub fn with_bool(b: bool) -> Value {
        Value::Bool(b)
    }

    pub fn with_str(s: String) -> Value {
        Value::Str(s)
    }

    pub fn with_i64(i: i64) -> Value {
        Value::Int(BigInt::from_i64(i).unwrap())
    }

    pub fn with_u64(u: u64) -> Value {
        Value::Int(BigInt::from_u64(u).unwrap())
    }

    pub fn with_f64(f: f64) -> Value {
        Value::Float(f)
    }

    pub fn make_imag(im: &Value) -> Value {
        match im.to_float() {
            Value::Float(f) => Value::Complex(0.0, f),
            _ => Value::Unknown,
        }
    }

    pub fn make_unknown() -> Value {
        Value::Unknown
    }

    /// with_literal returns the value of the literal token, or Unknown if
    /// the literal text is malformed.
    pub fn with_literal(tok: &Token) -> Value {
        match tok {
            Token::INT(ilit) => int_from_literal(ilit.as_str()),
            Token::FLOAT(flit) => float_from_literal(flit.as_str()),
            Token::IMAG(imlit) => {
                let lit = imlit.as_str();
                if !lit.ends_with('i') {
                    return Value::Unknown;
                }
                match float_from_literal(&lit[..lit.len() - 1]) {
                    Value::Float(f) => Value::Complex(0.0, f),
                    _ => Value::Unknown,
                }
            }
            Token::CHAR(clit) => {
                let (_, ch) = clit.as_str_char();
                Value::with_i64(*ch as i64)
            }
            Token::STRING(slit) => {
                let (_, s) = slit.as_str_str();
                Value::with_str(s.clone())
            }
            _ => Value::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// representable reports whether the value can be represented as a
    /// value of the basic type 'base'. 'word' is the size in bytes of the
    /// implementation-defined int/uint/uintptr types. If 'rounded' is
    /// provided it is set to the rounded value for representable
    /// floating-point and complex values, and to the integer form for
    /// integer values.
    pub fn representable(
        &self,
        base: &BasicDetail,
        word: usize,
        rounded: Option<&mut Value>,
    ) -> bool {
        if let Value::Unknown = self {
            return true; // avoid follow-up errors
        }
        match base.info() {
            BasicInfo::IsInteger => match self.to_int().borrow() {
                Value::Int(ival) => {
                    if let Some(r) = rounded {
                        *r = Value::Int(ival.clone())
                    }
                    match base.typ() {
                        BasicType::Int => fits_signed(ival, word * 8),
                        BasicType::Int8 => ival.to_i8().is_some(),
                        BasicType::Int16 => ival.to_i16().is_some(),
                        BasicType::Int32 | BasicType::Rune => ival.to_i32().is_some(),
                        BasicType::Int64 => ival.to_i64().is_some(),
                        BasicType::Uint | BasicType::Uintptr => fits_unsigned(ival, word * 8),
                        BasicType::Uint8 | BasicType::Byte => ival.to_u8().is_some(),
                        BasicType::Uint16 => ival.to_u16().is_some(),
                        BasicType::Uint32 => ival.to_u32().is_some(),
                        BasicType::Uint64 => ival.to_u64().is_some(),
                        BasicType::UntypedInt | BasicType::UntypedRune => true,
                        _ => unreachable!(),
                    }
                }
                _ => false,
            },
            BasicInfo::IsFloat => match self.to_float() {
                Value::Float(f) => match base.typ() {
                    BasicType::Float64 => {
                        if let Some(r) = rounded {
                            *r = Value::Float(f);
                        }
                        f.is_finite()
                    }
                    BasicType::Float32 => {
                        let f32val = f as f32;
                        if let Some(r) = rounded {
                            *r = Value::Float(f32val.into());
                        }
                        f32val.is_finite()
                    }
                    BasicType::UntypedFloat => true,
                    _ => unreachable!(),
                },
                _ => false,
            },
            BasicInfo::IsComplex => match self.to_complex() {
                Value::Complex(re, im) => match base.typ() {
                    BasicType::Complex128 => {
                        if let Some(r) = rounded {
                            *r = Value::Complex(re, im);
                        }
                        re.is_finite() && im.is_finite()
                    }
                    BasicType::Complex64 => {
                        let (re32, im32) = (re as f32, im as f32);
                        if let Some(r) = rounded {
                            *r = Value::Complex(re32.into(), im32.into());
                        }
                        re32.is_finite() && im32.is_finite()
                    }
                    BasicType::UntypedComplex => true,
                    _ => unreachable!(),
                },
                _ => false,
            },
            BasicInfo::IsString => matches!(self, Value::Str(_)),
            BasicInfo::IsBoolean => matches!(self, Value::Bool(_)),
            _ => false,
        }
    }

    /// to_int coerces the value to an integer if the conversion is exact,
    /// and to Unknown otherwise.
    pub fn to_int(&self) -> Cow<Value> {
        let f64_to_int = |x: f64| -> Cow<Value> {
            if x.is_finite() && x.fract() == 0.0 {
                match BigInt::from_f64(x) {
                    Some(v) => Cow::Owned(Value::Int(v)),
                    None => Cow::Owned(Value::Unknown),
                }
            } else {
                Cow::Owned(Value::Unknown)
            }
        };
        match self {
            Value::Int(_) => Cow::Borrowed(self),
            Value::Float(f) => f64_to_int(*f),
            Value::Complex(r, i) => {
                if *i == 0.0 {
                    f64_to_int(*r)
                } else {
                    Cow::Owned(Value::Unknown)
                }
            }
            _ => Cow::Owned(Value::Unknown),
        }
    }

    pub fn to_float(&self) -> Value {
        let v = match self {
            Value::Int(i) => i.to_f64(),
            Value::Float(f) => Some(*f),
            Value::Complex(r, i) => {
                if *i == 0.0 {
                    Some(*r)
                } else {
                    None
                }
            }
            _ => None,
        };
        v.map_or(Value::Unknown, Value::Float)
    }

    pub fn to_complex(&self) -> Value {
        let v = match self {
            Value::Int(i) => i.to_f64().map(|x| (x, 0.0)),
            Value::Float(f) => Some((*f, 0.0)),
            Value::Complex(r, i) => Some((*r, *i)),
            _ => None,
        };
        v.map_or(Value::Unknown, |(r, i)| Value::Complex(r, i))
    }

    pub fn bool_val(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => unreachable!(),
        }
    }

    pub fn str_val(&self) -> &str {
        match self {
            Value::Str(s) => s,
            _ => unreachable!(),
        }
    }

    /// int_as_u64 returns the u64 value and whether the result is exact.
    pub fn int_as_u64(&self) -> (u64, bool) {
        match self.to_int().borrow() {
            Value::Int(i) => match i.to_u64() {
                Some(v) => (v, true),
                None => (0, false),
            },
            _ => (0, false),
        }
    }

    /// int_as_i64 returns the i64 value and whether the result is exact.
    pub fn int_as_i64(&self) -> (i64, bool) {
        match self.to_int().borrow() {
            Value::Int(i) => match i.to_i64() {
                Some(v) => (v, true),
                None => (0, false),
            },
            _ => (0, false),
        }
    }

    /// real returns the real part, which must be numeric or Unknown.
    pub fn real(&self) -> Value {
        match self {
            Value::Unknown => Value::Unknown,
            Value::Int(_) | Value::Float(_) => self.clone(),
            Value::Complex(r, _) => Value::Float(*r),
            _ => Value::Unknown,
        }
    }

    /// imag returns the imaginary part, which must be numeric or Unknown.
    pub fn imag(&self) -> Value {
        match self {
            Value::Unknown => Value::Unknown,
            Value::Int(_) => Value::with_i64(0),
            Value::Float(_) => Value::Float(0.0),
            Value::Complex(_, i) => Value::Float(*i),
            _ => Value::Unknown,
        }
    }

    /// sign returns -1, 0, or 1 depending on whether the value is
    /// negative, zero, or positive; the value must be numeric or Unknown.
    /// For complex values the sign is 0 if the value is 0, otherwise it is
    /// != 0. If the value is Unknown, the result is 1.
    pub fn sign(&self) -> isize {
        match self {
            Value::Int(i) => match i.sign() {
                num_bigint::Sign::Minus => -1,
                num_bigint::Sign::NoSign => 0,
                num_bigint::Sign::Plus => 1,
            },
            Value::Float(f) => {
                if *f > 0.0 {
                    1
                } else if *f < 0.0 {
                    -1
                } else {
                    0
                }
            }
            Value::Complex(r, i) => {
                if *r == 0.0 && *i == 0.0 {
                    0
                } else {
                    1
                }
            }
            Value::Unknown => 1, // avoid spurious division by zero errors
            _ => unreachable!(),
        }
    }

    /// bit_len returns the number of bits required to represent the
    /// absolute value of an integer.
    pub fn bit_len(&self) -> usize {
        match self {
            Value::Int(i) => i.bits() as usize,
            _ => 0,
        }
    }

    /// binary_op returns the result of the binary expression x op y.
    /// The operation must be defined for the operands. If one of the
    /// operands is Unknown, the result is Unknown.
    /// binary_op doesn't handle comparisons or shifts; use compare
    /// or shift instead.
    ///
    /// To force integer division of Int operands, use op == Token::QUO_ASSIGN
    /// instead of Token::QUO; the result is guaranteed to be Int in this case.
    pub fn binary_op(x: &Value, op: &Token, y: &Value) -> Value {
        let (x, y) = match promote(x, y) {
            Some(pair) => pair,
            None => return Value::Unknown,
        };
        match (&x, &y) {
            (Value::Int(a), Value::Int(b)) => match op {
                Token::ADD => Value::Int(a + b),
                Token::SUB => Value::Int(a - b),
                Token::MUL => Value::Int(a * b),
                Token::QUO => {
                    // x / y with integer operands is floating-point
                    // division; use QUO_ASSIGN for integer division
                    match (a.to_f64(), b.to_f64()) {
                        (Some(fa), Some(fb)) if fb != 0.0 => Value::Float(fa / fb),
                        _ => Value::Unknown,
                    }
                }
                Token::QUO_ASSIGN => {
                    if b.is_zero() {
                        Value::Unknown
                    } else {
                        Value::Int(a / b)
                    }
                }
                Token::REM => {
                    if b.is_zero() {
                        Value::Unknown
                    } else {
                        Value::Int(a % b)
                    }
                }
                Token::AND => Value::Int(a & b),
                Token::OR => Value::Int(a | b),
                Token::XOR => Value::Int(a ^ b),
                Token::AND_NOT => Value::Int(a & &bigint_not(b)),
                _ => Value::Unknown,
            },
            (Value::Float(a), Value::Float(b)) => match op {
                Token::ADD => Value::Float(a + b),
                Token::SUB => Value::Float(a - b),
                Token::MUL => Value::Float(a * b),
                Token::QUO => {
                    if *b == 0.0 {
                        Value::Unknown
                    } else {
                        Value::Float(a / b)
                    }
                }
                _ => Value::Unknown,
            },
            (Value::Complex(ar, ai), Value::Complex(br, bi)) => match op {
                Token::ADD => Value::Complex(ar + br, ai + bi),
                Token::SUB => Value::Complex(ar - br, ai - bi),
                Token::MUL => Value::Complex(ar * br - ai * bi, ar * bi + ai * br),
                Token::QUO => {
                    let s = br * br + bi * bi;
                    if s == 0.0 {
                        Value::Unknown
                    } else {
                        Value::Complex((ar * br + ai * bi) / s, (ai * br - ar * bi) / s)
                    }
                }
                _ => Value::Unknown,
            },
            (Value::Str(a), Value::Str(b)) => match op {
                Token::ADD => Value::Str(format!("{}{}", a, b)),
                _ => Value::Unknown,
            },
            (Value::Bool(a), Value::Bool(b)) => match op {
                Token::LAND => Value::Bool(*a && *b),
                Token::LOR => Value::Bool(*a || *b),
                _ => Value::Unknown,
            },
            _ => Value::Unknown,
        }
    }

    /// unary_op returns the result of the unary expression op y.
    /// The operation must be defined for the operand.
    /// If prec > 0 it specifies the ^ (xor) result size in bits.
    /// If y is Unknown, the result is Unknown.
    pub fn unary_op(op: &Token, y: &Value, prec: usize) -> Value {
        if y.is_unknown() {
            return Value::Unknown;
        }
        match op {
            Token::ADD => match y {
                Value::Int(_) | Value::Float(_) | Value::Complex(_, _) => y.clone(),
                _ => Value::Unknown,
            },
            Token::SUB => match y {
                Value::Int(i) => Value::Int(-i),
                Value::Float(f) => Value::Float(-f),
                Value::Complex(r, i) => Value::Complex(-r, -i),
                _ => Value::Unknown,
            },
            Token::XOR => match y {
                Value::Int(i) => {
                    let mut z = bigint_not(i);
                    // for unsigned types, wrap the result within prec bits
                    if prec > 0 {
                        let mask = (BigInt::one() << prec) - BigInt::one();
                        z = z & mask;
                    }
                    Value::Int(z)
                }
                _ => Value::Unknown,
            },
            Token::NOT => match y {
                Value::Bool(b) => Value::Bool(!b),
                _ => Value::Unknown,
            },
            _ => Value::Unknown,
        }
    }

    /// shift returns the result of x op s, with op being SHL or SHR.
    /// x must be an Int or Unknown.
    pub fn shift(x: &Value, op: &Token, s: usize) -> Value {
        match x {
            Value::Unknown => Value::Unknown,
            Value::Int(i) => match op {
                Token::SHL => Value::Int(i << s),
                Token::SHR => Value::Int(i >> s),
                _ => Value::Unknown,
            },
            _ => Value::Unknown,
        }
    }

    /// compare returns the result of the comparison x op y.
    /// The comparison must be defined for the operands.
    /// If one of the operands is Unknown, the result is false.
    pub fn compare(x: &Value, op: &Token, y: &Value) -> bool {
        let (x, y) = match promote(x, y) {
            Some(pair) => pair,
            None => return false,
        };
        match (&x, &y) {
            (Value::Bool(a), Value::Bool(b)) => match op {
                Token::EQL => a == b,
                Token::NEQ => a != b,
                _ => false,
            },
            (Value::Int(a), Value::Int(b)) => ord_cmp(op, a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => match a.partial_cmp(b) {
                Some(o) => ord_cmp(op, o),
                None => false,
            },
            (Value::Complex(ar, ai), Value::Complex(br, bi)) => match op {
                Token::EQL => ar == br && ai == bi,
                Token::NEQ => ar != br || ai != bi,
                _ => false,
            },
            (Value::Str(a), Value::Str(b)) => ord_cmp(op, a.cmp(b)),
            _ => false,
        }
    }
}

fn ord_cmp(op: &Token, o: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match op {
        Token::EQL => o == Equal,
        Token::NEQ => o != Equal,
        Token::LSS => o == Less,
        Token::LEQ => o != Greater,
        Token::GTR => o == Greater,
        Token::GEQ => o != Less,
        _ => false,
    }
}

/// promote brings two numeric operands to a common representation
/// (Int < Float < Complex). Matching non-numeric kinds are passed through.
fn promote(x: &Value, y: &Value) -> Option<(Value, Value)> {
    fn rank(v: &Value) -> Option<usize> {
        match v {
            Value::Int(_) => Some(0),
            Value::Float(_) => Some(1),
            Value::Complex(_, _) => Some(2),
            _ => None,
        }
    }
    if x.is_unknown() || y.is_unknown() {
        return None;
    }
    match (rank(x), rank(y)) {
        (Some(rx), Some(ry)) => {
            let to = |v: &Value, r: usize| match r {
                0 => v.clone(),
                1 => v.to_float(),
                _ => v.to_complex(),
            };
            let r = rx.max(ry);
            let (a, b) = (to(x, r), to(y, r));
            if a.is_unknown() || b.is_unknown() {
                None
            } else {
                Some((a, b))
            }
        }
        (None, None) => match (x, y) {
            (Value::Bool(_), Value::Bool(_)) | (Value::Str(_), Value::Str(_)) => {
                Some((x.clone(), y.clone()))
            }
            _ => None,
        },
        _ => None,
    }
}

/// bigint_not computes the bitwise complement in two's complement form.
fn bigint_not(i: &BigInt) -> BigInt {
    -(i + BigInt::one())
}

fn fits_signed(i: &BigInt, bits: usize) -> bool {
    let bound = BigInt::one() << (bits - 1);
    *i >= -&bound && *i < bound
}

fn fits_unsigned(i: &BigInt, bits: usize) -> bool {
    !i.is_negative() && *i < (BigInt::one() << bits)
}

// ----------------------------------------------------------------------------
// utilities

pub fn short_quote_str(s: &str, max: usize) -> String {
    let result: String = s.escape_default().collect();
    shorten_with_ellipsis(result, max)
}

pub fn int_from_literal(lit: &str) -> Value {
    let lit: String = lit.chars().filter(|c| *c != '_').collect();
    let lower = lit.to_ascii_lowercase();
    let result = if lower.starts_with("0x") {
        BigInt::from_str_radix(&lit[2..], 16)
    } else if lower.starts_with("0o") {
        BigInt::from_str_radix(&lit[2..], 8)
    } else if lower.starts_with("0b") {
        BigInt::from_str_radix(&lit[2..], 2)
    } else if lit.len() > 1 && lit.starts_with('0') {
        BigInt::from_str_radix(&lit[1..], 8)
    } else {
        BigInt::from_str_radix(&lit, 10)
    };
    match result {
        Ok(i) => Value::Int(i),
        Err(_) => Value::Unknown,
    }
}

pub fn float_from_literal(lit: &str) -> Value {
    let lit: String = lit.chars().filter(|c| *c != '_').collect();
    match lit.parse::<f64>() {
        Ok(f) => Value::with_f64(f),
        Err(_) => Value::Unknown,
    }
}

fn shorten_with_ellipsis(s: String, max: usize) -> String {
    if s.len() <= max {
        s
    } else {
        let mut buf: Vec<char> = s.chars().collect();
        buf.truncate(max.saturating_sub(3));
        buf.extend("...".chars());
        buf.into_iter().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(int_from_literal("42"), Value::with_i64(42));
        assert_eq!(int_from_literal("0x2a"), Value::with_i64(42));
        assert_eq!(int_from_literal("0o52"), Value::with_i64(42));
        assert_eq!(int_from_literal("052"), Value::with_i64(42));
        assert_eq!(int_from_literal("0b101010"), Value::with_i64(42));
        assert_eq!(int_from_literal("1_000"), Value::with_i64(1000));
        assert_eq!(int_from_literal("x"), Value::Unknown);
    }

    #[test]
    fn test_binary_op() {
        let a = Value::with_i64(7);
        let b = Value::with_i64(2);
        assert_eq!(
            Value::binary_op(&a, &Token::QUO_ASSIGN, &b),
            Value::with_i64(3)
        );
        assert_eq!(Value::binary_op(&a, &Token::QUO, &b), Value::with_f64(3.5));
        assert_eq!(
            Value::binary_op(&a, &Token::AND_NOT, &b),
            Value::with_i64(5)
        );
        // mixed kinds promote
        assert_eq!(
            Value::binary_op(&a, &Token::ADD, &Value::with_f64(0.5)),
            Value::with_f64(7.5)
        );
    }

    #[test]
    fn test_unary_wrap() {
        // ^0 with a 64 bit unsigned precision wraps to 2^64-1
        let v = Value::unary_op(&Token::XOR, &Value::with_i64(0), 64);
        assert_eq!(v, Value::with_u64(u64::MAX));
        // signed complement
        let v = Value::unary_op(&Token::XOR, &Value::with_i64(0), 0);
        assert_eq!(v, Value::with_i64(-1));
    }

    #[test]
    fn test_to_int_exactness() {
        assert!(Value::with_f64(2.0).to_int().is_int());
        assert!(!Value::with_f64(1.5).to_int().is_int());
        assert!(!Value::Complex(1.0, 2.0).to_int().is_int());
    }

    #[test]
    fn test_shift() {
        let one = Value::with_i64(1);
        let v = Value::shift(&one, &Token::SHL, 100);
        assert_eq!(v.bit_len(), 101);
        assert_eq!(Value::shift(&v, &Token::SHR, 100), Value::with_i64(1));
    }

    #[test]
    fn test_compare() {
        assert!(Value::compare(
            &Value::with_i64(1),
            &Token::LSS,
            &Value::with_f64(1.5)
        ));
        assert!(!Value::compare(&Value::Unknown, &Token::EQL, &Value::Unknown));
        assert!(Value::compare(
            &Value::with_str("a".to_owned()),
            &Token::LSS,
            &Value::with_str("b".to_owned())
        ));
    }
}
