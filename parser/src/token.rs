#![allow(non_camel_case_types)]
use std::fmt;

/// The tokens the checker cares about: literals and the expression
/// operators. QUO_ASSIGN never appears in an AST built from source; it is
/// the marker the constant library uses to force integer division.
#[derive(Hash, Eq, PartialEq, Clone)]
pub enum Token {
    // literals
    INT(TokenData),    // 12345
    FLOAT(TokenData),  // 123.45
    IMAG(TokenData),   // 123.45i
    CHAR(TokenData),   // 'a'
    STRING(TokenData), // "abc"

    // operators
    ADD, // +
    SUB, // -
    MUL, // *
    QUO, // /
    REM, // %

    AND,     // &
    OR,      // |
    XOR,     // ^
    SHL,     // <<
    SHR,     // >>
    AND_NOT, // &^

    QUO_ASSIGN, // /=

    LAND,  // &&
    LOR,   // ||
    ARROW, // <-
    NOT,   // !

    EQL, // ==
    NEQ, // !=
    LSS, // <
    LEQ, // <=
    GTR, // >
    GEQ, // >=
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::INT(_) => "INT",
            Token::FLOAT(_) => "FLOAT",
            Token::IMAG(_) => "IMAG",
            Token::CHAR(_) => "CHAR",
            Token::STRING(_) => "STRING",
            Token::ADD => "+",
            Token::SUB => "-",
            Token::MUL => "*",
            Token::QUO => "/",
            Token::REM => "%",
            Token::AND => "&",
            Token::OR => "|",
            Token::XOR => "^",
            Token::SHL => "<<",
            Token::SHR => ">>",
            Token::AND_NOT => "&^",
            Token::QUO_ASSIGN => "/=",
            Token::LAND => "&&",
            Token::LOR => "||",
            Token::ARROW => "<-",
            Token::NOT => "!",
            Token::EQL => "==",
            Token::NEQ => "!=",
            Token::LSS => "<",
            Token::LEQ => "<=",
            Token::GTR => ">",
            Token::GEQ => ">=",
        }
    }

    pub fn is_literal(&self) -> bool {
        match self {
            Token::INT(_)
            | Token::FLOAT(_)
            | Token::IMAG(_)
            | Token::CHAR(_)
            | Token::STRING(_) => true,
            _ => false,
        }
    }

    pub fn get_literal(&self) -> &str {
        match self {
            Token::INT(l) => l.as_str(),
            Token::FLOAT(l) => l.as_str(),
            Token::IMAG(l) => l.as_str(),
            Token::CHAR(l) => l.as_str(),
            Token::STRING(l) => l.as_str(),
            _ => "",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::INT(l)
            | Token::FLOAT(l)
            | Token::IMAG(l)
            | Token::CHAR(l)
            | Token::STRING(l) => f.write_str(l.as_str()),
            _ => f.write_str(self.text()),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            t if t.is_literal() => write!(f, "{} {}", t.text(), t.get_literal()),
            t => write!(f, "\"{}\"", t.text()),
        }
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
enum RawTokenData {
    Str(String),
    StrStr(String, String),
    StrChar(String, char),
}

/// The payload of a literal token: the raw text, plus the cooked value for
/// char and string literals.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct TokenData(Box<RawTokenData>);

impl From<String> for TokenData {
    fn from(s: String) -> Self {
        TokenData(Box::new(RawTokenData::Str(s)))
    }
}

impl From<(String, String)> for TokenData {
    fn from(ss: (String, String)) -> Self {
        TokenData(Box::new(RawTokenData::StrStr(ss.0, ss.1)))
    }
}

impl From<(String, char)> for TokenData {
    fn from(sc: (String, char)) -> Self {
        TokenData(Box::new(RawTokenData::StrChar(sc.0, sc.1)))
    }
}

impl TokenData {
    pub fn as_str(&self) -> &String {
        match self.0.as_ref() {
            RawTokenData::Str(s) => s,
            RawTokenData::StrStr(s, _) => s,
            RawTokenData::StrChar(s, _) => s,
        }
    }

    pub fn as_str_str(&self) -> (&String, &String) {
        match self.0.as_ref() {
            RawTokenData::StrStr(s1, s2) => (s1, s2),
            _ => unreachable!(),
        }
    }

    pub fn as_str_char(&self) -> (&String, &char) {
        match self.0.as_ref() {
            RawTokenData::StrChar(s, c) => (s, c),
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token_text() {
        assert_eq!(Token::AND_NOT.text(), "&^");
        let t = Token::INT("42".to_owned().into());
        assert!(t.is_literal());
        assert_eq!(t.get_literal(), "42");
    }
}
