use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("end", TokenKind::End);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("until", TokenKind::Until);
        map.insert("read", TokenKind::Read);
        map.insert("write", TokenKind::Write);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    OpenParen,
    CloseParen,

    Assignment, // :=
    Equals,     // =
    Less,       // <

    Semicolon,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    If,
    Then,
    Else,
    End,
    Repeat,
    Until,
    Read,
    Write,
}

impl TokenKind {
    /// Tokens that close a statement sequence.
    pub fn ends_sequence(&self) -> bool {
        matches!(
            self,
            TokenKind::EOF | TokenKind::End | TokenKind::Else | TokenKind::Until
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "ID, name= {}", self.value),
            TokenKind::Number => write!(f, "NUM, val= {}", self.value),
            TokenKind::EOF => write!(f, "EOF"),
            kind if RESERVED_LOOKUP.contains_key(self.value.as_str()) => {
                write!(f, "reserved word: {}", kind.to_string().to_lowercase())
            }
            _ => write!(f, "{}", self.value),
        }
    }
}
