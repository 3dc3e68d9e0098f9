use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// Type annotation carried by expression nodes.
///
/// `Void` is the unset state: every expression starts as `Void` and the
/// analyzer replaces it with `Integer` or `Boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpType {
    #[default]
    Void,
    Integer,
    Boolean,
}

impl Display for ExpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpType::Void => write!(f, "Void"),
            ExpType::Integer => write!(f, "Integer"),
            ExpType::Boolean => write!(f, "Boolean"),
        }
    }
}

/// Binary operators of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Less,
    Equal,
    Plus,
    Minus,
    Times,
    Over,
}

impl Operator {
    pub fn from_token(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::Less => Some(Operator::Less),
            TokenKind::Equals => Some(Operator::Equal),
            TokenKind::Plus => Some(Operator::Plus),
            TokenKind::Dash => Some(Operator::Minus),
            TokenKind::Star => Some(Operator::Times),
            TokenKind::Slash => Some(Operator::Over),
            _ => None,
        }
    }

    /// Comparators produce `Boolean`, everything else produces `Integer`.
    pub fn is_comparison(&self) -> bool {
        matches!(self, Operator::Less | Operator::Equal)
    }

    pub fn result_type(&self) -> ExpType {
        if self.is_comparison() {
            ExpType::Boolean
        } else {
            ExpType::Integer
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Operator::Less => "<",
            Operator::Equal => "=",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Over => "/",
        };
        write!(f, "{}", symbol)
    }
}
