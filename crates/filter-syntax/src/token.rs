use serde::Serialize;
use std::fmt;

/// One token of a combination expression.
///
/// Identifiers are opaque filter keys; the compiler never interprets them
/// beyond syntax checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    Identifier(String),
    Not,          // !
    And,          // &
    Or,           // |
    LeftParen,    // (
    RightParen,   // )
}

impl Token {
    /// Operator binding strength; `0` for non-operators.
    pub fn precedence(&self) -> u8 {
        match self {
            Token::Not => 3,
            Token::And => 2,
            Token::Or => 1,
            _ => 0,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Not | Token::And | Token::Or)
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Token::And | Token::Or)
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, Token::Not)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Not => write!(f, "!"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}
