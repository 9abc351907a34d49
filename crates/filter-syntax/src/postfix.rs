use crate::token::Token;
use serde::Serialize;
use std::fmt;

/// Immutable token sequence in reverse-Polish order.
///
/// Evaluating it as a stack machine must leave exactly one value on the
/// stack; that invariant is enforced when the condition tree is built, not
/// at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostfixSequence(Vec<Token>);

impl PostfixSequence {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        PostfixSequence(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }
}

impl fmt::Display for PostfixSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PostfixSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
