#![allow(dead_code)] // not every test binary uses every helper

use model::{
    condition::Condition,
    definition::{Definitions, FilterDefinition},
    resolver::BoxError,
};
use serde_json::json;
use std::{collections::HashMap, sync::Arc};

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Mock backend: a boolean expression tree over named leaves.
#[derive(Debug, Clone)]
pub struct BoolCond(Arc<Node>);

#[derive(Debug)]
enum Node {
    Leaf(String),
    And(BoolCond, BoolCond),
    Or(BoolCond, BoolCond),
    Not(BoolCond),
}

impl BoolCond {
    pub fn leaf(name: impl Into<String>) -> Self {
        BoolCond(Arc::new(Node::Leaf(name.into())))
    }

    /// Evaluate against a truth assignment for the leaves.
    pub fn eval(&self, assignment: &HashMap<String, bool>) -> bool {
        match &*self.0 {
            Node::Leaf(name) => *assignment.get(name).unwrap_or(&false),
            Node::And(left, right) => left.eval(assignment) && right.eval(assignment),
            Node::Or(left, right) => left.eval(assignment) || right.eval(assignment),
            Node::Not(inner) => !inner.eval(assignment),
        }
    }

    /// Canonical combinator shape, for structural comparisons.
    pub fn shape(&self) -> String {
        match &*self.0 {
            Node::Leaf(name) => name.clone(),
            Node::And(left, right) => format!("({} & {})", left.shape(), right.shape()),
            Node::Or(left, right) => format!("({} | {})", left.shape(), right.shape()),
            Node::Not(inner) => format!("!{}", inner.shape()),
        }
    }

    pub fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for BoolCond {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Condition for BoolCond {
    fn and(&self, other: &Self) -> Self {
        BoolCond(Arc::new(Node::And(self.clone(), other.clone())))
    }

    fn or(&self, other: &Self) -> Self {
        BoolCond(Arc::new(Node::Or(self.clone(), other.clone())))
    }

    fn not(&self) -> Self {
        BoolCond(Arc::new(Node::Not(self.clone())))
    }
}

/// Leaf resolver producing a fresh `BoolCond` leaf named by identifier.
pub fn leaf_resolver(
    key: &str,
    _property_ref: &str,
    _operator_code: &str,
) -> Result<BoolCond, BoxError> {
    Ok(BoolCond::leaf(key))
}

/// Definitions keyed by the given identifiers, with per-key properties and
/// a placeholder value.
pub fn definitions(keys: &[&str]) -> Definitions {
    keys.iter()
        .map(|key| {
            (
                key.to_string(),
                FilterDefinition::new(format!("prop_{key}"), "eq", json!(1)),
            )
        })
        .collect()
}

/// Independent oracle: recursive-descent evaluation of the infix grammar
/// `expr := term ('|' term)*`, `term := factor ('&' factor)*`,
/// `factor := '!'* (identifier | '(' expr ')')`.
pub fn reference_eval(text: &str, assignment: &HashMap<String, bool>) -> bool {
    let mut parser = RefParser {
        chars: text.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
        assignment,
    };
    let value = parser.expr();
    assert_eq!(parser.pos, parser.chars.len(), "oracle consumed all input");
    value
}

struct RefParser<'a> {
    chars: Vec<char>,
    pos: usize,
    assignment: &'a HashMap<String, bool>,
}

impl RefParser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expr(&mut self) -> bool {
        let mut value = self.term();
        while self.peek() == Some('|') {
            self.pos += 1;
            let rhs = self.term();
            value = value || rhs;
        }
        value
    }

    fn term(&mut self) -> bool {
        let mut value = self.factor();
        while self.peek() == Some('&') {
            self.pos += 1;
            let rhs = self.factor();
            value = value && rhs;
        }
        value
    }

    fn factor(&mut self) -> bool {
        let mut negated = false;
        while self.peek() == Some('!') {
            self.pos += 1;
            negated = !negated;
        }
        let value = if self.peek() == Some('(') {
            self.pos += 1;
            let inner = self.expr();
            assert_eq!(self.peek(), Some(')'), "oracle expects balanced parens");
            self.pos += 1;
            inner
        } else {
            let start = self.pos;
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.pos += 1;
            }
            let name: String = self.chars[start..self.pos].iter().collect();
            *self.assignment.get(&name).unwrap_or(&false)
        };
        if negated { !value } else { value }
    }
}
