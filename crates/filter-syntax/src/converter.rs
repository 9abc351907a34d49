use crate::{error::SyntaxError, postfix::PostfixSequence, token::Token};
use model::policy::CompilerPolicy;
use std::collections::HashSet;
use tracing::debug;

/// Convert a combination expression to reverse-Polish order.
pub fn to_postfix(text: &str, policy: &CompilerPolicy) -> Result<PostfixSequence, SyntaxError> {
    PostfixConverter::new(policy).convert(text)
}

/// Single-pass tokenizer fused with a shunting-yard infix-to-postfix
/// conversion.
///
/// Non-operator characters accumulate into a pending identifier buffer;
/// whitespace or an operator character flushes the buffer as an identifier
/// token. `!` binds tightest and is right-associative, `&` binds tighter
/// than `|`, both left-associative. Two simplifications happen inline:
/// a `!` pushed onto a `!` stack top cancels both, and a sufficiently
/// repetitive expression using a single binary operator collapses to its
/// deduplicated identifier list (see [`CompilerPolicy::collapse_repetition_ratio`]).
pub struct PostfixConverter<'a> {
    policy: &'a CompilerPolicy,
    output: Vec<Token>,
    operators: Vec<Token>,
    buffer: String,
    repetition: RepetitionTracker,
}

impl<'a> PostfixConverter<'a> {
    pub fn new(policy: &'a CompilerPolicy) -> Self {
        PostfixConverter {
            policy,
            output: Vec::new(),
            operators: Vec::new(),
            buffer: String::new(),
            repetition: RepetitionTracker::default(),
        }
    }

    pub fn convert(&mut self, text: &str) -> Result<PostfixSequence, SyntaxError> {
        self.output.clear();
        self.operators.clear();
        self.buffer.clear();
        self.repetition = RepetitionTracker::default();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SyntaxError::EmptyExpression);
        }
        if text.len() > self.policy.max_expression_length {
            return Err(SyntaxError::ExpressionTooLong {
                length: text.len(),
                max: self.policy.max_expression_length,
            });
        }
        if let Some(first @ ('&' | '|')) = trimmed.chars().next() {
            return Err(SyntaxError::LeadingOperator { operator: first });
        }
        if let Some(last @ ('&' | '|' | '!')) = trimmed.chars().last() {
            return Err(SyntaxError::TrailingOperator { operator: last });
        }

        for ch in trimmed.chars() {
            match ch {
                '!' => {
                    self.flush_identifier();
                    self.push_not();
                }
                '&' => {
                    self.flush_identifier();
                    self.push_binary(Token::And);
                }
                '|' => {
                    self.flush_identifier();
                    self.push_binary(Token::Or);
                }
                '(' => {
                    self.flush_identifier();
                    self.operators.push(Token::LeftParen);
                }
                ')' => {
                    self.flush_identifier();
                    self.close_paren()?;
                }
                c if c.is_whitespace() => self.flush_identifier(),
                c => self.buffer.push(c),
            }
        }
        self.flush_identifier();

        while let Some(op) = self.operators.pop() {
            if op == Token::LeftParen {
                return Err(SyntaxError::UnmatchedLeftParen);
            }
            self.output.push(op);
        }

        if let Some(collapsed) = self
            .repetition
            .collapsed(self.policy.collapse_repetition_ratio)
        {
            debug!(
                from = self.output.len(),
                to = collapsed.len(),
                "collapsed repetitive single-operator expression"
            );
            return Ok(PostfixSequence::new(collapsed));
        }

        Ok(PostfixSequence::new(std::mem::take(&mut self.output)))
    }

    fn flush_identifier(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let name = std::mem::take(&mut self.buffer);
        self.repetition.record_identifier(&name);
        self.output.push(Token::Identifier(name));
    }

    fn push_not(&mut self) {
        // A `!` meeting a `!` on the stack top is a double negation; both
        // cancel instead of reaching the output.
        if self.operators.last() == Some(&Token::Not) {
            self.operators.pop();
            self.repetition.cancel_negation();
        } else {
            self.operators.push(Token::Not);
            self.repetition.record_negation();
        }
    }

    fn push_binary(&mut self, incoming: Token) {
        while self
            .operators
            .last()
            .is_some_and(|top| top.is_operator() && top.precedence() >= incoming.precedence())
        {
            if let Some(op) = self.operators.pop() {
                self.output.push(op);
            }
        }
        self.repetition.record_binary(&incoming);
        self.operators.push(incoming);
    }

    fn close_paren(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.operators.pop() {
                Some(Token::LeftParen) => return Ok(()),
                Some(op) => self.output.push(op),
                None => return Err(SyntaxError::UnmatchedRightParen),
            }
        }
    }
}

/// Scan-time bookkeeping behind the homogeneous-operator collapse
/// heuristic.
#[derive(Default)]
struct RepetitionTracker {
    ordered: Vec<String>,
    seen: HashSet<String>,
    occurrences: usize,
    binary_op: Option<Token>,
    mixed: bool,
    surviving_negations: usize,
}

impl RepetitionTracker {
    fn record_identifier(&mut self, name: &str) {
        self.occurrences += 1;
        if self.seen.insert(name.to_string()) {
            self.ordered.push(name.to_string());
        }
    }

    fn record_binary(&mut self, op: &Token) {
        match &self.binary_op {
            Some(existing) if existing == op => {}
            Some(_) => self.mixed = true,
            None => self.binary_op = Some(op.clone()),
        }
    }

    fn record_negation(&mut self) {
        self.surviving_negations += 1;
    }

    fn cancel_negation(&mut self) {
        self.surviving_negations -= 1;
    }

    /// The deduplicated replacement stream, if the whole expression used a
    /// single binary operator, no negation survived, and the repeated share
    /// of identifier occurrences reaches `ratio`. Repeated sub-terms of a
    /// pure AND/OR chain are redundant under idempotence.
    fn collapsed(&self, ratio: f64) -> Option<Vec<Token>> {
        let op = self.binary_op.clone()?;
        if self.mixed || self.surviving_negations > 0 || self.occurrences == 0 {
            return None;
        }
        let repeats = self.occurrences - self.ordered.len();
        if repeats == 0 || (repeats as f64) / (self.occurrences as f64) < ratio {
            return None;
        }

        let mut tokens = Vec::with_capacity(self.ordered.len() * 2);
        for (i, name) in self.ordered.iter().enumerate() {
            tokens.push(Token::Identifier(name.clone()));
            if i > 0 {
                tokens.push(op.clone());
            }
        }
        Some(tokens)
    }
}
