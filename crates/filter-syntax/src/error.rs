use thiserror::Error;

/// Structural problems with the raw expression text or token stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("expression is empty or blank")]
    EmptyExpression,

    #[error("expression length {length} exceeds the configured maximum of {max}")]
    ExpressionTooLong { length: usize, max: usize },

    #[error("expression cannot start with binary operator '{operator}'")]
    LeadingOperator { operator: char },

    #[error("expression cannot end with operator '{operator}'")]
    TrailingOperator { operator: char },

    #[error("mismatched parentheses: ')' without matching '('")]
    UnmatchedRightParen,

    #[error("mismatched parentheses: '(' without matching ')'")]
    UnmatchedLeftParen,

    #[error("operator '{operator}' is missing an operand")]
    MissingOperand { operator: String },

    #[error("unexpected token '{token}' in postfix stream")]
    UnexpectedToken { token: String },

    #[error("'{name}' is not a legal filter identifier")]
    InvalidIdentifier { name: String },

    #[error("malformed expression: stack has {count} values, expected 1")]
    UnbalancedExpression { count: usize },
}

/// Complexity limits exceeded, distinct from raw character length.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComplexityError {
    #[error("expression has {count} tokens, exceeding the limit of {max}")]
    TooManyTokens { count: usize, max: usize },

    #[error("expression requires an evaluation depth of {depth}, exceeding the limit of {max}")]
    NestingTooDeep { depth: usize, max: usize },
}

/// Either failure mode of the validation pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidateError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Complexity(#[from] ComplexityError),
}
