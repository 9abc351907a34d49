use crate::error::{FilterError, Result};
use filter_syntax::{PostfixSequence, SyntaxError, Token};
use model::{
    condition::Condition,
    definition::{Definitions, FilterDefinition},
    resolver::LeafResolver,
};
use tracing::debug;

/// Fold direction for the single-token shorthand forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shorthand {
    All,    // AND: fold every definition with `and`
    Any,    // OR: fold every definition with `or`
    NoneOf, // NOT: fold with `and`, then negate the result
}

/// Build a condition tree by evaluating the postfix stream with an explicit
/// stack, resolving each identifier through the supplied leaf resolver.
pub fn build<C, R>(postfix: &PostfixSequence, definitions: &Definitions, resolver: &R) -> Result<C>
where
    C: Condition,
    R: LeafResolver<C> + ?Sized,
{
    if let Some(shorthand) = shorthand_form(postfix) {
        debug!(?shorthand, "resolving shorthand combination of all definitions");
        return fold_all(shorthand, definitions, resolver);
    }

    let mut stack: Vec<C> = Vec::new();
    for token in postfix {
        match token {
            Token::Not => {
                let operand = stack.pop().ok_or_else(|| SyntaxError::MissingOperand {
                    operator: "!".to_string(),
                })?;
                stack.push(operand.not());
            }
            Token::And | Token::Or => {
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(SyntaxError::MissingOperand {
                        operator: token.to_string(),
                    }
                    .into());
                };
                // Combining a node with itself is redundant under
                // idempotence.
                if left == right {
                    stack.push(left);
                } else if *token == Token::And {
                    stack.push(left.and(&right));
                } else {
                    stack.push(left.or(&right));
                }
            }
            Token::Identifier(name) => {
                let definition = definitions
                    .get(name)
                    .ok_or_else(|| undefined_reference(name, definitions))?;
                stack.push(resolve_leaf(name, definition, resolver)?);
            }
            Token::LeftParen | Token::RightParen => {
                return Err(SyntaxError::UnexpectedToken {
                    token: token.to_string(),
                }
                .into());
            }
        }
    }

    let condition = stack
        .pop()
        .ok_or(SyntaxError::UnbalancedExpression { count: 0 })?;
    if !stack.is_empty() {
        return Err(SyntaxError::UnbalancedExpression {
            count: stack.len() + 1,
        }
        .into());
    }
    Ok(condition)
}

/// `AND`, `OR` or `NOT` (case-insensitive) as the whole expression means
/// "combine every provided definition" rather than a filter named that way.
fn shorthand_form(postfix: &PostfixSequence) -> Option<Shorthand> {
    match postfix.tokens() {
        [Token::Identifier(name)] if name.eq_ignore_ascii_case("and") => Some(Shorthand::All),
        [Token::Identifier(name)] if name.eq_ignore_ascii_case("or") => Some(Shorthand::Any),
        [Token::Identifier(name)] if name.eq_ignore_ascii_case("not") => Some(Shorthand::NoneOf),
        _ => None,
    }
}

fn fold_all<C, R>(shorthand: Shorthand, definitions: &Definitions, resolver: &R) -> Result<C>
where
    C: Condition,
    R: LeafResolver<C> + ?Sized,
{
    // Sorted key order keeps the combinator shape deterministic and equal
    // to the equivalent spelled-out chain.
    let mut keys: Vec<&String> = definitions.keys().collect();
    keys.sort();

    let mut combined: Option<C> = None;
    for key in keys {
        let leaf = resolve_leaf(key, &definitions[key], resolver)?;
        combined = Some(match combined {
            None => leaf,
            Some(prev) if shorthand == Shorthand::Any => prev.or(&leaf),
            Some(prev) => prev.and(&leaf),
        });
    }

    let combined = combined.ok_or(SyntaxError::UnbalancedExpression { count: 0 })?;
    Ok(if shorthand == Shorthand::NoneOf {
        combined.not()
    } else {
        combined
    })
}

fn resolve_leaf<C, R>(name: &str, definition: &FilterDefinition, resolver: &R) -> Result<C>
where
    C: Condition,
    R: LeafResolver<C> + ?Sized,
{
    resolver
        .resolve_leaf(name, &definition.property_ref, &definition.operator_code)
        .map_err(|source| FilterError::LeafResolution {
            name: name.to_string(),
            source,
        })
}

fn undefined_reference(name: &str, definitions: &Definitions) -> FilterError {
    let mut available: Vec<String> = definitions.keys().cloned().collect();
    available.sort();
    FilterError::UndefinedReference {
        name: name.to_string(),
        available,
    }
}
