use crate::{
    error::{ComplexityError, SyntaxError, ValidateError},
    postfix::PostfixSequence,
    token::Token,
};
use model::policy::CompilerPolicy;

/// Validate a postfix stream against the complexity policy, independent of
/// any backend.
///
/// Checks the token count, the operand stack depth the stream requires when
/// evaluated, and that every non-operator token is a legal identifier
/// (`[A-Za-z_][A-Za-z0-9_]*`). Identifier *existence* is deliberately not
/// checked here; that needs the definitions map, which only exists at
/// resolution time. The single-token shorthand forms `AND`/`OR`/`NOT` are
/// shaped like ordinary identifiers and pass through unchanged.
pub fn validate_and_simplify(
    postfix: PostfixSequence,
    policy: &CompilerPolicy,
) -> Result<PostfixSequence, ValidateError> {
    if postfix.len() > policy.max_token_count {
        return Err(ComplexityError::TooManyTokens {
            count: postfix.len(),
            max: policy.max_token_count,
        }
        .into());
    }

    let mut depth: usize = 0;
    let mut max_depth: usize = 0;
    for token in &postfix {
        match token {
            Token::Identifier(name) => {
                check_identifier(name)?;
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            // NOT replaces the stack top in place.
            Token::Not => {}
            Token::And | Token::Or => depth = depth.saturating_sub(1),
            Token::LeftParen | Token::RightParen => {
                return Err(ValidateError::Syntax(SyntaxError::UnexpectedToken {
                    token: token.to_string(),
                }));
            }
        }
    }

    if max_depth > policy.max_nesting_depth {
        return Err(ComplexityError::NestingTooDeep {
            depth: max_depth,
            max: policy.max_nesting_depth,
        }
        .into());
    }

    Ok(postfix)
}

fn check_identifier(name: &str) -> Result<(), SyntaxError> {
    let mut chars = name.chars();
    let legal = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if legal {
        Ok(())
    } else {
        Err(SyntaxError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::to_postfix;

    fn validated(text: &str, policy: &CompilerPolicy) -> Result<PostfixSequence, ValidateError> {
        let postfix = to_postfix(text, policy).expect("expression should convert");
        validate_and_simplify(postfix, policy)
    }

    #[test]
    fn test_valid_expression_passes_through_unchanged() {
        let policy = CompilerPolicy::default();
        let seq = validated("a | b & !c", &policy).expect("expression should validate");
        assert_eq!(seq.to_string(), "a b c ! & |");
    }

    #[test]
    fn test_identifier_shapes() {
        let policy = CompilerPolicy::default();
        assert!(validated("foo_1 & _bar", &policy).is_ok());
        assert!(validated("AND", &policy).is_ok());

        assert_eq!(
            validated("9abc", &policy).unwrap_err(),
            ValidateError::Syntax(SyntaxError::InvalidIdentifier {
                name: "9abc".into()
            })
        );
        assert_eq!(
            validated("a-b", &policy).unwrap_err(),
            ValidateError::Syntax(SyntaxError::InvalidIdentifier { name: "a-b".into() })
        );
    }

    #[test]
    fn test_token_count_limit() {
        let policy = CompilerPolicy {
            max_token_count: 3,
            ..CompilerPolicy::default()
        };
        assert!(validated("a & b", &policy).is_ok());
        assert_eq!(
            validated("a & b & c", &policy).unwrap_err(),
            ValidateError::Complexity(ComplexityError::TooManyTokens { count: 5, max: 3 })
        );
    }

    #[test]
    fn test_nesting_depth_limit() {
        let policy = CompilerPolicy {
            max_nesting_depth: 3,
            ..CompilerPolicy::default()
        };
        // Left-associative chains evaluate with a constant stack depth.
        assert!(validated("a & b & c & d & e", &policy).is_ok());
        // Right-nested groups push one operand per level.
        assert!(validated("a & (b & (c & d))", &policy).is_err());
        assert_eq!(
            validated("a & (b & (c & d))", &policy).unwrap_err(),
            ValidateError::Complexity(ComplexityError::NestingTooDeep { depth: 4, max: 3 })
        );
    }

    #[test]
    fn test_not_does_not_grow_the_stack() {
        let policy = CompilerPolicy {
            max_nesting_depth: 2,
            ..CompilerPolicy::default()
        };
        assert!(validated("!a & !b & !c", &policy).is_ok());
        assert!(validated("!(a & !b)", &policy).is_ok());
    }
}
