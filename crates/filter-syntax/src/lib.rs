pub mod converter;
pub mod error;
pub mod postfix;
pub mod token;
pub mod validator;

pub use converter::{PostfixConverter, to_postfix};
pub use error::{ComplexityError, SyntaxError, ValidateError};
pub use postfix::PostfixSequence;
pub use token::Token;
pub use validator::validate_and_simplify;
