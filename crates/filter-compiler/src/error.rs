use filter_syntax::{ComplexityError, SyntaxError, ValidateError};
use model::resolver::BoxError;
use thiserror::Error;

/// Unified error family for compilation and resolution.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Complexity(#[from] ComplexityError),

    #[error("undefined filter reference '{name}': defined filters are [{}]", .available.join(", "))]
    UndefinedReference { name: String, available: Vec<String> },

    #[error("failed to resolve filter '{name}' into a condition")]
    LeafResolution {
        name: String,
        #[source]
        source: BoxError,
    },
}

impl From<ValidateError> for FilterError {
    fn from(err: ValidateError) -> Self {
        match err {
            ValidateError::Syntax(e) => FilterError::Syntax(e),
            ValidateError::Complexity(e) => FilterError::Complexity(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
