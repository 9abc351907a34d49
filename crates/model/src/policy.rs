use serde::{Deserialize, Serialize};

/// Limits applied while compiling a combination expression.
///
/// Attached once at facade construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerPolicy {
    /// Maximum raw expression length in bytes; longer text is rejected
    /// before scanning.
    pub max_expression_length: usize,
    /// Maximum number of postfix tokens after simplification.
    pub max_token_count: usize,
    /// Maximum operand stack depth the postfix stream may require when
    /// evaluated, bounding right-nested expressions.
    pub max_nesting_depth: usize,
    /// Fraction of repeated identifier occurrences (repeats / total) at or
    /// above which a single-operator expression is collapsed to its
    /// deduplicated identifier list.
    pub collapse_repetition_ratio: f64,
}

impl Default for CompilerPolicy {
    fn default() -> Self {
        CompilerPolicy {
            max_expression_length: 512,
            max_token_count: 256,
            max_nesting_depth: 100,
            collapse_repetition_ratio: 0.25,
        }
    }
}

/// Configuration for the structural condition cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    pub enabled: bool,
    /// Bound on cached condition trees; least recently used entries are
    /// evicted beyond it.
    pub max_entries: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy {
            enabled: true,
            max_entries: 1000,
        }
    }
}
