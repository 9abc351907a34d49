use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One leaf filter supplied by the caller at resolution time, keyed by the
/// identifier used in the combination expression.
///
/// `property_ref` and `operator_code` are opaque to the compiler and
/// participate in the structural cache signature; `value` never does, so
/// changing only the value of a filter can never invalidate a cached
/// condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub property_ref: String,
    pub operator_code: String,
    pub value: Value,
}

impl FilterDefinition {
    pub fn new(
        property_ref: impl Into<String>,
        operator_code: impl Into<String>,
        value: Value,
    ) -> Self {
        FilterDefinition {
            property_ref: property_ref.into(),
            operator_code: operator_code.into(),
            value,
        }
    }
}

/// Filter definitions for one resolution, keyed by expression identifier.
pub type Definitions = HashMap<String, FilterDefinition>;
