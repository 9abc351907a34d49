use crate::condition::Condition;

/// Opaque failure reported by a backend while resolving a leaf.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Backend callback turning one filter identifier into an executable
/// condition leaf.
///
/// Supplied by the caller on every resolution; the compiler hands it the
/// identifier together with the opaque `property_ref` and `operator_code`
/// from the matching [`crate::definition::FilterDefinition`]. A resolver may
/// fail to signal an invalid or unsupported leaf.
pub trait LeafResolver<C: Condition> {
    fn resolve_leaf(
        &self,
        key: &str,
        property_ref: &str,
        operator_code: &str,
    ) -> Result<C, BoxError>;
}

impl<C, F> LeafResolver<C> for F
where
    C: Condition,
    F: Fn(&str, &str, &str) -> Result<C, BoxError>,
{
    fn resolve_leaf(
        &self,
        key: &str,
        property_ref: &str,
        operator_code: &str,
    ) -> Result<C, BoxError> {
        self(key, property_ref, operator_code)
    }
}
