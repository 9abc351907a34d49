/// Capability interface for backend condition nodes.
///
/// The compiler never constructs primitive conditions itself; it only
/// composes values produced by a [`crate::resolver::LeafResolver`] through
/// this algebra. Every combinator returns a new node, existing nodes are
/// never mutated.
///
/// `Clone` is expected to be a cheap handle copy (backends typically wrap
/// their tree in an `Arc`), and `PartialEq` is expected to be node
/// *identity*, not structural comparison: the builder uses `==` to detect
/// that both operands of a binary combinator are the same node and skip the
/// redundant combination.
pub trait Condition: Clone + PartialEq + Send + Sync + 'static {
    #[must_use]
    fn and(&self, other: &Self) -> Self;

    #[must_use]
    fn or(&self, other: &Self) -> Self;

    #[must_use]
    fn not(&self) -> Self;
}
