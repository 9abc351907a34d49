use crate::{
    builder,
    cache::StructuralCache,
    error::Result,
    signature::structural_signature,
};
use filter_syntax::{PostfixSequence, to_postfix, validate_and_simplify};
use model::{
    condition::Condition,
    definition::Definitions,
    policy::{CachePolicy, CompilerPolicy},
    resolver::LeafResolver,
};
use std::sync::Arc;
use tracing::debug;

struct Inner<C: Condition> {
    policy: CompilerPolicy,
    cache: Option<StructuralCache<C>>,
}

/// Facade over the compilation pipeline, generic over the backend's
/// condition type.
///
/// Construct one per backend and share it freely: `compile()` touches only
/// local state, and the structural cache carries its own locking. Policies
/// are fixed at construction.
pub struct FilterCompiler<C: Condition> {
    inner: Arc<Inner<C>>,
}

impl<C: Condition> Clone for FilterCompiler<C> {
    fn clone(&self) -> Self {
        FilterCompiler {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Condition> FilterCompiler<C> {
    pub fn new(policy: CompilerPolicy, cache_policy: CachePolicy) -> Self {
        let cache = (cache_policy.enabled && cache_policy.max_entries > 0)
            .then(|| StructuralCache::new(cache_policy.max_entries));
        FilterCompiler {
            inner: Arc::new(Inner { policy, cache }),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CompilerPolicy::default(), CachePolicy::default())
    }

    /// Compile a combination expression into a reusable artifact.
    ///
    /// Pure function of the text and the attached policy: tokenizes and
    /// converts to postfix, then validates against the complexity limits.
    /// The result holds only the simplified postfix stream and may be
    /// resolved many times with different definitions and resolvers.
    pub fn compile(&self, text: &str) -> Result<CompiledExpression<C>> {
        let postfix = to_postfix(text, &self.inner.policy)?;
        let postfix = validate_and_simplify(postfix, &self.inner.policy)?;
        debug!(expression = text, postfix = %postfix, "compiled filter expression");
        Ok(CompiledExpression {
            postfix,
            inner: Arc::clone(&self.inner),
        })
    }

    /// Drop every cached condition tree.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.clear();
        }
    }

    /// Number of condition trees currently cached.
    pub fn cache_len(&self) -> usize {
        self.inner.cache.as_ref().map_or(0, StructuralCache::len)
    }
}

/// Immutable wrapper around a validated postfix stream.
///
/// Holds no reference to any definitions, values, or backend leaves; the
/// binding to those happens per [`CompiledExpression::resolve`] call.
pub struct CompiledExpression<C: Condition> {
    postfix: PostfixSequence,
    inner: Arc<Inner<C>>,
}

impl<C: Condition> std::fmt::Debug for CompiledExpression<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledExpression")
            .field("postfix", &self.postfix)
            .finish_non_exhaustive()
    }
}

impl<C: Condition> Clone for CompiledExpression<C> {
    fn clone(&self) -> Self {
        CompiledExpression {
            postfix: self.postfix.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Condition> CompiledExpression<C> {
    /// The simplified postfix stream this expression evaluates.
    pub fn postfix(&self) -> &PostfixSequence {
        &self.postfix
    }

    /// Bind the expression to a set of filter definitions and a backend
    /// leaf resolver, producing a composed condition.
    ///
    /// Consults the structural cache first when caching is enabled; on a
    /// miss the tree is built and stored only if the build succeeded.
    pub fn resolve<R>(&self, definitions: &Definitions, resolver: &R) -> Result<C>
    where
        R: LeafResolver<C> + ?Sized,
    {
        let Some(cache) = &self.inner.cache else {
            return builder::build(&self.postfix, definitions, resolver);
        };

        let signature = structural_signature(&self.postfix, definitions);
        if let Some(condition) = cache.get(&signature) {
            debug!(%signature, "structural cache hit");
            return Ok(condition);
        }

        debug!(%signature, "structural cache miss");
        let condition = builder::build(&self.postfix, definitions, resolver)?;
        cache.put(signature, condition.clone());
        Ok(condition)
    }
}
