//! Embedding finders
//!
//! Gantree: L3_Embedding → EmbeddingFinder
//!
//! The minor-embedding search itself lives outside this crate. A finder
//! wraps whatever library does it; the short-chain search only needs one
//! candidate per call.

use crate::embedding::Embedding;
use qanneal_core::{Edge, QannealError, QannealResult, Topology, VarId};
use rand::rngs::StdRng;
use std::collections::BTreeSet;

/// Source of candidate embeddings
/// Gantree: EmbeddingFinder // trait
pub trait EmbeddingFinder {
    /// Produce one embedding of `source` into `target`
    ///
    /// Probabilistic finders draw from `rng` so a seeded search is
    /// reproducible. An empty embedding means "nothing found".
    fn find_embedding(
        &self,
        source: &[Edge],
        target: &Topology,
        rng: &mut StdRng,
    ) -> QannealResult<Embedding>;

    /// Name used in log output
    fn name(&self) -> &str {
        "custom"
    }
}

impl<T: EmbeddingFinder + ?Sized> EmbeddingFinder for &T {
    fn find_embedding(
        &self,
        source: &[Edge],
        target: &Topology,
        rng: &mut StdRng,
    ) -> QannealResult<Embedding> {
        (**self).find_embedding(source, target, rng)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: EmbeddingFinder + ?Sized> EmbeddingFinder for Box<T> {
    fn find_embedding(
        &self,
        source: &[Edge],
        target: &Topology,
        rng: &mut StdRng,
    ) -> QannealResult<Embedding> {
        (**self).find_embedding(source, target, rng)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ============================================================================
// Closure Adapter
// ============================================================================

/// Finder backed by a closure
pub struct FnFinder<F> {
    f: F,
    name: String,
}

/// Wrap a closure as an [`EmbeddingFinder`]
///
/// ```rust
/// use qanneal_embed::prelude::*;
///
/// let finder = finder_fn("identity", |source: &[Edge], _target: &Topology, _rng: &mut _| {
///     Ok(Embedding::identity(source.iter().flat_map(|&(u, v)| [u, v])))
/// });
/// assert_eq!(finder.name(), "identity");
/// ```
pub fn finder_fn<F>(name: impl Into<String>, f: F) -> FnFinder<F>
where
    F: Fn(&[Edge], &Topology, &mut StdRng) -> QannealResult<Embedding>,
{
    FnFinder {
        f,
        name: name.into(),
    }
}

impl<F> EmbeddingFinder for FnFinder<F>
where
    F: Fn(&[Edge], &Topology, &mut StdRng) -> QannealResult<Embedding>,
{
    fn find_embedding(
        &self,
        source: &[Edge],
        target: &Topology,
        rng: &mut StdRng,
    ) -> QannealResult<Embedding> {
        (self.f)(source, target, rng)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Direct Embedding
// ============================================================================

/// Places each variable on the node with the same label
/// Gantree: DirectEmbedding // 직접 배치
///
/// Succeeds only when the source graph is already a subgraph of the target
/// under that labelling. Useful for problems written natively against the
/// processor graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectEmbedding;

impl EmbeddingFinder for DirectEmbedding {
    fn find_embedding(
        &self,
        source: &[Edge],
        target: &Topology,
        _rng: &mut StdRng,
    ) -> QannealResult<Embedding> {
        let variables: BTreeSet<VarId> = source.iter().flat_map(|&(u, v)| [u, v]).collect();

        if let Some(&node) = variables.iter().find(|&&v| !target.contains_node(v)) {
            return Err(QannealError::NodeOutOfRange {
                node,
                num_nodes: target.num_nodes(),
            });
        }

        if let Some(&(u, v)) = source
            .iter()
            .find(|&&(u, v)| u != v && !target.is_connected(u, v))
        {
            return Err(QannealError::InvalidEmbedding(format!(
                "edge ({}, {}) is not a coupler",
                u, v
            )));
        }

        Ok(Embedding::identity(variables))
    }

    fn name(&self) -> &str {
        "direct"
    }
}

// ============================================================================
// Tests
// ============================================================================
