//! Short-chain embedding search
//!
//! Gantree: L3_Embedding → ShortChainSearch
//!
//! Runs a probabilistic finder several times and keeps the candidate whose
//! longest chain is shortest.

use crate::embedding::Embedding;
use crate::finder::EmbeddingFinder;
use qanneal_core::embedding::DEFAULT_TRIES;
use qanneal_core::{coupling_edges, Couplings, Edge, QannealError, QannealResult, Topology};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Short-chain search configuration
/// Gantree: ShortChainSearch // 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortChainSearch {
    /// Number of probabilistic embedding attempts
    /// Gantree: tries: usize // 시도 횟수 (5)
    pub tries: usize,

    /// Random seed
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,

    /// Report the chosen chain length at info level
    pub verbose: bool,

    /// Reject candidates that do not realise the source graph
    pub verify: bool,
}

/// Result of a search, with attempt bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best embedding found
    pub embedding: Embedding,

    /// Its longest chain
    pub chain_length: usize,

    /// Attempt (0-based) that produced it
    pub best_attempt: usize,

    /// Attempts that yielded no usable embedding
    pub failed_attempts: usize,
}

impl ShortChainSearch {
    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set number of tries
    pub fn with_tries(mut self, tries: usize) -> Self {
        self.tries = tries;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable/disable verbose reporting
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable/disable candidate verification
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QannealResult<()> {
        if self.tries == 0 {
            return Err(QannealError::invalid_parameter("tries", "must be > 0"));
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Search for the embedding with the shortest longest chain
    /// Gantree: run(source,finder,target) -> Result<SearchOutcome> // 탐색
    ///
    /// Attempts that error, come back empty, or fail verification are
    /// skipped. Ties keep the earlier candidate.
    pub fn run<F>(
        &self,
        source: &[Edge],
        finder: &F,
        target: &Topology,
    ) -> QannealResult<SearchOutcome>
    where
        F: EmbeddingFinder + ?Sized,
    {
        self.validate()?;
        if source.is_empty() {
            return Err(QannealError::invalid_parameter(
                "couplings",
                "source graph has no edges",
            ));
        }

        let mut rng = self.rng();
        let mut best: Option<(Embedding, usize, usize)> = None;
        let mut failed_attempts = 0;
        let mut last_error = None;

        for attempt in 0..self.tries {
            let candidate = finder
                .find_embedding(source, target, &mut rng)
                .and_then(|emb| {
                    if emb.is_empty() {
                        return Err(QannealError::InvalidEmbedding(
                            "finder returned an empty embedding".into(),
                        ));
                    }
                    if self.verify {
                        emb.verify(source, target)?;
                    }
                    Ok(emb)
                });

            let emb = match candidate {
                Ok(emb) => emb,
                Err(err) => {
                    log::debug!(
                        "Embedding attempt {}/{} with '{}' failed: {}",
                        attempt + 1,
                        self.tries,
                        finder.name(),
                        err
                    );
                    failed_attempts += 1;
                    last_error = Some(err.to_string());
                    continue;
                }
            };

            let chain_length = emb.max_chain_length();
            log::debug!(
                "Embedding attempt {}/{}: max chain length {}",
                attempt + 1,
                self.tries,
                chain_length
            );

            let improves = best
                .as_ref()
                .map_or(true, |(_, best_len, _)| chain_length < *best_len);
            if improves {
                best = Some((emb, chain_length, attempt));
            }
        }

        let (embedding, chain_length, best_attempt) =
            best.ok_or(QannealError::EmbeddingNotFound {
                tries: self.tries,
                last_error,
            })?;

        if self.verbose {
            log::info!(
                "Best embedding after {} tries: max chain length {} ({} qubits)",
                self.tries,
                chain_length,
                embedding.total_qubits()
            );
        }

        Ok(SearchOutcome {
            embedding,
            chain_length,
            best_attempt,
            failed_attempts,
        })
    }
}

impl Default for ShortChainSearch {
    fn default() -> Self {
        Self {
            tries: DEFAULT_TRIES,
            seed: None,
            verbose: false,
            verify: true,
        }
    }
}

impl fmt::Display for ShortChainSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShortChainSearch(tries={}, seed={:?}, verify={})",
            self.tries, self.seed, self.verify
        )
    }
}

/// Try a few probabilistic embeddings and return the one with the shortest
/// longest chain
/// Gantree: get_embedding_with_short_chain(J,tries,processor) -> Result<Embedding> // 짧은 체인
///
/// Source edges are the keys of `couplings`. With no `processor`, the
/// default Chimera(16, 16, 4) graph is the target.
pub fn get_embedding_with_short_chain<F>(
    couplings: &Couplings,
    config: &ShortChainSearch,
    finder: &F,
    processor: Option<&Topology>,
) -> QannealResult<Embedding>
where
    F: EmbeddingFinder + ?Sized,
{
    let source = coupling_edges(couplings);

    let outcome = match processor {
        Some(target) => config.run(&source, finder, target)?,
        None => config.run(&source, finder, &Topology::default_processor())?,
    };

    Ok(outcome.embedding)
}

// ============================================================================
// Tests
// ============================================================================
