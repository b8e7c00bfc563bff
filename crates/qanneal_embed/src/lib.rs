//! # QAnneal Embed
//!
//! Minor-embedding selection for annealing processors.
//!
//! The embedding algorithm itself is pluggable through [`EmbeddingFinder`];
//! this crate runs it several times, checks what comes back, and keeps the
//! candidate with the shortest chains.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qanneal_embed // L3: Embedding
//!     Embedding // VarId → Chain, 검증
//!     EmbeddingFinder // 외부 라이브러리 연결 trait
//!     ShortChainSearch // 짧은 체인 탐색
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qanneal_embed::prelude::*;
//!
//! let mut j = Couplings::new();
//! j.insert((0, 4), -1.0);
//! j.insert((0, 5), 1.0);
//!
//! let config = ShortChainSearch::default().with_tries(3).with_seed(42);
//! let embedding = get_embedding_with_short_chain(&j, &config, &DirectEmbedding, None).unwrap();
//!
//! assert_eq!(embedding.max_chain_length(), 1);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Embeddings and verification (Gantree: L3_Embedding → Embedding)
pub mod embedding;

/// Finder trait and built-in finders (Gantree: L3_Embedding → EmbeddingFinder)
pub mod finder;

/// Short-chain search (Gantree: L3_Embedding → ShortChainSearch)
pub mod search;

// ============================================================================
// Re-exports
// ============================================================================

pub use embedding::{max_chain_length, Chain, Embedding};
pub use finder::{finder_fn, DirectEmbedding, EmbeddingFinder, FnFinder};
pub use search::{get_embedding_with_short_chain, SearchOutcome, ShortChainSearch};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qanneal_embed::prelude::*;
    //! ```

    pub use crate::embedding::{max_chain_length, Embedding};
    pub use crate::finder::{finder_fn, DirectEmbedding, EmbeddingFinder};
    pub use crate::search::{get_embedding_with_short_chain, ShortChainSearch};
    pub use qanneal_core::{Couplings, Edge, Topology};
}

// ============================================================================
// Integration Tests
// ============================================================================
