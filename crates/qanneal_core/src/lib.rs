//! # QAnneal Core
//!
//! Core types, constants, and hardware topology for the QAnneal toolkit.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qanneal_core // L0+L1: Foundation + Hardware
//!     L0_Foundation // 기반 타입/상수/에러
//!         CoreTypes // VarId, NodeId, Couplings, Sample, Vartype
//!         Constants // schedule/embedding/chimera 상수
//!         Errors // QannealError
//!     L1_Hardware // 하드웨어 구조
//!         Topology // 커플러 그래프 (Chimera)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qanneal_core::prelude::*;
//!
//! let processor = Topology::default_processor();
//! assert_eq!(processor.num_nodes(), 2048);
//! assert!(processor.is_connected(0, 4));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Processor topology (Gantree: L1_Hardware → Topology)
pub mod topology;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{chimera, embedding, schedule};
pub use error::{QannealError, QannealResult};
pub use topology::Topology;
pub use types::{coupling_edges, normalize_edge, Couplings, Edge, NodeId, Sample, VarId, Vartype};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qanneal_core::prelude::*;
    //! ```

    pub use crate::error::{QannealError, QannealResult};
    pub use crate::topology::Topology;
    pub use crate::types::{Couplings, Edge, NodeId, Sample, VarId, Vartype};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
