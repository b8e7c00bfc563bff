//! # QAnneal Model
//!
//! Binary quadratic models (Ising and QUBO) and sample energies.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qanneal_model // L4: Model
//!     BinaryQuadraticModel // SPIN/BINARY, 변환
//!     Energy // x^T M x + offset
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qanneal_model::prelude::*;
//!
//! let mut q = Couplings::new();
//! q.insert((0, 0), -1.0);
//! q.insert((0, 1), 2.0);
//! let bqm = BinaryQuadraticModel::from_qubo(&q, 0.0).unwrap();
//!
//! let sample: Sample = [(0, 1), (1, 0)].into_iter().collect();
//! assert_eq!(get_energy(&bqm, &sample).unwrap(), -1.0);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Binary quadratic models (Gantree: L4_Model → BinaryQuadraticModel)
pub mod bqm;

/// Energy evaluation (Gantree: L4_Model → Energy)
pub mod energy;

// ============================================================================
// Re-exports
// ============================================================================

pub use bqm::BinaryQuadraticModel;
pub use energy::{binary_to_spin_sample, get_energy, spin_to_binary_sample, QuboMatrix};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qanneal_model::prelude::*;
    //! ```

    pub use crate::bqm::BinaryQuadraticModel;
    pub use crate::energy::{get_energy, spin_to_binary_sample};
    pub use qanneal_core::{Couplings, Sample, Vartype};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_ferromagnetic_ring_ground_states() {
        // All-aligned spins minimise a ferromagnetic ring
        let h = BTreeMap::new();
        let mut j = Couplings::new();
        for i in 0..4 {
            j.insert((i, (i + 1) % 4), -1.0);
        }
        let bqm = BinaryQuadraticModel::from_ising(&h, &j, 0.0).unwrap();

        let up: Sample = (0..4).map(|v| (v, 1)).collect();
        let down: Sample = (0..4).map(|v| (v, -1)).collect();
        let mixed: Sample = [(0, 1), (1, -1), (2, 1), (3, -1)].into_iter().collect();

        assert_relative_eq!(bqm.energy(&up).unwrap(), -4.0);
        assert_relative_eq!(bqm.energy(&down).unwrap(), -4.0);
        assert_relative_eq!(bqm.energy(&mixed).unwrap(), 4.0);

        // Same ordering through the binary matrix path
        let via_matrix = get_energy(&bqm, &spin_to_binary_sample(&mixed).unwrap()).unwrap();
        assert_relative_eq!(via_matrix, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_model_edges_as_embedding_source() {
        let mut j = Couplings::new();
        j.insert((2, 0), 1.0);
        j.insert((0, 1), 1.0);
        let bqm = BinaryQuadraticModel::from_ising(&BTreeMap::new(), &j, 0.0).unwrap();

        // (2, 0) is stored normalised
        assert_eq!(bqm.edges(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_energies_batch() {
        let mut q = Couplings::new();
        q.insert((0, 1), 1.0);
        let bqm = BinaryQuadraticModel::from_qubo(&q, 0.5).unwrap();

        let samples: Vec<Sample> = vec![
            [(0, 0), (1, 0)].into_iter().collect(),
            [(0, 1), (1, 1)].into_iter().collect(),
        ];
        assert_eq!(bqm.energies(&samples).unwrap(), vec![0.5, 1.5]);
    }
}
