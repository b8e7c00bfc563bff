//! Core types for QAnneal
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases shared by the schedule, embedding and model crates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Logical (problem) variable label
/// Gantree: VarId // pub type VarId = usize
pub type VarId = usize;

/// Physical hardware node (qubit) label
/// Gantree: NodeId // pub type NodeId = usize
pub type NodeId = usize;

/// Undirected edge between two labels
pub type Edge = (usize, usize);

/// Quadratic couplings: (u, v) -> J
/// Gantree: Couplings // pub type Couplings = BTreeMap<Edge, f64>
pub type Couplings = BTreeMap<Edge, f64>;

/// Variable assignment: variable -> value
/// Gantree: Sample // pub type Sample = BTreeMap<VarId, i8>
pub type Sample = BTreeMap<VarId, i8>;

/// Source graph edges of a coupling map, in key order
pub fn coupling_edges(couplings: &Couplings) -> Vec<Edge> {
    couplings.keys().copied().collect()
}

/// Order an edge so the smaller label comes first
#[inline]
pub fn normalize_edge(u: usize, v: usize) -> Edge {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

// ============================================================================
// Vartype
// ============================================================================

/// Variable domain of a quadratic model
/// Gantree: Vartype // SPIN / BINARY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vartype {
    /// Values in {-1, +1} (Ising)
    #[default]
    Spin,

    /// Values in {0, 1} (QUBO)
    Binary,
}

impl Vartype {
    /// Admissible values for this vartype
    pub fn values(&self) -> [i8; 2] {
        match self {
            Vartype::Spin => [-1, 1],
            Vartype::Binary => [0, 1],
        }
    }

    /// Check a single value against the domain
    pub fn contains(&self, value: i8) -> bool {
        self.values().contains(&value)
    }
}

impl fmt::Display for Vartype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vartype::Spin => write!(f, "SPIN"),
            Vartype::Binary => write!(f, "BINARY"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_edge() {
        assert_eq!(normalize_edge(3, 1), (1, 3));
        assert_eq!(normalize_edge(1, 3), (1, 3));
    }

    #[test]
    fn test_coupling_edges() {
        let mut j = Couplings::new();
        j.insert((1, 2), -1.0);
        j.insert((0, 1), 0.5);
        assert_eq!(coupling_edges(&j), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_vartype_domain() {
        assert!(Vartype::Spin.contains(-1));
        assert!(!Vartype::Spin.contains(0));
        assert!(Vartype::Binary.contains(0));
        assert!(!Vartype::Binary.contains(-1));
        assert_eq!(Vartype::default(), Vartype::Spin);
        assert_eq!(Vartype::Binary.to_string(), "BINARY");
    }
}
