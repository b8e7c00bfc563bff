//! Minor embeddings
//!
//! Gantree: L3_Embedding → Embedding
//!
//! Maps each logical variable to a chain of physical nodes.

use qanneal_core::{Edge, NodeId, QannealError, QannealResult, Topology, VarId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Physical nodes representing one variable
pub type Chain = Vec<NodeId>;

/// Variable -> chain mapping
/// Gantree: Embedding // 임베딩
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(BTreeMap<VarId, Chain>);

impl Embedding {
    /// Create empty embedding
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity embedding: each variable on the node with the same label
    pub fn identity(variables: impl IntoIterator<Item = VarId>) -> Self {
        variables.into_iter().map(|v| (v, vec![v])).collect()
    }

    /// Set the chain of a variable, returning the previous one
    pub fn insert(&mut self, var: VarId, chain: Chain) -> Option<Chain> {
        self.0.insert(var, chain)
    }

    /// Get the chain of a variable
    pub fn chain(&self, var: VarId) -> Option<&[NodeId]> {
        self.0.get(&var).map(Vec::as_slice)
    }

    /// Number of embedded variables
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Embedded variables, sorted
    pub fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.0.keys().copied()
    }

    /// Iterate over (variable, chain)
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &[NodeId])> + '_ {
        self.0.iter().map(|(&v, c)| (v, c.as_slice()))
    }

    /// Longest chain; 0 for an empty embedding
    /// Gantree: max_chain_length() -> usize // 최대 체인 길이
    pub fn max_chain_length(&self) -> usize {
        self.0.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Total physical nodes used
    pub fn total_qubits(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Check that this embedding realises `source` on `target`
    /// Gantree: verify(source,target) -> Result // 검증
    ///
    /// Chains must be non-empty, disjoint, inside the target, and connected;
    /// every source edge needs at least one coupler between its two chains.
    pub fn verify(&self, source: &[Edge], target: &Topology) -> QannealResult<()> {
        let invalid = |msg: String| Err(QannealError::InvalidEmbedding(msg));

        let mut owner: HashMap<NodeId, VarId> = HashMap::new();
        for (var, chain) in &self.0 {
            if chain.is_empty() {
                return invalid(format!("variable {} has an empty chain", var));
            }
            for &node in chain {
                if !target.contains_node(node) {
                    return Err(QannealError::NodeOutOfRange {
                        node,
                        num_nodes: target.num_nodes(),
                    });
                }
                if let Some(other) = owner.insert(node, *var) {
                    if other != *var {
                        return invalid(format!(
                            "node {} is shared by variables {} and {}",
                            node, other, var
                        ));
                    }
                }
            }
        }

        let adj = target.adjacency();

        for (var, chain) in &self.0 {
            if !chain_is_connected(chain, &adj) {
                return invalid(format!("chain of variable {} is not connected", var));
            }
        }

        for &(u, v) in source {
            if u == v {
                continue;
            }
            let (cu, cv) = match (self.0.get(&u), self.0.get(&v)) {
                (Some(cu), Some(cv)) => (cu, cv),
                (None, _) => return invalid(format!("variable {} is not embedded", u)),
                (_, None) => return invalid(format!("variable {} is not embedded", v)),
            };

            let coupled = cu
                .iter()
                .any(|&a| cv.iter().any(|b| adj[a].contains(b)));
            if !coupled {
                return invalid(format!("no coupler realises edge ({}, {})", u, v));
            }
        }

        Ok(())
    }
}

fn chain_is_connected(chain: &[NodeId], adj: &[BTreeSet<NodeId>]) -> bool {
    let members: BTreeSet<NodeId> = chain.iter().copied().collect();
    let mut seen = BTreeSet::new();
    let mut stack = vec![chain[0]];
    seen.insert(chain[0]);

    while let Some(node) = stack.pop() {
        for next in adj[node].intersection(&members) {
            if seen.insert(*next) {
                stack.push(*next);
            }
        }
    }

    seen.len() == members.len()
}

/// Longest chain of an embedding; 0 when empty
pub fn max_chain_length(embedding: &Embedding) -> usize {
    embedding.max_chain_length()
}

impl FromIterator<(VarId, Chain)> for Embedding {
    fn from_iter<I: IntoIterator<Item = (VarId, Chain)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<VarId, Chain>> for Embedding {
    fn from(map: BTreeMap<VarId, Chain>) -> Self {
        Self(map)
    }
}

impl fmt::Display for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Embedding({} variables, {} qubits, max chain {})",
            self.len(),
            self.total_qubits(),
            self.max_chain_length()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Edge> {
        vec![(0, 1), (1, 2), (0, 2)]
    }

    #[test]
    fn test_max_chain_length() {
        assert_eq!(max_chain_length(&Embedding::new()), 0);

        let emb: Embedding = vec![(0, vec![3]), (1, vec![4, 5, 6]), (2, vec![7, 8])]
            .into_iter()
            .collect();
        assert_eq!(emb.max_chain_length(), 3);
        assert_eq!(emb.total_qubits(), 6);
        assert_eq!(emb.chain(1), Some(&[4, 5, 6][..]));
        assert_eq!(emb.chain(9), None);
    }

    #[test]
    fn test_triangle_on_square() {
        // Triangle needs one chain of length 2 on a 4-cycle: 0-1-2-3-0
        let square = Topology::from_edges(4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let emb: Embedding = vec![(0, vec![0]), (1, vec![1]), (2, vec![2, 3])]
            .into_iter()
            .collect();

        assert!(emb.verify(&triangle(), &square).is_ok());
        assert_eq!(emb.max_chain_length(), 2);
    }

    #[test]
    fn test_verify_missing_coupler() {
        let square = Topology::from_edges(4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let emb = Embedding::identity(0..3);

        let err = emb.verify(&triangle(), &square).unwrap_err();
        assert!(matches!(err, QannealError::InvalidEmbedding(_)));
    }

    #[test]
    fn test_verify_broken_chain() {
        let line = Topology::linear(5);
        let emb: Embedding = vec![(0, vec![0, 2]), (1, vec![1])].into_iter().collect();

        let err = emb.verify(&[(0, 1)], &line).unwrap_err();
        assert!(err.to_string().contains("not connected"));
    }

    #[test]
    fn test_verify_overlapping_chains() {
        let line = Topology::linear(5);
        let emb: Embedding = vec![(0, vec![0, 1]), (1, vec![1, 2])].into_iter().collect();

        let err = emb.verify(&[(0, 1)], &line).unwrap_err();
        assert!(err.to_string().contains("shared"));
    }

    #[test]
    fn test_verify_missing_variable_and_range() {
        let line = Topology::linear(3);

        let emb: Embedding = vec![(0, vec![0])].into_iter().collect();
        assert!(emb.verify(&[(0, 1)], &line).is_err());

        let emb: Embedding = vec![(0, vec![0]), (1, vec![7])].into_iter().collect();
        assert_eq!(
            emb.verify(&[(0, 1)], &line),
            Err(QannealError::NodeOutOfRange {
                node: 7,
                num_nodes: 3
            })
        );

        let emb: Embedding = vec![(0, vec![0]), (1, vec![])].into_iter().collect();
        assert!(emb.verify(&[(0, 1)], &line).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let emb: Embedding = vec![(0, vec![0, 4]), (1, vec![5])].into_iter().collect();
        let json = serde_json::to_string(&emb).unwrap();

        assert_eq!(json, r#"{"0":[0,4],"1":[5]}"#);
        let back: Embedding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, emb);
    }

    #[test]
    fn test_display() {
        let emb = Embedding::identity([0, 1]);
        assert_eq!(
            emb.to_string(),
            "Embedding(2 variables, 2 qubits, max chain 1)"
        );
    }
}
