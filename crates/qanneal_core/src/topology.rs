//! Hardware topology for QAnneal
//!
//! Gantree: L1_Hardware → Topology
//!
//! Undirected coupler graphs for annealing processors. The Chimera
//! generator reproduces the standard `chimera_graph(m, n, t)` labelling so
//! embeddings found elsewhere can be checked against it.

use crate::constants::chimera;
use crate::error::{QannealError, QannealResult};
use crate::types::{normalize_edge, Edge, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Processor topology (coupler graph)
/// Gantree: Topology // 하드웨어 토폴로지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTopology")]
pub struct Topology {
    /// Sorted, deduplicated couplers with `u < v`
    /// Gantree: edges: Vec<(NodeId, NodeId)> // 커플러
    edges: Vec<Edge>,

    /// Number of nodes
    num_nodes: usize,

    /// Optional topology name
    name: Option<String>,
}

impl Topology {
    // ========================================================================
    // Constructors
    // ========================================================================

    fn with_edges(num_nodes: usize, mut edges: Vec<Edge>, name: Option<String>) -> Self {
        for e in edges.iter_mut() {
            *e = normalize_edge(e.0, e.1);
        }
        edges.sort_unstable();
        edges.dedup();

        Self {
            edges,
            num_nodes,
            name,
        }
    }

    /// Create from an explicit edge list
    /// Gantree: from_edges(n, edges) -> Result<Self> // 엣지에서 생성
    pub fn from_edges(num_nodes: usize, edges: Vec<Edge>) -> QannealResult<Self> {
        if edges.is_empty() {
            return Err(QannealError::EmptyCouplingMap);
        }
        check_edges(num_nodes, &edges)?;

        Ok(Self::with_edges(num_nodes, edges, None))
    }

    /// Create linear chain topology
    ///
    /// Connectivity: 0-1-2-...-N-1
    pub fn linear(n: usize) -> Self {
        let edges = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        Self::with_edges(n, edges, Some(format!("linear_{}", n)))
    }

    /// Create grid topology
    ///
    /// Node indexing: row * cols + col
    pub fn grid(rows: usize, cols: usize) -> Self {
        let mut edges = Vec::new();

        for r in 0..rows {
            for c in 0..cols {
                let q = r * cols + c;
                if c + 1 < cols {
                    edges.push((q, q + 1));
                }
                if r + 1 < rows {
                    edges.push((q, q + cols));
                }
            }
        }

        Self::with_edges(rows * cols, edges, Some(format!("grid_{}x{}", rows, cols)))
    }

    /// Create complete graph
    pub fn all_to_all(n: usize) -> Self {
        let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in i + 1..n {
                edges.push((i, j));
            }
        }

        Self::with_edges(n, edges, Some(format!("all_to_all_{}", n)))
    }

    /// Create Chimera topology: `m x n` grid of `K_{t,t}` unit cells
    /// Gantree: chimera(m,n,t) -> Self // 키메라 그래프
    ///
    /// Node `(i, j, u, k)` (row, column, shore, index) is labelled
    /// `((i * n + j) * 2 + u) * t + k`. Shore 0 couples vertically to the
    /// next row, shore 1 horizontally to the next column.
    pub fn chimera(m: usize, n: usize, t: usize) -> Self {
        let label = |i: usize, j: usize, u: usize, k: usize| ((i * n + j) * 2 + u) * t + k;
        let mut edges = Vec::with_capacity(chimera::num_edges(m, n, t));

        for i in 0..m {
            for j in 0..n {
                // Intra-cell K_{t,t}
                for k0 in 0..t {
                    for k1 in 0..t {
                        edges.push((label(i, j, 0, k0), label(i, j, 1, k1)));
                    }
                }

                for k in 0..t {
                    if i + 1 < m {
                        edges.push((label(i, j, 0, k), label(i + 1, j, 0, k)));
                    }
                    if j + 1 < n {
                        edges.push((label(i, j, 1, k), label(i, j + 1, 1, k)));
                    }
                }
            }
        }

        Self::with_edges(
            chimera::num_nodes(m, n, t),
            edges,
            Some(format!("chimera_{}x{}x{}", m, n, t)),
        )
    }

    /// Processor assumed when the caller supplies none: Chimera(16, 16, 4)
    pub fn default_processor() -> Self {
        Self::chimera(
            chimera::DEFAULT_ROWS,
            chimera::DEFAULT_COLS,
            chimera::DEFAULT_SHORE,
        )
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Get number of nodes
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Get couplers
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get number of couplers
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get topology name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set topology name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Check node existence
    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.num_nodes
    }

    // ========================================================================
    // Connectivity Queries
    // ========================================================================

    /// Check if two nodes share a coupler
    /// Gantree: is_connected(a, b) -> bool // 연결 여부
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.edges.binary_search(&normalize_edge(a, b)).is_ok()
    }

    /// Build adjacency sets, indexed by node
    pub fn adjacency(&self) -> Vec<BTreeSet<NodeId>> {
        let mut adj = vec![BTreeSet::new(); self.num_nodes];
        for &(a, b) in &self.edges {
            adj[a].insert(b);
            adj[b].insert(a);
        }
        adj
    }

    /// Get neighbors of a node, sorted
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = self
            .edges
            .iter()
            .filter_map(|&(a, b)| {
                if a == node {
                    Some(b)
                } else if b == node {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        result.sort_unstable();
        result
    }

    /// Get node degree
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Find shortest path between two nodes (BFS)
    pub fn shortest_path(&self, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
        if start >= self.num_nodes || end >= self.num_nodes {
            return None;
        }
        if start == end {
            return Some(vec![start]);
        }

        let adj = self.adjacency();
        let mut visited = vec![false; self.num_nodes];
        let mut parent: Vec<Option<NodeId>> = vec![None; self.num_nodes];
        let mut queue = VecDeque::new();

        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                let mut path = Vec::new();
                let mut node = Some(end);
                while let Some(n) = node {
                    path.push(n);
                    node = parent[n];
                }
                path.reverse();
                return Some(path);
            }

            for &neighbor in &adj[current] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    parent[neighbor] = Some(current);
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }

    /// Check if every node is reachable from node 0
    pub fn is_fully_connected(&self) -> bool {
        if self.num_nodes <= 1 {
            return true;
        }

        let adj = self.adjacency();
        let mut visited = vec![false; self.num_nodes];
        let mut stack = vec![0];
        visited[0] = true;
        let mut seen = 1;

        while let Some(node) = stack.pop() {
            for &next in &adj[node] {
                if !visited[next] {
                    visited[next] = true;
                    seen += 1;
                    stack.push(next);
                }
            }
        }

        seen == self.num_nodes
    }
}

fn check_edges(num_nodes: usize, edges: &[Edge]) -> QannealResult<()> {
    for &(a, b) in edges {
        if a == b {
            return Err(QannealError::InvalidCoupling(a, b));
        }
        let node = a.max(b);
        if node >= num_nodes {
            return Err(QannealError::NodeOutOfRange { node, num_nodes });
        }
    }
    Ok(())
}

// ============================================================================
// Deserialization
// ============================================================================

/// Wire form; edge lists may be unsorted and in either orientation
#[derive(Deserialize)]
struct RawTopology {
    edges: Vec<Edge>,
    num_nodes: usize,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawTopology> for Topology {
    type Error = QannealError;

    fn try_from(raw: RawTopology) -> QannealResult<Self> {
        // Edgeless topologies such as `linear(1)` are valid on the wire
        check_edges(raw.num_nodes, &raw.edges)?;
        Ok(Self::with_edges(raw.num_nodes, raw.edges, raw.name))
    }
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Topology({} nodes, {} edges{})",
            self.num_nodes,
            self.num_edges(),
            self.name
                .as_ref()
                .map(|n| format!(", {}", n))
                .unwrap_or_default()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_topology() {
        let topo = Topology::linear(5);

        assert_eq!(topo.num_nodes(), 5);
        assert_eq!(topo.num_edges(), 4);
        assert!(topo.is_connected(0, 1));
        assert!(topo.is_connected(2, 1));
        assert!(!topo.is_connected(0, 2));
        assert!(!topo.is_connected(3, 3));
    }

    #[test]
    fn test_grid_topology() {
        let topo = Topology::grid(2, 3);

        assert_eq!(topo.num_nodes(), 6);
        // 2 horizontal edges per row x 2 rows + 3 vertical edges
        assert_eq!(topo.num_edges(), 7);
    }

    #[test]
    fn test_all_to_all() {
        let topo = Topology::all_to_all(4);

        assert_eq!(topo.num_edges(), 6);
        assert!(topo.is_connected(0, 3));
        assert_eq!(topo.degree(2), 3);
    }

    #[test]
    fn test_from_edges_validation() {
        assert_eq!(
            Topology::from_edges(3, vec![]),
            Err(QannealError::EmptyCouplingMap)
        );
        assert_eq!(
            Topology::from_edges(3, vec![(1, 1)]),
            Err(QannealError::InvalidCoupling(1, 1))
        );
        assert_eq!(
            Topology::from_edges(3, vec![(0, 3)]),
            Err(QannealError::NodeOutOfRange {
                node: 3,
                num_nodes: 3
            })
        );

        let topo = Topology::from_edges(3, vec![(2, 0), (0, 2), (1, 2)]).unwrap();
        assert_eq!(topo.edges(), &[(0, 2), (1, 2)]);
    }

    #[test]
    fn test_chimera_unit_cell() {
        let cell = Topology::chimera(1, 1, 4);

        assert_eq!(cell.num_nodes(), 8);
        assert_eq!(cell.num_edges(), 16);
        // Shore 0 (0..4) is bipartite with shore 1 (4..8)
        assert!(cell.is_connected(0, 4));
        assert!(cell.is_connected(3, 7));
        assert!(!cell.is_connected(0, 1));
        assert!(!cell.is_connected(4, 5));
        assert_eq!(cell.degree(0), 4);
    }

    #[test]
    fn test_chimera_inter_cell_couplers() {
        // 2x2 cells, t = 2: cell (i, j) occupies labels (i*2 + j)*4 .. +4
        let topo = Topology::chimera(2, 2, 2);

        assert_eq!(topo.num_nodes(), 16);
        assert_eq!(topo.num_edges(), chimera::num_edges(2, 2, 2));

        // (0,0,0,k) -> (1,0,0,k): labels k and 8 + k
        assert!(topo.is_connected(0, 8));
        assert!(topo.is_connected(1, 9));
        // (0,0,1,k) -> (0,1,1,k): labels 2 + k and 6 + k
        assert!(topo.is_connected(2, 6));
        assert!(topo.is_connected(3, 7));
        // No diagonal or cross-shore inter-cell couplers
        assert!(!topo.is_connected(0, 4));
        assert!(!topo.is_connected(2, 10));
    }

    #[test]
    fn test_default_processor() {
        let topo = Topology::default_processor();

        assert_eq!(topo.num_nodes(), 2048);
        assert_eq!(topo.num_edges(), 6016);
        assert_eq!(topo.name(), Some("chimera_16x16x4"));
        assert!(topo.is_fully_connected());
    }

    #[test]
    fn test_neighbors_and_path() {
        let topo = Topology::linear(5);

        assert_eq!(topo.neighbors(0), vec![1]);
        assert_eq!(topo.neighbors(2), vec![1, 3]);
        assert_eq!(topo.shortest_path(0, 4).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(topo.shortest_path(2, 2).unwrap(), vec![2]);
        assert!(topo.shortest_path(0, 9).is_none());
    }

    #[test]
    fn test_disconnected() {
        let topo = Topology::from_edges(4, vec![(0, 1), (2, 3)]).unwrap();
        assert!(!topo.is_fully_connected());
        assert!(topo.shortest_path(0, 3).is_none());
    }

    #[test]
    fn test_deserialize_normalizes_edges() {
        let json = r#"{"edges":[[2,1],[0,2],[1,2]],"num_nodes":3}"#;
        let topo: Topology = serde_json::from_str(json).unwrap();

        assert_eq!(topo.edges(), &[(0, 2), (1, 2)]);
        assert!(topo.is_connected(1, 2));
        assert_eq!(topo.adjacency()[2].len(), 2);
        assert_eq!(topo.name(), None);
    }

    #[test]
    fn test_deserialize_rejects_bad_edges() {
        let out_of_range = r#"{"edges":[[2,1],[0,5]],"num_nodes":3}"#;
        let self_loop = r#"{"edges":[[1,1]],"num_nodes":3}"#;
        assert!(serde_json::from_str::<Topology>(out_of_range).is_err());
        assert!(serde_json::from_str::<Topology>(self_loop).is_err());

        let json = serde_json::to_string(&Topology::linear(1)).unwrap();
        let single: Topology = serde_json::from_str(&json).unwrap();
        assert_eq!(single.num_edges(), 0);
    }

    #[test]
    fn test_display() {
        let topo = Topology::linear(3);
        assert_eq!(topo.to_string(), "Topology(3 nodes, 2 edges, linear_3)");
    }
}
