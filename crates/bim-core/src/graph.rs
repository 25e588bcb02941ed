use serde::{Deserialize, Serialize};

use crate::{VertexId, Weight};

/// Outgoing edge stored in an adjacency list
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: VertexId,
    pub weight: Weight, // activation probability (IC) or influence weight (LT)
}

impl Edge {
    pub fn new(to: VertexId, weight: Weight) -> Self {
        Self { to, weight }
    }
}

/// Directed weighted graph over the vertices `0..n`.
///
/// Vertex ids out of range are a caller error and panic on indexing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    n: usize,
    m: usize,
    adj: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            m: 0,
            adj: vec![Vec::new(); n],
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn num_edges(&self) -> usize {
        self.m
    }

    pub fn add_edge(&mut self, u: VertexId, v: VertexId, w: Weight) {
        assert!(v < self.n, "target vertex {} out of range (n = {})", v, self.n);
        self.adj[u].push(Edge::new(v, w));
        self.m += 1;
    }

    /// Remove every edge pointing at `u`. Deleting twice is a no-op.
    pub fn delete_vertex(&mut self, u: VertexId) {
        for edges in &mut self.adj {
            let before = edges.len();
            edges.retain(|e| e.to != u);
            self.m -= before - edges.len();
        }
    }

    /// Outgoing edges of `u` in insertion order
    #[inline]
    pub fn neighbors(&self, u: VertexId) -> &[Edge] {
        &self.adj[u]
    }

    /// All edges as `(source, target, weight)`, sorted and deduplicated.
    pub fn edges(&self) -> Vec<(VertexId, VertexId, Weight)> {
        let mut edges: Vec<_> = self
            .adj
            .iter()
            .enumerate()
            .flat_map(|(u, out)| out.iter().map(move |e| (u, e.to, e.weight)))
            .collect();
        edges.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.cmp(&b.1))
                .then(a.2.total_cmp(&b.2))
        });
        edges.dedup();
        edges
    }

    /// Directed path `0 -> 1 -> ... -> len` with a uniform weight.
    pub fn path(len: usize, w: Weight) -> Self {
        let mut g = Self::new(len + 1);
        for u in 0..len {
            g.add_edge(u, u + 1, w);
        }
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Graph {
        let mut g = Graph::new(5);
        g.add_edge(0, 1, 1.0);
        g.add_edge(0, 2, 2.0);
        g.add_edge(1, 2, 3.0);
        g.add_edge(3, 4, 4.0);
        g
    }

    #[test]
    fn test_edges_sorted() {
        let g = small();
        let edges = g.edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], (0, 1, 1.0));
        assert_eq!(edges[1], (0, 2, 2.0));
        assert_eq!(edges[2], (1, 2, 3.0));
        assert_eq!(edges[3], (3, 4, 4.0));
    }

    #[test]
    fn test_edges_dedup() {
        let mut g = Graph::new(3);
        g.add_edge(2, 0, 0.5);
        g.add_edge(0, 1, 0.5);
        g.add_edge(2, 0, 0.5);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.edges(), vec![(0, 1, 0.5), (2, 0, 0.5)]);
    }

    #[test]
    fn test_neighbors() {
        let g = small();
        let neighbors = g.neighbors(0);
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0], Edge::new(1, 1.0));
        assert_eq!(neighbors[1], Edge::new(2, 2.0));
        assert!(g.neighbors(4).is_empty());
    }

    #[test]
    fn test_delete_vertex() {
        let mut g = small();
        g.delete_vertex(2);
        assert_eq!(g.num_edges(), 2);
        assert!(g.neighbors(0).iter().all(|e| e.to != 2));
        assert!(g.neighbors(1).is_empty());

        let total: usize = (0..g.num_vertices()).map(|u| g.neighbors(u).len()).sum();
        assert_eq!(total, g.num_edges());
    }

    #[test]
    fn test_delete_idempotent() {
        let mut g = small();
        g.delete_vertex(4);
        assert_eq!(g.num_edges(), 3);
        g.delete_vertex(4);
        assert_eq!(g.num_edges(), 3);

        // vertex 0 has no incoming edges
        g.delete_vertex(0);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn test_path() {
        let g = Graph::path(4, 1.0);
        assert_eq!(g.num_vertices(), 5);
        assert_eq!(g.num_edges(), 4);
        assert_eq!(g.neighbors(3), &[Edge::new(4, 1.0)]);
    }
}
