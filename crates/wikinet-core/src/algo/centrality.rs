//! Local centrality: degree and betweenness over a (sub)graph.
//!
//! These are computed on whatever graph is passed in. The pipeline passes
//! the displayed subgraph, so the scores describe what is on screen and
//! are unrelated to the global `degree` / `betweenness` attributes stored
//! on each [`Article`](crate::Article).
//!
//! # Degree
//!
//! ```text
//! C_D(v) = deg(v) / (n - 1)
//! ```
//!
//! 0 for every node of a single-node graph.
//!
//! # Betweenness (Brandes, 2001)
//!
//! ```text
//! C_B(v) = Σ_{s≠v≠t} σ_st(v) / σ_st
//! ```
//!
//! Where σ_st is the number of shortest paths from s to t and σ_st(v) the
//! number of those passing through v. One BFS per source gives σ in the
//! forward pass; dependencies are accumulated in reverse BFS order:
//!
//! ```text
//! δ_s(v) = Σ_{w: v∈P_s(w)} (σ_sv/σ_sw) × (1 + δ_s(w))
//! ```
//!
//! Running from every source visits each unordered pair twice, so raw
//! scores are halved. Normalized scores divide by the number of pairs not
//! involving v, `(n-1)(n-2)/2`.

use crate::ArticleGraph;
use crate::ArticleId;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, VecDeque};

/// Configuration for betweenness centrality.
#[derive(Debug, Clone, Copy)]
pub struct BetweennessConfig {
    /// Normalize scores to [0, 1] range.
    pub normalized: bool,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self { normalized: true }
    }
}

/// Compute degree centrality for all nodes.
///
/// # Example
///
/// ```
/// use wikinet_core::{Article, ArticleGraph, ArticleId, Similarity};
/// use wikinet_core::algo::centrality::degree_centrality;
///
/// let mut g = ArticleGraph::new();
/// for id in ["hub", "a", "b"] {
///     g.add_article(Article::new(id))?;
/// }
/// g.add_similarity("hub", "a", Similarity::new(0.9))?;
/// g.add_similarity("hub", "b", Similarity::new(0.9))?;
///
/// let scores = degree_centrality(&g);
/// assert_eq!(scores[&ArticleId::from("hub")], 1.0);
/// assert_eq!(scores[&ArticleId::from("a")], 0.5);
/// # Ok::<(), wikinet_core::Error>(())
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &ArticleGraph) -> HashMap<ArticleId, f64> {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n <= 1 {
        return g.node_weights().map(|a| (a.id.clone(), 0.0)).collect();
    }

    let denom = (n - 1) as f64;
    g.node_indices()
        .map(|idx| (g[idx].id.clone(), g.neighbors(idx).count() as f64 / denom))
        .collect()
}

/// Compute betweenness centrality using Brandes' algorithm.
///
/// # Complexity
///
/// - Time: O(VE)
/// - Space: O(V + E)
///
/// # Example
///
/// ```
/// use wikinet_core::{Article, ArticleGraph, ArticleId, Similarity};
/// use wikinet_core::algo::centrality::{betweenness_centrality, BetweennessConfig};
///
/// let mut g = ArticleGraph::new();
/// for id in ["a", "b", "c"] {
///     g.add_article(Article::new(id))?;
/// }
/// g.add_similarity("a", "b", Similarity::new(0.9))?;
/// g.add_similarity("b", "c", Similarity::new(0.9))?;
///
/// let scores = betweenness_centrality(&g, BetweennessConfig::default());
/// // b is on the only path between a and c
/// assert_eq!(scores[&ArticleId::from("b")], 1.0);
/// assert_eq!(scores[&ArticleId::from("a")], 0.0);
/// # Ok::<(), wikinet_core::Error>(())
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(
    graph: &ArticleGraph,
    config: BetweennessConfig,
) -> HashMap<ArticleId, f64> {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n < 3 {
        return g.node_weights().map(|a| (a.id.clone(), 0.0)).collect();
    }

    let mut betweenness = vec![0.0_f64; n];

    for s in g.node_indices() {
        let (sigma, predecessors, order) = bfs_shortest_paths(g, s);

        let mut delta = vec![0.0_f64; n];

        // Farthest first
        for &w in order.iter().rev() {
            let w_idx = w.index();
            for &v in &predecessors[w_idx] {
                let v_idx = v.index();
                delta[v_idx] += sigma[v_idx] / sigma[w_idx] * (1.0 + delta[w_idx]);
            }
            if w != s {
                betweenness[w_idx] += delta[w_idx];
            }
        }
    }

    // Each unordered pair was counted from both ends
    for b in &mut betweenness {
        *b /= 2.0;
    }

    if config.normalized {
        let pairs = ((n - 1) * (n - 2)) as f64 / 2.0;
        for b in &mut betweenness {
            *b /= pairs;
        }
    }

    g.node_indices()
        .map(|idx| (g[idx].id.clone(), betweenness[idx.index()]))
        .collect()
}

/// BFS to find shortest paths from source.
///
/// Returns:
/// - sigma: σ_sv = number of shortest paths from s to v
/// - predecessors: P_s(v) = predecessors on shortest paths
/// - order: nodes in BFS order (for backward pass)
fn bfs_shortest_paths<N, E>(
    g: &UnGraph<N, E>,
    source: NodeIndex,
) -> (Vec<f64>, Vec<Vec<NodeIndex>>, Vec<NodeIndex>) {
    let n = g.node_count();
    let mut sigma = vec![0.0_f64; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);

    sigma[source.index()] = 1.0;
    dist[source.index()] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let v_idx = v.index();
        let next = dist[v_idx].map_or(0, |d| d + 1);

        for w in g.neighbors(v) {
            let w_idx = w.index();
            if dist[w_idx].is_none() {
                dist[w_idx] = Some(next);
                queue.push_back(w);
            }
            if dist[w_idx] == Some(next) {
                sigma[w_idx] += sigma[v_idx];
                predecessors[w_idx].push(v);
            }
        }
    }

    (sigma, predecessors, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Article, Similarity};

    fn graph(n: usize, edges: &[(usize, usize)]) -> ArticleGraph {
        let mut g = ArticleGraph::new();
        for i in 0..n {
            g.add_article(Article::new(format!("N{i}"))).unwrap();
        }
        for (a, b) in edges {
            g.add_similarity(format!("N{a}"), format!("N{b}"), Similarity::new(1.0))
                .unwrap();
        }
        g
    }

    fn id(i: usize) -> ArticleId {
        ArticleId(format!("N{i}"))
    }

    #[test]
    fn test_degree_star() {
        let g = graph(4, &[(0, 1), (0, 2), (0, 3)]);
        let scores = degree_centrality(&g);
        assert!((scores[&id(0)] - 1.0).abs() < 1e-12);
        assert!((scores[&id(1)] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_degree_singleton_is_zero() {
        let g = graph(1, &[]);
        let scores = degree_centrality(&g);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[&id(0)], 0.0);
    }

    #[test]
    fn test_degree_empty_graph() {
        let g = ArticleGraph::new();
        assert!(degree_centrality(&g).is_empty());
    }

    #[test]
    fn test_betweenness_star_center_is_one() {
        let g = graph(4, &[(0, 1), (0, 2), (0, 3)]);
        let scores = betweenness_centrality(&g, BetweennessConfig::default());
        assert!((scores[&id(0)] - 1.0).abs() < 1e-12);
        for leaf in 1..4 {
            assert_eq!(scores[&id(leaf)], 0.0);
        }
    }

    #[test]
    fn test_betweenness_line() {
        // N0 - N1 - N2 - N3
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let raw = betweenness_centrality(&g, BetweennessConfig { normalized: false });
        // N1 lies on (0,2) and (0,3)
        assert!((raw[&id(1)] - 2.0).abs() < 1e-12);
        assert!((raw[&id(2)] - 2.0).abs() < 1e-12);
        assert_eq!(raw[&id(0)], 0.0);

        let norm = betweenness_centrality(&g, BetweennessConfig::default());
        // 2 / ((3 * 2) / 2)
        assert!((norm[&id(1)] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_betweenness_split_paths() {
        // Square N0-N1-N2-N3-N0: two shortest paths between opposite corners.
        let g = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let raw = betweenness_centrality(&g, BetweennessConfig { normalized: false });
        for i in 0..4 {
            assert!((raw[&id(i)] - 0.5).abs() < 1e-12, "N{i}: {}", raw[&id(i)]);
        }
    }

    #[test]
    fn test_betweenness_disconnected_parts() {
        // Path of three plus an isolated node
        let g = graph(4, &[(0, 1), (1, 2)]);
        let norm = betweenness_centrality(&g, BetweennessConfig::default());
        // 1 pair through N1, normalized by (3 * 2) / 2
        assert!((norm[&id(1)] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(norm[&id(3)], 0.0);
    }

    #[test]
    fn test_betweenness_small_graphs_are_zero() {
        let g = graph(2, &[(0, 1)]);
        let scores = betweenness_centrality(&g, BetweennessConfig::default());
        assert_eq!(scores.values().copied().sum::<f64>(), 0.0);
    }
}
