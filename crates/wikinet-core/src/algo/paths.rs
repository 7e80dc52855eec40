//! Unweighted shortest paths.
//!
//! Distances are hop counts; similarity weights play no part.

use crate::metrics::round_to;
use crate::{ArticleGraph, ArticleId, Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, VecDeque};

fn bfs_distances<N, E>(g: &UnGraph<N, E>, source: NodeIndex) -> Vec<Option<usize>> {
    let mut dist = vec![None; g.node_count()];
    dist[source.index()] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back((source, 0usize));
    while let Some((v, d)) = queue.pop_front() {
        for w in g.neighbors(v) {
            if dist[w.index()].is_none() {
                dist[w.index()] = Some(d + 1);
                queue.push_back((w, d + 1));
            }
        }
    }
    dist
}

/// Hop distance from `source` to every article reachable from it.
pub fn shortest_path_lengths(
    graph: &ArticleGraph,
    source: &ArticleId,
) -> Result<HashMap<ArticleId, usize>> {
    let start = graph
        .node_index(source)
        .ok_or_else(|| Error::ArticleNotFound(source.0.clone()))?;
    let g = graph.as_petgraph();

    Ok(bfs_distances(g, start)
        .into_iter()
        .enumerate()
        .filter_map(|(i, d)| d.map(|d| (g[NodeIndex::new(i)].id.clone(), d)))
        .collect())
}

/// Exact mean hop distance over all connected unordered pairs.
///
/// Pairs in different components are left out of both the sum and the
/// count. `None` when no pair is connected (fewer than two articles, or
/// no edges at all).
#[allow(clippy::cast_precision_loss)]
pub fn mean_shortest_path_length(graph: &ArticleGraph) -> Option<f64> {
    let g = graph.as_petgraph();
    let mut total: u64 = 0;
    let mut pairs: u64 = 0;

    for s in g.node_indices() {
        for (t, d) in bfs_distances(g, s).into_iter().enumerate() {
            // Each unordered pair once
            if t <= s.index() {
                continue;
            }
            if let Some(d) = d {
                total += d as u64;
                pairs += 1;
            }
        }
    }

    (pairs > 0).then(|| total as f64 / pairs as f64)
}

/// [`mean_shortest_path_length`] rounded to 2 decimals for display.
///
/// # Example
///
/// ```
/// use wikinet_core::{Article, ArticleGraph, Similarity};
/// use wikinet_core::algo::paths::average_shortest_path_length;
///
/// let mut g = ArticleGraph::new();
/// for id in ["a", "b", "c"] {
///     g.add_article(Article::new(id))?;
/// }
/// g.add_similarity("a", "b", Similarity::new(0.9))?;
/// g.add_similarity("b", "c", Similarity::new(0.9))?;
///
/// // (1 + 1 + 2) / 3
/// assert_eq!(average_shortest_path_length(&g), Some(1.33));
///
/// let lonely = {
///     let mut g = ArticleGraph::new();
///     g.add_article(Article::new("x"))?;
///     g
/// };
/// assert_eq!(average_shortest_path_length(&lonely), None);
/// # Ok::<(), wikinet_core::Error>(())
/// ```
pub fn average_shortest_path_length(graph: &ArticleGraph) -> Option<f64> {
    mean_shortest_path_length(graph).map(|v| round_to(v, 2))
}
