//! Connected components analysis.
//!
//! The similarity graph is undirected, so there is a single notion of
//! connectivity: two articles share a component when some path of
//! similarity edges joins them.

use crate::{ArticleGraph, ArticleId, Error, Result};
use petgraph::visit::{Bfs, EdgeRef, NodeIndexable};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

// Union-Find helper functions (at module level per clippy)
fn uf_find(parent: &mut [usize], i: usize) -> usize {
    if parent[i] != i {
        parent[i] = uf_find(parent, parent[i]); // Path compression
    }
    parent[i]
}

fn uf_union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
    let px = uf_find(parent, x);
    let py = uf_find(parent, y);
    if px == py {
        return;
    }
    // Union by rank
    match rank[px].cmp(&rank[py]) {
        Ordering::Less => parent[px] = py,
        Ordering::Greater => parent[py] = px,
        Ordering::Equal => {
            parent[py] = px;
            rank[px] += 1;
        }
    }
}

/// The set of articles reachable from `target`, `target` included.
///
/// Breadth-first over the adjacency lists, O(V + E) in the size of the
/// component.
pub fn node_connected_component(
    graph: &ArticleGraph,
    target: &ArticleId,
) -> Result<BTreeSet<ArticleId>> {
    let start = graph
        .node_index(target)
        .ok_or_else(|| Error::ArticleNotFound(target.0.clone()))?;

    let g = graph.as_petgraph();
    let mut bfs = Bfs::new(g, start);
    let mut component = BTreeSet::new();
    while let Some(idx) = bfs.next(g) {
        component.insert(g[idx].id.clone());
    }
    Ok(component)
}

/// Compute all connected components.
///
/// Uses Union-Find for O(V + E * alpha(V)) computation. Components are
/// returned largest first; ties keep first-seen order.
#[must_use]
pub fn connected_components(graph: &ArticleGraph) -> Vec<Vec<ArticleId>> {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n == 0 {
        return vec![];
    }

    let mut parent: Vec<usize> = (0..n).collect();
    let mut rank: Vec<usize> = vec![0; n];

    for edge in g.edge_references() {
        let src = g.to_index(edge.source());
        let dst = g.to_index(edge.target());
        uf_union(&mut parent, &mut rank, src, dst);
    }

    // Group nodes by component root, remembering first-seen order.
    let mut slot: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<ArticleId>> = Vec::new();
    for idx in g.node_indices() {
        let root = uf_find(&mut parent, g.to_index(idx));
        let pos = *slot.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[pos].push(g[idx].id.clone());
    }

    components.sort_by(|a, b| b.len().cmp(&a.len()));
    components
}

/// Statistics about connected components.
#[derive(Debug, Clone)]
pub struct ComponentStats {
    /// Number of components.
    pub num_components: usize,
    /// Size of the largest component.
    pub max_component_size: usize,
    /// Size of the smallest component.
    pub min_component_size: usize,
    /// Average component size.
    pub avg_component_size: f64,
    /// Components made of a single article.
    pub singleton_count: usize,
    /// Fraction of articles in the largest component.
    pub largest_component_fraction: f64,
}

/// Compute statistics from components.
///
/// Returns zeroed stats if components is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn component_stats(components: &[Vec<ArticleId>]) -> ComponentStats {
    if components.is_empty() {
        return ComponentStats {
            num_components: 0,
            max_component_size: 0,
            min_component_size: 0,
            avg_component_size: 0.0,
            singleton_count: 0,
            largest_component_fraction: 0.0,
        };
    }

    let sizes: Vec<usize> = components.iter().map(Vec::len).collect();
    let total: usize = sizes.iter().sum();
    let max_size = sizes.iter().copied().max().unwrap_or(0);
    let min_size = sizes.iter().copied().min().unwrap_or(0);

    ComponentStats {
        num_components: components.len(),
        max_component_size: max_size,
        min_component_size: min_size,
        avg_component_size: total as f64 / components.len() as f64,
        singleton_count: sizes.iter().filter(|&&s| s == 1).count(),
        largest_component_fraction: if total > 0 {
            max_size as f64 / total as f64
        } else {
            0.0
        },
    }
}

/// Whether every article can reach every other one.
///
/// An empty graph counts as connected.
pub fn is_connected(graph: &ArticleGraph) -> bool {
    connected_components(graph).len() <= 1
}
