//! Structural descriptors of a subgraph.

use crate::algo::centrality::{betweenness_centrality, degree_centrality, BetweennessConfig};
use crate::algo::paths::average_shortest_path_length;
use crate::{ArticleGraph, ArticleId, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Round to `places` decimals, ties to even.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

/// Size and density of a subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubgraphMetrics {
    /// Number of articles.
    pub node_count: usize,
    /// Number of similarity edges.
    pub edge_count: usize,
    /// Density rounded to 2 decimals.
    pub density: f64,
}

/// Node count, edge count and display density of `graph`.
#[must_use]
pub fn metrics(graph: &ArticleGraph) -> SubgraphMetrics {
    SubgraphMetrics {
        node_count: graph.article_count(),
        edge_count: graph.similarity_count(),
        density: round_to(graph.density(), 2),
    }
}

/// Local centrality scores for every article of a subgraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalCentrality {
    /// Degree centrality per article.
    pub degree: HashMap<ArticleId, f64>,
    /// Normalized betweenness per article.
    pub betweenness: HashMap<ArticleId, f64>,
}

impl LocalCentrality {
    /// Compute both measures over `graph`.
    #[must_use]
    pub fn compute(graph: &ArticleGraph) -> Self {
        Self {
            degree: degree_centrality(graph),
            betweenness: betweenness_centrality(graph, BetweennessConfig::default()),
        }
    }

    /// `(degree, betweenness)` of one article.
    pub fn of(&self, id: &ArticleId) -> Result<(f64, f64)> {
        match (self.degree.get(id), self.betweenness.get(id)) {
            (Some(&d), Some(&b)) => Ok((d, b)),
            _ => Err(Error::ArticleNotFound(id.0.clone())),
        }
    }
}

/// Every descriptor shown alongside a displayed subgraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMetrics {
    /// Size and density.
    pub summary: SubgraphMetrics,
    /// Per-article centrality.
    pub centrality: LocalCentrality,
    /// Mean hop distance over connected pairs, 2 decimals.
    pub avg_shortest_path: Option<f64>,
}

impl GraphMetrics {
    /// Compute all descriptors of `graph`.
    #[must_use]
    pub fn compute(graph: &ArticleGraph) -> Self {
        Self {
            summary: metrics(graph),
            centrality: LocalCentrality::compute(graph),
            avg_shortest_path: average_shortest_path_length(graph),
        }
    }
}
