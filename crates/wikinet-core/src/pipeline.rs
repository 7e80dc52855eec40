//! One selection, end to end: extract, simplify, measure.

use crate::metrics::{GraphMetrics, LocalCentrality, SubgraphMetrics};
use crate::simplify::{simplify, SimplifyConfig, Strategy};
use crate::{extract, ArticleGraph, ArticleId, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Everything the presentation layer needs for one selected article.
///
/// A pure function of `(graph, target, config)`: nothing is cached between
/// selections and the source graph is never touched.
#[derive(Debug, Clone, Serialize)]
pub struct Exploration {
    /// The selected article.
    pub target: ArticleId,
    /// The subgraph to display (simplified when needed).
    #[serde(skip)]
    pub subgraph: ArticleGraph,
    /// Which reduction produced `subgraph`.
    pub strategy: Strategy,
    /// Size and density of the full neighborhood, before simplification.
    pub neighborhood: SubgraphMetrics,
    /// Size and density of `subgraph`.
    pub displayed: SubgraphMetrics,
    /// Degree centrality of the target within `subgraph`.
    pub local_degree_centrality: f64,
    /// Normalized betweenness of the target within `subgraph`.
    pub local_betweenness_centrality: f64,
    /// Mean hop distance over connected pairs of `subgraph`, 2 decimals.
    /// `None` when no pair is connected.
    pub avg_shortest_path: Option<f64>,
    /// Edge-threshold pruning fired.
    pub edges_removed: bool,
    /// Node-category pruning fired.
    pub nodes_removed: bool,
    /// Local centrality of every displayed article.
    #[serde(skip)]
    pub centrality: LocalCentrality,
}

impl Exploration {
    /// Local degree centrality of every displayed article.
    pub fn degree_centrality(&self) -> &HashMap<ArticleId, f64> {
        &self.centrality.degree
    }

    /// Local betweenness of every displayed article.
    pub fn betweenness_centrality(&self) -> &HashMap<ArticleId, f64> {
        &self.centrality.betweenness
    }

    /// Explanation to show next to a reduced graph, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self.strategy {
            Strategy::EdgeThreshold => Some(
                "Edges below the similarity threshold have been removed. Isolated articles \
                 belong to the larger neighborhood and are shown for completeness.",
            ),
            Strategy::NodeCategory => Some(
                "Redundant articles have been removed from the display. Neighborhood metrics \
                 still describe the entire neighborhood.",
            ),
            Strategy::Unchanged => None,
        }
    }
}

/// Run the full pipeline for one selection.
///
/// # Errors
///
/// - `ArticleNotFound` if `target` is not in `graph`.
/// - `MissingAttribute` if the chosen reduction needs an attribute the
///   neighborhood lacks.
///
/// # Example
///
/// ```
/// use wikinet_core::{explore, Article, ArticleGraph, Similarity, SimplifyConfig};
///
/// let mut g = ArticleGraph::new();
/// for id in ["a", "b", "c"] {
///     g.add_article(Article::new(id).with_category("Core"))?;
/// }
/// g.add_similarity("a", "b", Similarity::new(0.9))?;
/// g.add_similarity("b", "c", Similarity::new(0.9))?;
///
/// let view = explore(&g, &"b".into(), &SimplifyConfig::default())?;
/// assert_eq!(view.local_degree_centrality, 1.0);
/// assert_eq!(view.local_betweenness_centrality, 1.0);
/// assert_eq!(view.avg_shortest_path, Some(1.33));
/// assert!(!view.edges_removed && !view.nodes_removed);
/// # Ok::<(), wikinet_core::Error>(())
/// ```
pub fn explore(
    graph: &ArticleGraph,
    target: &ArticleId,
    config: &SimplifyConfig,
) -> Result<Exploration> {
    let neighborhood = extract(graph, target)?;
    let simplified = simplify(&neighborhood, target, config)?;

    let GraphMetrics {
        summary,
        centrality,
        avg_shortest_path,
    } = GraphMetrics::compute(&simplified.graph);
    let (local_degree_centrality, local_betweenness_centrality) = centrality.of(target)?;

    Ok(Exploration {
        target: target.clone(),
        edges_removed: simplified.edges_removed(),
        nodes_removed: simplified.nodes_removed(),
        strategy: simplified.strategy,
        neighborhood: simplified.input_metrics,
        displayed: summary,
        subgraph: simplified.graph,
        local_degree_centrality,
        local_betweenness_centrality,
        avg_shortest_path,
        centrality,
    })
}
