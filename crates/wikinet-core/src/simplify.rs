//! Size and density driven simplification of a neighborhood.
//!
//! A neighborhood with more than [`SimplifyConfig::edge_limit`] edges is
//! too busy to draw. Two reductions are available:
//!
//! | Neighborhood | Strategy | Effect |
//! |--------------|----------|--------|
//! | many edges, dense | [`Strategy::EdgeThreshold`] | drop weak edges, keep every article |
//! | many edges, sparse | [`Strategy::NodeCategory`] | drop `Redundant` articles |
//! | otherwise | [`Strategy::Unchanged`] | nothing |
//!
//! The rule is evaluated once per selection; a reduced graph is never fed
//! back into it. The selected article survives every strategy.

use crate::metrics::{metrics, SubgraphMetrics};
use crate::{ArticleGraph, ArticleId, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Thresholds for the simplification rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Neighborhoods with more edges than this are reduced.
    pub edge_limit: usize,
    /// Above this (display-rounded) density, weak edges are dropped;
    /// at or below it, redundant articles are.
    pub density_limit: f64,
    /// Minimum weight an edge needs to survive edge-threshold pruning.
    pub weight_threshold: f64,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            edge_limit: 50,
            density_limit: 0.5,
            weight_threshold: 0.8,
        }
    }
}

/// Which reduction was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The neighborhood was small enough.
    Unchanged,
    /// Edges below the weight threshold were removed.
    EdgeThreshold,
    /// Articles in the `Redundant` category were removed.
    NodeCategory,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unchanged => "unchanged",
            Self::EdgeThreshold => "edge-threshold",
            Self::NodeCategory => "node-category",
        })
    }
}

/// Apply the decision rule to a neighborhood's metrics.
///
/// Uses the display-rounded density, so a neighborhood reported as `0.5`
/// is treated as sparse.
#[must_use]
pub fn choose_strategy(m: &SubgraphMetrics, config: &SimplifyConfig) -> Strategy {
    if m.edge_count > config.edge_limit && m.density > config.density_limit {
        Strategy::EdgeThreshold
    } else if m.edge_count > config.edge_limit {
        Strategy::NodeCategory
    } else {
        Strategy::Unchanged
    }
}

fn require_target(graph: &ArticleGraph, target: &ArticleId) -> Result<()> {
    if graph.contains(target) {
        Ok(())
    } else {
        Err(Error::ArticleNotFound(target.0.clone()))
    }
}

/// Keep every article, and only the edges weighing at least `threshold`.
///
/// `target` may end up isolated but is never removed.
///
/// # Errors
///
/// - `MissingAttribute` if any edge has no weight.
/// - `ArticleNotFound` if `target` is not in `graph`.
pub fn prune_edges(
    graph: &ArticleGraph,
    target: &ArticleId,
    threshold: f64,
) -> Result<ArticleGraph> {
    require_target(graph, target)?;
    graph.try_filter_similarities(|a, b, sim| {
        let weight = sim
            .weight
            .ok_or_else(|| Error::missing_on_edge(&a.id, &b.id, "weight"))?;
        Ok(weight >= threshold)
    })
}

/// Drop every article categorized `Redundant`, except `target`.
///
/// Edges touching a dropped article go with it.
///
/// # Errors
///
/// - `MissingAttribute` if any article has no category.
/// - `ArticleNotFound` if `target` is not in `graph`.
pub fn prune_nodes(graph: &ArticleGraph, target: &ArticleId) -> Result<ArticleGraph> {
    require_target(graph, target)?;
    let mut keep = Vec::with_capacity(graph.article_count());
    for article in graph.articles() {
        let redundant = article
            .is_redundant()
            .ok_or_else(|| Error::missing_on_node(&article.id, "category"))?;
        if !redundant || article.id == *target {
            keep.push(&article.id);
        }
    }
    Ok(graph.induced_subgraph(keep))
}

/// Outcome of [`simplify`].
#[derive(Debug, Clone)]
pub struct Simplified {
    /// The graph to display.
    pub graph: ArticleGraph,
    /// What was done to get it.
    pub strategy: Strategy,
    /// Metrics of the input, on which the decision was made.
    pub input_metrics: SubgraphMetrics,
}

impl Simplified {
    /// Edge-threshold pruning fired.
    pub fn edges_removed(&self) -> bool {
        self.strategy == Strategy::EdgeThreshold
    }

    /// Node-category pruning fired.
    pub fn nodes_removed(&self) -> bool {
        self.strategy == Strategy::NodeCategory
    }
}

/// Run the decision rule once and apply the chosen reduction.
///
/// The input is never modified; when no reduction applies the output is a
/// copy of it.
pub fn simplify(
    graph: &ArticleGraph,
    target: &ArticleId,
    config: &SimplifyConfig,
) -> Result<Simplified> {
    require_target(graph, target)?;
    let input_metrics = metrics(graph);
    let strategy = choose_strategy(&input_metrics, config);

    let reduced = match strategy {
        Strategy::EdgeThreshold => prune_edges(graph, target, config.weight_threshold)?,
        Strategy::NodeCategory => prune_nodes(graph, target)?,
        Strategy::Unchanged => graph.clone(),
    };

    tracing::debug!(
        article = %target,
        %strategy,
        edges_before = input_metrics.edge_count,
        density_before = input_metrics.density,
        articles_after = reduced.article_count(),
        edges_after = reduced.similarity_count(),
        "simplified neighborhood"
    );

    Ok(Simplified {
        graph: reduced,
        strategy,
        input_metrics,
    })
}
