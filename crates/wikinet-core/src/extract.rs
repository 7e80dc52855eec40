//! Neighborhood extraction.

use crate::algo::components::node_connected_component;
use crate::{ArticleGraph, ArticleId, Result};

/// The connected component around `target` as an induced subgraph.
///
/// The result is an independent copy carrying every article and edge
/// attribute of the component. It always contains `target` and is always
/// connected.
///
/// # Errors
///
/// [`Error::ArticleNotFound`](crate::Error::ArticleNotFound) when `target`
/// is not in `graph`.
///
/// # Example
///
/// ```
/// use wikinet_core::{extract, Article, ArticleGraph, Similarity};
///
/// let mut g = ArticleGraph::new();
/// for id in ["a", "b", "c", "z"] {
///     g.add_article(Article::new(id))?;
/// }
/// g.add_similarity("a", "b", Similarity::new(0.9))?;
/// g.add_similarity("b", "c", Similarity::new(0.4))?;
///
/// let hood = extract(&g, &"a".into())?;
/// assert_eq!(hood.article_count(), 3);
/// assert!(!hood.contains(&"z".into()));
/// # Ok::<(), wikinet_core::Error>(())
/// ```
pub fn extract(graph: &ArticleGraph, target: &ArticleId) -> Result<ArticleGraph> {
    let component = node_connected_component(graph, target)?;
    let subgraph = graph.induced_subgraph(&component);
    tracing::debug!(
        article = %target,
        articles = subgraph.article_count(),
        similarities = subgraph.similarity_count(),
        "extracted neighborhood"
    );
    Ok(subgraph)
}
