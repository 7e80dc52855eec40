use crate::{Article, ArticleId, Error, Result, Similarity};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
#[cfg(feature = "binary")]
use std::fs::File;
#[cfg(feature = "binary")]
use std::io::{BufReader, BufWriter};
#[cfg(feature = "binary")]
use std::path::Path;

/// An undirected article-similarity graph.
///
/// Uses petgraph's undirected graph internally. Maintains an id index for
/// O(1) article lookup. The graph is simple: no self-loops, at most one
/// edge per article pair.
///
/// Derived graphs ([`induced_subgraph`](Self::induced_subgraph),
/// [`try_filter_similarities`](Self::try_filter_similarities)) are always
/// fresh copies; nothing here mutates a graph after it has been shared.
///
/// # Example
///
/// ```rust
/// use wikinet_core::{Article, ArticleGraph, Similarity};
///
/// let mut g = ArticleGraph::new();
/// g.add_article(Article::new("a").with_title("How to Knit"))?;
/// g.add_article(Article::new("b").with_title("How to Crochet"))?;
/// g.add_similarity("a", "b", Similarity::new(0.92))?;
///
/// assert_eq!(g.article_count(), 2);
/// assert_eq!(g.similarity_count(), 1);
/// # Ok::<(), wikinet_core::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawArticleGraph")]
pub struct ArticleGraph {
    /// The underlying undirected graph.
    graph: UnGraph<Article, Similarity>,

    /// Map from article ID to node index.
    #[serde(skip)]
    index: HashMap<ArticleId, NodeIndex>,
}

#[derive(Deserialize)]
struct RawArticleGraph {
    graph: UnGraph<Article, Similarity>,
}

impl TryFrom<RawArticleGraph> for ArticleGraph {
    type Error = Error;

    /// Replays every article and edge through the checked insertion path.
    fn try_from(raw: RawArticleGraph) -> Result<Self> {
        let raw = raw.graph;
        let mut g = Self::with_capacity(raw.node_count(), raw.edge_count());
        for article in raw.node_weights() {
            g.add_article(article.clone())?;
        }
        for edge in raw.edge_references() {
            let a = &raw[edge.source()].id;
            let b = &raw[edge.target()].id;
            if g.has_similarity(a, b) {
                return Err(Error::InvalidData(format!(
                    "parallel edge between {a} and {b}"
                )));
            }
            g.add_similarity(a, b, *edge.weight())?;
        }
        Ok(g)
    }
}

impl Default for ArticleGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            index: HashMap::new(),
        }
    }

    /// Create a graph with estimated capacity.
    pub fn with_capacity(articles: usize, similarities: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(articles, similarities),
            index: HashMap::with_capacity(articles),
        }
    }

    /// Load from binary file (bincode).
    #[cfg(feature = "binary")]
    pub fn from_binary_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        crate::formats::Binary::read(BufReader::new(file))
    }

    /// Save to binary file (bincode).
    #[cfg(feature = "binary")]
    pub fn to_binary_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        crate::formats::Binary::write(self, BufWriter::new(file))
    }

    /// Add an article. Ids must be unique.
    pub fn add_article(&mut self, article: Article) -> Result<NodeIndex> {
        if self.index.contains_key(&article.id) {
            return Err(Error::DuplicateArticle(article.id.0));
        }
        let id = article.id.clone();
        let idx = self.graph.add_node(article);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Connect two existing articles.
    ///
    /// Re-adding an existing pair replaces its attributes, so the graph
    /// stays simple.
    pub fn add_similarity(
        &mut self,
        a: impl Into<ArticleId>,
        b: impl Into<ArticleId>,
        similarity: Similarity,
    ) -> Result<()> {
        let a = a.into();
        let b = b.into();
        if a == b {
            return Err(Error::SelfLoop(a.0));
        }
        let a_idx = self.require(&a)?;
        let b_idx = self.require(&b)?;
        self.graph.update_edge(a_idx, b_idx, similarity);
        Ok(())
    }

    fn require(&self, id: &ArticleId) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::ArticleNotFound(id.0.clone()))
    }

    /// Get an article by ID.
    pub fn article(&self, id: &ArticleId) -> Option<&Article> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Get the article stored at a node index.
    pub fn article_at(&self, idx: NodeIndex) -> &Article {
        &self.graph[idx]
    }

    /// Whether the article is part of the graph.
    pub fn contains(&self, id: &ArticleId) -> bool {
        self.index.contains_key(id)
    }

    /// Get node index for an article.
    pub fn node_index(&self, id: &ArticleId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Neighbors of an article. O(d).
    pub fn neighbors(&self, id: &ArticleId) -> Vec<&Article> {
        match self.index.get(id) {
            Some(&idx) => self.graph.neighbors(idx).map(|n| &self.graph[n]).collect(),
            None => vec![],
        }
    }

    /// Degree of an article (0 if absent). O(d).
    pub fn degree(&self, id: &ArticleId) -> usize {
        match self.index.get(id) {
            Some(&idx) => self.graph.neighbors(idx).count(),
            None => 0,
        }
    }

    /// Whether an edge joins the two articles.
    pub fn has_similarity(&self, a: &ArticleId, b: &ArticleId) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        self.graph.find_edge(a, b).is_some()
    }

    /// Weight of the edge joining the two articles, if any.
    pub fn weight_between(&self, a: &ArticleId, b: &ArticleId) -> Option<f64> {
        let (&a, &b) = (self.index.get(a)?, self.index.get(b)?);
        let edge = self.graph.find_edge(a, b)?;
        self.graph[edge].weight
    }

    /// Number of articles.
    pub fn article_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of similarity edges.
    pub fn similarity_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no articles.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterate over all articles in insertion order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.graph.node_weights()
    }

    /// Iterate over all edges as `(endpoint, endpoint, attributes)`.
    pub fn similarities(&self) -> impl Iterator<Item = (&ArticleId, &ArticleId, &Similarity)> {
        self.graph.edge_references().map(|e| {
            (
                &self.graph[e.source()].id,
                &self.graph[e.target()].id,
                e.weight(),
            )
        })
    }

    /// Set of article ids.
    pub fn article_ids(&self) -> BTreeSet<ArticleId> {
        self.graph.node_weights().map(|a| a.id.clone()).collect()
    }

    /// Set of edges as ordered id pairs (smaller id first).
    pub fn similarity_keys(&self) -> BTreeSet<(ArticleId, ArticleId)> {
        self.similarities()
            .map(|(a, b, _)| {
                if a <= b {
                    (a.clone(), b.clone())
                } else {
                    (b.clone(), a.clone())
                }
            })
            .collect()
    }

    /// Edge density: `2|E| / (|V|(|V|-1))`, 0 for fewer than two articles.
    pub fn density(&self) -> f64 {
        let n = self.article_count();
        if n <= 1 {
            return 0.0;
        }
        let m = self.similarity_count() as f64;
        2.0 * m / (n as f64 * (n - 1) as f64)
    }

    /// Get the underlying petgraph for advanced operations.
    pub fn as_petgraph(&self) -> &UnGraph<Article, Similarity> {
        &self.graph
    }

    /// Induced subgraph over the given ids.
    ///
    /// Contains exactly those articles (unknown ids are ignored) and every
    /// edge of `self` between them. Articles keep the relative order they
    /// have in `self`.
    pub fn induced_subgraph<'a, I>(&self, ids: I) -> ArticleGraph
    where
        I: IntoIterator<Item = &'a ArticleId>,
    {
        let keep: HashSet<NodeIndex> = ids
            .into_iter()
            .filter_map(|id| self.index.get(id).copied())
            .collect();
        let (mut out, mapping) = self.copy_articles(|idx| keep.contains(&idx));
        for edge in self.graph.edge_references() {
            if let (Some(&s), Some(&t)) = (mapping.get(&edge.source()), mapping.get(&edge.target()))
            {
                out.graph.add_edge(s, t, *edge.weight());
            }
        }
        out
    }

    /// Copy of the graph with every article and only the edges for which
    /// `keep` returns `true`.
    ///
    /// The first error returned by `keep` aborts the copy.
    pub fn try_filter_similarities<F>(&self, mut keep: F) -> Result<ArticleGraph>
    where
        F: FnMut(&Article, &Article, &Similarity) -> Result<bool>,
    {
        let (mut out, mapping) = self.copy_articles(|_| true);
        for edge in self.graph.edge_references() {
            let (s, t) = (mapping[&edge.source()], mapping[&edge.target()]);
            if keep(&self.graph[edge.source()], &self.graph[edge.target()], edge.weight())? {
                out.graph.add_edge(s, t, *edge.weight());
            }
        }
        Ok(out)
    }

    /// Edge-free copy of the selected articles, with the old-to-new index map.
    fn copy_articles<N>(&self, mut keep: N) -> (ArticleGraph, HashMap<NodeIndex, NodeIndex>)
    where
        N: FnMut(NodeIndex) -> bool,
    {
        let mut out = ArticleGraph::with_capacity(self.article_count(), self.similarity_count());
        let mut mapping: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        for idx in self.graph.node_indices() {
            if keep(idx) {
                let article = self.graph[idx].clone();
                let id = article.id.clone();
                let new_idx = out.graph.add_node(article);
                out.index.insert(id, new_idx);
                mapping.insert(idx, new_idx);
            }
        }

        (out, mapping)
    }
}

/// Statistics about an article graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleGraphStats {
    /// Number of articles.
    pub article_count: usize,
    /// Number of similarity edges.
    pub similarity_count: usize,
    /// Edge density.
    pub density: f64,
    /// Average degree.
    pub avg_degree: f64,
    /// Articles with no edges.
    pub isolated_count: usize,
    /// Edges lacking a weight attribute.
    pub unweighted_count: usize,
}

impl ArticleGraph {
    /// Compute statistics about the graph.
    pub fn stats(&self) -> ArticleGraphStats {
        let article_count = self.article_count();
        let similarity_count = self.similarity_count();

        let avg_degree = if article_count > 0 {
            2.0 * similarity_count as f64 / article_count as f64
        } else {
            0.0
        };
        let isolated_count = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .count();
        let unweighted_count = self
            .graph
            .edge_weights()
            .filter(|s| s.weight.is_none())
            .count();

        ArticleGraphStats {
            article_count,
            similarity_count,
            density: self.density(),
            avg_degree,
            isolated_count,
            unweighted_count,
        }
    }
}
