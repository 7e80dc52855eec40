//! Session-wide, read-only graph store.
//!
//! The graph is loaded once at process start and shared by reference for
//! the rest of the session. Dataset-wide thresholds (popularity quartiles,
//! centrality bands) are computed in [`GraphStore::new`] and never again.

use crate::pipeline::{explore, Exploration};
use crate::popularity::{BandThreshold, CentralityBand, PopularityScale};
use crate::simplify::SimplifyConfig;
use crate::{Article, ArticleGraph, ArticleId, Error, Popularity, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

static GLOBAL: OnceLock<GraphStore> = OnceLock::new();

/// Immutable graph plus its frozen dataset-wide thresholds.
#[derive(Debug)]
pub struct GraphStore {
    graph: ArticleGraph,
    config: SimplifyConfig,
    popularity: Option<PopularityScale>,
    degree_band: Option<BandThreshold>,
    betweenness_band: Option<BandThreshold>,
}

/// What the article page shows about one article.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleProfile {
    /// Article id.
    pub id: ArticleId,
    /// Title, or the id when untitled.
    pub title: String,
    /// Topic label.
    pub topic: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Popularity band.
    pub popularity: Option<Popularity>,
    /// Direct neighbours in the full graph.
    pub neighbours: usize,
    /// Global degree centrality band.
    pub degree_band: Option<CentralityBand>,
    /// Global betweenness centrality band.
    pub betweenness_band: Option<CentralityBand>,
    /// Intro paragraph.
    pub intro: Option<String>,
    /// Full text.
    pub content: Option<String>,
}

/// Attribute filter over the article set. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Required topic.
    pub topic: Option<String>,
    /// Required popularity band.
    pub popularity: Option<Popularity>,
    /// Required category.
    pub category: Option<String>,
}

impl ArticleFilter {
    /// Match everything.
    pub fn any() -> Self {
        Self::default()
    }

    /// Require a topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Require a popularity band.
    pub fn with_popularity(mut self, popularity: Popularity) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Require a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl GraphStore {
    /// Wrap a loaded graph, computing dataset-wide thresholds.
    pub fn new(graph: ArticleGraph) -> Self {
        Self::with_config(graph, SimplifyConfig::default())
    }

    /// Like [`new`](Self::new) with non-default simplification thresholds.
    pub fn with_config(graph: ArticleGraph, config: SimplifyConfig) -> Self {
        let popularity = PopularityScale::from_views(graph.articles().filter_map(|a| a.views));
        let degree_band = BandThreshold::upper_quartile(graph.articles().filter_map(|a| a.degree));
        let betweenness_band =
            BandThreshold::upper_quartile(graph.articles().filter_map(|a| a.betweenness));

        tracing::info!(
            articles = graph.article_count(),
            similarities = graph.similarity_count(),
            has_views = popularity.is_some(),
            "graph store ready"
        );

        Self {
            graph,
            config,
            popularity,
            degree_band,
            betweenness_band,
        }
    }

    /// Install `store` as the process-wide instance.
    ///
    /// # Errors
    ///
    /// `StoreAlreadyInitialized` on any call after the first.
    pub fn init(store: GraphStore) -> Result<&'static GraphStore> {
        GLOBAL
            .set(store)
            .map_err(|_| Error::StoreAlreadyInitialized)?;
        Self::global()
    }

    /// The process-wide instance.
    ///
    /// # Errors
    ///
    /// `StoreNotInitialized` before [`init`](Self::init).
    pub fn global() -> Result<&'static GraphStore> {
        GLOBAL.get().ok_or(Error::StoreNotInitialized)
    }

    /// The underlying graph.
    pub fn graph(&self) -> &ArticleGraph {
        &self.graph
    }

    /// Simplification thresholds used by [`explore`](Self::explore).
    pub fn config(&self) -> &SimplifyConfig {
        &self.config
    }

    /// Frozen popularity quartiles, when the dataset carries view counts.
    pub fn popularity_scale(&self) -> Option<&PopularityScale> {
        self.popularity.as_ref()
    }

    fn article(&self, id: &ArticleId) -> Result<&Article> {
        self.graph
            .article(id)
            .ok_or_else(|| Error::ArticleNotFound(id.0.clone()))
    }

    /// Popularity band of an article.
    ///
    /// An explicit band on the article wins; otherwise its view count is
    /// classified against the frozen dataset quartiles.
    pub fn popularity(&self, id: &ArticleId) -> Result<Option<Popularity>> {
        Ok(self.popularity_of(self.article(id)?))
    }

    /// Same as [`popularity`](Self::popularity) for an article already in hand.
    pub fn popularity_of(&self, article: &Article) -> Option<Popularity> {
        article.popularity.or_else(|| {
            let scale = self.popularity.as_ref()?;
            article.views.map(|v| scale.classify(v))
        })
    }

    /// Article page data.
    pub fn profile(&self, id: &ArticleId) -> Result<ArticleProfile> {
        let article = self.article(id)?;
        Ok(ArticleProfile {
            id: article.id.clone(),
            title: article.label().to_string(),
            topic: article.topic.clone(),
            category: article.category.clone(),
            popularity: self.popularity_of(article),
            neighbours: self.graph.degree(id),
            degree_band: self
                .degree_band
                .zip(article.degree)
                .map(|(t, v)| t.band(v)),
            betweenness_band: self
                .betweenness_band
                .zip(article.betweenness)
                .map(|(t, v)| t.band(v)),
            intro: article.intro.clone(),
            content: article.content.clone(),
        })
    }

    /// Articles matching every set field of `filter`, in graph order.
    pub fn filter(&self, filter: &ArticleFilter) -> Vec<&Article> {
        self.graph
            .articles()
            .filter(|a| {
                filter
                    .topic
                    .as_ref()
                    .map_or(true, |t| a.topic.as_ref() == Some(t))
            })
            .filter(|a| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |c| a.category.as_ref() == Some(c))
            })
            .filter(|a| {
                filter
                    .popularity
                    .map_or(true, |p| self.popularity_of(a) == Some(p))
            })
            .collect()
    }

    /// Distinct topics, sorted.
    pub fn topics(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .graph
            .articles()
            .filter_map(|a| a.topic.as_deref())
            .collect();
        set.into_iter().collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .graph
            .articles()
            .filter_map(|a| a.category.as_deref())
            .collect();
        set.into_iter().collect()
    }

    /// Run the selection pipeline for one article.
    pub fn explore(&self, id: &ArticleId) -> Result<Exploration> {
        explore(&self.graph, id, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Similarity;

    fn store() -> GraphStore {
        let mut g = ArticleGraph::new();
        let rows = [
            ("1", "Crafts", "Core", 100, 0.10),
            ("2", "Crafts", "Redundant", 400, 0.20),
            ("3", "Cooking", "Core", 700, 0.30),
            ("4", "Cooking", "Core", 1000, 0.40),
        ];
        for (id, topic, category, views, degree) in rows {
            g.add_article(
                Article::new(id)
                    .with_title(format!("Article {id}"))
                    .with_topic(topic)
                    .with_category(category)
                    .with_views(views)
                    .with_centrality(degree, degree / 10.0),
            )
            .unwrap();
        }
        g.add_similarity("1", "2", Similarity::new(0.9)).unwrap();
        g.add_similarity("2", "3", Similarity::new(0.9)).unwrap();
        GraphStore::new(g)
    }

    #[test]
    fn test_popularity_from_frozen_scale() {
        let s = store();
        assert_eq!(s.popularity(&"1".into()).unwrap(), Some(Popularity::Low));
        assert_eq!(s.popularity(&"4".into()).unwrap(), Some(Popularity::VeryHigh));
        assert!(s.popularity(&"9".into()).is_err());
    }

    #[test]
    fn test_explicit_popularity_wins() {
        let mut g = ArticleGraph::new();
        g.add_article(Article::new("a").with_views(1)).unwrap();
        g.add_article(
            Article::new("b")
                .with_views(1)
                .with_popularity(Popularity::High),
        )
        .unwrap();
        let s = GraphStore::new(g);
        assert_eq!(s.popularity(&"b".into()).unwrap(), Some(Popularity::High));
        assert_eq!(s.popularity(&"a".into()).unwrap(), Some(Popularity::Low));
    }

    #[test]
    fn test_filter_is_stable_across_subsets() {
        let s = store();
        let cooking = s.filter(&ArticleFilter::any().with_topic("Cooking"));
        assert_eq!(cooking.len(), 2);

        // Band of "3" comes from the whole dataset, not from the Cooking subset.
        let high = s.filter(
            &ArticleFilter::any()
                .with_topic("Cooking")
                .with_popularity(Popularity::High),
        );
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].id, ArticleId::from("3"));
    }

    #[test]
    fn test_filter_by_category() {
        let s = store();
        let redundant = s.filter(&ArticleFilter::any().with_category("Redundant"));
        assert_eq!(redundant.len(), 1);
        assert_eq!(s.filter(&ArticleFilter::any()).len(), 4);
    }

    #[test]
    fn test_profile() {
        let s = store();
        let p = s.profile(&"4".into()).unwrap();
        assert_eq!(p.title, "Article 4");
        assert_eq!(p.neighbours, 0);
        // upper quartile of degree = 0.325
        assert_eq!(p.degree_band, Some(CentralityBand::High));
        let p = s.profile(&"2".into()).unwrap();
        assert_eq!(p.neighbours, 2);
        assert_eq!(p.degree_band, Some(CentralityBand::Low));
    }

    #[test]
    fn test_topics_and_categories() {
        let s = store();
        assert_eq!(s.topics(), vec!["Cooking", "Crafts"]);
        assert_eq!(s.categories(), vec!["Core", "Redundant"]);
    }

    #[test]
    fn test_explore_through_store() {
        let s = store();
        let e = s.explore(&"2".into()).unwrap();
        assert_eq!(e.displayed.node_count, 3);
        assert_eq!(e.local_degree_centrality, 1.0);
    }
}
