//! CSV format support.
//!
//! Two files describe a graph:
//!
//! - an article table with a header row. Recognized columns are
//!   `Article_Id`, `Title`, `Topic`, `Category`, `Views`, `Popularity`,
//!   `Degree`, `Betweenness`, `Intro` and `Article Content`; only
//!   `Article_Id` is required, other columns are ignored.
//! - a headerless edge list: `source,target[,weight]`.

use crate::{Article, ArticleGraph, ArticleId, Error, Popularity, Result, Similarity};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ArticleRecord {
    /// Kept verbatim so it matches the raw text of the edge list.
    #[serde(rename = "Article_Id", alias = "id")]
    id: String,
    #[serde(rename = "Title", alias = "title", default)]
    title: Option<String>,
    #[serde(rename = "Topic", alias = "topic", default)]
    topic: Option<String>,
    #[serde(rename = "Category", alias = "category", default)]
    category: Option<String>,
    #[serde(rename = "Views", alias = "views", default)]
    views: Option<u64>,
    #[serde(rename = "Popularity", alias = "popularity", default)]
    popularity: Option<Popularity>,
    #[serde(rename = "Degree", alias = "degree", default)]
    degree: Option<f64>,
    #[serde(rename = "Betweenness", alias = "betweenness", default)]
    betweenness: Option<f64>,
    #[serde(rename = "Intro", alias = "intro", default)]
    intro: Option<String>,
    #[serde(rename = "Article Content", alias = "content", default)]
    content: Option<String>,
}

impl From<ArticleRecord> for Article {
    fn from(r: ArticleRecord) -> Self {
        Self {
            id: ArticleId(r.id),
            title: r.title,
            topic: r.topic,
            category: r.category,
            views: r.views,
            popularity: r.popularity,
            degree: r.degree,
            betweenness: r.betweenness,
            intro: r.intro,
            content: r.content,
        }
    }
}

/// CSV format handler.
pub struct Csv;

impl Csv {
    /// Read the article table.
    pub fn read_articles<R: Read>(reader: R) -> Result<Vec<Article>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut articles = Vec::new();
        for record in reader.deserialize::<ArticleRecord>() {
            articles.push(record?.into());
        }
        Ok(articles)
    }

    /// Read the edge list.
    ///
    /// Two columns give an edge with no weight; a third non-empty column
    /// must parse as a float. Rows with fewer than two columns are an
    /// error.
    pub fn read_edges<R: Read>(reader: R) -> Result<Vec<(ArticleId, ArticleId, Similarity)>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut edges = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result?;
            let (Some(s), Some(t)) = (record.get(0), record.get(1)) else {
                return Err(Error::InvalidData(format!(
                    "edge row {} has {} column(s), expected source,target[,weight]",
                    line + 1,
                    record.len()
                )));
            };
            let weight = match record.get(2).filter(|w| !w.is_empty()) {
                Some(w) => Some(w.parse::<f64>().map_err(|e| {
                    Error::InvalidData(format!("edge row {}: bad weight {w:?}: {e}", line + 1))
                })?),
                None => None,
            };
            edges.push((ArticleId::from(s), ArticleId::from(t), Similarity { weight }));
        }
        Ok(edges)
    }

    /// Build a graph from an article table and an edge list.
    pub fn read<A: Read, E: Read>(articles: A, edges: E) -> Result<ArticleGraph> {
        let articles = Self::read_articles(articles)?;
        let edges = Self::read_edges(edges)?;

        let mut graph = ArticleGraph::with_capacity(articles.len(), edges.len());
        for article in articles {
            graph.add_article(article)?;
        }
        for (s, t, sim) in edges {
            graph.add_similarity(s, t, sim)?;
        }
        Ok(graph)
    }
}
