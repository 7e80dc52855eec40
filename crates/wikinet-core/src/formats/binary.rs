//! Compact bincode snapshot.
//!
//! bincode is not self-describing, so the snapshot uses flat records with
//! every optional field written explicitly instead of the JSON-oriented
//! serde layout of [`Article`].

use crate::{Article, ArticleGraph, ArticleId, Error, Popularity, Result, Similarity};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Serialize, Deserialize)]
struct ArticleRow {
    id: String,
    title: Option<String>,
    topic: Option<String>,
    category: Option<String>,
    views: Option<u64>,
    popularity: Option<String>,
    degree: Option<f64>,
    betweenness: Option<f64>,
    intro: Option<String>,
    content: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    articles: Vec<ArticleRow>,
    similarities: Vec<(String, String, Option<f64>)>,
}

fn invalid(e: bincode::Error) -> Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e).into()
}

/// bincode format handler.
pub struct Binary;

impl Binary {
    /// Read a snapshot.
    pub fn read<R: Read>(reader: R) -> Result<ArticleGraph> {
        let snapshot: Snapshot = bincode::deserialize_from(reader).map_err(invalid)?;

        let mut graph =
            ArticleGraph::with_capacity(snapshot.articles.len(), snapshot.similarities.len());
        for row in snapshot.articles {
            let popularity = row
                .popularity
                .as_deref()
                .map(str::parse::<Popularity>)
                .transpose()
                .map_err(Error::InvalidData)?;
            graph.add_article(Article {
                id: ArticleId(row.id),
                title: row.title,
                topic: row.topic,
                category: row.category,
                views: row.views,
                popularity,
                degree: row.degree,
                betweenness: row.betweenness,
                intro: row.intro,
                content: row.content,
            })?;
        }
        for (a, b, weight) in snapshot.similarities {
            graph.add_similarity(a, b, Similarity { weight })?;
        }
        Ok(graph)
    }

    /// Write a snapshot.
    pub fn write<W: Write>(graph: &ArticleGraph, mut writer: W) -> Result<()> {
        let snapshot = Snapshot {
            articles: graph
                .articles()
                .map(|a| ArticleRow {
                    id: a.id.0.clone(),
                    title: a.title.clone(),
                    topic: a.topic.clone(),
                    category: a.category.clone(),
                    views: a.views,
                    popularity: a.popularity.map(|p| p.as_str().to_string()),
                    degree: a.degree,
                    betweenness: a.betweenness,
                    intro: a.intro.clone(),
                    content: a.content.clone(),
                })
                .collect(),
            similarities: graph
                .similarities()
                .map(|(a, b, sim)| (a.0.clone(), b.0.clone(), sim.weight))
                .collect(),
        };
        bincode::serialize_into(&mut writer, &snapshot).map_err(invalid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_keeps_missing_attributes() {
        let mut g = ArticleGraph::new();
        g.add_article(
            Article::new("1")
                .with_title("How to Knit")
                .with_category("Core")
                .with_popularity(Popularity::VeryHigh),
        )
        .unwrap();
        g.add_article(Article::new("2")).unwrap();
        g.add_article(Article::new("3")).unwrap();
        g.add_similarity("1", "2", Similarity::new(0.7)).unwrap();
        g.add_similarity("2", "3", Similarity::unweighted()).unwrap();

        let mut buf = Vec::new();
        Binary::write(&g, &mut buf).unwrap();
        let back = Binary::read(buf.as_slice()).unwrap();

        assert_eq!(back.similarity_keys(), g.similarity_keys());
        assert_eq!(back.weight_between(&"1".into(), &"2".into()), Some(0.7));
        assert_eq!(back.weight_between(&"2".into(), &"3".into()), None);
        let knit = back.article(&"1".into()).unwrap();
        assert_eq!(knit.popularity, Some(Popularity::VeryHigh));
        assert_eq!(back.article(&"2".into()).unwrap().category, None);
    }

    #[test]
    fn test_garbage_is_invalid_data() {
        let err = Binary::read(&[0xff_u8, 0xff, 0xff][..]).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
