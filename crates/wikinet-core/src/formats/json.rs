//! NetworkX node-link JSON.
//!
//! The layout produced by `networkx.node_link_data`:
//!
//! ```json
//! {
//!   "directed": false,
//!   "multigraph": false,
//!   "graph": {},
//!   "nodes": [{"id": 1, "title": "How to Knit", "category": "Core"}],
//!   "links": [{"source": 1, "target": 2, "weight": 0.91}]
//! }
//! ```
//!
//! Newer NetworkX releases name the edge list `edges`; both are accepted.
//! Node attributes map onto [`Article`] fields; unknown keys are ignored.

use crate::{Article, ArticleGraph, ArticleId, Error, Result, Similarity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};

/// One edge of a node-link document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    /// One endpoint.
    pub source: ArticleId,
    /// The other endpoint.
    pub target: ArticleId,
    /// Similarity score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// A node-link document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLinkDocument {
    /// Must be `false`: the similarity graph is undirected.
    #[serde(default)]
    pub directed: bool,
    /// Must be `false`: the similarity graph is simple.
    #[serde(default)]
    pub multigraph: bool,
    /// Graph-level attributes.
    #[serde(default)]
    pub graph: HashMap<String, serde_json::Value>,
    /// Articles.
    pub nodes: Vec<Article>,
    /// Similarity edges.
    #[serde(alias = "edges")]
    pub links: Vec<NodeLinkEdge>,
}

impl NodeLinkDocument {
    /// Snapshot of a graph.
    pub fn from_graph(graph: &ArticleGraph) -> Self {
        Self {
            directed: false,
            multigraph: false,
            graph: HashMap::new(),
            nodes: graph.articles().cloned().collect(),
            links: graph
                .similarities()
                .map(|(a, b, sim)| NodeLinkEdge {
                    source: a.clone(),
                    target: b.clone(),
                    weight: sim.weight,
                })
                .collect(),
        }
    }

    /// Build the graph described by this document.
    ///
    /// # Errors
    ///
    /// `InvalidData` for directed or multigraph documents; duplicate ids,
    /// self-loops and dangling edge endpoints are reported as such.
    pub fn into_graph(self) -> Result<ArticleGraph> {
        if self.directed {
            return Err(Error::InvalidData(
                "node-link document is directed; expected an undirected graph".into(),
            ));
        }
        if self.multigraph {
            return Err(Error::InvalidData(
                "node-link document is a multigraph; expected a simple graph".into(),
            ));
        }

        let mut graph = ArticleGraph::with_capacity(self.nodes.len(), self.links.len());
        for article in self.nodes {
            graph.add_article(article)?;
        }
        for edge in self.links {
            graph.add_similarity(
                edge.source,
                edge.target,
                Similarity {
                    weight: edge.weight,
                },
            )?;
        }
        Ok(graph)
    }
}

/// Node-link JSON format handler.
pub struct NodeLink;

impl NodeLink {
    /// Parse a graph from node-link JSON.
    pub fn read<R: Read>(reader: R) -> Result<ArticleGraph> {
        let doc: NodeLinkDocument = serde_json::from_reader(reader)?;
        doc.into_graph()
    }

    /// Parse a graph from a node-link JSON string.
    pub fn from_str(s: &str) -> Result<ArticleGraph> {
        let doc: NodeLinkDocument = serde_json::from_str(s)?;
        doc.into_graph()
    }

    /// Write a graph as pretty-printed node-link JSON.
    pub fn write<W: Write>(graph: &ArticleGraph, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &NodeLinkDocument::from_graph(graph))?;
        Ok(())
    }

    /// Serialize a graph to a node-link JSON string.
    pub fn to_string(graph: &ArticleGraph) -> Result<String> {
        Ok(serde_json::to_string_pretty(&NodeLinkDocument::from_graph(
            graph,
        ))?)
    }
}
