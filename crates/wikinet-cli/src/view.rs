//! vis-network rendering of an exploration.
//!
//! The core pipeline never marks the selected article; highlighting is
//! applied here, on the way out.

use serde::Serialize;
use wikinet_core::{Article, Exploration, GraphStore, Popularity};

const TARGET_COLOR: &str = "#FFD700";
const TARGET_SHAPE: &str = "star";
const TARGET_SIZE: u32 = 30;
const TARGET_BORDER_WIDTH: u32 = 3;

/// One vis-network node.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisNode {
    pub id: String,
    pub label: String,
    /// Hover text.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

/// One vis-network edge.
#[derive(Debug, Serialize)]
pub struct VisEdge {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Document handed to the front end.
#[derive(Debug, Serialize)]
pub struct View<'a> {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub exploration: &'a Exploration,
}

fn hover_text(article: &Article, popularity: Option<Popularity>) -> String {
    let field = |v: Option<&str>| v.unwrap_or("-").to_string();
    format!(
        "Title: {}\nTopic: {}\nCategory: {}\nPopularity: {}",
        article.label(),
        field(article.topic.as_deref()),
        field(article.category.as_deref()),
        popularity.map_or_else(|| "-".to_string(), |p| p.to_string()),
    )
}

impl<'a> View<'a> {
    /// Popularity in the hover text comes from `store`, so articles that
    /// only carry view counts show their dataset quartile band.
    pub fn new(exploration: &'a Exploration, store: &GraphStore) -> Self {
        let nodes = exploration
            .subgraph
            .articles()
            .map(|a| {
                let is_target = a.id == exploration.target;
                VisNode {
                    id: a.id.to_string(),
                    label: a.label().to_string(),
                    title: hover_text(a, store.popularity_of(a)),
                    group: a.topic.clone(),
                    color: is_target.then_some(TARGET_COLOR),
                    shape: is_target.then_some(TARGET_SHAPE),
                    size: is_target.then_some(TARGET_SIZE),
                    border_width: is_target.then_some(TARGET_BORDER_WIDTH),
                }
            })
            .collect();

        let edges = exploration
            .subgraph
            .similarities()
            .map(|(a, b, sim)| VisEdge {
                from: a.to_string(),
                to: b.to_string(),
                value: sim.weight,
                title: sim.weight.map(|w| format!("similarity {w:.2}")),
            })
            .collect();

        Self {
            nodes,
            edges,
            notice: exploration.notice(),
            exploration,
        }
    }
}
