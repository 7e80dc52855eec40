// Allow minor clippy style warnings at crate level
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::module_name_repetitions)]

//! Neighborhood exploration for an article-similarity graph.
//!
//! Articles are nodes; an edge joins two articles judged similar, weighted
//! by a similarity score. Selecting an article runs a fixed pipeline:
//!
//! 1. [`extract()`] - the connected component containing the article
//! 2. [`simplify()`] - reduce it when it is too large or too dense to read
//! 3. [`metrics()`] - size, density, local centrality and path length
//!
//! [`explore()`] chains the three and returns an [`Exploration`].
//!
//! - [`ArticleGraph`] - simple undirected graph of [`Article`]s
//! - [`GraphStore`] - load-once, read-only session store with frozen
//!   dataset-wide thresholds (popularity quartiles, centrality bands)
//! - [`formats`] - node-link JSON, CSV and bincode artifacts
//!
//! # Example
//!
//! ```rust
//! use wikinet_core::{explore, Article, ArticleGraph, Similarity, SimplifyConfig, Strategy};
//!
//! let mut g = ArticleGraph::new();
//! for (id, category) in [("1", "Core"), ("2", "Core"), ("3", "Redundant")] {
//!     g.add_article(Article::new(id).with_category(category))?;
//! }
//! g.add_similarity("1", "2", Similarity::new(0.9))?;
//! g.add_similarity("2", "3", Similarity::new(0.6))?;
//!
//! let view = explore(&g, &"1".into(), &SimplifyConfig::default())?;
//! assert_eq!(view.strategy, Strategy::Unchanged);
//! assert_eq!(view.neighborhood.node_count, 3);
//! # Ok::<(), wikinet_core::Error>(())
//! ```

pub mod algo;
mod article;
mod error;
mod extract;
pub mod formats;
mod graph;
pub mod metrics;
pub mod pipeline;
pub mod popularity;
pub mod simplify;
pub mod store;

pub use article::{Article, ArticleId, Popularity, Similarity, REDUNDANT_CATEGORY};
pub use error::{Error, Result};
pub use extract::extract;
pub use formats::{load_graph, save_graph};
pub use graph::{ArticleGraph, ArticleGraphStats};
pub use metrics::{metrics, GraphMetrics, LocalCentrality, SubgraphMetrics};
pub use pipeline::{explore, Exploration};
pub use popularity::{BandThreshold, CentralityBand, PopularityScale};
pub use simplify::{prune_edges, prune_nodes, simplify, Simplified, SimplifyConfig, Strategy};
pub use store::{ArticleFilter, ArticleProfile, GraphStore};

// Re-export petgraph for advanced graph operations
pub use petgraph;
