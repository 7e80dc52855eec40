//! Error types for wikinet-core.

use thiserror::Error;

/// Error type for graph store and pipeline operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested article is not part of the graph.
    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    /// A required attribute is absent on a node or edge.
    ///
    /// `element` names the offending node (`"3"`) or edge (`"3 -- 7"`).
    #[error("Missing attribute `{attribute}` on {element}")]
    MissingAttribute {
        /// The node or edge lacking the attribute.
        element: String,
        /// The attribute name (`weight`, `category`, ...).
        attribute: &'static str,
    },

    /// An article id was inserted twice.
    #[error("Duplicate article: {0}")]
    DuplicateArticle(String),

    /// An edge from an article to itself.
    #[error("Self-loop on article {0} (graph must be simple)")]
    SelfLoop(String),

    /// `GraphStore::init` was called more than once.
    #[error("Graph store already initialized")]
    StoreAlreadyInitialized,

    /// `GraphStore::global` was called before `GraphStore::init`.
    #[error("Graph store not initialized")]
    StoreNotInitialized,

    /// Structurally invalid input data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Missing attribute on a node.
    pub fn missing_on_node(id: impl std::fmt::Display, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            element: format!("article {id}"),
            attribute,
        }
    }

    /// Missing attribute on an edge.
    pub fn missing_on_edge(
        a: impl std::fmt::Display,
        b: impl std::fmt::Display,
        attribute: &'static str,
    ) -> Self {
        Self::MissingAttribute {
            element: format!("edge {a} -- {b}"),
            attribute,
        }
    }
}

/// Result type for wikinet-core operations.
pub type Result<T> = std::result::Result<T, Error>;
