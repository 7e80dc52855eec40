//! Graph algorithms over article graphs.

/// Connected components.
pub mod components;

/// Degree and betweenness centrality.
pub mod centrality;

/// Unweighted shortest paths.
pub mod paths;
