//! Graph serialization formats.
//!
//! - Node-link JSON (`networkx.node_link_data` layout)
//! - CSV (article table + headerless edge list)
//! - Binary snapshot (bincode, behind the `binary` feature)
//!
//! [`load_graph`] and [`save_graph`] pick the format from the path.

#[cfg(feature = "binary")]
mod binary;
mod csv;
mod json;

#[cfg(feature = "binary")]
pub use binary::Binary;
pub use csv::Csv;
pub use json::{NodeLink, NodeLinkDocument, NodeLinkEdge};

use crate::{ArticleGraph, Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Article table inside a CSV graph directory.
pub const ARTICLES_CSV: &str = "articles.csv";
/// Edge list inside a CSV graph directory.
pub const EDGES_CSV: &str = "edges.csv";

/// On-disk layout of a graph artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// `*.json`
    NodeLink,
    /// A directory holding `articles.csv` and `edges.csv`.
    CsvDir,
    /// `*.bin`
    Binary,
}

impl GraphFormat {
    /// Format implied by a path.
    pub fn detect(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self::CsvDir);
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::NodeLink),
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Ok(Self::Binary),
            _ => Err(Error::InvalidData(format!(
                "cannot infer graph format of {}; expected .json, .bin or a CSV directory",
                path.display()
            ))),
        }
    }
}

/// Load a graph artifact.
pub fn load_graph(path: impl AsRef<Path>) -> Result<ArticleGraph> {
    let path = path.as_ref();
    let format = GraphFormat::detect(path)?;
    tracing::debug!(path = %path.display(), ?format, "loading graph");

    let graph = match format {
        GraphFormat::NodeLink => NodeLink::read(BufReader::new(File::open(path)?))?,
        GraphFormat::CsvDir => Csv::read(
            BufReader::new(File::open(path.join(ARTICLES_CSV))?),
            BufReader::new(File::open(path.join(EDGES_CSV))?),
        )?,
        GraphFormat::Binary => read_binary(path)?,
    };

    tracing::debug!(
        articles = graph.article_count(),
        similarities = graph.similarity_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Save a graph artifact. CSV directories are read-only.
pub fn save_graph(graph: &ArticleGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            NodeLink::write(graph, BufWriter::new(File::create(path)?))
        }
        Some(ext) if ext.eq_ignore_ascii_case("bin") => write_binary(graph, path),
        _ => Err(Error::InvalidData(format!(
            "cannot write graph to {}; expected a .json or .bin path",
            path.display()
        ))),
    }
}

#[cfg(feature = "binary")]
fn read_binary(path: &Path) -> Result<ArticleGraph> {
    ArticleGraph::from_binary_file(path)
}

#[cfg(feature = "binary")]
fn write_binary(graph: &ArticleGraph, path: &Path) -> Result<()> {
    graph.to_binary_file(path)
}

#[cfg(not(feature = "binary"))]
fn read_binary(path: &Path) -> Result<ArticleGraph> {
    Err(binary_disabled(path))
}

#[cfg(not(feature = "binary"))]
fn write_binary(_graph: &ArticleGraph, path: &Path) -> Result<()> {
    Err(binary_disabled(path))
}

#[cfg(not(feature = "binary"))]
fn binary_disabled(path: &Path) -> Error {
    Error::InvalidData(format!(
        "{} is a binary snapshot; rebuild with the `binary` feature",
        path.display()
    ))
}
