//! Wikinet CLI - explore an article-similarity network from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Graph statistics
//! wikinet -g graph.json stats
//!
//! # Neighborhood of one article, simplified when too busy
//! wikinet -g graph.json explore 42
//! wikinet -g graph.json explore 42 --json -o view.json
//!
//! # Article page and filtered listing
//! wikinet -g graph.json article 42
//! wikinet -g graph.json articles --topic Crafts --popularity "very high"
//!
//! # CSV directory (articles.csv + edges.csv) to node-link JSON
//! wikinet -g data/ convert -o graph.json
//! ```
//!
//! The graph path may also come from `WIKINET_GRAPH`. Logging goes to
//! stderr and is controlled by `RUST_LOG` (default `wikinet=info`).

mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use view::View;
use wikinet_core::algo::components::{component_stats, connected_components};
use wikinet_core::{
    load_graph, save_graph, ArticleFilter, ArticleGraph, ArticleId, GraphStore, Popularity,
    SimplifyConfig,
};

#[derive(Parser)]
#[command(name = "wikinet")]
#[command(about = "Article similarity network explorer", long_about = None)]
struct Cli {
    /// Graph artifact: .json (node-link), .bin, or a CSV directory
    #[arg(short, long, global = true, env = "WIKINET_GRAPH")]
    graph: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics about the graph
    Stats,

    /// Analyze connected components
    Components {
        /// List the members of small components
        #[arg(long)]
        verbose: bool,
    },

    /// Extract, simplify and measure the neighborhood of one article
    Explore {
        /// Article id
        id: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Write the vis-network view to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Neighborhoods with more edges than this are simplified
        #[arg(long, default_value_t = SimplifyConfig::default().edge_limit)]
        edge_limit: usize,

        /// Density above which weak edges are dropped instead of articles
        #[arg(long, default_value_t = SimplifyConfig::default().density_limit)]
        density_limit: f64,

        /// Minimum similarity kept by edge pruning
        #[arg(long, default_value_t = SimplifyConfig::default().weight_threshold)]
        weight_threshold: f64,
    },

    /// Show one article
    Article {
        /// Article id
        id: String,

        /// Print the profile as JSON
        #[arg(long)]
        json: bool,

        /// Print the full text
        #[arg(long)]
        full: bool,
    },

    /// List articles, optionally filtered
    Articles {
        /// Only this topic
        #[arg(long)]
        topic: Option<String>,

        /// Only this popularity band (low, medium, high, "very high")
        #[arg(long)]
        popularity: Option<Popularity>,

        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Limit number of results
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Write the graph as node-link JSON (or .bin with the `binary` feature)
    Convert {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wikinet=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let path = cli
        .graph
        .context("No graph given; pass --graph or set WIKINET_GRAPH")?;

    match cli.command {
        Commands::Stats => cmd_stats(&path),
        Commands::Components { verbose } => cmd_components(&path, verbose),
        Commands::Explore {
            id,
            json,
            output,
            edge_limit,
            density_limit,
            weight_threshold,
        } => {
            let config = SimplifyConfig {
                edge_limit,
                density_limit,
                weight_threshold,
            };
            cmd_explore(&path, &ArticleId::from(id), config, json, output.as_deref())
        }
        Commands::Article { id, json, full } => {
            cmd_article(&path, &ArticleId::from(id), json, full)
        }
        Commands::Articles {
            topic,
            popularity,
            category,
            limit,
        } => {
            let filter = ArticleFilter {
                topic,
                popularity,
                category,
            };
            cmd_articles(&path, &filter, limit)
        }
        Commands::Convert { output } => cmd_convert(&path, &output),
    }
}

fn load(path: &Path) -> Result<ArticleGraph> {
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Loading {}...", path.display()));

    let graph =
        load_graph(path).with_context(|| format!("Failed to load graph {}", path.display()))?;

    pb.finish_with_message(format!("Loaded in {:.2?}", start.elapsed()));
    tracing::info!(
        path = %path.display(),
        articles = graph.article_count(),
        similarities = graph.similarity_count(),
        "graph loaded"
    );
    Ok(graph)
}

fn load_store(path: &Path, config: SimplifyConfig) -> Result<&'static GraphStore> {
    let graph = load(path)?;
    Ok(GraphStore::init(GraphStore::with_config(graph, config))?)
}

fn cmd_stats(path: &Path) -> Result<()> {
    let graph = load(path)?;
    let stats = graph.stats();

    println!("Article Graph Statistics");
    println!("========================");
    println!("Articles:          {}", stats.article_count);
    println!("Similarities:      {}", stats.similarity_count);
    println!("Density:           {:.4}", stats.density);
    println!("Avg degree:        {:.2}", stats.avg_degree);
    println!("Isolated articles: {}", stats.isolated_count);
    if stats.unweighted_count > 0 {
        println!("Unweighted edges:  {}", stats.unweighted_count);
        tracing::warn!(
            count = stats.unweighted_count,
            "edges without weight; edge-threshold pruning will fail on their neighborhoods"
        );
    }

    Ok(())
}

fn cmd_components(path: &Path, verbose: bool) -> Result<()> {
    let graph = load(path)?;

    let start = Instant::now();
    let components = connected_components(&graph);
    tracing::debug!(elapsed = ?start.elapsed(), "components computed");

    let stats = component_stats(&components);
    println!("Component Statistics");
    println!("====================");
    println!("Number of components: {}", stats.num_components);
    println!("Max component size:   {}", stats.max_component_size);
    println!("Min component size:   {}", stats.min_component_size);
    println!("Avg component size:   {:.2}", stats.avg_component_size);
    println!("Singletons:           {}", stats.singleton_count);
    println!(
        "Largest component:    {:.1}% of articles",
        stats.largest_component_fraction * 100.0
    );

    if verbose {
        println!("\nComponents:");
        for (i, c) in components.iter().enumerate() {
            println!("  Component {}: {} articles", i + 1, c.len());
            if c.len() < 10 {
                let ids: Vec<&str> = c.iter().map(ArticleId::as_str).collect();
                println!("    {}", ids.join(", "));
            } else {
                println!("    (too large to list)");
            }
        }
    }

    Ok(())
}

fn cmd_explore(
    path: &Path,
    id: &ArticleId,
    config: SimplifyConfig,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let store = load_store(path, config)?;
    let exploration = store
        .explore(id)
        .with_context(|| format!("Failed to explore article {id}"))?;
    let view = View::new(&exploration, store);

    if let Some(output) = output {
        let content = serde_json::to_string_pretty(&view)?;
        fs::write(output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!(path = %output.display(), "view written");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&exploration)?);
        return Ok(());
    }

    let title = store.graph().article(id).map_or(id.as_str(), |a| a.label());
    println!("Neighborhood of {title}");
    println!("{}", "=".repeat("Neighborhood of ".len() + title.len()));
    println!("Nodes:   {}", exploration.neighborhood.node_count);
    println!("Edges:   {}", exploration.neighborhood.edge_count);
    println!("Density: {}", exploration.neighborhood.density);
    println!();
    println!("Strategy:                       {}", exploration.strategy);
    println!(
        "Displayed:                      {} articles, {} edges",
        exploration.displayed.node_count, exploration.displayed.edge_count
    );
    println!(
        "Local degree centrality:        {:.2}",
        exploration.local_degree_centrality
    );
    println!(
        "Local betweenness centrality:   {:.3}",
        exploration.local_betweenness_centrality
    );
    match exploration.avg_shortest_path {
        Some(avg) => println!("Average shortest path:          {avg}"),
        None => println!("Average shortest path:          n/a"),
    }

    if let Some(notice) = exploration.notice() {
        println!();
        println!("Note: {notice}");
    }

    Ok(())
}

fn cmd_article(path: &Path, id: &ArticleId, json: bool, full: bool) -> Result<()> {
    let store = load_store(path, SimplifyConfig::default())?;
    let profile = store
        .profile(id)
        .with_context(|| format!("Failed to look up article {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    let show = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    println!("{}", profile.title);
    println!("{}", "=".repeat(profile.title.len()));
    println!("Topic:       {}", show(profile.topic));
    println!("Category:    {}", show(profile.category));
    println!(
        "Popularity:  {}",
        show(profile.popularity.map(|p| p.to_string()))
    );
    println!("Neighbours:  {}", profile.neighbours);
    println!(
        "Degree:      {}",
        show(profile.degree_band.map(|b| b.to_string()))
    );
    println!(
        "Betweenness: {}",
        show(profile.betweenness_band.map(|b| b.to_string()))
    );
    if let Some(intro) = &profile.intro {
        println!();
        println!("{intro}");
    }
    if full {
        if let Some(content) = &profile.content {
            println!();
            println!("{content}");
        }
    }

    Ok(())
}

fn cmd_articles(path: &Path, filter: &ArticleFilter, limit: usize) -> Result<()> {
    let store = load_store(path, SimplifyConfig::default())?;
    let articles = store.filter(filter);

    println!("Articles ({} matching):", articles.len());
    for (i, article) in articles.iter().take(limit).enumerate() {
        println!("  {}. [{}] {}", i + 1, article.id, article.label());
    }

    if articles.len() > limit {
        println!("  ... and {} more", articles.len() - limit);
    }

    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> Result<()> {
    let graph = load(input)?;

    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Saving to {}...", output.display()));

    save_graph(&graph, output).with_context(|| format!("Failed to write {}", output.display()))?;

    pb.finish_with_message(format!("Saved in {:.2?}", start.elapsed()));
    println!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}
