//! End-to-end selections over hand-built neighborhoods.

use wikinet_core::{
    explore, simplify, Article, ArticleGraph, ArticleId, Error, Similarity, SimplifyConfig,
    Strategy,
};

fn id(s: &str) -> ArticleId {
    ArticleId::from(s)
}

/// Complete graph on 12 articles: 66 edges, density 1.0. Every edge weighs
/// 0.9 except A -- D at 0.3.
fn dense_neighborhood() -> ArticleGraph {
    let names: Vec<String> = ('A'..='L').map(String::from).collect();
    let mut g = ArticleGraph::new();
    for name in &names {
        g.add_article(Article::new(name.as_str()).with_category("Core"))
            .unwrap();
    }
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            let w = if (a.as_str(), b.as_str()) == ("A", "D") { 0.3 } else { 0.9 };
            g.add_similarity(a.as_str(), b.as_str(), Similarity::new(w))
                .unwrap();
        }
    }
    g
}

/// 17 articles on a ring, each joined to neighbours up to 4 steps away
/// until 60 edges exist (density 0.44). Articles 3, 7, 11 and 15 are
/// redundant.
fn sparse_neighborhood() -> ArticleGraph {
    let mut g = ArticleGraph::new();
    for i in 0..17u64 {
        let category = if i % 4 == 3 { "Redundant" } else { "Core" };
        g.add_article(Article::new(i).with_category(category)).unwrap();
    }
    let mut added = 0;
    'outer: for d in 1..=4u64 {
        for i in 0..17u64 {
            if added == 60 {
                break 'outer;
            }
            g.add_similarity(i, (i + d) % 17, Similarity::new(0.5)).unwrap();
            added += 1;
        }
    }
    g
}

/// Path A - B - C - D - E.
fn path_of_five() -> ArticleGraph {
    let mut g = ArticleGraph::new();
    for name in ["A", "B", "C", "D", "E"] {
        g.add_article(Article::new(name).with_category("Core")).unwrap();
    }
    for (a, b) in [("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")] {
        g.add_similarity(a, b, Similarity::new(0.9)).unwrap();
    }
    g
}

#[test]
fn dense_neighborhood_drops_weak_edges() {
    let g = dense_neighborhood();
    let e = explore(&g, &id("A"), &SimplifyConfig::default()).unwrap();

    assert_eq!(e.strategy, Strategy::EdgeThreshold);
    assert!(e.edges_removed);
    assert!(!e.nodes_removed);

    assert_eq!(e.neighborhood.node_count, 12);
    assert_eq!(e.neighborhood.edge_count, 66);
    assert_eq!(e.neighborhood.density, 1.0);

    assert_eq!(e.subgraph.article_count(), 12);
    assert_eq!(e.subgraph.similarity_count(), 65);
    assert!(!e.subgraph.has_similarity(&id("A"), &id("D")));
    assert!(e.subgraph.has_similarity(&id("A"), &id("B")));

    assert!((e.local_degree_centrality - 10.0 / 11.0).abs() < 1e-12);
    assert!(e.notice().is_some());
    // Source graph is untouched
    assert!(g.has_similarity(&id("A"), &id("D")));
}

#[test]
fn dense_neighborhood_without_weights_fails() {
    let mut g = dense_neighborhood();
    g.add_similarity("B", "C", Similarity::unweighted()).unwrap();

    let err = explore(&g, &id("A"), &SimplifyConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { attribute: "weight", .. }));
}

#[test]
fn sparse_neighborhood_drops_redundant_articles() {
    let g = sparse_neighborhood();
    assert_eq!(g.similarity_count(), 60);

    let e = explore(&g, &id("0"), &SimplifyConfig::default()).unwrap();
    assert_eq!(e.strategy, Strategy::NodeCategory);
    assert!(e.nodes_removed);
    assert!(!e.edges_removed);
    assert_eq!(e.neighborhood.density, 0.44);

    assert_eq!(e.subgraph.article_count(), 13);
    assert_eq!(e.subgraph.similarity_count(), 34);
    for redundant in ["3", "7", "11", "15"] {
        assert!(!e.subgraph.contains(&id(redundant)));
    }
    // Target keeps its edges to surviving articles
    assert_eq!(e.subgraph.degree(&id("0")), 5);
    assert!(e.subgraph.has_similarity(&id("0"), &id("1")));
}

#[test]
fn redundant_target_survives() {
    let g = sparse_neighborhood();
    let e = explore(&g, &id("3"), &SimplifyConfig::default()).unwrap();
    assert!(e.subgraph.contains(&id("3")));
    assert!(!e.subgraph.contains(&id("7")));
    assert_eq!(e.subgraph.article_count(), 14);
}

#[test]
fn sparse_neighborhood_without_categories_fails() {
    let mut g = sparse_neighborhood();
    g.add_article(Article::new("uncategorized")).unwrap();
    g.add_similarity("uncategorized", "0", Similarity::new(0.5))
        .unwrap();

    let err = explore(&g, &id("0"), &SimplifyConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { attribute: "category", .. }));
}

#[test]
fn rounded_density_decides() {
    // 15 articles, 53 edges: density 0.5048, displayed as 0.50
    let mut g = ArticleGraph::new();
    for i in 0..15u64 {
        g.add_article(Article::new(i).with_category("Core")).unwrap();
    }
    let pairs = (0..15u64).flat_map(|a| (a + 1..15).map(move |b| (a, b)));
    for (a, b) in pairs.take(53) {
        g.add_similarity(a, b, Similarity::new(0.1)).unwrap();
    }
    assert!(g.density() > 0.5);

    let out = simplify(&g, &id("0"), &SimplifyConfig::default()).unwrap();
    assert_eq!(out.input_metrics.density, 0.5);
    assert_eq!(out.strategy, Strategy::NodeCategory);
    // Nothing is redundant, so nothing goes
    assert_eq!(out.graph.similarity_count(), 53);
}

#[test]
fn small_tree_is_unchanged() {
    let g = path_of_five();
    let e = explore(&g, &id("C"), &SimplifyConfig::default()).unwrap();

    assert_eq!(e.strategy, Strategy::Unchanged);
    assert!(!e.edges_removed && !e.nodes_removed);
    assert_eq!(e.notice(), None);
    assert_eq!(e.subgraph.similarity_keys(), g.similarity_keys());

    assert_eq!(e.displayed.density, 0.4);
    assert_eq!(e.local_degree_centrality, 0.5);
    assert!((e.local_betweenness_centrality - 4.0 / 6.0).abs() < 1e-12);
    assert_eq!(e.avg_shortest_path, Some(2.0));
}

#[test]
fn neighborhood_excludes_other_components() {
    let mut g = path_of_five();
    g.add_article(Article::new("X").with_category("Core")).unwrap();
    g.add_article(Article::new("Y").with_category("Core")).unwrap();
    g.add_similarity("X", "Y", Similarity::new(0.9)).unwrap();

    let e = explore(&g, &id("A"), &SimplifyConfig::default()).unwrap();
    assert_eq!(e.neighborhood.node_count, 5);
    assert!(!e.subgraph.contains(&id("X")));
}

#[test]
fn unknown_target() {
    let g = path_of_five();
    let err = explore(&g, &id("Z"), &SimplifyConfig::default()).unwrap_err();
    assert!(matches!(err, Error::ArticleNotFound(ref s) if s == "Z"));
}
