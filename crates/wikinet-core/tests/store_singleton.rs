//! Process-wide store lifecycle.
//!
//! Kept in its own test binary with a single test: the store can be
//! installed once per process.

use wikinet_core::{Article, ArticleGraph, Error, GraphStore, Similarity};

#[test]
fn store_is_initialized_once() {
    assert!(matches!(GraphStore::global(), Err(Error::StoreNotInitialized)));

    let mut g = ArticleGraph::new();
    g.add_article(Article::new("1").with_category("Core")).unwrap();
    g.add_article(Article::new("2").with_category("Core")).unwrap();
    g.add_similarity("1", "2", Similarity::new(0.9)).unwrap();

    let store = GraphStore::init(GraphStore::new(g)).unwrap();
    assert_eq!(store.graph().article_count(), 2);

    let again = GraphStore::init(GraphStore::new(ArticleGraph::new()));
    assert!(matches!(again, Err(Error::StoreAlreadyInitialized)));

    // The first graph stays installed
    let global = GraphStore::global().unwrap();
    assert_eq!(global.graph().article_count(), 2);
    let e = global.explore(&"1".into()).unwrap();
    assert_eq!(e.neighborhood.node_count, 2);
}
