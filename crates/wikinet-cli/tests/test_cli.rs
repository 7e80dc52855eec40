use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn get_test_dir() -> PathBuf {
    let dir = PathBuf::from("target/tmp/tests");
    fs::create_dir_all(&dir).unwrap();
    dir
}

const GRAPH: &str = r#"{
  "directed": false,
  "multigraph": false,
  "graph": {},
  "nodes": [
    {"id": 1, "title": "How to Knit", "topic": "Crafts", "category": "Core",
     "popularity": "High", "degree": 0.5, "betweenness": 0.4, "intro": "Knitting basics."},
    {"id": 2, "title": "How to Purl", "topic": "Crafts", "category": "Redundant",
     "popularity": "Low", "degree": 0.25, "betweenness": 0.0},
    {"id": 3, "title": "How to Cast On", "topic": "Crafts", "category": "Core",
     "popularity": "Very High", "degree": 0.25, "betweenness": 0.0},
    {"id": 4, "title": "How to Bake Bread", "topic": "Cooking", "category": "Core",
     "popularity": "Medium", "degree": 0.0, "betweenness": 0.0}
  ],
  "links": [
    {"source": 1, "target": 2, "weight": 0.91},
    {"source": 1, "target": 3, "weight": 0.84}
  ]
}"#;

fn write_graph(name: &str) -> std::io::Result<PathBuf> {
    let file = get_test_dir().join(name);
    fs::write(&file, GRAPH)?;
    Ok(file)
}

fn wikinet() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("wikinet")?;
    cmd.env_remove("WIKINET_GRAPH").env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_cli_stats() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("stats.json")?;

    wikinet()?
        .arg("-g")
        .arg(&file)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Articles:          4"))
        .stdout(predicate::str::contains("Similarities:      2"))
        .stdout(predicate::str::contains("Isolated articles: 1"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_graph_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("env.json")?;

    wikinet()?
        .env("WIKINET_GRAPH", &file)
        .arg("components")
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of components: 2"))
        .stdout(predicate::str::contains("Singletons:           1"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_requires_graph() -> Result<(), Box<dyn std::error::Error>> {
    wikinet()?
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WIKINET_GRAPH"));
    Ok(())
}

#[test]
fn test_cli_explore() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("explore.json")?;

    wikinet()?
        .arg("--graph")
        .arg(&file)
        .arg("explore")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Neighborhood of How to Knit"))
        .stdout(predicate::str::contains("Nodes:   3"))
        .stdout(predicate::str::contains("Density: 0.67"))
        .stdout(predicate::str::contains("unchanged"))
        .stdout(predicate::str::contains("Local degree centrality:        1.00"))
        .stdout(predicate::str::contains("Average shortest path:          1.33"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_explore_edge_pruning() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("explore_pruned.json")?;

    // Two edges > limit 1, density 0.67 > 0.5: drop edges under 0.9
    wikinet()?
        .arg("-g")
        .arg(&file)
        .args(["explore", "1", "--edge-limit", "1", "--weight-threshold", "0.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edge-threshold"))
        .stdout(predicate::str::contains("Displayed:                      3 articles, 1 edges"))
        .stdout(predicate::str::contains("Note: Edges below the similarity threshold"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_explore_view() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("view_input.json")?;
    let output = get_test_dir().join("view.json");

    wikinet()?
        .arg("-g")
        .arg(&file)
        .args(["explore", "3", "--json", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"strategy\": \"unchanged\""))
        .stdout(predicate::str::contains("\"local_degree_centrality\": 0.5"));

    let view: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    let nodes = view["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    let target = nodes.iter().find(|n| n["id"] == "3").unwrap();
    assert_eq!(target["color"], "#FFD700");
    assert_eq!(target["shape"], "star");
    assert_eq!(view["edges"].as_array().unwrap().len(), 2);

    fs::remove_file(file)?;
    fs::remove_file(output)?;
    Ok(())
}

#[test]
fn test_cli_explore_unknown_article() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("explore_unknown.json")?;

    wikinet()?
        .arg("-g")
        .arg(&file)
        .args(["explore", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Article not found: 99"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_article() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("article.json")?;

    wikinet()?
        .arg("-g")
        .arg(&file)
        .args(["article", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("How to Knit"))
        .stdout(predicate::str::contains("Popularity:  High"))
        .stdout(predicate::str::contains("Neighbours:  2"))
        .stdout(predicate::str::contains("Degree:      High"))
        .stdout(predicate::str::contains("Knitting basics."));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_articles_filter() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_graph("articles.json")?;

    wikinet()?
        .arg("-g")
        .arg(&file)
        .args(["articles", "--topic", "Crafts", "--popularity", "very high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Articles (1 matching)"))
        .stdout(predicate::str::contains("[3] How to Cast On"));

    wikinet()?
        .arg("-g")
        .arg(&file)
        .args(["articles", "--category", "Core", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Articles (3 matching)"))
        .stdout(predicate::str::contains("... and 2 more"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_convert_csv_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir().join("csv_graph");
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join("articles.csv"),
        "Article_Id,Title,Topic,Category,Views\n\
         1,How to Knit,Crafts,Core,900\n\
         2,How to Purl,Crafts,Redundant,100\n",
    )?;
    fs::write(dir.join("edges.csv"), "1,2,0.9\n")?;
    let output = get_test_dir().join("converted.json");

    wikinet()?
        .arg("-g")
        .arg(&dir)
        .arg("convert")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted"));

    wikinet()?
        .arg("-g")
        .arg(&output)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Articles:          2"))
        .stdout(predicate::str::contains("Similarities:      1"));

    fs::remove_dir_all(dir)?;
    fs::remove_file(output)?;
    Ok(())
}
