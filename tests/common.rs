use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for linkpath with logging environment cleared
pub fn linkpath() -> Command {
    let mut cmd = cargo_bin_cmd!("linkpath");
    cmd.env_remove("RUST_LOG")
        .env_remove("LINKPATH_LOG")
        .env_remove("LINKPATH_CONFIG")
        .env_remove("LINKPATH_MAX_DEPTH")
        .env_remove("LINKPATH_CONCURRENCY")
        .env_remove("LINKPATH_WIKI_ENDPOINT");
    cmd
}

/// A -> {B, C}, B -> {D}, C -> {D}, D -> {E}
pub const SCENARIO_GRAPH: &str = r#"{
  "A": ["B", "C"],
  "B": ["D"],
  "C": ["D"],
  "D": ["E"]
}"#;

/// Write the scenario graph into `dir` and return its path
pub fn write_scenario_graph(dir: &Path) -> PathBuf {
    let path = dir.join("graph.json");
    fs::write(&path, SCENARIO_GRAPH).unwrap();
    path
}

/// Write a small set of linked markdown documents under `dir/docs`
#[allow(dead_code)]
pub fn write_documents(dir: &Path) -> PathBuf {
    let docs = dir.join("docs");
    fs::create_dir_all(docs.join("people")).unwrap();
    fs::write(
        docs.join("Ada Lovelace.md"),
        "# Ada Lovelace\n\nTranslated the notes of [[Luigi Menabrea|Menabrea]] \
         and worked with [[Charles Babbage]].\n",
    )
    .unwrap();
    fs::write(
        docs.join("people").join("Charles Babbage.md"),
        "Designed engines; corresponded with [[Mary Somerville]].\n",
    )
    .unwrap();
    fs::write(
        docs.join("Mary Somerville.md"),
        "Tutor of [[Ada Lovelace]]. Knew [[Michael Faraday]].\n",
    )
    .unwrap();
    fs::write(docs.join("Michael Faraday.md"), "No mentions here.\n").unwrap();
    docs
}
