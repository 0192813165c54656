#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{texlinks_cmd, write_tree};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn scan_lists_records_and_issues() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        dir.path(),
        &[("Rules.lean", "def rule : Nat := 0\nlemma rule' : True := trivial\ndef\n")],
    );

    texlinks_cmd(dir.path())
        .args(["scan", "Rules.lean"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r"Rules.lean:1  \datalogrule  rule"))
        .stdout(predicate::str::contains("Rules.lean:3: missing declaration name"))
        .stdout(predicate::str::contains("1 record, 1 skipped, 1 malformed"));

    assert!(!dir.path().join("codeCommands.tex").exists());
    Ok(())
}

#[test]
fn scan_json_output() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        dir.path(),
        &[(
            "Graph.lean",
            "namespace Graph\n  noncomputable def path_2 : Nat := 0\nend Graph\n",
        )],
    );

    let output = texlinks_cmd(dir.path())
        .args(["scan", "Graph.lean", "--mode", "namespace-aware", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["file"], "Graph.lean");
    assert_eq!(value["mode"], "namespace-aware");
    assert_eq!(value["records"][0]["macro_name"], "Graphpathtwo");
    assert_eq!(value["records"][0]["display_text"], r"path\_2");
    assert_eq!(value["records"][0]["line_number"], 2);
    assert_eq!(value["malformed"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[test]
fn scan_missing_file_exits_not_found() -> Result<()> {
    let dir = tempdir()?;

    texlinks_cmd(dir.path())
        .args(["scan", "Nope.lean"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Nope.lean"));
    Ok(())
}
