#![allow(missing_docs)]

mod common;

use std::fs;

use anyhow::Result;
use common::{HEADER, texlinks_cmd, write_tree};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn generate_writes_default_output_file() -> Result<()> {
    let dir = tempdir()?;
    write_tree(&dir.path().join("src"), &[("foo.lean", "def my_lemma : Nat := 0\n")]);

    texlinks_cmd(dir.path())
        .args(["generate", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrote 1 macro from 1 file to codeCommands.tex",
        ));

    let written = fs::read_to_string(dir.path().join("codeCommands.tex"))?;
    assert_eq!(
        written,
        format!(
            "{HEADER}{}\n",
            r"\newcommand{\mylemma}{\repoLinkCode{foo.lean\#L1}{my\_lemma}}"
        )
    );
    Ok(())
}

#[test]
fn generate_to_stdout_writes_no_file() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        &dir.path().join("src"),
        &[("Graph.lean", "def edge_count : Nat := 0\ntheorem size' : True := trivial\n")],
    );

    texlinks_cmd(dir.path())
        .args(["generate", "src", "--stdout"])
        .assert()
        .success()
        .stdout(format!(
            "{HEADER}{}\n",
            r"\newcommand{\edgecount}{\repoLinkCode{Graph.lean\#L1}{edge\_count}}"
        ))
        .stderr(predicate::str::contains("Generated 1 macro from 1 file"));

    assert!(!dir.path().join("codeCommands.tex").exists());
    Ok(())
}

#[test]
fn generate_namespace_mode_applies_prefix_and_overrides() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        &dir.path().join("src"),
        &[(
            "Tree/Basic.lean",
            "namespace Tree\n  def root : Nat := 0\n  lemma height2 : True := trivial\nend Tree\n",
        )],
    );

    texlinks_cmd(dir.path())
        .args(["generate", "src", "--mode", "namespace-aware", "-o", "links.tex"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("links.tex"))?;
    let macros: Vec<_> = written.lines().skip(3).collect();
    assert_eq!(
        macros,
        [
            r"\newcommand{\treeRoot}{\repoLinkCode{Basic.lean\#L2}{root}}",
            r"\newcommand{\Treeheighttwo}{\repoLinkCode{Basic.lean\#L3}{height2}}",
        ]
    );
    Ok(())
}

#[test]
fn generate_relative_link_path_keeps_directories() -> Result<()> {
    let dir = tempdir()?;
    write_tree(&dir.path().join("src"), &[("Tree/Basic.lean", "def height : Nat := 0\n")]);

    texlinks_cmd(dir.path())
        .args(["generate", "src", "--link-path", "relative", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r"\newcommand{\height}{\repoLinkCode{Tree/Basic.lean\#L1}{height}}",
        ));
    Ok(())
}

#[test]
fn generate_respects_exclude_flag_and_defaults() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        &dir.path().join("src"),
        &[
            ("Main.lean", "def main : Nat := 0\n"),
            (".lake/Dep.lean", "def dep : Nat := 0\n"),
            ("build/Gen.lean", "def generated : Nat := 0\n"),
        ],
    );

    texlinks_cmd(dir.path())
        .args(["generate", "src", "--exclude", "build", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r"\main}"))
        .stdout(predicate::str::contains("dep").not())
        .stdout(predicate::str::contains("generated").not());
    Ok(())
}

#[test]
fn generate_fail_fast_exits_with_malformed_code() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        &dir.path().join("src"),
        &[
            ("a.lean", "def fine : Nat := 0\n"),
            ("b.lean", "theorem ok : True := trivial\ndef\ndef later : Nat := 1\n"),
        ],
    );

    texlinks_cmd(dir.path())
        .args(["generate", "src"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Malformed declaration at b.lean:2"));

    assert!(!dir.path().join("codeCommands.tex").exists());
    Ok(())
}

#[test]
fn generate_fail_fast_skips_empty_names() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        &dir.path().join("src"),
        &[("a.lean", "def  spaced : Nat := 0\ndef good : Nat := 1\n")],
    );

    texlinks_cmd(dir.path())
        .args(["generate", "src"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("codeCommands.tex"))?;
    assert!(written.ends_with("\\newcommand{\\good}{\\repoLinkCode{a.lean\\#L2}{good}}\n"));
    Ok(())
}

#[test]
fn generate_keep_going_writes_and_reports() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        &dir.path().join("src"),
        &[("a.lean", "def\ndef good : Nat := 0\n")],
    );

    let output = texlinks_cmd(dir.path())
        .args(["generate", "src", "--keep-going", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["records"], 1);
    assert_eq!(report["malformed"], 1);
    assert_eq!(report["diagnostics"][0]["severity"], "error");
    assert_eq!(report["diagnostics"][0]["line"], 1);
    assert_eq!(report["output"], "codeCommands.tex");

    let written = fs::read_to_string(dir.path().join("codeCommands.tex"))?;
    assert_eq!(written.lines().count(), 4);
    Ok(())
}

#[test]
fn generate_missing_root_exits_not_found() -> Result<()> {
    let dir = tempdir()?;

    texlinks_cmd(dir.path())
        .args(["generate", "does-not-exist"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Root directory not found"));
    Ok(())
}

#[test]
fn generate_stdout_with_json_is_usage_error() -> Result<()> {
    let dir = tempdir()?;

    texlinks_cmd(dir.path())
        .args(["generate", "--stdout", "--format", "json"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn generate_uses_discovered_config_file() -> Result<()> {
    let dir = tempdir()?;
    write_tree(
        dir.path(),
        &[
            (
                "texlinks.toml",
                "root = \"proofs\"\noutput = \"macros.tex\"\n\n[links]\ncode_prefix = \"\"\n",
            ),
            ("proofs/A.lean", "def alpha : Nat := 0\n"),
        ],
    );

    texlinks_cmd(dir.path()).arg("generate").assert().success();

    let written = fs::read_to_string(dir.path().join("macros.tex"))?;
    assert!(written.contains(r"\newcommand{\repoLinkCode}[2]{\repoLinkBase{#1}{#2}}"));
    assert!(written.contains(r"\newcommand{\alpha}{\repoLinkCode{A.lean\#L1}{alpha}}"));
    Ok(())
}

#[test]
fn generate_rejects_config_with_unknown_keys() -> Result<()> {
    let dir = tempdir()?;
    write_tree(dir.path(), &[("texlinks.toml", "roots = \"src\"\n")]);

    texlinks_cmd(dir.path())
        .arg("generate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("texlinks.toml"));
    Ok(())
}
