#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// The three header lines written for the default link settings.
#[allow(dead_code)]
pub const HEADER: &str = concat!(
    r"\newcommand{\repoUrl}{https://github.com/knowsys/CertifyingDatalog/tree/main}",
    "\n",
    r"\newcommand{\repoLinkBase}[2]{\href{\repoUrl/#1}{\textcolor{leansymbolcolor}{\texttt{#2}}}\xspace}",
    "\n",
    r"\newcommand{\repoLinkCode}[2]{\repoLinkBase{CertifyingDatalog/#1}{#2}}",
    "\n",
);

/// Create a `texlinks` command isolated from the caller's environment.
///
/// Runs in `work_dir` so config discovery and the default output path stay
/// inside the test's temp directory.
#[allow(dead_code)]
pub fn texlinks_cmd(work_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("texlinks"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.current_dir(work_dir);
    cmd.env_remove("TEXLINKS_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write `files` (relative path, content) below `root`, creating directories.
#[allow(dead_code)]
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (file, content) in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}
