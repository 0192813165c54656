//! Source tree traversal.
//!
//! Directories are walked top-down. At every level files come before
//! subdirectories and both are sorted by name, so the order does not depend on
//! the platform's directory listing. Excluded directories are pruned before
//! they are entered, at any depth; the root itself is never pruned.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::{GeneratorConfig, LinkPathStyle};
use crate::types::SourceRef;
use crate::{Error, Result};

/// A file selected for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path on disk, joined onto the configured root.
    pub path: PathBuf,
    /// Path text used in links.
    pub link_path: String,
}

impl SourceFile {
    /// Reference handed to the scanner for records from this file.
    pub fn source_ref(&self) -> SourceRef {
        SourceRef::with_link_path(self.path.clone(), self.link_path.clone())
    }
}

/// Files before directories, then by file name.
fn listing_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn link_path(relative: &Path, style: LinkPathStyle) -> String {
    match style {
        LinkPathStyle::Relative => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        LinkPathStyle::FileName => relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Walks the configured root and yields matching source files in order.
pub struct SourceWalker<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> SourceWalker<'a> {
    /// Walker over `config.root` using the config's extensions and exclusions.
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Iterate over matching files.
    ///
    /// # Errors
    ///
    /// The root must be an existing directory. Traversal failures below the
    /// root are yielded as items.
    pub fn files(&self) -> Result<impl Iterator<Item = Result<SourceFile>> + use<'a>> {
        let config = self.config;
        if !config.root.is_dir() {
            return Err(Error::RootNotFound(config.root.clone()));
        }

        let walker = WalkDir::new(&config.root)
            .follow_links(config.follow_links)
            .sort_by(listing_order)
            .into_iter()
            .filter_entry(move |entry| {
                let pruned = entry.depth() > 0
                    && entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| config.is_excluded(name));
                if pruned {
                    debug!(path = %entry.path().display(), "skipping excluded directory");
                }
                !pruned
            });

        Ok(walker.filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            // Unfollowed symlinks are still read when they point at a file;
            // only descending into linked directories is refused.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                return None;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
                return None;
            };
            config.matching_extension(file_name)?;

            let relative = entry
                .path()
                .strip_prefix(&config.root)
                .unwrap_or_else(|_| entry.path());
            let link_path = link_path(relative, config.link_path);

            Some(Ok(SourceFile {
                path: entry.into_path(),
                link_path,
            }))
        }))
    }

    /// Collect all matching files, stopping at the first traversal error.
    pub fn collect(&self) -> Result<Vec<SourceFile>> {
        self.files()?.collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn tree(files: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "def x : Nat := 0\n").unwrap();
        }
        dir
    }

    /// Relative link paths make the directory part of the order visible.
    fn config_for(dir: &TempDir) -> GeneratorConfig {
        GeneratorConfig {
            root: dir.path().to_path_buf(),
            link_path: LinkPathStyle::Relative,
            ..GeneratorConfig::default()
        }
    }

    fn link_paths(config: &GeneratorConfig) -> Vec<String> {
        SourceWalker::new(config)
            .collect()
            .unwrap()
            .into_iter()
            .map(|f| f.link_path)
            .collect()
    }

    #[test]
    fn test_files_before_directories_sorted_by_name() {
        let dir = tree(&[
            "b.lean",
            "Tree/z.lean",
            "Tree/Sub/c.lean",
            "Tree/a.lean",
            "a.lean",
            "Alpha/x.lean",
        ]);
        let config = config_for(&dir);

        assert_eq!(
            link_paths(&config),
            [
                "a.lean",
                "b.lean",
                "Alpha/x.lean",
                "Tree/a.lean",
                "Tree/z.lean",
                "Tree/Sub/c.lean",
            ]
        );
    }

    #[test]
    fn test_excluded_directories_never_entered() {
        let dir = tree(&[
            "Main.lean",
            ".lake/packages/std/Std.lean",
            "src/elReasoning/Hidden.lean",
            "src/Visible.lean",
        ]);
        let config = config_for(&dir);

        assert_eq!(link_paths(&config), ["Main.lean", "src/Visible.lean"]);
    }

    #[test]
    fn test_root_named_like_exclusion_is_walked() {
        let dir = tempdir().unwrap();
        let root = dir.path().join(".lake");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("A.lean"), "def a\n").unwrap();

        let config = GeneratorConfig {
            root,
            ..GeneratorConfig::default()
        };
        assert_eq!(link_paths(&config), ["A.lean"]);
    }

    #[test]
    fn test_extension_filter() {
        let dir = tree(&["a.lean", "b.py", "c.olean", "d.md", "e.lean.py"]);
        let config = config_for(&dir);

        assert_eq!(link_paths(&config), ["a.lean", "b.py", "e.lean.py"]);
    }

    #[test]
    fn test_default_links_use_bare_file_name() {
        let dir = tree(&["Tree/Basic.lean"]);
        let config = GeneratorConfig {
            root: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        };

        let files = SourceWalker::new(&config).collect().unwrap();
        assert_eq!(files[0].link_path, "Basic.lean");
        assert_eq!(files[0].path, dir.path().join("Tree").join("Basic.lean"));
    }

    #[test]
    fn test_relative_links_keep_directories() {
        let dir = tree(&["Tree/Basic.lean"]);
        let config = config_for(&dir);

        assert_eq!(link_paths(&config), ["Tree/Basic.lean"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_read_but_linked_directory_is_not_entered() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path().join("src");
        let outside = dir.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(dir.path().join("Real.lean"), "def linked : Nat := 0\n").unwrap();
        fs::write(outside.join("Hidden.lean"), "def hidden : Nat := 0\n").unwrap();
        symlink(dir.path().join("Real.lean"), root.join("Link.lean")).unwrap();
        symlink(&outside, root.join("Linked")).unwrap();

        let config = GeneratorConfig {
            root,
            link_path: LinkPathStyle::Relative,
            ..GeneratorConfig::default()
        };
        assert_eq!(link_paths(&config), ["Link.lean"]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            root: dir.path().join("missing"),
            ..GeneratorConfig::default()
        };

        let err = SourceWalker::new(&config).collect().unwrap_err();
        assert!(matches!(err, Error::RootNotFound(_)));
    }
}
