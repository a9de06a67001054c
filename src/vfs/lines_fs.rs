//! This module provides an in-memory file tree whose files hold line-split text.

use tracing::debug;

use super::tree::Tree;
use crate::core::{FsBackend, Result, utils};
use crate::error::{FsError, FsResult, KindName};
use crate::{LinesFSConfig, Node, NodeId, Separators};

/// A virtual file system that keeps a tree of line-based files in memory.
///
/// `LinesFS` is meant for test fixtures: populate it with `mkfile()`, then let the code
/// under test resolve paths against it the way it would against a real drive.
///
/// ### Internal state
///
/// * `tree` — Arena of nodes. The root directory carries the configured root name
///   (e.g. `C:`) and is never removed.
///
/// * `cwd` — Current Working Directory, a handle into `tree`.
///   - Default value: the root.
///   - Changed via `cd()`.
///
/// * `modules_folder` — A configuration value kept for callers; the store never
///   interprets it.
///
/// ### Path resolution
///
/// A path whose prefix matches the root name (compared case-insensitively) is resolved
/// from the root, any other path from `cwd`. Child names are compared case-sensitively.
/// `.` and `..` segments are honoured; `..` at the root is an error.
///
/// ### Thread Safety
///
/// There is no internal locking. Both `mkfile()` and `cd()` take `&mut self`, and relative
/// paths depend on the `cwd` cursor, so a store shared between threads needs callers to
/// serialize a `cd()` together with the lookups that rely on it.
///
/// ### Example
///
/// ```
/// use vfs_lines::{FsBackend, LinesFS};
///
/// let mut fs = LinesFS::new("C:").unwrap();
/// fs.mkfile("scripts/main.csx", &["print 1", "print 2"]).unwrap();
///
/// assert_eq!(fs.read_lines("scripts/main.csx").unwrap(), ["print 1", "print 2"]);
/// assert_eq!(fs.full_path("scripts/main.csx").unwrap(), "C:\\scripts\\main.csx");
/// assert_eq!(fs.working_dir("scripts/main.csx").unwrap(), "C:\\scripts");
/// ```
#[derive(Debug, Clone)]
pub struct LinesFS {
    tree: Tree,
    cwd: NodeId,
    modules_folder: String,
}

impl LinesFS {
    /// Creates new LinesFS instance with default separators.
    /// The current working directory is set to the root.
    pub fn new(root_name: impl Into<String>) -> Result<Self> {
        Self::with_config(LinesFSConfig::new(root_name))
    }

    /// Creates new LinesFS instance from `config`.
    /// An empty root name is rejected.
    pub fn with_config(config: LinesFSConfig) -> Result<Self> {
        let tree = Tree::new(&config.root_name, config.separators)?;
        let cwd = tree.root();
        Ok(Self {
            tree,
            cwd,
            modules_folder: config.modules_folder,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Returns the node behind a handle obtained from `resolve()`.
    ///
    /// Panics if `id` was obtained from another store.
    pub fn node(&self, id: NodeId) -> &Node {
        self.tree.node(id)
    }

    pub fn separators(&self) -> &Separators {
        self.tree.separators()
    }

    pub fn modules_folder(&self) -> &str {
        &self.modules_folder
    }

    pub fn set_modules_folder(&mut self, folder: impl Into<String>) {
        self.modules_folder = folder.into();
    }

    /// Returns true if `path` starts with the root name, ignoring case.
    pub fn is_path_rooted(&self, path: &str) -> bool {
        self.strip_root(path).is_some()
    }

    fn strip_root<'a>(&self, path: &'a str) -> Option<&'a str> {
        let root = self.root();
        let head = path.get(..root.len())?;
        if head.to_lowercase() == root.to_lowercase() {
            Some(&path[root.len()..])
        } else {
            None
        }
    }

    fn resolve_item(&self, path: &str) -> FsResult<NodeId> {
        match self.strip_root(path) {
            Some(rest) if rest.chars().all(|c| self.separators().is_separator(c)) => {
                Ok(self.tree.root())
            }
            Some(rest) => self
                .tree
                .get_item(self.tree.root(), rest)
                .map_err(|e| e.at(path)),
            None => self.tree.get_item(self.cwd, path),
        }
    }

    /// Creates a file from raw text, split with [`utils::split_lines`].
    pub fn mkfile_text(&mut self, path: &str, text: &str) -> Result<()> {
        let lines = utils::split_lines(text);
        self.tree.add_file(self.cwd, path, lines)?;
        Ok(())
    }

    /// Reads the file at `path` as a single string, lines joined with `\n`.
    pub fn read_text(&self, path: &str) -> Result<String> {
        Ok(self.read_lines(path)?.join("\n"))
    }

    /// Returns names of the immediate children of the directory at `path`: files first,
    /// then directories, each group ordered by name.
    /// For a file the result is the file's own name.
    pub fn ls(&self, path: &str) -> Result<Vec<String>> {
        let id = self.resolve_item(path)?;
        let node = self.node(id);
        if node.is_file() {
            return Ok(vec![node.name().to_string()]);
        }
        Ok(self.tree.list(id, path)?)
    }
}

impl FsBackend for LinesFS {
    /// Returns root name.
    fn root(&self) -> &str {
        self.node(self.tree.root()).name()
    }

    /// Returns the full path of the current working directory.
    fn cwd(&self) -> String {
        self.tree.full_path(self.cwd)
    }

    /// Changes the current working directory.
    /// * `path` can be rooted or relative, but in both cases it must be an existing directory.
    /// On error the current directory stays unchanged.
    fn cd(&mut self, path: &str) -> Result<()> {
        let target = self.resolve_item(path)?;
        if !self.node(target).is_dir() {
            return Err(FsError::wrong_kind(path, KindName::Directory).into());
        }
        self.cwd = target;
        debug!("cwd changed to {}", self.tree.full_path(target));
        Ok(())
    }

    /// Creates new file relative to the current working directory.
    /// Missing parent directories are created; they are kept even if the file itself
    /// cannot be inserted.
    fn mkfile(&mut self, path: &str, lines: &[&str]) -> Result<()> {
        let lines = lines.iter().map(|line| line.to_string()).collect();
        self.tree.add_file(self.cwd, path, lines)?;
        Ok(())
    }

    /// Reads the lines of a file.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Lines in insertion order.
    /// * `Err(anyhow::Error)` - If the path does not resolve (`NotFound`, `InvalidPath`)
    ///   or points to a directory (`WrongKind`).
    fn read_lines(&self, path: &str) -> Result<Vec<String>> {
        let id = self.resolve_item(path)?;
        match self.node(id).lines() {
            Some(lines) => Ok(lines.to_vec()),
            None => Err(FsError::wrong_kind(path, KindName::File).into()),
        }
    }

    fn resolve(&self, path: &str) -> Result<NodeId> {
        Ok(self.resolve_item(path)?)
    }

    fn full_path(&self, path: &str) -> Result<String> {
        let id = self.resolve_item(path)?;
        Ok(self.tree.full_path(id))
    }

    fn working_dir(&self, path: &str) -> Result<String> {
        let id = self.resolve_item(path)?;
        let node = self.node(id);
        let dir = match node.parent() {
            Some(parent) if node.is_file() => parent,
            _ => id,
        };
        Ok(self.tree.full_path(dir))
    }
}

impl TryFrom<LinesFSConfig> for LinesFS {
    type Error = anyhow::Error;

    fn try_from(config: LinesFSConfig) -> Result<Self> {
        Self::with_config(config)
    }
}

/// Extracts the [`FsError`] from a store error, if it is one.
pub fn fs_error(error: &anyhow::Error) -> Option<&FsError> {
    error.downcast_ref::<FsError>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kind_of(error: anyhow::Error) -> FsError {
        error
            .downcast::<FsError>()
            .expect("store errors are FsError")
    }

    /// C:
    /// ├── readme.md
    /// ├── scripts
    /// │   ├── main.csx
    /// │   └── lib
    /// │       └── util.csx
    /// └── docs
    ///     └── notes.txt
    fn setup_test_vfs() -> LinesFS {
        let mut fs = LinesFS::new("C:").unwrap();
        fs.mkfile("readme.md", &["# readme"]).unwrap();
        fs.mkfile("scripts/main.csx", &["print 1", "print 2"])
            .unwrap();
        fs.mkfile("scripts\\lib\\util.csx", &["fn util"]).unwrap();
        fs.mkfile("docs/notes.txt", &[]).unwrap();
        fs
    }

    mod creations {
        use super::*;

        #[test]
        fn test_new_lines_fs() {
            let fs = LinesFS::new("C:").unwrap();
            assert_eq!(fs.root(), "C:");
            assert_eq!(fs.cwd(), "C:");
            assert_eq!(fs.modules_folder(), "modules");
            assert_eq!(fs.tree().len(), 1);
        }

        #[test]
        fn test_new_empty_root_error() {
            let error = LinesFS::new("").unwrap_err();
            assert!(matches!(kind_of(error), FsError::InvalidPath { .. }));
        }

        #[test]
        fn test_with_config() -> Result<()> {
            let config = LinesFSConfig::new("/")
                .separators(Separators::new('/', '\\'))
                .modules_folder("packages");
            let mut fs = LinesFS::try_from(config)?;
            fs.mkfile("a\\b.txt", &["x"])?;
            assert_eq!(fs.full_path("a/b.txt")?, "/a/b.txt");
            assert_eq!(fs.read_lines("/a/b.txt")?, ["x"]);
            assert_eq!(fs.modules_folder(), "packages");

            fs.set_modules_folder("node_modules");
            assert_eq!(fs.modules_folder(), "node_modules");
            Ok(())
        }
    }

    mod mkfile {
        use super::*;

        #[test]
        fn test_mkfile_round_trip() -> Result<()> {
            let fs = setup_test_vfs();
            assert_eq!(fs.read_lines("scripts/main.csx")?, ["print 1", "print 2"]);
            assert_eq!(fs.read_lines("docs/notes.txt")?, Vec::<String>::new());
            Ok(())
        }

        #[test]
        fn test_mkfile_relative_to_cwd() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.cd("scripts")?;
            fs.mkfile("extra.csx", &["print 3"])?;
            assert_eq!(fs.full_path("extra.csx")?, "C:\\scripts\\extra.csx");
            assert_eq!(fs.read_lines("C:\\scripts\\extra.csx")?, ["print 3"]);
            Ok(())
        }

        #[test]
        fn test_mkfile_duplicate_error() -> Result<()> {
            let mut fs = setup_test_vfs();
            let error = fs.mkfile("scripts/main.csx", &["other"]).unwrap_err();
            assert_eq!(
                kind_of(error),
                FsError::DuplicateEntry {
                    path: "scripts/main.csx".into()
                }
            );
            assert_eq!(fs.read_lines("scripts/main.csx")?, ["print 1", "print 2"]);
            Ok(())
        }

        #[test]
        fn test_mkfile_one_directory_per_prefix() -> Result<()> {
            let fs = setup_test_vfs();
            assert_eq!(fs.ls("scripts")?, vec!["main.csx", "lib"]);
            assert_eq!(fs.ls(".")?.len(), 3);
            Ok(())
        }

        #[test]
        fn test_mkfile_text() -> Result<()> {
            let mut fs = LinesFS::new("C:")?;
            fs.mkfile_text("a.txt", "one\r\ntwo\n")?;
            assert_eq!(fs.read_lines("a.txt")?, ["one", "two"]);
            assert_eq!(fs.read_text("a.txt")?, "one\ntwo");
            Ok(())
        }
    }

    mod read_lines {
        use super::*;

        #[test]
        fn test_read_missing_on_empty_root() {
            let fs = LinesFS::new("C:").unwrap();
            let error = fs.read_lines("missing.txt").unwrap_err();
            assert_eq!(
                kind_of(error),
                FsError::NotFound {
                    path: "missing.txt".into()
                }
            );
        }

        #[test]
        fn test_read_directory_error() {
            let fs = setup_test_vfs();
            let error = fs.read_lines("scripts").unwrap_err();
            assert!(error.to_string().contains("is not a file"));
            assert!(matches!(
                kind_of(error),
                FsError::WrongKind {
                    expected: KindName::File,
                    ..
                }
            ));
        }

        #[test]
        fn test_read_rooted_from_anywhere() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.cd("scripts\\lib")?;
            assert_eq!(fs.read_lines("C:\\readme.md")?, ["# readme"]);
            assert_eq!(fs.read_lines("c:/scripts/main.csx")?.len(), 2);
            assert_eq!(fs.read_lines("util.csx")?, ["fn util"]);
            Ok(())
        }

        #[test]
        fn test_rooted_error_reports_requested_path() {
            let fs = setup_test_vfs();
            let error = fs.read_lines("C:\\nope.txt").unwrap_err();
            assert_eq!(
                kind_of(error),
                FsError::NotFound {
                    path: "C:\\nope.txt".into()
                }
            );
        }

        #[test]
        fn test_fs_error_helper() {
            let fs = setup_test_vfs();
            let error = fs.read_lines("nope").unwrap_err();
            assert!(matches!(fs_error(&error), Some(FsError::NotFound { .. })));
            assert!(fs_error(&anyhow::anyhow!("other")).is_none());
        }
    }

    mod cd {
        use super::*;

        #[test]
        fn test_cd_relative_and_back() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.cd("scripts")?;
            assert_eq!(fs.cwd(), "C:\\scripts");
            assert_eq!(fs.full_path("..")?, "C:");
            assert_eq!(fs.full_path(".")?, "C:\\scripts");

            fs.cd("..")?;
            assert_eq!(fs.cwd(), "C:");
            Ok(())
        }

        #[test]
        fn test_cd_parent_of_root_error() {
            let mut fs = setup_test_vfs();
            let error = fs.cd("..").unwrap_err();
            assert!(matches!(kind_of(error), FsError::InvalidPath { .. }));
            assert_eq!(fs.cwd(), "C:");
        }

        #[test]
        fn test_cd_file_error() {
            let mut fs = setup_test_vfs();
            let error = fs.cd("scripts/main.csx").unwrap_err();
            assert!(error.to_string().contains("is not a directory"));
            assert_eq!(fs.cwd(), "C:");
        }

        #[test]
        fn test_cd_nonexistent_error() {
            let mut fs = setup_test_vfs();
            let error = fs.cd("nonexistent/path").unwrap_err();
            assert!(error.to_string().contains("does not exist"));
            assert_eq!(fs.cwd(), "C:");
        }

        #[rstest]
        #[case("C:")]
        #[case("c:")]
        #[case("C:\\")]
        #[case("C:/")]
        fn test_cd_to_root(#[case] path: &str) -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.cd("scripts\\lib")?;
            fs.cd(path)?;
            assert_eq!(fs.cwd(), "C:");
            Ok(())
        }

        #[test]
        fn test_cd_sequential_changes() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.cd("C:\\docs")?;
            assert_eq!(fs.cwd(), "C:\\docs");
            fs.cd("../scripts/lib")?;
            assert_eq!(fs.cwd(), "C:\\scripts\\lib");
            fs.cd("C:/scripts")?;
            assert_eq!(fs.cwd(), "C:\\scripts");
            Ok(())
        }
    }

    mod paths {
        use super::*;

        #[rstest]
        #[case("scripts/main.csx", "C:\\scripts\\main.csx", "C:\\scripts")]
        #[case("scripts", "C:\\scripts", "C:\\scripts")]
        #[case("C:\\scripts\\lib\\util.csx", "C:\\scripts\\lib\\util.csx", "C:\\scripts\\lib")]
        #[case("readme.md", "C:\\readme.md", "C:")]
        #[case(".", "C:", "C:")]
        fn test_full_path_and_working_dir(
            #[case] path: &str,
            #[case] full: &str,
            #[case] working: &str,
        ) -> Result<()> {
            let fs = setup_test_vfs();
            assert_eq!(fs.full_path(path)?, full);
            assert_eq!(fs.working_dir(path)?, working);
            Ok(())
        }

        #[test]
        fn test_is_path_rooted() {
            let fs = setup_test_vfs();
            assert!(fs.is_path_rooted("C:\\scripts"));
            assert!(fs.is_path_rooted("c:"));
            assert!(!fs.is_path_rooted("scripts"));
            assert!(!fs.is_path_rooted("C"));
            assert!(!fs.is_path_rooted(""));
        }

        #[test]
        fn test_root_prefix_is_case_insensitive_but_names_are_not() {
            let fs = setup_test_vfs();
            assert!(fs.full_path("c:\\scripts").is_ok());
            let error = fs.full_path("C:\\Scripts").unwrap_err();
            assert!(matches!(kind_of(error), FsError::NotFound { .. }));
        }

        #[test]
        fn test_resolve_returns_nodes() -> Result<()> {
            let fs = setup_test_vfs();
            let id = fs.resolve("scripts/lib")?;
            let node = fs.node(id);
            assert_eq!(node.name(), "lib");
            assert!(node.is_dir());
            assert_eq!(fs.resolve("scripts\\lib\\..")?, fs.resolve("C:\\scripts")?);
            Ok(())
        }

        #[test]
        fn test_empty_path_error() {
            let fs = setup_test_vfs();
            let error = fs.full_path("").unwrap_err();
            assert!(matches!(kind_of(error), FsError::InvalidPath { .. }));
        }
    }

    mod ls {
        use super::*;

        #[test]
        fn test_ls_root() -> Result<()> {
            let fs = setup_test_vfs();
            assert_eq!(fs.ls("C:")?, vec!["readme.md", "docs", "scripts"]);
            Ok(())
        }

        #[test]
        fn test_ls_file() -> Result<()> {
            let fs = setup_test_vfs();
            assert_eq!(fs.ls("scripts/main.csx")?, vec!["main.csx"]);
            Ok(())
        }

        #[test]
        fn test_ls_nonexistent_error() {
            let fs = setup_test_vfs();
            assert!(fs.ls("nope").is_err());
        }
    }
}
