use crate::NodeId;

/// Store-level surface shared by line-based backends.
///
/// Paths are strings with segments separated by the backend's separators. A path
/// that starts with the root name is resolved from the root, anything else from
/// the current directory.
pub trait FsBackend {
    /// Returns the root directory name.
    fn root(&self) -> &str;

    /// Returns the full path of the current directory.
    fn cwd(&self) -> String;

    /// Changes the current directory. The target must be an existing directory.
    fn cd(&mut self, path: &str) -> Result<()>;

    /// Creates a file relative to the current directory, creating missing
    /// parent directories on the way.
    fn mkfile(&mut self, path: &str, lines: &[&str]) -> Result<()>;

    /// Reads the lines of an existing file.
    fn read_lines(&self, path: &str) -> Result<Vec<String>>;

    /// Resolves `path` to a node.
    fn resolve(&self, path: &str) -> Result<NodeId>;

    /// Returns the full path of the node at `path`.
    fn full_path(&self, path: &str) -> Result<String>;

    /// Returns the full path of the directory `path` lives in: the directory itself,
    /// or the parent of a file.
    fn working_dir(&self, path: &str) -> Result<String>;
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub mod utils {
    use crate::Separators;

    /// Splits `path` on both separators, keeping empty segments.
    ///
    /// `"\\a\\b"` becomes `["", "a", "b"]`; the caller decides what a leading
    /// empty segment means.
    pub fn split_path<'a>(path: &'a str, separators: &Separators) -> Vec<&'a str> {
        path.split(|c: char| separators.is_separator(c)).collect()
    }

    /// Splits text into lines on `\r\n`, `\n` or `\r`.
    /// A trailing terminator does not produce an extra empty line.
    pub fn split_lines(text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            match rest.find(['\r', '\n']) {
                Some(pos) => {
                    lines.push(rest[..pos].to_string());
                    let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                    rest = &rest[pos + skip..];
                }
                None => {
                    lines.push(rest.to_string());
                    rest = "";
                }
            }
        }
        lines
    }

}
