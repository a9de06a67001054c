use thiserror::Error;

use crate::NodeKind;

pub type FsResult<T> = std::result::Result<T, FsError>;

/// Failures raised by tree lookups and insertions.
///
/// Every variant carries the path as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{path} does not exist")]
    NotFound { path: String },

    #[error("{path} is not a {expected}")]
    WrongKind { path: String, expected: KindName },

    #[error("{path} already exists")]
    DuplicateEntry { path: String },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

/// Which kind of node an operation expected to find.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KindName {
    File,
    Directory,
}

impl std::fmt::Display for KindName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KindName::File => f.write_str("file"),
            KindName::Directory => f.write_str("directory"),
        }
    }
}

impl From<&NodeKind> for KindName {
    fn from(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::File { .. } => KindName::File,
            NodeKind::Directory { .. } => KindName::Directory,
        }
    }
}

impl FsError {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        FsError::NotFound { path: path.into() }
    }

    pub(crate) fn invalid(path: impl Into<String>, reason: &'static str) -> Self {
        FsError::InvalidPath {
            path: path.into(),
            reason,
        }
    }

    pub(crate) fn duplicate(path: impl Into<String>) -> Self {
        FsError::DuplicateEntry { path: path.into() }
    }

    /// Replaces the reported path, keeping the kind.
    pub(crate) fn at(self, requested: &str) -> Self {
        let path = requested.to_string();
        match self {
            FsError::NotFound { .. } => FsError::NotFound { path },
            FsError::WrongKind { expected, .. } => FsError::WrongKind { path, expected },
            FsError::DuplicateEntry { .. } => FsError::DuplicateEntry { path },
            FsError::InvalidPath { reason, .. } => FsError::InvalidPath { path, reason },
        }
    }

    pub(crate) fn wrong_kind(path: impl Into<String>, expected: KindName) -> Self {
        FsError::WrongKind {
            path: path.into(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_the_path() {
        assert_eq!(
            FsError::not_found("a\\b.txt").to_string(),
            "a\\b.txt does not exist"
        );
        assert_eq!(
            FsError::wrong_kind("scripts", KindName::File).to_string(),
            "scripts is not a file"
        );
        assert_eq!(
            FsError::duplicate("main.csx").to_string(),
            "main.csx already exists"
        );
        assert_eq!(
            FsError::invalid("..", "the root has no parent").to_string(),
            "invalid path '..': the root has no parent"
        );
    }

    #[test]
    fn test_at_keeps_kind() {
        let error = FsError::invalid("..", "the root has no parent").at("C:\\..");
        assert_eq!(
            error,
            FsError::InvalidPath {
                path: "C:\\..".into(),
                reason: "the root has no parent"
            }
        );
    }

    #[test]
    fn test_kind_name_from_node_kind() {
        let file = NodeKind::File { lines: vec![] };
        let dir = NodeKind::Directory {
            children: Default::default(),
        };
        assert_eq!(KindName::from(&file), KindName::File);
        assert_eq!(KindName::from(&dir), KindName::Directory);
    }
}
