use std::collections::BTreeMap;

/// Handle of a node inside the tree arena.
///
/// Handles are only produced by the tree that owns the node, so they stay valid
/// for the lifetime of that tree (nodes are never removed).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Line-split content, fixed at creation.
    File { lines: Vec<String> },
    /// Children keyed by name; one child per name regardless of its kind.
    Directory { children: BTreeMap<String, NodeId> },
}

/// A named file or directory.
///
/// `parent` is a plain handle used for `..` navigation and full path
/// reconstruction; the parent's `children` map is what owns the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn file(name: &str, parent: NodeId, lines: Vec<String>) -> Node {
        Node {
            name: name.to_string(),
            parent: Some(parent),
            kind: NodeKind::File { lines },
        }
    }

    pub(crate) fn directory(name: &str, parent: Option<NodeId>) -> Node {
        Node {
            name: name.to_string(),
            parent,
            kind: NodeKind::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns file lines, or `None` for a directory.
    pub fn lines(&self) -> Option<&[String]> {
        match &self.kind {
            NodeKind::File { lines } => Some(lines),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Returns the child map, or `None` for a file.
    pub fn children(&self) -> Option<&BTreeMap<String, NodeId>> {
        match &self.kind {
            NodeKind::File { .. } => None,
            NodeKind::Directory { children } => Some(children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_node() {
        let root = Node::directory("C:", None);
        assert_eq!(root.name(), "C:");
        assert!(root.is_dir());
        assert!(!root.is_file());
        assert!(root.is_root());
        assert!(root.lines().is_none());
        assert_eq!(root.children().map(|c| c.len()), Some(0));
    }

    #[test]
    fn test_file_node() {
        let file = Node::file("main.csx", NodeId(0), vec!["print 1".into()]);
        assert_eq!(file.name(), "main.csx");
        assert!(file.is_file());
        assert!(!file.is_root());
        assert_eq!(file.parent(), Some(NodeId(0)));
        assert_eq!(file.lines(), Some(&["print 1".to_string()][..]));
        assert!(file.children().is_none());
    }
}
