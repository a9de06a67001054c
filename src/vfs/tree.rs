//! Arena-backed directory tree and the path resolver shared by its directories.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::core::utils;
use crate::error::{FsError, FsResult, KindName};
use crate::{Node, NodeId, NodeKind, Separators};

const CURRENT: &str = ".";
const PARENT: &str = "..";

/// A hierarchy of [`Node`]s stored in a flat arena.
///
/// Directories own their children through the `children` map; the `parent` field of
/// a node is a plain [`NodeId`], so there is no ownership cycle. Nodes are never
/// removed, which keeps every handle handed out by the tree valid.
///
/// ### Invariants
///
/// 1. The root is `NodeId(0)`, is a directory and has no parent.
/// 2. Every other node has exactly one parent, and the parent's `children` map
///    holds it under its own name.
/// 3. File lines never change after insertion.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    separators: Separators,
}

impl Tree {
    /// Creates a tree holding only the root directory.
    ///
    /// The root name must not be empty. It may contain separators (`/`, `C:\`), since
    /// rooted paths are matched by prefix rather than split.
    pub fn new(root_name: &str, separators: Separators) -> FsResult<Self> {
        if root_name.is_empty() {
            return Err(FsError::invalid(root_name, "root name must not be empty"));
        }
        Ok(Self {
            nodes: vec![Node::directory(root_name, None)],
            separators,
        })
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    /// Returns the node behind `id`.
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a file at `path` below `dir`, creating missing directories on the way.
    ///
    /// `path` must not start with a separator. Directories created before a failure
    /// stay in the tree.
    pub fn add_file(&mut self, dir: NodeId, path: &str, lines: Vec<String>) -> FsResult<NodeId> {
        let segments = utils::split_path(path, &self.separators);
        self.add_file_at(dir, &segments, path, lines)
    }

    fn add_file_at(
        &mut self,
        dir: NodeId,
        segments: &[&str],
        path: &str,
        lines: Vec<String>,
    ) -> FsResult<NodeId> {
        match segments {
            [] => Err(FsError::invalid(path, "no path segments")),
            [name] => self.insert_file(dir, name, path, lines),
            [first, rest @ ..] => {
                let next = match *first {
                    CURRENT => dir,
                    PARENT => self.parent_dir(dir, path)?,
                    name => self.ensure_directory(dir, name, path)?,
                };
                self.add_file_at(next, rest, path, lines)
            }
        }
    }

    fn insert_file(
        &mut self,
        dir: NodeId,
        name: &str,
        path: &str,
        lines: Vec<String>,
    ) -> FsResult<NodeId> {
        self.check_name(name, path)?;
        if self.child(dir, name, path)?.is_some() {
            return Err(FsError::duplicate(path));
        }
        let id = self.push(Node::file(name, dir, lines));
        self.children_mut(dir, path)?.insert(name.to_string(), id);
        debug!("file created: {}", self.full_path(id));
        Ok(id)
    }

    /// Returns the child directory `name` of `dir`, creating and linking it if absent.
    ///
    /// Repeated calls with the same name return the same directory.
    pub fn get_or_create_directory(&mut self, dir: NodeId, name: &str) -> FsResult<NodeId> {
        let path = self.join(dir, name);
        self.ensure_directory(dir, name, &path)
    }

    fn ensure_directory(&mut self, dir: NodeId, name: &str, path: &str) -> FsResult<NodeId> {
        self.check_name(name, path)?;
        if let Some(existing) = self.child(dir, name, path)? {
            return if self.node(existing).is_dir() {
                Ok(existing)
            } else {
                Err(FsError::duplicate(path))
            };
        }
        let id = self.push(Node::directory(name, Some(dir)));
        self.children_mut(dir, path)?.insert(name.to_string(), id);
        debug!("directory created: {}", self.full_path(id));
        Ok(id)
    }

    /// Looks up the file at `path` below `dir`.
    ///
    /// A missing segment, or a directory at the last segment, is `NotFound`.
    pub fn get_file(&self, dir: NodeId, path: &str) -> FsResult<NodeId> {
        let segments = utils::split_path(path, &self.separators);
        self.get_file_at(dir, &segments, path)
    }

    fn get_file_at(&self, dir: NodeId, segments: &[&str], path: &str) -> FsResult<NodeId> {
        match segments {
            [] => Err(FsError::invalid(path, "no path segments")),
            [name] => match self.child(dir, name, path)? {
                Some(id) if self.node(id).is_file() => Ok(id),
                _ => Err(FsError::not_found(path)),
            },
            [first, rest @ ..] => {
                let next = self.step(dir, first, path)?;
                self.get_file_at(next, rest, path)
            }
        }
    }

    /// Resolves `path` below `dir` to a file or directory.
    ///
    /// A leading separator is ignored, `.` stays in place and `..` moves to the
    /// parent in any position.
    pub fn get_item(&self, dir: NodeId, path: &str) -> FsResult<NodeId> {
        let all = utils::split_path(path, &self.separators);
        let segments = match all.split_first() {
            Some((&"", rest)) => rest,
            _ => &all[..],
        };
        trace!("resolving {:?} from {}", segments, self.full_path(dir));
        self.get_item_at(dir, segments, path)
    }

    fn get_item_at(&self, dir: NodeId, segments: &[&str], path: &str) -> FsResult<NodeId> {
        match segments {
            [] => Err(FsError::invalid(path, "no path segments")),
            [last] => match *last {
                CURRENT => Ok(dir),
                PARENT => self.parent_dir(dir, path),
                name => self
                    .child(dir, name, path)?
                    .ok_or_else(|| FsError::not_found(path)),
            },
            [first, rest @ ..] => {
                let next = self.step(dir, first, path)?;
                self.get_item_at(next, rest, path)
            }
        }
    }

    /// Moves one intermediate segment down (or up) from `dir`.
    fn step(&self, dir: NodeId, segment: &str, path: &str) -> FsResult<NodeId> {
        match segment {
            CURRENT => Ok(dir),
            PARENT => self.parent_dir(dir, path),
            name => match self.child(dir, name, path)? {
                Some(id) if self.node(id).is_dir() => Ok(id),
                _ => Err(FsError::not_found(path)),
            },
        }
    }

    fn parent_dir(&self, dir: NodeId, path: &str) -> FsResult<NodeId> {
        self.node(dir)
            .parent()
            .ok_or_else(|| FsError::invalid(path, "the root has no parent"))
    }

    fn child(&self, dir: NodeId, name: &str, path: &str) -> FsResult<Option<NodeId>> {
        match self.node(dir).kind() {
            NodeKind::Directory { children } => Ok(children.get(name).copied()),
            NodeKind::File { .. } => Err(FsError::wrong_kind(path, KindName::Directory)),
        }
    }

    fn children_mut(&mut self, dir: NodeId, path: &str) -> FsResult<&mut BTreeMap<String, NodeId>> {
        match self.nodes[dir.0].kind_mut() {
            NodeKind::Directory { children } => Ok(children),
            NodeKind::File { .. } => Err(FsError::wrong_kind(path, KindName::Directory)),
        }
    }

    /// A node name is a single non-empty segment other than `.` or `..`.
    fn check_name(&self, name: &str, path: &str) -> FsResult<()> {
        match name {
            "" => Err(FsError::invalid(path, "empty name")),
            CURRENT | PARENT => Err(FsError::invalid(path, "reserved name")),
            _ if name.contains(|c: char| self.separators.is_separator(c)) => {
                Err(FsError::invalid(path, "name contains a separator"))
            }
            _ => Ok(()),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Full path of `id`: the root name followed by every ancestor name, joined with
    /// the primary separator. A root name that already ends with a separator is not
    /// followed by another one.
    pub fn full_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            names.push(node.name());
            current = node.parent();
        }
        let mut path = String::new();
        for (i, name) in names.iter().rev().enumerate() {
            if i > 0 && !path.ends_with(|c: char| self.separators.is_separator(c)) {
                path.push(self.separators.primary);
            }
            path.push_str(name);
        }
        path
    }

    fn join(&self, dir: NodeId, name: &str) -> String {
        format!("{}{}{}", self.full_path(dir), self.separators.primary, name)
    }

    /// Names of the immediate children of `dir`: files first, then directories,
    /// each group ordered by name.
    pub fn list(&self, dir: NodeId, path: &str) -> FsResult<Vec<String>> {
        let children = match self.node(dir).kind() {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => return Err(FsError::wrong_kind(path, KindName::Directory)),
        };
        let (files, dirs): (Vec<_>, Vec<_>) = children
            .iter()
            .partition(|&(_, &id)| self.node(id).is_file());
        Ok(files
            .into_iter()
            .chain(dirs)
            .map(|(name, _)| name.clone())
            .collect())
    }
}
