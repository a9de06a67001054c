//! An in-memory, line-based virtual file tree for Rust tests.
//!
//! ### Overview
//!
//! `vfs-lines` lets a test describe a small drive (`C:\scripts\main.csx`, ...) as a set of
//! files holding lines of text, and lets the code under test resolve paths against it
//! without touching the real disk.
//!
//! **Key ideas**:
//! - **Population**: `mkfile()` places a file at a path relative to the current directory,
//!   creating the missing directories on the way.
//! - **Resolution**: paths starting with the root name resolve from the root, others from
//!   the current directory; `.` and `..` work as on a real file system.
//! - **Ownership**: nodes live in an arena and refer to their parent by handle, so the tree
//!   has no reference cycles.
//! - **Clarity**: every failure is an [`FsError`] naming the path that was asked for.
//!
//! ```
//! use vfs_lines::{FsBackend, LinesFS};
//!
//! let mut fs = LinesFS::new("C:").unwrap();
//! fs.mkfile("scripts/main.csx", &["print 1"]).unwrap();
//! fs.cd("scripts").unwrap();
//! assert_eq!(fs.read_lines("main.csx").unwrap(), ["print 1"]);
//! assert_eq!(fs.full_path("..").unwrap(), "C:");
//! ```

mod core;
mod error;
mod vfs;

pub use crate::core::{FsBackend, Result, utils};
pub use error::{FsError, FsResult, KindName};
pub use vfs::{
    DEFAULT_MODULES_FOLDER, LinesFS, LinesFSConfig, Node, NodeId, NodeKind, Separators, Tree,
    fs_error,
};
