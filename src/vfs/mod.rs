mod config;
mod entry;
mod lines_fs;
mod tree;

pub use config::{DEFAULT_MODULES_FOLDER, LinesFSConfig, Separators};
pub use entry::{Node, NodeId, NodeKind};
pub use lines_fs::{LinesFS, fs_error};
pub use tree::Tree;
