//! Virtual filesystem for Playground
//!
//! - `path`: string-level normalization against a working directory
//! - `Node`: the tagged dir/file tree node
//! - `Tree`: an immutable snapshot with copy-on-write mutation primitives
//! - completions for the terminal's tab key

mod completion;
mod node;
mod path;
mod tree;

pub use node::{DIR_SIZE, Node};
pub use path::{normalize, segments};
pub use tree::{DEFAULT_HOME, DirEntry, FileOptions, Listing, MAX_DEPTH, Tree};
