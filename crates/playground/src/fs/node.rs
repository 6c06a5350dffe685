//! Filesystem node definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Size reported for every directory in long listings.
pub const DIR_SIZE: u64 = 4096;

/// A node in the virtual filesystem tree.
///
/// Serializes to the plain nested-object snapshot shape:
/// `{"type":"dir","name":"home","children":{...}}` and
/// `{"type":"file","name":"a.cpp","content":"...","isBinary":false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Directory
    #[serde(rename = "dir")]
    Dir {
        name: String,
        #[serde(default)]
        children: BTreeMap<String, Arc<Node>>,
    },
    /// Regular file
    #[serde(rename = "file")]
    File {
        name: String,
        #[serde(default)]
        content: String,
        /// Set only on simulated compiler output.
        #[serde(rename = "isBinary", default)]
        is_binary: bool,
    },
}

impl Node {
    /// Create an empty directory node.
    pub fn dir(name: impl Into<String>) -> Self {
        Node::Dir {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// Create a text file node.
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Node::File {
            name: name.into(),
            content: content.into(),
            is_binary: false,
        }
    }

    /// Create a simulated compiled binary.
    pub fn binary(name: impl Into<String>, content: impl Into<String>) -> Self {
        Node::File {
            name: name.into(),
            content: content.into(),
            is_binary: true,
        }
    }

    /// Add a child, keyed by its own name. Builder-style, for fixtures.
    pub fn with_child(mut self, child: Node) -> Self {
        if let Node::Dir { children, .. } = &mut self {
            children.insert(child.name().to_string(), Arc::new(child));
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Dir { name, .. } | Node::File { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    /// True only for simulated compiler output.
    pub fn is_binary(&self) -> bool {
        matches!(self, Node::File { is_binary: true, .. })
    }

    /// Children of a directory; `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<String, Arc<Node>>> {
        match self {
            Node::Dir { children, .. } => Some(children),
            Node::File { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, Arc<Node>>> {
        match self {
            Node::Dir { children, .. } => Some(children),
            Node::File { .. } => None,
        }
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children()?.get(name).map(Arc::as_ref)
    }

    /// File content; `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match self {
            Node::File { content, .. } => Some(content),
            Node::Dir { .. } => None,
        }
    }

    /// Size in bytes as shown by `ls -l`.
    pub fn size(&self) -> u64 {
        match self {
            Node::Dir { .. } => DIR_SIZE,
            Node::File { content, .. } => content.len() as u64,
        }
    }

    /// Number of levels in this subtree, counting the node itself.
    ///
    /// Walks with an explicit stack so an untrusted tree cannot exhaust the
    /// call stack.
    pub fn levels(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Some(children) = node.children() {
                stack.extend(children.values().map(|c| (c.as_ref(), level + 1)));
            }
        }
        deepest
    }

    /// A copy of this node under a different name.
    ///
    /// Children are shared, not duplicated; every mutation path copies before
    /// writing, so the copy and the original can never observe each other.
    pub(crate) fn renamed(&self, new_name: &str) -> Node {
        let mut copy = self.clone();
        match &mut copy {
            Node::Dir { name, .. } | Node::File { name, .. } => *name = new_name.to_string(),
        }
        copy
    }
}
