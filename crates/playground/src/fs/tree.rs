//! Persistent filesystem tree
//!
//! [`Tree`] is an immutable value. Every mutating method takes `&self` and returns
//! a brand-new tree; the receiver is never touched. Internally this is path
//! copying: `Arc::make_mut` clones only the nodes on the spine from the root to
//! the mutation point, and every untouched subtree stays shared between the old
//! and the new snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::node::Node;
use super::path::{self, is_within};
use crate::error::{FsError, FsResult, Reason};

/// Home directory of the canonical default tree.
pub const DEFAULT_HOME: &str = "/home/user";

/// Deepest nesting a mutation may produce, counted in segments below `/`.
///
/// Dropping a tree recurses once per level, so an unbounded `mkdir -p` would
/// overflow the stack. Every tree within this depth also stays under
/// serde_json's nesting limit when saved in a session snapshot.
pub const MAX_DEPTH: usize = 60;

/// One filesystem snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    root: Arc<Node>,
}

/// Extra attributes for [`Tree::create_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOptions {
    /// `Some` sets the binary flag on creation and on overwrite.
    pub is_binary: Option<bool>,
}

/// A directory entry borrowed from a tree.
#[derive(Debug, Clone, Copy)]
pub struct DirEntry<'a> {
    /// Entry name (not full path)
    pub name: &'a str,
    /// The node itself
    pub node: &'a Node,
}

/// Result of [`Tree::list_directory`].
#[derive(Debug, Clone)]
pub enum Listing<'a> {
    /// The path named a file; only its own name is listed.
    File(&'a Node),
    /// Every child of the directory, in lexicographic order, dotfiles included.
    Directory(Vec<DirEntry<'a>>),
}

impl Listing<'_> {
    /// Raw entry names.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Listing::File(node) => vec![node.name()],
            Listing::Directory(entries) => entries.iter().map(|e| e.name).collect(),
        }
    }
}

impl Default for Tree {
    /// The reset state: `/home/user`, empty.
    fn default() -> Self {
        let root = Node::dir("/").with_child(Node::dir("home").with_child(Node::dir("user")));
        Self::from_root(root)
    }
}

impl Tree {
    /// Wrap an arbitrary root node.
    pub fn from_root(root: Node) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    // ==================== resolution ====================

    /// Find the node at `path`, resolved against `cwd`.
    ///
    /// Returns `None` when a segment is missing or an intermediate segment is a
    /// file.
    pub fn resolve(&self, path: &str, cwd: &str) -> Option<&Node> {
        self.lookup(&path::segments(path, cwd))
    }

    /// Find the parent of `path` plus the final segment name.
    ///
    /// `(None, None)` for the root, which has no parent.
    pub fn resolve_parent(&self, path: &str, cwd: &str) -> (Option<&Node>, Option<String>) {
        let mut segs = path::segments(path, cwd);
        match segs.pop() {
            Some(name) => (self.lookup(&segs), Some(name)),
            None => (None, None),
        }
    }

    pub fn exists(&self, path: &str, cwd: &str) -> bool {
        self.resolve(path, cwd).is_some()
    }

    /// Whether `path` names an existing directory.
    pub fn is_dir(&self, path: &str, cwd: &str) -> bool {
        self.resolve(path, cwd).is_some_and(Node::is_dir)
    }

    fn lookup(&self, segments: &[String]) -> Option<&Node> {
        let mut node: &Node = &self.root;
        for seg in segments {
            node = node.child(seg)?;
        }
        Some(node)
    }

    /// The directory at `segments`, or why it cannot serve as a parent.
    fn parent_dir(&self, segments: &[String]) -> Result<&Node, Reason> {
        match self.lookup(segments) {
            None => Err(Reason::NotFound),
            Some(node) if node.is_dir() => Ok(node),
            Some(_) => Err(Reason::NotADirectory),
        }
    }

    // ==================== queries ====================

    /// List `path`. A file lists as itself.
    pub fn list_directory(&self, path: &str, cwd: &str) -> FsResult<Listing<'_>> {
        let node = self
            .resolve(path, cwd)
            .ok_or_else(|| FsError::CannotAccess(path.to_string()))?;
        match node.children() {
            None => Ok(Listing::File(node)),
            Some(children) => Ok(Listing::Directory(
                children
                    .iter()
                    .map(|(name, node)| DirEntry {
                        name,
                        node: node.as_ref(),
                    })
                    .collect(),
            )),
        }
    }

    /// Read a file's content.
    pub fn read_file(&self, path: &str, cwd: &str) -> FsResult<&str> {
        let read_err = |reason| FsError::Read {
            path: path.to_string(),
            reason,
        };
        match self.resolve(path, cwd) {
            None => Err(read_err(Reason::NotFound)),
            Some(node) => node.content().ok_or_else(|| read_err(Reason::IsADirectory)),
        }
    }

    // ==================== mutations ====================

    /// Create a directory; with `recursive`, create every missing ancestor too.
    pub fn make_directory(&self, path: &str, cwd: &str, recursive: bool) -> FsResult<Tree> {
        let mkdir_err = |reason| FsError::Mkdir {
            path: path.to_string(),
            reason,
        };
        let mut segs = path::segments(path, cwd);
        if segs.is_empty() {
            return Err(FsError::Mkdir {
                path: "/".to_string(),
                reason: Reason::FileExists,
            });
        }
        check_depth("mkdir", path, segs.len())?;

        let mut root = Arc::clone(&self.root);

        if recursive {
            let mut node = Arc::make_mut(&mut root);
            for seg in &segs {
                let children = node
                    .children_mut()
                    .ok_or_else(|| mkdir_err(Reason::NotADirectory))?;
                let child = children
                    .entry(seg.clone())
                    .or_insert_with(|| Arc::new(Node::dir(seg.as_str())));
                if !child.is_dir() {
                    return Err(mkdir_err(Reason::NotADirectory));
                }
                node = Arc::make_mut(child);
            }
            return Ok(Tree { root });
        }

        let Some(name) = segs.pop() else {
            return Err(mkdir_err(Reason::FileExists));
        };
        let parent = self.parent_dir(&segs).map_err(mkdir_err)?;
        if parent.child(&name).is_some() {
            return Err(mkdir_err(Reason::FileExists));
        }
        insert(&mut root, &segs, Node::dir(name.as_str()));
        Ok(Tree { root })
    }

    /// Create a file if absent.
    ///
    /// An existing file is only rewritten when `content` is non-empty, so repeated
    /// calls with no content behave like `touch`.
    pub fn create_file(
        &self,
        path: &str,
        cwd: &str,
        content: &str,
        opts: FileOptions,
    ) -> FsResult<Tree> {
        let touch_err = |reason| FsError::Touch {
            path: path.to_string(),
            reason,
        };
        let mut segs = path::segments(path, cwd);
        check_depth("touch", path, segs.len())?;
        let Some(name) = segs.pop() else {
            return Err(FsError::TouchRoot);
        };
        let parent = self.parent_dir(&segs).map_err(touch_err)?;

        let updated = match parent.child(&name) {
            None => Node::File {
                name: name.clone(),
                content: content.to_string(),
                is_binary: opts.is_binary.unwrap_or(false),
            },
            Some(_) if content.is_empty() => return Ok(self.clone()),
            Some(Node::Dir { .. }) => return Err(touch_err(Reason::IsADirectory)),
            Some(Node::File { is_binary, .. }) => Node::File {
                name: name.clone(),
                content: content.to_string(),
                is_binary: opts.is_binary.unwrap_or(*is_binary),
            },
        };

        let mut root = Arc::clone(&self.root);
        insert(&mut root, &segs, updated);
        Ok(Tree { root })
    }

    /// Overwrite or append to a file, creating it if absent.
    pub fn write_file(&self, path: &str, cwd: &str, content: &str, append: bool) -> FsResult<Tree> {
        let redirect_err = |reason| FsError::Redirect {
            path: path.to_string(),
            reason,
        };
        let mut segs = path::segments(path, cwd);
        check_depth("bash", path, segs.len())?;
        let Some(name) = segs.pop() else {
            return Err(FsError::WriteRoot);
        };
        let parent = self.parent_dir(&segs).map_err(redirect_err)?;

        let updated = match parent.child(&name) {
            None => Node::file(name.as_str(), content),
            Some(Node::Dir { .. }) => return Err(redirect_err(Reason::IsADirectory)),
            Some(Node::File {
                content: existing,
                is_binary,
                ..
            }) => Node::File {
                name: name.clone(),
                content: if append {
                    format!("{existing}{content}")
                } else {
                    content.to_string()
                },
                is_binary: *is_binary,
            },
        };

        let mut root = Arc::clone(&self.root);
        insert(&mut root, &segs, updated);
        Ok(Tree { root })
    }

    /// Detach a node from its parent. Directories need `recursive`.
    pub fn remove(&self, path: &str, cwd: &str, recursive: bool) -> FsResult<Tree> {
        let remove_err = |reason| FsError::Remove {
            path: path.to_string(),
            reason,
        };
        let mut segs = path::segments(path, cwd);
        let Some(name) = segs.pop() else {
            return Err(FsError::RemoveRoot);
        };
        let target = self
            .lookup(&segs)
            .and_then(|parent| parent.child(&name))
            .ok_or_else(|| remove_err(Reason::NotFound))?;
        if target.is_dir() && !recursive {
            return Err(remove_err(Reason::IsADirectory));
        }

        let mut root = Arc::clone(&self.root);
        if let Some(children) = dir_mut(&mut root, &segs) {
            children.remove(&name);
        }
        Ok(Tree { root })
    }

    /// Copy `src` to `dest`.
    ///
    /// If `dest` is an existing directory the source lands inside it under its own
    /// name; otherwise it is copied as `dest`'s final segment.
    pub fn copy(&self, src: &str, dest: &str, cwd: &str, recursive: bool) -> FsResult<Tree> {
        let src_segs = path::segments(src, cwd);
        let src_node = self
            .lookup(&src_segs)
            .ok_or_else(|| FsError::CopySourceMissing(src.to_string()))?;
        if src_node.is_dir() && !recursive {
            return Err(FsError::OmitDirectory(src.to_string()));
        }

        let target = self
            .destination(&src_segs, dest, cwd)
            .ok_or_else(|| FsError::CopyDestination(dest.to_string()))?;
        if src_node.is_dir() && is_within(&target.segments, &src_segs) {
            return Err(FsError::CopyIntoSelf {
                src: src.to_string(),
                dest: target.display(dest),
            });
        }
        check_depth("cp", &target.display(dest), target.deepest(src_node))?;

        let (name, parent) = target.split();
        let mut root = Arc::clone(&self.root);
        insert(&mut root, parent, src_node.renamed(name));
        Ok(Tree { root })
    }

    /// Move `src` to `dest`, with the same destination rule as [`Tree::copy`].
    ///
    /// The subtree is relinked, not duplicated, and is always detached from its
    /// original parent.
    pub fn move_node(&self, src: &str, dest: &str, cwd: &str) -> FsResult<Tree> {
        let missing = || FsError::MoveSourceMissing(src.to_string());
        let src_segs = path::segments(src, cwd);
        let Some((src_name, src_parent)) = src_segs.split_last() else {
            return Err(missing());
        };
        let src_node = self.lookup(&src_segs).ok_or_else(missing)?;

        let target = self
            .destination(&src_segs, dest, cwd)
            .ok_or_else(|| FsError::MoveDestination(dest.to_string()))?;
        if target.segments == src_segs {
            return Ok(self.clone());
        }
        if is_within(&target.segments, &src_segs) {
            return Err(FsError::MoveIntoSelf {
                src: src.to_string(),
                dest: target.display(dest),
            });
        }
        check_depth("mv", &target.display(dest), target.deepest(src_node))?;

        let (name, parent) = target.split();
        let moved = src_node.renamed(name);
        let mut root = Arc::clone(&self.root);
        if let Some(children) = dir_mut(&mut root, src_parent) {
            children.remove(src_name);
        }
        insert(&mut root, parent, moved);
        Ok(Tree { root })
    }

    /// Where a copy or move of `src_segs` to `dest` lands, or `None` when the
    /// destination's parent is missing or not a directory.
    fn destination(&self, src_segs: &[String], dest: &str, cwd: &str) -> Option<Target> {
        let mut dest_segs = path::segments(dest, cwd);
        if self.lookup(&dest_segs).is_some_and(Node::is_dir) {
            let src_name = src_segs.last().cloned().unwrap_or_default();
            dest_segs.push(src_name);
            return Some(Target {
                segments: dest_segs,
                merged: true,
            });
        }
        let (_, parent) = dest_segs.split_last()?;
        self.parent_dir(parent).ok()?;
        Some(Target {
            segments: dest_segs,
            merged: false,
        })
    }
}

/// Resolved copy/move destination.
struct Target {
    /// Absolute segments of the final node location (never empty).
    segments: Vec<String>,
    /// Whether the source was placed inside an existing directory.
    merged: bool,
}

impl Target {
    fn split(&self) -> (&str, &[String]) {
        match self.segments.split_last() {
            Some((name, parent)) => (name, parent),
            None => ("", &[]),
        }
    }

    /// Depth of the deepest node once `node` is placed here.
    fn deepest(&self, node: &Node) -> usize {
        self.segments.len() - 1 + node.levels()
    }

    /// The destination as the user would recognise it in a message.
    fn display(&self, dest: &str) -> String {
        match (self.merged, self.segments.last()) {
            (true, Some(name)) => format!("{}/{}", dest.trim_end_matches('/'), name),
            _ => dest.to_string(),
        }
    }
}

fn check_depth(tool: &'static str, path: &str, depth: usize) -> FsResult<()> {
    if depth > MAX_DEPTH {
        return Err(FsError::PathTooDeep {
            tool,
            path: path.to_string(),
            limit: MAX_DEPTH,
        });
    }
    Ok(())
}

/// Mutable children of the directory at `segments`, copying every shared node on
/// the way down.
fn dir_mut<'a>(
    root: &'a mut Arc<Node>,
    segments: &[String],
) -> Option<&'a mut BTreeMap<String, Arc<Node>>> {
    let mut node = Arc::make_mut(root);
    for seg in segments {
        let child = node.children_mut()?.get_mut(seg.as_str())?;
        node = Arc::make_mut(child);
    }
    node.children_mut()
}

/// Insert (or replace) `node` under the directory at `parent`.
///
/// Callers validate the parent first; a vanished parent is silently skipped.
fn insert(root: &mut Arc<Node>, parent: &[String], node: Node) {
    if let Some(children) = dir_mut(root, parent) {
        children.insert(node.name().to_string(), Arc::new(node));
    }
}
