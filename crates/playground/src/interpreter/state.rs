//! Interpreter state types

use crate::fs::Tree;

/// Result of executing one command line.
///
/// Always carries a usable tree and working directory: on failure these are the
/// ones that were passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Lines to display, errors included.
    pub output: Vec<String>,
    /// Filesystem after the command.
    pub tree: Tree,
    /// Working directory after the command.
    pub cwd: String,
    /// Whether the caller should discard previously displayed output.
    pub should_clear: bool,
}

impl ExecResult {
    /// A silent result with the given state.
    pub fn new(tree: Tree, cwd: impl Into<String>) -> Self {
        Self {
            output: Vec::new(),
            tree,
            cwd: cwd.into(),
            should_clear: false,
        }
    }

    /// Replace the output lines.
    pub fn with_output(mut self, output: Vec<String>) -> Self {
        self.output = output;
        self
    }

    /// Append one output line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.output.push(line.into());
        self
    }

    /// Request a display clear.
    pub fn clear(mut self) -> Self {
        self.should_clear = true;
        self
    }

    /// Whether nothing was printed.
    pub fn is_silent(&self) -> bool {
        self.output.is_empty()
    }
}
