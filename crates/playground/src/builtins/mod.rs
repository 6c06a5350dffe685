//! Built-in shell commands
//!
//! This module provides the [`Builtin`] trait for implementing commands and the
//! [`Context`] struct they run in.
//!
//! A builtin never mutates anything: it reads the tree and working directory from
//! its context and returns an [`ExecResult`] holding the next ones. Failures are
//! output lines, not `Err`s.
//!
//! # Custom Builtins
//!
//! ```rust
//! use playground::{Builtin, BuiltinContext, ExecResult, Playground};
//!
//! struct Whoami;
//!
//! impl Builtin for Whoami {
//!     fn execute(&self, ctx: BuiltinContext<'_>) -> ExecResult {
//!         ctx.reply(ctx.config.user.clone())
//!     }
//! }
//!
//! let mut pg = Playground::builder()
//!     .builtin("whoami", Box::new(Whoami))
//!     .build();
//! assert_eq!(pg.exec("whoami").output, vec!["user"]);
//! ```

mod cat;
mod compiler;
mod diff;
mod echo;
mod exec;
mod fileops;
mod ls;
mod navigation;
mod terminal;

pub use cat::Cat;
pub use compiler::{Compiler, CompilerFlag};
pub use diff::Diff;
pub use echo::Echo;
pub use exec::Exec;
pub use fileops::{Cp, Mkdir, Mv, Rm, Touch};
pub use ls::Ls;
pub use navigation::{Cd, Pwd};
pub use terminal::{Clear, Help};

use crate::config::ShellConfig;
use crate::error::FsResult;
use crate::fs::Tree;
use crate::interpreter::ExecResult;
use crate::parser::Args;

/// Execution context for builtin commands.
pub struct Context<'a> {
    /// The command word as typed, e.g. `ls` or `./sol`.
    pub name: &'a str,

    /// Command arguments (not including the command name).
    pub args: &'a [String],

    /// Filesystem snapshot the command runs against.
    pub tree: &'a Tree,

    /// Current working directory, absolute and normalized.
    pub cwd: &'a str,

    /// Simulated environment.
    pub config: &'a ShellConfig,
}

impl<'a> Context<'a> {
    /// Split the arguments into flags and operands.
    pub fn parse_args(&self) -> Args {
        Args::parse(self.args)
    }

    /// A silent result that keeps the current state.
    pub fn unchanged(&self) -> ExecResult {
        ExecResult::new(self.tree.clone(), self.cwd)
    }

    /// Keep the current state and print one line.
    pub fn reply(&self, line: impl Into<String>) -> ExecResult {
        self.unchanged().line(line)
    }

    /// Adopt `tree`, keep the working directory.
    pub fn with_tree(&self, tree: Tree) -> ExecResult {
        ExecResult::new(tree, self.cwd)
    }

    /// Adopt the tree on success; print the error and keep the old tree otherwise.
    pub fn apply(&self, result: FsResult<Tree>) -> ExecResult {
        match result {
            Ok(tree) => self.with_tree(tree),
            Err(e) => self.reply(e.to_string()),
        }
    }

    /// Run `op` once per operand, each against the tree left by the previous one.
    ///
    /// A failing operand leaves the tree as it was and adds its message to the
    /// output; later operands still run.
    pub(crate) fn for_each_operand<F>(&self, operands: &[String], mut op: F) -> ExecResult
    where
        F: FnMut(&Tree, &str) -> FsResult<Tree>,
    {
        let mut tree = self.tree.clone();
        let mut errors = Vec::new();
        for operand in operands {
            match op(&tree, operand) {
                Ok(next) => tree = next,
                Err(e) => errors.push(e.to_string()),
            }
        }
        self.with_tree(tree).with_output(errors)
    }
}

/// Trait for implementing builtin commands.
///
/// Builtins are registered by name with the interpreter; see
/// [`PlaygroundBuilder::builtin`](crate::PlaygroundBuilder::builtin).
pub trait Builtin: Send + Sync {
    /// Execute the builtin command.
    fn execute(&self, ctx: Context<'_>) -> ExecResult;
}


#[cfg(test)]
mod tests {
    use super::testing::run;
    use super::*;
    use crate::fs::DEFAULT_HOME;

    #[test]
    fn test_for_each_operand_threads_tree_and_continues() {
        struct Both;
        impl Builtin for Both {
            fn execute(&self, ctx: Context<'_>) -> ExecResult {
                ctx.for_each_operand(ctx.args, |tree, p| tree.make_directory(p, ctx.cwd, false))
            }
        }

        let result = run(&Both, "mk", &["a", "a/b", "missing/c", "a/b/c"], &Tree::default());
        assert_eq!(
            result.output,
            vec!["mkdir: cannot create directory 'missing/c': No such file or directory"]
        );
        assert!(result.tree.is_dir("a/b/c", DEFAULT_HOME));
    }

    #[test]
    fn test_apply_keeps_tree_on_error() {
        struct Fail;
        impl Builtin for Fail {
            fn execute(&self, ctx: Context<'_>) -> ExecResult {
                ctx.apply(ctx.tree.remove("ghost", ctx.cwd, false))
            }
        }

        let tree = Tree::default();
        let result = run(&Fail, "rm", &[], &tree);
        assert_eq!(result.tree, tree);
        assert_eq!(result.output.len(), 1);
    }
}
