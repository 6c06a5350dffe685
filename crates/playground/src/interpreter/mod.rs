//! Interpreter for shell command lines
//!
//! [`Interpreter::execute`] is pure: it takes a tree and working directory and
//! returns new ones without touching its inputs or any global state.

mod state;

pub use state::ExecResult;

use std::collections::HashMap;

use crate::builtins::{self, Builtin, Context};
use crate::config::ShellConfig;
use crate::fs::{Tree, segments};
use crate::logging_impl::LogConfig;
use crate::parser::tokenize;

/// Command dispatcher.
pub struct Interpreter {
    builtins: HashMap<String, Box<dyn Builtin>>,
    config: ShellConfig,
    #[cfg_attr(not(feature = "logging"), allow(dead_code))]
    log_config: LogConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl Interpreter {
    /// Create an interpreter with every standard builtin registered.
    pub fn new(config: ShellConfig) -> Self {
        let mut builtins: HashMap<String, Box<dyn Builtin>> = HashMap::new();

        // Register builtins
        builtins.insert("pwd".into(), Box::new(builtins::Pwd));
        builtins.insert("ls".into(), Box::new(builtins::Ls));
        builtins.insert("cd".into(), Box::new(builtins::Cd));
        builtins.insert("mkdir".into(), Box::new(builtins::Mkdir));
        builtins.insert("touch".into(), Box::new(builtins::Touch));
        builtins.insert("rm".into(), Box::new(builtins::Rm));
        builtins.insert("cp".into(), Box::new(builtins::Cp));
        builtins.insert("mv".into(), Box::new(builtins::Mv));
        builtins.insert("cat".into(), Box::new(builtins::Cat));
        builtins.insert("echo".into(), Box::new(builtins::Echo));
        builtins.insert("diff".into(), Box::new(builtins::Diff));
        builtins.insert(config.compiler.clone(), Box::new(builtins::Compiler));
        builtins.insert("clear".into(), Box::new(builtins::Clear));
        builtins.insert("help".into(), Box::new(builtins::Help));

        Self {
            builtins,
            config,
            log_config: LogConfig::default(),
        }
    }

    /// Register (or replace) a builtin under `name`.
    pub fn register(&mut self, name: impl Into<String>, builtin: Box<dyn Builtin>) {
        self.builtins.insert(name.into(), builtin);
    }

    pub fn set_log_config(&mut self, log_config: LogConfig) {
        self.log_config = log_config;
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Execute one input line against `tree` at `cwd`.
    ///
    /// Never fails: errors come back as output lines with the input state.
    /// Blank input is a silent no-op.
    pub fn execute(&self, input: &str, tree: &Tree, cwd: &str) -> ExecResult {
        let line = input.trim();
        let words = tokenize(line);

        #[cfg(feature = "logging")]
        tracing::trace!(words = words.len(), "tokenized input");

        let Some((name, args)) = words.split_first() else {
            return ExecResult::new(tree.clone(), cwd);
        };

        #[cfg(feature = "logging")]
        tracing::debug!(
            command = %crate::logging_impl::sanitize_for_log(name),
            input = %crate::logging_impl::format_input_for_log(line, &self.log_config),
            "dispatching command"
        );

        let ctx = Context {
            name,
            args,
            tree,
            cwd,
            config: &self.config,
        };

        let mut result = if name.starts_with("./") {
            builtins::Exec.execute(ctx)
        } else {
            match self.builtins.get(name.as_str()) {
                Some(builtin) => builtin.execute(ctx),
                None => ExecResult::new(tree.clone(), cwd)
                    .line(format!("bash: {name}: command not found")),
            }
        };

        result.cwd = nearest_directory(&result.tree, &result.cwd);
        result
    }
}

/// `cwd` itself if it is still a directory in `tree`, else its deepest surviving
/// ancestor. Needed after `rm -r` or `mv` of a directory the shell is inside.
pub(crate) fn nearest_directory(tree: &Tree, cwd: &str) -> String {
    let mut segs = segments(cwd, "/");
    loop {
        let path = format!("/{}", segs.join("/"));
        if tree.is_dir(&path, "/") || segs.pop().is_none() {
            return path;
        }
    }
}
