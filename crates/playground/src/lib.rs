//! Playground - an in-memory Linux shell for learning the command line
//!
//! A sandboxed, persistent filesystem tree plus a small shell that drives it,
//! with a mission curriculum layered on top. Nothing touches the host: no real
//! files, no processes, no clock.
//!
//! # Example
//!
//! ```rust
//! use playground::Playground;
//!
//! let mut pg = Playground::new();
//! pg.exec("mkdir -p CP/Codeforces/Round900");
//! pg.exec("cd CP/Codeforces/Round900");
//! let result = pg.exec("pwd");
//! assert_eq!(result.output, vec!["/home/user/CP/Codeforces/Round900"]);
//! ```
//!
//! # Pure entry points
//!
//! [`execute`] and [`get_completions`] take the state explicitly and return new
//! values; the tree passed in is never modified.
//!
//! ```rust
//! use playground::{Tree, execute};
//!
//! let before = Tree::default();
//! let result = execute("touch a.txt", &before, "/home/user");
//! assert!(result.tree.exists("a.txt", "/home/user"));
//! assert!(!before.exists("a.txt", "/home/user"));
//! ```

mod builtins;
mod config;
mod error;
mod fs;
mod interpreter;
mod logging_impl;
pub mod mission;
mod parser;
mod session;

pub use builtins::{Builtin, CompilerFlag, Context as BuiltinContext};
pub use config::ShellConfig;
pub use error::{Error, ErrorKind, FsError, FsResult, Reason, Result};
pub use fs::{
    DEFAULT_HOME, DIR_SIZE, DirEntry, FileOptions, Listing, MAX_DEPTH, Node, Tree, normalize,
    segments,
};
pub use interpreter::{ExecResult, Interpreter};
pub use logging_impl::LogConfig;
pub use mission::{Mission, Progress, ProgressUpdate, Substep, Validator, curriculum};
pub use parser::{Args, Flag, FlagSet, Lexer, tokenize};
pub use session::{STORAGE_VERSION, SessionSnapshot};

/// Logging helpers, for callers that log command input themselves.
pub mod logging {
    pub use crate::logging_impl::{LogConfig, format_input_for_log, sanitize_for_log};
}

/// Execute one command line with the default environment.
pub fn execute(input: &str, tree: &Tree, cwd: &str) -> ExecResult {
    Interpreter::default().execute(input, tree, cwd)
}

/// Tab-completion candidates for `partial` typed at `cwd`.
pub fn get_completions(tree: &Tree, partial: &str, cwd: &str) -> Vec<String> {
    tree.completions(partial, cwd)
}

/// A learner's session: current tree, directory, history and mission progress.
pub struct Playground {
    interpreter: Interpreter,
    tree: Tree,
    cwd: String,
    history: Vec<String>,
    progress: Progress,
    last_update: ProgressUpdate,
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}

impl Playground {
    /// A fresh session in the canonical reset state.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new PlaygroundBuilder for customized configuration.
    pub fn builder() -> PlaygroundBuilder {
        PlaygroundBuilder::default()
    }

    /// Run one line and adopt the resulting state.
    ///
    /// Non-blank lines are appended to the history and checked against the
    /// mission curriculum; see [`Playground::last_update`]. A line that clears
    /// the screen is neither recorded nor checked.
    pub fn exec(&mut self, line: &str) -> ExecResult {
        let result = self.interpreter.execute(line, &self.tree, &self.cwd);
        self.tree = result.tree.clone();
        self.cwd = result.cwd.clone();

        self.last_update = if line.trim().is_empty() || result.should_clear {
            ProgressUpdate::default()
        } else {
            self.history.push(line.to_string());
            self.progress.record(&self.tree, &self.cwd, &self.history)
        };
        result
    }

    /// Back to the canonical default tree, home directory and fresh progress.
    pub fn reset(&mut self) {
        self.tree = Tree::default();
        self.cwd = self.interpreter.config().home.clone();
        self.history.clear();
        self.progress = Progress::new();
        self.last_update = ProgressUpdate::default();

        #[cfg(feature = "logging")]
        tracing::info!("session reset");
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Raw non-blank lines in the order they were run.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Mission progress made by the most recent [`Playground::exec`].
    pub fn last_update(&self) -> &ProgressUpdate {
        &self.last_update
    }

    /// Show a different unlocked level.
    pub fn select_level(&mut self, level: u32) -> bool {
        self.progress.select_level(level)
    }

    /// Tab-completion candidates at the current directory.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        self.tree.completions(partial, &self.cwd)
    }

    /// The working directory with the home prefix shown as `~`.
    pub fn display_path(&self) -> String {
        let home = &self.interpreter.config().home;
        if self.cwd == *home {
            return "~".to_string();
        }
        match self.cwd.strip_prefix(home.as_str()) {
            Some(rest) if rest.starts_with('/') => format!("~{rest}"),
            _ => self.cwd.clone(),
        }
    }

    /// Shell prompt, e.g. `user@linux:~/CP$ `.
    pub fn prompt(&self) -> String {
        format!(
            "{}@linux:{}$ ",
            self.interpreter.config().user,
            self.display_path()
        )
    }
}

/// Builder for customized Playground configuration.
#[derive(Default)]
pub struct PlaygroundBuilder {
    config: ShellConfig,
    cwd: Option<String>,
    tree: Option<Tree>,
    log_config: Option<LogConfig>,
    builtins: Vec<(String, Box<dyn Builtin>)>,
}

impl PlaygroundBuilder {
    /// Set the home directory (target of `cd` and `~`).
    pub fn home(mut self, home: impl Into<String>) -> Self {
        self.config.home = home.into();
        self
    }

    /// Set the owner name shown by `ls -l` and in the prompt.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = user.into();
        self
    }

    /// Set the placeholder timestamp shown by `ls -l`.
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.config.timestamp = timestamp.into();
        self
    }

    /// Set the command word of the compiler simulation.
    pub fn compiler(mut self, word: impl Into<String>) -> Self {
        self.config.compiler = word.into();
        self
    }

    /// Set the starting directory. Defaults to home.
    pub fn cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Start from an existing tree instead of the default one.
    pub fn tree(mut self, tree: Tree) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = Some(log_config);
        self
    }

    /// Register a custom builtin command.
    pub fn builtin(mut self, name: impl Into<String>, builtin: Box<dyn Builtin>) -> Self {
        self.builtins.push((name.into(), builtin));
        self
    }

    /// Build the Playground instance.
    ///
    /// A starting directory that is not a directory in the tree is replaced by
    /// its deepest existing ancestor.
    pub fn build(self) -> Playground {
        let tree = self.tree.unwrap_or_default();
        let cwd = self.cwd.unwrap_or_else(|| self.config.home.clone());
        let cwd = interpreter::nearest_directory(&tree, &normalize(&cwd, "/"));

        let mut interpreter = Interpreter::new(self.config);
        if let Some(log_config) = self.log_config {
            interpreter.set_log_config(log_config);
        }
        for (name, builtin) in self.builtins {
            interpreter.register(name, builtin);
        }

        Playground {
            interpreter,
            tree,
            cwd,
            history: Vec::new(),
            progress: Progress::new(),
            last_update: ProgressUpdate::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exec_adopts_state() {
        let mut pg = Playground::new();
        pg.exec("mkdir docs");
        pg.exec("cd docs");
        assert_eq!(pg.cwd(), "/home/user/docs");
        assert!(pg.tree().is_dir("/home/user/docs", "/"));
    }

    #[test]
    fn test_blank_lines_not_recorded() {
        let mut pg = Playground::new();
        pg.exec("   ");
        pg.exec("pwd");
        assert_eq!(pg.history(), &["pwd".to_string()]);
    }

    #[test]
    fn test_clear_not_recorded() {
        let mut pg = Playground::new();
        pg.exec("ls");
        pg.exec("clear");
        assert_eq!(pg.history(), &["ls".to_string()]);
        assert_eq!(pg.last_update(), &ProgressUpdate::default());
    }

    #[test]
    fn test_mission_progress_through_exec() {
        let mut pg = Playground::new();
        pg.exec("mkdir -p CP/Codeforces/Round900");
        assert_eq!(pg.last_update().completed_substeps, vec!["1.1"]);
        pg.exec("cd CP/Codeforces/Round900");
        assert_eq!(pg.last_update().completed_substeps, vec!["1.2"]);
        assert_eq!(pg.progress().completed_count(), 2);
    }

    #[test]
    fn test_reset() {
        let mut pg = Playground::new();
        pg.exec("mkdir -p CP/Codeforces/Round900");
        pg.exec("cd CP");
        pg.reset();
        assert_eq!(pg.tree(), &Tree::default());
        assert_eq!(pg.cwd(), DEFAULT_HOME);
        assert!(pg.history().is_empty());
        assert_eq!(pg.progress(), &Progress::new());
    }

    #[test]
    fn test_prompt() {
        let mut pg = Playground::new();
        assert_eq!(pg.prompt(), "user@linux:~$ ");
        pg.exec("mkdir CP");
        pg.exec("cd CP");
        assert_eq!(pg.display_path(), "~/CP");
        pg.exec("cd /home");
        assert_eq!(pg.prompt(), "user@linux:/home$ ");
    }

    #[test]
    fn test_display_path_needs_segment_boundary() {
        let tree = Tree::default().make_directory("/home/username", "/", false).unwrap();
        let pg = Playground::builder().tree(tree).cwd("/home/username").build();
        assert_eq!(pg.display_path(), "/home/username");
    }

    #[test]
    fn test_builder_custom_home_and_user() {
        let tree = Tree::default().make_directory("/home/ada", "/", false).unwrap();
        let mut pg = Playground::builder()
            .tree(tree)
            .home("/home/ada")
            .user("ada")
            .build();
        assert_eq!(pg.cwd(), "/home/ada");
        pg.exec("touch f");
        assert_eq!(
            pg.exec("ls -l").output,
            vec!["-rw-r--r-- 1 ada ada     0 Jan  1 00:00 f"]
        );
        pg.exec("cd /");
        pg.exec("cd");
        assert_eq!(pg.cwd(), "/home/ada");
    }

    #[test]
    fn test_builder_invalid_cwd_falls_back() {
        let pg = Playground::builder().cwd("/home/user/missing/deep").build();
        assert_eq!(pg.cwd(), "/home/user");
    }

    #[test]
    fn test_free_functions() {
        let tree = execute("mkdir src", &Tree::default(), DEFAULT_HOME).tree;
        assert_eq!(get_completions(&tree, "s", DEFAULT_HOME), vec!["src/"]);
    }
}
