//! Terminal builtins (clear, help)

use super::{Builtin, Context};
use crate::interpreter::ExecResult;

/// Command reference printed by `help`.
pub const HELP_TEXT: &[&str] = &[
    "Available commands:",
    "  pwd                         Print working directory",
    "  ls [-a] [-l] [path]         List directory contents",
    "  cd [path]                   Change directory",
    "  mkdir [-p] <name ...>       Create directories",
    "  touch <file ...>            Create empty files",
    "  rm [-r] <path ...>          Remove files or directories",
    "  cp [-r] <src> <dest>        Copy files or directories",
    "  mv <src> <dest>             Move or rename",
    "  cat <file>                  Display file contents",
    "  echo <text> [> file]        Print text or write to file",
    "  diff <file1> <file2>        Compare two files",
    "  g++ [flags] <file.cpp>      Compile C++ source",
    "  ./<binary> [< input]        Execute a compiled binary",
    "  clear                       Clear terminal",
    "  help                        Show this message",
];

/// The clear builtin. Prints nothing; sets `should_clear`.
pub struct Clear;

impl Builtin for Clear {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        ctx.unchanged().clear()
    }
}

/// The help builtin.
pub struct Help;

impl Builtin for Help {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        ctx.unchanged()
            .with_output(HELP_TEXT.iter().map(|s| s.to_string()).collect())
    }
}
