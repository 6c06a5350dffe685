//! Navigation builtins (cd, pwd)

use super::{Builtin, Context};
use crate::error::Reason;
use crate::fs::normalize;
use crate::interpreter::ExecResult;

/// The cd builtin - change directory.
///
/// No argument means home; `~` and `~/...` expand to home.
pub struct Cd;

impl Builtin for Cd {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let typed = ctx.args.first().map(String::as_str).unwrap_or("~");
        let target = ctx.config.expand_home(typed);

        let reason = match ctx.tree.resolve(&target, ctx.cwd) {
            Some(node) if node.is_dir() => {
                return ExecResult::new(ctx.tree.clone(), normalize(&target, ctx.cwd));
            }
            Some(_) => Reason::NotADirectory,
            None => Reason::NotFound,
        };
        ctx.reply(format!("bash: cd: {typed}: {reason}"))
    }
}

/// The pwd builtin - print working directory.
pub struct Pwd;

impl Builtin for Pwd {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        ctx.reply(ctx.cwd)
    }
}
