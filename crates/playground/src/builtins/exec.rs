//! `./program` invocation
//!
//! Runs nothing. Any file "executes" by printing a trace line with fixed timing
//! figures.

use super::{Builtin, Context};
use crate::interpreter::ExecResult;

/// Runs `./name [< input]`. Dispatched for any command word starting with `./`.
pub struct Exec;

impl Builtin for Exec {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let cmd = ctx.name;
        let program = cmd.strip_prefix("./").unwrap_or(cmd);

        match ctx.tree.resolve(program, ctx.cwd) {
            None => return ctx.reply(format!("bash: {cmd}: No such file or directory")),
            Some(node) if node.is_dir() => return ctx.reply(format!("bash: {cmd}: Is a directory")),
            Some(_) => {}
        }

        // A trailing `<` with no file name runs without input.
        let input = ctx
            .args
            .iter()
            .position(|w| w == "<")
            .and_then(|lt| ctx.args.get(lt + 1));
        match input {
            None => ctx.reply(format!("[Executed {cmd} — 0ms, 0 KB]")),
            Some(input) if !ctx.tree.exists(input, ctx.cwd) => {
                ctx.reply(format!("bash: {input}: No such file or directory"))
            }
            Some(input) => ctx.reply(format!(
                "[Executed {cmd} with input from {input} — 0ms, 0 KB]"
            )),
        }
    }
}
