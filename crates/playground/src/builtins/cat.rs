//! cat builtin - print a file

use super::{Builtin, Context};
use crate::interpreter::ExecResult;

/// The cat builtin.
///
/// Only the first operand is read. Content is split on `\n`, so a trailing
/// newline yields a trailing empty line. An empty file prints nothing.
pub struct Cat;

impl Builtin for Cat {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let Some(path) = ctx.args.first() else {
            return ctx.reply("cat: missing operand");
        };
        match ctx.tree.read_file(path, ctx.cwd) {
            Ok("") => ctx.unchanged(),
            Ok(content) => ctx
                .unchanged()
                .with_output(content.split('\n').map(str::to_string).collect()),
            Err(e) => ctx.reply(e.to_string()),
        }
    }
}
