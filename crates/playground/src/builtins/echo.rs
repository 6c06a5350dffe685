//! echo builtin with output redirection

use super::{Builtin, Context};
use crate::interpreter::ExecResult;

/// Message for a redirection operator with nothing after it.
const SYNTAX_ERROR_NEWLINE: &str = "bash: syntax error near unexpected token `newline'";

/// The echo builtin.
///
/// Words are joined with single spaces. The first `>` or `>>` word, scanning left
/// to right, turns the command into a write: words before it are the text, the
/// word after it is the file. `>` writes the text as is; `>>` appends the text
/// plus a newline. Words after the file name are ignored.
pub struct Echo;

impl Builtin for Echo {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let redirect = ctx
            .args
            .iter()
            .position(|w| w == ">" || w == ">>");

        let Some(idx) = redirect else {
            return ctx.reply(ctx.args.join(" "));
        };
        let Some(path) = ctx.args.get(idx + 1) else {
            return ctx.reply(SYNTAX_ERROR_NEWLINE);
        };

        let text = ctx.args[..idx].join(" ");
        let append = ctx.args[idx] == ">>";
        let content = if append { text + "\n" } else { text };
        ctx.apply(ctx.tree.write_file(path, ctx.cwd, &content, append))
    }
}
