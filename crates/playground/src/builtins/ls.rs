//! ls builtin

use super::{Builtin, Context};
use crate::config::ShellConfig;
use crate::fs::{DIR_SIZE, DirEntry, Listing, Node};
use crate::interpreter::ExecResult;

const DIR_MODE: &str = "drwxr-xr-x";
const FILE_MODE: &str = "-rw-r--r--";
const EXEC_MODE: &str = "-rwxr-xr-x";

/// The ls builtin - list directory contents.
///
/// Usage: ls [-a] [-l] [PATH]
///
/// Short format prints one line with entries separated by two spaces and
/// directories marked with `/`. `-a` shows dotfiles plus `.` and `..`.
pub struct Ls;

impl Builtin for Ls {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let args = ctx.parse_args();
        let show_all = args.flags.has('a');
        let long = args.flags.has('l');
        let target = args.positional.first().map(String::as_str).unwrap_or(".");

        let entries = match ctx.tree.list_directory(target, ctx.cwd) {
            Ok(Listing::File(node)) => {
                let line = if long {
                    long_row(ctx.config, mode(node), 1, node.size(), node.name())
                } else {
                    node.name().to_string()
                };
                return ctx.reply(line);
            }
            Ok(Listing::Directory(entries)) => entries,
            Err(e) => return ctx.reply(e.to_string()),
        };

        let visible: Vec<DirEntry<'_>> = entries
            .into_iter()
            .filter(|e| show_all || !e.name.starts_with('.'))
            .collect();

        if long {
            let mut lines = Vec::with_capacity(visible.len() + 2);
            if show_all {
                lines.push(long_row(ctx.config, DIR_MODE, 2, DIR_SIZE, "."));
                lines.push(long_row(ctx.config, DIR_MODE, 2, DIR_SIZE, ".."));
            }
            lines.extend(
                visible
                    .iter()
                    .map(|e| long_row(ctx.config, mode(e.node), 1, e.node.size(), e.name)),
            );
            return ctx.unchanged().with_output(lines);
        }

        let mut names: Vec<String> = Vec::with_capacity(visible.len() + 2);
        if show_all {
            names.push(".".to_string());
            names.push("..".to_string());
        }
        names.extend(visible.iter().map(|e| {
            if e.node.is_dir() {
                format!("{}/", e.name)
            } else {
                e.name.to_string()
            }
        }));

        if names.is_empty() {
            return ctx.unchanged();
        }
        ctx.reply(names.join("  "))
    }
}

fn mode(node: &Node) -> &'static str {
    if node.is_dir() {
        DIR_MODE
    } else if node.is_binary() {
        EXEC_MODE
    } else {
        FILE_MODE
    }
}

fn long_row(config: &ShellConfig, mode: &str, links: u32, size: u64, name: &str) -> String {
    format!(
        "{mode} {links} {user} {user} {size:>5} {time} {name}",
        user = config.user,
        time = config.timestamp,
    )
}
