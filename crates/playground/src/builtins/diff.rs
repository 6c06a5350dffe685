//! diff builtin - compare two files line by line
//!
//! This is a positional comparison, not an LCS diff: line `i` of one file is
//! compared with line `i` of the other.

use super::{Builtin, Context};
use crate::interpreter::ExecResult;

/// The diff builtin.
///
/// Usage: diff FILE1 FILE2
///
/// Identical files print nothing. Otherwise prints a `---`/`+++` header, then
/// for each differing index a `- ` line from FILE1 and a `+ ` line from FILE2,
/// omitting a side that has no line at that index.
pub struct Diff;

impl Builtin for Diff {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let [left, right, ..] = ctx.args else {
            return ctx.reply("diff: missing operand");
        };

        let a = match read(&ctx, left) {
            Ok(content) => content,
            Err(msg) => return ctx.reply(msg),
        };
        let b = match read(&ctx, right) {
            Ok(content) => content,
            Err(msg) => return ctx.reply(msg),
        };

        if a == b {
            return ctx.unchanged();
        }
        ctx.unchanged().with_output(line_diff(left, right, a, b))
    }
}

/// Any unreadable operand, directories included, reads as missing.
fn read<'t>(ctx: &Context<'t>, path: &str) -> Result<&'t str, String> {
    ctx.tree
        .read_file(path, ctx.cwd)
        .map_err(|_| format!("diff: {path}: No such file or directory"))
}

fn line_diff(left: &str, right: &str, a: &str, b: &str) -> Vec<String> {
    let a_lines: Vec<&str> = a.split('\n').collect();
    let b_lines: Vec<&str> = b.split('\n').collect();

    let mut out = vec![format!("--- {left}"), format!("+++ {right}")];
    for i in 0..a_lines.len().max(b_lines.len()) {
        let (x, y) = (a_lines.get(i), b_lines.get(i));
        if x == y {
            continue;
        }
        if let Some(line) = x {
            out.push(format!("- {line}"));
        }
        if let Some(line) = y {
            out.push(format!("+ {line}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::testing::run;
    use crate::fs::Tree;
    use pretty_assertions::assert_eq;

    const HOME: &str = "/home/user";

    fn tree(a: &str, b: &str) -> Tree {
        Tree::default()
            .write_file("out.txt", HOME, a, false)
            .unwrap()
            .write_file("expected.txt", HOME, b, false)
            .unwrap()
    }

    #[test]
    fn test_identical_is_silent() {
        let result = run(&Diff, "diff", &["out.txt", "expected.txt"], &tree("1\n2", "1\n2"));
        assert!(result.is_silent());
    }

    #[test]
    fn test_changed_line() {
        let result = run(&Diff, "diff", &["out.txt", "expected.txt"], &tree("1\n2", "1\n3"));
        assert_eq!(
            result.output,
            vec!["--- out.txt", "+++ expected.txt", "- 2", "+ 3"]
        );
    }

    #[test]
    fn test_longer_side_only() {
        let result = run(&Diff, "diff", &["out.txt", "expected.txt"], &tree("1", "1\n2\n3"));
        assert_eq!(
            result.output,
            vec!["--- out.txt", "+++ expected.txt", "+ 2", "+ 3"]
        );
    }

    #[test]
    fn test_missing_files() {
        let tree = tree("", "");
        assert_eq!(
            run(&Diff, "diff", &["out.txt"], &tree).output,
            vec!["diff: missing operand"]
        );
        assert_eq!(
            run(&Diff, "diff", &["nope", "out.txt"], &tree).output,
            vec!["diff: nope: No such file or directory"]
        );
        assert_eq!(
            run(&Diff, "diff", &["out.txt", "nope"], &tree).output,
            vec!["diff: nope: No such file or directory"]
        );
    }

    #[test]
    fn test_directory_reads_as_missing() {
        let tree = tree("", "").make_directory("tests", HOME, false).unwrap();
        assert_eq!(
            run(&Diff, "diff", &["tests", "out.txt"], &tree).output,
            vec!["diff: tests: No such file or directory"]
        );
    }
}
