//! File operation builtins - mkdir, touch, rm, cp, mv
//!
//! mkdir, touch and rm take any number of operands and keep going after a
//! failing one. cp and mv take exactly one source/destination pair.

use super::{Builtin, Context};
use crate::fs::FileOptions;
use crate::interpreter::ExecResult;
use crate::parser::FlagSet;

fn recursive(flags: &FlagSet) -> bool {
    flags.has('r') || flags.has('R') || flags.has_long("recursive")
}

/// The mkdir builtin - create directories.
///
/// Usage: mkdir [-p] DIRECTORY...
///
/// Options:
///   -p   Create parent directories as needed, no error if existing
pub struct Mkdir;

impl Builtin for Mkdir {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let args = ctx.parse_args();
        if args.positional.is_empty() {
            return ctx.reply("mkdir: missing operand");
        }
        let parents = args.flags.has('p') || args.flags.has_long("parents");
        ctx.for_each_operand(&args.positional, |tree, path| {
            tree.make_directory(path, ctx.cwd, parents)
        })
    }
}

/// The touch builtin - create empty files.
///
/// Usage: touch FILE...
///
/// Existing files are left as they are.
pub struct Touch;

impl Builtin for Touch {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let args = ctx.parse_args();
        if args.positional.is_empty() {
            return ctx.reply("touch: missing file operand");
        }
        ctx.for_each_operand(&args.positional, |tree, path| {
            tree.create_file(path, ctx.cwd, "", FileOptions::default())
        })
    }
}

/// The rm builtin - remove files or directories.
///
/// Usage: rm [-r] FILE...
///
/// Options:
///   -r, -R, --recursive   Remove directories and their contents
///   -f                    Accepted; missing operands are still reported
pub struct Rm;

impl Builtin for Rm {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let args = ctx.parse_args();
        if args.positional.is_empty() {
            return ctx.reply("rm: missing operand");
        }
        let recursive = recursive(&args.flags);
        ctx.for_each_operand(&args.positional, |tree, path| {
            tree.remove(path, ctx.cwd, recursive)
        })
    }
}

/// The cp builtin - copy files and directories.
///
/// Usage: cp [-r] SOURCE DEST
///
/// When DEST is an existing directory the copy lands inside it.
pub struct Cp;

impl Builtin for Cp {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        if ctx.args.len() < 2 {
            return ctx.reply("cp: missing operand");
        }
        let args = ctx.parse_args();
        let [src, dest, ..] = args.positional.as_slice() else {
            return ctx.reply("cp: missing destination operand");
        };
        ctx.apply(ctx.tree.copy(src, dest, ctx.cwd, recursive(&args.flags)))
    }
}

/// The mv builtin - move (rename) files.
///
/// Usage: mv SOURCE DEST
///
/// Takes no options; the first two words are the operands.
pub struct Mv;

impl Builtin for Mv {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let [src, dest, ..] = ctx.args else {
            return ctx.reply("mv: missing operand");
        };
        ctx.apply(ctx.tree.move_node(src, dest, ctx.cwd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::testing::run;
    use crate::fs::Tree;
    use pretty_assertions::assert_eq;

    const HOME: &str = "/home/user";

    fn tree() -> Tree {
        Tree::default()
            .make_directory("dir/inner", HOME, true)
            .unwrap()
            .write_file("a.txt", HOME, "alpha", false)
            .unwrap()
    }

    #[test]
    fn test_mkdir_missing_operand() {
        let tree = tree();
        assert_eq!(run(&Mkdir, "mkdir", &[], &tree).output, vec!["mkdir: missing operand"]);
        assert_eq!(run(&Mkdir, "mkdir", &["-p"], &tree).output, vec!["mkdir: missing operand"]);
    }

    #[test]
    fn test_mkdir_parents_flag_anywhere() {
        let result = run(&Mkdir, "mkdir", &["x/y/z", "-p"], &tree());
        assert!(result.is_silent());
        assert!(result.tree.is_dir("x/y/z", HOME));
    }

    #[test]
    fn test_mkdir_reports_each_failure() {
        let result = run(&Mkdir, "mkdir", &["dir", "new", "a.txt"], &tree());
        assert_eq!(
            result.output,
            vec![
                "mkdir: cannot create directory 'dir': File exists",
                "mkdir: cannot create directory 'a.txt': File exists",
            ]
        );
        assert!(result.tree.is_dir("new", HOME));
    }

    #[test]
    fn test_touch_keeps_existing_content() {
        let result = run(&Touch, "touch", &["a.txt", "b.txt"], &tree());
        assert!(result.is_silent());
        assert_eq!(result.tree.read_file("a.txt", HOME).unwrap(), "alpha");
        assert_eq!(result.tree.read_file("b.txt", HOME).unwrap(), "");
    }

    #[test]
    fn test_touch_missing_operand() {
        let result = run(&Touch, "touch", &[], &tree());
        assert_eq!(result.output, vec!["touch: missing file operand"]);
    }

    #[test]
    fn test_rm_directory_needs_recursive() {
        let tree = tree();
        let refused = run(&Rm, "rm", &["dir"], &tree);
        assert_eq!(refused.output, vec!["rm: cannot remove 'dir': Is a directory"]);
        assert_eq!(refused.tree, tree);

        for flag in ["-r", "-rf", "-fr", "-R", "--recursive"] {
            let removed = run(&Rm, "rm", &[flag, "dir"], &tree);
            assert!(removed.is_silent(), "{flag}");
            assert!(!removed.tree.exists("dir", HOME), "{flag}");
        }
    }

    #[test]
    fn test_rm_force_long_flag_is_not_recursive() {
        let result = run(&Rm, "rm", &["--force", "dir"], &tree());
        assert_eq!(result.output, vec!["rm: cannot remove 'dir': Is a directory"]);
    }

    #[test]
    fn test_rm_missing_path_leaves_tree() {
        let tree = tree();
        let result = run(&Rm, "rm", &["-f", "ghost", "a.txt"], &tree);
        assert_eq!(
            result.output,
            vec!["rm: cannot remove 'ghost': No such file or directory"]
        );
        assert!(!result.tree.exists("a.txt", HOME));
    }

    #[test]
    fn test_cp_operand_errors() {
        let tree = tree();
        assert_eq!(run(&Cp, "cp", &["a.txt"], &tree).output, vec!["cp: missing operand"]);
        assert_eq!(
            run(&Cp, "cp", &["-r", "a.txt"], &tree).output,
            vec!["cp: missing destination operand"]
        );
    }

    #[test]
    fn test_cp_ignores_extra_operands() {
        let result = run(&Cp, "cp", &["a.txt", "b.txt", "c.txt"], &tree());
        assert!(result.is_silent());
        assert!(result.tree.exists("b.txt", HOME));
        assert!(!result.tree.exists("c.txt", HOME));
    }

    #[test]
    fn test_cp_directory() {
        let tree = tree();
        assert_eq!(
            run(&Cp, "cp", &["dir", "copy"], &tree).output,
            vec!["cp: -r not specified; omitting directory 'dir'"]
        );
        let copied = run(&Cp, "cp", &["dir", "copy", "-r"], &tree);
        assert!(copied.tree.is_dir("copy/inner", HOME));
    }

    #[test]
    fn test_mv_rename_and_into_dir() {
        let tree = tree();
        let renamed = run(&Mv, "mv", &["a.txt", "b.txt"], &tree);
        assert_eq!(renamed.tree.read_file("b.txt", HOME).unwrap(), "alpha");
        assert!(!renamed.tree.exists("a.txt", HOME));

        let moved = run(&Mv, "mv", &["a.txt", "dir"], &tree);
        assert!(moved.tree.exists("dir/a.txt", HOME));
    }

    #[test]
    fn test_mv_missing_operand() {
        let result = run(&Mv, "mv", &["a.txt"], &tree());
        assert_eq!(result.output, vec!["mv: missing operand"]);
    }
}
