//! Compiler simulation
//!
//! Nothing is compiled. The builtin checks that the named sources exist, records
//! which flags were given, and drops a binary placeholder node at the output
//! path whose content names the sources.

use super::{Builtin, Context};
use crate::error::{FsError, Reason};
use crate::fs::FileOptions;
use crate::interpreter::ExecResult;

/// Default output binary name.
pub const DEFAULT_OUTPUT: &str = "a.out";

/// One compiler flag word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerFlag {
    /// `-std=VALUE`
    Std(String),
    /// `-O`, `-O2`, `-Ofast`, ... kept whole
    Optimize(String),
    /// `-Wall` / `-Wextra`, without the dash
    Warning(String),
    /// `-o`; the output name is the next word
    Output,
    /// Anything else. Accepted and otherwise ignored.
    Unknown(String),
}

impl CompilerFlag {
    /// Classify a word that starts with `-`.
    pub fn parse(word: &str) -> Self {
        if word == "-o" {
            return CompilerFlag::Output;
        }
        if let Some(std) = word.strip_prefix("-std=") {
            if !std.is_empty() {
                return CompilerFlag::Std(std.to_string());
            }
        } else if word.starts_with("-O") {
            return CompilerFlag::Optimize(word.to_string());
        } else if word == "-Wall" || word == "-Wextra" {
            return CompilerFlag::Warning(word[1..].to_string());
        }
        CompilerFlag::Unknown(word.to_string())
    }
}

/// Everything one invocation asked for.
#[derive(Debug, Default)]
struct Invocation<'a> {
    standard: Option<String>,
    optimize: Option<String>,
    warnings: Vec<String>,
    output: Option<&'a str>,
    sources: Vec<&'a str>,
}

impl<'a> Invocation<'a> {
    fn parse(words: &'a [String]) -> Self {
        let mut inv = Invocation::default();
        let mut output_at = None;

        for (i, word) in words.iter().enumerate() {
            if !word.starts_with('-') {
                continue;
            }
            match CompilerFlag::parse(word) {
                CompilerFlag::Std(s) => inv.standard = Some(s),
                CompilerFlag::Optimize(o) => inv.optimize = Some(o),
                CompilerFlag::Warning(w) => inv.warnings.push(w),
                CompilerFlag::Output => {
                    if output_at.is_none() {
                        output_at = Some(i + 1);
                    }
                }
                CompilerFlag::Unknown(_flag) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!(flag = %_flag, "ignoring unrecognised compiler flag");
                }
            }
        }

        inv.output = output_at.and_then(|i| words.get(i)).map(String::as_str);
        inv.sources = words
            .iter()
            .enumerate()
            .filter(|(i, w)| Some(*i) != output_at && !w.starts_with('-'))
            .map(|(_, w)| w.as_str())
            .filter(|w| w.ends_with(".cpp") || w.ends_with(".c"))
            .collect();
        inv
    }

    /// Informational lines, then the summary.
    fn report(&self, output: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut tags = Vec::new();

        if let Some(std) = &self.standard {
            lines.push(format!("Compiling with {} standard...", std.replace("c++", "C++")));
            tags.push(format!("[{}]", std.to_uppercase()));
        }
        if let Some(opt) = &self.optimize {
            lines.push(format!("Optimization level: {opt}"));
            tags.push(format!("[{opt}]"));
        }
        if !self.warnings.is_empty() {
            lines.push(format!("Warnings enabled: {}", self.warnings.join(", ")));
            tags.extend(self.warnings.iter().map(|w| format!("[{w}]")));
        }

        let prefix = if tags.is_empty() {
            String::new()
        } else {
            format!("{} ", tags.join(" "))
        };
        lines.push(format!(
            "{prefix}Compiled {} → {output}",
            self.sources.join(", ")
        ));
        lines
    }
}

/// The compiler builtin, registered as `g++` by default.
///
/// Usage: g++ [-std=STD] [-O<level>] [-Wall] [-Wextra] [-o OUTPUT] SOURCE...
///
/// Sources are operands ending in `.cpp` or `.c`. The word after `-o` is never a
/// source.
pub struct Compiler;

impl Builtin for Compiler {
    fn execute(&self, ctx: Context<'_>) -> ExecResult {
        let name = ctx.name;
        let inv = Invocation::parse(ctx.args);
        if inv.sources.is_empty() {
            return ctx.reply(format!("{name}: fatal error: no input files"));
        }

        let mut errors: Vec<String> = inv
            .sources
            .iter()
            .filter_map(|src| {
                let reason = match ctx.tree.resolve(src, ctx.cwd) {
                    None => Reason::NotFound,
                    Some(node) if node.is_dir() => Reason::IsADirectory,
                    Some(_) => return None,
                };
                Some(format!("{name}: error: {src}: {reason}"))
            })
            .collect();
        if !errors.is_empty() {
            errors.push("compilation terminated.".to_string());
            return ctx.unchanged().with_output(errors);
        }

        let output = inv.output.unwrap_or(DEFAULT_OUTPUT);
        let content = format!("[binary:{}]", inv.sources.join(","));
        let opts = FileOptions {
            is_binary: Some(true),
        };
        match ctx.tree.create_file(output, ctx.cwd, &content, opts) {
            Ok(tree) => ctx.with_tree(tree).with_output(inv.report(output)),
            Err(FsError::PathTooDeep { limit, .. }) => ctx.reply(format!(
                "/usr/bin/ld: cannot open output file {output}: path too deep ({limit} levels max)"
            )),
            Err(e) => {
                let reason = e.reason().unwrap_or(Reason::IsADirectory);
                ctx.reply(format!(
                    "/usr/bin/ld: cannot open output file {output}: {reason}"
                ))
            }
        }
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
            .write_file("sol.cpp", HOME, "int main(){}", false)
            .unwrap()
            .write_file("util.cpp", HOME, "", false)
            .unwrap()
            .make_directory("dir.cpp", HOME, false)
            .unwrap()
    }

    #[test]
    fn test_flag_grammar() {
        assert_eq!(CompilerFlag::parse("-o"), CompilerFlag::Output);
        assert_eq!(CompilerFlag::parse("-std=c++17"), CompilerFlag::Std("c++17".into()));
        assert_eq!(CompilerFlag::parse("-O2"), CompilerFlag::Optimize("-O2".into()));
        assert_eq!(CompilerFlag::parse("-Wall"), CompilerFlag::Warning("Wall".into()));
        assert_eq!(CompilerFlag::parse("-Wshadow"), CompilerFlag::Unknown("-Wshadow".into()));
        assert_eq!(CompilerFlag::parse("-std="), CompilerFlag::Unknown("-std=".into()));
    }

    #[test]
    fn test_plain_compile() {
        let result = run(&Compiler, "g++", &["sol.cpp"], &tree());
        assert_eq!(result.output, vec!["Compiled sol.cpp → a.out"]);
        let binary = result.tree.resolve("a.out", HOME).unwrap();
        assert!(binary.is_binary());
        assert_eq!(binary.content(), Some("[binary:sol.cpp]"));
    }

    #[test]
    fn test_full_flag_report() {
        let result = run(
            &Compiler,
            "g++",
            &["-std=c++20", "-O2", "-Wall", "-Wextra", "-o", "sol", "sol.cpp", "util.cpp"],
            &tree(),
        );
        assert_eq!(
            result.output,
            vec![
                "Compiling with C++20 standard...",
                "Optimization level: -O2",
                "Warnings enabled: Wall, Wextra",
                "[C++20] [-O2] [Wall] [Wextra] Compiled sol.cpp, util.cpp → sol",
            ]
        );
        assert_eq!(
            result.tree.read_file("sol", HOME).unwrap(),
            "[binary:sol.cpp,util.cpp]"
        );
    }

    #[test]
    fn test_unknown_flags_are_silent() {
        let result = run(&Compiler, "g++", &["-Wshadow", "-g", "sol.cpp"], &tree());
        assert_eq!(result.output, vec!["Compiled sol.cpp → a.out"]);
    }

    #[test]
    fn test_output_word_is_not_a_source() {
        let result = run(&Compiler, "g++", &["-o", "x.cpp", "sol.cpp"], &tree());
        assert_eq!(result.output, vec!["Compiled sol.cpp → x.cpp"]);
        assert!(result.tree.resolve("x.cpp", HOME).unwrap().is_binary());
    }

    #[test]
    fn test_no_input_files() {
        let tree = tree();
        for args in [&[][..], &["-O2"][..], &["notes.txt"][..], &["-o", "a.cpp"][..]] {
            let result = run(&Compiler, "g++", args, &tree);
            assert_eq!(result.output, vec!["g++: fatal error: no input files"], "{args:?}");
        }
    }

    #[test]
    fn test_missing_sources() {
        let tree = tree();
        let result = run(&Compiler, "g++", &["a.cpp", "sol.cpp", "dir.cpp", "b.cpp"], &tree);
        assert_eq!(
            result.output,
            vec![
                "g++: error: a.cpp: No such file or directory",
                "g++: error: dir.cpp: Is a directory",
                "g++: error: b.cpp: No such file or directory",
                "compilation terminated.",
            ]
        );
        assert_eq!(result.tree, tree);
    }

    #[test]
    fn test_output_path_errors() {
        let tree = tree();
        let into_dir = run(&Compiler, "g++", &["-o", "dir.cpp", "sol.cpp"], &tree);
        assert_eq!(
            into_dir.output,
            vec!["/usr/bin/ld: cannot open output file dir.cpp: Is a directory"]
        );
        let missing = run(&Compiler, "g++", &["-o", "bin/sol", "sol.cpp"], &tree);
        assert_eq!(
            missing.output,
            vec!["/usr/bin/ld: cannot open output file bin/sol: No such file or directory"]
        );
    }

    #[test]
    fn test_recompile_overwrites_binary() {
        let first = run(&Compiler, "g++", &["sol.cpp"], &tree());
        let second = run(&Compiler, "g++", &["util.cpp"], &first.tree);
        assert_eq!(
            second.tree.read_file("a.out", HOME).unwrap(),
            "[binary:util.cpp]"
        );
    }
}
