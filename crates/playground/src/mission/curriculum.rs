//! The competitive-programming curriculum
//!
//! Six levels, each a list of substeps. A substep's check looks at the
//! filesystem, the working directory and the raw command history. History checks
//! parse each line with the shell's own tokenizer and flag grammar, so
//! `ls -al`, `ls -la` and `ls -l -a` are all recognised.

use super::{Mission, Substep};
use crate::builtins::CompilerFlag;
use crate::fs::{Node, Tree};
use crate::parser::{Args, tokenize};

const ROUND: &str = "/home/user/CP/Codeforces/Round900";

/// Every level, in order.
pub fn curriculum() -> &'static [Mission] {
    &CURRICULUM
}

static CURRICULUM: [Mission; 6] = [
    Mission {
        id: 1,
        title: "Project Scaffolding",
        context: "Organize your workspace. A real competitive programmer keeps a clean directory tree. You must use the correct flags — no lazy shortcuts.",
        substeps: &[
            Substep {
                id: "1.1",
                text: "Create the nested path `CP/Codeforces/Round900` using a **single** `mkdir -p` command.",
                hint: "Type: mkdir -p CP/Codeforces/Round900",
                validate: scaffold_nested,
            },
            Substep {
                id: "1.2",
                text: "Navigate into `Round900` using `cd` with the full relative path in one command.",
                hint: "Type: cd CP/Codeforces/Round900",
                validate: enter_round,
            },
            Substep {
                id: "1.3",
                text: "Create three subdirectories `A`, `B`, and `C` in a **single** `mkdir` command.",
                hint: "Type: mkdir A B C",
                validate: problem_dirs,
            },
            Substep {
                id: "1.4",
                text: "Run `ls` to see the three directories.",
                hint: "Type: ls",
                validate: listed,
            },
            Substep {
                id: "1.5",
                text: "Run `ls -la` to practice long-format + hidden-files flags together.",
                hint: "Type: ls -la",
                validate: listed_long_all,
            },
        ],
    },
    Mission {
        id: 2,
        title: "File Creation & Hidden Files",
        context: "Create your source files and test inputs. Learn to work with paths and hidden files — contest tooling often relies on dotfiles.",
        substeps: &[
            Substep {
                id: "2.1",
                text: "Navigate into `A` and create a source file `A.cpp` using `touch`.",
                hint: "Type: cd A  then  touch A.cpp",
                validate: source_touched,
            },
            Substep {
                id: "2.2",
                text: "Go back to `Round900` with `cd ..`, then create `A/tests` **without entering A** — use a path argument.",
                hint: "Type: cd ..  then  mkdir A/tests",
                validate: tests_dir,
            },
            Substep {
                id: "2.3",
                text: "Create two test files in one command: `touch A/tests/in1.txt A/tests/in2.txt`.",
                hint: "Type: touch A/tests/in1.txt A/tests/in2.txt",
                validate: test_inputs,
            },
            Substep {
                id: "2.4",
                text: "Create `.flags` in Round900 and write compilation flags into it: `echo \"-std=c++20 -O2 -Wall\" > .flags`.",
                hint: "Type: touch .flags  then  echo \"-std=c++20 -O2 -Wall\" > .flags",
                validate: flags_file,
            },
            Substep {
                id: "2.5",
                text: "Run `ls` (notice `.flags` is hidden), then run `ls -a` to reveal it.",
                hint: "Type: ls  then  ls -a",
                validate: revealed_hidden,
            },
        ],
    },
    Mission {
        id: 3,
        title: "Rename, Copy & Reorganize",
        context: "Contest problems change, files need renaming, and backups save lives. Pay attention to flags — copying directories without `-r` will fail.",
        substeps: &[
            Substep {
                id: "3.1",
                text: "Navigate into `A`. Rename `A.cpp` to `A_sol.cpp` using `mv`.",
                hint: "Type: cd A  then  mv A.cpp A_sol.cpp",
                validate: source_renamed,
            },
            Substep {
                id: "3.2",
                text: "Copy `A_sol.cpp` into `tests` as `A_sol_backup.cpp`.",
                hint: "Type: cp A_sol.cpp tests/A_sol_backup.cpp",
                validate: backup_made,
            },
            Substep {
                id: "3.3",
                text: "Go back to `Round900`. Copy the **entire** `A/tests` directory into `B` as `B/tests` using `cp -r`.",
                hint: "Type: cd ..  then  cp -r A/tests B/tests",
                validate: tests_copied,
            },
            Substep {
                id: "3.4",
                text: "Navigate into `B/tests` and verify files with `ls -l`.",
                hint: "Type: cd B/tests  then  ls -l",
                validate: copy_verified,
            },
            Substep {
                id: "3.5",
                text: "Navigate back to `Round900` using a chained relative path `cd ../..`.",
                hint: "Type: cd ../..",
                validate: climbed_back,
            },
        ],
    },
    Mission {
        id: 4,
        title: "Strict Compilation",
        context: "This is the core skill. In competitive programming, you must compile with the right standard, name your binary properly, and enable warnings. Every flag matters.",
        substeps: &[
            Substep {
                id: "4.1",
                text: "Navigate into `A`. Write mock code into `A_sol.cpp`: `echo \"#include <bits/stdc++.h>\" > A_sol.cpp`.",
                hint: "Type: cd A  then  echo \"#include <bits/stdc++.h>\" > A_sol.cpp",
                validate: a_code_written,
            },
            Substep {
                id: "4.2",
                text: "Compile `A_sol.cpp` with `-std=c++20` and `-o A_sol` in one command.",
                hint: "Type: g++ -std=c++20 -o A_sol A_sol.cpp",
                validate: a_compiled,
            },
            Substep {
                id: "4.3",
                text: "Run the binary: `./A_sol`.",
                hint: "Type: ./A_sol",
                validate: a_ran,
            },
            Substep {
                id: "4.4",
                text: "Recompile with ALL flags: `-std=c++20`, `-O2`, `-Wall`, `-Wextra`, `-o A_sol` in a single command.",
                hint: "Type: g++ -std=c++20 -O2 -Wall -Wextra -o A_sol A_sol.cpp",
                validate: a_compiled_strict,
            },
            Substep {
                id: "4.5",
                text: "Run with input redirection: `./A_sol < tests/in1.txt`.",
                hint: "Type: ./A_sol < tests/in1.txt",
                validate: a_ran_with_input,
            },
            Substep {
                id: "4.6",
                text: "Read the `.flags` file from the parent directory: `cat ../.flags`.",
                hint: "Type: cat ../.flags",
                validate: flags_read,
            },
        ],
    },
    Mission {
        id: 5,
        title: "Testing Workflow & Cleanup",
        context: "Real competitive programmers test against sample inputs, compare outputs, and clean up after themselves. Know when you need `-r` and when you don't.",
        substeps: &[
            Substep {
                id: "5.1",
                text: "Navigate to `Round900`. Write expected and actual output files: `echo \"AC\" > A/tests/expected.txt` and `echo \"AC\" > A/tests/actual.txt`.",
                hint: "Type: cd Round900 path, then echo \"AC\" > A/tests/expected.txt  and  echo \"AC\" > A/tests/actual.txt",
                validate: outputs_written,
            },
            Substep {
                id: "5.2",
                text: "Run `diff A/tests/expected.txt A/tests/actual.txt` — no output means files match.",
                hint: "Type: diff A/tests/expected.txt A/tests/actual.txt",
                validate: outputs_compared,
            },
            Substep {
                id: "5.3",
                text: "Remove the backup file `A/tests/A_sol_backup.cpp` using `rm` (no `-r` needed).",
                hint: "Type: rm A/tests/A_sol_backup.cpp",
                validate: backup_removed,
            },
            Substep {
                id: "5.4",
                text: "Try `rm B/tests` (without `-r`) — observe the error. Then remove it correctly with `rm -r B/tests`.",
                hint: "Type: rm B/tests  (see error)  then  rm -r B/tests",
                validate: copied_tests_removed,
            },
            Substep {
                id: "5.5",
                text: "Remove the hidden `.flags` file using `rm .flags`.",
                hint: "Type: rm .flags",
                validate: flags_removed,
            },
        ],
    },
    Mission {
        id: 6,
        title: "Full Contest Simulation",
        context: "Speed round. Set up problems B and C from scratch, compile with full flags, and execute. This simulates a real contest workflow — do it cleanly.",
        substeps: &[
            Substep {
                id: "6.1",
                text: "Navigate to `B`. Create `B_sol.cpp` and write mock code into it.",
                hint: "Type: cd ../B  then  touch B_sol.cpp  then  echo \"#include <bits/stdc++.h>\" > B_sol.cpp",
                validate: b_code_written,
            },
            Substep {
                id: "6.2",
                text: "Compile with full flags: `g++ -std=c++20 -O2 -Wall -Wextra -o B_sol B_sol.cpp`. Then run `./B_sol`.",
                hint: "Type: g++ -std=c++20 -O2 -Wall -Wextra -o B_sol B_sol.cpp  then  ./B_sol",
                validate: b_built_and_ran,
            },
            Substep {
                id: "6.3",
                text: "Navigate to `C`. Create `C_sol.cpp` and write mock code.",
                hint: "Type: cd ../C  then  touch C_sol.cpp  then  echo \"#include <bits/stdc++.h>\" > C_sol.cpp",
                validate: c_code_written,
            },
            Substep {
                id: "6.4",
                text: "Compile with full flags: `g++ -std=c++20 -O2 -Wall -Wextra -o C_sol C_sol.cpp`. Then run `./C_sol`.",
                hint: "Type: g++ -std=c++20 -O2 -Wall -Wextra -o C_sol C_sol.cpp  then  ./C_sol",
                validate: c_built_and_ran,
            },
            Substep {
                id: "6.5",
                text: "Navigate back to `Round900`. Run `ls -la` to survey your workspace.",
                hint: "Type: cd ..  (or appropriate path)  then  ls -la",
                validate: surveyed,
            },
            Substep {
                id: "6.6",
                text: "Clean up all binaries: `rm A/A_sol B/B_sol C/C_sol` (multiple paths in one command).",
                hint: "Type: rm A/A_sol B/B_sol C/C_sol",
                validate: binaries_removed,
            },
        ],
    },
];

// ==================== history helpers ====================

/// A history line split into command word and parsed arguments.
struct Line {
    name: String,
    args: Args,
    words: Vec<String>,
}

fn parse(cmd: &str) -> Option<Line> {
    let words = tokenize(cmd.trim());
    let (name, rest) = words.split_first()?;
    Some(Line {
        name: name.clone(),
        args: Args::parse(rest),
        words: rest.to_vec(),
    })
}

/// The history line if it runs `name`.
fn as_cmd(cmd: &str, name: &str) -> Option<Line> {
    parse(cmd).filter(|line| line.name == name)
}

fn any_cmd(history: &[String], name: &str, pred: impl Fn(&str, &Line) -> bool) -> bool {
    history
        .iter()
        .any(|c| as_cmd(c, name).is_some_and(|line| pred(c, &line)))
}

fn last_cmd(history: &[String], name: &str) -> Option<Line> {
    as_cmd(history.last()?, name)
}

/// Most recent `cd` with an argument.
fn last_cd(history: &[String]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|c| c.starts_with("cd "))
        .map(String::as_str)
}

fn is_long_all(line: &Line) -> bool {
    line.args.flags.has('l') && line.args.flags.has('a')
}

/// Compiler invocation with `-std=c++20 -O2 -Wall -Wextra`.
fn strict_flags(line: &Line) -> bool {
    let flags: Vec<CompilerFlag> = line
        .words
        .iter()
        .filter(|w| w.starts_with('-'))
        .map(|w| CompilerFlag::parse(w))
        .collect();
    [
        CompilerFlag::Std("c++20".into()),
        CompilerFlag::Optimize("-O2".into()),
        CompilerFlag::Warning("Wall".into()),
        CompilerFlag::Warning("Wextra".into()),
    ]
    .iter()
    .all(|f| flags.contains(f))
}

fn has_output_flag(line: &Line) -> bool {
    line.words.iter().any(|w| w == "-o")
}

// ==================== tree helpers ====================

fn exists(tree: &Tree, path: &str) -> bool {
    tree.exists(path, "/")
}

fn has_content(tree: &Tree, path: &str) -> bool {
    tree.resolve(path, "/")
        .and_then(Node::content)
        .is_some_and(|c| !c.is_empty())
}

fn round(rel: &str) -> String {
    format!("{ROUND}/{rel}")
}

// ==================== level 1 ====================

fn scaffold_nested(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    exists(tree, ROUND)
        && any_cmd(history, "mkdir", |c, line| {
            line.args.flags.has('p') && c.contains("CP/Codeforces/Round900")
        })
}

fn enter_round(_tree: &Tree, cwd: &str, history: &[String]) -> bool {
    cwd == ROUND && last_cd(history).is_some_and(|c| c.contains("CP/Codeforces/Round900"))
}

fn problem_dirs(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    ["A", "B", "C"].iter().all(|d| exists(tree, &round(d)))
        && any_cmd(history, "mkdir", |c, _| {
            c.contains('A') && c.contains('B') && c.contains('C')
        })
}

fn listed(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    last_cmd(history, "ls").is_some()
}

fn listed_long_all(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    last_cmd(history, "ls").is_some_and(|line| is_long_all(&line))
}

// ==================== level 2 ====================

fn source_touched(tree: &Tree, cwd: &str, _history: &[String]) -> bool {
    cwd.ends_with("/A") && exists(tree, &format!("{cwd}/A.cpp"))
}

fn tests_dir(tree: &Tree, cwd: &str, _history: &[String]) -> bool {
    cwd.ends_with("/Round900") && exists(tree, &format!("{cwd}/A/tests"))
}

fn test_inputs(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    exists(tree, &round("A/tests/in1.txt")) && exists(tree, &round("A/tests/in2.txt"))
}

fn flags_file(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    tree.resolve(&round(".flags"), "/")
        .and_then(Node::content)
        .is_some_and(|c| c.contains("-std=c++20"))
}

fn revealed_hidden(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    let mut saw_plain = false;
    for line in history.iter().filter_map(|c| as_cmd(c, "ls")) {
        if !line.args.flags.has('a') {
            saw_plain = true;
        } else if saw_plain {
            return true;
        }
    }
    false
}

// ==================== level 3 ====================

fn source_renamed(tree: &Tree, cwd: &str, _history: &[String]) -> bool {
    if !cwd.ends_with("/A") {
        return false;
    }
    tree.resolve(cwd, "/")
        .is_some_and(|dir| dir.child("A_sol.cpp").is_some() && dir.child("A.cpp").is_none())
}

fn backup_made(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    exists(tree, &round("A/tests/A_sol_backup.cpp"))
}

fn tests_copied(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    exists(tree, &round("B/tests")) && any_cmd(history, "cp", |_, line| line.args.flags.has('r'))
}

fn copy_verified(_tree: &Tree, cwd: &str, history: &[String]) -> bool {
    cwd.ends_with("/B/tests") && last_cmd(history, "ls").is_some_and(|line| line.args.flags.has('l'))
}

fn climbed_back(_tree: &Tree, cwd: &str, history: &[String]) -> bool {
    cwd.ends_with("/Round900") && last_cd(history).is_some_and(|c| c.contains("../.."))
}

// ==================== level 4 ====================

fn a_code_written(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    has_content(tree, &round("A/A_sol.cpp"))
}

fn a_compiled(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    exists(tree, &round("A/A_sol"))
        && any_cmd(history, "g++", |c, line| {
            line.args.flags.value("std") == Some("c++20")
                && has_output_flag(line)
                && c.contains("A_sol")
        })
}

fn a_ran(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    any_cmd(history, "./A_sol", |_, _| true)
}

fn a_compiled_strict(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    any_cmd(history, "g++", |c, line| {
        strict_flags(line) && has_output_flag(line) && c.contains("A_sol")
    })
}

fn a_ran_with_input(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    any_cmd(history, "./A_sol", |_, line| {
        line.words
            .windows(2)
            .any(|w| w[0] == "<" && w[1].contains("tests/in1.txt"))
    })
}

fn flags_read(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    last_cmd(history, "cat").is_some_and(|line| line.words.iter().any(|w| w.contains(".flags")))
}

// ==================== level 5 ====================

fn outputs_written(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    has_content(tree, &round("A/tests/expected.txt")) && has_content(tree, &round("A/tests/actual.txt"))
}

fn outputs_compared(_tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    any_cmd(history, "diff", |c, _| {
        c.contains("expected.txt") && c.contains("actual.txt")
    })
}

fn backup_removed(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    !exists(tree, &round("A/tests/A_sol_backup.cpp"))
}

fn copied_tests_removed(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    let gone = !exists(tree, &round("B/tests"));
    let refused = any_cmd(history, "rm", |_, line| {
        line.words.len() == 1 && line.args.positional == ["B/tests"]
    });
    let removed = any_cmd(history, "rm", |c, line| {
        line.args.flags.has('r') && c.contains("B/tests")
    });
    gone && refused && removed
}

fn flags_removed(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    !exists(tree, &round(".flags"))
}

// ==================== level 6 ====================

fn b_code_written(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    has_content(tree, &round("B/B_sol.cpp"))
}

fn built_and_ran(tree: &Tree, history: &[String], problem: &str) -> bool {
    let binary = format!("{problem}/{problem}_sol");
    let source = format!("{problem}_sol.cpp");
    let program = format!("./{problem}_sol");
    exists(tree, &round(&binary))
        && any_cmd(history, "g++", |c, line| strict_flags(line) && c.contains(&source))
        && history.iter().any(|c| c.contains(&program))
}

fn b_built_and_ran(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    built_and_ran(tree, history, "B")
}

fn c_code_written(tree: &Tree, _cwd: &str, _history: &[String]) -> bool {
    has_content(tree, &round("C/C_sol.cpp"))
}

fn c_built_and_ran(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    built_and_ran(tree, history, "C")
}

fn surveyed(_tree: &Tree, cwd: &str, history: &[String]) -> bool {
    cwd.ends_with("/Round900") && last_cmd(history, "ls").is_some_and(|line| is_long_all(&line))
}

fn binaries_removed(tree: &Tree, _cwd: &str, history: &[String]) -> bool {
    let bins = ["A/A_sol", "B/B_sol", "C/C_sol"];
    bins.iter().all(|b| !exists(tree, &round(b)))
        && any_cmd(history, "rm", |c, _| bins.iter().all(|b| c.contains(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let ids: Vec<&str> = curriculum()
            .iter()
            .flat_map(|m| m.substeps.iter().map(|s| s.id))
            .collect();
        assert_eq!(ids.len(), 32);
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        for (i, mission) in curriculum().iter().enumerate() {
            assert_eq!(mission.id as usize, i + 1);
            assert!(mission.substeps.iter().all(|s| s.id.starts_with(&format!("{}.", mission.id))));
        }
    }

    #[test]
    fn test_long_all_accepts_any_spelling() {
        for cmd in ["ls -la", "ls -al", "ls -l -a", "  ls -a -l"] {
            assert!(listed_long_all(&Tree::default(), "/", &history(&[cmd])), "{cmd}");
        }
        assert!(!listed_long_all(&Tree::default(), "/", &history(&["ls -l"])));
        assert!(!listed_long_all(&Tree::default(), "/", &history(&["ls -la", "pwd"])));
    }

    #[test]
    fn test_listed_needs_ls_last() {
        assert!(listed(&Tree::default(), "/", &history(&["pwd", "ls"])));
        assert!(!listed(&Tree::default(), "/", &history(&["ls", "pwd"])));
        assert!(!listed(&Tree::default(), "/", &history(&["lsblk"])));
        assert!(!listed(&Tree::default(), "/", &[]));
    }

    #[test]
    fn test_revealed_hidden_needs_order() {
        assert!(revealed_hidden(&Tree::default(), "/", &history(&["ls", "cd x", "ls -a"])));
        assert!(!revealed_hidden(&Tree::default(), "/", &history(&["ls -a", "ls"])));
    }

    #[test]
    fn test_strict_flags() {
        let line = parse("g++ -std=c++20 -O2 -Wall -Wextra -o A_sol A_sol.cpp").unwrap();
        assert!(strict_flags(&line));
        let line = parse("g++ -std=c++17 -O2 -Wall -Wextra A_sol.cpp").unwrap();
        assert!(!strict_flags(&line));
    }

    #[test]
    fn test_refused_rm_must_be_plain() {
        let tree = Tree::default();
        let h = history(&["rm B/tests", "rm -r B/tests"]);
        assert!(copied_tests_removed(&tree, "/", &h));
        let h = history(&["rm -r B/tests"]);
        assert!(!copied_tests_removed(&tree, "/", &h));
    }
}
