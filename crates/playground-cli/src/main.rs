//! Playground CLI - Command line front end for the playground shell
//!
//! Usage:
//!   playground -c 'ls -la'              # Run one command line
//!   playground script.txt               # Run every line of a file
//!   playground                          # Interactive session on stdin
//!   playground --state s.json ...       # Resume from and save to a snapshot
//!   playground complete CP/Co           # Tab-completion candidates
//!   playground missions                 # Curriculum with progress

mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playground::{Playground, curriculum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Playground - Sandboxed Linux shell for learning the command line
#[derive(Parser, Debug)]
#[command(name = "playground")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Execute the given command line
    #[arg(short = 'c')]
    command: Option<String>,

    /// File of command lines to execute, one per line
    #[arg()]
    script: Option<PathBuf>,

    /// Session snapshot to resume from and save to
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Log to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    subcommand: Option<SubCmd>,
}

#[derive(Subcommand, Debug)]
enum SubCmd {
    /// Print completion candidates for a partial path
    Complete {
        /// Partial path as typed
        #[arg(default_value = "")]
        partial: String,
    },
    /// Show the mission curriculum and progress
    Missions {
        /// Print progress as JSON
        #[arg(long)]
        json: bool,
    },
    /// Discard the saved session and start over
    Reset,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut pg = match &args.state {
        Some(path) => load(path)?,
        None => Playground::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.subcommand {
        Some(SubCmd::Complete { partial }) => {
            for candidate in pg.completions(&partial) {
                writeln!(out, "{candidate}")?;
            }
            return Ok(());
        }
        Some(SubCmd::Missions { json }) => {
            if json {
                let progress = serde_json::to_string_pretty(pg.progress())
                    .context("Failed to encode progress")?;
                writeln!(out, "{progress}")?;
            } else {
                print_missions(&pg, &mut out)?;
            }
            return Ok(());
        }
        Some(SubCmd::Reset) => {
            pg.reset();
            return save(&pg, args.state.as_deref());
        }
        None => {}
    }

    if let Some(cmd) = args.command {
        repl::run_line(&mut pg, &cmd, &mut out)?;
        return save(&pg, args.state.as_deref());
    }

    if let Some(script_path) = args.script {
        let script = std::fs::read_to_string(&script_path)
            .with_context(|| format!("Failed to read script: {}", script_path.display()))?;
        for line in script.lines() {
            repl::run_line(&mut pg, line, &mut out)?;
        }
        return save(&pg, args.state.as_deref());
    }

    let stdin = io::stdin();
    repl::interactive(&mut pg, stdin.lock(), &mut out, |pg| {
        save(pg, args.state.as_deref())
    })
}

fn init_tracing(verbose: bool) {
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Resume the snapshot at `path`, or start fresh if there is none yet.
fn load(path: &Path) -> Result<Playground> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no saved session, starting fresh");
        return Ok(Playground::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state: {}", path.display()))?;
    Playground::from_json(&json)
        .with_context(|| format!("Failed to restore state: {}", path.display()))
}

fn save(pg: &Playground, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = pg
        .snapshot()
        .to_json_pretty()
        .context("Failed to encode session")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write state: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

fn print_missions(pg: &Playground, out: &mut impl Write) -> Result<()> {
    let progress = pg.progress();
    writeln!(
        out,
        "Progress: {}/{} substeps",
        progress.completed_count(),
        progress.total()
    )?;
    for mission in curriculum() {
        let state = if progress.level_complete(mission.id) {
            "done"
        } else if mission.id <= progress.unlocked_level {
            "open"
        } else {
            "locked"
        };
        writeln!(out)?;
        writeln!(out, "Level {}: {} [{state}]", mission.id, mission.title)?;
        if mission.id > progress.unlocked_level {
            continue;
        }
        for step in mission.substeps {
            let mark = if progress.is_complete(step.id) { "x" } else { " " };
            writeln!(out, "  [{mark}] {} {}", step.id, step.text)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["playground", "-c", "ls -la", "--state", "s.json"]);
        assert_eq!(args.command.as_deref(), Some("ls -la"));
        assert_eq!(args.state, Some(PathBuf::from("s.json")));
        assert!(args.subcommand.is_none());

        let args = Args::parse_from(["playground", "complete", "CP/Co", "--state", "s.json"]);
        assert!(matches!(args.subcommand, Some(SubCmd::Complete { ref partial }) if partial == "CP/Co"));
        assert!(args.state.is_some());
    }

    #[test]
    fn test_state_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut pg = load(&path).unwrap();
        pg.exec("mkdir -p CP/Codeforces/Round900");
        pg.exec("cd CP");
        save(&pg, Some(&path)).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored.cwd(), "/home/user/CP");
        assert_eq!(restored.tree(), pg.tree());
        assert!(restored.progress().is_complete("1.1"));
    }

    #[test]
    fn test_corrupt_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{").unwrap();
        let err = load(&path).err().unwrap();
        assert!(format!("{err:#}").contains("Failed to restore state"));
    }

    #[test]
    fn test_print_missions_hides_locked_substeps() {
        let mut out = Vec::new();
        print_missions(&Playground::new(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Progress: 0/32 substeps"));
        assert!(text.contains("Level 1: Project Scaffolding [open]"));
        assert!(text.contains("  [ ] 1.1 "));
        assert!(text.contains("Level 2: File Creation & Hidden Files [locked]"));
        assert!(!text.contains("2.1"));
    }
}
