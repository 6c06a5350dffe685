//! Line-oriented front end
//!
//! Prints command output and mission notices for each line. The interactive
//! loop reads from any `BufRead`, so tests drive it with in-memory input.

use anyhow::Result;
use playground::{Playground, curriculum};
use std::io::{BufRead, Write};

/// ANSI clear screen and cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Run one line and print its output and any mission progress it made.
pub fn run_line(pg: &mut Playground, line: &str, out: &mut impl Write) -> Result<()> {
    let result = pg.exec(line);
    if result.should_clear {
        write!(out, "{CLEAR_SCREEN}")?;
    }
    for text in &result.output {
        writeln!(out, "{text}")?;
    }

    let update = pg.last_update();
    for id in &update.completed_substeps {
        writeln!(out, "✔ Step {id} complete")?;
    }
    if let Some(level) = update.completed_level {
        let title = curriculum()
            .iter()
            .find(|m| m.id == level)
            .map(|m| m.title)
            .unwrap_or_default();
        writeln!(out, "★ Level {level} complete: {title}")?;
    }
    Ok(())
}

/// Prompt, read, run until `exit` or end of input. `after_each` runs after
/// every line that executed (used to save the session).
pub fn interactive<F>(
    pg: &mut Playground,
    input: impl BufRead,
    out: &mut impl Write,
    mut after_each: F,
) -> Result<()>
where
    F: FnMut(&Playground) -> Result<()>,
{
    let mut lines = input.lines();
    loop {
        write!(out, "{}", pg.prompt())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;
        if matches!(line.trim(), "exit" | "logout") {
            return Ok(());
        }

        run_line(pg, &line, out)?;
        after_each(pg)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(input: &str) -> (Playground, String, usize) {
        let mut pg = Playground::new();
        let mut out = Vec::new();
        let mut saves = 0;
        interactive(&mut pg, input.as_bytes(), &mut out, |_| {
            saves += 1;
            Ok(())
        })
        .unwrap();
        (pg, String::from_utf8(out).unwrap(), saves)
    }

    #[test]
    fn test_prompt_tracks_directory() {
        let (pg, out, saves) = session("mkdir docs\ncd docs\npwd\n");
        assert_eq!(pg.cwd(), "/home/user/docs");
        assert_eq!(saves, 3);
        assert_eq!(
            out,
            "user@linux:~$ user@linux:~$ user@linux:~/docs$ /home/user/docs\nuser@linux:~/docs$ \n"
        );
    }

    #[test]
    fn test_exit_stops_reading() {
        let (pg, _, saves) = session("touch a\nexit\ntouch b\n");
        assert!(pg.tree().exists("a", "/home/user"));
        assert!(!pg.tree().exists("b", "/home/user"));
        assert_eq!(saves, 1);
    }

    #[test]
    fn test_mission_notices() {
        let mut pg = Playground::new();
        let mut out = Vec::new();
        run_line(&mut pg, "mkdir -p CP/Codeforces/Round900", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "✔ Step 1.1 complete\n");
    }

    #[test]
    fn test_clear_emits_escape() {
        let mut pg = Playground::new();
        let mut out = Vec::new();
        run_line(&mut pg, "clear", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), CLEAR_SCREEN);
    }
}
