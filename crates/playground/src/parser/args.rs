//! Flag and operand classification
//!
//! Any word starting with `-` is a flag, wherever it appears; everything else is
//! a positional operand. Each flag word is parsed exactly once into a [`Flag`]:
//!
//! | word          | parsed as                     |
//! |---------------|-------------------------------|
//! | `--name`      | `Flag::Long("name")`          |
//! | `-name=value` | `Flag::Assign("name", value)` |
//! | `-abc`        | `Flag::Short({a, b, c})`      |
//!
//! Handlers then query the parsed set and never look at raw strings again.

use std::collections::BTreeSet;

/// One parsed flag word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    /// Cluster of single-character flags, e.g. `-rf`.
    Short(BTreeSet<char>),
    /// Long flag without the leading `--`.
    Long(String),
    /// `-name=value` form.
    Assign(String, String),
}

impl Flag {
    /// Parse a word that starts with `-`.
    pub fn parse(word: &str) -> Flag {
        if let Some(name) = word.strip_prefix("--") {
            return Flag::Long(name.to_string());
        }
        let body = word.strip_prefix('-').unwrap_or(word);
        match body.split_once('=') {
            Some((name, value)) => Flag::Assign(name.to_string(), value.to_string()),
            None => Flag::Short(body.chars().collect()),
        }
    }
}

/// All flags of one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    short: BTreeSet<char>,
    long: Vec<String>,
    assigned: Vec<(String, String)>,
}

impl FlagSet {
    pub fn insert(&mut self, flag: Flag) {
        match flag {
            Flag::Short(chars) => self.short.extend(chars),
            Flag::Long(name) => self.long.push(name),
            Flag::Assign(name, value) => self.assigned.push((name, value)),
        }
    }

    /// Whether short flag `c` is set, alone (`-r`) or in a cluster (`-rf`).
    pub fn has(&self, c: char) -> bool {
        self.short.contains(&c)
    }

    pub fn has_long(&self, name: &str) -> bool {
        self.long.iter().any(|l| l == name)
    }

    /// Value of the first `-name=value` flag with this name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.assigned
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Arguments split into flags and positional operands.
#[derive(Debug, Clone, Default)]
pub struct Args {
    pub flags: FlagSet,
    pub positional: Vec<String>,
}

impl Args {
    pub fn parse(words: &[String]) -> Self {
        let mut args = Args::default();
        for word in words {
            if word.starts_with('-') {
                args.flags.insert(Flag::parse(word));
            } else {
                args.positional.push(word.clone());
            }
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_grammar() {
        assert_eq!(Flag::parse("-rf"), Flag::Short(['r', 'f'].into()));
        assert_eq!(Flag::parse("--recursive"), Flag::Long("recursive".into()));
        assert_eq!(
            Flag::parse("-std=c++20"),
            Flag::Assign("std".into(), "c++20".into())
        );
        assert_eq!(Flag::parse("-"), Flag::Short(BTreeSet::new()));
    }

    #[test]
    fn test_compound_short_flags() {
        let args = Args::parse(&words(&["-la"]));
        assert!(args.flags.has('l'));
        assert!(args.flags.has('a'));
        assert!(!args.flags.has('r'));
    }

    #[test]
    fn test_flags_after_operands_still_flags() {
        let args = Args::parse(&words(&["dir", "-r", "other"]));
        assert!(args.flags.has('r'));
        assert_eq!(args.positional, vec!["dir", "other"]);
    }

    #[test]
    fn test_long_and_assigned_do_not_leak_into_short() {
        let args = Args::parse(&words(&["--force", "-std=c++17"]));
        assert!(!args.flags.has('r'));
        assert!(!args.flags.has('s'));
        assert!(args.flags.has_long("force"));
        assert_eq!(args.flags.value("std"), Some("c++17"));
    }
}
