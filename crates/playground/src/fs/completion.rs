//! Tab-completion queries

use super::node::Node;
use super::path;
use super::tree::Tree;

impl Tree {
    /// Candidate completions for `partial`, a single token typed at `cwd`.
    ///
    /// - empty or `"."`: every entry of `cwd`
    /// - ending in `/`: every entry of that directory
    /// - otherwise: entries of the parent whose name starts with the typed
    ///   basename, each prefixed with whatever the user typed up to the last `/`
    ///
    /// Directories carry a trailing `/`. Results are sorted. An unresolvable
    /// parent yields nothing.
    pub fn completions(&self, partial: &str, cwd: &str) -> Vec<String> {
        if partial.is_empty() || partial == "." {
            return self
                .resolve(cwd, "/")
                .map(|dir| complete_in(dir, "", ""))
                .unwrap_or_default();
        }

        if partial.ends_with('/') {
            return self
                .resolve(partial, cwd)
                .map(|dir| complete_in(dir, "", ""))
                .unwrap_or_default();
        }

        let mut segs = path::segments(partial, cwd);
        let stem = segs.pop().unwrap_or_default();
        let parent = format!("/{}", segs.join("/"));
        let prefix = partial
            .rfind('/')
            .map(|idx| &partial[..=idx])
            .unwrap_or("");

        self.resolve(&parent, "/")
            .map(|dir| complete_in(dir, &stem, prefix))
            .unwrap_or_default()
    }
}

fn complete_in(dir: &Node, stem: &str, prefix: &str) -> Vec<String> {
    let Some(children) = dir.children() else {
        return Vec::new();
    };
    children
        .iter()
        .filter(|(name, _)| name.starts_with(stem))
        .map(|(name, node)| {
            let slash = if node.is_dir() { "/" } else { "" };
            format!("{prefix}{name}{slash}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::DEFAULT_HOME as HOME;
    use pretty_assertions::assert_eq;

    fn sample() -> Tree {
        Tree::default()
            .make_directory("CP/Codeforces", HOME, true)
            .unwrap()
            .make_directory("CP/AtCoder", HOME, true)
            .unwrap()
            .write_file("CP/notes.txt", HOME, "", false)
            .unwrap()
            .write_file("cheat.md", HOME, "", false)
            .unwrap()
    }

    #[test]
    fn test_empty_lists_cwd() {
        let tree = sample();
        assert_eq!(tree.completions("", HOME), vec!["CP/", "cheat.md"]);
        assert_eq!(tree.completions(".", HOME), vec!["CP/", "cheat.md"]);
    }

    #[test]
    fn test_trailing_slash_lists_directory() {
        let tree = sample();
        assert_eq!(
            tree.completions("CP/", HOME),
            vec!["AtCoder/", "Codeforces/", "notes.txt"]
        );
    }

    #[test]
    fn test_prefix_match_keeps_typed_prefix() {
        let tree = sample();
        assert_eq!(tree.completions("CP/Co", HOME), vec!["CP/Codeforces/"]);
        assert_eq!(tree.completions("c", HOME), vec!["cheat.md"]);
        assert_eq!(tree.completions("C", HOME), vec!["CP/"]);
    }

    #[test]
    fn test_absolute_prefix() {
        let tree = sample();
        assert_eq!(tree.completions("/ho", HOME), vec!["/home/"]);
    }

    #[test]
    fn test_unresolvable_parent_is_empty() {
        let tree = sample();
        assert!(tree.completions("nope/x", HOME).is_empty());
        assert!(tree.completions("cheat.md/", HOME).is_empty());
        assert!(tree.completions("zzz", HOME).is_empty());
    }
}
