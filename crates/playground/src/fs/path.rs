//! Path resolution helpers
//!
//! Pure string functions; nothing here touches a tree. `~` is never expanded at
//! this layer, callers that accept it (the `cd` builtin) do so first.

/// Normalize `path` against `cwd` into a clean absolute path.
///
/// Absolute inputs ignore `cwd`. Empty segments and `.` are dropped, `..` pops the
/// previous segment and is a no-op at the root. The root is exactly `"/"`.
///
/// ```
/// use playground::normalize;
///
/// assert_eq!(normalize("../docs/./a.txt", "/home/user"), "/home/docs/a.txt");
/// assert_eq!(normalize("/../..", "/home"), "/");
/// ```
pub fn normalize(path: &str, cwd: &str) -> String {
    format!("/{}", segments(path, cwd).join("/"))
}

/// Normalized segments of `path` resolved against `cwd`. Empty for the root.
pub fn segments(path: &str, cwd: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let base = if path.starts_with('/') { "" } else { cwd };
    for seg in base.split('/').chain(path.split('/')) {
        match seg {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            name => out.push(name.to_string()),
        }
    }
    out
}

/// Whether `inner` is `outer` itself or lies somewhere beneath it.
pub(crate) fn is_within(inner: &[String], outer: &[String]) -> bool {
    inner.starts_with(outer)
}
