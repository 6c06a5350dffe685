//! Simulated environment settings

use crate::fs::DEFAULT_HOME;

/// Default owner shown in long listings.
pub const DEFAULT_USER: &str = "user";

/// Placeholder modification time shown in long listings.
pub const DEFAULT_TIMESTAMP: &str = "Jan  1 00:00";

/// Default compiler command word.
pub const DEFAULT_COMPILER: &str = "g++";

/// The environment a shell pretends to run in.
///
/// Nothing here is read from the host; every value is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Target of bare `cd` and of `~` expansion.
    pub home: String,
    /// Owner and group in `ls -l`.
    pub user: String,
    /// Timestamp column in `ls -l`.
    pub timestamp: String,
    /// Command word that runs the compiler simulation.
    pub compiler: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home: DEFAULT_HOME.to_string(),
            user: DEFAULT_USER.to_string(),
            timestamp: DEFAULT_TIMESTAMP.to_string(),
            compiler: DEFAULT_COMPILER.to_string(),
        }
    }
}

impl ShellConfig {
    /// Expand a leading `~` (alone or as `~/...`) to the home directory.
    pub fn expand_home(&self, path: &str) -> String {
        if path == "~" {
            return self.home.clone();
        }
        match path.strip_prefix("~/") {
            Some(rest) => format!("{}/{}", self.home.trim_end_matches('/'), rest),
            None => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let config = ShellConfig::default();
        assert_eq!(config.expand_home("~"), "/home/user");
        assert_eq!(config.expand_home("~/CP"), "/home/user/CP");
        assert_eq!(config.expand_home("~user"), "~user");
        assert_eq!(config.expand_home("a/~"), "a/~");
    }
}
