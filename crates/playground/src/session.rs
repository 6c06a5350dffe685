//! Session persistence
//!
//! A [`SessionSnapshot`] is everything needed to resume a learner's session:
//! the tree, working directory, raw history and mission progress. It is plain
//! JSON; where it is stored is up to the caller.

use serde::{Deserialize, Serialize};

use crate::Playground;
use crate::error::{Error, Result};
use crate::fs::{MAX_DEPTH, Tree, normalize};
use crate::mission::Progress;

/// Current snapshot format version.
pub const STORAGE_VERSION: u32 = 1;

/// Serializable session state.
///
/// Progress fields sit at the top level next to the tree:
///
/// ```json
/// { "version": 1, "fsState": {..}, "currentDir": "/home/user",
///   "commandHistory": [..], "substepStatus": {..},
///   "unlockedLevel": 1, "activeLevel": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub version: u32,
    #[serde(rename = "fsState")]
    pub tree: Tree,
    #[serde(rename = "currentDir")]
    pub cwd: String,
    #[serde(default)]
    pub command_history: Vec<String>,
    #[serde(flatten)]
    pub progress: Progress,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl SessionSnapshot {
    /// Decode and validate a snapshot.
    ///
    /// The version is checked before the rest of the document is decoded, so a
    /// snapshot from another format version reports a version error rather than
    /// whatever shape difference it happens to hit first.
    pub fn from_json(json: &str) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_str(json)?;
        if probe.version != STORAGE_VERSION {
            return Err(Error::VersionMismatch {
                found: probe.version,
                expected: STORAGE_VERSION,
            });
        }

        let mut snapshot: SessionSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&mut self) -> Result<()> {
        if !self.tree.root().is_dir() {
            return Err(Error::InvalidSnapshot("root is not a directory".into()));
        }
        if self.tree.root().levels() - 1 > MAX_DEPTH {
            return Err(Error::InvalidSnapshot(format!(
                "tree is nested deeper than {MAX_DEPTH} levels"
            )));
        }
        if normalize(&self.cwd, "/") != self.cwd {
            return Err(Error::InvalidSnapshot(format!(
                "current directory '{}' is not an absolute normalized path",
                self.cwd
            )));
        }
        if !self.tree.is_dir(&self.cwd, "/") {
            return Err(Error::InvalidSnapshot(format!(
                "current directory '{}' is not a directory",
                self.cwd
            )));
        }
        self.progress.repair().map_err(Error::InvalidSnapshot)
    }
}

impl Playground {
    /// Capture the current session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: STORAGE_VERSION,
            tree: self.tree.clone(),
            cwd: self.cwd.clone(),
            command_history: self.history.clone(),
            progress: self.progress.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    /// Resume a session with default configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut playground = Playground::new();
        playground.restore(SessionSnapshot::from_json(json)?);
        Ok(playground)
    }

    /// Replace this session's state with `snapshot`, keeping configuration.
    ///
    /// The mission tracker runs once against the restored state, so a step
    /// satisfied just before the snapshot was taken is credited now.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.tree = snapshot.tree;
        self.cwd = snapshot.cwd;
        self.history = snapshot.command_history;
        self.progress = snapshot.progress;
        self.last_update = self.progress.record(&self.tree, &self.cwd, &self.history);

        #[cfg(feature = "logging")]
        tracing::info!(
            commands = self.history.len(),
            completed = self.progress.completed_count(),
            total = self.progress.total(),
            "session restored"
        );
    }
}
