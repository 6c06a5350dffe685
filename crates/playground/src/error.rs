//! Error types for Playground
//!
//! Two families live here:
//! - [`FsError`]: failures of filesystem engine operations. Their `Display` output is
//!   the exact tool-style message a learner sees in the terminal, so the wording is
//!   part of the contract and must not drift.
//! - [`Error`]: failures of the session surface (snapshot decoding and validation).
//!   The shell itself never returns these; command failures are output text.

use thiserror::Error;

/// Result type alias using Playground's session Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for filesystem engine operations.
pub type FsResult<T> = std::result::Result<T, FsError>;

/// Why a path operation failed, phrased the way coreutils phrase it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a directory")]
    NotADirectory,
    #[error("Is a directory")]
    IsADirectory,
    #[error("File exists")]
    FileExists,
}

/// Error category, independent of which tool reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced path has no resolvable node.
    NotFound,
    /// Expected a directory but found a file, or vice versa.
    TypeMismatch,
    /// Creation target collides with an existing node.
    AlreadyExists,
    /// Operation is not permitted on this target (root, self-nesting).
    InvalidTarget,
    /// Result would exceed a tree limit.
    LimitExceeded,
}

impl From<Reason> for ErrorKind {
    fn from(reason: Reason) -> Self {
        match reason {
            Reason::NotFound => ErrorKind::NotFound,
            Reason::NotADirectory | Reason::IsADirectory => ErrorKind::TypeMismatch,
            Reason::FileExists => ErrorKind::AlreadyExists,
        }
    }
}

/// Filesystem engine error.
///
/// Every variant keeps the operand exactly as the user typed it, since the
/// message echoes it back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("ls: cannot access '{0}': No such file or directory")]
    CannotAccess(String),

    #[error("mkdir: cannot create directory '{path}': {reason}")]
    Mkdir { path: String, reason: Reason },

    #[error("touch: cannot touch '{path}': {reason}")]
    Touch { path: String, reason: Reason },

    #[error("touch: cannot touch '/'")]
    TouchRoot,

    /// Redirection target failure, reported by the shell itself.
    #[error("bash: {path}: {reason}")]
    Redirect { path: String, reason: Reason },

    #[error("cannot write to '/'")]
    WriteRoot,

    #[error("cat: {path}: {reason}")]
    Read { path: String, reason: Reason },

    #[error("rm: cannot remove '{path}': {reason}")]
    Remove { path: String, reason: Reason },

    #[error("rm: cannot remove '/'")]
    RemoveRoot,

    #[error("cp: cannot stat '{0}': No such file or directory")]
    CopySourceMissing(String),

    #[error("cp: -r not specified; omitting directory '{0}'")]
    OmitDirectory(String),

    #[error("cp: cannot copy to '{0}': No such file or directory")]
    CopyDestination(String),

    #[error("cp: cannot copy a directory, '{src}', into itself, '{dest}'")]
    CopyIntoSelf { src: String, dest: String },

    #[error("mv: cannot stat '{0}': No such file or directory")]
    MoveSourceMissing(String),

    #[error("mv: cannot move to '{0}': No such file or directory")]
    MoveDestination(String),

    #[error("mv: cannot move '{src}' to a subdirectory of itself, '{dest}'")]
    MoveIntoSelf { src: String, dest: String },

    /// Result would nest deeper than [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("{tool}: cannot create '{path}': path too deep ({limit} levels max)")]
    PathTooDeep {
        tool: &'static str,
        path: String,
        limit: usize,
    },
}

impl FsError {
    /// The underlying reason, for variants that carry one.
    ///
    /// Lets a caller rephrase the failure under its own tool name.
    pub fn reason(&self) -> Option<Reason> {
        match self {
            FsError::Mkdir { reason, .. }
            | FsError::Touch { reason, .. }
            | FsError::Redirect { reason, .. }
            | FsError::Read { reason, .. }
            | FsError::Remove { reason, .. } => Some(*reason),
            FsError::CannotAccess(_)
            | FsError::CopySourceMissing(_)
            | FsError::CopyDestination(_)
            | FsError::MoveSourceMissing(_)
            | FsError::MoveDestination(_) => Some(Reason::NotFound),
            FsError::OmitDirectory(_) => Some(Reason::IsADirectory),
            FsError::TouchRoot
            | FsError::WriteRoot
            | FsError::RemoveRoot
            | FsError::CopyIntoSelf { .. }
            | FsError::MoveIntoSelf { .. }
            | FsError::PathTooDeep { .. } => None,
        }
    }

    /// Categorize this error.
    pub fn kind(&self) -> ErrorKind {
        if let FsError::PathTooDeep { .. } = self {
            return ErrorKind::LimitExceeded;
        }
        self.reason()
            .map(ErrorKind::from)
            .unwrap_or(ErrorKind::InvalidTarget)
    }
}

/// Playground session error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot JSON could not be decoded or encoded.
    #[error("snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot was written by an incompatible storage version.
    #[error("snapshot version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    /// Snapshot decoded but describes an impossible state.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_coreutils() {
        let err = FsError::Mkdir {
            path: "a/b".to_string(),
            reason: Reason::FileExists,
        };
        assert_eq!(
            err.to_string(),
            "mkdir: cannot create directory 'a/b': File exists"
        );
        assert_eq!(
            FsError::OmitDirectory("src".to_string()).to_string(),
            "cp: -r not specified; omitting directory 'src'"
        );
        assert_eq!(
            FsError::Redirect {
                path: "out".to_string(),
                reason: Reason::IsADirectory
            }
            .to_string(),
            "bash: out: Is a directory"
        );
    }

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(
            FsError::CannotAccess("x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            FsError::Remove {
                path: "d".into(),
                reason: Reason::IsADirectory
            }
            .kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            FsError::Mkdir {
                path: "d".into(),
                reason: Reason::FileExists
            }
            .kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(FsError::RemoveRoot.kind(), ErrorKind::InvalidTarget);
        assert_eq!(
            FsError::PathTooDeep {
                tool: "mkdir",
                path: "a/a".into(),
                limit: 100
            }
            .kind(),
            ErrorKind::LimitExceeded
        );
    }
}
