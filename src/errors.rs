use std::{io, path::PathBuf};

/// A filesystem call that failed, together with the path it was applied to.
#[derive(thiserror::Error, Debug)]
#[error("I/O error while accessing {path}: {source}")]
pub struct FsError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FsError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

/// Permanent deletion failed. `path` names the object that could not be
/// removed, which for directories may be a descendant of the trashed path.
#[derive(thiserror::Error, Debug)]
#[error("failed to delete {path}: {cause}")]
pub struct DeleteError {
    pub path: PathBuf,
    #[source]
    pub cause: io::Error,
}

impl From<FsError> for DeleteError {
    fn from(err: FsError) -> Self {
        Self {
            path: err.path,
            cause: err.source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RestoreError {
    /// Something already occupies the original location. Nothing was moved.
    #[error("target already exists: {path}")]
    TargetExists { path: PathBuf },

    /// Creating ancestors, moving or copying failed. The object is still in
    /// the trash.
    #[error("restore failed: {cause}")]
    Io {
        #[source]
        cause: FsError,
    },

    /// A cross-device restore put a complete copy at `target`, but the
    /// trashed object could not be removed afterwards. Both copies exist and
    /// the `.trashinfo` sidecar is kept. Deleting the entry finishes the
    /// restore; restoring it again fails with `TargetExists`.
    #[error("restored to {target} but the trashed copy remains: {cause}")]
    SourceNotRemoved {
        target: PathBuf,
        #[source]
        cause: FsError,
    },
}

impl RestoreError {
    /// True when the object is at its original path despite the error.
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::SourceNotRemoved { .. })
    }
}

impl From<FsError> for RestoreError {
    fn from(cause: FsError) -> Self {
        Self::Io { cause }
    }
}

/// Umbrella error for hosts that handle every entry outcome in one place.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    /// Construction-time contract violation.
    #[error("invalid trash entry: {0}")]
    InvalidEntry(String),

    #[error(transparent)]
    Delete(#[from] DeleteError),

    #[error(transparent)]
    Restore(#[from] RestoreError),
}

impl CoreError {
    pub fn invalid_entry(message: impl Into<String>) -> Self {
        Self::InvalidEntry(message.into())
    }
}

/// Shared result alias for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
