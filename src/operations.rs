//! Permanent delete and restore of trash entries.
//!
//! Both operations are synchronous and run to completion. A host that needs a
//! responsive UI runs them on a worker; concurrent calls for the same entry
//! are the host's to prevent.

use crate::errors::{DeleteError, FsError, RestoreError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::helpers::sanitize_user_path;
use crate::models::TrashEntry;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Behaviour switches for [`TrashOperations`].
#[derive(Debug, Clone, Copy)]
pub struct OperationOptions {
    /// Copy then delete when the original location is on another volume.
    pub cross_device_fallback: bool,
    /// Remove the `.trashinfo` sidecar once the entry is gone from the trash.
    pub remove_info_file: bool,
}

impl Default for OperationOptions {
    fn default() -> Self {
        Self {
            cross_device_fallback: true,
            remove_info_file: true,
        }
    }
}

impl OperationOptions {
    pub fn with_cross_device_fallback(mut self, enabled: bool) -> Self {
        self.cross_device_fallback = enabled;
        self
    }

    pub fn with_remove_info_file(mut self, enabled: bool) -> Self {
        self.remove_info_file = enabled;
        self
    }
}

/// Delete and restore over a [`FileSystem`].
#[derive(Debug, Default, Clone)]
pub struct TrashOperations<F = RealFileSystem> {
    fs: F,
    options: OperationOptions,
}

impl TrashOperations<RealFileSystem> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: FileSystem> TrashOperations<F> {
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            options: OperationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: OperationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &OperationOptions {
        &self.options
    }

    /// Permanently removes the entry's trashed object.
    ///
    /// Directories are removed depth first. The first failure aborts the walk
    /// and is reported with the path that could not be removed; anything
    /// already removed stays removed. Nothing is retried.
    pub fn delete(&self, entry: &TrashEntry) -> Result<(), DeleteError> {
        let path = entry.trashed_path();
        debug!(path = %sanitize_user_path(path), directory = entry.is_directory(), "deleting trash entry");

        if entry.is_directory() {
            self.remove_tree(path)?;
        } else {
            self.fs.remove_file(path)?;
        }

        info!(name = entry.name(), "deleted trash entry");
        self.remove_info_file(entry);
        Ok(())
    }

    /// Moves the entry's trashed object back to its original path.
    ///
    /// Missing ancestors of the original path are created. An existing object
    /// at the original path aborts the restore before anything moves, and the
    /// final move refuses to replace anything that appears there meanwhile.
    ///
    /// [`RestoreError::SourceNotRemoved`] means the object is already back in
    /// place; the host finishes by deleting the entry.
    pub fn restore(&self, entry: &TrashEntry) -> Result<(), RestoreError> {
        let source = entry.trashed_path();
        let target = entry.original_path();
        debug!(
            from = %sanitize_user_path(source),
            to = %sanitize_user_path(target),
            "restoring trash entry"
        );

        self.fs.symlink_metadata(source)?;
        if self.fs.exists(target) {
            return Err(RestoreError::TargetExists {
                path: target.to_path_buf(),
            });
        }

        if let Some(parent) = target.parent() {
            self.fs.create_dir_all(parent)?;
        }

        match self.fs.rename_noreplace(source, target) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(RestoreError::TargetExists {
                    path: target.to_path_buf(),
                });
            }
            Err(err) if err.kind() == io::ErrorKind::CrossesDevices && self.options.cross_device_fallback => {
                debug!(to = %sanitize_user_path(target), "rename crosses devices, copying instead");
                self.move_across_devices(source, target)?;
            }
            Err(err) => return Err(err.into()),
        }

        info!(name = entry.name(), to = %sanitize_user_path(target), "restored trash entry");
        self.remove_info_file(entry);
        Ok(())
    }

    fn remove_tree(&self, path: &Path) -> Result<(), FsError> {
        let metadata = self.fs.symlink_metadata(path)?;
        if !metadata.is_dir() {
            return self.fs.remove_file(path);
        }

        for child in self.fs.list_dir(path)? {
            self.remove_tree(&child)?;
        }
        self.fs.remove_dir(path)
    }

    /// Copies into a hidden sibling of `target`, renames it into place, and
    /// only then removes `source`. On copy failure the staging copy is
    /// discarded and `source` is left as it was.
    fn move_across_devices(&self, source: &Path, target: &Path) -> Result<(), RestoreError> {
        let staging = staging_path(target);
        if self.fs.exists(&staging) {
            return Err(FsError::new(staging, io::Error::from(io::ErrorKind::AlreadyExists)).into());
        }

        let placed = self
            .copy_tree(source, &staging)
            .and_then(|()| self.fs.rename_noreplace(&staging, target));
        if let Err(err) = placed {
            if self.fs.exists(&staging) {
                if let Err(cleanup) = self.remove_tree(&staging) {
                    warn!(path = %sanitize_user_path(&cleanup.path), error = %cleanup.source, "could not remove staging copy");
                }
            }
            if err.kind() == io::ErrorKind::AlreadyExists && err.path == target {
                return Err(RestoreError::TargetExists {
                    path: target.to_path_buf(),
                });
            }
            return Err(err.into());
        }

        // The target now holds a complete copy. A failure here leaves data in
        // both places, never in neither.
        self.remove_tree(source).map_err(|cause| {
            warn!(path = %sanitize_user_path(&cause.path), "restored copy is in place but the trashed copy remains");
            RestoreError::SourceNotRemoved {
                target: target.to_path_buf(),
                cause,
            }
        })
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let metadata = self.fs.symlink_metadata(from)?;
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            let link_target = self.fs.read_link(from)?;
            return self.fs.symlink(&link_target, to);
        }

        if file_type.is_dir() {
            self.fs.create_dir(to)?;
            for child in self.fs.list_dir(from)? {
                if let Some(name) = child.file_name() {
                    self.copy_tree(&child, &to.join(name))?;
                }
            }
            return Ok(());
        }

        let copied = self.fs.copy_file(from, to)?;
        if copied != metadata.len() {
            return Err(FsError::new(
                to,
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("copied {copied} of {} bytes", metadata.len()),
                ),
            ));
        }
        Ok(())
    }

    fn remove_info_file(&self, entry: &TrashEntry) {
        if !self.options.remove_info_file {
            return;
        }
        if let Some(info_path) = entry.info_path() {
            if let Err(err) = self.fs.remove_file(info_path) {
                warn!(path = %sanitize_user_path(&err.path), error = %err.source, "could not remove trash info file");
            }
        }
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "item".to_string());
    target.with_file_name(format!(".{name}.restore-{}", std::process::id()))
}

/// Deletes through the real filesystem with default options.
pub fn delete(entry: &TrashEntry) -> Result<(), DeleteError> {
    TrashOperations::new().delete(entry)
}

/// Restores through the real filesystem with default options.
pub fn restore(entry: &TrashEntry) -> Result<(), RestoreError> {
    TrashOperations::new().restore(entry)
}
