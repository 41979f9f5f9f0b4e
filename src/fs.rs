use crate::errors::FsError;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem boundary used by delete and restore.
///
/// Keeping this trait narrow makes it easy to inject failures in tests
/// (a rename that crosses devices, a file that refuses removal) without
/// touching the operations themselves.
pub trait FileSystem: Send + Sync {
    /// Returns true when something exists at path, including dangling symlinks.
    fn exists(&self, path: &Path) -> bool {
        self.symlink_metadata(path).is_ok()
    }

    /// Reads metadata without following a final symlink.
    fn symlink_metadata(&self, path: &Path) -> Result<Metadata, FsError>;

    /// Creates a single directory.
    fn create_dir(&self, path: &Path) -> Result<(), FsError>;

    /// Creates a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;

    /// Copies a regular file, returning the number of bytes written.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<u64, FsError>;

    /// Reads the target of a symlink.
    fn read_link(&self, path: &Path) -> Result<PathBuf, FsError>;

    /// Creates a symlink at `link` pointing to `target`.
    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError>;

    /// Moves `from` to `to` without ever replacing an existing object at `to`.
    ///
    /// Fails with `AlreadyExists` (reported against `to`) when the target is
    /// taken, and with `CrossesDevices` when the two paths are on different
    /// volumes.
    fn rename_noreplace(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Removes a file or symlink.
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;

    /// Removes an empty directory.
    fn remove_dir(&self, path: &Path) -> Result<(), FsError>;

    /// Lists directory children as concrete paths.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FsError>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn symlink_metadata(&self, path: &Path) -> Result<Metadata, FsError> {
        fs::symlink_metadata(path).map_err(|err| FsError::new(path, err))
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir(path).map_err(|err| FsError::new(path, err))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path).map_err(|err| FsError::new(path, err))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<u64, FsError> {
        fs::copy(from, to).map_err(|err| FsError::new(from, err))
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf, FsError> {
        fs::read_link(path).map_err(|err| FsError::new(path, err))
    }

    #[cfg(unix)]
    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        std::os::unix::fs::symlink(target, link).map_err(|err| FsError::new(link, err))
    }

    #[cfg(not(unix))]
    fn symlink(&self, _target: &Path, link: &Path) -> Result<(), FsError> {
        Err(FsError::new(link, io::Error::from(io::ErrorKind::Unsupported)))
    }

    fn rename_noreplace(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        #[cfg(target_os = "linux")]
        {
            match renameat2_noreplace(from, to) {
                Ok(()) => return Ok(()),
                // Filesystem or kernel without RENAME_NOREPLACE support.
                Err(err) if matches!(err.raw_os_error(), Some(libc::EINVAL) | Some(libc::ENOSYS)) => {}
                Err(err) => return Err(rename_error(from, to, err)),
            }
        }

        link_then_unlink(from, to)
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_file(path).map_err(|err| FsError::new(path, err))
    }

    fn remove_dir(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_dir(path).map_err(|err| FsError::new(path, err))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FsError> {
        fs::read_dir(path)
            .map_err(|err| FsError::new(path, err))?
            .map(|entry| entry.map(|v| v.path()))
            .collect::<Result<Vec<PathBuf>, io::Error>>()
            .map_err(|err| FsError::new(path, err))
    }
}

fn rename_error(from: &Path, to: &Path, err: io::Error) -> FsError {
    if err.kind() == io::ErrorKind::AlreadyExists {
        FsError::new(to, err)
    } else {
        FsError::new(from, err)
    }
}

#[cfg(target_os = "linux")]
fn renameat2_noreplace(from: &Path, to: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let from = CString::new(from.as_os_str().as_bytes())?;
    let to = CString::new(to.as_os_str().as_bytes())?;
    let rc = unsafe {
        libc::renameat2(
            libc::AT_FDCWD,
            from.as_ptr(),
            libc::AT_FDCWD,
            to.as_ptr(),
            libc::RENAME_NOREPLACE,
        )
    };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Portable no-replace move. A hard link refuses an existing target; the
/// source name is dropped only once the link exists. Directories cannot be
/// hard linked, but `rename(2)` of a directory fails on any non-directory or
/// non-empty directory target, so at worst an empty directory is replaced.
fn link_then_unlink(from: &Path, to: &Path) -> Result<(), FsError> {
    let metadata = fs::symlink_metadata(from).map_err(|err| FsError::new(from, err))?;
    if metadata.is_dir() {
        if fs::symlink_metadata(to).is_ok() {
            return Err(FsError::new(to, io::Error::from(io::ErrorKind::AlreadyExists)));
        }
        return fs::rename(from, to).map_err(|err| rename_error(from, to, err));
    }

    fs::hard_link(from, to).map_err(|err| rename_error(from, to, err))?;
    if let Err(err) = fs::remove_file(from) {
        if let Err(undo) = fs::remove_file(to) {
            tracing::warn!(path = %to.display(), error = %undo, "could not undo hard link after failed move");
        }
        return Err(FsError::new(from, err));
    }
    Ok(())
}
