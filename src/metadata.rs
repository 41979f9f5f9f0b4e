//! The parsed trash info an entry is built from.
//!
//! Reading and parsing `.trashinfo` files belongs to the scanner; this module
//! only describes what a parsed record must expose.

use crate::errors::CoreError;
use crate::helpers::parse_trash_datetime;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Parsed metadata for one trashed object.
pub trait TrashMetadata {
    /// Absolute path the object occupied before it was trashed.
    fn original_path(&self) -> &Path;

    /// When the object was trashed.
    fn deleted_at(&self) -> DateTime<Utc>;

    /// Location of the sidecar `.trashinfo` file, when there is one.
    fn info_path(&self) -> Option<&Path> {
        None
    }
}

/// Plain owned trash info record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashInfo {
    pub original_path: PathBuf,
    pub deleted_at: DateTime<Utc>,
    pub info_path: Option<PathBuf>,
}

impl TrashInfo {
    pub fn new(original_path: impl Into<PathBuf>, deleted_at: DateTime<Utc>) -> Self {
        Self {
            original_path: original_path.into(),
            deleted_at,
            info_path: None,
        }
    }

    /// Builds a record from the raw `Path` and `DeletionDate` values of a
    /// parsed trash info file. Both must be present and well formed.
    pub fn from_fields(original_path: &str, deletion_date: &str) -> crate::Result<Self> {
        if original_path.is_empty() {
            return Err(CoreError::invalid_entry("trash info has an empty Path"));
        }

        let path = PathBuf::from(original_path);
        if !path.is_absolute() {
            return Err(CoreError::invalid_entry(format!(
                "trash info Path is not absolute: {original_path}"
            )));
        }

        let deleted_at = parse_trash_datetime(deletion_date).ok_or_else(|| {
            CoreError::invalid_entry(format!("unreadable DeletionDate: {deletion_date}"))
        })?;

        Ok(Self::new(path, deleted_at))
    }

    pub fn with_info_path(mut self, info_path: impl Into<PathBuf>) -> Self {
        self.info_path = Some(info_path.into());
        self
    }
}

impl TrashMetadata for TrashInfo {
    fn original_path(&self) -> &Path {
        &self.original_path
    }

    fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    fn info_path(&self) -> Option<&Path> {
        self.info_path.as_deref()
    }
}
