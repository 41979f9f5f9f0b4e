use crate::errors::CoreError;
use crate::helpers::format_trash_datetime;
use crate::metadata::TrashMetadata;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Opaque icon handle chosen by the scanner. Never used for ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IconRef(String);

impl IconRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User action on an entry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EntryAction {
    Delete,
    Restore,
}

impl EntryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Restore => "restore",
        }
    }
}

impl std::fmt::Display for EntryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display-ready summary of where an entry came from and when it was trashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    pub original_path: String,
    pub deleted_at: String,
}

/// One trashed file or directory.
///
/// Identity fields are fixed at construction. The only mutable state is the
/// confirmation flag, which belongs to the presentation layer.
#[derive(Debug, Clone)]
pub struct TrashEntry {
    name: String,
    trashed_path: PathBuf,
    original_path: PathBuf,
    info_path: Option<PathBuf>,
    deleted_at: DateTime<Utc>,
    is_directory: bool,
    icon: IconRef,
    confirmation_pending: bool,
}

impl TrashEntry {
    /// Builds an entry from inputs the scanner has already validated.
    /// Performs no filesystem I/O.
    pub fn new<M>(
        name: impl Into<String>,
        trashed_path: impl Into<PathBuf>,
        icon: IconRef,
        is_directory: bool,
        metadata: &M,
    ) -> crate::Result<Self>
    where
        M: TrashMetadata + ?Sized,
    {
        let name = name.into();
        let trashed_path = trashed_path.into();

        if name.is_empty() {
            return Err(CoreError::invalid_entry("name is empty"));
        }
        if trashed_path.as_os_str().is_empty() {
            return Err(CoreError::invalid_entry(format!("trashed path is empty for {name}")));
        }
        if !metadata.original_path().is_absolute() {
            return Err(CoreError::invalid_entry(format!(
                "original path is not absolute for {name}: {}",
                metadata.original_path().display()
            )));
        }

        Ok(Self {
            name,
            trashed_path,
            original_path: metadata.original_path().to_path_buf(),
            info_path: metadata.info_path().map(Path::to_path_buf),
            deleted_at: metadata.deleted_at(),
            is_directory,
            icon,
            confirmation_pending: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trashed_path(&self) -> &Path {
        &self.trashed_path
    }

    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    pub fn info_path(&self) -> Option<&Path> {
        self.info_path.as_deref()
    }

    pub fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    pub fn confirmation_pending(&self) -> bool {
        self.confirmation_pending
    }

    /// Exact, case-sensitive comparison against the display name.
    pub fn has_name(&self, candidate: &str) -> bool {
        self.name == candidate
    }

    /// Flips the pending-confirmation flag. Callers re-render afterwards.
    pub fn toggle_confirmation(&mut self) {
        self.confirmation_pending = !self.confirmation_pending;
    }

    pub(crate) fn clear_confirmation(&mut self) {
        self.confirmation_pending = false;
    }

    pub fn details(&self) -> EntryDetails {
        EntryDetails {
            original_path: self.original_path.display().to_string(),
            deleted_at: format_trash_datetime(&self.deleted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TrashInfo;
    use chrono::TimeZone;

    fn info() -> TrashInfo {
        TrashInfo::new("/home/u/Report.txt", Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap())
    }

    fn entry(name: &str) -> TrashEntry {
        TrashEntry::new(name, "/trash/files/Report.txt", IconRef::named("text-x-generic"), false, &info()).unwrap()
    }

    #[test]
    fn new_copies_metadata_fields() {
        let meta = info().with_info_path("/trash/info/Report.txt.trashinfo");
        let entry = TrashEntry::new("Report.txt", "/trash/files/Report.txt", IconRef::default(), false, &meta).unwrap();

        assert_eq!(entry.original_path(), Path::new("/home/u/Report.txt"));
        assert_eq!(entry.deleted_at(), meta.deleted_at);
        assert_eq!(entry.info_path(), Some(Path::new("/trash/info/Report.txt.trashinfo")));
        assert!(!entry.confirmation_pending());
    }

    #[test]
    fn new_rejects_empty_name() {
        let err = TrashEntry::new("", "/trash/files/x", IconRef::default(), false, &info()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidEntry(_)));
    }

    #[test]
    fn new_rejects_empty_trashed_path() {
        let err = TrashEntry::new("x", "", IconRef::default(), false, &info()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidEntry(_)));
    }

    #[test]
    fn new_rejects_relative_original_path() {
        let relative = TrashInfo::new("home/u/Report.txt", info().deleted_at);
        let err = TrashEntry::new("Report.txt", "/trash/files/Report.txt", IconRef::default(), false, &relative)
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidEntry(_)));
    }

    #[test]
    fn has_name_is_exact() {
        let entry = entry("Report.txt");

        assert!(entry.has_name("Report.txt"));
        assert!(!entry.has_name("report.txt"));
        assert!(!entry.has_name("Report.txt "));
        assert!(!entry.has_name(""));
    }

    #[test]
    fn toggle_confirmation_flips() {
        let mut entry = entry("Report.txt");

        entry.toggle_confirmation();
        assert!(entry.confirmation_pending());
        entry.toggle_confirmation();
        assert!(!entry.confirmation_pending());
    }

    #[test]
    fn details_render_trash_info_date() {
        let details = entry("Report.txt").details();

        assert_eq!(details.original_path, "/home/u/Report.txt");
        assert_eq!(details.deleted_at, "2024-05-06T07:08:09");
    }
}
