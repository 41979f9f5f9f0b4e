//! Contract between the entry operations and whatever renders them.

use crate::errors::CoreError;
use crate::fs::FileSystem;
use crate::models::{EntryAction, TrashEntry};
use crate::operations::TrashOperations;

/// Receives the UI-facing side effects of an entry action.
///
/// Only `set_controls_sensitive` is required. The notifications default to
/// doing nothing.
pub trait PresentationAdapter {
    /// Enables or disables the interactive controls shown for `entry`.
    fn set_controls_sensitive(&mut self, entry: &TrashEntry, sensitive: bool);

    /// The entry's object is gone for good. Drop it from the listing.
    fn entry_deleted(&mut self, _entry: &TrashEntry) {}

    /// The entry's object is back at its original path. Drop it from the listing.
    fn entry_restored(&mut self, _entry: &TrashEntry) {}

    /// The action failed and the entry is still in the trash.
    fn operation_failed(&mut self, _entry: &TrashEntry, _action: EntryAction, _error: &CoreError) {}
}

/// Runs `action` for `entry` with its controls disabled for the duration.
///
/// Any pending confirmation is cleared first. Controls are re-enabled whether
/// the action succeeds or fails, then the adapter is told the outcome. The
/// error is also returned so the caller can keep the entry on failure.
pub fn perform<F, A>(
    ops: &TrashOperations<F>,
    adapter: &mut A,
    entry: &mut TrashEntry,
    action: EntryAction,
) -> crate::Result<()>
where
    F: FileSystem,
    A: PresentationAdapter + ?Sized,
{
    entry.clear_confirmation();
    adapter.set_controls_sensitive(entry, false);

    let outcome = match action {
        EntryAction::Delete => ops.delete(entry).map_err(CoreError::from),
        EntryAction::Restore => ops.restore(entry).map_err(CoreError::from),
    };

    adapter.set_controls_sensitive(entry, true);

    match &outcome {
        Ok(()) => match action {
            EntryAction::Delete => adapter.entry_deleted(entry),
            EntryAction::Restore => adapter.entry_restored(entry),
        },
        Err(err) => {
            tracing::warn!(name = entry.name(), %action, error = %err, "trash entry action failed");
            adapter.operation_failed(entry, action, err);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RestoreError;
    use crate::metadata::TrashInfo;
    use crate::models::IconRef;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl PresentationAdapter for Recorder {
        fn set_controls_sensitive(&mut self, _entry: &TrashEntry, sensitive: bool) {
            self.events.push(format!("sensitive={sensitive}"));
        }

        fn entry_deleted(&mut self, entry: &TrashEntry) {
            self.events.push(format!("deleted {}", entry.name()));
        }

        fn entry_restored(&mut self, entry: &TrashEntry) {
            self.events.push(format!("restored {}", entry.name()));
        }

        fn operation_failed(&mut self, _entry: &TrashEntry, action: EntryAction, _error: &CoreError) {
            self.events.push(format!("failed {action}"));
        }
    }

    fn setup() -> (TempDir, TrashEntry) {
        let dir = TempDir::new().unwrap();
        let trashed = dir.path().join("trash/files/note.txt");
        fs::create_dir_all(trashed.parent().unwrap()).unwrap();
        fs::write(&trashed, "hello").unwrap();

        let info = TrashInfo::new(dir.path().join("home/note.txt"), Utc.timestamp_opt(1, 0).unwrap());
        let entry = TrashEntry::new("note.txt", trashed, IconRef::default(), false, &info).unwrap();
        (dir, entry)
    }

    #[test]
    fn delete_toggles_controls_and_notifies() {
        let (_dir, mut entry) = setup();
        let mut recorder = Recorder::default();
        entry.toggle_confirmation();

        perform(&TrashOperations::new(), &mut recorder, &mut entry, EntryAction::Delete).unwrap();

        assert!(!entry.confirmation_pending());
        assert!(!entry.trashed_path().exists());
        assert_eq!(recorder.events, ["sensitive=false", "sensitive=true", "deleted note.txt"]);
    }

    #[test]
    fn failed_restore_reenables_controls() {
        let (_dir, mut entry) = setup();
        fs::create_dir_all(entry.original_path().parent().unwrap()).unwrap();
        fs::write(entry.original_path(), "newer").unwrap();
        let mut recorder = Recorder::default();

        let err = perform(&TrashOperations::new(), &mut recorder, &mut entry, EntryAction::Restore).unwrap_err();

        assert!(matches!(err, CoreError::Restore(RestoreError::TargetExists { .. })));
        assert!(entry.trashed_path().exists());
        assert_eq!(recorder.events, ["sensitive=false", "sensitive=true", "failed restore"]);
    }
}
