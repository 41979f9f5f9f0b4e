//! Trash entry model for freedesktop-style trash managers.
//! Holds the identity of one trashed object and implements permanent delete,
//! restore to the original path, and the orderings used to list entries.
//! Rendering and trash info parsing are left to the host.

pub mod adapter;
pub mod collate;
pub mod errors;
pub mod fs;
pub mod helpers;
pub mod metadata;
pub mod models;
pub mod operations;

pub use adapter::{perform, PresentationAdapter};
pub use collate::{collate_by_date, collate_by_name, collate_by_type, sort_entries, SortOrder, UnknownSortOrder};
pub use errors::{CoreError, DeleteError, FsError, RestoreError, Result};
pub use fs::{FileSystem, RealFileSystem};
pub use helpers::{format_trash_datetime, parse_trash_datetime, sanitize_user_path, TRASHINFO_TIME_FORMAT};
pub use metadata::{TrashInfo, TrashMetadata};
pub use models::{EntryAction, EntryDetails, IconRef, TrashEntry};
pub use operations::{delete, restore, OperationOptions, TrashOperations};

/// Re-export the whole public surface for hosts.
pub mod prelude {
    pub use crate::{
        adapter::*,
        collate::*,
        errors::*,
        fs::{FileSystem, RealFileSystem},
        helpers::*,
        metadata::*,
        models::*,
        operations::*,
    };
}
