// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filesystem-backed photo storage.
//!
//! Uploads are stored under a single directory with generated
//! `{uuid}.{ext}` names, so a photo id is always a plain filename.
//! Anything that is not (path separators, `..`) is refused before it
//! reaches the filesystem.

use roster_api::{PhotoStore, PhotoStoreError, accepted_extension};
use std::path::PathBuf;
use tracing::{debug, warn};
use uuid::Uuid;

/// Served in place of a photo whose file is missing.
pub const PLACEHOLDER_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="160" height="160" viewBox="0 0 160 160"><rect width="160" height="160" fill="#ddd"/><circle cx="80" cy="60" r="28" fill="#aaa"/><path d="M24 150c8-34 104-34 112 0z" fill="#aaa"/></svg>"##;

/// Photo store rooted at a directory on disk.
pub struct FsPhotoStore {
    dir: PathBuf,
}

impl FsPhotoStore {
    /// Creates a store rooted at `dir`, creating the directory if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, PhotoStoreError> {
        let dir: PathBuf = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Resolves a photo id to its path, or `None` when the id is not
    /// a plain filename.
    fn checked_path(&self, photo_id: &str) -> Option<PathBuf> {
        if photo_id.is_empty() || photo_id.contains(['/', '\\']) || photo_id.contains("..") {
            warn!(photo_id, "Refusing non-filename photo id");
            return None;
        }
        Some(self.dir.join(photo_id))
    }

    /// Reads a stored photo, or `None` when the file is missing or
    /// the id is invalid.
    #[must_use]
    pub fn open(&self, photo_id: &str) -> Option<Vec<u8>> {
        let path: PathBuf = self.checked_path(photo_id)?;
        std::fs::read(path).ok()
    }
}

impl PhotoStore for FsPhotoStore {
    fn save(&self, original_name: &str, data: &[u8]) -> Result<Option<String>, PhotoStoreError> {
        let Some(extension) = accepted_extension(original_name) else {
            debug!(original_name, "Rejected upload with unsupported extension");
            return Ok(None);
        };
        let photo_id: String = format!("{}.{extension}", Uuid::new_v4());
        std::fs::write(self.dir.join(&photo_id), data)?;
        debug!(photo_id, bytes = data.len(), "Saved photo");
        Ok(Some(photo_id))
    }

    fn delete(&self, photo_id: &str) -> Result<(), PhotoStoreError> {
        if photo_id.is_empty() {
            return Ok(());
        }
        let Some(path) = self.checked_path(photo_id) else {
            return Ok(());
        };
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(photo_id, "Deleted photo");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FsPhotoStore {
        let dir = std::env::temp_dir().join(format!("roster-photos-{}", Uuid::new_v4()));
        FsPhotoStore::new(dir).expect("temp photo dir")
    }

    #[test]
    fn save_generates_unique_filenames_with_the_upload_extension() {
        let store = temp_store();
        let first = store
            .save("me.PNG", b"first")
            .expect("save")
            .expect("accepted");
        let second = store
            .save("me.PNG", b"second")
            .expect("save")
            .expect("accepted");
        assert!(first.ends_with(".png"));
        assert_ne!(first, second);
        assert_eq!(store.open(&first).expect("readable"), b"first");
    }

    #[test]
    fn unsupported_extension_writes_nothing() {
        let store = temp_store();
        assert!(store.save("notes.txt", b"data").expect("save").is_none());
        assert!(store.save("noextension", b"data").expect("save").is_none());
        assert_eq!(std::fs::read_dir(&store.dir).expect("dir").count(), 0);
    }

    #[test]
    fn delete_is_a_noop_for_missing_or_empty_ids() {
        let store = temp_store();
        store.delete("").expect("empty id");
        store.delete("gone.png").expect("missing file");

        let id = store
            .save("me.jpg", b"bytes")
            .expect("save")
            .expect("accepted");
        store.delete(&id).expect("delete");
        assert!(store.open(&id).is_none());
    }

    #[test]
    fn path_traversal_ids_are_refused() {
        let store = temp_store();
        assert!(store.open("../etc/passwd").is_none());
        assert!(store.open("a/b.png").is_none());
        store.delete("../somewhere.png").expect("refused, no-op");
    }
}
