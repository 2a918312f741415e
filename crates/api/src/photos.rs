// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The seam between student rules and photo file storage.

use crate::error::PhotoStoreError;

/// File extensions accepted for photo uploads.
const ACCEPTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "svg", "webp"];

/// Returns the lowercased extension of `file_name` when it names an
/// accepted image type, `None` otherwise.
///
/// The extension is everything after the final `.`; a name without a
/// dot has no extension and is rejected.
#[must_use]
pub fn accepted_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension: String = extension.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Storage for uploaded student photos.
///
/// The rules layer drives the sequencing (save before insert, delete
/// the old file when a replacement arrives) but never touches the
/// filesystem itself; the server supplies the concrete store.
pub trait PhotoStore: Send + Sync {
    /// Saves an uploaded file and returns the generated photo id.
    ///
    /// Returns `Ok(None)` without writing anything when the original
    /// filename's extension is not a recognized image type. Callers
    /// treat `None` as "no photo uploaded".
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, original_name: &str, data: &[u8]) -> Result<Option<String>, PhotoStoreError>;

    /// Deletes a stored photo file.
    ///
    /// A no-op when the id is empty or the file is already gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn delete(&self, photo_id: &str) -> Result<(), PhotoStoreError>;
}
