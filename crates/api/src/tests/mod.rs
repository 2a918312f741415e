// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod auth_tests;
mod series_tests;

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use roster_persistence::SqlitePersistence;

use crate::auth::LoggedUser;
use crate::error::PhotoStoreError;
use crate::photos::{PhotoStore, accepted_extension};

pub fn memory_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory database")
}

pub fn test_user() -> LoggedUser {
    LoggedUser {
        login: String::from("ironman"),
        display_name: String::from("Tony Stark"),
    }
}

/// In-memory photo store recording every save and delete.
#[derive(Default)]
pub struct MemoryPhotoStore {
    counter: AtomicU64,
    pub saved: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

impl PhotoStore for MemoryPhotoStore {
    fn save(&self, original_name: &str, _data: &[u8]) -> Result<Option<String>, PhotoStoreError> {
        let Some(extension) = accepted_extension(original_name) else {
            return Ok(None);
        };
        let id = format!(
            "photo-{}.{extension}",
            self.counter.fetch_add(1, Ordering::SeqCst)
        );
        self.saved.lock().expect("lock").push(id.clone());
        Ok(Some(id))
    }

    fn delete(&self, photo_id: &str) -> Result<(), PhotoStoreError> {
        self.deleted
            .lock()
            .expect("lock")
            .push(photo_id.to_string());
        self.saved.lock().expect("lock").retain(|id| id != photo_id);
        Ok(())
    }
}
