//! NoteStore: one immutable text file per note
//!
//! Notes are only ever created; nothing here edits or deletes them.

use super::file_ops::NoteId;
use crate::error::{NotebookError, Result};
use crate::storage::Storage;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// A note that was just written
#[derive(Debug, Clone)]
pub struct CreatedNote {
    pub id: NoteId,
    pub location: String,
}

impl CreatedNote {
    pub fn confirmation(&self) -> String {
        format!("Note {} was successfully written.", self.location)
    }
}

pub struct NoteStore {
    storage: Arc<dyn Storage>,
}

impl NoteStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Write a note stamped with the current local time
    pub fn create(&self, content: &str) -> Result<CreatedNote> {
        self.create_at(content, Local::now().naive_local())
    }

    /// Write a note stamped with `created`.
    ///
    /// Never overwrites: a taken name moves on to the next sequence number.
    pub fn create_at(&self, content: &str, created: NaiveDateTime) -> Result<CreatedNote> {
        let mut id = NoteId::new(created);
        loop {
            let name = id.file_name();
            if self.storage.create(&name, content.as_bytes())? {
                let location = self.storage.location(&name);
                log::info!("[NOTES] Wrote {} ({} bytes)", location, content.len());
                return Ok(CreatedNote { id, location });
            }

            log::debug!("[NOTES] {} already exists, trying next sequence", name);
            id = id.next().ok_or_else(|| NotebookError::Io {
                path: self.storage.location(&name),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "too many notes created in the same second",
                ),
            })?;
        }
    }

    /// Raw note bytes as written
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.storage.read(name)
    }

    /// All note file names, oldest first
    pub fn list(&self) -> Result<Vec<String>> {
        self.storage.list()
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.storage.list()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FsStorage, MemoryStorage};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_create_writes_content_verbatim() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(Arc::new(FsStorage::new(dir.path())));

        let created = store.create_at("  hello\nworld  ", noon()).unwrap();
        assert_eq!(created.id.file_name(), "2024_01_15__12___00___00.txt");

        let on_disk =
            std::fs::read_to_string(dir.path().join("2024_01_15__12___00___00.txt")).unwrap();
        assert_eq!(on_disk, "  hello\nworld  ");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_confirmation_includes_location() {
        let store = NoteStore::new(Arc::new(MemoryStorage::new("note")));
        let created = store.create_at("x", noon()).unwrap();
        assert_eq!(
            created.confirmation(),
            "Note note/2024_01_15__12___00___00.txt was successfully written."
        );
    }

    #[test]
    fn test_same_second_notes_both_survive() {
        let store = NoteStore::new(Arc::new(MemoryStorage::new("note")));

        let first = store.create_at("first", noon()).unwrap();
        let second = store.create_at("second", noon()).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(
            store.list().unwrap(),
            vec![
                "2024_01_15__12___00___00.txt",
                "2024_01_15__12___00___00_001.txt"
            ]
        );
        assert_eq!(store.read(&first.id.file_name()).unwrap(), b"first");
        assert_eq!(store.read(&second.id.file_name()).unwrap(), b"second");
    }

    #[test]
    fn test_create_fails_without_directory() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(Arc::new(FsStorage::new(dir.path().join("note"))));

        let result = store.create("hello");
        assert!(matches!(result, Err(NotebookError::DirectoryNotFound(_))));
    }
}
