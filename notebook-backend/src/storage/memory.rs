//! In-memory storage for tests.

use parking_lot::Mutex;
use std::collections::BTreeMap;

use super::Storage;
use crate::error::{NotebookError, Result};

pub struct MemoryStorage {
    label: String,
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Storage for MemoryStorage {
    fn location(&self, name: &str) -> String {
        format!("{}/{}", self.label, name)
    }

    fn root(&self) -> String {
        self.label.clone()
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().keys().cloned().collect())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.entries
            .lock()
            .get(name)
            .cloned()
            .ok_or(NotebookError::NotFound)
    }

    fn create(&self, name: &str, content: &[u8]) -> Result<bool> {
        let mut entries = self.entries.lock();
        if entries.contains_key(name) {
            return Ok(false);
        }
        entries.insert(name.to_string(), content.to_vec());
        Ok(true)
    }

    fn replace_all(&self, entries: &[(String, Vec<u8>)]) -> Result<()> {
        let fresh = entries.iter().cloned().collect();
        *self.entries.lock() = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_list() {
        let storage = MemoryStorage::new("note");
        assert!(storage.create("b.txt", b"b").unwrap());
        assert!(storage.create("a.txt", b"a").unwrap());
        assert!(!storage.create("a.txt", b"again").unwrap());

        assert_eq!(storage.list().unwrap(), vec!["a.txt", "b.txt"]);
        assert_eq!(storage.read("a.txt").unwrap(), b"a");
        assert_eq!(storage.location("a.txt"), "note/a.txt");
    }

    #[test]
    fn test_replace_all() {
        let storage = MemoryStorage::new("search");
        storage.create("old.txt", b"old").unwrap();
        storage
            .replace_all(&[("new.txt".to_string(), b"new".to_vec())])
            .unwrap();
        assert_eq!(storage.list().unwrap(), vec!["new.txt"]);
    }
}
