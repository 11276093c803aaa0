//! The result set: copies of the notes matched by the most recent search.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::{NotebookError, Result};
use crate::storage::Storage;

/// One browsable result
#[derive(Debug, Clone)]
pub struct ResultEntry {
    pub index: usize,
    pub total: usize,
    pub name: String,
    pub content: String,
}

/// Result storage plus the lock that keeps browsing from seeing a swap in progress
pub struct ResultSet {
    storage: Arc<dyn Storage>,
    lock: RwLock<()>,
}

impl ResultSet {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            lock: RwLock::new(()),
        }
    }

    pub fn root(&self) -> String {
        self.storage.root()
    }

    /// Replace every result with `entries` (name, raw content)
    pub fn replace(&self, entries: &[(String, Vec<u8>)]) -> Result<()> {
        let _guard = self.lock.write();
        self.storage.replace_all(entries)
    }

    /// Result names in browse order
    pub fn names(&self) -> Result<Vec<String>> {
        let _guard = self.lock.read();
        self.sorted_names()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.names()?.len())
    }

    /// The result at `index` in ascending name order
    pub fn get(&self, index: i64) -> Result<ResultEntry> {
        let _guard = self.lock.read();
        let names = self.sorted_names()?;

        let position = usize::try_from(index).map_err(|_| NotebookError::NotFound)?;
        let name = names.get(position).ok_or(NotebookError::NotFound)?.clone();
        let content = String::from_utf8_lossy(&self.storage.read(&name)?).into_owned();

        Ok(ResultEntry {
            index: position,
            total: names.len(),
            name,
            content,
        })
    }

    fn sorted_names(&self) -> Result<Vec<String>> {
        let mut names = self.storage.list()?;
        names.sort();
        Ok(names)
    }
}
