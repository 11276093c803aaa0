//! Flat file storage used by the note store and the result set.
//!
//! Entries are addressed by file name only and hold raw bytes. Two
//! implementations exist: [`FsStorage`] over a real directory and
//! [`MemoryStorage`] for tests.

pub mod fs;
#[cfg(test)]
pub mod memory;

pub use fs::FsStorage;
#[cfg(test)]
pub use memory::MemoryStorage;

use crate::error::Result;

pub trait Storage: Send + Sync {
    /// Human-readable location of an entry, e.g. `note/2024_01_02__03___04___05.txt`
    fn location(&self, name: &str) -> String;

    /// Human-readable location of the storage itself
    fn root(&self) -> String;

    /// Entry names, sorted ascending
    fn list(&self) -> Result<Vec<String>>;

    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Write an entry only if the name is free. Returns `false` if it was taken.
    fn create(&self, name: &str, content: &[u8]) -> Result<bool>;

    /// Replace every entry with `entries` in one step. Readers see either the
    /// old entries or the new ones.
    fn replace_all(&self, entries: &[(String, Vec<u8>)]) -> Result<()>;
}
