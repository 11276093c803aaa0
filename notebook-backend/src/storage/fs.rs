//! Directory-backed storage.
//!
//! Only regular, non-hidden files directly inside the directory count as entries.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::Storage;
use crate::error::{NotebookError, Result};

pub struct FsStorage {
    dir: PathBuf,
}

impl FsStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(NotebookError::DirectoryNotFound(self.dir.display().to_string()))
        }
    }

    /// Sibling path used while swapping contents, e.g. `.search.staging-<uuid>`
    fn sibling(&self, tag: &str) -> PathBuf {
        let name = self
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "storage".to_string());
        let sibling = format!(".{}.{}-{}", name, tag, uuid::Uuid::new_v4());
        match self.dir.parent() {
            Some(parent) => parent.join(sibling),
            None => PathBuf::from(sibling),
        }
    }

    /// Move everything in `retired` that is not an entry back into `dir`, then
    /// delete `retired`. If anything cannot be moved, `retired` is left in place.
    fn finish_retire(&self, retired: &Path) {
        let read_dir = match fs::read_dir(retired) {
            Ok(rd) => rd,
            Err(e) => {
                log::warn!("Failed to read {}: {}", retired.display(), e);
                return;
            }
        };

        let mut carried_all = true;
        for entry in read_dir.flatten() {
            if entry_name(&entry).is_some() {
                continue;
            }
            let target = self.dir.join(entry.file_name());
            if let Err(e) = fs::rename(entry.path(), &target) {
                log::warn!("Failed to keep {}: {}", entry.path().display(), e);
                carried_all = false;
            }
        }

        if !carried_all {
            log::warn!("Leaving {} in place", retired.display());
            return;
        }
        if let Err(e) = fs::remove_dir_all(retired) {
            log::warn!("Failed to remove {}: {}", retired.display(), e);
        }
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// The entry name of a regular, non-hidden file with a UTF-8 name
fn entry_name(entry: &fs::DirEntry) -> Option<String> {
    let name = entry.file_name().to_str()?.to_string();
    if is_hidden(&name) {
        return None;
    }
    match entry.file_type() {
        Ok(ft) if ft.is_file() => Some(name),
        _ => None,
    }
}

fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    Ok(())
}

impl Storage for FsStorage {
    fn location(&self, name: &str) -> String {
        self.dir.join(name).display().to_string()
    }

    fn root(&self) -> String {
        self.dir.display().to_string()
    }

    fn list(&self) -> Result<Vec<String>> {
        let read_dir = fs::read_dir(&self.dir).map_err(|e| NotebookError::io(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| NotebookError::io(&self.dir, e))?;
            if let Some(name) = entry_name(&entry) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.ensure_dir()?;
        let path = self.dir.join(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(NotebookError::NotFound),
            Err(e) => Err(NotebookError::io(&path, e)),
        }
    }

    fn create(&self, name: &str, content: &[u8]) -> Result<bool> {
        self.ensure_dir()?;
        let path = self.dir.join(name);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(NotebookError::io(&path, e)),
        };
        file.write_all(content)
            .map_err(|e| NotebookError::io(&path, e))?;
        Ok(true)
    }

    /// Build the new entries in a staging directory next to `dir`, then
    /// rename it into place. Readers never see a half-filled directory.
    /// Hidden files and subdirectories are not entries and survive the swap.
    fn replace_all(&self, entries: &[(String, Vec<u8>)]) -> Result<()> {
        self.ensure_dir()?;

        let staging = self.sibling("staging");
        fs::create_dir(&staging).map_err(|e| NotebookError::io(&staging, e))?;

        for (name, content) in entries {
            let path = staging.join(name);
            if let Err(e) = write_file(&path, content) {
                fs::remove_dir_all(&staging).ok();
                return Err(NotebookError::io(&path, e));
            }
        }

        let retired = self.sibling("old");
        if let Err(e) = fs::rename(&self.dir, &retired) {
            fs::remove_dir_all(&staging).ok();
            return Err(NotebookError::io(&self.dir, e));
        }
        if let Err(e) = fs::rename(&staging, &self.dir) {
            // Put the previous contents back
            fs::rename(&retired, &self.dir).ok();
            fs::remove_dir_all(&staging).ok();
            return Err(NotebookError::io(&self.dir, e));
        }

        self.finish_retire(&retired);
        Ok(())
    }
}
