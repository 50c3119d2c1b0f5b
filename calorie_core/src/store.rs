//! Durable key-value storage.
//!
//! The tracker only needs get/set/remove of text values by key. `FileStore`
//! keeps every key in one JSON object on disk and rewrites it atomically;
//! `MemoryStore` keeps everything in memory.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key-value store trait for persisting tracker records
///
/// Batch writes are all-or-nothing: when `set_many` or `remove_many`
/// fails, the store still holds its previous contents.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()>;
    fn remove_many(&mut self, keys: &[&str]) -> Result<()>;

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.remove_many(&[key])
    }
}

/// In-memory store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// JSON-file-backed store
///
/// An exclusive lock on a sidecar `.lock` file is held from `open` until
/// the store is dropped, so concurrent processes run their
/// load-modify-write cycles one after another.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    // Released when the file is closed on drop
    _lock: File,
}

impl FileStore {
    /// Open the store at `path`, waiting for any other holder of its lock
    ///
    /// A missing file yields an empty store. An unreadable or unparsable
    /// file is logged and treated as empty; the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(parent_dir(&path))?;

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path.with_extension("lock"))?;
        lock.lock_exclusive()?;

        let entries = read_entries(&path);
        Ok(Self {
            path,
            entries,
            _lock: lock,
        })
    }

    /// Write `next` to disk, then adopt it. On failure nothing changes.
    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<()> {
        write_entries(&self.path, &next)?;
        self.entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert(key.to_string(), value.to_string());
        }
        self.commit(next)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        if !keys.iter().any(|key| self.entries.contains_key(*key)) {
            return Ok(());
        }

        let mut next = self.entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.commit(next)
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Atomically rewrite the store file
///
/// Writes to a temp file in the same directory, syncs it, then renames
/// it over the original.
fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    let temp = NamedTempFile::new_in(parent_dir(path))?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(entries)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {} keys to {:?}", entries.len(), path);
    Ok(())
}

fn read_entries(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        tracing::info!("No store file found at {:?}, starting empty", path);
        return BTreeMap::new();
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Unable to open store file {:?}: {}. Starting empty.", path, e);
            return BTreeMap::new();
        }
    };

    let mut contents = String::new();
    if let Err(e) = file.read_to_string(&mut contents) {
        tracing::warn!("Failed to read store file {:?}: {}. Starting empty.", path, e);
        return BTreeMap::new();
    }

    match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
        Ok(entries) => {
            tracing::debug!("Loaded {} keys from {:?}", entries.len(), path);
            entries
        }
        Err(e) => {
            tracing::warn!("Failed to parse store file {:?}: {}. Starting empty.", path, e);
            BTreeMap::new()
        }
    }
}
