//! Durable key-value storage behind the session record.
//!
//! Only the read/write contract matters to the session store; the file
//! implementation keeps one `<key>.json` file per key.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Read/write contract for durable storage
pub trait DurableStore: Send + Sync {
    /// Read the value under `key`, `None` when absent.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Write `value` under `key`, overwriting any prior value.
    fn write(&self, key: &str, value: &str) -> io::Result<()>;

    /// Remove `key`; removing an absent key is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// File-backed store rooted at a state directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DurableStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store, used for headless runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::other("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("memory store lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("memory store lock poisoned"))?
            .remove(key);
        Ok(())
    }
}
