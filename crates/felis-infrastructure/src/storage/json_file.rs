//! Durable local storage backed by a single JSON object file.
//!
//! Every mutation rewrites the whole file through a temporary file and an
//! atomic rename, so entries written or removed in one call change together.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use felis_core::error::{FelisError, Result};
use felis_core::session::LocalStorage;

use crate::paths::FelisPaths;

type Entries = BTreeMap<String, String>;

/// `LocalStorage` persisted as a JSON object on disk.
pub struct JsonFileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within the process.
    write_guard: Mutex<()>,
}

impl JsonFileStorage {
    /// Creates a storage at the default location
    /// (`<data_dir>/felis/local_storage.json`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(FelisPaths::local_storage_file()?))
    }

    /// Creates a storage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_guard: Mutex::new(()),
        }
    }

    /// Returns the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries. A missing or empty file is an empty storage.
    fn load(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &Entries) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = create_private(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Applies `f` to the current entries and writes the result back.
    ///
    /// A file that no longer parses is replaced instead of failing forever.
    fn update(&self, f: impl FnOnce(&mut Entries)) -> Result<()> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _lock = FileLock::acquire(&self.path)?;

        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(e) if e.is_serialization() => {
                tracing::warn!(
                    "[JsonFileStorage] Replacing unreadable storage file {}: {}",
                    self.path.display(),
                    e
                );
                Entries::new()
            }
            Err(e) => return Err(e),
        };

        f(&mut entries);
        self.save(&entries)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| FelisError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| FelisError::io("Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

impl LocalStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<()> {
        self.update(|map| {
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }
}

/// Creates `path` readable by the owner only, before any content is written.
///
/// A leftover temp file is removed first so the mode applies on creation.
fn create_private(path: &Path) -> Result<File> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    Ok(options.open(path)?)
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| FelisError::io(format!("Failed to acquire lock: {}", e)))?;

        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        use fs2::FileExt;
        let _ = self.file.unlock();
    }
}
