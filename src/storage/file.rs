//! Durable medium backed by a single JSON object file.
//!
//! Every operation takes an advisory lock on the file for its whole
//! read-modify-write, so two processes sharing a data directory see
//! last-write-wins per key rather than torn files.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::error::{Result, StorageError};
use super::medium::{usage, DurableMedium, DEFAULT_QUOTA_BYTES};

type Entries = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FileMedium {
    path: PathBuf,
    quota: usize,
}

impl FileMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_quota(path, DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(path: impl Into<PathBuf>, quota: usize) -> Self {
        Self {
            path: path.into(),
            quota,
        }
    }

    /// `~/.local/share/pagestate/storage.json` on Linux, or the platform
    /// equivalent via `dirs::data_dir()`. Falls back to the current
    /// directory.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("pagestate").join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_for_write(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        Ok(file)
    }

    fn modify(&self, apply: impl FnOnce(&mut Entries) -> Result<()>) -> Result<()> {
        let mut file = self.open_for_write()?;
        file.lock_exclusive()?;
        let result = read_entries(&mut file, &self.path).and_then(|mut entries| {
            apply(&mut entries)?;
            write_entries(&mut file, &entries)
        });
        let _ = FileExt::unlock(&file);
        result
    }
}

fn read_entries(file: &mut File, path: &Path) -> Result<Entries> {
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }
    serde_json::from_str(&content).map_err(|e| {
        StorageError::Unavailable(format!("corrupted storage file '{}': {}", path.display(), e))
    })
}

fn write_entries(file: &mut File, entries: &Entries) -> Result<()> {
    let content = serde_json::to_string_pretty(entries)?;
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(content.as_bytes())?;
    file.sync_data()?;
    Ok(())
}

impl DurableMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        FileExt::lock_shared(&file)?;
        let result = read_entries(&mut file, &self.path);
        let _ = FileExt::unlock(&file);
        Ok(result?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let quota = self.quota;
        self.modify(|entries| {
            let others = usage(entries.iter().filter(|(k, _)| k.as_str() != key));
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.modify(|entries| {
            entries.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let medium = FileMedium::new(dir.path().join("storage.json"));
        assert_eq!(medium.get("user-name").unwrap(), None);
        assert!(!medium.path().exists());
    }

    #[test]
    fn set_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let medium = FileMedium::new(dir.path().join("nested").join("storage.json"));
        medium.set("user-name", "\"Ada\"").unwrap();
        assert!(medium.path().exists());
        assert_eq!(medium.get("user-name").unwrap().as_deref(), Some("\"Ada\""));
    }

    #[test]
    fn set_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let medium = FileMedium::new(dir.path().join("storage.json"));
        medium.set("a", "1").unwrap();
        medium.set("b", "2").unwrap();
        medium.set("a", "3").unwrap();
        assert_eq!(medium.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(medium.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn corrupted_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").unwrap();
        let medium = FileMedium::new(&path);
        assert!(matches!(medium.get("a"), Err(StorageError::Unavailable(_))));
        assert!(matches!(medium.set("a", "1"), Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn quota_is_enforced_and_file_untouched() {
        let dir = TempDir::new().unwrap();
        let medium = FileMedium::with_quota(dir.path().join("storage.json"), 8);
        medium.set("k", "123").unwrap();
        let err = medium.set("big", "123456").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(medium.get("big").unwrap(), None);
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("123"));
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let dir = TempDir::new().unwrap();
        let medium = FileMedium::new(dir.path().join("storage.json"));
        medium.remove("nothing-yet").unwrap();
        medium.set("a", "1").unwrap();
        medium.set("b", "2").unwrap();
        medium.remove("a").unwrap();
        assert_eq!(medium.get("a").unwrap(), None);
        assert_eq!(medium.get("b").unwrap().as_deref(), Some("2"));
    }
}
