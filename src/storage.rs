// ============================================================================
// PERSISTENCE - key/value local storage with security checks
// ============================================================================

#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const IDEAS_KEY: &str = "ideas";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const TEMPLATES_KEY: &str = "templates";
pub const CATEGORIES_KEY: &str = "categories";

pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024; // 50 MB max per key

/// String-valued key/value store with local-storage semantics: a missing key
/// reads as `None`, a write replaces the whole value.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create data directory {}", dir.display()))?;
        tracing::info!("Using data directory {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Security: keys become file names, keep them to a safe alphabet
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(anyhow::anyhow!("Invalid storage key: {:?}", key));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        // Security: Check file size before reading
        let metadata = fs::metadata(&path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(anyhow::anyhow!(
                "{} exceeds maximum size limit - possible corruption",
                path.display()
            ));
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(text))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        if value.len() as u64 > MAX_FILE_SIZE {
            return Err(anyhow::anyhow!("Serialized {} exceeds maximum size limit", key));
        }

        // Write to temporary file first, then atomic rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        tracing::debug!(key, bytes = value.len(), "saved collection");
        Ok(())
    }
}

/// In-process storage for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Memory storage that refuses reads or writes for the listed keys.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct FlakyStorage {
    pub inner: MemoryStorage,
    pub failing_reads: Vec<&'static str>,
    pub failing_writes: Vec<&'static str>,
}

#[cfg(test)]
impl Storage for FlakyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.failing_reads.iter().any(|k| *k == key) {
            return Err(anyhow::anyhow!("read of {} refused", key));
        }
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.failing_writes.iter().any(|k| *k == key) {
            return Err(anyhow::anyhow!("write of {} refused", key));
        }
        self.inner.set_item(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get_item(IDEAS_KEY).unwrap(), None);
    }

    #[test]
    fn set_then_get_replaces_whole_value() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::open(dir.path().join("nested")).unwrap();

        storage.set_item(CATEGORIES_KEY, r#"["Art"]"#).unwrap();
        storage.set_item(CATEGORIES_KEY, r#"["Art","Health"]"#).unwrap();

        assert_eq!(
            storage.get_item(CATEGORIES_KEY).unwrap().as_deref(),
            Some(r#"["Art","Health"]"#)
        );
        assert!(dir.path().join("nested").join("categories.json").exists());
        assert!(!dir.path().join("nested").join("categories.json.tmp").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        assert!(storage.set_item("../escape", "[]").is_err());
        assert!(storage.get_item("").is_err());
    }

    #[test]
    fn memory_storage_round_trips() {
        let mut storage = MemoryStorage::new().with_item(TEMPLATES_KEY, "[]");
        assert_eq!(storage.get_item(TEMPLATES_KEY).unwrap().as_deref(), Some("[]"));
        storage.set_item(NOTIFICATIONS_KEY, "[1]").unwrap();
        assert_eq!(
            storage.get_item(NOTIFICATIONS_KEY).unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn oversize_value_is_not_written() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        let huge = "x".repeat(MAX_FILE_SIZE as usize + 1);

        assert!(storage.set_item(IDEAS_KEY, &huge).is_err());
        assert!(!dir.path().join("ideas.json").exists());
    }

    #[test]
    fn oversize_file_fails_the_read() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        let file = fs::File::create(dir.path().join("ideas.json")).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();

        assert!(storage.get_item(IDEAS_KEY).is_err());
    }

    #[test]
    fn flaky_storage_fails_only_listed_keys() {
        let mut storage = FlakyStorage {
            failing_writes: vec![IDEAS_KEY],
            ..Default::default()
        };
        assert!(storage.set_item(IDEAS_KEY, "[]").is_err());
        storage.set_item(CATEGORIES_KEY, "[]").unwrap();
        assert_eq!(storage.inner.get_item(IDEAS_KEY).unwrap(), None);
    }
}
