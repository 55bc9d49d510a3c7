//! Durable key-value persistence for the language state.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::error::Error;

/// The two logical keys the language state persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    SelectedLanguage,
    DefaultLanguage,
}

impl StorageKey {
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::SelectedLanguage => "selectedLanguage",
            StorageKey::DefaultLanguage => "defaultLanguage",
        }
    }
}

/// Minimal string store. `set(key, None)` removes the key.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: Option<&str>) -> Result<(), Error>;
}

/// In-memory store, mostly used as a test double. Counts writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls performed so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: Option<&str>) -> Result<(), Error> {
        let mut values = self.values.borrow_mut();
        match value {
            Some(value) => values.insert(key.to_string(), value.to_string()),
            None => values.remove(key),
        };
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Option<&str>) -> Result<(), Error> {
        (**self).set(key, value)
    }
}

/// A JSON object on disk. Every write rewrites the file through a temporary
/// sibling and a rename, so a crash never leaves a truncated file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the store at `path`, reading existing values if the file exists.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, Error> {
        let path = path.into();
        let values = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            BTreeMap::new()
        };
        Ok(FileStorage {
            path,
            values: RefCell::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        {
            let writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(writer, values)?;
        }
        fs::rename(&tmp, &self.path).map_err(|error| {
            Error::storage_error(
                format!("failed to replace {}", self.path.display()),
                Some(Box::new(error)),
            )
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: Option<&str>) -> Result<(), Error> {
        let mut values = self.values.borrow().clone();
        match value {
            Some(value) => values.insert(key.to_string(), value.to_string()),
            None => values.remove(key),
        };
        self.flush(&values)?;
        *self.values.borrow_mut() = values;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);
        storage.set("k", Some("v")).unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        storage.set("k", None).unwrap();
        assert_eq!(storage.get("k"), None);
        assert_eq!(storage.writes(), 2);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("language.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("langswitch.defaultLanguage", Some("en")).unwrap();
        storage.set("langswitch.selectedLanguage", Some("ar")).unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("langswitch.defaultLanguage").as_deref(), Some("en"));
        assert_eq!(reopened.get("langswitch.selectedLanguage").as_deref(), Some("ar"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("language.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStorage::open(&path), Err(Error::Parse(_))));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(StorageKey::SelectedLanguage.name(), "selectedLanguage");
        assert_eq!(StorageKey::DefaultLanguage.name(), "defaultLanguage");
    }
}
