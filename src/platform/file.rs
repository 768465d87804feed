//! File-backed storage for native hosts
//!
//! All keys live in one JSON object on disk, so a restart of the native
//! host keeps its state the way a page refresh does in the browser.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Storage;
use crate::error::{Result, StoreError};

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                StoreError::Unavailable(format!("{} is not a storage file: {e}", path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        log::debug!("Opened {} ({} keys)", path.display(), items.len());
        Ok(Self {
            path,
            items: RefCell::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `items` to disk, then make them the live map.
    ///
    /// A failed write leaves the live map untouched.
    fn commit(&self, op: &'static str, key: &str, items: BTreeMap<String, String>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&items).map_err(|e| StoreError::storage(op, key, e))?;
        fs::write(&self.path, json).map_err(|e| StoreError::storage(op, key, e))?;
        *self.items.borrow_mut() = items;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.borrow().clone();
        items.insert(key.to_string(), value.to_string());
        self.commit("set", key, items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if !self.items.borrow().contains_key(key) {
            return Ok(());
        }
        let mut items = self.items.borrow().clone();
        items.remove(key);
        self.commit("remove", key, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "persisted-reducer-{}-{name}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_path("missing");
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("any").unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set_item("prefs", r#"{"theme":"dark"}"#).unwrap();
            storage.set_item("other", "1").unwrap();
            storage.remove_item("other").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(
            storage.get_item("prefs").unwrap().as_deref(),
            Some(r#"{"theme":"dark"}"#)
        );
        assert_eq!(storage.get_item("other").unwrap(), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_write_is_not_visible() {
        let path = std::env::temp_dir()
            .join(format!("persisted-reducer-{}-no-such-dir", std::process::id()))
            .join("storage.json");
        let storage = FileStorage::open(&path).unwrap();

        let err = storage.set_item("k", "v").unwrap_err();
        assert!(matches!(err, StoreError::Storage { op: "set", .. }));
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_garbage_file_is_rejected() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStorage::open(&path),
            Err(StoreError::Unavailable(_))
        ));
        let _ = fs::remove_file(&path);
    }
}
