//! File-backed store: one `<key>.json` file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Store that keeps each key in its own file under a data directory.
///
/// Writes go to a temporary sibling file first and are renamed into place,
/// so a crash mid-write leaves either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the store files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Map a key to a file stem. Percent-encoding keeps the mapping one-to-one
/// and leaves no path separators in the stem.
fn file_stem(key: &str) -> String {
    url::form_urlencoded::byte_serialize(key.as_bytes()).collect()
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| io_error(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(key, e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shopfront-{name}-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_file_stem_encodes_keys() {
        assert_eq!(file_stem("shop_data_1"), "shop_data_1");
        assert_eq!(file_stem("shop_data_../etc"), "shop_data_..%2Fetc");
        assert_eq!(file_stem("currentUser"), "currentUser");
        assert_eq!(file_stem("a b+c"), "a+b%2Bc");
    }

    #[test]
    fn test_distinct_keys_use_distinct_files() {
        let dir = temp_dir("file-distinct");
        let store = FileStore::open(&dir).unwrap();

        store.set("shop_data_ops.lead", "dot").unwrap();
        store.set("shop_data_ops_lead", "underscore").unwrap();
        store.set("shop_data_ops/lead", "slash").unwrap();

        assert_eq!(store.get("shop_data_ops.lead").unwrap().as_deref(), Some("dot"));
        assert_eq!(
            store.get("shop_data_ops_lead").unwrap().as_deref(),
            Some("underscore")
        );
        assert_eq!(store.get("shop_data_ops/lead").unwrap().as_deref(), Some("slash"));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 3);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_set_get_remove() {
        let dir = temp_dir("file-store");
        let store = FileStore::open(&dir).unwrap();

        assert_eq!(store.get("currentUser").unwrap(), None);

        store.set("currentUser", r#"{"id":"1"}"#).unwrap();
        assert_eq!(
            store.get("currentUser").unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );
        assert!(dir.join("currentUser.json").exists());

        store.set("currentUser", "{}").unwrap();
        assert_eq!(store.get("currentUser").unwrap().as_deref(), Some("{}"));

        store.remove("currentUser").unwrap();
        store.remove("currentUser").unwrap();
        assert_eq!(store.get("currentUser").unwrap(), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = temp_dir("file-reopen");
        FileStore::open(&dir).unwrap().set("k", "v").unwrap();

        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
