use std::{
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
};

use tempfile::NamedTempFile;
use tracing::trace;

use super::{KeyValueStore, StorageError};

/// Storage backed by a directory, one `<key>.json` file per key.
///
/// Writes go to a temporary file in the same directory which is then renamed over the
/// target, so readers only ever see the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key != "."
            && !key.contains("..")
            && !key.contains(['/', '\\']);

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| err.error)?;

        trace!("Wrote {} bytes to {}", value.len(), path.display());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("rotaractMembers").unwrap(), None);

        store.set("rotaractMembers", "[]").unwrap();
        assert!(dir.path().join("rotaractMembers.json").exists());
        assert_eq!(store.get("rotaractMembers").unwrap().as_deref(), Some("[]"));

        store.set("rotaractMembers", r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(
            store.get("rotaractMembers").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );

        store.remove("rotaractMembers").unwrap();
        assert_eq!(store.get("rotaractMembers").unwrap(), None);
        store.remove("rotaractMembers").unwrap();
    }

    #[test]
    fn test_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));

        store.set("members", "[]").unwrap();

        assert_eq!(store.get("members").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("members", "[]").unwrap();
        store.set("members", "[1]").unwrap();

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_invalid_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        for key in ["", "..", "../escape", "a/b", "a\\b"] {
            assert!(matches!(
                store.set(key, "[]"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
