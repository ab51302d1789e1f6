use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::StorageError;

/// String-keyed, string-valued durable storage, the shape of browser local storage
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage; clones share the same underlying map
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0
            .borrow_mut()
            .insert(String::from(key), String::from(value));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

/// One file per key under a directory
///
/// Writes go through a temporary file in the same directory and are then
/// renamed over the target, so a crash mid-write leaves the previous value.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> FileStorage {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(feature = "web")]
pub use web::LocalStorage;

#[cfg(feature = "web")]
mod web {
    use gloo_storage::Storage as _;

    use super::Storage;
    use crate::StorageError;

    /// The browser's `window.localStorage`
    #[derive(Clone, Copy, Debug, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        // gloo panics when local storage is missing, so check for it first
        fn check_available() -> Result<(), StorageError> {
            match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                Some(_) => Ok(()),
                None => Err(StorageError::Backend(String::from(
                    "local storage is not available",
                ))),
            }
        }
    }

    impl Storage for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Self::check_available()?;
            gloo_storage::LocalStorage::raw()
                .get_item(key)
                .map_err(|e| StorageError::Backend(format!("{e:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            Self::check_available()?;
            gloo_storage::LocalStorage::raw()
                .set_item(key, value)
                .map_err(|e| StorageError::Backend(format!("{e:?}")))
        }

        fn delete(&mut self, key: &str) -> Result<(), StorageError> {
            Self::check_available()?;
            gloo_storage::LocalStorage::delete(key);
            Ok(())
        }
    }

}
