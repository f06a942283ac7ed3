use std::collections::HashMap;
use std::path::PathBuf;

use crate::data_types::common::{Error, Result};

pub mod persistance;
pub mod workout_store;

/// The external storage medium: one value per key, overwritten wholesale.
pub trait ByteStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    fn remove(&mut self, key: &str);
}

/// Throwaway in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One file per key under a base directory.
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base).map_err(|e| Error::Persistence(e.to_string()))?;

        Ok(Self { base })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl ByteStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        std::fs::write(self.path_for(key), value).map_err(|e| Error::Persistence(e.to_string()))
    }

    fn remove(&mut self, key: &str) {
        let _ = std::fs::remove_file(self.path_for(key));
    }
}
