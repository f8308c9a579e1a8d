use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::rc::Rc;

/// A key-value persistence gateway.
///
/// The store and the auth gate only ever read and write whole values under
/// string keys (`todos`, `userToken`), so this is the entire storage surface.
pub trait KeyValue {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// File-backed gateway: one file per key inside the data directory.
///
/// The directory is determined in the following order:
/// 1. `TUDU_DATA` environment variable.
/// 2. `~/.local/share/tudu` (on Linux).
/// 3. `.` (fallback).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        let dir = std::env::var("TUDU_DATA").map(PathBuf::from).unwrap_or_else(|_| {
            let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("tudu");
            p
        });
        FileStore { dir }
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let mut p = self.dir.clone();
        p.push(key);
        p
    }
}

impl Default for FileStore {
    fn default() -> Self {
        FileStore::new()
    }
}

impl KeyValue for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let mut f = OpenOptions::new().read(true).open(&path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        Ok(Some(s))
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.key_path(key))?;
        f.write_all(value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory gateway for tests and embedding. Clones share the same map, the
/// way handles to one external storage would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}
