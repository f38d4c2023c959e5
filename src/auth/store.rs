use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::SessionError;

/// Key holding the signed-in user as JSON.
pub const USER_KEY: &str = "pickupkart_user";
/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "pickupkart_token";
/// Key recording whether the backend or the mock directory signed the user in.
pub const SOURCE_KEY: &str = "pickupkart_auth_source";

/// String key/value storage that outlives the process.
pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// A JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// A missing file is an empty store. An unreadable one is discarded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(SessionError::Io(e.to_string())),
        };
        debug!(path = %path.display(), keys = entries.len(), "Session file opened");
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| SessionError::Io(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| SessionError::Io(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = FileSessionStore::open(&path).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());
        store.set(TOKEN_KEY, "mock-jwt-token".into()).unwrap();
        store.set(USER_KEY, "{}".into()).unwrap();
        store.remove(USER_KEY).unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("mock-jwt-token"));
        assert!(reopened.get(USER_KEY).is_none());
    }

    #[test]
    fn garbage_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let store = FileSessionStore::open(&path).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemorySessionStore::default();
        store.set(TOKEN_KEY, "t".into()).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t"));
        store.remove(TOKEN_KEY).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());
    }
}
