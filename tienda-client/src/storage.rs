//! Persistent key/value storage
//!
//! A small profile store playing the part browser storage plays for the
//! web front-ends: a handful of well-known keys, each holding a plain JSON
//! value. There is no schema versioning and the last write wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ClientConfig, ClientError, ClientResult};

/// Well-known storage keys
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const AUTH_USER: &str = "authUser";
    pub const CLIENT_EMAIL: &str = "clientEmail";
    pub const GOOGLE_USER: &str = "googleUser";
    pub const BUSQUEDAS_RECIENTES: &str = "busquedasRecientes";
}

/// Maximum number of remembered searches
pub const MAX_BUSQUEDAS: usize = 10;

/// Raw key/value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Typed helpers over any [`KeyValueStore`]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and decode a value; undecodable values read as absent
    fn load<T: DeserializeOwned>(&self, key: &str) -> ClientResult<Option<T>> {
        let Some(value) = self.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> ClientResult<()> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

fn lock<T>(mutex: &Mutex<T>) -> ClientResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ClientError::Internal("storage lock poisoned".to_string()))
}

/// In-memory store, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<Value>> {
        Ok(lock(&self.values)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> ClientResult<()> {
        lock(&self.values)?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        lock(&self.values)?.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON document per profile directory
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    guard: Mutex<()>,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "storage.json";

    /// Create a store under `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(Self::FILE_NAME),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let json = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "storage file is not a JSON object, starting empty");
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, map: Map<String, Value>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<Value>> {
        let _guard = lock(&self.guard)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> ClientResult<()> {
        let _guard = lock(&self.guard)?;
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);
        self.write_all(map)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let _guard = lock(&self.guard)?;
        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(map)?;
        }
        Ok(())
    }
}

/// File store under the configured directory, memory otherwise
pub fn desde_config(config: &ClientConfig) -> Arc<dyn KeyValueStore> {
    match &config.storage_dir {
        Some(dir) => Arc::new(FileStore::new(dir)),
        None => Arc::new(MemoryStore::new()),
    }
}

/// Recent storefront searches, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusquedasRecientes {
    terminos: Vec<String>,
}

impl BusquedasRecientes {
    pub fn cargar(store: &dyn KeyValueStore) -> ClientResult<Self> {
        let mut terminos: Vec<String> = store.load(keys::BUSQUEDAS_RECIENTES)?.unwrap_or_default();
        terminos.truncate(MAX_BUSQUEDAS);
        Ok(Self { terminos })
    }

    pub fn guardar(&self, store: &dyn KeyValueStore) -> ClientResult<()> {
        store.save(keys::BUSQUEDAS_RECIENTES, &self.terminos)
    }

    /// Put `termino` first; an existing equal term (ignoring case) moves up
    pub fn agregar(&mut self, termino: &str) {
        let termino = termino.trim();
        if termino.is_empty() {
            return;
        }
        let lower = termino.to_lowercase();
        self.terminos.retain(|t| t.to_lowercase() != lower);
        self.terminos.insert(0, termino.to_string());
        self.terminos.truncate(MAX_BUSQUEDAS);
    }

    pub fn quitar(&mut self, termino: &str) {
        let lower = termino.trim().to_lowercase();
        self.terminos.retain(|t| t.to_lowercase() != lower);
    }

    pub fn limpiar(&mut self) {
        self.terminos.clear();
    }

    pub fn terminos(&self) -> &[String] {
        &self.terminos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.save(keys::AUTH_TOKEN, "abc").unwrap();
        let token: Option<String> = store.load(keys::AUTH_TOKEN).unwrap();
        assert_eq!(token.as_deref(), Some("abc"));
        store.remove(keys::AUTH_TOKEN).unwrap();
        assert!(store.get(keys::AUTH_TOKEN).unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::default().with_storage_dir(dir.path());
        let store = desde_config(&config);
        store.save(keys::CLIENT_EMAIL, "ana@example.com").unwrap();

        let reopened = FileStore::new(dir.path());
        let email: Option<String> = reopened.load(keys::CLIENT_EMAIL).unwrap();
        assert_eq!(email.as_deref(), Some("ana@example.com"));
        reopened.remove(keys::CLIENT_EMAIL).unwrap();
        assert!(store.get(keys::CLIENT_EMAIL).unwrap().is_none());
    }

    #[test]
    fn test_file_store_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();
        assert!(store.get(keys::AUTH_TOKEN).unwrap().is_none());
        store.save(keys::AUTH_TOKEN, "t").unwrap();
        assert!(store.get(keys::AUTH_TOKEN).unwrap().is_some());
    }

    #[test]
    fn test_load_ignores_wrong_shape() {
        let store = MemoryStore::new();
        store.set(keys::BUSQUEDAS_RECIENTES, Value::from(42)).unwrap();
        let b = BusquedasRecientes::cargar(&store).unwrap();
        assert!(b.terminos().is_empty());
    }

    #[test]
    fn test_busquedas_dedupe_and_order() {
        let mut b = BusquedasRecientes::default();
        b.agregar("remera");
        b.agregar("jean");
        b.agregar("REMERA");
        b.agregar("   ");
        assert_eq!(b.terminos(), ["REMERA", "jean"]);
    }

    #[test]
    fn test_busquedas_capped() {
        let mut b = BusquedasRecientes::default();
        for i in 0..15 {
            b.agregar(&format!("t{}", i));
        }
        assert_eq!(b.terminos().len(), MAX_BUSQUEDAS);
        assert_eq!(b.terminos()[0], "t14");
        assert_eq!(b.terminos()[9], "t5");
    }

    #[test]
    fn test_busquedas_persist() {
        let store = MemoryStore::new();
        let mut b = BusquedasRecientes::default();
        b.agregar("campera");
        b.guardar(&store).unwrap();
        assert_eq!(BusquedasRecientes::cargar(&store).unwrap(), b);
        b.quitar("CAMPERA");
        assert!(b.terminos().is_empty());
    }
}
