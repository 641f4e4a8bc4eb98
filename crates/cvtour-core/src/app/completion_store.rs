//! CompletionStore - 完了マーカーの読み書き
//!
//! KeyValueStorage の 1 キーだけを扱う薄いアクセサです。

use std::sync::Arc;

use tracing::warn;

use crate::domain::{CompletionMarker, StorageError};
use crate::ports::KeyValueStorage;

pub struct CompletionStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl CompletionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the marker. Unknown tokens read as `Absent`.
    pub fn get(&self) -> Result<CompletionMarker, StorageError> {
        let raw = self.storage.get(&self.key)?;
        Ok(CompletionMarker::from_token(raw.as_deref()).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "ignoring unrecognized completion marker");
            CompletionMarker::Absent
        }))
    }

    /// Write the marker. Writing `Absent` removes the key.
    pub fn set(&self, marker: CompletionMarker) -> Result<(), StorageError> {
        match marker.token() {
            Some(token) => self.storage.set(&self.key, token),
            None => self.storage.remove(&self.key),
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryStorage;

    const KEY: &str = "cvgenerator_tour_completed";

    #[test]
    fn empty_storage_reads_absent() {
        let store = CompletionStore::new(Arc::new(InMemoryStorage::new()), KEY);
        assert_eq!(store.key(), KEY);
        assert_eq!(store.get().unwrap(), CompletionMarker::Absent);
    }

    #[test]
    fn set_writes_the_token() {
        let storage = Arc::new(InMemoryStorage::new());
        let store = CompletionStore::new(storage.clone(), KEY);

        store.set(CompletionMarker::Skipped).unwrap();
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("skipped"));

        store.set(CompletionMarker::Completed).unwrap();
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("completed"));
        assert_eq!(store.get().unwrap(), CompletionMarker::Completed);
    }

    #[test]
    fn clear_and_set_absent_remove_the_key() {
        let storage = Arc::new(InMemoryStorage::with_entry(KEY, "completed"));
        let store = CompletionStore::new(storage.clone(), KEY);

        store.clear().unwrap();
        assert_eq!(storage.get(KEY).unwrap(), None);

        store.set(CompletionMarker::Skipped).unwrap();
        store.set(CompletionMarker::Absent).unwrap();
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[test]
    fn unknown_token_reads_absent() {
        let store = CompletionStore::new(Arc::new(InMemoryStorage::with_entry(KEY, "yes")), KEY);
        assert_eq!(store.get().unwrap(), CompletionMarker::Absent);
    }
}
