//! In-memory board records.
//!
//! Backs the store in tests and in embedded setups that do not need
//! durability. Writes can be switched off and a load can be paused
//! mid-flight to exercise failure paths and interleavings.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use conway_types::BoardId;
use tokio::sync::{Mutex, oneshot};

use crate::error::DbError;
use crate::repository::BoardRepository;

/// Board records held in a map.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<BTreeMap<BoardId, String>>,
    reject_writes: AtomicBool,
    held_load: Mutex<Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>>,
}

/// A paused [`BoardRepository::load`] call.
///
/// The load reads its record, signals [`reached`](Self::reached), then
/// waits for [`release`](Self::release) before returning what it read.
#[derive(Debug)]
pub struct LoadHold {
    reached: oneshot::Receiver<()>,
    release: oneshot::Sender<()>,
}

impl LoadHold {
    /// Wait until the held load has read its record.
    pub async fn reached(&mut self) {
        let _ = (&mut self.reached).await;
    }

    /// Let the held load return.
    pub fn release(self) {
        let _ = self.release.send(());
    }
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place raw text under `id`, bypassing the codec.
    pub async fn insert_raw(&self, id: BoardId, record: impl Into<String>) {
        self.records.lock().await.insert(id, record.into());
    }

    /// Make subsequent writes fail with [`DbError::WriteRejected`].
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Pause the next [`load`](BoardRepository::load) after it reads.
    pub async fn hold_next_load(&self) -> LoadHold {
        let (reached_tx, reached_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        *self.held_load.lock().await = Some((reached_tx, release_rx));
        LoadHold {
            reached: reached_rx,
            release: release_tx,
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl BoardRepository for MemoryRepository {
    async fn list(&self) -> Result<Vec<BoardId>, DbError> {
        Ok(self.records.lock().await.keys().copied().collect())
    }

    async fn load(&self, id: BoardId) -> Result<Option<String>, DbError> {
        let record = self.records.lock().await.get(&id).cloned();
        let held = self.held_load.lock().await.take();
        if let Some((reached, release)) = held {
            let _ = reached.send(());
            let _ = release.await;
        }
        Ok(record)
    }

    async fn store(&self, id: BoardId, record: &str) -> Result<(), DbError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DbError::WriteRejected(id));
        }
        self.records.lock().await.insert(id, record.to_owned());
        Ok(())
    }

    async fn remove(&self, id: BoardId) -> Result<bool, DbError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DbError::WriteRejected(id));
        }
        Ok(self.records.lock().await.remove(&id).is_some())
    }
}
