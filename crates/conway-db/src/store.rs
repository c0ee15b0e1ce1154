//! Read-through, write-through board store.
//!
//! [`BoardStore`] pairs an in-memory cache with a durable
//! [`BoardRepository`]. The cache is the hot copy every request reads; the
//! repository is the copy that survives a restart.
//!
//! # Contract
//!
//! - **Get**: cache hit returns directly; a miss loads and decodes the
//!   durable record and populates the cache. A record that fails to decode
//!   is logged and reported as absent.
//! - **Save**: durable overwrite first, cache second. If the durable write
//!   fails the error propagates and the cache keeps its previous entry.
//! - **Delete**: durable record and cache entry are both removed.
//! - **Open**: every durable record is loaded into the cache up front;
//!   records that fail to load are skipped with a warning.
//!
//! Cache entries are replaced whole under a [`RwLock`], so a reader sees
//! either the old board or the new one, never a mix. A read-through miss
//! holds the write lock until its entry is in place, and writers touch the
//! cache only after the durable change, so a stale record can never be
//! cached over a completed delete.

use std::collections::HashMap;

use conway_types::{Board, BoardId};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::DbError;
use crate::file_repository::FileRepository;
use crate::repository::BoardRepository;

/// Board cache over a durable repository.
#[derive(Debug)]
pub struct BoardStore<R = FileRepository> {
    repository: R,
    cache: RwLock<HashMap<BoardId, Board>>,
}

impl<R: BoardRepository> BoardStore<R> {
    /// Create a store with an empty cache. Records are loaded lazily.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store and load every durable record into the cache.
    ///
    /// Records that cannot be read or decoded are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] only if the repository cannot be listed.
    pub async fn open(repository: R) -> Result<Self, DbError> {
        let ids = repository.list().await?;
        let mut cache = HashMap::with_capacity(ids.len());
        let mut skipped: usize = 0;

        for id in ids {
            match load_board(&repository, id).await {
                Ok(Some(board)) => {
                    cache.insert(id, board);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(board_id = %id, error = %e, "Skipping unreadable board record");
                    skipped = skipped.saturating_add(1);
                }
            }
        }

        info!(loaded = cache.len(), skipped, "Board store opened");
        Ok(Self {
            repository,
            cache: RwLock::new(cache),
        })
    }

    /// Fetch a board, loading it from durable storage on a cache miss.
    ///
    /// Returns `Ok(None)` when no record exists or the record is corrupt.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Io`] if the durable read itself fails.
    pub async fn get(&self, id: BoardId) -> Result<Option<Board>, DbError> {
        if let Some(board) = self.cache.read().await.get(&id) {
            return Ok(Some(board.clone()));
        }

        // Misses hold the write lock across the durable read so a save or
        // delete that finishes meanwhile is applied after our insert.
        let mut cache = self.cache.write().await;
        if let Some(board) = cache.get(&id) {
            return Ok(Some(board.clone()));
        }

        let board = match load_board(&self.repository, id).await {
            Ok(Some(board)) => board,
            Ok(None) => return Ok(None),
            Err(DbError::Corrupt { id, source }) => {
                warn!(board_id = %id, error = %source, "Corrupt board record treated as missing");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        debug!(board_id = %id, generation = board.generation(), "Loaded board into cache");
        cache.insert(id, board.clone());
        Ok(Some(board))
    }

    /// Persist a board, then make it the cached copy.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the durable write fails; the cache is left
    /// unchanged in that case.
    pub async fn save(&self, board: &Board) -> Result<(), DbError> {
        let id = board.id();
        self.repository.store(id, &board.serialize()).await?;
        self.cache.write().await.insert(id, board.clone());
        debug!(board_id = %id, generation = board.generation(), "Saved board");
        Ok(())
    }

    /// Remove a board from durable storage and the cache.
    ///
    /// Returns whether the board existed in either place.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the durable delete fails; the cache is left
    /// unchanged in that case.
    pub async fn delete(&self, id: BoardId) -> Result<bool, DbError> {
        let on_disk = self.repository.remove(id).await?;
        let cached = self.cache.write().await.remove(&id).is_some();
        let existed = on_disk || cached;
        debug!(board_id = %id, existed, "Deleted board");
        Ok(existed)
    }

    /// Ids of all cached boards, sorted.
    pub async fn ids(&self) -> Vec<BoardId> {
        let mut ids: Vec<BoardId> = self.cache.read().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of cached boards.
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// The underlying durable repository.
    pub const fn repository(&self) -> &R {
        &self.repository
    }
}

/// Load and decode one durable record.
async fn load_board<R: BoardRepository>(
    repository: &R,
    id: BoardId,
) -> Result<Option<Board>, DbError> {
    let Some(record) = repository.load(id).await? else {
        return Ok(None);
    };
    Board::deserialize(id, &record)
        .map(Some)
        .map_err(|source| DbError::Corrupt { id, source })
}
