//! File-system board records.
//!
//! One file per board in a data directory, named `<uuid>.board` and holding
//! the board's text record. Writes go to a sibling temp file first and are
//! renamed into place, so a reader never sees half a record.
//!
//! # Layout
//!
//! | Path | Contents |
//! |------|----------|
//! | `{data_dir}/{id}.board` | Durable text record |
//! | `{data_dir}/{id}.board.tmp` | In-flight write, renamed on success |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use conway_types::BoardId;

use crate::error::DbError;
use crate::repository::BoardRepository;

/// Extension of a board record file.
pub const RECORD_EXTENSION: &str = "board";

/// Board records stored as files in one directory.
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    /// Open (creating if needed) the data directory at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Io`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, DbError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DbError::io(&dir, e))?;
        tracing::info!(dir = %dir.display(), "Opened board data directory");
        Ok(Self { dir })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `id`.
    pub fn record_path(&self, id: BoardId) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    fn temp_path(&self, id: BoardId) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXTENSION}.tmp"))
    }
}

/// Recover the board id from a record file name, if it is one.
fn id_from_path(path: &Path) -> Option<BoardId> {
    if path.extension()? != RECORD_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

impl BoardRepository for FileRepository {
    async fn list(&self) -> Result<Vec<BoardId>, DbError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| DbError::io(&self.dir, e))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DbError::io(&self.dir, e))?
        {
            let path = entry.path();
            if let Some(id) = id_from_path(&path) {
                ids.push(id);
            } else if path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
                tracing::warn!(path = %path.display(), "Skipping record with a non-UUID name");
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    async fn load(&self, id: BoardId) -> Result<Option<String>, DbError> {
        let path = self.record_path(id);
        match tokio::fs::read(&path).await {
            // Invalid UTF-8 becomes replacement characters, which the codec
            // then rejects as corrupt.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DbError::io(path, e)),
        }
    }

    async fn store(&self, id: BoardId, record: &str) -> Result<(), DbError> {
        let temp = self.temp_path(id);
        let path = self.record_path(id);
        tokio::fs::write(&temp, record)
            .await
            .map_err(|e| DbError::io(&temp, e))?;
        tokio::fs::rename(&temp, &path)
            .await
            .map_err(|e| DbError::io(&path, e))?;
        Ok(())
    }

    async fn remove(&self, id: BoardId) -> Result<bool, DbError> {
        let path = self.record_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DbError::io(path, e)),
        }
    }
}
