//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`], which carries the record or
//! path involved so a failed write can be traced back to its board.

use std::path::PathBuf;

use conway_types::{BoardError, BoardId};

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A file-system operation on the durable store failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A durable record exists but does not decode.
    #[error("corrupt record for board {id}: {source}")]
    Corrupt {
        /// The board whose record is damaged.
        id: BoardId,
        /// The decode failure.
        source: BoardError,
    },

    /// The repository refused a write.
    #[error("write rejected for board {0}")]
    WriteRejected(BoardId),
}

impl DbError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
