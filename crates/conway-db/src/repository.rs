//! The durable keyed storage seam.
//!
//! A [`BoardRepository`] holds one text record per board id and knows
//! nothing about what the text means. Decoding, caching and corruption
//! handling live in [`BoardStore`](crate::store::BoardStore).

use std::future::Future;

use conway_types::BoardId;

use crate::error::DbError;

/// Durable key-value storage of board records.
///
/// Implementations must make [`store`](Self::store) a full overwrite: after
/// it returns, [`load`](Self::load) yields exactly the stored text.
pub trait BoardRepository: Send + Sync {
    /// List every id that currently has a record.
    fn list(&self) -> impl Future<Output = Result<Vec<BoardId>, DbError>> + Send;

    /// Read the record for `id`, or `None` if there is none.
    fn load(&self, id: BoardId) -> impl Future<Output = Result<Option<String>, DbError>> + Send;

    /// Replace the record for `id` with `record`.
    fn store(
        &self,
        id: BoardId,
        record: &str,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Delete the record for `id`. Returns whether one existed.
    fn remove(&self, id: BoardId) -> impl Future<Output = Result<bool, DbError>> + Send;
}
