//! Error types for the `conway-types` crate.
//!
//! Board construction and decoding return [`BoardError`]. The two variants
//! separate caller mistakes (a bad grid upload) from damaged durable state
//! (a record that no longer parses).

/// Errors raised while building or decoding a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The initial grid is empty, jagged, or holds a value other than 0/1.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A serialized record could not be decoded back into a board.
    #[error("corrupt state: {0}")]
    CorruptState(String),
}
