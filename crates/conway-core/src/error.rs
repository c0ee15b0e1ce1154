//! Error types for the simulation engine.

use conway_types::BoardId;

/// Errors raised while advancing or analysing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// A generation count or budget was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The trajectory neither cycled nor died out within the budget.
    #[error("board {board_id} did not conclude within {max_generations} generations")]
    Timeout {
        /// The board being analysed.
        board_id: BoardId,
        /// The exhausted generation budget.
        max_generations: u64,
    },
}
