//! Wire views handed to API clients.
//!
//! These are the JSON shapes the HTTP adapter returns and accepts. They are
//! exported to `TypeScript` via `ts-rs` so a dashboard can share them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::board::Board;
use crate::ids::BoardId;

/// Client-facing projection of a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardView {
    /// Board identifier.
    pub id: BoardId,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Generation counter.
    pub generation: u64,
    /// When the board was constructed.
    pub created_at: DateTime<Utc>,
    /// Row-major cells, `1` alive and `0` dead.
    pub state: Vec<Vec<u8>>,
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id(),
            width: board.width(),
            height: board.height(),
            generation: board.generation(),
            created_at: board.created_at(),
            state: board.to_binary_grid(),
        }
    }
}

/// Result of running a board until it cycles or dies out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConclusionView {
    /// The concluding board. On a cycle its generation is the cycle start.
    #[serde(flatten)]
    pub board: BoardView,
    /// Whether the run ended on a repeated state rather than extinction.
    pub cycle: bool,
    /// First generation of the repeating state, when `cycle` is set.
    pub cycle_start_generation: Option<u64>,
}

/// Request body for creating a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreateBoardRequest {
    /// Row-major initial cells. Every value must be 0 or 1.
    pub state: Vec<Vec<i64>>,
}

/// Response body for a created board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreatedBoard {
    /// Identifier of the new board.
    pub id: BoardId,
}
