//! Error types for the board service and its HTTP adapter.
//!
//! [`ServiceError`] unifies every failure a collaborator operation can
//! report. It converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use conway_core::SimulationError;
use conway_db::DbError;
use conway_types::{BoardError, BoardId};

/// Errors that can occur in a board service operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The initial grid was empty, jagged, or not binary.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A generation count or budget was negative.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A board id could not be parsed from the request path.
    #[error("invalid board id: {0}")]
    InvalidId(String),

    /// No board exists for the id.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// The trajectory did not conclude within the budget.
    #[error("board {board_id} did not conclude within {max_generations} generations")]
    SimulationTimeout {
        /// The board that was run.
        board_id: BoardId,
        /// The exhausted budget.
        max_generations: u64,
    },

    /// Durable storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),

    /// A background computation did not complete.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<BoardError> for ServiceError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::InvalidInput(msg) => Self::InvalidInput(msg),
            BoardError::CorruptState(msg) => Self::Internal(msg),
        }
    }
}

impl From<SimulationError> for ServiceError {
    fn from(e: SimulationError) -> Self {
        match e {
            SimulationError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            SimulationError::Timeout {
                board_id,
                max_generations,
            } => Self::SimulationTimeout {
                board_id,
                max_generations,
            },
        }
    }
}

impl ServiceError {
    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidArgument(_) | Self::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SimulationTimeout { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
