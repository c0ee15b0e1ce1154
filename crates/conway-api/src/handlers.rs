//! REST endpoint handlers for the board server.
//!
//! Handlers parse the request, delegate to the [`BoardService`] held in
//! [`AppState`], and return JSON. Every failure is a [`ServiceError`],
//! which renders itself as an HTTP error response.
//!
//! [`BoardService`]: crate::service::BoardService
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness and board count |
//! | `GET` | `/api/boards` | List board ids |
//! | `POST` | `/api/boards` | Create a board from a 0/1 grid |
//! | `GET` | `/api/boards/{id}` | Current board state |
//! | `DELETE` | `/api/boards/{id}` | Delete a board |
//! | `POST` | `/api/boards/{id}/step` | Advance one generation |
//! | `POST` | `/api/boards/{id}/step/{n}` | Advance `n` generations |
//! | `POST` | `/api/boards/{id}/conclusion` | Run until cycle or extinction |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use conway_db::BoardRepository;
use conway_types::{BoardId, CreateBoardRequest};

use crate::error::ServiceError;
use crate::state::AppState;

/// Query parameters for `POST /api/boards/{id}/conclusion`.
#[derive(Debug, serde::Deserialize)]
pub struct ConclusionQuery {
    /// Generation budget. The configured default applies when absent.
    /// Parsed as a signed integer by the handler.
    pub max_generations: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report that the server is up and how many boards it holds.
pub async fn health<R: BoardRepository>(State(state): State<Arc<AppState<R>>>) -> impl IntoResponse {
    let boards = state.service.store().cached_len().await;
    Json(serde_json::json!({
        "status": "ok",
        "boards": boards,
    }))
}

// ---------------------------------------------------------------------------
// /api/boards
// ---------------------------------------------------------------------------

/// List the ids of all known boards.
pub async fn list_boards<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> impl IntoResponse {
    let ids = state.service.list().await;
    Json(serde_json::json!({
        "count": ids.len(),
        "boards": ids,
    }))
}

/// Create a board and return its id with `201 Created`.
pub async fn create_board<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.service.create(&request.state).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// /api/boards/{id}
// ---------------------------------------------------------------------------

/// Return the current state of one board.
pub async fn get_board<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(&id_str)?;
    Ok(Json(state.service.get(id).await?))
}

/// Delete a board. A board that does not exist is a 404.
pub async fn delete_board<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(&id_str)?;
    if !state.service.delete(id).await? {
        return Err(ServiceError::NotFound(id));
    }
    Ok(Json(serde_json::json!({
        "id": id,
        "deleted": true,
    })))
}

/// Advance a board one generation.
pub async fn step_board<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(&id_str)?;
    Ok(Json(state.service.step(id).await?))
}

/// Advance a board `n` generations.
pub async fn step_board_n<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((id_str, n_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(&id_str)?;
    let n = parse_count(&n_str, "n")?;
    Ok(Json(state.service.step_n(id, n).await?))
}

/// Run a board until it repeats a state or dies out.
pub async fn conclude_board<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id_str): Path<String>,
    Query(query): Query<ConclusionQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(&id_str)?;
    let max_generations = query
        .max_generations
        .as_deref()
        .map(|value| parse_count(value, "max_generations"))
        .transpose()?;
    Ok(Json(
        state
            .service
            .run_to_conclusion(id, max_generations)
            .await?,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a board id from a path segment.
fn parse_id(s: &str) -> Result<BoardId, ServiceError> {
    s.parse::<BoardId>()
        .map_err(|e| ServiceError::InvalidId(format!("{s}: {e}")))
}

/// Parse a signed generation count. Sign checks happen in the service.
fn parse_count(s: &str, name: &str) -> Result<i64, ServiceError> {
    s.parse::<i64>()
        .map_err(|e| ServiceError::InvalidArgument(format!("{name} {s:?}: {e}")))
}
