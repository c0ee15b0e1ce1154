//! Axum router construction for the board API.
//!
//! Assembles every route into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use conway_db::BoardRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the board server.
///
/// The router includes:
/// - `GET /health` -- liveness
/// - `GET /api/boards` -- list board ids
/// - `POST /api/boards` -- create a board
/// - `GET /api/boards/{id}` -- single board
/// - `DELETE /api/boards/{id}` -- delete a board
/// - `POST /api/boards/{id}/step` -- one generation
/// - `POST /api/boards/{id}/step/{n}` -- `n` generations
/// - `POST /api/boards/{id}/conclusion` -- run to cycle or extinction
///
/// CORS allows any origin.
pub fn build_router<R: BoardRepository + 'static>(state: Arc<AppState<R>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::<R>))
        .route(
            "/api/boards",
            get(handlers::list_boards::<R>).post(handlers::create_board::<R>),
        )
        .route(
            "/api/boards/{id}",
            get(handlers::get_board::<R>).delete(handlers::delete_board::<R>),
        )
        .route("/api/boards/{id}/step", post(handlers::step_board::<R>))
        .route("/api/boards/{id}/step/{n}", post(handlers::step_board_n::<R>))
        .route(
            "/api/boards/{id}/conclusion",
            post(handlers::conclude_board::<R>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
