//! Shared application state for the board HTTP server.
//!
//! [`AppState`] is handed to every handler behind an [`Arc`](std::sync::Arc).
//! It owns the [`BoardService`], which in turn owns the board cache, so all
//! requests observe the same boards.

use conway_db::FileRepository;

use crate::service::BoardService;

/// State shared by all request handlers.
#[derive(Debug)]
pub struct AppState<R = FileRepository> {
    /// The board operations every route delegates to.
    pub service: BoardService<R>,
}

impl<R> AppState<R> {
    /// Wrap a service for sharing across handlers.
    pub const fn new(service: BoardService<R>) -> Self {
        Self { service }
    }
}
