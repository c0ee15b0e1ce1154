//! Board service and HTTP API for the Conway board service.
//!
//! [`BoardService`] is the collaborator contract: create, read, step,
//! run to conclusion, and delete boards held in a
//! [`BoardStore`](conway_db::BoardStore). The rest of the crate exposes it
//! over HTTP with Axum.
//!
//! # Modules
//!
//! - [`service`] -- [`BoardService`], the operations behind every route
//! - [`error`] -- [`ServiceError`] and its HTTP status mapping
//! - [`state`] -- Shared handler state
//! - [`handlers`] -- REST endpoint handlers
//! - [`router`] -- Route table and middleware
//! - [`server`] -- Bind, serve, and graceful shutdown

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod service;
pub mod state;

pub use error::ServiceError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use service::BoardService;
pub use state::AppState;
