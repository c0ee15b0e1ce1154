//! Data layer for the Conway board service.
//!
//! Boards live in two places: an in-memory cache that serves every read,
//! and a durable repository that survives restarts. This crate provides
//! both and the read-through/write-through contract that joins them.
//!
//! # Architecture
//!
//! ```text
//! Request
//!     |
//!     +-- get ----> cache hit? ---- yes --> Board
//!     |                 |
//!     |                 +-- no --> BoardRepository::load --> decode --> cache
//!     |
//!     +-- save ---> BoardRepository::store --> cache
//!     |
//!     +-- delete -> BoardRepository::remove --> cache
//! ```
//!
//! # Modules
//!
//! - [`store`] -- [`BoardStore`], the cache plus its contract
//! - [`repository`] -- the [`BoardRepository`] durable storage trait
//! - [`file_repository`] -- one record file per board in a directory
//! - [`memory_repository`] -- map-backed records for tests
//! - [`error`] -- Shared error types

pub mod error;
pub mod file_repository;
pub mod memory_repository;
pub mod repository;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use file_repository::FileRepository;
pub use memory_repository::MemoryRepository;
pub use repository::BoardRepository;
pub use store::BoardStore;
