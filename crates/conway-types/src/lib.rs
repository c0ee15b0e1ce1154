//! Shared type definitions for the Conway board service.
//!
//! This crate is the single source of truth for the board entity and its
//! durable text form. Wire types flow downstream to `TypeScript` via
//! `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for board identifiers
//! - [`cell`] -- The binary cell state
//! - [`board`] -- The board entity (grid, generation, identity)
//! - [`codec`] -- Durable text record encode/decode
//! - [`view`] -- Request/response shapes for API clients
//! - [`error`] -- Construction and decode errors

pub mod board;
pub mod cell;
pub mod codec;
pub mod error;
pub mod ids;
pub mod view;

// Re-export all public types at crate root for convenience.
pub use board::Board;
pub use cell::Cell;
pub use error::BoardError;
pub use ids::BoardId;
pub use view::{BoardView, ConclusionView, CreateBoardRequest, CreatedBoard};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the wire types.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to `bindings/`
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::BoardId::export_all();
        let _ = crate::view::BoardView::export_all();
        let _ = crate::view::ConclusionView::export_all();
        let _ = crate::view::CreateBoardRequest::export_all();
        let _ = crate::view::CreatedBoard::export_all();
    }
}
