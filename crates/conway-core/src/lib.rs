//! Simulation engine for the Conway board service.
//!
//! This crate owns the Game of Life rule and everything that repeatedly
//! applies it. It has no I/O: boards go in, new boards come out.
//!
//! # Modules
//!
//! - [`transition`] -- One-generation step, fixed-count advance, and
//!   validation of caller-supplied counts.
//! - [`trajectory`] -- Run-to-conclusion with cycle and extinction
//!   detection under a generation budget.
//! - [`config`] -- Configuration loading from `conway-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- Engine error types.

pub mod config;
pub mod error;
pub mod trajectory;
pub mod transition;

pub use error::SimulationError;
pub use trajectory::{Conclusion, Outcome, run_to_conclusion};
pub use transition::{generation_count, step, step_n};
