//! Answer orchestration for Quizbot.
//!
//! # Architecture
//!
//! - [`prompt`] — exchange assembly and answer-line extraction
//! - [`solver::Solver`] — sequential fallback over the configured backends

pub mod prompt;
pub mod solver;

pub use solver::{SolveError, Solver};
