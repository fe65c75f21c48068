//! Process-scoped shared state.

use quizbot_solver::Solver;

/// State shared by every request task.
///
/// Immutable after startup, so concurrent requests need no locks.
pub struct AppState {
    pub solver: Solver,
}

impl AppState {
    pub fn new(solver: Solver) -> Self {
        Self { solver }
    }
}
