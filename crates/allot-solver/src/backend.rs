//! Backend solve invocation.
//!
//! The single place that hands a fully encoded model to the MILP backend
//! and maps its resolution outcome onto the [`SolveStatus`] vocabulary.

use allot_config::SolveSettings;
use allot_core::SolveStatus;
use good_lp::{
    default_solver, Constraint, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel,
};
use tracing::{debug, warn};

/// Runs one minimisation against the backend.
///
/// Infeasibility comes back as a status, not an error. An unbounded
/// objective cannot occur in a well-formed model (demand equalities bound
/// every volume), so it maps to `ModelInvalid`; any other backend failure
/// maps to `Unknown`.
pub(crate) fn solve_minimise(
    vars: ProblemVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
    settings: &SolveSettings,
) -> (SolveStatus, Option<impl Solution>) {
    if settings.search_workers > 1 {
        debug!(
            workers = settings.search_workers,
            "worker hint ignored: bundled backend is single-threaded"
        );
    }
    if let Some(limit) = settings.time_limit() {
        debug!(?limit, "time limit ignored: bundled backend runs to completion");
    }

    let mut problem = vars.minimise(objective).using(default_solver);
    for c in constraints {
        problem = problem.with(c);
    }

    match problem.solve() {
        Ok(solution) => (SolveStatus::Optimal, Some(solution)),
        Err(ResolutionError::Infeasible) => (SolveStatus::Infeasible, None),
        Err(ResolutionError::Unbounded) => (SolveStatus::ModelInvalid, None),
        Err(other) => {
            warn!(error = %other, "backend terminated without a resolution");
            (SolveStatus::Unknown, None)
        }
    }
}
