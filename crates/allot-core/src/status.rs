//! Solve status vocabulary.

/// Outcome of a single solve invocation.
///
/// `minimise_cost` never fails on an unsatisfiable model; it reports one of
/// these statuses and leaves the accessors to enforce the presence of a
/// solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// A solution was found and proven optimal.
    Optimal,
    /// A solution was found but optimality was not proven.
    Feasible,
    /// The constraints were proven unsatisfiable.
    Infeasible,
    /// The backend terminated without a solution or an infeasibility proof.
    Unknown,
    /// The model was rejected by the backend (e.g. an unbounded objective).
    ModelInvalid,
}

impl SolveStatus {
    /// Returns true if this status carries a queryable solution.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unknown => "unknown",
            SolveStatus::ModelInvalid => "model invalid",
        };
        write!(f, "{}", name)
    }
}
