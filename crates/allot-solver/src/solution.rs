//! Post-solve snapshot and derived values.
//!
//! Once a solve completes, the variable assignment is extracted into an
//! immutable integer snapshot. Every accessor reads from the snapshot and
//! recomputes costs in exact integer arithmetic, so repeated queries
//! return identical values and nothing depends on backend state.

use allot_core::{Grid2, Grid3, SolveStatus};

/// The recorded outcome of the most recent solve.
#[derive(Debug, Clone)]
pub(crate) enum Outcome {
    /// A solution is available for querying.
    Solved {
        status: SolveStatus,
        volume: Grid3<i64>,
        total_cost: i64,
    },
    /// The solve terminated without a solution.
    Failed(SolveStatus),
}

impl Outcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            Outcome::Solved { status, .. } => *status,
            Outcome::Failed(status) => *status,
        }
    }
}

/// Total cost of an assignment: sum of price * volume over every cell.
pub(crate) fn total_cost(price: &Grid3<i64>, volume: &Grid3<i64>) -> i64 {
    work_values(price, volume).total()
}

/// Cost per supplier, summed over parts and years.
pub(crate) fn supplier_costs(price: &Grid3<i64>, volume: &Grid3<i64>) -> Vec<i64> {
    let (suppliers, _, _) = volume.dims();
    let mut costs = vec![0i64; suppliers];
    for ((s, p, y), v) in volume.iter() {
        costs[s] += price.get(s, p, y).expect("congruent dims") * v;
    }
    costs
}

/// Work value per (supplier, part), summed across years.
///
/// This matrix is the data contract consumed by external visualisation.
pub(crate) fn work_values(price: &Grid3<i64>, volume: &Grid3<i64>) -> Grid2<i64> {
    let (suppliers, parts, years) = volume.dims();
    Grid2::from_fn(suppliers, parts, |s, p| {
        (0..years)
            .map(|y| {
                price.get(s, p, y).expect("congruent dims")
                    * volume.get(s, p, y).expect("congruent dims")
            })
            .sum::<i64>()
    })
}
