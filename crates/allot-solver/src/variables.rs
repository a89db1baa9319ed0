//! Decision-variable factory.
//!
//! All variables for one solve are allocated here, before any constraint
//! is encoded. The backend consumes its variable container at solve time,
//! so this factory runs inside every `minimise_cost` invocation against
//! the layout fixed at model construction.

use allot_config::RuleSet;
use allot_core::{Grid2, Grid3, ProblemShape};
use good_lp::{variable, ProblemVariables, Variable};

/// Upper bound on the volume a single (supplier, part, year) cell may
/// carry. Fixed domain assumption inherited by every volume variable.
pub const MAX_CELL_UNITS: i64 = 500;

/// The per-cell decision variables of one solve.
///
/// - `volume` — integer units awarded, domain [0, `MAX_CELL_UNITS`]
/// - `assigned` — boolean, channelled to `volume > 0`
/// - `transferred` — boolean per (supplier, part, year >= 1), channelled to
///   an assignment change against the prior year; only allocated when a
///   transfer rule is active. The year axis is offset by one: index
///   `(s, p, y - 1)` holds the transfer flag for year `y`.
/// - `distrust` — boolean per (supplier, part), fixed from the trust input;
///   only allocated when the trust rule is active
pub(crate) struct DecisionVars {
    pub volume: Grid3<Variable>,
    pub assigned: Grid3<Variable>,
    pub transferred: Option<Grid3<Variable>>,
    pub distrust: Option<Grid2<Variable>>,
}

impl DecisionVars {
    pub fn allocate(pv: &mut ProblemVariables, shape: &ProblemShape, rules: &RuleSet) -> Self {
        let volume = Grid3::from_fn(shape.suppliers, shape.parts, shape.years, |s, p, y| {
            pv.add(
                variable()
                    .integer()
                    .min(0)
                    .max(MAX_CELL_UNITS as f64)
                    .name(format!("volume_s{s}p{p}y{y}")),
            )
        });
        let assigned = Grid3::from_fn(shape.suppliers, shape.parts, shape.years, |s, p, y| {
            pv.add(variable().binary().name(format!("assigned_s{s}p{p}y{y}")))
        });
        let transferred = (rules.tracks_transfers() && shape.years > 1).then(|| {
            Grid3::from_fn(shape.suppliers, shape.parts, shape.years - 1, |s, p, y| {
                pv.add(
                    variable()
                        .binary()
                        .name(format!("transferred_s{s}p{p}y{}", y + 1)),
                )
            })
        });
        let distrust = rules.trust().map(|_| {
            Grid2::from_fn(shape.suppliers, shape.parts, |s, p| {
                pv.add(variable().binary().name(format!("distrust_s{s}p{p}")))
            })
        });
        DecisionVars {
            volume,
            assigned,
            transferred,
            distrust,
        }
    }

    /// Total variable count, for solve logging.
    pub fn count(&self) -> usize {
        let (s, p, y) = self.volume.dims();
        let base = 2 * s * p * y;
        let transferred = self
            .transferred
            .as_ref()
            .map(|t| {
                let (ts, tp, ty) = t.dims();
                ts * tp * ty
            })
            .unwrap_or(0);
        let distrust = self
            .distrust
            .as_ref()
            .map(|d| d.rows() * d.cols())
            .unwrap_or(0);
        base + transferred + distrust
    }
}
