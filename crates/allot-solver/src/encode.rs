//! Constraint encoder.
//!
//! Translates each active business rule into linear constraints over the
//! decision variables. Several rules are conditional (if assigned,
//! then ...); a MILP backend has no conditional constraints, so every
//! if-then rule is linearised exactly using the fixed volume domain bound.
//! The two channeling patterns (boolean tracks a threshold, boolean tracks
//! a change between years) are shared helpers so each rule encodes the
//! linking the same way.

use allot_core::{Grid2, Grid3};
use good_lp::{constraint, Constraint, Expression, Variable};

use crate::variables::{DecisionVars, MAX_CELL_UNITS};

/// Channels `indicator` to the truth of `quantity > 0`.
///
/// For integer `quantity` in [0, bound] this pair is an exact
/// biconditional: indicator = 0 forces quantity = 0, indicator = 1 forces
/// quantity >= 1.
fn link_threshold(quantity: Variable, indicator: Variable, bound: i64) -> [Constraint; 2] {
    [
        constraint!(quantity - (bound as f64) * indicator <= 0),
        constraint!(quantity - indicator >= 0),
    ]
}

/// Channels `changed` to `prev != curr` for two booleans.
///
/// The four inequalities pin `changed` to the exclusive-or of its inputs,
/// so a part entering or leaving a supplier both register as a change.
fn link_change(prev: Variable, curr: Variable, changed: Variable) -> [Constraint; 4] {
    [
        constraint!(changed - curr + prev >= 0),
        constraint!(changed + curr - prev >= 0),
        constraint!(changed - curr - prev <= 0),
        constraint!(changed + curr + prev <= 2),
    ]
}

/// Assigned(s,p,y) = 1 iff Volume(s,p,y) > 0, for every cell.
pub(crate) fn volume_assignment_links(dv: &DecisionVars) -> Vec<Constraint> {
    let mut out = Vec::new();
    for (idx, volume) in dv.volume.iter() {
        let (s, p, y) = idx;
        let assigned = *dv
            .assigned
            .get(s, p, y)
            .expect("assigned matrix mirrors volume matrix");
        out.extend(link_threshold(*volume, assigned, MAX_CELL_UNITS));
    }
    out
}

/// Volume awarded for a part in a year sums exactly to its demand.
pub(crate) fn demand_constraints(demand: &Grid2<i64>, dv: &DecisionVars) -> Vec<Constraint> {
    let (suppliers, parts, years) = dv.volume.dims();
    let mut out = Vec::with_capacity(parts * years);
    for part in 0..parts {
        for year in 0..years {
            let total = (0..suppliers).fold(Expression::default(), |acc, s| {
                acc + *dv.volume.get(s, part, year).expect("in-range cell")
            });
            let required = *demand.get(part, year).expect("demand shape validated");
            out.push(constraint!(total == required as f64));
        }
    }
    out
}

/// A supplier serves at most capacity(s,y) distinct parts in a year.
///
/// Counts assigned parts, never summed volume.
pub(crate) fn capacity_constraints(capacity: &Grid2<i64>, dv: &DecisionVars) -> Vec<Constraint> {
    let (suppliers, parts, years) = dv.volume.dims();
    let mut out = Vec::with_capacity(suppliers * years);
    for supplier in 0..suppliers {
        for year in 0..years {
            let assigned_parts = (0..parts).fold(Expression::default(), |acc, p| {
                acc + *dv.assigned.get(supplier, p, year).expect("in-range cell")
            });
            let cap = *capacity
                .get(supplier, year)
                .expect("capacity shape validated");
            out.push(constraint!(assigned_parts <= cap as f64));
        }
    }
    out
}

/// floor(volume * 100 / demand) <= share(s,p), per cell.
///
/// The bound applies to the floored integer percentage. With integer
/// volume and positive demand, floor(100v/d) <= share is equivalent to
/// 100v <= (share + 1) * d - 1, which is linear.
pub(crate) fn share_constraints(
    share: &Grid2<i64>,
    demand: &Grid2<i64>,
    dv: &DecisionVars,
) -> Vec<Constraint> {
    let mut out = Vec::new();
    for ((s, p, y), volume) in dv.volume.iter() {
        let limit = *share.get(s, p).expect("share shape validated");
        let d = *demand.get(p, y).expect("demand shape validated");
        // d > 0 is validated at model construction when this rule is active
        let bound = (limit + 1) * d - 1;
        out.push(constraint!(100 * *volume <= bound as f64));
    }
    out
}

/// Transferred(s,p,y) = 1 iff Assigned changed from year y-1 to y.
pub(crate) fn transfer_links(dv: &DecisionVars) -> Vec<Constraint> {
    let transferred = dv
        .transferred
        .as_ref()
        .expect("transfer links require the transferred layer");
    let mut out = Vec::new();
    for ((s, p, offset), changed) in transferred.iter() {
        let year = offset + 1;
        let prev = *dv.assigned.get(s, p, year - 1).expect("in-range cell");
        let curr = *dv.assigned.get(s, p, year).expect("in-range cell");
        out.extend(link_change(prev, curr, *changed));
    }
    out
}

/// A supplier gains or loses at most limit(s) parts per year.
pub(crate) fn supplier_transfer_limits(limits: &[i64], dv: &DecisionVars) -> Vec<Constraint> {
    let Some(transferred) = dv.transferred.as_ref() else {
        // single-year model: no year transitions exist
        return Vec::new();
    };
    let (suppliers, parts, transitions) = transferred.dims();
    let mut out = Vec::with_capacity(suppliers * transitions);
    for supplier in 0..suppliers {
        for offset in 0..transitions {
            let events = (0..parts).fold(Expression::default(), |acc, p| {
                acc + *transferred
                    .get(supplier, p, offset)
                    .expect("in-range cell")
            });
            out.push(constraint!(events <= limits[supplier] as f64));
        }
    }
    out
}

/// At most `limit` transfer events across all suppliers per year.
pub(crate) fn global_transfer_limits(limit: i64, dv: &DecisionVars) -> Vec<Constraint> {
    let Some(transferred) = dv.transferred.as_ref() else {
        return Vec::new();
    };
    let (suppliers, parts, transitions) = transferred.dims();
    let mut out = Vec::with_capacity(transitions);
    for offset in 0..transitions {
        let mut events = Expression::default();
        for supplier in 0..suppliers {
            for part in 0..parts {
                events = events
                    + *transferred
                        .get(supplier, part, offset)
                        .expect("in-range cell");
            }
        }
        out.push(constraint!(events <= limit as f64));
    }
    out
}

/// An assigned supplier receives at least the cell's minimum volume.
///
/// volume >= minimum * assigned: unassigned cells stay free to be zero,
/// assigned cells must clear the floor.
pub(crate) fn minimum_unit_constraints(
    minimum_units: &Grid3<i64>,
    dv: &DecisionVars,
) -> Vec<Constraint> {
    let mut out = Vec::new();
    for ((s, p, y), volume) in dv.volume.iter() {
        let floor = *minimum_units
            .get(s, p, y)
            .expect("minimum units shape validated");
        let assigned = *dv.assigned.get(s, p, y).expect("in-range cell");
        out.push(constraint!(*volume - (floor as f64) * assigned >= 0));
    }
    out
}

/// An untrusted (supplier, part) pairing carries zero volume in every year.
///
/// The distrust booleans are fixed from the input, then channelled to the
/// volume: volume <= MAX * (1 - distrust).
pub(crate) fn trust_constraints(trust: &Grid2<bool>, dv: &DecisionVars) -> Vec<Constraint> {
    let distrust = dv
        .distrust
        .as_ref()
        .expect("trust rule requires the distrust layer");
    let (_, _, years) = dv.volume.dims();
    let mut out = Vec::new();
    for ((s, p), flag) in distrust.iter() {
        let trusted = *trust.get(s, p).expect("trust shape validated");
        if trusted {
            out.push(constraint!(*flag == 0));
        } else {
            out.push(constraint!(*flag == 1));
        }
        for y in 0..years {
            let volume = *dv.volume.get(s, p, y).expect("in-range cell");
            out.push(constraint!(
                volume + (MAX_CELL_UNITS as f64) * *flag <= MAX_CELL_UNITS as f64
            ));
        }
    }
    out
}

/// Externally pinned cells: volume(s,p,y) == units, exactly.
pub(crate) fn pinned_volume_constraints(
    pins: &[(usize, usize, usize, i64)],
    dv: &DecisionVars,
) -> Vec<Constraint> {
    pins.iter()
        .map(|&(s, p, y, units)| {
            let volume = *dv.volume.get(s, p, y).expect("pin bounds checked on entry");
            constraint!(volume == units as f64)
        })
        .collect()
}

/// The single minimisation target: total cost over every cell.
pub(crate) fn total_cost_expression(price: &Grid3<i64>, dv: &DecisionVars) -> Expression {
    let mut cost = Expression::default();
    for ((s, p, y), volume) in dv.volume.iter() {
        let unit_price = *price.get(s, p, y).expect("price shape defines the model");
        cost.add_mul(unit_price as f64, *volume);
    }
    cost
}
