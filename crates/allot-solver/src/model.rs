//! The multi-year award model.

use std::time::{Duration, Instant};

use allot_config::{RuleSet, SolveSettings};
use allot_core::{AllotError, Grid2, Grid3, ProblemShape, Result, SolveStatus};
use good_lp::{ProblemVariables, Solution};
use tracing::{debug, info};

use crate::solution::{self, Outcome};
use crate::variables::{DecisionVars, MAX_CELL_UNITS};
use crate::{backend, encode};

/// Multi-year supplier award model.
///
/// Construction validates the inputs and fixes the problem layout; nothing
/// is sent to the backend until [`minimise_cost`](AwardModel::minimise_cost)
/// runs. Volume cells may be pinned to externally negotiated values before
/// a solve, and a model may be re-solved after adding further pins; each
/// solve overwrites the previous outcome.
///
/// # Example
///
/// ```
/// use allot_config::RuleSet;
/// use allot_core::{Grid2, Grid3};
/// use allot_solver::AwardModel;
///
/// // one part, two suppliers, one year
/// let price = Grid3::from_nested(vec![vec![vec![60]], vec![vec![50]]]).unwrap();
/// let demand = Grid2::from_rows(vec![vec![100]]).unwrap();
///
/// let mut model = AwardModel::new(price, demand, RuleSet::new()).unwrap();
/// let status = model.minimise_cost();
/// assert!(status.has_solution());
/// assert_eq!(model.total_cost().unwrap(), 5_000);
/// ```
#[derive(Debug)]
pub struct AwardModel {
    price: Grid3<i64>,
    demand: Grid2<i64>,
    rules: RuleSet,
    settings: SolveSettings,
    shape: ProblemShape,
    pins: Vec<(usize, usize, usize, i64)>,
    outcome: Option<Outcome>,
    last_solve_time: Option<Duration>,
}

impl AwardModel {
    /// Creates a model with default solve settings.
    pub fn new(price: Grid3<i64>, demand: Grid2<i64>, rules: RuleSet) -> Result<Self> {
        Self::with_settings(price, demand, rules, SolveSettings::default())
    }

    /// Creates a model with explicit solve settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any matrix is dimensionally inconsistent
    /// with the price matrix, carries a negative entry, or if the share
    /// rule is active while some demand cell is zero (the share encoding
    /// divides by demand).
    pub fn with_settings(
        price: Grid3<i64>,
        demand: Grid2<i64>,
        rules: RuleSet,
        settings: SolveSettings,
    ) -> Result<Self> {
        let (suppliers, parts, years) = price.dims();
        let shape = ProblemShape::new(suppliers, parts, years)?;

        if (demand.rows(), demand.cols()) != (parts, years) {
            return Err(AllotError::InvalidInput(format!(
                "demand matrix is {}x{}, expected part x year ({}x{})",
                demand.rows(),
                demand.cols(),
                parts,
                years
            )));
        }
        if let Some((idx, value)) = price.iter().find(|(_, v)| **v < 0) {
            return Err(AllotError::InvalidInput(format!(
                "price at {idx:?} is negative ({value})"
            )));
        }
        if let Some((idx, value)) = demand.iter().find(|(_, v)| **v < 0) {
            return Err(AllotError::InvalidInput(format!(
                "demand at {idx:?} is negative ({value})"
            )));
        }
        rules.validate(&shape)?;
        if rules.share().is_some() {
            if let Some(((part, year), _)) = demand.iter().find(|(_, v)| **v == 0) {
                return Err(AllotError::InvalidInput(format!(
                    "share rule is active but demand for part {part}, year {year} \
                     is zero; the share bound is undefined without demand"
                )));
            }
        }

        Ok(AwardModel {
            price,
            demand,
            rules,
            settings,
            shape,
            pins: Vec::new(),
            outcome: None,
            last_solve_time: None,
        })
    }

    /// The (supplier, part, year) dimensions of this model.
    pub fn shape(&self) -> ProblemShape {
        self.shape
    }

    /// Pins a cell to an exact volume for every subsequent solve.
    ///
    /// Used to express externally negotiated contractual commitments.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for an out-of-bounds cell and
    /// `InvalidInput` for a volume outside the cell domain.
    pub fn pin_volume(
        &mut self,
        supplier: usize,
        part: usize,
        year: usize,
        units: i64,
    ) -> Result<()> {
        self.check_cell(supplier, part, year)?;
        if !(0..=MAX_CELL_UNITS).contains(&units) {
            return Err(AllotError::InvalidInput(format!(
                "pinned volume {units} outside cell domain 0..={MAX_CELL_UNITS}"
            )));
        }
        self.pins.push((supplier, part, year, units));
        Ok(())
    }

    /// Encodes the model, runs the backend once and records the outcome.
    ///
    /// Never fails on an unsatisfiable model: the returned status reports
    /// what happened, and the accessors enforce it. Re-invoking re-encodes
    /// the current model (including pins added since the last run) and
    /// overwrites the previous outcome.
    pub fn minimise_cost(&mut self) -> SolveStatus {
        let start = Instant::now();

        let mut pv = ProblemVariables::new();
        let dv = DecisionVars::allocate(&mut pv, &self.shape, &self.rules);
        let constraints = self.encode_constraints(&dv);
        let objective = encode::total_cost_expression(&self.price, &dv);
        debug!(
            shape = %self.shape,
            variables = dv.count(),
            constraints = constraints.len(),
            pins = self.pins.len(),
            "model encoded"
        );

        let (status, solved) = backend::solve_minimise(pv, objective, constraints, &self.settings);
        let outcome = match solved {
            Some(assignment) => {
                let volume = dv
                    .volume
                    .map(|_, var| assignment.value(*var).round() as i64);
                let total_cost = solution::total_cost(&self.price, &volume);
                Outcome::Solved {
                    status,
                    volume,
                    total_cost,
                }
            }
            None => Outcome::Failed(status),
        };

        let elapsed = start.elapsed();
        info!(%status, elapsed_ms = elapsed.as_millis() as u64, "solve finished");
        self.outcome = Some(outcome);
        self.last_solve_time = Some(elapsed);
        status
    }

    fn encode_constraints(&self, dv: &DecisionVars) -> Vec<good_lp::Constraint> {
        let mut constraints = Vec::new();
        constraints.extend(encode::volume_assignment_links(dv));
        constraints.extend(encode::demand_constraints(&self.demand, dv));
        if let Some(capacity) = self.rules.capacity() {
            constraints.extend(encode::capacity_constraints(capacity, dv));
        }
        if let Some(share) = self.rules.share() {
            constraints.extend(encode::share_constraints(share, &self.demand, dv));
        }
        if dv.transferred.is_some() {
            constraints.extend(encode::transfer_links(dv));
        }
        if let Some(limits) = self.rules.supplier_transfer_limit() {
            constraints.extend(encode::supplier_transfer_limits(limits, dv));
        }
        if let Some(limit) = self.rules.global_transfer_limit() {
            constraints.extend(encode::global_transfer_limits(limit, dv));
        }
        if let Some(minimum_units) = self.rules.minimum_units() {
            constraints.extend(encode::minimum_unit_constraints(minimum_units, dv));
        }
        if let Some(trust) = self.rules.trust() {
            constraints.extend(encode::trust_constraints(trust, dv));
        }
        constraints.extend(encode::pinned_volume_constraints(&self.pins, dv));
        constraints
    }

    /// Status of the most recent solve, if any.
    pub fn status(&self) -> Option<SolveStatus> {
        self.outcome.as_ref().map(Outcome::status)
    }

    /// Wall-clock duration of the most recent solve, if any.
    pub fn last_solve_time(&self) -> Option<Duration> {
        self.last_solve_time
    }

    /// Awarded volume for one cell.
    pub fn volume(&self, supplier: usize, part: usize, year: usize) -> Result<i64> {
        self.check_cell(supplier, part, year)?;
        let volume = self.solved_volume()?;
        Ok(*volume.get(supplier, part, year).expect("bounds checked"))
    }

    /// Total cost of the solved assignment.
    pub fn total_cost(&self) -> Result<i64> {
        match self.outcome.as_ref() {
            None => Err(AllotError::NotSolved),
            Some(Outcome::Failed(status)) => Err(AllotError::NoFeasibleSolution(*status)),
            Some(Outcome::Solved { total_cost, .. }) => Ok(*total_cost),
        }
    }

    /// Cost per supplier, summed over parts and years.
    pub fn supplier_costs(&self) -> Result<Vec<i64>> {
        let volume = self.solved_volume()?;
        Ok(solution::supplier_costs(&self.price, volume))
    }

    /// Work value per (supplier, part), summed across years.
    ///
    /// This aggregated value matrix is the data contract consumed by
    /// external visualisation.
    pub fn work_value_details(&self) -> Result<Grid2<i64>> {
        let volume = self.solved_volume()?;
        Ok(solution::work_values(&self.price, volume))
    }

    /// The full awarded-volume matrix.
    pub fn volume_details(&self) -> Result<Grid3<i64>> {
        Ok(self.solved_volume()?.clone())
    }

    fn solved_volume(&self) -> Result<&Grid3<i64>> {
        match self.outcome.as_ref() {
            None => Err(AllotError::NotSolved),
            Some(Outcome::Failed(status)) => Err(AllotError::NoFeasibleSolution(*status)),
            Some(Outcome::Solved { volume, .. }) => Ok(volume),
        }
    }

    fn check_cell(&self, supplier: usize, part: usize, year: usize) -> Result<()> {
        self.shape.check_supplier(supplier)?;
        self.shape.check_part(part)?;
        self.shape.check_year(year)?;
        Ok(())
    }
}
