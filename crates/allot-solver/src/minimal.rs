//! The single-year award model.
//!
//! Price and demand lose their year axis, capacity becomes a per-supplier
//! count and the transfer/minimum/trust vocabulary does not apply. Both
//! variants share the same variable construction, encoding, objective and
//! extraction; this one wraps the multi-year model with a year axis of
//! length one.

use allot_config::{Rule, RuleSet, SolveSettings};
use allot_core::{Grid2, Grid3, Result, SolveStatus};

use crate::model::AwardModel;

/// Single-year supplier award model with capacity and share rules.
///
/// # Example
///
/// ```
/// use allot_core::Grid2;
/// use allot_solver::MinimalAwardModel;
///
/// let price = Grid2::from_rows(vec![vec![60, 95], vec![50, 98]]).unwrap();
/// let mut model = MinimalAwardModel::builder(price, vec![300, 150])
///     .capacity(vec![2, 2])
///     .build()
///     .unwrap();
///
/// assert!(model.minimise_cost().has_solution());
/// assert_eq!(model.volume(1, 0).unwrap(), 300);
/// ```
#[derive(Debug)]
pub struct MinimalAwardModel {
    inner: AwardModel,
}

impl MinimalAwardModel {
    /// Starts building a model from price (supplier x part) and per-part
    /// demand.
    pub fn builder(price: Grid2<i64>, demand: Vec<i64>) -> MinimalModelBuilder {
        MinimalModelBuilder {
            price,
            demand,
            capacity: None,
            share: None,
            settings: SolveSettings::default(),
        }
    }

    /// Encodes the model, runs the backend once and records the outcome.
    pub fn minimise_cost(&mut self) -> SolveStatus {
        self.inner.minimise_cost()
    }

    /// Status of the most recent solve, if any.
    pub fn status(&self) -> Option<SolveStatus> {
        self.inner.status()
    }

    /// Awarded volume for one (supplier, part) cell.
    pub fn volume(&self, supplier: usize, part: usize) -> Result<i64> {
        self.inner.volume(supplier, part, 0)
    }

    /// Total cost of the solved assignment.
    pub fn total_cost(&self) -> Result<i64> {
        self.inner.total_cost()
    }

    /// Cost per supplier.
    pub fn supplier_costs(&self) -> Result<Vec<i64>> {
        self.inner.supplier_costs()
    }

    /// Work value per (supplier, part).
    pub fn work_value_details(&self) -> Result<Grid2<i64>> {
        self.inner.work_value_details()
    }

    /// The awarded-volume matrix (supplier x part).
    pub fn volume_details(&self) -> Result<Grid2<i64>> {
        let volume = self.inner.volume_details()?;
        let (suppliers, parts, _) = volume.dims();
        Ok(Grid2::from_fn(suppliers, parts, |s, p| {
            *volume.get(s, p, 0).expect("single-year layout")
        }))
    }
}

/// Builder for [`MinimalAwardModel`].
#[derive(Debug)]
pub struct MinimalModelBuilder {
    price: Grid2<i64>,
    demand: Vec<i64>,
    capacity: Option<Vec<i64>>,
    share: Option<Grid2<i64>>,
    settings: SolveSettings,
}

impl MinimalModelBuilder {
    /// Sets the per-supplier cap on distinct assigned parts.
    pub fn capacity(mut self, capacity: Vec<i64>) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the (supplier x part) share percentages.
    pub fn share(mut self, share: Grid2<i64>) -> Self {
        self.share = Some(share);
        self
    }

    /// Overrides the default solve settings.
    pub fn settings(mut self, settings: SolveSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validates the inputs and builds the model.
    pub fn build(self) -> Result<MinimalAwardModel> {
        let (suppliers, parts) = (self.price.rows(), self.price.cols());
        let price = Grid3::from_fn(suppliers, parts, 1, |s, p, _| {
            *self.price.get(s, p).expect("in-range cell")
        });
        let demand = {
            let parts_given = self.demand.len();
            Grid2::from_fn(parts_given, 1, |p, _| self.demand[p])
        };

        let mut rules = RuleSet::new();
        if let Some(capacity) = self.capacity {
            let per_year = Grid2::from_fn(capacity.len(), 1, |s, _| capacity[s]);
            rules = rules.with(Rule::Capacity(per_year))?;
        }
        if let Some(share) = self.share {
            rules = rules.with(Rule::PartShare(share))?;
        }

        let inner = AwardModel::with_settings(price, demand, rules, self.settings)?;
        Ok(MinimalAwardModel { inner })
    }
}
