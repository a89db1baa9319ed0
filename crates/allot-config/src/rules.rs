//! Business-rule configuration.
//!
//! Each optional rule is registered explicitly as a [`Rule`] value carrying
//! its payload. Payload-local validation (value ranges, nonnegativity)
//! happens at registration; dimensional congruence against a concrete
//! problem is checked by [`RuleSet::validate`] once the model knows its
//! shape. Registering the same rule kind twice is an error.

use allot_core::{AllotError, Grid2, Grid3, ProblemShape, Result};

/// One optional business rule with its payload.
///
/// Dimensions expected by each payload:
/// - `Capacity`: supplier x year, max count of distinct assigned parts
/// - `PartShare`: supplier x part, percentages in 0..=100
/// - `SupplierTransferLimit`: one entry per supplier
/// - `GlobalTransferLimit`: scalar, max transfer events per year
/// - `MinimumUnits`: supplier x part x year, awarded-volume floors
/// - `Trust`: supplier x part, false forbids the pairing entirely
#[derive(Debug, Clone)]
pub enum Rule {
    Capacity(Grid2<i64>),
    PartShare(Grid2<i64>),
    SupplierTransferLimit(Vec<i64>),
    GlobalTransferLimit(i64),
    MinimumUnits(Grid3<i64>),
    Trust(Grid2<bool>),
}

impl Rule {
    fn kind(&self) -> &'static str {
        match self {
            Rule::Capacity(_) => "capacity",
            Rule::PartShare(_) => "part share",
            Rule::SupplierTransferLimit(_) => "supplier transfer limit",
            Rule::GlobalTransferLimit(_) => "global transfer limit",
            Rule::MinimumUnits(_) => "minimum units",
            Rule::Trust(_) => "trust",
        }
    }
}

/// The set of active rules for one model.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    capacity: Option<Grid2<i64>>,
    share: Option<Grid2<i64>>,
    supplier_transfer_limit: Option<Vec<i64>>,
    global_transfer_limit: Option<i64>,
    minimum_units: Option<Grid3<i64>>,
    trust: Option<Grid2<bool>>,
}

impl RuleSet {
    /// Creates an empty rule set (only the always-on constraints apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule, validating its payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the rule kind is already registered or the
    /// payload is out of range (negative limits, share outside 0..=100).
    pub fn with(mut self, rule: Rule) -> Result<Self> {
        let kind = rule.kind();
        let duplicate = match &rule {
            Rule::Capacity(_) => self.capacity.is_some(),
            Rule::PartShare(_) => self.share.is_some(),
            Rule::SupplierTransferLimit(_) => self.supplier_transfer_limit.is_some(),
            Rule::GlobalTransferLimit(_) => self.global_transfer_limit.is_some(),
            Rule::MinimumUnits(_) => self.minimum_units.is_some(),
            Rule::Trust(_) => self.trust.is_some(),
        };
        if duplicate {
            return Err(AllotError::InvalidInput(format!(
                "{kind} rule registered twice"
            )));
        }
        match rule {
            Rule::Capacity(grid) => {
                require_nonneg_2d(&grid, "capacity")?;
                self.capacity = Some(grid);
            }
            Rule::PartShare(grid) => {
                for ((supplier, part), value) in grid.iter() {
                    if !(0..=100).contains(value) {
                        return Err(AllotError::InvalidInput(format!(
                            "share for supplier {supplier}, part {part} is {value}, \
                             expected a percentage in 0..=100"
                        )));
                    }
                }
                self.share = Some(grid);
            }
            Rule::SupplierTransferLimit(limits) => {
                if let Some((supplier, value)) =
                    limits.iter().enumerate().find(|(_, v)| **v < 0)
                {
                    return Err(AllotError::InvalidInput(format!(
                        "transfer limit for supplier {supplier} is negative ({value})"
                    )));
                }
                self.supplier_transfer_limit = Some(limits);
            }
            Rule::GlobalTransferLimit(limit) => {
                if limit < 0 {
                    return Err(AllotError::InvalidInput(format!(
                        "global transfer limit is negative ({limit})"
                    )));
                }
                self.global_transfer_limit = Some(limit);
            }
            Rule::MinimumUnits(grid) => {
                if let Some((idx, value)) = grid.iter().find(|(_, v)| **v < 0) {
                    return Err(AllotError::InvalidInput(format!(
                        "minimum units at {idx:?} is negative ({value})"
                    )));
                }
                self.minimum_units = Some(grid);
            }
            Rule::Trust(grid) => {
                self.trust = Some(grid);
            }
        }
        Ok(self)
    }

    pub fn capacity(&self) -> Option<&Grid2<i64>> {
        self.capacity.as_ref()
    }

    pub fn share(&self) -> Option<&Grid2<i64>> {
        self.share.as_ref()
    }

    pub fn supplier_transfer_limit(&self) -> Option<&[i64]> {
        self.supplier_transfer_limit.as_deref()
    }

    pub fn global_transfer_limit(&self) -> Option<i64> {
        self.global_transfer_limit
    }

    pub fn minimum_units(&self) -> Option<&Grid3<i64>> {
        self.minimum_units.as_ref()
    }

    pub fn trust(&self) -> Option<&Grid2<bool>> {
        self.trust.as_ref()
    }

    /// True if any rule needs the transfer-event variable layer.
    pub fn tracks_transfers(&self) -> bool {
        self.supplier_transfer_limit.is_some() || self.global_transfer_limit.is_some()
    }

    /// Checks every registered payload against the problem dimensions.
    pub fn validate(&self, shape: &ProblemShape) -> Result<()> {
        if let Some(capacity) = &self.capacity {
            require_dims_2d(capacity, shape.suppliers, shape.years, "capacity")?;
        }
        if let Some(share) = &self.share {
            require_dims_2d(share, shape.suppliers, shape.parts, "share")?;
        }
        if let Some(limits) = &self.supplier_transfer_limit {
            if limits.len() != shape.suppliers {
                return Err(AllotError::InvalidInput(format!(
                    "supplier transfer limit has {} entries, expected one per \
                     supplier ({})",
                    limits.len(),
                    shape.suppliers
                )));
            }
        }
        if let Some(minimum) = &self.minimum_units {
            let expected = (shape.suppliers, shape.parts, shape.years);
            if minimum.dims() != expected {
                return Err(AllotError::InvalidInput(format!(
                    "minimum units matrix is {:?}, expected {:?}",
                    minimum.dims(),
                    expected
                )));
            }
        }
        if let Some(trust) = &self.trust {
            if (trust.rows(), trust.cols()) != (shape.suppliers, shape.parts) {
                return Err(AllotError::InvalidInput(format!(
                    "trust matrix is {}x{}, expected {}x{}",
                    trust.rows(),
                    trust.cols(),
                    shape.suppliers,
                    shape.parts
                )));
            }
        }
        Ok(())
    }
}

fn require_nonneg_2d(grid: &Grid2<i64>, name: &str) -> Result<()> {
    if let Some((idx, value)) = grid.iter().find(|(_, v)| **v < 0) {
        return Err(AllotError::InvalidInput(format!(
            "{name} at {idx:?} is negative ({value})"
        )));
    }
    Ok(())
}

fn require_dims_2d(grid: &Grid2<i64>, rows: usize, cols: usize, name: &str) -> Result<()> {
    if (grid.rows(), grid.cols()) != (rows, cols) {
        return Err(AllotError::InvalidInput(format!(
            "{name} matrix is {}x{}, expected {}x{}",
            grid.rows(),
            grid.cols(),
            rows,
            cols
        )));
    }
    Ok(())
}
