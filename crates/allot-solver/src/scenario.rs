//! Scenario comparison.
//!
//! Two independently solved models over congruent dimensions can be
//! compared by their per-(supplier, part) work value, and a what-if price
//! grid can be derived by uniformly discounting one supplier.

use allot_core::{AllotError, Grid2, Grid3, Result};

use crate::model::AwardModel;

/// Per-(supplier, part) work value delta between two solved scenarios.
///
/// Entry (s, p) is scenario A's value minus scenario B's, summed across
/// years. Both models must have congruent shapes and a queryable solution;
/// anything else is a caller error.
pub fn work_value_delta(a: &AwardModel, b: &AwardModel) -> Result<Grid2<i64>> {
    if a.shape() != b.shape() {
        return Err(AllotError::InvalidInput(format!(
            "scenario shapes differ: {} vs {}",
            a.shape(),
            b.shape()
        )));
    }
    let value_a = a.work_value_details()?;
    let value_b = b.work_value_details()?;
    Ok(Grid2::from_fn(value_a.rows(), value_a.cols(), |s, p| {
        value_a.get(s, p).expect("congruent dims") - value_b.get(s, p).expect("congruent dims")
    }))
}

/// Derives a price grid with one supplier's prices reduced by a fraction.
///
/// `reduction` is a fraction in [0, 1]; reduced prices are rounded to the
/// nearest unit.
pub fn reduced_price(price: &Grid3<i64>, supplier: usize, reduction: f64) -> Result<Grid3<i64>> {
    let (suppliers, _, _) = price.dims();
    if supplier >= suppliers {
        return Err(AllotError::IndexOutOfRange {
            axis: "supplier",
            index: supplier,
            len: suppliers,
        });
    }
    if !(0.0..=1.0).contains(&reduction) {
        return Err(AllotError::InvalidInput(format!(
            "price reduction {reduction} outside [0, 1]"
        )));
    }
    Ok(price.map(|(s, _, _), v| {
        if s == supplier {
            ((*v as f64) * (1.0 - reduction)).round() as i64
        } else {
            *v
        }
    }))
}
