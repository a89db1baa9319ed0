//! Problem dimensions.
//!
//! Every matrix the modelling layer touches is indexed over some subset of
//! (supplier, part, year). Mixing up those axes is the classic defect in
//! this kind of code, so all bounds checks go through [`ProblemShape`] and
//! name the offending axis in the error.

use crate::error::{AllotError, Result};

/// The (supplier, part, year) dimensions of one problem instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemShape {
    pub suppliers: usize,
    pub parts: usize,
    pub years: usize,
}

impl ProblemShape {
    /// Creates a shape, rejecting empty axes.
    pub fn new(suppliers: usize, parts: usize, years: usize) -> Result<Self> {
        if suppliers == 0 || parts == 0 || years == 0 {
            return Err(AllotError::InvalidInput(format!(
                "problem shape must be non-empty on every axis, got \
                 {suppliers} suppliers x {parts} parts x {years} years"
            )));
        }
        Ok(ProblemShape {
            suppliers,
            parts,
            years,
        })
    }

    /// Number of (supplier, part, year) cells.
    pub fn cells(&self) -> usize {
        self.suppliers * self.parts * self.years
    }

    pub fn check_supplier(&self, supplier: usize) -> Result<()> {
        Self::check_axis("supplier", supplier, self.suppliers)
    }

    pub fn check_part(&self, part: usize) -> Result<()> {
        Self::check_axis("part", part, self.parts)
    }

    pub fn check_year(&self, year: usize) -> Result<()> {
        Self::check_axis("year", year, self.years)
    }

    fn check_axis(axis: &'static str, index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(AllotError::IndexOutOfRange { axis, index, len });
        }
        Ok(())
    }
}

impl std::fmt::Display for ProblemShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.suppliers, self.parts, self.years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_axes() {
        assert!(ProblemShape::new(0, 4, 1).is_err());
        assert!(ProblemShape::new(2, 0, 1).is_err());
        assert!(ProblemShape::new(2, 4, 0).is_err());
    }

    #[test]
    fn axis_checks_name_the_axis() {
        let shape = ProblemShape::new(2, 4, 3).unwrap();
        assert!(shape.check_supplier(1).is_ok());
        let err = shape.check_year(3).unwrap_err();
        match err {
            AllotError::IndexOutOfRange { axis, index, len } => {
                assert_eq!(axis, "year");
                assert_eq!(index, 3);
                assert_eq!(len, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn cell_count() {
        let shape = ProblemShape::new(2, 4, 3).unwrap();
        assert_eq!(shape.cells(), 24);
    }
}
