//! Allot - multi-period supplier award optimisation
//!
//! Builds a constraint model over part demand, supplier prices and a set
//! of business rules, minimises total cost through a MILP backend, and
//! exposes typed accessors over the solved award.
//!
//! # Example
//!
//! ```
//! use allot::prelude::*;
//!
//! let price = Grid2::from_rows(vec![vec![60, 95], vec![50, 98]]).unwrap();
//! let mut model = MinimalAwardModel::builder(price, vec![300, 150])
//!     .capacity(vec![2, 2])
//!     .build()
//!     .unwrap();
//!
//! assert!(model.minimise_cost().has_solution());
//! assert_eq!(model.volume(1, 0).unwrap(), 300);
//! ```

// Core types
pub use allot_core::{AllotError, Grid2, Grid3, ProblemShape, Result, SolveStatus};

// Rule and solver configuration
pub use allot_config::{ConfigError, Rule, RuleSet, SolveSettings};

// Models, scenario comparison and reporting
pub use allot_solver::{
    reduced_price, work_value_delta, AwardModel, CsvExporter, MinimalAwardModel,
    MinimalModelBuilder, SolutionReport, MAX_CELL_UNITS,
};

pub mod prelude {
    pub use super::{
        AllotError, AwardModel, Grid2, Grid3, MinimalAwardModel, Rule, RuleSet, SolveSettings,
        SolveStatus,
    };
}
