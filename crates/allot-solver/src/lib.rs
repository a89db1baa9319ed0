//! Constraint model construction and solving for supplier awards.
//!
//! Given part demand across years, supplier prices and a set of business
//! rules (capacity, share, transfer limits, minimum order sizes, trust),
//! this crate builds a mixed-integer model that awards production volume
//! to suppliers at minimum total cost, drives the backend solver, and
//! exposes typed read-only views over the solved assignment.
//!
//! Two model variants exist:
//! - [`AwardModel`] — the multi-year model with the full rule vocabulary
//! - [`MinimalAwardModel`] — the single-year variant (capacity and share
//!   only), implemented as a specialisation of the full model
//!
//! The search itself is delegated to a MILP backend via `good_lp`; this
//! crate's responsibility stops at encoding the rules exactly and
//! interpreting the returned solution.

mod backend;
mod encode;
mod solution;
mod variables;

pub mod minimal;
pub mod model;
pub mod report;
pub mod scenario;

#[cfg(test)]
mod tests;

pub use minimal::{MinimalAwardModel, MinimalModelBuilder};
pub use model::AwardModel;
pub use report::{CsvExporter, SolutionReport};
pub use scenario::{reduced_price, work_value_delta};
pub use variables::MAX_CELL_UNITS;
