//! Report generation for solved models.
//!
//! Everything here consumes only the public extraction API; a report never
//! reaches into solver state.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use allot_core::Result;

use crate::model::AwardModel;

/// Plain-text renderer for a solved award model.
///
/// Shows the solve status, total cost, value won per supplier and the
/// awarded volumes per part across years.
pub struct SolutionReport;

impl SolutionReport {
    /// Renders the model to a string.
    ///
    /// # Errors
    ///
    /// Fails with `NotSolved`/`NoFeasibleSolution` like any accessor if the
    /// model has no queryable solution.
    pub fn render(model: &AwardModel) -> Result<String> {
        let shape = model.shape();
        let volume = model.volume_details()?;
        let supplier_costs = model.supplier_costs()?;
        let total = model.total_cost()?;
        let status = model.status().expect("volume details imply a solve");

        let mut output = String::new();
        writeln!(output, "status: {status}").unwrap();
        writeln!(output, "total cost: {total}").unwrap();

        writeln!(output).unwrap();
        writeln!(output, "value per supplier").unwrap();
        for (supplier, cost) in supplier_costs.iter().enumerate() {
            writeln!(output, "  supplier {:>2}: {:>12}", supplier + 1, cost).unwrap();
        }

        for part in 0..shape.parts {
            writeln!(output).unwrap();
            write!(output, "part {:>2}      ", part + 1).unwrap();
            for year in 0..shape.years {
                write!(output, "{:>8}", year + 1).unwrap();
            }
            writeln!(output).unwrap();
            for supplier in 0..shape.suppliers {
                write!(output, "  supplier {:>2}", supplier + 1).unwrap();
                for year in 0..shape.years {
                    let units = volume.get(supplier, part, year).expect("in-range cell");
                    write!(output, "{:>8}", units).unwrap();
                }
                writeln!(output).unwrap();
            }
        }

        Ok(output)
    }
}

/// CSV exporter for a solved award model.
///
/// Exports one row per (supplier, part, year) cell with the awarded volume
/// and its value.
pub struct CsvExporter;

impl CsvExporter {
    /// Exports the solved assignment to a CSV string.
    pub fn to_string(model: &AwardModel) -> Result<String> {
        let shape = model.shape();
        let volume = model.volume_details()?;
        let values = model.work_value_details()?;
        let supplier_costs = model.supplier_costs()?;

        let mut output = String::new();
        writeln!(output, "supplier,part,year,volume,part_value,supplier_value").unwrap();
        for supplier in 0..shape.suppliers {
            for part in 0..shape.parts {
                for year in 0..shape.years {
                    writeln!(
                        output,
                        "{},{},{},{},{},{}",
                        supplier,
                        part,
                        year,
                        volume.get(supplier, part, year).expect("in-range cell"),
                        values.get(supplier, part).expect("in-range cell"),
                        supplier_costs[supplier],
                    )
                    .unwrap();
                }
            }
        }

        Ok(output)
    }

    /// Exports the solved assignment to a CSV file.
    pub fn to_file(model: &AwardModel, path: impl AsRef<Path>) -> io::Result<()> {
        let csv = Self::to_string(model).map_err(io::Error::other)?;
        fs::write(path, csv)
    }

    /// Writes the solved assignment as CSV to a writer.
    pub fn write<W: Write>(model: &AwardModel, mut writer: W) -> io::Result<()> {
        let csv = Self::to_string(model).map_err(io::Error::other)?;
        writer.write_all(csv.as_bytes())
    }
}
