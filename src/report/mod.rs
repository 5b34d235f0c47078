pub mod aggregate;
pub mod columns;
pub mod load;
pub mod normalize;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::economics::UnitEconomics;

pub use aggregate::{analyze, Dimension, DimensionSummary, GroupSummary, ReportAnalysis};
pub use load::{load_report, LoadError, RawTable};
pub use normalize::{normalize, NormalizedReport, NormalizedRow, SchemaError};

/// Outcome of running the full pipeline over one file. A schema mismatch is
/// not fatal: the raw row count stays reportable while the rollups are absent.
#[derive(Debug)]
pub struct FileAnalysis {
    pub raw_rows: usize,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    Analyzed {
        quantity_column: String,
        analysis: ReportAnalysis,
    },
    InsufficientColumns(SchemaError),
}

/// Load, normalize, and aggregate one report file. Every invocation builds
/// its own structures from scratch; nothing is cached between calls.
pub fn analyze_file(path: &Path, econ: &UnitEconomics) -> Result<FileAnalysis> {
    let raw = load::load_report(path).with_context(|| format!("loading {}", path.display()))?;
    let raw_rows = raw.rows.len();

    match normalize::normalize(&raw) {
        Ok(report) => {
            info!(
                rows = raw_rows,
                quantity_column = %report.quantity_column,
                "running rollups"
            );
            let analysis = aggregate::analyze(&report, econ);
            Ok(FileAnalysis {
                raw_rows,
                outcome: Outcome::Analyzed {
                    quantity_column: report.quantity_column,
                    analysis,
                },
            })
        }
        Err(err) => {
            warn!(%err, "report lacks required columns; rollups disabled");
            Ok(FileAnalysis {
                raw_rows,
                outcome: Outcome::InsufficientColumns(err),
            })
        }
    }
}
