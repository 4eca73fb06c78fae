//! Error types for DDG extraction.
//!
//! Errors are grouped by stage: incomplete input directories, invalid result
//! files, failed name or leg extraction, and edges that cannot produce a DDG.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::quantity::QuantityError;
use crate::model::types::Leg;

/// Errors that can occur while extracting DDGs from repeat directories.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a directory or document, or writing the table, failed.
    #[error(transparent)]
    Io(#[from] crate::io::Error),

    /// At least one repeat directory contains no result files.
    #[error(
        "no .json result files found in at least one of the results folders; got folder names: {}",
        join_paths(.dirs)
    )]
    NoResultFiles {
        /// All repeat directories, in repeat order.
        dirs: Vec<PathBuf>,
    },

    /// Some result files are not present in every repeat directory.
    #[error(
        "some calculations did not finish and did not output a result .json file; \
         number of .json files per repeat: {}; missing results have been found for: {}",
        format_counts(.counts),
        .missing.join(", ")
    )]
    MissingFiles {
        /// Number of result files per repeat, in repeat order.
        counts: Vec<usize>,
        /// File names absent from at least one repeat, sorted.
        missing: Vec<String>,
    },

    /// The validation pass flagged files without usable results.
    ///
    /// Per-file reasons and failure tracebacks are carried by the
    /// [`ValidationReport`](super::ValidationReport) that produced this error.
    #[error("{} result file(s) have errors: {}", .files.len(), join_paths(.files))]
    InvalidResults {
        /// Flagged files, in the order they were checked.
        files: Vec<PathBuf>,
    },

    /// Neither naming strategy could determine the ligand pair.
    #[error("failed to determine ligand names for '{}'", .path.display())]
    NameExtraction {
        /// The offending result file.
        path: PathBuf,
    },

    /// Neither typing strategy could determine the simulation leg.
    #[error("cannot determine simulation type (solvent, complex, vacuum) for '{}'", .path.display())]
    LegExtraction {
        /// The offending result file.
        path: PathBuf,
    },

    /// A result file has no estimate.
    #[error("'{}' has no free energy estimate", .path.display())]
    MissingEstimate {
        /// The offending result file.
        path: PathBuf,
    },

    /// An estimate carries a unit that cannot be converted to kcal/mol.
    #[error("invalid estimate in '{}': {source}", .path.display())]
    Quantity {
        /// The offending result file.
        path: PathBuf,
        /// The conversion failure.
        #[source]
        source: QuantityError,
    },

    /// An edge lacks one of the legs needed for its DDG.
    #[error("edge {edge} has no {leg} leg; cannot compute DDG")]
    MissingLeg {
        /// Edge key (`edge_<ligand_a>_<ligand_b>`).
        edge: String,
        /// The absent leg.
        leg: Leg,
    },
}

impl Error {
    /// Creates a [`Quantity`](Error::Quantity) error.
    pub fn quantity(path: impl Into<PathBuf>, source: QuantityError) -> Self {
        Self::Quantity {
            path: path.into(),
            source,
        }
    }

    /// Creates a [`MissingLeg`](Error::MissingLeg) error.
    pub fn missing_leg(edge: impl Into<String>, leg: Leg) -> Self {
        Self::MissingLeg {
            edge: edge.into(),
            leg,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_counts(counts: &[usize]) -> String {
    counts
        .iter()
        .enumerate()
        .map(|(i, n)| format!("repeat {}: {} files", i, n))
        .collect::<Vec<_>>()
        .join(", ")
}
