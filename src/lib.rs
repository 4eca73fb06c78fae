//! Aggregation of repeated relative binding free energy (RBFE) calculations
//! into per-edge DDG tables.
//!
//! Each repeat of a free-energy campaign writes one JSON result document per
//! transformation leg into its own directory. This crate checks that every
//! repeat produced every result, averages the estimates across repeats, and
//! combines the complex and solvent legs of each ligand pair into a DDG with a
//! propagated uncertainty.
//!
//! # Features
//!
//! - **Validation** — Detects network and transformation input files, results
//!   without unit results, and failed runs without estimates, surfacing the
//!   recorded tracebacks
//! - **Completeness checks** — Verifies every result file exists in every
//!   repeat directory
//! - **Robust naming** — Reads ligand names from the serialized components,
//!   falling back to the simulation name
//! - **Unit handling** — Accepts bare numbers and unit-tagged quantities in
//!   kcal/mol or kJ/mol
//! - **TSV output** — Tab-separated table with `\n` line endings
//!
//! # Quick Start
//!
//! The [`extract`] function runs the whole pipeline; [`io::write_tsv`] writes
//! its rows:
//!
//! ```no_run
//! use fep_extract::{ExtractConfig, ExtractError, extract, io};
//!
//! let config = ExtractConfig::default(); // results_0, results_1, results_2
//! let rows = extract(&config)?;
//!
//! let file = std::fs::File::create("ddg.tsv").map_err(io::Error::Write)?;
//! io::write_tsv(file, &rows, config.decimals)?;
//! # Ok::<(), ExtractError>(())
//! ```
//!
//! The individual stages are public as well, for callers that want to report
//! between them:
//!
//! ```no_run
//! use fep_extract::{
//!     ExtractConfig, MissingLegPolicy, aggregate, check_completeness, compute_ddg, discover,
//!     validate,
//! };
//!
//! let config = ExtractConfig::default();
//! let report = validate(&discover(&config)?);
//! for flagged in &report.flagged {
//!     println!("{} {}", flagged.path.display(), flagged.problem);
//! }
//! let set = report.into_result()?;
//! check_completeness(&set)?;
//! let table = aggregate(&set)?;
//! let rows = compute_ddg(&table, MissingLegPolicy::Skip)?;
//! # Ok::<(), fep_extract::ExtractError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Directory listing, result document loading, TSV writing
//! - [`extract()`] — Full pipeline in one call
//! - [`ExtractConfig`] — Repeat directories, missing-leg policy, rounding
//!
//! # Data Types
//!
//! - [`ResultDocument`] — Consumed subset of a protocol result
//! - [`Quantity`] — Bare or unit-tagged free-energy value
//! - [`Leg`] — Solvent, complex, or vacuum
//! - [`Edge`] / [`EdgeTable`] — Ligand pairs and their per-leg estimates
//! - [`LegEstimate`] — Mean and population standard deviation over repeats
//! - [`DdgRow`] — One line of the output table
//! - [`ValidationReport`] — Skipped and flagged files of a validation pass

mod extract;
mod model;

#[cfg(test)]
mod testing;

pub mod io;

pub use model::edge::{DdgRow, Edge, EdgeTable, LegEstimate};
pub use model::quantity::{Quantity, QuantityError};
pub use model::result::{DocumentKind, ResultDocument, UnitFailure, UnitResult};
pub use model::types::Leg;

pub use extract::{
    DEFAULT_DECIMALS, DEFAULT_REPEATS, ExtractConfig, FlaggedFile, MissingLegPolicy, Problem,
    Repeat, RepeatSet, SkipReason, SkippedFile, ValidationReport, aggregate, aggregate_with,
    check_completeness, compute_ddg, discover, extract, parse_simulation_name, summarize, validate,
    validate_with,
};

pub use extract::Error as ExtractError;
