//! File I/O for result directories and DDG tables.
//!
//! Reading is limited to the JSON result documents written by the free-energy
//! protocol; writing produces the tab-separated summary table.

use std::io::Write;
use std::path::{Path, PathBuf};

pub mod error;

mod json;
mod tsv;

pub use error::Error;
pub use tsv::writer::{HEADER as TSV_HEADER, format_rounded};

use crate::model::edge::DdgRow;
use crate::model::result::ResultDocument;

/// Lists the `*.json` files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] if `dir` does not exist or is not a
/// directory, and [`Error::Io`] if it cannot be read.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    json::reader::list_json_files(dir)
}

/// Loads one result document.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened and [`Error::Json`] if
/// it is not valid JSON or the consumed fields have an unexpected shape.
pub fn read_document(path: &Path) -> Result<ResultDocument, Error> {
    json::reader::read_document(path)
}

/// Writes the DDG table as tab-separated values with `\n` line endings.
///
/// `decimals` controls rounding of the DDG and uncertainty columns.
pub fn write_tsv<W: Write>(writer: W, rows: &[DdgRow], decimals: usize) -> Result<(), Error> {
    tsv::writer::write(writer, rows, decimals)
}
