use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::io::error::Error;
use crate::model::edge::DdgRow;

pub const HEADER: [&str; 4] = [
    "ligand_i",
    "ligand_j",
    "DDG(i->j) (kcal/mol)",
    "uncertainty (kcal/mol)",
];

pub fn write<W: Write>(writer: W, rows: &[DdgRow], decimals: usize) -> Result<(), Error> {
    let mut tsv = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    tsv.write_record(HEADER)?;
    for row in rows {
        let ddg = format_rounded(row.ddg, decimals);
        let uncertainty = format_rounded(row.uncertainty, decimals);
        tsv.write_record([
            row.ligand_a.as_str(),
            row.ligand_b.as_str(),
            ddg.as_str(),
            uncertainty.as_str(),
        ])?;
    }

    tsv.flush()?;
    Ok(())
}

/// Rounds to `decimals` places and prints the shortest representation that
/// round-trips, keeping at least one fractional digit (`-6.0`, `0.22`).
pub fn format_rounded(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let rounded: f64 = fixed.parse().unwrap_or(value);
    format!("{:?}", rounded)
}
