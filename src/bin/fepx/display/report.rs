use std::io::{self, Write};

use fep_extract::{FlaggedFile, ValidationReport};

const RULE_WIDTH: usize = 80;

/// Prints skipped and flagged files to `out`, tracebacks included.
///
/// Nothing is printed for a clean report without skipped files.
pub fn print_validation_report(out: &mut dyn Write, report: &ValidationReport) {
    let _ = write_validation_report(out, report);
}

fn write_validation_report(out: &mut dyn Write, report: &ValidationReport) -> io::Result<()> {
    for skipped in &report.skipped {
        writeln!(
            out,
            "{} {}, removing from file list",
            skipped.path.display(),
            skipped.reason
        )?;
    }

    if report.flagged.is_empty() {
        return Ok(());
    }

    for flagged in &report.flagged {
        write_flagged(out, flagged)?;
    }

    writeln!(out, "Issues with these files; inspect the failed runs before extracting results")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    for flagged in &report.flagged {
        writeln!(out, "{}", flagged.path.display())?;
    }
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    out.flush()
}

fn write_flagged(out: &mut dyn Write, flagged: &FlaggedFile) -> io::Result<()> {
    writeln!(out, "{} {}", flagged.path.display(), flagged.problem)?;

    for failure in &flagged.failures {
        writeln!(out)?;
        writeln!(out, "{}:", failure.key)?;
        if let Some(traceback) = &failure.traceback {
            writeln!(out, "{}", traceback.trim_end())?;
        }
        if let Some(exception) = &failure.exception {
            writeln!(out, "{}", exception)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
