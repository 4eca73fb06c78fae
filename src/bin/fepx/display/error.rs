use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

const BOX_WIDTH: usize = 62;

pub fn print_error(err: &Error) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = write_error(&mut out, err);
}

fn write_error(out: &mut impl Write, err: &Error) -> io::Result<()> {
    let rule = "═".repeat(BOX_WIDTH);
    let divider = format!("   ╟{}╢", "─".repeat(BOX_WIDTH));

    writeln!(out)?;
    writeln!(out, "   ╔{}╗", rule)?;
    box_line(out, "  ✗ Error")?;
    writeln!(out, "{}", divider)?;
    for line in wrap(&err.to_string(), BOX_WIDTH - 3) {
        box_line(out, &format!("  {}", line))?;
    }

    for cause in err.chain().skip(1) {
        writeln!(out, "{}", divider)?;
        box_line(out, "  Caused by:")?;
        for line in wrap(&cause.to_string(), BOX_WIDTH - 5) {
            box_line(out, &format!("    {}", line))?;
        }
    }

    if let Some(hints) = HintCollector::collect(err) {
        writeln!(out, "{}", divider)?;
        box_line(out, "  Hints:")?;
        for hint in hints {
            for (i, line) in wrap(&hint, BOX_WIDTH - 7).iter().enumerate() {
                let bullet = if i == 0 { "•" } else { " " };
                box_line(out, &format!("    {} {}", bullet, line))?;
            }
        }
    }

    writeln!(out, "   ╚{}╝", rule)?;
    writeln!(out)
}

fn box_line(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "   ║{:<width$}║", text, width = BOX_WIDTH)
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_extract_hints(err);
        collector.collect_io_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_extract_hints(&mut self, err: &Error) {
        use fep_extract::ExtractError;

        let Some(extract_err) = err.downcast_ref::<ExtractError>() else {
            return;
        };

        self.mark_typed();

        match extract_err {
            ExtractError::Io(io_err) => self.add_io_error_hints(io_err),

            ExtractError::NoResultFiles { .. } => {
                self.add("Each repeat folder must contain the result .json files of one repeat");
                self.add("Point --results_0/1/2 at the folders written by `openfe quickrun`");
            }

            ExtractError::MissingFiles { missing, .. } => {
                self.add(format!(
                    "{} result file(s) are absent from at least one repeat",
                    missing.len()
                ));
                self.add("Rerun the unfinished transformations, or remove them from every repeat");
            }

            ExtractError::InvalidResults { .. } => {
                self.add("The report above lists each flagged file with its failure traceback");
                self.add("Rerun the failed transformations before extracting results");
            }

            ExtractError::NameExtraction { .. } => {
                self.add("Ligand names are read from the stateA/stateB ligand components");
                self.add("or from the unit name '<ligand_a> to <ligand_b> repeat ...'");
            }

            ExtractError::LegExtraction { .. } => {
                self.add("The leg is read from the protein/solvent components of the inputs");
                self.add("or from the simulation output path (.../<leg>/<pair>/simulation.nc)");
            }

            ExtractError::MissingEstimate { .. } => {
                self.add("A repeat file without an estimate usually means the run failed");
                self.add("Check that file's unit results for a ProtocolUnitFailure");
            }

            ExtractError::Quantity { .. } => {
                self.add("Estimates must be plain numbers or quantities in kcal/mol or kJ/mol");
            }

            ExtractError::MissingLeg { .. } => {
                self.add("Both the complex and solvent legs are needed to compute a DDG");
                self.add("Pass --skip-incomplete to leave such edges out of the table");
            }
        }
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use fep_extract::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();
        self.add_io_error_hints(io_err);
    }

    fn add_io_error_hints(&mut self, io_err: &fep_extract::io::Error) {
        use fep_extract::io::Error as IoError;

        match io_err {
            IoError::Io { source, .. } => self.collect_std_io_hints(source),

            IoError::NotADirectory(_) => {
                self.add("Repeat arguments must be folders, not result files");
            }

            IoError::Json { source, .. } => {
                if source.is_eof() {
                    self.add("The file ends early; the run may still be writing it");
                } else {
                    self.add(format!(
                        "Malformed JSON near line {}, column {}",
                        source.line(),
                        source.column()
                    ));
                }
            }

            IoError::Tsv(_) | IoError::Write(_) => {
                self.add("Check the output path and available disk space");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("Run fepx from the folder that holds results_0, results_1 and results_2");
                self.add("or pass each repeat folder explicitly");
            }
            ErrorKind::PermissionDenied => {
                self.add("The result folders or the output location are not accessible");
            }
            ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
                self.add("A result file looks truncated; was the run still writing it?");
            }
            ErrorKind::BrokenPipe => {
                self.add("The program reading the table exited early (e.g. `head`)");
            }
            _ => {
                self.add("Check the folder paths, permissions and free disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("One of the paths given on the command line does not exist");
        } else if msg.contains("permission denied") {
            self.add("Check permissions on the result folders and output file");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fep_extract::{ExtractError, Leg};

    #[test]
    fn missing_leg_suggests_skip_flag() {
        let err = Error::new(ExtractError::missing_leg("edge_a_b", Leg::Complex));
        let hints = HintCollector::collect(&err).unwrap();
        assert!(hints.iter().any(|h| h.contains("--skip-incomplete")));
    }

    #[test]
    fn context_does_not_hide_typed_hints() {
        let err = Error::new(ExtractError::NoResultFiles { dirs: Vec::new() })
            .context("failed to collect result files");
        let hints = HintCollector::collect(&err).unwrap();
        assert!(hints.iter().any(|h| h.contains("--results_0/1/2")));
    }

    #[test]
    fn untyped_errors_fall_back_to_message() {
        let err = anyhow::anyhow!("Permission denied");
        let hints = HintCollector::collect(&err).unwrap();
        assert!(hints[0].contains("permissions"));
    }

    #[test]
    fn box_lines_have_equal_width() {
        let err = Error::new(ExtractError::MissingFiles {
            counts: vec![2, 2, 1],
            missing: vec!["lig_1_lig_2_complex.json".to_string()],
        })
        .context("Repeats are incomplete");

        let mut buf = Vec::new();
        write_error(&mut buf, &err).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let widths: Vec<_> = text
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert!(text.contains("Caused by:"));
        assert!(text.contains("lig_1_lig_2_complex.json"));
    }
}
