use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};

use fep_extract::{
    DdgRow, MissingLegPolicy, aggregate_with, check_completeness, compute_ddg, discover,
    validate_with,
};

use crate::cli::Cli;
use crate::config::build_extract_config;
use crate::display::{
    Context as DisplayContext, Progress, print_ddg_table, print_run_summary,
    print_validation_report,
};
use crate::io::TableSink;

const TOTAL_STEPS: u8 = 5;

pub fn run_extract(cli: Cli, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);
    let mut stdout = BufWriter::new(io::stdout().lock());
    let result = run_steps(&cli, ctx, &mut progress, &mut stdout).and_then(|rows| {
        stdout.flush().context("Failed to flush stdout")?;
        Ok(rows)
    });

    match result {
        Ok(rows) => {
            progress.finish(rows);
            Ok(())
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}

/// Runs every stage; the validation report and a `-o -` table go to `stdout`.
///
/// When the table itself is written to `stdout`, the report is sent to stderr
/// so the TSV stays parseable.
fn run_steps(
    cli: &Cli,
    ctx: DisplayContext,
    progress: &mut Progress,
    stdout: &mut dyn Write,
) -> Result<usize> {
    let config = build_extract_config(&cli.repeats, &cli.output);

    progress.step("Collecting result files");
    let found = discover(&config).context("Failed to collect result files")?;
    let counts = found
        .repeats
        .iter()
        .map(|r| format!("{} → {} files", r.dir.display(), r.files.len()))
        .collect::<Vec<_>>();
    progress.complete_step("Collecting result files", &counts);

    progress.counted_step("Validating results", found.total_files());
    let report = validate_with(&found, |_| progress.advance());
    let table_on_stdout = cli.output.path().is_none();
    progress.suspend(|| {
        if table_on_stdout {
            print_validation_report(&mut io::stderr().lock(), &report);
        } else {
            print_validation_report(&mut *stdout, &report);
        }
    });

    let skipped = report.skipped.len();
    let set = report
        .into_result()
        .context("Validation of the result files failed")?;
    check_completeness(&set).context("Repeats are incomplete")?;

    let per_repeat = set.repeats.first().map_or(0, |r| r.files.len());

    let mut substeps = vec![format!("{} result file(s) per repeat", per_repeat)];
    if skipped > 0 {
        substeps.push(format!("{} setup/input file(s) skipped", skipped));
    }
    progress.complete_step("Validating results", &substeps);

    progress.counted_step("Averaging repeats", per_repeat);
    let table = aggregate_with(&set, |_| progress.advance())
        .context("Failed to aggregate repeat estimates")?;
    progress.complete_step(
        "Averaging repeats",
        &[format!("{} edge(s) from {} repeats", table.len(), set.repeats.len())],
    );

    if ctx.interactive {
        print_run_summary(&set, skipped, &table);
    }

    progress.step("Computing ΔΔG");
    let rows = compute_ddg(&table, config.missing_leg).context("Failed to compute DDG")?;
    progress.complete_step("Computing ΔΔG", &ddg_substeps(&rows, table.len(), config.missing_leg));

    if ctx.interactive {
        print_ddg_table(&rows, config.decimals);
    }

    progress.step("Writing table");
    let mut sink = TableSink::open(cli.output.path(), stdout)?;
    let label = sink.label();
    fep_extract::io::write_tsv(&mut sink, &rows, config.decimals)
        .with_context(|| format!("Failed to write DDG table to {}", label))?;
    progress.complete_step("Writing table", &[format!("Write TSV → {}", label)]);

    Ok(rows.len())
}

fn ddg_substeps(rows: &[DdgRow], edges: usize, policy: MissingLegPolicy) -> Vec<String> {
    let mut steps = vec!["ΔΔG = ΔG(complex) − ΔG(solvent)".to_string()];
    if policy == MissingLegPolicy::Skip && rows.len() < edges {
        steps.push(format!(
            "{} incomplete edge(s) skipped",
            edges - rows.len()
        ));
    }
    steps
}
