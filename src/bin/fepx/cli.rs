use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};

#[derive(Parser)]
#[command(
    name = "fepx",
    about = "Extract relative binding free energies (DDG) from repeated FEP results",
    long_about = "Reads the result JSON files of three repeat directories, checks that every \
                  transformation finished in every repeat, averages the estimates and writes \
                  DDG(i->j) = DG(complex) - DG(solvent) per ligand pair as a TSV table.",
    version,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    #[command(flatten)]
    pub repeats: RepeatOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub log: LogOptions,
}

/// One directory of result files per repeat.
#[derive(Args)]
#[command(next_help_heading = "Repeats")]
pub struct RepeatOptions {
    /// Directory with all result json files for repeat 0
    #[arg(
        long = "results_0",
        visible_alias = "results-0",
        value_name = "DIR",
        default_value = "results_0"
    )]
    pub results_0: PathBuf,

    /// Directory with all result json files for repeat 1
    #[arg(
        long = "results_1",
        visible_alias = "results-1",
        value_name = "DIR",
        default_value = "results_1"
    )]
    pub results_1: PathBuf,

    /// Directory with all result json files for repeat 2
    #[arg(
        long = "results_2",
        visible_alias = "results-2",
        value_name = "DIR",
        default_value = "results_2"
    )]
    pub results_2: PathBuf,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// TSV file for the DDG table ("-" for stdout)
    ///
    /// Columns: ligand names, DDG in kcal/mol as the mean across the three
    /// repeats, and the propagated standard deviation.
    #[arg(short, long, value_name = "FILE", default_value = "ddg.tsv")]
    pub output: PathBuf,

    /// Decimal places for DDG and uncertainty
    #[arg(long, value_name = "N", default_value = "2")]
    pub decimals: usize,

    /// Drop edges missing the complex or solvent leg instead of failing
    #[arg(long)]
    pub skip_incomplete: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Logging")]
pub struct LogOptions {
    /// Suppress banner, progress and summary tables (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v: info, -vv: debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl OutputOptions {
    /// `None` when the table goes to stdout.
    pub fn path(&self) -> Option<&std::path::Path> {
        if self.output.as_os_str() == "-" {
            None
        } else {
            Some(&self.output)
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
