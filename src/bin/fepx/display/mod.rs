mod banner;
mod error;
mod progress;
mod report;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use report::print_validation_report;
pub use tables::{print_ddg_table, print_run_summary};

use crate::cli::LogOptions;

#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Banner, spinners and tables go to stderr.
    pub interactive: bool,
    /// Number of `-v` flags.
    pub verbosity: u8,
}

impl Context {
    pub fn from_options(opts: &LogOptions) -> Self {
        Self {
            interactive: !opts.quiet && crate::io::stderr_is_tty(),
            verbosity: opts.verbose,
        }
    }
}
