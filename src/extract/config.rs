//! Configuration types for DDG extraction.
//!
//! - [`ExtractConfig`] — Repeat directories and output settings
//! - [`MissingLegPolicy`] — What to do with edges lacking a complex or solvent leg

use std::path::PathBuf;

/// Number of repeats the command-line tool expects by default.
pub const DEFAULT_REPEATS: usize = 3;

/// Decimal places of the DDG and uncertainty columns.
pub const DEFAULT_DECIMALS: usize = 2;

/// Handling of edges that lack the complex or the solvent leg when DDGs are
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingLegPolicy {
    /// Abort the run with [`Error::MissingLeg`](super::Error::MissingLeg).
    #[default]
    Fail,

    /// Drop the edge from the output and log a warning.
    Skip,
}

/// Main configuration for a DDG extraction run.
///
/// # Examples
///
/// ```
/// use fep_extract::{ExtractConfig, MissingLegPolicy};
///
/// // results_0, results_1, results_2 in the working directory
/// let default = ExtractConfig::default();
/// assert_eq!(default.repeats.len(), 3);
///
/// let custom = ExtractConfig {
///     repeats: vec!["run_a".into(), "run_b".into()],
///     missing_leg: MissingLegPolicy::Skip,
///     ..Default::default()
/// };
/// assert_eq!(custom.decimals, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// One directory of result files per repeat. The first directory defines
    /// the set of edges; the others only contribute estimates.
    pub repeats: Vec<PathBuf>,

    /// Handling of edges missing a leg required for the DDG.
    pub missing_leg: MissingLegPolicy,

    /// Decimal places used when writing the table.
    pub decimals: usize,
}

impl ExtractConfig {
    /// Default repeat directory name for repeat `index` (`results_<index>`).
    pub fn default_repeat_dir(index: usize) -> PathBuf {
        PathBuf::from(format!("results_{}", index))
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            repeats: (0..DEFAULT_REPEATS)
                .map(Self::default_repeat_dir)
                .collect(),
            missing_leg: MissingLegPolicy::Fail,
            decimals: DEFAULT_DECIMALS,
        }
    }
}
