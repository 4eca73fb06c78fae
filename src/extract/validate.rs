use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::discover::{Repeat, RepeatSet};
use super::error::Error;
use crate::io;
use crate::model::result::{DocumentKind, UnitFailure};

/// Why a file was taken out of the file lists without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NetworkSetup,
    TransformationInput,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NetworkSetup => f.write_str("is a network setup file"),
            SkipReason::TransformationInput => f.write_str("is a transformation input file"),
        }
    }
}

/// Why a file was flagged as erroneous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// The file is not valid JSON or does not match the result schema.
    Unreadable(String),
    /// The document has no `unit_results`.
    NoUnitResults,
    /// `estimate` or `uncertainty` is missing or null.
    NoEstimate,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Unreadable(detail) => write!(f, "could not be read: {}", detail),
            Problem::NoUnitResults => f.write_str("has no unit results"),
            Problem::NoEstimate => f.write_str("has no estimate or uncertainty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedFile {
    pub path: PathBuf,
    pub problem: Problem,
    /// Failure tracebacks recorded by the protocol, if any.
    pub failures: Vec<UnitFailure>,
}

/// Outcome of checking every file of every repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Repeats with skipped files removed.
    pub set: RepeatSet,
    pub skipped: Vec<SkippedFile>,
    pub flagged: Vec<FlaggedFile>,
}

impl ValidationReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }

    /// The filtered repeats, or [`Error::InvalidResults`] if any file was
    /// flagged.
    pub fn into_result(self) -> Result<RepeatSet, Error> {
        if self.flagged.is_empty() {
            Ok(self.set)
        } else {
            Err(Error::InvalidResults {
                files: self.flagged.into_iter().map(|f| f.path).collect(),
            })
        }
    }
}

pub fn validate(set: &RepeatSet) -> ValidationReport {
    validate_with(set, |_| {})
}

/// Like [`validate`], calling `on_file` after each file is checked.
pub fn validate_with(set: &RepeatSet, mut on_file: impl FnMut(&Path)) -> ValidationReport {
    let mut skipped = Vec::new();
    let mut flagged = Vec::new();
    let mut repeats = Vec::with_capacity(set.repeats.len());

    for repeat in &set.repeats {
        let mut kept = Vec::with_capacity(repeat.files.len());

        for path in &repeat.files {
            match check_file(path) {
                Check::Result => kept.push(path.clone()),
                Check::Skip(reason) => {
                    debug!("{} {}, removing from file list", path.display(), reason);
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason,
                    });
                }
                Check::Flag(problem, failures) => {
                    debug!("{} {}", path.display(), problem);
                    kept.push(path.clone());
                    flagged.push(FlaggedFile {
                        path: path.clone(),
                        problem,
                        failures,
                    });
                }
            }
            on_file(path);
        }

        repeats.push(Repeat {
            dir: repeat.dir.clone(),
            files: kept,
        });
    }

    ValidationReport {
        set: RepeatSet { repeats },
        skipped,
        flagged,
    }
}

enum Check {
    Result,
    Skip(SkipReason),
    Flag(Problem, Vec<UnitFailure>),
}

fn check_file(path: &Path) -> Check {
    let doc = match io::read_document(path) {
        Ok(doc) => doc,
        Err(e) => return Check::Flag(Problem::Unreadable(error_detail(&e)), Vec::new()),
    };

    match doc.kind() {
        DocumentKind::Network => return Check::Skip(SkipReason::NetworkSetup),
        DocumentKind::Transformation => return Check::Skip(SkipReason::TransformationInput),
        DocumentKind::Result => {}
    }

    if !doc.has_unit_results() {
        return Check::Flag(Problem::NoUnitResults, Vec::new());
    }

    if !doc.has_estimate() {
        return Check::Flag(Problem::NoEstimate, doc.unit_failures());
    }

    Check::Result
}

fn error_detail(err: &io::Error) -> String {
    match err {
        io::Error::Json { source, .. } => source.to_string(),
        io::Error::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
