use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::config::ExtractConfig;
use super::error::Error;
use crate::io;

/// Result files of one repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeat {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl Repeat {
    /// Path of `file_name` inside this repeat's directory.
    pub fn sibling(&self, file_name: &OsStr) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// The file lists of every repeat, in repeat order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatSet {
    pub repeats: Vec<Repeat>,
}

impl RepeatSet {
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.repeats.iter().map(|r| r.dir.clone()).collect()
    }

    pub fn file_counts(&self) -> Vec<usize> {
        self.repeats.iter().map(|r| r.files.len()).collect()
    }

    pub fn total_files(&self) -> usize {
        self.repeats.iter().map(|r| r.files.len()).sum()
    }
}

pub fn discover(config: &ExtractConfig) -> Result<RepeatSet, Error> {
    let mut repeats = Vec::with_capacity(config.repeats.len());
    for dir in &config.repeats {
        let files = io::list_json_files(dir)?;
        debug!("found {} json files in {}", files.len(), dir.display());
        repeats.push(Repeat {
            dir: dir.clone(),
            files,
        });
    }
    Ok(RepeatSet { repeats })
}

pub fn check_completeness(set: &RepeatSet) -> Result<(), Error> {
    if set.repeats.is_empty() || set.repeats.iter().any(|r| r.files.is_empty()) {
        return Err(Error::NoResultFiles { dirs: set.dirs() });
    }

    let mut occurrences: BTreeMap<String, usize> = BTreeMap::new();
    for repeat in &set.repeats {
        for file in &repeat.files {
            *occurrences.entry(file_name(file)).or_insert(0) += 1;
        }
    }

    let expected = set.repeats.len();
    let missing: Vec<String> = occurrences
        .into_iter()
        .filter(|(_, count)| *count < expected)
        .map(|(name, _)| name)
        .collect();

    if !missing.is_empty() {
        return Err(Error::MissingFiles {
            counts: set.file_counts(),
            missing,
        });
    }

    Ok(())
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RepeatDirs;

    fn set(files: &[&[&str]]) -> RepeatSet {
        RepeatSet {
            repeats: files
                .iter()
                .enumerate()
                .map(|(i, names)| Repeat {
                    dir: PathBuf::from(format!("results_{}", i)),
                    files: names
                        .iter()
                        .map(|n| PathBuf::from(format!("results_{}", i)).join(n))
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn discover_lists_each_repeat() {
        let dirs = RepeatDirs::new(3);
        for i in 0..3 {
            dirs.write_raw(i, "a.json", "{}");
            dirs.write_raw(i, "b.json", "{}");
        }
        dirs.write_raw(1, "notes.txt", "");

        let found = discover(&dirs.config()).unwrap();
        assert_eq!(found.repeats.len(), 3);
        assert_eq!(found.file_counts(), vec![2, 2, 2]);
        assert_eq!(found.total_files(), 6);
    }

    #[test]
    fn discover_fails_on_missing_directory() {
        let dirs = RepeatDirs::new(3);
        let mut config = dirs.config();
        config.repeats[2] = dirs.root().join("does_not_exist");

        let err = discover(&config).unwrap_err();
        assert!(matches!(err, Error::Io(crate::io::Error::NotADirectory(_))));
    }

    #[test]
    fn complete_set_passes() {
        let s = set(&[&["a.json", "b.json"], &["b.json", "a.json"], &["a.json", "b.json"]]);
        assert!(check_completeness(&s).is_ok());
    }

    #[test]
    fn file_absent_from_last_repeat_is_reported() {
        let s = set(&[&["a.json", "b.json"], &["a.json", "b.json"], &["a.json"]]);
        let err = check_completeness(&s).unwrap_err();
        match err {
            Error::MissingFiles { counts, missing } => {
                assert_eq!(counts, vec![2, 2, 1]);
                assert_eq!(missing, vec!["b.json".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_only_in_one_repeat_is_reported() {
        let s = set(&[&["a.json", "z.json"], &["a.json"], &["a.json"]]);
        let err = check_completeness(&s).unwrap_err();
        assert!(matches!(err, Error::MissingFiles { missing, .. } if missing == vec!["z.json"]));
    }

    #[test]
    fn empty_repeat_is_reported_with_all_dirs() {
        let s = set(&[&["a.json"], &[], &["a.json"]]);
        let err = check_completeness(&s).unwrap_err();
        match err {
            Error::NoResultFiles { dirs } => assert_eq!(dirs.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
