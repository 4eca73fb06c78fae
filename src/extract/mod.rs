mod aggregate;
mod config;
mod ddg;
mod discover;
mod error;
mod stats;
mod strategy;
mod validate;

pub use aggregate::{aggregate, aggregate_with};
pub use config::{DEFAULT_DECIMALS, DEFAULT_REPEATS, ExtractConfig, MissingLegPolicy};
pub use ddg::compute_ddg;
pub use discover::{Repeat, RepeatSet, check_completeness, discover};
pub use error::Error;
pub use stats::summarize;
pub use strategy::parse_simulation_name;
pub use validate::{
    FlaggedFile, Problem, SkipReason, SkippedFile, ValidationReport, validate,
    validate_with,
};

use crate::model::edge::DdgRow;

pub fn extract(config: &ExtractConfig) -> Result<Vec<DdgRow>, Error> {
    let found = discover(config)?;

    let set = validate(&found).into_result()?;
    check_completeness(&set)?;

    let table = aggregate(&set)?;

    compute_ddg(&table, config.missing_leg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io;
    use crate::model::types::Leg;
    use crate::testing::{RepeatDirs, result_json};
    use serde_json::json;

    fn write_edge(dirs: &RepeatDirs, a: &str, b: &str, complex: [f64; 3], solvent: [f64; 3]) {
        for i in 0..3 {
            dirs.write_json(
                i,
                &format!("{a}_{b}_complex.json"),
                &result_json(a, b, Leg::Complex, complex[i]),
            );
            dirs.write_json(
                i,
                &format!("{a}_{b}_solvent.json"),
                &result_json(a, b, Leg::Solvent, solvent[i]),
            );
        }
    }

    #[test]
    fn one_row_per_edge() {
        let dirs = RepeatDirs::new(3);
        write_edge(&dirs, "lig_1", "lig_2", [-10.0, -10.2, -9.8], [-4.0, -4.1, -3.9]);
        write_edge(&dirs, "lig_2", "lig_3", [-8.0, -8.0, -8.0], [-5.0, -5.0, -5.0]);
        dirs.write_json(0, "network_setup.json", &json!({"__qualname__": "AlchemicalNetwork"}));

        let rows = extract(&dirs.config()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ligand_a, "lig_1");
        assert_eq!(rows[0].ligand_b, "lig_2");
        assert!((rows[0].ddg + 6.0).abs() < 1e-9);
        assert!((rows[1].ddg + 3.0).abs() < 1e-9);
        assert_eq!(rows[1].uncertainty, 0.0);

        let mut buf = Vec::new();
        io::write_tsv(&mut buf, &rows, DEFAULT_DECIMALS).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "lig_1\tlig_2\t-6.0\t0.18");
        assert_eq!(lines[2], "lig_2\tlig_3\t-3.0\t0.0");
    }

    #[test]
    fn missing_repeat_file_aborts_before_aggregation() {
        let dirs = RepeatDirs::new(3);
        write_edge(&dirs, "a", "b", [-1.0; 3], [-1.0; 3]);
        dirs.remove(2, "a_b_solvent.json");

        let err = extract(&dirs.config()).unwrap_err();
        match err {
            Error::MissingFiles { counts, missing } => {
                assert_eq!(counts, vec![2, 2, 1]);
                assert_eq!(missing, vec!["a_b_solvent.json".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_result_aborts_before_completeness_check() {
        let dirs = RepeatDirs::new(3);
        write_edge(&dirs, "a", "b", [-1.0; 3], [-1.0; 3]);
        dirs.write_json(1, "a_b_complex.json", &json!({"unit_results": {}, "estimate": null}));
        dirs.remove(2, "a_b_solvent.json");

        let err = extract(&dirs.config()).unwrap_err();
        assert!(matches!(err, Error::InvalidResults { files } if files.len() == 1));
    }

    #[test]
    fn directories_with_only_network_files_are_empty() {
        let dirs = RepeatDirs::new(3);
        for i in 0..3 {
            dirs.write_json(i, "network_setup.json", &json!({"__qualname__": "AlchemicalNetwork"}));
        }

        let err = extract(&dirs.config()).unwrap_err();
        assert!(matches!(err, Error::NoResultFiles { dirs } if dirs.len() == 3));
    }
}
