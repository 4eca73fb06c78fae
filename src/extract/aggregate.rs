use std::path::Path;

use tracing::{debug, warn};

use super::discover::RepeatSet;
use super::error::Error;
use super::stats;
use super::strategy::{self, NAMING, TYPING};
use crate::io;
use crate::model::edge::EdgeTable;
use crate::model::result::ResultDocument;

/// Builds the edge table from the first repeat, averaging each file's estimate
/// with the same-named files of the other repeats.
///
/// Fails on the first file whose ligand names, leg or estimate cannot be read.
pub fn aggregate(set: &RepeatSet) -> Result<EdgeTable, Error> {
    aggregate_with(set, |_| {})
}

/// Like [`aggregate`], calling `on_file` after each file of the first repeat
/// has been combined with its siblings.
pub fn aggregate_with(
    set: &RepeatSet,
    mut on_file: impl FnMut(&Path),
) -> Result<EdgeTable, Error> {
    let mut table = EdgeTable::new();

    let Some((first, others)) = set.repeats.split_first() else {
        return Ok(table);
    };

    for path in &first.files {
        debug!("reading {}", path.display());
        let doc = io::read_document(path)?;

        let leg = strategy::first_match(&doc, &TYPING).ok_or_else(|| Error::LegExtraction {
            path: path.clone(),
        })?;
        let (ligand_a, ligand_b) =
            strategy::first_match(&doc, &NAMING).ok_or_else(|| Error::NameExtraction {
                path: path.clone(),
            })?;

        let mut estimates = Vec::with_capacity(set.repeats.len());
        estimates.push(estimate_kcal(&doc, path)?);

        let file_name = path.file_name().unwrap_or_default();
        for repeat in others {
            let sibling = repeat.sibling(file_name);
            debug!("reading {}", sibling.display());
            let sibling_doc = io::read_document(&sibling)?;
            estimates.push(estimate_kcal(&sibling_doc, &sibling)?);
        }

        on_file(path);

        let Some(summary) = stats::summarize(&estimates) else {
            continue;
        };

        if let Some(previous) = table.record(&ligand_a, &ligand_b, leg, summary) {
            warn!(
                "{} replaces the {} leg of edge {} -> {} (previous mean {:.2} kcal/mol)",
                path.display(),
                leg,
                ligand_a,
                ligand_b,
                previous.mean
            );
        }
    }

    Ok(table)
}

fn estimate_kcal(doc: &ResultDocument, path: &Path) -> Result<f64, Error> {
    let quantity = doc.estimate.as_ref().ok_or_else(|| Error::MissingEstimate {
        path: path.to_path_buf(),
    })?;
    quantity
        .kcal_per_mol()
        .map_err(|e| Error::quantity(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::discover::discover;
    use crate::model::types::Leg;
    use crate::testing::{RepeatDirs, result_json, unnamed_result_json};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn averages_estimates_across_repeats() {
        let dirs = RepeatDirs::new(3);
        for (i, dg) in [-5.0, -5.2, -4.8].into_iter().enumerate() {
            dirs.write_json(i, "ab_solvent.json", &result_json("a", "b", Leg::Solvent, dg));
        }

        let table = aggregate(&discover(&dirs.config()).unwrap()).unwrap();
        assert_eq!(table.len(), 1);

        let edge = table.get("edge_a_b").unwrap();
        assert_eq!(edge.ligand_a, "a");
        assert_eq!(edge.ligand_b, "b");
        let solvent = edge.leg(Leg::Solvent).unwrap();
        assert!(approx_eq(solvent.mean, -5.0, 1e-12));
        assert!(approx_eq(solvent.std, 0.163299, 1e-6));
    }

    #[test]
    fn groups_legs_under_one_edge() {
        let dirs = RepeatDirs::new(3);
        for i in 0..3 {
            dirs.write_json(i, "ab_complex.json", &result_json("a", "b", Leg::Complex, -10.0));
            dirs.write_json(i, "ab_solvent.json", &result_json("a", "b", Leg::Solvent, -4.0));
            dirs.write_json(i, "bc_solvent.json", &result_json("b", "c", Leg::Solvent, -1.0));
        }

        let table = aggregate(&discover(&dirs.config()).unwrap()).unwrap();
        let keys: Vec<_> = table.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["edge_a_b", "edge_b_c"]);
        assert_eq!(table.get("edge_a_b").unwrap().legs.len(), 2);
    }

    #[test]
    fn later_file_for_same_leg_wins() {
        let dirs = RepeatDirs::new(2);
        for i in 0..2 {
            dirs.write_json(i, "1.json", &result_json("a", "b", Leg::Solvent, -1.0));
            dirs.write_json(i, "2.json", &result_json("a", "b", Leg::Solvent, -2.0));
        }

        let table = aggregate(&discover(&dirs.config()).unwrap()).unwrap();
        let solvent = table.get("edge_a_b").unwrap().leg(Leg::Solvent).unwrap();
        assert_eq!(solvent.mean, -2.0);
    }

    #[test]
    fn unnamed_result_fails_name_extraction() {
        let dirs = RepeatDirs::new(1);
        dirs.write_json(0, "x.json", &unnamed_result_json(Leg::Complex, -3.0));

        let err = aggregate(&discover(&dirs.config()).unwrap()).unwrap_err();
        assert!(matches!(err, Error::NameExtraction { path } if path.ends_with("x.json")));
    }

    #[test]
    fn converts_kilojoule_estimates() {
        let dirs = RepeatDirs::new(1);
        let mut doc = result_json("a", "b", Leg::Solvent, 0.0);
        doc["estimate"] = serde_json::json!({"magnitude": -41.84, "unit": "kilojoule / mole"});
        dirs.write_json(0, "ab.json", &doc);

        let table = aggregate(&discover(&dirs.config()).unwrap()).unwrap();
        let solvent = table.get("edge_a_b").unwrap().leg(Leg::Solvent).unwrap();
        assert!(approx_eq(solvent.mean, -10.0, 1e-12));
    }
}
