use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

use crate::extract::ExtractConfig;
use crate::model::types::Leg;

/// Temporary `results_<i>` directories for pipeline tests.
pub struct RepeatDirs {
    root: TempDir,
    dirs: Vec<PathBuf>,
}

impl RepeatDirs {
    pub fn new(count: usize) -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let dirs: Vec<PathBuf> = (0..count)
            .map(|i| root.path().join(format!("results_{}", i)))
            .collect();
        for dir in &dirs {
            fs::create_dir(dir).expect("create repeat dir");
        }
        Self { root, dirs }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config(&self) -> ExtractConfig {
        ExtractConfig {
            repeats: self.dirs.clone(),
            ..Default::default()
        }
    }

    pub fn write_raw(&self, repeat: usize, name: &str, contents: &str) {
        fs::write(self.dirs[repeat].join(name), contents).expect("write fixture");
    }

    pub fn write_json(&self, repeat: usize, name: &str, value: &Value) {
        let text = serde_json::to_string_pretty(value).expect("serialize fixture");
        self.write_raw(repeat, name, &text);
    }

    pub fn remove(&self, repeat: usize, name: &str) {
        fs::remove_file(self.dirs[repeat].join(name)).expect("remove fixture");
    }
}

fn ligand_component(name: &str) -> Value {
    json!({
        "__module__": "gufe.components.smallmoleculecomponent",
        "__qualname__": "SmallMoleculeComponent",
        "atoms": [],
        "bonds": [],
        "conformer": null,
        "molprops": {"ofe-name": name}
    })
}

fn state_components(ligand: Value, leg: Leg) -> Value {
    let mut components = json!({"ligand": ligand});
    if leg != Leg::Vacuum {
        components["solvent"] = json!({"__qualname__": "SolventComponent"});
    }
    if leg == Leg::Complex {
        components["protein"] = json!({"__qualname__": "ProteinComponent"});
    }
    components
}

fn kcal(value: f64) -> Value {
    json!({
        ":is_custom:": true,
        "__class__": "Quantity",
        "__module__": "openff.units.units",
        "pint_unit_registry": "openff_units",
        "magnitude": value,
        "unit": "kilocalorie_per_mole"
    })
}

/// A complete protocol result for the `a -> b` transformation.
pub fn result_json(a: &str, b: &str, leg: Leg, estimate: f64) -> Value {
    json!({
        "estimate": kcal(estimate),
        "uncertainty": kcal(0.1),
        "protocol_settings": {},
        "protocol_result": {
            "__qualname__": "RelativeHybridTopologyProtocolResult",
            "data": {
                "unit-0": [{
                    "name": format!("{a} to {b} repeat 0 generation 0"),
                    "inputs": {
                        "stateA": {"components": state_components(ligand_component(a), leg)},
                        "stateB": {"components": state_components(ligand_component(b), leg)}
                    },
                    "outputs": {}
                }]
            }
        },
        "unit_results": {
            "ProtocolUnitResult-0": {
                "name": format!("{a} to {b} repeat 0 generation 0"),
                "outputs": {
                    "nc": {"path": format!("/shared/{}/{a}_{b}/simulation.nc", leg)}
                }
            }
        }
    })
}

/// A result whose ligand names cannot be recovered by any strategy.
pub fn unnamed_result_json(leg: Leg, estimate: f64) -> Value {
    json!({
        "estimate": kcal(estimate),
        "uncertainty": kcal(0.1),
        "protocol_result": {"data": {}},
        "unit_results": {
            "ProtocolUnitResult-0": {
                "outputs": {"nc": format!("/shared/{}/simulation.nc", leg)}
            }
        }
    })
}
