use tracing::info;

use crate::model::result::ResultDocument;
use crate::model::types::Leg;

const NAME_SEPARATOR: &str = " to ";
const REPEAT_SEPARATOR: &str = " repeat";
const LIGAND_COMPONENT: &str = "ligand";
const SOLVENT_COMPONENT: &str = "solvent";
const PROTEIN_COMPONENT: &str = "protein";
const TRAJECTORY_OUTPUT: &str = "nc";

/// A named way of reading `T` from a document. `extract` returns `None` when
/// the document does not carry what the strategy needs.
#[derive(Clone, Copy)]
pub struct Strategy<T> {
    pub label: &'static str,
    pub extract: fn(&ResultDocument) -> Option<T>,
}

/// Runs `strategies` in order and returns the first result.
pub fn first_match<T>(doc: &ResultDocument, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().enumerate().find_map(|(i, strategy)| {
        let value = (strategy.extract)(doc)?;
        if i > 0 {
            info!("used fallback strategy '{}'", strategy.label);
        }
        Some(value)
    })
}

pub const NAMING: [Strategy<(String, String)>; 2] = [
    Strategy {
        label: "small molecule components",
        extract: names_from_components,
    },
    Strategy {
        label: "simulation name",
        extract: names_from_unit_name,
    },
];

pub const TYPING: [Strategy<Leg>; 2] = [
    Strategy {
        label: "state A components",
        extract: leg_from_components,
    },
    Strategy {
        label: "trajectory output path",
        extract: leg_from_output_path,
    },
];

fn names_from_components(doc: &ResultDocument) -> Option<(String, String)> {
    let a = ligand_name(doc, "stateA")?;
    let b = ligand_name(doc, "stateB")?;
    Some((a, b))
}

fn ligand_name(doc: &ResultDocument, state: &str) -> Option<String> {
    let name = doc
        .state_components(state)?
        .get(LIGAND_COMPONENT)?
        .get("molprops")?
        .get("ofe-name")?
        .as_str()?;
    (!name.is_empty()).then(|| name.to_string())
}

fn names_from_unit_name(doc: &ResultDocument) -> Option<(String, String)> {
    let unit = doc.first_unit_result()?;
    parse_simulation_name(unit.name.as_deref()?)
}

/// Splits `"<ligA> to <ligB> repeat <n> generation <n>"` into the two ligand
/// names. Names may contain spaces or underscores.
pub fn parse_simulation_name(name: &str) -> Option<(String, String)> {
    let mut parts = name.split(NAME_SEPARATOR);
    let ligand_a = parts.next()?;
    let rest = parts.next()?;
    let ligand_b = rest.split(REPEAT_SEPARATOR).next()?;
    Some((ligand_a.to_string(), ligand_b.to_string()))
}

fn leg_from_components(doc: &ResultDocument) -> Option<Leg> {
    let components = doc.state_components("stateA")?;
    let leg = if !components.contains_key(SOLVENT_COMPONENT) {
        Leg::Vacuum
    } else if components.contains_key(PROTEIN_COMPONENT) {
        Leg::Complex
    } else {
        Leg::Solvent
    };
    Some(leg)
}

fn leg_from_output_path(doc: &ResultDocument) -> Option<Leg> {
    let unit = doc.first_unit_result()?;
    let path = unit.output_path(TRAJECTORY_OUTPUT)?;
    Leg::ALL.into_iter().find(|leg| path.contains(leg.label()))
}
