use serde::Deserialize;
use serde_json::{Map, Value};

use super::quantity::Quantity;

const NETWORK_QUALNAME: &str = "AlchemicalNetwork";
const TRANSFORMATION_QUALNAME: &str = "Transformation";
const FAILURE_PREFIX: &str = "ProtocolUnitFailure";

/// What a JSON file in a results directory turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A protocol result carrying unit results and estimates.
    Result,
    /// A serialized network definition (`network_setup.json`).
    Network,
    /// A serialized transformation used as simulation input.
    Transformation,
}

/// The subset of a free-energy protocol result document that this crate reads.
///
/// Everything is optional so that incomplete documents can still be loaded
/// and reported on by the validation pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultDocument {
    #[serde(rename = "__qualname__", default)]
    pub qualname: Option<String>,

    #[serde(default)]
    pub unit_results: Option<Map<String, Value>>,

    #[serde(default)]
    pub estimate: Option<Quantity>,

    #[serde(default)]
    pub uncertainty: Option<Quantity>,

    #[serde(default)]
    pub protocol_result: Option<Value>,
}

/// One entry of `unit_results`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitResult {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub outputs: Map<String, Value>,

    #[serde(default)]
    pub traceback: Option<String>,

    #[serde(default)]
    pub exception: Option<Value>,
}

/// Diagnostic text recorded by a failed protocol unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    pub key: String,
    pub traceback: Option<String>,
    pub exception: Option<String>,
}

impl ResultDocument {
    pub fn kind(&self) -> DocumentKind {
        match self.qualname.as_deref() {
            Some(NETWORK_QUALNAME) => DocumentKind::Network,
            Some(TRANSFORMATION_QUALNAME) => DocumentKind::Transformation,
            _ => DocumentKind::Result,
        }
    }

    #[inline]
    pub fn has_unit_results(&self) -> bool {
        self.unit_results.is_some()
    }

    #[inline]
    pub fn has_estimate(&self) -> bool {
        self.estimate.is_some() && self.uncertainty.is_some()
    }

    /// The first unit result, in document order.
    pub fn first_unit_result(&self) -> Option<UnitResult> {
        let value = self.unit_results.as_ref()?.values().next()?;
        UnitResult::deserialize(value).ok()
    }

    /// Traceback and exception text of every `ProtocolUnitFailure*` entry.
    pub fn unit_failures(&self) -> Vec<UnitFailure> {
        let Some(units) = &self.unit_results else {
            return Vec::new();
        };

        units
            .iter()
            .filter(|(key, _)| key.starts_with(FAILURE_PREFIX))
            .map(|(key, value)| {
                let unit = UnitResult::deserialize(value).unwrap_or_default();
                UnitFailure {
                    key: key.clone(),
                    traceback: unit.traceback,
                    exception: unit.exception.as_ref().map(exception_text),
                }
            })
            .collect()
    }

    /// `inputs` of the first protocol unit in `protocol_result.data`.
    pub fn protocol_inputs(&self) -> Option<&Value> {
        self.protocol_result
            .as_ref()?
            .get("data")?
            .as_object()?
            .values()
            .next()?
            .as_array()?
            .first()?
            .get("inputs")
    }

    /// Component mapping of one end state (`"stateA"` or `"stateB"`).
    pub fn state_components(&self, state: &str) -> Option<&Map<String, Value>> {
        self.protocol_inputs()?
            .get(state)?
            .get("components")?
            .as_object()
    }
}

impl UnitResult {
    /// Output path recorded under `key`, stored either as a string or as a
    /// `{"path": ...}` object.
    pub fn output_path(&self, key: &str) -> Option<&str> {
        match self.outputs.get(key)? {
            Value::String(path) => Some(path),
            Value::Object(obj) => obj.get("path")?.as_str(),
            _ => None,
        }
    }
}

fn exception_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .map(exception_text)
            .collect::<Vec<_>>()
            .join(": "),
        other => other.to_string(),
    }
}
