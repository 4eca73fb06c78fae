use serde::Deserialize;
use thiserror::Error;

const KJ_PER_KCAL: f64 = 4.184;

/// A free-energy value as stored in a result document.
///
/// Upstream writers either emit a bare number or a unit-tagged object of the
/// form `{"magnitude": -5.0, "unit": "kilocalorie / mole", ...}`; extra codec
/// keys (`":is_custom:"`, `"__class__"`, `"pint_unit_registry"`) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Plain(f64),
    Tagged {
        magnitude: f64,
        #[serde(default)]
        unit: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("unsupported energy unit '{0}' (expected kcal/mol or kJ/mol)")]
    UnsupportedUnit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnergyUnit {
    KilocaloriePerMole,
    KilojoulePerMole,
}

impl EnergyUnit {
    fn parse(unit: &str) -> Option<Self> {
        let normalized: String = unit
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "kilocalorie/mole" | "kilocalorie_per_mole" | "kcal/mol" | "kcal/mole" => {
                Some(Self::KilocaloriePerMole)
            }
            "kilojoule/mole" | "kilojoule_per_mole" | "kj/mol" | "kj/mole" => {
                Some(Self::KilojoulePerMole)
            }
            _ => None,
        }
    }
}

impl Quantity {
    /// Raw magnitude, in whatever unit the document used.
    pub fn magnitude(&self) -> f64 {
        match self {
            Quantity::Plain(value) => *value,
            Quantity::Tagged { magnitude, .. } => *magnitude,
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            Quantity::Plain(_) => None,
            Quantity::Tagged { unit, .. } => unit.as_deref(),
        }
    }

    /// Magnitude converted to kcal/mol.
    ///
    /// Untagged values are assumed to already be in kcal/mol.
    pub fn kcal_per_mol(&self) -> Result<f64, QuantityError> {
        let Some(unit) = self.unit() else {
            return Ok(self.magnitude());
        };

        match EnergyUnit::parse(unit) {
            Some(EnergyUnit::KilocaloriePerMole) => Ok(self.magnitude()),
            Some(EnergyUnit::KilojoulePerMole) => Ok(self.magnitude() / KJ_PER_KCAL),
            None => Err(QuantityError::UnsupportedUnit(unit.to_string())),
        }
    }
}
