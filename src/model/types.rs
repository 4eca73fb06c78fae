use std::fmt;

/// Simulation environment a free-energy leg was run in.
///
/// A relative binding free energy needs the [`Complex`](Leg::Complex) and
/// [`Solvent`](Leg::Solvent) legs of the same ligand pair. [`Vacuum`](Leg::Vacuum)
/// legs are recorded but never enter the DDG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Leg {
    Solvent,
    Complex,
    Vacuum,
}

impl Leg {
    /// All legs, in the order they are matched against free text.
    pub const ALL: [Leg; 3] = [Leg::Solvent, Leg::Complex, Leg::Vacuum];

    /// Lower-case label used in file paths and reports.
    pub fn label(self) -> &'static str {
        match self {
            Leg::Solvent => "solvent",
            Leg::Complex => "complex",
            Leg::Vacuum => "vacuum",
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leg_display_matches_label() {
        for leg in Leg::ALL {
            assert_eq!(leg.to_string(), leg.label());
        }
    }
}
