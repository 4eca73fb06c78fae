use std::collections::{BTreeMap, HashMap};

use super::types::Leg;

/// Mean and population standard deviation of one leg across repeats, in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegEstimate {
    pub mean: f64,
    pub std: f64,
}

/// A ligand-pair transformation and the legs simulated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub key: String,
    pub ligand_a: String,
    pub ligand_b: String,
    pub legs: BTreeMap<Leg, LegEstimate>,
}

impl Edge {
    pub fn key_for(ligand_a: &str, ligand_b: &str) -> String {
        format!("edge_{}_{}", ligand_a, ligand_b)
    }

    pub fn new(ligand_a: impl Into<String>, ligand_b: impl Into<String>) -> Self {
        let ligand_a = ligand_a.into();
        let ligand_b = ligand_b.into();
        Self {
            key: Self::key_for(&ligand_a, &ligand_b),
            ligand_a,
            ligand_b,
            legs: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn leg(&self, leg: Leg) -> Option<&LegEstimate> {
        self.legs.get(&leg)
    }
}

/// Per-run accumulator of edges, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    edges: Vec<Edge>,
    index: HashMap<String, usize>,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `estimate` for `leg` of the edge between the two ligands,
    /// creating the edge on first sight.
    ///
    /// Returns the estimate that was replaced, if the edge already had one for
    /// this leg.
    pub fn record(
        &mut self,
        ligand_a: &str,
        ligand_b: &str,
        leg: Leg,
        estimate: LegEstimate,
    ) -> Option<LegEstimate> {
        let key = Edge::key_for(ligand_a, ligand_b);
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.edges.push(Edge::new(ligand_a, ligand_b));
                self.index.insert(key, self.edges.len() - 1);
                self.edges.len() - 1
            }
        };
        self.edges[idx].legs.insert(leg, estimate)
    }

    pub fn get(&self, key: &str) -> Option<&Edge> {
        self.index.get(key).map(|&idx| &self.edges[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// One line of the output table.
#[derive(Debug, Clone, PartialEq)]
pub struct DdgRow {
    pub ligand_a: String,
    pub ligand_b: String,
    pub ddg: f64,
    pub uncertainty: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn est(mean: f64, std: f64) -> LegEstimate {
        LegEstimate { mean, std }
    }

    #[test]
    fn edge_key_joins_ligand_names() {
        assert_eq!(Edge::key_for("lig 1", "lig_2"), "edge_lig 1_lig_2");
    }

    #[test]
    fn record_creates_edges_in_first_seen_order() {
        let mut table = EdgeTable::new();
        table.record("b", "c", Leg::Solvent, est(-1.0, 0.1));
        table.record("a", "b", Leg::Complex, est(-2.0, 0.1));
        table.record("b", "c", Leg::Complex, est(-3.0, 0.1));

        let keys: Vec<_> = table.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["edge_b_c", "edge_a_b"]);
        assert_eq!(table.len(), 2);

        let edge = table.get("edge_b_c").unwrap();
        assert_eq!(edge.leg(Leg::Solvent), Some(&est(-1.0, 0.1)));
        assert_eq!(edge.leg(Leg::Complex), Some(&est(-3.0, 0.1)));
        assert!(edge.leg(Leg::Vacuum).is_none());
    }

    #[test]
    fn record_overwrites_same_leg_and_returns_previous() {
        let mut table = EdgeTable::new();
        assert!(table.record("a", "b", Leg::Solvent, est(-1.0, 0.1)).is_none());
        let previous = table.record("a", "b", Leg::Solvent, est(-4.0, 0.2));

        assert_eq!(previous, Some(est(-1.0, 0.1)));
        assert_eq!(
            table.get("edge_a_b").unwrap().leg(Leg::Solvent),
            Some(&est(-4.0, 0.2))
        );
    }
}
