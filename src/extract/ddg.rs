use tracing::warn;

use super::config::MissingLegPolicy;
use super::error::Error;
use super::stats;
use crate::model::edge::{DdgRow, EdgeTable};
use crate::model::types::Leg;

/// One row per edge: `complex - solvent`, in edge-table order.
pub fn compute_ddg(table: &EdgeTable, policy: MissingLegPolicy) -> Result<Vec<DdgRow>, Error> {
    let mut rows = Vec::with_capacity(table.len());

    for edge in table.iter() {
        let (Some(complex), Some(solvent)) = (edge.leg(Leg::Complex), edge.leg(Leg::Solvent))
        else {
            let absent = if edge.leg(Leg::Complex).is_none() {
                Leg::Complex
            } else {
                Leg::Solvent
            };
            match policy {
                MissingLegPolicy::Fail => return Err(Error::missing_leg(&edge.key, absent)),
                MissingLegPolicy::Skip => {
                    warn!("skipping {}: no {} leg", edge.key, absent);
                    continue;
                }
            }
        };

        let (ddg, uncertainty) = stats::ddg(complex, solvent);
        rows.push(DdgRow {
            ligand_a: edge.ligand_a.clone(),
            ligand_b: edge.ligand_b.clone(),
            ddg,
            uncertainty,
        });
    }

    Ok(rows)
}
