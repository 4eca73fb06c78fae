//! Core data structures read from result documents and accumulated per run.
//!
//! - [`types`] – Simulation legs (solvent, complex, vacuum).
//! - [`quantity`] – Unit-tagged free-energy values and their conversion to kcal/mol.
//! - [`result`] – The consumed subset of a protocol result document.
//! - [`edge`] – Ligand-pair edges, per-leg estimates, and output rows.
//!
//! Documents ([`ResultDocument`]) are read once per file and reduced to
//! [`LegEstimate`]s on an [`EdgeTable`]; nothing in this module touches the
//! filesystem.
//!
//! [`ResultDocument`]: result::ResultDocument
//! [`LegEstimate`]: edge::LegEstimate
//! [`EdgeTable`]: edge::EdgeTable

pub mod edge;
pub mod quantity;
pub mod result;
pub mod types;
