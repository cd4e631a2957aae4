//! Prediction core for drug-excipient compatibility screening.
//!
//! The crate turns a (drug name, excipient name, SMILES) triple into a
//! compatibility verdict with a structured rationale. Feature construction
//! is frozen against the layout the classifier was trained on; the
//! cheminformatics primitives and the classifier itself are capabilities
//! injected behind traits so deployments can swap implementations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
