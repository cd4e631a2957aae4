//! Drug-excipient compatibility prediction pipeline.
//!
//! Name/structure text flows through normalization, flag extraction, and
//! feature assembly into a frozen 1052-wide vector, is scored by the
//! injected classifier, and comes back out as a discrete verdict with a
//! templated analysis summary. Every table and threshold in this module
//! tree is frozen against the training run of the deployed model; edits
//! here desynchronize the feature layout silently rather than loudly.

pub mod chem;
pub(crate) mod decision;
pub mod excipients;
pub(crate) mod explanation;
pub mod features;
pub mod flags;
pub mod model;
pub mod normalizer;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use chem::{CanonicalStructure, ChemistryToolkit, MolecularDescriptors, StructureError};
pub use decision::{decide, Compatibility, RiskLevel};
pub use excipients::{classify_excipient, ExcipientFlagSet, FALLBACK_CATEGORY_LABEL};
pub use features::{AssembledFeatures, FeatureVector, FEATURE_VECTOR_LEN, FINGERPRINT_BITS};
pub use flags::StructuralFlagSet;
pub use model::{CompatibilityModel, ModelLoadError};
pub use normalizer::normalize_name;
pub use router::compatibility_router;
pub use service::{CompatibilityService, PredictionRequest, PredictionResponse};
