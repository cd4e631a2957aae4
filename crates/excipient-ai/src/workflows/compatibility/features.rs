use super::chem::{ChemistryToolkit, StructureError};
use super::excipients::ExcipientFlagSet;
use super::flags::StructuralFlagSet;

/// Feature layout, version 1. FROZEN INTERFACE CONTRACT.
///
/// The classifier was trained on vectors laid out exactly as
/// `fingerprint ++ descriptors ++ structural flags ++ excipient flags`.
/// Reordering any segment silently corrupts every prediction; nothing
/// downstream can detect it. The only checkable point is the weights file,
/// whose coefficient count must equal [`FEATURE_VECTOR_LEN`].
pub const FINGERPRINT_BITS: usize = 1024;
pub const DESCRIPTOR_VALUES: usize = 8;
pub const STRUCTURAL_FLAG_VALUES: usize = 13;
pub const EXCIPIENT_FLAG_VALUES: usize = 7;

/// Total model input width: 1052.
pub const FEATURE_VECTOR_LEN: usize =
    FINGERPRINT_BITS + DESCRIPTOR_VALUES + STRUCTURAL_FLAG_VALUES + EXCIPIENT_FLAG_VALUES;

/// Fixed-width numeric input for the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Assembly output: the vector plus the intermediate structural flags,
/// which the explanation composer consumes separately.
#[derive(Debug, Clone)]
pub struct AssembledFeatures {
    pub vector: FeatureVector,
    pub structural_flags: StructuralFlagSet,
    pub excipient_flags: ExcipientFlagSet,
}

/// Builds the frozen-layout feature vector for one request.
///
/// Fails only when the toolkit rejects the SMILES; everything after
/// canonicalization is deterministic and total. The excipient name must
/// already be normalized by [`super::normalizer::normalize_name`].
pub fn assemble(
    toolkit: &dyn ChemistryToolkit,
    smiles: &str,
    normalized_excipient: &str,
) -> Result<AssembledFeatures, StructureError> {
    let canonical = toolkit.canonicalize(smiles)?;

    let fingerprint = toolkit.fingerprint(&canonical);
    let descriptors = toolkit.descriptors(&canonical);
    let structural_flags = StructuralFlagSet::extract(&canonical, &descriptors);
    let excipient_flags = ExcipientFlagSet::from_normalized_name(normalized_excipient);

    let mut values = Vec::with_capacity(FEATURE_VECTOR_LEN);
    values.extend(fingerprint.iter().map(|bit| f64::from(*bit)));
    values.extend(descriptors.as_feature_values());
    values.extend(structural_flags.as_feature_values());
    values.extend(excipient_flags.as_feature_values());
    debug_assert_eq!(values.len(), FEATURE_VECTOR_LEN);

    Ok(AssembledFeatures {
        vector: FeatureVector(values),
        structural_flags,
        excipient_flags,
    })
}
