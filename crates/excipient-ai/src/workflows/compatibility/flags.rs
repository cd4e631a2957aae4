use serde::{Deserialize, Serialize};

use super::chem::{CanonicalStructure, MolecularDescriptors};

/// Structural flag names in feature-vector order.
///
/// FROZEN: this ordering is part of the layout the classifier was trained
/// against (see [`super::features`]). It is not a display concern.
pub const STRUCTURAL_FLAG_ORDER: [&str; 13] = [
    "is_salt",
    "contains_cl",
    "contains_na",
    "contains_k",
    "contains_ca",
    "contains_br",
    "has_primary_amine",
    "has_secondary_amine",
    "has_carboxylic_acid",
    "has_phenol",
    "is_aromatic",
    "high_flexibility",
    "high_mw",
];

/// Thirteen chemical-property flags derived from the canonical structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuralFlagSet {
    pub is_salt: bool,
    pub contains_cl: bool,
    pub contains_na: bool,
    pub contains_k: bool,
    pub contains_ca: bool,
    pub contains_br: bool,
    pub has_primary_amine: bool,
    pub has_secondary_amine: bool,
    pub has_carboxylic_acid: bool,
    pub has_phenol: bool,
    pub is_aromatic: bool,
    pub high_flexibility: bool,
    pub high_mw: bool,
}

impl StructuralFlagSet {
    /// Applies the frozen extraction rules: substring tests against the
    /// lower-cased canonical form, plus thresholds on externally computed
    /// descriptors. Inputs are always the canonical form, never the raw
    /// descriptor the caller submitted.
    pub fn extract(structure: &CanonicalStructure, descriptors: &MolecularDescriptors) -> Self {
        let smiles = structure.as_str().to_lowercase();

        Self {
            is_salt: smiles.contains('.'),
            contains_cl: smiles.contains("[cl"),
            contains_na: smiles.contains("[na"),
            contains_k: smiles.contains("[k"),
            contains_ca: smiles.contains("[ca"),
            contains_br: smiles.contains("[br"),
            // The two amine predicates overlap: a single-donor molecule sets
            // both. Known quirk of the training run; fixing it here would
            // desynchronize the vector from the frozen classifier.
            has_primary_amine: descriptors.h_donors > 0,
            has_secondary_amine: descriptors.h_donors == 1,
            has_carboxylic_acid: smiles.contains("c(=o)o") || smiles.contains("c(=o)[o-]"),
            has_phenol: smiles.contains("c1ccc(o)") || smiles.contains("c(o)"),
            is_aromatic: descriptors.aromatic_rings > 0,
            high_flexibility: descriptors.rotatable_bonds > 7,
            high_mw: descriptors.molecular_weight > 500.0,
        }
    }

    /// Flag values in [`STRUCTURAL_FLAG_ORDER`].
    pub fn as_feature_values(&self) -> [f64; 13] {
        [
            self.is_salt,
            self.contains_cl,
            self.contains_na,
            self.contains_k,
            self.contains_ca,
            self.contains_br,
            self.has_primary_amine,
            self.has_secondary_amine,
            self.has_carboxylic_acid,
            self.has_phenol,
            self.is_aromatic,
            self.high_flexibility,
            self.high_mw,
        ]
        .map(|flag| f64::from(u8::from(flag)))
    }
}
