use serde::{Deserialize, Serialize};

/// Unique normalized textual form of a structure descriptor.
///
/// Two SMILES strings describing the same molecule must canonicalize to the
/// same value, and canonicalizing a canonical form returns it unchanged.
/// Only a [`ChemistryToolkit`] constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalStructure(String);

impl CanonicalStructure {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The eight continuous physicochemical descriptors, in the order they
/// occupy inside the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MolecularDescriptors {
    pub molecular_weight: f64,
    pub log_p: f64,
    pub h_donors: u32,
    pub h_acceptors: u32,
    pub tpsa: f64,
    pub rotatable_bonds: u32,
    pub aromatic_rings: u32,
    pub heavy_atoms: u32,
}

impl MolecularDescriptors {
    pub(crate) fn as_feature_values(&self) -> [f64; 8] {
        [
            self.molecular_weight,
            self.log_p,
            f64::from(self.h_donors),
            f64::from(self.h_acceptors),
            self.tpsa,
            f64::from(self.rotatable_bonds),
            f64::from(self.aromatic_rings),
            f64::from(self.heavy_atoms),
        ]
    }
}

/// Raised when the structure descriptor cannot be parsed. Terminal for the
/// request; there is nothing transient about a malformed molecule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("invalid SMILES: {0}")]
    Unparseable(String),
}

/// Cheminformatics capability the prediction core calls into.
///
/// `fingerprint` and `descriptors` take a [`CanonicalStructure`] this same
/// toolkit produced, so they are infallible; all parse failures surface
/// through `canonicalize`.
pub trait ChemistryToolkit: Send + Sync {
    /// Parses and canonicalizes a SMILES string, or rejects it.
    fn canonicalize(&self, smiles: &str) -> Result<CanonicalStructure, StructureError>;

    /// Circular substructure fingerprint, one 0/1 entry per bit.
    fn fingerprint(&self, structure: &CanonicalStructure) -> Vec<u8>;

    /// Continuous descriptor block for the canonical form.
    fn descriptors(&self, structure: &CanonicalStructure) -> MolecularDescriptors;
}
