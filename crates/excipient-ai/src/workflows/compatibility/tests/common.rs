use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::compatibility::chem::{
    CanonicalStructure, ChemistryToolkit, MolecularDescriptors, StructureError,
};
use crate::workflows::compatibility::features::FINGERPRINT_BITS;
use crate::workflows::compatibility::model::CompatibilityModel;
use crate::workflows::compatibility::service::{CompatibilityService, PredictionRequest};
use crate::workflows::compatibility::FeatureVector;

pub(super) const IBUPROFEN_SMILES: &str = "CC(C)Cc1ccc(cc1)C(C)C(=O)O";
pub(super) const DICLOFENAC_SODIUM_SMILES: &str =
    "O=C([O-])Cc1ccccc1Nc1c(Cl)cccc1Cl.[Na+]";
pub(super) const CAFFEINE_SMILES: &str = "Cn1cnc2c1c(=O)n(C)c(=O)n2C";

/// Table-backed toolkit: the registered SMILES are treated as already being
/// in canonical form, so canonicalization is the identity for them and a
/// rejection for everything else. Mirrors what a real toolkit guarantees
/// (idempotence) without dragging a cheminformatics stack into unit tests.
pub(super) struct TableToolkit;

fn registry(smiles: &str) -> Option<MolecularDescriptors> {
    match smiles {
        IBUPROFEN_SMILES => Some(MolecularDescriptors {
            molecular_weight: 206.28,
            log_p: 3.5,
            h_donors: 1,
            h_acceptors: 2,
            tpsa: 37.3,
            rotatable_bonds: 4,
            aromatic_rings: 1,
            heavy_atoms: 15,
        }),
        DICLOFENAC_SODIUM_SMILES => Some(MolecularDescriptors {
            molecular_weight: 318.13,
            log_p: 4.5,
            h_donors: 1,
            h_acceptors: 3,
            tpsa: 49.3,
            rotatable_bonds: 4,
            aromatic_rings: 2,
            heavy_atoms: 21,
        }),
        CAFFEINE_SMILES => Some(MolecularDescriptors {
            molecular_weight: 194.19,
            log_p: -0.07,
            h_donors: 0,
            h_acceptors: 6,
            tpsa: 58.4,
            rotatable_bonds: 0,
            aromatic_rings: 2,
            heavy_atoms: 14,
        }),
        _ => None,
    }
}

impl ChemistryToolkit for TableToolkit {
    fn canonicalize(&self, smiles: &str) -> Result<CanonicalStructure, StructureError> {
        let trimmed = smiles.trim();
        if registry(trimmed).is_some() {
            Ok(CanonicalStructure::new(trimmed.to_string()))
        } else {
            Err(StructureError::Unparseable(format!(
                "'{trimmed}' is not a molecule the test registry knows"
            )))
        }
    }

    fn fingerprint(&self, structure: &CanonicalStructure) -> Vec<u8> {
        let mut bits = vec![0u8; FINGERPRINT_BITS];
        let text = structure.as_str().as_bytes();
        for window in text.windows(3) {
            let mut hasher = DefaultHasher::new();
            window.hash(&mut hasher);
            bits[(hasher.finish() as usize) % FINGERPRINT_BITS] = 1;
        }
        bits
    }

    fn descriptors(&self, structure: &CanonicalStructure) -> MolecularDescriptors {
        registry(structure.as_str()).expect("descriptors only asked for canonical structures")
    }
}

/// Model stub answering a fixed probability regardless of input.
pub(super) struct FixedModel(pub(super) f64);

impl CompatibilityModel for FixedModel {
    fn predict_probability(&self, _features: &FeatureVector) -> f64 {
        self.0
    }
}

pub(super) fn service(probability: f64) -> CompatibilityService<TableToolkit, FixedModel> {
    CompatibilityService::new(Arc::new(TableToolkit), Arc::new(FixedModel(probability)))
}

pub(super) fn request(drug: &str, excipient: &str, smiles: &str) -> PredictionRequest {
    PredictionRequest {
        drug_name: drug.to_string(),
        excipient_name: excipient.to_string(),
        smiles: smiles.to_string(),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
