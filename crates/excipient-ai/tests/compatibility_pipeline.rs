//! Integration scenarios for the compatibility prediction workflow.
//!
//! Scenarios exercise the public service facade and HTTP router the way a
//! deployment would: capabilities injected behind the public traits, no
//! reaching into private modules.

mod common {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::Arc;

    use excipient_ai::workflows::compatibility::{
        CanonicalStructure, ChemistryToolkit, CompatibilityModel, CompatibilityService,
        FeatureVector, MolecularDescriptors, PredictionRequest, StructureError,
        FINGERPRINT_BITS,
    };

    pub(super) const IBUPROFEN_SMILES: &str = "CC(C)Cc1ccc(cc1)C(C)C(=O)O";

    /// Single-molecule toolkit: knows ibuprofen, rejects everything else.
    pub(super) struct IbuprofenToolkit;

    impl ChemistryToolkit for IbuprofenToolkit {
        fn canonicalize(&self, smiles: &str) -> Result<CanonicalStructure, StructureError> {
            if smiles.trim() == IBUPROFEN_SMILES {
                Ok(CanonicalStructure::new(IBUPROFEN_SMILES.to_string()))
            } else {
                Err(StructureError::Unparseable(
                    "structure is not in the test registry".to_string(),
                ))
            }
        }

        fn fingerprint(&self, structure: &CanonicalStructure) -> Vec<u8> {
            let mut bits = vec![0u8; FINGERPRINT_BITS];
            for window in structure.as_str().as_bytes().windows(3) {
                let mut hasher = DefaultHasher::new();
                window.hash(&mut hasher);
                bits[(hasher.finish() as usize) % FINGERPRINT_BITS] = 1;
            }
            bits
        }

        fn descriptors(&self, _structure: &CanonicalStructure) -> MolecularDescriptors {
            MolecularDescriptors {
                molecular_weight: 206.28,
                log_p: 3.5,
                h_donors: 1,
                h_acceptors: 2,
                tpsa: 37.3,
                rotatable_bonds: 4,
                aromatic_rings: 1,
                heavy_atoms: 15,
            }
        }
    }

    pub(super) struct FixedModel(pub(super) f64);

    impl CompatibilityModel for FixedModel {
        fn predict_probability(&self, _features: &FeatureVector) -> f64 {
            self.0
        }
    }

    pub(super) fn service(
        probability: f64,
    ) -> CompatibilityService<IbuprofenToolkit, FixedModel> {
        CompatibilityService::new(Arc::new(IbuprofenToolkit), Arc::new(FixedModel(probability)))
    }

    pub(super) fn request(drug: &str, excipient: &str, smiles: &str) -> PredictionRequest {
        PredictionRequest {
            drug_name: drug.to_string(),
            excipient_name: excipient.to_string(),
            smiles: smiles.to_string(),
        }
    }
}

use common::{request, service, IBUPROFEN_SMILES};

#[test]
fn ibuprofen_magnesium_stearate_low_risk_contract() {
    let service = service(0.9);
    let response = service.predict(&request(
        "Ibuprofen",
        "Magnesium Stearate",
        IBUPROFEN_SMILES,
    ));

    let json = serde_json::to_value(&response).expect("serializes");
    assert_eq!(json["status"], "success");
    assert_eq!(json["prediction"], "Compatible");
    assert_eq!(json["risk_level"], "Low");
    assert_eq!(json["probability"], 0.9);

    let summary = json["analysis_summary"].as_str().expect("summary");
    assert_eq!(summary.split("\n\n").count(), 6);
    assert!(summary.ends_with("Confidence is high within the limits of available data."));
}

#[test]
fn error_result_is_the_only_failure_surface() {
    let service = service(0.9);
    let response = service.predict(&request("Mystery", "Lactose", "not-a-structure"));

    let json = serde_json::to_value(&response).expect("serializes");
    assert_eq!(json["status"], "error");
    assert!(!json["message"].as_str().expect("message").is_empty());
}

#[tokio::test]
async fn router_serves_the_prediction_endpoint() {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    let router = excipient_ai::workflows::compatibility::compatibility_router(Arc::new(
        service(0.9),
    ));

    let payload = serde_json::json!({
        "drug_name": "Ibuprofen",
        "excipient_name": "Magnesium Stearate",
        "smiles": IBUPROFEN_SMILES,
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/compatibility/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds");

    let response = router.oneshot(request).await.expect("router answers");
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(json["status"], "success");
    assert_eq!(json["risk_level"], "Low");
}
