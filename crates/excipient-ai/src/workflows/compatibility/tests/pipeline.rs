use super::common::{request, service, CAFFEINE_SMILES, IBUPROFEN_SMILES};
use crate::workflows::compatibility::service::PredictionResponse;
use crate::workflows::compatibility::FALLBACK_CATEGORY_LABEL;

#[test]
fn end_to_end_low_risk_prediction() {
    let service = service(0.9);
    let response = service.predict(&request(
        "Ibuprofen",
        "Magnesium Stearate",
        IBUPROFEN_SMILES,
    ));

    let PredictionResponse::Success {
        prediction,
        risk_level,
        probability,
        analysis_summary,
    } = response
    else {
        panic!("expected success response");
    };

    assert_eq!(prediction.label(), "Compatible");
    assert_eq!(risk_level.label(), "Low");
    assert_eq!(probability, 0.9);
    assert_eq!(analysis_summary.split("\n\n").count(), 6);
    assert!(analysis_summary
        .ends_with("Confidence is high within the limits of available data."));
    assert!(analysis_summary.contains("Magnesium Stearate is classified as a lubricant excipient"));
}

#[test]
fn identical_inputs_yield_identical_results() {
    let service = service(0.61);
    let first = service.predict(&request("Ibuprofen", "Lactose (USP)", IBUPROFEN_SMILES));
    let second = service.predict(&request("Ibuprofen", "Lactose (USP)", IBUPROFEN_SMILES));
    assert_eq!(first, second);
}

#[test]
fn invalid_structure_becomes_an_error_result() {
    let service = service(0.9);
    let response = service.predict(&request("Mystery", "Lactose", "not-a-structure"));

    let PredictionResponse::Error { message } = response else {
        panic!("expected error response");
    };
    assert!(!message.is_empty());
    assert!(message.starts_with("invalid SMILES"));
}

#[test]
fn unknown_excipient_falls_back_to_the_generic_label() {
    let service = service(0.5);
    let response = service.predict(&request(
        "Ibuprofen",
        "Novel Coating Agent",
        IBUPROFEN_SMILES,
    ));

    let PredictionResponse::Success { analysis_summary, .. } = response else {
        panic!("expected success response");
    };
    assert!(analysis_summary.contains(FALLBACK_CATEGORY_LABEL));
}

#[test]
fn quiet_molecule_reports_the_no_motif_sentence() {
    let service = service(0.85);
    let response = service.predict(&request("Caffeine", "Mannitol", CAFFEINE_SMILES));

    let PredictionResponse::Success { analysis_summary, .. } = response else {
        panic!("expected success response");
    };
    assert!(analysis_summary
        .contains("no frequently observed high-risk structural motifs were prominent"));
}

#[test]
fn band_boundaries_survive_the_full_pipeline() {
    for (probability, expected_prediction, expected_risk) in [
        (0.419_999, "Incompatible", "High"),
        (0.42, "Compatible", "Medium"),
        (0.799_999, "Compatible", "Medium"),
        (0.80, "Compatible", "Low"),
    ] {
        let service = service(probability);
        let response = service.predict(&request("Ibuprofen", "Starch", IBUPROFEN_SMILES));
        let PredictionResponse::Success {
            prediction,
            risk_level,
            ..
        } = response
        else {
            panic!("expected success response");
        };
        assert_eq!(prediction.label(), expected_prediction);
        assert_eq!(risk_level.label(), expected_risk);
    }
}

#[test]
fn reported_probability_is_rounded_to_three_decimals() {
    let service = service(0.876_54);
    let response = service.predict(&request("Ibuprofen", "Starch", IBUPROFEN_SMILES));
    let PredictionResponse::Success { probability, .. } = response else {
        panic!("expected success response");
    };
    assert_eq!(probability, 0.877);
}
