use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chem::ChemistryToolkit;
use super::decision::{decide, Compatibility, RiskLevel};
use super::excipients::category_label;
use super::explanation::compose;
use super::features::assemble;
use super::model::CompatibilityModel;
use super::normalizer::normalize_name;

/// One screening request as received from the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub drug_name: String,
    pub excipient_name: String,
    pub smiles: String,
}

/// Exactly one of the two shapes is ever produced, never a partial mix.
/// Serializes with a `status` discriminator so the transport layer and
/// frontend can branch on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PredictionResponse {
    Success {
        prediction: Compatibility,
        risk_level: RiskLevel,
        probability: f64,
        analysis_summary: String,
    },
    Error {
        message: String,
    },
}

/// Orchestrates the prediction pipeline over the injected capabilities.
///
/// Stateless apart from the shared read-only toolkit and model, so any
/// number of requests may run through one instance concurrently.
pub struct CompatibilityService<C, M> {
    toolkit: Arc<C>,
    model: Arc<M>,
}

impl<C, M> CompatibilityService<C, M>
where
    C: ChemistryToolkit + 'static,
    M: CompatibilityModel + 'static,
{
    pub fn new(toolkit: Arc<C>, model: Arc<M>) -> Self {
        Self { toolkit, model }
    }

    /// Runs one request through the full pipeline. Every failure is folded
    /// into the error-shaped response; this method never panics outward.
    pub fn predict(&self, request: &PredictionRequest) -> PredictionResponse {
        let drug_norm = normalize_name(&request.drug_name);
        let excipient_norm = normalize_name(&request.excipient_name);
        debug!(drug = %drug_norm, excipient = %excipient_norm, "assembling feature vector");

        let assembled =
            match assemble(self.toolkit.as_ref(), &request.smiles, &excipient_norm) {
                Ok(assembled) => assembled,
                Err(err) => {
                    return PredictionResponse::Error {
                        message: err.to_string(),
                    }
                }
            };

        let probability = self.model.predict_probability(&assembled.vector);
        let (prediction, risk_level) = decide(probability);

        let analysis_summary = compose(
            &request.drug_name,
            &request.excipient_name,
            category_label(&excipient_norm),
            &assembled.structural_flags,
            risk_level,
        );

        PredictionResponse::Success {
            prediction,
            risk_level,
            probability: round_to_millis(probability),
            analysis_summary,
        }
    }
}

/// Reported probabilities carry three decimal places, matching what the
/// model card documents.
fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
