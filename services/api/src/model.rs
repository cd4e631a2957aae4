//! Classifier adapter: logistic scorer over coefficients exported from the
//! training run. The weights file is the one place the frozen feature
//! layout can actually be checked, so a coefficient-count mismatch refuses
//! to load instead of silently scoring garbage.

use serde::Deserialize;

use excipient_ai::workflows::compatibility::{
    CompatibilityModel, FeatureVector, ModelLoadError, FEATURE_VECTOR_LEN,
};

#[derive(Debug, Deserialize)]
struct ExportedWeights {
    bias: f64,
    weights: Vec<f64>,
}

pub(crate) struct LogisticCompatibilityModel {
    bias: f64,
    weights: Vec<f64>,
}

impl LogisticCompatibilityModel {
    pub(crate) fn from_path(path: &str) -> Result<Self, ModelLoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Read {
            path: path.to_string(),
            source,
        })?;

        let exported: ExportedWeights =
            serde_json::from_str(&raw).map_err(|source| ModelLoadError::Parse {
                path: path.to_string(),
                source,
            })?;

        if exported.weights.len() != FEATURE_VECTOR_LEN {
            return Err(ModelLoadError::LayoutMismatch {
                path: path.to_string(),
                expected: FEATURE_VECTOR_LEN,
                found: exported.weights.len(),
            });
        }

        Ok(Self {
            bias: exported.bias,
            weights: exported.weights,
        })
    }
}

impl CompatibilityModel for LogisticCompatibilityModel {
    fn predict_probability(&self, features: &FeatureVector) -> f64 {
        let logit: f64 = self.bias
            + self
                .weights
                .iter()
                .zip(features.values())
                .map(|(weight, value)| weight * value)
                .sum::<f64>();
        1.0 / (1.0 + (-logit).exp())
    }
}
