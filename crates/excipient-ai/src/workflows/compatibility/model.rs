use super::features::FeatureVector;

/// Frozen classifier capability.
///
/// Implementations score a [`FeatureVector`] in the version-1 layout and
/// return the probability of the positive ("compatible") class. Scoring is
/// synchronous and in-process; an implementation that cannot be provisioned
/// fails at startup via [`ModelLoadError`], not per request.
pub trait CompatibilityModel: Send + Sync {
    fn predict_probability(&self, features: &FeatureVector) -> f64;
}

/// Startup-time failure to provision the classifier capability. Fatal: the
/// service refuses to come up without a scorable model.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("unable to read model weights from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model weights at {path} are not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "model weights at {path} carry {found} coefficients, feature layout requires {expected}"
    )]
    LayoutMismatch {
        path: String,
        expected: usize,
        found: usize,
    },
}
