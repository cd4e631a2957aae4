use serde::{Deserialize, Serialize};

/// Probability bands, lower bound inclusive. FROZEN alongside the model:
/// the thresholds were tuned on the validation split of the training run.
pub const INCOMPATIBLE_BELOW: f64 = 0.42;
pub const LOW_RISK_FROM: f64 = 0.80;

/// Compatibility verdict reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compatibility {
    Compatible,
    Incompatible,
}

impl Compatibility {
    pub fn label(&self) -> &'static str {
        match self {
            Compatibility::Compatible => "Compatible",
            Compatibility::Incompatible => "Incompatible",
        }
    }
}

/// Incompatibility risk band derived from the classifier probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Maps P(compatible) through the frozen bands. Out-of-range input is a
/// contract violation by the classifier capability and is not clamped here.
pub fn decide(p_compatible: f64) -> (Compatibility, RiskLevel) {
    if p_compatible < INCOMPATIBLE_BELOW {
        (Compatibility::Incompatible, RiskLevel::High)
    } else if p_compatible < LOW_RISK_FROM {
        (Compatibility::Compatible, RiskLevel::Medium)
    } else {
        (Compatibility::Compatible, RiskLevel::Low)
    }
}
