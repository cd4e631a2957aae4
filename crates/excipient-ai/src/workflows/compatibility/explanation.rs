use super::decision::RiskLevel;
use super::flags::StructuralFlagSet;

/// Sentence fragment(s) describing the high-risk motifs the extractor found.
/// Order follows the flag declaration order, not severity.
fn structural_cues(flags: &StructuralFlagSet) -> Vec<&'static str> {
    let mut cues = Vec::new();

    if flags.has_primary_amine {
        cues.push("amine-associated structural motifs are present");
    }
    if flags.has_carboxylic_acid {
        cues.push("acidic functional groups are present");
    }
    if flags.has_phenol {
        cues.push("phenolic structural motifs are present");
    }
    if flags.is_salt {
        cues.push("salt-form molecular characteristics are observed");
    }

    if cues.is_empty() {
        cues.push("no frequently observed high-risk structural motifs were prominent");
    }

    cues
}

fn risk_closing_line(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "Confidence is high within the limits of available data.",
        RiskLevel::Medium => "Moderate uncertainty suggests confirmatory testing.",
        RiskLevel::High => {
            "Elevated risk observed; laboratory compatibility testing is recommended."
        }
    }
}

/// Renders the six-paragraph analysis summary from fixed templates.
///
/// Deterministic string assembly only. The excipient name shown is the
/// caller's original spelling; the category label was resolved from the
/// normalized form upstream. The drug name is accepted for signature
/// stability but the frozen templates never mention it.
pub(crate) fn compose(
    _drug_name: &str,
    excipient_name: &str,
    category_label: &str,
    flags: &StructuralFlagSet,
    risk: RiskLevel,
) -> String {
    let cues = structural_cues(flags);

    let paragraphs = [
        "The prediction is based on learned molecular structure patterns of the drug and historical compatibility data."
            .to_string(),
        format!("Structural assessment indicates that {}.", cues.join(", ")),
        format!(
            "{excipient_name} is classified as a {category_label}, which shows formulation-dependent compatibility trends."
        ),
        format!(
            "Based on combined drug structure patterns and excipient category behavior, the model estimates a {} incompatibility risk for this combination.",
            risk.label().to_lowercase()
        ),
        "This is a data-driven risk assessment and does not replace experimental validation."
            .to_string(),
        risk_closing_line(risk).to_string(),
    ];

    paragraphs.join("\n\n")
}
