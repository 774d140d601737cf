//! Industry-specificity scorer
//!
//! Checks the artifact against a per-industry profile: required and forbidden
//! color families, required sections, and trust-signal keywords. Produces a
//! penalty the gate combinator weighs against the primary rule score.

use crate::artifact::ParsedArtifact;
use serde::{Deserialize, Serialize};

/// Penalty per forbidden color family found.
const FORBIDDEN_PALETTE_PENALTY: f64 = 8.0;
/// Penalty per required section missing.
const MISSING_SECTION_PENALTY: f64 = 5.0;
/// Penalty when no trust-signal keyword appears.
const NO_TRUST_SIGNAL_PENALTY: f64 = 6.0;

/// Expectations for one industry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryProfile {
    /// Industry key (lowercase), e.g. "dental"
    pub industry: String,
    /// Color families the palette should draw from
    #[serde(default)]
    pub required_palette: Vec<String>,
    /// Color families that clash with the industry
    #[serde(default)]
    pub forbidden_palette: Vec<String>,
    /// Sections any page in this industry needs
    #[serde(default)]
    pub required_sections: Vec<String>,
    /// Keywords signalling trustworthiness
    #[serde(default)]
    pub trust_keywords: Vec<String>,
}

/// Result of scoring one artifact against a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryScore {
    /// Total penalty (0 when no profile matched)
    pub penalty: f64,
    /// Required sections not found
    pub missing_sections: Vec<String>,
    /// Forbidden color families found
    pub palette_violations: Vec<String>,
    /// Trust keywords found
    pub trust_signals: Vec<String>,
}

impl IndustryScore {
    /// Neutral score for unknown industries
    pub fn neutral() -> Self {
        Self {
            penalty: 0.0,
            missing_sections: vec![],
            palette_violations: vec![],
            trust_signals: vec![],
        }
    }
}

/// Scorer over an externally supplied profile table
#[derive(Debug, Clone)]
pub struct IndustryScorer {
    profiles: Vec<IndustryProfile>,
}

impl IndustryScorer {
    /// Scorer with the builtin profile table
    pub fn new() -> Self {
        Self { profiles: builtin_profiles() }
    }

    /// Scorer with a custom profile table
    pub fn with_profiles(profiles: Vec<IndustryProfile>) -> Self {
        Self { profiles }
    }

    /// Score the artifact for the given industry; neutral when unknown
    pub fn score(&self, parsed: &ParsedArtifact, industry: &str) -> IndustryScore {
        let key = industry.to_lowercase();
        let Some(profile) = self.profiles.iter().find(|p| p.industry == key) else {
            return IndustryScore::neutral();
        };

        let palette_violations: Vec<String> = profile
            .forbidden_palette
            .iter()
            .filter(|family| parsed.has_class_containing(family.as_str()))
            .cloned()
            .collect();

        let missing_sections: Vec<String> = profile
            .required_sections
            .iter()
            .filter(|section| !parsed.lower.contains(section.as_str()))
            .cloned()
            .collect();

        let trust_signals: Vec<String> = profile
            .trust_keywords
            .iter()
            .filter(|keyword| parsed.lower.contains(keyword.as_str()))
            .cloned()
            .collect();

        let mut penalty = palette_violations.len() as f64 * FORBIDDEN_PALETTE_PENALTY
            + missing_sections.len() as f64 * MISSING_SECTION_PENALTY;
        if trust_signals.is_empty() && !profile.trust_keywords.is_empty() {
            penalty += NO_TRUST_SIGNAL_PENALTY;
        }

        IndustryScore { penalty, missing_sections, palette_violations, trust_signals }
    }
}

impl Default for IndustryScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// The builtin per-industry profile table
pub fn builtin_profiles() -> Vec<IndustryProfile> {
    let profile = |industry: &str,
                   required: &[&str],
                   forbidden: &[&str],
                   sections: &[&str],
                   trust: &[&str]| IndustryProfile {
        industry: industry.to_string(),
        required_palette: required.iter().map(|s| s.to_string()).collect(),
        forbidden_palette: forbidden.iter().map(|s| s.to_string()).collect(),
        required_sections: sections.iter().map(|s| s.to_string()).collect(),
        trust_keywords: trust.iter().map(|s| s.to_string()).collect(),
    };
    vec![
        profile(
            "dental",
            &["teal", "cyan", "sky", "blue"],
            &["red", "purple", "pink"],
            &["services", "contact"],
            &["insurance", "certified", "licensed", "appointment"],
        ),
        profile(
            "saas",
            &["indigo", "blue", "violet"],
            &["brown", "amber"],
            &["pricing", "features"],
            &["soc 2", "uptime", "trial", "security"],
        ),
        profile(
            "restaurant",
            &["amber", "orange", "red", "stone"],
            &["cyan", "lime"],
            &["menu", "hours"],
            &["reservation", "chef", "fresh", "local"],
        ),
        profile(
            "legal",
            &["slate", "navy", "blue", "gray"],
            &["pink", "lime", "orange"],
            &["practice", "contact"],
            &["bar association", "consultation", "confidential", "experience"],
        ),
        profile(
            "fitness",
            &["emerald", "lime", "orange", "zinc"],
            &["pastel"],
            &["classes", "membership"],
            &["trainer", "results", "community", "trial"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_industry_is_neutral() {
        let parsed = ParsedArtifact::parse("<main class=\"bg-red-500\"></main>");
        let score = IndustryScorer::new().score(&parsed, "aerospace");
        assert_eq!(score.penalty, 0.0);
    }

    #[test]
    fn test_forbidden_palette_penalized() {
        let parsed = ParsedArtifact::parse(
            r#"<main class="bg-red-500 text-purple-700">services contact insurance</main>"#,
        );
        let score = IndustryScorer::new().score(&parsed, "dental");
        assert_eq!(score.palette_violations, vec!["red", "purple"]);
        assert_eq!(score.penalty, 2.0 * FORBIDDEN_PALETTE_PENALTY);
    }

    #[test]
    fn test_missing_sections_and_trust() {
        let parsed = ParsedArtifact::parse(r#"<main class="bg-teal-500">hello</main>"#);
        let score = IndustryScorer::new().score(&parsed, "dental");
        assert_eq!(score.missing_sections, vec!["services", "contact"]);
        assert!(score.trust_signals.is_empty());
        assert_eq!(
            score.penalty,
            2.0 * MISSING_SECTION_PENALTY + NO_TRUST_SIGNAL_PENALTY
        );
    }

    #[test]
    fn test_clean_artifact_no_penalty() {
        let parsed = ParsedArtifact::parse(
            r#"<main class="bg-teal-600">our services, contact us, insurance accepted</main>"#,
        );
        let score = IndustryScorer::new().score(&parsed, "dental");
        assert_eq!(score.penalty, 0.0);
        assert_eq!(score.trust_signals, vec!["insurance"]);
    }
}
