//! Template-avoidance scorer
//!
//! Catalog of known generic boilerplate signatures. Each match subtracts a
//! severity-weighted penalty from the gate score, pushing generated artifacts
//! away from stock output.

use crate::artifact::ParsedArtifact;
use serde::{Deserialize, Serialize};

/// One boilerplate signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatePattern {
    /// Stable pattern id
    pub id: String,
    /// What this signature looks like
    pub description: String,
    /// Lowercase fragments; any one appearing counts as a match
    pub needles: Vec<String>,
    /// Penalty subtracted when matched
    pub penalty: f64,
}

impl TemplatePattern {
    fn new(id: &str, description: &str, needles: &[&str], penalty: f64) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            needles: needles.iter().map(|s| s.to_string()).collect(),
            penalty,
        }
    }
}

/// A matched pattern in the scored artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMatch {
    /// Pattern id
    pub pattern_id: String,
    /// Penalty applied
    pub penalty: f64,
}

/// Result of the template-avoidance pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateScore {
    /// Total penalty, capped at 100
    pub penalty: f64,
    /// Patterns that matched
    pub matches: Vec<TemplateMatch>,
}

/// Scorer over an externally supplied pattern catalog
#[derive(Debug, Clone)]
pub struct TemplateScorer {
    patterns: Vec<TemplatePattern>,
}

impl TemplateScorer {
    /// Scorer with the builtin pattern catalog
    pub fn new() -> Self {
        Self { patterns: builtin_patterns() }
    }

    /// Scorer with a custom catalog
    pub fn with_patterns(patterns: Vec<TemplatePattern>) -> Self {
        Self { patterns }
    }

    /// Score the artifact; each matched pattern adds its penalty once
    pub fn score(&self, parsed: &ParsedArtifact) -> TemplateScore {
        let mut matches = Vec::new();
        let mut penalty = 0.0;
        for pattern in &self.patterns {
            if pattern.needles.iter().any(|n| parsed.lower.contains(n.as_str())) {
                penalty += pattern.penalty;
                matches
                    .push(TemplateMatch { pattern_id: pattern.id.clone(), penalty: pattern.penalty });
            }
        }
        TemplateScore { penalty: penalty.min(100.0), matches }
    }
}

impl Default for TemplateScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// The builtin boilerplate catalog
pub fn builtin_patterns() -> Vec<TemplatePattern> {
    vec![
        TemplatePattern::new(
            "gradient_boilerplate",
            "Stock purple-to-pink hero gradient",
            &[
                "from-purple-500 to-pink-500",
                "from-purple-600 to-pink-600",
                "from-blue-500 to-purple-600",
            ],
            30.0,
        ),
        TemplatePattern::new(
            "lorem_copy",
            "Lorem ipsum filler",
            &["lorem ipsum"],
            20.0,
        ),
        TemplatePattern::new(
            "generic_hero",
            "Generic welcome headline",
            &["welcome to our website", "your one-stop", "we are a company"],
            15.0,
        ),
        TemplatePattern::new(
            "emoji_bullets",
            "Emoji-decorated feature bullets",
            &["\u{1F680}", "\u{2728}", "\u{1F4A1}"],
            10.0,
        ),
        TemplatePattern::new(
            "stock_cta",
            "Stock call-to-action copy",
            &["get started today", "sign up now!"],
            8.0,
        ),
        TemplatePattern::new(
            "spacing_boilerplate",
            "Default spacing block repeated verbatim",
            &["px-4 py-2 rounded"],
            5.0,
        ),
    ]
}
