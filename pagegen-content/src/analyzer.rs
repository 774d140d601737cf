//! Content-utilization analyzer
//!
//! Pure function over (content payload, artifact text). Extraction walks the
//! fixed section shapes; each element then runs through the matching cascade,
//! with label/value linkage applied as the final step.

use crate::element::{extract_elements, ContentElement, ElementKind, Priority, StatField};
use crate::matcher::{ArtifactMatcher, MatchStrategy};
use crate::report::UtilizationReport;
use pagegen_core::types::ContentPayload;
use std::collections::{HashMap, HashSet};

/// Sections with more than this many missing elements get a section-level
/// recommendation.
const SECTION_MISSING_LIMIT: usize = 2;

/// Analyzer configured with the utilization gate threshold
#[derive(Debug, Clone)]
pub struct UtilizationAnalyzer {
    threshold: f64,
}

impl UtilizationAnalyzer {
    /// Analyzer with the default 0.80 gate
    pub fn new() -> Self {
        Self { threshold: 0.80 }
    }

    /// Analyzer with a custom gate threshold
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Analyze how much of the payload is present in the artifact
    pub fn analyze(&self, payload: &ContentPayload, artifact: &str) -> UtilizationReport {
        let elements = extract_elements(payload);
        if elements.is_empty() {
            return UtilizationReport::empty();
        }

        let matcher = ArtifactMatcher::new(artifact);
        let mut used: Vec<bool> = Vec::with_capacity(elements.len());
        let mut used_stat_values: HashSet<usize> = HashSet::new();

        for element in &elements {
            let strategy = matcher.match_content(&element.content);
            if strategy.is_some() {
                if let ElementKind::Stat { index, field: StatField::Value } = element.kind {
                    used_stat_values.insert(index);
                }
            }
            used.push(strategy.is_some());
        }

        // 5. Label/value linkage: a stat label counts as used if its paired
        //    value (same index) was referenced anywhere.
        for (i, element) in elements.iter().enumerate() {
            if used[i] {
                continue;
            }
            if let ElementKind::Stat { index, field: StatField::Label } = element.kind {
                if used_stat_values.contains(&index) {
                    used[i] = true;
                    tracing::debug!(
                        element = %element.kind.describe(),
                        strategy = ?MatchStrategy::LabelLinkage,
                        "label linked through its value"
                    );
                }
            }
        }

        let total_elements = elements.len();
        let used_elements = used.iter().filter(|u| **u).count();
        let missing_elements: Vec<ContentElement> = elements
            .into_iter()
            .zip(used.iter())
            .filter(|(_, u)| !**u)
            .map(|(e, _)| e)
            .collect();

        let critical_missing: Vec<ContentElement> = missing_elements
            .iter()
            .filter(|e| e.priority == Priority::Critical || e.kind.is_critical_type())
            .cloned()
            .collect();

        let recommendations = build_recommendations(&missing_elements, &critical_missing);
        let utilization_rate = used_elements as f64 / total_elements as f64;

        UtilizationReport {
            total_elements,
            used_elements,
            missing_elements,
            critical_missing,
            utilization_rate,
            recommendations,
            passed: utilization_rate >= self.threshold,
        }
    }
}

impl Default for UtilizationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_recommendations(
    missing: &[ContentElement],
    critical: &[ContentElement],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for element in critical {
        recommendations.push(format!(
            "Include the supplied {} (\"{}\") in the artifact",
            element.kind.describe(),
            truncate(&element.content, 40)
        ));
    }

    let mut per_section: HashMap<&'static str, usize> = HashMap::new();
    for element in missing {
        *per_section.entry(element.kind.section()).or_insert(0) += 1;
    }
    let mut sections: Vec<_> =
        per_section.into_iter().filter(|(_, n)| *n > SECTION_MISSING_LIMIT).collect();
    sections.sort();
    for (section, count) in sections {
        recommendations
            .push(format!("The {} section is dropping {} supplied elements", section, count));
    }

    recommendations
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}
