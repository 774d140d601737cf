//! Rule-based scoring engine
//!
//! Evaluates an artifact against the rule catalog. Scoring the same artifact
//! twice against the same catalog yields an identical report: the artifact is
//! parsed once, rules run in catalog order, and categories are kept ordered.

use crate::artifact::ParsedArtifact;
use crate::catalog::{RuleCatalog, RuleCategory};
use crate::detectors::{detector_for, generic_keyword_detector};
use crate::report::{
    CategoryResult, Compliance, RuleResult, RuleStatus, ValidationReport, ValidationSummary,
};
use std::collections::BTreeMap;

/// Score floor below which the artifact is non-compliant even without
/// mandatory failures.
const NON_COMPLIANT_FLOOR: f64 = 60.0;

/// The scoring engine
#[derive(Debug, Clone)]
pub struct RuleEngine {
    catalog: RuleCatalog,
    /// Threshold for the report-level `passed` flag (the loop gate)
    gate_threshold: f64,
    /// Threshold for the `Compliant` classification
    base_threshold: f64,
}

impl RuleEngine {
    /// Engine over the builtin catalog with default thresholds
    pub fn new() -> Self {
        Self::with_catalog(RuleCatalog::builtin())
    }

    /// Engine over an externally supplied catalog
    pub fn with_catalog(catalog: RuleCatalog) -> Self {
        Self { catalog, gate_threshold: 75.0, base_threshold: 85.0 }
    }

    /// Set the gate threshold consulted by `passed`
    pub fn with_gate_threshold(mut self, threshold: f64) -> Self {
        self.gate_threshold = threshold;
        self
    }

    /// Set the base threshold for the `Compliant` classification
    pub fn with_base_threshold(mut self, threshold: f64) -> Self {
        self.base_threshold = threshold;
        self
    }

    /// The catalog this engine evaluates
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Evaluate one artifact and produce a validation report
    pub fn evaluate(&self, artifact: &str) -> ValidationReport {
        let parsed = ParsedArtifact::parse(artifact);

        let mut by_category: BTreeMap<RuleCategory, Vec<RuleResult>> = BTreeMap::new();
        let mut mandatory_failures: Vec<String> = Vec::new();
        let mut critical_issues: Vec<String> = Vec::new();
        let mut recommendations: Vec<String> = Vec::new();

        for rule in self.catalog.rules() {
            let result = match detector_for(&rule.id) {
                Some(detector) => detector(&parsed, rule),
                None => generic_keyword_detector(&parsed, rule),
            };

            if result.status == RuleStatus::Fail {
                if rule.mandatory {
                    mandatory_failures.push(rule.id.clone());
                    critical_issues
                        .push(format!("Mandatory rule '{}' failed: {}", rule.id, result.reason));
                } else {
                    critical_issues.push(format!("Rule '{}' failed: {}", rule.id, result.reason));
                }
            }
            if let Some(rec) = &result.recommendation {
                recommendations.push(rec.clone());
            }

            by_category.entry(rule.category).or_default().push(result);
        }

        let categories: BTreeMap<RuleCategory, CategoryResult> = by_category
            .into_iter()
            .map(|(category, results)| {
                let score = results.iter().map(|r| r.status.weight()).sum::<f64>()
                    / results.len() as f64;
                (category, CategoryResult { score, results })
            })
            .collect();

        let total_rules = self.catalog.len();
        let passed_rules = categories
            .values()
            .flat_map(|c| &c.results)
            .filter(|r| r.status == RuleStatus::Pass)
            .count();
        let partial_rules = categories
            .values()
            .flat_map(|c| &c.results)
            .filter(|r| r.status == RuleStatus::Partial)
            .count();

        let weighted = passed_rules as f64 + partial_rules as f64 * 0.5;
        let overall_score = (weighted / total_rules as f64 * 100.0).round() as u32;

        let compliance = if !mandatory_failures.is_empty() {
            Compliance::NonCompliant
        } else if overall_score as f64 >= self.base_threshold {
            Compliance::Compliant
        } else if overall_score as f64 >= NON_COMPLIANT_FLOOR {
            Compliance::NeedsImprovement
        } else {
            Compliance::NonCompliant
        };

        let passed =
            mandatory_failures.is_empty() && overall_score as f64 >= self.gate_threshold;

        recommendations.dedup();

        ValidationReport {
            overall_score,
            passed,
            compliance,
            categories,
            summary: ValidationSummary {
                total_rules,
                passed_rules,
                partial_rules,
                mandatory_failures,
            },
            critical_issues,
            recommendations,
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
