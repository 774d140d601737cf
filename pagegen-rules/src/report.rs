//! Validation reporting
//!
//! Structures for representing and formatting rule-engine results.

use crate::catalog::RuleCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one rule evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleStatus {
    /// Rule fully satisfied
    Pass,
    /// Partially satisfied
    Partial,
    /// Not satisfied
    Fail,
}

impl RuleStatus {
    /// Score contribution of this status
    pub fn weight(&self) -> f64 {
        match self {
            Self::Pass => 1.0,
            Self::Partial => 0.5,
            Self::Fail => 0.0,
        }
    }
}

/// Result of evaluating one rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResult {
    /// Rule id this result belongs to
    pub rule_id: String,
    /// Pass, partial, or fail
    pub status: RuleStatus,
    /// Why the rule got this status
    pub reason: String,
    /// Suggested fix, when one exists
    #[serde(default)]
    pub recommendation: Option<String>,
    /// Evidence from the artifact backing the decision
    #[serde(default)]
    pub evidence: Option<String>,
}

impl RuleResult {
    /// A passing result
    pub fn pass(rule_id: &str, reason: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            status: RuleStatus::Pass,
            reason: reason.to_string(),
            recommendation: None,
            evidence: None,
        }
    }

    /// A partial result
    pub fn partial(rule_id: &str, reason: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            status: RuleStatus::Partial,
            reason: reason.to_string(),
            recommendation: None,
            evidence: None,
        }
    }

    /// A failing result
    pub fn fail(rule_id: &str, reason: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            status: RuleStatus::Fail,
            reason: reason.to_string(),
            recommendation: None,
            evidence: None,
        }
    }

    /// Attach a fix suggestion
    pub fn with_recommendation(mut self, recommendation: &str) -> Self {
        self.recommendation = Some(recommendation.to_string());
        self
    }

    /// Attach supporting evidence
    pub fn with_evidence(mut self, evidence: &str) -> Self {
        self.evidence = Some(evidence.to_string());
        self
    }
}

/// Compliance classification for the whole artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compliance {
    /// Meets the base threshold with no mandatory failures
    Compliant,
    /// Below the base threshold but salvageable
    NeedsImprovement,
    /// Mandatory failure or score below the floor
    NonCompliant,
}

/// Aggregated results for one rule category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResult {
    /// `(pass + 0.5*partial) / rule_count` for this category
    pub score: f64,
    /// Per-rule results in catalog order
    pub results: Vec<RuleResult>,
}

/// Counts across all rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Rules evaluated
    pub total_rules: usize,
    /// Rules that passed
    pub passed_rules: usize,
    /// Rules that partially passed
    pub partial_rules: usize,
    /// Ids of mandatory rules that failed
    pub mandatory_failures: Vec<String>,
}

/// Complete scoring-engine output for one artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Weighted rule score, 0-100
    pub overall_score: u32,
    /// No mandatory failures and score at or above the gate threshold
    pub passed: bool,
    /// Compliance classification
    pub compliance: Compliance,
    /// Per-category results, ordered for determinism
    pub categories: BTreeMap<RuleCategory, CategoryResult>,
    /// Aggregate counts
    pub summary: ValidationSummary,
    /// Blocking issues surfaced to the caller
    pub critical_issues: Vec<String>,
    /// Fix suggestions collected from rule results
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    /// Categories containing at least one failed rule
    pub fn failed_categories(&self) -> Vec<RuleCategory> {
        self.categories
            .iter()
            .filter(|(_, c)| c.results.iter().any(|r| r.status == RuleStatus::Fail))
            .map(|(cat, _)| *cat)
            .collect()
    }

    /// Format as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Validation: {} ({:?}, passed: {})\n",
            self.overall_score, self.compliance, self.passed
        ));
        output.push_str(&format!(
            "Rules: {} total, {} passed, {} partial\n",
            self.summary.total_rules, self.summary.passed_rules, self.summary.partial_rules
        ));
        for (category, result) in &self.categories {
            output.push_str(&format!("  {}: {:.2}\n", category, result.score));
        }
        if !self.summary.mandatory_failures.is_empty() {
            output.push_str(&format!(
                "Mandatory failures: {}\n",
                self.summary.mandatory_failures.join(", ")
            ));
        }
        for issue in &self.critical_issues {
            output.push_str(&format!("  ! {}\n", issue));
        }
        output
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_weights() {
        assert_eq!(RuleStatus::Pass.weight(), 1.0);
        assert_eq!(RuleStatus::Partial.weight(), 0.5);
        assert_eq!(RuleStatus::Fail.weight(), 0.0);
    }

    #[test]
    fn test_result_builders() {
        let result = RuleResult::fail("core_navigation", "no nav element")
            .with_recommendation("add a nav element with links")
            .with_evidence("0 nav tags found");
        assert_eq!(result.status, RuleStatus::Fail);
        assert!(result.recommendation.is_some());
        assert!(result.evidence.is_some());
    }

    #[test]
    fn test_status_serializes_screaming() {
        let json = serde_json::to_string(&RuleStatus::Partial).unwrap();
        assert_eq!(json, "\"PARTIAL\"");
        let json = serde_json::to_string(&Compliance::NonCompliant).unwrap();
        assert_eq!(json, "\"NON_COMPLIANT\"");
    }
}
