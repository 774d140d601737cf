//! Canonical gate score
//!
//! The adjusted score is computed in exactly one place. The loop controller's
//! stopping decisions, the attempt history, and the final reported score all
//! read [`GateScore::adjusted`]; the raw rule score appears only inside the
//! validation report.

use crate::industry::IndustryScore;
use crate::report::ValidationReport;
use crate::template::TemplateScore;
use serde::{Deserialize, Serialize};

/// Weight of the template-avoidance penalty in the adjusted score.
pub const TEMPLATE_WEIGHT: f64 = 0.3;
/// Weight of the industry-specificity penalty in the adjusted score.
pub const INDUSTRY_WEIGHT: f64 = 0.2;

/// Combined gate decision for one scoring pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateScore {
    /// Raw rule-engine score
    pub rule_score: f64,
    /// Unweighted template penalty
    pub template_penalty: f64,
    /// Unweighted industry penalty
    pub industry_penalty: f64,
    /// Penalty-adjusted score, clamped to [0, 100]
    adjusted: f64,
    /// Rule gate: no mandatory failures, score at the gate threshold
    pub rule_gate_passed: bool,
    /// Adjusted gate: adjusted score at the gate threshold
    pub adjusted_gate_passed: bool,
    /// Content-utilization gate
    pub utilization_gate_passed: bool,
}

impl GateScore {
    /// Combine the three scoring passes against one gate threshold
    pub fn compute(
        report: &ValidationReport,
        template: &TemplateScore,
        industry: &IndustryScore,
        utilization_passed: bool,
        gate_threshold: f64,
    ) -> Self {
        let rule_score = report.overall_score as f64;
        let adjusted = (rule_score
            - TEMPLATE_WEIGHT * template.penalty
            - INDUSTRY_WEIGHT * industry.penalty)
            .clamp(0.0, 100.0);

        Self {
            rule_score,
            template_penalty: template.penalty,
            industry_penalty: industry.penalty,
            adjusted,
            rule_gate_passed: report.passed,
            adjusted_gate_passed: adjusted >= gate_threshold,
            utilization_gate_passed: utilization_passed,
        }
    }

    /// The canonical current score
    pub fn adjusted(&self) -> f64 {
        self.adjusted
    }

    /// Terminal pass: all three gates hold
    pub fn passed(&self) -> bool {
        self.rule_gate_passed && self.adjusted_gate_passed && self.utilization_gate_passed
    }
}
