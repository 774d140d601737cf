//! Pipeline configuration
//!
//! Every threshold the scheduler, loop controller, and scorers consult lives
//! here so nothing is hardcoded into algorithmic logic. `max_attempts` is the
//! single shared attempt budget used by both the stopping policy and the
//! guidance generator.

use serde::{Deserialize, Serialize};

/// Thresholds and budgets for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Adjusted score the convergence loop must reach (0-100)
    #[serde(default = "default_passing_gate")]
    pub passing_gate: f64,
    /// Rule score required for a `Compliant` classification (0-100)
    #[serde(default = "default_rule_base_threshold")]
    pub rule_base_threshold: f64,
    /// Minimum content utilization rate (0.0-1.0)
    #[serde(default = "default_utilization_threshold")]
    pub utilization_threshold: f64,
    /// Maximum refine/score attempts in the convergence loop
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl PipelineConfig {
    /// Create a config with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence gate threshold
    pub fn with_passing_gate(mut self, gate: f64) -> Self {
        self.passing_gate = gate;
        self
    }

    /// Set the rule-engine base threshold
    pub fn with_rule_base_threshold(mut self, threshold: f64) -> Self {
        self.rule_base_threshold = threshold;
        self
    }

    /// Set the content-utilization gate
    pub fn with_utilization_threshold(mut self, threshold: f64) -> Self {
        self.utilization_threshold = threshold;
        self
    }

    /// Set the loop attempt budget
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            passing_gate: default_passing_gate(),
            rule_base_threshold: default_rule_base_threshold(),
            utilization_threshold: default_utilization_threshold(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_passing_gate() -> f64 {
    75.0
}

fn default_rule_base_threshold() -> f64 {
    85.0
}

fn default_utilization_threshold() -> f64 {
    0.80
}

fn default_max_attempts() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.passing_gate, 75.0);
        assert_eq!(config.rule_base_threshold, 85.0);
        assert_eq!(config.utilization_threshold, 0.80);
        assert_eq!(config.max_attempts, 2);
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::new().with_passing_gate(80.0).with_max_attempts(3);
        assert_eq!(config.passing_gate, 80.0);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PipelineConfig = serde_json::from_str(r#"{"passing_gate": 70.0}"#).unwrap();
        assert_eq!(config.passing_gate, 70.0);
        assert_eq!(config.max_attempts, 2);
    }
}
