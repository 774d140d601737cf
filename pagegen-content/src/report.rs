//! Utilization reporting

use crate::element::ContentElement;
use serde::{Deserialize, Serialize};

/// Result of analyzing how much supplied content reached the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    /// Elements extracted from the payload
    pub total_elements: usize,
    /// Elements detectably present in the artifact
    pub used_elements: usize,
    /// Elements not found
    pub missing_elements: Vec<ContentElement>,
    /// Missing elements whose absence is blocking
    pub critical_missing: Vec<ContentElement>,
    /// used / total; defined as 0 when no elements were extracted
    pub utilization_rate: f64,
    /// Per-element and per-section fix suggestions
    pub recommendations: Vec<String>,
    /// Whether the utilization gate passed
    pub passed: bool,
}

impl UtilizationReport {
    /// Report for an empty payload: rate 0, gate failed
    pub fn empty() -> Self {
        Self {
            total_elements: 0,
            used_elements: 0,
            missing_elements: vec![],
            critical_missing: vec![],
            utilization_rate: 0.0,
            recommendations: vec!["No content elements were supplied".to_string()],
            passed: false,
        }
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
