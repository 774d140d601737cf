//! Rule-based artifact scoring for PageGen
//!
//! This crate evaluates generated page artifacts without calling a model:
//! a deterministic [`RuleEngine`] runs a catalog of structural rules, a
//! [`TemplateScorer`] penalizes stock boilerplate, an [`IndustryScorer`]
//! checks per-industry expectations, and [`GateScore`] combines the three
//! into the single adjusted score the convergence loop acts on.
//!
//! # Example
//!
//! ```
//! use pagegen_rules::{GateScore, IndustryScorer, ParsedArtifact, RuleEngine, TemplateScorer};
//!
//! let artifact = "<header><nav></nav></header><main><h1>Hi</h1></main><footer></footer>";
//! let report = RuleEngine::new().evaluate(artifact);
//! let parsed = ParsedArtifact::parse(artifact);
//! let template = TemplateScorer::new().score(&parsed);
//! let industry = IndustryScorer::new().score(&parsed, "dental");
//! let gate = GateScore::compute(&report, &template, &industry, true, 75.0);
//! println!("adjusted score: {}", gate.adjusted());
//! ```

pub mod artifact;
pub mod catalog;
pub mod detectors;
pub mod engine;
pub mod gate;
pub mod industry;
pub mod report;
pub mod template;

pub use artifact::ParsedArtifact;
pub use catalog::{RuleCatalog, RuleCategory, RuleDefinition};
pub use engine::RuleEngine;
pub use gate::{GateScore, INDUSTRY_WEIGHT, TEMPLATE_WEIGHT};
pub use industry::{IndustryProfile, IndustryScore, IndustryScorer};
pub use report::{
    CategoryResult, Compliance, RuleResult, RuleStatus, ValidationReport, ValidationSummary,
};
pub use template::{TemplatePattern, TemplateScore, TemplateScorer};
