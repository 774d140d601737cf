//! # pagegen-content
//!
//! Content-utilization analysis for PageGen.
//!
//! Answers one question: how much of the supplied structured content is
//! detectably present in the generated artifact? The analyzer is a pure
//! function over (payload, artifact text) with no external dependencies, so
//! it can gate the convergence loop deterministically.

pub mod analyzer;
pub mod element;
pub mod matcher;
pub mod report;

pub use analyzer::UtilizationAnalyzer;
pub use element::{
    ContentElement, ElementKind, FeatureField, HeroField, Priority, StatField, TestimonialField,
    extract_elements,
};
pub use matcher::{ArtifactMatcher, MatchStrategy, is_placeholder, is_stat_shaped, normalize};
pub use report::UtilizationReport;
