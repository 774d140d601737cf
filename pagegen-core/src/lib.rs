//! # pagegen-core
//!
//! Core contracts and per-request state for the PageGen pipeline.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions shared by the pipeline
//! crates:
//!
//! - [`GenerationRequest`] / [`GenerationContext`] - per-request state
//! - [`ProducerStage`] / [`RefineStage`] - seams to the external stages
//! - [`TraceEvent`] / [`TraceSink`] - stage-boundary observability
//! - [`PipelineConfig`] - externally supplied thresholds and budgets
//! - [`PagegenError`] / [`Result`] - unified error handling
//!
//! The context is exclusively owned by one in-flight request; stage handles
//! are stateless and shared.

pub mod config;
pub mod context;
pub mod error;
pub mod request;
pub mod stage;
pub mod trace;
pub mod types;

pub use config::PipelineConfig;
pub use context::{AttemptRecord, GenerationContext, LoopState};
pub use error::{PagegenError, Result};
pub use request::{GenerationMode, GenerationRequest};
pub use stage::{
    ContextView, ProducerStage, RefineGuidance, RefineStage, StageKind, StagePayload,
};
pub use trace::{NullTraceSink, TraceEvent, TracePhase, TraceSink, TracingTraceSink};
pub use types::{
    ColorToken, ContentPayload, DesignSystem, Feature, HeroContent, LayoutPlan, LayoutSection,
    PageSpec, Stat, Testimonial,
};
