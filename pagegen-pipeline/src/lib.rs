//! # pagegen-pipeline
//!
//! Orchestration for PageGen: the stage scheduler that drives one request
//! through the fixed stage graph, and the convergence loop that refines the
//! generated artifact until it passes the validation gates.
//!
//! The pipeline owns no generation logic itself. Producer stages, the refine
//! stage, and the scorer are injected behind traits; the default
//! [`RuleArtifactScorer`] wires up the deterministic scorers from
//! `pagegen-rules` and `pagegen-content`.
//!
//! ```no_run
//! use pagegen_pipeline::{Pipeline, StageSet};
//! use pagegen_core::request::GenerationRequest;
//! # use std::sync::Arc;
//! # async fn run(stages: StageSet, refine: Arc<dyn pagegen_core::stage::RefineStage>) {
//! let pipeline = Pipeline::new(stages, refine);
//! let result = pipeline.submit(GenerationRequest::new("a dental clinic page", "sess-1")).await;
//! if result.success {
//!     println!("scored {:?} after {} attempts",
//!         result.validation_score, result.context.loop_state.attempt);
//! }
//! # }
//! ```

pub mod refine_loop;
pub mod scheduler;
pub mod stages;

pub use refine_loop::{LoopController, LoopOutcome};
pub use scheduler::{Pipeline, PipelineResult};
pub use stages::{ArtifactScorer, RuleArtifactScorer, ScoredReport, ScoringInputs, StageSet};
