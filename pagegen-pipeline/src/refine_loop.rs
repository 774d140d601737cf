//! Convergence-loop controller
//!
//! Drives refine/score iterations over the current artifact until the gate
//! passes or the attempt budget runs out. Each iteration refines the artifact
//! with guidance derived from the previous report, scores the result, and
//! records an attempt in the loop history.

use crate::stages::{ArtifactScorer, ScoredReport, ScoringInputs};
use pagegen_core::config::PipelineConfig;
use pagegen_core::context::GenerationContext;
use pagegen_core::error::{PagegenError, Result};
use pagegen_core::stage::{RefineGuidance, RefineStage};
use pagegen_rules::RuleCategory;
use pagegen_telemetry::refine_attempt_span;
use std::sync::Arc;
use tracing::Instrument;

/// Score delta below which a run is treated as plateaued after the first
/// attempt.
const PLATEAU_DELTA: f64 = 0.5;

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// All gates passed
    Converged,
    /// Attempt budget spent or score plateaued without passing
    Exhausted,
    /// Refine or scoring failed; last scored artifact retained
    Aborted,
}

/// Minimum score improvement expected of attempt `n` before guidance turns
/// targeted. Early attempts must move the score more than late ones.
fn min_improvement(attempt: u32) -> f64 {
    match attempt {
        1 => 3.0,
        2 => 2.0,
        _ => 1.0,
    }
}

/// Concrete fix instruction for one failed rule category
fn instruction_for(category: RuleCategory) -> &'static str {
    match category {
        RuleCategory::Structure => {
            "Wrap the page in header, main, and footer landmarks and group sections into distinct regions"
        }
        RuleCategory::Navigation => {
            "Add a nav element with working anchor links and a skip-to-content link"
        }
        RuleCategory::Interaction => {
            "Add focus, hover, and active state classes to every interactive element"
        }
        RuleCategory::Accessibility => {
            "Add alt text to every image and aria labels to icon-only controls"
        }
        RuleCategory::Responsive => {
            "Add responsive breakpoint variants for layout, grid, and type scale"
        }
        RuleCategory::Visual => {
            "Apply the palette consistently and keep the heading hierarchy in order"
        }
        RuleCategory::Content => "Use the supplied copy verbatim instead of paraphrasing it",
    }
}

/// The refine/score loop over one generation context
pub struct LoopController {
    refine: Arc<dyn RefineStage>,
    scorer: Arc<dyn ArtifactScorer>,
    config: PipelineConfig,
}

impl LoopController {
    /// Controller over a refine stage and a scorer
    pub fn new(
        refine: Arc<dyn RefineStage>,
        scorer: Arc<dyn ArtifactScorer>,
        config: PipelineConfig,
    ) -> Self {
        Self { refine, scorer, config }
    }

    /// Run the loop to completion, mutating the context as it goes
    ///
    /// On entry `ctx.loop_state.current_artifact` must be set; on exit the
    /// context holds the last scored artifact, the last report, and one
    /// history record per attempt.
    pub async fn run(&self, ctx: &mut GenerationContext, inputs: &ScoringInputs) -> Result<LoopOutcome> {
        let mut guidance = RefineGuidance::empty();

        loop {
            let attempt = ctx.loop_state.attempt + 1;
            let current = ctx.loop_state.current_artifact.clone().ok_or_else(|| {
                PagegenError::stage("refine", "no artifact available to refine")
            })?;

            let span = refine_attempt_span(attempt);
            let refined = match self
                .refine
                .refine(&current, &guidance)
                .instrument(span.clone())
                .await
            {
                Ok(artifact) => artifact,
                Err(err) => {
                    tracing::error!(attempt, error = %err, "refine stage failed, aborting loop");
                    return Ok(LoopOutcome::Aborted);
                }
            };

            let scored = match self.scorer.score(&refined, inputs).instrument(span).await {
                Ok(scored) => scored,
                Err(err) => {
                    // The refined artifact was never scored; the context keeps
                    // the last scored one.
                    tracing::error!(attempt, error = %err, "scoring failed, aborting loop");
                    return Ok(LoopOutcome::Aborted);
                }
            };

            let previous = ctx.loop_state.last_score().unwrap_or(0.0);
            let score = scored.score();
            let passed = scored.passed();

            ctx.set_styled_artifact(refined);
            ctx.set_last_report(scored.to_value()?);
            ctx.loop_state.record(score, passed, scored.issues());

            tracing::info!(
                attempt,
                score,
                previous,
                passed,
                "refine attempt scored"
            );

            if passed {
                return Ok(LoopOutcome::Converged);
            }
            if attempt >= self.config.max_attempts {
                return Ok(LoopOutcome::Exhausted);
            }

            let delta = score - previous;
            if attempt > 1 && delta.abs() < PLATEAU_DELTA {
                tracing::info!(attempt, delta, "score plateaued, stopping");
                return Ok(LoopOutcome::Exhausted);
            }

            guidance = self.build_guidance(&scored, delta.abs() < min_improvement(attempt));
        }
    }

    /// Guidance for the next attempt from the failed categories of this one.
    /// When the score barely moved, the previous issues are replayed verbatim
    /// so the refine stage addresses them directly.
    fn build_guidance(&self, scored: &ScoredReport, targeted: bool) -> RefineGuidance {
        let mut guidance = RefineGuidance::empty();
        for category in scored.report.failed_categories() {
            guidance = guidance.with_instruction(instruction_for(category));
        }
        if !scored.utilization.passed {
            guidance = guidance
                .with_instruction("Include every supplied content element in the artifact");
        }
        if targeted {
            guidance.previous_issues = scored.issues();
        }
        guidance
    }
}
