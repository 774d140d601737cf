//! Stage scheduler
//!
//! Drives one generation request through the fixed stage graph:
//! specification, then design and content in parallel, then layout and
//! artifact generation, then the best-effort enrichment pair, then the
//! convergence loop. Required-stage errors abort the run with the partial
//! context; enrichment errors are logged and swallowed.

use crate::refine_loop::{LoopController, LoopOutcome};
use crate::stages::{ArtifactScorer, RuleArtifactScorer, ScoringInputs, StageSet};
use pagegen_core::config::PipelineConfig;
use pagegen_core::context::GenerationContext;
use pagegen_core::error::{PagegenError, Result};
use pagegen_core::request::{GenerationMode, GenerationRequest};
use pagegen_core::stage::{ContextView, ProducerStage, RefineStage, StageKind, StagePayload};
use pagegen_core::trace::{NullTraceSink, TraceEvent, TracePhase, TraceSink};
use pagegen_telemetry::{pipeline_run_span, stage_run_span};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    /// Whether the run produced a scored artifact without aborting
    pub success: bool,
    /// The last scored artifact, when one exists
    pub final_artifact: Option<String>,
    /// Adjusted score of the last attempt
    pub validation_score: Option<f64>,
    /// Wall-clock duration of the run
    pub execution_time_ms: u64,
    /// Stage names in execution order
    pub stages_used: Vec<String>,
    /// How much of the context was populated
    pub completeness_percent: u32,
    /// Error message when the run failed
    pub error: Option<String>,
    /// Stage whose failure aborted the run, when one did
    pub failing_stage: Option<String>,
    /// How the convergence loop ended, when it was reached
    pub outcome: Option<LoopOutcome>,
    /// Full partial or final context
    pub context: GenerationContext,
}

impl PipelineResult {
    fn finished(ctx: GenerationContext, outcome: LoopOutcome, started: Instant) -> Self {
        let error = match outcome {
            LoopOutcome::Aborted => Some("refine loop aborted".to_string()),
            _ => None,
        };
        Self {
            success: !matches!(outcome, LoopOutcome::Aborted),
            final_artifact: ctx.loop_state.current_artifact.clone(),
            validation_score: ctx.loop_state.last_score(),
            execution_time_ms: started.elapsed().as_millis() as u64,
            stages_used: ctx.stages_used.clone(),
            completeness_percent: ctx.completeness_percent(),
            error,
            failing_stage: None,
            outcome: Some(outcome),
            context: ctx,
        }
    }

    fn failed(ctx: GenerationContext, err: PagegenError, started: Instant) -> Self {
        let failing_stage = match &err {
            PagegenError::Stage { stage, .. } => Some(stage.clone()),
            _ => None,
        };
        Self {
            success: false,
            final_artifact: ctx.loop_state.current_artifact.clone(),
            validation_score: ctx.loop_state.last_score(),
            execution_time_ms: started.elapsed().as_millis() as u64,
            stages_used: ctx.stages_used.clone(),
            completeness_percent: ctx.completeness_percent(),
            error: Some(err.to_string()),
            failing_stage,
            outcome: None,
            context: ctx,
        }
    }
}

/// The pipeline over one set of collaborators
pub struct Pipeline {
    stages: StageSet,
    refine: Arc<dyn RefineStage>,
    scorer: Arc<dyn ArtifactScorer>,
    scorer_overridden: bool,
    config: PipelineConfig,
    sink: Arc<dyn TraceSink>,
}

impl Pipeline {
    /// Pipeline with the default scorer, config, and a null trace sink
    pub fn new(stages: StageSet, refine: Arc<dyn RefineStage>) -> Self {
        Self {
            stages,
            refine,
            scorer: Arc::new(RuleArtifactScorer::new()),
            scorer_overridden: false,
            config: PipelineConfig::default(),
            sink: Arc::new(NullTraceSink),
        }
    }

    /// Replace the pipeline config (loop budget and gate thresholds)
    ///
    /// Rebuilds the default scorer from the new thresholds unless a custom
    /// scorer was injected with [`Pipeline::with_scorer`].
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        if !self.scorer_overridden {
            self.scorer = Arc::new(RuleArtifactScorer::from_config(&config));
        }
        self.config = config;
        self
    }

    /// Replace the artifact scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn ArtifactScorer>) -> Self {
        self.scorer = scorer;
        self.scorer_overridden = true;
        self
    }

    /// Replace the trace sink
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run one request through the full graph
    ///
    /// Always returns a [`PipelineResult`]; stage failures surface as
    /// `success = false` with the failing stage named and the partial
    /// context attached.
    pub async fn submit(&self, request: GenerationRequest) -> PipelineResult {
        let started = Instant::now();
        let mut ctx = GenerationContext::new(request);
        tracing::info!(
            correlation_id = %ctx.correlation_id,
            session_id = %ctx.request.session_id,
            "pipeline run started"
        );

        let span = pipeline_run_span(&ctx.request.session_id, &ctx.correlation_id);
        match self.execute(&mut ctx).instrument(span).await {
            Ok(outcome) => {
                tracing::info!(
                    correlation_id = %ctx.correlation_id,
                    ?outcome,
                    attempts = ctx.loop_state.attempt,
                    score = ?ctx.loop_state.last_score(),
                    "pipeline run finished"
                );
                PipelineResult::finished(ctx, outcome, started)
            }
            Err(err) => {
                tracing::error!(correlation_id = %ctx.correlation_id, error = %err, "pipeline run failed");
                PipelineResult::failed(ctx, err, started)
            }
        }
    }

    async fn execute(&self, ctx: &mut GenerationContext) -> Result<LoopOutcome> {
        let spec_stage = self.stages.require(StageKind::Specification)?;
        let payload = self.run_stage(ctx, &spec_stage).await?;
        merge_payload(ctx, StageKind::Specification, payload)?;

        // Design and content depend only on the specification and run
        // concurrently; their payloads land in disjoint context fields.
        let design_stage = self.stages.require(StageKind::Design)?;
        let content_stage = self.stages.require(StageKind::Content)?;
        let (design, content) = futures::join!(
            self.run_stage(ctx, &design_stage),
            self.run_stage(ctx, &content_stage)
        );
        merge_payload(ctx, StageKind::Design, design?)?;
        merge_payload(ctx, StageKind::Content, content?)?;

        for kind in [StageKind::Layout, StageKind::Artifact] {
            let stage = self.stages.require(kind)?;
            let payload = self.run_stage(ctx, &stage).await?;
            merge_payload(ctx, kind, payload)?;
        }

        self.run_enrichment(ctx).await;

        let inputs = ScoringInputs {
            content: ctx.content.clone().unwrap_or_default(),
            industry: ctx
                .specification
                .as_ref()
                .and_then(|s| s.industry.clone())
                .unwrap_or_default(),
        };

        // Draft mode keeps the full graph but refines only once.
        let mut config = self.config.clone();
        if ctx.request.mode == GenerationMode::Draft {
            config = config.with_max_attempts(1);
        }

        self.sink.emit(TraceEvent::now(
            &ctx.correlation_id,
            "refine_loop",
            TracePhase::In,
            json!({}),
        ));
        let controller = LoopController::new(self.refine.clone(), self.scorer.clone(), config);
        let outcome = controller.run(ctx, &inputs).await?;
        self.sink.emit(TraceEvent::now(
            &ctx.correlation_id,
            "refine_loop",
            TracePhase::Out,
            json!({
                "attempts": ctx.loop_state.attempt,
                "outcome": format!("{:?}", outcome),
            }),
        ));

        Ok(outcome)
    }

    /// Run one stage with boundary trace events
    async fn run_stage(
        &self,
        ctx: &GenerationContext,
        stage: &Arc<dyn ProducerStage>,
    ) -> Result<StagePayload> {
        let kind = stage.kind();
        self.sink.emit(TraceEvent::now(
            &ctx.correlation_id,
            kind.name(),
            TracePhase::In,
            json!({}),
        ));

        let start = Instant::now();
        let result = stage
            .produce(&ContextView::of(ctx))
            .instrument(stage_run_span(kind.name()))
            .await;
        let ms = start.elapsed().as_millis() as u64;

        let data = match &result {
            Ok(_) => json!({ "ms": ms, "outcome": "ok" }),
            Err(err) => json!({ "ms": ms, "outcome": "error", "error": err.to_string() }),
        };
        self.sink
            .emit(TraceEvent::now(&ctx.correlation_id, kind.name(), TracePhase::Out, data));

        result
    }

    /// Run the best-effort enrichment stages; failures never abort the run
    ///
    /// The stages run in order, each seeing its predecessor's artifact, so
    /// both contributions survive into the loop.
    async fn run_enrichment(&self, ctx: &mut GenerationContext) {
        for kind in [StageKind::DesignImplementation, StageKind::ImageIntegration] {
            if let Some(payload) = self.run_optional(ctx, kind).await {
                if let Err(err) = merge_payload(ctx, kind, payload) {
                    tracing::warn!(stage = kind.name(), error = %err, "enrichment payload dropped");
                }
            }
        }
    }

    async fn run_optional(&self, ctx: &GenerationContext, kind: StageKind) -> Option<StagePayload> {
        let stage = self.stages.get(kind)?;
        match self.run_stage(ctx, &stage).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::warn!(stage = kind.name(), error = %err, "best-effort stage failed, continuing");
                None
            }
        }
    }
}

/// Merge one stage payload into its context field
fn merge_payload(ctx: &mut GenerationContext, kind: StageKind, payload: StagePayload) -> Result<()> {
    match (kind, payload) {
        (StageKind::Specification, StagePayload::Specification(spec)) => ctx.set_specification(spec),
        (StageKind::Design, StagePayload::Design(design)) => ctx.set_design(design),
        (StageKind::Content, StagePayload::Content(content)) => ctx.set_content(content),
        (StageKind::Layout, StagePayload::Layout(layout)) => ctx.set_layout(layout),
        (StageKind::Artifact, StagePayload::Artifact(text)) => ctx.set_artifact(text),
        (
            StageKind::DesignImplementation | StageKind::ImageIntegration,
            StagePayload::Artifact(text),
        ) => {
            ctx.styled_artifact = Some(text.clone());
            ctx.loop_state.current_artifact = Some(text);
            ctx.stages_used.push(kind.name().to_string());
        }
        (kind, _) => {
            return Err(PagegenError::stage(
                kind.name(),
                "stage returned a payload for a different slot",
            ))
        }
    }
    Ok(())
}
