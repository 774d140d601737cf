//! Per-request generation context
//!
//! One [`GenerationContext`] is exclusively owned by one in-flight request, so
//! no locking is needed. Each producer stage writes exactly one field through
//! its setter; only the artifact and validation report are overwritten across
//! loop iterations.

use crate::request::GenerationRequest;
use crate::types::{ContentPayload, DesignSystem, LayoutPlan, PageSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of fields a complete run populates, used for the completeness query.
const REQUIRED_FIELDS: u32 = 7;

/// A single refine/score attempt in the convergence loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number
    pub attempt: u32,
    /// Adjusted gate score achieved by this attempt
    pub score: f64,
    /// Whether all gates passed
    pub passed: bool,
    /// Issues the scorer reported for this attempt
    pub issues: Vec<String>,
}

/// Mutable loop sub-state of the generation context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoopState {
    /// Number of completed refine/score attempts
    pub attempt: u32,
    /// One record per completed attempt; `history.len() == attempt`
    pub history: Vec<AttemptRecord>,
    /// Artifact currently being refined
    pub current_artifact: Option<String>,
}

impl LoopState {
    /// Record a completed attempt, keeping the history invariant
    pub fn record(&mut self, score: f64, passed: bool, issues: Vec<String>) {
        self.attempt += 1;
        self.history.push(AttemptRecord { attempt: self.attempt, score, passed, issues });
    }

    /// Score of the most recent attempt, if any
    pub fn last_score(&self) -> Option<f64> {
        self.history.last().map(|r| r.score)
    }
}

/// Mutable aggregate populated by the pipeline stages for one request
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// The request that started this run
    pub request: GenerationRequest,
    /// Correlation id for trace events
    pub correlation_id: String,
    /// Specification stage output
    pub specification: Option<PageSpec>,
    /// Design stage output
    pub design: Option<DesignSystem>,
    /// Content stage output
    pub content: Option<ContentPayload>,
    /// Layout stage output
    pub layout: Option<LayoutPlan>,
    /// Raw artifact from the generation stage
    pub artifact: Option<String>,
    /// Styled artifact, overwritten each loop iteration
    pub styled_artifact: Option<String>,
    /// Last validation report as JSON, overwritten each loop iteration
    pub last_report: Option<Value>,
    /// Loop sub-state
    pub loop_state: LoopState,
    /// Stage names in execution order
    pub stages_used: Vec<String>,
    /// When this run started
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl GenerationContext {
    /// Create a fresh context for a request
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            correlation_id: uuid::Uuid::new_v4().to_string(),
            specification: None,
            design: None,
            content: None,
            layout: None,
            artifact: None,
            styled_artifact: None,
            last_report: None,
            loop_state: LoopState::default(),
            stages_used: Vec::new(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Store the specification stage output
    pub fn set_specification(&mut self, spec: PageSpec) {
        self.specification = Some(spec);
        self.stages_used.push("specification".to_string());
    }

    /// Store the design stage output
    pub fn set_design(&mut self, design: DesignSystem) {
        self.design = Some(design);
        self.stages_used.push("design".to_string());
    }

    /// Store the content stage output
    pub fn set_content(&mut self, content: ContentPayload) {
        self.content = Some(content);
        self.stages_used.push("content".to_string());
    }

    /// Store the layout stage output
    pub fn set_layout(&mut self, layout: LayoutPlan) {
        self.layout = Some(layout);
        self.stages_used.push("layout".to_string());
    }

    /// Store the generated artifact and seed the loop state with it
    pub fn set_artifact(&mut self, artifact: String) {
        self.loop_state.current_artifact = Some(artifact.clone());
        self.artifact = Some(artifact);
        self.stages_used.push("artifact".to_string());
    }

    /// Store a styled artifact produced by a refine iteration
    ///
    /// Unlike the other setters this may be called repeatedly; the stage name
    /// is logged only once.
    pub fn set_styled_artifact(&mut self, artifact: String) {
        self.loop_state.current_artifact = Some(artifact.clone());
        self.styled_artifact = Some(artifact);
        if !self.stages_used.iter().any(|s| s == "styling") {
            self.stages_used.push("styling".to_string());
        }
    }

    /// Store the most recent validation report
    pub fn set_last_report(&mut self, report: Value) {
        self.last_report = Some(report);
    }

    /// Percentage of required fields populated so far
    pub fn completeness_percent(&self) -> u32 {
        let populated = [
            self.specification.is_some(),
            self.design.is_some(),
            self.content.is_some(),
            self.layout.is_some(),
            self.artifact.is_some(),
            self.styled_artifact.is_some(),
            self.last_report.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count() as u32;
        populated * 100 / REQUIRED_FIELDS
    }

    /// Serializable snapshot of the final state for callers and logs
    pub fn snapshot(&self) -> Value {
        serde_json::json!({
            "correlation_id": self.correlation_id,
            "session_id": self.request.session_id,
            "stages_used": self.stages_used,
            "completeness_percent": self.completeness_percent(),
            "attempts": self.loop_state.attempt,
            "history": self.loop_state.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeroContent;

    fn context() -> GenerationContext {
        GenerationContext::new(GenerationRequest::new("a landing page", "sess-1"))
    }

    #[test]
    fn test_setters_log_execution_order() {
        let mut ctx = context();
        ctx.set_specification(PageSpec::default());
        ctx.set_design(DesignSystem::default());
        ctx.set_content(ContentPayload {
            hero: Some(HeroContent { headline: "Hi".into(), subheadline: None, cta: None }),
            ..Default::default()
        });
        assert_eq!(ctx.stages_used, vec!["specification", "design", "content"]);
    }

    #[test]
    fn test_artifact_setter_updates_loop_state() {
        let mut ctx = context();
        ctx.set_artifact("<main></main>".to_string());
        assert_eq!(ctx.loop_state.current_artifact.as_deref(), Some("<main></main>"));

        ctx.set_styled_artifact("<main class=\"p-4\"></main>".to_string());
        assert_eq!(
            ctx.loop_state.current_artifact.as_deref(),
            Some("<main class=\"p-4\"></main>")
        );
    }

    #[test]
    fn test_styling_logged_once() {
        let mut ctx = context();
        ctx.set_styled_artifact("a".to_string());
        ctx.set_styled_artifact("b".to_string());
        assert_eq!(ctx.stages_used.iter().filter(|s| *s == "styling").count(), 1);
    }

    #[test]
    fn test_completeness_percent() {
        let mut ctx = context();
        assert_eq!(ctx.completeness_percent(), 0);
        ctx.set_specification(PageSpec::default());
        ctx.set_design(DesignSystem::default());
        ctx.set_content(ContentPayload::default());
        ctx.set_layout(LayoutPlan::default());
        ctx.set_artifact("<main/>".to_string());
        ctx.set_styled_artifact("<main/>".to_string());
        ctx.set_last_report(serde_json::json!({}));
        assert_eq!(ctx.completeness_percent(), 100);
    }

    #[test]
    fn test_loop_state_history_invariant() {
        let mut state = LoopState::default();
        state.record(60.0, false, vec!["missing nav".to_string()]);
        state.record(63.0, false, vec![]);
        assert_eq!(state.attempt, 2);
        assert_eq!(state.history.len() as u32, state.attempt);
        assert_eq!(state.last_score(), Some(63.0));
    }
}
