//! Producer and refine stage contracts
//!
//! Stages are the external collaborators of the pipeline: each one takes a
//! read-only projection of the generation context and produces exactly one
//! payload. Stage handles are stateless and dependency-injected; all mutable
//! per-request state lives in the generation context.

use crate::context::GenerationContext;
use crate::error::Result;
use crate::request::GenerationRequest;
use crate::types::{ContentPayload, DesignSystem, LayoutPlan, PageSpec};
use async_trait::async_trait;

/// Identifies which pipeline slot a producer stage fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Turns the request into a structured specification (required)
    Specification,
    /// Produces the design system (required)
    Design,
    /// Produces the content payload (required)
    Content,
    /// Plans the page layout (required)
    Layout,
    /// Generates the raw artifact (required)
    Artifact,
    /// Applies the design system to the artifact (best-effort)
    DesignImplementation,
    /// Integrates imagery into the artifact (best-effort)
    ImageIntegration,
}

impl StageKind {
    /// Stable stage name used in logs, traces, and failure reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::Specification => "specification",
            Self::Design => "design",
            Self::Content => "content",
            Self::Layout => "layout",
            Self::Artifact => "artifact",
            Self::DesignImplementation => "design_implementation",
            Self::ImageIntegration => "image_integration",
        }
    }

    /// Whether a failure of this stage aborts the pipeline
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::DesignImplementation | Self::ImageIntegration)
    }
}

/// Output of a producer stage, merged into one context field
#[derive(Debug, Clone)]
pub enum StagePayload {
    /// Specification output
    Specification(PageSpec),
    /// Design output
    Design(DesignSystem),
    /// Content output
    Content(ContentPayload),
    /// Layout output
    Layout(LayoutPlan),
    /// Raw or enriched artifact text
    Artifact(String),
}

/// Read-only projection of the generation context handed to stages
///
/// Stages never see the mutable context; the scheduler builds a fresh view
/// before each call with only the fields documented for that stage.
#[derive(Debug, Clone)]
pub struct ContextView {
    /// The originating request
    pub request: GenerationRequest,
    /// Specification, once produced
    pub specification: Option<PageSpec>,
    /// Design system, once produced
    pub design: Option<DesignSystem>,
    /// Content payload, once produced
    pub content: Option<ContentPayload>,
    /// Layout plan, once produced
    pub layout: Option<LayoutPlan>,
    /// Current artifact, once produced
    pub artifact: Option<String>,
}

impl ContextView {
    /// Project the current state of a generation context
    pub fn of(ctx: &GenerationContext) -> Self {
        Self {
            request: ctx.request.clone(),
            specification: ctx.specification.clone(),
            design: ctx.design.clone(),
            content: ctx.content.clone(),
            layout: ctx.layout.clone(),
            artifact: ctx.loop_state.current_artifact.clone(),
        }
    }
}

/// A pipeline producer stage
#[async_trait]
pub trait ProducerStage: Send + Sync {
    /// Which pipeline slot this stage fills
    fn kind(&self) -> StageKind;

    /// Produce this stage's payload from a context projection
    async fn produce(&self, view: &ContextView) -> Result<StagePayload>;
}

/// Guidance passed to a refine call to bias its output
#[derive(Debug, Clone, Default)]
pub struct RefineGuidance {
    /// Concrete fix instructions derived from failed rule categories
    pub instructions: Vec<String>,
    /// Issues reported by the previous scoring pass
    pub previous_issues: Vec<String>,
}

impl RefineGuidance {
    /// Guidance with no instructions (first iteration)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a fix instruction
    pub fn with_instruction(mut self, instruction: &str) -> Self {
        self.instructions.push(instruction.to_string());
        self
    }
}

/// The refine stage invoked by the convergence loop
#[async_trait]
pub trait RefineStage: Send + Sync {
    /// Refine the artifact, biased by the given guidance
    async fn refine(&self, artifact: &str, guidance: &RefineGuidance) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PagegenError;

    struct FixedSpecStage;

    #[async_trait]
    impl ProducerStage for FixedSpecStage {
        fn kind(&self) -> StageKind {
            StageKind::Specification
        }

        async fn produce(&self, view: &ContextView) -> Result<StagePayload> {
            if view.request.request_text.is_empty() {
                return Err(PagegenError::stage("specification", "empty request"));
            }
            Ok(StagePayload::Specification(PageSpec {
                title: view.request.request_text.clone(),
                ..Default::default()
            }))
        }
    }

    #[tokio::test]
    async fn test_producer_stage_contract() {
        let stage = FixedSpecStage;
        let ctx = GenerationContext::new(GenerationRequest::new("clinic page", "s"));
        let payload = stage.produce(&ContextView::of(&ctx)).await.unwrap();
        assert!(matches!(payload, StagePayload::Specification(ref s) if s.title == "clinic page"));
    }

    #[test]
    fn test_required_stages() {
        assert!(StageKind::Specification.is_required());
        assert!(StageKind::Artifact.is_required());
        assert!(!StageKind::DesignImplementation.is_required());
        assert!(!StageKind::ImageIntegration.is_required());
    }

    #[test]
    fn test_view_projects_current_artifact() {
        let mut ctx = GenerationContext::new(GenerationRequest::new("page", "s"));
        ctx.set_artifact("<main/>".to_string());
        ctx.set_styled_artifact("<main class=\"x\"/>".to_string());
        let view = ContextView::of(&ctx);
        assert_eq!(view.artifact.as_deref(), Some("<main class=\"x\"/>"));
    }
}
