//! Stage registry and the artifact-scorer seam
//!
//! The scheduler is generic over its collaborators: producer stages are
//! registered in a [`StageSet`] keyed by slot, and scoring goes through the
//! [`ArtifactScorer`] trait. [`RuleArtifactScorer`] is the default scorer,
//! combining the rule engine, the secondary scorers, and the utilization gate
//! into one [`ScoredReport`].

use async_trait::async_trait;
use pagegen_core::config::PipelineConfig;
use pagegen_core::error::{PagegenError, Result};
use pagegen_core::stage::{ProducerStage, StageKind};
use pagegen_core::types::ContentPayload;
use pagegen_content::{UtilizationAnalyzer, UtilizationReport};
use pagegen_rules::{
    GateScore, IndustryScorer, ParsedArtifact, RuleEngine, TemplateScorer, ValidationReport,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Producer stages registered by pipeline slot
#[derive(Clone, Default)]
pub struct StageSet {
    stages: HashMap<StageKind, Arc<dyn ProducerStage>>,
}

impl StageSet {
    /// Empty stage set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stage under its own slot, replacing any previous handle
    pub fn with_stage(mut self, stage: Arc<dyn ProducerStage>) -> Self {
        self.stages.insert(stage.kind(), stage);
        self
    }

    /// Handle for a slot, if registered
    pub fn get(&self, kind: StageKind) -> Option<Arc<dyn ProducerStage>> {
        self.stages.get(&kind).cloned()
    }

    /// Handle for a slot that must be registered
    pub fn require(&self, kind: StageKind) -> Result<Arc<dyn ProducerStage>> {
        self.get(kind).ok_or_else(|| {
            PagegenError::Config(format!("no stage registered for slot '{}'", kind.name()))
        })
    }
}

impl std::fmt::Debug for StageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots: Vec<&str> = self.stages.keys().map(|k| k.name()).collect();
        slots.sort();
        f.debug_struct("StageSet").field("slots", &slots).finish()
    }
}

/// Context data the scorer needs beyond the artifact text
#[derive(Debug, Clone, Default)]
pub struct ScoringInputs {
    /// Content payload the artifact was generated from
    pub content: ContentPayload,
    /// Industry key from the specification, empty when unknown
    pub industry: String,
}

/// Combined output of one scoring pass
#[derive(Debug, Clone, Serialize)]
pub struct ScoredReport {
    /// Rule-engine validation report
    pub report: ValidationReport,
    /// Canonical gate decision
    pub gate: GateScore,
    /// Content-utilization report
    pub utilization: UtilizationReport,
}

impl ScoredReport {
    /// The canonical score of this pass
    pub fn score(&self) -> f64 {
        self.gate.adjusted()
    }

    /// Whether all gates passed
    pub fn passed(&self) -> bool {
        self.gate.passed()
    }

    /// Issues from both the rule report and the utilization report
    pub fn issues(&self) -> Vec<String> {
        let mut issues = self.report.critical_issues.clone();
        issues.extend(self.utilization.recommendations.iter().cloned());
        issues
    }

    /// The report as a JSON value for context storage
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Scoring seam consulted by the convergence loop
#[async_trait]
pub trait ArtifactScorer: Send + Sync {
    /// Score one artifact against the supplied inputs
    async fn score(&self, artifact: &str, inputs: &ScoringInputs) -> Result<ScoredReport>;
}

/// Default scorer: rule engine + template/industry penalties + utilization gate
#[derive(Debug, Clone)]
pub struct RuleArtifactScorer {
    engine: RuleEngine,
    templates: TemplateScorer,
    industries: IndustryScorer,
    analyzer: UtilizationAnalyzer,
    gate_threshold: f64,
}

impl RuleArtifactScorer {
    /// Scorer with default thresholds and builtin catalogs
    pub fn new() -> Self {
        Self::from_config(&PipelineConfig::default())
    }

    /// Scorer with thresholds taken from a pipeline config
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            engine: RuleEngine::new()
                .with_gate_threshold(config.passing_gate)
                .with_base_threshold(config.rule_base_threshold),
            templates: TemplateScorer::new(),
            industries: IndustryScorer::new(),
            analyzer: UtilizationAnalyzer::with_threshold(config.utilization_threshold),
            gate_threshold: config.passing_gate,
        }
    }

    /// Replace the rule engine (custom catalog or thresholds)
    pub fn with_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the template-avoidance scorer
    pub fn with_template_scorer(mut self, templates: TemplateScorer) -> Self {
        self.templates = templates;
        self
    }

    /// Replace the industry-specificity scorer
    pub fn with_industry_scorer(mut self, industries: IndustryScorer) -> Self {
        self.industries = industries;
        self
    }
}

impl Default for RuleArtifactScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactScorer for RuleArtifactScorer {
    async fn score(&self, artifact: &str, inputs: &ScoringInputs) -> Result<ScoredReport> {
        let _span = pagegen_telemetry::scoring_span("rules").entered();
        let report = self.engine.evaluate(artifact);
        let parsed = ParsedArtifact::parse(artifact);
        let template = self.templates.score(&parsed);
        let industry = self.industries.score(&parsed, &inputs.industry);
        let utilization = self.analyzer.analyze(&inputs.content, artifact);
        let gate = GateScore::compute(
            &report,
            &template,
            &industry,
            utilization.passed,
            self.gate_threshold,
        );

        tracing::debug!(
            rule_score = report.overall_score,
            adjusted = gate.adjusted(),
            utilization = utilization.utilization_rate,
            passed = gate.passed(),
            "artifact scored"
        );

        Ok(ScoredReport { report, gate, utilization })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegen_core::stage::{ContextView, StagePayload};
    use pagegen_core::types::{HeroContent, PageSpec, Stat};

    struct NamedStage(StageKind);

    #[async_trait]
    impl ProducerStage for NamedStage {
        fn kind(&self) -> StageKind {
            self.0
        }

        async fn produce(&self, _view: &ContextView) -> Result<StagePayload> {
            Ok(StagePayload::Specification(PageSpec::default()))
        }
    }

    fn inputs() -> ScoringInputs {
        ScoringInputs {
            content: ContentPayload {
                hero: Some(HeroContent {
                    headline: "Brighter smiles for the whole family".into(),
                    subheadline: None,
                    cta: Some("Book a visit".into()),
                }),
                stats: vec![Stat { label: "Patients served".into(), value: "12,000".into() }],
                ..Default::default()
            },
            industry: "dental".into(),
        }
    }

    const GOOD_ARTIFACT: &str = r##"
        <header>
          <nav><a href="#services">Services</a><a href="#contact">Contact</a>
               <a href="#main" class="sr-only">Skip to content</a></nav>
        </header>
        <main>
          <h1 class="text-4xl md:text-5xl">Brighter smiles for the whole family</h1>
          <h2>Our services</h2>
          <section class="grid sm:grid-cols-1 lg:grid-cols-3 bg-teal-600">
            <button class="hover:bg-teal-700 focus:ring active:scale-95 btn">Book a visit</button>
            <a class="hover:underline focus:outline active:opacity-80" aria-label="call us" href="#call">Call</a>
            <a class="hover:opacity-90 focus:ring-2 active:translate-y-px" href="#visit">Visit</a>
          </section>
          <img src="team.jpg" alt="Our dental team" class="w-full">
          <section>
            <h3>Consistent spacing scale with padding and margin utilities</h3>
            <p>Patients served: <span data-count="12,000">12,000</span>, insurance accepted</p>
          </section>
        </main>
        <footer></footer>
    "##;

    #[test]
    fn test_stage_set_registration() {
        let set = StageSet::new()
            .with_stage(Arc::new(NamedStage(StageKind::Specification)))
            .with_stage(Arc::new(NamedStage(StageKind::Design)));
        assert!(set.get(StageKind::Specification).is_some());
        assert!(set.get(StageKind::Layout).is_none());

        let err = set.require(StageKind::Layout).err().unwrap();
        assert!(err.to_string().contains("layout"));
    }

    #[tokio::test]
    async fn test_default_scorer_good_artifact_passes() {
        let scored = RuleArtifactScorer::new().score(GOOD_ARTIFACT, &inputs()).await.unwrap();
        assert!(scored.report.passed);
        assert!(scored.utilization.passed);
        assert!(scored.passed(), "adjusted score was {}", scored.score());
    }

    #[tokio::test]
    async fn test_scorer_fails_bare_artifact() {
        let scored =
            RuleArtifactScorer::new().score("<div>nothing here</div>", &inputs()).await.unwrap();
        assert!(!scored.passed());
        assert!(!scored.issues().is_empty());
    }

    #[tokio::test]
    async fn test_template_penalty_lowers_adjusted_score() {
        let boilerplate = format!(
            "{}<div class=\"bg-gradient-to-r from-purple-500 to-pink-500\"></div>",
            GOOD_ARTIFACT
        );
        let clean = RuleArtifactScorer::new().score(GOOD_ARTIFACT, &inputs()).await.unwrap();
        let penalized = RuleArtifactScorer::new().score(&boilerplate, &inputs()).await.unwrap();
        assert!(penalized.score() < clean.score());
    }

    #[tokio::test]
    async fn test_report_round_trips_to_value() {
        let scored = RuleArtifactScorer::new().score(GOOD_ARTIFACT, &inputs()).await.unwrap();
        let value = scored.to_value().unwrap();
        assert!(value.get("gate").is_some());
        assert!(value.get("utilization").is_some());
    }
}
