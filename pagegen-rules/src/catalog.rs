//! Rule catalog
//!
//! Static definitions of the validation rules, grouped by category. The
//! builtin catalog ships sensible defaults; callers may supply their own
//! catalog or override the mandatory set without touching engine logic.

use serde::{Deserialize, Serialize};

/// Categories the rules are grouped under
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Semantic document structure
    Structure,
    /// Site navigation
    Navigation,
    /// Interactive element states
    Interaction,
    /// Accessibility
    Accessibility,
    /// Responsive behavior
    Responsive,
    /// Visual/design-system fidelity
    Visual,
    /// Content quality
    Content,
}

impl RuleCategory {
    /// Stable name used in reports and guidance tables
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Navigation => "navigation",
            Self::Interaction => "interaction",
            Self::Accessibility => "accessibility",
            Self::Responsive => "responsive",
            Self::Visual => "visual",
            Self::Content => "content",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One validation rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Stable identifier, e.g. "core_navigation"
    pub id: String,
    /// Category the rule belongs to
    pub category: RuleCategory,
    /// Human-readable description; also feeds the generic keyword heuristic
    pub text: String,
    /// Whether failure forces overall non-compliance
    pub mandatory: bool,
}

impl RuleDefinition {
    fn new(id: &str, category: RuleCategory, text: &str, mandatory: bool) -> Self {
        Self { id: id.to_string(), category, text: text.to_string(), mandatory }
    }
}

/// The rule catalog consulted by the scoring engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCatalog {
    rules: Vec<RuleDefinition>,
}

impl RuleCatalog {
    /// Catalog from explicit definitions
    pub fn new(rules: Vec<RuleDefinition>) -> Self {
        Self { rules }
    }

    /// The builtin catalog
    pub fn builtin() -> Self {
        use RuleCategory::*;
        Self::new(vec![
            RuleDefinition::new(
                "semantic_structure",
                Structure,
                "Use semantic landmark tags: header, nav, main, footer",
                true,
            ),
            RuleDefinition::new(
                "single_h1",
                Structure,
                "The page has exactly one h1 heading",
                false,
            ),
            RuleDefinition::new(
                "section_wrapping",
                Structure,
                "Page regions are grouped into section elements with distinct purposes",
                false,
            ),
            RuleDefinition::new(
                "core_navigation",
                Navigation,
                "Provide a nav element containing at least two links",
                true,
            ),
            RuleDefinition::new(
                "skip_link",
                Navigation,
                "Provide a skip-to-content link for keyboard users",
                false,
            ),
            RuleDefinition::new(
                "focus_states",
                Interaction,
                "Interactive elements declare focus state styling",
                false,
            ),
            RuleDefinition::new(
                "hover_states",
                Interaction,
                "Interactive elements declare hover state styling",
                false,
            ),
            RuleDefinition::new(
                "active_states",
                Interaction,
                "Buttons and links declare active state styling",
                false,
            ),
            RuleDefinition::new(
                "image_alt_text",
                Accessibility,
                "Every img element carries alt text",
                true,
            ),
            RuleDefinition::new(
                "aria_labels",
                Accessibility,
                "Icon-only controls carry aria-label attributes",
                false,
            ),
            RuleDefinition::new(
                "form_labels",
                Accessibility,
                "Form inputs are paired with label elements",
                false,
            ),
            RuleDefinition::new(
                "responsive_breakpoints",
                Responsive,
                "Layout adapts with small, medium and large breakpoint classes",
                false,
            ),
            RuleDefinition::new(
                "viewport_meta",
                Responsive,
                "The document declares a viewport meta tag",
                false,
            ),
            RuleDefinition::new(
                "fluid_media",
                Responsive,
                "Images and media scale fluidly within their containers",
                false,
            ),
            RuleDefinition::new(
                "design_tokens",
                Visual,
                "Colors come from design-system tokens rather than raw hex literals",
                false,
            ),
            RuleDefinition::new(
                "consistent_spacing",
                Visual,
                "Spacing follows a consistent padding and margin scale",
                false,
            ),
            RuleDefinition::new(
                "no_placeholder_copy",
                Content,
                "The artifact contains no placeholder or lorem ipsum copy",
                false,
            ),
            RuleDefinition::new(
                "heading_hierarchy",
                Content,
                "Headings descend without skipping levels",
                false,
            ),
            RuleDefinition::new(
                "cta_presence",
                Content,
                "The page contains at least one call-to-action button or link",
                false,
            ),
        ])
    }

    /// All rules in catalog order
    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&RuleDefinition> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Ids of all mandatory rules
    pub fn mandatory_ids(&self) -> Vec<&str> {
        self.rules.iter().filter(|r| r.mandatory).map(|r| r.id.as_str()).collect()
    }

    /// Replace the mandatory set with an externally supplied id list
    pub fn with_mandatory(mut self, ids: &[&str]) -> Self {
        for rule in &mut self.rules {
            rule.mandatory = ids.contains(&rule.id.as_str());
        }
        self
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
