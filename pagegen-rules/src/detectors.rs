//! Rule detectors
//!
//! Each rule id maps to one detector over the shared [`ParsedArtifact`].
//! Rules without a dedicated detector fall back to the generic
//! keyword-coverage heuristic derived from the rule's description text.

use crate::artifact::ParsedArtifact;
use crate::catalog::RuleDefinition;
use crate::report::RuleResult;

/// A detector evaluates one rule against the parsed artifact
pub type Detector = fn(&ParsedArtifact, &RuleDefinition) -> RuleResult;

/// Fraction of keyword groups that must be present for a generic PASS.
const KEYWORD_PASS_COVERAGE: f64 = 0.50;
/// Below this coverage the generic heuristic fails outright.
const KEYWORD_PARTIAL_COVERAGE: f64 = 0.25;

/// Words in rule text that carry no signal for the keyword heuristic.
const STOPWORDS: &[&str] = &[
    "every", "their", "within", "without", "rather", "least", "contains", "provide", "declare",
    "declares", "carries", "follows", "comes", "element", "elements", "artifact", "should",
];

/// Look up the dedicated detector for a rule id
pub fn detector_for(rule_id: &str) -> Option<Detector> {
    match rule_id {
        "semantic_structure" => Some(detect_semantic_structure),
        "single_h1" => Some(detect_single_h1),
        "core_navigation" => Some(detect_core_navigation),
        "skip_link" => Some(detect_skip_link),
        "focus_states" => Some(detect_focus_states),
        "hover_states" => Some(detect_hover_states),
        "active_states" => Some(detect_active_states),
        "image_alt_text" => Some(detect_image_alt_text),
        "aria_labels" => Some(detect_aria_labels),
        "form_labels" => Some(detect_form_labels),
        "responsive_breakpoints" => Some(detect_responsive_breakpoints),
        "viewport_meta" => Some(detect_viewport_meta),
        "fluid_media" => Some(detect_fluid_media),
        "design_tokens" => Some(detect_design_tokens),
        "no_placeholder_copy" => Some(detect_no_placeholder_copy),
        "heading_hierarchy" => Some(detect_heading_hierarchy),
        "cta_presence" => Some(detect_cta_presence),
        _ => None,
    }
}

/// Generic keyword-coverage heuristic for rules without a detector
///
/// Keyword groups are the significant words of the rule text; PASS requires
/// at least half of them present as whole words in the artifact.
pub fn generic_keyword_detector(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let keywords: Vec<String> = rule
        .text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 4 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return RuleResult::partial(&rule.id, "no keywords derivable from rule text");
    }

    let found = keywords.iter().filter(|k| parsed.has_word(k)).count();
    let coverage = found as f64 / keywords.len() as f64;
    let reason = format!("{}/{} expected keyword groups present", found, keywords.len());

    if coverage >= KEYWORD_PASS_COVERAGE {
        RuleResult::pass(&rule.id, &reason)
    } else if coverage >= KEYWORD_PARTIAL_COVERAGE {
        RuleResult::partial(&rule.id, &reason)
            .with_recommendation(&format!("Address: {}", rule.text))
    } else {
        RuleResult::fail(&rule.id, &reason).with_recommendation(&format!("Address: {}", rule.text))
    }
}

fn detect_semantic_structure(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let landmarks = ["header", "nav", "main", "footer"];
    let present: Vec<&str> =
        landmarks.iter().filter(|t| parsed.has_tag(t)).copied().collect();
    let evidence = format!("landmarks present: {}", present.join(", "));
    match present.len() {
        4 => RuleResult::pass(&rule.id, "all landmark tags present").with_evidence(&evidence),
        2 | 3 => RuleResult::partial(&rule.id, "some landmark tags missing")
            .with_evidence(&evidence)
            .with_recommendation("Wrap page regions in header, nav, main, and footer tags"),
        _ => RuleResult::fail(&rule.id, "page lacks semantic landmarks")
            .with_evidence(&evidence)
            .with_recommendation("Use semantic landmarks: header, nav, main, section, footer"),
    }
}

fn detect_single_h1(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    match parsed.tag_count("h1") {
        1 => RuleResult::pass(&rule.id, "exactly one h1"),
        0 => RuleResult::fail(&rule.id, "no h1 heading")
            .with_recommendation("Add a single h1 carrying the page headline"),
        n => RuleResult::partial(&rule.id, "multiple h1 headings")
            .with_evidence(&format!("{} h1 tags", n))
            .with_recommendation("Demote extra h1 headings to h2"),
    }
}

fn detect_core_navigation(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let links = parsed.tag_count("a");
    if parsed.has_tag("nav") && links >= 2 {
        RuleResult::pass(&rule.id, "nav element with links present")
    } else if parsed.has_tag("nav") {
        RuleResult::partial(&rule.id, "nav element present but under-linked")
            .with_evidence(&format!("{} links", links))
            .with_recommendation("Populate the nav element with at least two links")
    } else {
        RuleResult::fail(&rule.id, "no nav element")
            .with_recommendation("Add a nav element with the primary page links")
    }
}

fn detect_skip_link(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    if parsed.lower.contains("skip") && parsed.lower.contains("href=\"#") {
        RuleResult::pass(&rule.id, "skip link present")
    } else {
        RuleResult::fail(&rule.id, "no skip-to-content link")
            .with_recommendation("Add a skip-to-content anchor as the first focusable element")
    }
}

fn state_classes(parsed: &ParsedArtifact, rule: &RuleDefinition, prefix: &str) -> RuleResult {
    let count = parsed.classes_with_prefix(prefix);
    let evidence = format!("{} {}* classes", count, prefix);
    if count >= 3 {
        RuleResult::pass(&rule.id, &format!("{} states styled", prefix.trim_end_matches(':')))
            .with_evidence(&evidence)
    } else if count >= 1 {
        RuleResult::partial(&rule.id, &format!("only some elements style {}", prefix))
            .with_evidence(&evidence)
            .with_recommendation(&format!("Apply {}* classes to all interactive elements", prefix))
    } else {
        RuleResult::fail(&rule.id, &format!("no {} state styling", prefix.trim_end_matches(':')))
            .with_evidence(&evidence)
            .with_recommendation(&format!("Add {}* classes to interactive elements", prefix))
    }
}

fn detect_focus_states(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    state_classes(parsed, rule, "focus:")
}

fn detect_hover_states(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    state_classes(parsed, rule, "hover:")
}

fn detect_active_states(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    state_classes(parsed, rule, "active:")
}

fn detect_image_alt_text(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    if parsed.img_count == 0 {
        return RuleResult::pass(&rule.id, "no images on the page");
    }
    let evidence = format!("{}/{} images with alt", parsed.img_alt_count, parsed.img_count);
    if parsed.img_alt_count == parsed.img_count {
        RuleResult::pass(&rule.id, "all images carry alt text").with_evidence(&evidence)
    } else if parsed.img_alt_count > 0 {
        RuleResult::partial(&rule.id, "some images lack alt text")
            .with_evidence(&evidence)
            .with_recommendation("Add alt text to every img element")
    } else {
        RuleResult::fail(&rule.id, "no image carries alt text")
            .with_evidence(&evidence)
            .with_recommendation("Add alt text to every img element")
    }
}

fn detect_aria_labels(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    if parsed.has_attr("aria-label") || parsed.has_attr("aria-labelledby") {
        RuleResult::pass(&rule.id, "aria labelling present")
    } else if parsed.has_attr("role") {
        RuleResult::partial(&rule.id, "roles declared without aria labels")
            .with_recommendation("Pair role attributes with aria-label text")
    } else {
        RuleResult::fail(&rule.id, "no aria labelling")
            .with_recommendation("Add aria-label attributes to icon-only controls")
    }
}

fn detect_form_labels(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let inputs = parsed.tag_count("input") + parsed.tag_count("textarea") + parsed.tag_count("select");
    if inputs == 0 {
        return RuleResult::pass(&rule.id, "no form controls on the page");
    }
    let labels = parsed.tag_count("label");
    let evidence = format!("{} labels for {} controls", labels, inputs);
    if labels >= inputs {
        RuleResult::pass(&rule.id, "form controls labelled").with_evidence(&evidence)
    } else if labels > 0 {
        RuleResult::partial(&rule.id, "some form controls unlabelled")
            .with_evidence(&evidence)
            .with_recommendation("Pair every input with a label element")
    } else {
        RuleResult::fail(&rule.id, "form controls unlabelled")
            .with_evidence(&evidence)
            .with_recommendation("Pair every input with a label element")
    }
}

fn detect_responsive_breakpoints(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let prefixes = ["sm:", "md:", "lg:", "xl:"];
    let distinct = prefixes.iter().filter(|p| parsed.classes_with_prefix(p) > 0).count();
    let evidence = format!("{} breakpoint prefixes in use", distinct);
    if distinct >= 2 {
        RuleResult::pass(&rule.id, "layout adapts across breakpoints").with_evidence(&evidence)
    } else if distinct == 1 {
        RuleResult::partial(&rule.id, "only one breakpoint in use")
            .with_evidence(&evidence)
            .with_recommendation("Add responsive classes for small, medium, and large viewports")
    } else {
        RuleResult::fail(&rule.id, "no responsive breakpoint classes")
            .with_evidence(&evidence)
            .with_recommendation("Add responsive classes for small, medium, and large viewports")
    }
}

fn detect_viewport_meta(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    if parsed.lower.contains("name=\"viewport\"") || parsed.lower.contains("name='viewport'") {
        RuleResult::pass(&rule.id, "viewport meta declared")
    } else if !parsed.has_tag("html") {
        // Fragment artifacts carry no head; the host document owns the meta.
        RuleResult::pass(&rule.id, "fragment artifact, viewport owned by host document")
    } else {
        RuleResult::fail(&rule.id, "no viewport meta tag")
            .with_recommendation("Declare a responsive viewport meta tag")
    }
}

fn detect_fluid_media(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    if parsed.img_count == 0 {
        return RuleResult::pass(&rule.id, "no media on the page");
    }
    if parsed.has_class_containing("w-full")
        || parsed.has_class_containing("max-w")
        || parsed.lower.contains("max-width")
    {
        RuleResult::pass(&rule.id, "media constrained fluidly")
    } else {
        RuleResult::fail(&rule.id, "media lacks fluid sizing")
            .with_recommendation("Constrain images with fluid width classes")
    }
}

fn detect_design_tokens(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let evidence = format!("{} raw hex literals", parsed.raw_hex_colors);
    match parsed.raw_hex_colors {
        0 => RuleResult::pass(&rule.id, "no raw hex colors").with_evidence(&evidence),
        1..=2 => RuleResult::partial(&rule.id, "a few raw hex colors bypass the token system")
            .with_evidence(&evidence)
            .with_recommendation("Replace raw hex values with design-system palette tokens"),
        _ => RuleResult::fail(&rule.id, "colors bypass the design-system tokens")
            .with_evidence(&evidence)
            .with_recommendation("Replace raw hex values with design-system palette tokens"),
    }
}

fn detect_no_placeholder_copy(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let markers = ["lorem ipsum", "placeholder", "your text here", "[todo", "tbd"];
    let found: Vec<&str> =
        markers.iter().filter(|m| parsed.lower.contains(**m)).copied().collect();
    if found.is_empty() {
        RuleResult::pass(&rule.id, "no placeholder copy")
    } else {
        RuleResult::fail(&rule.id, "placeholder copy present")
            .with_evidence(&format!("markers: {}", found.join(", ")))
            .with_recommendation("Replace placeholder copy with the supplied content")
    }
}

fn detect_heading_hierarchy(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    let levels = &parsed.heading_levels;
    if levels.is_empty() {
        return RuleResult::fail(&rule.id, "no headings at all")
            .with_recommendation("Add a heading hierarchy starting from h1");
    }
    let skips = levels
        .windows(2)
        .filter(|w| w[1] > w[0] && w[1] - w[0] > 1)
        .count();
    match skips {
        0 => RuleResult::pass(&rule.id, "headings descend in order"),
        1 => RuleResult::partial(&rule.id, "one heading level skipped")
            .with_recommendation("Avoid skipping heading levels"),
        _ => RuleResult::fail(&rule.id, "heading levels skipped repeatedly")
            .with_recommendation("Avoid skipping heading levels"),
    }
}

fn detect_cta_presence(parsed: &ParsedArtifact, rule: &RuleDefinition) -> RuleResult {
    if parsed.has_tag("button")
        || parsed.has_class_containing("btn")
        || parsed.has_class_containing("cta")
    {
        RuleResult::pass(&rule.id, "call-to-action present")
    } else {
        RuleResult::fail(&rule.id, "no call-to-action")
            .with_recommendation("Add a prominent call-to-action button")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RuleCatalog, RuleCategory};
    use crate::report::RuleStatus;

    fn rule(id: &str) -> RuleDefinition {
        RuleCatalog::builtin().get(id).cloned().unwrap()
    }

    #[test]
    fn test_every_builtin_rule_covered_or_generic() {
        // section_wrapping and consistent_spacing intentionally rely on the
        // generic heuristic; everything else has a dedicated detector.
        let catalog = RuleCatalog::builtin();
        let generic: Vec<&str> = catalog
            .rules()
            .iter()
            .filter(|r| detector_for(&r.id).is_none())
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(generic, vec!["section_wrapping", "consistent_spacing"]);
    }

    #[test]
    fn test_semantic_structure_pass() {
        let parsed =
            ParsedArtifact::parse("<header></header><nav></nav><main></main><footer></footer>");
        let result = detect_semantic_structure(&parsed, &rule("semantic_structure"));
        assert_eq!(result.status, RuleStatus::Pass);
    }

    #[test]
    fn test_semantic_structure_partial() {
        let parsed = ParsedArtifact::parse("<header></header><main></main>");
        let result = detect_semantic_structure(&parsed, &rule("semantic_structure"));
        assert_eq!(result.status, RuleStatus::Partial);
    }

    #[test]
    fn test_core_navigation_fail_without_nav() {
        let parsed = ParsedArtifact::parse("<main><a href=\"#\">one</a></main>");
        let result = detect_core_navigation(&parsed, &rule("core_navigation"));
        assert_eq!(result.status, RuleStatus::Fail);
    }

    #[test]
    fn test_image_alt_vacuous_pass() {
        let parsed = ParsedArtifact::parse("<main>no images</main>");
        let result = detect_image_alt_text(&parsed, &rule("image_alt_text"));
        assert_eq!(result.status, RuleStatus::Pass);
    }

    #[test]
    fn test_image_alt_partial() {
        let parsed = ParsedArtifact::parse("<img src=a alt=\"x\"><img src=b>");
        let result = detect_image_alt_text(&parsed, &rule("image_alt_text"));
        assert_eq!(result.status, RuleStatus::Partial);
    }

    #[test]
    fn test_focus_states_thresholds() {
        let none = ParsedArtifact::parse("<button class=\"px-4\">go</button>");
        assert_eq!(
            detect_focus_states(&none, &rule("focus_states")).status,
            RuleStatus::Fail
        );

        let some = ParsedArtifact::parse("<button class=\"focus:ring\">go</button>");
        assert_eq!(
            detect_focus_states(&some, &rule("focus_states")).status,
            RuleStatus::Partial
        );

        let plenty = ParsedArtifact::parse(
            "<a class=\"focus:ring\"></a><a class=\"focus:outline\"></a><button class=\"focus:ring-2\"></button>",
        );
        assert_eq!(
            detect_focus_states(&plenty, &rule("focus_states")).status,
            RuleStatus::Pass
        );
    }

    #[test]
    fn test_heading_hierarchy_skip() {
        let parsed = ParsedArtifact::parse("<h1>t</h1><h3>s</h3>");
        let result = detect_heading_hierarchy(&parsed, &rule("heading_hierarchy"));
        assert_eq!(result.status, RuleStatus::Partial);
    }

    #[test]
    fn test_generic_keyword_heuristic() {
        let spacing = rule("consistent_spacing");
        // "spacing", "padding", "margin", "scale" are present as words.
        let parsed = ParsedArtifact::parse(
            "<div>spacing scale uses padding and margin utilities consistently</div>",
        );
        let result = generic_keyword_detector(&parsed, &spacing);
        assert_eq!(result.status, RuleStatus::Pass);

        let empty = ParsedArtifact::parse("<div>unrelated</div>");
        let result = generic_keyword_detector(&empty, &spacing);
        assert_eq!(result.status, RuleStatus::Fail);
    }

    #[test]
    fn test_generic_rule_category_unused_in_detectors() {
        // Custom rules outside the builtin set always route to the heuristic.
        let custom = RuleDefinition {
            id: "brand_voice".to_string(),
            category: RuleCategory::Content,
            text: "Copy matches the brand voice guidelines".to_string(),
            mandatory: false,
        };
        assert!(detector_for(&custom.id).is_none());
        let parsed = ParsedArtifact::parse("<p>brand voice guidelines matched</p>");
        let result = generic_keyword_detector(&parsed, &custom);
        assert_eq!(result.status, RuleStatus::Pass);
    }
}
