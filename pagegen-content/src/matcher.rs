//! Usage matching cascade
//!
//! Decides whether one content element is detectably present in the artifact.
//! Strategies are evaluated in a fixed order; the first success wins, and
//! placeholder rejection overrides everything after it.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Content shorter than this is always treated as unused.
const MIN_CONTENT_LEN: usize = 2;
/// Partial word coverage only applies to content longer than this.
const PARTIAL_MIN_LEN: usize = 20;
/// Fraction of significant words that must appear for a partial match.
const PARTIAL_COVERAGE: f64 = 0.60;
/// Words at or below this length are not significant for partial matching.
const SIGNIFICANT_WORD_LEN: usize = 3;

/// Markers that identify placeholder copy regardless of artifact text.
const PLACEHOLDER_MARKERS: &[&str] =
    &["placeholder", "lorem ipsum", "your text here", "tbd", "todo", "xxx"];

static STAT_SHAPED: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[~<>+\-]?\d[\d,.]*\s*[%xX+kKmMbB]{0,2}$").expect("valid stat regex")
});

/// Which strategy established that an element is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Case-insensitive whitespace-normalized substring
    Exact,
    /// Format-aware match of a statistic-shaped value
    FormatAware,
    /// Whole-word coverage of long content
    PartialCoverage,
    /// Label counted as used through its paired value
    LabelLinkage,
}

/// Pre-processed view of the artifact, built once per analysis
pub struct ArtifactMatcher {
    /// Raw artifact, lowercased
    lower: String,
    /// Lowercased artifact with whitespace collapsed to single spaces
    normalized: String,
    /// Whole words appearing anywhere in the artifact
    words: HashSet<String>,
}

impl ArtifactMatcher {
    /// Pre-process the artifact text
    pub fn new(artifact: &str) -> Self {
        let lower = artifact.to_lowercase();
        let normalized = normalize(&lower);
        let words =
            lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).map(str::to_string).collect();
        Self { lower, normalized, words }
    }

    /// Run the cascade for one piece of content
    ///
    /// Returns the winning strategy, or `None` if the content is unused. The
    /// label/value linkage step needs sibling knowledge, so it is applied by
    /// the analyzer, not here.
    pub fn match_content(&self, content: &str) -> Option<MatchStrategy> {
        // 1. Placeholder rejection overrides any later match.
        if is_placeholder(content) {
            return None;
        }

        let normalized = normalize(&content.to_lowercase());

        // 2. Exact normalized substring.
        if self.normalized.contains(&normalized) {
            return Some(MatchStrategy::Exact);
        }

        // 3. Statistic-shaped values fall back to format-aware forms for
        //    markup-embedded occurrences.
        if is_stat_shaped(content) {
            return self.match_stat_value(&normalized);
        }

        // 4. Partial coverage for long content.
        if content.len() > PARTIAL_MIN_LEN && self.partial_coverage(&normalized) {
            return Some(MatchStrategy::PartialCoverage);
        }

        None
    }

    fn match_stat_value(&self, value: &str) -> Option<MatchStrategy> {
        let candidates = [
            format!("\"{}\"", value),   // quoted literal
            format!("'{}'", value),     // quoted literal
            format!("=\"{}\"", value),  // attribute-style assignment
            format!("='{}'", value),    // attribute-style assignment
            format!(">{}<", value),     // element text between tags
            format!("{{{}}}", value),   // templated interpolation
        ];
        if candidates.iter().any(|c| self.lower.contains(c.as_str())) {
            return Some(MatchStrategy::FormatAware);
        }
        None
    }

    fn partial_coverage(&self, normalized_content: &str) -> bool {
        let significant: Vec<&str> = normalized_content
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > SIGNIFICANT_WORD_LEN)
            .collect();
        if significant.is_empty() {
            return false;
        }
        let found = significant.iter().filter(|w| self.words.contains(**w)).count();
        found as f64 / significant.len() as f64 >= PARTIAL_COVERAGE
    }
}

/// Collapse all whitespace runs to single spaces and trim
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Placeholder content is always "unused"
pub fn is_placeholder(content: &str) -> bool {
    let trimmed = content.trim();
    if trimmed.len() < MIN_CONTENT_LEN {
        return true;
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return true;
    }
    let lower = trimmed.to_lowercase();
    PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m))
}

/// Whether the content looks like a statistic value ("95%", "12k+", "4.9")
pub fn is_stat_shaped(content: &str) -> bool {
    STAT_SHAPED.is_match(content.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_rejection_overrides_exact_match() {
        let matcher = ArtifactMatcher::new("<p>[PLACEHOLDER]</p>");
        assert_eq!(matcher.match_content("[PLACEHOLDER]"), None);
    }

    #[test]
    fn test_short_content_unused() {
        let matcher = ArtifactMatcher::new("<p>a</p>");
        assert_eq!(matcher.match_content("a"), None);
    }

    #[test]
    fn test_exact_match_normalizes_whitespace() {
        let matcher = ArtifactMatcher::new("<h1>Brighter\n   smiles for everyone</h1>");
        assert_eq!(
            matcher.match_content("brighter smiles  for everyone"),
            Some(MatchStrategy::Exact)
        );
    }

    #[test]
    fn test_stat_in_bare_text() {
        let matcher = ArtifactMatcher::new("<p>95% satisfaction guaranteed</p>");
        assert_eq!(matcher.match_content("95%"), Some(MatchStrategy::Exact));
    }

    #[test]
    fn test_stat_attribute_assignment() {
        // "95%" appears only inside an attribute, not as bare text.
        let matcher = ArtifactMatcher::new("<div data-target value=\"95%\">satisfaction</div>");
        assert!(matcher.match_content("95%").is_some());
    }

    #[test]
    fn test_stat_between_tags() {
        let matcher = ArtifactMatcher::new("<span class=\"stat\">12k+</span>");
        assert!(matcher.match_content("12k+").is_some());
    }

    #[test]
    fn test_stat_without_format_context_unused() {
        let matcher = ArtifactMatcher::new("<p>satisfaction is 95 percent</p>");
        assert_eq!(matcher.match_content("95%"), None);
    }

    #[test]
    fn test_partial_coverage() {
        let matcher = ArtifactMatcher::new(
            "<p>Our gentle dentistry practice offers modern whitening treatments</p>",
        );
        // 4 of 5 significant words present (missing "painless").
        assert_eq!(
            matcher.match_content("gentle painless whitening treatments practice"),
            Some(MatchStrategy::PartialCoverage)
        );
    }

    #[test]
    fn test_partial_coverage_requires_length() {
        let matcher = ArtifactMatcher::new("<p>gentle whitening</p>");
        // Too short for partial coverage; not an exact substring either.
        assert_eq!(matcher.match_content("gentle polishing"), None);
    }

    #[test]
    fn test_is_stat_shaped() {
        assert!(is_stat_shaped("95%"));
        assert!(is_stat_shaped("12k+"));
        assert!(is_stat_shaped("4.9"));
        assert!(is_stat_shaped("~200"));
        assert!(!is_stat_shaped("fast shipping"));
    }
}
