//! Parsed artifact representation
//!
//! Detectors operate over one [`ParsedArtifact`] built once per scoring pass
//! instead of each detector re-scanning raw text. The parse is intentionally
//! shallow: tag names, class tokens, and attribute names are enough for every
//! detector in the catalog.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static TAG_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)").expect("valid tag regex"));
static CLASS_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"class\s*=\s*["']([^"']*)["']"#).expect("valid class regex")
});
static ATTR_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)\s*=\s*["']"#).expect("valid attr regex")
});
static IMG_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"<img\b[^>]*>").expect("valid img regex"));
static HEADING_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"<h([1-6])\b").expect("valid heading regex"));
static HEX_COLOR_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"#[0-9a-fA-F]{3}(?:[0-9a-fA-F]{3})?\b").expect("valid hex regex")
});

/// Shared parsed view of an artifact for one scoring pass
#[derive(Debug, Clone)]
pub struct ParsedArtifact {
    /// Raw artifact text
    pub raw: String,
    /// Lowercased artifact text
    pub lower: String,
    /// Tag name -> occurrence count
    pub tags: HashMap<String, usize>,
    /// All class tokens across all class attributes
    pub classes: HashSet<String>,
    /// All attribute names that carry a value
    pub attrs: HashSet<String>,
    /// Whole words appearing anywhere in the text
    pub words: HashSet<String>,
    /// Number of img elements
    pub img_count: usize,
    /// Number of img elements carrying alt text
    pub img_alt_count: usize,
    /// Heading levels in document order
    pub heading_levels: Vec<u8>,
    /// Raw hex color literals found outside the token system
    pub raw_hex_colors: usize,
}

impl ParsedArtifact {
    /// Parse the artifact text once
    pub fn parse(artifact: &str) -> Self {
        let raw = artifact.to_string();
        let lower = artifact.to_lowercase();

        let mut tags: HashMap<String, usize> = HashMap::new();
        for cap in TAG_RE.captures_iter(&lower) {
            *tags.entry(cap[1].to_string()).or_insert(0) += 1;
        }

        let mut classes: HashSet<String> = HashSet::new();
        for cap in CLASS_RE.captures_iter(&lower) {
            for token in cap[1].split_whitespace() {
                classes.insert(token.to_string());
            }
        }

        let attrs: HashSet<String> =
            ATTR_RE.captures_iter(&lower).map(|cap| cap[1].to_string()).collect();

        let words: HashSet<String> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        let mut img_count = 0;
        let mut img_alt_count = 0;
        for m in IMG_RE.find_iter(&lower) {
            img_count += 1;
            if m.as_str().contains("alt=") {
                img_alt_count += 1;
            }
        }

        let heading_levels: Vec<u8> = HEADING_RE
            .captures_iter(&lower)
            .filter_map(|cap| cap[1].parse().ok())
            .collect();

        let raw_hex_colors = HEX_COLOR_RE.find_iter(&raw).count();

        Self {
            raw,
            lower,
            tags,
            classes,
            attrs,
            words,
            img_count,
            img_alt_count,
            heading_levels,
            raw_hex_colors,
        }
    }

    /// Whether at least one tag with this name exists
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// How many tags with this name exist
    pub fn tag_count(&self, name: &str) -> usize {
        self.tags.get(name).copied().unwrap_or(0)
    }

    /// How many class tokens start with this prefix (e.g. "hover:")
    pub fn classes_with_prefix(&self, prefix: &str) -> usize {
        self.classes.iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Whether any class token contains this fragment
    pub fn has_class_containing(&self, fragment: &str) -> bool {
        self.classes.iter().any(|c| c.contains(fragment))
    }

    /// Whether an attribute with this name appears anywhere
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains(name)
    }

    /// Whether this word appears as a whole word anywhere in the text
    pub fn has_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        <header><nav><a href="#services">Services</a><a href="#contact">Contact</a></nav></header>
        <main>
            <h1 class="text-4xl focus:ring hover:underline">Brighter smiles</h1>
            <img src="team.jpg" alt="Our team">
            <img src="office.jpg">
            <h3>Skipped level</h3>
            <button class="bg-teal-600 md:px-6" style="color:#ff0000">Book</button>
        </main>
        <footer></footer>
    "##;

    #[test]
    fn test_tag_counts() {
        let parsed = ParsedArtifact::parse(SAMPLE);
        assert!(parsed.has_tag("nav"));
        assert!(parsed.has_tag("footer"));
        assert_eq!(parsed.tag_count("a"), 2);
        assert_eq!(parsed.tag_count("img"), 2);
    }

    #[test]
    fn test_class_tokens() {
        let parsed = ParsedArtifact::parse(SAMPLE);
        assert_eq!(parsed.classes_with_prefix("hover:"), 1);
        assert_eq!(parsed.classes_with_prefix("focus:"), 1);
        assert_eq!(parsed.classes_with_prefix("md:"), 1);
        assert!(parsed.has_class_containing("teal"));
    }

    #[test]
    fn test_img_alt_counts() {
        let parsed = ParsedArtifact::parse(SAMPLE);
        assert_eq!(parsed.img_count, 2);
        assert_eq!(parsed.img_alt_count, 1);
    }

    #[test]
    fn test_heading_levels_in_order() {
        let parsed = ParsedArtifact::parse(SAMPLE);
        assert_eq!(parsed.heading_levels, vec![1, 3]);
    }

    #[test]
    fn test_raw_hex_colors() {
        let parsed = ParsedArtifact::parse(SAMPLE);
        assert_eq!(parsed.raw_hex_colors, 1);
    }
}
