//! Stage payload types
//!
//! Structured outputs produced by the pipeline stages. Each type corresponds
//! to exactly one field of the generation context; no two stages write the
//! same field.

use serde::{Deserialize, Serialize};

/// Structured specification derived from the natural-language request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSpec {
    /// Short title for the page being generated
    pub title: String,
    /// Industry the page targets (e.g. "dental", "saas", "restaurant")
    #[serde(default)]
    pub industry: Option<String>,
    /// Sections the page must contain, in order
    #[serde(default)]
    pub sections: Vec<String>,
    /// Target audience description
    #[serde(default)]
    pub audience: Option<String>,
}

/// Design system produced by the design stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignSystem {
    /// Named color tokens (e.g. "primary" -> "#0f766e")
    #[serde(default)]
    pub palette: Vec<ColorToken>,
    /// Font stack names
    #[serde(default)]
    pub fonts: Vec<String>,
    /// Base spacing unit in pixels
    #[serde(default)]
    pub spacing_unit: Option<u32>,
}

/// A single named color token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorToken {
    /// Token name
    pub name: String,
    /// Hex or CSS color value
    pub value: String,
}

/// Structured content payload produced by the content stage
///
/// These four shapes are the fixed schema the utilization analyzer walks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPayload {
    /// Hero section copy
    #[serde(default)]
    pub hero: Option<HeroContent>,
    /// Feature blurbs
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Customer testimonials
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    /// Headline statistics
    #[serde(default)]
    pub stats: Vec<Stat>,
}

/// Hero section content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroContent {
    /// Main headline
    pub headline: String,
    /// Supporting subheadline
    #[serde(default)]
    pub subheadline: Option<String>,
    /// Call-to-action label
    #[serde(default)]
    pub cta: Option<String>,
}

/// A single feature blurb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Feature title
    pub title: String,
    /// Feature description
    #[serde(default)]
    pub description: Option<String>,
}

/// A customer testimonial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    /// Quoted text
    pub quote: String,
    /// Attribution
    #[serde(default)]
    pub author: Option<String>,
}

/// A headline statistic, e.g. label "Uptime", value "99.9%"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    /// What the statistic measures
    pub label: String,
    /// The statistic value
    pub value: String,
}

/// Layout plan produced by the layout stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Ordered sections of the page
    #[serde(default)]
    pub sections: Vec<LayoutSection>,
}

/// A single planned section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSection {
    /// Section name (e.g. "hero", "features")
    pub name: String,
    /// Column count for the section grid
    #[serde(default)]
    pub columns: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_payload_roundtrip() {
        let payload = ContentPayload {
            hero: Some(HeroContent {
                headline: "Brighter smiles".to_string(),
                subheadline: None,
                cta: Some("Book now".to_string()),
            }),
            stats: vec![Stat { label: "Patients".to_string(), value: "12k+".to_string() }],
            ..Default::default()
        };

        let json = serde_json::to_string(&payload).unwrap();
        let back: ContentPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hero.unwrap().headline, "Brighter smiles");
        assert_eq!(back.stats[0].value, "12k+");
    }
}
