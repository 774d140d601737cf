//! Content element extraction
//!
//! Flattens a [`ContentPayload`] into [`ContentElement`]s by walking the four
//! known section shapes. Each shape has its own extraction function; malformed
//! entries are skipped with a warning and never abort the pipeline.

use pagegen_core::types::{ContentPayload, Feature, HeroContent, Stat, Testimonial};
use serde::{Deserialize, Serialize};

/// Hero section fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroField {
    /// Main headline
    Headline,
    /// Supporting subheadline
    Subheadline,
    /// Call-to-action label
    Cta,
}

/// Feature entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    /// Feature title
    Title,
    /// Feature description
    Description,
}

/// Testimonial entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestimonialField {
    /// Quoted text
    Quote,
    /// Attribution
    Author,
}

/// Statistic entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    /// What the statistic measures
    Label,
    /// The statistic value
    Value,
}

/// Tagged identity of a content element: section category plus index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ElementKind {
    /// Hero section field
    Hero {
        /// Which hero field
        field: HeroField,
    },
    /// Feature entry field
    Feature {
        /// Index in the features array
        index: usize,
        /// Which feature field
        field: FeatureField,
    },
    /// Testimonial entry field
    Testimonial {
        /// Index in the testimonials array
        index: usize,
        /// Which testimonial field
        field: TestimonialField,
    },
    /// Statistic entry field
    Stat {
        /// Index in the stats array
        index: usize,
        /// Which stat field
        field: StatField,
    },
}

impl ElementKind {
    /// Section name for grouping in reports
    pub fn section(&self) -> &'static str {
        match self {
            Self::Hero { .. } => "hero",
            Self::Feature { .. } => "features",
            Self::Testimonial { .. } => "testimonials",
            Self::Stat { .. } => "stats",
        }
    }

    /// Whether this element type is on the critical allowlist
    pub fn is_critical_type(&self) -> bool {
        matches!(
            self,
            Self::Hero { field: HeroField::Headline }
                | Self::Hero { field: HeroField::Cta }
                | Self::Stat { field: StatField::Value, .. }
        )
    }

    /// Human-readable description for recommendations
    pub fn describe(&self) -> String {
        match self {
            Self::Hero { field } => format!("hero {:?}", field).to_lowercase(),
            Self::Feature { index, field } => {
                format!("feature #{} {:?}", index + 1, field).to_lowercase()
            }
            Self::Testimonial { index, field } => {
                format!("testimonial #{} {:?}", index + 1, field).to_lowercase()
            }
            Self::Stat { index, field } => {
                format!("stat #{} {:?}", index + 1, field).to_lowercase()
            }
        }
    }
}

/// How strongly a missing element should be flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Absence is a blocking issue
    Critical,
    /// Should appear in any faithful artifact
    High,
    /// Nice to have
    Medium,
}

/// One flattened content element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentElement {
    /// Tagged identity
    pub kind: ElementKind,
    /// The supplied text
    pub content: String,
    /// Flagging priority
    pub priority: Priority,
}

impl ContentElement {
    fn new(kind: ElementKind, content: &str, priority: Priority) -> Self {
        Self { kind, content: content.to_string(), priority }
    }
}

/// Flatten a content payload into elements, one extraction function per shape
pub fn extract_elements(payload: &ContentPayload) -> Vec<ContentElement> {
    let mut elements = Vec::new();
    if let Some(hero) = &payload.hero {
        extract_hero(hero, &mut elements);
    }
    extract_features(&payload.features, &mut elements);
    extract_testimonials(&payload.testimonials, &mut elements);
    extract_stats(&payload.stats, &mut elements);
    elements
}

fn extract_hero(hero: &HeroContent, out: &mut Vec<ContentElement>) {
    if hero.headline.trim().is_empty() {
        tracing::warn!("hero headline empty, skipping");
    } else {
        out.push(ContentElement::new(
            ElementKind::Hero { field: HeroField::Headline },
            &hero.headline,
            Priority::Critical,
        ));
    }
    if let Some(sub) = &hero.subheadline {
        out.push(ContentElement::new(
            ElementKind::Hero { field: HeroField::Subheadline },
            sub,
            Priority::High,
        ));
    }
    if let Some(cta) = &hero.cta {
        out.push(ContentElement::new(
            ElementKind::Hero { field: HeroField::Cta },
            cta,
            Priority::Critical,
        ));
    }
}

fn extract_features(features: &[Feature], out: &mut Vec<ContentElement>) {
    for (index, feature) in features.iter().enumerate() {
        if feature.title.trim().is_empty() {
            tracing::warn!(index, "feature title empty, skipping entry");
            continue;
        }
        out.push(ContentElement::new(
            ElementKind::Feature { index, field: FeatureField::Title },
            &feature.title,
            Priority::High,
        ));
        if let Some(desc) = &feature.description {
            out.push(ContentElement::new(
                ElementKind::Feature { index, field: FeatureField::Description },
                desc,
                Priority::Medium,
            ));
        }
    }
}

fn extract_testimonials(testimonials: &[Testimonial], out: &mut Vec<ContentElement>) {
    for (index, testimonial) in testimonials.iter().enumerate() {
        if testimonial.quote.trim().is_empty() {
            tracing::warn!(index, "testimonial quote empty, skipping entry");
            continue;
        }
        out.push(ContentElement::new(
            ElementKind::Testimonial { index, field: TestimonialField::Quote },
            &testimonial.quote,
            Priority::High,
        ));
        if let Some(author) = &testimonial.author {
            out.push(ContentElement::new(
                ElementKind::Testimonial { index, field: TestimonialField::Author },
                author,
                Priority::Medium,
            ));
        }
    }
}

fn extract_stats(stats: &[Stat], out: &mut Vec<ContentElement>) {
    for (index, stat) in stats.iter().enumerate() {
        if stat.value.trim().is_empty() {
            tracing::warn!(index, "stat value empty, skipping entry");
            continue;
        }
        out.push(ContentElement::new(
            ElementKind::Stat { index, field: StatField::Label },
            &stat.label,
            Priority::Medium,
        ));
        out.push(ContentElement::new(
            ElementKind::Stat { index, field: StatField::Value },
            &stat.value,
            Priority::Critical,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_shapes() {
        let payload = ContentPayload {
            hero: Some(HeroContent {
                headline: "Brighter smiles".into(),
                subheadline: Some("Gentle modern dentistry".into()),
                cta: Some("Book a visit".into()),
            }),
            features: vec![Feature {
                title: "Same-day crowns".into(),
                description: Some("CEREC milling in one visit".into()),
            }],
            testimonials: vec![Testimonial {
                quote: "Best dentist in town".into(),
                author: Some("Ana R.".into()),
            }],
            stats: vec![Stat { label: "Patient satisfaction".into(), value: "95%".into() }],
        };

        let elements = extract_elements(&payload);
        assert_eq!(elements.len(), 9);
        assert!(elements.iter().any(|e| matches!(
            e.kind,
            ElementKind::Stat { index: 0, field: StatField::Value }
        )));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let payload = ContentPayload {
            features: vec![
                Feature { title: "   ".into(), description: Some("orphan".into()) },
                Feature { title: "Real feature".into(), description: None },
            ],
            ..Default::default()
        };

        let elements = extract_elements(&payload);
        assert_eq!(elements.len(), 1);
        assert!(matches!(elements[0].kind, ElementKind::Feature { index: 1, .. }));
    }

    #[test]
    fn test_critical_type_allowlist() {
        assert!(ElementKind::Hero { field: HeroField::Headline }.is_critical_type());
        assert!(ElementKind::Stat { index: 0, field: StatField::Value }.is_critical_type());
        assert!(!ElementKind::Stat { index: 0, field: StatField::Label }.is_critical_type());
        assert!(
            !ElementKind::Feature { index: 0, field: FeatureField::Title }.is_critical_type()
        );
    }
}
