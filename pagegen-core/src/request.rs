//! Generation requests
//!
//! A [`GenerationRequest`] is created once per pipeline invocation and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// Generation mode selected by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Full pipeline with enrichment stages and the convergence loop
    #[default]
    Standard,
    /// Fast single-pass draft (enrichment still best-effort)
    Draft,
}

/// An immutable natural-language generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user's natural-language request text
    pub request_text: String,
    /// Session this request belongs to
    pub session_id: String,
    /// Generation mode
    #[serde(default)]
    pub mode: GenerationMode,
}

impl GenerationRequest {
    /// Create a request with the default mode
    pub fn new(request_text: &str, session_id: &str) -> Self {
        Self {
            request_text: request_text.to_string(),
            session_id: session_id.to_string(),
            mode: GenerationMode::default(),
        }
    }

    /// Set the generation mode
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = GenerationRequest::new("landing page for a dental clinic", "sess-1")
            .with_mode(GenerationMode::Draft);
        assert_eq!(req.session_id, "sess-1");
        assert_eq!(req.mode, GenerationMode::Draft);
    }

    #[test]
    fn test_default_mode() {
        let req = GenerationRequest::new("pricing page", "sess-2");
        assert_eq!(req.mode, GenerationMode::Standard);
    }
}
