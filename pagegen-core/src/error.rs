#[derive(Debug, thiserror::Error)]
pub enum PagegenError {
    #[error("Stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Content error: {0}")]
    Content(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PagegenError {
    /// Build a stage failure for the given stage name.
    pub fn stage(stage: &str, message: impl Into<String>) -> Self {
        Self::Stage { stage: stage.to_string(), message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, PagegenError>;
