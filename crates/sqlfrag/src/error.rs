//! Error types for sqlfrag

use thiserror::Error;

/// Result type alias for fragment operations
pub type FragmentResult<T> = Result<T, FragmentError>;

/// Errors raised while building or checking fragments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    /// List nesting exceeded the configured depth
    #[error("Nesting too deep: lists may nest at most {max} levels")]
    NestingTooDeep { max: usize },

    /// Template segments and holes do not alternate
    #[error("Template mismatch: {segments} text segments for {holes} values (expected {} segments)", .holes + 1)]
    TemplateMismatch { segments: usize, holes: usize },

    /// Fragment text and parameter list disagree
    #[error("Placeholder mismatch: {placeholders} placeholders for {params} params")]
    PlaceholderMismatch { placeholders: usize, params: usize },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl FragmentError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a nesting depth error
    pub fn is_nesting_too_deep(&self) -> bool {
        matches!(self, Self::NestingTooDeep { .. })
    }

    /// Check if this is a template mismatch error
    pub fn is_template_mismatch(&self) -> bool {
        matches!(self, Self::TemplateMismatch { .. })
    }
}

impl From<serde_json::Error> for FragmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
