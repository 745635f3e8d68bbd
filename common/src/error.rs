use std::error::Error;
use std::fmt;

/// Errors raised when an input is addressed by a name the form does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    UnknownField(String),
    UnknownFileField(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField(name) => write!(f, "unknown form field `{}`", name),
            FormError::UnknownFileField(name) => write!(f, "unknown attachment field `{}`", name),
        }
    }
}

impl Error for FormError {}

/// A failed render request. Always recoverable: the caller keeps its previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PDF rendering failed: {}", self.message)
    }
}

impl Error for RenderError {}

impl From<String> for RenderError {
    fn from(message: String) -> Self {
        RenderError::new(message)
    }
}
