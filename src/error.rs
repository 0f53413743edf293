use thiserror::Error;

pub const INVALID_INPUT: &str = "invalid_input";
pub const UNSUPPORTED_FORMAT: &str = "unsupported_format";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unsupported format: {0}. Supported formats: openai, anthropic")]
    UnsupportedFormat(String),
}

impl ConvertError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Machine-checkable error category.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidInput(_) => INVALID_INPUT,
            ConvertError::UnsupportedFormat(_) => UNSUPPORTED_FORMAT,
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
