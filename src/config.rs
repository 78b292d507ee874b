//! Parser configuration and validation.
//!
//! The defaults reproduce the DES format as written by the acquisition
//! software; builders exist for files that deviate from it.

use crate::constants::DEFAULT_COMMENT_MARKER;
use crate::error::{DesError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a [`DesParser`](crate::parser::DesParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Literal prefix removed from every line before interpretation (None = keep lines as-is)
    pub comment_marker: Option<String>,

    /// Treat end of input inside a header preamble as the end of an empty
    /// section instead of an error
    pub lenient_preamble: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            comment_marker: Some(DEFAULT_COMMENT_MARKER.to_string()),
            lenient_preamble: false,
        }
    }
}

impl ParserConfig {
    /// Use a different comment marker
    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = Some(marker.into());
        self
    }

    /// Interpret lines without removing any comment marker
    pub fn without_comment_marker(mut self) -> Self {
        self.comment_marker = None;
        self
    }

    /// Accept files that end inside a header preamble
    pub fn with_lenient_preamble(mut self) -> Self {
        self.lenient_preamble = true;
        self
    }

    /// Reject markers that could never match a trimmed line
    pub fn validate(&self) -> Result<()> {
        if let Some(marker) = &self.comment_marker {
            if marker.is_empty() {
                return Err(DesError::Configuration {
                    message: "comment marker must not be empty".to_string(),
                });
            }
            if marker.starts_with(char::is_whitespace) {
                return Err(DesError::Configuration {
                    message: format!(
                        "comment marker '{}' starts with whitespace and can never match",
                        marker
                    ),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn comment_marker(&self) -> Option<&str> {
        self.comment_marker.as_deref()
    }
}
