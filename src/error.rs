//! Error handling for DES parsing operations.
//!
//! Every failure is fatal for the parse that raised it: the caller receives a
//! single error carrying the section and the offending line, never a partial
//! result.

use crate::models::Section;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("DES file not found at path: {path}")]
    FileNotFound { path: PathBuf },

    #[error(
        "Header of section {section} at line {header_line} has no preamble terminator before end of input"
    )]
    UnterminatedPreamble { section: Section, header_line: usize },

    #[error(
        "Cannot parse '{value}' as {expected} for column '{column}' in section {section}, line {line_number}: '{line}'"
    )]
    TypeCast {
        section: Section,
        line_number: usize,
        line: String,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Malformed row in section {section}, line {line_number}: {reason} ('{line}')")]
    MalformedRow {
        section: Section,
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DesError {
    /// True for failures caused by a field that did not convert to its column type
    pub fn is_type_cast(&self) -> bool {
        matches!(self, DesError::TypeCast { .. })
    }

    /// Section the failing line belonged to, if the error is tied to one
    pub fn section(&self) -> Option<Section> {
        match self {
            DesError::UnterminatedPreamble { section, .. }
            | DesError::TypeCast { section, .. }
            | DesError::MalformedRow { section, .. } => Some(*section),
            _ => None,
        }
    }
}

/// Row-level failure raised by a block parser before the line context is known.
///
/// The state machine attaches the section, line number and line text when it
/// converts this into a [`DesError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("cannot parse '{value}' as {expected} for column '{column}'")]
    TypeCast {
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Malformed(String),
}

impl RowError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        RowError::Malformed(reason.into())
    }

    /// Attach the location of the offending line
    pub fn at(self, section: Section, line_number: usize, line: &str) -> DesError {
        match self {
            RowError::TypeCast {
                column,
                value,
                expected,
            } => DesError::TypeCast {
                section,
                line_number,
                line: line.to_string(),
                column,
                value,
                expected,
            },
            RowError::Malformed(reason) => DesError::MalformedRow {
                section,
                line_number,
                line: line.to_string(),
                reason,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DesError>;
