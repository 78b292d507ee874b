//! DES section header recognition and preamble handling.
//!
//! While the parser is scanning, every normalized line is upper-cased, split on
//! whitespace and compared with the header pattern of each section in priority
//! order. Headers of tabular sections are followed by column titles and units
//! that are consumed here so the block parsers only ever see data rows.

use crate::error::{DesError, Result};
use crate::line_source::LineSource;
use crate::models::{Preamble, Section, TokenMatch};
use std::io::BufRead;
use tracing::{debug, warn};

/// Section whose header matches `line`, if any
pub fn recognize_header(line: &str) -> Option<Section> {
    let upper = line.to_uppercase();
    let tokens: Vec<&str> = upper.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    Section::ALL
        .into_iter()
        .find(|section| matches_pattern(&tokens, section.header_pattern()))
}

fn matches_pattern(tokens: &[&str], (pattern, mode): (&[&str], TokenMatch)) -> bool {
    match mode {
        TokenMatch::Leading => tokens.len() >= pattern.len() && &tokens[..pattern.len()] == pattern,
        TokenMatch::Exact => tokens == pattern,
    }
}

/// Consume the preamble lines that follow the header of `section`.
///
/// Sentinel search runs on raw lines. Running out of input before the sentinel
/// appears is an error unless `lenient` is set.
pub fn discard_preamble<R: BufRead>(
    source: &mut LineSource<R>,
    section: Section,
    lenient: bool,
) -> Result<()> {
    let header_line = source.line_number();

    match section.preamble() {
        Preamble::None => Ok(()),
        Preamble::SingleLine => {
            // Nothing left to discard is not an error; the block is simply empty
            source.next_line()?;
            Ok(())
        }
        Preamble::UntilSentinel(sentinel) => {
            let mut discarded = 0usize;
            while let Some(line) = source.next_line()? {
                discarded += 1;
                if line.contains(sentinel) {
                    debug!(
                        "Discarded {} preamble line(s) for {} header at line {}",
                        discarded, section, header_line
                    );
                    return Ok(());
                }
            }

            if lenient {
                warn!(
                    "No '{}' after {} header at line {}; input ended in preamble",
                    sentinel, section, header_line
                );
                Ok(())
            } else {
                Err(DesError::UnterminatedPreamble {
                    section,
                    header_line,
                })
            }
        }
    }
}
