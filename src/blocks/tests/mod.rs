//! Test utilities for block parser testing
//!
//! This module provides helpers that drive a single block parser directly,
//! without going through header recognition.

use super::{BlockParser, block_for};
use crate::error::RowError;
use crate::models::{DesInfo, Section};

// Test modules
mod column_tests;
mod spec_tests;

/// Feed `lines` to a fresh block for `section` and materialize it
pub fn run_block(section: Section, lines: &[&str]) -> DesInfo {
    try_run_block(section, lines).unwrap()
}

/// Like [`run_block`], returning the first row error instead of panicking
pub fn try_run_block(section: Section, lines: &[&str]) -> Result<DesInfo, RowError> {
    let mut block = block_for(section);
    for line in lines {
        block.consume(line)?;
    }
    let mut info = DesInfo::default();
    block.finish(&mut info).unwrap();
    Ok(info)
}

/// Block for `section` after consuming `lines`
pub fn filled_block(section: Section, lines: &[&str]) -> Box<dyn BlockParser> {
    let mut block = block_for(section);
    for line in lines {
        block.consume(line).unwrap();
    }
    block
}
