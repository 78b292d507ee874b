//! Block parsers for the sections of a DES file
//!
//! Each section kind has its own accumulator. The state machine in
//! [`parser`](crate::parser) feeds it normalized lines until its termination
//! predicate fires (or input ends), then asks it to materialize its rows into
//! the result.
//!
//! ## Architecture
//!
//! - [`geometry`] - Instrument position offsets and transmitter loop polygon
//! - [`specs`] - Transmitter, receiver and waveform specifications
//! - [`waveform`] - Sampled low/high moment transmitter waveforms
//! - [`gates`] - Valid low/high moment gate times
//! - [`columns`] - Field channel description of the data file
//! - [`field_parsers`] - Row splitting and typed field conversion

pub mod columns;
pub mod field_parsers;
pub mod gates;
pub mod geometry;
pub mod specs;
pub mod waveform;

#[cfg(test)]
pub mod tests;

use crate::constants::DASHED_TERMINATOR;
use crate::error::{Result, RowError};
use crate::models::{DesInfo, Section};
use std::fmt;

pub use columns::ColumnDescriptionBlock;
pub use gates::ValidGatesBlock;
pub use geometry::{InstrumentPositionBlock, LoopGeometryBlock};
pub use specs::{SpecMapBlock, TxWaveformSpecsBlock};
pub use waveform::WaveformBlock;

/// Accumulator for the rows of one section
pub trait BlockParser: fmt::Debug {
    fn section(&self) -> Section;

    /// Whether `line` ends the block. The terminating line is not a row.
    fn is_terminator(&self, line: &str) -> bool {
        line.is_empty() || (self.section().ends_on_dashes() && line.contains(DASHED_TERMINATOR))
    }

    /// Parse one data row
    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError>;

    /// Number of rows consumed so far
    fn rows(&self) -> usize;

    /// Materialize the accumulated rows into `info`, replacing any earlier
    /// output of the same section
    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()>;
}

/// Fresh accumulator for `section`
pub fn block_for(section: Section) -> Box<dyn BlockParser> {
    match section {
        Section::InstrumentPosition => Box::new(InstrumentPositionBlock::default()),
        Section::LoopGeometry => Box::new(LoopGeometryBlock::default()),
        Section::TransmitterSpecs => Box::new(SpecMapBlock::transmitter()),
        Section::TxWaveformSpecs => Box::new(TxWaveformSpecsBlock::default()),
        Section::ReceiverSpecs => Box::new(SpecMapBlock::receiver()),
        Section::TxWaveformLM => Box::new(WaveformBlock::low_moment()),
        Section::TxWaveformHM => Box::new(WaveformBlock::high_moment()),
        Section::ValidGatesLM => Box::new(ValidGatesBlock::low_moment()),
        Section::ValidGatesHM => Box::new(ValidGatesBlock::high_moment()),
        Section::ColumnDescription => Box::new(ColumnDescriptionBlock::default()),
    }
}
