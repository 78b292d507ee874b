//! Sampled transmitter waveform blocks (low and high moment)

use super::BlockParser;
use super::field_parsers::{expect_fields, parse_f64, split_tokens};
use crate::constants::columns::{AMPLITUDE, TIME_S};
use crate::error::{Result, RowError};
use crate::models::{DesInfo, Section};
use polars::prelude::*;

#[derive(Debug)]
pub struct WaveformBlock {
    section: Section,
    time: Vec<f64>,
    amplitude: Vec<f64>,
}

impl WaveformBlock {
    pub fn low_moment() -> Self {
        Self::new(Section::TxWaveformLM)
    }

    pub fn high_moment() -> Self {
        Self::new(Section::TxWaveformHM)
    }

    fn new(section: Section) -> Self {
        Self {
            section,
            time: Vec::new(),
            amplitude: Vec::new(),
        }
    }
}

impl BlockParser for WaveformBlock {
    fn section(&self) -> Section {
        self.section
    }

    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError> {
        let tokens = split_tokens(line);
        expect_fields(&tokens, 2, "time and amplitude")?;

        let time = parse_f64(tokens[0], TIME_S)?;
        let amplitude = parse_f64(tokens[1], AMPLITUDE)?;
        self.time.push(time);
        self.amplitude.push(amplitude);
        Ok(())
    }

    fn rows(&self) -> usize {
        self.time.len()
    }

    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()> {
        let block = *self;
        let frame = DataFrame::new(vec![
            Column::new(TIME_S.into(), block.time),
            Column::new(AMPLITUDE.into(), block.amplitude),
        ])?;
        match block.section {
            Section::TxWaveformHM => info.txwaveform_hm = Some(frame),
            _ => info.txwaveform_lm = Some(frame),
        }
        Ok(())
    }
}
