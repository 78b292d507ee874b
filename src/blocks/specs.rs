//! Hardware specification blocks.
//!
//! Transmitter and receiver specifications are free-form `key  value` pairs.
//! The waveform specification lists one feature per row with separate low and
//! high moment values.

use super::BlockParser;
use super::field_parsers::{split_wide, strip_value_prefix};
use crate::constants::columns::{FEATURE, HM, LM};
use crate::constants::{HM_SPLIT_MARKER, HM_VALUE_PREFIX, LM_VALUE_PREFIX};
use crate::error::{Result, RowError};
use crate::models::{DesInfo, IndexedFrame, Section, SpecMap};
use polars::prelude::*;
use tracing::debug;

/// Key/value block shared by the transmitter and receiver specifications
#[derive(Debug)]
pub struct SpecMapBlock {
    section: Section,
    entries: SpecMap,
}

impl SpecMapBlock {
    pub fn transmitter() -> Self {
        Self {
            section: Section::TransmitterSpecs,
            entries: SpecMap::new(),
        }
    }

    pub fn receiver() -> Self {
        Self {
            section: Section::ReceiverSpecs,
            entries: SpecMap::new(),
        }
    }
}

impl BlockParser for SpecMapBlock {
    fn section(&self) -> Section {
        self.section
    }

    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError> {
        let fields = split_wide(line);
        if fields.len() < 2 {
            return Err(RowError::malformed(
                "expected a key and a value separated by two or more spaces",
            ));
        }

        let key = fields[0].to_string();
        let value = fields[1].to_string();
        if let Some(previous) = self.entries.insert(key, value) {
            debug!(
                "Duplicate key '{}' in {}; replacing '{}'",
                fields[0], self.section, previous
            );
        }
        Ok(())
    }

    fn rows(&self) -> usize {
        self.entries.len()
    }

    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()> {
        let block = *self;
        match block.section {
            Section::ReceiverSpecs => info.receiver_specs = Some(block.entries),
            _ => info.transmitter_specs = Some(block.entries),
        }
        Ok(())
    }
}

/// Waveform features with their low and high moment values
#[derive(Debug, Default)]
pub struct TxWaveformSpecsBlock {
    features: Vec<String>,
    lm: Vec<String>,
    hm: Vec<String>,
}

/// Split one waveform specification row into `(feature, lm, hm)`.
///
/// Rows with only two wide-gap fields carry both values in the second field;
/// it is cut at the first `HM`. All parts are lower-cased and the `lm =` and
/// `hm =` labels removed after the cut.
pub fn split_waveform_spec(line: &str) -> std::result::Result<(String, String, String), RowError> {
    let fields = split_wide(line);
    let (feature, lm, hm) = match fields.as_slice() {
        [feature, values] => {
            let cut = values.find(HM_SPLIT_MARKER).ok_or_else(|| {
                RowError::malformed(format!(
                    "no '{}' marker separating low and high moment values in '{}'",
                    HM_SPLIT_MARKER, values
                ))
            })?;
            (feature.trim(), values[..cut].trim(), values[cut..].trim())
        }
        [feature, lm, hm] => (*feature, *lm, *hm),
        _ => {
            return Err(RowError::malformed(format!(
                "expected feature, LM and HM values, found {} field(s)",
                fields.len()
            )));
        }
    };

    let feature = feature.to_lowercase().trim().to_string();
    let lm = strip_value_prefix(&lm.to_lowercase(), LM_VALUE_PREFIX).to_string();
    let hm = strip_value_prefix(&hm.to_lowercase(), HM_VALUE_PREFIX).to_string();
    Ok((feature, lm, hm))
}

impl BlockParser for TxWaveformSpecsBlock {
    fn section(&self) -> Section {
        Section::TxWaveformSpecs
    }

    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError> {
        let (feature, lm, hm) = split_waveform_spec(line)?;
        self.features.push(feature);
        self.lm.push(lm);
        self.hm.push(hm);
        Ok(())
    }

    fn rows(&self) -> usize {
        self.features.len()
    }

    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()> {
        let block = *self;
        let frame = DataFrame::new(vec![
            Column::new(FEATURE.into(), block.features),
            Column::new(LM.into(), block.lm),
            Column::new(HM.into(), block.hm),
        ])?;
        info.tx_waveform_specs = Some(IndexedFrame::new(frame, FEATURE)?);
        Ok(())
    }
}
