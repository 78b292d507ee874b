//! Valid gate time blocks (low and high moment)
//!
//! Every value is read as a float, as written in the file. The gate number is
//! truncated to an integer afterwards and doubles as the table index and as
//! the ordered gate list handed to downstream code.

use super::BlockParser;
use super::field_parsers::{expect_fields, float_to_i64, parse_f64, split_tokens};
use crate::constants::columns::{CENTRE_US, CLOSE_US, GATE, GATE_COLUMNS, OPEN_US, WIDTH_US};
use crate::error::{Result, RowError};
use crate::models::{DesInfo, IndexedFrame, Section};
use polars::prelude::*;

#[derive(Debug)]
pub struct ValidGatesBlock {
    section: Section,
    gate: Vec<i64>,
    width: Vec<f64>,
    open: Vec<f64>,
    centre: Vec<f64>,
    close: Vec<f64>,
}

impl ValidGatesBlock {
    pub fn low_moment() -> Self {
        Self::new(Section::ValidGatesLM)
    }

    pub fn high_moment() -> Self {
        Self::new(Section::ValidGatesHM)
    }

    fn new(section: Section) -> Self {
        Self {
            section,
            gate: Vec::new(),
            width: Vec::new(),
            open: Vec::new(),
            centre: Vec::new(),
            close: Vec::new(),
        }
    }
}

impl BlockParser for ValidGatesBlock {
    fn section(&self) -> Section {
        self.section
    }

    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError> {
        let tokens = split_tokens(line);
        expect_fields(&tokens, GATE_COLUMNS.len(), "gate, width, open, centre, close")?;

        let mut values = [0.0f64; 5];
        for (slot, (token, column)) in values.iter_mut().zip(tokens.iter().zip(GATE_COLUMNS)) {
            *slot = parse_f64(token, column)?;
        }
        let gate = float_to_i64(values[0], GATE)?;

        self.gate.push(gate);
        self.width.push(values[1]);
        self.open.push(values[2]);
        self.centre.push(values[3]);
        self.close.push(values[4]);
        Ok(())
    }

    fn rows(&self) -> usize {
        self.gate.len()
    }

    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()> {
        let block = *self;
        let gate_list = block.gate.clone();
        let frame = DataFrame::new(vec![
            Column::new(GATE.into(), block.gate),
            Column::new(WIDTH_US.into(), block.width),
            Column::new(OPEN_US.into(), block.open),
            Column::new(CENTRE_US.into(), block.centre),
            Column::new(CLOSE_US.into(), block.close),
        ])?;
        let table = IndexedFrame::new(frame, GATE)?;

        match block.section {
            Section::ValidGatesHM => {
                info.validgates_hm = Some(table);
                info.validgate_list_hm = Some(gate_list);
            }
            _ => {
                info.validgates_lm = Some(table);
                info.validgate_list_lm = Some(gate_list);
            }
        }
        Ok(())
    }
}
