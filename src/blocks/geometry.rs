//! Instrument position and transmitter loop geometry blocks

use super::BlockParser;
use super::field_parsers::{expect_fields, parse_f64, split_tokens};
use crate::constants::columns::{PARAM, X_M, Y_M, Z_M};
use crate::error::{Result, RowError};
use crate::models::{DesInfo, IndexedFrame, Section};
use polars::prelude::*;

/// Offsets of each sensor relative to the instrument reference point.
///
/// The parameter name may contain spaces; the last three tokens are x, y, z.
#[derive(Debug, Default)]
pub struct InstrumentPositionBlock {
    params: Vec<String>,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl BlockParser for InstrumentPositionBlock {
    fn section(&self) -> Section {
        Section::InstrumentPosition
    }

    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError> {
        let tokens = split_tokens(line);
        if tokens.len() < 3 {
            return Err(RowError::malformed(format!(
                "expected a parameter name followed by x, y and z, found {} token(s)",
                tokens.len()
            )));
        }

        let (name, coords) = tokens.split_at(tokens.len() - 3);
        let x = parse_f64(coords[0], X_M)?;
        let y = parse_f64(coords[1], Y_M)?;
        let z = parse_f64(coords[2], Z_M)?;

        self.params.push(name.join(" "));
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
        Ok(())
    }

    fn rows(&self) -> usize {
        self.params.len()
    }

    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()> {
        let block = *self;
        let frame = DataFrame::new(vec![
            Column::new(PARAM.into(), block.params),
            Column::new(X_M.into(), block.x),
            Column::new(Y_M.into(), block.y),
            Column::new(Z_M.into(), block.z),
        ])?;
        info.instrument_position = Some(IndexedFrame::new(frame, PARAM)?);
        Ok(())
    }
}

/// Vertices of the transmitter loop polygon
#[derive(Debug, Default)]
pub struct LoopGeometryBlock {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl BlockParser for LoopGeometryBlock {
    fn section(&self) -> Section {
        Section::LoopGeometry
    }

    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError> {
        let tokens = split_tokens(line);
        expect_fields(&tokens, 2, "x and y")?;

        let x = parse_f64(tokens[0], X_M)?;
        let y = parse_f64(tokens[1], Y_M)?;
        self.x.push(x);
        self.y.push(y);
        Ok(())
    }

    fn rows(&self) -> usize {
        self.x.len()
    }

    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()> {
        let block = *self;
        let frame = DataFrame::new(vec![
            Column::new(X_M.into(), block.x),
            Column::new(Y_M.into(), block.y),
        ])?;
        info.loop_geom_tx = Some(frame);
        Ok(())
    }
}
