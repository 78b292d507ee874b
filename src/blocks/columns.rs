//! Field channel description block.
//!
//! Each row describes one or more columns of the accompanying data file. The
//! first token is either a single column index or an inclusive `start:end`
//! range; ranges expand into numbered names (`Z_1`, `Z_2`, ...). The `LM_Z`
//! and `HM_Z` rows also carry the number of gates in their format code.

use super::BlockParser;
use super::field_parsers::{parse_i64, split_tokens};
use crate::constants::{GATE_COUNT_TOKEN, HM_Z_CHANNEL, LM_Z_CHANNEL, MAX_RANGE_COLUMNS};
use crate::error::{Result, RowError};
use crate::models::{DesInfo, Section};

#[derive(Debug, Default)]
pub struct ColumnDescriptionBlock {
    rows: usize,
    names: Vec<String>,
    n_lm_gates: Option<i64>,
    n_hm_gates: Option<i64>,
}

/// Column names described by one row's index token and channel name
pub fn expand_column_names(index: &str, channel: &str) -> std::result::Result<Vec<String>, RowError> {
    let Some((start, end)) = index.split_once(':') else {
        return Ok(vec![channel.to_string()]);
    };

    let start = parse_i64(start, "column range start")?;
    let end = parse_i64(end, "column range end")?;
    let count = end
        .checked_sub(start)
        .and_then(|span| span.checked_add(1))
        .filter(|count| *count <= MAX_RANGE_COLUMNS)
        .ok_or_else(|| {
            RowError::malformed(format!(
                "column range {} describes more than {} columns",
                index, MAX_RANGE_COLUMNS
            ))
        })?
        .max(0);

    Ok((1..=count).map(|n| format!("{}_{}", channel, n)).collect())
}

/// Gate count from a format code such as `26F`: one trailing `F`/`f` is
/// dropped and the rest must be an integer
pub fn parse_gate_count(format_code: &str) -> std::result::Result<i64, RowError> {
    let digits = format_code.strip_suffix(['F', 'f']).unwrap_or(format_code);
    parse_i64(digits, "gate count")
}

impl BlockParser for ColumnDescriptionBlock {
    fn section(&self) -> Section {
        Section::ColumnDescription
    }

    fn consume(&mut self, line: &str) -> std::result::Result<(), RowError> {
        let tokens = split_tokens(line);
        if tokens.len() < 2 {
            return Err(RowError::malformed(
                "expected a column index or range followed by a channel name",
            ));
        }

        let channel = tokens[1];
        self.rows += 1;
        self.names.extend(expand_column_names(tokens[0], channel)?);

        let upper = channel.to_uppercase();
        if upper == LM_Z_CHANNEL || upper == HM_Z_CHANNEL {
            let format_code = tokens.get(GATE_COUNT_TOKEN).ok_or_else(|| {
                RowError::malformed(format!(
                    "{} row has no format code at token {}",
                    upper,
                    GATE_COUNT_TOKEN + 1
                ))
            })?;
            let count = parse_gate_count(format_code)?;
            if upper == LM_Z_CHANNEL {
                self.n_lm_gates = Some(count);
            } else {
                self.n_hm_gates = Some(count);
            }
        }
        Ok(())
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn finish(self: Box<Self>, info: &mut DesInfo) -> Result<()> {
        let block = *self;
        info.col_name_list = Some(block.names);
        if block.n_lm_gates.is_some() {
            info.n_lm_gates = block.n_lm_gates;
        }
        if block.n_hm_gates.is_some() {
            info.n_hm_gates = block.n_hm_gates;
        }
        Ok(())
    }
}
