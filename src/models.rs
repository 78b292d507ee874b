//! Core data structures and types for DES parsing.
//!
//! Defines the section kinds recognized in a DES file, the parser state,
//! the table wrappers handed out to callers and the aggregated parse result.

use crate::constants::{BRACKET_SENTINEL, PAREN_SENTINEL, headers};
use crate::error::Result;
use indexmap::IndexMap;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section kinds of a DES file, in header-matching priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    InstrumentPosition,
    LoopGeometry,
    TransmitterSpecs,
    TxWaveformSpecs,
    ReceiverSpecs,
    TxWaveformLM,
    TxWaveformHM,
    ValidGatesLM,
    ValidGatesHM,
    ColumnDescription,
}

/// How header tokens are compared against a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    /// The pattern must equal the leading tokens of the line
    Leading,
    /// The pattern must equal the whole token list of the line
    Exact,
}

/// Lines following a header that belong to the header rather than the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preamble {
    None,
    /// Exactly one line (column titles)
    SingleLine,
    /// Every line up to and including the first containing the sentinel
    UntilSentinel(char),
}

impl Section {
    /// All sections in the order their headers are tested
    pub const ALL: [Section; 10] = [
        Section::InstrumentPosition,
        Section::LoopGeometry,
        Section::TransmitterSpecs,
        Section::TxWaveformSpecs,
        Section::ReceiverSpecs,
        Section::TxWaveformLM,
        Section::TxWaveformHM,
        Section::ValidGatesLM,
        Section::ValidGatesHM,
        Section::ColumnDescription,
    ];

    /// Upper-cased header tokens and how they are matched
    pub fn header_pattern(&self) -> (&'static [&'static str], TokenMatch) {
        match self {
            Section::InstrumentPosition => (headers::INSTRUMENT_POSITION, TokenMatch::Leading),
            Section::LoopGeometry => (headers::LOOP_GEOMETRY, TokenMatch::Leading),
            Section::TransmitterSpecs => (headers::TRANSMITTER_SPECS, TokenMatch::Exact),
            Section::TxWaveformSpecs => (headers::TX_WAVEFORM_SPECS, TokenMatch::Exact),
            Section::ReceiverSpecs => (headers::RECEIVER_SPECS, TokenMatch::Exact),
            Section::TxWaveformLM => (headers::TX_WAVEFORM_LM, TokenMatch::Leading),
            Section::TxWaveformHM => (headers::TX_WAVEFORM_HM, TokenMatch::Leading),
            Section::ValidGatesLM => (headers::VALID_GATES_LM, TokenMatch::Leading),
            Section::ValidGatesHM => (headers::VALID_GATES_HM, TokenMatch::Leading),
            Section::ColumnDescription => (headers::COLUMN_DESCRIPTION, TokenMatch::Leading),
        }
    }

    pub fn preamble(&self) -> Preamble {
        match self {
            Section::InstrumentPosition | Section::ValidGatesLM | Section::ValidGatesHM => {
                Preamble::UntilSentinel(PAREN_SENTINEL)
            }
            Section::TxWaveformLM | Section::TxWaveformHM => {
                Preamble::UntilSentinel(BRACKET_SENTINEL)
            }
            Section::LoopGeometry => Preamble::SingleLine,
            Section::TransmitterSpecs
            | Section::TxWaveformSpecs
            | Section::ReceiverSpecs
            | Section::ColumnDescription => Preamble::None,
        }
    }

    /// Whether a line containing `---` also ends this block.
    ///
    /// The high moment waveform block only ends on an empty line.
    pub fn ends_on_dashes(&self) -> bool {
        matches!(
            self,
            Section::TxWaveformSpecs | Section::ReceiverSpecs | Section::TxWaveformLM
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Section::InstrumentPosition => "instrument position",
            Section::LoopGeometry => "tx loop geometry",
            Section::TransmitterSpecs => "transmitter specifications",
            Section::TxWaveformSpecs => "tx waveform specifications",
            Section::ReceiverSpecs => "receiver specifications",
            Section::TxWaveformLM => "LM tx waveform",
            Section::TxWaveformHM => "HM tx waveform",
            Section::ValidGatesLM => "LM gate times",
            Section::ValidGatesHM => "HM gate times",
            Section::ColumnDescription => "field channel description",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Well-known keys of the parse result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKey {
    InstrumentPosition,
    LoopGeomTx,
    TransmitterSpecs,
    TxWaveformSpecs,
    ReceiverSpecs,
    TxWaveformLm,
    TxWaveformHm,
    ValidGatesLm,
    ValidGateListLm,
    ValidGatesHm,
    ValidGateListHm,
    ColNameList,
    NLmGates,
    NHmGates,
}

impl OutputKey {
    pub const ALL: [OutputKey; 14] = [
        OutputKey::InstrumentPosition,
        OutputKey::LoopGeomTx,
        OutputKey::TransmitterSpecs,
        OutputKey::TxWaveformSpecs,
        OutputKey::ReceiverSpecs,
        OutputKey::TxWaveformLm,
        OutputKey::TxWaveformHm,
        OutputKey::ValidGatesLm,
        OutputKey::ValidGateListLm,
        OutputKey::ValidGatesHm,
        OutputKey::ValidGateListHm,
        OutputKey::ColNameList,
        OutputKey::NLmGates,
        OutputKey::NHmGates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKey::InstrumentPosition => "df_instrument_position",
            OutputKey::LoopGeomTx => "df_loop_geom_tx",
            OutputKey::TransmitterSpecs => "transmitter_specs",
            OutputKey::TxWaveformSpecs => "tx_waveform_specs",
            OutputKey::ReceiverSpecs => "receiver_specs",
            OutputKey::TxWaveformLm => "df_txwaveform_lm",
            OutputKey::TxWaveformHm => "df_txwaveform_hm",
            OutputKey::ValidGatesLm => "df_validgates_lm",
            OutputKey::ValidGateListLm => "validgate_list_lm",
            OutputKey::ValidGatesHm => "df_validgates_hm",
            OutputKey::ValidGateListHm => "validgate_list_hm",
            OutputKey::ColNameList => "col_name_list",
            OutputKey::NLmGates => "n_lm_gates",
            OutputKey::NHmGates => "n_hm_gates",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for OutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value pairs of a specification block, in file order
pub type SpecMap = IndexMap<String, String>;

/// A table whose rows are addressed by the values of one of its columns
#[derive(Debug, Clone)]
pub struct IndexedFrame {
    frame: DataFrame,
    index_column: &'static str,
}

impl IndexedFrame {
    /// Wrap a frame, checking that the index column exists
    pub fn new(frame: DataFrame, index_column: &'static str) -> Result<Self> {
        frame.column(index_column)?;
        Ok(Self {
            frame,
            index_column,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn index_column(&self) -> &'static str {
        self.index_column
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Row of the first occurrence of a string label in the index column
    pub fn row_of_label(&self, label: &str) -> Result<Option<usize>> {
        let index = self.frame.column(self.index_column)?.str()?;
        Ok(index.into_iter().position(|value| value == Some(label)))
    }

    /// Row of the first occurrence of an integer id in the index column
    pub fn row_of_id(&self, id: i64) -> Result<Option<usize>> {
        let index = self.frame.column(self.index_column)?.i64()?;
        Ok(index.into_iter().position(|value| value == Some(id)))
    }

    /// Float cell at the row labelled `label`
    pub fn f64_by_label(&self, label: &str, column: &str) -> Result<Option<f64>> {
        match self.row_of_label(label)? {
            Some(row) => Ok(self.frame.column(column)?.f64()?.get(row)),
            None => Ok(None),
        }
    }

    /// String cell at the row labelled `label`
    pub fn str_by_label(&self, label: &str, column: &str) -> Result<Option<String>> {
        match self.row_of_label(label)? {
            Some(row) => Ok(self
                .frame
                .column(column)?
                .str()?
                .get(row)
                .map(str::to_string)),
            None => Ok(None),
        }
    }

    /// Float cell at the row whose index equals `id`
    pub fn f64_by_id(&self, id: i64, column: &str) -> Result<Option<f64>> {
        match self.row_of_id(id)? {
            Some(row) => Ok(self.frame.column(column)?.f64()?.get(row)),
            None => Ok(None),
        }
    }

    /// Index values as strings, in row order
    pub fn labels(&self) -> Result<Vec<String>> {
        let index = self.frame.column(self.index_column)?.str()?;
        Ok(index
            .into_iter()
            .map(|value| value.unwrap_or_default().to_string())
            .collect())
    }

    /// Index values as integers, in row order
    pub fn ids(&self) -> Result<Vec<i64>> {
        let index = self.frame.column(self.index_column)?.i64()?;
        Ok(index.into_iter().flatten().collect())
    }
}

impl PartialEq for IndexedFrame {
    fn eq(&self, other: &Self) -> bool {
        self.index_column == other.index_column && self.frame.equals_missing(&other.frame)
    }
}

/// Everything parsed from one DES file.
///
/// A field is `None` when its section never appeared in the input.
#[derive(Debug, Clone, Default)]
pub struct DesInfo {
    pub instrument_position: Option<IndexedFrame>,
    pub loop_geom_tx: Option<DataFrame>,
    pub transmitter_specs: Option<SpecMap>,
    pub tx_waveform_specs: Option<IndexedFrame>,
    pub receiver_specs: Option<SpecMap>,
    pub txwaveform_lm: Option<DataFrame>,
    pub txwaveform_hm: Option<DataFrame>,
    pub validgates_lm: Option<IndexedFrame>,
    pub validgate_list_lm: Option<Vec<i64>>,
    pub validgates_hm: Option<IndexedFrame>,
    pub validgate_list_hm: Option<Vec<i64>>,
    pub col_name_list: Option<Vec<String>>,
    pub n_lm_gates: Option<i64>,
    pub n_hm_gates: Option<i64>,
}

impl DesInfo {
    pub fn contains(&self, key: OutputKey) -> bool {
        match key {
            OutputKey::InstrumentPosition => self.instrument_position.is_some(),
            OutputKey::LoopGeomTx => self.loop_geom_tx.is_some(),
            OutputKey::TransmitterSpecs => self.transmitter_specs.is_some(),
            OutputKey::TxWaveformSpecs => self.tx_waveform_specs.is_some(),
            OutputKey::ReceiverSpecs => self.receiver_specs.is_some(),
            OutputKey::TxWaveformLm => self.txwaveform_lm.is_some(),
            OutputKey::TxWaveformHm => self.txwaveform_hm.is_some(),
            OutputKey::ValidGatesLm => self.validgates_lm.is_some(),
            OutputKey::ValidGateListLm => self.validgate_list_lm.is_some(),
            OutputKey::ValidGatesHm => self.validgates_hm.is_some(),
            OutputKey::ValidGateListHm => self.validgate_list_hm.is_some(),
            OutputKey::ColNameList => self.col_name_list.is_some(),
            OutputKey::NLmGates => self.n_lm_gates.is_some(),
            OutputKey::NHmGates => self.n_hm_gates.is_some(),
        }
    }

    /// Keys present in this result, in canonical order
    pub fn present_keys(&self) -> Vec<OutputKey> {
        OutputKey::ALL
            .into_iter()
            .filter(|key| self.contains(*key))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_keys().is_empty()
    }

    /// Every table in the result with its output key, for export and display
    pub fn frames(&self) -> Vec<(OutputKey, &DataFrame)> {
        let mut frames = Vec::new();
        if let Some(table) = &self.instrument_position {
            frames.push((OutputKey::InstrumentPosition, table.frame()));
        }
        if let Some(frame) = &self.loop_geom_tx {
            frames.push((OutputKey::LoopGeomTx, frame));
        }
        if let Some(table) = &self.tx_waveform_specs {
            frames.push((OutputKey::TxWaveformSpecs, table.frame()));
        }
        if let Some(frame) = &self.txwaveform_lm {
            frames.push((OutputKey::TxWaveformLm, frame));
        }
        if let Some(frame) = &self.txwaveform_hm {
            frames.push((OutputKey::TxWaveformHm, frame));
        }
        if let Some(table) = &self.validgates_lm {
            frames.push((OutputKey::ValidGatesLm, table.frame()));
        }
        if let Some(table) = &self.validgates_hm {
            frames.push((OutputKey::ValidGatesHm, table.frame()));
        }
        frames
    }
}

fn frames_equal(a: &Option<DataFrame>, b: &Option<DataFrame>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.equals_missing(b),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for DesInfo {
    fn eq(&self, other: &Self) -> bool {
        self.instrument_position == other.instrument_position
            && frames_equal(&self.loop_geom_tx, &other.loop_geom_tx)
            && self.transmitter_specs == other.transmitter_specs
            && self.tx_waveform_specs == other.tx_waveform_specs
            && self.receiver_specs == other.receiver_specs
            && frames_equal(&self.txwaveform_lm, &other.txwaveform_lm)
            && frames_equal(&self.txwaveform_hm, &other.txwaveform_hm)
            && self.validgates_lm == other.validgates_lm
            && self.validgate_list_lm == other.validgate_list_lm
            && self.validgates_hm == other.validgates_hm
            && self.validgate_list_hm == other.validgate_list_hm
            && self.col_name_list == other.col_name_list
            && self.n_lm_gates == other.n_lm_gates
            && self.n_hm_gates == other.n_hm_gates
    }
}

/// State of the block-dispatch machine.
///
/// Sections are entered only from `Scanning` and always return to it.
#[derive(Debug)]
pub enum ParserState<B> {
    Scanning,
    InSection(B),
}
