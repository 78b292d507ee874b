//! Format constants for DES instrument description files
//!
//! This module contains the header token patterns, preamble sentinels,
//! column names and output keys used throughout the parser.

// =============================================================================
// Line Normalization
// =============================================================================

/// Literal marker stripped from the start of every line before interpretation
pub const DEFAULT_COMMENT_MARKER: &str = "COMM";

/// Substring that ends a block for sections that use a dashed separator
pub const DASHED_TERMINATOR: &str = "---";

// =============================================================================
// Header Patterns
// =============================================================================

/// Upper-cased leading tokens identifying each section header
pub mod headers {
    pub const INSTRUMENT_POSITION: &[&str] = &["INSTRUMENT", "POSITION", "RELATIVE"];
    pub const LOOP_GEOMETRY: &[&str] = &["TX", "LOOP", "GEOMETRY"];
    pub const TRANSMITTER_SPECS: &[&str] = &["TRANSMITTER", "SPECIFICATIONS"];
    pub const TX_WAVEFORM_SPECS: &[&str] = &["TX", "WAVEFORM", "SPECIFICATIONS"];
    pub const RECEIVER_SPECS: &[&str] = &["RECEIVER", "SPECIFICATIONS"];
    pub const TX_WAVEFORM_LM: &[&str] = &["LM", "TX", "WAVEFORM"];
    pub const TX_WAVEFORM_HM: &[&str] = &["HM", "TX", "WAVEFORM"];
    pub const VALID_GATES_LM: &[&str] = &["LM", "GATE", "TIMES", "SUPPLIED"];
    pub const VALID_GATES_HM: &[&str] = &["HM", "GATE", "TIMES", "SUPPLIED"];
    pub const COLUMN_DESCRIPTION: &[&str] = &["FIELD", "CHANNEL", "DESCRIPTION"];
}

/// Preamble sentinel closing the unit row of position and gate tables
pub const PAREN_SENTINEL: char = ')';

/// Preamble sentinel closing the unit row of waveform tables
pub const BRACKET_SENTINEL: char = ']';

// =============================================================================
// Table Columns
// =============================================================================

pub mod columns {
    pub const PARAM: &str = "param";
    pub const X_M: &str = "x_m";
    pub const Y_M: &str = "y_m";
    pub const Z_M: &str = "z_m";

    pub const FEATURE: &str = "feature";
    pub const LM: &str = "lm";
    pub const HM: &str = "hm";

    pub const TIME_S: &str = "time_s";
    pub const AMPLITUDE: &str = "amplitude";

    pub const GATE: &str = "gate";
    pub const WIDTH_US: &str = "width_us";
    pub const OPEN_US: &str = "open_us";
    pub const CENTRE_US: &str = "centre_us";
    pub const CLOSE_US: &str = "close_us";

    /// Gate table columns in file order
    pub const GATE_COLUMNS: [&str; 5] = [GATE, WIDTH_US, OPEN_US, CENTRE_US, CLOSE_US];
}

// =============================================================================
// Column Description
// =============================================================================

/// Channel names whose description row carries the gate count
pub const LM_Z_CHANNEL: &str = "LM_Z";
pub const HM_Z_CHANNEL: &str = "HM_Z";

/// Token position of the Fortran-style format code (e.g. `26F`) in a channel row
pub const GATE_COUNT_TOKEN: usize = 13;

/// Largest number of columns a single `start:end` range may describe
pub const MAX_RANGE_COLUMNS: i64 = 1_000_000;

/// Prefixes stripped from the lower-cased low/high moment waveform spec values
pub const LM_VALUE_PREFIX: &str = "lm =";
pub const HM_VALUE_PREFIX: &str = "hm =";

/// Marker splitting a two-field waveform spec value into its low and high moment parts
pub const HM_SPLIT_MARKER: &str = "HM";
