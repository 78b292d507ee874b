//! DES block-dispatch state machine.
//!
//! A single forward pass over the input: while scanning, lines are tested
//! against the section headers; a match hands subsequent lines to that
//! section's block parser until its termination predicate fires, after which
//! the block is materialized into the result and scanning resumes.

use crate::blocks::{BlockParser, block_for};
use crate::config::ParserConfig;
use crate::error::{DesError, Result};
use crate::header::{discard_preamble, recognize_header};
use crate::line_source::{LineSource, normalize_line};
use crate::models::{DesInfo, ParserState};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Parser for DES instrument description files
#[derive(Debug, Clone, Default)]
pub struct DesParser {
    config: ParserConfig,
}

impl DesParser {
    /// Create a parser, validating its configuration
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a DES file from disk.
    ///
    /// The file handle lives only for the duration of the call and is closed
    /// whether or not parsing succeeds.
    pub fn parse_file(&self, path: &Path) -> Result<DesInfo> {
        if !path.exists() {
            return Err(DesError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        info!("Parsing DES file: {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse DES content held in memory
    pub fn parse_str(&self, content: &str) -> Result<DesInfo> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse DES content from any buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<DesInfo> {
        let mut source = LineSource::new(reader);
        let mut info = DesInfo::default();
        let mut state: ParserState<Box<dyn BlockParser>> = ParserState::Scanning;

        while let Some(raw) = source.next_line()? {
            let line = normalize_line(&raw, self.config.comment_marker());

            state = match state {
                ParserState::Scanning => match recognize_header(line) {
                    Some(section) => {
                        debug!("Entering {} at line {}", section, source.line_number());
                        discard_preamble(&mut source, section, self.config.lenient_preamble)?;
                        ParserState::InSection(block_for(section))
                    }
                    None => ParserState::Scanning,
                },
                ParserState::InSection(mut block) => {
                    if block.is_terminator(line) {
                        finish_block(block, &mut info, source.line_number())?;
                        ParserState::Scanning
                    } else {
                        block
                            .consume(line)
                            .map_err(|e| e.at(block.section(), source.line_number(), line))?;
                        ParserState::InSection(block)
                    }
                }
            };
        }

        if let ParserState::InSection(block) = state {
            debug!(
                "Input ended inside {}; finalizing {} row(s)",
                block.section(),
                block.rows()
            );
            finish_block(block, &mut info, source.line_number())?;
        }

        info!(
            "Parsed {} line(s) into {} result key(s)",
            source.line_number(),
            info.present_keys().len()
        );
        Ok(info)
    }
}

fn finish_block(block: Box<dyn BlockParser>, info: &mut DesInfo, line_number: usize) -> Result<()> {
    debug!(
        "Finalizing {} with {} row(s) at line {}",
        block.section(),
        block.rows(),
        line_number
    );
    block.finish(info)
}

/// Parse a DES file with the default configuration
pub fn parse_des_file(path: impl AsRef<Path>) -> Result<DesInfo> {
    DesParser::default().parse_file(path.as_ref())
}

/// Parse in-memory DES content with the default configuration
pub fn parse_des_str(content: &str) -> Result<DesInfo> {
    DesParser::default().parse_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutputKey, Section};

    const GEOMETRY_AND_GATES: &str = "\
COMM Survey notes that match no header
COMM TX LOOP GEOMETRY
COMM   X(m)   Y(m)
COMM  -12.64  -2.13
COMM   -6.14  -8.58
COMM
COMM LM GATE TIMES SUPPLIED
COMM  Gate  Width  Open  Centre  Close
COMM        (us)   (us)  (us)    (us)
COMM  1 10.0 0.0 5.0 10.0
COMM  2 10.0 10.0 15.0 20.0
COMM
";

    #[test]
    fn test_sections_parsed_and_absent_keys_missing() {
        let info = parse_des_str(GEOMETRY_AND_GATES).unwrap();

        assert_eq!(
            info.present_keys(),
            vec![
                OutputKey::LoopGeomTx,
                OutputKey::ValidGatesLm,
                OutputKey::ValidGateListLm
            ]
        );
        assert_eq!(info.loop_geom_tx.as_ref().unwrap().height(), 2);
        assert_eq!(info.validgate_list_lm, Some(vec![1, 2]));
        assert!(info.col_name_list.is_none());
        assert!(info.n_lm_gates.is_none());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_des_str(GEOMETRY_AND_GATES).unwrap();
        let second = parse_des_str(GEOMETRY_AND_GATES).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let info = parse_des_str("").unwrap();
        assert!(info.is_empty());
    }

    #[test]
    fn test_unterminated_final_section_is_finalized() {
        let content = "TX LOOP GEOMETRY\nX Y\n1.0 2.0\n3.0 4.0";
        let info = parse_des_str(content).unwrap();
        assert_eq!(info.loop_geom_tx.unwrap().height(), 2);
    }

    #[test]
    fn test_terminator_line_is_consumed() {
        // The dashed line ends the receiver block and is not re-scanned
        let content = "\
RECEIVER SPECIFICATIONS
Coil area Z   105 m2
---------------------
TRANSMITTER SPECIFICATIONS
Loop area   342 m2
";
        let info = parse_des_str(content).unwrap();
        assert_eq!(info.receiver_specs.unwrap().len(), 1);
        assert_eq!(info.transmitter_specs.unwrap()["Loop area"], "342 m2");
    }

    #[test]
    fn test_header_inside_section_is_a_row() {
        // A section never switches to another one without passing through scanning
        let content = "TRANSMITTER SPECIFICATIONS\nLoop area   342 m2\nRECEIVER  SPECIFICATIONS\n";
        let info = parse_des_str(content).unwrap();

        let specs = info.transmitter_specs.unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs["RECEIVER"], "SPECIFICATIONS");
        assert!(info.receiver_specs.is_none());
    }

    #[test]
    fn test_repeated_section_last_write_wins() {
        let content = "\
TX LOOP GEOMETRY
X Y
1.0 1.0
2.0 2.0

TX LOOP GEOMETRY
X Y
9.0 9.0
";
        let info = parse_des_str(content).unwrap();
        let frame = info.loop_geom_tx.unwrap();
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.column("x_m").unwrap().f64().unwrap().get(0), Some(9.0));
    }

    #[test]
    fn test_type_cast_failure_reports_location() {
        let content = "TX LOOP GEOMETRY\nX Y\n1.0 2.0\n12.5 abc\n";
        let err = parse_des_str(content).unwrap_err();

        assert!(err.is_type_cast());
        match err {
            DesError::TypeCast {
                section,
                line_number,
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(section, Section::LoopGeometry);
                assert_eq!(line_number, 4);
                assert_eq!(line, "12.5 abc");
                assert_eq!(column, "y_m");
                assert_eq!(value, "abc");
            }
            other => panic!("Expected TypeCast, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_row_reports_section() {
        let content = "LM TX WAVEFORM\nTime [s]  Amplitude [A]\n0.0 1.0 2.0\n";
        let err = parse_des_str(content).unwrap_err();

        assert_eq!(err.section(), Some(Section::TxWaveformLM));
        assert!(matches!(err, DesError::MalformedRow { line_number: 3, .. }));
    }

    #[test]
    fn test_unterminated_preamble() {
        let content = "INSTRUMENT POSITION RELATIVE TO FRAME\nParameter X Y Z\n";

        let err = parse_des_str(content).unwrap_err();
        assert!(matches!(
            err,
            DesError::UnterminatedPreamble {
                section: Section::InstrumentPosition,
                header_line: 1
            }
        ));

        let lenient = DesParser::new(ParserConfig::default().with_lenient_preamble()).unwrap();
        let info = lenient.parse_str(content).unwrap();
        assert_eq!(info.instrument_position.unwrap().height(), 0);
    }

    #[test]
    fn test_comment_marker_is_configurable() {
        let content = "REM TX LOOP GEOMETRY\nREM X Y\nREM 1.0 2.0\n";

        let default = parse_des_str(content).unwrap();
        assert!(default.loop_geom_tx.is_none());

        let parser = DesParser::new(ParserConfig::default().with_comment_marker("REM")).unwrap();
        let info = parser.parse_str(content).unwrap();
        assert_eq!(info.loop_geom_tx.unwrap().height(), 1);
    }

    #[test]
    fn test_words_starting_with_marker_are_kept() {
        let content = "COMM RECEIVER SPECIFICATIONS\nCOMMON mode rejection   80 dB\n\n";
        let info = parse_des_str(content).unwrap();

        let specs = info.receiver_specs.unwrap();
        let keys: Vec<&str> = specs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["COMMON mode rejection"]);
    }

    #[test]
    fn test_overflowing_column_range_is_an_error() {
        let content = "FIELD CHANNEL DESCRIPTION\n-9223372036854775808:9223372036854775807  Z\n";
        let err = parse_des_str(content).unwrap_err();

        assert_eq!(err.section(), Some(Section::ColumnDescription));
        assert!(matches!(err, DesError::MalformedRow { line_number: 2, .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(DesParser::new(ParserConfig::default().with_comment_marker("")).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_des_file("/nonexistent/survey.des").unwrap_err();
        assert!(matches!(err, DesError::FileNotFound { .. }));
    }
}
