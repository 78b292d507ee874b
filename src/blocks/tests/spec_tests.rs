//! Tests for specification blocks

use super::super::specs::split_waveform_spec;
use super::*;
use crate::constants::columns::{HM, LM};

#[test]
fn test_transmitter_specs_preserve_order() {
    let info = run_block(
        Section::TransmitterSpecs,
        &["Loop area            342 m2", "Number of turns LM   1", "Base frequency LM    210 Hz"],
    );

    let specs = info.transmitter_specs.unwrap();
    let keys: Vec<&str> = specs.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Loop area", "Number of turns LM", "Base frequency LM"]);
    assert_eq!(specs["Loop area"], "342 m2");
    assert!(info.receiver_specs.is_none());
}

#[test]
fn test_receiver_specs_duplicate_key_overwrites() {
    let info = run_block(
        Section::ReceiverSpecs,
        &["Coil area Z   105 m2", "Low pass filter   210 kHz", "Coil area Z   110 m2"],
    );

    let specs = info.receiver_specs.unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs["Coil area Z"], "110 m2");
    assert_eq!(specs.get_index(0).map(|(k, _)| k.as_str()), Some("Coil area Z"));
}

#[test]
fn test_spec_row_without_wide_gap() {
    let err = try_run_block(Section::TransmitterSpecs, &["Loop area 342 m2"]).unwrap_err();
    assert!(matches!(err, RowError::Malformed(_)));
}

#[test]
fn test_waveform_spec_two_field_form() {
    let (feature, lm, hm) = split_waveform_spec("Peak current  10 A HM =20 A").unwrap();
    assert_eq!(feature, "peak current");
    assert_eq!(lm, "10 a");
    assert_eq!(hm, "20 a");
}

#[test]
fn test_waveform_spec_three_field_form() {
    let (feature, lm, hm) = split_waveform_spec("Repetition freq      LM = 210 Hz  HM = 25 Hz").unwrap();
    assert_eq!(feature, "repetition freq");
    assert_eq!(lm, "210 hz");
    assert_eq!(hm, "25 hz");
}

#[test]
fn test_waveform_spec_split_is_case_sensitive() {
    // A lower-case "hm" is not a split point
    let err = split_waveform_spec("Peak current  10 A hm =20 A").unwrap_err();
    assert!(matches!(err, RowError::Malformed(_)));
}

#[test]
fn test_waveform_spec_field_count() {
    assert!(split_waveform_spec("Peak current").is_err());
    assert!(split_waveform_spec("a  b  c  d").is_err());
}

#[test]
fn test_waveform_spec_table_indexed_by_feature() {
    let info = run_block(
        Section::TxWaveformSpecs,
        &["Peak current  10 A HM =20 A", "Ramp down   LM = 20 us  HM = 200 us"],
    );

    let table = info.tx_waveform_specs.unwrap();
    assert_eq!(table.labels().unwrap(), vec!["peak current", "ramp down"]);
    assert_eq!(table.str_by_label("ramp down", HM).unwrap().as_deref(), Some("200 us"));
    assert_eq!(table.str_by_label("peak current", LM).unwrap().as_deref(), Some("10 a"));
}

#[test]
fn test_spec_terminators() {
    for section in [Section::TxWaveformSpecs, Section::ReceiverSpecs] {
        let block = filled_block(section, &[]);
        assert!(block.is_terminator("---------"), "{}", section);
    }

    let transmitter = filled_block(Section::TransmitterSpecs, &[]);
    assert!(!transmitter.is_terminator("---------"));
    assert!(transmitter.is_terminator(""));
}
