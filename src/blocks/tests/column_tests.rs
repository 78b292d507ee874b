//! Tests for the field channel description block

use super::super::columns::{expand_column_names, parse_gate_count};
use super::*;
use crate::constants::MAX_RANGE_COLUMNS;

/// Channel row with `code` as its 14th token
fn channel_row(index: &str, channel: &str, code: &str) -> String {
    format!(
        "{}  {}  dB/dt Z low moment gates 7 to 32 pV/(A*m^4) norm by {}",
        index, channel, code
    )
}

#[test]
fn test_range_expansion() {
    assert_eq!(expand_column_names("1:3", "Z").unwrap(), vec!["Z_1", "Z_2", "Z_3"]);
    assert_eq!(expand_column_names("7", "X").unwrap(), vec!["X"]);
    assert_eq!(expand_column_names("4:4", "Alt").unwrap(), vec!["Alt_1"]);
    assert!(expand_column_names("5:4", "Empty").unwrap().is_empty());
}

#[test]
fn test_range_expansion_rejects_bad_bounds() {
    let err = expand_column_names("1:b", "Z").unwrap_err();
    assert!(matches!(err, RowError::TypeCast { expected: "integer", .. }));
}

#[test]
fn test_parse_gate_count() {
    assert_eq!(parse_gate_count("26F").unwrap(), 26);
    assert_eq!(parse_gate_count("21f").unwrap(), 21);
    assert_eq!(parse_gate_count("12").unwrap(), 12);
    assert!(parse_gate_count("F").is_err());
}

#[test]
fn test_gate_count_only_drops_a_trailing_f() {
    assert!(matches!(
        parse_gate_count("26F14.6"),
        Err(RowError::TypeCast { expected: "integer", .. })
    ));
    assert!(parse_gate_count("26FF").is_err());
}

#[test]
fn test_range_expansion_rejects_overflowing_bounds() {
    let err = expand_column_names("-9223372036854775808:9223372036854775807", "Z").unwrap_err();
    assert!(matches!(err, RowError::Malformed(_)));

    let err = expand_column_names("1:100000000000", "Z").unwrap_err();
    assert!(matches!(err, RowError::Malformed(_)));
}

#[test]
fn test_range_expansion_upper_limit() {
    let names = expand_column_names(&format!("1:{}", MAX_RANGE_COLUMNS), "Z").unwrap();
    assert_eq!(names.len() as i64, MAX_RANGE_COLUMNS);
    assert!(expand_column_names(&format!("0:{}", MAX_RANGE_COLUMNS), "Z").is_err());
}

#[test]
fn test_overflowing_range_is_a_row_error() {
    let err = try_run_block(
        Section::ColumnDescription,
        &["1  Line  Line number", "9223372036854775807:-9223372036854775808  Z"],
    )
    .unwrap_err();
    assert!(matches!(err, RowError::Malformed(_)));
}

#[test]
fn test_column_names_accumulate_in_order() {
    let info = run_block(
        Section::ColumnDescription,
        &["1  Line  Line number", "2:3  Angle  Tilt", "4  Alt  Altitude"],
    );

    assert_eq!(
        info.col_name_list,
        Some(vec![
            "Line".to_string(),
            "Angle_1".to_string(),
            "Angle_2".to_string(),
            "Alt".to_string(),
        ])
    );
    assert!(info.n_lm_gates.is_none());
    assert!(info.n_hm_gates.is_none());
}

#[test]
fn test_gate_counts_extracted_from_channel_rows() {
    let lm = channel_row("6:31", "LM_Z", "26F");
    let hm = channel_row("32:52", "hm_z", "21F");
    let info = run_block(Section::ColumnDescription, &[lm.as_str(), hm.as_str()]);

    assert_eq!(info.n_lm_gates, Some(26));
    assert_eq!(info.n_hm_gates, Some(21));

    let names = info.col_name_list.unwrap();
    assert_eq!(names.len(), 26 + 21);
    assert_eq!(names[0], "LM_Z_1");
    assert_eq!(names[25], "LM_Z_26");
    assert_eq!(names[26], "hm_z_1");
}

#[test]
fn test_gate_count_without_range() {
    let row = channel_row("6", "LM_Z", "26F");
    let info = run_block(Section::ColumnDescription, &[row.as_str()]);

    assert_eq!(info.col_name_list, Some(vec!["LM_Z".to_string()]));
    assert_eq!(info.n_lm_gates, Some(26));
}

#[test]
fn test_channel_row_missing_format_code() {
    let err = try_run_block(Section::ColumnDescription, &["6:31  LM_Z  dB/dt"]).unwrap_err();
    assert!(matches!(err, RowError::Malformed(_)));
}

#[test]
fn test_single_token_row() {
    let err = try_run_block(Section::ColumnDescription, &["17"]).unwrap_err();
    assert!(matches!(err, RowError::Malformed(_)));
}

#[test]
fn test_rows_counted_separately_from_names() {
    let block = filled_block(Section::ColumnDescription, &["1:10  Z"]);
    assert_eq!(block.rows(), 1);
    assert!(!block.is_terminator("----"));
}
