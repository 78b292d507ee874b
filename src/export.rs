//! Table export for parsed DES results.
//!
//! Writes each table of a [`DesInfo`] to its own file named after the output
//! key. Specification maps are written as two-column `key`/`value` tables and
//! the column name list as a single `name` column.

use crate::error::Result;
use crate::models::{DesInfo, OutputKey, SpecMap};
use clap::ValueEnum;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Parquet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

/// Two-column table of a specification map, in file order
pub fn spec_frame(specs: &SpecMap) -> Result<DataFrame> {
    let keys: Vec<String> = specs.keys().cloned().collect();
    let values: Vec<String> = specs.values().cloned().collect();
    Ok(DataFrame::new(vec![
        Column::new("key".into(), keys),
        Column::new("value".into(), values),
    ])?)
}

/// Every exportable table of `info`, keyed by output key
pub fn export_frames(info: &DesInfo) -> Result<Vec<(OutputKey, DataFrame)>> {
    let mut frames: Vec<(OutputKey, DataFrame)> = info
        .frames()
        .into_iter()
        .map(|(key, frame)| (key, frame.clone()))
        .collect();

    if let Some(specs) = &info.transmitter_specs {
        frames.push((OutputKey::TransmitterSpecs, spec_frame(specs)?));
    }
    if let Some(specs) = &info.receiver_specs {
        frames.push((OutputKey::ReceiverSpecs, spec_frame(specs)?));
    }
    if let Some(names) = &info.col_name_list {
        let frame = DataFrame::new(vec![Column::new("name".into(), names.clone())])?;
        frames.push((OutputKey::ColNameList, frame));
    }
    Ok(frames)
}

/// Write every table of `info` into `output_dir`, returning the files written
pub fn export_tables(info: &DesInfo, output_dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for (key, mut frame) in export_frames(info)? {
        let path = output_dir.join(format!("{}.{}", key, format.extension()));
        write_frame(&mut frame, &path, format)?;
        debug!("Wrote {} ({} rows) to {}", key, frame.height(), path.display());
        written.push(path);
    }

    info!(
        "Exported {} table(s) to {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

fn write_frame(frame: &mut DataFrame, path: &Path, format: ExportFormat) -> Result<()> {
    let mut file = File::create(path)?;
    match format {
        ExportFormat::Csv => {
            CsvWriter::new(&mut file).include_header(true).finish(frame)?;
        }
        ExportFormat::Parquet => {
            ParquetWriter::new(file).finish(frame)?;
        }
    }
    Ok(())
}
