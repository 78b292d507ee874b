//! DES Parser Library
//!
//! A Rust library for reading the DES instrument description files that
//! accompany airborne electromagnetic survey data, turning them into polars
//! tables and plain Rust values.
//!
//! This library provides tools for:
//! - Recognizing the section headers of a DES file and skipping their preambles
//! - Parsing instrument positions, loop geometry, waveforms and gate times into tables
//! - Reading transmitter and receiver specifications as ordered key/value maps
//! - Expanding the field channel description into the column names of the data file
//! - Exporting every parsed table to CSV or Parquet
//!
//! ```no_run
//! use des_parser::{OutputKey, parse_des_file};
//!
//! # fn main() -> des_parser::Result<()> {
//! let info = parse_des_file("survey.des")?;
//! if let Some(gates) = &info.validgate_list_lm {
//!     println!("{} low moment gates", gates.len());
//! }
//! assert!(info.contains(OutputKey::ColNameList) == info.col_name_list.is_some());
//! # Ok(())
//! # }
//! ```

pub mod blocks;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod header;
pub mod line_source;
pub mod models;
pub mod parser;

// Re-export commonly used types
pub use config::ParserConfig;
pub use error::{DesError, Result};
pub use models::{DesInfo, IndexedFrame, OutputKey, Section, SpecMap};
pub use parser::{DesParser, parse_des_file, parse_des_str};
