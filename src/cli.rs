//! Command-line interface components.

use crate::config::ParserConfig;
use crate::export::{ExportFormat, export_tables};
use crate::models::{DesInfo, OutputKey, SpecMap};
use crate::parser::DesParser;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "des_parser")]
#[command(about = "Parse a DES instrument description file into tables")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the DES file
    #[arg(value_name = "DES_FILE")]
    pub des_path: PathBuf,

    /// Write every parsed table into this directory
    #[arg(short, long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// File format used with --export
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Literal marker stripped from the start of each line
    #[arg(long, default_value = "COMM", conflicts_with = "no_comment_marker")]
    pub comment_marker: String,

    /// Do not strip any comment marker
    #[arg(long)]
    pub no_comment_marker: bool,

    /// Accept files that end inside a section header preamble
    #[arg(long)]
    pub lenient_preamble: bool,

    /// Print the full contents of every table
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parser configuration described by the arguments
    pub fn parser_config(&self) -> ParserConfig {
        let config = ParserConfig::default();
        let config = if self.no_comment_marker {
            config.without_comment_marker()
        } else {
            config.with_comment_marker(self.comment_marker.clone())
        };
        if self.lenient_preamble {
            config.with_lenient_preamble()
        } else {
            config
        }
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Parse the file named on the command line, report and optionally export it
pub fn run(args: Args) -> Result<DesInfo> {
    setup_logging(&args);

    let parser = DesParser::new(args.parser_config()).context("Invalid parser configuration")?;
    let info = parser
        .parse_file(&args.des_path)
        .with_context(|| format!("Failed to parse {}", args.des_path.display()))?;

    if !args.quiet {
        print_summary(&args, &info);
    }

    if let Some(dir) = &args.export {
        let written = export_tables(&info, dir, args.format)
            .with_context(|| format!("Failed to export tables to {}", dir.display()))?;
        if !args.quiet {
            println!();
            println!(
                "{} {} file(s) to {}",
                "Exported".bright_green().bold(),
                written.len(),
                dir.display()
            );
        }
    }

    Ok(info)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("des_parser={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// One-line description of the value stored under `key`
pub fn describe_key(info: &DesInfo, key: OutputKey) -> Option<String> {
    let shape = |height: usize, width: usize| format!("{} rows x {} columns", height, width);
    let entries = |specs: &SpecMap| format!("{} entries", specs.len());

    match key {
        OutputKey::InstrumentPosition => info
            .instrument_position
            .as_ref()
            .map(|t| shape(t.height(), t.frame().width())),
        OutputKey::LoopGeomTx => info.loop_geom_tx.as_ref().map(|f| shape(f.height(), f.width())),
        OutputKey::TransmitterSpecs => info.transmitter_specs.as_ref().map(entries),
        OutputKey::TxWaveformSpecs => info
            .tx_waveform_specs
            .as_ref()
            .map(|t| shape(t.height(), t.frame().width())),
        OutputKey::ReceiverSpecs => info.receiver_specs.as_ref().map(entries),
        OutputKey::TxWaveformLm => info.txwaveform_lm.as_ref().map(|f| shape(f.height(), f.width())),
        OutputKey::TxWaveformHm => info.txwaveform_hm.as_ref().map(|f| shape(f.height(), f.width())),
        OutputKey::ValidGatesLm => info
            .validgates_lm
            .as_ref()
            .map(|t| shape(t.height(), t.frame().width())),
        OutputKey::ValidGateListLm => info.validgate_list_lm.as_ref().map(|g| format!("{:?}", g)),
        OutputKey::ValidGatesHm => info
            .validgates_hm
            .as_ref()
            .map(|t| shape(t.height(), t.frame().width())),
        OutputKey::ValidGateListHm => info.validgate_list_hm.as_ref().map(|g| format!("{:?}", g)),
        OutputKey::ColNameList => info
            .col_name_list
            .as_ref()
            .map(|names| format!("{} column names", names.len())),
        OutputKey::NLmGates => info.n_lm_gates.map(|n| n.to_string()),
        OutputKey::NHmGates => info.n_hm_gates.map(|n| n.to_string()),
    }
}

fn print_summary(args: &Args, info: &DesInfo) {
    println!(
        "{} {}",
        "DES file:".bright_green().bold(),
        args.des_path.display().to_string().bright_cyan()
    );
    println!();

    let keys = info.present_keys();
    if keys.is_empty() {
        println!("{}", "No recognized sections found".bright_yellow());
        return;
    }

    for key in keys {
        if let Some(description) = describe_key(info, key) {
            println!(
                "  {:<24} {}",
                key.as_str().bright_white().bold(),
                description.bright_black()
            );
        }
    }

    if args.verbose {
        for (key, frame) in info.frames() {
            println!();
            println!("{}", key.as_str().bright_yellow().bold());
            println!("{}", frame);
        }
        for (key, specs) in [
            (OutputKey::TransmitterSpecs, &info.transmitter_specs),
            (OutputKey::ReceiverSpecs, &info.receiver_specs),
        ] {
            if let Some(specs) = specs {
                println!();
                println!("{}", key.as_str().bright_yellow().bold());
                for (name, value) in specs {
                    println!("  {:<32} {}", name, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_config() {
        let args = Args::parse_from(["des_parser", "survey.des", "--lenient-preamble"]);
        let config = args.parser_config();
        assert_eq!(config.comment_marker.as_deref(), Some("COMM"));
        assert!(config.lenient_preamble);
        assert_eq!(args.format, ExportFormat::Csv);
        assert_eq!(args.get_log_level(), "info");
    }

    #[test]
    fn test_no_comment_marker() {
        let args = Args::parse_from(["des_parser", "survey.des", "--no-comment-marker", "-q"]);
        assert_eq!(args.parser_config().comment_marker, None);
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_export_format_flag() {
        let args = Args::parse_from([
            "des_parser",
            "survey.des",
            "--export",
            "out",
            "--format",
            "parquet",
        ]);
        assert_eq!(args.format, ExportFormat::Parquet);
        assert_eq!(args.export, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_describe_key() {
        let info = DesInfo {
            n_lm_gates: Some(26),
            validgate_list_hm: Some(vec![1, 2, 3]),
            ..Default::default()
        };
        assert_eq!(describe_key(&info, OutputKey::NLmGates).as_deref(), Some("26"));
        assert_eq!(
            describe_key(&info, OutputKey::ValidGateListHm).as_deref(),
            Some("[1, 2, 3]")
        );
        assert_eq!(describe_key(&info, OutputKey::NHmGates), None);
    }
}
