use std::path::PathBuf;

use clap::Parser;

/// Exports historical bars from the trading terminal to a CSV file.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (rates_exporter.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Instrument symbol, spelled the way the terminal lists it
    #[arg(long, default_value = "GER40Cash")]
    pub symbol: String,

    /// Bar period: m1, m5, m15, m30, h1, h4, d1, w1, mn1
    #[arg(long, default_value = "h1")]
    pub timeframe: String,

    /// Start of the date range in ISO8601 format (e.g. "2014-01-01T00:00:00Z")
    #[arg(long, default_value = "2014-01-01T00:00:00Z")]
    pub start: String,

    /// End of the date range in ISO8601 format (e.g. "2024-12-31T23:59:00Z")
    #[arg(short, long, default_value = "2024-12-31T23:59:00Z")]
    pub end: String,

    /// Directory the CSV file is written to (overrides the config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Terminal bridge endpoint (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,
}
