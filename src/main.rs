use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rates_exporter::cli::{commands::Cli, params};
use rates_exporter::errors::Error;
use rates_exporter::export::{ExportOutcome, export_rates};
use rates_exporter::io::csv::CsvSink;
use rates_exporter::terminal::TerminalError;
use rates_exporter::terminal::bridge::BridgeSession;
use rates_exporter::utils::config::{self, ExporterConfig, read_config};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(ExportOutcome::Written { path, rows }) => {
            println!("Export complete: {} ({rows} bars)", path.display());
            ExitCode::SUCCESS
        }
        Ok(ExportOutcome::NoData) => {
            println!("No data returned for the request. Check that:");
            println!("- the symbol is spelled the way the terminal lists it");
            println!("- the date range actually contains trading data");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match &e {
                Error::Terminal(TerminalError::ConnectionFailed { code, message, .. }) => {
                    println!("Failed to initialize the terminal session, error code {code}: {message}");
                }
                _ => println!("Export failed: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExportOutcome, Error> {
    let file_config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ExporterConfig::default(),
    };

    let request = params::build_request(&cli.symbol, &cli.timeframe, &cli.start, &cli.end)?;

    let endpoint = config::resolve(cli.endpoint, file_config.terminal.endpoint, || {
        BridgeSession::default_endpoint().to_string()
    });
    let output_dir = config::resolve(cli.output_dir, file_config.export.output_dir, || {
        PathBuf::from(".")
    });

    let session = BridgeSession::new(endpoint)
        .map_err(|e| Error::Terminal(TerminalError::Init { source: e }))?;
    let sink = CsvSink::new(
        output_dir,
        request.start.date_naive(),
        request.end.date_naive(),
    );

    export_rates(&session, &sink, &request).await
}
