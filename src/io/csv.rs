//! CSV file sink for exported bar series.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use snafu::ResultExt;

use crate::io::sink::{ConversionSnafu, DataSink, IoSnafu, SinkError, WriteSnafu};
use crate::models::{bar::Bar, bar_series::BarSeries};

/// Timestamp format of the `time` column.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column names, unchanged from the terminal's bar fields.
const COLUMNS: [&str; 8] = [
    "time",
    "open",
    "high",
    "low",
    "close",
    "tick_volume",
    "spread",
    "real_volume",
];

#[derive(Debug, Serialize)]
struct CsvRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    tick_volume: u64,
    spread: u32,
    real_volume: u64,
}

impl From<&Bar> for CsvRow {
    fn from(bar: &Bar) -> Self {
        Self {
            time: bar.time.format(TIME_FORMAT).to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            tick_volume: bar.tick_volume,
            spread: bar.spread,
            real_volume: bar.real_volume,
        }
    }
}

/// Writes each series to `{symbol}_{start}_to_{end}.csv` in the output
/// directory, overwriting any previous export with the same name.
pub struct CsvSink {
    output_dir: PathBuf,
    range_start: NaiveDate,
    range_end: NaiveDate,
}

impl CsvSink {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            range_start,
            range_end,
        }
    }

    /// The output filename for a symbol. A pure function of the symbol and
    /// the two date boundaries, so identical requests land on the same file.
    pub fn file_name(&self, symbol: &str) -> String {
        format!(
            "{}_{}_to_{}.csv",
            symbol,
            self.range_start.format("%Y-%m-%d"),
            self.range_end.format("%Y-%m-%d")
        )
    }

    fn write_series(&self, series: &BarSeries, path: &Path) -> Result<(), SinkError> {
        // The header is written explicitly so that a series with zero rows
        // still produces a well-formed file.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| {
                WriteSnafu {
                    message: e.to_string(),
                }
                .build()
            })?;

        writer.write_record(COLUMNS).map_err(|e| {
            WriteSnafu {
                message: e.to_string(),
            }
            .build()
        })?;

        for bar in &series.bars {
            writer.serialize(CsvRow::from(bar)).map_err(|e| {
                ConversionSnafu {
                    message: e.to_string(),
                }
                .build()
            })?;
        }

        writer.flush().context(IoSnafu)
    }
}

#[async_trait]
impl DataSink for CsvSink {
    type Output = Vec<PathBuf>;

    async fn write(&self, data: &[BarSeries]) -> Result<Self::Output, SinkError> {
        let mut paths = Vec::with_capacity(data.len());
        for series in data {
            let path = self.output_dir.join(self.file_name(&series.symbol));
            self.write_series(series, &path)?;
            debug!("wrote {} rows to {}", series.bars.len(), path.display());
            paths.push(path);
        }
        Ok(paths)
    }
}
