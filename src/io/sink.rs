use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::bar_series::BarSeries;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The destination could not be written (e.g., file creation failed).
    #[snafu(display("Failed to write data: {message}"))]
    Write {
        message: String,
        backtrace: Backtrace,
    },

    /// A row could not be converted into the destination format.
    #[snafu(display("Data conversion error: {message}"))]
    Conversion {
        message: String,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error: {source}"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// Destination for exported bar series.
#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write.
    ///
    /// A file sink returns the paths of the created files; a database sink
    /// might return the number of rows inserted.
    type Output;

    /// Writes a slice of `BarSeries` to the destination.
    async fn write(&self, data: &[BarSeries]) -> Result<Self::Output, SinkError>;
}
