//! Canonical in-memory representation of a historical bar (OHLCV).
//!
//! This struct is the row type of an exported table, after the raw terminal
//! response has been reshaped by the export pipeline.

use chrono::{DateTime, Utc};

/// A single historical bar for one interval of one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Bar open time (UTC).
    pub time: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Number of ticks aggregated into the bar.
    pub tick_volume: u64,

    /// Average spread over the bar, in points.
    pub spread: u32,

    /// Exchange-reported traded volume, where the instrument provides it.
    pub real_volume: u64,
}
