//! A collection of historical bars for a specific symbol and timeframe.

use crate::models::{bar::Bar, timeframe::Timeframe};

/// A complete set of time-series data for a single symbol.
///
/// Groups a vector of [`Bar`]s with their corresponding symbol and
/// [`Timeframe`], making the data set self-describing.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "GER40Cash", "EURUSD").
    pub symbol: String,
    /// The bar period of every row in the series.
    pub timeframe: Timeframe,
    /// The OHLCV rows, oldest first.
    pub bars: Vec<Bar>,
}
