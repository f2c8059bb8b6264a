use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::timeframe::Timeframe;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Parameters for one bulk historical-rates request.
///
/// Constructed once at startup and never mutated. The date range is closed:
/// bars at exactly `start` or `end` belong to the result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RatesRequest {
    /// Instrument symbol, spelled the way the terminal lists it.
    pub symbol: String,

    /// The bar period to request.
    pub timeframe: Timeframe,

    /// Start of the requested range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested range (inclusive, UTC).
    pub end: DateTime<Utc>,
}

impl RatesRequest {
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, RequestError> {
        if start > end {
            return Err(RequestError::InvalidRange { start, end });
        }
        Ok(Self {
            symbol: symbol.into(),
            timeframe,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn accepts_an_ordered_range() {
        let start = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        let request = RatesRequest::new("GER40Cash", Timeframe::H1, start, end).unwrap();
        assert_eq!(request.symbol, "GER40Cash");
        assert_eq!(request.start, start);
        assert_eq!(request.end, end);
    }

    #[test]
    fn accepts_a_single_instant_range() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(RatesRequest::new("EURUSD", Timeframe::M5, at, at).is_ok());
    }

    #[test]
    fn rejects_an_inverted_range() {
        let start = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();
        let result = RatesRequest::new("GER40Cash", Timeframe::H1, start, end);
        assert!(matches!(result, Err(RequestError::InvalidRange { .. })));
    }
}
