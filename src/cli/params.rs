use chrono::{DateTime, Utc};

use crate::errors::Error;
use crate::models::rates_request::RatesRequest;
use crate::models::timeframe::Timeframe;

/// Parses a terminal period name (e.g. "h1", "D1") into a [`Timeframe`].
pub fn parse_timeframe(input: &str) -> Result<Timeframe, Error> {
    input
        .parse::<Timeframe>()
        .map_err(|e| Error::Config(e.to_string()))
}

/// Parses an ISO8601 datetime into UTC.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, Error> {
    input
        .parse::<DateTime<Utc>>()
        .map_err(|e| Error::Config(format!("invalid datetime {input:?}: {e}")))
}

/// Builds the immutable request from the raw command-line strings.
pub fn build_request(
    symbol: &str,
    timeframe: &str,
    start: &str,
    end: &str,
) -> Result<RatesRequest, Error> {
    let timeframe = parse_timeframe(timeframe)?;
    let start = parse_datetime(start)?;
    let end = parse_datetime(end)?;
    RatesRequest::new(symbol, timeframe, start, end).map_err(|e| Error::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_documented_period_names() {
        assert_eq!(parse_timeframe("h1").unwrap(), Timeframe::H1);
        assert_eq!(parse_timeframe("H4").unwrap(), Timeframe::H4);
        assert_eq!(parse_timeframe("mn1").unwrap(), Timeframe::Mn1);
        assert!(parse_timeframe("fortnight").is_err());
    }

    #[test]
    fn parses_iso8601_datetimes() {
        let dt = parse_datetime("2014-01-01T00:00:00Z").unwrap();
        assert_eq!(dt.timestamp(), 1_388_534_400);
        assert!(parse_datetime("last tuesday").is_err());
    }

    #[test]
    fn builds_the_default_request() {
        let request = build_request(
            "GER40Cash",
            "h1",
            "2014-01-01T00:00:00Z",
            "2024-12-31T23:59:00Z",
        )
        .unwrap();
        assert_eq!(request.symbol, "GER40Cash");
        assert_eq!(request.timeframe, Timeframe::H1);
        assert!(request.start < request.end);
    }

    #[test]
    fn an_inverted_range_is_a_config_error() {
        let result = build_request(
            "GER40Cash",
            "h1",
            "2024-12-31T23:59:00Z",
            "2014-01-01T00:00:00Z",
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
