//! The export pipeline: open a session, fetch, reshape, filter, write.

use std::path::PathBuf;

use chrono::DateTime;
use log::{debug, info};

use crate::errors::Error;
use crate::io::sink::{self, DataSink};
use crate::models::{bar::Bar, bar_series::BarSeries, rates_request::RatesRequest};
use crate::terminal::{MalformedResponseSnafu, RatesOutcome, RawRate, TerminalSession};

/// Outcome of one export run.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The table was written. `rows` counts data rows, not the header.
    Written { path: PathBuf, rows: usize },
    /// The terminal returned no data for the request.
    NoData,
}

/// Runs the full export once.
///
/// The session is shut down exactly once on every path out of this function:
/// successful export, empty fetch result, fetch error, and failed
/// initialization.
pub async fn export_rates<S, K>(
    session: &S,
    sink: &K,
    request: &RatesRequest,
) -> Result<ExportOutcome, Error>
where
    S: TerminalSession,
    K: DataSink<Output = Vec<PathBuf>>,
{
    if let Err(e) = session.initialize().await {
        session.shutdown().await;
        return Err(e.into());
    }

    info!(
        "fetching {} {} bars from {} to {}",
        request.symbol, request.timeframe, request.start, request.end
    );
    let fetched = session.copy_rates_range(request).await;
    session.shutdown().await;

    match fetched? {
        RatesOutcome::NoData => Ok(ExportOutcome::NoData),
        RatesOutcome::Rates(raw) => {
            let series = build_series(request, raw)?;
            debug!("{} bars within the requested range", series.bars.len());

            let rows = series.bars.len();
            let paths = sink.write(std::slice::from_ref(&series)).await?;
            let path = paths.into_iter().next().ok_or_else(|| {
                Error::Sink(
                    sink::WriteSnafu {
                        message: "sink returned no output path".to_string(),
                    }
                    .build(),
                )
            })?;

            Ok(ExportOutcome::Written { path, rows })
        }
    }
}

/// Reshapes the raw response into a timestamped table.
///
/// Converts each bar's epoch time to a UTC timestamp and keeps only rows
/// inside the closed request range, preserving order. The terminal already
/// bounds the range on its side, so the filter normally passes everything
/// through; it exists because the terminal may hand back boundary-adjacent
/// extra rows.
pub fn build_series(request: &RatesRequest, raw: Vec<RawRate>) -> Result<BarSeries, Error> {
    let mut bars = Vec::with_capacity(raw.len());
    for rate in raw {
        let time = DateTime::from_timestamp(rate.time, 0).ok_or_else(|| {
            Error::Terminal(
                MalformedResponseSnafu {
                    message: format!("bar time {} is not a valid timestamp", rate.time),
                }
                .build(),
            )
        })?;

        if time < request.start || time > request.end {
            continue;
        }

        bars.push(Bar {
            time,
            open: rate.open,
            high: rate.high,
            low: rate.low,
            close: rate.close,
            tick_volume: rate.tick_volume,
            spread: rate.spread,
            real_volume: rate.real_volume,
        });
    }

    Ok(BarSeries {
        symbol: request.symbol.clone(),
        timeframe: request.timeframe,
        bars,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::models::timeframe::Timeframe;
    use crate::terminal::TerminalError;

    use super::*;

    fn rate(time: i64) -> RawRate {
        RawRate {
            time,
            open: 9400.0,
            high: 9420.5,
            low: 9395.0,
            close: 9411.0,
            tick_volume: 1204,
            spread: 2,
            real_volume: 0,
        }
    }

    fn request() -> RatesRequest {
        RatesRequest::new(
            "GER40Cash",
            Timeframe::H1,
            Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2014, 1, 2, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn converts_epoch_seconds_to_utc_timestamps() {
        let eight_am = Utc.with_ymd_and_hms(2014, 1, 1, 8, 0, 0).unwrap();
        let series = build_series(&request(), vec![rate(eight_am.timestamp())]).unwrap();
        assert_eq!(series.bars.len(), 1);
        assert_eq!(series.bars[0].time, eight_am);
        assert_eq!(series.symbol, "GER40Cash");
        assert_eq!(series.timeframe, Timeframe::H1);
    }

    #[test]
    fn keeps_rows_on_both_boundaries() {
        let request = request();
        let series = build_series(
            &request,
            vec![
                rate(request.start.timestamp()),
                rate(request.end.timestamp()),
            ],
        )
        .unwrap();
        assert_eq!(series.bars.len(), 2);
    }

    #[test]
    fn drops_rows_outside_the_range_and_preserves_order() {
        let request = request();
        let before = request.start.timestamp() - 3600;
        let after = request.end.timestamp() + 3600;
        let inside_1 = request.start.timestamp() + 3600;
        let inside_2 = request.start.timestamp() + 7200;

        let series = build_series(
            &request,
            vec![rate(before), rate(inside_1), rate(inside_2), rate(after)],
        )
        .unwrap();

        assert_eq!(series.bars.len(), 2);
        assert!(series.bars[0].time < series.bars[1].time);
    }

    #[test]
    fn an_unrepresentable_epoch_is_a_malformed_response() {
        let result = build_series(&request(), vec![rate(i64::MAX)]);
        assert!(matches!(
            result,
            Err(Error::Terminal(TerminalError::MalformedResponse { .. }))
        ));
    }
}
