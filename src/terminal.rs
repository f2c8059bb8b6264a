//! Session abstraction for the external trading terminal.
//!
//! This module defines the [`TerminalSession`] trait, the client-side view of
//! the terminal's session protocol: a session is opened, one bulk
//! historical-rates request is issued, and the session is closed. The
//! terminal owns the market data; this crate is solely a client of it.
//!
//! Keeping the session behind a trait lets the export pipeline run against
//! any transport to the terminal, and against an in-process double in tests.
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn TerminalSession`).
//!
//! The empty-data case is deliberately a [`RatesOutcome`] variant rather than
//! an error or a bare empty vector, so every caller has to branch on it.

pub mod bridge;

use async_trait::async_trait;
use serde::Deserialize;
use snafu::{Backtrace, Snafu};

use crate::models::rates_request::RatesRequest;

/// One bar as the terminal natively reports it.
///
/// `time` is the bar open time in Unix epoch seconds; the export pipeline
/// converts it to a calendar timestamp before anything is written out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRate {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub tick_volume: u64,
    pub spread: u32,
    pub real_volume: u64,
}

/// Result of a bulk rates request.
#[derive(Debug, Clone, PartialEq)]
pub enum RatesOutcome {
    /// The terminal returned at least one bar, oldest first.
    Rates(Vec<RawRate>),
    /// The terminal returned no rows (or a null result) for the request.
    NoData,
}

/// Client-side view of the terminal's session protocol.
#[async_trait]
pub trait TerminalSession {
    /// Opens the session with the terminal.
    ///
    /// On failure the error carries the terminal's own error code.
    async fn initialize(&self) -> Result<(), TerminalError>;

    /// Requests every bar for the symbol and period within the closed date
    /// range of `request`.
    async fn copy_rates_range(
        &self,
        request: &RatesRequest,
    ) -> Result<RatesOutcome, TerminalError>;

    /// Closes the session. Best-effort: failures are logged, never returned.
    async fn shutdown(&self);
}

/// Errors that can occur while creating a session instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TerminalInitError {
    /// Failed to construct the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The bridge token contains characters that cannot go into a header.
    #[snafu(display("Invalid bridge token: {source}"))]
    InvalidToken {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors reported by a [`TerminalSession`] implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TerminalError {
    /// The session could not be established. `code` is the error code the
    /// terminal itself reported.
    #[snafu(display("Terminal connection failed (code {code}): {message}"))]
    ConnectionFailed {
        code: i32,
        message: String,
        backtrace: Backtrace,
    },

    /// The request never reached the terminal (e.g., network failure,
    /// timeout).
    #[snafu(display("Terminal request failed: {source}"))]
    Transport {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The terminal rejected the request with its own error message.
    #[snafu(display("Terminal reported an error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The terminal answered with a payload this client cannot interpret.
    #[snafu(display("Malformed terminal response: {message}"))]
    MalformedResponse {
        message: String,
        backtrace: Backtrace,
    },

    /// An error during session construction.
    #[snafu(display("Session initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: TerminalInitError,
    },
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::models::timeframe::Timeframe;

    use super::*;

    struct LiveSession;
    struct ReplaySession;

    #[async_trait]
    impl TerminalSession for LiveSession {
        async fn initialize(&self) -> Result<(), TerminalError> {
            Ok(())
        }

        async fn copy_rates_range(
            &self,
            _request: &RatesRequest,
        ) -> Result<RatesOutcome, TerminalError> {
            Ok(RatesOutcome::NoData)
        }

        async fn shutdown(&self) {}
    }

    #[async_trait]
    impl TerminalSession for ReplaySession {
        async fn initialize(&self) -> Result<(), TerminalError> {
            Ok(())
        }

        async fn copy_rates_range(
            &self,
            _request: &RatesRequest,
        ) -> Result<RatesOutcome, TerminalError> {
            Ok(RatesOutcome::Rates(vec![RawRate {
                time: 1_388_592_000,
                open: 9_400.0,
                high: 9_420.5,
                low: 9_395.0,
                close: 9_411.0,
                tick_volume: 1_204,
                spread: 2,
                real_volume: 0,
            }]))
        }

        async fn shutdown(&self) {}
    }

    // Sessions are selected at runtime, so the trait has to stay object safe.
    fn get_session(name: &str) -> Box<dyn TerminalSession> {
        if name == "live" {
            Box::new(LiveSession)
        } else {
            Box::new(ReplaySession)
        }
    }

    #[tokio::test]
    async fn sessions_dispatch_dynamically() {
        let session = get_session("replay");
        let request =
            RatesRequest::new("GER40Cash", Timeframe::H1, Utc::now(), Utc::now()).unwrap();

        let outcome = session.copy_rates_range(&request).await.unwrap();
        assert!(matches!(outcome, RatesOutcome::Rates(ref rates) if rates.len() == 1));
    }
}
