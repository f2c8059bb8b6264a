use thiserror::Error;

/// The unified error type for the `rates_exporter` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the terminal session (connection, request,
    /// malformed payload).
    #[error("Terminal error: {0}")]
    Terminal(#[from] crate::terminal::TerminalError),

    /// An error originating from a data sink (e.g., file I/O while writing
    /// the exported table).
    #[error("Sink error: {0}")]
    Sink(#[from] crate::io::sink::SinkError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
