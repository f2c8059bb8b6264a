use serde::Deserialize;

use crate::terminal::RawRate;

/// Payload of `POST /initialize`.
#[derive(Debug, Deserialize)]
pub struct InitializePayload {
    pub ok: bool,
}

/// Payload of `GET /rates_range`.
///
/// `rates` is `null` when the terminal has nothing for the request, matching
/// the null return of the terminal's own API.
#[derive(Debug, Deserialize)]
pub struct RatesPayload {
    pub rates: Option<Vec<RawRate>>,
}

/// Payload of `GET /last_error`.
#[derive(Debug, Deserialize)]
pub struct LastErrorPayload {
    pub code: i32,
    pub message: String,
}
