//! Terminal session over the local HTTP bridge.
//!
//! The terminal process exposes its client API on a loopback HTTP endpoint.
//! [`BridgeSession`] maps the session protocol onto that endpoint:
//! `POST /initialize`, `GET /rates_range`, `GET /last_error`,
//! `POST /shutdown`. When `initialize` is refused, the bridge's
//! `last_error` report is folded into the returned [`TerminalError`] so the
//! caller sees the terminal's own error code.

pub mod params;
pub mod response;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;

use crate::models::rates_request::RatesRequest;
use crate::terminal::{
    ApiSnafu, ClientBuildSnafu, ConnectionFailedSnafu, InvalidTokenSnafu, MalformedResponseSnafu,
    RatesOutcome, TerminalError, TerminalInitError, TerminalSession, TransportSnafu,
};
use crate::utils::env::optional_env_var;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:18812";

/// Environment variable holding the bridge's bearer token, if it requires one.
const BRIDGE_TOKEN_VAR: &str = "MT5_BRIDGE_TOKEN";

/// Error code used when the bridge itself cannot say what went wrong.
const UNKNOWN_ERROR_CODE: i32 = -1;

/// A terminal session speaking to the local bridge endpoint.
pub struct BridgeSession {
    client: Client,
    endpoint: String,
    _token: Option<SecretString>,
}

impl BridgeSession {
    /// Creates a session client for the given endpoint.
    ///
    /// Reads an optional bearer token from the `MT5_BRIDGE_TOKEN`
    /// environment variable. No traffic is sent until
    /// [`initialize`](TerminalSession::initialize) is called.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TerminalInitError> {
        let token = optional_env_var(BRIDGE_TOKEN_VAR).map(|v| SecretString::new(v.into()));

        let mut headers = header::HeaderMap::new();
        if let Some(token) = &token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .context(InvalidTokenSnafu)?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            _token: token,
        })
    }

    /// The endpoint the terminal bridge listens on by default.
    pub fn default_endpoint() -> &'static str {
        DEFAULT_ENDPOINT
    }

    /// Asks the bridge for the terminal's last error. Best-effort: if the
    /// bridge cannot answer, a generic code is substituted.
    async fn last_error(&self) -> (i32, String) {
        let url = format!("{}/last_error", self.endpoint);
        let report = match self.client.get(url).send().await {
            Ok(resp) => resp.json::<response::LastErrorPayload>().await.ok(),
            Err(_) => None,
        };
        match report {
            Some(err) => (err.code, err.message),
            None => (
                UNKNOWN_ERROR_CODE,
                "terminal did not report an error".to_string(),
            ),
        }
    }
}

#[async_trait]
impl TerminalSession for BridgeSession {
    async fn initialize(&self) -> Result<(), TerminalError> {
        info!("initializing terminal session at {}", self.endpoint);
        let resp = self
            .client
            .post(format!("{}/initialize", self.endpoint))
            .send()
            .await
            .context(TransportSnafu)?;

        let payload: response::InitializePayload = resp.json().await.map_err(|e| {
            MalformedResponseSnafu {
                message: e.to_string(),
            }
            .build()
        })?;

        if payload.ok {
            Ok(())
        } else {
            let (code, message) = self.last_error().await;
            ConnectionFailedSnafu { code, message }.fail()
        }
    }

    async fn copy_rates_range(
        &self,
        request: &RatesRequest,
    ) -> Result<RatesOutcome, TerminalError> {
        let query = params::construct_query(request);
        debug!("requesting rates: {query:?}");

        let resp = self
            .client
            .get(format!("{}/rates_range", self.endpoint))
            .query(&query)
            .send()
            .await
            .context(TransportSnafu)?;

        if !resp.status().is_success() {
            let message = resp
                .text()
                .await
                .unwrap_or_else(|_| "unknown terminal error".to_string());
            return ApiSnafu { message }.fail();
        }

        let payload: response::RatesPayload = resp.json().await.map_err(|e| {
            MalformedResponseSnafu {
                message: e.to_string(),
            }
            .build()
        })?;

        Ok(match payload.rates {
            Some(rates) if !rates.is_empty() => RatesOutcome::Rates(rates),
            _ => RatesOutcome::NoData,
        })
    }

    async fn shutdown(&self) {
        if let Err(e) = self
            .client
            .post(format!("{}/shutdown", self.endpoint))
            .send()
            .await
        {
            warn!("terminal shutdown request failed: {e}");
        }
    }
}
