/*
[INPUT]:  Market symbol, credentials, subscription requests
[OUTPUT]: Raw frames, envelopes and typed market records
[POS]:    WebSocket layer - session over one duplex connection
[UPDATE]: When adding endpoints or changing connection logic
*/

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::{Credentials, RequestSigner};
use crate::error::{OkcoinError, Result};
use crate::types::{MarketData, Request};
use crate::ws::message::{Envelope, PING_MESSAGE, PONG_MESSAGE, build_message, decode_envelopes};
use crate::ws::transport::{BufferSizes, Connection, Connector, TungsteniteConnector};

/// Endpoint of the USD market
pub const USD_WS_API_URL: &str = "wss://real.okcoin.com:10440/websocket/okcoinapi";
/// Endpoint of the CNY market
pub const CNY_WS_API_URL: &str = "wss://real.okcoin.cn:10440/websocket/okcoinapi";

const FRAME_SAMPLE_LIMIT: usize = 3;
const SUBSCRIPTION_LOG_LIMIT: usize = 10;
const RAW_LOG_MAX_BYTES: usize = 1024;

static FRAME_SAMPLE_COUNT: AtomicUsize = AtomicUsize::new(0);
static SUBSCRIBE_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Market symbol to endpoint URL
    #[serde(default = "default_endpoints")]
    pub endpoints: BTreeMap<String, String>,
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
    #[serde(default = "default_write_buffer_size")]
    pub write_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            read_buffer_size: default_read_buffer_size(),
            write_buffer_size: default_write_buffer_size(),
        }
    }
}

impl SessionConfig {
    /// Add or replace the endpoint for a market symbol
    pub fn with_endpoint(mut self, symbol: impl Into<String>, url: impl Into<String>) -> Self {
        self.endpoints.insert(symbol.into(), url.into());
        self
    }

    /// Resolve the endpoint for a market symbol
    pub fn endpoint(&self, symbol: &str) -> Result<Url> {
        let raw = self.endpoints.get(symbol).ok_or_else(|| {
            OkcoinError::Validation(format!("unknown market symbol: {symbol}"))
        })?;
        Ok(Url::parse(raw)?)
    }

    fn buffer_sizes(&self) -> BufferSizes {
        BufferSizes {
            read: self.read_buffer_size,
            write: self.write_buffer_size,
        }
    }
}

fn default_endpoints() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("btc_usd".to_string(), USD_WS_API_URL.to_string()),
        ("btc_cny".to_string(), CNY_WS_API_URL.to_string()),
    ])
}

fn default_read_buffer_size() -> usize {
    10_000
}

fn default_write_buffer_size() -> usize {
    1_000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
}

/// Client session owning one stream connection.
///
/// Every operation completes when its I/O completes. There is no reconnect,
/// timeout or background task: a fatal transport error drops the connection,
/// leaving the session disconnected until the caller connects again.
pub struct Session {
    signer: RequestSigner,
    config: SessionConfig,
    connector: Box<dyn Connector>,
    connection: Option<Box<dyn Connection>>,
    symbol: Option<String>,
}

impl Session {
    /// Create a session with default configuration
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, SessionConfig::default())
    }

    /// Create a session dialing through tokio-tungstenite
    pub fn with_config(credentials: Credentials, config: SessionConfig) -> Self {
        let connector = TungsteniteConnector::new(config.buffer_sizes());
        Self::with_connector(credentials, config, connector)
    }

    /// Create a session dialing through a custom connector
    pub fn with_connector(
        credentials: Credentials,
        config: SessionConfig,
        connector: impl Connector + 'static,
    ) -> Self {
        Self {
            signer: RequestSigner::new(credentials),
            config,
            connector: Box::new(connector),
            connection: None,
            symbol: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.connection.is_some() {
            SessionState::Connected
        } else {
            SessionState::Disconnected
        }
    }

    /// Market symbol of the open connection
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Dial the endpoint registered for `symbol`.
    ///
    /// An unknown symbol is rejected without dialing.
    pub async fn connect(&mut self, symbol: &str) -> Result<()> {
        if self.connection.is_some() {
            return Err(OkcoinError::Validation("session already connected".to_string()));
        }
        let url = self.config.endpoint(symbol)?;
        let connection = self.connector.dial(&url).await?;
        info!(symbol, url = %url, "okcoin stream connected");
        self.connection = Some(connection);
        self.symbol = Some(symbol.to_string());
        Ok(())
    }

    /// Release the connection. The session is disconnected afterwards even if
    /// the transport reports an error.
    pub async fn close(&mut self) -> Result<()> {
        let mut connection = self.connection.take().ok_or_else(not_connected)?;
        let symbol = self.symbol.take();
        info!(symbol = symbol.as_deref().unwrap_or_default(), "okcoin stream closed");
        connection.close().await
    }

    /// Send a ping and wait for the matching pong
    pub async fn heartbeat(&mut self) -> Result<()> {
        let exchanged = exchange_ping(&mut **self.connection_mut()?).await;
        let reply = self.settle(exchanged)?;
        if reply != PONG_MESSAGE.as_bytes() {
            return Err(OkcoinError::Protocol(format!(
                "unexpected heartbeat reply: {}",
                String::from_utf8_lossy(&reply)
            )));
        }
        debug!("heartbeat acknowledged");
        Ok(())
    }

    /// Send all requests as one frame
    pub async fn send(&mut self, requests: &[Request]) -> Result<()> {
        let message = build_message(requests, &self.signer)?;
        let written = self.connection_mut()?.write_text(&message).await;
        self.settle(written)?;
        log_subscription_sent(requests, message.len());
        Ok(())
    }

    /// Wait for the next frame and return it untouched
    pub async fn read_raw(&mut self) -> Result<Vec<u8>> {
        let read = self.connection_mut()?.read_text().await;
        let frame = self.settle(read)?;
        log_frame_sample_once(&frame);
        Ok(frame)
    }

    /// Read one frame and split it into envelopes
    pub async fn read_envelopes(&mut self) -> Result<Vec<Envelope>> {
        let frame = self.read_raw().await?;
        decode_envelopes(&frame)
    }

    /// Read one frame and decode every envelope.
    ///
    /// All or nothing: the first envelope that fails to decode fails the
    /// whole call. Use [`Session::read_envelopes`] and [`Envelope::classify`]
    /// to skip individual records instead.
    pub async fn read_typed(&mut self) -> Result<Vec<MarketData>> {
        self.read_envelopes()
            .await?
            .iter()
            .map(Envelope::classify)
            .collect()
    }

    fn connection_mut(&mut self) -> Result<&mut Box<dyn Connection>> {
        self.connection.as_mut().ok_or_else(not_connected)
    }

    /// Drop the connection when a transport result is fatal, so the session
    /// reads as disconnected and can connect again without `close`.
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_fatal() && self.connection.take().is_some() {
                let symbol = self.symbol.take();
                warn!(
                    symbol = symbol.as_deref().unwrap_or_default(),
                    error = %err,
                    "okcoin stream lost"
                );
            }
        }
        result
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signer", &self.signer)
            .field("config", &self.config)
            .field("state", &self.state())
            .field("symbol", &self.symbol)
            .finish()
    }
}

async fn exchange_ping(connection: &mut dyn Connection) -> Result<Vec<u8>> {
    connection.write_text(PING_MESSAGE).await?;
    connection.read_text().await
}

fn not_connected() -> OkcoinError {
    OkcoinError::Connection("not connected".to_string())
}

fn log_subscription_sent(requests: &[Request], bytes: usize) {
    let count = SUBSCRIBE_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count >= SUBSCRIPTION_LOG_LIMIT {
        return;
    }
    let channels = requests
        .iter()
        .map(|request| format!("{}:{}", request.event(), request.channel))
        .collect::<Vec<_>>()
        .join(",");
    info!(
        sample_index = count + 1,
        sample_limit = SUBSCRIPTION_LOG_LIMIT,
        requests = requests.len(),
        bytes,
        channels = %channels,
        "ws subscription sent"
    );
}

fn log_frame_sample_once(frame: &[u8]) {
    let count = FRAME_SAMPLE_COUNT.fetch_add(1, Ordering::Relaxed);
    if count >= FRAME_SAMPLE_LIMIT {
        return;
    }
    let text = String::from_utf8_lossy(frame);
    let preview = truncate_for_log(&text, RAW_LOG_MAX_BYTES);
    debug!(
        sample_index = count + 1,
        sample_limit = FRAME_SAMPLE_LIMIT,
        bytes = frame.len(),
        message = %preview,
        "ws frame sample"
    );
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}
