/*
[INPUT]:  Endpoint URLs and text frames
[OUTPUT]: Duplex text-frame connections
[POS]:    WebSocket layer - transport seam between the session and the socket
[UPDATE]: When changing socket options or adding transports
*/

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async_with_config};
use tracing::debug;
use url::Url;

use crate::error::{OkcoinError, Result};

/// Opens connections to an endpoint
#[async_trait]
pub trait Connector: Send + Sync {
    async fn dial(&self, url: &Url) -> Result<Box<dyn Connection>>;
}

/// One open duplex connection exchanging text frames
#[async_trait]
pub trait Connection: Send {
    async fn write_text(&mut self, text: &str) -> Result<()>;

    /// Wait for the next data frame and return its bytes
    async fn read_text(&mut self) -> Result<Vec<u8>>;

    async fn close(&mut self) -> Result<()>;
}

/// Socket buffer sizes used when dialing
#[derive(Debug, Clone, Copy)]
pub struct BufferSizes {
    pub read: usize,
    pub write: usize,
}

/// WebSocket connector backed by tokio-tungstenite
#[derive(Debug, Clone, Copy)]
pub struct TungsteniteConnector {
    buffers: BufferSizes,
}

impl TungsteniteConnector {
    pub fn new(buffers: BufferSizes) -> Self {
        Self { buffers }
    }

    fn ws_config(&self) -> WebSocketConfig {
        let mut config = WebSocketConfig::default();
        config.read_buffer_size = self.buffers.read;
        config.write_buffer_size = self.buffers.write;
        config
    }
}

#[async_trait]
impl Connector for TungsteniteConnector {
    async fn dial(&self, url: &Url) -> Result<Box<dyn Connection>> {
        let (stream, response) =
            connect_async_with_config(url.as_str(), Some(self.ws_config()), false).await?;
        debug!(url = %url, status = %response.status(), "websocket handshake complete");
        Ok(Box::new(TungsteniteConnection { stream }))
    }
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct TungsteniteConnection {
    stream: WsStream,
}

#[async_trait]
impl Connection for TungsteniteConnection {
    async fn write_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(WsMessage::Text(text.to_string().into())).await?;
        Ok(())
    }

    async fn read_text(&mut self) -> Result<Vec<u8>> {
        loop {
            match self.stream.next().await {
                Some(Ok(WsMessage::Text(text))) => return Ok(text.as_str().as_bytes().to_vec()),
                Some(Ok(WsMessage::Binary(bytes))) => return Ok(bytes.to_vec()),
                Some(Ok(WsMessage::Ping(_))) | Some(Ok(WsMessage::Pong(_))) => {}
                Some(Ok(WsMessage::Frame(_))) => {}
                Some(Ok(WsMessage::Close(frame))) => {
                    let reason = match frame {
                        Some(frame) => format!(
                            "closed by peer: {} {}",
                            u16::from(frame.code),
                            frame.reason.as_str()
                        ),
                        None => "closed by peer".to_string(),
                    };
                    return Err(OkcoinError::Connection(reason));
                }
                Some(Err(err)) => return Err(err.into()),
                None => return Err(OkcoinError::Connection("stream ended".to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
