use crate::Source;
use async_trait::async_trait;
use feed_core::{FeedError, Result};
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

/// WebSocket client source: every text or binary frame is one message.
///
/// Pings are answered by the protocol layer and never surface here.
pub struct WebSocketSource {
    url:    String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketSource {
    /// Perform the WebSocket handshake with `url` (e.g. `ws://localhost:8765`).
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| FeedError::Source(format!("connect {url}: {e}")))?;

        info!("Connected to WebSocket source at {url}");
        Ok(Self {
            url: url.to_string(),
            stream,
        })
    }
}

#[async_trait]
impl Source for WebSocketSource {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let Some(frame) = self.stream.next().await else {
                debug!("WebSocket stream {} ended", self.url);
                return Ok(None);
            };

            match frame {
                Ok(Message::Text(text)) => return Ok(Some(text.as_bytes().to_vec())),
                Ok(Message::Binary(data)) => return Ok(Some(data.to_vec())),
                Ok(Message::Close(reason)) => {
                    info!("WebSocket {} closed by peer: {reason:?}", self.url);
                    return Ok(None);
                }
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => continue,
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return Ok(None),
                Err(e) => {
                    warn!("WebSocket {} failed: {e}", self.url);
                    return Err(FeedError::Source(format!("{}: {e}", self.url)));
                }
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
