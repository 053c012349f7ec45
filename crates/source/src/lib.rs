//! Transports that deliver raw inbound messages to the ingestion loop.

pub mod channel;
pub mod lines;
pub mod websocket;

pub use channel::{channel, ChannelSource};
pub use lines::LineSource;
pub use websocket::WebSocketSource;

use async_trait::async_trait;
use feed_core::{FeedError, Result};

/// Something that yields raw messages, one at a time.
///
/// `Ok(None)` means the peer closed the stream cleanly. Both that and `Err`
/// are terminal: the ingestion loop stops and never calls `receive` again.
#[async_trait]
pub trait Source: Send {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>>;

    /// Human-readable address used in logs.
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<S: Source + ?Sized> Source for Box<S> {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        (**self).receive().await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Connect to `endpoint`, picking the transport from its scheme.
///
/// | scheme    | transport                        |
/// |-----------|----------------------------------|
/// | `ws://`   | WebSocket, one message per frame |
/// | `tcp://`  | TCP, one message per line        |
/// | `unix://` | Unix socket, one message per line|
pub async fn open(endpoint: &str) -> Result<Box<dyn Source>> {
    let Some((scheme, rest)) = endpoint.split_once("://") else {
        return Err(FeedError::InvalidConfiguration(format!(
            "endpoint '{endpoint}' has no scheme (expected ws://, tcp:// or unix://)"
        )));
    };

    let source: Box<dyn Source> = match scheme {
        "ws" => Box::new(WebSocketSource::connect(endpoint).await?),
        "tcp" => Box::new(LineSource::connect_tcp(rest).await?),
        #[cfg(unix)]
        "unix" => Box::new(LineSource::connect_unix(rest).await?),
        other => {
            return Err(FeedError::InvalidConfiguration(format!(
                "unsupported endpoint scheme '{other}'"
            )))
        }
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_rejects_missing_scheme() {
        assert!(matches!(
            open("localhost:8765").await,
            Err(FeedError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn open_rejects_unknown_scheme() {
        assert!(matches!(
            open("wss://localhost:8765").await,
            Err(FeedError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            open("http://localhost").await,
            Err(FeedError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn open_tcp_line_source() {
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"{\"value\": 1}\n").await.unwrap();
        });

        let mut source = open(&format!("tcp://{addr}")).await.unwrap();
        assert_eq!(source.endpoint(), addr.to_string());
        assert_eq!(source.receive().await.unwrap(), Some(b"{\"value\": 1}".to_vec()));
        assert_eq!(source.receive().await.unwrap(), None);
    }

    #[tokio::test]
    async fn open_reports_unreachable_endpoint_as_source_error() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let err = open(&format!("tcp://{addr}")).await.err().unwrap();
        assert!(matches!(err, FeedError::Source(_)));
    }
}
